#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]

//! A growable contiguous vector that detects cursor invalidation at use
//! time.
//!
//! [`GrowVec`] owns one buffer and replaces it explicitly when it grows.
//! [`Cursor`] and [`CursorMut`] are detached cursors carrying a fence token
//! that is re-checked against the vector on every access, so using a cursor
//! across an invalidating mutation reports an [`Error`] instead of reading
//! through a replaced buffer.
//!
//! # Example
//! ```rust
//! use grow_vec::{Error, GrowVec};
//!
//! let mut vec = GrowVec::from([1, 2, 3]);
//! let cur = vec.begin();
//! assert_eq!(cur.get(&vec), Ok(&1));
//!
//! vec.push(4); // outgrows the buffer, replacing it
//! assert_eq!(cur.get(&vec), Err(Error::NotDereferenceable));
//! ```

pub mod cursor;
pub mod error;
pub mod vec;

pub use crate::cursor::{Cursor, CursorMut};
pub use crate::error::Error;
pub use crate::vec::GrowVec;
