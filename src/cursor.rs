//! Detached, staleness-checked cursors over a [`GrowVec`].
//!
//! A cursor does not borrow the vector it points into. It records a slot
//! offset together with a fence token minted by the vector, and it is
//! re-checked against the vector's current fence on every access. The fence
//! changes whenever the vector replaces its buffer or changes its length, so
//! a cursor held across such a mutation reports itself stale at its next use
//! instead of reading through a dead buffer.
//!
//! Because the vector is passed in at each use, operating on a cursor after
//! its vector is gone is a compile error rather than a runtime hazard.
//!
//! # Features
//! - `Copy` cursors with no lifetime tie to the vector
//! - Staleness detected at use time, not at mutation time
//! - Read-only [`Cursor`] and mutating [`CursorMut`] variants
//!
//! # Example
//! ```rust
//! use grow_vec::{Error, GrowVec};
//!
//! let mut vec = GrowVec::from([10, 20, 30]);
//!
//! // Walk the elements with an explicit cursor.
//! let mut cur = vec.begin();
//! let mut seen = Vec::new();
//! while cur != vec.end() {
//!     seen.push(*cur.get(&vec).unwrap());
//!     cur.advance(&vec);
//! }
//! assert_eq!(seen, [10, 20, 30]);
//!
//! // Growth replaces the buffer; the old cursor reports stale at use.
//! let cur = vec.begin();
//! for i in 0..10 {
//!     vec.push(i);
//! }
//! assert_eq!(cur.get(&vec), Err(Error::NotDereferenceable));
//! ```

use core::fmt;
use core::marker::PhantomData;
use core::ops::Sub;

use crate::error::Error;
use crate::vec::GrowVec;

/// Freshness token minted by a [`GrowVec`].
///
/// A stored fence equals the vector's live fence exactly when the buffer has
/// not been replaced and the length has not changed since minting. The owner
/// id additionally pins the token to one vector, so a cursor presented to a
/// different vector tests stale instead of addressing foreign slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fence {
    /// Id of the issuing vector; 0 marks a detached cursor.
    pub(crate) owner: u64,
    /// Buffer generation at mint time.
    pub(crate) epoch: u64,
    /// One past the last occupied slot at mint time.
    pub(crate) end: usize,
}

impl Fence {
    /// Token carried by cursors that belong to no vector. Never equal to any
    /// live fence, since vector ids start at 1.
    pub(crate) const DETACHED: Fence = Fence { owner: 0, epoch: 0, end: 0 };
}

/// A read-only cursor into a [`GrowVec`].
///
/// Minted by [`GrowVec::begin`] and [`GrowVec::end`], or by widening a
/// [`CursorMut`]. An end cursor is valid but not dereferenceable.
pub struct Cursor<T> {
    pub(crate) pos: usize,
    pub(crate) fence: Fence,
    marker: PhantomData<fn() -> T>,
}

/// A cursor into a [`GrowVec`] that can also hand out mutable references.
///
/// Minted by [`GrowVec::begin_mut`] and [`GrowVec::end_mut`], and returned
/// by [`GrowVec::insert`] and [`GrowVec::erase`]. Widens into a [`Cursor`]
/// via `From`, never the other way around.
pub struct CursorMut<T> {
    pub(crate) pos: usize,
    pub(crate) fence: Fence,
    marker: PhantomData<fn() -> T>,
}

impl<T> Cursor<T> {
    #[inline]
    pub(crate) fn mint(pos: usize, fence: Fence) -> Self {
        Cursor { pos, fence, marker: PhantomData }
    }

    /// Creates a detached cursor.
    ///
    /// A detached cursor belongs to no vector: it is never valid, never
    /// dereferenceable, and advancing it has no effect.
    #[inline]
    pub fn new() -> Self {
        Cursor::mint(0, Fence::DETACHED)
    }

    /// Returns `true` if this cursor's fence matches `vec`'s current fence.
    ///
    /// Valid means the vector has neither replaced its buffer nor changed
    /// its length since the cursor was minted. An end cursor is valid yet
    /// still refuses to dereference.
    #[inline]
    pub fn is_valid(&self, vec: &GrowVec<T>) -> bool {
        self.fence == vec.live_fence()
    }

    /// Returns a reference to the element this cursor points at.
    ///
    /// Fails with [`Error::NotDereferenceable`] if the cursor is stale,
    /// detached, or positioned one past the last element.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let vec = GrowVec::from([1, 2, 3]);
    /// assert_eq!(vec.begin().get(&vec), Ok(&1));
    /// assert_eq!(vec.end().get(&vec), Err(Error::NotDereferenceable));
    /// ```
    #[inline]
    pub fn get<'a>(&self, vec: &'a GrowVec<T>) -> Result<&'a T, Error> {
        if self.fence != vec.live_fence() || self.pos == self.fence.end {
            return Err(Error::NotDereferenceable);
        }
        Ok(vec.slot(self.pos))
    }

    /// Moves the cursor one slot forward.
    ///
    /// Advancing is a silent no-op when the cursor is stale, detached, or
    /// already at the end position; dereferencing is where staleness turns
    /// into an error.
    ///
    /// Cursors are `Copy`, so when a pre-advance snapshot is needed, bind
    /// one first: `let here = cur; cur.advance(&vec);`.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let vec = GrowVec::from([1, 2, 3]);
    /// let mut cur = vec.begin();
    /// cur.advance(&vec);
    /// assert_eq!(cur.get(&vec), Ok(&2));
    /// ```
    #[inline]
    pub fn advance(&mut self, vec: &GrowVec<T>) {
        if self.fence == vec.live_fence() && self.pos < self.fence.end {
            self.pos += 1;
        }
    }
}

impl<T> CursorMut<T> {
    #[inline]
    pub(crate) fn mint(pos: usize, fence: Fence) -> Self {
        CursorMut { pos, fence, marker: PhantomData }
    }

    /// Creates a detached cursor. See [`Cursor::new`].
    #[inline]
    pub fn new() -> Self {
        CursorMut::mint(0, Fence::DETACHED)
    }

    /// Returns `true` if this cursor's fence matches `vec`'s current fence.
    #[inline]
    pub fn is_valid(&self, vec: &GrowVec<T>) -> bool {
        self.fence == vec.live_fence()
    }

    /// Returns a reference to the element this cursor points at.
    ///
    /// Fails with [`Error::NotDereferenceable`] if the cursor is stale,
    /// detached, or positioned one past the last element.
    #[inline]
    pub fn get<'a>(&self, vec: &'a GrowVec<T>) -> Result<&'a T, Error> {
        if self.fence != vec.live_fence() || self.pos == self.fence.end {
            return Err(Error::NotDereferenceable);
        }
        Ok(vec.slot(self.pos))
    }

    /// Returns a mutable reference to the element this cursor points at.
    ///
    /// Writing through the returned reference does not disturb the fence;
    /// only structural mutations do.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec = GrowVec::from([1, 2, 3]);
    /// let cur = vec.begin_mut();
    /// *cur.get_mut(&mut vec).unwrap() = 10;
    /// assert_eq!(vec.get(0), Ok(&10));
    /// ```
    #[inline]
    pub fn get_mut<'a>(&self, vec: &'a mut GrowVec<T>) -> Result<&'a mut T, Error> {
        if self.fence != vec.live_fence() || self.pos == self.fence.end {
            return Err(Error::NotDereferenceable);
        }
        Ok(vec.slot_mut(self.pos))
    }

    /// Moves the cursor one slot forward. See [`Cursor::advance`].
    #[inline]
    pub fn advance(&mut self, vec: &GrowVec<T>) {
        if self.fence == vec.live_fence() && self.pos < self.fence.end {
            self.pos += 1;
        }
    }
}

// Cursors are plain offsets plus a token, so they copy freely and carry no
// bound on T. The manual impls keep the derives from demanding T: Clone.

impl<T> Clone for Cursor<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<T> {}

impl<T> Clone for CursorMut<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CursorMut<T> {}

impl<T> Default for Cursor<T> {
    #[inline]
    fn default() -> Self {
        Cursor::new()
    }
}

impl<T> Default for CursorMut<T> {
    #[inline]
    fn default() -> Self {
        CursorMut::new()
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("pos", &self.pos).field("fence", &self.fence).finish()
    }
}

impl<T> fmt::Debug for CursorMut<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("pos", &self.pos).field("fence", &self.fence).finish()
    }
}

impl<T> PartialEq for Cursor<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.fence == other.fence
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> PartialEq for CursorMut<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.fence == other.fence
    }
}

impl<T> Eq for CursorMut<T> {}

impl<T> PartialEq<CursorMut<T>> for Cursor<T> {
    #[inline]
    fn eq(&self, other: &CursorMut<T>) -> bool {
        self.pos == other.pos && self.fence == other.fence
    }
}

impl<T> PartialEq<Cursor<T>> for CursorMut<T> {
    #[inline]
    fn eq(&self, other: &Cursor<T>) -> bool {
        self.pos == other.pos && self.fence == other.fence
    }
}

impl<T> From<CursorMut<T>> for Cursor<T> {
    #[inline]
    fn from(cur: CursorMut<T>) -> Self {
        Cursor::mint(cur.pos, cur.fence)
    }
}

impl<T> Sub for Cursor<T> {
    type Output = isize;

    /// Signed distance in slots between two cursors.
    ///
    /// Offsets are subtracted as-is; the result is only meaningful for
    /// cursors minted against the same vector state.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let vec = GrowVec::from([1, 2, 3]);
    /// assert_eq!(vec.end() - vec.begin(), 3);
    /// assert_eq!(vec.begin() - vec.end(), -3);
    /// ```
    #[inline]
    fn sub(self, rhs: Self) -> isize {
        self.pos as isize - rhs.pos as isize
    }
}
