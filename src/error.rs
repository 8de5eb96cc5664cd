//! Failure taxonomy shared by the container and its cursors.

use thiserror::Error;

/// Errors reported by [`GrowVec`](crate::GrowVec) operations and cursor
/// accesses.
///
/// Each failing operation maps to exactly one variant, so call sites can
/// distinguish the conditions without inspecting messages. All variants are
/// `Copy` and comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// `pop` was called on a vector that holds no elements.
    #[error("pop from an empty vector")]
    EmptyVec,

    /// Checked element access with an index at or beyond the current length.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The vector length at the time of the call.
        len: usize,
    },

    /// `insert` or `erase` was handed a cursor whose offset falls outside
    /// the addressable range.
    #[error("cursor offset {offset} out of range for length {len}")]
    CursorOutOfRange {
        /// The offset carried by the cursor.
        offset: usize,
        /// The vector length at the time of the call.
        len: usize,
    },

    /// A cursor dereference failed because the cursor is stale, detached,
    /// or positioned one past the last element.
    #[error("cursor is not dereferenceable")]
    NotDereferenceable,
}
