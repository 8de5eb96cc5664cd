//! A growable vector with explicit buffer replacement and fence-checked
//! cursors.
//!
//! This module provides `GrowVec`, a contiguous sequence container that owns
//! one buffer and keeps every slot up to its capacity initialized. Growth is
//! never hidden: a full buffer is replaced by a fresh allocation, the live
//! prefix is cloned over, and the old buffer is released. Every buffer
//! replacement and every length change moves the vector's fence, which is
//! how outstanding cursors learn that they are stale (see the
//! [`cursor`](crate::cursor) module).
//!
//! # Features
//! - Explicit growth law: a full buffer grows to `capacity * 2 + 1` slots,
//!   doubled further until the request fits
//! - Checked access everywhere; failures are [`Error`] values, not aborts
//! - Cursor-addressed insertion and erasure with shift semantics
//!
//! # Example
//! ```rust
//! use grow_vec::GrowVec;
//!
//! let mut vec: GrowVec<i32> = GrowVec::new();
//! vec.push(1);
//! vec.push(2);
//! vec.push(3);
//!
//! assert_eq!(vec.to_string(), "[1, 2, 3]");
//! assert_eq!(vec.capacity(), 3); // capacities run 1, 3, 7, 15, ...
//!
//! let cur = vec.insert(vec.begin(), 0).unwrap();
//! assert_eq!(cur.get(&vec), Ok(&0));
//! assert_eq!(vec.to_string(), "[0, 1, 2, 3]");
//! ```

use core::fmt;
use core::iter;
use core::mem;
use core::slice;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::cursor::{Cursor, CursorMut, Fence};
use crate::error::Error;

// Vector ids start at 1 so that 0 stays reserved for detached cursors.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[inline]
fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A growable contiguous vector with staleness-checked cursors.
///
/// The first `len` slots of the buffer are the live elements; the remaining
/// slots stay initialized with leftover or default values and are invisible
/// through the API. Appending beyond the capacity replaces the buffer with
/// one of `capacity * 2 + 1` slots (doubled further until the request fits),
/// so a push-only workload sees the capacity trajectory 1, 3, 7, 15, ...
///
/// Element types must be `Default + Clone` for the allocating and mutating
/// operations: new slots are default-filled and growth clones the live
/// prefix into the replacement buffer. Read-only queries carry no bounds.
pub struct GrowVec<T> {
    // Physical buffer; `buf.len()` can exceed `cap` after a shrink.
    buf: Box<[T]>,
    // Number of live elements, always <= cap.
    len: usize,
    // Advertised capacity, always <= buf.len().
    cap: usize,
    // Identity minted at construction; folded into every fence.
    id: u64,
    // Bumped whenever the buffer is replaced.
    epoch: u64,
}

impl<T> GrowVec<T> {
    /// Creates a new empty `GrowVec` without allocating.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let vec: GrowVec<i32> = GrowVec::new();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        GrowVec {
            buf: Vec::new().into_boxed_slice(),
            len: 0,
            cap: 0,
            id: next_id(),
            epoch: 0,
        }
    }

    /// Returns the number of live elements.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec: GrowVec<i32> = GrowVec::new();
    /// assert_eq!(vec.len(), 0);
    ///
    /// vec.push(1);
    /// assert_eq!(vec.len(), 1);
    /// ```
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no elements.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec: GrowVec<i32> = GrowVec::new();
    /// assert!(vec.is_empty());
    ///
    /// vec.push(1);
    /// assert!(!vec.is_empty());
    /// ```
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the advertised capacity.
    ///
    /// After [`shrink_to_fit`](GrowVec::shrink_to_fit) this can be smaller
    /// than the physical buffer; everything else keeps the two equal.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec: GrowVec<i32> = GrowVec::new();
    /// vec.push(1);
    /// vec.push(2);
    /// assert_eq!(vec.capacity(), 3); // 1, then 1 * 2 + 1
    /// ```
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns a reference to the element at `index`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] when `index` is at or beyond
    /// the current length; that includes `index == len()` for every length,
    /// zero included.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let vec = GrowVec::from([10, 20]);
    /// assert_eq!(vec.get(0), Ok(&10));
    /// assert_eq!(vec.get(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, Error> {
        if index < self.len {
            Ok(&self.buf[index])
        } else {
            Err(Error::IndexOutOfRange { index, len: self.len })
        }
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] when `index` is at or beyond
    /// the current length.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec = GrowVec::from([10, 20]);
    /// *vec.get_mut(0).unwrap() = 30;
    /// assert_eq!(vec.get(0), Ok(&30));
    /// ```
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        if index < self.len {
            Ok(&mut self.buf[index])
        } else {
            Err(Error::IndexOutOfRange { index, len: self.len })
        }
    }

    /// Mints a read-only cursor at the first element.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let vec = GrowVec::from([1, 2, 3]);
    /// assert_eq!(vec.begin().get(&vec), Ok(&1));
    /// assert_eq!(vec.end() - vec.begin(), 3);
    /// ```
    #[inline]
    pub fn begin(&self) -> Cursor<T> {
        Cursor::mint(0, self.live_fence())
    }

    /// Mints a read-only cursor one past the last element.
    ///
    /// The end cursor is valid but never dereferenceable.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let vec = GrowVec::from([1]);
    /// assert_eq!(vec.end().get(&vec), Err(Error::NotDereferenceable));
    /// ```
    #[inline]
    pub fn end(&self) -> Cursor<T> {
        Cursor::mint(self.len, self.live_fence())
    }

    /// Mints a mutating cursor at the first element.
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<T> {
        CursorMut::mint(0, self.live_fence())
    }

    /// Mints a mutating cursor one past the last element.
    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<T> {
        CursorMut::mint(self.len, self.live_fence())
    }

    /// Returns a borrowing iterator over the live elements.
    ///
    /// The borrow makes mutating while iterating a compile error; cursors
    /// are the surface that trades that for a use-time staleness check.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let vec = GrowVec::from([1, 2, 3]);
    /// let doubled: Vec<i32> = vec.iter().map(|x| x * 2).collect();
    /// assert_eq!(doubled, [2, 4, 6]);
    /// ```
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.buf[..self.len].iter()
    }

    /// Returns a borrowing iterator with mutable references.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec = GrowVec::from([1, 2, 3]);
    /// for x in vec.iter_mut() {
    ///     *x *= 2;
    /// }
    /// assert_eq!(vec.to_string(), "[2, 4, 6]");
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.buf[..self.len].iter_mut()
    }

    /// The fence cursors are checked against: identity, buffer generation,
    /// and one past the last live slot.
    #[inline]
    pub(crate) fn live_fence(&self) -> Fence {
        Fence { owner: self.id, epoch: self.epoch, end: self.len }
    }

    // Slot accessors for cursors that already passed the fence check.
    #[inline]
    pub(crate) fn slot(&self, pos: usize) -> &T {
        &self.buf[pos]
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, pos: usize) -> &mut T {
        &mut self.buf[pos]
    }
}

impl<T: Default + Clone> GrowVec<T> {
    /// Creates an empty `GrowVec` with a default-filled buffer of `cap`
    /// slots. A capacity of 0 allocates nothing.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let vec: GrowVec<i32> = GrowVec::with_capacity(4);
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        GrowVec {
            buf: Self::allocate(cap),
            len: 0,
            cap,
            id: next_id(),
            epoch: 0,
        }
    }

    /// Grows the capacity to exactly `min_cap` if it is currently smaller.
    ///
    /// The argument is an absolute capacity, not an additional amount as in
    /// the standard library's `Vec::reserve`. Growing replaces the buffer
    /// and stales outstanding cursors; an already satisfied request changes
    /// nothing.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec: GrowVec<i32> = GrowVec::new();
    /// vec.reserve(10);
    /// assert_eq!(vec.capacity(), 10);
    ///
    /// vec.reserve(4); // already satisfied
    /// assert_eq!(vec.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, min_cap: usize) {
        if min_cap > self.cap {
            self.realloc(min_cap);
        }
    }

    /// Lowers the advertised capacity to the current length.
    ///
    /// Bookkeeping only: the buffer is not replaced, no storage is returned
    /// to the allocator, and outstanding cursors stay valid. The next
    /// operation that outgrows the lowered capacity reallocates as usual.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec: GrowVec<i32> = GrowVec::with_capacity(8);
    /// vec.push(1);
    /// vec.push(2);
    /// let cur = vec.begin();
    ///
    /// vec.shrink_to_fit();
    /// assert_eq!(vec.capacity(), 2);
    /// assert_eq!(cur.get(&vec), Ok(&1)); // no reallocation happened
    /// ```
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.cap = self.len;
    }

    /// Removes all elements.
    ///
    /// The buffer is replaced by a fresh default-filled one of the same
    /// capacity, so the removed elements are dropped immediately and every
    /// outstanding cursor goes stale.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let mut vec = GrowVec::from([1, 2, 3]);
    /// let cur = vec.begin();
    ///
    /// vec.clear();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.capacity(), 3);
    /// assert_eq!(cur.get(&vec), Err(Error::NotDereferenceable));
    /// ```
    pub fn clear(&mut self) {
        self.buf = Self::allocate(self.cap);
        self.len = 0;
        self.epoch += 1;
    }

    /// Appends an element, growing the buffer when it is full.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec: GrowVec<i32> = GrowVec::new();
    /// vec.push(1);
    /// vec.push(2);
    /// assert_eq!(vec.len(), 2);
    /// assert_eq!(vec.get(1), Ok(&2));
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        self.grow_to(self.len + 1);
        self.buf[self.len] = value;
        self.len += 1;
    }

    /// Removes and returns the last element.
    ///
    /// The vacated slot is overwritten with `T::default()`, so the vector
    /// gives up ownership of the value it hands back. Fails with
    /// [`Error::EmptyVec`] on an empty vector.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::{Error, GrowVec};
    ///
    /// let mut vec = GrowVec::from([1, 2]);
    /// assert_eq!(vec.pop(), Ok(2));
    /// assert_eq!(vec.pop(), Ok(1));
    /// assert_eq!(vec.pop(), Err(Error::EmptyVec));
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Result<T, Error> {
        if self.len == 0 {
            return Err(Error::EmptyVec);
        }
        let value = mem::take(&mut self.buf[self.len - 1]);
        self.len -= 1;
        Ok(value)
    }

    /// Inserts `value` at the slot a cursor points to, shifting that slot
    /// and everything after it one position right.
    ///
    /// Accepts either cursor type. Only the cursor's offset is consulted:
    /// it must be at most the current length, and a stale cursor whose
    /// offset is still in range is honored at that offset. A full vector
    /// grows to `capacity * 2 + 1` first. Returns a fresh cursor at the
    /// inserted slot.
    ///
    /// Fails with [`Error::CursorOutOfRange`] when the offset is beyond the
    /// length; the vector is left untouched.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec = GrowVec::from([1, 2, 3]);
    /// let mut pos = vec.begin();
    /// pos.advance(&vec);
    ///
    /// let cur = vec.insert(pos, 9).unwrap();
    /// assert_eq!(cur.get(&vec), Ok(&9));
    /// assert_eq!(vec.to_string(), "[1, 9, 2, 3]");
    /// ```
    pub fn insert(&mut self, pos: impl Into<Cursor<T>>, value: T) -> Result<CursorMut<T>, Error> {
        let offset = pos.into().pos;
        if offset > self.len {
            return Err(Error::CursorOutOfRange { offset, len: self.len });
        }
        if self.len >= self.cap {
            self.realloc(self.cap * 2 + 1);
        }
        // The dead slot at `len` rotates to `offset` and is overwritten.
        self.buf[offset..=self.len].rotate_right(1);
        self.buf[offset] = value;
        self.len += 1;
        Ok(CursorMut::mint(offset, self.live_fence()))
    }

    /// Removes the element a cursor points to, shifting everything after it
    /// one position left.
    ///
    /// As with [`insert`](GrowVec::insert), only the cursor's offset is
    /// consulted; it must be below the current length. Returns a fresh
    /// cursor at the same offset, which now addresses the shifted-in next
    /// element, or the end position when the last element was removed.
    ///
    /// The removed value is parked in the slot that just went dead and is
    /// dropped once a later operation overwrites or releases that slot.
    ///
    /// Fails with [`Error::CursorOutOfRange`] when the offset is at or
    /// beyond the length; the vector is left untouched.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec = GrowVec::from([1, 9, 2]);
    /// let cur = vec.erase(vec.begin()).unwrap();
    /// assert_eq!(cur.get(&vec), Ok(&9));
    /// assert_eq!(vec.to_string(), "[9, 2]");
    /// ```
    pub fn erase(&mut self, pos: impl Into<Cursor<T>>) -> Result<CursorMut<T>, Error> {
        let offset = pos.into().pos;
        if offset >= self.len {
            return Err(Error::CursorOutOfRange { offset, len: self.len });
        }
        self.buf[offset..self.len].rotate_left(1);
        self.len -= 1;
        Ok(CursorMut::mint(offset, self.live_fence()))
    }

    // Builds a default-filled buffer of n slots; n == 0 allocates nothing.
    fn allocate(n: usize) -> Box<[T]> {
        iter::repeat_with(T::default).take(n).collect()
    }

    // Growth law for appends: capacity * 2 + 1, doubled until the request
    // fits. Requests within the current capacity are no-ops.
    fn grow_to(&mut self, request: usize) {
        if request <= self.cap {
            return;
        }
        let mut new_cap = self.cap * 2 + 1;
        while new_cap < request {
            new_cap *= 2;
        }
        self.realloc(new_cap);
    }

    // Replaces the buffer with one of exactly new_cap slots, cloning the
    // live prefix over. Bumping the epoch stales every outstanding cursor.
    fn realloc(&mut self, new_cap: usize) {
        let mut next = Self::allocate(new_cap);
        for (slot, value) in next[..self.len].iter_mut().zip(self.buf[..self.len].iter()) {
            slot.clone_from(value);
        }
        self.buf = next;
        self.cap = new_cap;
        self.epoch += 1;
    }
}

impl<T> Default for GrowVec<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + Clone> Clone for GrowVec<T> {
    /// Copies the elements into a new vector whose capacity equals the
    /// source's **length**, not its capacity.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut src: GrowVec<i32> = GrowVec::with_capacity(10);
    /// src.push(1);
    /// src.push(2);
    ///
    /// let copy = src.clone();
    /// assert_eq!(copy.capacity(), 2);
    /// assert_eq!(copy.to_string(), "[1, 2]");
    /// ```
    fn clone(&self) -> Self {
        let mut buf = Self::allocate(self.len);
        for (slot, value) in buf.iter_mut().zip(self.buf[..self.len].iter()) {
            slot.clone_from(value);
        }
        GrowVec { buf, len: self.len, cap: self.len, id: next_id(), epoch: 0 }
    }

    /// Overwrites `self` with the source's elements, adopting the source's
    /// **capacity**. The old buffer is released and replaced, so cursors
    /// into `self` go stale.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut src: GrowVec<i32> = GrowVec::with_capacity(10);
    /// src.push(1);
    ///
    /// let mut dst: GrowVec<i32> = GrowVec::new();
    /// dst.clone_from(&src);
    /// assert_eq!(dst.capacity(), 10);
    /// assert_eq!(dst.to_string(), "[1]");
    /// ```
    fn clone_from(&mut self, source: &Self) {
        let mut buf = Self::allocate(source.cap);
        for (slot, value) in buf[..source.len].iter_mut().zip(source.buf[..source.len].iter()) {
            slot.clone_from(value);
        }
        self.buf = buf;
        self.len = source.len;
        self.cap = source.cap;
        self.epoch += 1;
    }
}

/// Builds a vector whose length and capacity both equal `N`.
impl<T, const N: usize> From<[T; N]> for GrowVec<T> {
    fn from(values: [T; N]) -> Self {
        let buf: Box<[T]> = Box::new(values);
        GrowVec { buf, len: N, cap: N, id: next_id(), epoch: 0 }
    }
}

/// Adopts the elements; length and capacity both equal the source length.
impl<T> From<Vec<T>> for GrowVec<T> {
    fn from(values: Vec<T>) -> Self {
        let buf = values.into_boxed_slice();
        let len = buf.len();
        GrowVec { buf, len, cap: len, id: next_id(), epoch: 0 }
    }
}

impl<T> FromIterator<T> for GrowVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        GrowVec::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowVec")
            .field("len", &self.len)
            .field("capacity", &self.cap)
            .field("data", &&self.buf[..self.len])
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.buf[..self.len].iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T: PartialEq> PartialEq for GrowVec<T> {
    /// Element-wise equality over the live prefixes; capacity is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.buf[..self.len] == other.buf[..other.len]
    }
}

impl<T: Eq> Eq for GrowVec<T> {}

impl<T> core::ops::Index<usize> for GrowVec<T> {
    type Output = T;

    /// Returns a reference to the element at the given index.
    ///
    /// # Panics
    /// Panics if the index is out of bounds; [`get`](GrowVec::get) is the
    /// checked form.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let vec = GrowVec::from([10, 20]);
    /// assert_eq!(vec[0], 10);
    /// assert_eq!(vec[1], 20);
    /// ```
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("index out of bounds")
    }
}

impl<T> core::ops::IndexMut<usize> for GrowVec<T> {
    /// Returns a mutable reference to the element at the given index.
    ///
    /// # Panics
    /// Panics if the index is out of bounds; [`get_mut`](GrowVec::get_mut)
    /// is the checked form.
    ///
    /// # Example
    /// ```rust
    /// use grow_vec::GrowVec;
    ///
    /// let mut vec = GrowVec::from([10, 20]);
    /// vec[0] = 30;
    /// assert_eq!(vec[0], 30);
    /// ```
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).expect("index out of bounds")
    }
}

impl<'a, T> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let vec: GrowVec<i32> = GrowVec::new();
        assert!(vec.is_empty());
        assert_eq!(vec.len(), 0);
        assert_eq!(vec.capacity(), 0);
    }

    #[test]
    fn test_with_capacity() {
        let vec: GrowVec<i32> = GrowVec::with_capacity(5);
        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 5);

        let zero: GrowVec<i32> = GrowVec::with_capacity(0);
        assert_eq!(zero.capacity(), 0);
    }

    #[test]
    fn test_push_and_get() {
        let mut vec: GrowVec<i32> = GrowVec::new();
        vec.push(1);
        vec.push(2);
        vec.push(3);

        assert_eq!(vec.len(), 3);
        assert_eq!(vec.get(0), Ok(&1));
        assert_eq!(vec.get(1), Ok(&2));
        assert_eq!(vec.get(2), Ok(&3));
        assert_eq!(vec.get(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(vec.get(100), Err(Error::IndexOutOfRange { index: 100, len: 3 }));
    }

    #[test]
    fn test_growth_trajectory() {
        let mut vec: GrowVec<u32> = GrowVec::new();
        let mut caps = vec![vec.capacity()];
        for i in 0..16 {
            vec.push(i);
            caps.push(vec.capacity());
        }
        assert_eq!(caps, [0, 1, 3, 3, 7, 7, 7, 7, 15, 15, 15, 15, 15, 15, 15, 15, 31]);
        assert_eq!(vec.len(), 16);
        assert_eq!(vec.get(15), Ok(&15));
    }

    #[test]
    fn test_pop_lifo_then_empty_error() {
        let mut vec: GrowVec<i32> = GrowVec::new();
        vec.push(1);
        vec.push(2);
        vec.push(3);

        assert_eq!(vec.pop(), Ok(3));
        assert_eq!(vec.pop(), Ok(2));
        assert_eq!(vec.pop(), Ok(1));
        assert_eq!(vec.pop(), Err(Error::EmptyVec));
        assert!(vec.is_empty());

        // Popping never shrinks the capacity.
        assert_eq!(vec.capacity(), 3);
    }

    #[test]
    fn test_insert_erase_render_scenario() {
        let mut vec: GrowVec<i32> = GrowVec::new();
        vec.push(1);
        vec.push(2);
        vec.push(3);
        assert_eq!(vec.to_string(), "[1, 2, 3]");

        let mut pos = vec.begin();
        pos.advance(&vec);
        vec.insert(pos, 9).unwrap();
        assert_eq!(vec.to_string(), "[1, 9, 2, 3]");

        vec.erase(vec.begin()).unwrap();
        assert_eq!(vec.to_string(), "[9, 2, 3]");

        assert_eq!(vec.pop(), Ok(3));
        assert_eq!(vec.pop(), Ok(2));
        assert_eq!(vec.pop(), Ok(9));
        assert_eq!(vec.pop(), Err(Error::EmptyVec));
    }

    #[test]
    fn test_get_at_len_fails_for_every_length() {
        let mut vec: GrowVec<i32> = GrowVec::new();
        for len in 0..5 {
            assert_eq!(vec.get(vec.len()), Err(Error::IndexOutOfRange { index: len, len }));
            vec.push(len as i32);
        }
    }

    #[test]
    fn test_get_mut() {
        let mut vec: GrowVec<i32> = GrowVec::new();
        vec.push(10);
        vec.push(20);

        *vec.get_mut(0).unwrap() = 100;
        assert_eq!(vec.get(0), Ok(&100));
        assert_eq!(vec.get(1), Ok(&20));
        assert!(vec.get_mut(2).is_err());
    }

    #[test]
    fn test_index() {
        let vec = GrowVec::from([10, 20, 30]);
        assert_eq!(vec[0], 10);
        assert_eq!(vec[2], 30);
    }

    #[test]
    fn test_index_mut() {
        let mut vec = GrowVec::from([10, 20]);
        vec[0] = 100;
        assert_eq!(vec[0], 100);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_index_out_of_bounds() {
        let vec = GrowVec::from([10]);
        let _ = vec[5];
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_index_mut_out_of_bounds() {
        let mut vec = GrowVec::from([10]);
        vec[5] = 20;
    }

    #[test]
    fn test_insert_positions() {
        // Into an empty vector.
        let mut vec: GrowVec<i32> = GrowVec::new();
        vec.insert(vec.begin(), 5).unwrap();
        assert_eq!(vec.to_string(), "[5]");

        // At the end.
        vec.insert(vec.end(), 7).unwrap();
        assert_eq!(vec.to_string(), "[5, 7]");

        // At the beginning.
        vec.insert(vec.begin(), 3).unwrap();
        assert_eq!(vec.to_string(), "[3, 5, 7]");
    }

    #[test]
    fn test_insert_returns_cursor_to_inserted() {
        let mut vec = GrowVec::from([1, 3]);
        let mut pos = vec.begin();
        pos.advance(&vec);

        let cur = vec.insert(pos, 2).unwrap();
        assert_eq!(cur.get(&vec), Ok(&2));
        assert_eq!(vec.to_string(), "[1, 2, 3]");

        let tail = vec.insert(vec.end(), 4).unwrap();
        assert_eq!(tail.get(&vec), Ok(&4));
    }

    #[test]
    fn test_insert_out_of_range() {
        let long = GrowVec::from([1, 2, 3, 4, 5]);
        let mut vec = GrowVec::from([1, 2]);

        let err = vec.insert(long.end(), 9);
        assert_eq!(err, Err(Error::CursorOutOfRange { offset: 5, len: 2 }));
        assert_eq!(vec.to_string(), "[1, 2]");
    }

    #[test]
    fn test_insert_when_full_reallocates_by_growth_law() {
        let mut vec: GrowVec<i32> = GrowVec::with_capacity(2);
        vec.push(1);
        vec.push(2);
        let old = vec.begin();

        vec.insert(vec.begin(), 0).unwrap();
        assert_eq!(vec.capacity(), 5); // 2 * 2 + 1
        assert_eq!(vec.to_string(), "[0, 1, 2]");
        assert!(!old.is_valid(&vec));
    }

    #[test]
    fn test_insert_honors_stale_cursor_offset() {
        let mut vec: GrowVec<i32> = GrowVec::new();
        vec.push(1);
        vec.push(2);
        vec.push(3);

        let mut cur = vec.begin();
        cur.advance(&vec);
        vec.push(4); // buffer replaced; cur is stale now
        assert!(!cur.is_valid(&vec));

        // Only the offset is consulted, and offset 1 is still addressable.
        vec.insert(cur, 9).unwrap();
        assert_eq!(vec.to_string(), "[1, 9, 2, 3, 4]");
    }

    #[test]
    fn test_erase_returns_cursor_to_next() {
        let mut vec = GrowVec::from([1, 2, 3]);

        let cur = vec.erase(vec.begin()).unwrap();
        assert_eq!(cur.get(&vec), Ok(&2));
        assert_eq!(vec.to_string(), "[2, 3]");

        // Erasing the last element leaves the cursor at the end position.
        let mut last = vec.begin();
        last.advance(&vec);
        let cur = vec.erase(last).unwrap();
        assert!(cur.is_valid(&vec));
        assert_eq!(cur.get(&vec), Err(Error::NotDereferenceable));
        assert_eq!(vec.to_string(), "[2]");
    }

    #[test]
    fn test_erase_out_of_range() {
        let mut empty: GrowVec<i32> = GrowVec::new();
        let err = empty.erase(empty.begin());
        assert_eq!(err, Err(Error::CursorOutOfRange { offset: 0, len: 0 }));

        // The end position holds no element, so it is not erasable.
        let mut vec = GrowVec::from([1, 2]);
        let err = vec.erase(vec.end());
        assert_eq!(err, Err(Error::CursorOutOfRange { offset: 2, len: 2 }));
    }

    #[test]
    fn test_clear() {
        let mut vec = GrowVec::from([1, 2, 3]);
        let cur = vec.begin();

        vec.clear();
        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 3);
        assert_eq!(vec.to_string(), "[]");
        assert_eq!(cur.get(&vec), Err(Error::NotDereferenceable));

        // The vector is fully usable afterwards.
        vec.push(9);
        assert_eq!(vec.to_string(), "[9]");
    }

    #[test]
    fn test_reserve() {
        let mut vec: GrowVec<i32> = GrowVec::new();
        vec.push(1);
        vec.push(2);

        let cur = vec.begin();
        vec.reserve(10);
        assert_eq!(vec.capacity(), 10); // exact, no growth law applied
        assert_eq!(vec.to_string(), "[1, 2]");
        assert!(!cur.is_valid(&vec));

        // A satisfied reserve is a no-op and keeps cursors valid.
        let cur = vec.begin();
        vec.reserve(5);
        assert_eq!(vec.capacity(), 10);
        assert!(cur.is_valid(&vec));
    }

    #[test]
    fn test_shrink_to_fit_is_bookkeeping_only() {
        let mut vec: GrowVec<i32> = GrowVec::with_capacity(8);
        vec.push(1);
        vec.push(2);
        vec.push(3);

        let cur = vec.begin();
        vec.shrink_to_fit();
        assert_eq!(vec.capacity(), 3);
        assert_eq!(vec.len(), 3);
        assert_eq!(cur.get(&vec), Ok(&1)); // still valid, nothing moved

        // The next append outgrows the lowered capacity and reallocates.
        vec.push(4);
        assert_eq!(vec.capacity(), 7); // 3 * 2 + 1
        assert_eq!(vec.to_string(), "[1, 2, 3, 4]");
    }

    #[test]
    fn test_clone_capacity_is_source_len() {
        let mut src: GrowVec<i32> = GrowVec::with_capacity(10);
        src.push(1);
        src.push(2);
        src.push(3);

        let copy = src.clone();
        assert_eq!(copy.len(), 3);
        assert_eq!(copy.capacity(), 3);
        assert_eq!(copy, src);
        assert_eq!(src.capacity(), 10);
    }

    #[test]
    fn test_clone_is_independent() {
        let src = GrowVec::from([1, 2, 3]);
        let mut copy = src.clone();

        copy[0] = 100;
        copy.push(4);
        assert_eq!(src.to_string(), "[1, 2, 3]");
        assert_eq!(copy.to_string(), "[100, 2, 3, 4]");

        // Cursors do not transfer between a vector and its clone.
        assert!(!src.begin().is_valid(&copy));
        assert_eq!(src.begin().get(&copy), Err(Error::NotDereferenceable));
    }

    #[test]
    fn test_clone_from_capacity_is_source_cap() {
        let mut src: GrowVec<i32> = GrowVec::with_capacity(10);
        src.push(1);
        src.push(2);

        let mut dst = GrowVec::from([9, 9, 9]);
        let old = dst.begin();

        dst.clone_from(&src);
        assert_eq!(dst.len(), 2);
        assert_eq!(dst.capacity(), 10);
        assert_eq!(dst.to_string(), "[1, 2]");
        assert!(!old.is_valid(&dst));
    }

    #[test]
    fn test_from_array_and_vec_and_iterator() {
        let a = GrowVec::from([1, 2, 3]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.capacity(), 3);

        let mut source = Vec::with_capacity(32);
        source.extend([4, 5]);
        let b = GrowVec::from(source);
        assert_eq!(b.len(), 2);
        assert_eq!(b.capacity(), 2); // trimmed to the element count

        let c: GrowVec<i32> = (0..4).collect();
        assert_eq!(c.to_string(), "[0, 1, 2, 3]");
        assert_eq!(c.capacity(), 4);
    }

    #[test]
    fn test_display() {
        let mut vec: GrowVec<i32> = GrowVec::new();
        assert_eq!(vec.to_string(), "[]");

        vec.push(7);
        assert_eq!(vec.to_string(), "[7]");

        vec.push(8);
        vec.push(9);
        assert_eq!(vec.to_string(), "[7, 8, 9]");
    }

    #[test]
    fn test_debug_hides_dead_slots() {
        let mut vec: GrowVec<i32> = GrowVec::with_capacity(4);
        vec.push(1);
        vec.push(2);

        let text = format!("{vec:?}");
        assert!(text.contains("GrowVec"));
        assert!(text.contains("len: 2"));
        assert!(text.contains("capacity: 4"));
        assert!(text.contains("[1, 2]"));
    }

    #[test]
    fn test_eq_ignores_capacity() {
        let a = GrowVec::from([1, 2, 3]);
        let mut b: GrowVec<i32> = GrowVec::with_capacity(16);
        b.push(1);
        b.push(2);
        b.push(3);

        assert_eq!(a, b);

        b.push(4);
        assert_ne!(a, b);

        let c = GrowVec::from([1, 2, 4]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_default() {
        let vec: GrowVec<i32> = GrowVec::default();
        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 0);
    }

    #[test]
    fn test_iter_and_into_iterator() {
        let mut vec = GrowVec::from([1, 2, 3, 4]);
        vec.pop().unwrap();

        // Only the live prefix is visible.
        let seen: Vec<i32> = vec.iter().copied().collect();
        assert_eq!(seen, [1, 2, 3]);

        let mut sum = 0;
        for x in &vec {
            sum += x;
        }
        assert_eq!(sum, 6);

        for x in &mut vec {
            *x += 1;
        }
        assert_eq!(vec.to_string(), "[2, 3, 4]");
    }

    #[test]
    fn test_end_cursor_stale_after_growth_from_zero() {
        let mut vec: GrowVec<i32> = GrowVec::with_capacity(0);
        let it = vec.end();

        vec.push(7); // 0 -> 1 reallocation
        assert_eq!(it.get(&vec), Err(Error::NotDereferenceable));
        assert_eq!(vec.begin().get(&vec), Ok(&7));
        assert_eq!(vec.end().get(&vec), Err(Error::NotDereferenceable));
    }

    #[test]
    fn test_net_zero_shift_leaves_cursor_apparently_valid() {
        let mut vec: GrowVec<i32> = GrowVec::with_capacity(4);
        vec.push(1);
        vec.push(2);
        vec.push(3);

        let mut cur = vec.begin();
        cur.advance(&vec);
        assert_eq!(cur.get(&vec), Ok(&2));

        // Length change without reallocation: the cursor is stale for now.
        vec.insert(vec.begin(), 9).unwrap();
        assert_eq!(cur.get(&vec), Err(Error::NotDereferenceable));

        // Erasing restores both length and buffer, so the fence matches
        // again even though the slot under the cursor shifted.
        let mut last = vec.begin();
        last.advance(&vec);
        last.advance(&vec);
        last.advance(&vec);
        vec.erase(last).unwrap();
        assert_eq!(cur.get(&vec), Ok(&1));
    }

    #[test]
    fn test_pop_releases_the_slot() {
        use std::rc::Rc;

        let probe = Rc::new(0);
        let mut vec: GrowVec<Option<Rc<i32>>> = GrowVec::new();
        vec.push(Some(probe.clone()));
        assert_eq!(Rc::strong_count(&probe), 2);

        let taken = vec.pop().unwrap();
        assert_eq!(Rc::strong_count(&probe), 2); // handle moved to the caller
        drop(taken);
        assert_eq!(Rc::strong_count(&probe), 1); // slot was overwritten
    }

    #[test]
    fn test_erase_parks_value_until_overwritten() {
        use std::rc::Rc;

        let probe = Rc::new(0);
        let mut vec: GrowVec<Option<Rc<i32>>> = GrowVec::with_capacity(2);
        vec.push(Some(probe.clone()));
        vec.push(None);

        vec.erase(vec.begin()).unwrap();
        // The erased value sits in the dead slot until something overwrites it.
        assert_eq!(Rc::strong_count(&probe), 2);

        vec.push(None); // reuses the dead slot
        assert_eq!(Rc::strong_count(&probe), 1);
    }

    #[test]
    fn test_clear_releases_elements() {
        use std::rc::Rc;

        let probe = Rc::new(0);
        let mut vec: GrowVec<Option<Rc<i32>>> = GrowVec::new();
        vec.push(Some(probe.clone()));
        vec.push(Some(probe.clone()));
        assert_eq!(Rc::strong_count(&probe), 3);

        vec.clear();
        assert_eq!(Rc::strong_count(&probe), 1);
    }

    #[test]
    fn test_growth_clones_then_releases_old_buffer() {
        use std::rc::Rc;

        let probe = Rc::new(0);
        let mut vec: GrowVec<Option<Rc<i32>>> = GrowVec::new();
        vec.push(Some(probe.clone()));
        assert_eq!(Rc::strong_count(&probe), 2);

        vec.push(None); // 1 -> 3 growth clones the element, then drops the old buffer
        assert_eq!(Rc::strong_count(&probe), 2);
        assert!(vec.get(0).unwrap().is_some());
    }
}
