#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

use core::{
  cmp::Ordering,
  fmt,
  hash::{Hash, Hasher},
  mem::{self, MaybeUninit},
  ops::{Index, IndexMut, Range},
  ptr,
};
use macros::*;
use std::{boxed::Box, vec::Vec};

pub use any::AnyDeque;
pub use error::{Error, Result};
pub use generic_array::{typenum, ArrayLength, GenericArray};
pub use into_iter::IntoIter;
pub use iter::Iter;
pub use iter_mut::IterMut;
pub use traits::{Growable, RandomAccess, Searchable};

mod any;
mod error;
mod into_iter;
mod iter;
mod iter_mut;
mod traits;


#[cfg(test)]
mod heap_tests;

mod macros;

/// Capacity of a deque created with [`Deque::new`] or from an empty sequence.
pub const DEFAULT_CAPACITY: usize = 8;

/// A growable double-ended queue stored in a single circular buffer.
///
/// `Deque` keeps its elements in one contiguous allocation and lets the logical
/// front float anywhere inside it, so pushing and popping at either end is O(1)
/// (amortized when the buffer has to grow). Elements can also be read, replaced,
/// inserted and removed at any logical index; insertions and removals in the
/// middle move whichever side of the affected position is shorter, so the cost
/// is `O(min(index, len - index))` plus the number of elements inserted.
///
/// # Capacity
///
/// A deque made with [`new`](Deque::new) starts with [`DEFAULT_CAPACITY`] slots.
/// A deque made from existing data gets exactly as many slots as it has
/// elements. When a single-element insertion finds the buffer full, the capacity
/// doubles; range insertions grow the buffer to exactly the size they need.
/// The capacity only ever changes through those growth paths and through
/// [`set_capacity`](Deque::set_capacity), and it never drops below the length.
///
/// ## Examples
///
/// ```rust
/// use circular_deque::Deque;
///
/// let mut deque = Deque::new();
///
/// deque.add_to_back(1);
/// deque.add_to_back(2);
/// deque.add_to_front(0);
///
/// assert_eq!(deque.len(), 3);
/// assert_eq!(deque[0], 0);
/// assert_eq!(deque[1], 1);
/// assert_eq!(deque[2], 2);
///
/// assert_eq!(deque.remove_from_front(), Ok(0));
/// assert_eq!(deque.remove_from_back(), Ok(2));
/// assert_eq!(deque.len(), 1);
/// ```
///
/// Inserting and removing in the middle:
///
/// ```rust
/// use circular_deque::Deque;
///
/// let mut deque = Deque::from(vec![1, 2]);
/// deque.insert_range(1, [7, 13]).unwrap();
/// assert_eq!(deque, [1, 7, 13, 2]);
///
/// deque.remove_range(1, 2).unwrap();
/// assert_eq!(deque, [1, 2]);
/// ```
///
/// Iterating over elements:
///
/// ```rust
/// use circular_deque::Deque;
///
/// let mut deque: Deque<i32> = (1..=3).collect();
///
/// let sum: i32 = deque.iter().sum();
/// assert_eq!(sum, 6);
///
/// for item in deque.iter_mut() {
///     *item *= 2;
/// }
/// assert_eq!(deque.iter().sum::<i32>(), 12);
/// ```
pub struct Deque<T> {
  buf: Box<[MaybeUninit<T>]>,
  head: usize,
  len: usize,
}

impl<T: Clone> Clone for Deque<T> {
  fn clone(&self) -> Self {
    let mut deq = Self::with_capacity(self.capacity());
    for item in self.iter() {
      // SAFETY: `deq` has at least `self.len` free slots.
      let _ = unsafe { push_back_unchecked!(deq(item.clone())) };
    }
    deq
  }
}

impl<T> Default for Deque<T> {
  #[cfg_attr(not(tarpaulin), inline(always))]
  fn default() -> Self {
    Self::new()
  }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<T: PartialEq> PartialEq for Deque<T> {
  fn eq(&self, other: &Self) -> bool {
    if self.len != other.len {
      return false;
    }
    let (sa, sb) = self.as_slices();
    let (oa, ob) = other.as_slices();
    if sa.len() == oa.len() {
      sa == oa && sb == ob
    } else if sa.len() < oa.len() {
      // Always divisible in three sections, for example:
      // self:  [a b c|d e f]
      // other: [0 1 2 3|4 5]
      // front = 3, mid = 1,
      // [a b c] == [0 1 2] && [d] == [3] && [e f] == [4 5]
      let front = sa.len();
      let mid = oa.len() - front;

      let (oa_front, oa_mid) = oa.split_at(front);
      let (sb_mid, sb_back) = sb.split_at(mid);
      sa == oa_front && sb_mid == oa_mid && sb_back == ob
    } else {
      let front = oa.len();
      let mid = sa.len() - front;

      let (sa_front, sa_mid) = sa.split_at(front);
      let (ob_mid, ob_back) = ob.split_at(mid);
      sa_front == oa && sa_mid == ob_mid && sb == ob_back
    }
  }
}

impl<T: Eq> Eq for Deque<T> {}

macro_rules! __impl_slice_eq1 {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs
        where
            T: PartialEq<U>,
        {
            fn eq(&self, other: &$rhs) -> bool {
                if self.len() != other.len() {
                    return false;
                }
                let (sa, sb) = self.as_slices();
                let (oa, ob) = other[..].split_at(sa.len());
                sa == oa && sb == ob
            }
        }
    }
}

__impl_slice_eq1! { [] Deque<T>, Vec<U> }
__impl_slice_eq1! { [] Deque<T>, &[U] }
__impl_slice_eq1! { [] Deque<T>, &mut [U] }
__impl_slice_eq1! { [const N: usize] Deque<T>, [U; N] }
__impl_slice_eq1! { [const N: usize] Deque<T>, &[U; N] }
__impl_slice_eq1! { [const N: usize] Deque<T>, &mut [U; N] }

impl<T: PartialOrd> PartialOrd for Deque<T> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    self.iter().partial_cmp(other.iter())
  }
}

impl<T: Ord> Ord for Deque<T> {
  #[inline]
  fn cmp(&self, other: &Self) -> Ordering {
    self.iter().cmp(other.iter())
  }
}

impl<T: Hash> Hash for Deque<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_usize(self.len);
    // `as_slices` can split identical deques at different points, so hash
    // element by element instead of slice by slice.
    self.iter().for_each(|elem| elem.hash(state));
  }
}

impl<T> Index<usize> for Deque<T> {
  type Output = T;

  #[inline]
  fn index(&self, index: usize) -> &T {
    self.get(index).expect("Out of bounds access")
  }
}

impl<T> IndexMut<usize> for Deque<T> {
  #[inline]
  fn index_mut(&mut self, index: usize) -> &mut T {
    self.get_mut(index).expect("Out of bounds access")
  }
}

impl<T> IntoIterator for Deque<T> {
  type Item = T;
  type IntoIter = IntoIter<T>;

  /// Consumes the deque into a front-to-back iterator yielding elements by
  /// value.
  fn into_iter(self) -> IntoIter<T> {
    IntoIter::new(self)
  }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Iter<'a, T> {
    self.iter()
  }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
  type Item = &'a mut T;
  type IntoIter = IterMut<'a, T>;

  fn into_iter(self) -> IterMut<'a, T> {
    self.iter_mut()
  }
}

impl<T> Extend<T> for Deque<T> {
  /// Appends every item to the back, doubling the capacity whenever the
  /// buffer fills up.
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    iter.into_iter().for_each(|item| self.add_to_back(item));
  }
}

impl<T> FromIterator<T> for Deque<T> {
  /// Collects the items into a deque whose capacity equals the number of
  /// items, or [`DEFAULT_CAPACITY`] when there are none.
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self::from(iter.into_iter().collect::<Vec<T>>())
  }
}

impl<T> From<Vec<T>> for Deque<T> {
  /// Takes over the vector's elements without copying them.
  ///
  /// The capacity of the new deque is exactly `vec.len()`, or
  /// [`DEFAULT_CAPACITY`] when the vector is empty.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::{Deque, DEFAULT_CAPACITY};
  ///
  /// let deque = Deque::from(vec![1, 2, 3]);
  /// assert_eq!(deque.capacity(), 3);
  ///
  /// let empty = Deque::<u8>::from(Vec::new());
  /// assert_eq!(empty.capacity(), DEFAULT_CAPACITY);
  /// ```
  fn from(vec: Vec<T>) -> Self {
    if vec.is_empty() {
      return Self::new();
    }

    let len = vec.len();
    let raw = Box::into_raw(vec.into_boxed_slice()) as *mut [MaybeUninit<T>];
    Self {
      // SAFETY: `MaybeUninit<T>` has the same layout as `T`, and the box was
      // allocated for exactly `len` elements.
      buf: unsafe { Box::from_raw(raw) },
      head: 0,
      len,
    }
  }
}

impl<T, const SIZE: usize> From<[T; SIZE]> for Deque<T> {
  #[cfg_attr(not(tarpaulin), inline(always))]
  fn from(arr: [T; SIZE]) -> Self {
    Self::from(Vec::from(arr))
  }
}

impl<T, N: ArrayLength> From<GenericArray<T, N>> for Deque<T> {
  /// Builds a deque with capacity `N` holding the array's elements in order.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::{Deque, GenericArray, typenum::U3};
  ///
  /// let arr: GenericArray<u32, U3> = GenericArray::from_array([1, 2, 3]);
  /// let deque = Deque::from(arr);
  /// assert_eq!(deque, [1, 2, 3]);
  /// assert_eq!(deque.capacity(), 3);
  /// ```
  fn from(arr: GenericArray<T, N>) -> Self {
    Self::from_iter(arr)
  }
}

impl<T> From<Deque<T>> for Vec<T> {
  fn from(deq: Deque<T>) -> Self {
    let mut vec = Vec::with_capacity(deq.len());
    vec.extend(deq);
    vec
  }
}

impl<T> Deque<T> {
  /// Creates an empty deque with [`DEFAULT_CAPACITY`] slots.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::{Deque, DEFAULT_CAPACITY};
  ///
  /// let deque: Deque<u32> = Deque::new();
  /// assert_eq!(deque.capacity(), DEFAULT_CAPACITY);
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn new() -> Self {
    Self::with_capacity(DEFAULT_CAPACITY)
  }

  /// Creates an empty deque with exactly `capacity` slots.
  ///
  /// A capacity of zero is allowed; the first push grows it to one.
  ///
  /// ## Panics
  ///
  /// Panics if the allocation size overflows `isize::MAX` bytes.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque: Deque<u32> = Deque::with_capacity(0);
  /// assert_eq!(deque.capacity(), 0);
  /// deque.add_to_back(13);
  /// assert_eq!(deque, [13]);
  /// ```
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      buf: allocate(capacity),
      head: 0,
      len: 0,
    }
  }

  /// Creates an empty deque with exactly `capacity` slots, returning
  /// [`Error::CapacityOverflow`] instead of panicking when the buffer cannot
  /// be allocated.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::{Deque, Error};
  ///
  /// let deque = Deque::<u64>::try_with_capacity(16).unwrap();
  /// assert_eq!(deque.capacity(), 16);
  ///
  /// assert_eq!(
  ///   Deque::<u64>::try_with_capacity(usize::MAX).unwrap_err(),
  ///   Error::CapacityOverflow,
  /// );
  /// ```
  pub fn try_with_capacity(capacity: usize) -> Result<Self> {
    Ok(Self {
      buf: try_allocate(capacity)?,
      head: 0,
      len: 0,
    })
  }

  /// Creates a deque from a sequence whose length is known up front.
  ///
  /// The capacity is exactly the number of items, or [`DEFAULT_CAPACITY`]
  /// when there are none; the items are laid out from slot 0 in order.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let deque = Deque::from_exact_iter((1..5).map(|x| x * x));
  /// assert_eq!(deque, [1, 4, 9, 16]);
  /// assert_eq!(deque.capacity(), 4);
  /// ```
  pub fn from_exact_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = T>,
    I::IntoIter: ExactSizeIterator,
  {
    let iter = iter.into_iter();
    let mut vec = Vec::with_capacity(iter.len());
    vec.extend(iter);
    Self::from(vec)
  }

  /// Returns the number of slots in the backing buffer.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let deque: Deque<u32> = Deque::with_capacity(5);
  /// assert_eq!(deque.capacity(), 5);
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn capacity(&self) -> usize {
    self.buf.len()
  }

  /// Resizes the backing buffer to exactly `capacity` slots.
  ///
  /// The live elements are copied to the front of the new buffer in logical
  /// order, so a deque that wrapped around the end of its old buffer is
  /// contiguous afterwards. Setting the current capacity is a no-op.
  ///
  /// ## Errors
  ///
  /// - [`Error::InvalidArgument`] if `capacity` is smaller than [`len`](Deque::len).
  /// - [`Error::CapacityOverflow`] if the buffer cannot be allocated.
  ///
  /// Either way the deque is left unchanged.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![1, 2, 3]);
  /// deque.set_capacity(7).unwrap();
  /// assert_eq!(deque.capacity(), 7);
  /// assert_eq!(deque, [1, 2, 3]);
  ///
  /// assert!(deque.set_capacity(2).is_err());
  /// assert_eq!(deque.capacity(), 7);
  /// ```
  pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
    if capacity < self.len {
      debug!(
        requested = capacity,
        len = self.len,
        "rejected capacity below length"
      );
      return Err(Error::invalid_argument(
        "capacity cannot be set to a value less than the length",
      ));
    }

    if capacity == self.capacity() {
      return Ok(());
    }

    let buf = try_allocate(capacity)?;
    self.replace_buffer(buf);
    Ok(())
  }

  /// Returns the number of elements in the deque.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// assert_eq!(deque.len(), 0);
  /// deque.add_to_back(1);
  /// assert_eq!(deque.len(), 1);
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub const fn len(&self) -> usize {
    self.len
  }

  /// Returns `true` if the deque holds no elements.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// assert!(deque.is_empty());
  /// deque.add_to_front(1);
  /// assert!(!deque.is_empty());
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Returns `true` if the next single-element insertion will reallocate.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::with_capacity(2);
  /// deque.add_to_back(10);
  /// assert!(!deque.is_full());
  /// deque.add_to_back(20);
  /// assert!(deque.is_full());
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn is_full(&self) -> bool {
    self.len == self.capacity()
  }

  /// Returns `true` if the live elements wrap past the end of the backing
  /// buffer, i.e. [`as_slices`](Deque::as_slices) returns two non-empty runs.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![1, 2, 3]);
  /// assert!(!deque.is_split());
  /// deque.remove_from_back().unwrap();
  /// deque.add_to_front(0);
  /// assert!(deque.is_split());
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn is_split(&self) -> bool {
    // Do the calculation like this to avoid overflowing if len + head > usize::MAX
    self.head > self.capacity() - self.len
  }

  /// Returns a front-to-back iterator.
  ///
  /// The iterator borrows the deque, so the deque cannot be changed while the
  /// iterator is alive. Call `iter` again to start over.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut buf = Deque::new();
  /// buf.add_to_back(5);
  /// buf.add_to_back(3);
  /// buf.add_to_back(4);
  /// let collected: Vec<&i32> = buf.iter().collect();
  /// assert_eq!(collected, vec![&5, &3, &4]);
  /// ```
  pub fn iter(&self) -> Iter<'_, T> {
    let (a, b) = self.as_slices();
    Iter::new(a.iter(), b.iter())
  }

  /// Returns a front-to-back iterator that returns mutable references.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut buf = Deque::from(vec![5, 3, 4]);
  /// for value in buf.iter_mut() {
  ///     *value -= 2;
  /// }
  /// assert_eq!(buf.into_iter().collect::<Vec<_>>(), vec![3, 1, 2]);
  /// ```
  pub fn iter_mut(&mut self) -> IterMut<'_, T> {
    let (a, b) = self.as_mut_slices();
    IterMut::new(a.iter_mut(), b.iter_mut())
  }

  /// Returns a pair of slices which contain, in order, the contents of the
  /// deque.
  ///
  /// The first slice runs from the front of the deque to the end of the
  /// backing buffer; the second holds whatever wrapped around to the start of
  /// the buffer and is empty unless [`is_split`](Deque::is_split) is `true`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![0, 1, 2]);
  /// deque.remove_from_back().unwrap();
  /// deque.add_to_front(9);
  ///
  /// assert_eq!(deque.as_slices(), (&[9][..], &[0, 1][..]));
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn as_slices(&self) -> (&[T], &[T]) {
    let (a_range, b_range) = self.slice_ranges(0..self.len);
    // SAFETY: `slice_ranges` always returns valid ranges into
    // the physical buffer.
    unsafe { (&*self.buffer_range(a_range), &*self.buffer_range(b_range)) }
  }

  /// Returns a pair of mutable slices which contain, in order, the contents
  /// of the deque.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![0, 1, 2]);
  /// deque.remove_from_back().unwrap();
  /// deque.add_to_front(9);
  ///
  /// let (front, back) = deque.as_mut_slices();
  /// front[0] = 42;
  /// back[1] = 24;
  /// assert_eq!(deque, [42, 0, 24]);
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
    let (a_range, b_range) = self.slice_ranges(0..self.len);
    // SAFETY: the two ranges never overlap and both cover initialized slots.
    unsafe {
      (
        &mut *self.buffer_range_mut(a_range),
        &mut *self.buffer_range_mut(b_range),
      )
    }
  }

  /// Provides a reference to the front element, or `None` if the deque is
  /// empty.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut d = Deque::new();
  /// assert_eq!(d.front(), None);
  ///
  /// d.add_to_back(1);
  /// d.add_to_back(2);
  /// assert_eq!(d.front(), Some(&1));
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn front(&self) -> Option<&T> {
    self.get(0).ok()
  }

  /// Provides a mutable reference to the front element, or `None` if the
  /// deque is empty.
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn front_mut(&mut self) -> Option<&mut T> {
    self.get_mut(0).ok()
  }

  /// Provides a reference to the back element, or `None` if the deque is
  /// empty.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut d = Deque::new();
  /// assert_eq!(d.back(), None);
  ///
  /// d.add_to_back(1);
  /// d.add_to_back(2);
  /// assert_eq!(d.back(), Some(&2));
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn back(&self) -> Option<&T> {
    self.len.checked_sub(1).and_then(|idx| self.get(idx).ok())
  }

  /// Provides a mutable reference to the back element, or `None` if the
  /// deque is empty.
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn back_mut(&mut self) -> Option<&mut T> {
    match self.len.checked_sub(1) {
      Some(idx) => self.get_mut(idx).ok(),
      None => None,
    }
  }

  /// Provides a reference to the element at the given logical index.
  ///
  /// Index 0 is the front of the deque.
  ///
  /// ## Errors
  ///
  /// [`Error::IndexOutOfRange`] if `index >= len`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::{Deque, Error};
  ///
  /// let deque = Deque::from(vec![10, 20]);
  /// assert_eq!(deque.get(0), Ok(&10));
  /// assert_eq!(deque.get(1), Ok(&20));
  /// assert_eq!(deque.get(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn get(&self, index: usize) -> Result<&T> {
    if index < self.len {
      let idx = self.to_physical_idx(index);
      // SAFETY: index is checked to be in-bounds
      unsafe { Ok((*self.ptr().add(idx)).assume_init_ref()) }
    } else {
      Err(Error::index_out_of_range(index, self.len))
    }
  }

  /// Provides a mutable reference to the element at the given logical index.
  ///
  /// ## Errors
  ///
  /// [`Error::IndexOutOfRange`] if `index >= len`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![10, 20]);
  /// *deque.get_mut(0).unwrap() += 5;
  /// assert_eq!(deque[0], 15);
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
    if index < self.len {
      let idx = self.to_physical_idx(index);
      // SAFETY: index is checked to be in-bounds
      unsafe { Ok((*self.ptr_mut().add(idx)).assume_init_mut()) }
    } else {
      Err(Error::index_out_of_range(index, self.len))
    }
  }

  /// Replaces the element at the given logical index, returning the old one.
  ///
  /// ## Errors
  ///
  /// [`Error::IndexOutOfRange`] if `index >= len`; `value` is dropped and the
  /// deque is unchanged.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec!['a', 'b']);
  /// assert_eq!(deque.set(1, 'z'), Ok('b'));
  /// assert_eq!(deque, ['a', 'z']);
  /// assert!(deque.set(2, 'q').is_err());
  /// ```
  pub fn set(&mut self, index: usize, value: T) -> Result<T> {
    self.get_mut(index).map(|slot| mem::replace(slot, value))
  }

  /// Appends an element to the back of the deque.
  ///
  /// If the buffer is full its capacity doubles first (a zero capacity
  /// becomes one).
  ///
  /// ## Panics
  ///
  /// Panics if the doubled capacity overflows.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::with_capacity(1);
  /// deque.add_to_back(1);
  /// deque.add_to_back(2);
  /// assert_eq!(deque, [1, 2]);
  /// assert_eq!(deque.capacity(), 2);
  /// ```
  pub fn add_to_back(&mut self, value: T) {
    if self.is_full() {
      self.grow();
    }
    // SAFETY: there is at least one free slot.
    let _ = unsafe { push_back_unchecked!(self(value)) };
  }

  /// Prepends an element to the front of the deque.
  ///
  /// If the buffer is full its capacity doubles first (a zero capacity
  /// becomes one).
  ///
  /// ## Panics
  ///
  /// Panics if the doubled capacity overflows.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![1, 2]);
  /// deque.add_to_front(0);
  /// assert_eq!(deque, [0, 1, 2]);
  /// assert_eq!(deque.capacity(), 4);
  /// ```
  pub fn add_to_front(&mut self, value: T) {
    if self.is_full() {
      self.grow();
    }
    // SAFETY: there is at least one free slot.
    let _ = unsafe { push_front_unchecked!(self(value)) };
  }

  /// Removes the last element and returns it.
  ///
  /// ## Errors
  ///
  /// [`Error::InvalidOperation`] if the deque is empty.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![1, 2, 3]);
  /// assert_eq!(deque.remove_from_back(), Ok(3));
  /// assert_eq!(deque, [1, 2]);
  /// ```
  pub fn remove_from_back(&mut self) -> Result<T> {
    self.pop_back().ok_or_else(Error::empty)
  }

  /// Removes the first element and returns it.
  ///
  /// ## Errors
  ///
  /// [`Error::InvalidOperation`] if the deque is empty.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::{Deque, Error};
  ///
  /// let mut deque = Deque::from(vec![1, 2]);
  /// assert_eq!(deque.remove_from_front(), Ok(1));
  /// assert_eq!(deque.remove_from_front(), Ok(2));
  /// assert!(matches!(deque.remove_from_front(), Err(Error::InvalidOperation { .. })));
  /// ```
  pub fn remove_from_front(&mut self) -> Result<T> {
    self.pop_front().ok_or_else(Error::empty)
  }

  /// Removes the first element and returns it, or `None` if the deque is
  /// empty.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut d = Deque::new();
  /// d.add_to_back(1);
  /// d.add_to_back(2);
  ///
  /// assert_eq!(d.pop_front(), Some(1));
  /// assert_eq!(d.pop_front(), Some(2));
  /// assert_eq!(d.pop_front(), None);
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn pop_front(&mut self) -> Option<T> {
    if self.is_empty() {
      None
    } else {
      Some(unsafe { pop_front_unchecked!(self) })
    }
  }

  /// Removes the last element and returns it, or `None` if the deque is
  /// empty.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut buf = Deque::new();
  /// assert_eq!(buf.pop_back(), None);
  /// buf.add_to_back(1);
  /// buf.add_to_back(3);
  /// assert_eq!(buf.pop_back(), Some(3));
  /// ```
  #[cfg_attr(not(tarpaulin), inline(always))]
  pub fn pop_back(&mut self) -> Option<T> {
    if self.is_empty() {
      None
    } else {
      Some(unsafe { pop_back_unchecked!(self) })
    }
  }

  /// Inserts an element at logical `index`, shifting whichever side of
  /// `index` holds fewer elements.
  ///
  /// Inserting at `0` or at `len` is a plain push at that end. The capacity
  /// doubles first if the buffer is full.
  ///
  /// ## Errors
  ///
  /// [`Error::IndexOutOfRange`] if `index > len`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec!['a', 'b', 'c']);
  /// deque.insert(1, 'd').unwrap();
  /// deque.insert(4, 'e').unwrap();
  /// assert_eq!(deque, ['a', 'd', 'b', 'c', 'e']);
  /// assert!(deque.insert(9, 'x').is_err());
  /// ```
  pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
    if index > self.len {
      return Err(Error::index_out_of_range(index, self.len));
    }

    if self.is_full() {
      self.grow();
    }

    // SAFETY: there is at least one free slot and `index <= len`.
    unsafe {
      if index == 0 {
        let _ = push_front_unchecked!(self(value));
      } else if index == self.len {
        let _ = push_back_unchecked!(self(value));
      } else {
        self.open_gap(index, 1);
        self.buffer_write(self.to_physical_idx(index), value);
        self.len += 1;
      }
    }
    Ok(())
  }

  /// Inserts every item of `iter` at logical `index`, keeping their order.
  ///
  /// The items are collected first. If they do not fit in the free slots the
  /// buffer is resized to exactly `len + count` (which also makes it
  /// contiguous); then whichever side of `index` is shorter moves out of the
  /// way. Inserting nothing leaves the deque untouched.
  ///
  /// ## Errors
  ///
  /// - [`Error::IndexOutOfRange`] if `index > len`.
  /// - [`Error::CapacityOverflow`] if `len + count` cannot be allocated.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![1, 2]);
  /// deque.insert_range(1, [7, 13]).unwrap();
  /// assert_eq!(deque, [1, 7, 13, 2]);
  /// assert!(deque.capacity() >= 4);
  /// ```
  pub fn insert_range<I>(&mut self, index: usize, iter: I) -> Result<()>
  where
    I: IntoIterator<Item = T>,
  {
    if index > self.len {
      return Err(Error::index_out_of_range(index, self.len));
    }

    let mut items: Vec<T> = iter.into_iter().collect();
    let count = items.len();
    let new_len = self
      .len
      .checked_add(count)
      .ok_or(Error::CapacityOverflow)?;

    if new_len > self.capacity() {
      let buf = try_allocate(new_len)?;
      self.replace_buffer(buf);
    }

    if count == 0 {
      return Ok(());
    }

    // SAFETY: the buffer has room for `count` more elements, the gap opened at
    // `index` is exactly `count` slots wide, and the moved-out items are
    // forgotten by the vector right after they are copied.
    unsafe {
      self.open_gap(index, count);
      self.copy_slice(self.to_physical_idx(index), &items);
      items.set_len(0);
    }
    self.len = new_len;
    Ok(())
  }

  /// Removes and returns the element at logical `index`.
  ///
  /// Removing the front or back element is a plain pop; elsewhere the
  /// shorter side of the deque closes the gap.
  ///
  /// ## Errors
  ///
  /// [`Error::IndexOutOfRange`] if `index >= len`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut buf = Deque::from(vec!['a', 'b', 'c']);
  /// assert_eq!(buf.remove_at(1), Ok('b'));
  /// assert_eq!(buf, ['a', 'c']);
  /// ```
  pub fn remove_at(&mut self, index: usize) -> Result<T> {
    if index >= self.len {
      return Err(Error::index_out_of_range(index, self.len));
    }
    // SAFETY: index is checked to be in-bounds
    Ok(unsafe { self.remove_at_unchecked(index) })
  }

  /// Removes `count` consecutive elements starting at logical `index` and
  /// drops them.
  ///
  /// Removing from the front just advances the start of the deque and
  /// removing from the back just shortens it. Otherwise the elements before
  /// the range move back over the gap when the range sits in the front half,
  /// and the elements after it move forward when it sits in the back half.
  ///
  /// ## Errors
  ///
  /// - [`Error::InvalidArgument`] if `index + count` overflows.
  /// - [`Error::IndexOutOfRange`] if `index + count > len`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![1, 2, 3, 4]);
  /// deque.remove_range(1, 2).unwrap();
  /// assert_eq!(deque, [1, 4]);
  /// ```
  pub fn remove_range(&mut self, index: usize, count: usize) -> Result<()> {
    let end = index
      .checked_add(count)
      .ok_or(Error::invalid_argument("range end overflows usize"))?;
    if end > self.len {
      return Err(Error::index_out_of_range(end, self.len));
    }

    if count == 0 {
      return Ok(());
    }

    // SAFETY: `index..end` lies inside the live range.
    unsafe {
      self.drop_range(index, count);
      self.close_gap(index, count);
    }
    Ok(())
  }

  /// Returns the logical index of the first element equal to `value`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let deque = Deque::from(vec![1, 2, 2]);
  /// assert_eq!(deque.index_of(&2), Some(1));
  /// assert_eq!(deque.index_of(&3), None);
  /// ```
  pub fn index_of(&self, value: &T) -> Option<usize>
  where
    T: PartialEq,
  {
    self.iter().position(|item| item == value)
  }

  /// Returns `true` if the deque contains an element equal to `value`.
  ///
  /// This operation is *O*(*n*).
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let deque = Deque::from(vec![0, 1]);
  /// assert!(deque.contains(&1));
  /// assert!(!deque.contains(&10));
  /// ```
  #[inline]
  pub fn contains(&self, value: &T) -> bool
  where
    T: PartialEq,
  {
    let (a, b) = self.as_slices();
    a.contains(value) || b.contains(value)
  }

  /// Removes the first element equal to `value`, returning whether one was
  /// found.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![1, 2, 1]);
  /// assert!(deque.remove(&1));
  /// assert_eq!(deque, [2, 1]);
  /// assert!(!deque.remove(&5));
  /// ```
  pub fn remove(&mut self, value: &T) -> bool
  where
    T: PartialEq,
  {
    match self.index_of(value) {
      Some(index) => {
        // SAFETY: `index_of` only returns live indices.
        drop(unsafe { self.remove_at_unchecked(index) });
        true
      }
      None => false,
    }
  }

  /// Clones the elements, front to back, into `dest[offset..offset + len]`.
  ///
  /// When the deque wraps around its buffer the copy is done in two runs:
  /// first the part from the front to the end of the buffer, then the part
  /// that wrapped to its start.
  ///
  /// ## Errors
  ///
  /// [`Error::InvalidArgument`] if `offset` is past the end of `dest`, or if
  /// fewer than `len` slots remain in `dest` after `offset`. `dest` is not
  /// modified in that case.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let deque = Deque::from(vec![1, 2, 3]);
  /// let mut dest = [0; 5];
  /// deque.copy_to(&mut dest, 1).unwrap();
  /// assert_eq!(dest, [0, 1, 2, 3, 0]);
  ///
  /// assert!(deque.copy_to(&mut dest, 3).is_err());
  /// ```
  pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<()>
  where
    T: Clone,
  {
    if offset > dest.len() {
      return Err(Error::invalid_argument(
        "destination offset is past the end of the destination",
      ));
    }
    if dest.len() - offset < self.len {
      return Err(Error::invalid_argument(
        "destination is too small to hold the deque",
      ));
    }

    let (front, back) = self.as_slices();
    let (dest_front, dest_back) = dest[offset..offset + self.len].split_at_mut(front.len());
    dest_front.clone_from_slice(front);
    dest_back.clone_from_slice(back);
    Ok(())
  }

  /// Clones the elements, front to back, into a new vector.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![1, 2, 3]);
  /// deque.remove_from_front().unwrap();
  /// deque.add_to_back(4);
  /// assert_eq!(deque.to_vec(), vec![2, 3, 4]);
  /// ```
  pub fn to_vec(&self) -> Vec<T>
  where
    T: Clone,
  {
    let (front, back) = self.as_slices();
    let mut vec = Vec::with_capacity(self.len);
    vec.extend_from_slice(front);
    vec.extend_from_slice(back);
    vec
  }

  /// Removes and drops every element. The capacity is kept.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::from(vec![1, 2, 3]);
  /// deque.clear();
  /// assert!(deque.is_empty());
  /// assert_eq!(deque.capacity(), 3);
  /// ```
  pub fn clear(&mut self) {
    // SAFETY: the whole live range is dropped and then forgotten.
    unsafe { self.drop_range(0, self.len) };
    self.len = 0;
    self.head = 0;
  }
}

impl<T> Drop for Deque<T> {
  fn drop(&mut self) {
    self.clear();
  }
}

impl<T> Deque<T> {
  /// Marginally more convenient
  #[inline]
  fn ptr(&self) -> *const MaybeUninit<T> {
    self.buf.as_ptr()
  }

  /// Marginally more convenient
  #[inline]
  fn ptr_mut(&mut self) -> *mut MaybeUninit<T> {
    self.buf.as_mut_ptr()
  }

  /// Doubles the capacity, or makes it one if it is zero.
  #[cold]
  fn grow(&mut self) {
    let new_capacity = match self.capacity() {
      0 => 1,
      cap => match cap.checked_mul(2) {
        Some(cap) => cap,
        None => capacity_overflow(),
      },
    };
    self.replace_buffer(allocate(new_capacity));
  }

  /// Moves the live elements to the front of `buf`, in logical order, and
  /// makes `buf` the backing buffer.
  fn replace_buffer(&mut self, mut buf: Box<[MaybeUninit<T>]>) {
    debug_assert!(buf.len() >= self.len);
    trace!(
      old_capacity = self.capacity(),
      new_capacity = buf.len(),
      len = self.len,
      "reallocating deque buffer"
    );

    let (a, b) = self.slice_ranges(0..self.len);
    // SAFETY: both runs are initialized and `buf` has room for all of them.
    // The old buffer only holds `MaybeUninit`s, so dropping it does not drop
    // the moved elements.
    unsafe {
      let dst = buf.as_mut_ptr();
      ptr::copy_nonoverlapping(self.ptr().add(a.start), dst, a.len());
      ptr::copy_nonoverlapping(self.ptr().add(b.start), dst.add(a.len()), b.len());
    }
    self.buf = buf;
    self.head = 0;
  }

  /// Makes the `count` slots at logical `index..index + count` free by
  /// moving the shorter side of the deque away from `index`.
  ///
  /// The length is left unchanged; the caller fills the gap and then adds
  /// `count` to it.
  ///
  /// # Safety
  ///
  /// `index <= len`, `len + count <= capacity`.
  unsafe fn open_gap(&mut self, index: usize, count: usize) {
    debug_assert!(index <= self.len);
    debug_assert!(self.len + count <= self.capacity());

    if index < self.len / 2 {
      let old_head = self.head;
      self.head = self.wrap_sub(self.head, count);
      unsafe { self.wrap_copy(old_head, self.head, index) };
    } else {
      unsafe {
        self.wrap_copy(
          self.to_physical_idx(index),
          self.to_physical_idx(index + count),
          self.len - index,
        )
      };
    }
  }

  /// Closes the hole left by `count` already moved-out or dropped elements
  /// at logical `index..index + count`, and shortens the deque by `count`.
  ///
  /// # Safety
  ///
  /// `index + count <= len`, and the slots in the hole must not be read
  /// again.
  unsafe fn close_gap(&mut self, index: usize, count: usize) {
    debug_assert!(index + count <= self.len);

    if index == 0 {
      self.head = self.to_physical_idx(count);
    } else if index + count == self.len {
      // nothing follows the hole
    } else if index + count / 2 < self.len / 2 {
      let old_head = self.head;
      self.head = self.to_physical_idx(count);
      unsafe { self.wrap_copy(old_head, self.head, index) };
    } else {
      unsafe {
        self.wrap_copy(
          self.to_physical_idx(index + count),
          self.to_physical_idx(index),
          self.len - count - index,
        )
      };
    }
    self.len -= count;
  }

  /// # Safety
  ///
  /// `index < len`.
  unsafe fn remove_at_unchecked(&mut self, index: usize) -> T {
    debug_assert!(index < self.len);
    unsafe {
      if index == 0 {
        pop_front_unchecked!(self)
      } else if index == self.len - 1 {
        pop_back_unchecked!(self)
      } else {
        let elem = self.buffer_read(self.to_physical_idx(index));
        self.close_gap(index, 1);
        elem
      }
    }
  }

  /// Drops the elements at logical `index..index + count` in place, leaving
  /// the length as it was.
  ///
  /// If a destructor panics, the deque is cut back to `index` elements and
  /// everything after that is leaked rather than dropped twice.
  ///
  /// # Safety
  ///
  /// `index + count <= len`, and the dropped slots must not be read again.
  unsafe fn drop_range(&mut self, index: usize, count: usize) {
    /// Runs the destructor for all items in the slice when it gets dropped (normally or
    /// during unwinding).
    struct Dropper<'a, T>(&'a mut [T]);

    impl<T> Drop for Dropper<'_, T> {
      fn drop(&mut self) {
        unsafe {
          ptr::drop_in_place(self.0);
        }
      }
    }

    if count == 0 {
      return;
    }

    let (a, b) = self.slice_ranges(index..index + count);
    let len = self.len;
    self.len = index;
    unsafe {
      let front = self.buffer_range_mut(a);
      let back = self.buffer_range_mut(b);
      // Make sure the second run is dropped even when a destructor
      // in the first one panics.
      let _back_dropper = Dropper(&mut *back);
      ptr::drop_in_place(front);
    }
    self.len = len;
  }

  /// Given a range into the logical buffer of the deque, this function
  /// return two ranges into the physical buffer that correspond to
  /// the given range.
  ///
  /// The first range runs up to the end of the buffer at most; the second
  /// one, possibly empty, starts at slot 0.
  fn slice_ranges(&self, Range { start, end }: Range<usize>) -> (Range<usize>, Range<usize>) {
    debug_assert!(start <= end && end <= self.len);
    let len = end - start;

    if len == 0 {
      (0..0, 0..0)
    } else {
      // because `len != 0`, we know that `start < end <= self.len`, so the
      // capacity is non-zero and the indexing is valid.
      let wrapped_start = self.to_physical_idx(start);

      // this subtraction can never overflow because `wrapped_start` is
      // strictly less than `self.capacity()`.
      let head_len = self.capacity() - wrapped_start;

      if head_len >= len {
        // we know that `len + wrapped_start <= self.capacity <= usize::MAX`, so this addition can't overflow
        (wrapped_start..wrapped_start + len, 0..0)
      } else {
        // can't overflow because of the if condition
        let tail_len = len - head_len;
        (wrapped_start..self.capacity(), 0..tail_len)
      }
    }
  }

  /// Returns the index in the underlying buffer for a given logical element
  /// index + addend.
  #[inline]
  fn wrap_add(&self, idx: usize, addend: usize) -> usize {
    wrap_index(idx.wrapping_add(addend), self.capacity())
  }

  #[inline]
  fn to_physical_idx(&self, idx: usize) -> usize {
    self.wrap_add(self.head, idx)
  }

  /// Returns the index in the underlying buffer for a given logical element
  /// index - subtrahend.
  #[inline]
  fn wrap_sub(&self, idx: usize, subtrahend: usize) -> usize {
    wrap_index(
      idx.wrapping_sub(subtrahend).wrapping_add(self.capacity()),
      self.capacity(),
    )
  }

  /// Moves an element out of the buffer
  ///
  /// ## Safety
  /// - `off` must be a valid index into the buffer containing an initialized value
  #[inline]
  unsafe fn buffer_read(&self, off: usize) -> T {
    unsafe { (*self.ptr().add(off)).assume_init_read() }
  }

  /// Returns a slice pointer into the buffer.
  /// `range` must lie inside `0..self.capacity()`.
  #[inline]
  unsafe fn buffer_range(&self, range: Range<usize>) -> *const [T] {
    unsafe { ptr::slice_from_raw_parts(self.ptr().add(range.start) as _, range.end - range.start) }
  }

  /// Returns a slice pointer into the buffer.
  /// `range` must lie inside `0..self.capacity()`.
  #[inline]
  unsafe fn buffer_range_mut(&mut self, range: Range<usize>) -> *mut [T] {
    unsafe {
      ptr::slice_from_raw_parts_mut(
        self.ptr_mut().add(range.start) as _,
        range.end - range.start,
      )
    }
  }

  /// Writes an element into the buffer, moving it.
  ///
  /// # Safety
  ///
  /// May only be called if `off < self.capacity()`.
  #[inline]
  unsafe fn buffer_write(&mut self, off: usize, value: T) {
    unsafe {
      (*self.ptr_mut().add(off)).write(value);
    }
  }

  /// Copies a contiguous block of memory len long from src to dst
  #[inline]
  unsafe fn copy(&mut self, src: usize, dst: usize, len: usize) {
    debug_assert!(
      dst + len <= self.capacity() && src + len <= self.capacity(),
      "cpy dst={} src={} len={} cap={}",
      dst,
      src,
      len,
      self.capacity()
    );

    unsafe {
      let base_ptr = self.ptr_mut();
      let src_ptr = base_ptr.add(src) as *const MaybeUninit<T>;
      let dst_ptr = base_ptr.add(dst);
      ptr::copy(src_ptr, dst_ptr, len);
    }
  }

  /// Copies all values from `src` to `dst`, wrapping around if needed.
  /// Assumes capacity is sufficient.
  #[inline]
  unsafe fn copy_slice(&mut self, dst: usize, src: &[T]) {
    debug_assert!(src.len() <= self.capacity());
    let head_room = self.capacity() - dst;
    if src.len() <= head_room {
      unsafe {
        ptr::copy_nonoverlapping(src.as_ptr(), self.ptr_mut().add(dst) as _, src.len());
      }
    } else {
      let (left, right) = src.split_at(head_room);
      unsafe {
        ptr::copy_nonoverlapping(left.as_ptr(), self.ptr_mut().add(dst) as _, left.len());
        ptr::copy_nonoverlapping(right.as_ptr(), self.ptr_mut() as _, right.len());
      }
    }
  }

  /// Copies a potentially wrapping block of memory len long from src to dest.
  /// (abs(dst - src) + len) must be no larger than capacity() (There must be at
  /// most one continuous overlapping region between src and dest).
  ///
  /// The block is moved in at most three runs that wrap neither in the source
  /// nor in the destination. When the destination lies after the source the
  /// runs are moved back to front, otherwise front to back, so no run
  /// overwrites source slots that are still to be read.
  unsafe fn wrap_copy(&mut self, src: usize, dst: usize, len: usize) {
    // If T is a ZST, don't do any copying.
    if mem::size_of::<T>() == 0 || src == dst || len == 0 {
      return;
    }

    let cap = self.capacity();
    let dst_after_src = self.wrap_sub(dst, src) < len;

    if dst_after_src {
      //        S . . . .
      // 1 [_ _ A A B B C _ _]
      // 2 [_ _ A A B B B C _]
      // 3 [_ _ A A A B B C _]
      //          D . . . .
      let mut remaining = len;
      while remaining > 0 {
        let src_end = self.wrap_add(src, remaining - 1) + 1;
        let dst_end = self.wrap_add(dst, remaining - 1) + 1;
        let run = remaining.min(src_end).min(dst_end);
        unsafe { self.copy(src_end - run, dst_end - run, run) };
        remaining -= run;
      }
    } else {
      //          S . . . .
      // 1 [_ _ _ A A B B C]
      // 2 [B C _ A A B B C]
      // 3 [B C A A B B B C]
      //        D . . . .
      let mut copied = 0;
      while copied < len {
        let src_start = self.wrap_add(src, copied);
        let dst_start = self.wrap_add(dst, copied);
        let run = (len - copied).min(cap - src_start).min(cap - dst_start);
        unsafe { self.copy(src_start, dst_start, run) };
        copied += run;
      }
    }
  }
}

/// Returns the index in the underlying buffer for a given logical element index.
#[inline]
fn wrap_index(logical_index: usize, capacity: usize) -> usize {
  debug_assert!(
    (logical_index == 0 && capacity == 0)
      || logical_index < capacity
      || (logical_index - capacity) < capacity
  );
  if logical_index >= capacity {
    logical_index - capacity
  } else {
    logical_index
  }
}

#[rustversion::since(1.82)]
fn allocate<T>(capacity: usize) -> Box<[MaybeUninit<T>]> {
  Box::new_uninit_slice(capacity)
}

#[rustversion::before(1.82)]
fn allocate<T>(capacity: usize) -> Box<[MaybeUninit<T>]> {
  let mut slots = Vec::with_capacity(capacity);
  // SAFETY: `MaybeUninit<T>` does not need to be initialized.
  unsafe { slots.set_len(capacity) };
  slots.into_boxed_slice()
}

fn try_allocate<T>(capacity: usize) -> Result<Box<[MaybeUninit<T>]>> {
  let mut slots = Vec::new();
  slots
    .try_reserve_exact(capacity)
    .map_err(|_| Error::CapacityOverflow)?;
  // SAFETY: `MaybeUninit<T>` does not need to be initialized, and the
  // reservation above guarantees room for `capacity` slots.
  unsafe { slots.set_len(capacity) };
  Ok(slots.into_boxed_slice())
}

#[cold]
#[track_caller]
fn capacity_overflow() -> ! {
  panic!("capacity overflow")
}
