//! Capability traits for index-addressable double-ended queues.
//!
//! Code that only needs one capability can be written against the matching
//! trait and run on either a [`Deque`] or a [`VecDeque`].

use std::collections::VecDeque;

use super::{Deque, Error, Result};

/// Reading and replacing elements by logical index.
pub trait RandomAccess<T> {
  /// Returns the number of elements.
  fn len(&self) -> usize;

  /// Returns `true` if there are no elements.
  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the element at `index`, or [`Error::IndexOutOfRange`].
  fn get(&self, index: usize) -> Result<&T>;

  /// Returns the element at `index` mutably, or [`Error::IndexOutOfRange`].
  fn get_mut(&mut self, index: usize) -> Result<&mut T>;

  /// Replaces the element at `index` and returns the old one, or fails with
  /// [`Error::IndexOutOfRange`].
  fn set(&mut self, index: usize, value: T) -> Result<T>;
}

/// Adding and removing elements at either end or at an index.
pub trait Growable<T> {
  /// Returns the number of elements the container can hold before it
  /// reallocates.
  fn capacity(&self) -> usize;

  /// Makes room for at least `capacity` elements, or fails with
  /// [`Error::InvalidArgument`] if `capacity` is below the length.
  ///
  /// [`Deque`] resizes to exactly `capacity`; other containers may keep a
  /// larger buffer.
  fn set_capacity(&mut self, capacity: usize) -> Result<()>;

  /// Appends an element to the back.
  fn push_back(&mut self, value: T);

  /// Prepends an element to the front.
  fn push_front(&mut self, value: T);

  /// Removes and returns the element from the back, or `None` if empty.
  fn pop_back(&mut self) -> Option<T>;

  /// Removes and returns the element from the front, or `None` if empty.
  fn pop_front(&mut self) -> Option<T>;

  /// Inserts an element before the one at `index`; `index == len` appends.
  fn insert(&mut self, index: usize, value: T) -> Result<()>;

  /// Removes and returns the element at `index`.
  fn remove_at(&mut self, index: usize) -> Result<T>;

  /// Removes all elements.
  fn clear(&mut self);
}

/// Linear search by equality.
pub trait Searchable<T: PartialEq> {
  /// Returns the index of the first element equal to `value`.
  fn index_of(&self, value: &T) -> Option<usize>;

  /// Returns `true` if some element equals `value`.
  fn contains(&self, value: &T) -> bool {
    self.index_of(value).is_some()
  }

  /// Removes the first element equal to `value`, returning whether one was
  /// found.
  fn remove_item(&mut self, value: &T) -> bool;
}

impl<T> RandomAccess<T> for Deque<T> {
  #[inline]
  fn len(&self) -> usize {
    Deque::len(self)
  }

  #[inline]
  fn get(&self, index: usize) -> Result<&T> {
    Deque::get(self, index)
  }

  #[inline]
  fn get_mut(&mut self, index: usize) -> Result<&mut T> {
    Deque::get_mut(self, index)
  }

  #[inline]
  fn set(&mut self, index: usize, value: T) -> Result<T> {
    Deque::set(self, index, value)
  }
}

impl<T> Growable<T> for Deque<T> {
  #[inline]
  fn capacity(&self) -> usize {
    Deque::capacity(self)
  }

  #[inline]
  fn set_capacity(&mut self, capacity: usize) -> Result<()> {
    Deque::set_capacity(self, capacity)
  }

  #[inline]
  fn push_back(&mut self, value: T) {
    self.add_to_back(value)
  }

  #[inline]
  fn push_front(&mut self, value: T) {
    self.add_to_front(value)
  }

  #[inline]
  fn pop_back(&mut self) -> Option<T> {
    Deque::pop_back(self)
  }

  #[inline]
  fn pop_front(&mut self) -> Option<T> {
    Deque::pop_front(self)
  }

  #[inline]
  fn insert(&mut self, index: usize, value: T) -> Result<()> {
    Deque::insert(self, index, value)
  }

  #[inline]
  fn remove_at(&mut self, index: usize) -> Result<T> {
    Deque::remove_at(self, index)
  }

  #[inline]
  fn clear(&mut self) {
    Deque::clear(self)
  }
}

impl<T: PartialEq> Searchable<T> for Deque<T> {
  #[inline]
  fn index_of(&self, value: &T) -> Option<usize> {
    Deque::index_of(self, value)
  }

  #[inline]
  fn contains(&self, value: &T) -> bool {
    Deque::contains(self, value)
  }

  #[inline]
  fn remove_item(&mut self, value: &T) -> bool {
    self.remove(value)
  }
}

impl<T> RandomAccess<T> for VecDeque<T> {
  fn len(&self) -> usize {
    VecDeque::len(self)
  }

  fn get(&self, index: usize) -> Result<&T> {
    let len = VecDeque::len(self);
    VecDeque::get(self, index).ok_or(Error::index_out_of_range(index, len))
  }

  fn get_mut(&mut self, index: usize) -> Result<&mut T> {
    let len = VecDeque::len(self);
    VecDeque::get_mut(self, index).ok_or(Error::index_out_of_range(index, len))
  }

  fn set(&mut self, index: usize, value: T) -> Result<T> {
    RandomAccess::get_mut(self, index).map(|slot| core::mem::replace(slot, value))
  }
}

impl<T> Growable<T> for VecDeque<T> {
  fn capacity(&self) -> usize {
    VecDeque::capacity(self)
  }

  fn set_capacity(&mut self, capacity: usize) -> Result<()> {
    let len = VecDeque::len(self);
    if capacity < len {
      return Err(Error::invalid_argument(
        "capacity cannot be set to a value less than the length",
      ));
    }
    if capacity > VecDeque::capacity(self) {
      self
        .try_reserve_exact(capacity - len)
        .map_err(|_| Error::CapacityOverflow)
    } else {
      self.shrink_to(capacity);
      Ok(())
    }
  }

  fn push_back(&mut self, value: T) {
    VecDeque::push_back(self, value)
  }

  fn push_front(&mut self, value: T) {
    VecDeque::push_front(self, value)
  }

  fn pop_back(&mut self) -> Option<T> {
    VecDeque::pop_back(self)
  }

  fn pop_front(&mut self) -> Option<T> {
    VecDeque::pop_front(self)
  }

  fn insert(&mut self, index: usize, value: T) -> Result<()> {
    let len = VecDeque::len(self);
    if index > len {
      return Err(Error::index_out_of_range(index, len));
    }
    VecDeque::insert(self, index, value);
    Ok(())
  }

  fn remove_at(&mut self, index: usize) -> Result<T> {
    let len = VecDeque::len(self);
    VecDeque::remove(self, index).ok_or(Error::index_out_of_range(index, len))
  }

  fn clear(&mut self) {
    VecDeque::clear(self)
  }
}

impl<T: PartialEq> Searchable<T> for VecDeque<T> {
  fn index_of(&self, value: &T) -> Option<usize> {
    self.iter().position(|item| item == value)
  }

  fn remove_item(&mut self, value: &T) -> bool {
    match Searchable::index_of(self, value) {
      Some(index) => VecDeque::remove(self, index).is_some(),
      None => false,
    }
  }
}
