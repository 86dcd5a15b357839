use core::{any::Any, fmt};
use std::boxed::Box;

use super::{Deque, Error, Result};

/// A [`Deque`] that accepts and hands out type-erased values.
///
/// Values come in as `Box<dyn Any>` and are checked against the element type
/// `T` before the deque is touched; a value of another type is rejected with
/// [`Error::InvalidArgument`] and the deque stays as it was. Lookups with a
/// value of another type simply find nothing.
///
/// There is no separate rule for missing values: use `Option<U>` as the
/// element type and `None` is stored like any other value.
///
/// ## Examples
///
/// ```rust
/// use circular_deque::AnyDeque;
///
/// let mut deque = AnyDeque::<u32>::new();
/// assert_eq!(deque.add(Box::new(7u32)).unwrap(), 0);
/// assert_eq!(deque.add(Box::new(9u32)).unwrap(), 1);
/// assert!(deque.add(Box::new("seven")).is_err());
///
/// assert_eq!(deque.get(1).unwrap().downcast_ref::<u32>(), Some(&9));
/// assert_eq!(deque.index_of(&9u32), Some(1));
/// assert_eq!(deque.index_of(&9i64), None);
/// ```
pub struct AnyDeque<T> {
  inner: Deque<T>,
}

impl<T> Default for AnyDeque<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: fmt::Debug> fmt::Debug for AnyDeque<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("AnyDeque").field(&self.inner).finish()
  }
}

impl<T> From<Deque<T>> for AnyDeque<T> {
  #[inline]
  fn from(inner: Deque<T>) -> Self {
    Self { inner }
  }
}

impl<T> AnyDeque<T> {
  /// Creates an empty adapter over a [`Deque::new`].
  #[inline]
  pub fn new() -> Self {
    Self {
      inner: Deque::new(),
    }
  }

  /// Returns the number of elements.
  #[inline]
  pub fn len(&self) -> usize {
    self.inner.len()
  }

  /// Returns `true` if there are no elements.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  /// Borrows the typed deque.
  #[inline]
  pub fn as_deque(&self) -> &Deque<T> {
    &self.inner
  }

  /// Mutably borrows the typed deque.
  #[inline]
  pub fn as_deque_mut(&mut self) -> &mut Deque<T> {
    &mut self.inner
  }

  /// Gives back the typed deque.
  #[inline]
  pub fn into_inner(self) -> Deque<T> {
    self.inner
  }
}

impl<T: Any> AnyDeque<T> {
  /// Appends `value` to the back and returns its index.
  ///
  /// ## Errors
  ///
  /// [`Error::InvalidArgument`] if `value` is not a `T`.
  pub fn add(&mut self, value: Box<dyn Any>) -> Result<usize> {
    let value = Self::downcast(value)?;
    self.inner.add_to_back(value);
    Ok(self.inner.len() - 1)
  }

  /// Inserts `value` at `index`.
  ///
  /// ## Errors
  ///
  /// - [`Error::InvalidArgument`] if `value` is not a `T`.
  /// - [`Error::IndexOutOfRange`] if `index > len`.
  pub fn insert(&mut self, index: usize, value: Box<dyn Any>) -> Result<()> {
    let value = Self::downcast(value)?;
    self.inner.insert(index, value)
  }

  /// Replaces the element at `index` with `value` and returns the old one.
  ///
  /// ## Errors
  ///
  /// - [`Error::InvalidArgument`] if `value` is not a `T`.
  /// - [`Error::IndexOutOfRange`] if `index >= len`.
  pub fn set(&mut self, index: usize, value: Box<dyn Any>) -> Result<T> {
    let value = Self::downcast(value)?;
    self.inner.set(index, value)
  }

  /// Returns the element at `index` as a `&dyn Any`.
  ///
  /// ## Errors
  ///
  /// [`Error::IndexOutOfRange`] if `index >= len`.
  pub fn get(&self, index: usize) -> Result<&dyn Any> {
    self.inner.get(index).map(|value| value as &dyn Any)
  }

  /// Removes the element at `index` and returns it boxed.
  ///
  /// ## Errors
  ///
  /// [`Error::IndexOutOfRange`] if `index >= len`.
  pub fn remove_at(&mut self, index: usize) -> Result<Box<dyn Any>> {
    self
      .inner
      .remove_at(index)
      .map(|value| Box::new(value) as Box<dyn Any>)
  }

  /// Returns the index of the first element equal to `value`, or `None`
  /// when nothing matches or `value` is not a `T`.
  pub fn index_of(&self, value: &dyn Any) -> Option<usize>
  where
    T: PartialEq,
  {
    value
      .downcast_ref::<T>()
      .and_then(|value| self.inner.index_of(value))
  }

  /// Returns `true` if some element equals `value`.
  pub fn contains(&self, value: &dyn Any) -> bool
  where
    T: PartialEq,
  {
    value
      .downcast_ref::<T>()
      .is_some_and(|value| self.inner.contains(value))
  }

  /// Removes the first element equal to `value`, returning whether one was
  /// found.
  pub fn remove(&mut self, value: &dyn Any) -> bool
  where
    T: PartialEq,
  {
    match value.downcast_ref::<T>() {
      Some(value) => self.inner.remove(value),
      None => false,
    }
  }

  fn downcast(value: Box<dyn Any>) -> Result<T> {
    value
      .downcast::<T>()
      .map(|value| *value)
      .map_err(|_| Error::invalid_argument("value is not of the deque's element type"))
  }
}
