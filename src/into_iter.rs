use core::{fmt, iter::FusedIterator};

use super::Deque;

/// An owning iterator over the elements of a [`Deque`].
///
/// This `struct` is created by the [`into_iter`] method on [`Deque`]
/// (provided by the [`IntoIterator`] trait). Elements that are never yielded
/// are dropped together with the iterator.
///
/// [`into_iter`]: Deque::into_iter
#[derive(Clone)]
pub struct IntoIter<T> {
  deque: Deque<T>,
}

impl<T> IntoIter<T> {
  pub(super) fn new(deque: Deque<T>) -> Self {
    IntoIter { deque }
  }

  /// Views the elements not yet yielded as a pair of slices, in order.
  pub fn as_slices(&self) -> (&[T], &[T]) {
    self.deque.as_slices()
  }

  /// Stops iterating and hands back the elements not yet yielded.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut iter = Deque::from(vec![1, 2, 3, 4]).into_iter();
  /// iter.next();
  /// iter.next_back();
  /// assert_eq!(iter.into_deque(), [2, 3]);
  /// ```
  pub fn into_deque(self) -> Deque<T> {
    self.deque
  }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("IntoIter").field(&self.deque).finish()
  }
}

impl<T> Iterator for IntoIter<T> {
  type Item = T;

  #[inline]
  fn next(&mut self) -> Option<T> {
    self.deque.pop_front()
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.deque.len();
    (len, Some(len))
  }

  fn nth(&mut self, n: usize) -> Option<T> {
    if n >= self.deque.len() {
      self.deque.clear();
      return None;
    }
    // removing from index 0 only moves the head
    self.deque.remove_range(0, n).ok()?;
    self.deque.pop_front()
  }

  #[inline]
  fn count(self) -> usize {
    self.deque.len()
  }

  #[inline]
  fn last(mut self) -> Option<T> {
    self.deque.pop_back()
  }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
  #[inline]
  fn next_back(&mut self) -> Option<T> {
    self.deque.pop_back()
  }

  fn nth_back(&mut self, n: usize) -> Option<T> {
    let len = self.deque.len();
    if n >= len {
      self.deque.clear();
      return None;
    }
    self.deque.remove_range(len - n, n).ok()?;
    self.deque.pop_back()
  }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
  use super::IntoIter;
  use crate::Deque;
  use std::{rc::Rc, vec, vec::Vec};

  #[test]
  fn iterator_behaves_like_queue() {
    let mut deque = Deque::new();
    for value in 0..5 {
      deque.add_to_back(value);
    }

    let mut iter = IntoIter::new(deque.clone());
    assert_eq!(iter.size_hint(), (5, Some(5)));
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.as_slices(), (&[1, 2, 3][..], &[][..]));
    assert_eq!(iter.last(), Some(3));

    assert_eq!(deque.into_iter().count(), 5);
  }

  #[test]
  fn wrapped_deque_yields_logical_order() {
    let mut deque = Deque::with_capacity(4);
    deque.add_to_back(2);
    deque.add_to_back(3);
    deque.add_to_front(1);
    deque.add_to_front(0);
    assert!(deque.is_split());

    let sum = IntoIter::new(deque.clone()).fold(0, |acc, value| acc * 10 + value);
    assert_eq!(sum, 123);
    assert_eq!(IntoIter::new(deque).rev().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
  }

  #[test]
  fn nth_drops_what_it_skips() {
    let tracked: Vec<Rc<u32>> = (0..6).map(Rc::new).collect();
    let mut deque = Deque::with_capacity(6);
    for item in tracked.iter().skip(3) {
      deque.add_to_back(item.clone());
    }
    for item in tracked.iter().take(3).rev() {
      deque.add_to_front(item.clone());
    }
    assert!(deque.is_split());

    let mut iter = deque.into_iter();
    assert_eq!(iter.nth(3).as_deref(), Some(&3));
    assert_eq!(iter.nth_back(0).as_deref(), Some(&5));
    assert_eq!(iter.len(), 1);
    // 0..=3 and 5 were skipped or yielded and then dropped
    for (value, item) in tracked.iter().enumerate() {
      let expected = if value == 4 { 2 } else { 1 };
      assert_eq!(Rc::strong_count(item), expected, "value {value}");
    }

    assert_eq!(iter.nth(1), None);
    assert_eq!(iter.next(), None);
    assert!(tracked.iter().all(|item| Rc::strong_count(item) == 1));
  }

  #[test]
  fn nth_back_past_the_end_empties() {
    let mut iter = IntoIter::new(Deque::from(vec![0, 1, 2, 3]));
    assert_eq!(iter.nth_back(1), Some(2));
    assert_eq!(iter.size_hint(), (2, Some(2)));
    assert_eq!(iter.nth_back(2), None);
    assert_eq!(iter.len(), 0);
    assert!(iter.into_deque().is_empty());
  }
}
