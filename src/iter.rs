use core::slice;

use super::macros::two_run_iterator;

/// A front-to-back iterator over the elements of a [`Deque`](crate::Deque).
///
/// This `struct` is created by the [`iter`](crate::Deque::iter) method. It
/// borrows the deque, so the deque cannot be modified while the iterator is
/// alive.
#[derive(Clone)]
pub struct Iter<'a, T> {
  front: slice::Iter<'a, T>,
  back: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
  pub(super) const fn new(front: slice::Iter<'a, T>, back: slice::Iter<'a, T>) -> Self {
    Self { front, back }
  }

  /// Views the elements not yet yielded as a pair of slices, in order.
  ///
  /// The first slice is what is left of the run starting at the front of the
  /// deque and the second is what is left of the wrapped run; either may be
  /// empty. The slices borrow the deque itself, so the iterator can keep
  /// going while they are alive.
  ///
  /// ## Examples
  ///
  /// ```
  /// use circular_deque::Deque;
  ///
  /// let mut deque = Deque::with_capacity(6);
  /// deque.add_to_back(0);
  /// deque.add_to_back(1);
  /// deque.add_to_back(2);
  /// deque.add_to_front(10);
  /// deque.add_to_front(9);
  /// deque.add_to_front(8);
  ///
  /// let mut iter = deque.iter();
  /// iter.next();
  /// iter.next_back();
  /// assert_eq!(iter.as_slices(), (&[9, 10][..], &[0, 1][..]));
  ///
  /// iter.nth(1);
  /// assert_eq!(iter.as_slices(), (&[][..], &[0, 1][..]));
  /// ```
  pub fn as_slices(&self) -> (&'a [T], &'a [T]) {
    (self.front.as_slice(), self.back.as_slice())
  }
}

two_run_iterator!(Iter, Iter);

#[cfg(test)]
mod tests {
  use crate::Deque;
  use std::{format, vec::Vec};

  /// `[0, 1, 2, 3, 4, 5]` stored as the runs `[0, 1, 2]` and `[3, 4, 5]`.
  fn split() -> Deque<i32> {
    let mut deque = Deque::with_capacity(6);
    for value in 3..6 {
      deque.add_to_back(value);
    }
    for value in (0..3).rev() {
      deque.add_to_front(value);
    }
    assert!(deque.is_split());
    deque
  }

  #[test]
  fn runs_keep_their_order_when_one_empties() {
    let deque = split();

    let mut iter = deque.iter();
    assert_eq!(iter.nth(2), Some(&2));
    assert_eq!(iter.as_slices(), (&[][..], &[3, 4, 5][..]));
    assert_eq!(iter.next(), Some(&3));
    assert_eq!(iter.as_slices(), (&[][..], &[4, 5][..]));

    let mut iter = deque.iter();
    assert_eq!(iter.nth_back(2), Some(&3));
    assert_eq!(iter.as_slices(), (&[0, 1, 2][..], &[][..]));
    assert_eq!(iter.next_back(), Some(&2));
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.as_slices(), (&[1][..], &[][..]));
  }

  #[test]
  fn nth_crosses_the_wrap() {
    let deque = split();
    for n in 0..8 {
      assert_eq!(deque.iter().nth(n), deque.get(n).ok());
      let from_back = deque.len().checked_sub(n + 1);
      assert_eq!(
        deque.iter().nth_back(n),
        from_back.and_then(|idx| deque.get(idx).ok())
      );
    }

    let mut iter = deque.iter();
    assert_eq!(iter.nth(1), Some(&1));
    assert_eq!(iter.nth(2), Some(&4));
    assert_eq!(iter.len(), 1);
    assert_eq!(iter.nth(1), None);
    assert_eq!(iter.next(), None);
  }

  #[test]
  fn alternating_ends_yield_every_element_once() {
    let deque = split();
    let mut iter = deque.iter();
    let mut seen = Vec::new();
    while let Some(&value) = iter.next() {
      seen.push(value);
      if let Some(&value) = iter.next_back() {
        seen.push(value);
      }
    }
    assert_eq!(seen, [0, 5, 1, 4, 2, 3]);
    assert_eq!(iter.next_back(), None);
  }

  #[test]
  fn folds_and_last_follow_logical_order() {
    let deque = split();
    assert_eq!(deque.iter().fold(0, |acc, v| acc * 10 + v), 12345);
    assert_eq!(deque.iter().rfold(0, |acc, v| acc * 10 + v), 543210);
    assert_eq!(deque.iter().last(), Some(&5));
    assert_eq!(deque.iter().count(), 6);

    let mut iter = deque.iter();
    iter.nth_back(2);
    assert_eq!(iter.last(), Some(&2));
  }

  #[test]
  fn default_and_debug() {
    let iter: super::Iter<'_, u8> = Default::default();
    assert_eq!(iter.len(), 0);
    assert_eq!(format!("{iter:?}"), "[]");

    let deque = split();
    let mut iter = deque.iter();
    iter.nth(1);
    assert_eq!(format!("{iter:?}"), "[2, 3, 4, 5]");
  }
}
