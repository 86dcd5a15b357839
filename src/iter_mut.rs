use core::slice;

use super::macros::two_run_iterator;

/// A front-to-back iterator over mutable references to the elements of a
/// [`Deque`](crate::Deque).
///
/// This `struct` is created by the [`iter_mut`](crate::Deque::iter_mut)
/// method.
pub struct IterMut<'a, T> {
  front: slice::IterMut<'a, T>,
  back: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
  pub(super) fn new(front: slice::IterMut<'a, T>, back: slice::IterMut<'a, T>) -> Self {
    Self { front, back }
  }

  /// Turns the iterator into the pair of slices it has not yielded yet.
  ///
  /// This consumes the iterator so the returned slices cannot alias a
  /// reference it would still hand out.
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
  /// let mut iter = deque.iter_mut();
  /// iter.next();
  /// iter.next_back();
  ///
  /// let (front, back) = iter.into_slices();
  /// front[0] = 42;
  /// back[0] = 24;
  /// assert_eq!(deque.as_slices(), (&[8, 42, 10][..], &[24, 1, 2][..]));
  /// ```
  pub fn into_slices(self) -> (&'a mut [T], &'a mut [T]) {
    (self.front.into_slice(), self.back.into_slice())
  }

  /// Views the elements not yet yielded as a pair of slices, in order.
  ///
  /// The slices borrow from the iterator, not from the deque.
  pub fn as_slices(&self) -> (&[T], &[T]) {
    (self.front.as_slice(), self.back.as_slice())
  }
}

two_run_iterator!(IterMut, IterMut);

#[cfg(test)]
mod tests {
  use crate::Deque;

  #[test]
  fn mutations_land_in_both_runs() {
    let mut deque = Deque::with_capacity(4);
    deque.add_to_back(1);
    deque.add_to_back(2);
    deque.add_to_front(0);
    deque.add_to_front(-1);
    assert!(deque.is_split());

    deque.iter_mut().rev().for_each(|value| *value *= 10);
    assert_eq!(deque, [-10, 0, 10, 20]);
  }

  #[test]
  fn alternating_ends_meet_in_the_middle() {
    let mut deque: Deque<i32> = (0..5).collect();
    let mut iter = deque.iter_mut();
    assert_eq!(iter.next().copied(), Some(0));
    assert_eq!(iter.next_back().copied(), Some(4));
    assert_eq!(iter.len(), 3);

    let (front, back) = iter.as_slices();
    assert_eq!([front, back].concat(), [1, 2, 3]);
    // contiguous deque: the wrapped run starts and stays empty
    assert!(back.is_empty());
    assert_eq!(iter.last().copied(), Some(3));
  }

  #[test]
  fn remaining_slices_stay_in_order_across_the_wrap() {
    let mut deque = Deque::with_capacity(6);
    for value in 3..6 {
      deque.add_to_back(value);
    }
    for value in (0..3).rev() {
      deque.add_to_front(value);
    }

    let mut iter = deque.iter_mut();
    *iter.nth(3).unwrap() = 30;
    assert_eq!(iter.as_slices(), (&[][..], &[4, 5][..]));
    *iter.next_back().unwrap() = 50;
    *iter.next_back().unwrap() = 40;
    assert_eq!(iter.next_back(), None);
    assert_eq!(iter.next(), None);
    assert_eq!(deque, [0, 1, 2, 30, 40, 50]);

    let mut iter = deque.iter_mut();
    *iter.nth_back(4).unwrap() = 10;
    let (front, back) = iter.into_slices();
    assert_eq!(front, &mut [0][..]);
    assert!(back.is_empty());
    front[0] = -1;
    assert_eq!(deque, [-1, 10, 2, 30, 40, 50]);
  }
}
