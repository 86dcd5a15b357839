macro_rules! push_back_unchecked {
  ($this:ident($value:expr)) => {{
    let len = $this.len;
    $this.len += 1;
    let idx = $this.to_physical_idx(len);

    // SAFETY: idx is guaranteed to be in-bounds and uninitialized

    let ptr = &mut *$this.ptr_mut().add(idx);
    ptr.write($value)
  }};
}

macro_rules! push_front_unchecked {
  ($this:ident($value:expr)) => {{
    $this.head = $this.wrap_sub($this.head, 1);
    $this.len += 1;
    // SAFETY: head is guaranteed to be in-bounds and uninitialized
    let ptr = &mut *$this.ptr_mut().add($this.head);
    ptr.write($value)
  }};
}

macro_rules! pop_front_unchecked {
  ($this:ident) => {{
    let old_head = $this.head;
    $this.head = $this.to_physical_idx(1);
    $this.len -= 1;
    // SAFETY: the caller checked that the deque is not empty, so the old head is initialized
    $this.buffer_read(old_head)
  }};
}

macro_rules! pop_back_unchecked {
  ($this:ident) => {{
    $this.len -= 1;
    // SAFETY: the caller checked that the deque is not empty, so the slot is initialized
    $this.buffer_read($this.to_physical_idx($this.len))
  }};
}

/// Emits a `tracing` event at TRACE level when the `tracing` feature is on.
macro_rules! trace {
  ($($arg:tt)+) => {
    #[cfg(feature = "tracing")]
    ::tracing::trace!(target: "circular_deque", $($arg)+);
  };
}

/// Emits a `tracing` event at DEBUG level when the `tracing` feature is on.
macro_rules! debug {
  ($($arg:tt)+) => {
    #[cfg(feature = "tracing")]
    ::tracing::debug!(target: "circular_deque", $($arg)+);
  };
}

/// Implements the iterator traits for a borrowing iterator made of a `front`
/// and a `back` slice iterator over the two runs of a deque.
///
/// The runs never trade places: `next` drains `front` before it touches
/// `back`, and `next_back` drains `back` before it touches `front`, so the
/// not-yet-yielded elements are always `front` followed by `back`.
macro_rules! two_run_iterator {
  ($name:ident, $run:ident) => {
    impl<'a, T> Iterator for $name<'a, T> {
      type Item = <::core::slice::$run<'a, T> as Iterator>::Item;

      #[inline]
      fn next(&mut self) -> Option<Self::Item> {
        self.front.next().or_else(|| self.back.next())
      }

      #[inline]
      fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.front.len() + self.back.len();
        (len, Some(len))
      }

      fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let in_front = self.front.len();
        match self.front.nth(n) {
          Some(item) => Some(item),
          None => self.back.nth(n - in_front),
        }
      }

      #[inline]
      fn count(self) -> usize {
        self.front.len() + self.back.len()
      }

      #[inline]
      fn last(self) -> Option<Self::Item> {
        let in_front = self.front;
        self.back.last().or_else(|| in_front.last())
      }

      fn fold<Acc, F>(self, init: Acc, mut f: F) -> Acc
      where
        F: FnMut(Acc, Self::Item) -> Acc,
      {
        let acc = self.front.fold(init, &mut f);
        self.back.fold(acc, f)
      }
    }

    impl<'a, T> DoubleEndedIterator for $name<'a, T> {
      #[inline]
      fn next_back(&mut self) -> Option<Self::Item> {
        self.back.next_back().or_else(|| self.front.next_back())
      }

      fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        let in_back = self.back.len();
        match self.back.nth_back(n) {
          Some(item) => Some(item),
          None => self.front.nth_back(n - in_back),
        }
      }

      fn rfold<Acc, F>(self, init: Acc, mut f: F) -> Acc
      where
        F: FnMut(Acc, Self::Item) -> Acc,
      {
        let acc = self.back.rfold(init, &mut f);
        self.front.rfold(acc, f)
      }
    }

    impl<T> ExactSizeIterator for $name<'_, T> {}

    impl<T> ::core::iter::FusedIterator for $name<'_, T> {}

    impl<T> Default for $name<'_, T> {
      /// Creates an iterator that yields nothing.
      fn default() -> Self {
        Self {
          front: Default::default(),
          back: Default::default(),
        }
      }
    }

    impl<T: ::core::fmt::Debug> ::core::fmt::Debug for $name<'_, T> {
      fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_list()
          .entries(self.front.as_slice())
          .entries(self.back.as_slice())
          .finish()
      }
    }
  };
}

pub(super) use debug;
pub(super) use pop_back_unchecked;
pub(super) use pop_front_unchecked;
pub(super) use push_back_unchecked;
pub(super) use push_front_unchecked;
pub(super) use trace;
pub(super) use two_run_iterator;
