/// A specialized [`Result`](core::result::Result) for deque operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by [`Deque`](crate::Deque) operations.
///
/// Every failing operation is checked before the deque is touched, so a
/// returned error always leaves the deque exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
  /// An argument was rejected, e.g. a capacity below the current length or a
  /// destination slice that cannot hold the deque.
  #[error("invalid argument: {reason}")]
  InvalidArgument {
    /// What was wrong with the argument.
    reason: &'static str,
  },
  /// A logical index was outside the live range of the deque.
  #[error("index {index} out of range for deque of length {len}")]
  IndexOutOfRange {
    /// The offending logical index.
    index: usize,
    /// The length of the deque when the index was checked.
    len: usize,
  },
  /// The operation is not valid in the current state, e.g. popping from an
  /// empty deque.
  #[error("invalid operation: {reason}")]
  InvalidOperation {
    /// Why the operation could not run.
    reason: &'static str,
  },
  /// The requested capacity cannot be represented or allocated.
  #[error("capacity overflow")]
  CapacityOverflow,
}

impl Error {
  #[inline]
  pub(crate) const fn invalid_argument(reason: &'static str) -> Self {
    Self::InvalidArgument { reason }
  }

  #[inline]
  pub(crate) const fn index_out_of_range(index: usize, len: usize) -> Self {
    Self::IndexOutOfRange { index, len }
  }

  #[inline]
  pub(crate) const fn empty() -> Self {
    Self::InvalidOperation {
      reason: "the deque is empty",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::Error;
  use std::string::ToString;

  #[test]
  fn messages_name_the_failure() {
    assert_eq!(
      Error::index_out_of_range(4, 2).to_string(),
      "index 4 out of range for deque of length 2"
    );
    assert_eq!(
      Error::empty().to_string(),
      "invalid operation: the deque is empty"
    );
    assert_eq!(
      Error::invalid_argument("capacity is smaller than the length").to_string(),
      "invalid argument: capacity is smaller than the length"
    );
    assert_eq!(Error::CapacityOverflow.to_string(), "capacity overflow");
  }
}
