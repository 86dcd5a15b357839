use circular_deque::{Deque, Result};
use std::fmt::{self, Display};

/// Renders a deque as `[ a b c ]`.
struct Show<'a, T>(&'a Deque<T>);

impl<T: Display> Display for Show<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[ ")?;
    for item in self.0 {
      write!(f, "{item} ")?;
    }
    f.write_str("]")
  }
}

fn main() -> Result<()> {
  let mut deque = Deque::new();
  println!("{}", deque.is_empty());

  deque.add_to_back(32);
  println!("{}", Show(&deque));

  deque.add_to_back(17);
  println!("{}", Show(&deque));

  println!("{}", deque.len());
  println!("{}", deque.is_empty());

  deque.add_to_front(99);
  println!("{}", Show(&deque));

  deque.add_to_front(57);
  println!("{}", Show(&deque));

  deque.remove_from_back()?;
  println!("{}", Show(&deque));

  deque.remove_from_front()?;
  println!("{}", Show(&deque));

  Ok(())
}
