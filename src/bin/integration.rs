use circular_deque::Deque;
use std::{cell::RefCell, rc::Rc};

#[derive(Debug)]
struct DropTracker {
  id: i32,
  payload: String,
  log: Rc<RefCell<Vec<i32>>>,
}

impl DropTracker {
  fn new(log: &Rc<RefCell<Vec<i32>>>, id: i32) -> Self {
    Self {
      id,
      payload: format!("payload-{id}"),
      log: Rc::clone(log),
    }
  }
}

impl Drop for DropTracker {
  fn drop(&mut self) {
    self.log.borrow_mut().push(self.id);
  }
}

fn main() {
  let drops = Rc::new(RefCell::new(Vec::new()));

  {
    let mut deque = Deque::<DropTracker>::with_capacity(4);

    for id in 0..4 {
      deque.add_to_back(DropTracker::new(&drops, id));
    }

    // full, so the first push to the front reallocates
    for id in 4..8 {
      deque.add_to_front(DropTracker::new(&drops, id));
    }
    assert_eq!(deque.capacity(), 8);

    deque
      .insert_range(3, (8..12).map(|id| DropTracker::new(&drops, id)))
      .expect("insert in range");
    assert_eq!(deque.capacity(), 12);

    for (idx, elem) in deque.iter_mut().skip(2).take(4).enumerate() {
      elem.payload.push_str(&format!("-range-{idx}"));
    }

    deque.remove_range(1, 5).expect("remove in range");
    assert!(drops.borrow().len() == 5);

    let removed = deque.remove_at(deque.len() / 2).expect("remove in range");
    drop(removed);

    let back = deque.remove_from_back().expect("not empty");
    let front = deque.remove_from_front().expect("not empty");
    deque.add_to_front(back);
    deque.add_to_back(front);

    deque.set_capacity(deque.len()).expect("capacity covers len");
    assert!(deque.is_full());
    assert!(deque.as_slices().1.is_empty());
  }

  let mut dropped = drops.borrow().clone();
  dropped.sort();
  assert_eq!(dropped, (0..12).collect::<Vec<_>>());
}
