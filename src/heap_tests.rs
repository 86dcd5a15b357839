use super::*;
use std::{
  string::{String, ToString},
  vec,
  vec::Vec,
};

fn s<T: ToString>(value: T) -> String {
  value.to_string()
}

macro_rules! sarr {
  ($($val:expr),+ $(,)?) => {
    [$(s($val)),+]
  };
}

/// Empties `tester` and moves its front to `head_pos` without reallocating.
fn reset(tester: &mut Deque<String>, head_pos: usize) {
  tester.clear();
  tester.head = head_pos;
}

#[test]
fn heap_test_insert() {
  let mut tester = Deque::<String>::with_capacity(15);
  let cap = tester.capacity();

  let minlen = if cfg!(miri) { cap - 1 } else { 1 };
  for len in minlen..cap {
    let expected = Deque::from_exact_iter((0..len).map(s));
    for head_pos in 0..cap {
      for to_insert in 0..len {
        reset(&mut tester, head_pos);
        for i in 0..len {
          if i != to_insert {
            tester.add_to_back(s(i));
          }
        }
        tester.insert(to_insert, s(to_insert)).unwrap();
        assert_eq!(tester.capacity(), cap);
        assert_eq!(tester, expected);
      }
    }
  }
}

#[test]
fn heap_test_insert_range() {
  let mut tester = Deque::<String>::with_capacity(11);
  let cap = tester.capacity();

  let minlen = if cfg!(miri) { cap - 2 } else { 0 };
  for len in minlen..cap {
    for count in 0..=cap - len {
      let expected = Deque::from_exact_iter((0..len + count).map(s));
      for head_pos in 0..cap {
        for at in 0..=len {
          reset(&mut tester, head_pos);
          for i in (0..at).chain(at + count..len + count) {
            tester.add_to_back(s(i));
          }
          tester.insert_range(at, (at..at + count).map(s)).unwrap();
          assert_eq!(tester.capacity(), cap);
          assert_eq!(tester, expected);
        }
      }
    }
  }
}

#[test]
fn heap_test_remove_at() {
  let mut tester = Deque::<String>::with_capacity(15);
  let cap = tester.capacity();

  let minlen = if cfg!(miri) { cap - 2 } else { 0 };
  for len in minlen..cap - 1 {
    let expected = Deque::from_exact_iter((0..len).map(s));
    for head_pos in 0..cap {
      for to_remove in 0..=len {
        reset(&mut tester, head_pos);
        for i in 0..len {
          if i == to_remove {
            tester.add_to_back(s(1234));
          }
          tester.add_to_back(s(i));
        }
        if to_remove == len {
          tester.add_to_back(s(1234));
        }
        assert_eq!(tester.remove_at(to_remove), Ok(s(1234)));
        assert_eq!(tester, expected);
      }
    }
  }
}

#[test]
fn heap_test_remove_range() {
  let mut tester = Deque::<String>::with_capacity(11);
  let cap = tester.capacity();

  let minlen = if cfg!(miri) { cap - 1 } else { 0 };
  for len in minlen..=cap {
    for count in 0..=len {
      for head_pos in 0..cap {
        for at in 0..=len - count {
          reset(&mut tester, head_pos);
          for i in 0..len {
            tester.add_to_back(s(i));
          }
          tester.remove_range(at, count).unwrap();
          let expected: Vec<String> = (0..at).chain(at + count..len).map(s).collect();
          assert_eq!(tester, expected);
        }
      }
    }
  }
}

#[test]
fn heap_test_growth_moves_strings() {
  let mut tester = Deque::with_capacity(3);
  tester.head = 2;
  tester.add_to_back(s("b"));
  tester.add_to_back(s("c"));
  tester.add_to_front(s("a"));
  assert!(tester.is_split());

  tester.add_to_front(s("z"));
  assert_eq!(tester.capacity(), 6);
  assert_eq!(tester, sarr!["z", "a", "b", "c"]);

  tester.set_capacity(4).unwrap();
  assert_eq!(tester, sarr!["z", "a", "b", "c"]);
  tester.insert_range(2, sarr!["x", "y"]).unwrap();
  assert_eq!(tester.capacity(), 6);
  assert_eq!(tester, sarr!["z", "a", "x", "y", "b", "c"]);
}

#[test]
fn heap_test_set_and_search() {
  let mut tester = Deque::from(vec![s("one"), s("two"), s("three")]);
  assert_eq!(tester.set(1, s("deux")), Ok(s("two")));
  assert_eq!(tester.index_of(&s("three")), Some(2));
  assert!(tester.remove(&s("one")));
  assert!(!tester.contains(&s("one")));
  assert_eq!(tester.to_vec(), vec![s("deux"), s("three")]);
}

#[test]
fn heap_test_copy_to_and_clone() {
  let mut tester = Deque::with_capacity(4);
  tester.head = 3;
  tester.extend(sarr!["a", "b", "c"]);
  assert!(tester.is_split());

  let mut dest = vec![String::new(); 4];
  tester.copy_to(&mut dest, 1).unwrap();
  assert_eq!(dest, ["", "a", "b", "c"]);

  let cloned = tester.clone();
  drop(tester);
  assert_eq!(cloned, sarr!["a", "b", "c"]);
}

#[test]
fn heap_test_pops_on_wrapped_buffer() {
  let mut tester = Deque::with_capacity(4);
  tester.head = 3;
  tester.extend(sarr![1, 2, 3, 4]);
  assert_eq!(tester.remove_from_front(), Ok(s(1)));
  assert_eq!(tester.remove_from_back(), Ok(s(4)));
  assert_eq!(tester.pop_front(), Some(s(2)));
  assert_eq!(tester.pop_back(), Some(s(3)));
  assert!(tester.remove_from_back().is_err());
}

#[test]
fn heap_test_into_iter_drops_remainder() {
  let mut tester = Deque::with_capacity(5);
  tester.head = 4;
  tester.extend(sarr!["a", "b", "c", "d"]);
  let mut iter = tester.into_iter();
  assert_eq!(iter.next_back(), Some(s("d")));
  assert_eq!(iter.next(), Some(s("a")));
  drop(iter);
}
