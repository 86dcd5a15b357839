use circular_deque::{Deque, Error, Growable, RandomAccess, Searchable};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

fn contents<D: RandomAccess<u32>>(deque: &D) -> Vec<u32> {
  (0..deque.len())
    .map(|idx| *deque.get(idx).unwrap())
    .collect()
}

/// Applies the same random operation to both containers and checks they
/// still agree.
fn step<A, B>(rng: &mut StdRng, ours: &mut A, model: &mut B, next: &mut u32)
where
  A: Growable<u32> + RandomAccess<u32> + Searchable<u32>,
  B: Growable<u32> + RandomAccess<u32> + Searchable<u32>,
{
  let len = ours.len();
  match rng.gen_range(0..9) {
    0 => {
      *next += 1;
      ours.push_back(*next);
      model.push_back(*next);
    }
    1 => {
      *next += 1;
      ours.push_front(*next);
      model.push_front(*next);
    }
    2 => assert_eq!(ours.pop_back(), model.pop_back()),
    3 => assert_eq!(ours.pop_front(), model.pop_front()),
    4 => {
      let idx = rng.gen_range(0..=len + 1);
      *next += 1;
      assert_eq!(ours.insert(idx, *next), model.insert(idx, *next));
    }
    5 => {
      let idx = rng.gen_range(0..=len);
      assert_eq!(ours.remove_at(idx), model.remove_at(idx));
    }
    6 => {
      let idx = rng.gen_range(0..=len);
      *next += 1;
      assert_eq!(ours.set(idx, *next), model.set(idx, *next));
    }
    7 => {
      let value = rng.gen_range(0..=*next);
      assert_eq!(ours.index_of(&value), model.index_of(&value));
      assert_eq!(ours.remove_item(&value), model.remove_item(&value));
    }
    _ => {
      let cap = len + rng.gen_range(0..4);
      assert_eq!(ours.set_capacity(cap), model.set_capacity(cap));
    }
  }
  assert_eq!(contents(ours), contents(model));
}

#[test]
fn random_operations_match_vecdeque() {
  for seed in 0..32 {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ours = Deque::with_capacity(rng.gen_range(0..4));
    let mut model = VecDeque::new();
    let mut next = 0;
    for _ in 0..400 {
      step(&mut rng, &mut ours, &mut model, &mut next);
      assert!(ours.len() <= ours.capacity());
    }
  }
}

#[test]
fn random_range_operations_match_vec() {
  let mut rng = StdRng::seed_from_u64(0x5eed);
  let mut ours: Deque<u32> = Deque::with_capacity(4);
  let mut model: Vec<u32> = Vec::new();
  let mut next = 0u32;

  for _ in 0..2_000 {
    // rotate so ranges land on every physical layout
    for _ in 0..rng.gen_range(0..3) {
      if let Some(front) = ours.pop_front() {
        ours.add_to_back(front);
        model.rotate_left(1);
      }
    }

    let len = model.len();
    if rng.gen_bool(0.55) {
      let at = rng.gen_range(0..=len);
      let count = rng.gen_range(0..5);
      let items: Vec<u32> = (next..next + count).collect();
      next += count;
      ours.insert_range(at, items.iter().copied()).unwrap();
      let tail = model.split_off(at);
      model.extend(items);
      model.extend(tail);
    } else {
      let at = rng.gen_range(0..=len);
      let count = rng.gen_range(0..=len - at);
      ours.remove_range(at, count).unwrap();
      model.drain(at..at + count);
    }
    assert_eq!(ours, model);
  }
}

#[test]
fn round_trip_through_vec() {
  for len in 0..20u32 {
    let source: Vec<u32> = (0..len).collect();
    assert_eq!(Deque::from(source.clone()).to_vec(), source);
    assert_eq!(Vec::from(Deque::from(source.clone())), source);
  }
}

#[test]
fn rotation_preserves_content() {
  let source: Vec<u32> = (0..7).collect();
  for rotations in 0..30 {
    let mut deque = Deque::from(source.clone());
    for _ in 0..rotations {
      let front = deque.remove_from_front().unwrap();
      deque.add_to_back(front);
    }
    let mut expected = source.clone();
    expected.rotate_left(rotations % source.len());
    assert_eq!(deque, expected);
  }
}

#[test]
fn insert_range_then_remove_range_restores() {
  let mut rng = StdRng::seed_from_u64(7);
  for _ in 0..200 {
    let len = rng.gen_range(0..12);
    let mut deque: Deque<u32> = Deque::with_capacity(len + rng.gen_range(0..4));
    for value in 0..len as u32 {
      if rng.gen_bool(0.5) {
        deque.add_to_back(value);
      } else {
        deque.add_to_front(value);
      }
    }
    let original = deque.clone();

    let at = rng.gen_range(0..=len);
    let count = rng.gen_range(0..6);
    deque.insert_range(at, 100..100 + count as u32).unwrap();
    deque.remove_range(at, count).unwrap();
    assert_eq!(deque, original);
  }
}

#[test]
fn set_capacity_never_changes_content() {
  let mut deque: Deque<u32> = Deque::with_capacity(6);
  for value in 0..4 {
    deque.add_to_front(value);
  }
  let snapshot = deque.to_vec();

  for cap in (4..12).chain([4, 5]) {
    deque.set_capacity(cap).unwrap();
    assert_eq!(deque.capacity(), cap);
    assert_eq!(deque, snapshot);
  }
  for cap in 0..4 {
    let before = deque.capacity();
    assert!(matches!(
      deque.set_capacity(cap),
      Err(Error::InvalidArgument { .. })
    ));
    assert_eq!(deque.capacity(), before);
    assert_eq!(deque, snapshot);
  }
}

#[test]
fn pushes_reallocate_logarithmically() {
  for n in [1usize, 7, 8, 9, 100, 1_000, 4_097] {
    let mut deque = Deque::new();
    let mut cap = deque.capacity();
    let mut reallocations = 0u32;
    for value in 0..n {
      if value % 2 == 0 {
        deque.add_to_back(value);
      } else {
        deque.add_to_front(value);
      }
      if deque.capacity() != cap {
        reallocations += 1;
        cap = deque.capacity();
      }
    }
    let bound = (n as f64).log2().ceil() as u32 + 1;
    assert!(reallocations <= bound, "n = {n}: {reallocations} > {bound}");
  }
}
