use std::collections::{BTreeMap, BTreeSet};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use rand::prelude::*;
use splay_tree::{Error, MultiSet, Position, Set, SplayTree};

// Keys of a tree in order
fn keys<X, C>(tree: &SplayTree<i32, X, C>) -> Vec<i32> {
    tree.iter().copied().collect()
}

// Walk from begin to end by position
fn distance<X, C>(tree: &SplayTree<i32, X, C>, mut from: Position, to: Position) -> usize {
    let mut n = 0;
    while from != to {
        from = tree.next(from);
        n += 1;
    }
    n
}

#[test]
fn unique_mode_matches_btree_set() {
    const COUNT: usize = 200000;

    let mut rng = SmallRng::seed_from_u64(31415926535);
    let mut tree: SplayTree<i32> = SplayTree::new();
    let mut model = BTreeSet::new();

    for step in 0..COUNT {
        let key = rng.random_range(0..2000);
        match rng.random_range(0..6) {
            0 | 1 => {
                let (position, inserted) = tree.insert_unique(key);
                assert_eq!(inserted, model.insert(key));
                assert_eq!(tree.get(position), Some(&key));
            }
            2 => {
                assert_eq!(tree.erase_key(&key), usize::from(model.remove(&key)));
            }
            3 => {
                let position = tree.find_and_splay(&key);
                assert_eq!(position.is_end(), !model.contains(&key));
            }
            4 => {
                assert_eq!(
                    tree.get(tree.lower_bound(&key)),
                    model.range(key..).next()
                );
                assert_eq!(
                    tree.get(tree.upper_bound(&key)),
                    model.range(key + 1..).next()
                );
            }
            _ => {
                assert_eq!(tree.count(&key), usize::from(model.contains(&key)));
            }
        }

        if step % 10000 == 0 {
            tree.assert_correctness();
            assert!(tree.iter().eq(model.iter()));
            assert_eq!(distance(&tree, tree.begin(), tree.end()), tree.len());
        }
    }

    tree.assert_correctness();
    assert_eq!(tree.len(), model.len());
    assert!(tree.iter().rev().eq(model.iter().rev()));
}

#[test]
fn equal_mode_matches_counting_map() {
    const COUNT: usize = 200000;

    let mut rng = SmallRng::seed_from_u64(27182818284);
    let mut tree: SplayTree<i32> = SplayTree::new();
    let mut model: BTreeMap<i32, usize> = BTreeMap::new();

    for step in 0..COUNT {
        let key = rng.random_range(0..500);
        match rng.random_range(0..5) {
            0 | 1 => {
                tree.insert_equal(key);
                *model.entry(key).or_default() += 1;
            }
            2 => {
                // Erase removes exactly what count reported
                let before = tree.count(&key);
                assert_eq!(tree.erase_key(&key), before);
                assert_eq!(tree.count(&key), 0);
                assert_eq!(model.remove(&key).unwrap_or(0), before);
            }
            3 => {
                let position = tree.peek(&key);
                if !position.is_end() {
                    tree.erase(position);
                    let n = model.get_mut(&key).unwrap();
                    *n -= 1;
                    if *n == 0 {
                        model.remove(&key);
                    }
                }
            }
            _ => {
                let (first, last) = tree.equal_range(&key);
                let expected = model.get(&key).copied().unwrap_or(0);
                assert_eq!(tree.count(&key), expected);
                assert_eq!(distance(&tree, first, last), expected);
            }
        }

        if step % 10000 == 0 {
            tree.assert_correctness();
            let expected: Vec<i32> = model
                .iter()
                .flat_map(|(&k, &n)| std::iter::repeat(k).take(n))
                .collect();
            assert_eq!(keys(&tree), expected);
        }
    }

    tree.assert_correctness();
    assert_eq!(tree.len(), model.values().sum::<usize>());
}

#[test]
fn split_and_merge_round_trip() {
    let mut rng = SmallRng::seed_from_u64(161803398);

    for _ in 0..200 {
        let n = rng.random_range(1..300);
        let mut tree: SplayTree<i32> = SplayTree::new();
        tree.insert_unique_iter((0..n).map(|_| rng.random_range(0..1000)));

        let all = keys(&tree);
        let pivot = all[rng.random_range(0..all.len())];

        let mut right = tree.split_key(&pivot).unwrap();
        tree.assert_correctness();
        right.assert_correctness();
        assert!(tree.iter().all(|&k| k < pivot));
        assert!(right.iter().all(|&k| k > pivot));

        tree.merge_unique(&mut right).unwrap();
        tree.assert_correctness();
        assert!(right.is_empty());

        let expected: Vec<i32> = all.into_iter().filter(|&k| k != pivot).collect();
        assert_eq!(keys(&tree), expected);
    }
}

#[test]
fn trees_survive_a_mix_of_splits_and_merges() {
    let mut rng = SmallRng::seed_from_u64(11235813);
    let mut pieces: Vec<MultiSet<i32>> = Vec::new();
    let mut whole: MultiSet<i32> = (0..5000).map(|_| rng.random_range(0..2000)).collect();
    let mut removed = 0;
    let total = whole.len();

    // Peel off the top of the multiset until it is gone
    while let Some(&top) = whole.last() {
        let cut = rng.random_range(0..=top);
        let pivot = *whole.range(cut..).next().unwrap();
        pieces.push(whole.split(&pivot).unwrap());
        removed += 1;
        whole.as_tree().assert_correctness();
    }

    // Stitch the pieces back together, smallest first
    let mut rebuilt: MultiSet<i32> = MultiSet::new();
    while let Some(mut piece) = pieces.pop() {
        piece.as_tree().assert_correctness();
        rebuilt.append(&mut piece).unwrap();
    }

    rebuilt.as_tree().assert_correctness();
    assert_eq!(rebuilt.len() + removed, total);
    let v: Vec<i32> = rebuilt.iter().copied().collect();
    assert!(v.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn inserting_two_one_four_three_five() {
    let mut set = Set::new();
    for key in [2, 1, 4, 3, 5] {
        assert!(set.insert(key));
    }
    for key in 1..=4 {
        assert_eq!(set.count(&key), 1);
    }
    assert_eq!(keys(set.as_tree()), [1, 2, 3, 4, 5]);
}

#[test]
fn erasing_the_middle_of_three() {
    let mut tree: SplayTree<i32> = SplayTree::new();
    tree.insert_unique_iter([1, 3, 5]);
    let position = tree.peek(&3);
    tree.erase(position);

    assert_eq!(tree.get(tree.begin()), Some(&1));
    assert_eq!(tree.get(tree.prev(tree.end())), Some(&5));
    assert_eq!(tree.len(), 2);
}

#[test]
fn merging_separated_sets() {
    let mut a: Set<i32> = [1, 3, 4].into_iter().collect();
    let mut b: Set<i32> = [6, 7, 9].into_iter().collect();

    a.append(&mut b).unwrap();
    assert_eq!(keys(a.as_tree()), [1, 3, 4, 6, 7, 9]);
    assert!(b.is_empty());
    b.as_tree().assert_correctness();
}

#[test]
fn merging_overlapping_sets_changes_nothing() {
    let mut a: Set<i32> = [3, 4].into_iter().collect();
    let mut b: Set<i32> = [1, 5].into_iter().collect();
    let (a0, b0) = (a.clone(), b.clone());

    assert_eq!(a.append(&mut b), Err(Error::MergeOrder));
    assert_eq!(a, a0);
    assert_eq!(b, b0);
    a.as_tree().assert_correctness();
    b.as_tree().assert_correctness();
}

#[test]
fn deep_chains_do_not_overflow_the_stack() {
    const COUNT: i32 = 1_000_000;

    // Descending inserts leave a right chain under the root
    let mut tree: SplayTree<i32> = SplayTree::new();
    tree.insert_unique_iter((0..COUNT).rev());

    let copy = tree.clone();
    assert_eq!(copy, tree);

    let mut right = tree.split_key(&(COUNT - 1)).unwrap();
    assert!(right.is_empty());
    assert_eq!(tree.len(), COUNT as usize - 1);

    right.insert_unique(COUNT);
    tree.merge_unique(&mut right).unwrap();
    tree.assert_correctness();
    drop(copy);
    drop(tree);
}

#[test]
fn emplacing_leaves_the_tree_intact() {
    let mut tree: SplayTree<i32> = SplayTree::new();
    tree.insert_unique_iter([4, 8, 15, 16, 23, 42]);

    // A panicking constructor runs before any slot is touched
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        tree.emplace_unique_with(|| panic!("constructor failed"))
    }));
    assert!(result.is_err());
    assert_eq!(tree.len(), 6);
    tree.assert_correctness();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        tree.emplace_equal_with(|| panic!("constructor failed"))
    }));
    assert!(result.is_err());
    assert_eq!(keys(&tree), [4, 8, 15, 16, 23, 42]);
    tree.assert_correctness();

    // A rejected duplicate is dropped, not kept alive
    let shared = Rc::new(7);
    let mut rcs: SplayTree<Rc<i32>> = SplayTree::new();
    assert!(rcs.insert_unique(shared.clone()).1);
    assert_eq!(Rc::strong_count(&shared), 2);

    let (position, inserted) = rcs.emplace_unique_with(|| shared.clone());
    assert!(!inserted);
    assert_eq!(rcs.get(position), Some(&shared));
    assert_eq!(Rc::strong_count(&shared), 2);
    assert_eq!(rcs.len(), 1);

    drop(rcs);
    assert_eq!(Rc::strong_count(&shared), 1);
}
