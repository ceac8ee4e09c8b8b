//! Property-based invariant tests for `ObjectListModel`.
//!
//! Random sequences of mutations over a small pool of repeated names must keep:
//! 1. `count()` equal to the number of stored records.
//! 2. The uid index exact: a name is found iff some stored record carries it, and the
//!    record found carries that name and is stored in the list.

use std::collections::BTreeSet;
use std::rc::Rc;

use object_list_model::framework::ObjectListModel;
use object_list_model::model::Item;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

const NAMES: [&str; 4] = ["a", "b", "c", ""];

#[derive(Debug, Clone)]
enum Op {
    Append(usize),
    Prepend(usize),
    Insert(usize, usize),
    RemoveAt(usize),
    Remove(usize),
    Rename(usize, usize),
    Move(usize, usize),
    Clear,
}

fn name_strategy() -> impl Strategy<Value = usize> {
    0..NAMES.len()
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => name_strategy().prop_map(Op::Append),
        2 => name_strategy().prop_map(Op::Prepend),
        2 => (0usize..8, name_strategy()).prop_map(|(at, n)| Op::Insert(at, n)),
        2 => (0usize..8).prop_map(Op::RemoveAt),
        1 => (0usize..8).prop_map(Op::Remove),
        4 => (0usize..8, name_strategy()).prop_map(|(at, n)| Op::Rename(at, n)),
        1 => (0usize..8, 0usize..8).prop_map(|(from, to)| Op::Move(from, to)),
        1 => Just(Op::Clear),
    ]
}

fn apply(list: &ObjectListModel<Item>, next_id: &mut i64, op: &Op) {
    let mut item = |name: usize| {
        *next_id += 1;
        Item::new(*next_id, NAMES[name])
    };
    match *op {
        Op::Append(name) => list.append(item(name)),
        Op::Prepend(name) => list.prepend(item(name)),
        Op::Insert(at, name) => list.insert(at, item(name)),
        Op::RemoveAt(at) => list.remove_at(at),
        Op::Remove(at) => {
            if let Some(record) = list.at(at) {
                list.remove(&record);
            }
        }
        Op::Rename(at, name) => {
            if let Some(record) = list.at(at) {
                record.set_subname(NAMES[name]);
            }
        }
        Op::Move(from, to) => list.move_row(from, to),
        Op::Clear => list.clear(),
    }
}

fn check(list: &ObjectListModel<Item>) -> Result<(), TestCaseError> {
    let records = list.to_vec();
    prop_assert_eq!(list.count(), records.len());
    prop_assert!(list.at(list.count()).is_none());

    let stored: BTreeSet<String> = records
        .iter()
        .map(|r| r.get_subname())
        .filter(|name| !name.is_empty())
        .collect();

    for name in NAMES {
        match list.get_by_uid(name) {
            Some(found) => {
                prop_assert!(stored.contains(name), "stale uid {:?}", name);
                prop_assert_eq!(found.get_subname(), name);
                prop_assert!(records.iter().any(|r| Rc::ptr_eq(r, &found)));
                prop_assert!(list.index_of_uid(name).is_some());
            }
            None => prop_assert!(!stored.contains(name), "uid {:?} not indexed", name),
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn count_and_uid_index_track_every_mutation(
        ops in proptest::collection::vec(op_strategy(), 0..64),
    ) {
        let list = ObjectListModel::new(Item::list_options());
        let mut next_id = 0;
        for op in &ops {
            apply(&list, &mut next_id, op);
            check(&list)?;
        }
    }
}
