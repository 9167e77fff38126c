//! Property tests for the container and its binding.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use turbo_store::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Double,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Push),
        Just(Op::Pop),
        Just(Op::Double),
    ]
}

fn reduce(state: &Vec<i32>, op: Op) -> Vec<i32> {
    let mut next = state.clone();
    match op {
        Op::Push(n) => next.push(n),
        Op::Pop => {
            next.pop();
        }
        Op::Double => next.iter_mut().for_each(|n| *n = n.wrapping_mul(2)),
    }
    next
}

proptest! {
    #[test]
    fn state_equals_left_fold_of_actions(initial in prop::collection::vec(any::<i32>(), 0..8),
                                          ops in prop::collection::vec(op_strategy(), 0..64)) {
        let store = Store::new(initial.clone(), reduce);
        for op in ops.clone() {
            store.dispatch(op);
        }
        let expected = ops.into_iter().fold(initial, |acc, op| reduce(&acc, op));
        prop_assert_eq!(&*store.get_state(), &expected);
    }

    #[test]
    fn deliveries_equal_dispatches_after_subscribe(before in 0usize..16, after in 0usize..16) {
        let store = Store::new(Vec::new(), reduce);
        for _ in 0..before {
            store.dispatch(Op::Push(1));
        }

        let count = Rc::new(Cell::new(0usize));
        let l = {
            let count = Rc::clone(&count);
            listener(move || count.set(count.get() + 1))
        };
        store.subscribe(l);

        for i in 0..after {
            store.dispatch(Op::Push(i as i32));
            prop_assert_eq!(count.get(), i + 1);
        }
        prop_assert_eq!(count.get(), after);
    }

    #[test]
    fn server_getter_is_one_function(reads in 1usize..32) {
        let store = Store::shared(Vec::new(), reduce);
        let binding = SyncExternalStore::new(store.clone(), Environment::Server);
        let first = binding.server_snapshot();
        for i in 0..reads {
            store.dispatch(Op::Push(i as i32));
            let getter = binding.server_snapshot();
            prop_assert!(Rc::ptr_eq(&first, &getter));
            prop_assert_eq!(getter().len(), i + 1);
        }
    }
}
