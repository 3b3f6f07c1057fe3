use super::*;
use pretty_assertions::assert_eq;

fn items<T: Clone>(stack: &Stack<T>) -> Vec<T> {
    stack.iter().cloned().collect()
}

#[test]
fn from_front_and_from_back() {
    assert_eq!(items(&Stack::from_front([1, 2, 3])), vec![1, 2, 3]);
    assert_eq!(items(&Stack::from_back([1, 2, 3])), vec![3, 2, 1]);
}

#[test]
fn push_leaves_original_untouched() {
    let base = Stack::from_front(["b", "c"]);
    let pushed = base.push("a");
    assert_eq!(items(&base), vec!["b", "c"]);
    assert_eq!(items(&pushed), vec!["a", "b", "c"]);
    assert_eq!(pushed.len(), 3);
}

#[test]
fn split_first_shares_tail() {
    let stack = Stack::from_front([1, 2, 3]);
    let Some((top, rest)) = stack.split_first() else {
        panic!("non-empty stack");
    };
    assert_eq!(*top, 1);
    assert_eq!(items(&rest), vec![2, 3]);
    assert_eq!(rest.len(), 2);
    assert!(Stack::<u8>::new().split_first().is_none());
}

#[test]
fn iter_reports_exact_size() {
    let stack = Stack::from_front(0..5);
    let mut iter = stack.iter();
    assert_eq!(iter.len(), 5);
    iter.next();
    assert_eq!(iter.len(), 4);
}

#[test]
fn dropping_a_long_chain_does_not_overflow() {
    let stack = Stack::from_back(0..1_000_000u32);
    assert_eq!(stack.peek(), Some(&999_999));
    drop(stack);
}

#[test]
fn dropping_a_shared_chain_keeps_other_owner_intact() {
    let shared = Stack::from_back(0..10_000u32);
    let extended = shared.push(10_000);
    drop(extended);
    assert_eq!(shared.len(), 10_000);
    assert_eq!(shared.peek(), Some(&9_999));
    assert_eq!(shared.iter().count(), 10_000);
}
