//! Persistent singly linked stack with shared tails.
//!
//! Pushing or popping returns a new stack; the old one stays valid and
//! shares every node below the change. Cloning is O(1).

use std::fmt;
use std::sync::Arc;

struct Node<T> {
    value: T,
    next: Link<T>,
}

type Link<T> = Option<Arc<Node<T>>>;

pub(crate) struct Stack<T> {
    head: Link<T>,
    len: usize,
}

impl<T> Stack<T> {
    pub(crate) const fn new() -> Self {
        Stack { head: None, len: 0 }
    }

    /// Stack whose top is the first item yielded.
    pub(crate) fn from_front(items: impl IntoIterator<Item = T>) -> Self {
        let mut items: Vec<T> = items.into_iter().collect();
        let mut stack = Stack::new();
        while let Some(value) = items.pop() {
            stack = stack.push(value);
        }
        stack
    }

    /// Stack whose top is the last item yielded.
    pub(crate) fn from_back(items: impl IntoIterator<Item = T>) -> Self {
        items
            .into_iter()
            .fold(Stack::new(), |stack, value| stack.push(value))
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    #[must_use]
    pub(crate) fn push(&self, value: T) -> Self {
        Stack {
            head: Some(Arc::new(Node {
                value,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Top value and the stack beneath it.
    pub(crate) fn split_first(&self) -> Option<(&T, Self)> {
        let node = self.head.as_deref()?;
        let rest = Stack {
            head: node.next.clone(),
            len: self.len - 1,
        };
        Some((&node.value, rest))
    }

    /// Iterate from the top down.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }
}

impl<T> Clone for Stack<T> {
    fn clone(&self) -> Self {
        Stack {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

// Unlinks uniquely owned nodes one at a time so that dropping a long chain
// does not recurse once per node.
impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(node) = link {
            match Arc::try_unwrap(node) {
                Ok(mut node) => link = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over a stack from the top down.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.next?;
        self.next = node.next.as_deref();
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests;
