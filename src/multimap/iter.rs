//! Lazy in-order iterators over an [`OrderedMultiMap`](super::OrderedMultiMap).
//!
//! Both iterators keep an explicit stack of pending nodes instead of
//! recursing, so their memory use is bounded by the height of the tree and
//! a degenerate tree cannot exhaust the call stack.

use super::Node;
use std::borrow::Borrow;
use std::iter::FusedIterator;

// =============================================================================
// Full Traversal
// =============================================================================

/// An iterator over every key and its records, in ascending key order.
///
/// Created by [`OrderedMultiMap::traverse_all`](super::OrderedMultiMap::traverse_all).
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(root: Option<&'a Node<K, V>>, length: usize) -> Self {
        let mut iterator = Self {
            stack: Vec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node<K, V>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a [V]);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, node.records.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Range Traversal
// =============================================================================

/// An iterator over the keys within an inclusive range, in ascending order.
///
/// Created by [`OrderedMultiMap::traverse_range`](super::OrderedMultiMap::traverse_range).
///
/// At each node the left subtree is entered only when `start < key` and the
/// right subtree only when `end > key`; the node itself is yielded when
/// `start <= key <= end`. A reversed range therefore yields nothing.
pub struct RangeIter<'a, 'b, K, V, Q: ?Sized> {
    stack: Vec<&'a Node<K, V>>,
    start: &'b Q,
    end: &'b Q,
}

impl<'a, 'b, K, V, Q> RangeIter<'a, 'b, K, V, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    pub(super) fn new(root: Option<&'a Node<K, V>>, start: &'b Q, end: &'b Q) -> Self {
        let mut iterator = Self {
            stack: Vec::new(),
            start,
            end,
        };
        iterator.descend(root);
        iterator
    }

    /// Pushes the path of nodes the in-order walk visits before `link`'s
    /// smallest candidate, stopping where the lower bound prunes the left side.
    fn descend(&mut self, mut link: Option<&'a Node<K, V>>) {
        while let Some(node) = link {
            self.stack.push(node);
            let key: &Q = node.key.borrow();
            link = if self.start < key {
                node.left.as_deref()
            } else {
                None
            };
        }
    }
}

impl<'a, K, V, Q> Iterator for RangeIter<'a, '_, K, V, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Item = (&'a K, &'a [V]);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            let key: &Q = node.key.borrow();
            if self.end > key {
                self.descend(node.right.as_deref());
            }
            if self.start <= key && key <= self.end {
                return Some((&node.key, node.records.as_slice()));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.stack.is_empty() {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl<K, V, Q> FusedIterator for RangeIter<'_, '_, K, V, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
}

// =============================================================================
// Pre-order Walk
// =============================================================================

/// Visits nodes parent-first, left before right.
///
/// Re-inserting keys in this order reproduces the exact shape of the tree,
/// which is what [`Clone`] relies on.
pub(super) struct PreOrder<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> PreOrder<'a, K, V> {
    pub(super) fn new(root: Option<&'a Node<K, V>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, K, V> Iterator for PreOrder<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::super::OrderedMultiMap;
    use rstest::rstest;

    fn sample() -> OrderedMultiMap<i32, char> {
        [50, 25, 75, 12, 37, 62, 87, 30]
            .into_iter()
            .map(|key| (key, 'x'))
            .collect()
    }

    #[rstest]
    fn test_iter_size_hint_counts_down() {
        let map = sample();
        let mut iterator = map.traverse_all();
        assert_eq!(iterator.len(), 8);
        iterator.next();
        iterator.next();
        assert_eq!(iterator.size_hint(), (6, Some(6)));
    }

    #[rstest]
    fn test_iter_is_fused() {
        let map: OrderedMultiMap<i32, char> = [(1, 'a')].into_iter().collect();
        let mut iterator = map.traverse_all();
        assert!(iterator.next().is_some());
        assert!(iterator.next().is_none());
        assert!(iterator.next().is_none());
    }

    #[rstest]
    fn test_cloned_iter_resumes_at_same_position() {
        let map = sample();
        let mut iterator = map.traverse_all();
        iterator.next();
        let keys: Vec<i32> = iterator.clone().map(|(key, _)| *key).collect();
        let rest: Vec<i32> = iterator.map(|(key, _)| *key).collect();
        assert_eq!(keys, rest);
    }

    #[rstest]
    #[case(30, 62, vec![30, 37, 50, 62])]
    #[case(0, 100, vec![12, 25, 30, 37, 50, 62, 75, 87])]
    #[case(51, 61, vec![])]
    #[case(87, 87, vec![87])]
    #[case(62, 30, vec![])]
    fn test_range_iter_bounds(#[case] start: i32, #[case] end: i32, #[case] expected: Vec<i32>) {
        let map = sample();
        let keys: Vec<i32> = map
            .traverse_range(&start, &end)
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(keys, expected);
    }

    #[rstest]
    fn test_pre_order_visits_parent_first() {
        let map = sample();
        let keys: Vec<i32> = map.pre_order().map(|node| node.key).collect();
        assert_eq!(keys, vec![50, 25, 12, 37, 30, 75, 62, 87]);
    }
}
