//! Ordered multi-map based on a plain binary search tree.
//!
//! This module provides [`OrderedMultiMap`], a mutable ordered map in which
//! every key owns an append-only, insertion-ordered list of values.
//!
//! # Overview
//!
//! The tree is never rebalanced. Its shape is determined entirely by the
//! order in which distinct keys are first inserted, so a sorted insertion
//! order produces a list-shaped tree of height N.
//!
//! - O(h) insert (new key or append)
//! - O(h) lookup
//! - O(N) full in-order traversal
//! - O(h + k) range traversal, where k is the number of visited nodes
//! - O(1) len, `record_count` and `is_empty`
//!
//! where h is the height of the tree.
//!
//! None of the operations recurse: insert and lookup are loops, traversals
//! keep an explicit stack, and dropping the map tears nodes down one by one.
//!
//! # Examples
//!
//! ```rust
//! use violation_tree::OrderedMultiMap;
//!
//! let mut map = OrderedMultiMap::new();
//! map.insert("CD5678".to_string(), "No seatbelt");
//! map.insert("AB1234".to_string(), "Speeding");
//! map.insert("AB1234".to_string(), "Parking");
//!
//! assert_eq!(map.lookup("AB1234"), Some(&["Speeding", "Parking"][..]));
//!
//! let keys: Vec<&String> = map.keys().collect();
//! assert_eq!(keys, vec!["AB1234", "CD5678"]);
//!
//! // Both bounds are inclusive
//! let range: Vec<&String> = map
//!     .traverse_range("AB0000", "CD5678")
//!     .map(|(key, _)| key)
//!     .collect();
//! assert_eq!(range.len(), 2);
//! ```

mod iter;

pub use iter::Iter;
pub use iter::RangeIter;

use iter::PreOrder;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// Node Definition
// =============================================================================

type Link<K, V> = Option<Box<Node<K, V>>>;

/// A tree entry. `records` is never empty once the node is linked in.
struct Node<K, V> {
    key: K,
    records: Vec<V>,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a leaf seeded with its first record.
    fn new(key: K, record: V) -> Self {
        Self {
            key,
            records: vec![record],
            left: None,
            right: None,
        }
    }
}

// =============================================================================
// OrderedMultiMap Definition
// =============================================================================

/// An ordered map from unique keys to append-only sequences of values.
///
/// Keys must implement `Ord`. Inserting under an existing key appends to that
/// key's values; inserting under a new key links a new node into the tree.
/// Values are never removed, replaced, or reordered, and appends are not
/// deduplicated.
///
/// # Time Complexity
///
/// | Operation         | Complexity |
/// |-------------------|------------|
/// | `new`             | O(1)       |
/// | `insert`          | O(h)       |
/// | `lookup`          | O(h)       |
/// | `contains_key`    | O(h)       |
/// | `first`/`last`    | O(h)       |
/// | `traverse_all`    | O(N)       |
/// | `traverse_range`  | O(h + k)   |
/// | `depth`           | O(N)       |
/// | `len`             | O(1)       |
/// | `is_empty`        | O(1)       |
///
/// # Examples
///
/// ```rust
/// use violation_tree::OrderedMultiMap;
///
/// let mut map = OrderedMultiMap::new();
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(2, "b");
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.record_count(), 3);
/// assert_eq!(map.lookup(&2), Some(&["b", "b"][..]));
/// ```
pub struct OrderedMultiMap<K, V> {
    root: Link<K, V>,
    /// Number of distinct keys
    length: usize,
    /// Number of values across all keys
    record_count: usize,
}

impl<K, V> OrderedMultiMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use violation_tree::OrderedMultiMap;
    ///
    /// let map: OrderedMultiMap<String, u32> = OrderedMultiMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
            record_count: 0,
        }
    }

    /// Returns the number of distinct keys.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no key has been inserted.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the total number of values stored under all keys.
    #[inline]
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.record_count
    }

    /// Returns an iterator over every key and its values in ascending key
    /// order.
    ///
    /// Each call starts a fresh traversal. An empty map yields nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use violation_tree::OrderedMultiMap;
    ///
    /// let map: OrderedMultiMap<i32, &str> =
    ///     [(3, "c"), (1, "a"), (2, "b"), (1, "z")].into_iter().collect();
    ///
    /// let entries: Vec<(&i32, &[&str])> = map.traverse_all().collect();
    /// assert_eq!(entries[0], (&1, &["a", "z"][..]));
    /// assert_eq!(entries.len(), 3);
    /// ```
    #[must_use]
    pub fn traverse_all(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.length)
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.traverse_all().map(|(key, _)| key)
    }

    /// Returns the smallest key and its values.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &[V])> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, node.records.as_slice()))
    }

    /// Returns the largest key and its values.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &[V])> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, node.records.as_slice()))
    }

    /// Returns the height of the tree, counting nodes on the longest path
    /// from the root. An empty map has depth 0.
    ///
    /// Since the tree is not rebalanced this ranges from about log2(N) up to
    /// N, depending on insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use violation_tree::OrderedMultiMap;
    ///
    /// let ascending: OrderedMultiMap<i32, ()> = (0..5).map(|key| (key, ())).collect();
    /// assert_eq!(ascending.depth(), 5);
    ///
    /// let balanced: OrderedMultiMap<i32, ()> =
    ///     [2, 1, 3].into_iter().map(|key| (key, ())).collect();
    /// assert_eq!(balanced.depth(), 2);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Node<K, V>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.left.as_deref().map(|left| (left, level + 1)));
            pending.extend(node.right.as_deref().map(|right| (right, level + 1)));
        }
        deepest
    }

    fn pre_order(&self) -> PreOrder<'_, K, V> {
        PreOrder::new(self.root.as_deref())
    }
}

impl<K: Ord, V> OrderedMultiMap<K, V> {
    /// Inserts `record` under `key`.
    ///
    /// If `key` is not present, a new node seeded with `record` is linked in
    /// at the empty slot reached by descending left on smaller keys and right
    /// on larger ones. Otherwise `record` is appended to the existing values
    /// and the shape of the tree does not change.
    ///
    /// Insertion never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use violation_tree::OrderedMultiMap;
    ///
    /// let mut map = OrderedMultiMap::new();
    /// map.insert("", 1);
    /// map.insert("", 1);
    /// assert_eq!(map.lookup(""), Some(&[1, 1][..]));
    /// ```
    pub fn insert(&mut self, key: K, record: V) {
        let mut slot = &mut self.root;
        let mut depth = 1_usize;
        while let Some(node) = slot {
            match key.cmp(&node.key) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => {
                    node.records.push(record);
                    self.record_count += 1;
                    tracing::trace!(depth, records = node.records.len(), "appended record");
                    return;
                }
            }
            depth += 1;
        }
        *slot = Some(Box::new(Node::new(key, record)));
        self.length += 1;
        self.record_count += 1;
        tracing::trace!(depth, nodes = self.length, "created node");
    }

    /// Returns the values stored under `key`, in insertion order.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use violation_tree::OrderedMultiMap;
    ///
    /// let mut map = OrderedMultiMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.lookup("hello"), Some(&[42][..]));
    /// assert_eq!(map.lookup("world"), None);
    /// ```
    #[must_use]
    pub fn lookup<Q>(&self, key: &Q) -> Option<&[V]>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Greater => link = node.right.as_deref(),
                Ordering::Equal => return Some(node.records.as_slice()),
            }
        }
        None
    }

    /// Returns `true` if at least one value is stored under `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lookup(key).is_some()
    }

    /// Returns an iterator over the keys `k` with `start <= k <= end`, in
    /// ascending order, together with their values.
    ///
    /// The bounds are not validated: when `start > end` no key can satisfy
    /// both bounds and the iterator is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use violation_tree::OrderedMultiMap;
    ///
    /// let map: OrderedMultiMap<String, u8> = ["AB1234", "CD5678", "EF9101"]
    ///     .into_iter()
    ///     .map(|plate| (plate.to_string(), 0))
    ///     .collect();
    ///
    /// let plates: Vec<&String> = map
    ///     .traverse_range("AB0000", "CD9999")
    ///     .map(|(plate, _)| plate)
    ///     .collect();
    /// assert_eq!(plates, vec!["AB1234", "CD5678"]);
    ///
    /// assert_eq!(map.traverse_range("ZZ", "AA").count(), 0);
    /// ```
    pub fn traverse_range<'a, 'b, Q>(
        &'a self,
        start: &'b Q,
        end: &'b Q,
    ) -> RangeIter<'a, 'b, K, V, Q>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        RangeIter::new(self.root.as_deref(), start, end)
    }
}

// =============================================================================
// Teardown
// =============================================================================

impl<K, V> Drop for OrderedMultiMap<K, V> {
    /// Unlinks nodes onto a work list so that each `Box` is dropped with no
    /// children attached, keeping teardown iterative for any tree height.
    fn drop(&mut self) {
        if self.length > 0 {
            tracing::debug!(nodes = self.length, records = self.record_count, "dropping tree");
        }
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for OrderedMultiMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> Clone for OrderedMultiMap<K, V> {
    /// Produces a tree of identical shape by re-inserting keys parent-first.
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        for node in self.pre_order() {
            for record in &node.records {
                copy.insert(node.key.clone(), record.clone());
            }
        }
        copy
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMultiMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, record) in iter {
            self.insert(key, record);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMultiMap<K, V> {
    type Item = (&'a K, &'a [V]);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse_all()
    }
}

/// Two maps are equal when they hold the same keys with the same value
/// sequences. Tree shape is not compared.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMultiMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self.record_count == other.record_count
            && self.traverse_all().eq(other.traverse_all())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMultiMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMultiMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.traverse_all()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for OrderedMultiMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, records) in self {
            map.serialize_entry(key, records)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMultiMapVisitor<K, V> {
    marker: std::marker::PhantomData<OrderedMultiMap<K, V>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for OrderedMultiMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = OrderedMultiMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of keys to non-empty sequences")
    }

    /// Repeated keys append to the values already read for that key.
    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        use serde::de::Error;
        let mut map = OrderedMultiMap::new();
        while let Some((key, records)) = access.next_entry::<K, Vec<V>>()? {
            if records.is_empty() {
                return Err(A::Error::invalid_length(0, &"at least one record"));
            }
            let mut records = records.into_iter();
            // Seed the node, then append the rest without re-searching by key.
            if let Some(first) = records.next() {
                map.insert_with_tail(key, first, records);
            }
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<K: Ord, V> OrderedMultiMap<K, V> {
    fn insert_with_tail(&mut self, key: K, first: V, tail: impl Iterator<Item = V>) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match key.cmp(&node.key) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => {
                    let before = node.records.len();
                    node.records.push(first);
                    node.records.extend(tail);
                    self.record_count += node.records.len() - before;
                    return;
                }
            }
        }
        let mut node = Node::new(key, first);
        node.records.extend(tail);
        self.length += 1;
        self.record_count += node.records.len();
        *slot = Some(Box::new(node));
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for OrderedMultiMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMultiMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
