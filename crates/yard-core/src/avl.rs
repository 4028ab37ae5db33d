// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Height-Balanced Search Index
//!
//! [`AvlIndex`] is an AVL tree mapping ordered keys to small copyable values
//! (typically arena ids). Besides the usual insert, delete and lookup it answers
//! the neighbourhood queries the allocator relies on:
//!
//! - [`find_floor`](AvlIndex::find_floor): largest key `<= k`.
//! - [`find_ceiling`](AvlIndex::find_ceiling): smallest key `>= k`.
//! - [`find_strictly_greater`](AvlIndex::find_strictly_greater): smallest key `> k`.
//! - [`successor`](AvlIndex::successor): in-order successor of a stored key.
//!
//! Keys are unique. Inserting a key that is already present leaves the index
//! untouched, so the first entry for a key wins.
//!
//! Heights follow the convention that an empty subtree has height `-1` and a
//! leaf has height `0`. The balance factor of a node is
//! `height(left) - height(right)` and must stay within `-1..=1`.

use std::cmp::Ordering;
use std::fmt::{Debug, Display};

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    height: i32,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    #[inline]
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            height: 0,
            left: None,
            right: None,
        })
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    #[inline]
    fn balance(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

#[inline]
fn height<K, V>(link: &Link<K, V>) -> i32 {
    link.as_ref().map_or(-1, |n| n.height)
}

#[inline]
fn balance<K, V>(link: &Link<K, V>) -> i32 {
    link.as_ref().map_or(0, |n| n.balance())
}

fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut pivot = node.left.take().expect("right rotation needs a left child");
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut pivot = node.right.take().expect("left rotation needs a right child");
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Violations reported by [`AvlIndex::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvlInvariantError<K> {
    /// In-order traversal yielded `next` right after `prev` with `next <= prev`.
    OutOfOrder { prev: K, next: K },
    /// The stored height of the node at `key` disagrees with its children.
    HeightMismatch { key: K, stored: i32, computed: i32 },
    /// The node at `key` has a balance factor outside `-1..=1`.
    Unbalanced { key: K, balance: i32 },
    /// The tracked entry count disagrees with the number of nodes.
    LenMismatch { tracked: usize, counted: usize },
}

impl<K: Display> Display for AvlInvariantError<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvlInvariantError::OutOfOrder { prev, next } => {
                write!(f, "Key {} follows {} in order traversal", next, prev)
            }
            AvlInvariantError::HeightMismatch {
                key,
                stored,
                computed,
            } => write!(
                f,
                "Node {} stores height {} but its children imply {}",
                key, stored, computed
            ),
            AvlInvariantError::Unbalanced { key, balance } => {
                write!(f, "Node {} has balance factor {}", key, balance)
            }
            AvlInvariantError::LenMismatch { tracked, counted } => write!(
                f,
                "Index tracks {} entries but holds {} nodes",
                tracked, counted
            ),
        }
    }
}

impl<K: Debug + Display> std::error::Error for AvlInvariantError<K> {}

/// An AVL tree keyed by `K`.
///
/// # Examples
///
/// ```
/// use yard_core::avl::AvlIndex;
///
/// let mut index = AvlIndex::new();
/// for key in [10, 20, 30] {
///     index.insert(key, key * 100);
/// }
/// assert_eq!(index.find_floor(25), Some((20, 2000)));
/// assert_eq!(index.find_ceiling(25), Some((30, 3000)));
/// assert_eq!(index.find_strictly_greater(20), Some((30, 3000)));
/// assert_eq!(index.successor(10), Some((20, 2000)));
/// ```
#[derive(Debug, Clone)]
pub struct AvlIndex<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for AvlIndex<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K, V> AvlIndex<K, V>
where
    K: Ord + Copy,
    V: Copy,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree, `-1` when empty.
    #[inline]
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Inserts `key -> value`. Returns `false` and leaves the index unchanged
    /// when `key` is already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut inserted = false;
        let root = self.root.take();
        self.root = Some(Self::insert_at(root, key, value, &mut inserted));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn insert_at(link: Link<K, V>, key: K, value: V, inserted: &mut bool) -> Box<Node<K, V>> {
        let mut node = match link {
            None => {
                *inserted = true;
                return Node::leaf(key, value);
            }
            Some(node) => node,
        };

        match key.cmp(&node.key) {
            Ordering::Less => {
                node.left = Some(Self::insert_at(node.left.take(), key, value, inserted));
            }
            Ordering::Greater => {
                node.right = Some(Self::insert_at(node.right.take(), key, value, inserted));
            }
            Ordering::Equal => return node,
        }

        node.update_height();
        let bf = node.balance();

        // The inserted key tells which grandchild grew.
        if bf > 1 {
            let left_key = node.left.as_ref().map(|l| l.key);
            if left_key.is_some_and(|lk| key > lk) {
                node.left = node.left.take().map(rotate_left);
            }
            return rotate_right(node);
        }
        if bf < -1 {
            let right_key = node.right.as_ref().map(|r| r.key);
            if right_key.is_some_and(|rk| key < rk) {
                node.right = node.right.take().map(rotate_right);
            }
            return rotate_left(node);
        }
        node
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn delete(&mut self, key: K) -> Option<V> {
        let mut removed = None;
        let root = self.root.take();
        self.root = Self::delete_at(root, key, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn delete_at(link: Link<K, V>, key: K, removed: &mut Option<V>) -> Link<K, V> {
        let mut node = link?;

        match key.cmp(&node.key) {
            Ordering::Less => node.left = Self::delete_at(node.left.take(), key, removed),
            Ordering::Greater => node.right = Self::delete_at(node.right.take(), key, removed),
            Ordering::Equal => {
                *removed = Some(node.value);
                match (node.left.take(), node.right.take()) {
                    (None, None) => return None,
                    (Some(child), None) | (None, Some(child)) => return Some(child),
                    (Some(left), Some(right)) => {
                        let (succ_key, succ_value) = leftmost(&right);
                        node.key = succ_key;
                        node.value = succ_value;
                        node.left = Some(left);
                        node.right = Self::delete_at(Some(right), succ_key, &mut None);
                    }
                }
            }
        }

        node.update_height();
        let bf = node.balance();

        // After a removal the child's own balance decides single vs double rotation.
        if bf > 1 {
            if balance(&node.left) < 0 {
                node.left = node.left.take().map(rotate_left);
            }
            return Some(rotate_right(node));
        }
        if bf < -1 {
            if balance(&node.right) > 0 {
                node.right = node.right.take().map(rotate_right);
            }
            return Some(rotate_left(node));
        }
        Some(node)
    }

    pub fn get(&self, key: K) -> Option<V> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node.value),
            };
        }
        None
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Entry with the largest key `<= key`.
    pub fn find_floor(&self, key: K) -> Option<(K, V)> {
        let mut best = None;
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            if key >= node.key {
                best = Some((node.key, node.value));
                cur = node.right.as_deref();
            } else {
                cur = node.left.as_deref();
            }
        }
        best
    }

    /// Entry with the smallest key `>= key`.
    pub fn find_ceiling(&self, key: K) -> Option<(K, V)> {
        let mut best = None;
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            if key <= node.key {
                best = Some((node.key, node.value));
                cur = node.left.as_deref();
            } else {
                cur = node.right.as_deref();
            }
        }
        best
    }

    /// Entry with the smallest key `> key`.
    pub fn find_strictly_greater(&self, key: K) -> Option<(K, V)> {
        let mut best = None;
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            if key < node.key {
                best = Some((node.key, node.value));
                cur = node.left.as_deref();
            } else {
                cur = node.right.as_deref();
            }
        }
        best
    }

    /// In-order successor of the entry stored at `key`.
    ///
    /// Returns `None` if `key` is not stored or is the largest key.
    pub fn successor(&self, key: K) -> Option<(K, V)> {
        let mut cur = self.root.as_deref();
        let node = loop {
            let node = cur?;
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => break node,
            };
        };

        if let Some(right) = node.right.as_deref() {
            return Some(leftmost(right));
        }

        // No right subtree: the nearest ancestor we left from its left side.
        let mut succ = None;
        let mut cur = self.root.as_deref();
        while let Some(anc) = cur {
            cur = match key.cmp(&anc.key) {
                Ordering::Less => {
                    succ = Some((anc.key, anc.value));
                    anc.left.as_deref()
                }
                Ordering::Greater => anc.right.as_deref(),
                Ordering::Equal => break,
            };
        }
        succ
    }

    /// In-order iterator over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Checks ordering, stored heights, balance factors and the entry count.
    pub fn validate(&self) -> Result<(), AvlInvariantError<K>> {
        let mut counted = 0;
        Self::validate_at(&self.root, &mut counted)?;
        if counted != self.len {
            return Err(AvlInvariantError::LenMismatch {
                tracked: self.len,
                counted,
            });
        }

        let mut prev: Option<K> = None;
        for (key, _) in self.iter() {
            if let Some(p) = prev
                && key <= p
            {
                return Err(AvlInvariantError::OutOfOrder { prev: p, next: key });
            }
            prev = Some(key);
        }
        Ok(())
    }

    fn validate_at(link: &Link<K, V>, counted: &mut usize) -> Result<i32, AvlInvariantError<K>> {
        let Some(node) = link else {
            return Ok(-1);
        };
        *counted += 1;
        let lh = Self::validate_at(&node.left, counted)?;
        let rh = Self::validate_at(&node.right, counted)?;
        let computed = 1 + lh.max(rh);
        if node.height != computed {
            return Err(AvlInvariantError::HeightMismatch {
                key: node.key,
                stored: node.height,
                computed,
            });
        }
        let bf = lh - rh;
        if !(-1..=1).contains(&bf) {
            return Err(AvlInvariantError::Unbalanced {
                key: node.key,
                balance: bf,
            });
        }
        Ok(computed)
    }
}

#[inline]
fn leftmost<K: Copy, V: Copy>(node: &Node<K, V>) -> (K, V) {
    let mut cur = node;
    while let Some(left) = cur.left.as_deref() {
        cur = left;
    }
    (cur.key, cur.value)
}

/// In-order iterator returned by [`AvlIndex::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut cur: Option<&'a Node<K, V>>) {
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left.as_deref();
        }
    }
}

impl<'a, K: Copy, V: Copy> Iterator for Iter<'a, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some((node.key, node.value))
    }
}

impl<'a, K, V> IntoIterator for &'a AvlIndex<K, V>
where
    K: Ord + Copy,
    V: Copy,
{
    type Item = (K, V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeMap;
    use std::ops::Bound::{Excluded, Unbounded};

    fn keys<V: Copy>(index: &AvlIndex<u32, V>) -> Vec<u32> {
        index.iter().map(|(k, _)| k).collect()
    }

    fn build(keys: &[u32]) -> AvlIndex<u32, u32> {
        let mut index = AvlIndex::new();
        for &k in keys {
            index.insert(k, k);
        }
        index
    }

    #[test]
    fn test_empty() {
        let index: AvlIndex<u32, u32> = AvlIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.height(), -1);
        assert_eq!(index.find_floor(5), None);
        assert_eq!(index.find_ceiling(5), None);
        assert_eq!(index.find_strictly_greater(5), None);
        assert_eq!(index.successor(5), None);
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_single_rotations() {
        // Ascending inserts force left rotations.
        let index = build(&[1, 2, 3]);
        assert_eq!(index.height(), 1);
        assert!(index.validate().is_ok());

        // Descending inserts force right rotations.
        let index = build(&[3, 2, 1]);
        assert_eq!(index.height(), 1);
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_double_rotations() {
        let lr = build(&[30, 10, 20]);
        assert_eq!(lr.height(), 1);
        assert_eq!(keys(&lr), vec![10, 20, 30]);
        assert!(lr.validate().is_ok());

        let rl = build(&[10, 30, 20]);
        assert_eq!(rl.height(), 1);
        assert_eq!(keys(&rl), vec![10, 20, 30]);
        assert!(rl.validate().is_ok());
    }

    #[test]
    fn test_duplicate_insert_keeps_first_value() {
        let mut index = AvlIndex::new();
        assert!(index.insert(5u32, 'a'));
        assert!(!index.insert(5u32, 'b'));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(5), Some('a'));
    }

    #[test]
    fn test_delete_cases() {
        let mut index = build(&[50, 30, 70, 20, 40, 60, 80, 35]);

        // Leaf.
        assert_eq!(index.delete(20), Some(20));
        assert!(index.validate().is_ok());
        // One child.
        assert_eq!(index.delete(40), Some(40));
        assert!(index.validate().is_ok());
        // Two children: replaced by the in-order successor.
        assert_eq!(index.delete(50), Some(50));
        assert!(index.validate().is_ok());
        assert_eq!(keys(&index), vec![30, 35, 60, 70, 80]);
        // Absent key.
        assert_eq!(index.delete(999), None);
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_delete_rebalances_with_child_balance() {
        // Removing 40 leaves 20 left-heavy over a right-leaning 10.
        let mut index = build(&[20, 10, 30, 5, 15, 40, 12]);
        index.delete(40);
        index.delete(30);
        assert!(index.validate().is_ok());
        assert_eq!(keys(&index), vec![5, 10, 12, 15, 20]);
    }

    #[test]
    fn test_neighbourhood_queries() {
        let index = build(&[10, 20, 30, 40]);

        assert_eq!(index.find_floor(5), None);
        assert_eq!(index.find_floor(10), Some((10, 10)));
        assert_eq!(index.find_floor(29), Some((20, 20)));
        assert_eq!(index.find_floor(100), Some((40, 40)));

        assert_eq!(index.find_ceiling(5), Some((10, 10)));
        assert_eq!(index.find_ceiling(20), Some((20, 20)));
        assert_eq!(index.find_ceiling(41), None);

        assert_eq!(index.find_strictly_greater(20), Some((30, 30)));
        assert_eq!(index.find_strictly_greater(21), Some((30, 30)));
        assert_eq!(index.find_strictly_greater(40), None);
    }

    #[test]
    fn test_successor_walk() {
        let index = build(&[8, 4, 12, 2, 6, 10, 14, 1, 3, 5, 7]);
        let mut walked = Vec::new();
        let mut cur = index.find_ceiling(0);
        while let Some((k, _)) = cur {
            walked.push(k);
            cur = index.successor(k);
        }
        assert_eq!(walked, keys(&index));
        assert_eq!(index.successor(9), None);
    }

    #[test]
    fn test_randomized_against_btreemap() {
        for seed in [1u64, 7, 42, 0xD0C_A11C] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut index = AvlIndex::new();
            let mut oracle = BTreeMap::new();

            for step in 0..2_000u32 {
                let key = rng.random_range(0..256u32);
                if rng.random_bool(0.6) {
                    let inserted = index.insert(key, step);
                    assert_eq!(inserted, !oracle.contains_key(&key));
                    oracle.entry(key).or_insert(step);
                } else {
                    assert_eq!(index.delete(key), oracle.remove(&key));
                }
                index.validate().unwrap();
                assert_eq!(index.len(), oracle.len());

                let probe = rng.random_range(0..260u32);
                let floor = oracle.range(..=probe).next_back().map(|(k, v)| (*k, *v));
                let ceil = oracle.range(probe..).next().map(|(k, v)| (*k, *v));
                let greater = oracle
                    .range((Excluded(probe), Unbounded))
                    .next()
                    .map(|(k, v)| (*k, *v));
                assert_eq!(index.find_floor(probe), floor);
                assert_eq!(index.find_ceiling(probe), ceil);
                assert_eq!(index.find_strictly_greater(probe), greater);
                if oracle.contains_key(&probe) {
                    assert_eq!(index.successor(probe), greater);
                }
            }

            assert!(index.iter().eq(oracle.iter().map(|(k, v)| (*k, *v))));
            // AVL height bound: h < 1.45 * log2(n + 2).
            let bound = 1.45 * ((oracle.len() + 2) as f64).log2();
            assert!((index.height() as f64) < bound);
        }
    }
}
