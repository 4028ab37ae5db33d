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

use std::{
    collections::VecDeque,
    fmt::{Debug, Display},
};

/// Returned by [`RingQueue::enqueue`] when the queue is full.
///
/// Carries the rejected item back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueFullError<T> {
    item: T,
    capacity: usize,
}

impl<T> QueueFullError<T> {
    #[inline]
    pub fn new(item: T, capacity: usize) -> Self {
        Self { item, capacity }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn into_item(self) -> T {
        self.item
    }
}

impl<T> Display for QueueFullError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Queue is full (capacity {})", self.capacity)
    }
}

impl<T: Debug> std::error::Error for QueueFullError<T> {}

/// Storage reserved up front. Larger bounds grow on demand.
const INITIAL_SLOTS: usize = 16;

/// A bounded FIFO.
///
/// The bound is logical: storage starts small and grows as items arrive, so
/// a very large bound costs nothing until it is actually used. The backing
/// ring releases departed items as soon as they are dequeued.
///
/// # Examples
///
/// ```
/// use yard_core::queue::RingQueue;
///
/// let mut q = RingQueue::with_capacity(2);
/// q.enqueue('a').unwrap();
/// q.enqueue('b').unwrap();
/// assert!(q.enqueue('c').is_err());
/// assert_eq!(q.dequeue(), Some('a'));
/// q.enqueue('c').unwrap();
/// assert_eq!(q.front(), Some(&'b'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(INITIAL_SLOTS)),
            capacity,
        }
    }

    /// The logical bound on the number of queued items.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Appends `item` at the back.
    pub fn enqueue(&mut self, item: T) -> Result<(), QueueFullError<T>> {
        if self.is_full() {
            return Err(QueueFullError::new(item, self.capacity));
        }
        self.items.push_back(item);
        Ok(())
    }

    /// Removes and returns the front item.
    #[inline]
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    /// Iterates front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut q = RingQueue::with_capacity(3);
        q.enqueue(1).unwrap();
        q.enqueue(2).unwrap();
        q.enqueue(3).unwrap();
        assert!(q.is_full());
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), Some(2));
        assert_eq!(q.front(), Some(&3));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_wraps_around() {
        let mut q = RingQueue::with_capacity(2);
        for round in 0..5 {
            q.enqueue(round * 10).unwrap();
            q.enqueue(round * 10 + 1).unwrap();
            assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![round * 10, round * 10 + 1]);
            assert_eq!(q.dequeue(), Some(round * 10));
            assert_eq!(q.dequeue(), Some(round * 10 + 1));
            assert!(q.is_empty());
        }
    }

    #[test]
    fn test_full_returns_item() {
        let mut q = RingQueue::with_capacity(1);
        q.enqueue("first").unwrap();
        let err = q.enqueue("second").unwrap_err();
        assert_eq!(err.capacity(), 1);
        assert_eq!(err.into_item(), "second");
        assert_eq!(q.front(), Some(&"first"));
    }

    #[test]
    fn test_zero_capacity() {
        let mut q: RingQueue<u8> = RingQueue::with_capacity(0);
        assert!(q.is_empty());
        assert!(q.is_full());
        assert!(q.enqueue(1).is_err());
        assert_eq!(q.dequeue(), None);
        assert_eq!(q.front(), None);
    }

    #[test]
    fn test_unbounded_limit_allocates_lazily() {
        let mut q = RingQueue::with_capacity(usize::MAX);
        assert_eq!(q.capacity(), usize::MAX);
        assert!(!q.is_full());
        for i in 0..100 {
            q.enqueue(i).unwrap();
        }
        assert_eq!(q.len(), 100);
        assert_eq!(q.dequeue(), Some(0));
        assert_eq!(q.front(), Some(&1));
    }
}
