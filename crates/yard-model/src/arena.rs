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

use crate::{id::LotId, lot::ParkingLot};
use std::collections::HashMap;
use yard_core::{Quantity, capacity::Capacity};

/// Owning store of all parking lots.
///
/// Each capacity maps to at most one lot. Freed slots are recycled, so a
/// [`LotId`] is only meaningful while its lot is alive.
#[derive(Debug, Clone)]
pub struct LotArena<T: Quantity> {
    slots: Vec<Option<ParkingLot<T>>>,
    free: Vec<LotId>,
    by_capacity: HashMap<Capacity<T>, LotId>,
}

impl<T: Quantity> Default for LotArena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            by_capacity: HashMap::new(),
        }
    }
}

impl<T: Quantity> LotArena<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_capacity.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_capacity.is_empty()
    }

    /// Stores `lot`. Returns `None` if a lot with the same capacity exists.
    pub fn insert(&mut self, lot: ParkingLot<T>) -> Option<LotId> {
        let capacity = lot.capacity();
        if self.by_capacity.contains_key(&capacity) {
            return None;
        }
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.get()] = Some(lot);
                id
            }
            None => {
                self.slots.push(Some(lot));
                LotId::new(self.slots.len() - 1)
            }
        };
        self.by_capacity.insert(capacity, id);
        Some(id)
    }

    /// Removes the lot with `capacity`, returning it with its former id.
    pub fn remove(&mut self, capacity: Capacity<T>) -> Option<(LotId, ParkingLot<T>)> {
        let id = self.by_capacity.remove(&capacity)?;
        let lot = self.slots.get_mut(id.get())?.take()?;
        self.free.push(id);
        Some((id, lot))
    }

    #[inline]
    pub fn id_of(&self, capacity: Capacity<T>) -> Option<LotId> {
        self.by_capacity.get(&capacity).copied()
    }

    #[inline]
    pub fn get(&self, id: LotId) -> Option<&ParkingLot<T>> {
        self.slots.get(id.get()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: LotId) -> Option<&mut ParkingLot<T>> {
        self.slots.get_mut(id.get()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn by_capacity(&self, capacity: Capacity<T>) -> Option<&ParkingLot<T>> {
        self.id_of(capacity).and_then(|id| self.get(id))
    }

    /// Live lots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (LotId, &ParkingLot<T>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|lot| (LotId::new(i), lot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(cap: u32, limit: usize) -> ParkingLot<u32> {
        ParkingLot::new(Capacity::new(cap), limit)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut arena = LotArena::new();
        let a = arena.insert(lot(10, 2)).unwrap();
        let b = arena.insert(lot(5, 1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.id_of(Capacity::new(10)), Some(a));
        assert_eq!(arena.get(b).map(|l| l.truck_limit()), Some(1));
        assert_eq!(
            arena.by_capacity(Capacity::new(10)).map(|l| l.capacity()),
            Some(Capacity::new(10))
        );
    }

    #[test]
    fn test_duplicate_capacity_rejected() {
        let mut arena = LotArena::new();
        arena.insert(lot(10, 2)).unwrap();
        assert_eq!(arena.insert(lot(10, 7)), None);
        assert_eq!(
            arena.by_capacity(Capacity::new(10)).map(|l| l.truck_limit()),
            Some(2)
        );
    }

    #[test]
    fn test_remove_recycles_slot() {
        let mut arena = LotArena::new();
        let a = arena.insert(lot(10, 2)).unwrap();
        let (removed_id, removed) = arena.remove(Capacity::new(10)).unwrap();
        assert_eq!(removed_id, a);
        assert_eq!(removed.capacity(), Capacity::new(10));
        assert!(arena.get(a).is_none());
        assert!(arena.remove(Capacity::new(10)).is_none());
        assert!(arena.is_empty());

        let b = arena.insert(lot(20, 1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(arena.iter().count(), 1);
    }
}
