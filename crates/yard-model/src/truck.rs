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

use crate::{err::LoadExceedsCapacityError, id::TruckId};
use yard_core::{Quantity, capacity::Capacity};

/// Result of [`Truck::add_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadOutcome<T: Quantity> {
    applied: Capacity<T>,
    clamped: bool,
    unloaded: bool,
}

impl<T: Quantity> LoadOutcome<T> {
    /// Units actually taken on by the truck.
    #[inline]
    pub fn applied(&self) -> Capacity<T> {
        self.applied
    }

    /// `true` if the requested amount exceeded the remaining capacity.
    #[inline]
    pub fn clamped(&self) -> bool {
        self.clamped
    }

    /// `true` if the truck filled up and was emptied in the same step.
    #[inline]
    pub fn unloaded(&self) -> bool {
        self.unloaded
    }
}

/// A truck moving through the yard.
///
/// A truck that reaches its capacity exactly is unloaded on the spot: its load
/// drops back to zero. Load therefore always stays strictly below capacity for
/// any truck with a non-zero capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Truck<T: Quantity> {
    id: TruckId,
    capacity: Capacity<T>,
    load: Capacity<T>,
}

impl<T: Quantity> Truck<T> {
    /// An empty truck.
    #[inline]
    pub fn new(id: TruckId, capacity: Capacity<T>) -> Self {
        Self {
            id,
            capacity,
            load: Capacity::zero(),
        }
    }

    /// A truck already carrying `load`.
    pub fn with_load(
        id: TruckId,
        capacity: Capacity<T>,
        load: Capacity<T>,
    ) -> Result<Self, LoadExceedsCapacityError<T>> {
        if load > capacity {
            return Err(LoadExceedsCapacityError::new(id, capacity, load));
        }
        let mut truck = Self::new(id, capacity);
        truck.add_load(load);
        Ok(truck)
    }

    #[inline]
    pub fn id(&self) -> TruckId {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> Capacity<T> {
        self.capacity
    }

    #[inline]
    pub fn load(&self) -> Capacity<T> {
        self.load
    }

    /// Capacity left before the truck is full.
    #[inline]
    pub fn remaining(&self) -> Capacity<T> {
        self.capacity - self.load
    }

    /// Takes on up to `amount` units, never more than [`remaining`](Self::remaining).
    pub fn add_load(&mut self, amount: Capacity<T>) -> LoadOutcome<T> {
        let remaining = self.remaining();
        let clamped = amount > remaining;
        let applied = if clamped { remaining } else { amount };

        self.load += applied;
        let unloaded = self.load == self.capacity;
        if unloaded {
            self.load = Capacity::zero();
        }

        LoadOutcome {
            applied,
            clamped,
            unloaded,
        }
    }
}
