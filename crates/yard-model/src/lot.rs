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

use crate::{err::LotError, id::TruckId, truck::Truck};
use yard_core::{Quantity, capacity::Capacity, queue::RingQueue};

/// A parking lot.
///
/// Trucks enter the waiting line, are promoted to the ready line and leave
/// from the front of the ready line. Both lines are bounded by the truck
/// limit, and the lot never holds more than `truck_limit` trucks in total.
/// All counters are derived from the two lines, so
/// `waiting + ready == total <= truck_limit` holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingLot<T: Quantity> {
    capacity: Capacity<T>,
    truck_limit: usize,
    waiting: RingQueue<Truck<T>>,
    ready: RingQueue<Truck<T>>,
}

impl<T: Quantity> ParkingLot<T> {
    pub fn new(capacity: Capacity<T>, truck_limit: usize) -> Self {
        Self {
            capacity,
            truck_limit,
            waiting: RingQueue::with_capacity(truck_limit),
            ready: RingQueue::with_capacity(truck_limit),
        }
    }

    #[inline]
    pub fn capacity(&self) -> Capacity<T> {
        self.capacity
    }

    #[inline]
    pub fn truck_limit(&self) -> usize {
        self.truck_limit
    }

    #[inline]
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    #[inline]
    pub fn ready_count(&self) -> usize {
        self.ready.len()
    }

    #[inline]
    pub fn total_count(&self) -> usize {
        self.waiting.len() + self.ready.len()
    }

    /// Whether another truck may be admitted.
    #[inline]
    pub fn accepts_trucks(&self) -> bool {
        self.total_count() < self.truck_limit
    }

    #[inline]
    pub fn has_waiting(&self) -> bool {
        !self.waiting.is_empty()
    }

    #[inline]
    pub fn has_ready(&self) -> bool {
        !self.ready.is_empty()
    }

    pub fn waiting_trucks(&self) -> impl Iterator<Item = &Truck<T>> + '_ {
        self.waiting.iter()
    }

    pub fn ready_trucks(&self) -> impl Iterator<Item = &Truck<T>> + '_ {
        self.ready.iter()
    }

    #[inline]
    pub fn front_ready(&self) -> Option<&Truck<T>> {
        self.ready.front()
    }

    /// Puts `truck` at the back of the waiting line.
    pub fn admit(&mut self, truck: Truck<T>) -> Result<(), LotError<T>> {
        if !self.accepts_trucks() {
            return Err(self.full());
        }
        self.waiting.enqueue(truck).map_err(|_| self.full())?;
        debug_assert!(self.total_count() <= self.truck_limit);
        Ok(())
    }

    /// Moves the front waiting truck to the back of the ready line.
    pub fn promote(&mut self) -> Result<TruckId, LotError<T>> {
        let truck = self
            .waiting
            .dequeue()
            .ok_or(LotError::NoWaitingTruck { lot: self.capacity })?;
        let id = truck.id();
        self.ready.enqueue(truck).map_err(|_| self.full())?;
        debug_assert!(self.total_count() <= self.truck_limit);
        Ok(id)
    }

    /// Removes the front ready truck from the lot.
    pub fn release_ready(&mut self) -> Result<Truck<T>, LotError<T>> {
        self.ready
            .dequeue()
            .ok_or(LotError::NoReadyTruck { lot: self.capacity })
    }

    #[inline]
    fn full(&self) -> LotError<T> {
        LotError::Full {
            lot: self.capacity,
            limit: self.truck_limit,
        }
    }
}
