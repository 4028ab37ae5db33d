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

use crate::{
    config::{CountBoundary, YardConfig},
    err::{AllocError, YardInvariantError},
};
use std::fmt::Display;
use tracing::{debug, instrument, trace, warn};
use yard_core::{Quantity, avl::AvlIndex, capacity::Capacity};
use yard_model::prelude::*;

/// The four capacity-ordered views over the yard's lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Assignment,
    Ready,
    Load,
    Count,
}

impl IndexKind {
    pub const ALL: [IndexKind; 4] = [
        IndexKind::Assignment,
        IndexKind::Ready,
        IndexKind::Load,
        IndexKind::Count,
    ];

    /// Whether `lot` belongs in this index.
    #[inline]
    pub fn admits<T: Quantity>(self, lot: &ParkingLot<T>) -> bool {
        match self {
            IndexKind::Assignment => lot.accepts_trucks(),
            IndexKind::Ready => lot.has_waiting(),
            IndexKind::Load => lot.has_ready(),
            IndexKind::Count => true,
        }
    }
}

impl Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Assignment => write!(f, "for-assignment"),
            IndexKind::Ready => write!(f, "for-ready"),
            IndexKind::Load => write!(f, "for-load"),
            IndexKind::Count => write!(f, "for-count"),
        }
    }
}

/// Where [`Yard::assign`] put a truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement<T: Quantity> {
    lot: Capacity<T>,
    closed: bool,
}

impl<T: Quantity> Placement<T> {
    #[inline]
    pub fn lot(&self) -> Capacity<T> {
        self.lot
    }

    /// `true` if the truck filled the lot's last slot.
    #[inline]
    pub fn closed(&self) -> bool {
        self.closed
    }
}

/// A truck promoted from waiting to ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Promotion<T: Quantity> {
    truck: TruckId,
    lot: Capacity<T>,
}

impl<T: Quantity> Promotion<T> {
    #[inline]
    pub fn truck(&self) -> TruckId {
        self.truck
    }

    #[inline]
    pub fn lot(&self) -> Capacity<T> {
        self.lot
    }
}

impl<T: Quantity> Display for Promotion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.truck, self.lot)
    }
}

/// A truck that took on load and was sent to a new lot.
///
/// `destination` is `None` when no lot could take the truck back; the truck
/// then leaves the yard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relocation<T: Quantity> {
    truck: TruckId,
    destination: Option<Capacity<T>>,
}

impl<T: Quantity> Relocation<T> {
    #[inline]
    pub fn truck(&self) -> TruckId {
        self.truck
    }

    #[inline]
    pub fn destination(&self) -> Option<Capacity<T>> {
        self.destination
    }
}

impl<T: Quantity> Display for Relocation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.destination {
            Some(lot) => write!(f, "{} {}", self.truck, lot),
            None => write!(f, "{} -1", self.truck),
        }
    }
}

/// The truck yard allocator.
///
/// # Examples
///
/// ```
/// use yard_engine::prelude::*;
///
/// let mut yard: Yard<u32> = Yard::default();
/// yard.create_lot(Capacity::new(10), 2);
/// let placed = yard.add_truck(TruckId::new(1), Capacity::new(12)).unwrap();
/// assert_eq!(placed.lot(), Capacity::new(10));
/// assert_eq!(yard.count_at_least(Capacity::new(10)), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Yard<T: Quantity> {
    config: YardConfig,
    lots: LotArena<T>,
    for_assignment: AvlIndex<Capacity<T>, LotId>,
    for_ready: AvlIndex<Capacity<T>, LotId>,
    for_load: AvlIndex<Capacity<T>, LotId>,
    for_count: AvlIndex<Capacity<T>, LotId>,
}

impl<T: Quantity> Default for Yard<T> {
    fn default() -> Self {
        Self::new(YardConfig::default())
    }
}

impl<T: Quantity> Yard<T> {
    pub fn new(config: YardConfig) -> Self {
        Self {
            config,
            lots: LotArena::new(),
            for_assignment: AvlIndex::new(),
            for_ready: AvlIndex::new(),
            for_load: AvlIndex::new(),
            for_count: AvlIndex::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &YardConfig {
        &self.config
    }

    #[inline]
    pub fn lot_count(&self) -> usize {
        self.lots.len()
    }

    #[inline]
    pub fn lot(&self, capacity: Capacity<T>) -> Option<&ParkingLot<T>> {
        self.lots.by_capacity(capacity)
    }

    #[inline]
    pub fn index(&self, kind: IndexKind) -> &AvlIndex<Capacity<T>, LotId> {
        match kind {
            IndexKind::Assignment => &self.for_assignment,
            IndexKind::Ready => &self.for_ready,
            IndexKind::Load => &self.for_load,
            IndexKind::Count => &self.for_count,
        }
    }

    #[inline]
    fn index_mut(&mut self, kind: IndexKind) -> &mut AvlIndex<Capacity<T>, LotId> {
        match kind {
            IndexKind::Assignment => &mut self.for_assignment,
            IndexKind::Ready => &mut self.for_ready,
            IndexKind::Load => &mut self.for_load,
            IndexKind::Count => &mut self.for_count,
        }
    }

    fn enroll(&mut self, kind: IndexKind, capacity: Capacity<T>, id: LotId) {
        if self.index_mut(kind).insert(capacity, id) {
            trace!(index = %kind, lot = %capacity, "Lot enrolled");
        }
    }

    fn withdraw(&mut self, kind: IndexKind, capacity: Capacity<T>) {
        if self.index_mut(kind).delete(capacity).is_some() {
            trace!(index = %kind, lot = %capacity, "Lot withdrawn");
        }
    }

    #[inline]
    fn lot_mut(&mut self, id: LotId) -> Result<&mut ParkingLot<T>, AllocError<T>> {
        self.lots.get_mut(id).ok_or(AllocError::DanglingLot(id))
    }

    /// Opens a lot. Returns `false` if a lot with `capacity` already exists.
    #[instrument(level = "debug", skip(self), fields(lot = %capacity))]
    pub fn create_lot(&mut self, capacity: Capacity<T>, truck_limit: usize) -> bool {
        let lot = ParkingLot::new(capacity, truck_limit);
        let accepts = lot.accepts_trucks();
        let Some(id) = self.lots.insert(lot) else {
            debug!("Lot already exists; ignored");
            return false;
        };
        self.enroll(IndexKind::Count, capacity, id);
        if accepts {
            self.enroll(IndexKind::Assignment, capacity, id);
        }
        true
    }

    /// Closes the lot with `capacity`, dropping any trucks it holds.
    /// Returns `false` if there was no such lot.
    #[instrument(level = "debug", skip(self), fields(lot = %capacity))]
    pub fn delete_lot(&mut self, capacity: Capacity<T>) -> bool {
        for kind in IndexKind::ALL {
            self.withdraw(kind, capacity);
        }
        match self.lots.remove(capacity) {
            Some((_, lot)) => {
                debug!(dropped = lot.total_count(), "Lot deleted");
                true
            }
            None => false,
        }
    }

    /// Places a new, empty truck.
    pub fn add_truck(
        &mut self,
        id: TruckId,
        capacity: Capacity<T>,
    ) -> Result<Placement<T>, AllocError<T>> {
        self.assign(id, capacity, Capacity::zero())
    }

    /// Places a truck carrying `load` in the lot with the largest capacity not
    /// exceeding `capacity - load` among lots with a free slot.
    ///
    /// The search uses the load as given. A truck that arrives exactly full
    /// searches on zero even though it is stored emptied.
    #[instrument(level = "debug", skip(self), fields(truck = %id))]
    pub fn assign(
        &mut self,
        id: TruckId,
        capacity: Capacity<T>,
        load: Capacity<T>,
    ) -> Result<Placement<T>, AllocError<T>> {
        let truck = Truck::with_load(id, capacity, load)?;
        self.place(truck, capacity - load)
    }

    fn place(
        &mut self,
        truck: Truck<T>,
        remaining: Capacity<T>,
    ) -> Result<Placement<T>, AllocError<T>> {
        let (key, lot_id) = self
            .for_assignment
            .find_floor(remaining)
            .ok_or(AllocError::NoLotAvailable)?;

        let lot = self.lot_mut(lot_id)?;
        lot.admit(truck)?;
        let first_waiting = lot.waiting_count() == 1;
        let closed = !lot.accepts_trucks();

        if first_waiting {
            self.enroll(IndexKind::Ready, key, lot_id);
        }
        if closed {
            self.withdraw(IndexKind::Assignment, key);
        }
        debug!(truck = %truck.id(), lot = %key, closed, "Truck placed");
        Ok(Placement { lot: key, closed })
    }

    /// Promotes the front waiting truck of the lot with the smallest capacity
    /// `>= capacity` that has waiting trucks.
    #[instrument(level = "debug", skip(self), fields(threshold = %capacity))]
    pub fn advance_to_ready(
        &mut self,
        capacity: Capacity<T>,
    ) -> Result<Promotion<T>, AllocError<T>> {
        let (key, lot_id) = self
            .for_ready
            .find_ceiling(capacity)
            .ok_or(AllocError::NoLotAvailable)?;

        let lot = self.lot_mut(lot_id)?;
        let truck = lot.promote()?;
        let first_ready = lot.ready_count() == 1;
        let drained = !lot.has_waiting();

        if first_ready {
            self.enroll(IndexKind::Load, key, lot_id);
        }
        if drained {
            self.withdraw(IndexKind::Ready, key);
        }
        Ok(Promotion { truck, lot: key })
    }

    /// Total number of trucks in lots at or above `capacity`
    /// (strictly above with [`CountBoundary::Exclusive`]).
    #[instrument(level = "debug", skip(self), fields(threshold = %capacity))]
    pub fn count_at_least(&self, capacity: Capacity<T>) -> usize {
        let mut cursor = match self.config.count_boundary {
            CountBoundary::Inclusive => self.for_count.find_ceiling(capacity),
            CountBoundary::Exclusive => self.for_count.find_strictly_greater(capacity),
        };

        let mut total = 0;
        while let Some((key, lot_id)) = cursor {
            total += self.lots.get(lot_id).map_or(0, ParkingLot::total_count);
            cursor = self.for_count.successor(key);
        }
        total
    }

    /// Hands out `amount` units to ready trucks, starting at the lot with the
    /// smallest capacity `>= capacity` and moving to larger lots.
    ///
    /// Each truck takes at most its lot's capacity, leaves the lot and is
    /// placed again by the same rule as [`assign`](Self::assign), possibly
    /// into the lot it just left.
    #[instrument(level = "debug", skip(self), fields(threshold = %capacity))]
    pub fn distribute_load(
        &mut self,
        capacity: Capacity<T>,
        amount: Capacity<T>,
    ) -> Result<Vec<Relocation<T>>, AllocError<T>> {
        let mut cursor = self.for_load.find_ceiling(capacity);
        if cursor.is_none() {
            return Err(AllocError::NoLotAvailable);
        }

        let mut budget = amount;
        let mut moves = Vec::new();

        while let Some((key, lot_id)) = cursor {
            if budget.is_zero() {
                break;
            }

            loop {
                if budget.is_zero() {
                    break;
                }
                let lot = self.lot_mut(lot_id)?;
                if !lot.has_ready() {
                    break;
                }

                let mut truck = lot.release_ready()?;
                let reopened = lot.total_count() + 1 == lot.truck_limit();

                let step = key.min(budget);
                let outcome = truck.add_load(step);
                if outcome.clamped() {
                    warn!(
                        truck = %truck.id(),
                        requested = %step,
                        applied = %outcome.applied(),
                        "Load exceeded remaining truck capacity; clamped"
                    );
                }
                budget -= outcome.applied();

                if reopened {
                    self.enroll(IndexKind::Assignment, key, lot_id);
                }

                let destination = match self.place(truck, truck.remaining()) {
                    Ok(placement) => Some(placement.lot()),
                    Err(AllocError::NoLotAvailable) => None,
                    Err(e) => return Err(e),
                };
                moves.push(Relocation {
                    truck: truck.id(),
                    destination,
                });
            }

            if !self.lots.get(lot_id).is_some_and(ParkingLot::has_ready) {
                self.withdraw(IndexKind::Load, key);
            }
            cursor = self.for_load.find_strictly_greater(key);
        }

        if moves.is_empty() {
            return Err(AllocError::NothingLoaded);
        }
        Ok(moves)
    }

    /// Checks every index for AVL validity and every lot for correct
    /// membership in each index.
    pub fn validate(&self) -> Result<(), YardInvariantError<T>> {
        for kind in IndexKind::ALL {
            let index = self.index(kind);
            index
                .validate()
                .map_err(|source| YardInvariantError::Tree { index: kind, source })?;

            for (key, lot_id) in index.iter() {
                let lot = self
                    .lots
                    .get(lot_id)
                    .ok_or(YardInvariantError::Dangling { index: kind, key })?;
                if lot.capacity() != key {
                    return Err(YardInvariantError::KeyMismatch {
                        index: kind,
                        key,
                        lot: lot.capacity(),
                    });
                }
            }

            for (_, lot) in self.lots.iter() {
                let expected = kind.admits(lot);
                if index.contains(lot.capacity()) != expected {
                    return Err(YardInvariantError::Membership {
                        index: kind,
                        lot: lot.capacity(),
                        expected,
                    });
                }
            }
        }
        Ok(())
    }
}
