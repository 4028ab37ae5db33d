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

use std::fmt::{Debug, Display};
use yard_core::{Quantity, capacity::Capacity};

use crate::id::TruckId;

/// A truck was constructed with more load than it can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadExceedsCapacityError<T: Quantity> {
    id: TruckId,
    capacity: Capacity<T>,
    load: Capacity<T>,
}

impl<T: Quantity> LoadExceedsCapacityError<T> {
    #[inline]
    pub fn new(id: TruckId, capacity: Capacity<T>, load: Capacity<T>) -> Self {
        Self { id, capacity, load }
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
}

impl<T: Quantity> Display for LoadExceedsCapacityError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Truck {} carries load {} exceeding its capacity {}",
            self.id, self.load, self.capacity
        )
    }
}

impl<T: Quantity> std::error::Error for LoadExceedsCapacityError<T> {}

/// State errors raised by [`ParkingLot`](crate::lot::ParkingLot) mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LotError<T: Quantity> {
    /// The lot already holds as many trucks as its limit allows.
    Full { lot: Capacity<T>, limit: usize },
    /// Promotion was requested but the waiting line is empty.
    NoWaitingTruck { lot: Capacity<T> },
    /// A ready truck was requested but the ready line is empty.
    NoReadyTruck { lot: Capacity<T> },
}

impl<T: Quantity> Display for LotError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LotError::Full { lot, limit } => {
                write!(f, "Lot {} is full ({} trucks)", lot, limit)
            }
            LotError::NoWaitingTruck { lot } => write!(f, "Lot {} has no waiting truck", lot),
            LotError::NoReadyTruck { lot } => write!(f, "Lot {} has no ready truck", lot),
        }
    }
}

impl<T: Quantity + Debug> std::error::Error for LotError<T> {}
