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

//! # Yard Model (`yard-model`)
//!
//! Domain entities of the truck yard, built on the primitives of `yard-core`.
//!
//! - **`Truck<T>`**: an occupant with an id, a total capacity and the load it
//!   currently carries.
//! - **`ParkingLot<T>`**: a lot with a capacity threshold and a truck limit. It
//!   owns a waiting line and a ready line, both bounded by the truck limit.
//! - **`LotArena<T>`**: the single owner of every lot. Lots are addressed by a
//!   stable [`LotId`] and can be looked up by their (unique) capacity.
//!
//! Indices that order lots store [`LotId`]s only and resolve them through the
//! arena, so a lot can sit in several indices at once without aliasing.

pub mod arena;
pub mod err;
pub mod id;
pub mod lot;
pub mod truck;

pub mod prelude {
    pub use crate::arena::LotArena;
    pub use crate::err::{LoadExceedsCapacityError, LotError};
    pub use crate::id::{LotId, LotTag, TruckId};
    pub use crate::lot::ParkingLot;
    pub use crate::truck::{LoadOutcome, Truck};
    pub use yard_core::{Quantity, capacity::Capacity};
}
