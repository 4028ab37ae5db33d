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

//! # Yard Core (`yard-core`)
//!
//! Foundational building blocks for the truck yard allocator:
//!
//! - [`capacity::Capacity`]: a strongly typed amount of load units. Lot thresholds,
//!   truck capacities, truck loads and load budgets are all expressed in it.
//! - [`queue::RingQueue`]: a fixed-capacity circular FIFO.
//! - [`avl::AvlIndex`]: a height-balanced search tree with floor, ceiling and
//!   strict-successor queries.
//! - [`index::TypedIndex`]: phantom-tagged arena indices.

use num_traits::{PrimInt, Unsigned};
use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

pub mod avl;
pub mod capacity;
pub mod index;
pub mod queue;

/// Numeric types usable as load units.
pub trait Quantity: PrimInt + Unsigned + Hash + Send + Sync + Debug + Display {}
impl<T> Quantity for T where T: PrimInt + Unsigned + Hash + Send + Sync + Debug + Display {}
