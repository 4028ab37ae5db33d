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

use crate::yard::IndexKind;
use std::fmt::{Debug, Display};
use yard_core::{Quantity, avl::AvlInvariantError, capacity::Capacity};
use yard_model::prelude::{LoadExceedsCapacityError, LotError, LotId};

/// Failures of allocator operations.
///
/// `NoLotAvailable` and `NothingLoaded` are the expected outcomes reported to
/// the caller as `-1`. The remaining variants only surface if internal state
/// is inconsistent or the caller hands in an impossible truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocError<T: Quantity> {
    /// No lot in the relevant index satisfies the query.
    NoLotAvailable,
    /// A load distribution found lots but moved no truck.
    NothingLoaded,
    /// A lot rejected a state change.
    Lot(LotError<T>),
    /// A truck was built with more load than capacity.
    Load(LoadExceedsCapacityError<T>),
    /// An index entry points at a slot with no live lot.
    DanglingLot(LotId),
}

impl<T: Quantity> AllocError<T> {
    /// `true` for the outcomes the protocol reports as a plain failure.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, AllocError::NoLotAvailable | AllocError::NothingLoaded)
    }
}

impl<T: Quantity> Display for AllocError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocError::NoLotAvailable => write!(f, "No lot available"),
            AllocError::NothingLoaded => write!(f, "No truck was loaded"),
            AllocError::Lot(e) => write!(f, "{e}"),
            AllocError::Load(e) => write!(f, "{e}"),
            AllocError::DanglingLot(id) => write!(f, "Index refers to missing lot {id}"),
        }
    }
}

impl<T: Quantity> std::error::Error for AllocError<T> {}

impl<T: Quantity> From<LotError<T>> for AllocError<T> {
    fn from(err: LotError<T>) -> Self {
        AllocError::Lot(err)
    }
}

impl<T: Quantity> From<LoadExceedsCapacityError<T>> for AllocError<T> {
    fn from(err: LoadExceedsCapacityError<T>) -> Self {
        AllocError::Load(err)
    }
}

/// Violations reported by [`Yard::validate`](crate::yard::Yard::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YardInvariantError<T: Quantity> {
    /// An index is not a valid AVL tree.
    Tree {
        index: IndexKind,
        source: AvlInvariantError<Capacity<T>>,
    },
    /// An index entry refers to a slot with no live lot.
    Dangling { index: IndexKind, key: Capacity<T> },
    /// An index entry's key differs from its lot's capacity.
    KeyMismatch {
        index: IndexKind,
        key: Capacity<T>,
        lot: Capacity<T>,
    },
    /// A lot's membership in an index disagrees with its state.
    Membership {
        index: IndexKind,
        lot: Capacity<T>,
        expected: bool,
    },
}

impl<T: Quantity> Display for YardInvariantError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YardInvariantError::Tree { index, source } => write!(f, "{index}: {source}"),
            YardInvariantError::Dangling { index, key } => {
                write!(f, "{index}: key {key} refers to a missing lot")
            }
            YardInvariantError::KeyMismatch { index, key, lot } => {
                write!(f, "{index}: key {key} refers to lot {lot}")
            }
            YardInvariantError::Membership {
                index,
                lot,
                expected,
            } => {
                if *expected {
                    write!(f, "{index}: lot {lot} is missing")
                } else {
                    write!(f, "{index}: lot {lot} should not be present")
                }
            }
        }
    }
}

impl<T: Quantity + Debug> std::error::Error for YardInvariantError<T> {}
