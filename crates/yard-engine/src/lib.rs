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

//! # Yard Engine (`yard-engine`)
//!
//! The allocator that routes trucks through parking lots.
//!
//! A [`yard::Yard`] owns every lot in a [`LotArena`](yard_model::arena::LotArena)
//! and keeps four [`AvlIndex`](yard_core::avl::AvlIndex) views over them, each
//! keyed by lot capacity:
//!
//! | index           | a lot is a member iff             |
//! |-----------------|-----------------------------------|
//! | for-assignment  | it holds fewer trucks than its limit |
//! | for-ready       | its waiting line is non-empty     |
//! | for-load        | its ready line is non-empty       |
//! | for-count       | it exists                         |
//!
//! Membership is re-established by the allocator after every state change; the
//! indices never inspect lots themselves.
//!
//! The [`command`] module maps the line protocol onto allocator calls.

pub mod command;
pub mod config;
pub mod err;
pub mod yard;

pub mod prelude {
    pub use crate::command::{Command, ParseCommandError, Response};
    pub use crate::config::{CountBoundary, YardConfig};
    pub use crate::err::{AllocError, YardInvariantError};
    pub use crate::yard::{IndexKind, Placement, Promotion, Relocation, Yard};
    pub use yard_model::prelude::*;
}
