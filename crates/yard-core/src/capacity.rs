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

use crate::Quantity;
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// An amount of load units.
///
/// Used for a lot's capacity threshold, a truck's total capacity, the load a
/// truck currently carries and the budget of a load distribution.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Capacity<T: Quantity>(T);

impl<T: Quantity> std::fmt::Display for Capacity<T> {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Quantity> From<T> for Capacity<T> {
    #[inline]
    fn from(v: T) -> Self {
        Capacity(v)
    }
}

impl<T: Quantity> Capacity<T> {
    #[inline]
    pub const fn new(v: T) -> Self {
        Capacity(v)
    }

    #[inline]
    pub fn zero() -> Self {
        Capacity(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(&other.0).map(Capacity)
    }

    #[inline]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(&other.0).map(Capacity)
    }

    #[inline]
    pub fn saturating_sub(self, other: Self) -> Self {
        Capacity(self.0.saturating_sub(other.0))
    }
}

impl<T: Quantity> Add for Capacity<T> {
    type Output = Capacity<T>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("overflow in Capacity + Capacity")
    }
}

impl<T: Quantity> AddAssign for Capacity<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Quantity> Sub for Capacity<T> {
    type Output = Capacity<T>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
            .expect("underflow in Capacity - Capacity")
    }
}

impl<T: Quantity> SubAssign for Capacity<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Quantity> Sum for Capacity<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Capacity::zero(), |acc, c| acc + c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_ops() {
        let a = Capacity::new(5u32);
        let b = Capacity::new(7u32);
        assert_eq!(a.checked_add(b), Some(Capacity::new(12)));
        assert_eq!(a.checked_sub(b), None);
        assert_eq!(b.checked_sub(a), Some(Capacity::new(2)));
        assert_eq!(a.saturating_sub(b), Capacity::zero());
    }

    #[test]
    #[should_panic(expected = "underflow")]
    fn test_sub_underflow_panics() {
        let _ = Capacity::new(1u8) - Capacity::new(2u8);
    }

    #[test]
    fn test_ordering_and_display() {
        assert!(Capacity::new(3u64) < Capacity::new(4u64));
        assert_eq!(Capacity::new(42u64).to_string(), "42");
    }

    #[test]
    fn test_sum() {
        let total: Capacity<u16> = [1u16, 2, 3].into_iter().map(Capacity::new).sum();
        assert_eq!(total, Capacity::new(6));
    }
}
