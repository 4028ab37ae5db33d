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

//! Phantom-tagged wrappers around `usize` so that indices into different
//! arenas cannot be mixed up.

use std::{fmt, hash::Hash, marker::PhantomData};

/// Gives a typed index its display name.
///
/// Tags are zero-sized markers, so the comparison bounds cost nothing and let
/// [`TypedIndex`] derive its traits.
pub trait TypedIndexTag: Copy + Eq + Ord + Hash {
    const NAME: &'static str;
}

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T: TypedIndexTag> {
    index: usize,
    _marker: PhantomData<T>,
}

impl<T: TypedIndexTag> TypedIndex<T> {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.index
    }
}

impl<T: TypedIndexTag> fmt::Debug for TypedIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T: TypedIndexTag> fmt::Display for TypedIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T: TypedIndexTag> From<usize> for TypedIndex<T> {
    #[inline]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T: TypedIndexTag> From<TypedIndex<T>> for usize {
    #[inline]
    fn from(value: TypedIndex<T>) -> Self {
        value.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    struct SlotTag;

    impl TypedIndexTag for SlotTag {
        const NAME: &'static str = "Slot";
    }

    type SlotIndex = TypedIndex<SlotTag>;

    #[test]
    fn test_roundtrip_and_display() {
        let idx = SlotIndex::new(7);
        assert_eq!(idx.get(), 7);
        assert_eq!(usize::from(idx), 7);
        assert_eq!(SlotIndex::from(7), idx);
        assert_eq!(format!("{idx}"), "Slot(7)");
        assert_eq!(format!("{idx:?}"), "Slot(7)");
    }

    #[test]
    fn test_orders_by_position() {
        let mut ids = vec![SlotIndex::new(3), SlotIndex::new(0), SlotIndex::new(2)];
        ids.sort();
        assert_eq!(ids, vec![SlotIndex::new(0), SlotIndex::new(2), SlotIndex::new(3)]);
        assert!(SlotIndex::new(1) < SlotIndex::new(4));
    }
}
