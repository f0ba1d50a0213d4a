#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::error::SudokuError;
use core::ops::{BitAnd, BitOr};
use std::fmt;

/// A committed cell value in the range `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Value(u8);

impl Value {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Bit position of this value in a candidate mask.
    #[must_use]
    pub const fn bit(self) -> u16 {
        1 << (self.0 - 1)
    }
}

impl TryFrom<u8> for Value {
    type Error = SudokuError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&v) {
            Ok(Self(v))
        } else {
            Err(SudokuError::InvalidInput(format!(
                "value {v} outside 1..=9"
            )))
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of values a cell may still take, one bit per value.
///
/// Bit `i` set means value `i + 1` is still possible. The full set is the
/// nine low bits of the backing `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CandidateSet(u16);

impl CandidateSet {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(0x1FF);

    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & Self::FULL.0)
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, v: Value) -> bool {
        self.0 & v.bit() != 0
    }

    pub const fn insert(&mut self, v: Value) {
        self.0 |= v.bit();
    }

    pub const fn remove(&mut self, v: Value) {
        self.0 &= !v.bit();
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The sole remaining value, if exactly one bit is set.
    #[must_use]
    pub const fn single(self) -> Option<Value> {
        if self.0.count_ones() == 1 {
            Some(Value((self.0.trailing_zeros() as u8) + 1))
        } else {
            None
        }
    }

    /// Iterates the contained values in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Value> {
        (Value::MIN..=Value::MAX)
            .map(Value)
            .filter(move |v| self.contains(*v))
    }
}

impl BitAnd for CandidateSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for CandidateSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for v in self.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

/// One grid cell: either committed to a value or carrying the set of values
/// it may still take. A committed cell has an empty candidate set; an
/// uncommitted cell with an empty set is a contradiction, detected during
/// propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub value: Option<Value>,
    pub candidates: CandidateSet,
}

impl Cell {
    #[must_use]
    pub const fn unset() -> Self {
        Self {
            value: None,
            candidates: CandidateSet::FULL,
        }
    }

    #[must_use]
    pub const fn committed(v: Value) -> Self {
        Self {
            value: Some(v),
            candidates: CandidateSet::EMPTY,
        }
    }

    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::unset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Value {
        Value::try_from(n).unwrap()
    }

    #[test]
    fn test_value_range() {
        assert!(Value::try_from(0).is_err());
        assert!(Value::try_from(10).is_err());
        for n in 1..=9 {
            assert_eq!(Value::try_from(n).unwrap().get(), n);
        }
    }

    #[test]
    fn test_value_bits() {
        assert_eq!(v(1).bit(), 0b1);
        assert_eq!(v(9).bit(), 0b1_0000_0000);
    }

    #[test]
    fn test_full_set() {
        let full = CandidateSet::FULL;
        assert_eq!(full.len(), 9);
        for n in 1..=9 {
            assert!(full.contains(v(n)));
        }
    }

    #[test]
    fn test_insert_remove() {
        let mut s = CandidateSet::EMPTY;
        s.insert(v(4));
        s.insert(v(7));
        assert_eq!(s.len(), 2);
        assert!(s.contains(v(4)));
        s.remove(v(4));
        assert!(!s.contains(v(4)));
        assert!(s.contains(v(7)));
        assert_eq!(s.single(), Some(v(7)));
    }

    #[test]
    fn test_single_only_for_one_bit() {
        assert_eq!(CandidateSet::EMPTY.single(), None);
        assert_eq!(CandidateSet::FULL.single(), None);
        assert_eq!(CandidateSet::from_bits(0b100).single(), Some(v(3)));
    }

    #[test]
    fn test_iter_ascending() {
        let s = CandidateSet::from_bits(0b1_0100_0010);
        let vals: Vec<u8> = s.iter().map(Value::get).collect();
        assert_eq!(vals, vec![2, 7, 9]);
    }

    #[test]
    fn test_set_ops() {
        let a = CandidateSet::from_bits(0b0000_1111);
        let b = CandidateSet::from_bits(0b0011_1100);
        assert_eq!((a & b).bits(), 0b0000_1100);
        assert_eq!((a | b).bits(), 0b0011_1111);
    }

    #[test]
    fn test_cell_states() {
        let c = Cell::unset();
        assert!(!c.is_set());
        assert_eq!(c.candidates, CandidateSet::FULL);

        let c = Cell::committed(v(5));
        assert!(c.is_set());
        assert!(c.candidates.is_empty());
    }
}
