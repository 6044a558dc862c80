use std::iter::FusedIterator;

use crate::error::FiboError;

/// Upper limit for generated terms. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound(i64);

impl Bound {
    pub fn new(value: i64) -> Result<Self, FiboError> {
        if value <= 0 {
            return Err(FiboError::InvalidBound { bound: value });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Fibonacci terms not exceeding a bound.
///
/// Holds no generation state of its own: every call to [`Sequence::terms`]
/// starts again from `(0, 1)`, so the same value can be iterated any number
/// of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence {
    bound: Bound,
}

impl Sequence {
    pub fn new(bound: Bound) -> Self {
        Self { bound }
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    pub fn terms(&self) -> Terms {
        Terms {
            previous: Some(0),
            current: Some(1),
            bound: self.bound.get(),
        }
    }
}

impl IntoIterator for Sequence {
    type Item = i64;
    type IntoIter = Terms;

    fn into_iter(self) -> Terms {
        self.terms()
    }
}

impl IntoIterator for &Sequence {
    type Item = i64;
    type IntoIter = Terms;

    fn into_iter(self) -> Terms {
        self.terms()
    }
}

/// Validates `bound` and returns the sequence of terms up to it.
pub fn sequence_up_to(bound: i64) -> Result<Sequence, FiboError> {
    Ok(Sequence::new(Bound::new(bound)?))
}

/// Lazy iterator over the terms of a [`Sequence`].
///
/// A `None` slot means the recurrence left the `i64` range; such a term is
/// necessarily above any bound, so iteration simply ends there.
#[derive(Debug, Clone)]
pub struct Terms {
    previous: Option<i64>,
    current: Option<i64>,
    bound: i64,
}

impl Iterator for Terms {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let term = self.previous?;
        if term > self.bound {
            self.previous = None;
            return None;
        }
        let next = self.current.and_then(|current| term.checked_add(current));
        self.previous = self.current;
        self.current = next;
        Some(term)
    }
}

impl FusedIterator for Terms {}
