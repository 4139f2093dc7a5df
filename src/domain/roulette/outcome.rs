use crate::domain::errors::InvalidOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest number on a single-zero wheel
pub const MAX_OUTCOME: u8 = 36;

/// Number of distinct outcomes (0-36)
pub const OUTCOME_COUNT: usize = MAX_OUTCOME as usize + 1;

/// Red numbers of the European single-zero layout
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Pocket color. Zero is green and belongs to neither red nor black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    /// Numeric code used as a model feature: -1 zero, 1 red, 0 black
    pub fn code(&self) -> f64 {
        match self {
            Color::Green => -1.0,
            Color::Red => 1.0,
            Color::Black => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

/// Low (1-18) or high (19-36) half of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Half {
    Low,
    High,
}

/// Result of a single spin, always within 0..=36
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Outcome(u8);

impl Outcome {
    pub const ZERO: Outcome = Outcome(0);

    /// Creates an outcome, rejecting anything off the wheel
    pub fn new(value: i64) -> Result<Self, InvalidOutcome> {
        if (0..=MAX_OUTCOME as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(InvalidOutcome(value))
        }
    }

    /// All outcomes in ascending order
    pub fn all() -> impl Iterator<Item = Outcome> {
        (0..=MAX_OUTCOME).map(Outcome)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Class index used by the classifier
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn color(&self) -> Color {
        if self.is_zero() {
            Color::Green
        } else if RED_NUMBERS.contains(&self.0) {
            Color::Red
        } else {
            Color::Black
        }
    }

    /// Even/odd for betting purposes; zero is neither
    pub fn parity(&self) -> Option<Parity> {
        match self.0 {
            0 => None,
            n if n % 2 == 0 => Some(Parity::Even),
            _ => Some(Parity::Odd),
        }
    }

    /// Low/high for betting purposes; zero is neither
    pub fn half(&self) -> Option<Half> {
        match self.0 {
            0 => None,
            1..=18 => Some(Half::Low),
            _ => Some(Half::High),
        }
    }

    /// Table column 1-3, 0 for zero
    pub fn column(&self) -> u8 {
        if self.is_zero() { 0 } else { (self.0 - 1) % 3 + 1 }
    }

    /// Table row (street) 1-12, 0 for zero
    pub fn row(&self) -> u8 {
        if self.is_zero() { 0 } else { (self.0 - 1) / 3 + 1 }
    }

    /// Dozen 1-3, 0 for zero
    pub fn dozen(&self) -> u8 {
        if self.is_zero() { 0 } else { (self.0 - 1) / 12 + 1 }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = InvalidOutcome;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Outcome::new(value)
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
