use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Shape an amount string must keep while it is being keyed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountMask {
    /// Digits, an optional point, at most two fraction digits. A bare
    /// leading point is allowed.
    Lenient,
    /// Same as `Lenient` but at least one integer digit before the point.
    Strict,
}

impl AmountMask {
    pub fn accepts(&self, candidate: &str) -> bool {
        let (integer, fraction) = match candidate.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (candidate, None),
        };

        if !integer.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }

        if let Some(fraction) = fraction {
            if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
        }

        match self {
            AmountMask::Lenient => true,
            AmountMask::Strict => !integer.is_empty(),
        }
    }
}

/// Price being keyed in on the entry screen, kept as the literal string the
/// merchant typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmountInput(String);

impl AmountInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one keypad character. Returns `false` and leaves the input
    /// untouched when the result would not satisfy `mask` or would no longer
    /// fit a `Decimal`.
    pub fn push(&mut self, key: char, mask: AmountMask) -> bool {
        if !(key.is_ascii_digit() || key == '.') {
            return false;
        }

        let mut candidate = AmountInput(self.0.clone());
        candidate.0.push(key);

        // A bare point has no value yet but is a valid partial entry.
        let representable = candidate.0 == "." || candidate.to_decimal().is_some();
        if mask.accepts(candidate.as_str()) && representable {
            *self = candidate;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// What the keypad display shows. Empty input renders as `0.00`.
    pub fn display(&self) -> &str {
        if self.0.is_empty() {
            "0.00"
        } else {
            &self.0
        }
    }

    /// Numeric value of the input, if it has one. `"12."` is 12 and `".5"`
    /// is 0.5.
    pub fn to_decimal(&self) -> Option<Decimal> {
        let trimmed = self.0.trim_end_matches('.');
        if trimmed.is_empty() {
            return None;
        }

        let normalized = if trimmed.starts_with('.') {
            format!("0{}", trimmed)
        } else {
            trimmed.to_string()
        };

        Decimal::from_str(&normalized).ok()
    }

    /// Numeric value when it is strictly positive.
    pub fn positive(&self) -> Option<Decimal> {
        self.to_decimal().filter(|value| value.is_sign_positive() && !value.is_zero())
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
