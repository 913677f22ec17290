//! Key combination identity.
//!
//! A [`Combo`] is an ordered list of keys used directly as a map key. With
//! [`ComboOrder::Ordered`] the order is part of the identity, so
//! `ControlLeft+KeyS` and `KeyS+ControlLeft` are two separate controls that
//! happen to activate on the same frames. [`ComboOrder::Canonical`] sorts and
//! deduplicates the keys first, folding both into one entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseControlError;
use crate::key::Key;

/// Separator between key names in a combo's text form.
pub const COMBO_SEPARATOR: char = '+';

/// How a registry turns a key list into a combo identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComboOrder {
    /// Key order is significant.
    #[default]
    Ordered,
    /// Keys are sorted and deduplicated, so any order names the same combo.
    Canonical,
}

impl FromStr for ComboOrder {
    type Err = ParseControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" => Ok(Self::Ordered),
            "canonical" => Ok(Self::Canonical),
            other => Err(ParseControlError::UnknownComboOrder(other.to_string())),
        }
    }
}

/// An ordered sequence of keys that must all be held at once.
///
/// An empty combo is accepted but never activates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Combo(Vec<Key>);

impl Combo {
    /// Builds a combo from keys in the given order.
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self(keys.into_iter().collect())
    }

    /// The member keys, in order.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Number of member keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for the degenerate combo with no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorted, deduplicated copy of this combo.
    #[must_use]
    pub fn canonical(mut self) -> Self {
        self.0.sort_unstable();
        self.0.dedup();
        self
    }

    /// Applies a registry's [`ComboOrder`] to this combo.
    #[must_use]
    pub fn arranged(self, order: ComboOrder) -> Self {
        match order {
            ComboOrder::Ordered => self,
            ComboOrder::Canonical => self.canonical(),
        }
    }
}

impl From<Vec<Key>> for Combo {
    fn from(keys: Vec<Key>) -> Self {
        Self(keys)
    }
}

impl From<&[Key]> for Combo {
    fn from(keys: &[Key]) -> Self {
        Self(keys.to_vec())
    }
}

impl<const N: usize> From<[Key; N]> for Combo {
    fn from(keys: [Key; N]) -> Self {
        Self(keys.to_vec())
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{COMBO_SEPARATOR}")?;
            }
            f.write_str(key.name())?;
        }
        Ok(())
    }
}

impl FromStr for Combo {
    type Err = ParseControlError;

    /// Parses `"ControlLeft+KeyS"`. Whitespace around each name is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(COMBO_SEPARATOR)
            .map(|part| {
                if part.trim().is_empty() {
                    Err(ParseControlError::EmptySegment(s.to_string()))
                } else {
                    part.parse::<Key>()
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
