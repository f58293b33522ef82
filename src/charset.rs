/*
 * Copyright (C) 2026 taylor.fish <contact@taylor.fish>
 *
 * This file is part of polybase.
 *
 * polybase is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * polybase is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with polybase. If not, see <https://www.gnu.org/licenses/>.
 */

//! Ordered symbol tables.

use super::error::ConfigError;

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

/// An ordered list of unique symbols. A symbol's index is its digit value.
///
/// Pad sets use the same type; for them the index is the padding value
/// (only meaningful for codecs whose padding symbols carry bits).
#[derive(Clone, PartialEq, Eq)]
pub struct Charset {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

/// The letter case used by every cased symbol of a charset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Case {
    Lower,
    Upper,
}

impl Charset {
    /// Builds a charset, rejecting duplicate symbols.
    pub fn new<I>(symbols: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = char>,
    {
        let symbols: Vec<char> = symbols.into_iter().collect();
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if index.insert(c, i).is_some() {
                return Err(ConfigError::DuplicateSymbol(c));
            }
        }
        Ok(Self {
            symbols,
            index,
        })
    }

    /// Builds a charset from the chars of `s`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        Self::new(s.chars())
    }

    /// An empty charset, used as "no padding symbols".
    pub fn empty() -> Self {
        Self {
            symbols: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Fails unless the charset has exactly `len` symbols.
    pub(crate) fn ensure_len(&self, len: usize) -> Result<(), ConfigError> {
        if self.len() != len {
            return Err(ConfigError::LengthMismatch {
                expected: len,
                found: self.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbol for `digit`. Panics if `digit` is out of range; callers
    /// only pass digits already reduced modulo the radix.
    pub fn symbol(&self, digit: usize) -> char {
        self.symbols[digit]
    }

    pub fn get(&self, digit: usize) -> Option<char> {
        self.symbols.get(digit).copied()
    }

    pub fn first(&self) -> Option<char> {
        self.symbols.first().copied()
    }

    /// The digit value of `c`, if it is a member.
    pub fn digit(&self, c: char) -> Option<usize> {
        self.index.get(&c).copied()
    }

    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Fails with [`ConfigError::PadOverlap`] if any symbol of `other` is
    /// also in `self`.
    pub fn ensure_disjoint(&self, other: &Self) -> Result<(), ConfigError> {
        match other.symbols.iter().find(|c| self.contains(**c)) {
            Some(&c) => Err(ConfigError::PadOverlap(c)),
            None => Ok(()),
        }
    }

    /// Returns the case shared by all cased symbols, or `None` if the
    /// charset has no cased symbols or mixes both cases.
    pub fn case(&self) -> Option<Case> {
        let mut case = None;
        for c in self.symbols.iter().filter(|c| c.is_alphabetic()) {
            let this = if c.is_lowercase() {
                Case::Lower
            } else if c.is_uppercase() {
                Case::Upper
            } else {
                continue;
            };
            match case {
                None => case = Some(this),
                Some(prev) if prev != this => return None,
                Some(_) => {}
            }
        }
        case
    }
}

impl Debug for Charset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Charset")
            .field(&self.symbols.iter().collect::<String>())
            .finish()
    }
}
