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

//! Ecoji: 10 bits per emoji, five bytes to four emojis.
//!
//! Two incompatible emoji tables exist. Most emojis appear in both (often
//! with different values), so the table is identified by the first emoji
//! that belongs to only one of them.
//!
//! A partial final group is marked with padding:
//!
//! * one leftover byte's worth of slack (4 bytes in the group): the last
//!   emoji carries only 2 bits, so it is replaced by one of four "last"
//!   padding emojis selected by those bits;
//! * more slack: trailing emojis that carry no bits are dropped and
//!   replaced by the shared "fill" padding emoji.
//!
//! Encoded streams may be concatenated. Decoding splits the input after
//! every run of padding and decodes each piece on its own.

use super::block::BlockSizes;
use super::charset::Charset;
use super::codec::{self, Codec, Decoded};
use super::error::{ConfigError, DecodeError, Result};
use super::radix::RadixConverter;
use super::settings::Settings;

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::iter::repeat;
use std::str::FromStr;

const RADIX: usize = 1024;
const BYTES_PER_GROUP: usize = 5;
const SYMBOLS_PER_GROUP: usize = 4;
const LAST_PADS: usize = 4;

/// One of the two Ecoji emoji tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EcojiVersion {
    V1,
    V2,
}

impl EcojiVersion {
    fn slot(self) -> usize {
        match self {
            Self::V1 => 0,
            Self::V2 => 1,
        }
    }
}

impl Display for EcojiVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::V1 => "emojis_v1",
            Self::V2 => "emojis_v2",
        })
    }
}

impl FromStr for EcojiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "v1" | "emojis_v1" => Ok(Self::V1),
            "2" | "v2" | "emojis_v2" => Ok(Self::V2),
            _ => Err(ConfigError::UnknownVersion(s.into())),
        }
    }
}

/// The two padding classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadClass {
    /// Stands in for an emoji that carried no bits.
    Fill,
    /// Replaces the final emoji of a 4-byte group; the value is the two
    /// bits it carries.
    Last(u8),
}

/// What a symbol means in one table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Digit(u16),
    Pad(PadClass),
}

/// A symbol's meaning in each table, indexed by [`EcojiVersion`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Entry([Option<Symbol>; 2]);

impl Entry {
    fn get(&self, version: EcojiVersion) -> Option<Symbol> {
        self.0[version.slot()]
    }

    /// The only table containing this symbol, if it is in exactly one.
    fn unique_version(&self) -> Option<EcojiVersion> {
        match self.0 {
            [Some(_), None] => Some(EcojiVersion::V1),
            [None, Some(_)] => Some(EcojiVersion::V2),
            _ => None,
        }
    }

    fn is_pad(&self) -> bool {
        self.0.iter().flatten().any(|s| matches!(s, Symbol::Pad(_)))
    }
}

/// The emojis and "last" padding emojis of one table.
#[derive(Clone, Debug)]
pub struct EcojiAlphabet {
    emojis: Charset,
    last: Charset,
}

impl EcojiAlphabet {
    /// `emojis` must have 1024 symbols and `last` 4, with no symbol in both.
    pub fn new(emojis: Charset, last: Charset) -> Result<Self, ConfigError> {
        emojis.ensure_len(RADIX)?;
        last.ensure_len(LAST_PADS)?;
        emojis.ensure_disjoint(&last)?;
        Ok(Self {
            emojis,
            last,
        })
    }
}

/// An Ecoji codec that encodes with one table and decodes either.
#[derive(Clone, Debug)]
pub struct Ecoji {
    alphabets: [EcojiAlphabet; 2],
    fill: char,
    lookup: HashMap<char, Entry>,
    converter: RadixConverter,
    version: EcojiVersion,
    settings: Settings,
}

/// Decoded bytes plus the table they were decoded with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcojiDecoded {
    pub decoded: Decoded,
    /// The table of the last run, detected from its emojis or carried over
    /// from earlier runs. The configured table if no emoji identified one.
    pub version: EcojiVersion,
}

impl Ecoji {
    /// `version` selects the table used for encoding and the table assumed
    /// when decoding input that does not identify one. `fill` is shared by
    /// both tables and must not appear in either.
    pub fn new(
        v1: EcojiAlphabet,
        v2: EcojiAlphabet,
        fill: char,
        version: EcojiVersion,
        settings: Settings,
    ) -> Result<Self, ConfigError> {
        let mut lookup: HashMap<char, Entry> = HashMap::new();
        for (alphabet, version) in
            [(&v1, EcojiVersion::V1), (&v2, EcojiVersion::V2)]
        {
            if alphabet.emojis.contains(fill) || alphabet.last.contains(fill) {
                return Err(ConfigError::PadOverlap(fill));
            }
            codec::check_sign_symbol(&alphabet.emojis, &settings)?;
            let slot = version.slot();
            for (i, &c) in alphabet.emojis.symbols().iter().enumerate() {
                lookup.entry(c).or_default().0[slot] =
                    Some(Symbol::Digit(i as u16));
            }
            for (i, &c) in alphabet.last.symbols().iter().enumerate() {
                lookup.entry(c).or_default().0[slot] =
                    Some(Symbol::Pad(PadClass::Last(i as u8)));
            }
            lookup.entry(fill).or_default().0[slot] =
                Some(Symbol::Pad(PadClass::Fill));
        }

        let block_sizes = BlockSizes::new(BYTES_PER_GROUP, SYMBOLS_PER_GROUP)?;
        Ok(Self {
            alphabets: [v1, v2],
            fill,
            lookup,
            converter: RadixConverter::new(RADIX, block_sizes, 0)?,
            version,
            settings,
        })
    }

    pub fn version(&self) -> EcojiVersion {
        self.version
    }

    fn alphabet(&self, version: EcojiVersion) -> &EcojiAlphabet {
        &self.alphabets[version.slot()]
    }

    /// Encodes `bytes` with the configured table, ignoring
    /// [`Settings::little_endian`].
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        let alphabet = self.alphabet(self.version);
        let (mut digits, zero_padding) = self.converter.encode_digits(bytes, false);

        let mut tail = None;
        let mut fills = 0;
        match zero_padding {
            0 => {}
            1 => {
                // The last digit holds 2 data bits followed by 8 zero bits.
                if let Some(d) = digits.pop() {
                    tail = alphabet.last.get(d >> 8);
                }
            }
            _ => {
                let dropped = self.converter.pad_chars(zero_padding);
                digits.truncate(digits.len().saturating_sub(dropped));
                if self.settings.padding {
                    fills = if self.settings.trim {
                        1
                    } else {
                        dropped
                    };
                }
            }
        }

        let mut output: String =
            digits.iter().map(|&d| alphabet.emojis.symbol(d)).collect();
        output.extend(tail);
        output.extend(repeat(self.fill).take(fills));
        output
    }

    /// Returns the table pinned by the first version-unique symbol of
    /// `run`. A later symbol of the run missing from that table is an error.
    fn detect_version(
        run: &[(char, Entry)],
    ) -> Result<Option<EcojiVersion>, DecodeError> {
        let mut pinned = None;
        for &(c, entry) in run {
            match pinned {
                None => {
                    pinned = entry.unique_version();
                    if let Some(version) = pinned {
                        tracing::debug!(%version, symbol = ?c, "ecoji version pinned");
                    }
                }
                Some(version) => {
                    if entry.get(version).is_none() {
                        return Err(DecodeError::MixedVersions(c));
                    }
                }
            }
        }
        Ok(pinned)
    }

    /// Decodes `input`, also reporting which table was used.
    pub fn decode_with_version(&self, input: &str) -> Result<EcojiDecoded> {
        let input = codec::strip_line_breaks(input);
        let (body, negative) = self.split_sign(&input)?;

        let mut symbols = Vec::with_capacity(body.len() / 4);
        for c in body.chars() {
            match self.lookup.get(&c) {
                Some(&entry) => symbols.push((c, entry)),
                None if self.settings.integrity => {
                    return Err(DecodeError::BadChar(c).into());
                }
                None => {}
            }
        }

        // Runs that do not identify a table keep the previous run's.
        let mut version = self.version;
        let mut bytes = Vec::with_capacity(symbols.len() * 5 / 4);
        for run in Runs::new(&symbols) {
            version = Self::detect_version(run)?.unwrap_or(version);
            bytes.extend(self.decode_run(run, version)?);
        }
        if self.settings.little_endian {
            bytes.reverse();
        }

        tracing::debug!(bytes = bytes.len(), %version, negative, "ecoji decode");
        Ok(EcojiDecoded {
            decoded: Decoded {
                bytes,
                negative,
            },
            version,
        })
    }

    fn split_sign<'a>(&self, input: &'a str) -> Result<(&'a str, bool)> {
        let sign_is_symbol = self.lookup.contains_key(&codec::SIGN);
        if sign_is_symbol {
            return Ok((input, false));
        }
        codec::split_sign(input, &Charset::empty(), &self.settings)
    }

    /// Decodes one run: digits, optionally followed by padding.
    fn decode_run(
        &self,
        run: &[(char, Entry)],
        version: EcojiVersion,
    ) -> Result<Vec<u8>, DecodeError> {
        let integrity = self.settings.integrity;
        let mut digits = Vec::with_capacity(run.len());
        let mut last = false;

        for (position, &(c, entry)) in run.iter().enumerate() {
            let misplaced = DecodeError::MisplacedPadding {
                symbol: c,
                position,
            };
            match entry.get(version) {
                Some(Symbol::Digit(d)) => digits.push(usize::from(d)),
                Some(Symbol::Pad(PadClass::Fill)) => {
                    if integrity && position % SYMBOLS_PER_GROUP == 0 {
                        return Err(misplaced);
                    }
                }
                Some(Symbol::Pad(PadClass::Last(bits))) => {
                    let final_slot = SYMBOLS_PER_GROUP - 1;
                    if integrity && position % SYMBOLS_PER_GROUP != final_slot {
                        return Err(misplaced);
                    }
                    if last {
                        // Only one partial byte per group.
                        continue;
                    }
                    digits.push(usize::from(bits) << 8);
                    last = true;
                }
                // Excluded by version detection.
                None => return Err(DecodeError::MixedVersions(c)),
            }
        }

        tracing::trace!(symbols = run.len(), digits = digits.len(), last, "ecoji run");
        let mut bytes = self.converter.decode_digits(digits, false)?;
        if last {
            bytes.pop();
        }
        Ok(bytes)
    }
}

impl Codec for Ecoji {
    fn encode_signed(&self, bytes: &[u8], negative: bool) -> Result<String> {
        codec::check_negative(negative, &self.settings)?;
        let bytes = codec::byte_order(bytes, self.settings.little_endian);
        let output = self.encode_bytes(&bytes);
        tracing::debug!(bytes = bytes.len(), version = %self.version, "ecoji encode");
        Ok(codec::finish(output, negative, &self.settings))
    }

    fn decode(&self, input: &str) -> Result<Decoded> {
        self.decode_with_version(input).map(|d| d.decoded)
    }
}

/// Splits symbols after each maximal run of padding from either table.
struct Runs<'a> {
    symbols: &'a [(char, Entry)],
}

impl<'a> Runs<'a> {
    fn new(symbols: &'a [(char, Entry)]) -> Self {
        Self {
            symbols,
        }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = &'a [(char, Entry)];

    fn next(&mut self) -> Option<Self::Item> {
        let symbols = self.symbols;
        if symbols.is_empty() {
            return None;
        }
        let mut end = symbols
            .iter()
            .position(|(_, e)| e.is_pad())
            .unwrap_or(symbols.len());
        while end < symbols.len() && symbols[end].1.is_pad() {
            end += 1;
        }
        let (run, rest) = symbols.split_at(end);
        self.symbols = rest;
        Some(run)
    }
}
