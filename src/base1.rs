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

//! Base1: a number written as that many copies of one symbol.

use super::block::BlockSizes;
use super::charset::Charset;
use super::charsets;
use super::codec::{self, Codec, Decoded};
use super::error::{ConfigError, DecodeError, RangeError, Result};
use super::radix::RadixConverter;
use super::settings::Settings;

use std::iter::repeat;

/// The largest value [`Base1`] will encode.
pub const MAX_UNARY_LEN: usize = 1 << 30;

pub const DEFAULT_SYMBOL: char = '1';

/// A unary codec. The input bytes are read as one unsigned integer, so
/// leading zero bytes are not preserved.
#[derive(Clone, Debug)]
pub struct Base1 {
    symbol: Charset,
    decimal: Charset,
    converter: RadixConverter,
    settings: Settings,
}

impl Base1 {
    pub fn new(symbol: char, settings: Settings) -> Result<Self, ConfigError> {
        let symbol = Charset::new([symbol])?;
        codec::check_sign_symbol(&symbol, &settings)?;
        Ok(Self {
            symbol,
            decimal: Charset::from_str(&charsets::RADIX36[..10])?,
            converter: RadixConverter::new(10, BlockSizes::UNBOUNDED, 0)?,
            settings,
        })
    }

    pub fn symbol(&self) -> char {
        self.symbol.symbol(0)
    }

    fn count(&self, bytes: &[u8]) -> Result<usize, RangeError> {
        let (decimal, _) =
            self.converter
                .encode(bytes, &self.decimal, self.settings.little_endian);
        if decimal.is_empty() {
            return Ok(0);
        }
        match decimal.parse::<usize>() {
            Ok(n) if n <= MAX_UNARY_LEN => Ok(n),
            _ => Err(RangeError(format!(
                "{} exceeds the unary limit of {}",
                decimal, MAX_UNARY_LEN,
            ))),
        }
    }
}

impl Codec for Base1 {
    fn encode_signed(&self, bytes: &[u8], negative: bool) -> Result<String> {
        codec::check_negative(negative, &self.settings)?;
        let count = self.count(bytes)?;
        tracing::debug!(bytes = bytes.len(), count, "base1 encode");
        let output = repeat(self.symbol()).take(count).collect();
        Ok(codec::finish(output, negative, &self.settings))
    }

    fn decode(&self, input: &str) -> Result<Decoded> {
        let input = codec::strip_line_breaks(input);
        let (body, negative) =
            codec::split_sign(&input, &self.symbol, &self.settings)?;
        let symbol = self.symbol();
        let mut count: usize = 0;
        for c in body.chars() {
            if c == symbol {
                count += 1;
            } else if self.settings.integrity {
                return Err(DecodeError::BadChar(c).into());
            }
        }

        let bytes = if count == 0 {
            Vec::new()
        } else {
            self.converter.decode(
                &count.to_string(),
                &self.decimal,
                &Charset::empty(),
                true,
                self.settings.little_endian,
            )?
        };
        tracing::debug!(count, bytes = bytes.len(), negative, "base1 decode");
        Ok(Decoded {
            bytes,
            negative,
        })
    }
}
