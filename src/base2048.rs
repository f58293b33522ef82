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

//! Base2048: 11 bits per symbol, with a separate 8-symbol alphabet for a
//! final window of at most 3 bits.

use super::charset::Charset;
use super::codec::{self, Codec, Decoded};
use super::error::{ConfigError, DecodeError, Result};
use super::settings::Settings;

const BITS_PER_CHAR: u32 = 11;
const BITS_PER_TAIL_CHAR: u32 = 3;
const BITS_PER_BYTE: u32 = 8;

pub const CHARSET_LEN: usize = 1 << BITS_PER_CHAR;
pub const TAIL_LEN: usize = 1 << BITS_PER_TAIL_CHAR;

/// A Base2048 codec.
#[derive(Clone, Debug)]
pub struct Base2048 {
    charset: Charset,
    tail: Charset,
    settings: Settings,
}

impl Base2048 {
    /// `charset` must have 2048 symbols and `tail` 8, with no symbol in
    /// both.
    pub fn new(
        charset: Charset,
        tail: Charset,
        settings: Settings,
    ) -> Result<Self, ConfigError> {
        charset.ensure_len(CHARSET_LEN)?;
        tail.ensure_len(TAIL_LEN)?;
        charset.ensure_disjoint(&tail)?;
        codec::check_sign_symbol(&charset, &settings)?;
        codec::check_sign_symbol(&tail, &settings)?;
        Ok(Self {
            charset,
            tail,
            settings,
        })
    }

    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        let bits = bytes.len() as u64 * u64::from(BITS_PER_BYTE);
        let mut output = String::with_capacity(
            (bits / u64::from(BITS_PER_CHAR)) as usize * 3 + 4,
        );
        let mut z: usize = 0;
        let mut z_bits: u32 = 0;

        for &byte in bytes {
            for i in (0..BITS_PER_BYTE).rev() {
                z = (z << 1) | usize::from((byte >> i) & 1);
                z_bits += 1;
                if z_bits == BITS_PER_CHAR {
                    output.push(self.charset.symbol(z));
                    z = 0;
                    z_bits = 0;
                }
            }
        }

        if z_bits != 0 {
            let (set, width) = if z_bits <= BITS_PER_TAIL_CHAR {
                (&self.tail, BITS_PER_TAIL_CHAR)
            } else {
                (&self.charset, BITS_PER_CHAR)
            };
            while z_bits < width {
                z = (z << 1) | 1;
                z_bits += 1;
            }
            output.push(set.symbol(z));
        }
        output
    }

    /// Unpacks symbols into bytes. A tail symbol anywhere but last is an
    /// error; unknown symbols are an error if `integrity` is true and are
    /// skipped otherwise.
    pub fn decode_str(
        &self,
        input: &str,
        integrity: bool,
    ) -> Result<Vec<u8>, DecodeError> {
        let symbols: Vec<char> = if integrity {
            input.chars().collect()
        } else {
            input
                .chars()
                .filter(|&c| self.charset.contains(c) || self.tail.contains(c))
                .collect()
        };

        let mut output = Vec::with_capacity(symbols.len() * 11 / 8);
        let mut byte: u8 = 0;
        let mut byte_bits: u32 = 0;

        for (i, &c) in symbols.iter().enumerate() {
            let (z, width) = if let Some(z) = self.charset.digit(c) {
                (z, BITS_PER_CHAR)
            } else if let Some(z) = self.tail.digit(c) {
                if i + 1 != symbols.len() {
                    return Err(DecodeError::TailBeforeEnd {
                        symbol: c,
                        position: i,
                    });
                }
                (z, BITS_PER_TAIL_CHAR)
            } else {
                return Err(DecodeError::BadChar(c));
            };

            for j in (0..width).rev() {
                byte = (byte << 1) | ((z >> j) & 1) as u8;
                byte_bits += 1;
                if byte_bits == BITS_PER_BYTE {
                    output.push(byte);
                    byte = 0;
                    byte_bits = 0;
                }
            }
        }
        // Any remaining bits are the encoder's 1-bit padding.
        Ok(output)
    }
}

impl Codec for Base2048 {
    fn encode_signed(&self, bytes: &[u8], negative: bool) -> Result<String> {
        codec::check_negative(negative, &self.settings)?;
        let bytes = codec::byte_order(bytes, self.settings.little_endian);
        let output = self.encode_bytes(&bytes);
        tracing::debug!(bytes = bytes.len(), "base2048 encode");
        Ok(codec::finish(output, negative, &self.settings))
    }

    fn decode(&self, input: &str) -> Result<Decoded> {
        let input = codec::strip_line_breaks(input);
        let (body, negative) =
            codec::split_sign(&input, &self.charset, &self.settings)?;
        let mut bytes = self.decode_str(body, self.settings.integrity)?;
        if self.settings.little_endian {
            bytes.reverse();
        }
        tracing::debug!(bytes = bytes.len(), negative, "base2048 decode");
        Ok(Decoded {
            bytes,
            negative,
        })
    }
}
