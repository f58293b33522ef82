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

//! basE91: a 91-symbol bit packer with a variable 13/14-bit window.
//!
//! 91² = 8281 covers every 13-bit value, with 89 values to spare. A 13-bit
//! window whose value is one of the lowest 89 is widened to 14 bits; the
//! decoder recognizes the widened case because its value mod 8192 is then
//! at most 88.

use super::charset::Charset;
use super::codec::{self, Codec, Decoded};
use super::error::{ConfigError, DecodeError, Result};
use super::settings::Settings;

const RADIX: u32 = 91;

/// 13-bit windows below this value are widened to 14 bits.
const WIDEN_BELOW: u32 = 89;

const MASK_13: u32 = (1 << 13) - 1;
const MASK_14: u32 = (1 << 14) - 1;

/// The window width the encoder chose for a 13-bit value `r`.
pub fn window_bits(r: u32) -> u32 {
    if r & MASK_13 < WIDEN_BELOW {
        14
    } else {
        13
    }
}

/// A basE91 codec.
#[derive(Clone, Debug)]
pub struct Base91 {
    charset: Charset,
    settings: Settings,
}

impl Base91 {
    /// `charset` must have exactly 91 symbols.
    pub fn new(charset: Charset, settings: Settings) -> Result<Self, ConfigError> {
        charset.ensure_len(RADIX as usize)?;
        codec::check_sign_symbol(&charset, &settings)?;
        Ok(Self {
            charset,
            settings,
        })
    }

    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    fn push_pair(&self, output: &mut String, r: u32) {
        output.push(self.charset.symbol((r % RADIX) as usize));
        output.push(self.charset.symbol((r / RADIX) as usize));
    }

    /// Packs `bytes` into symbols.
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        let mut output = String::with_capacity(bytes.len() * 16 / 13 + 2);
        let mut n: u32 = 0;
        let mut bit_count: u32 = 0;

        for &byte in bytes {
            n |= u32::from(byte) << bit_count;
            bit_count += 8;
            if bit_count > 13 {
                let mut r = n & MASK_13;
                let width = window_bits(r);
                if width == 14 {
                    r = n & MASK_14;
                }
                n >>= width;
                bit_count -= width;
                self.push_pair(&mut output, r);
            }
        }

        if bit_count > 0 {
            output.push(self.charset.symbol((n % RADIX) as usize));
            if bit_count > 7 || n > RADIX - 1 {
                output.push(self.charset.symbol((n / RADIX) as usize));
            }
        }
        output
    }

    /// Unpacks symbols into bytes. Unknown symbols are an error if
    /// `integrity` is true and are skipped otherwise.
    pub fn decode_str(
        &self,
        input: &str,
        integrity: bool,
    ) -> Result<Vec<u8>, DecodeError> {
        let mut output = Vec::with_capacity(input.len() * 14 / 16);
        let mut n: u32 = 0;
        let mut bit_count: u32 = 0;
        let mut pending: Option<u32> = None;

        for c in input.chars() {
            let d = match self.charset.digit(c) {
                Some(d) => d as u32,
                None if integrity => return Err(DecodeError::BadChar(c)),
                None => continue,
            };
            let low = match pending.take() {
                Some(low) => low,
                None => {
                    pending = Some(d);
                    continue;
                }
            };
            let r = low + d * RADIX;
            n |= r << bit_count;
            bit_count += if r & MASK_13 > WIDEN_BELOW - 1 {
                13
            } else {
                14
            };
            while bit_count > 7 {
                output.push(n as u8);
                n >>= 8;
                bit_count -= 8;
            }
        }

        if let Some(low) = pending {
            output.push(((low << bit_count) | n) as u8);
        }
        Ok(output)
    }
}

impl Codec for Base91 {
    fn encode_signed(&self, bytes: &[u8], negative: bool) -> Result<String> {
        codec::check_negative(negative, &self.settings)?;
        let bytes = codec::byte_order(bytes, self.settings.little_endian);
        let output = self.encode_bytes(&bytes);
        tracing::debug!(bytes = bytes.len(), symbols = output.len(), "base91 encode");
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
        tracing::debug!(bytes = bytes.len(), negative, "base91 decode");
        Ok(Decoded {
            bytes,
            negative,
        })
    }
}
