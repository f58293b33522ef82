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

//! Arbitrary-radix conversion between bytes and digits.
//!
//! Bytes are grouped into blocks of [`BlockSizes::encode`] bytes; each block
//! is read as one big-endian integer and rewritten as exactly
//! [`BlockSizes::decode`] digits. The fixed width of every block is what lets
//! a decoder split its input back into blocks.

use super::block::BlockSizes;
use super::charset::Charset;
use super::error::{ConfigError, DecodeError};

use num_bigint::BigUint;
use num_integer::Integer;

/// Converts between byte sequences and digit sequences in a fixed radix.
#[derive(Clone, Debug)]
pub struct RadixConverter {
    radix: usize,
    big_radix: BigUint,
    block_sizes: BlockSizes,
    pad_digit: usize,
}

impl RadixConverter {
    /// `pad_digit` fills partial decode blocks. It is 0 for most codecs;
    /// codecs that truncate by rounding up use `radix - 1`.
    pub fn new(
        radix: usize,
        block_sizes: BlockSizes,
        pad_digit: usize,
    ) -> Result<Self, ConfigError> {
        if radix < 2 {
            return Err(ConfigError::RadixTooSmall(radix));
        }
        if pad_digit >= radix {
            return Err(ConfigError::PadDigitOutOfRange {
                digit: pad_digit,
                radix,
            });
        }
        Ok(Self {
            radix,
            big_radix: BigUint::from(radix),
            block_sizes,
            pad_digit,
        })
    }

    /// Whether every partial block survives [`Self::pad_chars`] trimming:
    /// the decoder, refilling the trimmed digits with the pad digit and
    /// dropping the bytes they cover, must get back the original bytes.
    ///
    /// With `z` zero bytes trimmed to `k` digits, the lost low part of the
    /// block is a multiple of `g = gcd(256^z, radix^k)` below `radix^k`, so
    /// the refilled value `p` must satisfy `radix^k - g <= p < 256^z`.
    pub fn trims_losslessly(&self) -> bool {
        let enc = self.block_sizes.encode();
        (1..enc).all(|zero_padding| {
            let k = self.pad_chars(zero_padding);
            if self.pad_bytes(k) != zero_padding {
                return false;
            }
            let byte_span = BigUint::from(256_u32).pow(zero_padding as u32);
            let digit_span = self.big_radix.pow(k as u32);
            let g = byte_span.gcd(&digit_span);
            let one = BigUint::from(1_u32);
            // (radix^k - 1) / (radix - 1) ones, times the pad digit.
            let filled = (&digit_span - &one) / (&self.big_radix - &one)
                * BigUint::from(self.pad_digit);
            &digit_span - &g <= filled && filled < byte_span
        })
    }

    /// A converter with block sizes from [`BlockSizes::guess`].
    pub fn with_radix(radix: usize) -> Result<Self, ConfigError> {
        Self::new(radix, BlockSizes::guess(radix), 0)
    }

    pub fn radix(&self) -> usize {
        self.radix
    }

    pub fn block_sizes(&self) -> BlockSizes {
        self.block_sizes
    }

    /// The number of symbols that only encode `zero_padding` filler bytes
    /// and can be removed from the output: trailing symbols, or leading ones
    /// for little-endian output.
    pub fn pad_chars(&self, zero_padding: usize) -> usize {
        if self.block_sizes.is_unbounded() {
            return 0;
        }
        zero_padding * self.block_sizes.decode() / self.block_sizes.encode()
    }

    /// The number of trailing bytes to drop after `pad_chars` filler digits
    /// were appended to the decoder input.
    fn pad_bytes(&self, pad_chars: usize) -> usize {
        let enc = self.block_sizes.encode();
        let dec = self.block_sizes.decode();
        (pad_chars * enc + dec - 1) / dec
    }

    /// Converts `bytes` to digits. Returns every block's digits in order and
    /// the number of zero bytes that were added to complete the last block.
    pub fn encode_digits(
        &self,
        bytes: &[u8],
        little_endian: bool,
    ) -> (Vec<usize>, usize) {
        let mut digits = Vec::new();
        let zero_padding = self.encode_frames(bytes, little_endian, |frame, _| {
            digits.extend_from_slice(frame);
        });
        (digits, zero_padding)
    }

    /// Encodes `bytes` with `charset`, returning the output and the number of
    /// zero bytes added to complete the last block.
    pub fn encode(
        &self,
        bytes: &[u8],
        charset: &Charset,
        little_endian: bool,
    ) -> (String, usize) {
        self.encode_with(bytes, charset, little_endian, |_, _| {})
    }

    /// Like [`Self::encode`], but passes each block's symbols to `replacer`
    /// before appending them. The second argument is the zero padding that
    /// belongs to that block, which is nonzero only for the last block, or
    /// the first if `little_endian` is true.
    pub fn encode_with<F>(
        &self,
        bytes: &[u8],
        charset: &Charset,
        little_endian: bool,
        mut replacer: F,
    ) -> (String, usize)
    where
        F: FnMut(&mut String, usize),
    {
        debug_assert_eq!(charset.len(), self.radix);
        let mut output = String::new();
        let mut frame = String::new();
        let zero_padding =
            self.encode_frames(bytes, little_endian, |digits, padding| {
                frame.clear();
                frame.extend(digits.iter().map(|&d| charset.symbol(d)));
                replacer(&mut frame, padding);
                output.push_str(&frame);
            });
        (output, zero_padding)
    }

    fn encode_frames<F>(
        &self,
        bytes: &[u8],
        little_endian: bool,
        mut emit: F,
    ) -> usize
    where
        F: FnMut(&[usize], usize),
    {
        if bytes.is_empty() {
            return 0;
        }

        let bs = if self.block_sizes.is_unbounded() {
            bytes.len()
        } else {
            self.block_sizes.encode()
        };
        let zero_padding = (bs - bytes.len() % bs) % bs;

        let mut padded = Vec::with_capacity(bytes.len() + zero_padding);
        if little_endian {
            padded.resize(zero_padding, 0);
            padded.extend(bytes.iter().rev());
        } else {
            padded.extend_from_slice(bytes);
            padded.resize(bytes.len() + zero_padding, 0);
        }

        // Little-endian input is padded at the front.
        let padded_block = if little_endian {
            0
        } else {
            padded.len() / bs - 1
        };
        let mut digits = Vec::with_capacity(self.block_sizes.decode());
        for (i, block) in padded.chunks(bs).enumerate() {
            let n = BigUint::from_bytes_be(block);
            digits.clear();
            if self.radix == 10 && self.block_sizes.is_unbounded() {
                digits.extend(
                    n.to_str_radix(10)
                        .bytes()
                        .map(|b| usize::from(b - b'0')),
                );
            } else {
                self.push_digits(n, &mut digits);
            }
            let padding = if i == padded_block {
                zero_padding
            } else {
                0
            };
            emit(&digits, padding);
        }
        zero_padding
    }

    /// Writes the digits of `n`, most significant first, left-padded with
    /// zeros to the decode block size.
    fn push_digits(&self, n: BigUint, digits: &mut Vec<usize>) {
        let mut reversed = Vec::new();
        let mut q = n;
        while q >= self.big_radix {
            let (next, r) = q.div_rem(&self.big_radix);
            reversed.push(small(&r));
            q = next;
        }
        reversed.push(small(&q));
        let width = self.block_sizes.decode();
        digits.extend(
            std::iter::repeat(0).take(width.saturating_sub(reversed.len())),
        );
        digits.extend(reversed.into_iter().rev());
    }

    /// Decodes `input` with `charset`. Characters outside `charset` are
    /// skipped if they are in `pad_set` or if `integrity` is false.
    pub fn decode(
        &self,
        input: &str,
        charset: &Charset,
        pad_set: &Charset,
        integrity: bool,
        little_endian: bool,
    ) -> Result<Vec<u8>, DecodeError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let mut digits = Vec::with_capacity(input.len());
        for c in input.chars() {
            match charset.digit(c) {
                Some(d) => digits.push(d),
                None if integrity && !pad_set.contains(c) => {
                    return Err(DecodeError::BadChar(c));
                }
                None => {}
            }
        }
        self.decode_digits(digits, little_endian)
    }

    /// Converts digits (each below the radix) back to bytes.
    pub fn decode_digits(
        &self,
        mut digits: Vec<usize>,
        little_endian: bool,
    ) -> Result<Vec<u8>, DecodeError> {
        if digits.is_empty() {
            return Ok(Vec::new());
        }

        let bs_enc = self.block_sizes.encode();
        let (bs, pad_chars) = if self.block_sizes.is_unbounded() {
            (digits.len(), 0)
        } else {
            let bs = self.block_sizes.decode();
            (bs, (bs - digits.len() % bs) % bs)
        };
        if little_endian {
            // Leading digits of a front-padded block are always zero.
            let tail = std::mem::take(&mut digits);
            digits = std::iter::repeat(0).take(pad_chars).chain(tail).collect();
        } else {
            digits.resize(digits.len() + pad_chars, self.pad_digit);
        }

        let mut output = Vec::with_capacity(digits.len() / bs * bs_enc.max(1));
        for block in digits.chunks(bs) {
            let n = block.iter().fold(BigUint::default(), |n, &d| {
                n * &self.big_radix + BigUint::from(d)
            });
            let bytes = n.to_bytes_be();
            if bs_enc != 0 && bytes.len() > bs_enc {
                return Err(DecodeError::BlockOverflow(bs_enc));
            }
            output.resize(output.len() + bs_enc.saturating_sub(bytes.len()), 0);
            output.extend_from_slice(&bytes);
        }

        if little_endian {
            let zeros = output.iter().take_while(|&&b| b == 0).count();
            output.drain(..zeros.min(output.len() - 1));
            output.reverse();
        } else if pad_chars > 0 {
            let drop = self.pad_bytes(pad_chars).min(output.len());
            output.truncate(output.len() - drop);
        }
        Ok(output)
    }
}

/// Converts a value known to be below the radix.
fn small(n: &BigUint) -> usize {
    n.iter_u32_digits().next().map_or(0, |d| d as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base32() -> (RadixConverter, Charset) {
        let bs = BlockSizes::new(5, 8).unwrap();
        (
            RadixConverter::new(32, bs, 0).unwrap(),
            Charset::from_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ234567").unwrap(),
        )
    }

    #[test]
    fn empty_round_trip() {
        let (conv, cs) = base32();
        assert_eq!(conv.encode(&[], &cs, false), (String::new(), 0));
        assert_eq!(
            conv.decode("", &cs, &Charset::empty(), true, false),
            Ok(Vec::new()),
        );
    }

    #[test]
    fn single_zero_byte() {
        let (conv, cs) = base32();
        let (out, zp) = conv.encode(&[0], &cs, false);
        assert_eq!(out, "AAAAAAAA");
        assert_eq!(zp, 4);
        assert_eq!(conv.pad_chars(zp), 6);
        let trimmed = &out[..out.len() - conv.pad_chars(zp)];
        assert_eq!(trimmed, "AA");
        assert_eq!(
            conv.decode(trimmed, &cs, &Charset::empty(), true, false),
            Ok(vec![0]),
        );
    }

    #[test]
    fn zero_padding_bounds() {
        let (conv, cs) = base32();
        for len in 0..=20 {
            let bytes = vec![0xa5; len];
            let (_, zp) = conv.encode(&bytes, &cs, false);
            if len % 5 == 0 {
                assert_eq!(zp, 0);
            } else {
                assert!(zp > 0 && zp < 5);
            }
        }
    }

    #[test]
    fn integrity_controls_unknown_symbols() {
        let (conv, cs) = base32();
        let pad = Charset::from_str("=").unwrap();
        assert_eq!(
            conv.decode("ME======", &cs, &pad, true, false),
            Ok(b"a".to_vec()),
        );
        assert_eq!(
            conv.decode("M*E", &cs, &pad, true, false),
            Err(DecodeError::BadChar('*')),
        );
        assert_eq!(
            conv.decode("M*E", &cs, &pad, false, false),
            Ok(b"a".to_vec()),
        );
    }

    #[test]
    fn unbounded_minimal_digits() {
        let cs = Charset::from_str("0123456789abcdef").unwrap();
        let conv = RadixConverter::new(16, BlockSizes::UNBOUNDED, 0).unwrap();
        assert_eq!(conv.encode(&[0x01, 0x00], &cs, false).0, "100");
        assert_eq!(conv.encode(&[0x00], &cs, false).0, "0");
        let empty = Charset::empty();
        assert_eq!(conv.decode("100", &cs, &empty, true, false), Ok(vec![1, 0]));
        assert_eq!(conv.decode("0", &cs, &empty, true, false), Ok(vec![0]));
    }

    #[test]
    fn decimal_path() {
        let cs = Charset::from_str("0123456789").unwrap();
        let conv = RadixConverter::new(10, BlockSizes::UNBOUNDED, 0).unwrap();
        assert_eq!(conv.encode(&[0x01, 0x00], &cs, false).0, "256");
        assert_eq!(
            conv.decode("256", &cs, &Charset::empty(), true, false),
            Ok(vec![1, 0]),
        );
    }

    #[test]
    fn little_endian_reverses() {
        let cs = Charset::from_str("0123456789abcdef").unwrap();
        let conv = RadixConverter::new(16, BlockSizes::UNBOUNDED, 0).unwrap();
        let (out, _) = conv.encode(&[0x00, 0x01], &cs, true);
        assert_eq!(out, "100");
        assert_eq!(
            conv.decode(&out, &cs, &Charset::empty(), true, true),
            Ok(vec![0x00, 0x01]),
        );
    }

    #[test]
    fn replacer_sees_block_padding() {
        let (conv, cs) = base32();
        let mut seen = Vec::new();
        conv.encode_with(&[1; 12], &cs, false, |_, zp| seen.push(zp));
        assert_eq!(seen, [0, 0, 3]);
        seen.clear();
        conv.encode_with(&[1; 12], &cs, true, |_, zp| seen.push(zp));
        assert_eq!(seen, [3, 0, 0]);
    }

    #[test]
    fn little_endian_blocks() {
        let (conv, cs) = base32();
        let (out, zp) = conv.encode(&[1, 2, 3], &cs, true);
        assert_eq!(zp, 2);
        let trimmed: String = out.chars().skip(conv.pad_chars(zp)).collect();
        assert_eq!(trimmed.len(), 5);
        assert_eq!(
            conv.decode(&trimmed, &cs, &Charset::empty(), true, true),
            Ok(vec![1, 2, 3]),
        );
    }

    #[test]
    fn overflowing_block_is_rejected() {
        let cs = Charset::from_str("0123456789abcdef").unwrap();
        let conv =
            RadixConverter::new(16, BlockSizes::new(1, 3).unwrap(), 0).unwrap();
        assert_eq!(
            conv.decode("fff", &cs, &Charset::empty(), true, false),
            Err(DecodeError::BlockOverflow(1)),
        );
    }

    #[test]
    fn lossless_trimming() {
        let lossless = |radix, enc, dec, pad| {
            RadixConverter::new(radix, BlockSizes::new(enc, dec).unwrap(), pad)
                .unwrap()
                .trims_losslessly()
        };
        assert!(lossless(32, 5, 8, 0));
        assert!(lossless(64, 3, 4, 0));
        assert!(lossless(16, 1, 2, 0));
        assert!(lossless(85, 4, 5, 84));
        assert!(!lossless(85, 4, 5, 0));
        // Three octal digits hold 9 bits, one more than a trimmed byte.
        assert!(!lossless(8, 2, 6, 0));
        assert!(!lossless(8, 2, 6, 7));
        // A lone trailing byte is too small for a whole 10-bit digit.
        assert!(!lossless(1024, 5, 4, 0));
        assert!(RadixConverter::new(58, BlockSizes::UNBOUNDED, 0)
            .unwrap()
            .trims_losslessly());
    }

    #[test]
    fn rejects_bad_configuration() {
        assert_eq!(
            RadixConverter::new(1, BlockSizes::UNBOUNDED, 0).unwrap_err(),
            ConfigError::RadixTooSmall(1),
        );
        assert_eq!(
            RadixConverter::new(16, BlockSizes::UNBOUNDED, 16).unwrap_err(),
            ConfigError::PadDigitOutOfRange {
                digit: 16,
                radix: 16,
            },
        );
    }
}
