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

//! The [`Codec`] trait and the generic radix codec, [`BaseCodec`].

use super::block::BlockSizes;
use super::charset::{Case, Charset};
use super::error::{ConfigError, Error, Result};
use super::radix::RadixConverter;
use super::settings::Settings;

use std::borrow::Cow;
use std::iter::repeat;

/// Marks a negative value in encoded output.
pub const SIGN: char = '-';

/// The result of decoding: the magnitude's bytes and whether the input was
/// marked negative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    pub bytes: Vec<u8>,
    pub negative: bool,
}

impl From<Decoded> for Vec<u8> {
    fn from(d: Decoded) -> Self {
        d.bytes
    }
}

/// A reversible byte-to-text encoding.
pub trait Codec {
    /// Encodes the magnitude `bytes`, marking the output negative if
    /// `negative` is true. Fails with [`Error::Sign`] if `negative` is true
    /// and the codec is not in signed mode.
    fn encode_signed(&self, bytes: &[u8], negative: bool) -> Result<String>;

    /// Encodes `bytes`.
    fn encode(&self, bytes: &[u8]) -> Result<String> {
        self.encode_signed(bytes, false)
    }

    /// Decodes `input`. Line breaks are ignored.
    fn decode(&self, input: &str) -> Result<Decoded>;
}

/// Everything a [`BaseCodec`] needs, built once and validated by
/// [`BaseCodec::new`].
#[derive(Clone, Debug)]
pub struct CodecConfig {
    /// Digit symbols; the radix is its length.
    pub charset: Charset,
    /// Padding symbols, skipped when decoding. The first one is emitted
    /// when [`Settings::padding`] is set.
    pub pad_set: Charset,
    pub block_sizes: BlockSizes,
    /// Digit used to fill a partial final block when decoding.
    pub pad_digit: usize,
    /// Input symbols rewritten before decoding, as `(from, to)`.
    pub aliases: Vec<(char, char)>,
    /// For unbounded block sizes, write each leading zero byte as one zero
    /// symbol instead of folding it into the number.
    pub leading_zeros: bool,
    pub settings: Settings,
}

impl CodecConfig {
    /// A config for `charset` with block sizes from [`BlockSizes::guess`]
    /// and no padding symbols.
    pub fn new(charset: Charset) -> Self {
        Self {
            block_sizes: BlockSizes::guess(charset.len()),
            charset,
            pad_set: Charset::empty(),
            pad_digit: 0,
            aliases: Vec::new(),
            leading_zeros: false,
            settings: Settings::new(),
        }
    }

    pub fn block_sizes(mut self, block_sizes: BlockSizes) -> Self {
        self.block_sizes = block_sizes;
        self
    }

    pub fn pad_set(mut self, pad_set: Charset) -> Self {
        self.pad_set = pad_set;
        self
    }

    pub fn pad_digit(mut self, digit: usize) -> Self {
        self.pad_digit = digit;
        self
    }

    pub fn alias(mut self, from: char, to: char) -> Self {
        self.aliases.push((from, to));
        self
    }

    pub fn leading_zeros(mut self, enabled: bool) -> Self {
        self.leading_zeros = enabled;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}

/// A radix codec: a [`RadixConverter`] bound to a charset and settings,
/// plus the padding, sign, and case handling around it.
#[derive(Clone, Debug)]
pub struct BaseCodec {
    config: CodecConfig,
    converter: RadixConverter,
    case: Option<Case>,
}

impl BaseCodec {
    pub fn new(config: CodecConfig) -> Result<Self, ConfigError> {
        let converter = RadixConverter::new(
            config.charset.len(),
            config.block_sizes,
            config.pad_digit,
        )?;
        if !converter.trims_losslessly() {
            let bs = config.block_sizes;
            return Err(ConfigError::LossyBlockSizes(bs.encode(), bs.decode()));
        }
        config.charset.ensure_disjoint(&config.pad_set)?;
        check_sign_symbol(&config.charset, &config.settings)?;
        Ok(Self {
            case: config.charset.case(),
            config,
            converter,
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }

    pub fn converter(&self) -> &RadixConverter {
        &self.converter
    }

    fn keeps_leading_zeros(&self) -> bool {
        let settings = &self.config.settings;
        self.config.leading_zeros
            && self.config.block_sizes.is_unbounded()
            && settings.padding
            && !settings.little_endian
    }

    /// Like [`Codec::encode_signed`], but passes every block's symbols
    /// through `replacer`; see [`RadixConverter::encode_with`].
    pub fn encode_with<F>(
        &self,
        bytes: &[u8],
        negative: bool,
        replacer: F,
    ) -> Result<String>
    where
        F: FnMut(&mut String, usize),
    {
        let settings = &self.config.settings;
        check_negative(negative, settings)?;
        let charset = &self.config.charset;

        let mut output = String::new();
        let mut body = bytes;
        if self.keeps_leading_zeros() {
            let zeros = bytes.iter().take_while(|&&b| b == 0).count();
            output.extend(repeat(charset.symbol(0)).take(zeros));
            body = &bytes[zeros..];
        }

        let (encoded, zero_padding) = self.converter.encode_with(
            body,
            charset,
            settings.little_endian,
            replacer,
        );
        let pad_chars = self.converter.pad_chars(zero_padding);
        if settings.little_endian {
            output.push_str(skip_chars(&encoded, pad_chars));
        } else {
            output.push_str(&encoded);
            truncate_chars(&mut output, pad_chars);
        }
        if let Some(pad) = self.config.pad_set.first().filter(|_| settings.padding)
        {
            output.extend(repeat(pad).take(pad_chars));
        }
        if settings.upper && self.case == Some(Case::Lower) {
            output = output.to_uppercase();
        }

        tracing::debug!(
            bytes = bytes.len(),
            zero_padding,
            symbols = output.chars().count(),
            "radix encode"
        );
        Ok(finish(output, negative, settings))
    }

    /// Applies case folding and aliases.
    fn normalize<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let charset = &self.config.charset;
        let aliases = &self.config.aliases;
        if self.case.is_none() && aliases.is_empty() {
            return Cow::Borrowed(input);
        }
        Cow::Owned(
            input
                .chars()
                .map(|c| {
                    let c = match self.case {
                        Some(case) if !charset.contains(c) => fold(c, case),
                        _ => c,
                    };
                    aliases
                        .iter()
                        .find(|(from, _)| *from == c)
                        .map_or(c, |&(_, to)| to)
                })
                .collect(),
        )
    }
}

impl Codec for BaseCodec {
    fn encode_signed(&self, bytes: &[u8], negative: bool) -> Result<String> {
        self.encode_with(bytes, negative, |_, _| {})
    }

    fn decode(&self, input: &str) -> Result<Decoded> {
        let settings = &self.config.settings;
        let charset = &self.config.charset;
        let input = strip_line_breaks(input);
        let (body, negative) = split_sign(&input, charset, settings)?;
        let body = self.normalize(body);

        let mut bytes = Vec::new();
        let mut digits = &*body;
        if self.keeps_leading_zeros() {
            let zero = charset.symbol(0);
            let count = digits.chars().take_while(|&c| c == zero).count();
            bytes.resize(count, 0);
            digits = &digits[count * zero.len_utf8()..];
        }
        bytes.extend(self.converter.decode(
            digits,
            charset,
            &self.config.pad_set,
            settings.integrity,
            settings.little_endian,
        )?);

        tracing::debug!(
            symbols = input.chars().count(),
            bytes = bytes.len(),
            negative,
            "radix decode"
        );
        Ok(Decoded {
            bytes,
            negative,
        })
    }
}

fn fold(c: char, case: Case) -> char {
    let mut folded = match case {
        Case::Lower => c.to_lowercase().collect::<Vec<_>>(),
        Case::Upper => c.to_uppercase().collect::<Vec<_>>(),
    };
    match folded.len() {
        1 => folded.remove(0),
        _ => c,
    }
}

/// Removes the last `n` chars of `s`.
pub(crate) fn truncate_chars(s: &mut String, n: usize) {
    if n == 0 {
        return;
    }
    let len = s.char_indices().rev().nth(n - 1).map_or(0, |(i, _)| i);
    s.truncate(len);
}

/// `s` without its first `n` chars.
fn skip_chars(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or("", |(i, _)| &s[i..])
}

pub(crate) fn check_sign_symbol(
    charset: &Charset,
    settings: &Settings,
) -> Result<(), ConfigError> {
    if settings.signed && charset.contains(SIGN) {
        return Err(ConfigError::SignSymbol);
    }
    Ok(())
}

pub(crate) fn check_negative(negative: bool, settings: &Settings) -> Result<()> {
    if negative && !settings.signed {
        return Err(Error::Sign);
    }
    Ok(())
}

/// Input without `\r` and `\n`.
pub(crate) fn strip_line_breaks(input: &str) -> Cow<'_, str> {
    if input.contains(|c| matches!(c, '\r' | '\n')) {
        Cow::Owned(input.chars().filter(|c| !matches!(c, '\r' | '\n')).collect())
    } else {
        Cow::Borrowed(input)
    }
}

/// Splits off a leading sign marker, unless `-` is a digit of `charset`.
pub(crate) fn split_sign<'a>(
    input: &'a str,
    charset: &Charset,
    settings: &Settings,
) -> Result<(&'a str, bool)> {
    if charset.contains(SIGN) {
        return Ok((input, false));
    }
    match input.strip_prefix(SIGN) {
        Some(_) if !settings.signed => Err(Error::Sign),
        Some(rest) => Ok((rest, true)),
        None => Ok((input, false)),
    }
}

/// Adds the sign marker and line breaks.
pub(crate) fn finish(output: String, negative: bool, settings: &Settings) -> String {
    let output = if negative {
        let mut signed = String::with_capacity(output.len() + 1);
        signed.push(SIGN);
        signed.push_str(&output);
        signed
    } else {
        output
    };
    match settings.line_wrap {
        Some(width) => wrap_lines(&output, width.get()),
        None => output,
    }
}

fn wrap_lines(s: &str, width: usize) -> String {
    let mut wrapped = String::with_capacity(s.len() + s.len() / width);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && i % width == 0 {
            wrapped.push('\n');
        }
        wrapped.push(c);
    }
    wrapped
}

/// Reverses `bytes` for little-endian bit-packing codecs, which otherwise
/// treat their input as a plain byte stream.
pub(crate) fn byte_order(bytes: &[u8], little_endian: bool) -> Cow<'_, [u8]> {
    if little_endian {
        Cow::Owned(bytes.iter().rev().copied().collect())
    } else {
        Cow::Borrowed(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use core::num::NonZeroUsize;

    fn hex(settings: Settings) -> BaseCodec {
        let config = CodecConfig::new(Charset::from_str("0123456789abcdef").unwrap())
            .block_sizes(BlockSizes::new(1, 2).unwrap())
            .settings(settings);
        BaseCodec::new(config).unwrap()
    }

    #[test]
    fn sign_requires_signed_mode() {
        let codec = hex(Settings::new());
        assert_eq!(codec.encode_signed(&[1], true), Err(Error::Sign));
        assert_eq!(codec.decode("-01"), Err(Error::Sign));

        let mut settings = Settings::new();
        settings.signed = true;
        let codec = hex(settings);
        assert_eq!(codec.encode_signed(&[1], true).unwrap(), "-01");
        assert_eq!(
            codec.decode("-01").unwrap(),
            Decoded {
                bytes: vec![1],
                negative: true,
            },
        );
    }

    #[test]
    fn signed_mode_needs_free_minus() {
        let mut settings = Settings::new();
        settings.signed = true;
        let config = CodecConfig::new(Charset::from_str("-+").unwrap())
            .settings(settings);
        assert_eq!(BaseCodec::new(config).unwrap_err(), ConfigError::SignSymbol);
    }

    #[test]
    fn case_folding() {
        let mut settings = Settings::new();
        settings.upper = true;
        let codec = hex(settings);
        assert_eq!(codec.encode(&[0xab, 0xcd]).unwrap(), "ABCD");
        assert_eq!(codec.decode("AbCd").unwrap().bytes, [0xab, 0xcd]);
    }

    #[test]
    fn line_wrapping() {
        let mut settings = Settings::new();
        settings.line_wrap = NonZeroUsize::new(4);
        let codec = hex(settings);
        let encoded = codec.encode(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(encoded, "0102\n0304\n05");
        assert_eq!(codec.decode(&encoded).unwrap().bytes, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn aliases_apply_before_lookup() {
        let config = CodecConfig::new(Charset::from_str("01").unwrap())
            .block_sizes(BlockSizes::new(1, 8).unwrap())
            .alias('o', '0')
            .alias('i', '1');
        let codec = BaseCodec::new(config).unwrap();
        assert_eq!(codec.decode("oioooooi").unwrap().bytes, [0b0100_0001]);
    }

    #[test]
    fn integrity_is_threaded_through() {
        let codec = hex(Settings::new());
        assert_eq!(
            codec.decode("0x1"),
            Err(Error::Decode(DecodeError::BadChar('x'))),
        );
        let mut settings = Settings::new();
        settings.integrity = false;
        let codec = hex(settings);
        assert_eq!(codec.decode("0x1").unwrap().bytes, [0x01]);
    }

    #[test]
    fn leading_zeros_survive() {
        let config = CodecConfig::new(Charset::from_str("0123456789abcdef").unwrap())
            .block_sizes(BlockSizes::UNBOUNDED)
            .leading_zeros(true);
        let codec = BaseCodec::new(config).unwrap();
        assert_eq!(codec.encode(&[0, 0, 0x1f]).unwrap(), "001f");
        assert_eq!(codec.encode(&[0, 0]).unwrap(), "00");
        assert_eq!(codec.decode("001f").unwrap().bytes, [0, 0, 0x1f]);
        assert_eq!(codec.decode("00").unwrap().bytes, [0, 0]);
    }

    #[test]
    fn rejects_lossy_block_sizes() {
        let config = CodecConfig::new(Charset::from_str("01234567").unwrap())
            .block_sizes(BlockSizes::new(2, 6).unwrap());
        assert_eq!(
            BaseCodec::new(config).unwrap_err(),
            ConfigError::LossyBlockSizes(2, 6),
        );
    }

    #[test]
    fn truncates_multibyte_symbols() {
        let mut s = String::from("aé😀b");
        assert_eq!(skip_chars(&s, 2), "😀b");
        assert_eq!(skip_chars(&s, 4), "");
        truncate_chars(&mut s, 2);
        assert_eq!(s, "aé");
        truncate_chars(&mut s, 5);
        assert_eq!(s, "");
    }

    #[test]
    fn little_endian_trims_leading_symbols() {
        let mut settings = Settings::new();
        settings.little_endian = true;
        let charset = Charset::from_str(crate::charsets::BASE64_STANDARD).unwrap();
        let config = CodecConfig::new(charset)
            .block_sizes(BlockSizes::new(3, 4).unwrap())
            .pad_set(Charset::from_str("=").unwrap())
            .settings(settings);
        let codec = BaseCodec::new(config).unwrap();
        // [1, 2] reversed and front-padded: [0, 2, 1] -> "AAIB".
        assert_eq!(codec.encode(&[1, 2]).unwrap(), "AIB=");
        assert_eq!(codec.decode("AIB=").unwrap().bytes, [1, 2]);
    }
}
