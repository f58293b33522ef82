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

//! Error types shared by every codec.

use thiserror::Error;

/// An error encountered while decoding a string.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Encountered a character that is neither a charset nor a padding
    /// symbol, and integrity checking was enabled.
    #[error("bad character: {0:?}")]
    BadChar(char),
    /// A symbol from the 3-bit tail alphabet appeared before the final
    /// position.
    #[error("secondary character {symbol:?} found before end of input at {position}")]
    TailBeforeEnd {
        /// The offending tail symbol.
        symbol: char,
        /// Its index among the decoded symbols.
        position: usize,
    },
    /// A padding symbol appeared at a position its class does not allow.
    #[error("padding {symbol:?} unexpectedly seen at position {position}")]
    MisplacedPadding {
        /// The offending padding symbol.
        symbol: char,
        /// Its index within the current group run.
        position: usize,
    },
    /// Symbols unique to both emoji charset versions were found.
    #[error("emojis from different ecoji versions seen: {0:?}")]
    MixedVersions(char),
    /// A block decoded to a value wider than the block's byte width.
    #[error("block value does not fit in {0} bytes")]
    BlockOverflow(usize),
    /// The starting wrapper sequence was required but missing.
    #[error("missing start sequence ({0})")]
    MissingStart(&'static str),
    /// The ending wrapper sequence was required but missing.
    #[error("missing end sequence ({0})")]
    MissingEnd(&'static str),
    /// There was unexpected data after the ending wrapper sequence.
    #[error("unexpected data ({0:?}) after end sequence")]
    TrailingData(char),
}

/// An invalid codec configuration, reported when the codec is built.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A symbol occurs more than once in a charset.
    #[error("duplicate symbol in charset: {0:?}")]
    DuplicateSymbol(char),
    /// A charset does not have the length its codec requires.
    #[error("charset has {found} symbols, expected {expected}")]
    LengthMismatch {
        /// Required number of symbols.
        expected: usize,
        /// Number of symbols supplied.
        found: usize,
    },
    /// Radix conversion needs at least two digits.
    #[error("radix must be at least 2, got {0}")]
    RadixTooSmall(usize),
    /// A padding symbol is also a charset symbol.
    #[error("padding symbol {0:?} is also a charset symbol")]
    PadOverlap(char),
    /// The digit used to fill partial blocks is not below the radix.
    #[error("pad digit {digit} is out of range for radix {radix}")]
    PadDigitOutOfRange {
        /// The configured pad digit.
        digit: usize,
        /// The converter radix.
        radix: usize,
    },
    /// The radix has no preset alphabet.
    #[error("no preset alphabet for radix {0}")]
    UnsupportedRadix(usize),
    /// Exactly one of the block sizes was zero.
    #[error("block sizes ({0}, {1}) must both be zero or both be nonzero")]
    BlockSizes(usize, usize),
    /// Trimming a partial last block to these sizes would lose data; see
    /// [`RadixConverter::trims_losslessly`](crate::RadixConverter::trims_losslessly).
    #[error("block sizes ({0}, {1}) cannot trim a partial block without loss")]
    LossyBlockSizes(usize, usize),
    /// Signed mode needs `-` as a sign marker, but `-` is a charset symbol.
    #[error("signed mode is unavailable: '-' is a charset symbol")]
    SignSymbol,
    /// No charset is registered under this name.
    #[error("unknown charset version: {0}")]
    UnknownVersion(String),
}

/// A magnitude the algorithm cannot represent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RangeError(pub String);

/// Top-level error returned by [`Codec`](crate::Codec) operations.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The input could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A negative value was given to or found by a codec that is not in
    /// signed mode.
    #[error("negative values require signed mode")]
    Sign,
    /// See [`RangeError`].
    #[error(transparent)]
    Range(#[from] RangeError),
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Alias of <code>[Result]\<T, E></code> with `E` defaulting to [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
