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

//! Named constructors for the common radix codecs.

use super::block::BlockSizes;
use super::charset::Charset;
use super::charsets;
use super::codec::{BaseCodec, CodecConfig};
use super::error::ConfigError;
use super::radix::RadixConverter;
use super::settings::Settings;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Implements `Display` and `FromStr` for a version enum from a table of
/// names.
macro_rules! version_names {
    ($ty:ident { $($variant:ident => $name:literal,)+ }) => {
        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => $name,)+
                })
            }
        }

        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(ConfigError::UnknownVersion(s.into())),
                }
            }
        }
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Base32Version {
    #[default]
    Rfc3548,
    /// The "extended hex" alphabet.
    Rfc4648,
    Crockford,
    Zbase32,
}

version_names!(Base32Version {
    Rfc3548 => "rfc3548",
    Rfc4648 => "rfc4648",
    Crockford => "crockford",
    Zbase32 => "zbase32",
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Base58Version {
    #[default]
    Bitcoin,
    Flickr,
}

version_names!(Base58Version {
    Bitcoin => "bitcoin",
    Flickr => "flickr",
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Base64Version {
    #[default]
    Standard,
    UrlSafe,
}

version_names!(Base64Version {
    Standard => "standard",
    UrlSafe => "urlsafe",
});

fn charset(s: &str) -> Result<Charset, ConfigError> {
    Charset::from_str(s)
}

fn equals() -> Result<Charset, ConfigError> {
    charset("=")
}

/// Hexadecimal, lowercase output, either case accepted.
pub fn base16(settings: Settings) -> Result<BaseCodec, ConfigError> {
    BaseCodec::new(
        CodecConfig::new(charset(charsets::BASE16)?)
            .block_sizes(BlockSizes::new(1, 2)?)
            .settings(settings),
    )
}

pub fn base32(
    version: Base32Version,
    settings: Settings,
) -> Result<BaseCodec, ConfigError> {
    let config = match version {
        Base32Version::Rfc3548 => {
            CodecConfig::new(charset(charsets::BASE32_RFC3548)?).pad_set(equals()?)
        }
        Base32Version::Rfc4648 => {
            CodecConfig::new(charset(charsets::BASE32_RFC4648)?).pad_set(equals()?)
        }
        Base32Version::Crockford => {
            CodecConfig::new(charset(charsets::BASE32_CROCKFORD)?)
                .alias('o', '0')
                .alias('i', '1')
                .alias('l', '1')
        }
        Base32Version::Zbase32 => {
            CodecConfig::new(charset(charsets::BASE32_ZBASE32)?)
        }
    };
    BaseCodec::new(config.block_sizes(BlockSizes::new(5, 8)?).settings(settings))
}

/// Base58 keeps each leading zero byte as one zero symbol.
pub fn base58(
    version: Base58Version,
    settings: Settings,
) -> Result<BaseCodec, ConfigError> {
    let symbols = match version {
        Base58Version::Bitcoin => charsets::BASE58_BITCOIN,
        Base58Version::Flickr => charsets::BASE58_FLICKR,
    };
    BaseCodec::new(
        CodecConfig::new(charset(symbols)?)
            .block_sizes(BlockSizes::UNBOUNDED)
            .leading_zeros(true)
            .settings(settings),
    )
}

pub fn base64(
    version: Base64Version,
    settings: Settings,
) -> Result<BaseCodec, ConfigError> {
    let symbols = match version {
        Base64Version::Standard => charsets::BASE64_STANDARD,
        Base64Version::UrlSafe => charsets::BASE64_URLSAFE,
    };
    BaseCodec::new(
        CodecConfig::new(charset(symbols)?)
            .block_sizes(BlockSizes::new(3, 4)?)
            .pad_set(equals()?)
            .settings(settings),
    )
}

/// Plain positional notation in `radix` (2 to 36) with digits `0-9a-z`.
/// The whole input is one number.
pub fn simple(radix: usize, settings: Settings) -> Result<BaseCodec, ConfigError> {
    if radix < 2 {
        return Err(ConfigError::RadixTooSmall(radix));
    }
    let symbols = charsets::RADIX36
        .get(..radix)
        .ok_or(ConfigError::UnsupportedRadix(radix))?;
    BaseCodec::new(
        CodecConfig::new(charset(symbols)?)
            .block_sizes(BlockSizes::UNBOUNDED)
            .settings(settings),
    )
}

/// A codec for an arbitrary alphabet, with block sizes from
/// [`BlockSizes::guess`] and an optional padding symbol.
///
/// Partial blocks are refilled with the lowest digit, or with the highest
/// if only that decodes them exactly. If neither does, the whole input is
/// converted as one number. Unbounded codecs keep leading zero bytes, as
/// in Base58.
pub fn custom(
    symbols: &str,
    pad: Option<char>,
    settings: Settings,
) -> Result<BaseCodec, ConfigError> {
    let mut config = CodecConfig::new(charset(symbols)?)
        .leading_zeros(true)
        .settings(settings);
    if let Some(pad) = pad {
        config = config.pad_set(Charset::new([pad])?);
    }
    let radix = config.charset.len();
    let max_digit = radix.saturating_sub(1);
    for pad_digit in [0, max_digit] {
        let converter = RadixConverter::new(radix, config.block_sizes, pad_digit)?;
        if converter.trims_losslessly() {
            return BaseCodec::new(config.pad_digit(pad_digit));
        }
    }
    tracing::debug!(radix, "guessed block sizes are lossy; using one block");
    BaseCodec::new(config.block_sizes(BlockSizes::UNBOUNDED))
}
