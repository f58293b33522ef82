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

//! Base85 in its Ascii85, Adobe, RFC 1924, and Z85 forms.
//!
//! All but RFC 1924 turn four bytes into five symbols, filling a partial
//! last block with the highest digit when decoding. RFC 1924 converts the
//! whole input as one number.

use super::block::BlockSizes;
use super::charset::Charset;
use super::charsets;
use super::codec::{self, BaseCodec, Codec, CodecConfig, Decoded};
use super::error::{ConfigError, Result};
use super::settings::Settings;
use super::wrap::{self, WrapConfig};

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const ZERO_BLOCK: &str = "!!!!!";
const ZERO_SYMBOL: char = 'z';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Base85Version {
    #[default]
    Ascii85,
    /// Ascii85 between `<~` and `~>`.
    Adobe,
    Rfc1924,
    Z85,
}

impl Base85Version {
    fn charset(self) -> &'static str {
        match self {
            Self::Ascii85 | Self::Adobe => charsets::ASCII85,
            Self::Rfc1924 => charsets::BASE85_RFC1924,
            Self::Z85 => charsets::Z85,
        }
    }

    /// Whether an all-zero block is written as `z`.
    fn abbreviates_zeros(self) -> bool {
        matches!(self, Self::Ascii85 | Self::Adobe)
    }
}

impl Display for Base85Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascii85 => "ascii85",
            Self::Adobe => "adobe",
            Self::Rfc1924 => "rfc1924",
            Self::Z85 => "z85",
        })
    }
}

impl FromStr for Base85Version {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii85" => Ok(Self::Ascii85),
            "adobe" => Ok(Self::Adobe),
            "rfc1924" => Ok(Self::Rfc1924),
            "z85" => Ok(Self::Z85),
            _ => Err(ConfigError::UnknownVersion(s.into())),
        }
    }
}

/// A Base85 codec.
#[derive(Clone, Debug)]
pub struct Base85 {
    codec: BaseCodec,
    version: Base85Version,
    wrap: WrapConfig,
}

impl Base85 {
    pub fn new(version: Base85Version, settings: Settings) -> Result<Self, ConfigError> {
        let config = CodecConfig::new(Charset::from_str(version.charset())?)
            .settings(settings);
        let config = match version {
            Base85Version::Rfc1924 => {
                config.block_sizes(BlockSizes::UNBOUNDED).leading_zeros(true)
            }
            _ => config.block_sizes(BlockSizes::new(4, 5)?).pad_digit(84),
        };
        Ok(Self {
            codec: BaseCodec::new(config)?,
            version,
            wrap: WrapConfig::new(),
        })
    }

    /// Sets how the Adobe delimiters are checked when decoding.
    pub fn wrap_config(mut self, wrap: WrapConfig) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn version(&self) -> Base85Version {
        self.version
    }
}

impl Codec for Base85 {
    fn encode_signed(&self, bytes: &[u8], negative: bool) -> Result<String> {
        let output = if self.version.abbreviates_zeros() {
            self.codec.encode_with(bytes, negative, |frame, zero_padding| {
                if zero_padding == 0 && frame == ZERO_BLOCK {
                    frame.clear();
                    frame.push(ZERO_SYMBOL);
                }
            })?
        } else {
            self.codec.encode_signed(bytes, negative)?
        };
        Ok(match self.version {
            Base85Version::Adobe => wrap::add_wrapper(&output),
            _ => output,
        })
    }

    fn decode(&self, input: &str) -> Result<Decoded> {
        let input = codec::strip_line_breaks(input);
        let body = match self.version {
            Base85Version::Adobe => wrap::remove_wrapper(&input, self.wrap)?,
            _ => &*input,
        };
        let body = if self.version.abbreviates_zeros() && body.contains(ZERO_SYMBOL) {
            Cow::Owned(body.replace(ZERO_SYMBOL, ZERO_BLOCK))
        } else {
            Cow::Borrowed(body)
        };
        tracing::trace!(version = %self.version, "base85 decode");
        self.codec.decode(&body)
    }
}
