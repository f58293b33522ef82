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

//! Reversible byte-to-text encodings over arbitrary alphabets.
//!
//! Most codecs here are a [`RadixConverter`] with a charset: bytes are cut
//! into fixed-size blocks, each block is read as an integer, and the integer
//! is written in the target radix ([`presets`] has the usual Base16, Base32,
//! Base58, and Base64 variants). Codecs whose radix is not a good fit for
//! whole blocks pack bits directly: [`Base91`], [`Base2048`], and
//! [`Ecoji`].
//!
//! Every codec implements [`Codec`]. Options shared between codecs live in
//! [`Settings`], and alphabets are validated when a codec is built, so
//! encoding and decoding only fail on bad input.

pub mod base1;
pub mod base2048;
pub mod base85;
pub mod base91;
mod block;
mod charset;
pub mod charsets;
mod codec;
pub mod ecoji;
mod error;
pub mod presets;
mod radix;
mod settings;
pub mod wrap;

pub use base1::Base1;
pub use base2048::Base2048;
pub use base85::{Base85, Base85Version};
pub use base91::Base91;
pub use block::BlockSizes;
pub use charset::{Case, Charset};
pub use codec::{BaseCodec, Codec, CodecConfig, Decoded, SIGN};
pub use ecoji::{Ecoji, EcojiAlphabet, EcojiVersion};
pub use error::{ConfigError, DecodeError, Error, RangeError, Result};
pub use radix::RadixConverter;
pub use settings::Settings;
