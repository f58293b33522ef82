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

//! Well-known public alphabets.

pub const BASE16: &str = "0123456789abcdef";

pub const BASE32_RFC3548: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
pub const BASE32_RFC4648: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUV";
pub const BASE32_CROCKFORD: &str = "0123456789abcdefghjkmnpqrstvwxyz";
pub const BASE32_ZBASE32: &str = "ybndrfg8ejkmcpqxot1uwisza345h769";

pub const BASE58_BITCOIN: &str =
    "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
pub const BASE58_FLICKR: &str =
    "123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

pub const BASE64_STANDARD: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
pub const BASE64_URLSAFE: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// `!` through `u`.
pub const ASCII85: &str = r##"!"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\]^_`abcdefghijklmnopqrstu"##;
pub const Z85: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";
pub const BASE85_RFC1924: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{|}~";

pub const BASE91: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&()*+,./:;<=>?@[]^_`{|}~\"";

/// Digits and lowercase letters; prefixes of this serve radixes 2 to 36.
pub const RADIX36: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Charset;

    #[test]
    fn lengths_and_uniqueness() {
        for (charset, len) in [
            (BASE16, 16),
            (BASE32_RFC3548, 32),
            (BASE32_RFC4648, 32),
            (BASE32_CROCKFORD, 32),
            (BASE32_ZBASE32, 32),
            (BASE58_BITCOIN, 58),
            (BASE58_FLICKR, 58),
            (BASE64_STANDARD, 64),
            (BASE64_URLSAFE, 64),
            (ASCII85, 85),
            (Z85, 85),
            (BASE85_RFC1924, 85),
            (BASE91, 91),
            (RADIX36, 36),
        ] {
            let parsed = Charset::from_str(charset).unwrap();
            assert_eq!(parsed.len(), len, "{}", charset);
        }
    }
}
