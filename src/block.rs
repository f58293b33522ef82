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

//! Block sizes for radix conversion.

use super::error::ConfigError;

/// How many bytes form one conversion block, and how many symbols that block
/// becomes.
///
/// `(0, 0)` is the unbounded case: the whole input is a single integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSizes {
    encode: usize,
    decode: usize,
}

impl BlockSizes {
    /// Treat the entire input as one arbitrarily large integer.
    pub const UNBOUNDED: Self = Self {
        encode: 0,
        decode: 0,
    };

    /// Fails unless both sizes are zero or both are nonzero.
    pub fn new(encode: usize, decode: usize) -> Result<Self, ConfigError> {
        if (encode == 0) != (decode == 0) {
            return Err(ConfigError::BlockSizes(encode, decode));
        }
        Ok(Self {
            encode,
            decode,
        })
    }

    /// Bytes per block (`bsEnc`).
    pub fn encode(self) -> usize {
        self.encode
    }

    /// Symbols per block (`bsDec`).
    pub fn decode(self) -> usize {
        self.decode
    }

    pub fn is_unbounded(self) -> bool {
        self.encode == 0
    }

    /// Derives block sizes for `radix`.
    ///
    /// The decode block must hold enough symbols for 256 byte states; that
    /// target is reduced by factors of 8 while it stays above 8, then the
    /// smallest byte count reaching it is taken. Radix 10 is unbounded.
    ///
    /// The result feeds the padding arithmetic of every codec built on it,
    /// so the floating-point steps below must not be reordered.
    pub fn guess(radix: usize) -> Self {
        if radix == 10 {
            return Self::UNBOUNDED;
        }

        let mut target = if radix < 8 {
            radix
        } else {
            (256 + radix - 1) / radix
        };
        while target > 8 && target % 8 == 0 {
            target /= 8;
        }

        let symbols = |bytes: usize| {
            ((bytes * 8) as f64 * 2_f64.ln()) / (radix as f64).ln()
        };
        let mut encode = 0;
        while symbols(encode) < target as f64 {
            encode += 1;
        }
        Self {
            encode,
            decode: symbols(encode).ceil() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_half_unbounded() {
        assert_eq!(BlockSizes::new(0, 4), Err(ConfigError::BlockSizes(0, 4)));
        assert_eq!(BlockSizes::new(3, 0), Err(ConfigError::BlockSizes(3, 0)));
        assert!(BlockSizes::new(0, 0).unwrap().is_unbounded());
    }

    #[test]
    fn guesses_known_radixes() {
        let guess = |r| {
            let bs = BlockSizes::guess(r);
            (bs.encode(), bs.decode())
        };
        assert_eq!(guess(2), (1, 8));
        assert_eq!(guess(3), (1, 6));
        assert_eq!(guess(5), (2, 7));
        assert_eq!(guess(8), (2, 6));
        assert_eq!(guess(16), (1, 2));
        assert_eq!(guess(58), (4, 6));
        assert_eq!(guess(256), (1, 1));
        assert_eq!(guess(1024), (2, 2));
        assert_eq!(guess(10), (0, 0));
    }
}
