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

//! The `<~` and `~>` delimiters around Adobe-style Ascii85 data.

use super::error::DecodeError;

pub const START: &str = "<~";
pub const END: &str = "~>";

/// How strictly [`remove_wrapper`] checks the delimiters.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrapConfig {
    /// Whether to require the wrapping `<~` and `~>` to be present.
    /// [default: true]
    pub require_wrapper: bool,
    /// If true, trailing data after the ending `~>` will be ignored, rather
    /// than causing an error. Additionally, if `require_wrapper` is true,
    /// extra data before the starting `<~` will also be ignored.
    /// [default: false]
    pub relaxed: bool,
}

impl WrapConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            require_wrapper: true,
            relaxed: false,
        }
    }
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn add_wrapper(body: &str) -> String {
    let mut wrapped = String::with_capacity(START.len() + body.len() + END.len());
    wrapped.push_str(START);
    wrapped.push_str(body);
    wrapped.push_str(END);
    wrapped
}

/// Returns the data between the delimiters.
pub fn remove_wrapper(input: &str, config: WrapConfig) -> Result<&str, DecodeError> {
    let body = if let Some(rest) = input.strip_prefix(START) {
        rest
    } else if config.require_wrapper && config.relaxed {
        match input.find(START) {
            Some(i) => &input[i + START.len()..],
            None => return Err(DecodeError::MissingStart(START)),
        }
    } else if config.require_wrapper {
        return Err(DecodeError::MissingStart(START));
    } else {
        input
    };

    match body.find(END) {
        Some(i) => {
            let trailing = &body[i + END.len()..];
            match trailing.chars().next() {
                Some(c) if !config.relaxed => Err(DecodeError::TrailingData(c)),
                _ => Ok(&body[..i]),
            }
        }
        None if config.require_wrapper => Err(DecodeError::MissingEnd(END)),
        None => Ok(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(require_wrapper: bool, relaxed: bool) -> WrapConfig {
        let mut config = WrapConfig::new();
        config.require_wrapper = require_wrapper;
        config.relaxed = relaxed;
        config
    }

    #[test]
    fn strict() {
        let strict = WrapConfig::new();
        assert_eq!(remove_wrapper("<~abc~>", strict), Ok("abc"));
        assert_eq!(remove_wrapper("<~~>", strict), Ok(""));
        assert_eq!(
            remove_wrapper("abc~>", strict),
            Err(DecodeError::MissingStart(START)),
        );
        assert_eq!(
            remove_wrapper("<~abc", strict),
            Err(DecodeError::MissingEnd(END)),
        );
        assert_eq!(
            remove_wrapper("<~abc~>d", strict),
            Err(DecodeError::TrailingData('d')),
        );
    }

    #[test]
    fn relaxed() {
        let relaxed = config(true, true);
        assert_eq!(remove_wrapper("%!PS <~abc~> junk", relaxed), Ok("abc"));
        assert_eq!(
            remove_wrapper("abc", relaxed),
            Err(DecodeError::MissingStart(START)),
        );
    }

    #[test]
    fn optional_wrapper() {
        let optional = config(false, false);
        assert_eq!(remove_wrapper("abc", optional), Ok("abc"));
        assert_eq!(remove_wrapper("<~abc", optional), Ok("abc"));
        assert_eq!(remove_wrapper("abc~>", optional), Ok("abc"));
        assert_eq!(
            remove_wrapper("abc~>x", optional),
            Err(DecodeError::TrailingData('x')),
        );
    }

    #[test]
    fn wraps() {
        assert_eq!(add_wrapper("87cURDZ"), "<~87cURDZ~>");
    }
}
