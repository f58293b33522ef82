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

//! Codec settings.

use core::num::NonZeroUsize;

/// Options shared by every codec. Codecs ignore options that do not apply
/// to them.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Process bytes least-significant first. [default: false]
    pub little_endian: bool,
    /// Accept and produce a leading `-` marking a negative value.
    /// [default: false]
    pub signed: bool,
    /// Emit padding symbols. For unbounded radix codecs, this also controls
    /// whether leading zero bytes are kept. [default: true]
    pub padding: bool,
    /// Reject unknown symbols when decoding instead of skipping them.
    /// [default: true]
    pub integrity: bool,
    /// Upper-case the output of charsets that have a single letter case.
    /// [default: false]
    pub upper: bool,
    /// Collapse a run of Ecoji fill padding to a single symbol.
    /// [default: false]
    pub trim: bool,
    /// Break encoded output into lines of this many symbols.
    /// [default: None]
    pub line_wrap: Option<NonZeroUsize>,
}

impl Settings {
    /// Returns the default settings.
    pub const fn new() -> Self {
        Self {
            little_endian: false,
            signed: false,
            padding: true,
            integrity: true,
            upper: false,
            trim: false,
            line_wrap: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
