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

//! Stand-in alphabets with the shapes of the real Base2048 and Ecoji
//! tables.

#![allow(dead_code)]

use polybase::{
    Base2048, Charset, Ecoji, EcojiAlphabet, EcojiVersion, Settings,
};

pub const FILL: char = '☕';

/// `len` consecutive code points starting at `start`.
pub fn run(start: u32, len: usize) -> Charset {
    Charset::new((start..start + len as u32).filter_map(char::from_u32)).unwrap()
}

pub fn base2048(settings: Settings) -> Base2048 {
    Base2048::new(run(0x4e00, 2048), run(0xff21, 8), settings).unwrap()
}

/// The v1 table starts 16 code points before v2, so each has 16 emojis
/// the other lacks.
pub fn ecoji_alphabets() -> (EcojiAlphabet, EcojiAlphabet) {
    let v1 = EcojiAlphabet::new(run(0x4e00, 1024), Charset::from_str("αβγδ").unwrap())
        .unwrap();
    let v2 = EcojiAlphabet::new(run(0x4e10, 1024), Charset::from_str("ωψχφ").unwrap())
        .unwrap();
    (v1, v2)
}

pub fn ecoji(version: EcojiVersion, settings: Settings) -> Ecoji {
    let (v1, v2) = ecoji_alphabets();
    Ecoji::new(v1, v2, FILL, version, settings).unwrap()
}

pub fn with(f: impl FnOnce(&mut Settings)) -> Settings {
    let mut settings = Settings::new();
    f(&mut settings);
    settings
}
