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

mod common;

use polybase::presets::{self, Base32Version};
use polybase::{
    charsets, Base91, BlockSizes, Charset, Codec, DecodeError, EcojiVersion,
    Error, RadixConverter, Settings,
};

#[test]
fn empty_input_round_trips_everywhere() {
    let settings = Settings::new();
    let codecs: Vec<Box<dyn Codec>> = vec![
        Box::new(presets::base16(settings).unwrap()),
        Box::new(presets::base32(Base32Version::Rfc4648, settings).unwrap()),
        Box::new(presets::simple(7, settings).unwrap()),
        Box::new(common::base2048(settings)),
        Box::new(common::ecoji(EcojiVersion::V2, settings)),
        Box::new(Base91::new(Charset::from_str(charsets::BASE91).unwrap(), settings).unwrap()),
    ];
    for codec in codecs {
        assert_eq!(codec.encode(&[]).unwrap(), "");
        assert!(codec.decode("").unwrap().bytes.is_empty());
    }

    for radix in [2, 3, 16, 58, 85, 256] {
        let charset = common::run(0x100, radix);
        let converter = RadixConverter::with_radix(radix).unwrap();
        assert_eq!(converter.encode(&[], &charset, false), (String::new(), 0));
        assert_eq!(
            converter.decode("", &charset, &Charset::empty(), true, false),
            Ok(Vec::new()),
        );
    }
}

#[test]
fn single_zero_byte_in_base32() {
    let charset = Charset::from_str(charsets::BASE32_RFC3548).unwrap();
    let converter =
        RadixConverter::new(32, BlockSizes::new(5, 8).unwrap(), 0).unwrap();
    let (encoded, zero_padding) = converter.encode(&[0], &charset, false);
    assert_eq!(zero_padding, 4);
    assert_eq!(converter.pad_chars(zero_padding), 6);
    assert_eq!(encoded, "AAAAAAAA");

    let codec = presets::base32(Base32Version::Rfc3548, Settings::new()).unwrap();
    assert_eq!(codec.encode(&[0]).unwrap(), "AA======");
    assert_eq!(codec.decode("AA======").unwrap().bytes, [0]);
}

#[test]
fn base91_all_ones() {
    let codec =
        Base91::new(Charset::from_str(charsets::BASE91).unwrap(), Settings::new())
            .unwrap();
    let encoded = codec.encode(&[0xff, 0xff]).unwrap();
    assert_eq!(encoded, "B\"H");
    assert_eq!(codec.decode(&encoded).unwrap().bytes, [0xff, 0xff]);
}

#[test]
fn base2048_eight_bytes() {
    let codec = common::base2048(Settings::new());
    let bytes = *b"polybase";
    let encoded = codec.encode(&bytes).unwrap();
    assert_eq!(encoded.chars().count(), 6);
    assert_eq!(codec.decode(&encoded).unwrap().bytes, bytes);
}

#[test]
fn ecoji_trim_changes_only_length() {
    let full = common::ecoji(EcojiVersion::V1, Settings::new());
    let trimmed = common::ecoji(EcojiVersion::V1, common::with(|s| s.trim = true));

    // A whole group has no padding to trim.
    let five = *b"12345";
    let a = full.encode(&five).unwrap();
    let b = trimmed.encode(&five).unwrap();
    assert_eq!(a, b);
    assert_eq!(full.decode(&a).unwrap().bytes, five);
    assert_eq!(trimmed.decode(&b).unwrap().bytes, five);

    let six = *b"123456";
    let a = full.encode(&six).unwrap();
    let b = trimmed.encode(&six).unwrap();
    assert!(b.chars().count() < a.chars().count());
    assert!(a.starts_with(b.as_str()));
    assert_eq!(full.decode(&a).unwrap().bytes, six);
    assert_eq!(trimmed.decode(&b).unwrap().bytes, six);
    assert_eq!(full.decode(&b).unwrap().bytes, six);
}

#[test]
fn ecoji_version_exclusivity() {
    let codec = common::ecoji(EcojiVersion::V2, Settings::new());
    let v1_only: String = ['\u{4e00}', '\u{4e05}', '\u{4e0f}', '\u{4e01}'].iter().collect();
    assert_eq!(
        codec.decode_with_version(&v1_only).unwrap().version,
        EcojiVersion::V1,
    );

    let v2_only = '\u{5205}';
    let mixed: String = ['\u{4e00}', v2_only].iter().collect();
    assert_eq!(
        codec.decode(&mixed),
        Err(Error::Decode(DecodeError::MixedVersions(v2_only))),
    );
}

#[test]
fn base2048_tail_only_at_end() {
    let codec = common::base2048(Settings::new());
    // 16 bits: one full window and a 5-bit remainder.
    let encoded = codec.encode(&[0xab, 0xcd]).unwrap();
    let mut symbols: Vec<char> = encoded.chars().collect();
    assert_eq!(symbols.len(), 2);

    // 1 byte: an 8-bit remainder, still from the main alphabet.
    let one = codec.encode(&[0x01]).unwrap();
    assert_eq!(one.chars().count(), 1);

    // 7 bytes: 56 bits, five windows and a 1-bit tail symbol.
    let seven = codec.encode(&[0x11; 7]).unwrap();
    assert_eq!(codec.decode(&seven).unwrap().bytes, [0x11; 7]);
    let tail = seven.chars().last().unwrap();
    assert!(('\u{ff21}'..='\u{ff28}').contains(&tail));
    symbols.insert(0, tail);
    let misplaced: String = symbols.iter().collect();
    assert_eq!(
        codec.decode(&misplaced),
        Err(Error::Decode(DecodeError::TailBeforeEnd {
            symbol: tail,
            position: 0,
        })),
    );
}
