use crate::std::string::String;
use crate::std::vec::Vec;

use crate::barcode::{Height, Partial};
use crate::error::check_chars;
use crate::{checksum, EncodeError, EncodedBarcode, Flags, Symbology, ValidationError};

/// Five widths per digit, two of them wide.
const CODES: [&[u8; 5]; 10] = [
    b"11331", b"31113", b"13113", b"33111", b"11313", b"31311", b"13311", b"11133", b"31131",
    b"13131",
];

const START: &[u8] = b"a1a1";
const STOP: &[u8] = b"c1a";

const TEXT_START: f64 = 4.0;
/// Width of one interleaved pair.
const PAIR_WIDTH: f64 = 18.0;

pub(crate) fn verify(text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| b.is_ascii_digit())
}

/// Digit values padded with a leading zero to an even count, check digit
/// included.
fn digits(text: &[u8], with_check: bool) -> Vec<u8> {
    let mut digits = Vec::with_capacity(text.len() + 2);
    if (text.len() + with_check as usize) % 2 == 1 {
        digits.push(0);
    }
    digits.extend(text.iter().map(|b| b - b'0'));
    if with_check {
        digits.push(checksum::interleaved_2of5(&digits) as u8);
    }
    digits
}

/// Encode interleaved 2 of 5. The check digit is encoded but not printed.
pub(crate) fn encode(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    if let Some(i) = text.iter().position(|b| !b.is_ascii_digit()) {
        return Err(EncodeError::UnencodableCharacter(i));
    }
    let with_check = !flags.no_checksum;
    let digits = digits(text, with_check);

    let mut partial = Partial::new(Symbology::Interleaved2of5);
    partial.run(0, Height::Normal);
    partial.pattern(START);

    let mut x = TEXT_START;
    for (i, pair) in digits.chunks(2).enumerate() {
        let (first, second) = match *pair {
            [a, b] => (a, b),
            _ => return Err(EncodeError::Internal("odd digit count")),
        };
        let bars = CODES[first as usize];
        let spaces = CODES[second as usize];
        for (&bar, &space) in bars.iter().zip(spaces.iter()) {
            partial.run(bar - b'0', Height::Normal);
            partial.run(space - b'0', Height::Normal);
        }

        partial.glyph(x, 12, (b'0' + first) as char);
        let is_check = with_check && 2 * i + 2 == digits.len();
        if !is_check {
            partial.glyph(x + PAIR_WIDTH / 2.0, 12, (b'0' + second) as char);
        }
        x += PAIR_WIDTH;
    }
    partial.pattern(STOP);

    let canonical: String = digits.iter().map(|d| (b'0' + d) as char).collect();
    Ok(partial.finish("interleaved 2 of 5", canonical, flags.no_text))
}

#[test]
fn test_padding() {
    assert_eq!(digits(b"1234", false), [1, 2, 3, 4]);
    assert_eq!(digits(b"123", false), [0, 1, 2, 3]);
    // 3 * (1 + 3) + 2 = 14
    assert_eq!(digits(b"123", true), [1, 2, 3, 6]);
    // 3 * (4 + 2 + 0) + 3 + 1 = 22
    assert_eq!(digits(b"1234", true), [0, 1, 2, 3, 4, 8]);
}

#[test]
fn test_encode() {
    let code = encode(b"123", Flags::default()).unwrap();
    assert_eq!(code.text(), "1236");
    // start 4, two pairs of 18, stop 5
    assert_eq!(code.len(), 4 + 2 * 18 + 5);
    assert_eq!(code.bars().first().unwrap().height, Height::Tall);
    assert_eq!(code.bars().last().unwrap().height, Height::Tall);
    assert_eq!(code.bars().last().unwrap().space, 0);

    let glyphs: Vec<(f64, char)> = code.glyphs().iter().map(|g| (g.x, g.ch)).collect();
    assert_eq!(glyphs, [(4.0, '1'), (13.0, '2'), (22.0, '3')]);
}

#[test]
fn test_interleave() {
    let code = encode(b"10", Flags {
        no_checksum: true,
        ..Flags::default()
    })
    .unwrap();
    assert_eq!(code.text(), "10");
    // '1' in the bars, '0' in the spaces
    let pair: Vec<(u8, u8)> = code.bars()[2..7]
        .iter()
        .map(|b| (b.width, b.space))
        .collect();
    assert_eq!(pair, [(3, 1), (1, 1), (1, 3), (1, 3), (3, 1)]);
}

#[test]
fn test_verify() {
    assert_eq!(verify(b"0123"), Ok(()));
    assert_eq!(verify(b""), Err(ValidationError::EmptyInput));
    assert!(verify(b"12a").is_err());
}
