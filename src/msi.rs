use crate::std::string::String;
use crate::std::vec::Vec;

use crate::barcode::{Height, Partial};
use crate::error::check_chars;
use crate::{checksum, EncodeError, EncodedBarcode, Flags, Symbology, ValidationError};

const START: &[u8] = b"031";
const STOP: &[u8] = b"131";

const TEXT_START: f64 = 6.0;
/// Four bits of four modules each.
const DIGIT_WIDTH: f64 = 16.0;

/// Append one bit as a narrow-wide (0) or wide-narrow (1) pair.
pub(crate) fn push_bit(partial: &mut Partial, bit: bool) {
    let (bar, space) = if bit { (3, 1) } else { (1, 3) };
    partial.run(bar, Height::Normal);
    partial.run(space, Height::Normal);
}

/// Append a digit, most significant bit first.
fn push_digit(partial: &mut Partial, digit: u8) {
    for shift in (0..4).rev() {
        push_bit(partial, (digit >> shift) & 1 == 1);
    }
}

pub(crate) fn verify(text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| b.is_ascii_digit())
}

pub(crate) fn encode(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    let mut partial = Partial::new(Symbology::Msi);
    partial.pattern(START);

    let mut digits = Vec::with_capacity(text.len());
    let mut x = TEXT_START;
    for (i, &c) in text.iter().enumerate() {
        if !c.is_ascii_digit() {
            return Err(EncodeError::UnencodableCharacter(i));
        }
        let digit = c - b'0';
        push_digit(&mut partial, digit);
        partial.glyph(x, 12, c as char);
        x += DIGIT_WIDTH;
        digits.push(digit);
    }
    if !flags.no_checksum {
        push_digit(&mut partial, checksum::msi(&digits) as u8);
    }
    partial.pattern(STOP);

    let canonical: String = text.iter().map(|&b| b as char).collect();
    Ok(partial.finish("msi", canonical, flags.no_text))
}

#[test]
fn test_digit_groups() {
    // start, two digits, check, stop
    let code = encode(b"12", Flags::default()).unwrap();
    assert_eq!(code.len(), 3 + 3 * 16 + 5);
    assert_eq!(code.bars().len(), 1 + 3 * 4 + 2);

    // '1' is 0001, '2' is 0010
    let bits: Vec<u8> = code.bars()[1..9].iter().map(|b| b.width).collect();
    assert_eq!(bits, [1, 1, 1, 3, 1, 1, 3, 1]);
    // 2 * 2 + 1 = 5, check 5 is 0101
    let check: Vec<u8> = code.bars()[9..13].iter().map(|b| b.width).collect();
    assert_eq!(check, [1, 3, 1, 3]);

    assert!(code.bars().iter().all(|b| b.height == Height::Normal));
    let xs: Vec<f64> = code.glyphs().iter().map(|g| g.x).collect();
    assert_eq!(xs, [6.0, 22.0]);
}

#[test]
fn test_no_checksum() {
    let flags = Flags {
        no_checksum: true,
        ..Flags::default()
    };
    let code = encode(b"12", flags).unwrap();
    assert_eq!(code.len(), 3 + 2 * 16 + 5);
}

#[test]
fn test_verify() {
    assert_eq!(verify(b"80523"), Ok(()));
    assert_eq!(verify(b""), Err(ValidationError::EmptyInput));
    assert!(verify(b"12A").is_err());
}
