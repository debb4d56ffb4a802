use crate::std::string::String;
use crate::std::vec::Vec;

use log::trace;

use crate::barcode::Partial;
use crate::error::{check_case, check_chars};
use crate::msi::push_bit;
use crate::{checksum, EncodeError, EncodedBarcode, Flags, Symbology, ValidationError};

const START: &[u8] = b"031311331";
const STOP: &[u8] = b"331311313";

const TEXT_START: f64 = 16.0;
const DIGIT_WIDTH: f64 = 16.0;

fn value(c: u8) -> Option<u8> {
    match c.to_ascii_uppercase() {
        c @ b'0'..=b'9' => Some(c - b'0'),
        c @ b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

pub(crate) fn verify(text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| value(b).is_some())?;
    check_case(text)
}

/// Encode hexadecimal digits, least significant bit first, followed by the
/// eight CRC bits.
pub(crate) fn encode(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    let mut partial = Partial::new(Symbology::Plessey);
    partial.pattern(START);

    let mut values = Vec::with_capacity(text.len());
    let mut x = TEXT_START;
    for (i, &c) in text.iter().enumerate() {
        let v = value(c).ok_or(EncodeError::UnencodableCharacter(i))?;
        for bit in 0..4 {
            push_bit(&mut partial, (v >> bit) & 1 == 1);
        }
        partial.glyph(x, 12, c.to_ascii_uppercase() as char);
        x += DIGIT_WIDTH;
        values.push(v);
    }

    if !flags.no_checksum {
        let crc = checksum::plessey(&values);
        trace!("plessey: CRC {:08b}", crc.reverse_bits());
        for bit in 0..8 {
            push_bit(&mut partial, (crc >> bit) & 1 == 1);
        }
    }
    partial.pattern(STOP);

    let canonical: String = text.iter().map(|&b| b.to_ascii_uppercase() as char).collect();
    Ok(partial.finish("plessey", canonical, flags.no_text))
}

#[cfg(test)]
fn crc_bars(code: &EncodedBarcode, digits: usize) -> Vec<bool> {
    // the start pattern has four bars
    let first = 4 + 4 * digits;
    code.bars()[first..first + 8]
        .iter()
        .map(|b| b.width == 3)
        .collect()
}

#[test]
fn test_encode() {
    let code = encode(b"1234", Flags::default()).unwrap();
    // start, four nibbles, CRC, stop
    assert_eq!(code.bars().len(), 4 + 16 + 8 + 5);
    assert_eq!(code.len(), 16 + 4 * 16 + 8 * 4 + 19);
    // '1' is sent as 1000
    let first: Vec<u8> = code.bars()[4..8].iter().map(|b| b.width).collect();
    assert_eq!(first, [3, 1, 1, 1]);
    assert_eq!(
        crc_bars(&code, 4),
        [false, false, false, false, true, false, true, true]
    );
    let xs: Vec<f64> = code.glyphs().iter().map(|g| g.x).collect();
    assert_eq!(xs, [16.0, 32.0, 48.0, 64.0]);
}

#[test]
fn test_lower_case() {
    let lower = encode(b"abc", Flags::default()).unwrap();
    let upper = encode(b"ABC", Flags::default()).unwrap();
    assert_eq!(lower, upper);
    assert_eq!(verify(b"aBc"), Err(ValidationError::MixedCase));
}

#[test]
fn test_no_checksum() {
    let flags = Flags {
        no_checksum: true,
        ..Flags::default()
    };
    let code = encode(b"1234", flags).unwrap();
    assert_eq!(code.bars().len(), 4 + 16 + 5);
}
