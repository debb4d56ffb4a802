use crate::std::string::String;
use crate::std::vec::Vec;

use crate::barcode::{Height, Partial};
use crate::error::{check_case, check_chars};
use crate::{checksum, EncodeError, EncodedBarcode, Flags, Symbology, ValidationError};

/// Ordered in decades, `A` to `D` last.
const ALPHABET: &[u8; 20] = b"0123456789-$:/.+ABCD";

#[rustfmt::skip]
const PATTERNS: [&[u8; 7]; 20] = [
    b"1111133", b"1111331", b"1113113", b"3311111", b"1131131",
    b"3111131", b"1311113", b"1311311", b"1331111", b"3113111",
    b"1113311", b"1133111", b"3111313", b"3131113", b"3131311",
    b"1131313", b"1133131", b"1313113", b"1113133", b"1113331",
];

const CODE_A: u8 = 16;
const CODE_B: u8 = 17;

const NARROW: f64 = 12.0;
const WIDE: f64 = 14.0;

fn value(c: u8) -> Option<u8> {
    let c = c.to_ascii_uppercase();
    ALPHABET.iter().position(|&a| a == c).map(|v| v as u8)
}

fn is_start_stop(c: u8) -> bool {
    matches!(c.to_ascii_uppercase(), b'A'..=b'D')
}

/// Start/stop letters, if any, must frame the data on both ends.
pub(crate) fn verify(text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| value(b).is_some())?;
    check_case(text)?;

    let last = text.len() - 1;
    let framed = is_start_stop(text[0]);
    if framed && last == 0 {
        return Err(ValidationError::WrongLength(1));
    }
    let misplaced = text
        .iter()
        .enumerate()
        .position(|(i, &b)| is_start_stop(b) != (framed && (i == 0 || i == last)));
    match misplaced {
        Some(position) => Err(ValidationError::InvalidCharacter {
            position,
            byte: text[position],
        }),
        None => Ok(()),
    }
}

fn push(partial: &mut Partial, value: u8) {
    // separator, or the margin for the first symbol
    partial.run(1, Height::Normal);
    partial.pattern(&PATTERNS[value as usize][..]);
}

/// Encode Codabar. Without explicit start/stop letters the data is framed
/// by `A` and `B`.
pub(crate) fn encode(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    let mut partial = Partial::new(Symbology::Codabar);
    let framed = text.first().map_or(false, |&c| is_start_stop(c));
    let with_check = !flags.no_checksum;

    let mut values = Vec::with_capacity(text.len() + 3);
    for (i, &c) in text.iter().enumerate() {
        values.push(value(c).ok_or(EncodeError::UnencodableCharacter(i))?);
    }
    if !framed {
        values.insert(0, CODE_A);
        values.push(CODE_B);
    }

    let check = checksum::codabar(values.iter().copied()) as u8;
    let stop = values.len() - 1;
    let mut x = if framed { 0.0 } else { WIDE };
    for (i, &v) in values.iter().enumerate() {
        if i == stop && with_check {
            push(&mut partial, check);
        }
        push(&mut partial, v);
        if framed || (i != 0 && i != stop) {
            partial.glyph(x, 12, ALPHABET[v as usize] as char);
            x += if v < 12 { NARROW } else { WIDE };
        }
    }

    let canonical: String = text.iter().map(|&b| b.to_ascii_uppercase() as char).collect();
    Ok(partial.finish("codabar", canonical, flags.no_text))
}

#[test]
fn test_patterns() {
    for (i, p) in PATTERNS.iter().enumerate() {
        let width: u32 = p.iter().map(|&w| (w - b'0') as u32).sum();
        let expected = if i < 12 { 11 } else { 13 };
        assert_eq!(width, expected, "pattern {i}");
    }
}

#[test]
fn test_verify() {
    assert_eq!(verify(b"123"), Ok(()));
    assert_eq!(verify(b"A123B"), Ok(()));
    assert_eq!(verify(b"c$5d"), Ok(()));
    assert_eq!(verify(b"a12B"), Err(ValidationError::MixedCase));
    assert_eq!(verify(b""), Err(ValidationError::EmptyInput));
    assert_eq!(verify(b"A"), Err(ValidationError::WrongLength(1)));
    // unbalanced framing
    assert_eq!(
        verify(b"A123"),
        Err(ValidationError::InvalidCharacter {
            position: 3,
            byte: b'3'
        })
    );
    assert_eq!(
        verify(b"123B"),
        Err(ValidationError::InvalidCharacter {
            position: 3,
            byte: b'B'
        })
    );
    assert_eq!(
        verify(b"A1C2B"),
        Err(ValidationError::InvalidCharacter {
            position: 2,
            byte: b'C'
        })
    );
}

#[test]
fn test_implicit_framing() {
    let implicit = encode(b"123", Flags::default()).unwrap();
    let explicit = encode(b"A123B", Flags::default()).unwrap();
    assert_eq!(implicit.bars(), explicit.bars());
    assert_eq!(implicit.text(), "123");

    // A 1 2 3 B plus check, four bars per symbol
    assert_eq!(implicit.bars().len(), 6 * 4);
    assert_eq!(implicit.margin(), 1);

    let xs: Vec<f64> = implicit.glyphs().iter().map(|g| g.x).collect();
    assert_eq!(xs, [14.0, 26.0, 38.0]);
    let xs: Vec<f64> = explicit.glyphs().iter().map(|g| g.x).collect();
    assert_eq!(xs, [0.0, 14.0, 26.0, 38.0, 50.0]);
}

#[test]
fn test_check_before_stop() {
    // sum A 1 2 3 B is 39, the check value is 9
    let code = encode(b"a123b", Flags::default()).unwrap();
    let check: Vec<u8> = code.bars()[16..20].iter().map(|b| b.width).collect();
    assert_eq!(check, [3, 1, 1, 1]);

    let flags = Flags {
        no_checksum: true,
        ..Flags::default()
    };
    assert_eq!(encode(b"a123b", flags).unwrap().bars().len(), 5 * 4);
}
