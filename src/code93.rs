use crate::std::vec::Vec;

use crate::barcode::{Height, Partial};
use crate::code39::{self, FULL_ASCII};
use crate::error::check_chars;
use crate::{checksum, EncodeError, EncodedBarcode, Flags, Symbology, ValidationError};

/// Bar/space widths, indexed by code value.
///
/// Values `0..=42` share the Code 39 character set, `43..=46` are the
/// shifts `($)`, `(%)`, `(/)` and `(+)`, and `47` is start/stop.
#[rustfmt::skip]
const PATTERNS: [&[u8; 6]; 48] = [
    b"131112", b"111213", b"111312", b"111411", b"121113", b"121212",
    b"121311", b"111114", b"131211", b"141111", b"211113", b"211212",
    b"211311", b"221112", b"221211", b"231111", b"112113", b"112212",
    b"112311", b"122112", b"132111", b"111123", b"111222", b"111321",
    b"121122", b"131121", b"212112", b"212211", b"211122", b"211221",
    b"221121", b"222111", b"112122", b"112221", b"122121", b"123111",
    b"121131", b"311112", b"311211", b"321111", b"112131", b"113121",
    b"211131", b"121221", b"312111", b"311121", b"122211", b"111141",
];

const START_STOP: u8 = 47;

const TEXT_START: f64 = 22.0;
/// Glyph advance per input character, even when it takes two symbols.
const TEXT_ADVANCE: f64 = 9.0;

fn shift(c: u8) -> Option<u8> {
    match c {
        b'$' => Some(43),
        b'%' => Some(44),
        b'/' => Some(45),
        b'+' => Some(46),
        _ => None,
    }
}

/// Code values of one input byte, one or two of them.
fn values(c: u8) -> Option<([u8; 2], usize)> {
    if let Some(v) = code39::value(c) {
        return Some(([v, 0], 1));
    }
    match *FULL_ASCII.get(c as usize)? {
        &[s, base] => Some(([shift(s)?, code39::value(base)?], 2)),
        _ => None,
    }
}

pub(crate) fn verify(text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| b.is_ascii())
}

fn push(partial: &mut Partial, value: u8) -> Result<(), EncodeError> {
    let pattern = PATTERNS
        .get(value as usize)
        .ok_or(EncodeError::Internal("code 93 value out of range"))?;
    partial.pattern(&pattern[..]);
    Ok(())
}

/// Encode full ASCII as Code 93.
///
/// Both check characters are always present.
pub(crate) fn encode(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    let mut partial = Partial::new(Symbology::Code93);
    partial.run(0, Height::Normal);
    push(&mut partial, START_STOP)?;

    let mut codes = Vec::with_capacity(text.len() * 2);
    let mut x = TEXT_START;
    for (i, &c) in text.iter().enumerate() {
        let (v, n) = values(c).ok_or(EncodeError::UnencodableCharacter(i))?;
        for &v in &v[..n] {
            push(&mut partial, v)?;
            codes.push(v);
        }
        if c.is_ascii_graphic() || c == b' ' {
            partial.glyph(x, 12, c as char);
        }
        x += TEXT_ADVANCE;
    }

    let (c, k) = checksum::code93(&codes);
    push(&mut partial, c as u8)?;
    push(&mut partial, k as u8)?;
    push(&mut partial, START_STOP)?;
    // termination bar
    partial.run(1, Height::Normal);

    let canonical = text.iter().map(|&b| b as char).collect();
    Ok(partial.finish("code 93", canonical, flags.no_text))
}

#[test]
fn test_patterns() {
    for (i, p) in PATTERNS.iter().enumerate() {
        let width: u32 = p.iter().map(|&w| (w - b'0') as u32).sum();
        assert_eq!(width, 9, "pattern {i}");
    }
}

#[test]
fn test_values() {
    assert_eq!(values(b'A'), Some(([10, 0], 1)));
    assert_eq!(values(b'$'), Some(([39, 0], 1)));
    // lower case uses (+)
    assert_eq!(values(b'a'), Some(([46, 10], 2)));
    assert_eq!(values(b'k'), Some(([46, 20], 2)));
    assert_eq!(values(b'l'), Some(([46, 21], 2)));
    // NUL is (%)U
    assert_eq!(values(0), Some(([44, 30], 2)));
    assert_eq!(values(b'!'), Some(([45, 10], 2)));
    assert_eq!(values(0x80), None);
}

#[test]
fn test_encode() {
    let code = encode(b"TEST93", Flags::default()).unwrap();
    // margin, start, 6 symbols, C, K, stop, each 9 wide, plus the final bar
    assert_eq!(code.len(), 10 * 9 + 1);
    assert_eq!(code.bars().len(), 10 * 3 + 1);
    let last = code.bars().last().unwrap();
    assert_eq!((last.width, last.space), (1, 0));

    // C is 41 ('+'), K is 6
    let check: Vec<(u8, u8)> = code.bars()[21..27]
        .iter()
        .map(|b| (b.width, b.space))
        .collect();
    assert_eq!(check, [(1, 1), (3, 1), (2, 1), (1, 2), (1, 3), (1, 1)]);

    assert_eq!(code.glyphs().len(), 6);
    assert_eq!(code.glyphs()[1].x, 31.0);
}

#[test]
fn test_checksum_is_mandatory() {
    let flags = Flags {
        no_checksum: true,
        ..Flags::default()
    };
    assert_eq!(
        encode(b"abc", flags).unwrap().bars(),
        encode(b"abc", Flags::default()).unwrap().bars()
    );
}

#[test]
fn test_verify() {
    assert_eq!(verify(b"Hello\x01"), Ok(()));
    assert_eq!(verify(b""), Err(ValidationError::EmptyInput));
    assert_eq!(
        verify(b"a\xff"),
        Err(ValidationError::InvalidCharacter {
            position: 1,
            byte: 0xff
        })
    );
}
