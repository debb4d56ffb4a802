use crate::std::string::String;
use crate::std::vec::Vec;

use crate::barcode::{Height, Partial};
use crate::error::{check_case, check_chars};
use crate::{checksum, EncodeError, EncodedBarcode, Flags, Symbology, ValidationError};

/// Bars of the first four decades; `1` comes first, `0` last.
const BARS: [&[u8; 5]; 10] = [
    b"31113", b"13113", b"33111", b"11313", b"31311", b"13311", b"11133", b"31131", b"13131",
    b"11331",
];
/// Spaces per decade.
const SPACES: [&[u8; 4]; 4] = [b"1311", b"1131", b"1113", b"3111"];
/// Spaces of `$`, `/`, `+` and `%`, whose bars are all narrow.
const SPECIAL_SPACES: [&[u8; 4]; 4] = [b"3331", b"3313", b"3133", b"1333"];

const START_STOP: u8 = 43;

/// Width of a symbol including the leading gap.
const SYMBOL_WIDTH: f64 = 16.0;
const TEXT_START: f64 = 22.0;

/// Full ASCII as pairs of Code 39 characters. Single characters encode
/// themselves.
///
/// Code 93 uses the same pairs with its dedicated shift symbols.
#[rustfmt::skip]
pub(crate) const FULL_ASCII: [&[u8]; 128] = [
    b"%U", b"$A", b"$B", b"$C", b"$D", b"$E", b"$F", b"$G",
    b"$H", b"$I", b"$J", b"$K", b"$L", b"$M", b"$N", b"$O",
    b"$P", b"$Q", b"$R", b"$S", b"$T", b"$U", b"$V", b"$W",
    b"$X", b"$Y", b"$Z", b"%A", b"%B", b"%C", b"%D", b"%E",
    b" ",  b"/A", b"/B", b"/C", b"/D", b"/E", b"/F", b"/G",
    b"/H", b"/I", b"/J", b"/K", b"/L", b"-",  b".",  b"/O",
    b"0",  b"1",  b"2",  b"3",  b"4",  b"5",  b"6",  b"7",
    b"8",  b"9",  b"/Z", b"%F", b"%G", b"%H", b"%I", b"%J",
    b"%V", b"A",  b"B",  b"C",  b"D",  b"E",  b"F",  b"G",
    b"H",  b"I",  b"J",  b"K",  b"L",  b"M",  b"N",  b"O",
    b"P",  b"Q",  b"R",  b"S",  b"T",  b"U",  b"V",  b"W",
    b"X",  b"Y",  b"Z",  b"%K", b"%L", b"%M", b"%N", b"%O",
    b"%W", b"+A", b"+B", b"+C", b"+D", b"+E", b"+F", b"+G",
    b"+H", b"+I", b"+J", b"+K", b"+L", b"+M", b"+N", b"+O",
    b"+P", b"+Q", b"+R", b"+S", b"+T", b"+U", b"+V", b"+W",
    b"+X", b"+Y", b"+Z", b"%P", b"%Q", b"%R", b"%S", b"%T",
];

/// Check value of an upper case character, `0..=42`.
pub(crate) fn value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'Z' => Some(c - b'A' + 10),
        b'-' => Some(36),
        b'.' => Some(37),
        b' ' => Some(38),
        b'$' => Some(39),
        b'/' => Some(40),
        b'+' => Some(41),
        b'%' => Some(42),
        _ => None,
    }
}

/// Widths of a symbol, bar first.
fn symbol(value: u8) -> [u8; 9] {
    let (bars, spaces) = match value {
        0..=9 => (BARS[(value as usize + 9) % 10], SPACES[0]),
        10..=38 => (BARS[value as usize % 10], SPACES[value as usize / 10]),
        START_STOP => (BARS[9], SPACES[3]),
        _ => (b"11111", SPECIAL_SPACES[value as usize - 39]),
    };
    let mut widths = [0; 9];
    for i in 0..5 {
        widths[2 * i] = bars[i] - b'0';
    }
    for i in 0..4 {
        widths[2 * i + 1] = spaces[i] - b'0';
    }
    widths
}

pub(crate) fn verify(text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| value(b.to_ascii_uppercase()).is_some())?;
    check_case(text)
}

pub(crate) fn verify_extended(text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| b.is_ascii())
}

fn start(symbology: Symbology) -> Partial {
    let mut partial = Partial::new(symbology);
    partial.run(0, Height::Normal);
    partial.widths_as(&symbol(START_STOP), Height::Tall);
    partial
}

fn push(partial: &mut Partial, value: u8) {
    partial.run(1, Height::Normal);
    partial.widths(&symbol(value));
}

/// The check character is mandatory and ignores [`Flags::no_checksum`].
fn finish(mut partial: Partial, values: &[u8]) -> Partial {
    push(&mut partial, checksum::code39(values.iter().copied()) as u8);
    partial.run(1, Height::Normal);
    partial.widths_as(&symbol(START_STOP), Height::Tall);
    partial
}

/// Encode Code 39, folding lower case to upper case.
pub(crate) fn encode(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    let mut partial = start(Symbology::Code39);
    let mut values = Vec::with_capacity(text.len());
    let mut canonical = String::with_capacity(text.len());
    let mut x = TEXT_START;
    for (i, &c) in text.iter().enumerate() {
        let c = c.to_ascii_uppercase();
        let v = value(c).ok_or(EncodeError::UnencodableCharacter(i))?;
        push(&mut partial, v);
        partial.glyph(x, 12, c as char);
        x += SYMBOL_WIDTH;
        values.push(v);
        canonical.push(c as char);
    }
    let partial = finish(partial, &values);
    Ok(partial.finish("code 39", canonical, flags.no_text))
}

/// Encode full ASCII using shift pairs.
pub(crate) fn encode_extended(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    let mut partial = start(Symbology::Code39Extended);
    let mut values = Vec::with_capacity(text.len() * 2);
    let mut x = TEXT_START;
    for (i, &c) in text.iter().enumerate() {
        let pair = FULL_ASCII
            .get(c as usize)
            .ok_or(EncodeError::UnencodableCharacter(i))?;
        if c.is_ascii_graphic() || c == b' ' {
            partial.glyph(x, 12, c as char);
        }
        for &p in pair.iter() {
            let v = value(p).ok_or(EncodeError::Internal("full ASCII table"))?;
            push(&mut partial, v);
            values.push(v);
            x += SYMBOL_WIDTH;
        }
    }
    let partial = finish(partial, &values);
    let canonical = text.iter().map(|&b| b as char).collect();
    Ok(partial.finish("code 39 extended", canonical, flags.no_text))
}

#[test]
fn test_symbol_widths() {
    for v in 0..=START_STOP {
        let widths = symbol(v);
        let wide = widths.iter().filter(|&&w| w == 3).count();
        assert_eq!(wide, 3, "value {v}");
        assert_eq!(widths.iter().map(|&w| w as u32).sum::<u32>(), 15);
    }
    // '*' is the well known n w n n W n W n n
    assert_eq!(symbol(START_STOP), [1, 3, 1, 1, 3, 1, 3, 1, 1]);
    // '1' is W n n w n n n n W, 'A' moves the wide space
    assert_eq!(symbol(1), [3, 1, 1, 3, 1, 1, 1, 1, 3]);
    assert_eq!(symbol(10), [3, 1, 1, 1, 1, 3, 1, 1, 3]);
    // '0' is n n n w W n W n n
    assert_eq!(symbol(0), [1, 1, 1, 3, 3, 1, 3, 1, 1]);
}

#[test]
fn test_symbols_unique() {
    let all: Vec<_> = (0..=START_STOP).map(symbol).collect();
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_verify() {
    assert_eq!(verify(b"CODE39"), Ok(()));
    assert_eq!(verify(b"code39"), Ok(()));
    assert_eq!(verify(b"aBc"), Err(ValidationError::MixedCase));
    assert_eq!(verify(b""), Err(ValidationError::EmptyInput));
    assert_eq!(
        verify(b"AB*"),
        Err(ValidationError::InvalidCharacter {
            position: 2,
            byte: b'*'
        })
    );
    assert_eq!(verify_extended(b"Hello, World!"), Ok(()));
    assert!(verify_extended(b"caf\xe9").is_err());
}

#[test]
fn test_encode_layout() {
    let code = encode(b"CODE39", Flags::default()).unwrap();
    assert_eq!(code.text(), "CODE39");
    // start + 6 + check + stop, five bars each
    assert_eq!(code.bars().len(), 5 * 9);
    assert_eq!(code.len(), 15 + 8 * 16);
    assert_eq!(code.bars()[0].height, Height::Tall);
    assert_eq!(code.bars()[5].height, Height::Normal);
    assert_eq!(code.bars().last().unwrap().height, Height::Tall);
    // check character is 'W', value 32
    let check: Vec<u8> = code.bars()[35..40].iter().map(|b| b.width).collect();
    let expected = symbol(32);
    assert_eq!(check, [expected[0], expected[2], expected[4], expected[6], expected[8]]);

    let glyphs: Vec<char> = code.glyphs().iter().map(|g| g.ch).collect();
    assert_eq!(glyphs, ['C', 'O', 'D', 'E', '3', '9']);
    assert_eq!(code.glyphs()[0].x, 22.0);
    assert_eq!(code.glyphs()[5].x, 22.0 + 5.0 * 16.0);
}

#[test]
fn test_checksum_is_mandatory() {
    let flags = Flags {
        no_checksum: true,
        ..Flags::default()
    };
    let code = encode(b"CODE39", flags).unwrap();
    assert_eq!(code, encode(b"CODE39", Flags::default()).unwrap());
}

#[test]
fn test_extended() {
    let code = encode_extended(b"a!", Flags::default()).unwrap();
    // start, "+A", "/A", check, stop
    assert_eq!(code.bars().len(), 5 * 7);
    assert_eq!(code.glyphs().len(), 2);
    assert_eq!(code.glyphs()[1].x, 22.0 + 32.0);
    // checksum over + A / A = 41 + 10 + 40 + 10
    let check: Vec<u8> = code.bars()[25..30].iter().map(|b| b.width).collect();
    let expected = symbol((41 + 10 + 40 + 10) % 43);
    assert_eq!(check, [expected[0], expected[2], expected[4], expected[6], expected[8]]);
}

#[test]
fn test_full_ascii_table() {
    for (i, pair) in FULL_ASCII.iter().enumerate() {
        assert!(pair.iter().all(|&p| value(p).is_some()), "entry {i}");
        if pair.len() == 1 {
            assert_eq!(pair[0], i as u8);
        }
    }
}
