//! EAN-13, EAN-8, UPC-A, UPC-E and ISBN with optional add-on codes.
//!
//! All of them share the digit table below. Left hand digits start with a
//! space and use either the odd (L) or the mirrored even (G) parity, right
//! hand digits start with a bar.

use crate::std::string::String;
use crate::std::vec::Vec;

use crate::barcode::{Height, Partial};
use crate::error::check_chars;
use crate::{checksum, EncodeError, EncodedBarcode, Flags, Symbology, ValidationError};

/// Space/bar widths of the odd parity set.
const DIGITS: [&[u8; 4]; 10] = [
    b"3211", b"2221", b"2122", b"1411", b"1132", b"1231", b"1114", b"1312", b"1213", b"3112",
];

/// Even parity positions of the six left digits of EAN-13, keyed by the
/// leading digit. The most significant bit is the leftmost digit.
const EAN13_PARITY: [u8; 10] = [
    0b000000, 0b001011, 0b001101, 0b001110, 0b010011, 0b011001, 0b011100, 0b010101, 0b010110,
    0b011010,
];

/// Even parity positions of UPC-E with number system 0, keyed by the check
/// digit. Number system 1 uses the complement. The five digit add-on uses
/// the lower five bits keyed by its own check digit.
const UPCE_PARITY: [u8; 10] = [
    0b111000, 0b110100, 0b110010, 0b110001, 0b101100, 0b100110, 0b100011, 0b101010, 0b101001,
    0b100101,
];

const START: &[u8] = b"a1a";
const MIDDLE: &[u8] = b"1a1a1";
const END: &[u8] = b"a1a";
const UPCE_END: &[u8] = b"1a1a1a";
const ADDON_START: &[u8] = b"9112";
const ADDON_SEPARATOR: &[u8] = b"11";

/// Space left of the code for the leading digit.
const LEAD: u8 = 9;
const DIGIT_WIDTH: u32 = 7;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Kind {
    Ean13,
    Ean8,
    UpcA,
    UpcE,
    Isbn,
}

/// Validated digits, check digit included.
///
/// UPC-E is stored as number system, six data digits and check digit.
#[derive(Debug, PartialEq, Eq, Clone)]
struct Normalized {
    kind: Kind,
    digits: Vec<u8>,
    addon: Vec<u8>,
}

impl Normalized {
    fn symbology(&self) -> Symbology {
        match self.kind {
            Kind::Ean13 => Symbology::Ean13,
            Kind::Ean8 => Symbology::Ean8,
            Kind::UpcA => Symbology::UpcA,
            Kind::UpcE => Symbology::UpcE,
            Kind::Isbn => Symbology::Isbn,
        }
    }

    fn name(&self) -> &'static str {
        match (self.kind, self.addon.len()) {
            (Kind::Ean13, 2) => "EAN-13+2",
            (Kind::Ean13, 5) => "EAN-13+5",
            (Kind::Ean13, _) => "EAN-13",
            (Kind::Ean8, 2) => "EAN-8+2",
            (Kind::Ean8, 5) => "EAN-8+5",
            (Kind::Ean8, _) => "EAN-8",
            (Kind::UpcA, 2) => "UPC-A+2",
            (Kind::UpcA, 5) => "UPC-A+5",
            (Kind::UpcA, _) => "UPC-A",
            (Kind::UpcE, 2) => "UPC-E+2",
            (Kind::UpcE, 5) => "UPC-E+5",
            (Kind::UpcE, _) => "UPC-E",
            (Kind::Isbn, 5) => "ISBN+5",
            (Kind::Isbn, _) => "ISBN",
        }
    }

    fn text(&self) -> String {
        let mut text = digits_to_string(&self.digits);
        if !self.addon.is_empty() {
            text.push(' ');
            text.push_str(&digits_to_string(&self.addon));
        }
        text
    }
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

/// Separate `"<code> <add-on>"`.
fn split_addon(text: &[u8]) -> Result<(&[u8], &[u8]), ValidationError> {
    match text.iter().position(|&b| b == b' ') {
        None => {
            let empty: &[u8] = &[];
            Ok((text, empty))
        }
        Some(space) => {
            let addon = &text[space + 1..];
            let digits = addon.iter().all(u8::is_ascii_digit);
            if !digits || !(addon.len() == 2 || addon.len() == 5) {
                return Err(ValidationError::MalformedAddOn);
            }
            Ok((&text[..space], addon))
        }
    }
}

/// Append the check digit of a code of `len` digits, or verify it if
/// present.
fn complete(mut digits: Vec<u8>, len: usize) -> Result<Vec<u8>, ValidationError> {
    let expected = checksum::upc_ean(&digits[..len - 1]) as u8;
    if digits.len() == len {
        let found = digits[len - 1];
        if found != expected {
            return Err(ValidationError::ChecksumMismatch { expected, found });
        }
    } else {
        digits.push(expected);
    }
    Ok(digits)
}

/// UPC-E data digits to the eleven UPC-A digits without check digit.
fn expand(ns: u8, e: &[u8]) -> [u8; 11] {
    let (m, p) = match e[5] {
        d @ 0..=2 => ([e[0], e[1], d, 0, 0], [0, 0, e[2], e[3], e[4]]),
        3 => ([e[0], e[1], e[2], 0, 0], [0, 0, 0, e[3], e[4]]),
        4 => ([e[0], e[1], e[2], e[3], 0], [0, 0, 0, 0, e[4]]),
        d => ([e[0], e[1], e[2], e[3], e[4]], [0, 0, 0, 0, d]),
    };
    let mut a = [0; 11];
    a[0] = ns;
    a[1..6].copy_from_slice(&m);
    a[6..].copy_from_slice(&p);
    a
}

/// Inverse of [`expand`], `None` if the manufacturer and product codes
/// have too few zeros.
fn contract(a: &[u8]) -> Option<(u8, [u8; 6])> {
    let ns = a[0];
    if ns > 1 {
        return None;
    }
    let (m, p) = (&a[1..6], &a[6..11]);
    let e = if m[2] <= 2 && m[3..] == [0, 0] && p[..2] == [0, 0] {
        [m[0], m[1], p[2], p[3], p[4], m[2]]
    } else if m[3..] == [0, 0] && p[..3] == [0, 0, 0] {
        [m[0], m[1], m[2], p[3], p[4], 3]
    } else if m[4] == 0 && p[..4] == [0, 0, 0, 0] {
        [m[0], m[1], m[2], m[3], p[4], 4]
    } else if p[..4] == [0, 0, 0, 0] && p[4] >= 5 {
        [m[0], m[1], m[2], m[3], m[4], p[4]]
    } else {
        return None;
    };
    Some((ns, e))
}

/// Number system, six digits and the check digit of the expanded code.
fn upc_e_digits(ns: u8, six: &[u8], check: Option<u8>) -> Result<Vec<u8>, ValidationError> {
    let expected = checksum::upc_ean(&expand(ns, six)) as u8;
    if let Some(found) = check {
        if found != expected {
            return Err(ValidationError::ChecksumMismatch { expected, found });
        }
    }
    let mut digits = Vec::with_capacity(8);
    digits.push(ns);
    digits.extend_from_slice(six);
    digits.push(expected);
    Ok(digits)
}

/// Number system, data digits and check digit of a short UPC-E.
///
/// Seven digits are the number system and the data when they start with 0
/// or 1, otherwise the data and the check digit in number system 0.
fn upc_e_parts(d: &[u8]) -> Option<(u8, &[u8], Option<u8>)> {
    match d.len() {
        6 => Some((0, d, None)),
        7 if d[0] <= 1 => Some((d[0], &d[1..], None)),
        7 => Some((0, &d[..6], Some(d[6]))),
        8 => Some((d[0], &d[1..7], Some(d[7]))),
        _ => None,
    }
}

fn short_upc_e(main: &[u8], digits: &[u8]) -> Result<Vec<u8>, ValidationError> {
    let (ns, six, check) =
        upc_e_parts(digits).ok_or(ValidationError::WrongLength(digits.len()))?;
    if ns > 1 {
        return Err(ValidationError::InvalidCharacter {
            position: 0,
            byte: main[0],
        });
    }
    upc_e_digits(ns, six, check)
}

fn compress(digits: Vec<u8>) -> Result<Vec<u8>, ValidationError> {
    let n = digits.len();
    let a = complete(digits, 12)?;
    let (ns, six) = contract(&a[..11]).ok_or(ValidationError::WrongLength(n))?;
    upc_e_digits(ns, &six, None)
}

/// Nine ISBN digits as EAN-13 with the `978` prefix. Hyphens are ignored,
/// a trailing ISBN check character is accepted but not verified.
fn isbn(main: &[u8]) -> Result<Vec<u8>, ValidationError> {
    let mut digits = Vec::with_capacity(13);
    digits.extend_from_slice(&[9, 7, 8]);
    let chars = main.iter().enumerate().filter(|&(_, &b)| b != b'-');
    let mut count = 0;
    for (i, (position, &byte)) in chars.enumerate() {
        let check = i == 9 && matches!(byte, b'X' | b'x');
        if !byte.is_ascii_digit() && !check {
            return Err(ValidationError::InvalidCharacter { position, byte });
        }
        if i < 9 {
            digits.push(byte - b'0');
        }
        count += 1;
    }
    if count != 9 && count != 10 {
        return Err(ValidationError::WrongLength(count));
    }
    complete(digits, 13)
}

fn normalize(symbology: Symbology, text: &[u8]) -> Result<Normalized, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    let (main, addon) = split_addon(text)?;
    let addon: Vec<u8> = addon.iter().map(|b| b - b'0').collect();
    if symbology == Symbology::Isbn {
        if addon.len() == 2 {
            return Err(ValidationError::MalformedAddOn);
        }
        return Ok(Normalized {
            kind: Kind::Isbn,
            digits: isbn(main)?,
            addon,
        });
    }

    check_chars(main, |b| b.is_ascii_digit())?;
    let digits: Vec<u8> = main.iter().map(|b| b - b'0').collect();
    let n = digits.len();
    let (kind, digits) = match (symbology, n) {
        (Symbology::Ean | Symbology::Ean13, 12 | 13) => (Kind::Ean13, complete(digits, 13)?),
        (Symbology::Ean | Symbology::Ean8, 7 | 8) => (Kind::Ean8, complete(digits, 8)?),
        (Symbology::Upc | Symbology::UpcA, 11 | 12) => (Kind::UpcA, complete(digits, 12)?),
        (Symbology::Upc | Symbology::UpcE, 6..=8) => (Kind::UpcE, short_upc_e(main, &digits)?),
        (Symbology::UpcE, 11 | 12) => (Kind::UpcE, compress(digits)?),
        _ => return Err(ValidationError::WrongLength(n)),
    };
    Ok(Normalized {
        kind,
        digits,
        addon,
    })
}

pub(crate) fn verify(symbology: Symbology, text: &[u8]) -> Result<(), ValidationError> {
    normalize(symbology, text).map(|_| ())
}

fn push_digit(partial: &mut Partial, digit: u8, mirror: bool, height: Height) {
    let widths = DIGITS[digit as usize];
    if mirror {
        for &w in widths.iter().rev() {
            partial.run(w - b'0', height);
        }
    } else {
        for &w in widths.iter() {
            partial.run(w - b'0', height);
        }
    }
}

fn digit_char(digit: u8) -> char {
    (b'0' + digit) as char
}

/// Left hand digits with glyphs. Bit `n - 1 - i` of `parity` mirrors digit
/// `i`.
fn left(partial: &mut Partial, digits: &[u8], parity: u8) {
    let n = digits.len();
    for (i, &d) in digits.iter().enumerate() {
        let mirror = (parity >> (n - 1 - i)) & 1 == 1;
        partial.glyph(partial.cursor() as f64, 12, digit_char(d));
        push_digit(partial, d, mirror, Height::Normal);
    }
}

fn right(partial: &mut Partial, digits: &[u8]) {
    for &d in digits {
        partial.glyph(partial.cursor() as f64, 12, digit_char(d));
        push_digit(partial, d, false, Height::Normal);
    }
}

fn ean13(partial: &mut Partial, d: &[u8]) {
    partial.run(LEAD, Height::Normal);
    partial.pattern(START);
    partial.glyph(0.0, 12, digit_char(d[0]));
    left(partial, &d[1..7], EAN13_PARITY[d[0] as usize]);
    partial.pattern(MIDDLE);
    right(partial, &d[7..13]);
    partial.pattern(END);
}

/// EAN-13 with an implicit leading zero. The outer digits are printed
/// smaller beside the code and their bars are drawn as guards.
fn upc_a(partial: &mut Partial, d: &[u8]) {
    partial.run(LEAD, Height::Normal);
    partial.pattern(START);
    partial.glyph(0.0, 10, digit_char(d[0]));
    push_digit(partial, d[0], false, Height::Tall);
    left(partial, &d[1..6], 0);
    partial.pattern(MIDDLE);
    right(partial, &d[6..11]);
    let x = partial.cursor() + DIGIT_WIDTH + 6;
    push_digit(partial, d[11], false, Height::Tall);
    partial.pattern(END);
    partial.glyph(x as f64, 10, digit_char(d[11]));
}

fn upc_e(partial: &mut Partial, d: &[u8]) {
    let (ns, check) = (d[0], d[7]);
    let parity = match ns {
        0 => UPCE_PARITY[check as usize],
        _ => !UPCE_PARITY[check as usize] & 0b111111,
    };
    partial.run(LEAD, Height::Normal);
    partial.pattern(START);
    partial.glyph(0.0, 10, digit_char(ns));
    left(partial, &d[1..7], parity);
    let x = partial.cursor() + 10;
    partial.pattern(UPCE_END);
    partial.glyph(x as f64, 10, digit_char(check));
}

fn ean8(partial: &mut Partial, d: &[u8]) {
    partial.run(0, Height::Normal);
    partial.pattern(START);
    left(partial, &d[..4], 0);
    partial.pattern(MIDDLE);
    right(partial, &d[4..8]);
    partial.pattern(END);
}

/// Two or five digits right of the main code, text above.
fn addon(partial: &mut Partial, d: &[u8]) {
    let parity = if d.len() == 2 {
        (d[0] * 10 + d[1]) % 4
    } else {
        UPCE_PARITY[checksum::ean_addon5(d) as usize] & 0b11111
    };
    partial.above();
    partial.pattern(ADDON_START);
    for (i, &digit) in d.iter().enumerate() {
        if i > 0 {
            partial.pattern(ADDON_SEPARATOR);
        }
        let mirror = (parity >> (d.len() - 1 - i)) & 1 == 1;
        partial.glyph(partial.cursor() as f64, 12, digit_char(digit));
        push_digit(partial, digit, mirror, Height::Normal);
    }
}

/// Encode any member of the family; `symbology` picks the validation rules.
pub(crate) fn encode(
    symbology: Symbology,
    text: &[u8],
    flags: Flags,
) -> Result<EncodedBarcode, EncodeError> {
    let code = normalize(symbology, text)?;
    let mut partial = Partial::new(code.symbology());
    match code.kind {
        Kind::Ean13 | Kind::Isbn => ean13(&mut partial, &code.digits),
        Kind::Ean8 => ean8(&mut partial, &code.digits),
        Kind::UpcA => upc_a(&mut partial, &code.digits),
        Kind::UpcE => upc_e(&mut partial, &code.digits),
    }
    if !code.addon.is_empty() {
        addon(&mut partial, &code.addon);
    }
    Ok(partial.finish(code.name(), code.text(), flags.no_text))
}

fn parse_digits(text: &str) -> Option<Vec<u8>> {
    let bytes = text.as_bytes();
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(bytes.iter().map(|b| b - b'0').collect())
}

/// Expand a zero suppressed UPC-E code to UPC-A.
///
/// The input is the six data digits, optionally preceded by the number
/// system (0 or 1) and followed by the check digit. Seven digits not
/// starting with 0 or 1 are the data and the check digit. The result has
/// twelve digits including the check digit. `None` if the input is
/// malformed or its check digit is wrong.
///
/// ```
/// assert_eq!(glbarcode::upc_e_to_a("04252614").as_deref(), Some("042100005264"));
/// ```
pub fn upc_e_to_a(upc_e: &str) -> Option<String> {
    let d = parse_digits(upc_e)?;
    let (ns, six, check) = upc_e_parts(&d)?;
    if ns > 1 {
        return None;
    }
    let e = upc_e_digits(ns, six, check).ok()?;
    let mut a = expand(ns, six).to_vec();
    a.push(e[7]);
    Some(digits_to_string(&a))
}

/// Compress a UPC-A code of eleven or twelve digits to the eight digit
/// UPC-E form, if its manufacturer and product codes allow it.
///
/// ```
/// assert_eq!(glbarcode::upc_a_to_e("04210000526").as_deref(), Some("04252614"));
/// assert_eq!(glbarcode::upc_a_to_e("4006381333931"), None);
/// ```
pub fn upc_a_to_e(upc_a: &str) -> Option<String> {
    let d = parse_digits(upc_a)?;
    if d.len() != 11 && d.len() != 12 {
        return None;
    }
    let a = complete(d, 12).ok()?;
    let (ns, six) = contract(&a[..11])?;
    let mut e = Vec::with_capacity(8);
    e.push(ns);
    e.extend_from_slice(&six);
    e.push(a[11]);
    Some(digits_to_string(&e))
}

#[test]
fn test_check_digit_round_trip() {
    let code = normalize(Symbology::Ean13, b"400638133393").unwrap();
    assert_eq!(code.text(), "4006381333931");
    assert!(normalize(Symbology::Ean13, b"4006381333931").is_ok());
    assert_eq!(
        normalize(Symbology::Ean13, b"4006381333932"),
        Err(ValidationError::ChecksumMismatch {
            expected: 1,
            found: 2
        })
    );
}

#[test]
fn test_lengths() {
    let kind = |s: Symbology, t: &[u8]| normalize(s, t).map(|c| c.kind);
    assert_eq!(kind(Symbology::Ean, b"9638507"), Ok(Kind::Ean8));
    assert_eq!(kind(Symbology::Ean, b"400638133393"), Ok(Kind::Ean13));
    assert_eq!(kind(Symbology::Upc, b"03600029145"), Ok(Kind::UpcA));
    assert_eq!(kind(Symbology::Upc, b"425261"), Ok(Kind::UpcE));
    assert_eq!(kind(Symbology::UpcE, b"04210000526"), Ok(Kind::UpcE));
    assert_eq!(
        kind(Symbology::Ean, b"12345"),
        Err(ValidationError::WrongLength(5))
    );
    assert_eq!(
        kind(Symbology::Ean8, b"400638133393"),
        Err(ValidationError::WrongLength(12))
    );
    assert_eq!(
        kind(Symbology::UpcE, b"40063813339"),
        Err(ValidationError::WrongLength(11))
    );
    assert_eq!(kind(Symbology::Ean, b""), Err(ValidationError::EmptyInput));
    assert_eq!(
        kind(Symbology::UpcE, b"24252614"),
        Err(ValidationError::InvalidCharacter {
            position: 0,
            byte: b'2'
        })
    );
}

#[test]
fn test_upc_e_with_check_digit() {
    // seven digits without a number system carry the check digit
    let code = normalize(Symbology::UpcE, b"4252614").unwrap();
    assert_eq!(code.text(), "04252614");
    assert_eq!(code, normalize(Symbology::UpcE, b"425261").unwrap());
    assert_eq!(
        normalize(Symbology::UpcE, b"2425261"),
        Err(ValidationError::ChecksumMismatch {
            expected: 9,
            found: 1
        })
    );
    // a leading 0 or 1 is still the number system
    assert_eq!(
        normalize(Symbology::UpcE, b"0425261").unwrap().text(),
        "04252614"
    );
    assert_eq!(upc_e_to_a("4252614").as_deref(), Some("042100005264"));
    assert_eq!(upc_e_to_a("4252615"), None);
}

#[test]
fn test_addon() {
    let code = normalize(Symbology::Ean, b"400638133393 12").unwrap();
    assert_eq!(code.name(), "EAN-13+2");
    assert_eq!(code.text(), "4006381333931 12");
    assert_eq!(
        normalize(Symbology::Ean, b"400638133393 123"),
        Err(ValidationError::MalformedAddOn)
    );
    assert_eq!(
        normalize(Symbology::Ean, b"400638133393 1a"),
        Err(ValidationError::MalformedAddOn)
    );
}

#[test]
fn test_isbn() {
    let code = normalize(Symbology::Isbn, b"0-306-40615-2").unwrap();
    assert_eq!(code.text(), "9780306406157");
    assert_eq!(code.kind, Kind::Isbn);
    // the ISBN check character is not verified
    let code = normalize(Symbology::Isbn, b"0-306-40615-X 90000").unwrap();
    assert_eq!(code.text(), "9780306406157 90000");
    assert_eq!(code.name(), "ISBN+5");
    assert_eq!(
        normalize(Symbology::Isbn, b"0-306-40615-2 12"),
        Err(ValidationError::MalformedAddOn)
    );
    assert_eq!(
        normalize(Symbology::Isbn, b"0-306-4061"),
        Err(ValidationError::WrongLength(8))
    );
    assert_eq!(
        normalize(Symbology::Isbn, b"0-306-4061X-2"),
        Err(ValidationError::InvalidCharacter {
            position: 10,
            byte: b'X'
        })
    );
}

#[test]
fn test_upc_e_conversion() {
    assert_eq!(expand(0, &[4, 2, 5, 2, 6, 1]), [0, 4, 2, 1, 0, 0, 0, 0, 5, 2, 6]);
    assert_eq!(upc_e_to_a("425261").as_deref(), Some("042100005264"));
    assert_eq!(upc_e_to_a("04252614").as_deref(), Some("042100005264"));
    assert_eq!(upc_e_to_a("04252615"), None);
    assert_eq!(upc_e_to_a("24252614"), None);
    assert_eq!(upc_a_to_e("042100005264").as_deref(), Some("04252614"));
    assert_eq!(upc_a_to_e("012345000058").as_deref(), Some("01234558"));
    assert_eq!(upc_a_to_e("01234000000").as_deref(), Some("01234048"));
    assert_eq!(upc_a_to_e("06540000032").as_deref(), Some("06543236"));
    assert_eq!(upc_a_to_e("036000291452"), None);
}

#[test]
fn test_ean13_layout() {
    let code = encode(Symbology::Ean13, b"400638133393", Flags::default()).unwrap();
    assert_eq!(code.symbology(), Symbology::Ean13);
    assert_eq!(code.name(), "EAN-13");
    assert_eq!(code.margin(), 9);
    assert_eq!(code.len(), 9 + 3 + 6 * 7 + 5 + 6 * 7 + 3);
    // guards, twelve digits of two bars each
    assert_eq!(code.bars().len(), 2 + 12 + 2 + 12 + 2);
    assert_eq!(code.bars()[0].height, Height::Tall);
    assert_eq!(code.bars()[2].height, Height::Normal);

    let glyphs: Vec<(f64, u8, char)> = code
        .glyphs()
        .iter()
        .map(|g| (g.x, g.size, g.ch))
        .collect();
    assert_eq!(glyphs.len(), 13);
    assert_eq!(glyphs[0], (0.0, 12, '4'));
    assert_eq!(glyphs[1], (12.0, 12, '0'));
    assert_eq!(glyphs[2], (19.0, 12, '0'));
    assert_eq!(glyphs[7], (59.0, 12, '3'));

    // leading 4 is L G L L G G, the second digit '0' is mirrored
    let second: Vec<(u8, u8)> = code.bars()[4..6]
        .iter()
        .map(|b| (b.width, b.space))
        .collect();
    assert_eq!(second, [(1, 2), (3, 1)]);
}

#[test]
fn test_upc_a_layout() {
    let code = encode(Symbology::UpcA, b"03600029145", Flags::default()).unwrap();
    assert_eq!(code.text(), "036000291452");
    let ean = encode(Symbology::Ean13, b"0036000291452", Flags::default()).unwrap();
    // same bars as EAN-13 with a leading zero, outer digits drawn as guards
    let widths = |c: &EncodedBarcode| -> Vec<(u8, u8)> {
        c.bars().iter().map(|b| (b.width, b.space)).collect()
    };
    assert_eq!(widths(&code), widths(&ean));
    assert_eq!(code.bars()[2].height, Height::Tall);
    assert_eq!(code.bars()[3].height, Height::Tall);
    assert_eq!(code.bars()[4].height, Height::Normal);
    let n = code.bars().len();
    assert_eq!(code.bars()[n - 3].height, Height::Tall);
    assert_eq!(code.bars()[n - 4].height, Height::Tall);
    assert_eq!(code.bars()[n - 5].height, Height::Normal);

    let first = code.glyphs()[0];
    assert_eq!((first.x, first.size, first.ch), (0.0, 10, '0'));
    let last = code.glyphs().last().unwrap();
    assert_eq!((last.x, last.size, last.ch), (9.0 + 95.0 + 3.0, 10, '2'));
}

#[test]
fn test_upc_e_layout() {
    let code = encode(Symbology::UpcE, b"425261", Flags::default()).unwrap();
    assert_eq!(code.text(), "04252614");
    assert_eq!(code.len(), 9 + 3 + 6 * 7 + 6);
    assert_eq!(code.bars().len(), 2 + 12 + 3);
    // check 4 with number system 0 is G L G G L L
    let first: Vec<(u8, u8)> = code.bars()[2..4]
        .iter()
        .map(|b| (b.width, b.space))
        .collect();
    assert_eq!(first, [(3, 1), (1, 2)]);
    let check = code.glyphs().last().unwrap();
    assert_eq!((check.x, check.ch), (9.0 + 3.0 + 42.0 + 10.0, '4'));
}

#[test]
fn test_ean8_layout() {
    let code = encode(Symbology::Ean8, b"9638507", Flags::default()).unwrap();
    assert_eq!(code.text(), "96385074");
    assert_eq!(code.margin(), 0);
    assert_eq!(code.len(), 3 + 4 * 7 + 5 + 4 * 7 + 3);
    assert_eq!(code.glyphs()[0].x, 3.0);
}

#[test]
fn test_addon_layout() {
    use crate::TextPlacement;

    let plain = encode(Symbology::Ean13, b"400638133393", Flags::default()).unwrap();
    let code = encode(Symbology::Ean13, b"400638133393 52495", Flags::default()).unwrap();
    assert_eq!(code.name(), "EAN-13+5");
    assert_eq!(code.len(), plain.len() + 9 + 4 + 5 * 7 + 4 * 2);
    let n = plain.bars().len();
    assert!(code.bars()[..n]
        .iter()
        .all(|b| b.text == TextPlacement::Below));
    assert!(code.bars()[n..]
        .iter()
        .all(|b| b.text == TextPlacement::Above));
    let above: Vec<char> = code
        .glyphs()
        .iter()
        .filter(|g| g.placement == TextPlacement::Above)
        .map(|g| g.ch)
        .collect();
    assert_eq!(above, ['5', '2', '4', '9', '5']);

    // check 1 selects G L G L L, the first add-on digit is mirrored
    let first: Vec<u8> = code.bars()[n + 2..n + 4].iter().map(|b| b.width).collect();
    assert_eq!(first, [3, 1]);
}
