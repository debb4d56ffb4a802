use crate::std::string::String;
use crate::std::vec::Vec;

use crate::barcode::{Height, Partial};
use crate::error::check_chars;
use crate::{checksum, EncodeError, EncodedBarcode, Flags, Symbology, ValidationError};

/// Five bars per digit, `1` is a full bar and `0` a half bar.
const SYMBOLS: [&[u8; 5]; 10] = [
    b"11000", b"00011", b"00101", b"00110", b"01001", b"01010", b"01100", b"10001", b"10010",
    b"10100",
];

const FRAME: &[u8] = b"1";

fn is_separator(c: u8) -> bool {
    c == b'-' || c == b' '
}

fn digits(text: &[u8]) -> Vec<u8> {
    text.iter()
        .filter(|b| b.is_ascii_digit())
        .map(|b| b - b'0')
        .collect()
}

fn accepts(symbology: Symbology, count: usize) -> bool {
    match symbology {
        Symbology::Postnet5 => count == 5,
        Symbology::Postnet9 => count == 9,
        Symbology::Postnet11 => count == 11,
        Symbology::Cepnet => count == 8,
        _ => matches!(count, 5 | 9 | 11),
    }
}

/// Digits with dashes and spaces in between. The digit count depends on the
/// variant.
pub(crate) fn verify(symbology: Symbology, text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| b.is_ascii_digit() || is_separator(b))?;
    let count = text.iter().filter(|b| b.is_ascii_digit()).count();
    if !accepts(symbology, count) {
        return Err(ValidationError::WrongLength(count));
    }
    Ok(())
}

fn push_symbol(partial: &mut Partial, symbol: &[u8]) {
    for &bit in symbol {
        // the margin comes first, so every symbol starts with a gap
        partial.run(1, Height::Normal);
        let height = if bit == b'1' { Height::Tall } else { Height::Short };
        partial.run(1, height);
    }
}

/// Encode POSTNET or CEPNET. The correction digit is always appended and
/// there is no human readable text.
pub(crate) fn encode(
    symbology: Symbology,
    text: &[u8],
    flags: Flags,
) -> Result<EncodedBarcode, EncodeError> {
    if let Some(i) = text
        .iter()
        .position(|&b| !b.is_ascii_digit() && !is_separator(b))
    {
        return Err(EncodeError::UnencodableCharacter(i));
    }
    let mut digits = digits(text);
    digits.push(checksum::postnet(&digits) as u8);

    let symbology = match symbology {
        Symbology::Cepnet => Symbology::Cepnet,
        Symbology::Postnet5 | Symbology::Postnet9 | Symbology::Postnet11 => symbology,
        _ => Symbology::Postnet,
    };
    let mut partial = Partial::new(symbology);
    push_symbol(&mut partial, FRAME);
    for &d in &digits {
        push_symbol(&mut partial, SYMBOLS[d as usize]);
    }
    push_symbol(&mut partial, FRAME);

    let name = if symbology == Symbology::Cepnet {
        "CEPNET"
    } else {
        "POSTNET"
    };
    let canonical: String = digits.iter().map(|d| (b'0' + d) as char).collect();
    Ok(partial.finish(name, canonical, flags.no_text))
}

#[test]
fn test_symbols() {
    for symbol in SYMBOLS {
        assert_eq!(symbol.iter().filter(|&&b| b == b'1').count(), 2);
    }
}

#[test]
fn test_verify() {
    assert_eq!(verify(Symbology::Postnet, b"12345"), Ok(()));
    assert_eq!(verify(Symbology::Postnet, b"12345-6789"), Ok(()));
    assert_eq!(verify(Symbology::Postnet, b"12345 6789 01"), Ok(()));
    assert_eq!(
        verify(Symbology::Postnet, b"1234"),
        Err(ValidationError::WrongLength(4))
    );
    assert_eq!(
        verify(Symbology::Postnet5, b"12345-6789"),
        Err(ValidationError::WrongLength(9))
    );
    assert_eq!(verify(Symbology::Cepnet, b"12345-678"), Ok(()));
    assert_eq!(
        verify(Symbology::Postnet, b"1234a"),
        Err(ValidationError::InvalidCharacter {
            position: 4,
            byte: b'a'
        })
    );
    assert_eq!(verify(Symbology::Postnet, b""), Err(ValidationError::EmptyInput));
}

#[test]
fn test_encode() {
    let code = encode(Symbology::Postnet, b"12345", Flags::default()).unwrap();
    // sum 15, correction 5
    assert_eq!(code.text(), "123455");
    assert_eq!(code.name(), "POSTNET");
    // frame, six digits, frame
    assert_eq!(code.bars().len(), 1 + 6 * 5 + 1);
    assert_eq!(code.margin(), 1);
    assert_eq!(code.len(), 2 * 32 - 1 + 1);
    assert!(code.glyphs().is_empty());

    let heights: Vec<Height> = code.bars()[1..6].iter().map(|b| b.height).collect();
    assert_eq!(
        heights,
        [
            Height::Short,
            Height::Short,
            Height::Short,
            Height::Tall,
            Height::Tall
        ]
    );
    assert_eq!(code.bars()[0].height, Height::Tall);
    assert_eq!(code.bars().last().unwrap().height, Height::Tall);
    assert!(code.bars().iter().all(|b| b.width == 1));
}

#[test]
fn test_cepnet() {
    let code = encode(Symbology::Cepnet, b"12345-678", Flags::default()).unwrap();
    assert_eq!(code.symbology(), Symbology::Cepnet);
    assert_eq!(code.name(), "CEPNET");
    // sum 36, correction 4
    assert_eq!(code.text(), "123456784");
}
