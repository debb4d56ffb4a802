use core::fmt;
use core::str::FromStr;

use log::debug;

use crate::{
    codabar, code128, code39, code93, ean, i25, msi, plessey, postnet, EncodeError,
    EncodedBarcode, Flags, ValidationError,
};

/// The supported encodings.
///
/// `Any` is a selector, not an encoding: it picks the first symbology that
/// accepts the data, see [`resolve`](crate::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    Any,
    /// EAN-13 or EAN-8, chosen by the digit count.
    Ean,
    Ean13,
    Ean8,
    /// UPC-A or UPC-E, chosen by the digit count.
    Upc,
    UpcA,
    UpcE,
    /// Book numbers, drawn as EAN-13 with the `978` prefix.
    Isbn,
    Code39,
    /// Code 39 with the full ASCII range through shift pairs.
    Code39Extended,
    Code93,
    /// Code 128 with automatic code set selection.
    Code128,
    Code128B,
    Code128C,
    /// Code 128 from a list of symbol values.
    Code128Raw,
    Interleaved2of5,
    Codabar,
    Msi,
    Plessey,
    /// POSTNET with 5, 9 or 11 digits.
    Postnet,
    Postnet5,
    Postnet9,
    Postnet11,
    Cepnet,
}

/// Probe order for [`Symbology::Any`].
const AUTO_ORDER: [Symbology; 13] = [
    Symbology::Ean,
    Symbology::Upc,
    Symbology::Isbn,
    Symbology::Code128B,
    Symbology::Code128C,
    Symbology::Code128Raw,
    Symbology::Code39,
    Symbology::Interleaved2of5,
    Symbology::Code128,
    Symbology::Codabar,
    Symbology::Plessey,
    Symbology::Msi,
    Symbology::Code93,
];

/// Label identifiers, the first one of each symbology is used for display.
const NAMES: [(&str, Symbology); 35] = [
    ("Any", Symbology::Any),
    ("EAN", Symbology::Ean),
    ("EAN-13", Symbology::Ean13),
    ("EAN-13+2", Symbology::Ean13),
    ("EAN-13+5", Symbology::Ean13),
    ("EAN-8", Symbology::Ean8),
    ("EAN-8+2", Symbology::Ean8),
    ("EAN-8+5", Symbology::Ean8),
    ("UPC", Symbology::Upc),
    ("UPC-A", Symbology::UpcA),
    ("UPC-A+2", Symbology::UpcA),
    ("UPC-A+5", Symbology::UpcA),
    ("UPC-E", Symbology::UpcE),
    ("UPC-E+2", Symbology::UpcE),
    ("UPC-E+5", Symbology::UpcE),
    ("ISBN", Symbology::Isbn),
    ("ISBN+5", Symbology::Isbn),
    ("Code39", Symbology::Code39),
    ("Code39Ext", Symbology::Code39Extended),
    ("Code93", Symbology::Code93),
    ("Code128", Symbology::Code128),
    ("Code128B", Symbology::Code128B),
    ("Code128C", Symbology::Code128C),
    ("Code128Raw", Symbology::Code128Raw),
    ("128raw", Symbology::Code128Raw),
    ("I25", Symbology::Interleaved2of5),
    ("CBR", Symbology::Codabar),
    ("MSI", Symbology::Msi),
    ("PLS", Symbology::Plessey),
    ("POSTNET", Symbology::Postnet),
    ("POSTNET-5", Symbology::Postnet5),
    ("POSTNET-9", Symbology::Postnet9),
    ("POSTNET-11", Symbology::Postnet11),
    ("CEPNET", Symbology::Cepnet),
    ("", Symbology::Any),
];

impl Symbology {
    /// The identifier used in label files, e.g. `"EAN-13"` or `"I25"`.
    pub fn id(self) -> &'static str {
        NAMES
            .iter()
            .find(|(_, s)| *s == self)
            .map_or("Any", |&(name, _)| name)
    }

    /// Check `text` against the rules of this symbology.
    pub(crate) fn validate(self, text: &[u8]) -> Result<(), ValidationError> {
        match self {
            Symbology::Any => resolve(self, text).map(|_| ()),
            Symbology::Ean
            | Symbology::Ean13
            | Symbology::Ean8
            | Symbology::Upc
            | Symbology::UpcA
            | Symbology::UpcE
            | Symbology::Isbn => ean::verify(self, text),
            Symbology::Code39 => code39::verify(text),
            Symbology::Code39Extended => code39::verify_extended(text),
            Symbology::Code93 => code93::verify(text),
            Symbology::Code128 => code128::verify(text),
            Symbology::Code128B => code128::verify_b(text),
            Symbology::Code128C => code128::verify_c(text),
            Symbology::Code128Raw => code128::verify_raw(text),
            Symbology::Interleaved2of5 => i25::verify(text),
            Symbology::Codabar => codabar::verify(text),
            Symbology::Msi => msi::verify(text),
            Symbology::Plessey => plessey::verify(text),
            Symbology::Postnet
            | Symbology::Postnet5
            | Symbology::Postnet9
            | Symbology::Postnet11
            | Symbology::Cepnet => postnet::verify(self, text),
        }
    }

    /// Encode data that already passed [`validate`](Self::validate).
    pub(crate) fn encode(self, text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
        match self {
            Symbology::Any => resolve(self, text)?.encode(text, flags),
            Symbology::Ean
            | Symbology::Ean13
            | Symbology::Ean8
            | Symbology::Upc
            | Symbology::UpcA
            | Symbology::UpcE
            | Symbology::Isbn => ean::encode(self, text, flags),
            Symbology::Code39 => code39::encode(text, flags),
            Symbology::Code39Extended => code39::encode_extended(text, flags),
            Symbology::Code93 => code93::encode(text, flags),
            Symbology::Code128 => code128::encode(text, flags),
            Symbology::Code128B => code128::encode_b(text, flags),
            Symbology::Code128C => code128::encode_c(text, flags),
            Symbology::Code128Raw => code128::encode_raw(text, flags),
            Symbology::Interleaved2of5 => i25::encode(text, flags),
            Symbology::Codabar => codabar::encode(text, flags),
            Symbology::Msi => msi::encode(text, flags),
            Symbology::Plessey => plessey::encode(text, flags),
            Symbology::Postnet
            | Symbology::Postnet5
            | Symbology::Postnet9
            | Symbology::Postnet11
            | Symbology::Cepnet => postnet::encode(self, text, flags),
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Symbology {
    type Err = ValidationError;

    /// Parse a label identifier, ignoring case. Add-on variants such as
    /// `"EAN-13+5"` map to their base symbology, the add-on is part of the
    /// data.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, symbology)| symbology)
            .ok_or(ValidationError::UnknownSymbology)
    }
}

/// Pick the concrete symbology for `text`.
///
/// An explicit symbology is validated and returned. [`Symbology::Any`]
/// tries EAN, UPC, ISBN, Code 128-B, Code 128-C, Code 128-raw, Code 39,
/// interleaved 2 of 5, Code 128, Codabar, Plessey, MSI and Code 93 in that
/// order.
///
/// ```
/// use glbarcode::{resolve, Symbology};
///
/// assert_eq!(resolve(Symbology::Any, b"1234567890128"), Ok(Symbology::Ean));
/// assert_eq!(resolve(Symbology::Any, b"ABC"), Ok(Symbology::Code128B));
/// ```
pub fn resolve(symbology: Symbology, text: &[u8]) -> Result<Symbology, ValidationError> {
    if symbology != Symbology::Any {
        symbology.validate(text)?;
        return Ok(symbology);
    }
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    match AUTO_ORDER.iter().find(|s| s.validate(text).is_ok()) {
        Some(&found) => {
            debug!("resolved {} bytes to {}", text.len(), found);
            Ok(found)
        }
        None => {
            debug!("no symbology accepts {} bytes", text.len());
            Err(ValidationError::Unencodable)
        }
    }
}

#[test]
fn test_ids() {
    assert_eq!(Symbology::Ean13.id(), "EAN-13");
    assert_eq!(Symbology::Interleaved2of5.id(), "I25");
    assert_eq!(Symbology::Code128Raw.id(), "Code128Raw");
    assert_eq!(Symbology::Any.id(), "Any");
    for &(_, symbology) in NAMES.iter() {
        assert_eq!(symbology.id().parse::<Symbology>(), Ok(symbology));
    }
}

#[test]
fn test_parse() {
    assert_eq!("ean-13+5".parse(), Ok(Symbology::Ean13));
    assert_eq!("cbr".parse(), Ok(Symbology::Codabar));
    assert_eq!("Postnet-9".parse(), Ok(Symbology::Postnet9));
    assert_eq!("128RAW".parse(), Ok(Symbology::Code128Raw));
    assert_eq!(
        "Code 39".parse::<Symbology>(),
        Err(ValidationError::UnknownSymbology)
    );
}

#[test]
fn test_resolve_order() {
    assert_eq!(resolve(Symbology::Any, b"1234567890128"), Ok(Symbology::Ean));
    assert_eq!(resolve(Symbology::Any, b"0-306-40615-2"), Ok(Symbology::Isbn));
    assert_eq!(resolve(Symbology::Any, b"ABC"), Ok(Symbology::Code128B));
    assert_eq!(resolve(Symbology::Any, b"abc"), Ok(Symbology::Code128B));
    assert_eq!(resolve(Symbology::Any, b"1 2 3"), Ok(Symbology::Code128B));
    assert_eq!(resolve(Symbology::Any, b"\x01ABC"), Ok(Symbology::Code128));
    assert_eq!(resolve(Symbology::Any, b""), Err(ValidationError::EmptyInput));
    assert_eq!(
        resolve(Symbology::Any, &[0xff]),
        Err(ValidationError::Unencodable)
    );
}

#[test]
fn test_resolve_explicit() {
    assert_eq!(resolve(Symbology::Msi, b"123"), Ok(Symbology::Msi));
    assert_eq!(
        resolve(Symbology::Msi, b"12A"),
        Err(ValidationError::InvalidCharacter {
            position: 2,
            byte: b'A'
        })
    );
}

#[test]
fn test_any_encodes() {
    let code = Symbology::Any
        .encode(b"1234567890128", Flags::default())
        .unwrap();
    assert_eq!(code.symbology(), Symbology::Ean13);
}
