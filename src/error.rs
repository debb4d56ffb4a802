#[cfg(feature = "std")]
use thiserror::Error;

/// Reasons for rejecting data before encoding.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "std", derive(Error))]
pub enum ValidationError {
    /// There is nothing to encode.
    #[cfg_attr(feature = "std", error("empty input"))]
    EmptyInput,
    /// A byte is not part of the symbology's alphabet or not allowed where it
    /// appears.
    #[cfg_attr(
        feature = "std",
        error("character {byte:#04x} at position {position} can not be encoded")
    )]
    InvalidCharacter {
        /// Byte offset into the input.
        position: usize,
        /// The offending byte.
        byte: u8,
    },
    /// Upper and lower case letters were mixed.
    #[cfg_attr(feature = "std", error("upper and lower case letters are mixed"))]
    MixedCase,
    /// The number of digits is not allowed for the symbology.
    #[cfg_attr(feature = "std", error("{0} digits are not allowed"))]
    WrongLength(usize),
    /// A check digit supplied with the data is wrong.
    #[cfg_attr(
        feature = "std",
        error("check digit {found} does not match computed {expected}")
    )]
    ChecksumMismatch {
        /// The computed check digit.
        expected: u8,
        /// The check digit found in the data.
        found: u8,
    },
    /// An EAN/UPC add-on is not two or five digits.
    #[cfg_attr(feature = "std", error("add-on must be two or five digits"))]
    MalformedAddOn,
    /// A symbology identifier was not recognized.
    #[cfg_attr(feature = "std", error("unknown symbology"))]
    UnknownSymbology,
    /// No symbology accepts the data.
    #[cfg_attr(feature = "std", error("no symbology can encode the data"))]
    Unencodable,
}

/// Errors that can occur during encoding.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "std", derive(Error))]
pub enum EncodeError {
    /// The data did not pass validation, nothing was encoded.
    #[cfg_attr(feature = "std", error("invalid data: {0}"))]
    Invalid(ValidationError),
    /// The character at this position has no pattern although it was
    /// validated.
    #[cfg_attr(feature = "std", error("character at position {0} has no pattern"))]
    UnencodableCharacter(usize),
    /// An encoder invariant was broken.
    #[cfg_attr(feature = "std", error("internal error: {0}"))]
    Internal(&'static str),
}

impl From<ValidationError> for EncodeError {
    fn from(err: ValidationError) -> Self {
        EncodeError::Invalid(err)
    }
}

/// Reject mixed case input, shared by the case insensitive symbologies.
pub(crate) fn check_case(text: &[u8]) -> Result<(), ValidationError> {
    let upper = text.iter().any(u8::is_ascii_uppercase);
    let lower = text.iter().any(u8::is_ascii_lowercase);
    if upper && lower {
        return Err(ValidationError::MixedCase);
    }
    Ok(())
}

/// Find the first byte rejected by `accept`.
pub(crate) fn check_chars(
    text: &[u8],
    accept: impl Fn(u8) -> bool,
) -> Result<(), ValidationError> {
    match text.iter().position(|&b| !accept(b)) {
        Some(position) => Err(ValidationError::InvalidCharacter {
            position,
            byte: text[position],
        }),
        None => Ok(()),
    }
}

#[test]
fn test_check_case() {
    assert_eq!(check_case(b"ABC-12"), Ok(()));
    assert_eq!(check_case(b"abc-12"), Ok(()));
    assert_eq!(check_case(b"aBc"), Err(ValidationError::MixedCase));
}

#[test]
fn test_check_chars() {
    assert_eq!(check_chars(b"123", |b| b.is_ascii_digit()), Ok(()));
    assert_eq!(
        check_chars(b"12x4", |b| b.is_ascii_digit()),
        Err(ValidationError::InvalidCharacter {
            position: 2,
            byte: b'x'
        })
    );
}
