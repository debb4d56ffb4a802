//! This crate encodes data as one-dimensional barcodes of the symbologies
//! found on labels: EAN/UPC/ISBN with add-ons, Code 39, Code 93, Code 128,
//! interleaved 2 of 5, Codabar, MSI, Plessey and POSTNET.
//!
//! Encoding produces an [`EncodedBarcode`], a sequence of bars and spaces
//! measured in modules together with the positions of the human readable
//! characters. [`Layout`] turns it into rectangles and text positions on a
//! drawing area, the drawing itself is left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use glbarcode::{bars_to_blocks, encode, Symbology};
//!
//! let code = encode(Symbology::Code128, b"Hello!").unwrap();
//! println!("{}", bars_to_blocks(&code));
//! ```
//!
//! Options are set with a [`BarcodeRequest`]:
//!
//! ```rust
//! use glbarcode::{BarcodeRequest, Symbology};
//!
//! let code = BarcodeRequest::new(Symbology::Msi, b"80523")
//!     .no_checksum()
//!     .encode()
//!     .unwrap();
//! assert_eq!(code.name(), "msi");
//! ```
//!
//! ## Selecting a symbology
//!
//! [`Symbology::Any`] picks the first symbology that accepts the data, see
//! [`resolve`]. Symbologies also parse from the identifiers used in label
//! files, e.g. `"EAN-13"`, `"Code39"` or `"I25"`, ignoring case.
//!
//! ## Check characters
//!
//! Code 39, Code 93, Code 128, EAN/UPC/ISBN and POSTNET always carry their
//! check characters. For interleaved 2 of 5, Codabar, MSI and Plessey they
//! can be left out with [`Flags::no_checksum`]. The [`checksum`] module
//! exposes the calculations.
#![no_std]

#[cfg(not(feature = "std"))]
extern crate alloc as std;
#[cfg(feature = "std")]
extern crate std;

use log::debug;

mod barcode;
pub mod checksum;
mod codabar;
mod code128;
mod code39;
mod code93;
mod ean;
mod error;
mod geometry;
mod i25;
mod msi;
mod plessey;
mod postnet;
mod symbology;
#[cfg(feature = "unicode")]
mod unicode;

pub use barcode::{Bar, BarCoordinate, EncodedBarcode, Glyph, Height, TextPlacement};
pub use ean::{upc_a_to_e, upc_e_to_a};
pub use error::{EncodeError, ValidationError};
pub use geometry::{Geometry, Layout, PlacedGlyph, Rect};
pub use symbology::{resolve, Symbology};

#[cfg(feature = "unicode")]
pub use unicode::bars_to_blocks;

/// Options that change how data is encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Leave out optional check characters.
    ///
    /// Symbologies whose check character is mandatory ignore this.
    pub no_checksum: bool,
    /// Do not produce human readable text.
    pub no_text: bool,
}

/// Builder for encoding with more control.
///
/// The request is consumed by [`encode`](Self::encode), validation always
/// runs first.
#[derive(Debug, Clone, Copy)]
pub struct BarcodeRequest<'a> {
    symbology: Symbology,
    data: &'a [u8],
    flags: Flags,
}

impl<'a> BarcodeRequest<'a> {
    pub fn new(symbology: Symbology, data: &'a [u8]) -> Self {
        Self {
            symbology,
            data,
            flags: Flags::default(),
        }
    }

    /// Replace all flags at once.
    pub fn with_flags(self, flags: Flags) -> Self {
        Self { flags, ..self }
    }

    /// Leave out optional check characters.
    pub fn no_checksum(mut self) -> Self {
        self.flags.no_checksum = true;
        self
    }

    /// Do not produce human readable text.
    pub fn no_text(mut self) -> Self {
        self.flags.no_text = true;
        self
    }

    /// Validate and encode the data.
    pub fn encode(self) -> Result<EncodedBarcode, EncodeError> {
        let symbology = resolve(self.symbology, self.data).map_err(|err| {
            debug!("rejected data for {}: {:?}", self.symbology, err);
            EncodeError::Invalid(err)
        })?;
        symbology.encode(self.data, self.flags)
    }
}

/// Check whether `symbology` can encode `data`.
///
/// For [`Symbology::Any`] this succeeds iff some symbology accepts the data.
pub fn validate(symbology: Symbology, data: &[u8]) -> Result<(), ValidationError> {
    symbology.validate(data)
}

/// Encode `data` with default [`Flags`].
///
/// See [`BarcodeRequest`] for options.
pub fn encode(symbology: Symbology, data: &[u8]) -> Result<EncodedBarcode, EncodeError> {
    BarcodeRequest::new(symbology, data).encode()
}

#[test]
fn test_validation_runs_first() {
    assert_eq!(
        encode(Symbology::Code39, b""),
        Err(EncodeError::Invalid(ValidationError::EmptyInput))
    );
    assert_eq!(
        encode(Symbology::Code39, b"aBc"),
        Err(EncodeError::Invalid(ValidationError::MixedCase))
    );
    assert_eq!(
        encode(Symbology::Ean13, b"4006381333932"),
        Err(EncodeError::Invalid(ValidationError::ChecksumMismatch {
            expected: 1,
            found: 2
        }))
    );
}

#[test]
fn test_request_flags() {
    let plain = encode(Symbology::Interleaved2of5, b"1234").unwrap();
    let bare = BarcodeRequest::new(Symbology::Interleaved2of5, b"1234")
        .no_checksum()
        .no_text()
        .encode()
        .unwrap();
    assert_eq!(plain.text(), "012348");
    assert_eq!(bare.text(), "1234");
    assert!(bare.glyphs().is_empty());
    assert!(bare.len() < plain.len());

    let flags = Flags {
        no_checksum: true,
        no_text: true,
    };
    let same = BarcodeRequest::new(Symbology::Interleaved2of5, b"1234")
        .with_flags(flags)
        .encode()
        .unwrap();
    assert_eq!(same, bare);
}

#[test]
fn test_mandatory_checksum() {
    let plain = encode(Symbology::Code39, b"ABC").unwrap();
    let flagged = BarcodeRequest::new(Symbology::Code39, b"ABC")
        .no_checksum()
        .encode()
        .unwrap();
    assert_eq!(plain, flagged);
}

#[test]
fn test_validate_any() {
    assert_eq!(validate(Symbology::Any, b"ABC"), Ok(()));
    assert_eq!(validate(Symbology::Any, b""), Err(ValidationError::EmptyInput));
    assert_eq!(
        validate(Symbology::Any, &[0xfe]),
        Err(ValidationError::Unencodable)
    );
}
