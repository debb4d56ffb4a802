use crate::std::string::String;

use crate::EncodedBarcode;

/// Blank modules on both sides of the code.
const QUIET_ZONE: u32 = 10;

/// One line of half blocks, two modules per character.
struct Buffer {
    line: String,
    pending: Option<bool>,
}

impl Buffer {
    /// Start with the quiet zone followed by the code's own margin.
    fn new(margin: u32) -> Self {
        let mut buf = Self {
            line: String::new(),
            pending: None,
        };
        buf.push(false, QUIET_ZONE + margin);
        buf
    }

    fn push(&mut self, dark: bool, modules: u32) {
        for _ in 0..modules {
            match self.pending.take() {
                None => self.pending = Some(dark),
                Some(left) => self.line.push(block(left, dark)),
            }
        }
    }

    /// Close with the quiet zone, padding an odd module count.
    fn finish(mut self) -> String {
        self.push(false, QUIET_ZONE);
        if self.pending.is_some() {
            self.push(false, 1);
        }
        self.line
    }
}

fn block(left: bool, right: bool) -> char {
    match (left, right) {
        (true, true) => '█',
        (true, false) => '▌',
        (false, true) => '▐',
        (false, false) => ' ',
    }
}

/// Create a string representation of the code using Unicode block
/// characters, two modules per character.
///
/// Quiet zones of ten modules are added on both sides, the left one in front
/// of the code's margin. Bar heights and text are not shown.
///
/// ## Example
/// ```
/// # use glbarcode::{bars_to_blocks, encode, Symbology};
/// let code = encode(Symbology::Code128B, b"<3").unwrap();
/// assert!(bars_to_blocks(&code).starts_with("     █▐ ▌ "));
/// ```
pub fn bars_to_blocks(code: &EncodedBarcode) -> String {
    let mut buf = Buffer::new(code.margin());
    for bar in code.bars() {
        buf.push(true, bar.width as u32);
        buf.push(false, bar.space as u32);
    }
    buf.finish()
}

#[test]
fn test_blocks() {
    let code = crate::encode(crate::Symbology::Code128C, b"12").unwrap();
    let blocks = bars_to_blocks(&code);
    // start C, one pair, check, stop
    let modules = 10 + 3 * 11 + 13 + 10;
    assert_eq!(blocks.chars().count(), (modules + 1) / 2);
    assert!(blocks.starts_with("     █"));
    assert!(blocks.ends_with("     "));
}

#[test]
fn test_blocks_keep_margin() {
    let code = crate::encode(crate::Symbology::Ean13, b"400638133393").unwrap();
    // quiet zone and margin are 19 blank modules, the guard bar is the 20th
    let blocks = bars_to_blocks(&code);
    assert!(blocks.starts_with("         ▐"));
    let modules = 10 + code.len() + 10;
    assert_eq!(blocks.chars().count(), (modules + 1) / 2);
}

#[test]
fn test_buffer_pads_odd_modules() {
    let mut buf = Buffer::new(0);
    buf.push(true, 3);
    assert_eq!(buf.finish(), "     █▌     ");
}
