use crate::std::string::String;
use crate::std::vec::Vec;

use crate::Symbology;

/// How tall a bar is drawn relative to its neighbours.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Height {
    /// A regular bar, leaving room for the human readable text.
    Normal,
    /// A guard bar that extends into the text area.
    Tall,
    /// A half height bar (POSTNET).
    Short,
}

/// Where human readable text is drawn relative to the bars.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Default)]
pub enum TextPlacement {
    /// Below the bars, the default.
    #[default]
    Below,
    /// Above the bars, used by EAN/UPC add-on codes.
    Above,
}

/// Representation of a "black line" in the code.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct Bar {
    /// The width of the line in modules.
    pub width: u8,
    /// White space after the line.
    pub space: u8,
    /// Height class of the line.
    pub height: Height,
    /// Text placement mode in effect for this line.
    pub text: TextPlacement,
}

/// A coordinate of a bar in a barcode.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct BarCoordinate {
    /// The x coordinate, started from the left edge of the margin.
    pub x: u32,
    /// The width of the bar.
    pub width: u8,
    /// Height class of the bar.
    pub height: Height,
}

/// A human readable character and where to draw it.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Glyph {
    /// Horizontal position in modules, measured like the bars.
    pub x: f64,
    /// Nominal font size before scaling.
    pub size: u8,
    /// The character to draw.
    pub ch: char,
    /// Above or below the bars.
    pub placement: TextPlacement,
}

/// The result of encoding data with one symbology.
///
/// The code is a sequence of alternating light and dark runs. The first run
/// is the light [margin](Self::margin), every [`Bar`] is a dark run followed
/// by a light one. All widths are in modules, the narrowest element of the
/// symbology. The sum of all runs is the natural width, see [`len`](Self::len).
#[derive(PartialEq, Debug, Clone)]
pub struct EncodedBarcode {
    symbology: Symbology,
    name: &'static str,
    text: String,
    margin: u32,
    bars: Vec<Bar>,
    glyphs: Vec<Glyph>,
}

impl EncodedBarcode {
    /// The symbology that produced this code, never [`Symbology::Any`].
    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    /// Human readable name of the encoding, e.g. `"code 39"` or `"EAN-13+5"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The data as it was put into the bars.
    ///
    /// This includes computed check digits for EAN/UPC, the `978` prefix for
    /// ISBN, and case folding for Code 39.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Extra space before the first bar.
    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// The dark lines of the code.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Human readable text positions. Empty if text was suppressed.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Get the coordinates of the bars this code consists of.
    pub fn bar_coordinates(&self) -> impl Iterator<Item = BarCoordinate> + '_ {
        self.bars.iter().scan(self.margin, |pos, bar| {
            let x = *pos;
            *pos += bar.width as u32 + bar.space as u32;
            Some(BarCoordinate {
                x,
                width: bar.width,
                height: bar.height,
            })
        })
    }

    /// The natural width of the code in modules, margin included.
    pub fn len(&self) -> usize {
        self.margin as usize
            + self
                .bars
                .iter()
                .map(|bar| bar.width as usize + bar.space as usize)
                .sum::<usize>()
    }

    /// Whether the code has no bars at all. Never true for a successful
    /// encode.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Accumulates runs and glyphs while an encoder walks its input.
///
/// Runs alternate, starting with the margin space. Patterns are given the
/// way the symbology tables store them: ASCII digits for normal runs and
/// lower case letters for tall ones (`a` is a tall run of one module).
pub(crate) struct Partial {
    symbology: Symbology,
    margin: u32,
    bars: Vec<Bar>,
    glyphs: Vec<Glyph>,
    cursor: u32,
    bar_next: bool,
    placement: TextPlacement,
}

impl Partial {
    pub(crate) fn new(symbology: Symbology) -> Self {
        Self {
            symbology,
            margin: 0,
            bars: Vec::new(),
            glyphs: Vec::new(),
            cursor: 0,
            bar_next: false,
            placement: TextPlacement::Below,
        }
    }

    /// Position of the next run.
    pub(crate) fn cursor(&self) -> u32 {
        self.cursor
    }

    pub(crate) fn run(&mut self, width: u8, height: Height) {
        if self.bar_next {
            self.bars.push(Bar {
                width,
                space: 0,
                height,
                text: self.placement,
            });
        } else if let Some(last) = self.bars.last_mut() {
            last.space += width;
        } else {
            self.margin += width as u32;
        }
        self.cursor += width as u32;
        self.bar_next = !self.bar_next;
    }

    /// Append runs of normal height.
    pub(crate) fn widths(&mut self, widths: &[u8]) {
        for &width in widths {
            self.run(width, Height::Normal);
        }
    }

    /// Append runs of a single height class.
    pub(crate) fn widths_as(&mut self, widths: &[u8], height: Height) {
        for &width in widths {
            self.run(width, height);
        }
    }

    /// Append a table pattern, see the type documentation.
    pub(crate) fn pattern(&mut self, pattern: &[u8]) {
        for &c in pattern {
            match c {
                b'0'..=b'9' => self.run(c - b'0', Height::Normal),
                b'a'..=b'z' => self.run(c - b'a' + 1, Height::Tall),
                _ => debug_assert!(false, "bad pattern element {c}"),
            }
        }
    }

    /// Switch text placement for the following runs and glyphs.
    pub(crate) fn above(&mut self) {
        self.placement = TextPlacement::Above;
    }

    pub(crate) fn glyph(&mut self, x: f64, size: u8, ch: char) {
        self.glyphs.push(Glyph {
            x,
            size,
            ch,
            placement: self.placement,
        });
    }

    pub(crate) fn finish(self, name: &'static str, text: String, no_text: bool) -> EncodedBarcode {
        debug_assert!(!self.bars.is_empty());
        EncodedBarcode {
            symbology: self.symbology,
            name,
            text,
            margin: self.margin,
            bars: self.bars,
            glyphs: if no_text { Vec::new() } else { self.glyphs },
        }
    }
}

#[test]
fn test_partial_alternates() {
    let mut partial = Partial::new(Symbology::Code39);
    partial.pattern(b"9a1a");
    partial.widths(&[3, 2, 1, 1]);
    let code = partial.finish("test", String::new(), false);
    assert_eq!(code.margin(), 9);
    assert_eq!(
        code.bars(),
        &[
            Bar {
                width: 1,
                space: 1,
                height: Height::Tall,
                text: TextPlacement::Below
            },
            Bar {
                width: 1,
                space: 3,
                height: Height::Tall,
                text: TextPlacement::Below
            },
            Bar {
                width: 2,
                space: 1,
                height: Height::Normal,
                text: TextPlacement::Below
            },
            Bar {
                width: 1,
                space: 0,
                height: Height::Normal,
                text: TextPlacement::Below
            },
        ]
    );
    assert_eq!(code.len(), 9 + 1 + 1 + 1 + 3 + 2 + 1 + 1);
}

#[test]
fn test_bar_coordinates() {
    let mut partial = Partial::new(Symbology::Msi);
    partial.pattern(b"031");
    partial.widths(&[1, 3, 3, 1]);
    let code = partial.finish("msi", String::new(), false);
    let coordinates: Vec<_> = code.bar_coordinates().collect();
    assert_eq!(coordinates[0].x, 0);
    assert_eq!(coordinates[0].width, 3);
    assert_eq!(coordinates[1].x, 4);
    assert_eq!(coordinates[2].x, 8);
    assert_eq!(coordinates[2].width, 3);
}

#[test]
fn test_no_text_drops_glyphs() {
    let mut partial = Partial::new(Symbology::Msi);
    partial.pattern(b"031");
    partial.glyph(6.0, 12, '1');
    let code = partial.finish("msi", String::new(), true);
    assert!(code.glyphs().is_empty());
    assert!(!code.is_empty());
}
