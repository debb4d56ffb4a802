//! Placement of bars and text on a drawing area.
//!
//! An [`EncodedBarcode`] is measured in modules. [`Layout`] maps it onto an
//! area given in points, with `y` growing upwards from the bottom edge, and
//! yields a [`Geometry`] any vector back end can draw from.

use crate::std::vec::Vec;

use crate::barcode::{Height, TextPlacement};
use crate::EncodedBarcode;

/// Amount taken from every bar to account for ink spreading.
const SHRINK_AMOUNT: f64 = 0.15;
/// Default height in points before scaling.
const DEFAULT_HEIGHT: f64 = 80.0;
/// Room left below normal bars for the text.
const TEXT_ROOM: f64 = 10.0;
/// Room left below guard bars for the text.
const GUARD_ROOM: f64 = 5.0;
/// Height of a half bar relative to a full bar.
const SHORT_RATIO: f64 = 0.4;
/// Text above the bars sits this far below the top edge.
const ABOVE_BASELINE: f64 = 8.0;

/// Requested size and position of a barcode.
///
/// Zero values mean "pick a default". With nothing set the code is drawn
/// one point per module and 80 points high.
///
/// ```
/// use glbarcode::{encode, Layout, Symbology};
///
/// let code = encode(Symbology::Code39, b"ABC").unwrap();
/// let geometry = Layout::new().width(200).margin(10).resolve(&code);
/// assert_eq!(geometry.bars.len(), code.bars().len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    width: u32,
    height: u32,
    scale: f64,
    margin: u32,
    xoff: i32,
    yoff: i32,
    text: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            scale: 0.0,
            margin: 0,
            xoff: 0,
            yoff: 0,
            text: true,
        }
    }
}

/// A filled bar, all values in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A character positioned at its baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub ch: char,
}

/// The outcome of [`Layout::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Final width of the area, which can grow if the request was too small.
    pub width: u32,
    pub height: u32,
    pub xoff: i32,
    pub yoff: i32,
    /// Points per module.
    pub scale: f64,
    pub margin: u32,
    pub bars: Vec<Rect>,
    pub glyphs: Vec<PlacedGlyph>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of the area in points, the scale follows from it.
    pub fn width(self, width: u32) -> Self {
        Self { width, ..self }
    }

    pub fn height(self, height: u32) -> Self {
        Self { height, ..self }
    }

    /// Points per module. Takes precedence over the width.
    pub fn scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// White space around the whole area.
    pub fn margin(self, margin: u32) -> Self {
        Self { margin, ..self }
    }

    pub fn offset(self, x: i32, y: i32) -> Self {
        Self {
            xoff: x,
            yoff: y,
            ..self
        }
    }

    /// Whether room is left for human readable text.
    pub fn text(self, text: bool) -> Self {
        Self { text, ..self }
    }

    /// Map the code onto the requested area.
    ///
    /// An area too narrow for the code is enlarged and centered. An area too
    /// low for the bars and the text shrinks the scale instead.
    pub fn resolve(&self, code: &EncodedBarcode) -> Geometry {
        let barlen = code.len() as f64;
        let with_text = self.text && !code.glyphs().is_empty();
        let mut width = self.width as i32;
        let mut height = self.height as i32;
        let mut xoff = self.xoff;
        let yoff = self.yoff;

        let mut scale = self.scale;
        if scale <= 0.0 {
            if width == 0 {
                width = barlen as i32;
            }
            scale = width as f64 / barlen;
        }
        if width == 0 {
            width = (barlen * scale + 1.0) as i32;
        }
        if (width as f64) < barlen * scale {
            let wid = (barlen * scale + 1.0) as i32;
            xoff -= (wid - width) / 2;
            width = wid;
            if xoff < 0 {
                width -= xoff;
                xoff = 0;
            }
        }
        if height == 0 {
            height = (DEFAULT_HEIGHT * scale) as i32;
        }

        let min_height = GUARD_ROOM + if with_text { TEXT_ROOM } else { 0.0 };
        if (height as f64) < min_height * scale {
            let reduced = height as f64 / min_height;
            let wid = (width as f64 * reduced / scale) as i32;
            xoff += (width - wid) / 2;
            width = wid;
            scale = reduced;
        }

        let margin = self.margin as f64;
        let mut bars = Vec::with_capacity(code.bars().len());
        let mut xpos = margin + code.margin() as f64 * scale;
        for bar in code.bars() {
            let w = bar.width as f64 * scale;
            let center = xoff as f64 + xpos + w / 2.0;
            let mut y = yoff as f64 + margin;
            let mut h = height as f64;
            if with_text {
                let guard = bar.height != Height::Normal;
                let (below, total) = match bar.text {
                    TextPlacement::Below if guard => (GUARD_ROOM, GUARD_ROOM),
                    TextPlacement::Below => (TEXT_ROOM, TEXT_ROOM),
                    TextPlacement::Above if guard => (0.0, TEXT_ROOM),
                    TextPlacement::Above => (TEXT_ROOM, 2.0 * TEXT_ROOM),
                };
                y += below * scale;
                h -= total * scale;
            }
            if bar.height == Height::Short {
                h *= SHORT_RATIO;
            }
            let ink = (w - SHRINK_AMOUNT).max(0.0);
            bars.push(Rect {
                x: center - ink / 2.0,
                y,
                width: ink,
                height: h,
            });
            xpos += (bar.width as u32 + bar.space as u32) as f64 * scale;
        }

        let mut glyphs = Vec::new();
        if with_text {
            glyphs.extend(code.glyphs().iter().map(|g| {
                let base = yoff as f64 + margin;
                PlacedGlyph {
                    x: xoff as f64 + g.x * scale + margin,
                    y: match g.placement {
                        TextPlacement::Below => base,
                        TextPlacement::Above => base + height as f64 - ABOVE_BASELINE * scale,
                    },
                    size: g.size as f64 * scale,
                    ch: g.ch,
                }
            }));
        }

        Geometry {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
            xoff,
            yoff,
            scale,
            margin: self.margin,
            bars,
            glyphs,
        }
    }
}

#[cfg(test)]
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_defaults() {
    let code = crate::encode(crate::Symbology::Msi, b"1").unwrap();
    let geometry = Layout::new().resolve(&code);
    assert_eq!(geometry.scale, 1.0);
    assert_eq!(geometry.width as usize, code.len());
    assert_eq!(geometry.height, 80);
    assert_eq!(geometry.bars.len(), code.bars().len());

    // the start bar is three modules wide
    let first = geometry.bars[0];
    assert!(close(first.width, 2.85));
    assert!(close(first.x, 0.075));
    assert!(close(first.y, 10.0));
    assert!(close(first.height, 70.0));

    let glyph = geometry.glyphs[0];
    assert!(close(glyph.x, 6.0));
    assert!(close(glyph.y, 0.0));
    assert!(close(glyph.size, 12.0));
}

#[test]
fn test_margin_and_scale() {
    let code = crate::encode(crate::Symbology::Msi, b"1").unwrap();
    let geometry = Layout::new()
        .width(2 * code.len() as u32)
        .margin(10)
        .resolve(&code);
    assert_eq!(geometry.scale, 2.0);
    assert_eq!(geometry.height, 160);
    assert!(close(geometry.bars[0].x, 10.0 + 3.0 - 5.85 / 2.0));
    assert!(close(geometry.bars[0].y, 10.0 + 20.0));
    assert!(close(geometry.glyphs[0].x, 10.0 + 12.0));
    assert!(close(geometry.glyphs[0].size, 24.0));
}

#[test]
fn test_no_text() {
    let code = crate::encode(crate::Symbology::Msi, b"1").unwrap();
    let geometry = Layout::new().text(false).resolve(&code);
    assert!(geometry.glyphs.is_empty());
    assert!(close(geometry.bars[0].y, 0.0));
    assert!(close(geometry.bars[0].height, 80.0));
}

#[test]
fn test_too_narrow() {
    let code = crate::encode(crate::Symbology::Msi, b"1").unwrap();
    let len = code.len() as i32;
    let geometry = Layout::new().scale(1.0).width(20).resolve(&code);
    let grown = len + 1;
    assert_eq!(geometry.xoff, 0);
    assert_eq!(geometry.width as i32, grown + (grown - 20) / 2);
}

#[test]
fn test_too_low() {
    let code = crate::encode(crate::Symbology::Msi, b"1").unwrap();
    let geometry = Layout::new().height(10).resolve(&code);
    assert!(close(geometry.scale, 10.0 / 15.0));
    assert!(geometry.width < code.len() as u32);
}

#[test]
fn test_postnet_half_bars() {
    let code = crate::encode(crate::Symbology::Postnet, b"12345").unwrap();
    let geometry = Layout::new().resolve(&code);
    // no glyphs, so no room is reserved for text
    assert!(close(geometry.bars[0].height, 80.0));
    assert!(close(geometry.bars[1].height, 32.0));
    assert!(close(geometry.bars[1].y, geometry.bars[0].y));
}

#[test]
fn test_addon_above() {
    let code = crate::encode(crate::Symbology::Ean13, b"400638133393 12").unwrap();
    let geometry = Layout::new().resolve(&code);
    let last = geometry.bars.last().unwrap();
    assert!(close(last.y, 10.0));
    assert!(close(last.height, 60.0));
    let glyph = geometry.glyphs.last().unwrap();
    assert!(close(glyph.y, 72.0));
}
