use crate::std::string::{String, ToString};
use crate::std::vec::Vec;

use log::trace;

use crate::barcode::{Height, Partial};
use crate::error::check_chars;
use crate::{checksum, EncodeError, EncodedBarcode, Flags, Symbology, ValidationError};

const FNC3: u8 = 96;
const FNC2: u8 = 97;
const SHIFT_MODE: u8 = 98;
const SWITCH_C: u8 = 99;
const SWITCH_B: u8 = 100;
const SWITCH_A: u8 = 101;
const FNC1: u8 = 102;
const START_A: u8 = 103;
const START_B: u8 = 104;
const START_C: u8 = 105;
const STOP: u8 = 108;

/// Input bytes standing for the function characters.
pub(crate) const INPUT_FNC1: u8 = 0xC1;
pub(crate) const INPUT_FNC2: u8 = 0xC2;
pub(crate) const INPUT_FNC3: u8 = 0xC3;
pub(crate) const INPUT_FNC4: u8 = 0xC4;

/// Bar patterns, most significant bit first. A set bit is a dark module.
pub(crate) const PATTERNS: [u16; 109] = [
    0x6cc, 0x66c, 0x666, 0x498, 0x48c, 0x44c, 0x4c8, 0x4c4, 0x464, 0x648, 0x644, 0x624, 0x59c,
    0x4dc, 0x4ce, 0x5cc, 0x4ec, 0x4e6, 0x672, 0x65c, 0x64e, 0x6e4, 0x674, 0x76e, 0x74c, 0x72c,
    0x726, 0x764, 0x734, 0x732, 0x6d8, 0x6c6, 0x636, 0x518, 0x458, 0x446, 0x588, 0x468, 0x462,
    0x688, 0x628, 0x622, 0x5b8, 0x58e, 0x46e, 0x5d8, 0x5c6, 0x476, 0x776, 0x68e, 0x62e, 0x6e8,
    0x6e2, 0x6ee, 0x758, 0x746, 0x716, 0x768, 0x762, 0x71a, 0x77a, 0x642, 0x78a, 0x530, 0x50c,
    0x4b0, 0x486, 0x42c, 0x426, 0x590, 0x584, 0x4d0, 0x4c2, 0x434, 0x432, 0x612, 0x650, 0x7ba,
    0x614, 0x47a, 0x53c, 0x4bc, 0x49e, 0x5e4, 0x4f4, 0x4f2, 0x7a4, 0x794, 0x792, 0x6de, 0x6f6,
    0x7b6, 0x578, 0x51e, 0x45e, 0x5e8, 0x5e2, 0x7a8, 0x7a2, 0x5de, 0x5ee, 0x75e, 0x7ae, 0x684,
    0x690, 0x69c, 0x63a, 0x6b8, 0x18eb,
];

/// Width of a symbol in modules. The stop pattern is two modules wider.
const SYMBOL_WIDTH: f64 = 11.0;

/// Split a pattern into (bar, space) width pairs.
pub(crate) fn bits_to_runs(mut bits: u16) -> Vec<(u8, u8)> {
    let mut runs = Vec::with_capacity(4);
    while bits != 0 {
        let mut width = 0;
        let zeroes = bits.leading_zeros();
        for i in (0..(16 - zeroes)).rev() {
            if bits & (1 << i) != 0 {
                width += 1;
                bits ^= 1 << i;
            } else {
                break;
            }
        }
        runs.push((width as u8, (bits.leading_zeros() - width - zeroes) as u8));
    }
    runs
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum Mode {
    A,
    B,
    C,
}

impl Mode {
    fn start(self) -> u8 {
        match self {
            Mode::A => START_A,
            Mode::B => START_B,
            Mode::C => START_C,
        }
    }

    fn switch(self) -> u8 {
        match self {
            Mode::A => SWITCH_A,
            Mode::B => SWITCH_B,
            Mode::C => SWITCH_C,
        }
    }

    /// Whether `c` can be encoded in this mode but not in the other one of
    /// A and B.
    fn needed_for(self, c: u8) -> bool {
        match self {
            Mode::A => c < 0x20 || c == 0x80,
            Mode::B => (0x60..0x80).contains(&c),
            Mode::C => false,
        }
    }

    fn other(self) -> Mode {
        match self {
            Mode::A => Mode::B,
            _ => Mode::A,
        }
    }

    /// Symbol value of a single byte.
    fn value(self, c: u8) -> Option<u8> {
        match (self, c) {
            (Mode::C, INPUT_FNC1) => Some(FNC1),
            (Mode::C, _) => None,
            (_, INPUT_FNC1) => Some(FNC1),
            (_, INPUT_FNC2) => Some(FNC2),
            (_, INPUT_FNC3) => Some(FNC3),
            // FNC4 shares its value with the switch to the current set
            (mode, INPUT_FNC4) => Some(mode.switch()),
            (_, 0x20..=0x5F) => Some(c - 0x20),
            (Mode::A, 0x00..=0x1F) => Some(c + 0x40),
            (Mode::A, 0x80) => Some(0x40),
            (Mode::B, 0x60..=0x7F) => Some(c - 0x20),
            _ => None,
        }
    }
}

/// The first of A and B that the data requires, `None` if either will do.
fn a_or_b(bytes: &[u8]) -> Option<Mode> {
    bytes.iter().find_map(|&c| {
        if Mode::A.needed_for(c) {
            Some(Mode::A)
        } else if Mode::B.needed_for(c) {
            Some(Mode::B)
        } else {
            None
        }
    })
}

#[derive(Debug, PartialEq, Clone)]
struct Encodation {
    mode: Mode,
    symbols: Vec<u8>,
    glyphs: Vec<(f64, u8, char)>,
}

impl Encodation {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            symbols: crate::std::vec![mode.start()],
            glyphs: Vec::new(),
        }
    }

    #[inline]
    fn x(&self) -> f64 {
        self.symbols.len() as f64 * SYMBOL_WIDTH
    }

    fn switch(&mut self, mode: Mode) {
        trace!("code 128: switch {:?} -> {:?}", self.mode, mode);
        self.symbols.push(mode.switch());
        self.mode = mode;
    }

    fn push_byte(&mut self, mode: Mode, c: u8, position: usize) -> Result<(), EncodeError> {
        let value = mode
            .value(c)
            .ok_or(EncodeError::UnencodableCharacter(position))?;
        if (0x20..0x7F).contains(&c) {
            self.glyphs.push((self.x(), 12, c as char));
        }
        self.symbols.push(value);
        Ok(())
    }

    fn push_pair(&mut self, c1: u8, c2: u8) {
        let x = self.x();
        self.glyphs.push((x, 9, c1 as char));
        self.glyphs.push((x + SYMBOL_WIDTH / 2.0, 9, c2 as char));
        self.symbols.push((c1 - b'0') * 10 + (c2 - b'0'));
    }

    /// Append check symbol and stop, then draw the bars.
    fn render(
        mut self,
        symbology: Symbology,
        framing: Height,
        name: &'static str,
        text: String,
        flags: Flags,
    ) -> Result<EncodedBarcode, EncodeError> {
        self.symbols
            .push(checksum::code128(self.symbols.iter().copied()) as u8);
        self.symbols.push(STOP);

        let mut partial = Partial::new(symbology);
        partial.run(0, Height::Normal);
        let last = self.symbols.len() - 1;
        for (i, &symbol) in self.symbols.iter().enumerate() {
            let bits = *PATTERNS
                .get(symbol as usize)
                .ok_or(EncodeError::Internal("code 128 symbol out of range"))?;
            let start = i == 0 && (START_A..=START_C).contains(&symbol);
            let height = if start || i == last {
                framing
            } else {
                Height::Normal
            };
            for (width, space) in bits_to_runs(bits) {
                partial.run(width, height);
                partial.run(space, height);
            }
        }
        for (x, size, ch) in self.glyphs {
            partial.glyph(x, size, ch);
        }
        Ok(partial.finish(name, text, flags.no_text))
    }
}

/// Pick code sets greedily: C for runs of at least four digits, shift for a
/// single character of the other set, switch otherwise.
fn encode_as_indices(bytes: &[u8]) -> Result<Encodation, EncodeError> {
    let start_c = match bytes {
        [c1, c2] => c1.is_ascii_digit() && c2.is_ascii_digit(),
        [c1, c2, c3, c4, ..] => [c1, c2, c3, c4].iter().all(|c| c.is_ascii_digit()),
        _ => false,
    };
    let mut enc = Encodation::new(if start_c {
        Mode::C
    } else {
        a_or_b(bytes).unwrap_or(Mode::B)
    });

    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let mode = enc.mode;
        if mode == Mode::C {
            match bytes[i..] {
                [INPUT_FNC1, ..] => {
                    enc.symbols.push(FNC1);
                    i += 1;
                }
                [c1 @ b'0'..=b'9', c2 @ b'0'..=b'9', ..] => {
                    enc.push_pair(c1, c2);
                    i += 2;
                }
                _ => enc.switch(a_or_b(&bytes[i..]).unwrap_or(Mode::B)),
            }
            continue;
        }

        let digits = bytes[i..].iter().take_while(|c| c.is_ascii_digit()).count();
        if digits >= 4 {
            if digits % 2 == 1 {
                enc.push_byte(mode, c, i)?;
                i += 1;
            }
            enc.switch(Mode::C);
            continue;
        }

        let other = mode.other();
        if other.needed_for(c) {
            if a_or_b(&bytes[i + 1..]) == Some(other) {
                enc.switch(other);
                continue;
            }
            trace!("code 128: shift to {:?} at {}", other, i);
            enc.symbols.push(SHIFT_MODE);
            enc.push_byte(other, c, i)?;
        } else {
            enc.push_byte(mode, c, i)?;
        }
        i += 1;
    }
    Ok(enc)
}

pub(crate) fn verify(text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| b <= 0x80 || (INPUT_FNC1..=INPUT_FNC4).contains(&b))
}

pub(crate) fn verify_b(text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| (0x20..=0x7F).contains(&b))
}

pub(crate) fn verify_c(text: &[u8]) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    check_chars(text, |b| b.is_ascii_digit())?;
    if text.len() % 2 == 1 {
        return Err(ValidationError::WrongLength(text.len()));
    }
    Ok(())
}

/// Parse whitespace separated symbol values.
fn raw_values(text: &[u8]) -> Result<Vec<u8>, ValidationError> {
    let mut values = Vec::new();
    let mut i = 0;
    while i < text.len() {
        if text[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        let mut value = 0u32;
        while i < text.len() && !text[i].is_ascii_whitespace() {
            let b = text[i];
            if !b.is_ascii_digit() {
                return Err(ValidationError::InvalidCharacter {
                    position: i,
                    byte: b,
                });
            }
            value = value.saturating_mul(10).saturating_add((b - b'0') as u32);
            i += 1;
        }
        if value > START_C as u32 {
            return Err(ValidationError::InvalidCharacter {
                position: start,
                byte: text[start],
            });
        }
        values.push(value as u8);
    }
    if values.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(values)
}

pub(crate) fn verify_raw(text: &[u8]) -> Result<(), ValidationError> {
    raw_values(text).map(|_| ())
}

fn canonical(text: &[u8]) -> String {
    text.iter().map(|&b| b as char).collect()
}

/// Automatic code set selection.
pub(crate) fn encode(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    encode_as_indices(text)?.render(
        Symbology::Code128,
        Height::Normal,
        "code 128",
        canonical(text),
        flags,
    )
}

/// Code set B only.
pub(crate) fn encode_b(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    let mut enc = Encodation::new(Mode::B);
    for (i, &c) in text.iter().enumerate() {
        enc.push_byte(Mode::B, c, i)?;
    }
    enc.render(
        Symbology::Code128B,
        Height::Tall,
        "code 128-B",
        canonical(text),
        flags,
    )
}

/// Code set C only, two digits per symbol.
pub(crate) fn encode_c(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    let mut enc = Encodation::new(Mode::C);
    for (i, pair) in text.chunks(2).enumerate() {
        match *pair {
            [c1 @ b'0'..=b'9', c2 @ b'0'..=b'9'] => enc.push_pair(c1, c2),
            _ => return Err(EncodeError::UnencodableCharacter(2 * i)),
        }
    }
    enc.render(
        Symbology::Code128C,
        Height::Tall,
        "code 128-C",
        canonical(text),
        flags,
    )
}

/// Symbol values given verbatim. The first value is taken as the start code
/// for the check sum.
///
/// Every value is labelled with two characters over its symbol: the tens
/// digit, or `A` from 100 on, and the units digit.
pub(crate) fn encode_raw(text: &[u8], flags: Flags) -> Result<EncodedBarcode, EncodeError> {
    let values = raw_values(text)?;
    let text = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let mut glyphs = Vec::with_capacity(2 * values.len());
    for (i, &value) in values.iter().enumerate() {
        let x = i as f64 * SYMBOL_WIDTH;
        let tens = if value >= 100 {
            'A'
        } else {
            (b'0' + value / 10) as char
        };
        glyphs.push((x, 9, tens));
        glyphs.push((x + SYMBOL_WIDTH / 2.0, 9, (b'0' + value % 10) as char));
    }
    let enc = Encodation {
        mode: Mode::B,
        symbols: values,
        glyphs,
    };
    enc.render(Symbology::Code128Raw, Height::Tall, "128raw", text, flags)
}

#[cfg(test)]
fn symbols(bytes: &[u8]) -> Vec<u8> {
    encode_as_indices(bytes).unwrap().symbols
}

#[test]
fn test_bits_to_runs() {
    assert_eq!(bits_to_runs(0), []);
    assert_eq!(bits_to_runs(0b10000011010), [(1, 5), (2, 1), (1, 1)]);
    assert_eq!(
        bits_to_runs(0b1100011101011),
        [(2, 3), (3, 1), (1, 1), (2, 0)]
    );
}

#[test]
fn test_pattern_sizes() {
    for pattern in &PATTERNS[0..108] {
        let size: u32 = bits_to_runs(*pattern)
            .into_iter()
            .map(|(w, s)| w as u32 + s as u32)
            .sum();
        assert_eq!(size, 11);
    }
    let size: u32 = bits_to_runs(PATTERNS[STOP as usize])
        .into_iter()
        .map(|(w, s)| w as u32 + s as u32)
        .sum();
    assert_eq!(size, 13);
}

#[test]
fn test_start_mode() {
    assert_eq!(symbols(b"ABC"), [START_B, 33, 34, 35]);
    assert_eq!(symbols(b"99"), [START_C, 99]);
    assert_eq!(symbols(b"1234"), [START_C, 12, 34]);
    for msg in [b"000", b"00a"] {
        let indices = symbols(msg);
        assert_ne!(indices[0], START_C);
        assert_eq!(indices.len(), 4);
    }
    assert_eq!(symbols(b"\x01A")[0], START_A);
}

#[test]
fn test_switch_instead_of_shift() {
    assert_eq!(
        symbols(b"\nab"),
        [START_A, b'\n' + 0x40, SWITCH_B, b'a' - b' ', b'b' - b' ']
    );
}

#[test]
fn test_shift_when_either_set_follows() {
    // nothing after the lowercase letter needs A or B, so stay in A
    assert_eq!(symbols(b"\x01a"), [START_A, 65, SHIFT_MODE, 65]);
    assert_eq!(symbols(b"\x01a1"), [START_A, 65, SHIFT_MODE, 65, 17]);
    assert_eq!(a_or_b(b"1 2"), None);
    assert_eq!(a_or_b(b"1a\x01"), Some(Mode::B));
}

#[test]
fn test_shift() {
    assert_eq!(
        symbols(b"a\nb"),
        [START_B, b'a' - b' ', SHIFT_MODE, b'\n' + 0x40, b'b' - b' ']
    );
}

#[test]
fn test_digit_runs() {
    // an odd run leaves its first digit in B
    assert_eq!(
        symbols(b"AB12345"),
        [START_B, 33, 34, 17, SWITCH_C, 23, 45]
    );
    assert_eq!(symbols(b"12345"), [START_C, 12, 34, SWITCH_B, 21]);
    assert_eq!(symbols(b"A12B"), [START_B, 33, 17, 18, 34]);
}

#[test]
fn test_function_characters() {
    assert_eq!(symbols(b"\xC112"), [START_B, FNC1, 17, 18]);
    assert_eq!(symbols(b"1234\xC156"), [START_C, 12, 34, FNC1, 56]);
    assert_eq!(symbols(b"A\xC4"), [START_B, 33, SWITCH_B]);
    assert_eq!(symbols(b"\x00\xC4"), [START_A, 0x40, SWITCH_A]);
}

#[test]
fn test_encode() {
    let code = encode(b"ABC", Flags::default()).unwrap();
    // start, 3 data, check, stop
    assert_eq!(code.len(), 5 * 11 + 13);
    assert_eq!(code.bars().len(), 5 * 3 + 4);
    assert!(code.bars().iter().all(|b| b.height == Height::Normal));
    let xs: Vec<f64> = code.glyphs().iter().map(|g| g.x).collect();
    assert_eq!(xs, [11.0, 22.0, 33.0]);
}

#[test]
fn test_encode_b() {
    let code = encode_b(b"Hi!", Flags::default()).unwrap();
    assert_eq!(code.bars()[0].height, Height::Tall);
    assert_eq!(code.bars()[3].height, Height::Normal);
    assert_eq!(code.bars().last().unwrap().height, Height::Tall);
    assert_eq!(code.glyphs()[2].x, 33.0);
}

#[test]
fn test_encode_c() {
    let code = encode_c(b"1234", Flags::default()).unwrap();
    let glyphs: Vec<(f64, u8, char)> = code
        .glyphs()
        .iter()
        .map(|g| (g.x, g.size, g.ch))
        .collect();
    assert_eq!(
        glyphs,
        [(11.0, 9, '1'), (16.5, 9, '2'), (22.0, 9, '3'), (27.5, 9, '4')]
    );
    assert_eq!(verify_c(b"123"), Err(ValidationError::WrongLength(3)));
}

#[test]
fn test_raw() {
    assert_eq!(raw_values(b" 104 33\t34 "), Ok(crate::std::vec![104, 33, 34]));
    assert_eq!(raw_values(b"  "), Err(ValidationError::EmptyInput));
    assert_eq!(
        raw_values(b"104 106"),
        Err(ValidationError::InvalidCharacter {
            position: 4,
            byte: b'1'
        })
    );
    assert!(raw_values(b"104 x").is_err());

    let raw = encode_raw(b"104 33 34 35", Flags::default()).unwrap();
    let auto = encode_b(b"ABC", Flags::default()).unwrap();
    assert_eq!(raw.bars(), auto.bars());
    assert_eq!(raw.text(), "104 33 34 35");
}

#[test]
fn test_raw_glyphs() {
    let raw = encode_raw(b"104 33 7", Flags::default()).unwrap();
    let glyphs: Vec<(f64, u8, char)> = raw
        .glyphs()
        .iter()
        .map(|g| (g.x, g.size, g.ch))
        .collect();
    assert_eq!(
        glyphs,
        [
            (0.0, 9, 'A'),
            (5.5, 9, '4'),
            (11.0, 9, '3'),
            (16.5, 9, '3'),
            (22.0, 9, '0'),
            (27.5, 9, '7'),
        ]
    );
    let flags = Flags {
        no_text: true,
        ..Flags::default()
    };
    assert!(encode_raw(b"104 33 7", flags).unwrap().glyphs().is_empty());
}

#[test]
fn test_raw_framing() {
    let started = encode_raw(b"104 33", Flags::default()).unwrap();
    assert_eq!(started.bars()[0].height, Height::Tall);
    let bare = encode_raw(b"33 34", Flags::default()).unwrap();
    assert_eq!(bare.bars()[0].height, Height::Normal);
    assert_eq!(bare.bars().last().unwrap().height, Height::Tall);
}

#[test]
fn test_verify() {
    assert_eq!(verify(b"\x00\x80\xC1\xC4abc"), Ok(()));
    assert!(verify(b"\x81").is_err());
    assert_eq!(verify_b(b"Hello World~"), Ok(()));
    assert!(verify_b(b"\t").is_err());
}
