//! Check character algorithms of the supported symbologies.
//!
//! All functions are pure. Digit inputs are digit values (`0..=9`), not
//! ASCII. Symbol inputs are code table values.

/// Complement a sum to the next multiple of `m`.
///
/// A sum that already is a multiple yields 0.
#[inline]
fn complement(sum: u32, m: u32) -> u32 {
    (sum + m - 1) / m * m - sum
}

/// Code 39 modulo 43 check value.
pub fn code39(values: impl IntoIterator<Item = u8>) -> u32 {
    values.into_iter().map(u32::from).sum::<u32>() % 43
}

/// Code 93 "C" and "K" check values.
///
/// Weights count up from 1 at the rightmost symbol and never wrap. K is
/// computed over the data followed by C.
pub fn code93(values: &[u8]) -> (u32, u32) {
    let c = weighted_mod47(values.iter().rev().copied());
    let k = weighted_mod47(core::iter::once(c as u8).chain(values.iter().rev().copied()));
    (c, k)
}

fn weighted_mod47(values: impl Iterator<Item = u8>) -> u32 {
    (values
        .enumerate()
        .map(|(i, v)| (i as u64 + 1) * v as u64)
        .sum::<u64>()
        % 47) as u32
}

/// Code 128 modulo 103 check value.
///
/// The first value is the start code and carries the same weight as the
/// first data symbol.
pub fn code128(symbols: impl IntoIterator<Item = u8>) -> u32 {
    (symbols
        .into_iter()
        .enumerate()
        .map(|(i, idx)| (i.max(1) as u64) * idx as u64)
        .sum::<u64>()
        % 103) as u32
}

/// UPC/EAN check digit.
///
/// The rightmost digit is weighted by three, its neighbour by one and so on.
pub fn upc_ean(digits: &[u8]) -> u32 {
    let sum = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| if i % 2 == 0 { 3 * d as u32 } else { d as u32 })
        .sum();
    complement(sum, 10)
}

/// Interleaved 2 of 5 check digit, weighted like [`upc_ean`].
///
/// Leading zeros do not change the result, so the digits can be taken
/// before or after padding.
pub fn interleaved_2of5(digits: &[u8]) -> u32 {
    upc_ean(digits)
}

/// MSI modulo 10 check digit.
///
/// Every other digit, starting with the rightmost, is doubled and its carry
/// added.
pub fn msi(digits: &[u8]) -> u32 {
    let sum = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let d = d as u32;
            if i % 2 == 0 {
                2 * d + (2 * d) / 10
            } else {
                d
            }
        })
        .sum();
    complement(sum, 10)
}

/// Codabar modulo 16 check value over alphabet indices.
///
/// Start and stop characters are part of `values`.
pub fn codabar(values: impl IntoIterator<Item = u8>) -> u32 {
    complement(values.into_iter().map(u32::from).sum(), 16)
}

const PLESSEY_POLY: [u8; 9] = [1, 1, 1, 1, 0, 1, 0, 0, 1];

/// Plessey CRC over the nibbles of `values`, least significant bit first.
///
/// Bit `i` of the result is the `i`-th check bar, i.e. the first check bar
/// is the least significant bit.
pub fn plessey(values: &[u8]) -> u8 {
    let n = values.len() * 4;
    let mut bits = crate::std::vec![0u8; n + 8];
    for (i, v) in values.iter().enumerate() {
        for b in 0..4 {
            bits[4 * i + b] = (v >> b) & 1;
        }
    }
    for i in 0..n {
        if bits[i] == 1 {
            for (j, p) in PLESSEY_POLY.iter().enumerate() {
                bits[i + j] ^= p;
            }
        }
    }
    bits[n..]
        .iter()
        .enumerate()
        .fold(0, |crc, (i, &bit)| crc | (bit << i))
}

/// Check digit of a five digit EAN add-on.
pub fn ean_addon5(digits: &[u8]) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(i, &d)| if i % 2 == 0 { 3 * d as u32 } else { 9 * d as u32 })
        .sum::<u32>()
        % 10
}

/// POSTNET correction digit.
pub fn postnet(digits: &[u8]) -> u32 {
    complement(digits.iter().map(|&d| d as u32).sum(), 10)
}

#[test]
fn test_complement() {
    assert_eq!(complement(16, 10), 4);
    assert_eq!(complement(20, 10), 0);
    assert_eq!(complement(0, 10), 0);
    assert_eq!(complement(33, 16), 15);
}

#[test]
fn test_code39() {
    // C O D E 3 9
    assert_eq!(code39([12, 24, 13, 14, 3, 9]), 32);
}

#[test]
fn test_code93() {
    // "TEST93", AIM reference
    assert_eq!(code93(&[29, 14, 28, 29, 9, 3]), (41, 6));
}

#[test]
fn test_code93_long_input() {
    // weights keep growing past 20 and 15
    let values: [u8; 25] = core::array::from_fn(|i| i as u8);
    assert_eq!(code93(&values), (15, 1));
}

#[test]
fn test_code128() {
    // START B, "P", "J", "J", "1", "2", "3"
    assert_eq!(code128([104, 48, 42, 42, 17, 18, 19]), 16);
}

#[test]
fn test_upc_ean() {
    assert_eq!(upc_ean(&[4, 0, 0, 6, 3, 8, 1, 3, 3, 3, 9, 3]), 1);
    assert_eq!(upc_ean(&[0, 3, 6, 0, 0, 0, 2, 9, 1, 4, 5]), 2);
    assert_eq!(upc_ean(&[9, 6, 3, 8, 5, 0, 7]), 4);
}

#[test]
fn test_msi() {
    assert_eq!(msi(&[1, 2, 3, 4]), 4);
    assert_eq!(msi(&[8, 0, 5, 2, 3]), 4);
}

#[test]
fn test_codabar() {
    // A 1 2 3 B
    assert_eq!(codabar([16, 1, 2, 3, 17]), 9);
}

#[test]
fn test_plessey() {
    assert_eq!(plessey(&[]), 0);
    assert_eq!(plessey(&[1, 2, 3, 4]), 0xd0);
}

#[test]
fn test_ean_addon5() {
    assert_eq!(ean_addon5(&[5, 1, 2, 3, 4]), 9);
    assert_eq!(ean_addon5(&[5, 2, 4, 9, 5]), 1);
}

#[test]
fn test_postnet() {
    assert_eq!(postnet(&[1, 2, 3, 4, 5]), 5);
    assert_eq!(postnet(&[5, 5, 5, 5, 5]), 5);
}
