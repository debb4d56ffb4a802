use glbarcode::*;
use proptest::prelude::*;
use proptest::string::string_regex;
use proptest::strategy::Union;
use test_case::test_case;

const ALL: [Symbology; 24] = [
    Symbology::Any,
    Symbology::Ean,
    Symbology::Ean13,
    Symbology::Ean8,
    Symbology::Upc,
    Symbology::UpcA,
    Symbology::UpcE,
    Symbology::Isbn,
    Symbology::Code39,
    Symbology::Code39Extended,
    Symbology::Code93,
    Symbology::Code128,
    Symbology::Code128B,
    Symbology::Code128C,
    Symbology::Code128Raw,
    Symbology::Interleaved2of5,
    Symbology::Codabar,
    Symbology::Msi,
    Symbology::Plessey,
    Symbology::Postnet,
    Symbology::Postnet5,
    Symbology::Postnet9,
    Symbology::Postnet11,
    Symbology::Cepnet,
];

fn arm(symbology: Symbology, regex: &str) -> BoxedStrategy<(Symbology, Vec<u8>)> {
    string_regex(regex)
        .unwrap()
        .prop_map(move |text| (symbology, text.into_bytes()))
        .boxed()
}

fn valid_input() -> impl Strategy<Value = (Symbology, Vec<u8>)> {
    Union::new(vec![
        arm(Symbology::Ean13, "[0-9]{12}( [0-9]{2}| [0-9]{5})?"),
        arm(Symbology::Ean8, "[0-9]{7}( [0-9]{2})?"),
        arm(Symbology::UpcA, "[0-9]{11}( [0-9]{5})?"),
        arm(Symbology::UpcE, "[01][0-9]{6}"),
        arm(Symbology::Isbn, "[0-9]{9}( [0-9]{5})?"),
        arm(Symbology::Code39, "[0-9A-Z. $/+%-]{1,20}"),
        arm(Symbology::Code39, "[0-9a-z. $/+%-]{1,20}"),
        arm(Symbology::Code39Extended, "[ -~]{1,20}"),
        arm(Symbology::Code93, "[ -~]{1,20}"),
        arm(Symbology::Code128B, "[ -~]{1,30}"),
        arm(Symbology::Code128C, "([0-9]{2}){1,10}"),
        arm(Symbology::Code128Raw, "(10[0-5]|[1-9]?[0-9])( (10[0-5]|[1-9]?[0-9])){0,8}"),
        arm(Symbology::Interleaved2of5, "[0-9]{1,20}"),
        arm(Symbology::Codabar, "[0-9$:/.+-]{1,20}"),
        arm(Symbology::Codabar, "[A-D][0-9$:/.+-]{1,20}[A-D]"),
        arm(Symbology::Msi, "[0-9]{1,20}"),
        arm(Symbology::Plessey, "[0-9A-F]{1,16}"),
        arm(Symbology::Postnet, "[0-9]{5}(-[0-9]{4}([0-9]{2})?)?"),
        arm(Symbology::Cepnet, "[0-9]{5}-[0-9]{3}"),
        prop::collection::vec(0u8..=0x80, 1..30)
            .prop_map(|bytes| (Symbology::Code128, bytes))
            .boxed(),
        any::<Vec<u8>>()
            .prop_map(|bytes| (Symbology::Any, bytes))
            .boxed(),
    ])
}

fn any_flags() -> impl Strategy<Value = Flags> {
    (any::<bool>(), any::<bool>()).prop_map(|(no_checksum, no_text)| Flags {
        no_checksum,
        no_text,
    })
}

proptest! {
    #[test]
    fn proptest_deterministic((symbology, data) in valid_input(), flags in any_flags()) {
        let first = BarcodeRequest::new(symbology, &data).with_flags(flags).encode();
        let second = BarcodeRequest::new(symbology, &data).with_flags(flags).encode();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn proptest_valid_input_encodes((symbology, data) in valid_input()) {
        let validated = validate(symbology, &data);
        let encoded = encode(symbology, &data);
        prop_assert_eq!(validated.is_ok(), encoded.is_ok());
        if symbology != Symbology::Any {
            prop_assert!(encoded.is_ok(), "{:?} rejected {:?}: {:?}", symbology, data, encoded);
        }
    }

    #[test]
    fn proptest_validate_agrees_with_encode(
        index in 0..ALL.len(),
        data in prop::collection::vec(any::<u8>(), 0..24),
    ) {
        let symbology = ALL[index];
        match (validate(symbology, &data), encode(symbology, &data)) {
            (Ok(()), Ok(code)) => {
                prop_assert_ne!(code.symbology(), Symbology::Any);
            }
            (Err(err), Err(encode_err)) => {
                prop_assert_eq!(EncodeError::Invalid(err), encode_err);
            }
            (validated, encoded) => {
                prop_assert!(false, "{:?} vs {:?}", validated, encoded);
            }
        }
    }

    #[test]
    fn proptest_width_is_sum_of_runs((symbology, data) in valid_input()) {
        if let Ok(code) = encode(symbology, &data) {
            let runs: usize = code
                .bars()
                .iter()
                .map(|bar| bar.width as usize + bar.space as usize)
                .sum();
            prop_assert_eq!(code.len(), code.margin() as usize + runs);
            prop_assert!(code.bars().iter().all(|bar| bar.width > 0));
            prop_assert!(code.len() <= 40 * (data.len() + 8));
            let last = code.bar_coordinates().last().unwrap();
            prop_assert!(last.x as usize + last.width as usize <= code.len());
        }
    }

    #[test]
    fn proptest_layout_keeps_bars(
        (symbology, data) in valid_input(),
        factor in 1u32..4,
        extra in 0u32..50,
    ) {
        if let Ok(code) = encode(symbology, &data) {
            let width = factor * code.len() as u32 + extra;
            let geometry = Layout::new().width(width).resolve(&code);
            prop_assert_eq!(geometry.bars.len(), code.bars().len());
            prop_assert!(geometry.scale > 0.0);
            prop_assert!(geometry.bars.iter().all(|bar| bar.height > 0.0));
            for pair in geometry.bars.windows(2) {
                prop_assert!(pair[0].x < pair[1].x);
            }
        }
    }

    #[test]
    fn proptest_plessey_bit_flip(
        values in prop::collection::vec(0u8..16, 1..16),
        position in any::<prop::sample::Index>(),
        bit in 0u8..4,
    ) {
        let i = position.index(values.len());
        let mut flipped = values.clone();
        flipped[i] ^= 1 << bit;
        prop_assert_ne!(checksum::plessey(&values), checksum::plessey(&flipped));

        // linear over GF(2)
        let delta: Vec<u8> = values.iter().zip(&flipped).map(|(a, b)| a ^ b).collect();
        prop_assert_eq!(
            checksum::plessey(&values) ^ checksum::plessey(&flipped),
            checksum::plessey(&delta)
        );
    }

    #[test]
    fn proptest_upc_round_trip(ns in 0u8..2, six in prop::collection::vec(0u8..10, 6)) {
        let e: String = core::iter::once(ns).chain(six).map(|d| (b'0' + d) as char).collect();
        let a = upc_e_to_a(&e).unwrap();
        prop_assert_eq!(a.len(), 12);
        let compressed = upc_a_to_e(&a).unwrap();
        prop_assert_eq!(upc_e_to_a(&compressed), Some(a));
    }

    #[test]
    fn proptest_code39_case_folding(text in "[0-9a-z. $/+%-]{1,20}") {
        let lower = encode(Symbology::Code39, text.as_bytes()).unwrap();
        let upper = encode(Symbology::Code39, text.to_ascii_uppercase().as_bytes()).unwrap();
        prop_assert_eq!(lower, upper);
    }
}

#[test]
fn test_ean13_check_digit() {
    let code = encode(Symbology::Ean13, b"400638133393").unwrap();
    assert_eq!(code.text(), "4006381333931");
    assert_eq!(validate(Symbology::Ean13, b"4006381333931"), Ok(()));
    assert_eq!(
        validate(Symbology::Ean13, b"4006381333930"),
        Err(ValidationError::ChecksumMismatch {
            expected: 1,
            found: 0
        })
    );
    let full = encode(Symbology::Ean13, b"4006381333931").unwrap();
    assert_eq!(full, code);
}

#[test]
fn test_code39_framing() {
    let code = encode(Symbology::Code39, b"CODE39").unwrap();
    // C O D E 3 9 sum to 75, 75 mod 43 is 32
    assert_eq!(checksum::code39([12, 24, 13, 14, 3, 9]), 32);
    // five bars per symbol: start, six characters, check, stop
    assert_eq!(code.bars().len(), 5 * (6 + 1 + 2));
    let star = [1, 1, 3, 3, 1];
    let first: Vec<u8> = code.bars()[..5].iter().map(|b| b.width).collect();
    let last: Vec<u8> = code.bars()[code.bars().len() - 5..]
        .iter()
        .map(|b| b.width)
        .collect();
    assert_eq!(first, star);
    assert_eq!(last, star);
}

#[test]
fn test_msi_groups() {
    assert_eq!(checksum::msi(&[1, 2, 3, 4]), 4);
    let code = encode(Symbology::Msi, b"1234").unwrap();
    // start bar, four bits per group, stop bars
    assert_eq!(code.bars().len(), 1 + 4 * (4 + 1) + 2);
}

#[test_case(b"1234567890", false, "1234567890" ; "even without check")]
#[test_case(b"123", true, "1236" ; "odd with check")]
#[test_case(b"1234", true, "012348" ; "even with check")]
#[test_case(b"12345", false, "012345" ; "odd without check")]
fn test_i25_padding(data: &[u8], check: bool, expected: &str) {
    let mut request = BarcodeRequest::new(Symbology::Interleaved2of5, data);
    if !check {
        request = request.no_checksum();
    }
    assert_eq!(request.encode().unwrap().text(), expected);
}

#[test_case("0123450", "012000003455" ; "product in the last three")]
#[test_case("0123451", "012100003454" ; "manufacturer digit one")]
#[test_case("0123452", "012200003453" ; "manufacturer digit two")]
#[test_case("0123453", "012300000451" ; "product in the last two")]
#[test_case("0123454", "012340000053" ; "product in the last digit")]
#[test_case("1123457", "112345000079" ; "product digit five to nine")]
fn test_upc_e_branches(e: &str, a: &str) {
    let expanded = upc_e_to_a(e).unwrap();
    assert_eq!(expanded, a);
    let compressed = upc_a_to_e(&expanded).unwrap();
    assert_eq!(&compressed[..7], e);
    assert_eq!(compressed[7..], expanded[11..]);
}

#[test]
fn test_code39_case_policy() {
    assert_eq!(
        encode(Symbology::Code39, b"abc"),
        encode(Symbology::Code39, b"ABC")
    );
    assert_eq!(
        validate(Symbology::Code39, b"aBc"),
        Err(ValidationError::MixedCase)
    );
}

#[test]
fn test_empty_is_rejected() {
    for symbology in ALL {
        assert!(validate(symbology, b"").is_err(), "{symbology}");
        assert!(encode(symbology, b"").is_err(), "{symbology}");
    }
}

#[test_case(b"1234567890128", Symbology::Ean ; "ean")]
#[test_case(b"ABC", Symbology::Code128B ; "printable")]
#[test_case(b"0-306-40615-2", Symbology::Isbn ; "isbn")]
#[test_case(b"\x01\x02", Symbology::Code128 ; "control characters")]
fn test_any_resolution(data: &[u8], expected: Symbology) {
    assert_eq!(resolve(Symbology::Any, data), Ok(expected));
}

#[test]
fn test_isbn_check_not_verified() {
    let right = encode(Symbology::Isbn, b"0-306-40615-2").unwrap();
    let wrong = encode(Symbology::Isbn, b"0-306-40615-9").unwrap();
    assert_eq!(right.text(), "9780306406157");
    assert_eq!(right.bars(), wrong.bars());
}

#[test]
fn test_labels() {
    let symbology: Symbology = "upc-e+5".parse().unwrap();
    assert_eq!(symbology, Symbology::UpcE);
    assert_eq!(symbology.to_string(), "UPC-E");
    assert!("QR".parse::<Symbology>().is_err());
}
