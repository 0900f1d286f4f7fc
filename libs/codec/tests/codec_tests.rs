//! End-to-end codec tests: literal FIX input to literal wire bytes.

use splice_codec::ouch::{self, NewOrder};
use splice_codec::translate::Translator;
use splice_types::Dialect;

const SOH: u8 = 0x01;

fn soh_join(fields: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    for field in fields {
        out.extend_from_slice(field.as_bytes());
        out.push(SOH);
    }
    out
}

/// The reference NewOrderSingle from the upstream test sender.
fn reference_order() -> Vec<u8> {
    soh_join(&[
        "8=FIX.4.2", "9=65", "35=D", "34=1", "49=SENDER", "56=TARGET", "11=ORD1", "21=1",
        "40=1", "54=1", "38=100", "55=TEST", "10=000",
    ])
}

#[test]
fn test_reference_order_translates_to_exact_record() {
    let mut translator = Translator::new(Dialect::Ouch5);
    let mut out = Vec::new();
    assert_eq!(translator.translate_frame(&reference_order(), &mut out), 1);
    assert_eq!(out.len(), 49);

    assert_eq!(out[0], b'O');
    assert_eq!(&out[1..15], b"ORD0000000001 ");
    assert_eq!(out[15], b'B');
    assert_eq!(&out[16..20], &100u32.to_be_bytes());
    assert_eq!(&out[20..28], b"TEST    ");
    assert_eq!(&out[28..32], &1_000_000u32.to_be_bytes());
    assert_eq!(&out[32..36], &3600u32.to_be_bytes());
    assert_eq!(&out[36..40], b"FIRM");
    assert_eq!(out[40], b'Y'); // display
    assert_eq!(out[41], b'A'); // capacity
    assert_eq!(out[42], b'N'); // intermarket sweep eligibility
    assert_eq!(&out[43..47], &0u32.to_be_bytes());
    assert_eq!(out[47], b'N'); // cross type
    assert_eq!(out[48], b'R'); // customer type
}

#[test]
fn test_sell_side_maps_to_s() {
    let frame = soh_join(&["8=FIX.4.2", "35=D", "11=X", "54=2", "38=5", "55=AA"]);
    let mut translator = Translator::new(Dialect::Ouch5);
    let mut out = Vec::new();
    translator.translate_frame(&frame, &mut out);
    assert_eq!(out[15], b'S');
}

#[test]
fn test_heartbeat_produces_zero_bytes() {
    let frame = soh_join(&["8=FIX.4.2", "9=5", "35=0", "34=2", "10=000"]);
    let mut translator = Translator::new(Dialect::Ouch5);
    let mut out = Vec::new();
    assert_eq!(translator.translate_frame(&frame, &mut out), 0);
    assert!(out.is_empty());
}

#[test]
fn test_token_sequence_has_no_gaps() {
    let mut translator = Translator::new(Dialect::Ouch5);
    let mut out = Vec::new();
    for _ in 0..12 {
        translator.translate_frame(&reference_order(), &mut out);
    }
    assert_eq!(out.len(), 12 * NewOrder::SIZE);
    for (i, record) in out.chunks_exact(NewOrder::SIZE).enumerate() {
        let expected = format!("ORD{:010} ", i + 1);
        assert_eq!(&record[1..15], expected.as_bytes());
    }
}

#[test]
fn test_mixed_frame_translates_orders_only() {
    let mut frame = reference_order();
    frame.extend_from_slice(&soh_join(&["8=FIX.4.2", "35=0"]));
    frame.extend_from_slice(&reference_order());

    let mut translator = Translator::new(Dialect::Ouch5);
    let mut out = Vec::new();
    assert_eq!(translator.translate_frame(&frame, &mut out), 2);
    assert_eq!(out.len(), 2 * NewOrder::SIZE);
}

#[test]
fn test_login_record_matches_wire_contract() {
    use splice_types::Credentials;
    use zerocopy::AsBytes;

    let login = ouch::LoginRequest::new(&Credentials {
        username: "USER01".into(),
        password: "PASSWORD1234567890".into(),
    });
    let bytes = login.as_bytes();
    assert_eq!(bytes.len(), 51);
    let mut expected = Vec::new();
    expected.push(b'U');
    expected.extend_from_slice(b"USER01");
    expected.extend_from_slice(b"PASSWORD1234567890  ");
    expected.extend_from_slice(b"    ");
    expected.push(b'0');
    expected.extend_from_slice(&[b' '; 19]);
    assert_eq!(bytes, &expected[..]);
}
