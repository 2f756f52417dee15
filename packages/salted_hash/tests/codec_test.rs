//! Token building and parsing

use base64::{Engine as _, engine::general_purpose::STANDARD};
use cryypt_salted_hash::codec::{self, encode_payload};
use cryypt_salted_hash::{
    DigestState, Salt, SaltedHashError, decode, extract_salt, scheme_tag_for,
};
use hex_literal::hex;

const LDAP_TOKEN: &str = "{SSHA}B0O0XSYdsk7g9K229ZEr73Lid7HBD9DX";

#[test]
fn test_decode_splits_scheme_and_payload() {
    let decoded = decode(LDAP_TOKEN).expect("well-formed token should decode");
    assert_eq!(decoded.scheme, "{SSHA}");
    assert_eq!(decoded.payload, "B0O0XSYdsk7g9K229ZEr73Lid7HBD9DX");

    let raw = decoded.payload_bytes().expect("payload is valid base64");
    assert_eq!(raw.len(), 24);
}

#[test]
fn test_decode_stops_payload_at_whitespace() {
    let decoded = decode("{SSHA}abcd efgh\n").expect("token with trailing text should decode");
    assert_eq!(decoded.payload, "abcd");
}

#[test]
fn test_decode_rejects_malformed_tokens() {
    for token in ["not-a-token", "", "{SSHA", "{SSHA}", "{SSHA} abcd", "SSHA}abcd"] {
        assert!(
            matches!(decode(token), Err(SaltedHashError::MalformedToken(_))),
            "{token:?} should be malformed"
        );
    }
}

#[test]
fn test_extract_salt_takes_trailing_bytes() {
    let salt = extract_salt("B0O0XSYdsk7g9K229ZEr73Lid7HBD9DX", 4).expect("payload holds a salt");
    assert_eq!(salt.as_bytes(), hex!("c10fd0d7"));

    let decoded = decode(LDAP_TOKEN).expect("well-formed token should decode");
    let salt = decoded.salt(8).expect("payload is longer than 8 bytes");
    assert_eq!(salt.as_bytes(), hex!("72e277b1c10fd0d7"));
}

#[test]
fn test_extract_salt_truncated_payload() {
    let payload = STANDARD.encode([1u8, 2, 3]);
    let result = extract_salt(&payload, 4);
    assert!(matches!(
        result,
        Err(SaltedHashError::TruncatedToken {
            expected: 4,
            actual: 3
        })
    ));
}

#[test]
fn test_extract_salt_whole_payload() {
    let payload = STANDARD.encode([9u8, 8, 7, 6]);
    let salt = extract_salt(&payload, 4).expect("payload of exactly salt length is allowed");
    assert_eq!(salt.as_bytes(), [9, 8, 7, 6]);
}

#[test]
fn test_extract_salt_invalid_base64() {
    assert!(matches!(
        extract_salt("!!!not base64!!!", 4),
        Err(SaltedHashError::MalformedToken(_))
    ));
}

#[test]
fn test_generate_layout_is_digest_then_salt() {
    let mut state = DigestState::new("SHA-1").expect("SHA-1 is registered");
    state.update(b"testing123");
    let salt = Salt::from_bytes(hex!("6de2088b").to_vec());
    let scheme = scheme_tag_for("SHA-1").expect("SHA-1 maps to a tag");

    let token = codec::generate(&state, &salt, &scheme);
    assert_eq!(token, "{SSHA}72uhy5xc1AWOLwmNcXALHBSzp8xt4giL");

    let raw = STANDARD
        .decode(&token["{SSHA}".len()..])
        .expect("generated payload is valid base64");
    assert_eq!(&raw[..20], hex!("ef6ba1cb9c5cd4058e2f098d71700b1c14b3a7cc"));
    assert_eq!(&raw[20..], hex!("6de2088b"));
}

#[test]
fn test_generate_does_not_salt_live_state() {
    let mut state = DigestState::new("SHA-256").expect("SHA-256 is registered");
    state.update(b"testing123");
    let salt = Salt::from_bytes(hex!("6de2088b").to_vec());

    let before = state.finalize_clone();
    let first = encode_payload(&state, &salt);
    let second = encode_payload(&state, &salt);

    assert_eq!(first, second);
    assert_eq!(state.finalize_clone(), before);
    assert_eq!(first, "6KWU3Y1xQF6MFZ75vMBtix3Svgr7NabvsgqF0P47Tsxt4giL");
}

#[test]
fn test_payload_has_no_line_breaks() {
    let mut state = DigestState::new("SHA-512").expect("SHA-512 is registered");
    state.update(&[0x55u8; 4096]);
    let salt = Salt::from_bytes(vec![0xaa; 64]);

    let payload = encode_payload(&state, &salt);
    assert!(!payload.contains('\n'));
    assert!(!payload.contains('\r'));
    assert_eq!(STANDARD.decode(&payload).map(|raw| raw.len()).ok(), Some(64 + 64));
}
