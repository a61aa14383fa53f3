#![no_main]
use gatehouse::{BearerToken, TokenSealer};
use libfuzzer_sys::fuzz_target;

// Arbitrary input must never open as a valid token, and never panic

fuzz_target!(|data: &[u8]| {
    let sealer = TokenSealer::from_secret("fuzz-secret");

    if let Ok(text) = std::str::from_utf8(data) {
        assert!(sealer.open(text).is_err());

        if let Ok(bearer) = BearerToken::from_header(text) {
            assert!(sealer.open(bearer.as_str()).is_err());
        }
    }

    use base64::Engine;
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    assert!(sealer.open(&encoded).is_err());
});
