//! URL-safe identifier encoding.
//!
//! Globally unique identifiers (IRIs, URNs) contain characters that cannot
//! appear in a path segment, so callers may present them base64url-encoded:
//! standard alphabet with `+` → `-`, `/` → `_`, and the `=` padding stripped.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Encode an identifier into its URL-safe base64 form (no padding).
pub fn encode_identifier(identifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(identifier.as_bytes())
}

/// Decode a URL-safe base64 identifier.
///
/// Trailing `=` padding is tolerated. Returns `None` if the input is not valid
/// base64url or does not decode to UTF-8.
pub fn decode_identifier(encoded: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded.trim_end_matches('='))
        .ok()?;
    String::from_utf8(bytes).ok()
}
