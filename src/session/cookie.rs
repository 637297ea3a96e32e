//! Signed session cookies.
//!
//! Cookies have the form `s:<sessionId>.<signature>`, where the signature is
//! the base64 HMAC-SHA256 of the session ID under the application secret with
//! `=` padding removed.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Prefix marking a signed cookie value.
pub const COOKIE_PREFIX: &str = "s:";

/// Build the signed cookie value for `session_id`.
///
/// `session_id` must not contain `.`: the first `.` separates ID from
/// signature, so such a cookie never verifies. Session stores issue
/// URL-safe base64 IDs, which never do.
pub fn sign_cookie(session_id: &str, secret: &str) -> String {
    format!("{}{}.{}", COOKIE_PREFIX, session_id, signature(session_id, secret))
}

/// Check that `cookie` carries a valid signature for its session ID.
///
/// The full cookie is compared against the recomputed one in constant time.
/// Cookies without the `s:` prefix or the `.` separator are rejected.
pub fn verify(cookie: &str, secret: &str) -> bool {
    let Some(id) = session_id(cookie) else {
        return false;
    };
    let expected = sign_cookie(id, secret);
    cookie.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// The session ID part of a cookie: between `s:` and the first `.`.
///
/// Does not check the signature.
pub fn session_id(cookie: &str) -> Option<&str> {
    cookie
        .strip_prefix(COOKIE_PREFIX)?
        .split_once('.')
        .map(|(id, _)| id)
}

fn signature(value: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(value.as_bytes());
    STANDARD_NO_PAD.encode(mac.finalize().into_bytes())
}
