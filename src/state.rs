use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

/// Generate a cryptographically random `state` parameter for the
/// authorization request: 32 random bytes, base64url-encoded without
/// padding. Store it in the user's session and compare it against the
/// `state` query parameter on the callback. That comparison is the
/// application's job, not this library's.
pub fn generate_state() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}
