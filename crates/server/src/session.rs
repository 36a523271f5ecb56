//! Signed, time-bounded anti-forgery token embedded in the submission form.
//!
//! Format: `{issued_ms}.{hex(sha256(secret || '.' || issued_ms))}`. A third
//! party cannot read the form page cross-origin, so it cannot obtain a valid
//! token to replay.

use sha2::{Digest, Sha256};

use roadmap_core::now_ms;

/// Tokens older than this are rejected.
const MAX_AGE_MS: i64 = 4 * 60 * 60 * 1000;

/// Tolerated clock skew for tokens issued "in the future".
const SKEW_MS: i64 = 60_000;

/// Issue a token for the current time.
pub fn issue(secret: &str) -> String {
    let now = now_ms();
    format!("{now}.{}", sign(secret, now))
}

/// Verify a submitted token: well-formed, correctly signed, not stale.
pub fn verify(secret: &str, token: &str) -> bool {
    let Some((ts, sig)) = token.split_once('.') else {
        return false;
    };
    let Ok(issued) = ts.parse::<i64>() else {
        return false;
    };
    let now = now_ms();
    if issued > now + SKEW_MS || now - issued > MAX_AGE_MS {
        return false;
    }
    sign(secret, issued) == sig
}

fn sign(secret: &str, issued_ms: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b".");
    hasher.update(issued_ms.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_verify() {
        let token = issue("secret");
        assert!(verify("secret", &token));
    }

    #[test]
    fn wrong_secret_fails() {
        let token = issue("secret");
        assert!(!verify("other", &token));
    }

    #[test]
    fn tampered_timestamp_fails() {
        let token = issue("secret");
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", now_ms() - 10, sig);
        assert!(!verify("secret", &forged));
    }

    #[test]
    fn stale_token_fails() {
        let old = now_ms() - MAX_AGE_MS - 1_000;
        let token = format!("{old}.{}", sign("secret", old));
        assert!(!verify("secret", &token));
    }

    #[test]
    fn garbage_fails() {
        assert!(!verify("secret", ""));
        assert!(!verify("secret", "no-dot"));
        assert!(!verify("secret", "abc.def"));
    }
}
