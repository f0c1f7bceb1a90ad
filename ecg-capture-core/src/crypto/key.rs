use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::models::error::ConfigError;

/// Length of the session key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Process-wide symmetric session key.
///
/// Loaded once at startup from an external secret source and held for the
/// process lifetime. Never logged, never persisted; the backing bytes are
/// zeroized on drop. Decoding validates length and format up front so a
/// bad key is a startup `ConfigError`, not a failure on first use.
pub struct SecretKey {
    bytes: [u8; KEY_LEN],
}

impl SecretKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Decodes a textual key: standard base64 or hex, whichever yields
    /// exactly [`KEY_LEN`] bytes.
    ///
    /// The formats overlap — a 64-character hex key is also syntactically
    /// valid base64 (decoding to 48 bytes) — so the decoded length, not
    /// the decode succeeding, selects the format.
    pub fn decode(input: &str) -> Result<Self, ConfigError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Key("key value is empty".into()));
        }

        let mut decoded = Self::decode_any(trimmed)?;
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { bytes })
    }

    /// Tries base64 then hex, accepting whichever decodes to exactly
    /// [`KEY_LEN`] bytes. Wrong-length candidates are zeroized.
    fn decode_any(trimmed: &str) -> Result<Vec<u8>, ConfigError> {
        let mut wrong_len = None;

        if let Ok(mut decoded) = BASE64.decode(trimmed) {
            if decoded.len() == KEY_LEN {
                return Ok(decoded);
            }
            wrong_len = Some(decoded.len());
            decoded.zeroize();
        }

        if let Ok(mut decoded) = hex::decode(trimmed) {
            if decoded.len() == KEY_LEN {
                return Ok(decoded);
            }
            if wrong_len.is_none() {
                wrong_len = Some(decoded.len());
            }
            decoded.zeroize();
        }

        Err(match wrong_len {
            Some(got) => ConfigError::Key(format!(
                "expected {} key bytes, got {}",
                KEY_LEN, got
            )),
            None => ConfigError::Key("key is neither valid base64 nor hex".into()),
        })
    }

    /// Loads and decodes the key from an environment variable.
    pub fn from_env(var: &str) -> Result<Self, ConfigError> {
        let value = std::env::var(var)?;
        Self::decode(&value)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Short SHA-256 fingerprint of the key, safe for logs.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bytes);
        hex::encode(&digest[..8])
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

// Debug must never leak key bytes.
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_key_decodes() {
        let raw = [7u8; KEY_LEN];
        let encoded = BASE64.encode(raw);
        let key = SecretKey::decode(&encoded).unwrap();
        assert_eq!(key.as_bytes(), &raw);
    }

    #[test]
    fn hex_key_decodes() {
        let raw = [0xA5u8; KEY_LEN];
        let encoded = hex::encode(raw);
        let key = SecretKey::decode(&encoded).unwrap();
        assert_eq!(key.as_bytes(), &raw);
    }

    #[test]
    fn sixty_four_hex_chars_decode_as_hex_not_base64() {
        // Also syntactically valid base64 (48 bytes); only the hex
        // reading has the key length.
        let encoded = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";
        let key = SecretKey::decode(encoded).unwrap();
        assert_eq!(hex::encode(key.as_bytes()), encoded);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let encoded = format!("  {}\n", BASE64.encode([1u8; KEY_LEN]));
        assert!(SecretKey::decode(&encoded).is_ok());
    }

    #[test]
    fn wrong_length_is_rejected() {
        let short = BASE64.encode([0u8; 16]);
        assert!(matches!(
            SecretKey::decode(&short),
            Err(ConfigError::Key(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(SecretKey::decode("!!! not a key !!!").is_err());
        assert!(SecretKey::decode("").is_err());
        assert!(SecretKey::decode("   ").is_err());
    }

    #[test]
    fn missing_env_var_is_fatal() {
        assert!(matches!(
            SecretKey::from_env("ECG_TEST_KEY_THAT_DOES_NOT_EXIST"),
            Err(ConfigError::Env(_))
        ));
    }

    #[test]
    fn env_var_round_trips() {
        let var = "ECG_TEST_KEY_ROUND_TRIP";
        std::env::set_var(var, BASE64.encode([9u8; KEY_LEN]));
        let key = SecretKey::from_env(var).unwrap();
        assert_eq!(key.as_bytes(), &[9u8; KEY_LEN]);
        std::env::remove_var(var);
    }

    #[test]
    fn fingerprint_is_short_and_key_dependent() {
        let a = SecretKey::from_bytes([1u8; KEY_LEN]);
        let b = SecretKey::from_bytes([2u8; KEY_LEN]);
        assert_eq!(a.fingerprint().len(), 16);
        assert_eq!(a.fingerprint(), SecretKey::from_bytes([1u8; KEY_LEN]).fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn debug_does_not_expose_bytes() {
        let key = SecretKey::from_bytes([0x42u8; KEY_LEN]);
        let rendered = format!("{:?}", key);
        assert!(rendered.contains(&key.fingerprint()));
        assert!(!rendered.contains("66, 66"));
    }
}
