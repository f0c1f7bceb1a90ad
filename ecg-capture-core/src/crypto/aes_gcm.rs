use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Key, Nonce};

use crate::models::error::CodecError;
use crate::traits::codec::BatchCodec;

use super::key::SecretKey;

/// AES-256-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-256-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// AES-256-GCM batch codec.
///
/// Sealed box format: `nonce (12B) || ciphertext || tag (16B)` — the nonce
/// is embedded so a box decrypts without external metadata.
#[derive(Clone)]
pub struct AesGcmCodec {
    cipher: Aes256Gcm,
    key_id: String,
}

impl AesGcmCodec {
    pub fn new(key: &SecretKey) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        Self {
            cipher,
            key_id: key.fingerprint(),
        }
    }
}

impl BatchCodec for AesGcmCodec {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CodecError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| CodecError::EncryptFailed)?;

        // aes-gcm already appends the tag to the ciphertext, so just
        // prepend the nonce.
        let mut sealed = Vec::with_capacity(nonce.len() + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        if data.len() < NONCE_LEN + TAG_LEN {
            return Err(CodecError::MalformedInput(format!(
                "sealed box is {} bytes, minimum is {}",
                data.len(),
                NONCE_LEN + TAG_LEN
            )));
        }

        let (nonce, ciphertext) = data.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CodecError::AuthenticationFailed)
    }

    fn algorithm(&self) -> &str {
        "AES-256-GCM"
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }

    fn clone_box(&self) -> Box<dyn BatchCodec> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> AesGcmCodec {
        AesGcmCodec::new(&SecretKey::from_bytes([42u8; 32]))
    }

    #[test]
    fn round_trip_restores_plaintext() {
        let codec = codec();
        let plaintext = b"[0.1,0.2,0.3]";
        let sealed = codec.encrypt(plaintext).unwrap();
        assert_eq!(codec.decrypt(&sealed).unwrap(), plaintext);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let codec = codec();
        let sealed = codec.encrypt(b"").unwrap();
        assert_eq!(sealed.len(), NONCE_LEN + TAG_LEN);
        assert_eq!(codec.decrypt(&sealed).unwrap(), b"");
    }

    #[test]
    fn same_plaintext_encrypts_differently() {
        let codec = codec();
        let a = codec.encrypt(b"batch").unwrap();
        let b = codec.encrypt(b"batch").unwrap();
        // Fresh nonce per call: the sealed boxes must differ...
        assert_ne!(a, b);
        // ...but both open to the identical plaintext.
        assert_eq!(codec.decrypt(&a).unwrap(), b"batch");
        assert_eq!(codec.decrypt(&b).unwrap(), b"batch");
    }

    #[test]
    fn tampering_fails_authentication() {
        let codec = codec();
        let sealed = codec.encrypt(b"do not touch").unwrap();

        // Flip one bit in the nonce, the ciphertext body, and the tag.
        for index in [0, NONCE_LEN, sealed.len() - 1] {
            let mut tampered = sealed.clone();
            tampered[index] ^= 0x01;
            assert_eq!(
                codec.decrypt(&tampered),
                Err(CodecError::AuthenticationFailed),
                "flipping byte {} must fail authentication",
                index
            );
        }
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let sealed = codec().encrypt(b"secret").unwrap();
        let other = AesGcmCodec::new(&SecretKey::from_bytes([43u8; 32]));
        assert_eq!(other.decrypt(&sealed), Err(CodecError::AuthenticationFailed));
    }

    #[test]
    fn truncated_input_is_malformed() {
        let codec = codec();
        assert!(matches!(
            codec.decrypt(&[]),
            Err(CodecError::MalformedInput(_))
        ));
        assert!(matches!(
            codec.decrypt(&[0u8; NONCE_LEN + TAG_LEN - 1]),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn key_id_is_a_fingerprint_not_the_key() {
        let codec = codec();
        assert_eq!(codec.algorithm(), "AES-256-GCM");
        assert_eq!(codec.key_id().len(), 16);
        let other = AesGcmCodec::new(&SecretKey::from_bytes([43u8; 32]));
        assert_ne!(codec.key_id(), other.key_id());
    }

    #[test]
    fn boxed_clone_shares_the_key() {
        let boxed: Box<dyn BatchCodec> = Box::new(codec());
        let cloned = boxed.clone();
        let sealed = cloned.encrypt(b"cloned").unwrap();
        assert_eq!(boxed.decrypt(&sealed).unwrap(), b"cloned");
    }
}
