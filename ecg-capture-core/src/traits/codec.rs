use crate::models::error::CodecError;

/// Authenticated encryption seam between the session store and the
/// concrete cipher.
///
/// Default implementation is AES-256-GCM via the `aes-gcm` crate.
///
/// Sealed box format:
/// ```text
/// [12-byte nonce] [ciphertext] [16-byte authentication tag]
/// ```
pub trait BatchCodec: Send + Sync {
    /// Encrypt a serialized batch.
    ///
    /// Returns: `nonce (12 bytes) || ciphertext || tag (16 bytes)`. A fresh
    /// nonce is drawn on every call, so the same plaintext encrypts to
    /// different bytes each time.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Open a sealed box produced by `encrypt`.
    ///
    /// Fails with `CodecError::MalformedInput` when the layout is invalid
    /// and `CodecError::AuthenticationFailed` when the data was tampered
    /// with or the key is wrong.
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Algorithm identifier (e.g., "AES-256-GCM").
    fn algorithm(&self) -> &str;

    /// Short key fingerprint for logs. Never the key itself.
    fn key_id(&self) -> &str;

    /// Clone this codec into a new boxed trait object.
    ///
    /// Codecs are stateless (key + algorithm), so cloning is trivial.
    fn clone_box(&self) -> Box<dyn BatchCodec>;
}

// Allow SessionStore to clone its codec via trait object.
impl Clone for Box<dyn BatchCodec> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
