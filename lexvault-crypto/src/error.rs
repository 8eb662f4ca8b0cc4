//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors from the encryption layer.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key bytes were not a valid X.509 / PKCS#8 RSA encoding.
    #[error("malformed key material: {0}")]
    KeyFormat(String),

    /// Key parsed but is below the minimum accepted modulus size.
    #[error("RSA key too weak: {bits} bits (minimum {min})")]
    WeakKey { bits: usize, min: usize },

    /// Key wrapping or AEAD encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Unwrap or AEAD verification failed. Carries no detail: a wrong key
    /// and tampered data must be indistinguishable to the caller.
    #[error("decryption failed (wrong key or tampered data)")]
    Decryption,
}
