//! Per-file envelope encryption.
//!
//! Each call to [`encrypt`] generates a brand-new AES-256 content key and a
//! random 96-bit IV, runs AES-256-GCM over the plaintext, and wraps the
//! content key under the recipient's RSA public key with OAEP/SHA-256.
//! A fresh key per file means key+IV pairs are never repeated and no
//! shared state (no key cache, no IV dedup) is needed; the functions are
//! safe to call from any number of tasks at once.

use crate::error::{CryptoError, CryptoResult};
use crate::keys::{PrivateKeyHandle, PublicKeyHandle};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use rand::RngCore;
use rsa::Oaep;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

/// AES-GCM IV size in bytes (96 bits).
pub const IV_SIZE: usize = 12;

/// Content key size in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// An envelope-encrypted file body.
///
/// `ciphertext` carries the GCM authentication tag; `wrapped_key` is the
/// content key under RSA-OAEP. Immutable once created — decryption never
/// modifies the stored payload.
#[derive(Clone, Serialize, Deserialize)]
pub struct EncryptedPayload {
    pub ciphertext: Vec<u8>,
    pub wrapped_key: Vec<u8>,
    pub iv: [u8; IV_SIZE],
}

// Ciphertext dumps are useless in logs and can be huge; show sizes only.
impl std::fmt::Debug for EncryptedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedPayload")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("wrapped_key_len", &self.wrapped_key.len())
            .field("iv", &self.iv)
            .finish()
    }
}

/// Encrypts `plaintext` for the holder of `recipient`'s private key.
///
/// The content key exists only inside this function and is zeroized as
/// soon as the wrapped copy has been produced.
pub fn encrypt(plaintext: &[u8], recipient: &PublicKeyHandle) -> CryptoResult<EncryptedPayload> {
    let mut rng = rand::rngs::OsRng;

    let mut key_bytes = Zeroizing::new([0u8; KEY_SIZE]);
    rng.fill_bytes(key_bytes.as_mut());

    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut iv);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key_bytes.as_ref()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| CryptoError::Encryption(format!("AES-GCM seal failed: {e}")))?;

    let wrapped_key = recipient
        .0
        .encrypt(&mut rng, Oaep::new::<Sha256>(), key_bytes.as_ref())
        .map_err(|e| CryptoError::Encryption(format!("RSA-OAEP wrap failed: {e}")))?;

    Ok(EncryptedPayload {
        ciphertext,
        wrapped_key,
        iv,
    })
}

/// Decrypts a payload with the recipient's private key.
///
/// Unwrap failures and tag-verification failures collapse into the same
/// `CryptoError::Decryption` so a caller cannot tell a wrong key from
/// tampered data.
pub fn decrypt(payload: &EncryptedPayload, key: &PrivateKeyHandle) -> CryptoResult<Vec<u8>> {
    let key_bytes = Zeroizing::new(
        key.0
            .decrypt(Oaep::new::<Sha256>(), &payload.wrapped_key)
            .map_err(|_| CryptoError::Decryption)?,
    );

    if key_bytes.len() != KEY_SIZE {
        return Err(CryptoError::Decryption);
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key_bytes.as_ref()));
    cipher
        .decrypt(Nonce::from_slice(&payload.iv), payload.ciphertext.as_ref())
        .map_err(|_| CryptoError::Decryption)
}
