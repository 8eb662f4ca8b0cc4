//! RSA key material: parsing, validation, and provisioning.
//!
//! Public keys arrive as X.509 SubjectPublicKeyInfo DER (the stored form),
//! private keys as PKCS#8 DER, usually base64-encoded in a request header.
//! Both are rejected below [`MIN_RSA_BITS`].

use crate::error::{CryptoError, CryptoResult};
use base64::Engine;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use std::sync::Arc;

/// Minimum accepted RSA modulus size in bits.
pub const MIN_RSA_BITS: usize = 2048;

/// A validated RSA public key.
#[derive(Clone)]
pub struct PublicKeyHandle(pub(crate) RsaPublicKey);

impl PublicKeyHandle {
    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }

    /// X.509 SubjectPublicKeyInfo DER encoding (the stored form).
    pub fn to_der(&self) -> CryptoResult<Vec<u8>> {
        self.0
            .to_public_key_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| CryptoError::KeyFormat(e.to_string()))
    }
}

impl fmt::Debug for PublicKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKeyHandle")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

/// A validated RSA private key.
///
/// Cheap to clone (shared inner key). The underlying key zeroizes its
/// material on drop; `Debug` never prints it.
#[derive(Clone)]
pub struct PrivateKeyHandle(pub(crate) Arc<RsaPrivateKey>);

impl PrivateKeyHandle {
    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }
}

impl fmt::Debug for PrivateKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKeyHandle(<redacted>)")
    }
}

/// Parses and validates an X.509 SubjectPublicKeyInfo DER public key.
pub fn parse_public_key(der: &[u8]) -> CryptoResult<PublicKeyHandle> {
    let key = RsaPublicKey::from_public_key_der(der)
        .map_err(|e| CryptoError::KeyFormat(e.to_string()))?;
    let bits = key.size() * 8;
    if bits < MIN_RSA_BITS {
        return Err(CryptoError::WeakKey {
            bits,
            min: MIN_RSA_BITS,
        });
    }
    Ok(PublicKeyHandle(key))
}

/// Parses and validates a PKCS#8 DER private key.
pub fn parse_private_key(der: &[u8]) -> CryptoResult<PrivateKeyHandle> {
    let key = RsaPrivateKey::from_pkcs8_der(der)
        .map_err(|e| CryptoError::KeyFormat(e.to_string()))?;
    let bits = key.size() * 8;
    if bits < MIN_RSA_BITS {
        return Err(CryptoError::WeakKey {
            bits,
            min: MIN_RSA_BITS,
        });
    }
    Ok(PrivateKeyHandle(Arc::new(key)))
}

/// Decodes a base64 PKCS#8 private key as carried in a request header.
pub fn parse_private_key_b64(encoded: &str) -> CryptoResult<PrivateKeyHandle> {
    let der = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| CryptoError::KeyFormat(format!("base64 decode: {e}")))?;
    parse_private_key(&der)
}

/// A freshly generated keypair with its DER encodings.
///
/// The public DER is what gets stored with the lawyer's profile; the
/// private DER is handed to the caller once and never kept.
pub struct GeneratedKeyPair {
    pub public: PublicKeyHandle,
    pub private: PrivateKeyHandle,
    pub public_der: Vec<u8>,
    pub private_der: Vec<u8>,
}

impl fmt::Debug for GeneratedKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GeneratedKeyPair(<redacted>)")
    }
}

/// Generates an RSA keypair for owner provisioning.
///
/// Fails with `WeakKey` before doing any work if `bits` is below the floor.
pub fn generate_keypair(bits: usize) -> CryptoResult<GeneratedKeyPair> {
    if bits < MIN_RSA_BITS {
        return Err(CryptoError::WeakKey {
            bits,
            min: MIN_RSA_BITS,
        });
    }
    let private = RsaPrivateKey::new(&mut rand::rngs::OsRng, bits)
        .map_err(|e| CryptoError::Encryption(format!("keypair generation failed: {e}")))?;
    let public = RsaPublicKey::from(&private);

    let public_der = public
        .to_public_key_der()
        .map_err(|e| CryptoError::KeyFormat(e.to_string()))?
        .as_bytes()
        .to_vec();
    let private_der = private
        .to_pkcs8_der()
        .map_err(|e| CryptoError::KeyFormat(e.to_string()))?
        .as_bytes()
        .to_vec();

    Ok(GeneratedKeyPair {
        public: PublicKeyHandle(public),
        private: PrivateKeyHandle(Arc::new(private)),
        public_der,
        private_der,
    })
}
