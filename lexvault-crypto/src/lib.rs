//! Encryption layer for LexVault.
//!
//! Every document is protected with hybrid (envelope) encryption:
//!
//! 1. **Content key**: a fresh random AES-256 key generated per file,
//!    used once with AES-256-GCM and then discarded.
//! 2. **Wrapped key**: the content key encrypted under the case owner's
//!    RSA public key with OAEP/SHA-256. Only the wrapped form is stored.
//!
//! The owner's private key is never persisted. It arrives with a decrypt
//! request and lives inside a [`SecretScope`] for exactly that request.
//!
//! This architecture means a compromised wrapped key exposes one file,
//! large bodies never pass through RSA, and the at-rest data set contains
//! no secret that the server alone could use to read a document.

mod envelope;
mod error;
mod keys;
mod secret;

pub use envelope::{decrypt, encrypt, EncryptedPayload, IV_SIZE, KEY_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use keys::{
    generate_keypair, parse_private_key, parse_private_key_b64, parse_public_key,
    GeneratedKeyPair, PrivateKeyHandle, PublicKeyHandle, MIN_RSA_BITS,
};
pub use secret::SecretScope;
