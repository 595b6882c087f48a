//! Client-side credential encryption.
//!
//! Credential values are encrypted with the platform's RSA public key before
//! they leave the process; the server is the only party able to decrypt them.

use crate::error::{OrbitalError, OrbitalResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use orbital_core::profile::Credential;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};

/// Encrypt a plaintext value with a PEM public key.
///
/// Returns the base64 encoding of the RSA PKCS#1 v1.5 ciphertext. The padding
/// is randomized, so two calls with the same plaintext produce different
/// ciphertext. PKCS#1 v1.5 caps the payload at `key_size_bytes - 11`.
pub fn encrypt_with_public_key(plaintext: &str, pem_public_key: &str) -> OrbitalResult<String> {
    let public_key = parse_public_key_pem(pem_public_key)?;

    let mut rng = rand::thread_rng();
    let ciphertext = public_key
        .encrypt(&mut rng, Pkcs1v15Encrypt, plaintext.as_bytes())
        .map_err(|e| OrbitalError::Encryption(e.to_string()))?;

    Ok(BASE64.encode(ciphertext))
}

/// Encrypt the `data` field of every credential, preserving all other fields.
pub fn encrypt_credentials(
    credentials: Vec<Credential>,
    pem_public_key: &str,
) -> OrbitalResult<Vec<Credential>> {
    credentials
        .into_iter()
        .map(|credential| {
            Ok(Credential {
                data: encrypt_with_public_key(&credential.data, pem_public_key)?,
                ..credential
            })
        })
        .collect()
}

/// Parse a PEM public key, accepting both SPKI (`BEGIN PUBLIC KEY`) and
/// PKCS#1 (`BEGIN RSA PUBLIC KEY`) encodings.
fn parse_public_key_pem(pem: &str) -> OrbitalResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| OrbitalError::Encryption(e.to_string()))
}
