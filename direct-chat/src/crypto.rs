//! Symmetric encryption for cookies.
//!
//! Values are encrypted with AES-128-GCM-SIV using the key from the global configuration.
//! The 96-bit nonce is prepended to the ciphertext and the result is encoded
//! with URL-safe base64, so it can be placed in a cookie without escaping.
use aes::Aes128;
use aes_gcm_siv::{
    aead::{Aead, KeyInit},
    Aes128GcmSiv, AesGcmSiv, Key, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use rand::Rng;
use thiserror::Error;

use crate::config::get_config;

const NONCE_LEN: usize = 96 / 8;

#[derive(Error, Debug)]
pub enum Error {
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("aes error: {0}")]
    AesError(aes_gcm_siv::Error),

    #[error("ciphertext is too short")]
    TooShort,
}

impl From<aes_gcm_siv::Error> for Error {
    fn from(error: aes_gcm_siv::Error) -> Error {
        Error::AesError(error)
    }
}

/// Encrypt some bytes using the global configured encryption key.
///
/// # Example
///
/// ```
/// use direct_chat::crypto::{encrypt, decrypt};
///
/// let ciphertext = encrypt(b"hello world").expect("encryption failed");
/// assert_eq!(decrypt(&ciphertext).unwrap(), b"hello world");
/// ```
pub fn encrypt(data: &[u8]) -> Result<String, Error> {
    encrypt_with(&get_config().aes_key, data)
}

/// Decrypt a value produced by [`encrypt`].
pub fn decrypt(data: &str) -> Result<Vec<u8>, Error> {
    decrypt_with(&get_config().aes_key, data)
}

pub fn encrypt_with(key: &Key<AesGcmSiv<Aes128>>, data: &[u8]) -> Result<String, Error> {
    let nonce = rand::thread_rng().gen::<[u8; NONCE_LEN]>();
    let cipher = Aes128GcmSiv::new(key);
    let ciphertext = cipher.encrypt(Nonce::from_slice(&nonce), data)?;

    let mut bytes = nonce.to_vec();
    bytes.extend(ciphertext);

    Ok(general_purpose::URL_SAFE_NO_PAD.encode(&bytes))
}

pub fn decrypt_with(key: &Key<AesGcmSiv<Aes128>>, data: &str) -> Result<Vec<u8>, Error> {
    let bytes = general_purpose::URL_SAFE_NO_PAD.decode(data)?;

    if bytes.len() < NONCE_LEN {
        return Err(Error::TooShort);
    }

    let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
    let cipher = Aes128GcmSiv::new(key);

    Ok(cipher.decrypt(Nonce::from_slice(nonce), ciphertext)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let text = "test hello world";
        let cipher = encrypt(text.as_bytes()).expect("encrypt");
        let plain = decrypt(&cipher).expect("decrypt");
        assert_eq!(text, String::from_utf8_lossy(&plain));
    }

    #[test]
    fn test_wrong_key() {
        let key = Key::<AesGcmSiv<Aes128>>::clone_from_slice(&[7u8; 16]);
        let other = Key::<AesGcmSiv<Aes128>>::clone_from_slice(&[8u8; 16]);

        let cipher = encrypt_with(&key, b"session").expect("encrypt");
        assert!(decrypt_with(&other, &cipher).is_err());
        assert!(decrypt_with(&key, "c2hvcnQ").is_err());
    }
}
