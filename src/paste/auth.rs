//! Password hashing and access tokens for protected pastes.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const SALT_LEN: usize = 16;

/// Salted SHA-256 digest of a paste password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn new(password: &str) -> Self {
        let mut salt = vec![0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let hash = digest(&salt, password);
        Self { salt, hash }
    }

    pub fn from_parts(salt: Vec<u8>, hash: Vec<u8>) -> Self {
        Self { salt, hash }
    }

    pub fn verify(&self, password: &str) -> bool {
        let candidate = digest(&self.salt, password);
        candidate.as_slice().ct_eq(self.hash.as_slice()).into()
    }
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

/// Signs paste ids with the application secret.
///
/// A valid signature proves the holder already presented the paste password.
#[derive(Clone)]
pub struct AuthSigner {
    key: Vec<u8>,
}

impl AuthSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length
        HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size")
    }

    /// Base64url (unpadded) HMAC-SHA256 of the paste id.
    pub fn sign(&self, paste_id: &str) -> String {
        let mut mac = self.mac();
        mac.update(paste_id.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    pub fn verify(&self, paste_id: &str, token: &str) -> bool {
        let Ok(raw) = URL_SAFE_NO_PAD.decode(token) else {
            return false;
        };
        let mut mac = self.mac();
        mac.update(paste_id.as_bytes());
        mac.verify_slice(&raw).is_ok()
    }

    /// Name of the cookie carrying the token for `paste_id`.
    pub fn cookie_name(paste_id: &str) -> String {
        format!("auth_{paste_id}")
    }
}

impl std::fmt::Debug for AuthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSigner").finish_non_exhaustive()
    }
}
