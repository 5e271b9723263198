//! PEM to JWK conversion

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;

use crate::domain::{Jwk, JwkSet, KeyUse, RsaPublicComponents};
use crate::errors::{DomainResult, KeyError};

/// Convert a PEM public key into its JWK components.
///
/// Accepts SubjectPublicKeyInfo (`BEGIN PUBLIC KEY`) and PKCS#1
/// (`BEGIN RSA PUBLIC KEY`) encodings. Modulus and exponent are emitted as
/// unsigned big-endian integers in base64url without padding.
pub fn pem_to_jwk(pem: &str) -> DomainResult<RsaPublicComponents> {
    let key = parse_public_key(pem)?;

    Ok(RsaPublicComponents {
        kty: "RSA".to_string(),
        n: URL_SAFE_NO_PAD.encode(key.n().to_bytes_be()),
        e: URL_SAFE_NO_PAD.encode(key.e().to_bytes_be()),
    })
}

/// Build the published JWK Set from the signing and encryption public keys
pub fn jwk_set(sig_public_pem: &str, enc_public_pem: &str) -> DomainResult<JwkSet> {
    let sig = Jwk::rsa(pem_to_jwk(sig_public_pem)?, KeyUse::Sig);
    let enc = Jwk::rsa(pem_to_jwk(enc_public_pem)?, KeyUse::Enc);
    Ok(JwkSet::new(sig, enc))
}

fn parse_public_key(pem: &str) -> DomainResult<RsaPublicKey> {
    let pem = pem.trim();
    let parsed = if pem.starts_with("-----BEGIN RSA PUBLIC KEY-----") {
        RsaPublicKey::from_pkcs1_pem(pem).map_err(|e| e.to_string())
    } else {
        RsaPublicKey::from_public_key_pem(pem).map_err(|e| e.to_string())
    };

    parsed.map_err(|e| KeyError::invalid_key(format!("Invalid RSA public key: {}", e)).into())
}
