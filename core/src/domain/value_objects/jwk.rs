//! JSON Web Key value objects published on the OIDC keys endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::key_pair::KeyUse;

/// Algorithm advertised for every published key
pub const JWK_ALGORITHM: &str = "RS256";

/// Public components of an RSA key in JWK encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPublicComponents {
    /// Key type, always "RSA"
    pub kty: String,
    /// Modulus, base64url without padding
    pub n: String,
    /// Public exponent, base64url without padding
    pub e: String,
}

/// A single JSON Web Key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(rename = "use")]
    pub key_use: KeyUse,
    pub alg: String,
    pub n: String,
    pub e: String,
}

impl Jwk {
    /// Tag RSA public components with their use and the RS256 algorithm
    pub fn rsa(components: RsaPublicComponents, key_use: KeyUse) -> Self {
        Self {
            kty: components.kty,
            key_use,
            alg: JWK_ALGORITHM.to_string(),
            n: components.n,
            e: components.e,
        }
    }
}

/// JSON Web Key Set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Set publishing the signing key followed by the encryption key
    pub fn new(sig: Jwk, enc: Jwk) -> Self {
        Self {
            keys: vec![sig, enc],
        }
    }

    /// First key published for `key_use`
    pub fn find(&self, key_use: KeyUse) -> Option<&Jwk> {
        self.keys.iter().find(|key| key.key_use == key_use)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
