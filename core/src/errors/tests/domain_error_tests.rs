//! Unit tests for domain error types

use std::path::Path;

use crate::errors::{DomainError, KeyError};

#[test]
fn test_generation_error_message_names_backend() {
    let error = KeyError::generation("OpenSSL", "exit status: 1");
    let message = error.to_string();
    assert!(message.starts_with("Failed to generate keys using OpenSSL"));
    assert!(message.contains("exit status: 1"));
    assert!(message.contains("Please ensure you have OpenSSL installed and configured"));
}

#[test]
fn test_rsa_generation_error_has_no_install_hint() {
    let error = KeyError::rsa_generation("invalid prime");
    assert_eq!(error.to_string(), "RSA key generation failed: invalid prime");
}

#[test]
fn test_load_error_names_directory() {
    let error = KeyError::load(Path::new("/srv/identity/keys"));
    assert_eq!(
        error.to_string(),
        "Unable to read the token-signing key pair from /srv/identity/keys"
    );
}

#[test]
fn test_domain_error_bridges_key_error() {
    let error: DomainError = KeyError::load(Path::new("keys")).into();
    assert!(error.is_load_error());
    assert!(!error.is_generation_error());
    assert!(error.to_string().contains("keys"));

    let error: DomainError = KeyError::rsa_generation("bad modulus size").into();
    assert!(error.is_generation_error());
    assert!(!error.is_load_error());
}

#[test]
fn test_io_error_includes_path() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error = KeyError::io(Path::new("/root/keys/sig.rsa.prv.pem"), io);
    let message = error.to_string();
    assert!(message.contains("/root/keys/sig.rsa.prv.pem"));
    assert!(message.contains("denied"));
}

#[test]
fn test_non_key_domain_errors() {
    let error = DomainError::Internal {
        message: "worker panicked".to_string(),
    };
    assert_eq!(error.to_string(), "Internal error: worker panicked");
    assert!(!error.is_load_error());
}
