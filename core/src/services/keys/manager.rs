//! Signing and encryption key pair management

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::jwk::jwk_set;
use super::openssl::OpensslCliProvider;
use super::provider::{validate_rsa_bits, KeyCipherProvider, RsaKeyProvider};
use crate::domain::{KeyPairFiles, KeyUse, LoadedKeys, PemKeyPair, KEYS_DIR_NAME, SETUP_TOKEN_FILE};
use crate::errors::{DomainError, DomainResult, KeyError};
use keys_shared::config::{KeyProviderKind, KeyStoreConfig};

/// Manages the token-signing and encryption RSA key pairs of the identity service
///
/// All key files live under `<base directory>/keys`. Paths are computed at
/// construction; nothing touches the filesystem until keys are generated or
/// loaded.
#[derive(Clone)]
pub struct KeyManager {
    /// `<base>/keys`
    directory: PathBuf,
    /// Signing key pair files
    sig: KeyPairFiles,
    /// Encryption key pair files
    enc: KeyPairFiles,
    /// Setup token file, owned by the setup flow
    setup: PathBuf,
    /// Key generation backend
    provider: Arc<dyn KeyCipherProvider>,
}

impl fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManager")
            .field("directory", &self.directory)
            .field("sig", &self.sig)
            .field("enc", &self.enc)
            .field("setup", &self.setup)
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl KeyManager {
    /// Creates a key manager rooted at `base_directory`, or at the current
    /// working directory when `None`, using in-process key generation.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use keys_core::services::keys::KeyManager;
    ///
    /// let manager = KeyManager::new(Some(Path::new("/var/lib/identity")));
    /// let keys = manager.load_keypairs(true).expect("key pairs");
    /// println!("{}", keys.jwks.to_json().unwrap());
    /// ```
    pub fn new(base_directory: Option<&Path>) -> Self {
        Self::with_provider(base_directory, Arc::new(RsaKeyProvider::default()))
    }

    /// Creates a key manager that generates keys with `provider`
    pub fn with_provider(base_directory: Option<&Path>, provider: Arc<dyn KeyCipherProvider>) -> Self {
        let base = match base_directory {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().unwrap_or_else(|e| {
                warn!("Could not determine current directory ({}), using '.'", e);
                PathBuf::from(".")
            }),
        };

        let directory = base.join(KEYS_DIR_NAME);

        Self {
            sig: KeyPairFiles::for_use(&directory, KeyUse::Sig),
            enc: KeyPairFiles::for_use(&directory, KeyUse::Enc),
            setup: directory.join(SETUP_TOKEN_FILE),
            directory,
            provider,
        }
    }

    /// Creates a key manager from the shared key store configuration
    ///
    /// # Returns
    ///
    /// * `Ok(KeyManager)` - Manager with the configured backend
    /// * `Err(DomainError::Validation)` - Unsupported RSA key size
    pub fn from_config(config: &KeyStoreConfig) -> DomainResult<Self> {
        validate_rsa_bits(config.rsa_bits)?;

        let provider: Arc<dyn KeyCipherProvider> = match config.provider {
            KeyProviderKind::Rsa => Arc::new(RsaKeyProvider::new(config.rsa_bits)?),
            KeyProviderKind::Openssl => Arc::new(OpensslCliProvider::new(
                config.openssl_path.clone(),
                config.rsa_bits,
                Duration::from_secs(config.openssl_timeout_secs),
            )),
        };

        Ok(Self::with_provider(config.directory.as_deref(), provider))
    }

    /// Directory holding the key files
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Signing key pair files
    pub fn sig_files(&self) -> &KeyPairFiles {
        &self.sig
    }

    /// Encryption key pair files
    pub fn enc_files(&self) -> &KeyPairFiles {
        &self.enc
    }

    /// Location of the setup token
    pub fn setup_token_path(&self) -> &Path {
        &self.setup
    }

    /// Name of the key generation backend
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Writes a fresh RSA key pair to `public` and `private`, replacing any
    /// existing files and creating missing parent directories.
    ///
    /// Both PEMs are produced before anything is written, so a failing
    /// backend leaves the files untouched. When `public` and `private` name
    /// the same file it ends up holding the public key.
    pub fn generate_key_pair(
        provider: &dyn KeyCipherProvider,
        public: &Path,
        private: &Path,
    ) -> DomainResult<()> {
        create_parent_dir(public)?;
        create_parent_dir(private)?;

        let private_pem = provider.generate_private_key()?;
        let public_pem = provider.derive_public_key(&private_pem)?;

        let private_tmp = stage(private, &private_pem, KeyRole::Private)?;
        let public_tmp = match stage(public, &public_pem, KeyRole::Public) {
            Ok(tmp) => tmp,
            Err(e) => {
                let _ = fs::remove_file(&private_tmp);
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&private_tmp, private) {
            let _ = fs::remove_file(&private_tmp);
            let _ = fs::remove_file(&public_tmp);
            return Err(KeyError::io(private, e).into());
        }

        if let Err(e) = fs::rename(&public_tmp, public) {
            // The new private key must not sit next to an old public key
            let _ = fs::remove_file(&public_tmp);
            let _ = fs::remove_file(private);
            return Err(KeyError::io(public, e).into());
        }

        info!(
            backend = provider.name(),
            public = %public.display(),
            private = %private.display(),
            "Generated RSA key pair"
        );
        Ok(())
    }

    /// Generates the signing pair, then the encryption pair.
    /// Stops at the first failure.
    pub fn generate_key_pairs(&self) -> DomainResult<()> {
        Self::generate_key_pair(self.provider.as_ref(), &self.sig.public, &self.sig.private)?;
        Self::generate_key_pair(self.provider.as_ref(), &self.enc.public, &self.enc.private)?;
        Ok(())
    }

    /// Loads both key pairs and derives the public JWK Set.
    ///
    /// When any of the four PEM files cannot be read and `recurse` is set,
    /// new key pairs are generated and loading is retried once without
    /// recursion.
    ///
    /// # Returns
    ///
    /// * `Ok(LoadedKeys)` - All four PEMs and the JWK Set (`sig` entry first)
    /// * `Err(KeyError::Load)` - Keys absent and not (re)generated
    /// * `Err(KeyError::Generation)` - Regeneration failed
    /// * `Err(KeyError::InvalidKey)` - A public key file does not hold an RSA key
    pub fn load_keypairs(&self, recurse: bool) -> DomainResult<LoadedKeys> {
        let (sig, enc) = match self.read_key_pairs()? {
            Some(pairs) => pairs,
            None if recurse => {
                info!(directory = %self.directory.display(), "Key pairs not found, generating new ones");
                self.generate_key_pairs()?;
                return self.load_keypairs(false);
            }
            None => return Err(KeyError::load(&self.directory).into()),
        };

        let jwks = jwk_set(&sig.public, &enc.public)?;
        debug!(directory = %self.directory.display(), "Loaded key pairs");

        Ok(LoadedKeys { sig, enc, jwks })
    }

    /// Loads the key pairs, generating them first if they are missing
    pub fn load_or_generate(&self) -> DomainResult<LoadedKeys> {
        self.load_keypairs(true)
    }

    /// [`load_keypairs`](Self::load_keypairs) on the blocking thread pool
    pub async fn load_keypairs_async(&self, recurse: bool) -> DomainResult<LoadedKeys> {
        let manager = self.clone();
        tokio::task::spawn_blocking(move || manager.load_keypairs(recurse))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Key loading task failed: {}", e),
            })?
    }

    /// [`generate_key_pairs`](Self::generate_key_pairs) on the blocking thread pool
    pub async fn generate_key_pairs_async(&self) -> DomainResult<()> {
        let manager = self.clone();
        tokio::task::spawn_blocking(move || manager.generate_key_pairs())
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Key generation task failed: {}", e),
            })?
    }

    /// Reads all four PEM files; `None` if any of them is unreadable
    fn read_key_pairs(&self) -> DomainResult<Option<(PemKeyPair, PemKeyPair)>> {
        let read_pair = |files: &KeyPairFiles| -> DomainResult<Option<PemKeyPair>> {
            let public = read_pem(&files.public)?;
            let private = read_pem(&files.private)?;
            Ok(public.zip(private).map(|(public, private)| PemKeyPair { public, private }))
        };

        let sig = read_pair(&self.sig)?;
        let enc = read_pair(&self.enc)?;
        Ok(sig.zip(enc))
    }
}

fn read_pem(path: &Path) -> DomainResult<Option<String>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), "Key file not readable: {}", e);
            return Ok(None);
        }
    };

    if !bytes.is_ascii() {
        return Err(KeyError::invalid_key(format!("{} is not an ASCII PEM file", path.display())).into());
    }

    // ASCII is valid UTF-8
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

fn create_parent_dir(path: &Path) -> DomainResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| KeyError::io(parent, e).into())
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyRole {
    Public,
    Private,
}

impl KeyRole {
    fn tmp_suffix(self) -> &'static str {
        match self {
            KeyRole::Public => ".pub.tmp",
            KeyRole::Private => ".prv.tmp",
        }
    }
}

/// Write `contents` to a temporary sibling of `path` and return its location.
/// Private keys are created owner-only on unix.
fn stage(path: &Path, contents: &str, role: KeyRole) -> DomainResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| KeyError::io(path, "path has no file name"))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(role.tmp_suffix());
    let tmp = path.with_file_name(tmp_name);

    // Leftover from an interrupted run; never write through it
    match fs::remove_file(&tmp) {
        Ok(()) => debug!(path = %tmp.display(), "Removed stale temporary key file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(KeyError::io(&tmp, e).into()),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(if role == KeyRole::Private { 0o600 } else { 0o644 });
    }

    let written = options
        .open(&tmp)
        .and_then(|mut file| file.write_all(contents.as_bytes()).and_then(|_| file.sync_all()));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(KeyError::io(&tmp, e).into());
    }

    Ok(tmp)
}
