use crate::constants::{KEY_FILE_ENV, STORAGE_FILE_NAME, STORAGE_SALT};
use std::{env, error::Error, fs, path::PathBuf};

/// File-backed store for the single Gemini API key.
///
/// The stored value is XOR-obfuscated against a fixed salt and base64-encoded.
/// This defends only against casual inspection of storage content, not against
/// a motivated reader of the client code, since the salt is embedded in the
/// shipped client.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolves the key file location: `MOOD_CANVAS_KEY_FILE` if set,
    /// otherwise `$HOME/.mood_canvas_api_key`.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        if let Ok(path) = env::var(KEY_FILE_ENV) {
            return Ok(Self::new(PathBuf::from(path)));
        }
        let home = env::var("HOME").or_else(|_| env::var("USERPROFILE"))?;
        Ok(Self::new(PathBuf::from(home).join(STORAGE_FILE_NAME)))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Persists the key, overwriting any prior value. An empty or
    /// whitespace-only token is silently ignored.
    pub fn save(&self, token: &str) -> Result<(), Box<dyn Error>> {
        if token.trim().is_empty() {
            return Ok(());
        }
        fs::write(&self.path, obfuscate(token))?;
        log::debug!("credential written to {}", self.path.display());
        Ok(())
    }

    /// `None` if no key is stored. A stored value that fails to decode comes
    /// back as `Some("")`; callers treat that as "no usable credential".
    pub fn load(&self) -> Option<String> {
        let stored = fs::read_to_string(&self.path).ok()?;
        Some(deobfuscate(stored.trim()))
    }

    pub fn clear(&self) -> Result<(), Box<dyn Error>> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

fn xor_with_salt(bytes: &[u8]) -> Vec<u8> {
    let salt = STORAGE_SALT.as_bytes();
    bytes
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ salt[i % salt.len()])
        .collect()
}

pub fn obfuscate(token: &str) -> String {
    base64::encode(xor_with_salt(token.as_bytes()))
}

/// XOR is self-inverse under the same key stream, so decoding is base64
/// followed by the same transform. Returns an empty string on malformed input.
pub fn deobfuscate(stored: &str) -> String {
    let decoded = match base64::decode(stored) {
        Ok(bytes) => bytes,
        Err(_) => return String::new(),
    };
    String::from_utf8(xor_with_salt(&decoded)).unwrap_or_default()
}
