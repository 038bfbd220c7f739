//! API key storage for the model endpoint
//!
//! Keys are resolved from the environment first, then the system keyring.
//! When neither holds a key, the interactive selection flow prompts the
//! user once and persists the entered key to the keyring so subsequent
//! runs need no prompt.

use crate::error::{PetrosphereError, Result};
use std::io::{BufRead, Write};

/// Environment variables consulted before the keyring, in order
const KEY_ENV_VARS: &[&str] = &["PETROSPHERE_API_KEY", "GEMINI_API_KEY"];

/// Keyring-backed API key store
///
/// # Examples
///
/// ```no_run
/// use petrosphere::credentials::ApiKeyStore;
///
/// let store = ApiKeyStore::new();
/// let key = store.get()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ApiKeyStore {
    keyring_service: String,
    keyring_user: String,
}

impl Default for ApiKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiKeyStore {
    /// Create a store using the default keyring entry
    pub fn new() -> Self {
        Self {
            keyring_service: "petrosphere".to_string(),
            keyring_user: "gemini_api_key".to_string(),
        }
    }

    /// Create a store bound to a custom keyring entry (used by tests)
    pub fn with_entry(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            keyring_service: service.into(),
            keyring_user: user.into(),
        }
    }

    /// Resolve the API key without prompting
    ///
    /// Checks the environment variables first, then the keyring.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if no key is stored anywhere
    pub fn get(&self) -> Result<String> {
        for var in KEY_ENV_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.is_empty() {
                    tracing::debug!("Using API key from {}", var);
                    return Ok(key);
                }
            }
        }

        let entry = keyring::Entry::new(&self.keyring_service, &self.keyring_user)?;
        match entry.get_password() {
            Ok(key) if !key.is_empty() => {
                tracing::debug!("Using API key from keyring");
                Ok(key)
            }
            _ => Err(PetrosphereError::MissingCredentials(format!(
                "no API key found; set {} or run `petrosphere auth`",
                KEY_ENV_VARS[0]
            ))
            .into()),
        }
    }

    /// Resolve the API key, running the selection flow if none is stored
    ///
    /// Prompts on stdin and blocks until a key is entered, then persists
    /// it to the keyring. Called lazily by image synthesis, and directly
    /// by the `auth` command.
    ///
    /// # Errors
    ///
    /// Returns error if the prompt is aborted or the keyring write fails
    pub fn ensure_selected(&self) -> Result<String> {
        if let Ok(key) = self.get() {
            return Ok(key);
        }

        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();
        let key = self.select_interactive(&mut lines)?;
        self.store(&key)?;
        Ok(key)
    }

    /// Run the selection prompt against an arbitrary line source
    pub(crate) fn select_interactive<I>(&self, lines: &mut I) -> Result<String>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        println!("No API key is configured for the model endpoint.");
        print!("Paste your API key: ");
        std::io::stdout().flush()?;

        let line = lines
            .next()
            .transpose()?
            .ok_or_else(|| PetrosphereError::MissingCredentials("no key entered".to_string()))?;
        let key = line.trim().to_string();
        if key.is_empty() {
            return Err(PetrosphereError::MissingCredentials("no key entered".to_string()).into());
        }
        Ok(key)
    }

    /// Persist a key to the keyring
    ///
    /// # Errors
    ///
    /// Returns error if the keyring write fails
    pub fn store(&self, key: &str) -> Result<()> {
        let entry = keyring::Entry::new(&self.keyring_service, &self.keyring_user)?;
        entry.set_password(key)?;
        tracing::info!(
            "Stored API key in keyring ({}/{})",
            self.keyring_service,
            self.keyring_user
        );
        Ok(())
    }

    /// Remove the stored key from the keyring
    ///
    /// # Errors
    ///
    /// Returns error if the keyring delete fails for a reason other than
    /// the entry being absent
    pub fn clear(&self) -> Result<()> {
        let entry = keyring::Entry::new(&self.keyring_service, &self.keyring_user)?;
        match entry.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
