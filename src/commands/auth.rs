//! API key setup handler

use crate::credentials::ApiKeyStore;
use crate::error::Result;
use colored::Colorize;
use std::io::BufRead;

/// Run the credential selection flow explicitly
///
/// Prompts for a key on stdin and persists it to the keyring. Image
/// synthesis triggers the same flow lazily when no key is stored yet.
pub fn run_auth() -> Result<()> {
    let store = ApiKeyStore::new();

    if store.get().is_ok() {
        println!("An API key is already configured. Entering a new one replaces it.");
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let key = store.select_interactive(&mut lines)?;
    store.store(&key)?;

    println!("{}", "API key stored.".green());
    Ok(())
}
