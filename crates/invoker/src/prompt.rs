//! Password prompting.

use std::io;

/// Asks the operator for a password.
pub trait CredentialPrompt: Send + Sync {
    fn ask(&self, message: &str) -> io::Result<String>;
}

/// Prompt for non-interactive runs: every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl CredentialPrompt for NoPrompt {
    fn ask(&self, message: &str) -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("no terminal to answer '{}'", message.trim()),
        ))
    }
}
