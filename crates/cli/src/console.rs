//! Terminal password input.

use std::io;

use anyhow::{bail, Result};
use punica_invoker::CredentialPrompt;
use zeroize::Zeroizing;

/// Reads passwords from the terminal without echo.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompt;

impl CredentialPrompt for ConsolePrompt {
    fn ask(&self, message: &str) -> io::Result<String> {
        rpassword::prompt_password(message)
    }
}

/// Asks for a new password twice; both answers must match.
pub fn read_new_password(prompt: &dyn CredentialPrompt) -> Result<Zeroizing<String>> {
    let password = Zeroizing::new(prompt.ask("Please input password: ")?);
    let repeated = Zeroizing::new(prompt.ask("Please repeat password: ")?);
    if *password != *repeated {
        bail!("Password did not match");
    }
    Ok(password)
}

pub fn read_existing_password(prompt: &dyn CredentialPrompt, address: &str) -> Result<Zeroizing<String>> {
    Ok(Zeroizing::new(
        prompt.ask(&format!("Please input account password ({}): ", address))?,
    ))
}
