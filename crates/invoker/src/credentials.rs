//! Password resolution for accounts that must be unlocked.
//!
//! Lookup order for an address: the configuration's `password` map, then the
//! batch cache (which only ever holds the default payer), then the prompt.

use std::fmt;

use punica_config::Passwords;
use tracing::debug;
use zeroize::Zeroizing;

use crate::context::ExecutionContext;
use crate::error::{InvokeError, Result};
use crate::prompt::CredentialPrompt;

/// Why an account is being unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Payer,
    Signer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Payer => write!(f, "payer"),
            Role::Signer => write!(f, "signer"),
        }
    }
}

pub struct CredentialResolver<'a> {
    configured: &'a Passwords,
    prompt: &'a dyn CredentialPrompt,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(configured: &'a Passwords, prompt: &'a dyn CredentialPrompt) -> Self {
        Self { configured, prompt }
    }

    /// Asks for the default payer's password once, at the start of a batch,
    /// unless the configuration already has it.
    pub fn prime_default_payer(&self, context: &mut ExecutionContext, default_payer: &str) -> Result<()> {
        if self.configured.get(default_payer).is_some() || context.passwords().contains(default_payer) {
            return Ok(());
        }
        debug!(target: "punica", address = %default_payer, "unlocking default payer");
        let password = self.ask(default_payer, Role::Payer)?;
        context.passwords_mut().insert(default_payer, password);
        Ok(())
    }

    pub fn resolve(&self, context: &ExecutionContext, address: &str, role: Role) -> Result<Zeroizing<String>> {
        if let Some(password) = self.configured.get(address) {
            return Ok(Zeroizing::new(password.to_string()));
        }
        if let Some(password) = context.passwords().get(address) {
            return Ok(Zeroizing::new(password.to_string()));
        }
        self.ask(address, role)
    }

    fn ask(&self, address: &str, role: Role) -> Result<Zeroizing<String>> {
        let message = format!("Please input {} account password ({}): ", role, address);
        self.prompt
            .ask(&message)
            .map(Zeroizing::new)
            .map_err(|e| InvokeError::Prompt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    const PAYER: &str = "AUfeEFiEN6tgwTYrNe65YsyJFS2nPWWwAb";
    const SIGNER: &str = "AbzPjHUCZYwBHRRghZRWfF2ABGg7K9j2bt";

    #[derive(Default)]
    struct ScriptedPrompt {
        answers: Mutex<Vec<String>>,
        asked: Mutex<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn answering(answers: &[&str]) -> Self {
            Self {
                answers: Mutex::new(answers.iter().rev().map(|a| a.to_string()).collect()),
                asked: Mutex::new(Vec::new()),
            }
        }

        fn asked(&self) -> Vec<String> {
            self.asked.lock().expect("lock").clone()
        }
    }

    impl CredentialPrompt for ScriptedPrompt {
        fn ask(&self, message: &str) -> io::Result<String> {
            self.asked.lock().expect("lock").push(message.to_string());
            self.answers
                .lock()
                .expect("lock")
                .pop()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no answer"))
        }
    }

    #[test]
    fn test_configured_password_wins() {
        let mut configured = Passwords::default();
        configured.insert(PAYER, "pw1");
        let prompt = ScriptedPrompt::answering(&["typed"]);
        let resolver = CredentialResolver::new(&configured, &prompt);

        let mut context = ExecutionContext::new();
        resolver.prime_default_payer(&mut context, PAYER).expect("primed");
        assert!(context.passwords().is_empty());

        context
            .passwords_mut()
            .insert(PAYER, Zeroizing::new("cached".to_string()));
        let password = resolver.resolve(&context, PAYER, Role::Payer).expect("resolved");
        assert_eq!(password.as_str(), "pw1");
        assert!(prompt.asked().is_empty());
    }

    #[test]
    fn test_default_payer_prompted_once() {
        let configured = Passwords::default();
        let prompt = ScriptedPrompt::answering(&["typed"]);
        let resolver = CredentialResolver::new(&configured, &prompt);

        let mut context = ExecutionContext::new();
        resolver.prime_default_payer(&mut context, PAYER).expect("primed");
        resolver.prime_default_payer(&mut context, PAYER).expect("still primed");
        for _ in 0..3 {
            let password = resolver.resolve(&context, PAYER, Role::Payer).expect("resolved");
            assert_eq!(password.as_str(), "typed");
        }
        assert_eq!(prompt.asked().len(), 1);
    }

    #[test]
    fn test_other_accounts_are_prompted_each_time() {
        let configured = Passwords::default();
        let prompt = ScriptedPrompt::answering(&["first", "second"]);
        let resolver = CredentialResolver::new(&configured, &prompt);
        let context = ExecutionContext::new();

        assert_eq!(resolver.resolve(&context, SIGNER, Role::Signer).expect("first").as_str(), "first");
        assert_eq!(resolver.resolve(&context, SIGNER, Role::Signer).expect("second").as_str(), "second");
        assert!(prompt.asked()[0].contains("signer"));
        assert!(prompt.asked()[0].contains(SIGNER));

        assert!(matches!(
            resolver.resolve(&context, SIGNER, Role::Signer),
            Err(InvokeError::Prompt(_))
        ));
    }
}
