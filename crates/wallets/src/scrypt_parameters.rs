//! Scrypt parameters for wallet encryption.
//!
//! One set of parameters is stored in the wallet file and shared by every
//! account in it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Nonce bytes taken from the front of the derived key stream.
pub const NONCE_SIZE: usize = 12;

/// AES-256 key bytes taken from the end of the derived key stream.
pub const KEY_SIZE: usize = 32;

const MAX_DK_LEN: u32 = 64;

/// Scrypt parameters for key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptParameters {
    /// CPU/memory cost parameter (N).
    pub n: u32,

    /// Block size parameter (r).
    pub r: u32,

    /// Parallelization parameter (p).
    pub p: u32,

    /// Derived key length.
    #[serde(rename = "dkLen", default = "default_dk_len")]
    pub dk_len: u32,
}

fn default_dk_len() -> u32 {
    MAX_DK_LEN
}

impl ScryptParameters {
    /// Creates new scrypt parameters with the standard 64-byte output.
    pub fn new(n: u32, r: u32, p: u32) -> Result<Self> {
        Self::new_with_dk_len(n, r, p, MAX_DK_LEN)
    }

    /// Creates new scrypt parameters with derived key length.
    pub fn new_with_dk_len(n: u32, r: u32, p: u32, dk_len: u32) -> Result<Self> {
        let params = Self { n, r, p, dk_len };
        params.validate()?;
        Ok(params)
    }

    /// Gets the default parameters written into new wallets.
    pub fn default_wallet() -> Self {
        Self {
            n: 16384, // 2^14
            r: 8,
            p: 8,
            dk_len: MAX_DK_LEN,
        }
    }

    /// Gets fast scrypt parameters.
    pub fn fast() -> Self {
        Self {
            n: 1024, // 2^10
            r: 8,
            p: 1,
            dk_len: MAX_DK_LEN,
        }
    }

    /// Test parameters (very fast, for testing only).
    pub fn test() -> Self {
        Self {
            n: 16, // 2^4
            r: 8,
            p: 8,
            dk_len: MAX_DK_LEN,
        }
    }

    /// Validates the scrypt parameters.
    pub fn validate(&self) -> Result<()> {
        // N must be a power of 2 and greater than 1
        if self.n <= 1 || (self.n & (self.n - 1)) != 0 {
            return Err(Error::InvalidScryptParameters(
                "N must be a power of 2 greater than 1".to_string(),
            ));
        }

        if self.r == 0 {
            return Err(Error::InvalidScryptParameters("r must be greater than 0".to_string()));
        }

        if self.p == 0 {
            return Err(Error::InvalidScryptParameters("p must be greater than 0".to_string()));
        }

        // Check for overflow conditions
        if self.r > u32::MAX / 128 {
            return Err(Error::InvalidScryptParameters("r parameter is too large".to_string()));
        }

        if self.p > (u32::MAX - 1) / (128 * self.r) {
            return Err(Error::InvalidScryptParameters("p parameter is too large".to_string()));
        }

        if self.n > u32::MAX / (128 * self.r) {
            return Err(Error::InvalidScryptParameters("N parameter is too large".to_string()));
        }

        // The nonce and the key must both fit without overlapping
        let min_dk_len = (NONCE_SIZE + KEY_SIZE) as u32;
        if self.dk_len < min_dk_len || self.dk_len > MAX_DK_LEN {
            return Err(Error::InvalidScryptParameters(format!(
                "dkLen must be between {} and {}",
                min_dk_len, MAX_DK_LEN
            )));
        }

        Ok(())
    }

    /// Gets the memory usage in bytes.
    pub fn memory_usage(&self) -> u64 {
        128 * self.r as u64 * self.n as u64
    }

    /// Gets the log2 of N parameter.
    pub fn log_n(&self) -> u8 {
        self.n.trailing_zeros() as u8
    }

    /// Converts to scrypt crate parameters.
    pub fn to_scrypt_params(&self) -> Result<scrypt::Params> {
        self.validate()?;
        scrypt::Params::new(self.log_n(), self.r, self.p, self.dk_len as usize)
            .map_err(|e| Error::InvalidScryptParameters(e.to_string()))
    }
}

impl Default for ScryptParameters {
    fn default() -> Self {
        Self::default_wallet()
    }
}

impl std::fmt::Display for ScryptParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScryptParameters(N={}, r={}, p={}, dkLen={})",
            self.n, self.r, self.p, self.dk_len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrypt_parameters_validation() {
        assert!(ScryptParameters::new(16384, 8, 8).is_ok());
        assert!(ScryptParameters::new(1, 8, 8).is_err()); // N must be > 1
        assert!(ScryptParameters::new(16383, 8, 8).is_err()); // N must be power of 2
        assert!(ScryptParameters::new(16384, 0, 8).is_err()); // r must be > 0
        assert!(ScryptParameters::new(16384, 8, 0).is_err()); // p must be > 0
        assert!(ScryptParameters::new_with_dk_len(16384, 8, 8, 32).is_err());
        assert!(ScryptParameters::new_with_dk_len(16384, 8, 8, 65).is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ScryptParameters::default_wallet().validate().is_ok());
        assert!(ScryptParameters::fast().validate().is_ok());
        assert!(ScryptParameters::test().validate().is_ok());
    }

    #[test]
    fn test_log_n() {
        let params = ScryptParameters::new(16384, 8, 8).expect("valid params");
        assert_eq!(params.log_n(), 14);
        assert_eq!(params.memory_usage(), 128 * 8 * 16384);
    }

    #[test]
    fn test_wallet_json_form() {
        let params: ScryptParameters =
            serde_json::from_str(r#"{"n":16384,"r":8,"p":8,"dkLen":64}"#).expect("valid json");
        assert_eq!(params, ScryptParameters::default_wallet());

        let without_len: ScryptParameters =
            serde_json::from_str(r#"{"n":16384,"r":8,"p":8}"#).expect("valid json");
        assert_eq!(without_len.dk_len, 64);

        let json = serde_json::to_string(&params).expect("serialize");
        assert!(json.contains("\"dkLen\":64"));
    }
}
