//! Canonical home directory resolution for asr
//!
//! Single source of truth for home resolution across the relay. Supports
//! custom deployments and testing via the `ASR_HOME` environment variable.
//!
//! # Precedence
//!
//! 1. `ASR_HOME` environment variable (if set and non-empty)
//! 2. `dirs::home_dir()` platform default
//!
//! Integration tests MUST use `ASR_HOME` to point the relay at a temp
//! directory rather than mutating the real home.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the home directory for relay operations.
///
/// # Errors
///
/// Returns an error only when `ASR_HOME` is unset and the platform home
/// directory cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    // Check ASR_HOME first (useful for testing and custom deployments)
    if let Ok(home) = std::env::var("ASR_HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    // Fall back to platform default
    dirs::home_dir().context("Could not determine home directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn asr_home_overrides_platform_default() {
        let original = env::var("ASR_HOME").ok();
        unsafe { env::set_var("ASR_HOME", "/custom/home") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, PathBuf::from("/custom/home"));

        unsafe {
            match original {
                Some(v) => env::set_var("ASR_HOME", v),
                None => env::remove_var("ASR_HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn empty_asr_home_falls_back_to_platform_default() {
        let original = env::var("ASR_HOME").ok();
        unsafe { env::set_var("ASR_HOME", "") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, dirs::home_dir().unwrap());

        unsafe {
            match original {
                Some(v) => env::set_var("ASR_HOME", v),
                None => env::remove_var("ASR_HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn whitespace_in_asr_home_is_trimmed() {
        let original = env::var("ASR_HOME").ok();
        unsafe { env::set_var("ASR_HOME", "  /custom/home  ") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, PathBuf::from("/custom/home"));

        unsafe {
            match original {
                Some(v) => env::set_var("ASR_HOME", v),
                None => env::remove_var("ASR_HOME"),
            }
        }
    }
}
