//! Command handlers

pub mod import;
pub mod template;

use anyhow::{Context, Result};

use crate::defaults::{profile_by_name, PROFILE_BASIC, PROFILE_FULL};
use crate::types::ImportProfile;

/// Resolve a `--profile` argument
pub fn resolve_profile(name: &str) -> Result<ImportProfile> {
    profile_by_name(name).with_context(|| {
        format!(
            "Unknown profile '{}' (expected '{}' or '{}')",
            name, PROFILE_FULL, PROFILE_BASIC
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_profile() {
        assert_eq!(resolve_profile("dasar").unwrap().name, PROFILE_BASIC);
        assert_eq!(resolve_profile("Lengkap").unwrap().name, PROFILE_FULL);
        assert!(resolve_profile("klinik").is_err());
    }
}
