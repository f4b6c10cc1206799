//! `template` command

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::resolve_profile;
use crate::services::template::write_template;

pub fn handle_template(profile: &str, output: Option<&Path>) -> Result<()> {
    let profile = resolve_profile(profile)?;

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_template(&profile, file)?;
            info!("Template '{}' written to {}", profile.name, path.display());
        }
        None => write_template(&profile, std::io::stdout().lock())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_written_to_file() {
        let path = std::env::temp_dir().join(format!("template-{}.csv", uuid::Uuid::new_v4()));

        handle_template("dasar", Some(&path)).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with("No,Nama,"));
    }

    #[test]
    fn test_unknown_profile_rejected() {
        assert!(handle_template("semua", None).is_err());
    }
}
