//! CLI argument parsing for the klinik-import binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::defaults::PROFILE_FULL;

#[derive(Parser)]
#[command(name = "klinik-import", about = "Import patient spreadsheets into the clinic Patient Service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read, validate and submit a patient file (.xlsx, .xls or .csv)
    Import {
        /// Spreadsheet or CSV file to import
        file: PathBuf,
        /// Import profile: "lengkap" (with RM number and registration date) or "dasar"
        #[arg(long, default_value = PROFILE_FULL)]
        profile: String,
        /// Validate and report only, do not submit
        #[arg(long)]
        dry_run: bool,
    },
    /// Write the CSV import template
    Template {
        #[arg(long, default_value = PROFILE_FULL)]
        profile: String,
        /// Output file (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_import_defaults_to_full_profile() {
        let cli = Cli::parse_from(["klinik-import", "import", "pasien.xlsx"]);
        match cli.command {
            Command::Import { file, profile, dry_run } => {
                assert_eq!(file, PathBuf::from("pasien.xlsx"));
                assert_eq!(profile, PROFILE_FULL);
                assert!(!dry_run);
            }
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn test_cli_import_dry_run_with_profile() {
        let cli = Cli::parse_from(["klinik-import", "import", "a.csv", "--profile", "dasar", "--dry-run"]);
        assert!(matches!(
            cli.command,
            Command::Import { dry_run: true, ref profile, .. } if profile == "dasar"
        ));
    }

    #[test]
    fn test_cli_template_output() {
        let cli = Cli::parse_from(["klinik-import", "template", "-o", "template.csv"]);
        assert!(matches!(
            cli.command,
            Command::Template { output: Some(ref p), .. } if p == &PathBuf::from("template.csv")
        ));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["klinik-import"]).is_err());
    }
}
