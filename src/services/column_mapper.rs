//! Fuzzy header matching
//!
//! Binds spreadsheet headers to logical patient fields using the profile's
//! alias table. Matching is greedy in the profile's field order: each field
//! takes the first unclaimed header that contains one of its aliases, or is
//! contained in one of them. A claimed header is never offered again, so an
//! ambiguous header goes to whichever field is declared first.

use std::collections::HashSet;

use tracing::debug;

use crate::types::{ImportProfile, PatientField};

/// Logical field -> literal header of the current file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMapping {
    bindings: Vec<(PatientField, String)>,
}

impl ColumnMapping {
    pub fn get(&self, field: PatientField) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, h)| h.as_str())
    }

    pub fn contains(&self, field: PatientField) -> bool {
        self.get(field).is_some()
    }

    /// Bindings in profile order
    pub fn iter(&self) -> impl Iterator<Item = (PatientField, &str)> {
        self.bindings.iter().map(|(f, h)| (*f, h.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Headers of the file that no field claimed
    pub fn unmapped<'a>(&self, headers: &[&'a str]) -> Vec<&'a str> {
        headers
            .iter()
            .copied()
            .filter(|h| !self.bindings.iter().any(|(_, bound)| bound == h))
            .collect()
    }
}

fn header_matches(header: &str, alias: &str) -> bool {
    !alias.is_empty() && (header.contains(alias) || alias.contains(header))
}

/// Build the mapping for one file's header row
pub fn map_columns(headers: &[&str], profile: &ImportProfile) -> ColumnMapping {
    let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut bindings = Vec::new();

    for entry in &profile.fields {
        let found = normalized.iter().enumerate().find(|(idx, header)| {
            !claimed.contains(idx)
                && !header.is_empty()
                && entry.aliases.iter().any(|alias| header_matches(header, alias))
        });

        if let Some((idx, _)) = found {
            claimed.insert(idx);
            bindings.push((entry.field, headers[idx].to_string()));
            debug!("Column '{}' mapped to {}", headers[idx], entry.field);
        }
    }

    ColumnMapping { bindings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{basic_profile, full_profile};

    #[test]
    fn test_abbreviated_headers_map_to_fields() {
        let headers = ["No", "Nama Pasien", "Tgl Lahir", "JK", "Alamat", "No. HP"];
        let mapping = map_columns(&headers, &basic_profile());

        assert_eq!(mapping.get(PatientField::No), Some("No"));
        assert_eq!(mapping.get(PatientField::Nama), Some("Nama Pasien"));
        assert_eq!(mapping.get(PatientField::TanggalLahir), Some("Tgl Lahir"));
        assert_eq!(mapping.get(PatientField::JenisKelamin), Some("JK"));
        assert_eq!(mapping.get(PatientField::Alamat), Some("Alamat"));
        assert_eq!(mapping.get(PatientField::Telepon), Some("No. HP"));
    }

    #[test]
    fn test_header_contained_in_alias_matches() {
        // "tanggal" is a substring of the "tanggal lahir" alias
        let mapping = map_columns(&["Nama", "Tanggal"], &full_profile());
        assert_eq!(mapping.get(PatientField::TanggalLahir), Some("Tanggal"));
        assert!(!mapping.contains(PatientField::TanggalMendaftar));
    }

    #[test]
    fn test_literal_casing_is_preserved() {
        let mapping = map_columns(&["  NAMA LENGKAP "], &basic_profile());
        assert_eq!(mapping.get(PatientField::Nama), Some("  NAMA LENGKAP "));
    }

    #[test]
    fn test_earlier_declared_field_wins_ambiguous_header() {
        let headers = ["Nama", "Telepon Darurat", "Telepon"];
        let mapping = map_columns(&headers, &basic_profile());

        // Telepon is declared first and claims the first header containing "telepon"
        assert_eq!(mapping.get(PatientField::Telepon), Some("Telepon Darurat"));
        assert_eq!(mapping.get(PatientField::TeleponDarurat), Some("Telepon"));
    }

    #[test]
    fn test_header_binds_only_once() {
        let mapping = map_columns(&["Tanggal"], &full_profile());
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get(PatientField::TanggalLahir), Some("Tanggal"));
    }

    #[test]
    fn test_blank_headers_never_match() {
        let mapping = map_columns(&["", "   ", "Nama"], &basic_profile());
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get(PatientField::Nama), Some("Nama"));
    }

    #[test]
    fn test_registration_date_only_in_full_profile() {
        let headers = ["Nama", "Tgl Daftar"];
        assert!(map_columns(&headers, &full_profile()).contains(PatientField::TanggalMendaftar));
        assert!(!map_columns(&headers, &basic_profile()).contains(PatientField::TanggalMendaftar));
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let headers = ["No", "No RM", "Nama", "Tgl Lahir", "Jenis Kelamin", "Telp", "Berat", "Tinggi"];
        let profile = full_profile();
        let first = map_columns(&headers, &profile);
        for _ in 0..10 {
            assert_eq!(map_columns(&headers, &profile), first);
        }
        assert_eq!(first.get(PatientField::NoRm), Some("No RM"));
        assert_eq!(first.get(PatientField::BeratBadan), Some("Berat"));
        assert_eq!(first.get(PatientField::TinggiBadan), Some("Tinggi"));
    }

    #[test]
    fn test_unmapped_headers_reported() {
        let headers = ["Nama", "Email", "Umur"];
        let mapping = map_columns(&headers, &basic_profile());
        assert_eq!(mapping.unmapped(&headers), vec!["Email", "Umur"]);
    }
}
