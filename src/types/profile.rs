//! Import profiles: which logical fields a file may carry and how their
//! headers are spelled

use super::patient::PatientField;

/// One logical field with its lowercase header aliases
#[derive(Debug, Clone)]
pub struct FieldAliases {
    pub field: PatientField,
    pub aliases: Vec<String>,
}

/// Immutable import configuration.
///
/// Field order matters: the column mapper binds headers greedily in this order.
#[derive(Debug, Clone)]
pub struct ImportProfile {
    pub name: String,
    pub fields: Vec<FieldAliases>,
    pub required: Vec<PatientField>,
}

impl ImportProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            required: Vec::new(),
        }
    }

    /// Append a field with its aliases. Aliases are lower-cased.
    pub fn with_field(mut self, field: PatientField, aliases: &[&str]) -> Self {
        self.fields.push(FieldAliases {
            field,
            aliases: aliases.iter().map(|a| a.trim().to_lowercase()).collect(),
        });
        self
    }

    pub fn with_required(mut self, field: PatientField) -> Self {
        if !self.required.contains(&field) {
            self.required.push(field);
        }
        self
    }

    #[cfg(test)]
    pub fn supports(&self, field: PatientField) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    #[cfg(test)]
    pub fn is_required(&self, field: PatientField) -> bool {
        self.required.contains(&field)
    }

    /// Fields in declaration order
    pub fn field_order(&self) -> impl Iterator<Item = PatientField> + '_ {
        self.fields.iter().map(|f| f.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_field_lowercases_aliases() {
        let profile = ImportProfile::new("test").with_field(PatientField::Nama, &[" Nama Pasien "]);
        assert_eq!(profile.fields[0].aliases, vec!["nama pasien".to_string()]);
    }

    #[test]
    fn test_required_is_deduplicated() {
        let profile = ImportProfile::new("test")
            .with_required(PatientField::Nama)
            .with_required(PatientField::Nama);
        assert_eq!(profile.required, vec![PatientField::Nama]);
        assert!(profile.is_required(PatientField::Nama));
        assert!(!profile.is_required(PatientField::Telepon));
    }
}
