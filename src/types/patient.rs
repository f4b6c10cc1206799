//! Patient record types produced by the import pipeline

use serde::{Deserialize, Serialize};

pub const GENDER_MALE: &str = "Laki-laki";
pub const GENDER_FEMALE: &str = "Perempuan";

/// Logical patient field, independent of how a spreadsheet spells its header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientField {
    No,
    NoRm,
    Nama,
    Nik,
    TanggalLahir,
    TempatLahir,
    JenisKelamin,
    Alamat,
    Telepon,
    TeleponDarurat,
    Pekerjaan,
    GolonganDarah,
    TinggiBadan,
    BeratBadan,
    Alergi,
    TanggalMendaftar,
    Catatan,
}

/// How a field's cell is coerced during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Gender,
}

impl PatientField {
    /// Wire name, also used as the template header
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientField::No => "no",
            PatientField::NoRm => "no_rm",
            PatientField::Nama => "nama",
            PatientField::Nik => "nik",
            PatientField::TanggalLahir => "tanggal_lahir",
            PatientField::TempatLahir => "tempat_lahir",
            PatientField::JenisKelamin => "jenis_kelamin",
            PatientField::Alamat => "alamat",
            PatientField::Telepon => "telepon",
            PatientField::TeleponDarurat => "telepon_darurat",
            PatientField::Pekerjaan => "pekerjaan",
            PatientField::GolonganDarah => "golongan_darah",
            PatientField::TinggiBadan => "tinggi_badan",
            PatientField::BeratBadan => "berat_badan",
            PatientField::Alergi => "alergi",
            PatientField::TanggalMendaftar => "tanggal_mendaftar",
            PatientField::Catatan => "catatan",
        }
    }

    /// Human-readable label for messages
    pub fn label(&self) -> &'static str {
        match self {
            PatientField::No => "No",
            PatientField::NoRm => "No. RM",
            PatientField::Nama => "Nama",
            PatientField::Nik => "NIK",
            PatientField::TanggalLahir => "Tanggal lahir",
            PatientField::TempatLahir => "Tempat lahir",
            PatientField::JenisKelamin => "Jenis kelamin",
            PatientField::Alamat => "Alamat",
            PatientField::Telepon => "Telepon",
            PatientField::TeleponDarurat => "Telepon darurat",
            PatientField::Pekerjaan => "Pekerjaan",
            PatientField::GolonganDarah => "Golongan darah",
            PatientField::TinggiBadan => "Tinggi badan",
            PatientField::BeratBadan => "Berat badan",
            PatientField::Alergi => "Alergi",
            PatientField::TanggalMendaftar => "Tanggal mendaftar",
            PatientField::Catatan => "Catatan",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            PatientField::No | PatientField::TinggiBadan | PatientField::BeratBadan => {
                FieldKind::Number
            }
            PatientField::TanggalLahir | PatientField::TanggalMendaftar => FieldKind::Date,
            PatientField::JenisKelamin => FieldKind::Gender,
            _ => FieldKind::Text,
        }
    }
}

impl std::fmt::Display for PatientField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized patient row, ready for validation and submission.
///
/// Dates hold the canonical `DD/MM/YYYY` display form until submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no: Option<f64>,
    /// Assigned by the Patient Service, never read from the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_rm: Option<String>,
    pub nama: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nik: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempat_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenis_kelamin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telepon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telepon_darurat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pekerjaan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub golongan_darah: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tinggi_badan: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub berat_badan: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alergi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_mendaftar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catatan: Option<String>,
}

impl PatientRecord {
    /// Store a text value for a field. `no_rm` and numeric fields are ignored.
    pub fn set_text(&mut self, field: PatientField, value: String) {
        let slot = match field {
            PatientField::Nama => {
                self.nama = value;
                return;
            }
            PatientField::Nik => &mut self.nik,
            PatientField::TanggalLahir => &mut self.tanggal_lahir,
            PatientField::TempatLahir => &mut self.tempat_lahir,
            PatientField::JenisKelamin => &mut self.jenis_kelamin,
            PatientField::Alamat => &mut self.alamat,
            PatientField::Telepon => &mut self.telepon,
            PatientField::TeleponDarurat => &mut self.telepon_darurat,
            PatientField::Pekerjaan => &mut self.pekerjaan,
            PatientField::GolonganDarah => &mut self.golongan_darah,
            PatientField::Alergi => &mut self.alergi,
            PatientField::TanggalMendaftar => &mut self.tanggal_mendaftar,
            PatientField::Catatan => &mut self.catatan,
            PatientField::NoRm
            | PatientField::No
            | PatientField::TinggiBadan
            | PatientField::BeratBadan => return,
        };
        *slot = Some(value);
    }

    pub fn set_number(&mut self, field: PatientField, value: f64) {
        match field {
            PatientField::No => self.no = Some(value),
            PatientField::TinggiBadan => self.tinggi_badan = Some(value),
            PatientField::BeratBadan => self.berat_badan = Some(value),
            _ => {}
        }
    }

    /// Text view of a field, used by the validator
    pub fn text(&self, field: PatientField) -> Option<&str> {
        match field {
            PatientField::Nama => Some(self.nama.as_str()),
            PatientField::NoRm => self.no_rm.as_deref(),
            PatientField::Nik => self.nik.as_deref(),
            PatientField::TanggalLahir => self.tanggal_lahir.as_deref(),
            PatientField::TempatLahir => self.tempat_lahir.as_deref(),
            PatientField::JenisKelamin => self.jenis_kelamin.as_deref(),
            PatientField::Alamat => self.alamat.as_deref(),
            PatientField::Telepon => self.telepon.as_deref(),
            PatientField::TeleponDarurat => self.telepon_darurat.as_deref(),
            PatientField::Pekerjaan => self.pekerjaan.as_deref(),
            PatientField::GolonganDarah => self.golongan_darah.as_deref(),
            PatientField::Alergi => self.alergi.as_deref(),
            PatientField::TanggalMendaftar => self.tanggal_mendaftar.as_deref(),
            PatientField::Catatan => self.catatan.as_deref(),
            PatientField::No | PatientField::TinggiBadan | PatientField::BeratBadan => None,
        }
    }

    pub fn has_name(&self) -> bool {
        !self.nama.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_serializes_as_wire_name() {
        let json = serde_json::to_string(&PatientField::TanggalLahir).unwrap();
        assert_eq!(json, "\"tanggal_lahir\"");
        assert_eq!(PatientField::TanggalLahir.as_str(), "tanggal_lahir");
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(PatientField::BeratBadan.kind(), FieldKind::Number);
        assert_eq!(PatientField::TanggalMendaftar.kind(), FieldKind::Date);
        assert_eq!(PatientField::JenisKelamin.kind(), FieldKind::Gender);
        assert_eq!(PatientField::Alamat.kind(), FieldKind::Text);
    }

    #[test]
    fn test_set_text_never_populates_no_rm() {
        let mut record = PatientRecord::default();
        record.set_text(PatientField::NoRm, "RM-001".to_string());
        assert!(record.no_rm.is_none());
    }

    #[test]
    fn test_record_skips_absent_fields_when_serialized() {
        let record = PatientRecord {
            nama: "Ani".to_string(),
            telepon: Some("08123456789".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["nama"], "Ani");
        assert_eq!(json["telepon"], "08123456789");
        assert!(json.get("no_rm").is_none());
        assert!(json.get("tanggal_lahir").is_none());
    }
}
