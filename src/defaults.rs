use crate::types::{ImportProfile, PatientField};

pub const DEFAULT_PATIENT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// Validation errors listed in a report before the rest are summarized
pub const DISPLAY_ERROR_LIMIT: usize = 20;

pub const PROFILE_BASIC: &str = "dasar";
pub const PROFILE_FULL: &str = "lengkap";

// Bare "no" would match inside "nomor telepon" or "no rm". "No" headers
// still match because they are contained in "no.".
const NO: &[&str] = &["no.", "nomor urut"];
const NO_RM: &[&str] = &["no rm", "no. rm", "no_rm", "nomor rm", "rekam medis", "medical record"];
const NAMA: &[&str] = &["nama", "nama pasien", "nama lengkap", "name", "patient name"];
const NIK: &[&str] = &["nik", "no ktp", "ktp", "nomor induk"];
const TANGGAL_LAHIR: &[&str] = &[
    "tanggal lahir",
    "tgl lahir",
    "tgl. lahir",
    "tanggal_lahir",
    "date of birth",
    "birth date",
    "birthdate",
    "dob",
];
const TEMPAT_LAHIR: &[&str] = &["tempat lahir", "tmp lahir", "tempat_lahir", "place of birth", "birthplace"];
const JENIS_KELAMIN: &[&str] = &["jenis kelamin", "jenis_kelamin", "kelamin", "jk", "l/p", "gender", "sex"];
const ALAMAT: &[&str] = &["alamat", "address", "domisili"];
const TELEPON: &[&str] = &[
    "telepon", "telp", "no hp", "no. hp", "nomor hp", "handphone", "phone", "whatsapp", "no wa",
];
const TELEPON_DARURAT: &[&str] = &[
    "telepon darurat",
    "telp darurat",
    "kontak darurat",
    "no darurat",
    "emergency contact",
];
const PEKERJAAN: &[&str] = &["pekerjaan", "profesi", "occupation", "job"];
const GOLONGAN_DARAH: &[&str] = &["golongan darah", "gol darah", "gol. darah", "goldar", "blood type"];
const TINGGI_BADAN: &[&str] = &["tinggi badan", "tinggi", "tb", "height"];
const BERAT_BADAN: &[&str] = &["berat badan", "berat", "bb", "weight"];
const ALERGI: &[&str] = &["alergi", "riwayat alergi", "allergy"];
const TANGGAL_MENDAFTAR: &[&str] = &[
    "tanggal mendaftar",
    "tanggal daftar",
    "tgl daftar",
    "tgl. daftar",
    "tanggal registrasi",
    "tanggal_mendaftar",
    "registration date",
    "terdaftar",
];
const CATATAN: &[&str] = &["catatan", "keterangan", "notes", "note"];

/// Fields common to both profiles, in matching order after `nama`
fn with_common_fields(profile: ImportProfile) -> ImportProfile {
    profile
        .with_field(PatientField::Nama, NAMA)
        .with_field(PatientField::Nik, NIK)
        .with_field(PatientField::TanggalLahir, TANGGAL_LAHIR)
        .with_field(PatientField::TempatLahir, TEMPAT_LAHIR)
        .with_field(PatientField::JenisKelamin, JENIS_KELAMIN)
        .with_field(PatientField::Alamat, ALAMAT)
        .with_field(PatientField::Telepon, TELEPON)
        .with_field(PatientField::TeleponDarurat, TELEPON_DARURAT)
        .with_field(PatientField::Pekerjaan, PEKERJAAN)
        .with_field(PatientField::GolonganDarah, GOLONGAN_DARAH)
        .with_field(PatientField::TinggiBadan, TINGGI_BADAN)
        .with_field(PatientField::BeratBadan, BERAT_BADAN)
        .with_field(PatientField::Alergi, ALERGI)
}

/// Profile without medical-record number and registration date
pub fn basic_profile() -> ImportProfile {
    let profile = ImportProfile::new(PROFILE_BASIC).with_field(PatientField::No, NO);
    with_common_fields(profile)
        .with_field(PatientField::Catatan, CATATAN)
        .with_required(PatientField::Nama)
}

/// Profile with medical-record number column and registration date
pub fn full_profile() -> ImportProfile {
    let profile = ImportProfile::new(PROFILE_FULL)
        .with_field(PatientField::No, NO)
        .with_field(PatientField::NoRm, NO_RM);
    with_common_fields(profile)
        .with_field(PatientField::TanggalMendaftar, TANGGAL_MENDAFTAR)
        .with_field(PatientField::Catatan, CATATAN)
        .with_required(PatientField::Nama)
}

pub fn profile_by_name(name: &str) -> Option<ImportProfile> {
    match name.trim().to_lowercase().as_str() {
        PROFILE_BASIC | "basic" => Some(basic_profile()),
        PROFILE_FULL | "full" => Some(full_profile()),
        _ => None,
    }
}
