//! Downloadable CSV template for a profile

use std::io::Write;

use anyhow::{Context, Result};

use crate::types::{ImportProfile, PatientField};

fn example_value(field: PatientField) -> &'static str {
    match field {
        PatientField::No => "1",
        PatientField::NoRm => "",
        PatientField::Nama => "Siti Aminah",
        PatientField::Nik => "3273014509900001",
        PatientField::TanggalLahir => "22/09/1990",
        PatientField::TempatLahir => "Bandung",
        PatientField::JenisKelamin => "P",
        PatientField::Alamat => "Jl. Merdeka No. 10, Bandung",
        PatientField::Telepon => "081234567890",
        PatientField::TeleponDarurat => "081298765432",
        PatientField::Pekerjaan => "Guru",
        PatientField::GolonganDarah => "O",
        PatientField::TinggiBadan => "158",
        PatientField::BeratBadan => "52",
        PatientField::Alergi => "Tidak ada",
        PatientField::TanggalMendaftar => "01/03/2024",
        PatientField::Catatan => "",
    }
}

/// Template columns: every profile field except the server-assigned RM number
pub fn template_fields(profile: &ImportProfile) -> Vec<PatientField> {
    profile
        .field_order()
        .filter(|f| *f != PatientField::NoRm)
        .collect()
}

/// Write the header row and one example row
pub fn write_template<W: Write>(profile: &ImportProfile, out: W) -> Result<()> {
    let fields = template_fields(profile);
    let mut writer = csv::Writer::from_writer(out);

    writer
        .write_record(fields.iter().map(|f| f.label()))
        .context("Failed to write template header")?;
    writer
        .write_record(fields.iter().map(|f| example_value(*f)))
        .context("Failed to write template example row")?;
    writer.flush().context("Failed to flush template")?;
    Ok(())
}
