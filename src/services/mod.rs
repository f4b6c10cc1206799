//! Import pipeline services

pub mod column_mapper;
pub mod date_parser;
pub mod import_session;
pub mod normalizer;
pub mod patient_api;
pub mod template;
pub mod validator;
pub mod workbook;
