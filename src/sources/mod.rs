//! Remote table sources
//!
//! ETL extractors for the two upstream datasets: the personality survey (a
//! CSV file) and the assets table (a REST endpoint returning JSON records).

mod remote_csv;
mod rest;

pub use remote_csv::RemoteCsvExtractor;
pub use rest::RestTableExtractor;
