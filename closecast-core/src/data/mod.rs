//! Data providers and bar ingestion.

pub mod csv;
pub mod ingest;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use self::csv::CsvProvider;
pub use ingest::BarIngestor;
pub use provider::{DataError, DataProvider, RawBar};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
