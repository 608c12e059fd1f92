//! 데이터 수집 모듈.

pub mod ingest;
pub mod payload;

pub use ingest::{build_cycle, ingest_file, load_export};
pub use payload::{ExportRecords, TerminalExport};
