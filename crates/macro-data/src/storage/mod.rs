//! 저장소 모듈.
//!
//! - CSV: 데이터 디렉토리의 평문 CSV 파일

pub mod csv;

pub use self::csv::{CsvStore, INFLATION_FILE, UNEMPLOYMENT_FILE, YIELD_CURVE_FILE};
