//! 거시경제 데이터 수집 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - FRED API 클라이언트 ([`provider::FredClient`])
//! - CSV 파일 저장소 ([`storage::CsvStore`])
//! - 변동률 계산 ([`transform`])
//! - Provider → CSV 수집 워크플로우 ([`collector::MacroFetcher`])

pub mod collector;
pub mod error;
pub mod provider;
pub mod storage;
pub mod transform;

pub use collector::{FetchSummary, MacroFetcher};
pub use error::{DataError, Result};
pub use provider::{EconomicDataProvider, FredClient, StaticProvider};
pub use storage::CsvStore;
