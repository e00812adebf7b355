//! 거시경제 지표 도메인 모델.

mod inflation;
mod recession_risk;
mod series;

pub use inflation::*;
pub use recession_risk::*;
pub use series::*;
