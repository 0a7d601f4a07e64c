//! 주식 분석을 위한 도메인 모델.

mod analysis;
mod indicator_set;
mod level;
mod market_data;
mod market_data_provider;
mod narrative;
mod signal;

pub use analysis::*;
pub use indicator_set::*;
pub use level::*;
pub use market_data::*;
pub use market_data_provider::*;
pub use narrative::*;
pub use signal::*;
