//! 시장 데이터 제공자.
//!
//! 이 crate는 `MarketDataProvider` 구현체를 제공합니다:
//! - Yahoo Finance 시세 조회 (`YahooMarketData`)
//! - 테스트/오프라인용 인메모리 제공자 (`InMemoryMarketData`)

pub mod error;
pub mod memory;
pub mod yahoo;

pub use error::{DataError, Result};
pub use memory::InMemoryMarketData;
pub use yahoo::{bars_from_quotes, RawQuote, YahooMarketData};
