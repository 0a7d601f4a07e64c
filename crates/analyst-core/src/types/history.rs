//! 시장 데이터 요청 범위와 바 간격 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 과거 데이터 조회 범위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryRange {
    /// 1개월
    #[serde(rename = "1mo")]
    OneMonth,
    /// 3개월
    #[serde(rename = "3mo")]
    ThreeMonths,
    /// 6개월
    #[serde(rename = "6mo")]
    SixMonths,
    /// 1년
    #[serde(rename = "1y")]
    OneYear,
    /// 2년
    #[serde(rename = "2y")]
    TwoYears,
    /// 5년
    #[serde(rename = "5y")]
    FiveYears,
    /// 10년
    #[serde(rename = "10y")]
    TenYears,
    /// 전체 기간
    #[serde(rename = "max")]
    Max,
}

impl HistoryRange {
    /// 제공자 API에서 사용하는 범위 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
            HistoryRange::TwoYears => "2y",
            HistoryRange::FiveYears => "5y",
            HistoryRange::TenYears => "10y",
            HistoryRange::Max => "max",
        }
    }

    /// 일봉 기준 대략적인 거래일 수. `Max`는 상한이 없습니다.
    pub fn approx_trading_days(&self) -> Option<usize> {
        match self {
            HistoryRange::OneMonth => Some(21),
            HistoryRange::ThreeMonths => Some(63),
            HistoryRange::SixMonths => Some(126),
            HistoryRange::OneYear => Some(252),
            HistoryRange::TwoYears => Some(504),
            HistoryRange::FiveYears => Some(1260),
            HistoryRange::TenYears => Some(2520),
            HistoryRange::Max => None,
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1mo" => Ok(HistoryRange::OneMonth),
            "3mo" => Ok(HistoryRange::ThreeMonths),
            "6mo" => Ok(HistoryRange::SixMonths),
            "1y" => Ok(HistoryRange::OneYear),
            "2y" => Ok(HistoryRange::TwoYears),
            "5y" => Ok(HistoryRange::FiveYears),
            "10y" => Ok(HistoryRange::TenYears),
            "max" => Ok(HistoryRange::Max),
            _ => Err(format!("Invalid history range: {}", s)),
        }
    }
}

/// 바 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// 1시간봉
    #[serde(rename = "1h")]
    Hourly,
    /// 일봉
    #[serde(rename = "1d")]
    Daily,
    /// 주봉
    #[serde(rename = "1wk")]
    Weekly,
    /// 월봉
    #[serde(rename = "1mo")]
    Monthly,
}

impl Interval {
    /// 제공자 API에서 사용하는 간격 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Hourly => "1h",
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(Interval::Hourly),
            "1d" => Ok(Interval::Daily),
            "1wk" => Ok(Interval::Weekly),
            "1mo" => Ok(Interval::Monthly),
            _ => Err(format!("Invalid interval: {}", s)),
        }
    }
}
