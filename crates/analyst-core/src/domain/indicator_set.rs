//! 지표 계산 결과 타입.
//!
//! 지표별로 태그된 결과 타입을 사용합니다:
//! - `LineSeries` - 단일 값 시계열 (SMA, EMA, RSI)
//! - `MacdSeries` - MACD 라인 / 시그널 / 히스토그램 3중 시계열
//!
//! 모든 시계열은 가격 시계열의 접미(suffix)에 정렬됩니다.
//! `offset`은 첫 번째 값에 대응하는 가격 바 인덱스(워밍업 길이)입니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 단일 값 지표의 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// 단순 이동평균
    Sma,
    /// 지수 이동평균
    Ema,
    /// 상대강도지수
    Rsi,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Sma => write!(f, "SMA"),
            LineKind::Ema => write!(f, "EMA"),
            LineKind::Rsi => write!(f, "RSI"),
        }
    }
}

/// 가격 시계열의 접미에 정렬된 단일 값 지표 시계열.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSeries {
    /// 지표 종류
    pub kind: LineKind,
    /// 지표 기간
    pub period: usize,
    /// 첫 번째 값에 대응하는 가격 바 인덱스
    pub offset: usize,
    /// 지표 값 (길이 = 가격 바 개수 - offset)
    pub values: Vec<Decimal>,
}

impl LineSeries {
    /// 지표 이름 (예: "SMA(20)").
    pub fn name(&self) -> String {
        format!("{}({})", self.kind, self.period)
    }

    /// 값 개수.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 값이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 가장 최근 값.
    pub fn latest(&self) -> Option<Decimal> {
        self.values.last().copied()
    }

    /// 최근 값 직전의 값.
    pub fn previous(&self) -> Option<Decimal> {
        self.values.len().checked_sub(2).map(|i| self.values[i])
    }

    /// 가격 바 인덱스 기준으로 값을 조회합니다.
    pub fn at(&self, bar_index: usize) -> Option<Decimal> {
        bar_index
            .checked_sub(self.offset)
            .and_then(|i| self.values.get(i).copied())
    }

    /// 최근 `n`개의 값.
    pub fn tail(&self, n: usize) -> &[Decimal] {
        &self.values[self.values.len().saturating_sub(n)..]
    }
}

/// 가격 시계열의 접미에 정렬된 MACD 시계열.
///
/// 세 시계열은 같은 길이이며 `histogram[i] == macd[i] - signal[i]`입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdSeries {
    /// 단기 EMA 기간
    pub fast_period: usize,
    /// 장기 EMA 기간
    pub slow_period: usize,
    /// 시그널 기간
    pub signal_period: usize,
    /// 첫 번째 값에 대응하는 가격 바 인덱스
    pub offset: usize,
    /// MACD 라인 (단기 EMA - 장기 EMA)
    pub macd: Vec<Decimal>,
    /// 시그널 라인 (MACD 라인의 EMA)
    pub signal: Vec<Decimal>,
    /// 히스토그램 (MACD - 시그널)
    pub histogram: Vec<Decimal>,
}

/// 특정 시점의 MACD 값.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdPoint {
    /// MACD 라인
    pub macd: Decimal,
    /// 시그널 라인
    pub signal: Decimal,
    /// 히스토그램
    pub histogram: Decimal,
}

impl MacdSeries {
    /// 지표 이름 (예: "MACD(12,26,9)").
    pub fn name(&self) -> String {
        format!(
            "MACD({},{},{})",
            self.fast_period, self.slow_period, self.signal_period
        )
    }

    /// 값 개수.
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    /// 값이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }

    /// `i`번째 값 (시계열 내부 인덱스).
    pub fn point(&self, i: usize) -> Option<MacdPoint> {
        Some(MacdPoint {
            macd: *self.macd.get(i)?,
            signal: *self.signal.get(i)?,
            histogram: *self.histogram.get(i)?,
        })
    }

    /// 가장 최근 값.
    pub fn latest(&self) -> Option<MacdPoint> {
        self.len().checked_sub(1).and_then(|i| self.point(i))
    }

    /// 최근 값 직전의 값.
    pub fn previous(&self) -> Option<MacdPoint> {
        self.len().checked_sub(2).and_then(|i| self.point(i))
    }

    /// 최근 `n`개의 MACD 값.
    pub fn macd_tail(&self, n: usize) -> &[Decimal] {
        &self.macd[self.macd.len().saturating_sub(n)..]
    }

    /// 최근 `n`개의 시그널 값.
    pub fn signal_tail(&self, n: usize) -> &[Decimal] {
        &self.signal[self.signal.len().saturating_sub(n)..]
    }
}

/// 한 번의 분석에서 계산된 지표 집합.
///
/// SMA는 기간 오름차순으로 정렬됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// 기간별 SMA (기간 오름차순)
    pub sma: Vec<LineSeries>,
    /// RSI
    pub rsi: LineSeries,
    /// MACD
    pub macd: MacdSeries,
}

impl IndicatorSet {
    /// 기간으로 SMA를 조회합니다.
    pub fn sma(&self, period: usize) -> Option<&LineSeries> {
        self.sma.iter().find(|s| s.period == period)
    }

    /// 가장 짧은 기간의 SMA.
    pub fn short_sma(&self) -> Option<&LineSeries> {
        self.sma.first()
    }

    /// 가장 긴 기간의 SMA.
    pub fn long_sma(&self) -> Option<&LineSeries> {
        self.sma.last()
    }

    /// 포함된 지표 이름 목록.
    pub fn names(&self) -> Vec<String> {
        self.sma
            .iter()
            .map(LineSeries::name)
            .chain([self.rsi.name(), self.macd.name()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(kind: LineKind, period: usize, offset: usize, values: Vec<Decimal>) -> LineSeries {
        LineSeries {
            kind,
            period,
            offset,
            values,
        }
    }

    #[test]
    fn test_line_series_alignment() {
        let sma = line(LineKind::Sma, 3, 2, vec![dec!(10), dec!(11), dec!(12)]);

        assert_eq!(sma.name(), "SMA(3)");
        assert_eq!(sma.at(1), None);
        assert_eq!(sma.at(2), Some(dec!(10)));
        assert_eq!(sma.at(4), Some(dec!(12)));
        assert_eq!(sma.at(5), None);
        assert_eq!(sma.latest(), Some(dec!(12)));
        assert_eq!(sma.previous(), Some(dec!(11)));
        assert_eq!(sma.tail(2), &[dec!(11), dec!(12)]);
    }

    #[test]
    fn test_indicator_set_lookup() {
        let set = IndicatorSet {
            sma: vec![
                line(LineKind::Sma, 10, 9, vec![dec!(1)]),
                line(LineKind::Sma, 20, 19, vec![dec!(2)]),
            ],
            rsi: line(LineKind::Rsi, 14, 14, vec![dec!(50)]),
            macd: MacdSeries {
                fast_period: 12,
                slow_period: 26,
                signal_period: 9,
                offset: 33,
                macd: vec![dec!(0.5), dec!(0.7)],
                signal: vec![dec!(0.6), dec!(0.6)],
                histogram: vec![dec!(-0.1), dec!(0.1)],
            },
        };

        assert_eq!(set.short_sma().map(|s| s.period), Some(10));
        assert_eq!(set.long_sma().map(|s| s.period), Some(20));
        assert!(set.sma(20).is_some());
        assert!(set.sma(50).is_none());
        assert_eq!(
            set.names(),
            vec!["SMA(10)", "SMA(20)", "RSI(14)", "MACD(12,26,9)"]
        );

        let latest = set.macd.latest().unwrap();
        assert_eq!(latest.histogram, dec!(0.1));
        assert_eq!(set.macd.previous().unwrap().macd, dec!(0.5));
    }
}
