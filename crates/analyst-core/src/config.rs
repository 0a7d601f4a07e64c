//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 설정은 기본값 → TOML 파일 → `ANALYST__*` 환경 변수 순으로 병합됩니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalystError, AnalystResult};
use crate::logging::LogFormat;
use crate::types::{HistoryRange, Interval};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 분석 엔진 설정
    pub analysis: AnalysisConfig,
    /// 시장 데이터 설정
    pub market_data: MarketDataConfig,
    /// 내러티브 생성 설정
    pub narrative: NarrativeConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// MACD 기간 설정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MacdConfig {
    /// 단기 EMA 기간 (기본: 12)
    pub fast: usize,
    /// 장기 EMA 기간 (기본: 26)
    pub slow: usize,
    /// 시그널 라인 기간 (기본: 9)
    pub signal: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// 분석 엔진 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// SMA 기간 목록 (최소 두 개의 서로 다른 기간)
    pub sma_periods: Vec<usize>,
    /// RSI 기간
    pub rsi_period: usize,
    /// MACD 기간
    pub macd: MacdConfig,
    /// 지지/저항 탐지 윈도우 (좌우 바 개수)
    pub level_window: usize,
    /// 종류별로 반환할 레벨 수
    pub level_top_k: usize,
    /// 레벨 클러스터링 허용 오차 (가격 대비 비율, 0.01 = 1%)
    pub level_tolerance: f64,
    /// 추세 판정에 사용하는 최근 바 개수
    pub trend_window: usize,
    /// RSI 과매수 임계값
    pub rsi_overbought: f64,
    /// RSI 과매도 임계값
    pub rsi_oversold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_periods: vec![10, 20],
            rsi_period: 14,
            macd: MacdConfig::default(),
            level_window: 5,
            level_top_k: 3,
            level_tolerance: 0.01,
            trend_window: 5,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
        }
    }
}

impl AnalysisConfig {
    /// 설정 불변식을 검증합니다.
    pub fn validate(&self) -> AnalystResult<()> {
        if let Some(&zero) = self.sma_periods.iter().find(|&&p| p == 0) {
            return Err(AnalystError::invalid_parameter(
                "sma_periods",
                format!("기간은 0보다 커야 합니다 (입력: {})", zero),
            ));
        }

        let mut distinct = self.sma_periods.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < 2 {
            return Err(AnalystError::invalid_parameter(
                "sma_periods",
                format!(
                    "서로 다른 기간이 최소 2개 필요합니다 (입력: {:?})",
                    self.sma_periods
                ),
            ));
        }

        for (name, value) in [
            ("rsi_period", self.rsi_period),
            ("macd.fast", self.macd.fast),
            ("macd.slow", self.macd.slow),
            ("macd.signal", self.macd.signal),
            ("level_window", self.level_window),
            ("level_top_k", self.level_top_k),
            ("trend_window", self.trend_window),
        ] {
            if value == 0 {
                return Err(AnalystError::invalid_parameter(
                    name,
                    "0보다 커야 합니다",
                ));
            }
        }

        if self.macd.fast >= self.macd.slow {
            return Err(AnalystError::invalid_parameter(
                "macd.fast",
                format!(
                    "단기 기간({})은 장기 기간({})보다 작아야 합니다",
                    self.macd.fast, self.macd.slow
                ),
            ));
        }

        if !(0.0..1.0).contains(&self.level_tolerance) {
            return Err(AnalystError::invalid_parameter(
                "level_tolerance",
                format!("0 이상 1 미만이어야 합니다 (입력: {})", self.level_tolerance),
            ));
        }

        if !(0.0 < self.rsi_oversold
            && self.rsi_oversold < self.rsi_overbought
            && self.rsi_overbought < 100.0)
        {
            return Err(AnalystError::invalid_parameter(
                "rsi_overbought",
                format!(
                    "0 < 과매도({}) < 과매수({}) < 100 이어야 합니다",
                    self.rsi_oversold, self.rsi_overbought
                ),
            ));
        }

        Ok(())
    }

    /// 모든 지표를 계산하는 데 필요한 최소 바 개수.
    pub fn min_bars(&self) -> usize {
        let sma = self.sma_periods.iter().copied().max().unwrap_or(0);
        let rsi = self.rsi_period + 1;
        let macd = self.macd.slow + self.macd.signal;
        sma.max(rsi).max(macd)
    }
}

/// 시장 데이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketDataConfig {
    /// 조회할 과거 데이터 범위
    pub history_range: HistoryRange,
    /// 바 간격
    pub interval: Interval,
    /// 감시 모드 갱신 주기 (초)
    pub update_interval_secs: u64,
    /// 외부 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            history_range: HistoryRange::OneYear,
            interval: Interval::Daily,
            update_interval_secs: 60,
            request_timeout_secs: 30,
        }
    }
}

/// 내러티브 생성 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// 내러티브 생성 활성화 여부
    pub enabled: bool,
    /// API 키를 읽을 환경 변수 이름
    pub api_key_env: String,
    /// Chat Completions API 기본 URL
    pub base_url: String,
    /// 모델 이름
    pub model: String,
    /// 샘플링 온도
    pub temperature: f32,
    /// 프롬프트에 포함할 최근 바 개수
    pub recent_bars: usize,
    /// 프롬프트에 포함할 지표별 최근 값 개수
    pub recent_values: usize,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4-turbo".to_string(),
            temperature: 0.2,
            recent_bars: 30,
            recent_values: 10,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: LogFormat,
    /// span 진입/종료 이벤트 출력 여부
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            span_events: false,
        }
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> AnalystResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("ANALYST")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("analysis.sma_periods")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.analysis.validate()?;
        Ok(app)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> AnalystResult<Self> {
        Self::load(Some("config/default.toml"))
    }
}
