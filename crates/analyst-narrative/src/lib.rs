//! 분석 보고서용 내러티브 생성기.
//!
//! 이 crate는 `NarrativeGenerator` 구현체를 제공합니다:
//! - OpenAI Chat Completions (`OpenAiNarrator`)
//! - 오프라인 템플릿 요약 (`TemplateNarrator`)

pub mod openai;
pub mod prompt;
pub mod template;
pub mod types;

pub use openai::{OpenAiConfig, OpenAiNarrator};
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};
pub use template::TemplateNarrator;
pub use types::{NarrativeError, NarrativeResult};
