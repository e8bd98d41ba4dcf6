pub mod anthropic;
pub mod document;
pub mod prompt;

use crate::errors::CompassResult;
use crate::facts::{self, Facts};
use crate::trade::TradeInput;
use serde::Serialize;
use std::time::Instant;

pub use document::{parse_narration, Narration};

/// Payload handed to the narrator: the trade as submitted plus its facts.
#[derive(Debug, Serialize)]
pub struct NarrationRequest<'a> {
    pub input: &'a TradeInput,
    pub facts: &'a Facts,
}

/// Anything that can turn facts into prose.
/// Returns the raw text; shape checks happen in `document`.
/// Send + Sync required so one client can serve every request.
#[async_trait::async_trait]
pub trait Narrator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn narrate(&self, request: &NarrationRequest<'_>) -> CompassResult<String>;
}

/// Validated trade in, narration document out.
/// One narrator call, no retries.
pub async fn interpret(narrator: &dyn Narrator, input: &TradeInput) -> CompassResult<Narration> {
    let facts = facts::compute(input);
    let request = NarrationRequest {
        input,
        facts: &facts,
    };

    let started = Instant::now();
    let raw = narrator.narrate(&request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let raw = match raw {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                narrator = narrator.name(),
                kind = %input.kind(),
                elapsed_ms,
                error = %e,
                "narration call failed"
            );
            return Err(e);
        }
    };

    tracing::info!(
        narrator = narrator.name(),
        kind = %input.kind(),
        ticker = input.ticker(),
        elapsed_ms,
        chars = raw.len(),
        "narration received"
    );

    parse_narration(input.kind(), input.has_delta(), &raw)
}
