//! Background dispatcher that drains the AI request queue.
//!
//! Runs as a single in-process task: claim the oldest pending request,
//! serve it against the completion client, write the result back, publish
//! an event. There are no retries; a failed request stays in `error` with
//! its message and the user decides whether to submit a new one.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use jejum_db::models::ai_request::{AiRequest, KIND_FASTING_SUGGESTION, KIND_MEAL_PLAN};
use jejum_db::repositories::AiRequestRepo;
use jejum_events::bus::AI_REQUEST_UPDATED;
use jejum_events::{DomainEvent, EventBus};

use crate::client::CompletionClient;
use crate::error::AiError;
use crate::prompts::{
    render_meal_plan_prompt, render_suggestion_prompt, MEAL_PLAN_SYSTEM_PROMPT,
    SUGGESTION_SYSTEM_PROMPT,
};
use crate::schema::{
    parse_model_json, GenerateMealPlanInput, GenerateMealPlanOutput, SuggestFastingTimesInput,
    SuggestFastingTimesOutput,
};

/// Default idle delay between queue polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Request serving (pure against the client, no database)
// ---------------------------------------------------------------------------

/// Serve one request: render the prompt, call the model, parse and validate
/// the output document.
pub async fn generate_output(
    client: &dyn CompletionClient,
    kind: &str,
    input: &serde_json::Value,
) -> Result<serde_json::Value, AiError> {
    match kind {
        KIND_FASTING_SUGGESTION => {
            let profile: SuggestFastingTimesInput = serde_json::from_value(input.clone())
                .map_err(|e| AiError::InvalidInput(e.to_string()))?;
            let raw = client
                .complete(SUGGESTION_SYSTEM_PROMPT, &render_suggestion_prompt(&profile))
                .await?;
            let output: SuggestFastingTimesOutput = parse_model_json(&raw)?;
            output.validate()?;
            serde_json::to_value(output).map_err(|e| AiError::MalformedOutput(e.to_string()))
        }
        KIND_MEAL_PLAN => {
            let plan_input: GenerateMealPlanInput = serde_json::from_value(input.clone())
                .map_err(|e| AiError::InvalidInput(e.to_string()))?;
            let raw = client
                .complete(MEAL_PLAN_SYSTEM_PROMPT, &render_meal_plan_prompt(&plan_input))
                .await?;
            let output: GenerateMealPlanOutput = parse_model_json(&raw)?;
            let output = output.normalize(plan_input.number_of_days)?;
            serde_json::to_value(output).map_err(|e| AiError::MalformedOutput(e.to_string()))
        }
        other => Err(AiError::InvalidInput(format!("unknown request kind '{other}'"))),
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Single-consumer queue worker for AI requests.
pub struct Dispatcher {
    pool: PgPool,
    client: Arc<dyn CompletionClient>,
    bus: Arc<EventBus>,
    poll_interval: Duration,
}

impl Dispatcher {
    pub fn new(pool: PgPool, client: Arc<dyn CompletionClient>, bus: Arc<EventBus>) -> Self {
        Self {
            pool,
            client,
            bus,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the idle poll interval (tests use a short one).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Spawn the dispatcher loop. Runs until the token is cancelled.
    pub fn spawn(self, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }

    async fn run(self, cancel: CancellationToken) {
        tracing::info!("AI dispatcher started");
        loop {
            let claimed = match AiRequestRepo::claim_next_pending(&self.pool).await {
                Ok(claimed) => claimed,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to claim AI request");
                    None
                }
            };

            match claimed {
                Some(request) => self.process(request).await,
                None => {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(self.poll_interval) => {}
                    }
                }
            }

            if cancel.is_cancelled() {
                break;
            }
        }
        tracing::info!("AI dispatcher stopped");
    }

    async fn process(&self, request: AiRequest) {
        tracing::info!(request_id = request.id, kind = %request.kind, "Processing AI request");
        // The claim already moved the row to `processing`.
        self.publish_update(&request);

        match generate_output(self.client.as_ref(), &request.kind, &request.input).await {
            Ok(output) => {
                match AiRequestRepo::mark_completed(&self.pool, request.id, &output).await {
                    Ok(Some(updated)) => self.publish_update(&updated),
                    Ok(None) => {
                        tracing::warn!(request_id = request.id, "Request left processing state")
                    }
                    Err(e) => {
                        tracing::error!(request_id = request.id, error = %e, "Failed to store output")
                    }
                }
            }
            Err(e) => {
                tracing::warn!(request_id = request.id, error = %e, "AI request failed");
                match AiRequestRepo::mark_error(&self.pool, request.id, &e.to_string()).await {
                    Ok(Some(updated)) => self.publish_update(&updated),
                    Ok(None) => {
                        tracing::warn!(request_id = request.id, "Request left processing state")
                    }
                    Err(store_err) => {
                        tracing::error!(request_id = request.id, error = %store_err, "Failed to store error")
                    }
                }
            }
        }
    }

    /// Publish the full request document so listeners can render it
    /// without a follow-up fetch.
    fn publish_update(&self, request: &AiRequest) {
        let payload = match serde_json::to_value(request) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(request_id = request.id, error = %e, "Failed to serialize request");
                return;
            }
        };
        self.bus.publish(
            DomainEvent::new(AI_REQUEST_UPDATED)
                .with_entity("ai_request", request.id)
                .with_user(request.user_id)
                .with_payload(payload),
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
