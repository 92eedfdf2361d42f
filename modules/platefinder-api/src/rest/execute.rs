use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use foursquare_client::{PlaceSearchParams, PlacesError};
use llm_client::{ChatMessage, ChatRequest, ChatResponse, ToolCall};

use crate::error::ApiError;
use crate::tool::{restaurant_search_tool, RESTAURANT_SEARCH_TOOL, SYSTEM_PROMPT};
use crate::AppState;

#[derive(Deserialize)]
pub struct ExecuteRequest {
    pub message: String,
}

const NO_TOOL_CALL_FALLBACK: &str = "Sorry, I couldn't determine the search parameters from \
                                     your request. Could you please rephrase?";

pub async fn api_execute(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExecuteRequest>,
) -> Response {
    match execute(&state, &body.message).await {
        Ok(results) => Json(results).into_response(),
        Err(e) => e.into_response(),
    }
}

/// LLM extraction, validation, then the search call, in that order: a
/// malformed request fails cheaply before any Foursquare round trip.
async fn execute(state: &AppState, message: &str) -> Result<Value, ApiError> {
    let request = ChatRequest::new(&state.model)
        .message(ChatMessage::system(SYSTEM_PROMPT))
        .message(ChatMessage::user(message))
        .tool(restaurant_search_tool())
        .force_tool(RESTAURANT_SEARCH_TOOL);

    let response = state.llm.chat(&request).await?;

    let tool_call = match search_tool_call(&response) {
        Some(tc) => tc,
        None => return Err(ApiError::LlmNoToolCall(free_text_reply(&response))),
    };

    let args: Map<String, Value> = serde_json::from_str(&tool_call.function.arguments)
        .map_err(|_| ApiError::LlmMalformedArguments)?;

    let params = PlaceSearchParams::from_args(&args)?;

    info!(?params, "Executing restaurant search");

    match state.places.search(&params).await {
        Ok(results) => Ok(results),
        Err(PlacesError::Rejected { status, message }) => Err(ApiError::UpstreamRejected {
            status,
            message: rejection_detail(&params, status, &message),
        }),
        Err(e) => Err(e.into()),
    }
}

/// The restaurant_search invocation from the model's reply, if it made one.
fn search_tool_call(response: &ChatResponse) -> Option<&ToolCall> {
    response
        .choices
        .first()?
        .message
        .tool_calls
        .as_ref()?
        .iter()
        .find(|tc| tc.function.name == RESTAURANT_SEARCH_TOOL)
}

/// The model's free-text reply when it declined the tool, or the fixed
/// fallback when it said nothing usable.
fn free_text_reply(response: &ChatResponse) -> String {
    response
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .filter(|content| !content.trim().is_empty())
        .unwrap_or_else(|| NO_TOOL_CALL_FALLBACK.to_string())
}

/// Caller-facing detail for an upstream rejection. A 400 that named a
/// location gets a message pointing at that location, since a bad `near`
/// or `ll` string is the usual cause.
fn rejection_detail(params: &PlaceSearchParams, status: u16, upstream: &str) -> String {
    if status == 400 {
        if let Some(near) = &params.near {
            return format!(
                "Could not find results for the location: '{near}'. Please check the location \
                 name or try a different one."
            );
        }
        if let Some(ll) = &params.ll {
            return format!(
                "Could not find results for the provided coordinates: '{ll}'. Please check the \
                 coordinates."
            );
        }
    }
    format!("Restaurant search failed: {upstream}")
}
