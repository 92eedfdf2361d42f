pub mod client;
pub mod error;
pub mod types;

pub use client::LlmClient;
pub use error::{LlmError, Result};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, Choice, FunctionCall, Role, ToolCall, ToolDefinition,
};
