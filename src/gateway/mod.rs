//! Model gateway: the capability boundary around the hosted LLM API.
//!
//! The rest of the crate talks to the provider only through [`ModelGateway`],
//! which keeps the session loop and response engine testable against
//! scripted gateways.

mod client;
mod prompt;
mod sse;

pub use client::ChatClient;
pub use prompt::{SUMMARY_PROMPT, build_translation_prompt};

use anyhow::Result;
use async_trait::async_trait;
use futures_util::Stream;
use std::pin::Pin;

use crate::transcript::Turn;

/// A lazy sequence of partial response text, yielded as it arrives.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Calls into the hosted model. The provider is stateless across calls, so
/// both operations take the full conversation as context.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Requests a complete response in one blocking call.
    ///
    /// May return a turn whose text is empty or whitespace-only on a
    /// degenerate provider response; that is not an error at this layer.
    async fn invoke(&self, turns: &[Turn]) -> Result<Turn>;

    /// Opens a streaming response. The returned stream may fail mid-way or
    /// legitimately yield zero fragments.
    async fn stream(&self, turns: &[Turn]) -> Result<FragmentStream>;
}
