//! Response acquisition.
//!
//! Runs a single request cycle against the model gateway: streams the reply
//! when streaming is on, silently downgrades to a batch request if the stream
//! breaks, and validates the final text. The caller owns the transcript and
//! performs the append-on-success / rollback-on-failure bookkeeping.

use anyhow::Result;
use futures_util::StreamExt;
use thiserror::Error;

use crate::gateway::ModelGateway;
use crate::transcript::Turn;

/// How to fetch the response for one request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireMode {
    Streaming,
    Batch,
}

/// Why a request cycle produced no assistant turn.
///
/// Either way the caller must roll back the pending human turn; there is no
/// retry loop, the operator resubmits manually.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("provider call failed: {0}")]
    Provider(#[source] anyhow::Error),
    #[error("provider returned an empty response")]
    EmptyResponse,
}

/// Runs one request cycle and returns the assistant turn on success.
///
/// In streaming mode each fragment is passed to `on_fragment` as it arrives,
/// so the caller can display partial output before the full turn is known.
/// A provider failure at stream-open or mid-stream downgrades to a single
/// batch call for the same request; the partial streamed text is discarded,
/// not resumed. The downgrade is silent; only a batch failure surfaces.
///
/// The final text is trimmed; blank text is a failure even when the provider
/// call itself succeeded.
pub async fn acquire_response(
    gateway: &impl ModelGateway,
    turns: &[Turn],
    mode: AcquireMode,
    mut on_fragment: impl FnMut(&str),
) -> Result<Turn, AcquireError> {
    if mode == AcquireMode::Streaming {
        match try_streaming(gateway, turns, &mut on_fragment).await {
            Ok(Some(turn)) => return Ok(turn),
            Ok(None) => return Err(AcquireError::EmptyResponse),
            // Stream failed at open or mid-way: fall through to batch.
            Err(_) => {}
        }
    }

    let turn = gateway
        .invoke(turns)
        .await
        .map_err(AcquireError::Provider)?;

    finish(turn.text)
}

/// Consumes the fragment stream to completion.
///
/// Returns `Ok(None)` when the stream completed but accumulated only blank
/// text (a degenerate response, not a downgrade trigger), and `Err` when the
/// stream itself failed and batch mode should take over.
async fn try_streaming(
    gateway: &impl ModelGateway,
    turns: &[Turn],
    on_fragment: &mut impl FnMut(&str),
) -> Result<Option<Turn>> {
    let mut stream = gateway.stream(turns).await?;
    let mut accumulated = String::new();

    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        on_fragment(&fragment);
        accumulated.push_str(&fragment);
    }

    match finish(accumulated) {
        Ok(turn) => Ok(Some(turn)),
        Err(_) => Ok(None),
    }
}

fn finish(text: String) -> Result<Turn, AcquireError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AcquireError::EmptyResponse);
    }
    Ok(Turn::assistant(trimmed))
}
