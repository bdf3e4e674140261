use futures_util::{stream, StreamExt};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::{
    core::truncate_message,
    error::{Result, WorkerError},
    host::{LifecycleHost, NotificationHost},
    lifecycle::{on_activate, on_install, LifecyclePhase},
    model::{lenient_payload, InteractionEvent, NotificationDescriptor, PushPayloadWire},
    notifications::dispatch_push,
    routing::{handle_interaction, Outcome},
    settings::WorkerSettings,
};

/// One event delivered to the worker by its host, as a tagged JSON object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerEvent {
    Install,
    Activate,
    Push {
        #[serde(default, deserialize_with = "lenient_payload")]
        payload: PushPayloadWire,
    },
    #[serde(rename = "notificationclick")]
    NotificationClick(InteractionEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventReport {
    Lifecycle(LifecyclePhase),
    Displayed(NotificationDescriptor),
    Routed(Outcome),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub handled: usize,
    pub failed: usize,
}

pub async fn handle_event<H>(
    host: &H,
    settings: &WorkerSettings,
    event: &WorkerEvent,
) -> Result<EventReport>
where
    H: NotificationHost + LifecycleHost + ?Sized,
{
    match event {
        WorkerEvent::Install => on_install(host).await.map(EventReport::Lifecycle),
        WorkerEvent::Activate => on_activate(host).await.map(EventReport::Lifecycle),
        WorkerEvent::Push { payload } => dispatch_push(host, settings, payload)
            .await
            .map(EventReport::Displayed),
        WorkerEvent::NotificationClick(interaction) => {
            Ok(EventReport::Routed(handle_interaction(host, interaction).await))
        }
    }
}

/// Blank lines and `#` comments yield `None`.
pub fn parse_event_line(line: &str) -> Result<Option<WorkerEvent>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

enum LineOutcome {
    Skipped,
    Handled,
    Failed,
}

/// Replays newline-delimited worker events as they arrive. Up to
/// `max_concurrent_events` run at once, with no ordering between them. A bad
/// line or a failed event is counted and skipped; a read error ends the replay.
pub async fn run_event_stream<R, H>(
    reader: R,
    host: &H,
    settings: &WorkerSettings,
) -> Result<ReplaySummary>
where
    R: AsyncBufRead + Unpin,
    H: NotificationHost + LifecycleHost + ?Sized,
{
    let lines = stream::unfold(Some(reader.lines()), |lines| async move {
        let mut lines = lines?;
        match lines.next_line().await {
            Ok(Some(line)) => Some((Ok(line), Some(lines))),
            Ok(None) => None,
            Err(error) => Some((Err(error), None)),
        }
    });

    let outcomes = lines
        .enumerate()
        .map(|(index, line)| async move {
            let line = line?;
            Ok::<_, WorkerError>(handle_line(host, settings, index + 1, &line).await)
        })
        .buffer_unordered(settings.max_concurrent_events.max(1));
    futures_util::pin_mut!(outcomes);

    let mut summary = ReplaySummary::default();
    while let Some(outcome) = outcomes.next().await {
        match outcome? {
            LineOutcome::Skipped => {}
            LineOutcome::Handled => summary.handled += 1,
            LineOutcome::Failed => summary.failed += 1,
        }
    }

    info!(handled = summary.handled, failed = summary.failed, "replay finished");
    Ok(summary)
}

async fn handle_line<H>(
    host: &H,
    settings: &WorkerSettings,
    line_no: usize,
    line: &str,
) -> LineOutcome
where
    H: NotificationHost + LifecycleHost + ?Sized,
{
    let event = match parse_event_line(line) {
        Ok(Some(event)) => event,
        Ok(None) => return LineOutcome::Skipped,
        Err(error) => {
            warn!(
                line = line_no,
                %error,
                content = %truncate_message(line.trim(), 200),
                "skipping malformed worker event"
            );
            return LineOutcome::Failed;
        }
    };

    // Handlers log their own failures at warn.
    match handle_event(host, settings, &event).await {
        Ok(report) => {
            debug!(line = line_no, ?report, "worker event handled");
            LineOutcome::Handled
        }
        Err(error) => {
            debug!(line = line_no, %error, "worker event failed");
            LineOutcome::Failed
        }
    }
}
