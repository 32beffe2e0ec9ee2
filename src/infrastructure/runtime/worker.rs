//! Async worker - runs in the Tokio runtime and performs the endpoint fetches

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Duration;

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};

use crate::domain::{WidgetId, WidgetKind};
use crate::infrastructure::http::DashboardClient;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

/// Run the async worker loop until shutdown or until the TUI side hangs up
pub async fn run_async_worker(
    client: DashboardClient,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    tracing::info!(base_url = client.base_url(), "runtime worker started");

    loop {
        loop {
            let cmd = match cmd_rx.try_recv() {
                Ok(cmd) => cmd,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            };
            match cmd {
                RuntimeCommand::Shutdown => {
                    tracing::info!("runtime worker shutting down");
                    return Ok(());
                }
                RuntimeCommand::Load { generation, widgets } => {
                    let client = client.clone();
                    let evt_tx = evt_tx.clone();
                    tokio::spawn(async move {
                        // Events go out in completion order, not request order
                        let mut pending: FuturesUnordered<_> = widgets
                            .into_iter()
                            .map(|widget| fetch_widget(&client, widget, generation))
                            .collect();
                        while let Some(event) = pending.next().await {
                            if evt_tx.send(event).is_err() {
                                break;
                            }
                        }
                    });
                }
            }
        }

        // Small yield to prevent busy loop
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Fetch one widget's endpoint and turn the outcome into an event of `generation`
pub async fn fetch_widget(
    client: &DashboardClient,
    widget: WidgetId,
    generation: u64,
) -> RuntimeEvent {
    let result = match widget.kind() {
        WidgetKind::Chart(_) => client
            .fetch_chart(widget.endpoint())
            .await
            .map(|payload| RuntimeEvent::ChartReady {
                generation,
                widget,
                payload,
            }),
        WidgetKind::Counts => client
            .fetch_counts(widget.endpoint())
            .await
            .map(|payload| RuntimeEvent::CountsReady {
                generation,
                payload,
            }),
    };

    match result {
        Ok(event) => {
            tracing::debug!(region = widget.region(), "widget payload ready");
            event
        }
        Err(err) => {
            tracing::warn!(region = widget.region(), error = %err, "widget fetch failed");
            RuntimeEvent::FetchFailed {
                generation,
                widget,
                message: err.to_string(),
            }
        }
    }
}
