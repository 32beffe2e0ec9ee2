//! Runtime bridge - connects the sync TUI thread with the async Tokio runtime
//!
//! The TUI thread owns all dashboard state. Fetches run on a dedicated Tokio
//! runtime thread and report back over a channel that the UI drains once per
//! frame, so every state change happens on the UI thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tokio::runtime::Runtime;

use crate::domain::{ChartPayload, CountPayload, WidgetId};
use crate::infrastructure::http::DashboardClient;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Fetch every listed widget concurrently; results echo `generation`
    Load {
        generation: u64,
        widgets: Vec<WidgetId>,
    },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Chart payload fetched and validated
    ChartReady {
        generation: u64,
        widget: WidgetId,
        payload: ChartPayload,
    },
    /// Count tiles fetched
    CountsReady {
        generation: u64,
        payload: CountPayload,
    },
    /// One widget's fetch failed; the others are unaffected
    FetchFailed {
        generation: u64,
        widget: WidgetId,
        message: String,
    },
    /// Worker-level error
    Error { message: String },
}

impl RuntimeEvent {
    /// Load generation the event answers, if it belongs to one
    pub fn generation(&self) -> Option<u64> {
        match self {
            RuntimeEvent::ChartReady { generation, .. }
            | RuntimeEvent::CountsReady { generation, .. }
            | RuntimeEvent::FetchFailed { generation, .. } => Some(*generation),
            RuntimeEvent::Error { .. } => None,
        }
    }
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Spawn the worker thread with its own Tokio runtime
    pub fn new(client: DashboardClient) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();
        let rt = Runtime::new()?;

        thread::Builder::new()
            .name("hrdash-runtime".to_string())
            .spawn(move || {
                rt.block_on(async {
                    if let Err(err) = run_async_worker(client, cmd_rx, evt_tx.clone()).await {
                        tracing::error!(error = %err, "runtime worker exited");
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Worker exited: {:#}", err),
                        });
                    }
                });
            })?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
