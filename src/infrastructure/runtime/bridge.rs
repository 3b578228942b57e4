//! Runtime bridge - connects the sync TUI thread with the async Tokio runtime
//!
//! Panel acquisition and the bootstrap step run on a dedicated worker thread.
//! The UI sends [`RuntimeCommand`]s and drains [`RuntimeEvent`]s once per frame.

use std::fmt;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::bootstrap::{BootstrapOutcome, BootstrapStep};
use crate::core::Panel;
use crate::infrastructure::runtime::worker::run_async_worker;
use crate::router::{Acquire, PanelLoadError, PanelRef, PanelSource};

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// Acquire a panel implementation
    LoadPanel { panel: PanelRef },
    /// Run the bootstrap step (only the first request is honoured)
    Bootstrap,
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
pub enum RuntimeEvent {
    PanelLoaded {
        panel: PanelRef,
        result: Result<Box<dyn Panel>, PanelLoadError>,
    },
    BootstrapFinished {
        outcome: BootstrapOutcome,
    },
}

impl fmt::Debug for RuntimeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeEvent::PanelLoaded { panel, result } => f
                .debug_struct("PanelLoaded")
                .field("panel", panel)
                .field("ok", &result.is_ok())
                .finish(),
            RuntimeEvent::BootstrapFinished { outcome } => f
                .debug_struct("BootstrapFinished")
                .field("outcome", outcome)
                .finish(),
        }
    }
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: UnboundedSender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    pub fn new(
        source: Arc<dyn PanelSource>,
        bootstrap: Arc<dyn BootstrapStep>,
    ) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded_channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("chainview-worker")
            .enable_all()
            .build()
            .context("create tokio runtime")?;

        thread::Builder::new()
            .name("chainview-runtime".to_string())
            .spawn(move || {
                runtime.block_on(run_async_worker(source, bootstrap, cmd_rx, evt_tx));
            })
            .context("spawn runtime thread")?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Handle the lazy loader uses to start acquisitions
    pub fn requester(&self) -> PanelRequester {
        PanelRequester {
            cmd_tx: self.cmd_tx.clone(),
        }
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

/// [`Acquire`] implementation that forwards to the worker
#[derive(Clone)]
pub struct PanelRequester {
    cmd_tx: UnboundedSender<RuntimeCommand>,
}

impl Acquire for PanelRequester {
    fn start(&mut self, panel: PanelRef) -> Result<(), PanelLoadError> {
        self.cmd_tx
            .send(RuntimeCommand::LoadPanel { panel })
            .map_err(|_| PanelLoadError::WorkerGone)
    }
}
