//! Async worker - runs in the Tokio runtime and performs panel loads

use std::panic::AssertUnwindSafe;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::bootstrap::{run_bootstrap, BootstrapOutcome, BootstrapStep};
use crate::core::Panel;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};
use crate::router::{PanelLoadError, PanelRef, PanelSource};

/// Run the async worker loop until `Shutdown` or until the UI goes away
pub async fn run_async_worker(
    source: Arc<dyn PanelSource>,
    bootstrap: Arc<dyn BootstrapStep>,
    mut cmd_rx: UnboundedReceiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) {
    let mut bootstrapped = false;

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            RuntimeCommand::Shutdown => break,

            RuntimeCommand::LoadPanel { panel } => {
                let source = source.clone();
                let evt_tx = evt_tx.clone();
                // Loads run concurrently; a slow panel never delays another.
                tokio::spawn(async move {
                    let result = load_panel(source.as_ref(), panel).await;
                    let _ = evt_tx.send(RuntimeEvent::PanelLoaded { panel, result });
                });
            }

            RuntimeCommand::Bootstrap => {
                if bootstrapped {
                    tracing::debug!("bootstrap already ran, ignoring request");
                    continue;
                }
                bootstrapped = true;
                let bootstrap = bootstrap.clone();
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let outcome = match AssertUnwindSafe(run_bootstrap(bootstrap.as_ref()))
                        .catch_unwind()
                        .await
                    {
                        Ok(outcome) => outcome,
                        Err(_) => {
                            tracing::error!("bootstrap step panicked");
                            BootstrapOutcome::Failed("bootstrap step panicked".to_string())
                        }
                    };
                    let _ = evt_tx.send(RuntimeEvent::BootstrapFinished { outcome });
                });
            }
        }
    }

    tracing::debug!("runtime worker stopped");
}

async fn load_panel(
    source: &dyn PanelSource,
    panel: PanelRef,
) -> Result<Box<dyn Panel>, PanelLoadError> {
    match AssertUnwindSafe(source.load(panel)).catch_unwind().await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(%panel, "panel loader panicked");
            Err(PanelLoadError::Failed {
                panel,
                reason: "loader panicked".to_string(),
            })
        }
    }
}
