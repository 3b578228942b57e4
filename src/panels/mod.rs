//! Built-in panel implementations and the source that loads them

pub mod block_details;
pub mod block_explorer;
pub mod dashboard;
pub mod info;
pub mod sample;
pub mod transactions;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::Panel;
use crate::router::{PanelLoadError, PanelRef, PanelSource};

pub use block_details::BlockDetails;
pub use block_explorer::BlockExplorer;
pub use dashboard::Dashboard;
pub use info::InfoPanel;
pub use sample::SampleChain;
pub use transactions::Transactions;

/// Cursor over a list whose length may change between frames
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
}

impl ListCursor {
    pub fn selected(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.index.min(len - 1))
        }
    }

    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn down(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
        }
    }
}

/// Loads the bundled panels over a shared sample chain.
///
/// `delay` simulates a slow fetch so the loading view is visible, and panels
/// in `failing` always fail to load.
pub struct BuiltinPanels {
    chain: Arc<SampleChain>,
    delay: Duration,
    failing: HashSet<PanelRef>,
}

impl BuiltinPanels {
    pub fn new(chain: Arc<SampleChain>) -> Self {
        Self {
            chain,
            delay: Duration::ZERO,
            failing: HashSet::new(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_failing(mut self, failing: impl IntoIterator<Item = PanelRef>) -> Self {
        self.failing.extend(failing);
        self
    }

    pub fn build(&self, panel: PanelRef) -> Box<dyn Panel> {
        let chain = self.chain.clone();
        match panel {
            PanelRef::Dashboard => Box::new(Dashboard::new(chain)),
            PanelRef::BlockExplorer => Box::new(BlockExplorer::new(chain)),
            PanelRef::BlockDetails => Box::new(BlockDetails::new(chain)),
            PanelRef::Transactions => Box::new(Transactions::new(chain)),
            other => Box::new(InfoPanel::new(other)),
        }
    }
}

#[async_trait]
impl PanelSource for BuiltinPanels {
    async fn load(&self, panel: PanelRef) -> Result<Box<dyn Panel>, PanelLoadError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.contains(&panel) {
            return Err(PanelLoadError::Failed {
                panel,
                reason: "disabled by configuration".to_string(),
            });
        }
        tracing::debug!(%panel, "built panel");
        Ok(self.build(panel))
    }
}
