//! Lazy panel loader
//!
//! Keeps one [`PanelLoadState`] per [`PanelRef`] for the life of the process.
//! The first `acquire` for a panel starts exactly one acquisition through the
//! [`Acquire`] seam; the outcome is fed back with [`LazyLoader::complete`].
//!
//! A failed panel stays failed until [`LazyLoader::retry`] is called. Nothing
//! retries automatically, so a broken panel cannot spin the render loop.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::core::Panel;
use crate::router::PanelRef;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelLoadError {
    #[error("no implementation registered for {0}")]
    Unavailable(PanelRef),
    #[error("loading {panel} failed: {reason}")]
    Failed { panel: PanelRef, reason: String },
    #[error("loading {0} was aborted")]
    Aborted(PanelRef),
    #[error("panel worker is not running")]
    WorkerGone,
}

/// Per-panel acquisition state
pub enum PanelLoadState {
    NotRequested,
    Pending,
    Ready(Box<dyn Panel>),
    Failed(PanelLoadError),
}

impl PanelLoadState {
    pub fn status(&self) -> LoadStatus {
        match self {
            PanelLoadState::NotRequested => LoadStatus::NotRequested,
            PanelLoadState::Pending => LoadStatus::Pending,
            PanelLoadState::Ready(_) => LoadStatus::Ready,
            PanelLoadState::Failed(_) => LoadStatus::Failed,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PanelLoadState::Ready(_))
    }
}

impl fmt::Debug for PanelLoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelLoadState::NotRequested => f.write_str("NotRequested"),
            PanelLoadState::Pending => f.write_str("Pending"),
            PanelLoadState::Ready(_) => f.write_str("Ready(<panel>)"),
            PanelLoadState::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

/// [`PanelLoadState`] without the handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    NotRequested,
    Pending,
    Ready,
    Failed,
}

/// Starts an acquisition; the result arrives later through `complete`
pub trait Acquire {
    fn start(&mut self, panel: PanelRef) -> Result<(), PanelLoadError>;
}

/// Produces panel implementations asynchronously
#[async_trait]
pub trait PanelSource: Send + Sync {
    async fn load(&self, panel: PanelRef) -> Result<Box<dyn Panel>, PanelLoadError>;
}

pub struct LazyLoader {
    states: HashMap<PanelRef, PanelLoadState>,
    acquirer: Box<dyn Acquire>,
    started: usize,
}

impl LazyLoader {
    pub fn new(acquirer: impl Acquire + 'static) -> Self {
        Self {
            states: HashMap::new(),
            acquirer: Box::new(acquirer),
            started: 0,
        }
    }

    /// Return the panel's state, starting its acquisition on first use.
    ///
    /// Repeated calls while pending or ready never start another acquisition.
    pub fn acquire(&mut self, panel: PanelRef) -> &PanelLoadState {
        let state = self
            .states
            .entry(panel)
            .or_insert(PanelLoadState::NotRequested);

        if matches!(state, PanelLoadState::NotRequested) {
            self.started += 1;
            *state = match self.acquirer.start(panel) {
                Ok(()) => {
                    tracing::info!(%panel, "panel acquisition started");
                    PanelLoadState::Pending
                }
                Err(err) => {
                    tracing::warn!(%panel, error = %err, "panel acquisition could not start");
                    PanelLoadState::Failed(err)
                }
            };
        }
        state
    }

    /// Apply the outcome of an acquisition. Returns false for a panel that
    /// was not pending (the outcome is dropped).
    pub fn complete(
        &mut self,
        panel: PanelRef,
        outcome: Result<Box<dyn Panel>, PanelLoadError>,
    ) -> bool {
        let Some(state) = self.states.get_mut(&panel) else {
            tracing::debug!(%panel, "dropping completion for unrequested panel");
            return false;
        };
        if !matches!(state, PanelLoadState::Pending) {
            tracing::debug!(%panel, status = ?state.status(), "dropping stray completion");
            return false;
        }

        *state = match outcome {
            Ok(handle) => {
                tracing::info!(%panel, "panel ready");
                PanelLoadState::Ready(handle)
            }
            Err(err) => {
                tracing::warn!(%panel, error = %err, "panel failed to load");
                PanelLoadState::Failed(err)
            }
        };
        true
    }

    /// Forget a failure and acquire again. No-op for other states.
    pub fn retry(&mut self, panel: PanelRef) -> &PanelLoadState {
        if let Some(state) = self.states.get_mut(&panel) {
            if matches!(state, PanelLoadState::Failed(_)) {
                tracing::info!(%panel, "retrying failed panel");
                *state = PanelLoadState::NotRequested;
            }
        }
        self.acquire(panel)
    }

    pub fn status(&self, panel: PanelRef) -> LoadStatus {
        self.states
            .get(&panel)
            .map(PanelLoadState::status)
            .unwrap_or(LoadStatus::NotRequested)
    }

    pub fn error(&self, panel: PanelRef) -> Option<&PanelLoadError> {
        match self.states.get(&panel) {
            Some(PanelLoadState::Failed(err)) => Some(err),
            _ => None,
        }
    }

    pub fn panel(&self, panel: PanelRef) -> Option<&dyn Panel> {
        match self.states.get(&panel) {
            Some(PanelLoadState::Ready(handle)) => Some(handle.as_ref()),
            _ => None,
        }
    }

    pub fn panel_mut(&mut self, panel: PanelRef) -> Option<&mut (dyn Panel + 'static)> {
        match self.states.get_mut(&panel) {
            Some(PanelLoadState::Ready(handle)) => Some(handle.as_mut()),
            _ => None,
        }
    }

    /// Number of acquisitions started over the loader's lifetime
    pub fn acquisitions_started(&self) -> usize {
        self.started
    }

    pub fn ready_count(&self) -> usize {
        self.states.values().filter(|state| state.is_ready()).count()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ratatui::layout::Rect;
    use ratatui::Frame;

    use super::*;
    use crate::core::{PanelProps, PanelRenderError};

    struct Blank;

    impl Panel for Blank {
        fn render(&self, _: &mut Frame, _: Rect, _: &PanelProps) -> Result<(), PanelRenderError> {
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<PanelRef>>>);

    impl Acquire for Recorder {
        fn start(&mut self, panel: PanelRef) -> Result<(), PanelLoadError> {
            self.0.borrow_mut().push(panel);
            Ok(())
        }
    }

    struct Refusing;

    impl Acquire for Refusing {
        fn start(&mut self, _panel: PanelRef) -> Result<(), PanelLoadError> {
            Err(PanelLoadError::WorkerGone)
        }
    }

    #[test]
    fn test_first_acquire_goes_pending() {
        let calls = Recorder::default();
        let mut loader = LazyLoader::new(calls.clone());
        assert_eq!(loader.status(PanelRef::Rdf), LoadStatus::NotRequested);
        assert_eq!(loader.acquire(PanelRef::Rdf).status(), LoadStatus::Pending);
        assert_eq!(*calls.0.borrow(), vec![PanelRef::Rdf]);
    }

    #[test]
    fn test_pending_panel_is_not_acquired_twice() {
        let calls = Recorder::default();
        let mut loader = LazyLoader::new(calls.clone());
        loader.acquire(PanelRef::Timeline);
        loader.acquire(PanelRef::Timeline);
        loader.acquire(PanelRef::Timeline);
        assert_eq!(calls.0.borrow().len(), 1);
        assert_eq!(loader.acquisitions_started(), 1);
    }

    #[test]
    fn test_ready_handle_is_kept() {
        let calls = Recorder::default();
        let mut loader = LazyLoader::new(calls.clone());
        loader.acquire(PanelRef::Items);
        assert!(loader.complete(PanelRef::Items, Ok(Box::new(Blank))));
        assert!(loader.acquire(PanelRef::Items).is_ready());
        assert!(loader.panel(PanelRef::Items).is_some());
        assert_eq!(calls.0.borrow().len(), 1);
        assert_eq!(loader.ready_count(), 1);
    }

    #[test]
    fn test_failure_is_sticky_until_retry() {
        let calls = Recorder::default();
        let mut loader = LazyLoader::new(calls.clone());
        loader.acquire(PanelRef::Ontology);
        let err = PanelLoadError::Failed {
            panel: PanelRef::Ontology,
            reason: "boom".to_string(),
        };
        loader.complete(PanelRef::Ontology, Err(err.clone()));

        assert_eq!(loader.acquire(PanelRef::Ontology).status(), LoadStatus::Failed);
        assert_eq!(loader.error(PanelRef::Ontology), Some(&err));
        assert_eq!(calls.0.borrow().len(), 1);

        assert_eq!(loader.retry(PanelRef::Ontology).status(), LoadStatus::Pending);
        assert_eq!(calls.0.borrow().len(), 2);
    }

    #[test]
    fn test_retry_leaves_ready_panels_alone() {
        let calls = Recorder::default();
        let mut loader = LazyLoader::new(calls.clone());
        loader.acquire(PanelRef::Dashboard);
        loader.complete(PanelRef::Dashboard, Ok(Box::new(Blank)));
        assert!(loader.retry(PanelRef::Dashboard).is_ready());
        assert_eq!(calls.0.borrow().len(), 1);
    }

    #[test]
    fn test_stray_completions_are_dropped() {
        let mut loader = LazyLoader::new(Recorder::default());
        assert!(!loader.complete(PanelRef::Rdf, Ok(Box::new(Blank))));
        assert_eq!(loader.status(PanelRef::Rdf), LoadStatus::NotRequested);

        loader.acquire(PanelRef::Rdf);
        assert!(loader.complete(PanelRef::Rdf, Ok(Box::new(Blank))));
        assert!(!loader.complete(PanelRef::Rdf, Err(PanelLoadError::Aborted(PanelRef::Rdf))));
        assert_eq!(loader.status(PanelRef::Rdf), LoadStatus::Ready);
    }

    #[test]
    fn test_start_failure_marks_panel_failed() {
        let mut loader = LazyLoader::new(Refusing);
        assert_eq!(loader.acquire(PanelRef::Search).status(), LoadStatus::Failed);
        assert_eq!(loader.error(PanelRef::Search), Some(&PanelLoadError::WorkerGone));
    }
}
