pub mod action;
pub mod command;
pub mod panel;
pub mod selection;
pub mod tab;

pub use action::{Action, NotifyLevel};
pub use command::{parse_command, Command};
pub use panel::{Callback, Panel, PanelProps, PanelRenderError};
pub use selection::{BlockRef, Selection, TransactionRef};
pub use tab::{TabId, UnknownTab};
