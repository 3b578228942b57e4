//! Application shell: owns router state and turns input into actions

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::bootstrap::{AppPhase, BootstrapOutcome};
use crate::core::{
    parse_command, Action, BlockRef, Command, NotifyLevel, TabId, TransactionRef,
};
use crate::infrastructure::RuntimeEvent;
use crate::router::{compose, resolve_target, LazyLoader, LoadStatus, TabStateMachine, ViewDescriptor};
use crate::ui::sidebar::Sidebar;

const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
    Command,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: NotifyLevel,
    pub since: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

pub struct App {
    pub machine: TabStateMachine,
    pub loader: LazyLoader,
    pub phase: AppPhase,
    pub focus: Focus,
    pub sidebar: Sidebar,
    pub command: CommandBar,
    pub status: Option<StatusMessage>,
    pub tick: usize,
    pub should_quit: bool,
    /// Focus to return to when the command bar closes
    focus_before_command: Focus,
}

impl App {
    pub fn new(loader: LazyLoader, initial_tab: TabId) -> Self {
        let mut sidebar = Sidebar::default();
        sidebar.follow(initial_tab);
        Self {
            machine: TabStateMachine::new(initial_tab),
            loader,
            phase: AppPhase::Initializing,
            focus: Focus::Content,
            sidebar,
            command: CommandBar::default(),
            status: None,
            tick: 0,
            should_quit: false,
            focus_before_command: Focus::Content,
        }
    }

    /// Compose the current view, starting the visible panel's acquisition if needed
    pub fn view(&mut self) -> ViewDescriptor {
        compose(&self.machine, &mut self.loader)
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: NotifyLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, NotifyLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::RetryPanel => self.retry_current(),
            Action::Notify(text, level) => self.set_status(text, level),
            Action::Quit => self.should_quit = true,
            navigation => {
                debug_assert!(navigation.is_navigation());
                self.machine.apply(&navigation);
                if matches!(navigation, Action::ChangeTab(_)) {
                    self.sidebar.follow(self.machine.active_tab());
                }
            }
        }
    }

    fn retry_current(&mut self) {
        let (panel, _) = resolve_target(&self.machine);
        if self.loader.status(panel) != LoadStatus::Failed {
            self.set_status(format!("{} has not failed", panel.title()), NotifyLevel::Info);
            return;
        }
        self.loader.retry(panel);
        self.set_status(format!("Retrying {}", panel.title()), NotifyLevel::Info);
    }

    pub fn handle_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::PanelLoaded { panel, result } => {
                self.loader.complete(panel, result);
            }
            RuntimeEvent::BootstrapFinished { outcome } => {
                if self.phase.mark_ready() {
                    tracing::info!("application ready");
                }
                if outcome == BootstrapOutcome::Authenticated {
                    self.set_status("Signed in", NotifyLevel::Info);
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.focus == Focus::Command {
            self.handle_command_key(key);
            return;
        }
        if !self.phase.is_ready() {
            if key.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(':') => self.enter_command(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Content,
                    Focus::Content | Focus::Command => Focus::Sidebar,
                };
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(tab) = TabId::from_shortcut(c) {
                    self.apply_action(Action::ChangeTab(tab.as_str().to_string()));
                }
            }
            _ => match self.focus {
                Focus::Sidebar => self.handle_sidebar_key(key),
                _ => self.handle_content_key(key),
            },
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.sidebar.up(),
            KeyCode::Down | KeyCode::Char('j') => self.sidebar.down(),
            KeyCode::Enter => {
                let action = self.sidebar.activate();
                self.apply_action(action);
                self.focus = Focus::Content;
            }
            KeyCode::Esc if self.machine.is_drilled_down() => self.apply_action(Action::Back),
            KeyCode::Char('r') => self.retry_if_failed(),
            _ => {}
        }
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        let (panel, props) = resolve_target(&self.machine);
        match self.loader.status(panel) {
            LoadStatus::Ready => {
                let action = match self.loader.panel_mut(panel) {
                    Some(handle) => handle.handle_key(key, &props),
                    None => Action::None,
                };
                self.apply_action(action);
            }
            LoadStatus::Failed if key.code == KeyCode::Char('r') => self.retry_current(),
            _ => {
                if key.code == KeyCode::Esc && self.machine.is_drilled_down() {
                    self.apply_action(Action::Back);
                }
            }
        }
    }

    fn retry_if_failed(&mut self) {
        let (panel, _) = resolve_target(&self.machine);
        if self.loader.status(panel) == LoadStatus::Failed {
            self.retry_current();
        }
    }

    fn enter_command(&mut self) {
        self.focus_before_command = self.focus;
        self.focus = Focus::Command;
        self.command.input.clear();
    }

    fn exit_command(&mut self) {
        self.focus = self.focus_before_command;
        self.command.input.clear();
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_command(),
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.command.input);
                self.exit_command();
                self.execute_command(&input);
            }
            KeyCode::Backspace => {
                self.command.input.pop();
            }
            KeyCode::Up => {
                if let Some(last) = self.command.last.clone() {
                    self.command.input = last;
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                self.command.input.push(ch);
            }
            _ => {}
        }
    }

    /// Run one command-bar line
    pub fn execute_command(&mut self, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }
        self.command.last = Some(input.to_string());

        if !self.phase.is_ready() {
            if matches!(parse_command(input), Command::Quit) {
                self.should_quit = true;
            }
            return;
        }

        for action in self.command_actions(parse_command(input)) {
            self.apply_action(action);
        }
    }

    fn command_actions(&self, command: Command) -> Vec<Action> {
        let active = self.machine.active_tab();
        match command {
            Command::Tab(raw) => vec![Action::ChangeTab(raw)],
            Command::Block(number) => {
                let mut actions = Vec::new();
                if !active.is_block_explorer() {
                    actions.push(Action::ChangeTab(TabId::Explorer.as_str().to_string()));
                }
                actions.push(Action::SelectBlock(BlockRef::new(number, String::new())));
                actions
            }
            Command::Transaction(hash) => {
                let mut actions = Vec::new();
                if active != TabId::Transactions && !active.is_block_explorer() {
                    actions.push(Action::ChangeTab(TabId::Transactions.as_str().to_string()));
                }
                actions.push(Action::SelectTransaction(TransactionRef::new(hash)));
                actions
            }
            Command::Back => {
                if self.machine.is_drilled_down() {
                    vec![Action::Back]
                } else {
                    vec![Action::Notify("Nothing to go back from".to_string(), NotifyLevel::Info)]
                }
            }
            Command::Retry => vec![Action::RetryPanel],
            Command::Quit => vec![Action::Quit],
            Command::Unknown(raw) => vec![Action::Notify(
                format!("Unknown command: {raw}"),
                NotifyLevel::Warn,
            )],
        }
    }

    pub fn breadcrumb(&self) -> String {
        let active = self.machine.active_tab();
        let selection = self.machine.selection();
        let mut parts = vec![active.title().to_string()];
        if let Some(block) = selection.block() {
            parts.push(format!("block {block}"));
        }
        if let Some(tx) = selection.transaction() {
            parts.push(format!("tx {}", crate::panels::sample::short_hash(&tx.hash)));
        }
        parts.join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{Acquire, PanelLoadError, PanelRef};

    struct Immediate;

    impl Acquire for Immediate {
        fn start(&mut self, _panel: PanelRef) -> Result<(), PanelLoadError> {
            Ok(())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_app() -> App {
        let mut app = App::new(LazyLoader::new(Immediate), TabId::Dashboard);
        app.handle_event(RuntimeEvent::BootstrapFinished {
            outcome: BootstrapOutcome::Skipped,
        });
        app
    }

    #[test]
    fn test_input_ignored_while_initializing() {
        let mut app = App::new(LazyLoader::new(Immediate), TabId::Dashboard);
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.machine.active_tab(), TabId::Dashboard);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_shortcut_changes_tab_and_sidebar_follows() {
        let mut app = ready_app();
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.machine.active_tab(), TabId::Blocks);
        assert_eq!(TabId::ALL[app.sidebar.cursor()], TabId::Blocks);
    }

    #[test]
    fn test_block_command_drills_into_explorer() {
        let mut app = ready_app();
        app.execute_command("block 42");
        assert_eq!(app.machine.active_tab(), TabId::Explorer);
        assert!(app.machine.is_drilled_down());
        assert_eq!(app.view().panel(), PanelRef::BlockDetails);

        app.execute_command("back");
        assert!(!app.machine.is_drilled_down());
        assert_eq!(app.machine.active_tab(), TabId::Explorer);
    }

    #[test]
    fn test_unknown_command_notifies() {
        let mut app = ready_app();
        app.execute_command("frobnicate");
        let (text, level) = app.status_text().unwrap();
        assert!(text.contains("frobnicate"));
        assert_eq!(level, NotifyLevel::Warn);
    }

    #[test]
    fn test_r_retries_failed_panel() {
        let mut app = ready_app();
        assert!(app.view().is_loading());
        app.loader.complete(
            PanelRef::Dashboard,
            Err(PanelLoadError::Aborted(PanelRef::Dashboard)),
        );
        assert!(app.view().is_failed());

        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.view().is_loading());
        assert_eq!(app.loader.acquisitions_started(), 2);
    }

    #[test]
    fn test_command_bar_editing() {
        let mut app = ready_app();
        app.handle_key(key(KeyCode::Char(':')));
        assert_eq!(app.focus, Focus::Command);
        for c in "tab rdfx".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.focus, Focus::Content);
        assert_eq!(app.machine.active_tab(), TabId::Rdf);
        assert_eq!(app.command.last.as_deref(), Some("tab rdf"));
    }
}
