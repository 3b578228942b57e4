//! Suspension boundary around the content area
//!
//! Observes the composed view: a spinner while the panel loads, an error box
//! when it failed, otherwise the panel. A panel whose render fails or panics is
//! replaced by the error box so the area is never left blank.

use std::panic::{self, AssertUnwindSafe};

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::theme::Theme;
use crate::core::{Panel, PanelProps, PanelRenderError};
use crate::router::{LazyLoader, PanelRef, ViewDescriptor};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub const INITIALIZING_LABEL: &str = "Initializing application…";

pub fn loading_label(panel: PanelRef) -> String {
    format!("Loading {}…", panel.title())
}

fn spinner(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

pub fn render_view(
    f: &mut Frame,
    area: Rect,
    view: &ViewDescriptor,
    loader: &LazyLoader,
    tick: usize,
    theme: &Theme,
) {
    match view {
        ViewDescriptor::Loading { panel } => {
            render_spinner(f, area, &loading_label(*panel), tick, theme)
        }
        ViewDescriptor::Failed { panel, error } => {
            render_error(f, area, *panel, &error.to_string(), true, theme)
        }
        ViewDescriptor::Content { panel, props } => {
            let Some(handle) = loader.panel(*panel) else {
                // compose only yields Content for ready panels
                render_spinner(f, area, &loading_label(*panel), tick, theme);
                return;
            };
            if let Err(err) = render_contained(handle, f, area, props) {
                tracing::warn!(%panel, error = %err, "panel failed to render");
                f.render_widget(Clear, area);
                render_error(f, area, *panel, &err.to_string(), false, theme);
            }
        }
    }
}

/// Panels draw their own frame; a panic inside `render` becomes an error.
fn render_contained(
    handle: &dyn Panel,
    f: &mut Frame,
    area: Rect,
    props: &PanelProps,
) -> Result<(), PanelRenderError> {
    panic::catch_unwind(AssertUnwindSafe(|| handle.render(f, area, props)))
        .unwrap_or_else(|_| Err(PanelRenderError::Other("panel panicked".to_string())))
}

pub fn render_initializing(f: &mut Frame, area: Rect, tick: usize, theme: &Theme) {
    render_spinner(f, area, INITIALIZING_LABEL, tick, theme);
}

fn centered_line(area: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);
    rows[1]
}

fn render_spinner(f: &mut Frame, area: Rect, label: &str, tick: usize, theme: &Theme) {
    f.render_widget(theme.panel("", false), area);
    let line = Line::from(vec![
        Span::styled(spinner(tick), Style::default().fg(theme.accent)),
        Span::raw(" "),
        Span::styled(label.to_string(), Style::default().fg(theme.text)),
    ]);
    f.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        centered_line(area),
    );
}

fn render_error(
    f: &mut Frame,
    area: Rect,
    panel: PanelRef,
    message: &str,
    retryable: bool,
    theme: &Theme,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} is unavailable", panel.title()),
            Style::default().fg(theme.error),
        )),
        Line::from(""),
        Line::from(message.to_string()),
    ];
    if retryable {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "press r or :retry to try again",
            theme.label(),
        )));
    }
    let block = theme
        .panel(format!("{} - error", panel.title()), false)
        .border_style(Style::default().fg(theme.error));
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{Acquire, PanelLoadError};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    struct Immediate;

    impl Acquire for Immediate {
        fn start(&mut self, _panel: PanelRef) -> Result<(), PanelLoadError> {
            Ok(())
        }
    }

    struct Broken;

    impl Panel for Broken {
        fn render(
            &self,
            _frame: &mut Frame,
            _area: Rect,
            _props: &PanelProps,
        ) -> Result<(), PanelRenderError> {
            Err(PanelRenderError::Other("boom".to_string()))
        }
    }

    struct Panicking;

    impl Panel for Panicking {
        fn render(
            &self,
            _frame: &mut Frame,
            _area: Rect,
            _props: &PanelProps,
        ) -> Result<(), PanelRenderError> {
            let rows: Vec<u64> = Vec::new();
            Err(PanelRenderError::Other(rows[3].to_string()))
        }
    }

    struct Edge;

    impl Panel for Edge {
        fn render(
            &self,
            frame: &mut Frame,
            area: Rect,
            _props: &PanelProps,
        ) -> Result<(), PanelRenderError> {
            frame.render_widget(Paragraph::new("edge"), area);
            Ok(())
        }
    }

    fn text(buffer: &Buffer) -> String {
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn draw(view: &ViewDescriptor, loader: &LazyLoader) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                render_view(f, area, view, loader, 0, &Theme::default());
            })
            .unwrap();
        text(terminal.backend().buffer())
    }

    #[test]
    fn test_loading_shows_panel_label() {
        let loader = LazyLoader::new(Immediate);
        let out = draw(
            &ViewDescriptor::Loading {
                panel: PanelRef::BlockExplorer,
            },
            &loader,
        );
        assert!(out.contains("Loading Block Explorer"));
    }

    #[test]
    fn test_failed_shows_error_and_retry_hint() {
        let loader = LazyLoader::new(Immediate);
        let out = draw(
            &ViewDescriptor::Failed {
                panel: PanelRef::Analytics,
                error: PanelLoadError::WorkerGone,
            },
            &loader,
        );
        assert!(out.contains("Analytics is unavailable"));
        assert!(out.contains(":retry"));
    }

    #[test]
    fn test_render_error_is_contained() {
        let mut loader = LazyLoader::new(Immediate);
        loader.acquire(PanelRef::Rdf);
        loader.complete(PanelRef::Rdf, Ok(Box::new(Broken)));

        let out = draw(
            &ViewDescriptor::Content {
                panel: PanelRef::Rdf,
                props: PanelProps::default(),
            },
            &loader,
        );
        assert!(out.contains("RDF is unavailable"));
        assert!(out.contains("boom"));
    }
    #[test]
    fn test_render_panic_is_contained() {
        let mut loader = LazyLoader::new(Immediate);
        loader.acquire(PanelRef::Provenance);
        loader.complete(PanelRef::Provenance, Ok(Box::new(Panicking)));

        let out = draw(
            &ViewDescriptor::Content {
                panel: PanelRef::Provenance,
                props: PanelProps::default(),
            },
            &loader,
        );
        assert!(out.contains("Provenance is unavailable"));
        assert!(out.contains("panel panicked"));
        assert!(!out.contains(":retry"));
    }
    #[test]
    fn test_content_fills_area_without_extra_frame() {
        let mut loader = LazyLoader::new(Immediate);
        loader.acquire(PanelRef::Items);
        loader.complete(PanelRef::Items, Ok(Box::new(Edge)));

        let out = draw(
            &ViewDescriptor::Content {
                panel: PanelRef::Items,
                props: PanelProps::default(),
            },
            &loader,
        );
        assert!(out.starts_with("edge"));
    }
}
