use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

pub mod boundary;
pub mod layout;
pub mod sidebar;
pub mod theme;

use crate::app::{App, Focus};
use crate::core::NotifyLevel;
use theme::Theme;

pub fn draw(f: &mut Frame, app: &mut App, theme: &Theme) {
    let size = f.size();
    f.render_widget(Block::default().style(Style::default().fg(theme.text)), size);

    let areas = layout::areas(size);
    draw_header(f, areas.header, app, theme);

    if app.phase.is_ready() {
        app.sidebar.render(
            f,
            areas.sidebar,
            app.machine.active_tab(),
            app.focus == Focus::Sidebar,
            theme,
        );
        let view = app.view();
        boundary::render_view(
            f,
            areas.content,
            &view,
            &app.loader,
            app.tick,
            theme,
        );
    } else {
        let body = areas.sidebar.union(areas.content);
        boundary::render_initializing(f, body, app.tick, theme);
    }

    draw_status_line(f, areas.status_line, app, theme);
    draw_command_line(f, areas.command_line, app, theme);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let title = Line::from(vec![
        Span::styled("chainview", theme.title()),
        Span::raw("  "),
        Span::styled("Tab ", theme.label()),
        Span::raw(format!("{}  ", app.machine.active_tab())),
        Span::styled("Panel ", theme.label()),
        Span::raw(crate::router::resolve_target(&app.machine).0.title()),
    ]);
    f.render_widget(
        Paragraph::new(title)
            .block(theme.panel("", false))
            .alignment(Alignment::Left),
        area,
    );
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = match app.status_text() {
        Some((text, level)) => {
            let color = match level {
                NotifyLevel::Info => theme.accent,
                NotifyLevel::Warn => theme.warn,
                NotifyLevel::Error => theme.error,
            };
            Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
        }
        None => Line::from(vec![
            Span::styled("View ", theme.label()),
            Span::raw(app.breadcrumb()),
            Span::styled("  Loaded ", theme.label()),
            Span::raw(app.loader.ready_count().to_string()),
        ]),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let content = if app.focus == Focus::Command {
        Line::from(vec![
            Span::styled(": ", Style::default().fg(Color::Yellow)),
            Span::raw(app.command.input.clone()),
            Span::styled(
                "  tab <id> | block <n> | tx <hash> | back | retry | quit",
                theme.label(),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "q quit  tab focus  1-9 tabs  : command  esc back  r retry",
            theme.label(),
        ))
    };
    f.render_widget(Paragraph::new(content), area);
}
