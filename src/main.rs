//! Userboard - Actor-based admin dashboard for user accounts
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async user source calls

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use userboard_tui::app::state::{FilterField, UserAction};
use userboard_tui::constants::{APP_NAME, DEFAULT_LOG_FILE};
use userboard_tui::messages::render::HeaderCell;
use userboard_tui::messages::ui_events::{key_to_ui_event, Mode};
use userboard_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use userboard_tui::source::source_from_config;
use userboard_tui::table::column::format_date;
use userboard_tui::table::{CellValue, Column, TableRow};
use userboard_tui::ui::{
    centered_rect, render_page_buttons, render_showing_line, render_summary_card, sort_indicator,
    status_style,
};
use userboard_tui::{AppActor, Config, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let log_name = config
        .log_file
        .file_name()
        .unwrap_or(OsStr::new(DEFAULT_LOG_FILE));
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let source = source_from_config(&config)?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(source.clone(), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(source, config.page_size, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState {
        loading: true,
        ..RenderState::default()
    };

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.mode) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    match &state.detail {
        Some(_) => draw_detail(f, state, main_chunks[1]),
        None => draw_list(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    if state.mode == Mode::Filter {
        draw_filter_popup(f, state, area);
    }
    if state.action_menu.is_some() {
        draw_action_menu(f, state, area);
    }
    if state.mode == Mode::Help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", APP_NAME),
        Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
    )];
    spans.push(Span::raw(" Users "));
    if state.loading || state.refreshing {
        spans.push(Span::styled("[loading...] ", Style::default().fg(Color::Yellow)));
    }
    if state.filter_active {
        spans.push(Span::styled("[filtered] ", Style::default().fg(Color::Magenta)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Summary cards
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    draw_summary(f, state, chunks[0]);
    draw_table(f, state, chunks[1]);
    draw_pagination(f, state, chunks[2]);
}

fn draw_summary(f: &mut Frame, state: &RenderState, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let summary = &state.summary;
    f.render_widget(render_summary_card("USERS", summary.total, Color::Magenta), cards[0]);
    f.render_widget(render_summary_card("ACTIVE USERS", summary.active, Color::Green), cards[1]);
    f.render_widget(render_summary_card("INACTIVE USERS", summary.inactive, Color::Gray), cards[2]);
    f.render_widget(render_summary_card("BLACKLISTED USERS", summary.blacklisted, Color::Red), cards[3]);
}

fn header_label(header: &HeaderCell) -> String {
    if header.sortable {
        format!("{} {}", header.title, sort_indicator(header.sort))
    } else {
        header.title.to_string()
    }
}

fn row_cells(row: &TableRow) -> Vec<Cell<'static>> {
    row.cells
        .iter()
        .map(|(_, value)| match value {
            CellValue::Status(status) => Cell::from(Span::styled(status.as_str(), status_style(*status))),
            CellValue::Action { .. } => Cell::from(Span::styled(value.display(), Style::default().fg(Color::Cyan))),
            _ => Cell::from(value.display()),
        })
        .collect()
}

fn column_width(column: Column) -> Constraint {
    match column {
        Column::Organization => Constraint::Percentage(13),
        Column::FullName => Constraint::Percentage(17),
        Column::Email => Constraint::Percentage(23),
        Column::DateJoined => Constraint::Percentage(20),
        Column::PhoneNumber => Constraint::Percentage(13),
        Column::Status => Constraint::Percentage(11),
        Column::Action => Constraint::Length(3),
    }
}

fn draw_table(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Users (O/N/E/D/P/S sort, f filter, a actions, Enter details) ");

    if state.rows.is_empty() {
        let (message, style) = if state.loading {
            ("Loading users...".to_string(), Style::default().fg(Color::Yellow))
        } else if let Some(error) = &state.fetch_error {
            (format!("Failed to load users: {}\n\nPress 'r' to retry.", error), Style::default().fg(Color::Red))
        } else if state.filter_active {
            ("No users match the filter. Press 'x' to clear it.".to_string(), Style::default().fg(Color::DarkGray))
        } else {
            ("No users.".to_string(), Style::default().fg(Color::DarkGray))
        };
        let paragraph = Paragraph::new(message)
            .style(style)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(state.columns.iter().map(|h| Cell::from(header_label(h))))
        .style(Style::default().fg(Color::Yellow).bold())
        .bottom_margin(1);
    let rows: Vec<Row> = state.rows.iter().map(|row| Row::new(row_cells(row))).collect();
    let widths: Vec<Constraint> = state.columns.iter().map(|h| column_width(h.column)).collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).bold());

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected_row));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_pagination(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let showing = render_showing_line(
        state.page_size,
        state.summary.total,
        state.filtered_total,
        state.filter_active,
    );
    f.render_widget(Paragraph::new(showing), chunks[0]);

    let buttons = render_page_buttons(
        state.page_index,
        state.page_count,
        state.can_go_previous,
        state.can_go_next,
    );
    f.render_widget(Paragraph::new(buttons).right_aligned(), chunks[1]);
}

fn draw_detail(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(user) = &state.detail else {
        return;
    };

    let label = |text: &'static str| Span::styled(format!("{:<14}", text), Style::default().fg(Color::Gray));
    let lines = vec![
        Line::from(Span::styled(user.full_name.clone(), Style::default().fg(Color::Cyan).bold())),
        Line::from(Span::styled(format!("ID {}", user.id), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![label("Status"), Span::styled(user.status.as_str(), status_style(user.status))]),
        Line::from(vec![label("Organization"), Span::raw(user.organization.clone())]),
        Line::from(vec![label("Email"), Span::raw(user.email.clone())]),
        Line::from(vec![label("Phone Number"), Span::raw(user.phone_number.clone())]),
        Line::from(vec![label("Date Joined"), Span::raw(format_date(&user.date_joined))]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" User Details (Esc back, a actions) ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let bar = match (&state.notice, &state.fetch_error) {
        (Some(notice), _) => {
            let color = if notice.is_error { Color::Red } else { Color::Green };
            Paragraph::new(format!(" {} ", notice.message)).style(Style::default().fg(color))
        }
        (None, Some(error)) if !state.rows.is_empty() => {
            Paragraph::new(format!(" Showing cached users: {} (r to retry) ", error))
                .style(Style::default().fg(Color::Red))
        }
        _ => {
            let hint = match state.mode {
                Mode::Detail => " Esc:back | a:actions | ?:help | q:quit ",
                _ => " ↑/↓:row | ←/→:page | 1-9:go to page | z:page size | r:refresh | ?:help | q:quit ",
            };
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray))
        }
    };
    f.render_widget(bar, area);
}

fn draw_filter_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(50, 60, area);
    let form = &state.filter_form;

    let mut lines = Vec::new();
    for field in FilterField::ALL {
        let focused = field == form.focused;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let value = form.value(field);
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(Span::styled(field.label(), label_style)));
        lines.push(Line::from(format!("  {}{}", value, cursor)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter:Filter  Ctrl+R:Reset  Tab:next field  Esc:cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filter ")
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, popup_area);
    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn draw_action_menu(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(menu) = &state.action_menu else {
        return;
    };
    let popup_area = centered_rect(30, 20, area);

    let items: Vec<ListItem> = UserAction::ALL
        .iter()
        .map(|action| ListItem::new(action.label()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Actions ")
                .style(Style::default().bg(Color::Black)),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(menu.selected));

    f.render_widget(Clear, popup_area);
    f.render_stateful_widget(list, popup_area, &mut list_state);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 USERBOARD - Keyboard Shortcuts

 TABLE
   ↑ / ↓  (j / k)     Select row
   ← / →  (h / l)     Previous / next page
   1 - 9              Go to page
   z                  Cycle page size (10/20/30/40/50)
   Enter              View user details
   a                  Action menu (view, blacklist, activate)
   r                  Refresh users

 SORTING (unsorted -> ascending -> descending)
   O  Organization    N  Full Name      E  Email
   D  Date Joined     P  Phone Number   S  Status

 FILTER
   f                  Open filter
   x                  Clear filter
   Tab / Shift+Tab    Next / previous field
   Enter              Apply        Ctrl+R  Reset

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
