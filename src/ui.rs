use ratatui::{prelude::*, widgets::*};

use crate::constants::PAGE_SIZE_OPTIONS;
use crate::models::UserStatus;
use crate::table::SortDirection;

/// Status cell style: green active, red blacklisted, grey italic inactive
pub fn status_style(status: UserStatus) -> Style {
    match status {
        UserStatus::Active => Style::default().fg(Color::Green).bold(),
        UserStatus::Blacklisted => Style::default().fg(Color::Red).bold(),
        UserStatus::Inactive => Style::default().fg(Color::Gray).italic(),
        UserStatus::Unknown => Style::default(),
    }
}

/// Header arrow for a sortable column
pub fn sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Ascending) => "▲",
        Some(SortDirection::Descending) => "▼",
        None => "↕",
    }
}

/// Previous/next arrows with numbered page buttons in between
pub fn render_page_buttons(
    page_index: usize,
    page_count: usize,
    can_go_previous: bool,
    can_go_next: bool,
) -> Line<'static> {
    let arrow = |label: &'static str, enabled: bool| {
        if enabled {
            Span::styled(label, Style::default().fg(Color::Cyan).bold())
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };

    let mut spans = vec![arrow(" < ", can_go_previous)];
    if page_count > 1 {
        for i in 0..page_count {
            let label = format!(" {} ", i + 1);
            if i == page_index {
                spans.push(Span::styled(label, Style::default().fg(Color::Black).bg(Color::Cyan).bold()));
            } else {
                spans.push(Span::raw(label));
            }
        }
    }
    spans.push(arrow(" > ", can_go_next));
    Line::from(spans)
}

/// Footer text: page size out of every user, plus the match count when filtered
pub fn render_showing_line(
    page_size: usize,
    total: usize,
    filtered_total: usize,
    filter_active: bool,
) -> Line<'static> {
    let sizes: Vec<String> = PAGE_SIZE_OPTIONS.iter().map(|s| s.to_string()).collect();
    let mut spans = vec![
        Span::raw(" Showing "),
        Span::styled(format!("[{}]", page_size), Style::default().fg(Color::Cyan).bold()),
        Span::raw(format!(" out of {} ", total)),
    ];
    if filter_active {
        spans.push(Span::styled(
            format!("({} matching) ", filtered_total),
            Style::default().fg(Color::Magenta),
        ));
    }
    spans.push(Span::styled(
        format!("(z: {})", sizes.join("/")),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

/// Bordered summary card with a title and a count
pub fn render_summary_card<'a>(title: &'a str, value: usize, color: Color) -> Paragraph<'a> {
    let lines = vec![
        Line::from(Span::styled(title, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(value.to_string(), Style::default().fg(color).bold())),
    ];
    Paragraph::new(lines).block(Block::default().borders(Borders::ALL))
}

/// Rectangle of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
