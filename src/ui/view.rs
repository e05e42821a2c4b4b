use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::view_model::{ItemRow, ViewSnapshot};

use super::app::{AppState, Focus};

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);
const COLOR_BORDER_INPUT: Color = Color::Rgb(180, 156, 92);

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let snapshot = app.model.snapshot(app.header_date);
    let area = frame.size();
    let [header, input, list, footer] = screen_layout(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            snapshot.date_header.clone(),
            Style::default()
                .fg(COLOR_TEXT)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        header,
    );
    render_input(frame, app, &snapshot, input);
    render_list(frame, app, &snapshot, list);
    render_footer(frame, app, &snapshot, footer);

    if let Some(banner) = snapshot.banner.as_deref() {
        render_banner(frame, area, banner);
    }
}

fn screen_layout(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

fn render_input(frame: &mut Frame, app: &mut AppState, snapshot: &ViewSnapshot, area: Rect) {
    app.input_area = Some(area);
    let focused = app.focus == Focus::Input;
    let inner_width = area.width.saturating_sub(2);

    // The submit hint only appears while there is something to submit.
    let title = if snapshot.submit_enabled {
        " Tasks  [enter] add "
    } else {
        " Tasks "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(if focused {
            COLOR_BORDER_INPUT
        } else {
            COLOR_MUTED_DARK
        }));

    let (widget, scroll) = match snapshot.placeholder.as_deref() {
        Some(placeholder) => (
            Paragraph::new(Span::styled(
                placeholder.to_string(),
                Style::default().fg(COLOR_MUTED_DARK),
            )),
            0,
        ),
        None => {
            let scroll = input_scroll(snapshot.input_cursor, inner_width);
            (
                Paragraph::new(Span::styled(
                    snapshot.input.clone(),
                    Style::default().fg(COLOR_TEXT),
                ))
                .scroll((0, scroll)),
                scroll,
            )
        }
    };
    frame.render_widget(widget.block(block), area);

    if focused && inner_width > 0 {
        let column = to_u16(snapshot.input_cursor.saturating_sub(scroll as usize))
            .min(inner_width - 1);
        frame.set_cursor(area.x + 1 + column, area.y + 1);
    }
}

/// Horizontal scroll that keeps the cursor inside `width` columns.
fn input_scroll(cursor: usize, width: u16) -> u16 {
    let width = width.max(1) as usize;
    to_u16(cursor.saturating_sub(width - 1))
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn render_list(frame: &mut Frame, app: &mut AppState, snapshot: &ViewSnapshot, area: Rect) {
    app.list_area = Some(area);
    let focused = app.focus == Focus::List;
    let border = if focused {
        COLOR_BORDER_LIST
    } else {
        COLOR_MUTED_DARK
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Items ({}) ", snapshot.items.len()))
        .border_style(Style::default().fg(border));

    if snapshot.items.is_empty() {
        let empty = Paragraph::new(Span::styled("No tasks", Style::default().fg(COLOR_MUTED)));
        frame.render_widget(empty.block(block), area);
        return;
    }

    let items: Vec<ListItem> = snapshot.items.iter().map(list_item).collect();
    let highlight = if focused {
        Modifier::REVERSED
    } else {
        Modifier::BOLD
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(highlight));

    app.list_state
        .select(snapshot.items.iter().position(|row| row.selected));
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn list_item(row: &ItemRow) -> ListItem<'static> {
    let (marker, marker_style, text_style) = if row.done {
        (
            "[x] ",
            Style::default().fg(COLOR_SUCCESS),
            Style::default()
                .fg(COLOR_MUTED)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        (
            "[ ] ",
            Style::default().fg(COLOR_MUTED),
            Style::default().fg(COLOR_TEXT),
        )
    };
    ListItem::new(Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(row.text.clone(), text_style),
    ]))
}

fn render_footer(frame: &mut Frame, app: &AppState, snapshot: &ViewSnapshot, area: Rect) {
    let badge = Span::styled(
        snapshot.completed_label.clone(),
        Style::default()
            .fg(if snapshot.completed_count > 0 {
                COLOR_SUCCESS
            } else {
                COLOR_ACCENT
            })
            .add_modifier(Modifier::BOLD),
    );

    let mut hint = vec![Span::styled(
        app.footer_hint(),
        Style::default().fg(COLOR_INFO),
    )];
    if let Some(status) = app.status_message.as_deref() {
        hint.push(Span::raw("  |  "));
        hint.push(Span::styled(
            status.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let widget = Paragraph::new(vec![Line::from(badge), Line::from(hint)])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn render_banner(frame: &mut Frame, area: Rect, text: &str) {
    let popup = banner_rect(text, area);
    frame.render_widget(Clear, popup);
    let widget = Paragraph::new(Span::styled(
        text.to_string(),
        Style::default()
            .fg(COLOR_SUCCESS)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_SUCCESS)),
    );
    frame.render_widget(widget, popup);
}

/// Bordered box sized to `text`, centred in `area`.
fn banner_rect(text: &str, area: Rect) -> Rect {
    let width = to_u16(text.chars().count())
        .saturating_add(6)
        .min(area.width);
    let height = 3.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
