//! UI rendering using ratatui

use pickapal_core::{Notice, NoticeKind, RosterChange};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Mode};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for the picked name
const HIGHLIGHT: Color = Color::Yellow;
/// Success color
const SUCCESS: Color = Color::Green;
/// Error color
const ERROR: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Entry field
            Constraint::Min(3),    // Names
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Picked name
            Constraint::Length(6), // Controls
            Constraint::Min(3),    // Activity
        ])
        .split(columns[1]);

    render_entry(frame, app, left[0]);
    render_names(frame, app, left[1]);
    render_picked(frame, app, right[0]);
    render_controls(frame, app, right[1]);
    render_activity(frame, app, right[2]);
    render_status_bar(frame, app, rows[1]);

    // Alerts sit above help
    if let Some(notice) = app.roster.notice() {
        render_notice(frame, notice);
    } else if let Some(help_text) = app.help_text {
        render_help_overlay(frame, help_text);
    }
}

fn titled_block(title: &str, focused: bool) -> Block<'_> {
    let (border, title_style) = if focused {
        (
            Style::default().fg(ACCENT),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(SECONDARY), Style::default().fg(SECONDARY))
    };

    Block::default()
        .title(title)
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_style(border)
}

/// Render the entry field
fn render_entry(frame: &mut Frame, app: &App, area: Rect) {
    let is_editing = app.mode == Mode::Edit;
    let title = if is_editing { " Add a name [EDIT] " } else { " Add a name " };
    let block = titled_block(title, is_editing);

    let input = app.roster.pending_input();
    let line = if input.is_empty() && !is_editing {
        Line::from(Span::styled("Press 'i' to type a name", Style::default().fg(DIM)))
    } else if is_editing {
        let split = input
            .char_indices()
            .nth(app.input_cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(input.len());
        let mut spans = vec![
            Span::raw(&input[..split]),
            Span::styled("|", Style::default().fg(SUCCESS)),
            Span::raw(&input[split..]),
        ];
        if let Some(completion) = app.completions.first() {
            spans.push(Span::styled(format!("  Tab: {}", completion), Style::default().fg(DIM)));
        }
        Line::from(spans)
    } else {
        Line::from(input)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the names list
fn render_names(frame: &mut Frame, app: &mut App, area: Rect) {
    let names = app.roster.names();
    let title = format!(" Names ({}) ", names.len());
    let block = titled_block(&title, app.mode == Mode::Normal);

    let visible_height = block.inner(area).height as usize;
    app.fit_scroll(visible_height);

    let picked_key = app.roster.picked().map(str::to_lowercase);
    let items: Vec<ListItem> = app
        .roster
        .names()
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
        .map(|(idx, name)| {
            let is_selected = idx == app.selected_index && app.mode == Mode::Normal;
            let is_picked = picked_key.as_deref() == Some(name.to_lowercase().as_str());

            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else if is_picked {
                Style::default().fg(HIGHLIGHT)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(Span::styled(format!("{:>3}. {}", idx + 1, name), style)))
        })
        .collect();

    let list = if items.is_empty() {
        let placeholder = ListItem::new(Line::from(Span::styled(
            "  No names yet",
            Style::default().fg(DIM),
        )));
        List::new(vec![placeholder]).block(block)
    } else {
        List::new(items).block(block)
    };

    frame.render_widget(list, area);
}

/// Render the picked name panel
fn render_picked(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Picked ")
        .title_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    let view = app.roster.view();
    let style = if view.picked.is_some() {
        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM)
    };

    let content = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(view.picked_label, style)),
    ]);

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Render toggle and snapshot controls
fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled_block(" Controls ", false);

    let toggle = if app.roster.remove_on_pick() {
        Span::styled("[x] ", Style::default().fg(SUCCESS))
    } else {
        Span::styled("[ ] ", Style::default().fg(SECONDARY))
    };

    let saved = app.roster.saved_names().len();
    let saved_text = if saved == 0 {
        "nothing saved".to_string()
    } else {
        format!("{} saved", saved)
    };

    let content = Text::from(vec![
        Line::from(vec![toggle, Span::raw("Remove when picked (r)")]),
        Line::from(vec![
            Span::styled("p", Style::default().fg(ACCENT)),
            Span::raw(" pick   "),
            Span::styled("c", Style::default().fg(ACCENT)),
            Span::raw(" clear"),
        ]),
        Line::from(vec![
            Span::styled("s", Style::default().fg(ACCENT)),
            Span::raw(" save   "),
            Span::styled("l", Style::default().fg(ACCENT)),
            Span::raw(" load"),
        ]),
        Line::from(Span::styled(saved_text, Style::default().fg(DIM))),
    ]);

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Render recent roster changes
fn render_activity(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled_block(" Activity ", false);
    let height = block.inner(area).height as usize;

    let items: Vec<ListItem> = app
        .recent_activity(height)
        .iter()
        .map(|change| {
            ListItem::new(Line::from(Span::styled(
                describe_change(change),
                Style::default().fg(DIM),
            )))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// One-line description of a roster change
pub fn describe_change(change: &RosterChange) -> String {
    match change {
        RosterChange::NameAdded { name } => format!("+ {}", name),
        RosterChange::Picked { name, removed: 0 } => format!("Picked {}", name),
        RosterChange::Picked { name, removed } => {
            format!("Picked {} (removed {})", name, removed)
        }
        RosterChange::Saved { count } => format!("Saved {} names", count),
        RosterChange::Loaded { count } => format!("Loaded {} names", count),
        RosterChange::Cleared { count } => format!("Cleared {} names", count),
        RosterChange::RemoveOnPickChanged { enabled: true } => "Remove on pick: on".to_string(),
        RosterChange::RemoveOnPickChanged { enabled: false } => "Remove on pick: off".to_string(),
        RosterChange::PendingInputChanged { text } => format!("Typing: {}", text),
        RosterChange::NoticeRaised { code } => format!("! {:?}", code),
        RosterChange::NoticeDismissed => "Alert dismissed".to_string(),
    }
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_indicator = match app.mode {
        Mode::Edit => Span::styled(" EDIT ", Style::default().bg(SUCCESS).fg(Color::Black)),
        Mode::Normal => Span::styled(" BUTTONS ", Style::default().bg(ACCENT).fg(Color::Black)),
    };

    let help_text = match app.mode {
        Mode::Edit => "Enter:add  /cmd:command  Esc:buttons  Ctrl+P:pick  Ctrl+C:quit",
        Mode::Normal => "p:pick  s:save  l:load  r:toggle  c:clear  i:type  ?:help  q:quit",
    };

    let line = Line::from(vec![
        mode_indicator,
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Centered popup area
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Render a notice as a modal alert
fn render_notice(frame: &mut Frame, notice: &Notice) {
    let color = match notice.kind {
        NoticeKind::Error => ERROR,
        NoticeKind::Info => SUCCESS,
    };

    let area = popup_area(frame.area(), 44, 7);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", notice.title))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let content = Text::from(vec![
        Line::from(""),
        Line::from(notice.message.as_str()),
        Line::from(""),
        Line::from(Span::styled("press any key", Style::default().fg(DIM))),
    ]);

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, help_text: &str) {
    let height = help_text.lines().count() as u16 + 2;
    let area = popup_area(frame.area(), 70, height);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help (press any key to close) ")
        .title_style(Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUCCESS));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickapal_core::{seeded_rng, NameRoster, PICK_PLACEHOLDER};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn app_with(names: &[&str]) -> App {
        let mut roster = NameRoster::new();
        roster.seed(names.iter());
        App::new(roster, seeded_rng(Some(5)))
    }

    #[test]
    fn test_renders_names_and_placeholder() {
        let mut app = app_with(&["Elisha", "Andre"]);
        let screen = draw(&mut app);

        assert!(screen.contains("Elisha"));
        assert!(screen.contains("Andre"));
        assert!(screen.contains(PICK_PLACEHOLDER));
        assert!(screen.contains("Names (2)"));
    }

    #[test]
    fn test_renders_notice_alert() {
        let mut app = app_with(&[]);
        app.pick();
        let screen = draw(&mut app);

        assert!(screen.contains("No names"));
        assert!(screen.contains("press any key"));
    }

    #[test]
    fn test_describe_pick_with_removal() {
        let change = RosterChange::Picked {
            name: "Ana".to_string(),
            removed: 1,
        };
        assert_eq!(describe_change(&change), "Picked Ana (removed 1)");
    }
}
