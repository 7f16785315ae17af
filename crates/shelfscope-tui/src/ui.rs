use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use shelfscope_core::ViewMode;

use crate::app::{ActivePanel, App, Mode};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(chunks[0]);

    render_sidebar(frame, app, panels[0]);
    render_books(frame, app, panels[1]);
    render_statusbar(frame, app, chunks[1]);
}

// ─── Sidebar ────────────────────────────────────────────────

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.active_panel == ActivePanel::Achievements;
    let block = Block::default()
        .title(" Achievements ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let inner = block.inner(area);
    let visible_height = inner.height as usize;
    let scroll_offset = scroll_offset(app.sidebar_selected, visible_height);

    let selection = &app.session.filter.selected_achievements;
    let mut rows: Vec<ListItem> = Vec::new();

    for (i, line) in sidebar_lines(app)
        .into_iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
    {
        let is_selected = i == app.sidebar_selected && is_focused;
        let prefix = if is_selected { "▶ " } else { "  " };
        let style = if is_selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else if i > 0 && selection.contains(&app.session.achievement_names()[i - 1]) {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        rows.push(ListItem::new(Line::from(vec![
            Span::raw(prefix),
            Span::styled(line, style),
        ])));
    }

    frame.render_widget(List::new(rows).block(block), area);
}

fn sidebar_lines(app: &App) -> Vec<String> {
    let selection = &app.session.filter.selected_achievements;
    let mut lines = vec![format!("All books ({})", app.session.index().len())];

    for name in app.session.achievement_names() {
        let mark = if selection.contains(name) { "[x]" } else { "[ ]" };
        lines.push(format!("{mark} {name} ({})", app.output.visible_in(name)));
    }
    lines
}

// ─── Book panel ─────────────────────────────────────────────

fn render_books(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.active_panel == ActivePanel::Books;
    let title = if app.mode == Mode::Search || !app.search_input.is_empty() {
        format!(" Search: {} ({}) ", app.search_input, app.output.rows.len())
    } else {
        format!(" Books ({}) ", app.output.rows.len())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if app.output.rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No books match the current filters",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    match app.output.view {
        ViewMode::List => render_book_list(frame, app, area, block, is_focused),
        ViewMode::Grid => render_book_grid(frame, app, area, block, is_focused),
    }
}

fn render_book_list(frame: &mut Frame, app: &App, area: Rect, block: Block, is_focused: bool) {
    let inner = block.inner(area);
    let visible_height = inner.height as usize;
    let scroll_offset = scroll_offset(app.selected_index, visible_height);

    let mut rows: Vec<ListItem> = Vec::new();
    for (i, book) in app
        .output
        .rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
    {
        let is_selected = i == app.selected_index && is_focused;
        let prefix = if is_selected { "▶ " } else { "  " };

        let title_style = if is_selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![Span::raw(prefix), Span::styled(&book.title, title_style)];
        if !book.author.is_empty() {
            spans.push(Span::styled(
                format!(" — {}", book.author),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::styled(
            format!("  [{}]", book.achievement_count()),
            Style::default().fg(Color::Blue),
        ));
        if book.is_duplicate {
            spans.push(Span::styled(
                "  dup",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }

        rows.push(ListItem::new(Line::from(spans)));
    }

    frame.render_widget(List::new(rows).block(block), area);
}

/// Cover-grid stand-in: fixed-width title cells, several per row.
fn render_book_grid(frame: &mut Frame, app: &App, area: Rect, block: Block, is_focused: bool) {
    let inner = block.inner(area);
    let columns = (inner.width as usize / 30).max(1);
    let visible_height = inner.height as usize;

    let selected_row = app.selected_index / columns;
    let row_offset = scroll_offset(selected_row, visible_height);

    let mut lines: Vec<Line> = Vec::new();
    for row in row_offset..(row_offset + visible_height) {
        let start = row * columns;
        if start >= app.output.rows.len() {
            break;
        }
        let mut spans: Vec<Span> = Vec::new();
        for (offset, book) in app.output.rows[start..]
            .iter()
            .take(columns)
            .enumerate()
        {
            let index = start + offset;
            let marker = if book.is_duplicate { "±" } else { " " };
            let cell = format!(" {marker}{:<26.26} ", book.title);
            let style = if index == app.selected_index && is_focused {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(cell, style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ─── Status bar ─────────────────────────────────────────────

fn render_statusbar(frame: &mut Frame, app: &App, area: Rect) {
    let zones = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(40)])
        .split(area);

    let season = app.session.artifact().season.label();
    let header = if season.is_empty() { "shelfscope" } else { season.as_str() };
    let sort = &app.session.sort;
    let left = Line::from(vec![
        Span::styled(
            format!(" {header} "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "· {} books · {} duplicates · sort {} {} · match {} · {} view ",
            app.output.rows.len(),
            app.output.duplicate_count,
            sort.field.label(),
            sort.direction.arrow(),
            app.session.filter.achievement_mode,
            app.session.view.label(),
        )),
    ]);
    frame.render_widget(Paragraph::new(left), zones[0]);

    // Fall back to the selected book's link so it stays visible somewhere.
    let message = if app.status_message.is_empty() {
        app.selected_book()
            .map(|b| b.link.clone())
            .unwrap_or_default()
    } else {
        app.status_message.clone()
    };
    let right = Line::from(Span::styled(message, Style::default().fg(Color::DarkGray)));
    frame.render_widget(
        Paragraph::new(right).alignment(Alignment::Right),
        zones[1],
    );
}

// ─── Helpers ────────────────────────────────────────────────

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn scroll_offset(selected: usize, visible_height: usize) -> usize {
    if visible_height == 0 {
        return selected;
    }
    if selected >= visible_height {
        selected - visible_height + 1
    } else {
        0
    }
}
