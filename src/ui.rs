use anyhow::Result;
use companies_house_viewer::{format_date_str, CompanyOverview, CompanyRecord, Event, OfficerRecord};
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const PAGE_STEP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Timeline,
    Officers,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Timeline => Page::Officers,
            Page::Officers => Page::Timeline,
        }
    }

    pub fn previous(&self) -> Self {
        // Two pages: previous and next coincide
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Timeline => "Timeline",
            Page::Officers => "Officers",
        }
    }
}

pub struct App {
    pub company: CompanyRecord,
    pub timeline: Vec<Event>,
    pub officers: Vec<OfficerRecord>,
    pub timeline_state: TableState,
    pub officers_state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
}

impl App {
    pub fn new(overview: CompanyOverview) -> Self {
        let mut timeline_state = TableState::default();
        if !overview.timeline.is_empty() {
            timeline_state.select(Some(0));
        }

        let mut officers_state = TableState::default();
        if !overview.officers.is_empty() {
            officers_state.select(Some(0));
        }

        Self {
            company: overview.company,
            timeline: overview.timeline,
            officers: overview.officers,
            timeline_state,
            officers_state,
            current_page: Page::Timeline,
            show_detail: false,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    fn active(&mut self) -> (usize, &mut TableState) {
        match self.current_page {
            Page::Timeline => (self.timeline.len(), &mut self.timeline_state),
            Page::Officers => (self.officers.len(), &mut self.officers_state),
        }
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.timeline_state.selected().and_then(|i| self.timeline.get(i))
    }

    pub fn selected_officer(&self) -> Option<&OfficerRecord> {
        self.officers_state.selected().and_then(|i| self.officers.get(i))
    }

    pub fn next(&mut self) {
        let (len, state) = self.active();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let (len, state) = self.active();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let (len, state) = self.active();
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| (i + PAGE_STEP).min(len - 1));
        state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let (len, state) = self.active();
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| i.saturating_sub(PAGE_STEP));
        state.select(Some(i));
    }

    pub fn first(&mut self) {
        let (len, state) = self.active();
        if len > 0 {
            state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        let (len, state) = self.active();
        if len > 0 {
            state.select(Some(len - 1));
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let TermEvent::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => app.next_page(),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_content(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_content(f, chunks[1], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_content(f: &mut Frame, area: Rect, app: &mut App) {
    match app.current_page {
        Page::Timeline => render_timeline(f, area, app),
        Page::Officers => render_officers(f, area, app),
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        app.company.display_name().to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];

    if let Some(status) = &app.company.company_status {
        spans.push(Span::raw("  "));
        let color = if status == "active" { Color::Green } else { Color::Red };
        spans.push(Span::styled(status.clone(), Style::default().fg(color)));
    }

    spans.push(Span::raw("  |  "));
    for (i, page) in [Page::Timeline, Page::Officers].iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(page.title().to_string(), style));
    }

    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("{} events, {} officers", app.timeline.len(), app.officers.len()),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn display_date(date: Option<&str>) -> String {
    match date {
        Some(date) => format_date_str(date),
        None => "Date unknown".to_string(),
    }
}

fn render_timeline(f: &mut Frame, area: Rect, app: &mut App) {
    let rows = app.timeline.iter().map(|event| {
        let color = if event.description.starts_with("Resigned") {
            Color::Red
        } else if event.description.starts_with("Appointed") {
            Color::Green
        } else {
            Color::Cyan
        };

        Row::new(vec![
            Cell::from(display_date(event.date.as_deref())),
            Cell::from(event.description.clone()).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(20)])
        .header(header_row(&["Date", "Event"]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Timeline "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.timeline_state);
}

fn render_officers(f: &mut Frame, area: Rect, app: &mut App) {
    let rows = app.officers.iter().map(|officer| {
        let color = if officer.resigned_on.is_some() { Color::DarkGray } else { Color::White };

        Row::new(vec![
            Cell::from(truncate(officer.display_name(), 34)).style(Style::default().fg(color)),
            Cell::from(officer.officer_role.clone().unwrap_or_default()),
            Cell::from(officer.appointed_on.as_deref().map(format_date_str).unwrap_or_default()),
            Cell::from(officer.resigned_on.as_deref().map(format_date_str).unwrap_or_default()),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(36),
            Constraint::Length(22),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(header_row(&["Name", "Role", "Appointed", "Resigned"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Officers "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.officers_state);
}

fn detail_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::Yellow)),
        Span::raw(value),
    ])
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let lines = match app.current_page {
        Page::Timeline => match app.selected_event() {
            Some(event) => vec![
                detail_line("Date", display_date(event.date.as_deref())),
                detail_line("Raw date", event.date.clone().unwrap_or_default()),
                Line::from(""),
                Line::from(event.description.clone()),
            ],
            None => vec![Line::from("No event selected")],
        },
        Page::Officers => match app.selected_officer() {
            Some(officer) => {
                let born = officer
                    .date_of_birth
                    .and_then(|dob| dob.year.zip(dob.month))
                    .and_then(|(year, month)| companies_house_viewer::format_month_year(year, month))
                    .unwrap_or_else(|| "Unknown".to_string());
                vec![
                    detail_line("Name", officer.display_name().to_string()),
                    detail_line("Role", officer.officer_role.clone().unwrap_or_default()),
                    detail_line("Appointed", officer.appointed_on.as_deref().map(format_date_str).unwrap_or_default()),
                    detail_line("Resigned", officer.resigned_on.as_deref().map(format_date_str).unwrap_or_default()),
                    detail_line("Born", born),
                    detail_line("Address", officer.address_snippet.clone().unwrap_or_default()),
                ]
            }
            None => vec![Line::from("No officer selected")],
        },
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Details "),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (selected, total) = match app.current_page {
        Page::Timeline => (app.timeline_state.selected(), app.timeline.len()),
        Page::Officers => (app.officers_state.selected(), app.officers.len()),
    };

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected.map(|i| i + 1).unwrap_or(0), total),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Details | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Page | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)),
        Span::raw(" Fast | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(events: usize, officers: usize) -> App {
        App::new(CompanyOverview {
            company: CompanyRecord::default(),
            timeline: (0..events)
                .map(|i| Event::new(Some(format!("2000-01-{:02}", i + 1)), format!("event {}", i)))
                .collect(),
            officers: (0..officers)
                .map(|i| OfficerRecord {
                    name: Some(format!("officer {}", i)),
                    ..Default::default()
                })
                .collect(),
        })
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app(3, 0);

        app.previous();
        assert_eq!(app.timeline_state.selected(), Some(2));
        app.next();
        assert_eq!(app.timeline_state.selected(), Some(0));
    }

    #[test]
    fn test_paging_clamps() {
        let mut app = app(25, 0);

        app.page_down();
        assert_eq!(app.timeline_state.selected(), Some(20));
        app.page_down();
        assert_eq!(app.timeline_state.selected(), Some(24));
        app.page_up();
        assert_eq!(app.timeline_state.selected(), Some(4));
        app.page_up();
        assert_eq!(app.timeline_state.selected(), Some(0));
    }

    #[test]
    fn test_pages_keep_separate_selection() {
        let mut app = app(5, 2);

        app.last();
        app.next_page();
        assert_eq!(app.current_page, Page::Officers);
        app.next();
        assert_eq!(app.selected_officer().and_then(|o| o.name.as_deref()), Some("officer 1"));
        assert_eq!(app.selected_event().map(|e| e.description.as_str()), Some("event 4"));
    }

    #[test]
    fn test_empty_lists_are_safe() {
        let mut app = app(0, 0);
        app.next();
        app.page_down();
        app.last();
        assert_eq!(app.timeline_state.selected(), None);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ÅÅÅÅÅÅÅÅÅÅ", 6), "ÅÅÅ...");
    }
}
