use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use portfolio::{Animator, Caret, DeadlineScheduler, LinkAttrs, Project, SiteContent};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop blocks waiting for input
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Projects,
    Background,
    Links,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Projects, Page::Background, Page::Links];

    pub fn next(&self) -> Self {
        match self {
            Page::Home => Page::Projects,
            Page::Projects => Page::Background,
            Page::Background => Page::Links,
            Page::Links => Page::Home,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Home => Page::Links,
            Page::Projects => Page::Home,
            Page::Background => Page::Projects,
            Page::Links => Page::Background,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Home => "Home",
            Page::Projects => "Projects",
            Page::Background => "Background",
            Page::Links => "Links",
        }
    }
}

pub struct App {
    pub content: SiteContent,
    pub animator: Animator<DeadlineScheduler>,
    pub caret: Caret,
    pub current_page: Page,
    pub projects_state: TableState,
    pub show_detail: bool,
    pub year: i32,
}

impl App {
    pub fn new(content: SiteContent, year: i32) -> Self {
        let mut projects_state = TableState::default();
        if !content.projects.is_empty() {
            projects_state.select(Some(0));
        }

        let mut animator = Animator::new(content.typewriter_config(), DeadlineScheduler::new());
        animator.start();

        Self {
            content,
            animator,
            caret: Caret::new(Instant::now()),
            current_page: Page::Home,
            projects_state,
            show_detail: false,
            year,
        }
    }

    /// Fire the typewriter timer if it is due. True if the text may have changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.animator.scheduler_mut().take_due(now) {
            Some(id) => self.animator.fire(id),
            None => false,
        }
    }

    /// How long input polling may block before something needs redrawing
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let timer = self.animator.scheduler().time_until(now).unwrap_or(IDLE_POLL);
        timer.min(self.caret.until_flip(now)).min(IDLE_POLL)
    }

    /// Apply a key press. False means quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Enter if self.current_page == Page::Projects => self.toggle_detail(),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => self.previous_page(),
            KeyCode::Tab => self.next_page(),
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.current_page = Page::ALL[index];
            }
            _ => {}
        }

        true
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects_state
            .selected()
            .and_then(|i| self.content.projects.get(i))
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next(&mut self) {
        let len = self.content.projects.len();
        if len == 0 {
            return;
        }
        let i = match self.projects_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.projects_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.content.projects.len();
        if len == 0 {
            return;
        }
        let i = match self.projects_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.projects_state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    finish_session(res)
}

/// Called once the terminal is back to normal, so the error prints cleanly
fn finish_session(res: io::Result<()>) -> Result<()> {
    res.context("Preview loop failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let now = Instant::now();
        if app.tick(now) {
            continue;
        }

        if event::poll(app.poll_timeout(now))? {
            if let Event::Key(key) = event::read()? {
                if !app.handle_key(key) {
                    return Ok(());
                }
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

    if app.show_detail && app.current_page == Page::Projects {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        render_projects(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Home => render_home(f, chunks[1], app),
            Page::Projects => render_projects(f, chunks[1], app),
            Page::Background => render_background(f, chunks[1], app),
            Page::Links => render_links(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        app.content.owner.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_home(f: &mut Frame, area: Rect, app: &App) {
    let hero = &app.content.hero;

    let caret_color = if app.animator.is_typing() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let caret = if app.caret.visible_at(Instant::now()) {
        "▌"
    } else {
        " "
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {} ", hero.greeting),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                app.animator.prefix().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
            Span::styled(caret, Style::default().fg(caret_color)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", hero.tagline),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if !app.content.about.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_title("ABOUT"));
        for paragraph in &app.content.about {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("  {}", paragraph)));
        }
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Home "),
        );

    f.render_widget(paragraph, area);
}

fn render_projects(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Title", "Tags", "Link", "Opens"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.content.projects.iter().map(|project| {
        let (opens, color) = opens_label(project);

        Row::new(vec![
            Cell::from(truncate(&project.title, 24)),
            Cell::from(truncate(&project.tags.join(", "), 30)),
            Cell::from(truncate(&project.href, 32)),
            Cell::from(opens).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Length(32),
            Constraint::Length(34),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Projects "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.projects_state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Project Details ");

    let project = match app.selected_project() {
        Some(p) => p,
        None => {
            f.render_widget(Paragraph::new("No project selected").block(block), area);
            return;
        }
    };

    let attrs = LinkAttrs::for_project(project);
    let mut content = vec![
        Line::from(""),
        field("Title", &project.title),
        Line::from(""),
    ];

    if let Some(date) = &project.date {
        content.push(field("Date", date));
        content.push(Line::from(""));
    }

    content.push(field("Link", &project.href));
    content.push(Line::from(""));
    let opens = match attrs.target {
        Some(target) => format!("{} ({})", target, attrs.rel.unwrap_or("")),
        None => "same tab".to_string(),
    };
    content.push(field("Opens", &opens));

    let slug = project.href.strip_prefix("/projects/").unwrap_or("");
    if let Some(embed) = app.content.embed(slug) {
        content.push(Line::from(""));
        content.push(field("Embeds", &embed.src));
    }

    content.push(Line::from(""));
    content.push(Line::from("  ─────────────────────────────────────"));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        format!("  {}", project.description),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));
    content.push(Line::from(""));

    let mut tags = vec![Span::raw("  ")];
    for tag in &project.tags {
        tags.push(Span::styled(
            format!("[{}]", tag),
            Style::default().fg(Color::Green),
        ));
        tags.push(Span::raw(" "));
    }
    content.push(Line::from(tags));

    let panel = Paragraph::new(content).wrap(Wrap { trim: false }).block(block);
    f.render_widget(panel, area);
}

fn render_background(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from("")];

    if !app.content.skills.is_empty() {
        lines.push(section_title("SKILLS"));
        for skill in &app.content.skills {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<4}", skill.icon.symbol()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:<16}", skill.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(skill.items.join(", ")),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !app.content.achievements.is_empty() {
        lines.push(section_title("ACHIEVEMENTS"));
        for achievement in &app.content.achievements {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}  ", achievement.year),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    achievement.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" · {}", achievement.event),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !app.content.education.is_empty() {
        lines.push(section_title("EDUCATION"));
        for entry in &app.content.education {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}  ", entry.period),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    entry.institution.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" · {}", entry.degree),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Background "),
    );

    f.render_widget(paragraph, area);
}

fn render_links(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from("")];

    for link in &app.content.social_links {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<4}", link.icon.symbol()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("{:<12}", link.label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(link.href.clone(), Style::default().fg(Color::Green)),
        ]));
    }

    if let Some(url) = &app.content.resume_url {
        lines.push(Line::from(""));
        lines.push(field("Resume", url));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  © {} {}", app.year, app.content.owner),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Links "),
    );

    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![Span::styled(
        format!(" {} ", app.animator.phase().as_str()),
        Style::default().fg(Color::Cyan),
    )];

    if app.current_page == Page::Projects {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Details | "));
        status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Nav"));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("1-4", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Jump | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn field(name: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {}: ", name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn opens_label(project: &Project) -> (&'static str, Color) {
    if LinkAttrs::for_project(project).target.is_some() {
        ("new tab", Color::Magenta)
    } else {
        ("same tab", Color::Green)
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_page_cycle() {
        let mut page = Page::Home;
        for _ in 0..Page::ALL.len() {
            page = page.next();
        }
        assert_eq!(page, Page::Home);
        assert_eq!(Page::Home.previous(), Page::Links);
    }

    #[test]
    fn test_keys() {
        let mut app = App::new(SiteContent::builtin(), 2026);

        assert!(app.handle_key(press(KeyCode::Tab)));
        assert_eq!(app.current_page, Page::Projects);

        app.handle_key(press(KeyCode::Enter));
        assert!(app.show_detail);

        app.handle_key(press(KeyCode::Char('4')));
        assert_eq!(app.current_page, Page::Links);

        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.current_page, Page::Background);

        assert!(!app.handle_key(press(KeyCode::Char('q'))));
    }

    #[test]
    fn test_selection_wraps() {
        let mut content = SiteContent::builtin();
        let mut second = content.projects[0].clone();
        second.title = "Second".to_string();
        content.projects.push(second);
        let mut app = App::new(content, 2026);

        app.next();
        assert_eq!(app.selected_project().unwrap().title, "Second");
        app.next();
        assert_eq!(app.selected_project().unwrap().title, "Chokepoint");
        app.previous();
        assert_eq!(app.selected_project().unwrap().title, "Second");
    }

    #[test]
    fn test_tick_advances_typewriter() {
        let mut app = App::new(SiteContent::builtin(), 2026);
        assert_eq!(app.animator.prefix(), "");

        assert!(app.tick(Instant::now() + Duration::from_secs(10)));
        assert_eq!(app.animator.prefix(), "H");
        assert!(app.poll_timeout(Instant::now()) <= IDLE_POLL);
    }

    #[test]
    fn test_draws_every_page() {
        let mut app = App::new(SiteContent::builtin(), 2026);

        assert!(screen(&mut app).contains("Hi, I'm"));

        app.current_page = Page::Projects;
        app.show_detail = true;
        let projects = screen(&mut app);
        assert!(projects.contains("Chokepoint"));
        assert!(projects.contains("same tab"));

        app.current_page = Page::Background;
        assert!(screen(&mut app).contains("Frontend"));

        app.current_page = Page::Links;
        assert!(screen(&mut app).contains("GitHub"));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }

    #[test]
    fn test_loop_error_is_returned() {
        assert!(finish_session(Ok(())).is_ok());

        let err = finish_session(Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")))
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Preview loop failed"));
        assert!(message.contains("pipe closed"));
    }
}
