use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use best_xi_terminal::card::{PlayerCard, RiskClass};
use best_xi_terminal::lineup::Position;
use best_xi_terminal::provider::{HttpSource, spawn_provider};
use best_xi_terminal::roster::PICKER_PROMPT;
use best_xi_terminal::state::{self, AppState, Delta, Focus, ProviderCommand, apply_delta};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        // An open alert swallows every key until it is dismissed.
        if self.state.active_alert().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.dismiss_alert();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Tab => self.state.cycle_focus(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Enter => match self.state.focus {
                Focus::Matches => {
                    self.state.select_match_at_cursor();
                }
                Focus::Players => {
                    self.state.picker.toggle_at_cursor();
                }
            },
            KeyCode::Char(' ') => {
                if self.state.focus == Focus::Players {
                    self.state.picker.toggle_at_cursor();
                }
            }
            KeyCode::Char('r') => self.state.cycle_risk(),
            KeyCode::Char('t') => self.state.cycle_team_pref(),
            KeyCode::Char('x') | KeyCode::Char('s') => self.request_best_xi(),
            KeyCode::Char('J') | KeyCode::PageDown => self.state.scroll_results_down(),
            KeyCode::Char('K') | KeyCode::PageUp => self.state.scroll_results_up(),
            _ => {}
        }
    }

    fn request_matches(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            return;
        };
        if tx.send(ProviderCommand::FetchMatches).is_err() {
            self.state.push_log("[WARN] Match list request failed");
        } else {
            self.state.push_log("[INFO] Match list request sent");
        }
    }

    fn request_best_xi(&mut self) {
        let Some(cmd) = self.state.submit_best_xi() else {
            return;
        };
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[WARN] Best XI fetch unavailable");
            self.state.alert("Error: backend client unavailable");
            return;
        };
        let ProviderCommand::FetchBestXi { match_index, .. } = &cmd else {
            return;
        };
        let match_index = *match_index;
        if tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Best XI request failed");
            self.state.alert("Error: request worker stopped");
        } else {
            self.state.pending_best_xi += 1;
            self.state
                .push_log(format!("[INFO] Best XI request sent for match {match_index}"));
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let (tx, rx) = mpsc::channel();
    let mut app = match HttpSource::from_env() {
        Ok(source) => {
            let base_url = source.base_url().to_string();
            let (cmd_tx, cmd_rx) = mpsc::channel();
            spawn_provider(source, tx, cmd_rx);
            let mut app = App::new(Some(cmd_tx));
            app.state.push_log(format!("[INFO] Backend: {base_url}"));
            app
        }
        Err(err) => {
            let mut app = App::new(None);
            apply_delta(&mut app.state, Delta::MatchesFailed(format!("{err:#}")));
            app
        }
    };
    app.request_matches();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(14), Constraint::Min(1)])
        .split(columns[1]);

    render_match_grid(frame, columns[0], &app.state);
    render_preferences(frame, right[0], &app.state);
    render_team_display(frame, right[1], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
    if let Some(alert) = app.state.active_alert() {
        render_alert(frame, frame.size(), alert);
    }
}

fn header_text(state: &AppState) -> String {
    let selected = state.selected_match_label().unwrap_or("no match selected");
    let line1 = format!("   |   BEST XI | {selected}");
    let line2 = format!(
        "  _|_  Risk: {} | Preference: {}",
        state.risk.label(),
        state.team_pref.label()
    );
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    let keys = match state.focus {
        Focus::Matches => "Tab Players | j/k/↑/↓ Move | Enter Select match",
        Focus::Players => "Tab Matches | j/k/↑/↓ Move | Space/Enter Toggle player",
    };
    let mut text = format!("{keys} | r Risk | t Preference | x Show Best XI | J/K Scroll | ? Help | q Quit");
    if state.pending_best_xi > 0 {
        text.push_str(" | Requesting Best XI...");
    }
    text
}

fn focus_title(title: &str, focused: bool) -> String {
    if focused {
        format!("{title} *")
    } else {
        title.to_string()
    }
}

fn render_match_grid(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Matches;
    let block = Block::default()
        .title(focus_title("Matches", focused))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let rows = state.match_rows();
    let (start, end) = visible_range(state.match_cursor, rows.len(), inner.height as usize);
    let mut lines = Vec::with_capacity(end - start);
    for row in &rows[start..end] {
        let Some(index) = row.index else {
            let style = match state.match_status {
                state::MatchListStatus::Failed(_) => Style::default().fg(Color::Red),
                _ => Style::default().fg(Color::DarkGray),
            };
            lines.push(Line::from(Span::styled(row.text.clone(), style)));
            continue;
        };
        let at_cursor = focused && index == state.match_cursor;
        let prefix = if at_cursor { "> " } else { "  " };
        let style = if row.selected {
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("{prefix}{}", row.text), style)));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_preferences(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Players;
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    if let Some(teams) = &state.selected_teams {
        lines.push(Line::from(format!("Teams: {} vs {}", teams.home, teams.away)));
    }
    lines.push(Line::from(Span::styled(
        "Must include",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if state.picker.enabled {
        lines.push(Line::from(Span::styled(format!("  {PICKER_PROMPT}"), dim)));
        for (idx, option) in state.picker.options.iter().enumerate() {
            let cursor = if focused && idx == state.picker.cursor { ">" } else { " " };
            let mark = if option.selected { "[x]" } else { "[ ]" };
            lines.push(Line::from(format!("{cursor} {mark} {}", option.name)));
        }
    } else {
        lines.push(Line::from(Span::styled("  (select a match first)", dim)));
    }
    lines.push(Line::from(format!("Risk rating (r): {}", state.risk.label())));
    lines.push(Line::from(format!(
        "Team preference (t): {}",
        state.team_pref.label()
    )));

    let prefs = Paragraph::new(lines).block(
        Block::default()
            .title(focus_title("Preferences", focused))
            .borders(Borders::ALL),
    );
    frame.render_widget(prefs, area);
}

fn render_team_display(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = match &state.lineup_match {
        Some(label) if state.results_visible => format!("Best XI - {label}"),
        _ => "Best XI".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if !state.results_visible {
        let hint = Paragraph::new("Select a match and press x to show the Best XI")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(inner);

    for (col, position) in cols.iter().zip(Position::ALL) {
        let cards = state.lineup.group(position);
        let lines = cards.iter().flat_map(card_lines).collect::<Vec<_>>();
        let group = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((state.results_scroll, 0))
            .block(
                Block::default()
                    .title(format!("{} ({})", position.group_title(), cards.len()))
                    .borders(Borders::ALL),
            );
        frame.render_widget(group, *col);
    }
}

fn card_lines(card: &PlayerCard) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            card.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(card.team.clone()),
        Line::from(card.position.clone()),
        Line::from(Span::styled(
            card.risk.clone(),
            Style::default().fg(risk_color(card.risk_class)),
        )),
        Line::from(card.consistency.clone()),
        Line::from(card.upside.clone()),
        Line::from(card.total_fp.clone()),
        Line::from(""),
    ]
}

fn risk_color(class: RiskClass) -> Color {
    match class {
        RiskClass::High => Color::Red,
        RiskClass::Medium => Color::Yellow,
        RiskClass::Low => Color::Green,
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_alert(frame: &mut Frame, area: Rect, alert: &str) {
    let popup_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, popup_area);

    let text = format!("{alert}\n\nEnter / Esc to dismiss");
    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title("Alert").borders(Borders::ALL));
    frame.render_widget(popup, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Best XI Terminal - Help",
        "",
        "Global:",
        "  Tab          Switch Matches / Players",
        "  r            Cycle risk rating",
        "  t            Cycle team preference",
        "  x / s        Show Best XI",
        "  J/K PgDn/PgUp Scroll Best XI",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Matches:",
        "  j/k or ↑/↓   Move",
        "  Enter        Select match",
        "",
        "Players:",
        "  j/k or ↑/↓   Move",
        "  Space/Enter  Toggle must-include",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
