mod export;
mod help;
mod state;

use crate::cli::{build_config, Cli};
use crate::engine::{AnalysisClient, AnalyzeError};
use crate::model::AnalysisResult;
use crate::orchestrator::{self, AppEvent, UiCommand};
use crate::session::Phase;
use crate::text_summary::{build_sections, terminal_safe, Section};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Terminal,
};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use export::{copy_exported_path, export_and_show_path};
use help::draw_help;
use state::{push_wrapped_status_kv, UiState};

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    None,
    Submit(String),
    Quit,
}

pub async fn run(args: Cli) -> Result<()> {
    let client = AnalysisClient::new(&build_config(&args))?;
    log::info!("using analysis service at {}", client.analyze_url());

    // Unbounded channels avoid backpressure between the UI thread and the controller.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_args = args.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_args, event_rx, cmd_tx));

    let res = orchestrator::run_controller(client, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    args: Cli,
    mut event_rx: UnboundedReceiver<AppEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut state = UiState::default();
    if let Some(url) = args.url.as_deref() {
        state.input = url.to_string();
        if let Some(url) = submit_input(&mut state) {
            let _ = cmd_tx.send(UiCommand::Submit(url));
        }
    }

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            apply_event(&args, &mut state, ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key(&mut state, k) {
                    KeyAction::None => {}
                    KeyAction::Submit(url) => {
                        let _ = cmd_tx.send(UiCommand::Submit(url));
                    }
                    KeyAction::Quit => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Start a submission from the input field. Returns the URL to send, if any.
fn submit_input(state: &mut UiState) -> Option<String> {
    let url = state.session.begin_submit(&state.input)?;
    state.results_scroll = 0;
    state.info = format!("Analyzing {}…", terminal_safe(&url));
    Some(url)
}

fn handle_key(state: &mut UiState, k: KeyEvent) -> KeyAction {
    match (k.modifiers, k.code) {
        (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => KeyAction::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            export_and_show_path(state);
            KeyAction::None
        }
        (KeyModifiers::CONTROL, KeyCode::Char('y')) => {
            copy_exported_path(state);
            KeyAction::None
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            state.clear_input();
            KeyAction::None
        }
        (_, KeyCode::Enter) => {
            if state.tab != 0 {
                return KeyAction::None;
            }
            match submit_input(state) {
                Some(url) => KeyAction::Submit(url),
                None => KeyAction::None,
            }
        }
        (_, KeyCode::Tab) => {
            state.tab = (state.tab + 1) % 2;
            KeyAction::None
        }
        (_, KeyCode::Up) => {
            state.scroll_results(-1);
            KeyAction::None
        }
        (_, KeyCode::Down) => {
            state.scroll_results(1);
            KeyAction::None
        }
        (_, KeyCode::PageUp) => {
            state.scroll_results(-10);
            KeyAction::None
        }
        (_, KeyCode::PageDown) => {
            state.scroll_results(10);
            KeyAction::None
        }
        (_, KeyCode::Backspace) => {
            state.pop_input();
            KeyAction::None
        }
        (KeyModifiers::NONE, KeyCode::Char(c)) | (KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            if state.tab == 0 {
                state.push_input(c);
            }
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn apply_event(args: &Cli, state: &mut UiState, ev: AppEvent) {
    match ev {
        AppEvent::Info(msg) => state.info = msg,
        AppEvent::AnalysisFinished(outcome) => handle_analysis_finished(args, state, *outcome),
    }
}

fn handle_analysis_finished(
    args: &Cli,
    state: &mut UiState,
    outcome: Result<AnalysisResult, AnalyzeError>,
) {
    let succeeded = outcome.is_ok();
    state.session.complete(outcome);
    if !succeeded {
        state.info = "Analysis failed".into();
        return;
    }

    state.info = "Analysis complete (Ctrl-E to export CSV)".into();
    let processed = orchestrator::process_analysis_completion(args, &state.session);
    if !processed.export_messages.is_empty() {
        state.info = processed.export_messages.join("; ");
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Analyze"), Line::from("Help")])
        .select(state.tab)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("company-analyzer-cli"),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_analyze(chunks[1], f, state),
        _ => draw_help(chunks[1], f),
    }
}

fn draw_analyze(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let mut status_lines = Vec::new();
    push_wrapped_status_kv(&mut status_lines, "Status", &state.info, area.width);
    let status_height = (status_lines.len() as u16).clamp(1, 3) + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(status_height),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let view = state.session.view();
    let (input_text, input_style, input_title) = if !state.session.is_loading() {
        (
            format!("{}▏", state.input),
            Style::default(),
            "Company URL (Enter to analyze)",
        )
    } else {
        (
            state.input.clone(),
            Style::default().fg(Color::DarkGray),
            "Company URL (analysis in progress)",
        )
    };
    let input = Paragraph::new(Line::from(Span::styled(input_text, input_style)))
        .block(Block::default().borders(Borders::ALL).title(input_title));
    f.render_widget(input, chunks[0]);

    let status_title = if view.export_visible {
        "Status (Ctrl-E: export CSV)"
    } else {
        "Status"
    };
    let status = Paragraph::new(status_lines)
        .block(Block::default().borders(Borders::ALL).title(status_title));
    f.render_widget(status, chunks[1]);

    match &view.phase {
        Phase::Loading { url } if view.loading_visible => {
            let p = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Loading…",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Waiting for analysis of {}", terminal_safe(url))),
            ])
            .block(Block::default().borders(Borders::ALL).title("Results"));
            f.render_widget(p, chunks[2]);
        }
        Phase::Failed(msg) => {
            let p = Paragraph::new(Line::from(Span::styled(
                format!("Error: {}", terminal_safe(msg)),
                Style::default().fg(Color::Red),
            )))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Results"));
            f.render_widget(p, chunks[2]);
        }
        _ => match state.session.displayed() {
            Some(result) => draw_results(chunks[2], f, state, result),
            None => {
                let p = Paragraph::new("No analysis yet.")
                    .block(Block::default().borders(Borders::ALL).title("Results"));
                f.render_widget(p, chunks[2]);
            }
        },
    }
}

fn draw_results(area: Rect, f: &mut ratatui::Frame, state: &UiState, result: &AnalysisResult) {
    let sections = build_sections(result);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    // First four sections are the detail regions, the rest are SWOT categories.
    let (details, swot) = sections.split_at(4.min(sections.len()));
    for (row, group) in [(rows[0], details), (rows[1], swot)] {
        if group.is_empty() {
            continue;
        }
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, group.len() as u32); group.len()])
            .split(row);
        for (col, section) in cols.iter().zip(group) {
            draw_section(*col, f, section, state.results_scroll);
        }
    }
}

fn draw_section(area: Rect, f: &mut ratatui::Frame, section: &Section, scroll: u16) {
    let lines: Vec<Line> = if section.items.is_empty() {
        vec![Line::from(Span::styled(
            "(none)",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        section
            .items
            .iter()
            .map(|item| Line::from(format!("• {item}")))
            .collect()
    };
    let title = format!("{} ({})", section.title, section.items.len());
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, area);
}
