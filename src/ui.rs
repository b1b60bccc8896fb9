use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{BarChart, Block, Borders, Paragraph},
};

use crate::metrics::format_duration;
use crate::simulation::ReportDocument;

/// UI state: the loaded report and which threshold is selected.
struct UiState {
    document: ReportDocument,
    selected: usize,
}

impl UiState {
    fn new(document: ReportDocument) -> Self {
        Self {
            document,
            selected: 0,
        }
    }

    fn next_threshold(&mut self) {
        self.selected = (self.selected + 1) % self.document.summaries.len();
    }

    fn previous_threshold(&mut self) {
        if self.selected == 0 {
            self.selected = self.document.summaries.len() - 1;
        } else {
            self.selected -= 1;
        }
    }
}

/// Run the report viewer over a saved JSON report.
pub fn run_ui(report_file: &str) -> io::Result<()> {
    if !Path::new(report_file).exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Report file not found: {}", report_file),
        ));
    }
    let document = ReportDocument::load_from_file(report_file)?;

    if document.summaries.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "No threshold summaries found in report",
        ));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut ui_state = UiState::new(document);

    // Main loop
    let res = run_app(&mut terminal, &mut ui_state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    ui_state: &mut UiState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw_ui(f, ui_state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Tab | KeyCode::Right => ui_state.next_threshold(),
                        KeyCode::BackTab | KeyCode::Left => ui_state.previous_threshold(),
                        _ => {}
                    }
                }
            }
        }
    }
}

fn draw_ui(f: &mut Frame, ui_state: &UiState) {
    let summary = &ui_state.document.summaries[ui_state.selected];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Main content
            Constraint::Length(1),  // Footer
        ])
        .split(f.area());

    // Header
    let header = Paragraph::new(format!(
        "Merchant Simulation Report - Threshold {} ({}/{}) - Seed {}",
        summary.threshold,
        ui_state.selected + 1,
        ui_state.document.summaries.len(),
        ui_state.document.seed,
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, chunks[0]);

    // Main content: statistics alongside the time histogram
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(20)])
        .split(chunks[1]);

    let stats_text = format!(
        "Avg time:        {} (σ {})\n\
         Fastest time:    {}\n\
         Restock cycles:  {:.2}\n\
         Trading cycles:  {:.2}\n\
         Purchase trips:  {:.2}\n\
         Trips per cycle: {:.2}\n\
         Trials:          {}",
        format_duration(summary.average_time),
        format_duration(summary.std_dev_time),
        format_duration(summary.fastest_time),
        summary.average_restock_cycles,
        summary.average_cycles,
        summary.average_trips,
        summary.average_trips_per_cycle,
        summary
            .bucket_counts
            .iter()
            .map(|bucket| u64::from(bucket.count))
            .sum::<u64>(),
    );
    let stats = Paragraph::new(stats_text)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title(" Summary "));
    f.render_widget(stats, main_chunks[0]);

    let bars: Vec<(&str, u64)> = summary
        .bucket_counts
        .iter()
        .map(|bucket| (bucket.label.as_str(), u64::from(bucket.count)))
        .collect();

    let histogram = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Completion time distribution "),
        )
        .data(&bars)
        .bar_width(11)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green));
    f.render_widget(histogram, main_chunks[1]);

    // Footer
    let footer = Paragraph::new("[Q] Quit  [Tab/→] Next threshold  [Shift-Tab/←] Previous threshold")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, chunks[2]);
}
