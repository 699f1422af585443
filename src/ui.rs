pub mod charting;

use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph, Widget, Wrap},
};
use std::time::SystemTime;
use time_humanize::HumanTime;

use crate::{report, util, App, Screen};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Timer => render_timer(self, area, buf),
            Screen::Sessions => render_sessions(self, area, buf),
            Screen::Graph => render_graph(self, area, buf),
            Screen::ConfirmReset => render_confirm(area, buf),
        }
    }
}

fn render_timer(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let elapsed_style = if app.tracker.is_running() {
        Style::default().patch(bold_style).fg(Color::Green)
    } else {
        Style::default().patch(bold_style).add_modifier(Modifier::DIM)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Percentage(25),
                Constraint::Length(1), // elapsed
                Constraint::Length(1),
                Constraint::Length(1), // total hours
                Constraint::Length(1), // vault
                Constraint::Length(1), // today's coins
                Constraint::Length(1),
                Constraint::Length(1), // status line
                Constraint::Min(0),
                Constraint::Length(1), // key help
            ]
            .as_ref(),
        )
        .split(area);

    let elapsed = util::format_hms(app.tracker.elapsed().as_secs());
    Paragraph::new(Span::styled(elapsed, elapsed_style))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(format!(
        "Total Hours: {}",
        util::format_hours(app.ledger.total_hours)
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(format!("Vault: {} coins", app.ledger.vault))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    Paragraph::new(format!("Today's Coins: {}", app.ledger.daily_coins_earned))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    if let Some(status) = &app.status {
        Paragraph::new(Span::styled(
            status.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[7], buf);
    }

    Paragraph::new(Span::styled(
        "(space) start/stop   (r)eset day   (v) sessions   (g)raph   (q)uit",
        dim_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[9], buf);
}

fn render_sessions(app: &App, area: Rect, buf: &mut Buffer) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let empty_style = Style::default()
        .add_modifier(Modifier::DIM | Modifier::ITALIC);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Daily Coin Earnings History (Last 7 Days)",
            title_style,
        )),
        Line::from(Span::styled("-".repeat(40), dim_style)),
    ];

    let history = report::recent_daily_history(&app.ledger, report::HISTORY_DAYS);
    if history.is_empty() {
        lines.push(Line::from(Span::styled("no coins earned yet", empty_style)));
    }
    for (date, coins) in history {
        lines.push(Line::from(format!("{date}: {coins} coins")));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Recent Sessions (Last 10)",
        title_style,
    )));
    lines.push(Line::from(Span::styled("-".repeat(40), dim_style)));

    let recent = report::recent_sessions(&app.ledger, report::RECENT_SESSIONS);
    if recent.is_empty() {
        lines.push(Line::from(Span::styled(
            "no sessions recorded yet",
            empty_style,
        )));
    }
    let now = util::epoch_secs(SystemTime::now());
    for session in recent {
        let start = util::epoch_to_local(session.start_time).format("%Y-%m-%d %H:%M:%S");
        let end = util::epoch_to_local(session.end_time).format("%Y-%m-%d %H:%M:%S");
        let age_secs = (now - session.end_time).max(0.0) as i64;
        // Negative seconds render in the past tense ("a minute ago")
        let age = HumanTime::from(-age_secs).to_string();
        lines.push(Line::from(format!(
            "Start: {start}, End: {end}, Hours: {:.2} ({age})",
            session.hours
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("(b)ack   (q)uit", dim_style)));

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Work Sessions"),
        )
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

fn render_graph(app: &App, area: Rect, buf: &mut Buffer) {
    let today = Local::now().date_naive();
    let days = report::daily_hours_last_n_days(&app.ledger, today, report::CHART_DAYS);
    let bars = charting::daily_hour_bars(&days);
    let data: Vec<(&str, u64)> = bars.iter().map(|(label, v)| (label.as_str(), *v)).collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(area);

    BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Daily Hours Worked (Last 7 Days)"),
        )
        .data(&data)
        .bar_width(7)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .render(chunks[0], buf);

    let total: f64 = days.iter().map(|(_, hours)| hours).sum();
    Paragraph::new(Span::styled(
        format!(
            "bar values are minutes worked; {} h total this week   (b)ack   (q)uit",
            charting::format_hours_label(total)
        ),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);
}

fn render_confirm(area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Percentage(40),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    Paragraph::new(Span::styled(
        "Reset daily hours to 0?",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new("Removes today's sessions and zeroes today's counters. Vault and coin history are kept.")
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(y)es   (n)o",
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);
}
