use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{HomeState, HomeStatus, HOME_COLUMNS};
use crate::models::MAX_MULTIPLIER;

use super::TITLE;

pub fn render(frame: &mut Frame, area: Rect, home: &HomeState) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(7),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    render_header(frame, chunks[1]);
    render_grid(frame, chunks[2], home);
    render_status(frame, chunks[3], home);
    render_controls(frame, chunks[4], home);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from("Pick a number to practise".fg(Color::DarkGray)),
    ];

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_grid(frame: &mut Frame, area: Rect, home: &HomeState) {
    let loading = match home.status {
        HomeStatus::Loading { number } => Some(number),
        _ => None,
    };

    let mut lines = vec![Line::from("")];
    let numbers: Vec<u32> = (1..=MAX_MULTIPLIER).collect();

    for row in numbers.chunks(HOME_COLUMNS as usize) {
        let spans: Vec<Span> = row
            .iter()
            .map(|&number| {
                let style = match loading {
                    Some(chosen) if chosen == number => {
                        Style::default().fg(Color::Black).bg(Color::Yellow).bold()
                    }
                    Some(_) => Style::default().fg(Color::DarkGray),
                    None if number == home.cursor => {
                        Style::default().fg(Color::Black).bg(Color::Cyan).bold()
                    }
                    None => Style::default().fg(Color::White),
                };
                Span::styled(format!("  {:>2}  ", number), style)
            })
            .collect();

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, home: &HomeState) {
    let mut content = vec![Line::from("")];

    match &home.status {
        HomeStatus::Loading { number } => {
            content.push(Line::from(Span::styled(
                format!("Fetching animal friends for the {} times table...", number),
                Style::default().fg(Color::Yellow),
            )));
        }
        HomeStatus::Failed { number, message } => {
            content.push(Line::from(Span::styled(
                format!("Could not start the {} times table: {}", number, message),
                Style::default().fg(Color::Red).bold(),
            )));
            content.push(Line::from("Press ENTER to try again".fg(Color::DarkGray)));
        }
        HomeStatus::Idle => {
            if let Some(summary) = &home.last_summary {
                content.push(Line::from(Span::styled(
                    format!("Well done! You finished the {} times table", summary.number),
                    Style::default().fg(Color::Green).bold(),
                )));
                let guesses = match summary.wrong_attempts {
                    0 => "without a single wrong guess".to_string(),
                    1 => "with 1 wrong guess".to_string(),
                    n => format!("with {} wrong guesses", n),
                };
                content.push(Line::from(guesses.fg(Color::DarkGray)));
            }
        }
    }

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_controls(frame: &mut Frame, area: Rect, home: &HomeState) {
    let text = if matches!(home.status, HomeStatus::Loading { .. }) {
        "q quit"
    } else {
        "arrows/hjkl move  ·  enter start  ·  q quit"
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
