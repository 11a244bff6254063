//! Question order and game mode pickers.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::models::QuestionOrder;
use crate::quiz::GameMode;

use super::TITLE;

pub fn render_order(frame: &mut Frame, area: Rect, number: u32, selected: usize) {
    let labels: Vec<&str> = QuestionOrder::ALL.iter().map(|order| order.label()).collect();
    render_picker(
        frame,
        area,
        &format!("The {} times table", number),
        "How should the questions come?",
        &labels,
        selected,
    );
}

pub fn render_game_mode(
    frame: &mut Frame,
    area: Rect,
    number: u32,
    order: QuestionOrder,
    selected: usize,
) {
    let labels: Vec<&str> = GameMode::ALL.iter().map(|mode| mode.label()).collect();
    render_picker(
        frame,
        area,
        &format!("The {} times table · {}", number, order.label().to_lowercase()),
        "How do you want to answer?",
        &labels,
        selected,
    );
}

fn render_picker(
    frame: &mut Frame,
    area: Rect,
    subtitle: &str,
    prompt: &str,
    options: &[&str],
    selected: usize,
) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(options.len() as u16 + 2),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .split(area);

    let header = vec![
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(subtitle.fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(prompt, Style::default().fg(Color::White).bold())),
    ];
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), chunks[1]);

    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let is_selected = index == selected;
            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if is_selected { ">" } else { " " };

            Line::from(vec![
                Span::styled(format!("{} {}. ", marker, index + 1), style),
                Span::styled(*label, style),
            ])
        })
        .collect();

    let options_area = centered(chunks[2], 36);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, options_area);

    let controls = Paragraph::new("j/k choose  ·  enter confirm  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[3]);
}

fn centered(area: Rect, width: u16) -> Rect {
    let [_, middle, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);
    middle
}
