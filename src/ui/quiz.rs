use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::MediaItem;
use crate::quiz::{AnswerInput, AnswerStatus, QuizSession};

pub fn render(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], session);
    render_question(frame, chunks[1], session);
    render_answer(frame, chunks[2], session);
    if let Some(media) = session.revealed_media() {
        render_reward(frame, chunks[3], media, session.is_last_question());
    }
    render_controls(frame, chunks[4], session);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let progress = format!(
        "{}/{}",
        session.current_index() + 1,
        session.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let question = session.current_question();
    let result = match session.status() {
        AnswerStatus::Awaiting => Span::styled("?", Style::default().fg(Color::White).bold()),
        AnswerStatus::Wrong => Span::styled("X", Style::default().fg(Color::Red).bold()),
        AnswerStatus::Correct => Span::styled(
            question.product.to_string(),
            Style::default().fg(Color::Green).bold(),
        ),
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} ", question.display()),
                Style::default().fg(Color::White).bold(),
            ),
            result,
        ]),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_answer(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let status = session.status();
    let mut lines = vec![Line::from("")];

    match session.input() {
        AnswerInput::MultipleChoice { choices, selected } if status != AnswerStatus::Correct => {
            let mut spans = Vec::with_capacity(choices.len() * 2);
            for (index, choice) in choices.iter().enumerate() {
                let style = if index == *selected {
                    Style::default().fg(Color::Black).bg(Color::Cyan).bold()
                } else {
                    Style::default().fg(Color::Gray)
                };
                spans.push(Span::styled(format!("  {}  ", choice), style));
                spans.push(Span::raw("   "));
            }
            spans.pop();
            lines.push(Line::from(spans));
        }
        AnswerInput::Typed { buffer } if status != AnswerStatus::Correct => {
            lines.push(Line::from(vec![
                Span::styled("Your answer: ", Style::default().fg(Color::White)),
                Span::styled(buffer.as_str(), Style::default().fg(Color::Yellow).bold()),
                Span::styled("_", Style::default().fg(Color::Yellow)),
            ]));
        }
        _ => {}
    }

    lines.push(Line::from(""));
    match status {
        AnswerStatus::Wrong => lines.push(Line::from(Span::styled(
            "Not quite, try again!",
            Style::default().fg(Color::Red),
        ))),
        AnswerStatus::Correct => lines.push(Line::from(Span::styled(
            "Correct!",
            Style::default().fg(Color::Green).bold(),
        ))),
        AnswerStatus::Awaiting => {}
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_reward(frame: &mut Frame, area: Rect, media: &MediaItem, last: bool) {
    let next = if last {
        "ENTER to finish"
    } else {
        "ENTER for the next question"
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            media.label.as_str(),
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("Your {}: ", media.kind.label()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                media.locator.as_str(),
                Style::default().fg(Color::Cyan).underlined(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(next, Style::default().fg(Color::Yellow))),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(" Reward ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let text = match (session.status(), session.input()) {
        (AnswerStatus::Correct, _) => "enter next  ·  q quit",
        (_, AnswerInput::MultipleChoice { .. }) => {
            "h/l or arrows choose  ·  1-3 pick  ·  enter answer  ·  q quit"
        }
        (_, AnswerInput::Typed { .. }) => "type your answer  ·  enter check  ·  esc quit",
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
