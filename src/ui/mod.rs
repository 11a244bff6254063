mod home;
mod quiz;
mod setup;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};

pub const TITLE: &str = "MULTIPLY PETS";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.screen {
        Screen::Home(home) => home::render(frame, area, home),
        Screen::OrderSelect {
            number, selected, ..
        } => setup::render_order(frame, area, *number, *selected),
        Screen::GameModeSelect {
            number,
            order,
            selected,
            ..
        } => setup::render_game_mode(frame, area, *number, *order, *selected),
        Screen::Quiz(session) => quiz::render(frame, area, session),
    }
}
