// src/render/menu.rs

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::centered;

const OPTIONS: [&str; 3] = ["ENDLESS RUN", "FIGHT MODE", "BONUS"];
const OPTION_ACCENTS: [Color; 3] = [Color::Yellow, Color::Red, Color::Magenta];

pub fn draw(frame: &mut Frame, cursor: usize) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(7),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "S T I C K M A N   S H O W D O W N",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    let mut lines = vec![Line::from("")];
    for (index, label) in OPTIONS.iter().enumerate() {
        let selected = index == cursor;
        let style = if selected {
            Style::default()
                .fg(OPTION_ACCENTS[index])
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if selected { "▸ " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{label}"),
            style,
        )));
        lines.push(Line::from(""));
    }
    let options = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(options, rows[1]);

    let footer = Paragraph::new(Line::from(Span::styled(
        "↑/↓ select · enter start · q quit",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, rows[2]);
}

pub fn draw_loading(frame: &mut Frame) {
    let area = centered(frame.area(), 20, 3);
    let loader = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "LOADING...",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(loader, area);
}
