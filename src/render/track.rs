// src/render/track.rs
//
// The endless-run screen: a canvas over the same virtual coordinate space
// the collision model uses, so what the player sees is what gets judged.

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as RoadLine, Rectangle};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use scene::SceneSnapshot;

use super::centered;
use crate::app::{App, GROUND_Y, VIEW_H, VIEW_W};

pub fn draw(frame: &mut Frame, app: &App, snapshot: &SceneSnapshot) {
    let Some(run) = &snapshot.runner else {
        return;
    };
    let area = frame.area();

    // Distance reads in meters, one meter per ten samples.
    let title = format!(" DISTANCE {}m ", run.score / 10);
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_bounds([0.0, f64::from(VIEW_W)])
        .y_bounds([0.0, f64::from(VIEW_H)])
        .paint(|ctx| {
            ctx.draw(&RoadLine {
                x1: 0.0,
                y1: f64::from(VIEW_H - GROUND_Y),
                x2: f64::from(VIEW_W),
                y2: f64::from(VIEW_H - GROUND_Y),
                color: Color::DarkGray,
            });
            if let Some(player) = app.track().player_rect() {
                ctx.draw(&Rectangle {
                    x: f64::from(player.left),
                    y: f64::from(VIEW_H - player.bottom),
                    width: f64::from(player.width()),
                    height: f64::from(player.height()),
                    color: Color::Green,
                });
            }
            if let Some(obstacle) = app.track().obstacle_rect() {
                ctx.draw(&Rectangle {
                    x: f64::from(obstacle.left),
                    y: f64::from(VIEW_H - obstacle.bottom),
                    width: f64::from(obstacle.width()),
                    height: f64::from(obstacle.height()),
                    color: Color::Yellow,
                });
            }
        });
    frame.render_widget(canvas, area);

    if !run.started {
        let prompt = Paragraph::new(vec![
            Line::from(Span::styled(
                "READY?",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "PRESS SPACE",
                Style::default().fg(Color::Yellow),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(prompt, centered(area, 20, 4));
    }
}
