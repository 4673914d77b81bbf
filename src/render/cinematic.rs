// src/render/cinematic.rs
//
// Cinematics render as full-screen title cards with a playback bar; the
// overlay card from the orchestrator sits on top for its two-second window.

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;
use scene::{ClipId, SceneSnapshot};

use super::{accent_color, centered};
use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, snapshot: &SceneSnapshot) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let screen = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(screen, rows[0]);

    if let Some((clip, progress)) = app.clip_progress() {
        let feature = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("▶ {}", clip_name(clip)),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(feature, rows[0]);

        let playback = Gauge::default()
            .gauge_style(Style::default().fg(Color::DarkGray))
            .ratio(progress)
            .label("");
        frame.render_widget(playback, rows[1]);
    }

    if let Some(card) = snapshot.overlay {
        let accent = accent_color(card.accent);
        let splash = Paragraph::new(vec![
            Line::from(Span::styled(
                card.title,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.subtitle,
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(splash, centered(rows[0], 28, 4));
    }

    let hint = Paragraph::new(Span::styled(
        "s skip · q quit",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hint, rows[2]);
}

fn clip_name(clip: ClipId) -> &'static str {
    match clip {
        ClipId::HeroIntro => "HERO INTRO",
        ClipId::RivalIntro => "RIVAL INTRO",
        ClipId::RivalDefeated => "THE RIVAL FALLS",
        ClipId::HeroDefeated => "THE HERO FALLS",
        ClipId::BonusOutro => "BONUS SCENE",
    }
}
