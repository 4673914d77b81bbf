// src/render/fight.rs

use combat::{CombatFeedback, MatchOutcome, Pose};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;
use scene::SceneSnapshot;

use super::centered;
use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, snapshot: &SceneSnapshot) {
    let Some(combat) = &snapshot.combat else {
        return;
    };
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    // Health bars flank the VS mark.
    let bars = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(10),
            Constraint::Percentage(45),
        ])
        .split(rows[0]);

    let hero = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" HERO "))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(f64::from(combat.player_hp) / 100.0)
        .label(format!("{}", combat.player_hp));
    frame.render_widget(hero, bars[0]);

    let vs = Paragraph::new(Span::styled(
        "VS",
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(vs, centered(bars[1], 2, 1));

    let rival = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" RIVAL "))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(f64::from(combat.enemy_hp) / 100.0)
        .label(format!("{}", combat.enemy_hp));
    frame.render_widget(rival, bars[2]);

    if combat.combo > 1 {
        let combo = Paragraph::new(Span::styled(
            format!("{} HITS!", combat.combo),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ));
        frame.render_widget(combo, rows[1]);
    }

    draw_arena(frame, app, combat.player_pose, combat.enemy_pose, &rows[2]);

    let hint = Paragraph::new(Span::styled(
        "j/space punch · k block · q quit",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hint, rows[3]);

    if let Some(banner) = combat.banner {
        let color = match banner.outcome {
            MatchOutcome::Win => Color::Yellow,
            MatchOutcome::Lose => Color::Red,
        };
        let splash = Paragraph::new(Span::styled(
            banner.text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(splash, centered(area, 30, 3));
    }
}

fn draw_arena(
    frame: &mut Frame,
    app: &App,
    player_pose: Pose,
    enemy_pose: Pose,
    arena: &ratatui::layout::Rect,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(*arena);

    let (hero_texts, rival_texts) = floater_lines(app);

    let hero = fighter_paragraph(player_pose, false, Color::Green, hero_texts);
    frame.render_widget(hero.alignment(Alignment::Center), columns[0]);

    let rival = fighter_paragraph(enemy_pose, true, Color::Magenta, rival_texts);
    frame.render_widget(rival.alignment(Alignment::Center), columns[2]);
}

/// Floating combat texts, newest last, split per fighter side.
fn floater_lines(app: &App) -> (Vec<Line<'static>>, Vec<Line<'static>>) {
    let mut hero = Vec::new();
    let mut rival = Vec::new();
    for floater in &app.floaters {
        match floater.feedback {
            CombatFeedback::PlayerHit { damage } => hero.push(Line::from(Span::styled(
                format!("-{damage}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))),
            CombatFeedback::PlayerBlocked => hero.push(Line::from(Span::styled(
                "BLOCKED!",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ))),
            CombatFeedback::EnemyHit { damage, critical } => {
                let (text, color) = if critical {
                    (format!("CRITICAL -{damage}"), Color::Red)
                } else {
                    (format!("-{damage}"), Color::Yellow)
                };
                rival.push(Line::from(Span::styled(
                    text,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )));
            }
            CombatFeedback::EnemyBlocked => rival.push(Line::from(Span::styled(
                "BLOCKED",
                Style::default().fg(Color::Blue),
            ))),
        }
    }
    (hero, rival)
}

fn fighter_paragraph(
    pose: Pose,
    flipped: bool,
    color: Color,
    mut floaters: Vec<Line<'static>>,
) -> Paragraph<'static> {
    let mut lines = Vec::new();
    lines.append(&mut floaters);
    lines.push(Line::from(""));
    for row in stickman(pose, flipped) {
        lines.push(Line::from(Span::styled(
            row,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }
    Paragraph::new(lines)
}

fn stickman(pose: Pose, flipped: bool) -> [&'static str; 4] {
    match (pose, flipped) {
        (Pose::Idle, false) => [" O ", "/|\\", " | ", "/ \\"],
        (Pose::Idle, true) => [" O ", "/|\\", " | ", "/ \\"],
        (Pose::Punch, false) => [" O  ", " |==", " |  ", "/ \\ "],
        (Pose::Punch, true) => ["  O ", "==| ", "  | ", " / \\"],
        (Pose::Hurt, false) => ["\\O/", " | ", " | ", "/ \\"],
        (Pose::Hurt, true) => ["\\O/", " | ", " | ", "/ \\"],
        (Pose::Block, false) => [" O ", "[|\\", " | ", "/ \\"],
        (Pose::Block, true) => [" O ", "/|]", " | ", "/ \\"],
    }
}
