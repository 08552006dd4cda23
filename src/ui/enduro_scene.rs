//! Enduro game UI rendering.
//!
//! The 480×640 board is sampled into a cell grid: each terminal cell takes
//! the color of whatever covers its center point. One terminal cell is
//! 10×20 board pixels at native size, shrinking to fit smaller terminals.

use super::game_common::{
    create_game_layout, render_game_over_overlay, render_info_panel_frame, render_status_bar,
};
use crate::enduro::types::{CarColor, EnduroConfig, EnduroGame, Rect as BoardRect, RunOutcome};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Board pixels covered by one terminal cell at native size.
const CELL_PX_WIDTH: i32 = 10;
const CELL_PX_HEIGHT: i32 = 20;

const CAR_CHAR: char = '█';

const GRASS_COLOR: Color = Color::Rgb(50, 50, 50);
const ROAD_COLOR: Color = Color::Rgb(30, 30, 30);
const MARKER_COLOR: Color = Color::Rgb(255, 255, 255);

/// What covers a point on the board, topmost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Player,
    Traffic,
    LaneMarker,
    Road,
    Grass,
}

/// Render the Enduro game scene.
pub fn render_enduro_scene(frame: &mut Frame, area: Rect, game: &EnduroGame) {
    let layout = create_game_layout(frame, area, " Mini Enduro ", Color::LightBlue, 10, 20);

    render_play_field(frame, layout.content, game);

    if game.outcome == Some(RunOutcome::Crashed) {
        render_game_over_overlay(
            frame,
            layout.content,
            "CRASHED",
            &format!("You lasted {}", format_elapsed(game.elapsed_ms)),
            &format!("Cars passed: {}", cars_passed(game)),
        );
    }

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

/// Lane marker rectangles for the current scroll offset.
pub fn lane_markers(game: &EnduroGame) -> Vec<BoardRect> {
    let config = &game.config;
    let x = config.road_left() + config.road_width / 2 - config.lane_marker_width / 2;

    (-config.lane_marker_spacing..config.height)
        .step_by(config.lane_marker_spacing as usize)
        .map(|y| {
            BoardRect::new(
                x,
                y + game.lane_offset,
                config.lane_marker_width,
                config.lane_marker_height,
            )
        })
        .collect()
}

/// Classify the board point `(px, py)`.
pub fn surface_at(game: &EnduroGame, markers: &[BoardRect], px: f64, py: f64) -> Surface {
    if game.player.rect.contains(px, py) {
        return Surface::Player;
    }
    if game.obstacles.iter().any(|car| car.rect.contains(px, py)) {
        return Surface::Traffic;
    }
    if markers.iter().any(|m| m.contains(px, py)) {
        return Surface::LaneMarker;
    }

    let config = &game.config;
    if px >= config.road_left() as f64 && px < config.road_right() as f64 {
        Surface::Road
    } else {
        Surface::Grass
    }
}

fn car_color(color: CarColor) -> Color {
    match color {
        CarColor::Blue => Color::Rgb(0, 0, 200),
        CarColor::Red => Color::Rgb(200, 0, 0),
    }
}

fn surface_span(surface: Surface, game: &EnduroGame) -> Span<'static> {
    match surface {
        Surface::Player => Span::styled(
            CAR_CHAR.to_string(),
            Style::default().fg(car_color(game.player.color)).bg(ROAD_COLOR),
        ),
        // Traffic is all one color
        Surface::Traffic => Span::styled(
            CAR_CHAR.to_string(),
            Style::default().fg(car_color(CarColor::Red)).bg(ROAD_COLOR),
        ),
        Surface::LaneMarker => Span::styled(" ", Style::default().bg(MARKER_COLOR)),
        Surface::Road => Span::styled(" ", Style::default().bg(ROAD_COLOR)),
        Surface::Grass => Span::styled(" ", Style::default().bg(GRASS_COLOR)),
    }
}

/// Render the board: grass, road, markers, player, traffic.
fn render_play_field(frame: &mut Frame, area: Rect, game: &EnduroGame) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let config = &game.config;
    let (native_cols, native_rows) = native_grid(config);
    let cols = area.width.min(native_cols);
    let rows = area.height.min(native_rows);

    let px_per_col = config.width as f64 / cols as f64;
    let px_per_row = config.height as f64 / rows as f64;
    let markers = lane_markers(game);

    let lines: Vec<Line> = (0..rows)
        .map(|row| {
            let py = (row as f64 + 0.5) * px_per_row;
            let spans: Vec<Span> = (0..cols)
                .map(|col| {
                    let px = (col as f64 + 0.5) * px_per_col;
                    surface_span(surface_at(game, &markers, px, py), game)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let board_area = Rect {
        x: area.x + (area.width - cols) / 2,
        y: area.y + (area.height - rows) / 2,
        width: cols,
        height: rows,
    };
    frame.render_widget(Paragraph::new(lines), board_area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &EnduroGame) {
    match game.outcome {
        None => render_status_bar(
            frame,
            area,
            "Dodge the traffic!",
            Color::LightBlue,
            &[("[←/→]", "Steer"), ("[Esc]", "Quit")],
        ),
        Some(RunOutcome::Crashed) => {
            render_status_bar(frame, area, "Crashed!", Color::LightRed, &[])
        }
        Some(RunOutcome::Quit) => render_status_bar(frame, area, "Quit", Color::Gray, &[]),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &EnduroGame) {
    let inner = render_info_panel_frame(frame, area);

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled("Time", label)),
        Line::from(Span::styled(format_elapsed(game.elapsed_ms), value)),
        Line::from(""),
        Line::from(Span::styled("Cars passed", label)),
        Line::from(Span::styled(cars_passed(game).to_string(), value)),
        Line::from(""),
        Line::from(Span::styled("On the road", label)),
        Line::from(Span::styled(game.obstacles.len().to_string(), value)),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Terminal cells needed to show the board at one cell per
/// `CELL_PX_WIDTH`×`CELL_PX_HEIGHT` pixels, saturating at `u16::MAX`.
pub fn native_grid(config: &EnduroConfig) -> (u16, u16) {
    let cols = u16::try_from((config.width / CELL_PX_WIDTH).max(1)).unwrap_or(u16::MAX);
    let rows = u16::try_from((config.height / CELL_PX_HEIGHT).max(1)).unwrap_or(u16::MAX);
    (cols, rows)
}

/// Cars that have scrolled off the board.
pub fn cars_passed(game: &EnduroGame) -> u64 {
    game.obstacles_spawned.saturating_sub(game.obstacles.len() as u64)
}

/// `12345` ms -> `"12.3s"`.
pub fn format_elapsed(elapsed_ms: u64) -> String {
    format!("{}.{}s", elapsed_ms / 1000, (elapsed_ms % 1000) / 100)
}
