use std::io;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::{GameOverReason, GameStatus, Snapshot};
use crate::geometry::{Cell, GridGeometry};
use crate::input::Direction;
use crate::runtime::Display;
use crate::terminal_runtime::TerminalSession;

const GLYPH_SNAKE_HEAD_UP: &str = "▲";
const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
const GLYPH_SNAKE_BODY: &str = "█";
const GLYPH_FOOD: &str = "●";

/// Display collaborator drawing snapshots into the terminal.
pub struct TerminalDisplay {
    session: TerminalSession,
    geometry: GridGeometry,
}

impl TerminalDisplay {
    #[must_use]
    pub fn new(session: TerminalSession, geometry: GridGeometry) -> Self {
        Self { session, geometry }
    }
}

impl Display for TerminalDisplay {
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let geometry = self.geometry;
        self.session
            .draw(|frame| render(frame, snapshot, geometry))
    }
}

/// Renders the full game frame from one snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, geometry: GridGeometry) {
    let area = frame.area();
    let [score_row, board_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(geometry.height.saturating_add(2)),
    ])
    .areas(area);
    let [board_area, _] = Layout::horizontal([
        Constraint::Length(geometry.width.saturating_add(2)),
        Constraint::Min(0),
    ])
    .areas(board_row);

    frame.render_widget(
        Paragraph::new(Line::from(format!("Score: {}", snapshot.score)))
            .style(Style::default().fg(Color::White)),
        score_row,
    );

    let block = Block::bordered();
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, geometry, snapshot.food);
    render_snake(frame, inner, geometry, snapshot);

    if snapshot.status == GameStatus::GameOver {
        render_game_over(frame, board_area, snapshot.score, snapshot.game_over_reason);
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, geometry: GridGeometry, food: Cell) {
    let Some((x, y)) = logical_to_terminal(inner, geometry, food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(Color::Red));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, geometry: GridGeometry, snapshot: &Snapshot) {
    let buffer = frame.buffer_mut();
    for (index, segment) in snapshot.snake.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, geometry, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph(snapshot.direction),
                Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(Color::Green));
        }
    }
}

fn render_game_over(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    reason: Option<GameOverReason>,
) {
    let popup = centered_popup(area, 90, 60);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(format!("Game Over! You have a score of {score}")),
        Line::from(match reason {
            Some(GameOverReason::WallCollision) => "Cause: hit wall",
            Some(GameOverReason::SelfCollision) => "Cause: hit yourself",
            Some(GameOverReason::BoardFull) => "Cause: board full",
            None => "",
        }),
        Line::from(""),
        Line::from("[Enter] Play again"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

fn logical_to_terminal(inner: Rect, geometry: GridGeometry, cell: Cell) -> Option<(u16, u16)> {
    if !geometry.is_within_bounds(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.col).ok()?;
    let y_offset = u16::try_from(cell.row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
