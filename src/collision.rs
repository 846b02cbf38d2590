use crate::geometry::{Cell, GridGeometry};
use crate::snake::SnakeBody;

/// Kind of collision that ends a game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Boundary,
    SelfBody,
}

/// Returns true iff the head shares a cell with any non-head segment.
#[must_use]
pub fn self_collision(body: &SnakeBody) -> bool {
    body.head_overlaps_body()
}

/// Returns true iff `head` lies outside the board.
#[must_use]
pub fn boundary_collision(head: Cell, geometry: GridGeometry) -> bool {
    !geometry.is_within_bounds(head)
}

/// Evaluates both collision kinds against the current body. Boundary wins
/// when both hold.
#[must_use]
pub fn detect(body: &SnakeBody, geometry: GridGeometry) -> Option<Collision> {
    if boundary_collision(body.head(), geometry) {
        return Some(Collision::Boundary);
    }

    if self_collision(body) {
        return Some(Collision::SelfBody);
    }

    None
}
