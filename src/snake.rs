use std::collections::{HashSet, VecDeque};

use crate::error::InvariantViolation;
use crate::geometry::Cell;
use crate::input::Direction;

/// Ordered snake segments, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SnakeBody {
    body: VecDeque<Cell>,
}

impl SnakeBody {
    /// Creates a straight snake of `length` cells with its head at `head`,
    /// trailing away from `direction`.
    #[must_use]
    pub fn straight(head: Cell, length: usize, direction: Direction) -> Self {
        let trail = direction.opposite();
        let body = std::iter::successors(Some(head), |cell| Some(cell.step(trail)))
            .take(length.max(1))
            .collect();

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    pub fn from_segments(segments: Vec<Cell>) -> Result<Self, InvariantViolation> {
        if segments.is_empty() {
            return Err(InvariantViolation::EmptyBody);
        }

        Ok(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Moves one cell in `direction`; every other segment takes the cell of
    /// the segment ahead of it.
    pub fn advance(&mut self, direction: Direction) {
        let next_head = self.head().step(direction);
        self.body.push_front(next_head);
        let _ = self.body.pop_back();
    }

    /// Adds a new head one cell in `direction` and keeps the tail in place.
    pub fn grow(&mut self, direction: Direction) {
        let next_head = self.head().step(direction);
        self.body.push_front(next_head);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Every cell covered by the snake, head included.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
