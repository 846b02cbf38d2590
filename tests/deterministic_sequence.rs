use grid_snake::config::GameConfig;
use grid_snake::game::{GameEngine, GameOverReason, GameStatus, TickOutcome};
use grid_snake::geometry::Cell;
use grid_snake::input::Direction;

fn classic_board(food: Cell) -> GameEngine {
    GameEngine::new(&GameConfig {
        initial_food: Some(food),
        seed: Some(42),
        ..GameConfig::default()
    })
    .expect("default board is valid")
}

#[test]
fn ten_ticks_right_without_food() {
    let mut state = classic_board(Cell::new(15, 15));
    assert_eq!(
        state.snake().segments().copied().collect::<Vec<_>>(),
        vec![
            Cell::new(5, 5),
            Cell::new(4, 5),
            Cell::new(3, 5),
            Cell::new(2, 5),
        ]
    );

    for _ in 0..10 {
        assert_eq!(state.tick(), TickOutcome::Moved);
    }

    assert_eq!(state.snake().head(), Cell::new(15, 5));
    assert_eq!(state.snake().len(), 4);
    assert_eq!(state.status(), GameStatus::Running);
    assert_eq!(state.score(), 0);
}

#[test]
fn leaving_the_right_edge_ends_the_game_one_tick_later() {
    let mut state = classic_board(Cell::new(15, 15));

    for _ in 0..24 {
        state.tick();
    }
    assert_eq!(state.snake().head(), Cell::new(29, 5));

    state.tick();
    assert_eq!(state.snake().head(), Cell::new(30, 5));
    assert_eq!(state.status(), GameStatus::Running);

    assert_eq!(
        state.tick(),
        TickOutcome::GameOver(GameOverReason::WallCollision)
    );
    assert_eq!(state.score(), 0);
    assert_eq!(state.snake().len(), 4);
}

#[test]
fn turning_into_own_body_ends_the_game() {
    let mut state = GameEngine::new(&GameConfig {
        initial_length: 5,
        initial_food: Some(Cell::new(20, 20)),
        seed: Some(3),
        ..GameConfig::default()
    })
    .expect("config is valid");

    for direction in [Direction::Up, Direction::Left, Direction::Down] {
        assert!(state.set_direction(direction));
        assert_eq!(state.tick(), TickOutcome::Moved);
    }
    assert_eq!(state.snake().head(), Cell::new(4, 5));

    assert_eq!(
        state.tick(),
        TickOutcome::GameOver(GameOverReason::SelfCollision)
    );
    assert_eq!(state.status(), GameStatus::GameOver);
}

#[test]
fn stepwise_food_collection() {
    let mut state = classic_board(Cell::new(7, 5));

    state.tick();
    state.tick();
    assert_eq!(state.snake().head(), Cell::new(7, 5));
    assert_eq!(state.score(), 0);

    assert_eq!(state.tick(), TickOutcome::Ate);
    assert_eq!(state.score(), 1);
    assert_eq!(state.snake().len(), 5);
    assert_eq!(state.snake().head(), Cell::new(8, 5));
    assert_eq!(state.snake().tail(), Cell::new(4, 5));
    assert!(!state.snake().occupied_cells().contains(&state.food()));
}

#[test]
fn opposite_direction_leaves_movement_unchanged() {
    let mut state = classic_board(Cell::new(15, 15));

    assert!(!state.set_direction(Direction::Left));
    state.tick();

    assert_eq!(state.direction(), Direction::Right);
    assert_eq!(state.snake().head(), Cell::new(6, 5));
}

#[test]
fn game_over_is_terminal_and_frozen() {
    let mut state = GameEngine::new(&GameConfig {
        initial_head: Cell::new(29, 5),
        initial_food: Some(Cell::new(0, 0)),
        seed: Some(8),
        ..GameConfig::default()
    })
    .expect("config is valid");

    state.tick();
    state.tick();
    assert_eq!(state.status(), GameStatus::GameOver);
    let frozen = state.snapshot();

    for _ in 0..5 {
        assert_eq!(state.tick(), TickOutcome::Idle);
    }
    assert!(!state.set_direction(Direction::Up));
    assert_eq!(state.snapshot(), frozen);
}

#[test]
fn random_play_keeps_length_and_food_invariants() {
    let directions = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    for seed in 0..20_u64 {
        let mut state = GameEngine::new(&GameConfig {
            board_width: 8,
            board_height: 8,
            initial_head: Cell::new(3, 3),
            initial_length: 2,
            seed: Some(seed),
            ..GameConfig::default()
        })
        .expect("config is valid");

        let mut step = seed as usize;
        for _ in 0..5_000 {
            if state.status() != GameStatus::Running {
                break;
            }

            step = step.wrapping_mul(31).wrapping_add(7);
            // steer toward the food most of the time, randomly otherwise
            let direction = if step % 4 == 0 {
                directions[(step / 4) % 4]
            } else {
                toward(state.snake().head(), state.food())
            };
            state.set_direction(direction);

            let length_before = state.snake().len();
            let score_before = state.score();
            let outcome = state.tick();
            let length_after = state.snake().len();

            match outcome {
                TickOutcome::Ate => {
                    assert_eq!(length_after, length_before + 1);
                    assert_eq!(state.score(), score_before + 1);
                    assert!(!state.snake().occupies(state.food()));
                }
                TickOutcome::Moved => {
                    assert_eq!(length_after, length_before);
                    assert_eq!(state.score(), score_before);
                    assert_eq!(state.check_invariants(), Ok(()));
                }
                TickOutcome::GameOver(_) | TickOutcome::Idle => {
                    assert!(length_after - length_before <= 1);
                }
            }
        }
    }
}

fn toward(from: Cell, to: Cell) -> Direction {
    if to.col > from.col {
        Direction::Right
    } else if to.col < from.col {
        Direction::Left
    } else if to.row > from.row {
        Direction::Down
    } else {
        Direction::Up
    }
}
