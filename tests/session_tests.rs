//! Session tests - game flow through the public session API

use tilefall::core::{
    Axis, DrawTarget, GameConfig, GameSession, Point, SessionState, Shape,
};
use tilefall::types::{GameAction, TileKind};

fn playing(config: GameConfig) -> GameSession {
    let mut s = GameSession::new(config);
    s.apply(GameAction::StartOrPause);
    assert_eq!(s.state(), SessionState::Playing);
    s
}

/// Bottom row filled except column 9, by four separate tiles.
fn nearly_full_bottom_row(s: &mut GameSession) {
    s.insert_settled(TileKind::I, Shape::from_rows(&[&[1, 1, 1]]), Point::new(0, 19));
    s.insert_settled(TileKind::O, Shape::from_rows(&[&[1, 1]]), Point::new(3, 19));
    s.insert_settled(TileKind::S, Shape::from_rows(&[&[1, 1]]), Point::new(5, 19));
    s.insert_settled(TileKind::Z, Shape::from_rows(&[&[1, 1]]), Point::new(7, 19));
}

#[test]
fn test_completing_drop_clears_one_row() {
    let mut s = playing(GameConfig::default());
    nearly_full_bottom_row(&mut s);

    // Vertical I: filled column 1 of the matrix, so pos.x 8 fills column 9.
    assert!(s.spawn_kind(TileKind::I));
    for _ in 0..5 {
        assert!(s.apply(GameAction::MoveRight));
    }
    assert_eq!(s.active().unwrap().pos.x, 8);

    let level = s.level();
    let before = s.score().points();
    assert!(s.apply(GameAction::HardDrop));

    let event = s.take_last_event().unwrap();
    assert_eq!(event.rows.as_slice(), &[19]);
    assert_eq!(event.points, 40 * (level + 1));
    assert_eq!(s.score().points(), before + 40 * (level + 1));
    assert_eq!(s.lines(), 1);

    // Three cells of the I remain, resting on the floor.
    let cells: usize = s.tiles().iter().map(|t| t.shape().filled_count()).sum();
    assert_eq!(cells, 3);
    assert!(s.is_occupied(9, 19) && s.is_occupied(9, 17));
    assert!(!s.is_occupied(0, 19));
}

#[test]
fn test_spawn_into_full_board_is_game_over() {
    let mut s = playing(GameConfig::default());
    let rows: Vec<&[u8]> = vec![&[1; 10]; 20];
    s.insert_settled(TileKind::I, Shape::from_rows(&rows), Point::new(0, 0));
    assert!(!s.spawn_next());
    assert!(s.is_game_over());
    assert!(s.active().is_none());

    // Nothing moves after game over.
    assert!(!s.apply(GameAction::MoveLeft));
    assert!(!s.apply(GameAction::HardDrop));

    // Enter starts a clean session.
    s.apply(GameAction::StartOrPause);
    assert!(s.is_playing());
    assert!(s.tiles().is_empty());
    assert_eq!(s.score().points(), 0);
}

#[test]
fn test_restart_discards_animations_of_old_tiles() {
    let mut s = playing(GameConfig::default());
    s.run_animations(1000);
    s.spawn_kind(TileKind::T);
    assert!(s.apply(GameAction::MoveLeft));
    let old = s.active().unwrap().id();
    assert!(s.animations().is_animating(&DrawTarget {
        tile: old,
        axis: Axis::X
    }));

    s.start();
    assert!(s.animations().is_empty());
    s.run_animations(1050);
    let active = s.active().unwrap();
    assert_eq!(active.draw_pos.x, active.pos.x as f32);
}

#[test]
fn test_buffer_feeds_active_tile() {
    let config = GameConfig {
        preview: 3,
        ..GameConfig::default()
    };
    let mut s = playing(config);
    let upcoming: Vec<TileKind> = s.preview().collect();
    assert_eq!(upcoming.len(), 3);

    s.apply(GameAction::HardDrop);
    assert_eq!(s.active().unwrap().kind(), upcoming[0]);
    let now: Vec<TileKind> = s.preview().collect();
    assert_eq!(now.len(), 3);
    assert_eq!(&now[..2], &upcoming[1..]);
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig {
        seed: 77,
        ..GameConfig::default()
    };
    let mut a = playing(config.clone());
    let mut b = playing(config);
    for _ in 0..10 {
        a.apply(GameAction::HardDrop);
        b.apply(GameAction::HardDrop);
    }
    let kinds_a: Vec<_> = a.tiles().iter().map(|t| (t.kind(), t.pos)).collect();
    let kinds_b: Vec<_> = b.tiles().iter().map(|t| (t.kind(), t.pos)).collect();
    assert_eq!(kinds_a, kinds_b);
}

#[test]
fn test_settled_tiles_never_overlap() {
    let mut s = playing(GameConfig {
        seed: 5,
        ..GameConfig::default()
    });
    let moves = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::Rotate,
    ];
    for i in 0..200 {
        if s.is_game_over() {
            break;
        }
        s.apply(moves[i % moves.len()]);
        if i % 3 == 0 {
            s.apply(GameAction::HardDrop);
        } else {
            s.step_down();
        }
        let grid = s.grid();
        for y in 0..grid.height {
            for x in 0..grid.width {
                let n = s.tiles().iter().filter(|t| t.occupies(x, y)).count();
                assert!(n <= 1, "cell ({}, {}) covered {} times", x, y, n);
            }
        }
    }
}

/// Fill every free cell of rows `top..20` with one settled tile.
fn fill_rows_around_stack(s: &mut GameSession, top: i32) {
    let rows: Vec<Vec<u8>> = (top..20)
        .map(|y| (0..10).map(|x| u8::from(!s.is_occupied(x, y))).collect())
        .collect();
    let rows: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
    s.insert_settled(TileKind::J, Shape::from_rows(&rows), Point::new(0, top));
}

/// Drop an O onto the filled rows so they clear.
fn drop_o(s: &mut GameSession) {
    assert!(s.spawn_kind(TileKind::O));
    assert!(s.apply(GameAction::HardDrop));
}

#[test]
fn test_clear_scores_at_level_before_clear() {
    let mut s = playing(GameConfig::default());
    for _ in 0..2 {
        fill_rows_around_stack(&mut s, 16);
        drop_o(&mut s);
    }
    fill_rows_around_stack(&mut s, 19);
    drop_o(&mut s);
    assert_eq!(s.lines(), 9);
    assert_eq!(s.level(), 0);

    // Tenth line: scored at level 0, then the level goes up.
    fill_rows_around_stack(&mut s, 19);
    drop_o(&mut s);
    assert_eq!(s.lines(), 10);
    assert_eq!(s.level(), 1);
    assert_eq!(s.score().current, 40);

    fill_rows_around_stack(&mut s, 19);
    drop_o(&mut s);
    assert_eq!(s.lines(), 11);
    assert_eq!(s.score().current, 80);
    assert!(s.is_playing());
}
