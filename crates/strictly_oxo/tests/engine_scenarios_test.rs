//! End-to-end match scenarios through the engine and service.

use strictly_oxo::{
    Axis, Cell, GameConfig, GameEngine, GameService, LineWinDetector, MatchStatus, MoveError,
    MoveOutcome, Orientation, PlayerId, WinDetector,
};

#[test]
fn test_top_row_three_by_three() {
    let mut engine = GameEngine::new(3, 3, 3);
    engine.set_players(2);

    // A takes the top row while B plays the middle row.
    for cmd in ["a1", "b1", "a2", "b2"] {
        engine.apply_move(cmd).expect("Valid move");
    }
    assert_eq!(engine.apply_move("a3"), Ok(MoveOutcome::Won(PlayerId(0))));

    let detector = LineWinDetector::new();
    assert!(detector.check_win(engine.board(), 0, 2, PlayerId(0), 3));
    assert_eq!(*engine.project().winner(), Some('A'));
}

#[test]
fn test_fifth_stone_on_large_board() {
    let mut engine = GameEngine::new(19, 19, 5);
    engine.set_players(1);

    // Single player: every move is A's. Four stones left of the center.
    for cmd in ["j6", "j7", "j8", "j9"] {
        engine.apply_move(cmd).expect("Valid move");
    }
    assert_eq!(engine.status(), MatchStatus::InProgress);

    let detector = LineWinDetector::new();
    assert_eq!(
        detector.run_length(engine.board(), 9, 8, PlayerId(0), Orientation::Horizontal),
        4
    );

    // (9, 9) is beyond the single-digit column alphabet; place it directly.
    assert_eq!(engine.place(9, 9), Ok(MoveOutcome::Won(PlayerId(0))));
    assert!(detector.check_win(engine.board(), 9, 9, PlayerId(0), 5));
}

#[test]
fn test_board_size_clamped_not_rejected() {
    let service = GameService::default();
    let state = service.set_board_size(2, 2);
    assert_eq!((*state.rows(), *state.cols()), (3, 3));
}

#[test]
fn test_move_after_win_is_noop() {
    let service = GameService::default();
    for cmd in ["a1", "b1", "a2", "b2", "a3"] {
        service.apply_move(cmd).expect("Valid move");
    }
    let before = service.get_state();
    assert_eq!(*before.winner(), Some('A'));

    let after_move = service.apply_move("c3").expect("Ignored, not an error");
    assert_eq!(*after_move, *before);
    assert_eq!(*service.get_state(), *before);
}

#[test]
fn test_move_after_draw_is_noop() {
    let service = GameService::default();
    for cmd in ["a1", "a2", "a3", "b2", "b1", "b3", "c2", "c1", "c3"] {
        service.apply_move(cmd).expect("Valid move");
    }
    let before = service.get_state();
    assert!(*before.drawn());

    // Even an otherwise invalid command is ignored once the match is over.
    let after = service.apply_move("zz").expect("Ignored, not an error");
    assert_eq!(*after, *before);
}

#[test]
fn test_no_players_checked_before_format() {
    let mut engine = GameEngine::new(3, 3, 3);
    assert_eq!(engine.apply_move("???"), Err(MoveError::NoPlayersConfigured));
}

#[test]
fn test_error_taxonomy() {
    let service = GameService::default();
    assert!(matches!(
        service.apply_move("a"),
        Err(MoveError::InvalidCommandFormat { length: 1, .. })
    ));
    assert_eq!(
        service.apply_move("1a"),
        Err(MoveError::InvalidRowCharacter('1'))
    );
    assert_eq!(
        service.apply_move("a-"),
        Err(MoveError::InvalidColumnCharacter('-'))
    );
    assert_eq!(
        service.apply_move("e1"),
        Err(MoveError::CellOutOfRange {
            axis: Axis::Row,
            index: 4
        })
    );
    service.apply_move("a1").expect("Valid move");
    assert_eq!(
        service.apply_move("A1"),
        Err(MoveError::CellAlreadyOccupied { row: 0, col: 0 })
    );
}

#[test]
fn test_set_players_rebuilds_roster_and_grows_board() {
    let service = GameService::default();
    service.apply_move("a1").expect("Valid move");
    let state = service.set_players(4);
    assert_eq!(*state.player_count(), 4);
    assert_eq!((*state.rows(), *state.cols()), (4, 4));
    assert_eq!(*state.current_player(), Some('A'));
    assert!(state.board().iter().flatten().all(|m| *m == ' '));

    for (cmd, marker) in [("a1", 'A'), ("a2", 'B'), ("a3", 'C'), ("a4", 'D')] {
        let state = service.apply_move(cmd).expect("Valid move");
        assert_eq!(state.marker_at(0, cmd[1..].parse::<usize>().unwrap() - 1), Some(marker));
    }
    assert_eq!(*service.get_state().current_player(), Some('A'));
}

#[test]
fn test_three_players_win() {
    let config = GameConfig::default().with_size(5, 5).with_players(3);
    let mut engine = GameEngine::from_config(&config);
    // A: a1 b1 c1 down the first column; B and C elsewhere.
    for cmd in ["a1", "a5", "e5", "b1", "b5", "e4"] {
        engine.apply_move(cmd).expect("Valid move");
    }
    assert_eq!(engine.apply_move("c1"), Ok(MoveOutcome::Won(PlayerId(0))));
    assert_eq!(engine.board().get(2, 0), Some(Cell::Occupied(PlayerId(0))));
}
