//! Randomized agreement between the incremental and scanning detectors.

use strictly_oxo::{Board, Cell, LineWinDetector, PlayerId, ScanWinDetector, WinDetector};

/// Longest same-owner run through `(row, col)` found by brute force over the whole board.
fn oracle(board: &Board, row: usize, col: usize, mover: PlayerId) -> usize {
    let mut best = 0;
    for (dr, dc) in [(0_isize, 1_isize), (1, 0), (1, 1), (1, -1)] {
        // Every run through the cell along (dr, dc) starts somewhere on that line.
        for start in -(board.rows().max(board.cols()) as isize)..=0 {
            let mut len = 0;
            let mut through = false;
            let mut k = start;
            loop {
                let r = row as isize + k * dr;
                let c = col as isize + k * dc;
                if board.is_out_of_bounds(r, c)
                    || board.get(r as usize, c as usize) != Some(Cell::Occupied(mover))
                {
                    break;
                }
                through |= k == 0;
                len += 1;
                k += 1;
            }
            if through {
                best = best.max(len);
            }
        }
    }
    best
}

fn random_board(rng: &mut fastrand::Rng, players: usize) -> Board {
    let mut board = Board::new(rng.usize(3..=9), rng.usize(3..=9));
    let density = rng.f64();
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            if rng.f64() < density {
                board.set(r, c, Cell::Occupied(PlayerId(rng.usize(0..players))));
            }
        }
    }
    board
}

#[test]
fn test_detectors_match_oracle() {
    let mut rng = fastrand::Rng::with_seed(0x0A0A);
    let line = LineWinDetector::new();
    let scan = ScanWinDetector;

    for _ in 0..2_000 {
        let players = rng.usize(1..=3);
        let mut board = random_board(&mut rng, players);
        let row = rng.usize(0..board.rows());
        let col = rng.usize(0..board.cols());
        let mover = PlayerId(0);
        board.set(row, col, Cell::Occupied(mover));
        let threshold = rng.usize(1..=6);

        let expected = oracle(&board, row, col, mover) >= threshold;
        assert_eq!(
            line.check_win(&board, row, col, mover, threshold),
            expected,
            "line detector at ({row}, {col}) threshold {threshold}\n{board:?}"
        );
        assert_eq!(
            scan.check_win(&board, row, col, mover, threshold),
            expected,
            "scan detector at ({row}, {col}) threshold {threshold}\n{board:?}"
        );
    }
}

#[test]
fn test_run_length_matches_oracle_per_orientation() {
    let mut rng = fastrand::Rng::with_seed(7);
    let line = LineWinDetector::new();

    for _ in 0..500 {
        let mut board = random_board(&mut rng, 2);
        let row = rng.usize(0..board.rows());
        let col = rng.usize(0..board.cols());
        let mover = PlayerId(1);
        board.set(row, col, Cell::Occupied(mover));

        let longest = line
            .orientations()
            .iter()
            .map(|o| line.run_length(&board, row, col, mover, *o))
            .max()
            .unwrap_or(0);
        assert_eq!(longest, oracle(&board, row, col, mover));
    }
}

#[test]
fn test_result_independent_of_origin_within_run() {
    let mut rng = fastrand::Rng::with_seed(42);
    let line = LineWinDetector::new();

    for _ in 0..200 {
        let mut board = Board::new(10, 10);
        let length = rng.usize(2..=6);
        let (dr, dc) = [(0_isize, 1_isize), (1, 0), (1, 1), (1, -1)][rng.usize(0..4)];
        let start_row = rng.usize(0..=4);
        let start_col = if dc < 0 { rng.usize(5..10) } else { rng.usize(0..=4) };
        let run: Vec<(usize, usize)> = (0..length as isize)
            .map(|k| {
                (
                    (start_row as isize + k * dr) as usize,
                    (start_col as isize + k * dc) as usize,
                )
            })
            .collect();
        for &(r, c) in &run {
            board.set(r, c, Cell::Occupied(PlayerId(0)));
        }

        let threshold = rng.usize(1..=7);
        let answers: Vec<bool> = run
            .iter()
            .map(|&(r, c)| line.check_win(&board, r, c, PlayerId(0), threshold))
            .collect();
        assert!(answers.iter().all(|a| *a == (length >= threshold)));
    }
}
