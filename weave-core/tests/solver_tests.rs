use proptest::prelude::*;
use weave_core::{
    PossibilityGrid, SolveState, Solver, SolverConfig, StepOutcome, WfcError,
};
use weave_tiles::{TileSet, TileVariation};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One tile, all edges "0": self-compatible in every direction.
fn trivial_tiles() -> TileSet {
    TileSet::build(vec![TileVariation::new(Some("A".to_owned()), [0, 0, 0, 0])])
}

/// Two tiles where no pair is ever compatible in any direction: "AB" only
/// accepts "BA" and "CD" only accepts "DC", and neither appears anywhere.
fn hostile_tiles() -> TileSet {
    TileSet::build(vec![
        TileVariation::new(Some("loner1".to_owned()), ["AB", "AB", "AB", "AB"]),
        TileVariation::new(Some("loner2".to_owned()), ["CD", "CD", "CD", "CD"]),
    ])
}

fn basic_tiles() -> TileSet {
    TileSet::build(vec![
        TileVariation::new(Some("basic/blank".to_owned()), [0, 0, 0, 0]),
        TileVariation::new(Some("basic/down".to_owned()), [0, 1, 1, 1]),
    ])
}

fn seeded(tiles: TileSet, dimension: usize, seed: u64) -> Solver {
    Solver::new(tiles, dimension, SolverConfig::builder().seed(seed).build())
}

#[test]
fn trivial_tileset_solves_in_one_attempt() {
    init_logs();
    let mut solver = seeded(trivial_tiles(), 3, 99);

    // A single-variation tileset leaves nothing to decide: the very first
    // step finds the grid fully collapsed.
    let progress = solver.run_to_completion().unwrap();
    assert_eq!(progress.attempts, 1);
    assert_eq!(progress.collapsed_cells, 9);
    assert!(solver.is_done());
    assert_eq!(solver.state(), SolveState::Done);

    for cell in solver.grid().cells() {
        assert!(cell.collapsed);
        assert_eq!(cell.chosen, Some(0));
    }
}

#[test]
fn basic_tileset_solves_any_dimension() {
    init_logs();
    for dimension in [2usize, 5, 10] {
        let mut solver = seeded(basic_tiles(), dimension, 7);
        let progress = solver.run_to_completion().unwrap();
        assert_eq!(progress.collapsed_cells, dimension * dimension);
        assert!(solver.grid().cells().all(|cell| cell.collapsed));
    }
}

#[test]
fn hostile_tileset_contradicts_and_never_finishes_first_attempt() {
    init_logs();
    let mut solver = seeded(hostile_tiles(), 2, 1);

    // First collapse succeeds (the cell still has its single option), the
    // propagation empties every neighbor, and the following step trips on an
    // emptied cell: attempt counter moves past 1 without reaching Done.
    let mut saw_contradiction = false;
    for _ in 0..16 {
        match solver.step().unwrap() {
            StepOutcome::Contradiction => {
                saw_contradiction = true;
                break;
            }
            StepOutcome::Done => panic!("hostile tileset must not solve"),
            StepOutcome::Collapsed { .. } => {}
        }
    }
    assert!(saw_contradiction);
    assert!(solver.attempts() > 1);
    assert!(!solver.is_done());
}

#[test]
fn attempt_cap_surfaces_unsolvable() {
    init_logs();
    let config = SolverConfig::builder().seed(3).max_attempts(4).build();
    let mut solver = Solver::new(hostile_tiles(), 2, config);

    let err = loop {
        match solver.step() {
            Ok(_) => {}
            Err(err) => break err,
        }
    };
    assert_eq!(err, WfcError::Unsolvable(5));
}

#[test]
fn empty_tileset_is_perpetually_contradictory() {
    init_logs();
    let config = SolverConfig::builder().seed(3).max_attempts(2).build();
    let mut solver = Solver::new(TileSet::build(Vec::new()), 2, config);

    // Every cell starts with zero options, so every step is a contradiction
    // until the cap trips.
    assert_eq!(solver.step().unwrap(), StepOutcome::Contradiction);
    assert_eq!(solver.step(), Err(WfcError::Unsolvable(3)));
}

#[test]
fn same_seed_same_solution() {
    init_logs();
    let mut first = seeded(basic_tiles(), 6, 1234);
    let mut second = seeded(basic_tiles(), 6, 1234);

    loop {
        let a = first.step().unwrap();
        let b = second.step().unwrap();
        assert_eq!(a, b);
        if a == StepOutcome::Done {
            break;
        }
    }
    assert_eq!(first.attempts(), second.attempts());

    let chosen = |solver: &Solver| -> Vec<Option<usize>> {
        solver.grid().cells().map(|cell| cell.chosen).collect()
    };
    assert_eq!(chosen(&first), chosen(&second));
}

#[test]
fn checkpoint_precedes_each_collapse() {
    init_logs();
    let mut solver = seeded(basic_tiles(), 3, 5);
    assert!(solver.last_checkpoint().is_none());

    let outcome = solver.step().unwrap();
    let checkpoint = solver.last_checkpoint().unwrap();
    // The snapshot was taken before the collapse choice: the collapsed cell
    // is still at full entropy inside it.
    if let StepOutcome::Collapsed { cell, .. } = outcome {
        let snapshot_cell = checkpoint.grid.get_index(cell).unwrap();
        assert!(!snapshot_cell.collapsed);
        assert_eq!(checkpoint.attempts, 1);
    } else {
        panic!("first step on a fresh grid must collapse, got {outcome:?}");
    }
}

#[test]
fn reset_restores_full_entropy_and_attempts() {
    init_logs();
    let mut solver = seeded(basic_tiles(), 4, 11);
    solver.run_to_completion().unwrap();
    assert!(solver.is_done());

    solver.reset();
    assert!(!solver.is_done());
    assert_eq!(solver.attempts(), 1);
    assert_eq!(solver.grid().collapsed_count(), 0);
    let tile_count = solver.tiles().len();
    assert!(solver.grid().cells().all(|cell| cell.entropy() == tile_count));
}

#[test]
fn retileset_rebuilds_and_resets() {
    init_logs();
    let mut solver = seeded(basic_tiles(), 3, 2);
    solver.run_to_completion().unwrap();

    solver.retileset(vec![TileVariation::new(
        Some("A".to_owned()),
        ["AAA", "AAA", "AAA", "AAA"],
    )]);
    assert_eq!(solver.tiles().len(), 1);
    assert_eq!(solver.attempts(), 1);
    assert!(!solver.is_done());

    let progress = solver.run_to_completion().unwrap();
    assert_eq!(progress.attempts, 1);
    assert_eq!(progress.collapsed_cells, 9);
}

#[test]
fn stepping_after_done_is_a_no_op() {
    init_logs();
    let mut solver = seeded(trivial_tiles(), 2, 0);
    solver.run_to_completion().unwrap();
    let before: PossibilityGrid = solver.grid().clone();

    assert_eq!(solver.step().unwrap(), StepOutcome::Done);
    assert_eq!(solver.grid(), &before);
}

proptest! {
    // Option counts never grow within an attempt, whatever the seed.
    #[test]
    fn options_shrink_monotonically(seed in any::<u64>()) {
        let mut solver = seeded(basic_tiles(), 4, seed);
        let mut entropies: Vec<usize> =
            solver.grid().cells().map(weave_core::Cell::entropy).collect();

        for _ in 0..200 {
            let outcome = solver.step().unwrap();
            let now: Vec<usize> =
                solver.grid().cells().map(weave_core::Cell::entropy).collect();
            match outcome {
                StepOutcome::Done => break,
                // A restart legitimately raises entropy; start tracking anew.
                StepOutcome::Contradiction => {}
                StepOutcome::Collapsed { .. } => {
                    for (before, after) in entropies.iter().zip(&now) {
                        prop_assert!(after <= before);
                    }
                }
            }
            entropies = now;
        }
    }
}
