use life_engine::patterns::{BLINKER, BLOCK, GLIDER};
use life_engine::{Coord, Engine, EngineConfig, LifeError, Seed};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn alive(engine: &Engine) -> Vec<Coord> {
    engine.cells().filter(|(_, c)| c.is_alive()).map(|(p, _)| p).collect()
}

fn step(engine: &mut Engine) {
    engine.request_step();
    engine.advance_if_pending().expect("step was requested");
}

#[test]
fn topology_of_corner_edge_and_interior() {
    let engine = Engine::blank(5).unwrap();
    let grid = engine.grid();

    let mut corner = grid.cell(Coord::new(0, 0)).neighbors().to_vec();
    corner.sort();
    assert_eq!(corner, vec![Coord::new(0, 1), Coord::new(1, 0), Coord::new(1, 1)]);

    assert_eq!(grid.cell(Coord::new(2, 0)).neighbors().len(), 5);
    assert_eq!(grid.cell(Coord::new(0, 3)).neighbors().len(), 5);
    assert_eq!(grid.cell(Coord::new(2, 2)).neighbors().len(), 8);
}

#[test]
fn single_cell_underpopulation() {
    let mut engine = Engine::blank(5).unwrap();
    engine.toggle(2, 2).unwrap();
    assert_eq!(engine.live_neighbor_count(2, 2), Ok(0));
    step(&mut engine);
    assert_eq!(engine.population(), 0);
}

#[test]
fn block_is_stable_under_repeated_steps() {
    let mut engine = Engine::blank(5).unwrap();
    engine.apply_pattern(&BLOCK, Coord::new(1, 1));
    let start = alive(&engine);
    for c in &start {
        assert_eq!(engine.live_neighbor_count(c.x as i32, c.y as i32), Ok(3));
    }
    for _ in 0..5 {
        step(&mut engine);
        assert_eq!(alive(&engine), start);
    }
}

#[test]
fn blinker_flips_and_returns() {
    let mut engine = Engine::blank(5).unwrap();
    engine.apply_pattern(&BLINKER, Coord::new(1, 2));

    step(&mut engine);
    assert_eq!(
        alive(&engine),
        vec![Coord::new(2, 1), Coord::new(2, 2), Coord::new(2, 3)]
    );
    assert_eq!(engine.is_alive(1, 2), Ok(false));
    assert_eq!(engine.is_alive(3, 2), Ok(false));

    step(&mut engine);
    assert_eq!(
        alive(&engine),
        vec![Coord::new(1, 2), Coord::new(2, 2), Coord::new(3, 2)]
    );
}

#[test]
fn glider_moves_one_diagonal_every_four_generations() {
    let mut engine = Engine::blank(12).unwrap();
    engine.apply_pattern(&GLIDER, Coord::new(1, 1));
    let start = alive(&engine);
    for _ in 0..4 {
        step(&mut engine);
        assert!(engine.check_invariant());
    }
    let moved: Vec<Coord> = start.iter().map(|c| Coord::new(c.x + 1, c.y + 1)).collect();
    assert_eq!(alive(&engine), moved);
}

#[test]
fn glider_dies_into_corner_consistently() {
    let mut engine = Engine::blank(6).unwrap();
    engine.apply_pattern(&GLIDER, Coord::new(0, 0));
    for _ in 0..30 {
        step(&mut engine);
        assert!(engine.check_invariant());
    }
}

#[test]
fn same_stream_same_grid() {
    let config = EngineConfig::new(30, 25);
    let a = Engine::with_rng(config, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = Engine::with_rng(config, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(alive(&a), alive(&b));

    let c = Engine::new(config.with_seed(Seed(42))).unwrap();
    let d = Engine::new(config.with_seed(Seed(42))).unwrap();
    assert_eq!(alive(&c), alive(&d));
    assert_eq!(c.seed(), d.seed());
}

#[test]
fn out_of_bounds_reports_coordinates() {
    let mut engine = Engine::new(EngineConfig::new(8, 40).with_seed(Seed(9))).unwrap();
    let before = engine.grid().clone();
    let err = engine.toggle(-3, 20).unwrap_err();
    assert_eq!(err, LifeError::OutOfBounds { x: -3, y: 20, size: 8 });
    assert_eq!(err.to_string(), "cell (-3, 20) is outside the 8x8 grid");
    assert_eq!(engine.grid(), &before);
}

#[derive(Debug, Clone)]
enum Op {
    Toggle(i32, i32),
    Advance,
}

fn op(size: i32) -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-2..size + 2, -2..size + 2).prop_map(|(x, y)| Op::Toggle(x, y)),
        1 => Just(Op::Advance),
    ]
}

proptest! {
    #[test]
    fn counts_stay_consistent(
        seed in any::<u64>(),
        chance in 0u8..=100,
        ops in prop::collection::vec(op(9), 0..60),
    ) {
        let mut engine = Engine::new(EngineConfig::new(9, chance).with_seed(Seed(seed))).unwrap();
        prop_assert!(engine.check_invariant());
        for op in ops {
            match op {
                Op::Toggle(x, y) => {
                    let before = engine.grid().clone();
                    if engine.toggle(x, y).is_err() {
                        prop_assert_eq!(engine.grid(), &before);
                    }
                }
                Op::Advance => {
                    engine.request_step();
                    engine.advance_if_pending();
                }
            }
            prop_assert!(engine.check_invariant());
        }
    }

    #[test]
    fn double_toggle_is_identity(
        seed in any::<u64>(),
        x in 0i32..7,
        y in 0i32..7,
    ) {
        let mut engine = Engine::new(EngineConfig::new(7, 30).with_seed(Seed(seed))).unwrap();
        let before = engine.grid().clone();
        engine.toggle(x, y).unwrap();
        engine.toggle(x, y).unwrap();
        prop_assert_eq!(engine.grid(), &before);
    }
}
