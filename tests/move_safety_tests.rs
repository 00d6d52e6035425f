//! Move Safety Tests
//!
//! One-ply safety checks exercised through the public selector and bot:
//! neck exclusion, walls, bodies, head-to-head contests and the shape of
//! the random pick over the safe pool.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

use safe_step_snake::board::{Agent, BoardDimensions, Snapshot};
use safe_step_snake::bot::Bot;
use safe_step_snake::config::Config;
use safe_step_snake::error::MoveError;
use safe_step_snake::selector::{ChoiceSource, Hazard, MoveSelector, Tier};
use safe_step_snake::types::{Battlesnake, Board, Coord, Direction, Game};

/// Always picks the same index, clamped into range
struct FixedChoice(usize);

impl ChoiceSource for FixedChoice {
    fn choose_index(&mut self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

fn c(x: i32, y: i32) -> Coord {
    Coord { x, y }
}

fn snapshot(width: i32, height: i32, agents: Vec<Agent>) -> Snapshot {
    Snapshot::new(BoardDimensions::new(width, height), agents, "me").unwrap()
}

fn battlesnake(id: &str, body: Vec<Coord>) -> Battlesnake {
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 100,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

#[test]
fn test_open_board_example_distribution() {
    // 11x11, body [(5,5),(5,4),(5,3)], no opponents
    let snap = snapshot(11, 11, vec![Agent::new("me", vec![c(5, 5), c(5, 4), c(5, 3)])]);
    let selector = MoveSelector::default();

    let eval = selector.evaluate(&snap).unwrap();
    assert_eq!(eval.safe, vec![Direction::Up, Direction::Left, Direction::Right]);

    let mut rng = StdRng::seed_from_u64(2024);
    let mut counts: HashMap<Direction, usize> = HashMap::new();
    let trials = 3000;
    for _ in 0..trials {
        let decision = selector.decide(&snap, &mut rng).unwrap();
        assert_eq!(decision.tier, Tier::Safe);
        *counts.entry(decision.direction).or_insert(0) += 1;
    }

    assert_eq!(counts.get(&Direction::Down), None);
    for dir in [Direction::Up, Direction::Left, Direction::Right] {
        let share = counts[&dir] as f64 / trials as f64;
        assert!(
            (share - 1.0 / 3.0).abs() < 0.05,
            "{} chosen {:.3} of the time",
            dir,
            share
        );
    }
}

#[test]
fn test_neck_on_the_left_never_returns_left() {
    let snap = snapshot(11, 11, vec![Agent::new("me", vec![c(5, 5), c(4, 5), c(3, 5)])]);
    let selector = MoveSelector::default();

    for pick in 0..4 {
        let chosen = selector.select_move(&snap, &mut FixedChoice(pick)).unwrap();
        assert_ne!(chosen, Direction::Left);
    }
}

#[test]
fn test_head_on_left_edge_marks_left_unsafe() {
    for height in [3, 11, 19] {
        let snap = snapshot(7, height, vec![Agent::new("me", vec![c(0, 1), c(0, 0)])]);
        let eval = MoveSelector::default().evaluate(&snap).unwrap();
        assert_eq!(eval.hazard_for(Direction::Left), Some(Hazard::OutOfBounds));
    }
}

#[test]
fn test_own_body_above_marks_up_unsafe() {
    let snap = snapshot(
        11,
        11,
        vec![Agent::new("me", vec![c(3, 3), c(3, 2), c(2, 2), c(2, 3), c(2, 4), c(3, 4)])],
    );
    let eval = MoveSelector::default().evaluate(&snap).unwrap();
    assert_eq!(eval.hazard_for(Direction::Up), Some(Hazard::BodyCollision));
    assert_eq!(eval.hazard_for(Direction::Left), Some(Hazard::BodyCollision));
    assert_eq!(eval.safe, vec![Direction::Right]);
}

#[test]
fn test_head_to_head_two_cells_apart() {
    let me = Agent::new("me", vec![c(5, 5), c(4, 5), c(3, 5)]);

    // Equal length opponent two cells to the right
    let equal = snapshot(
        11,
        11,
        vec![me.clone(), Agent::new("them", vec![c(7, 5), c(8, 5), c(9, 5)])],
    );
    let eval = MoveSelector::default().evaluate(&equal).unwrap();
    assert_eq!(eval.hazard_for(Direction::Right), Some(Hazard::LosingHeadToHead));

    // Shorter opponent in the same place
    let shorter = snapshot(
        11,
        11,
        vec![me, Agent::new("them", vec![c(7, 5), c(8, 5)])],
    );
    let eval = MoveSelector::default().evaluate(&shorter).unwrap();
    assert!(eval.safe.contains(&Direction::Right));
}

#[test]
fn test_fallback_prefers_non_reversal_moves() {
    // Head boxed in by two longer opponents and the wall; neck below
    let snap = snapshot(
        5,
        5,
        vec![
            Agent::new("me", vec![c(2, 4), c(2, 3)]),
            Agent::new("west", vec![c(0, 2), c(1, 2), c(1, 3), c(1, 4)]),
            Agent::new("east", vec![c(4, 2), c(3, 2), c(3, 3), c(3, 4)]),
        ],
    );
    let selector = MoveSelector::default();
    let eval = selector.evaluate(&snap).unwrap();
    assert!(eval.safe.is_empty());
    assert_eq!(eval.non_reversal, vec![Direction::Up, Direction::Left, Direction::Right]);

    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..100 {
        let decision = selector.decide(&snap, &mut rng).unwrap();
        assert_eq!(decision.tier, Tier::NonReversal);
        assert_ne!(decision.direction, Direction::Down);
    }
}

#[test]
fn test_dimensions_are_taken_from_each_request() {
    let bot = Bot::new(Config::default_hardcoded());
    let game = Game {
        id: "dims".to_string(),
        ruleset: HashMap::new(),
        timeout: 500,
        source: String::new(),
    };
    let me = battlesnake("me", vec![c(6, 3), c(5, 3)]);

    // On a 7-wide board the right edge is x=6
    let narrow = Board {
        height: 7,
        width: 7,
        food: vec![],
        snakes: vec![me.clone()],
        hazards: vec![],
    };
    let decision = bot.decide(&narrow, "me", &mut FixedChoice(0)).unwrap();
    assert_eq!(decision.evaluation.hazard_for(Direction::Right), Some(Hazard::OutOfBounds));

    // The same snake on a 19-wide board may keep going right
    let wide = Board {
        width: 19,
        height: 19,
        ..narrow.clone()
    };
    let decision = bot.decide(&wide, "me", &mut FixedChoice(0)).unwrap();
    assert!(decision.evaluation.safe.contains(&Direction::Right));

    assert!(bot.get_move(&game, &1, &wide, &me).is_ok());
}

#[test]
fn test_unknown_you_is_rejected() {
    let bot = Bot::new(Config::default_hardcoded());
    let game = Game {
        id: "ghost".to_string(),
        ruleset: HashMap::new(),
        timeout: 500,
        source: String::new(),
    };
    let board = Board {
        height: 11,
        width: 11,
        food: vec![],
        snakes: vec![battlesnake("other", vec![c(1, 1), c(1, 0)])],
        hazards: vec![],
    };
    let you = battlesnake("me", vec![c(5, 5), c(5, 4)]);

    assert_eq!(
        bot.get_move(&game, &0, &board, &you).unwrap_err(),
        MoveError::UnknownAgent("me".to_string())
    );
}

#[test]
fn test_info_reports_configured_appearance() {
    let bot = Bot::new(Config::default_hardcoded());
    let info = bot.info();
    assert_eq!(info["apiversion"], "1");
    assert_eq!(info["color"], "#3E8E41");
}
