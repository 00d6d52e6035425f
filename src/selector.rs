// Move selection: one ply of safety evaluation followed by a random pick
//
// The selector never looks further ahead than the next head position. Every
// candidate direction is checked against the board edges, all body segments
// and any head-on contest it would lose. The final pick is drawn from the
// first non-empty pool in a fixed order of preference.

use log::debug;
use rand::Rng;

use crate::board::Snapshot;
use crate::error::MoveError;
use crate::types::{Coord, Direction};

static ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Source of randomness for breaking ties between candidate moves
///
/// Implementations return an index in `0..len`; `len` is never zero.
/// Every `rand::Rng` is a `ChoiceSource`, so production code passes
/// `rand::rng()` while tests can script the exact sequence of picks.
pub trait ChoiceSource {
    fn choose_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> ChoiceSource for R {
    fn choose_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Why a candidate direction was judged fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    OutOfBounds,
    BodyCollision,
    LosingHeadToHead,
}

impl Hazard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hazard::OutOfBounds => "out of bounds",
            Hazard::BodyCollision => "body collision",
            Hazard::LosingHeadToHead => "losing head-to-head",
        }
    }
}

/// Pool a decision was drawn from, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Moves with no predicted hazard
    Safe,
    /// Every move except stepping back onto the neck
    NonReversal,
    /// All four directions
    Any,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Safe => "safe",
            Tier::NonReversal => "non-reversal fallback",
            Tier::Any => "full fallback",
        }
    }
}

/// Classification of every candidate for one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEvaluation {
    /// Candidates left after removing the step back onto the neck
    pub non_reversal: Vec<Direction>,
    /// Subset of `non_reversal` with no hazard
    pub safe: Vec<Direction>,
    /// Remaining members of `non_reversal`, each with the first hazard found
    pub hazards: Vec<(Direction, Hazard)>,
}

impl MoveEvaluation {
    /// Candidate pools in the order they are tried
    pub fn candidate_pools(&self) -> [(Tier, &[Direction]); 3] {
        [
            (Tier::Safe, self.safe.as_slice()),
            (Tier::NonReversal, self.non_reversal.as_slice()),
            (Tier::Any, &ALL_DIRECTIONS[..]),
        ]
    }

    /// First non-empty pool
    pub fn selection_pool(&self) -> (Tier, &[Direction]) {
        self.candidate_pools()
            .into_iter()
            .find(|(_, pool)| !pool.is_empty())
            .unwrap_or((Tier::Any, &ALL_DIRECTIONS[..]))
    }

    pub fn hazard_for(&self, direction: Direction) -> Option<Hazard> {
        self.hazards
            .iter()
            .find(|(dir, _)| *dir == direction)
            .map(|(_, hazard)| *hazard)
    }
}

/// A chosen move together with how it was reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub tier: Tier,
    pub evaluation: MoveEvaluation,
}

/// Stateless one-ply move selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSelector {
    equal_length_head_to_head_is_loss: bool,
    contest_opponent_reach: bool,
}

impl Default for MoveSelector {
    fn default() -> Self {
        MoveSelector::new(true, true)
    }
}

impl MoveSelector {
    /// # Arguments
    /// * `equal_length_head_to_head_is_loss` - treat a head-on contest
    ///   against an opponent of the same length as fatal
    /// * `contest_opponent_reach` - also contest the cells an opponent head
    ///   can step into this turn, not only the cell it occupies now
    pub fn new(equal_length_head_to_head_is_loss: bool, contest_opponent_reach: bool) -> Self {
        MoveSelector {
            equal_length_head_to_head_is_loss,
            contest_opponent_reach,
        }
    }

    fn contests(&self, opponent_head: &Coord, next: &Coord) -> bool {
        let distance = (opponent_head.x - next.x).abs() + (opponent_head.y - next.y).abs();
        distance == 0 || (self.contest_opponent_reach && distance == 1)
    }

    /// Candidates that do not step back onto the controlled agent's neck
    pub fn non_reversal_moves(snapshot: &Snapshot) -> Result<Vec<Direction>, MoveError> {
        let you = snapshot.you();
        let head = snapshot.head_of(you)?;
        let reversal = snapshot
            .neck_of(you)?
            .and_then(|neck| Direction::towards(&head, &neck));

        Ok(Direction::all()
            .into_iter()
            .filter(|dir| Some(*dir) != reversal)
            .collect())
    }

    /// Returns the first hazard that makes moving onto `next` fatal
    pub fn classify(&self, snapshot: &Snapshot, next: &Coord) -> Result<Option<Hazard>, MoveError> {
        if !snapshot.is_in_bounds(next) {
            return Ok(Some(Hazard::OutOfBounds));
        }

        let every_head: Vec<&str> = snapshot.agents().iter().map(|a| a.id.as_str()).collect();
        if snapshot.is_occupied(next, &every_head) {
            return Ok(Some(Hazard::BodyCollision));
        }

        let you = snapshot.you();
        let our_length = snapshot.agent_length(you)?;
        let loses_head_on = snapshot
            .agents()
            .iter()
            .filter(|agent| agent.id != you && self.contests(&agent.head(), next))
            .any(|opponent| {
                our_length < opponent.len()
                    || (self.equal_length_head_to_head_is_loss && our_length == opponent.len())
            });

        if loses_head_on {
            return Ok(Some(Hazard::LosingHeadToHead));
        }

        Ok(None)
    }

    /// Splits the non-reversal candidates into safe and hazardous moves
    pub fn evaluate(&self, snapshot: &Snapshot) -> Result<MoveEvaluation, MoveError> {
        let head = snapshot.head_of(snapshot.you())?;
        let non_reversal = Self::non_reversal_moves(snapshot)?;

        let mut safe = Vec::with_capacity(non_reversal.len());
        let mut hazards = Vec::new();

        for &dir in &non_reversal {
            match self.classify(snapshot, &dir.apply(&head))? {
                Some(hazard) => {
                    debug!("Rejecting {}: {}", dir, hazard.as_str());
                    hazards.push((dir, hazard));
                }
                None => safe.push(dir),
            }
        }

        Ok(MoveEvaluation {
            non_reversal,
            safe,
            hazards,
        })
    }

    /// Evaluates the snapshot and draws one move from the first non-empty pool
    pub fn decide<R: ChoiceSource + ?Sized>(
        &self,
        snapshot: &Snapshot,
        rng: &mut R,
    ) -> Result<Decision, MoveError> {
        let evaluation = self.evaluate(snapshot)?;
        let (tier, pool) = evaluation.selection_pool();
        let direction = pool[rng.choose_index(pool.len()) % pool.len()];

        Ok(Decision {
            direction,
            tier,
            evaluation,
        })
    }

    pub fn select_move<R: ChoiceSource + ?Sized>(
        &self,
        snapshot: &Snapshot,
        rng: &mut R,
    ) -> Result<Direction, MoveError> {
        self.decide(snapshot, rng).map(|decision| decision.direction)
    }
}
