// Board model: an immutable, per-turn snapshot of the game board
//
// A snapshot is built fresh from each move request and only answers
// read-only positional queries. Dimensions travel with the snapshot so no
// two decisions ever share board state.

use std::collections::HashSet;

use crate::error::MoveError;
use crate::types::{Board, Coord, GameState};

/// Width and height of the board, both strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardDimensions {
    pub width: i32,
    pub height: i32,
}

impl BoardDimensions {
    pub fn new(width: i32, height: i32) -> Self {
        BoardDimensions { width, height }
    }
}

/// One snake on the board, body ordered head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: String,
    pub body: Vec<Coord>,
}

impl Agent {
    pub fn new(id: impl Into<String>, body: Vec<Coord>) -> Self {
        Agent { id: id.into(), body }
    }

    pub fn head(&self) -> Coord {
        self.body[0]
    }

    /// Second body segment, absent for a length-1 agent
    pub fn neck(&self) -> Option<Coord> {
        self.body.get(1).copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Immutable capture of the whole board for a single decision
#[derive(Debug, Clone)]
pub struct Snapshot {
    dimensions: BoardDimensions,
    agents: Vec<Agent>,
    you: String,
}

impl Snapshot {
    /// Builds a validated snapshot
    ///
    /// # Errors
    /// * `MalformedSnapshot` - non-positive dimensions, an empty body, or a
    ///   repeated agent id
    /// * `UnknownAgent` - `you` does not name any of the agents
    pub fn new(
        dimensions: BoardDimensions,
        agents: Vec<Agent>,
        you: impl Into<String>,
    ) -> Result<Self, MoveError> {
        let you = you.into();

        if dimensions.width <= 0 || dimensions.height <= 0 {
            return Err(MoveError::MalformedSnapshot(format!(
                "board dimensions must be positive, got {}x{}",
                dimensions.width, dimensions.height
            )));
        }

        let mut seen = HashSet::new();
        for agent in &agents {
            if agent.is_empty() {
                return Err(MoveError::MalformedSnapshot(format!(
                    "agent '{}' has no body segments",
                    agent.id
                )));
            }
            if !seen.insert(agent.id.as_str()) {
                return Err(MoveError::MalformedSnapshot(format!(
                    "agent '{}' appears more than once",
                    agent.id
                )));
            }
        }

        if !seen.contains(you.as_str()) {
            return Err(MoveError::UnknownAgent(you));
        }

        Ok(Snapshot {
            dimensions,
            agents,
            you,
        })
    }

    /// Builds a snapshot from a `/move` request body
    pub fn from_game_state(state: &GameState) -> Result<Self, MoveError> {
        Self::from_board(&state.board, &state.you.id)
    }

    /// Builds a snapshot of `board` controlled by the snake `you_id`
    pub fn from_board(board: &Board, you_id: &str) -> Result<Self, MoveError> {
        let agents = board
            .snakes
            .iter()
            .map(|snake| Agent::new(snake.id.clone(), snake.body.clone()))
            .collect();

        Snapshot::new(
            BoardDimensions::new(board.width, board.height),
            agents,
            you_id,
        )
    }

    pub fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Identity of the controlled agent
    pub fn you(&self) -> &str {
        &self.you
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: &str) -> Result<&Agent, MoveError> {
        self.agents
            .iter()
            .find(|agent| agent.id == id)
            .ok_or_else(|| MoveError::UnknownAgent(id.to_string()))
    }

    pub fn head_of(&self, id: &str) -> Result<Coord, MoveError> {
        self.agent(id).map(Agent::head)
    }

    pub fn neck_of(&self, id: &str) -> Result<Option<Coord>, MoveError> {
        self.agent(id).map(Agent::neck)
    }

    pub fn agent_length(&self, id: &str) -> Result<usize, MoveError> {
        self.agent(id).map(Agent::len)
    }

    /// True iff `0 <= x < width` and `0 <= y < height`
    pub fn is_in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0
            && coord.x < self.dimensions.width
            && coord.y >= 0
            && coord.y < self.dimensions.height
    }

    /// Checks whether any body segment covers `coord`
    ///
    /// Only the head segment (index 0) of each agent listed in
    /// `exclude_head_of` is skipped; the rest of that agent's body, tail
    /// included, still counts as occupied.
    pub fn is_occupied(&self, coord: &Coord, exclude_head_of: &[&str]) -> bool {
        self.agents.iter().any(|agent| {
            let skip = usize::from(exclude_head_of.contains(&agent.id.as_str()));
            agent.body.iter().skip(skip).any(|segment| segment == coord)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::new(
            BoardDimensions::new(11, 11),
            vec![
                Agent::new(
                    "me",
                    vec![Coord::new(5, 5), Coord::new(5, 4), Coord::new(5, 3)],
                ),
                Agent::new("solo", vec![Coord::new(0, 0)]),
            ],
            "me",
        )
        .unwrap()
    }

    #[test]
    fn test_head_and_neck_lookup() {
        let snap = snapshot();
        assert_eq!(snap.head_of("me").unwrap(), Coord::new(5, 5));
        assert_eq!(snap.neck_of("me").unwrap(), Some(Coord::new(5, 4)));
        assert_eq!(snap.neck_of("solo").unwrap(), None);
        assert_eq!(snap.agent_length("me").unwrap(), 3);
    }

    #[test]
    fn test_unknown_agent_lookup_fails() {
        let snap = snapshot();
        assert_eq!(
            snap.head_of("ghost"),
            Err(MoveError::UnknownAgent("ghost".to_string()))
        );
    }

    #[test]
    fn test_bounds() {
        let snap = snapshot();
        assert!(snap.is_in_bounds(&Coord::new(0, 0)));
        assert!(snap.is_in_bounds(&Coord::new(10, 10)));
        assert!(!snap.is_in_bounds(&Coord::new(-1, 5)));
        assert!(!snap.is_in_bounds(&Coord::new(5, 11)));
        assert!(!snap.is_in_bounds(&Coord::new(11, 0)));
    }

    #[test]
    fn test_occupancy_excludes_only_listed_heads() {
        let snap = snapshot();
        assert!(snap.is_occupied(&Coord::new(5, 5), &[]));
        assert!(!snap.is_occupied(&Coord::new(5, 5), &["me"]));
        // Tail stays occupied even when the head is excluded
        assert!(snap.is_occupied(&Coord::new(5, 3), &["me"]));
        assert!(snap.is_occupied(&Coord::new(0, 0), &["me"]));
        assert!(!snap.is_occupied(&Coord::new(0, 0), &["me", "solo"]));
        assert!(!snap.is_occupied(&Coord::new(7, 7), &[]));
    }

    #[test]
    fn test_missing_you_is_unknown_agent() {
        let result = Snapshot::new(
            BoardDimensions::new(11, 11),
            vec![Agent::new("other", vec![Coord::new(1, 1)])],
            "me",
        );
        assert_eq!(result.unwrap_err(), MoveError::UnknownAgent("me".to_string()));
    }

    #[test]
    fn test_malformed_snapshots_rejected() {
        let zero_width = Snapshot::new(
            BoardDimensions::new(0, 11),
            vec![Agent::new("me", vec![Coord::new(0, 0)])],
            "me",
        );
        assert!(matches!(zero_width, Err(MoveError::MalformedSnapshot(_))));

        let empty_body = Snapshot::new(
            BoardDimensions::new(11, 11),
            vec![Agent::new("me", vec![])],
            "me",
        );
        assert!(matches!(empty_body, Err(MoveError::MalformedSnapshot(_))));

        let duplicate = Snapshot::new(
            BoardDimensions::new(11, 11),
            vec![
                Agent::new("me", vec![Coord::new(0, 0)]),
                Agent::new("me", vec![Coord::new(3, 3)]),
            ],
            "me",
        );
        assert!(matches!(duplicate, Err(MoveError::MalformedSnapshot(_))));
    }
}
