// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The bot turns each move request into an immutable board snapshot, asks the
// selector for a single safe-as-possible step, and reports the result.
// For more info see docs.battlesnake.com

use log::{debug, info};
use serde_json::{json, Value};

use crate::board::Snapshot;
use crate::config::Config;
use crate::debug_logger::{DebugLogEntry, DebugLogger};
use crate::error::MoveError;
use crate::selector::{ChoiceSource, Decision, MoveSelector};
use crate::types::{Battlesnake, Board, Game};

/// Request-level entry point shared by all HTTP handlers
///
/// Holds only immutable configuration, so a single instance can serve
/// concurrent games without coordination.
pub struct Bot {
    config: Config,
    selector: MoveSelector,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, DebugLogger::disabled())
    }

    pub fn with_logger(config: Config, debug_logger: DebugLogger) -> Self {
        let selector = config.rules.selector();
        Bot {
            config,
            selector,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": appearance.version,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, _you: &Battlesnake) {
        info!(
            "{} GAME START ({}x{}, {} snakes)",
            game.id,
            board.width,
            board.height,
            board.snakes.len()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("{} GAME OVER after turn {}", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Returns
    /// * `Ok(Value)` - JSON response containing the chosen move direction
    /// * `Err(MoveError)` - `you` is not on the board, or the board is malformed
    pub fn get_move(
        &self,
        game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Result<Value, MoveError> {
        let mut rng = rand::rng();
        self.get_move_with(game, turn, board, you, &mut rng)
    }

    /// Same as `get_move` but draws tie-breaks from the given source
    pub fn get_move_with<R: ChoiceSource + ?Sized>(
        &self,
        game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
        rng: &mut R,
    ) -> Result<Value, MoveError> {
        let decision = self.decide(board, &you.id, rng)?;

        info!(
            "{} MOVE {}: {} picked from {} options {:?}",
            game.id,
            turn,
            decision.direction,
            decision.tier.as_str(),
            decision.evaluation.safe
        );

        if self.debug_logger.is_enabled() {
            self.debug_logger.log_move(DebugLogEntry::new(
                *turn,
                &game.id,
                &you.id,
                decision.direction,
                board.clone(),
            ));
        }

        Ok(json!({ "move": decision.direction.as_str() }))
    }

    /// Builds the snapshot for `you_id` and runs the selector on it
    pub fn decide<R: ChoiceSource + ?Sized>(
        &self,
        board: &Board,
        you_id: &str,
        rng: &mut R,
    ) -> Result<Decision, MoveError> {
        let snapshot = Snapshot::from_board(board, you_id)?;
        debug!("Board size = {}x{}", board.width, board.height);

        self.selector.decide(&snapshot, rng)
    }
}
