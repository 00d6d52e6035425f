// Library exports for the Battlesnake bot
// The HTTP server, the replay tool and the integration tests all share this core

pub mod board;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod replay;
pub mod selector;
pub mod types;
