// Replay module for auditing logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the safety classification on each logged board
// 3. Check that every logged move came from the pool the selector should use
// 4. Summarize the findings

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::board::Snapshot;
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::selector::{MoveSelector, Tier};
use crate::types::Direction;

/// Result of replaying a single turn
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayResult {
    pub turn: i32,
    pub logged_move: Direction,
    pub tier: Tier,
    pub pool: Vec<Direction>,
    /// Logged move belongs to the first non-empty candidate pool
    pub consistent: bool,
}

/// Statistics for a complete replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub consistent: usize,
    pub inconsistent: usize,
    pub fallback_turns: usize,
    pub consistency_rate: f64,
}

/// Replay engine for auditing debug logs
pub struct ReplayEngine {
    selector: MoveSelector,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: &Config, verbose: bool) -> Self {
        ReplayEngine {
            selector: config.rules.selector(),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DebugLogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        Self::parse_log(BufReader::new(file))
    }

    /// Parses JSONL entries from any buffered reader, skipping blank lines
    pub fn parse_log<B: BufRead>(reader: B) -> Result<Vec<DebugLogEntry>, String> {
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DebugLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Re-evaluates a single log entry
    pub fn replay_entry(&self, entry: &DebugLogEntry) -> Result<ReplayResult, String> {
        let snapshot = Snapshot::from_board(&entry.board, &entry.you_id)
            .map_err(|e| format!("Turn {}: {}", entry.turn, e))?;
        let evaluation = self
            .selector
            .evaluate(&snapshot)
            .map_err(|e| format!("Turn {}: {}", entry.turn, e))?;

        let (tier, pool) = evaluation.selection_pool();
        let consistent = pool.contains(&entry.chosen_move);

        if self.verbose {
            if consistent {
                info!(
                    "Turn {}: ✓ {} drawn from {} pool {:?}",
                    entry.turn,
                    entry.chosen_move,
                    tier.as_str(),
                    pool
                );
            } else {
                warn!(
                    "Turn {}: ✗ {} is outside the {} pool {:?}",
                    entry.turn,
                    entry.chosen_move,
                    tier.as_str(),
                    pool
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            logged_move: entry.chosen_move,
            tier,
            pool: pool.to_vec(),
            consistent,
        })
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DebugLogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[DebugLogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            results.push(self.replay_entry(entry)?);
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let consistent = results.iter().filter(|r| r.consistent).count();
        let fallback_turns = results.iter().filter(|r| r.tier != Tier::Safe).count();
        let consistency_rate = if total_turns > 0 {
            (consistent as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            consistent,
            inconsistent: total_turns - consistent,
            fallback_turns,
            consistency_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(results: &[ReplayResult]) {
        let stats = Self::generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Consistent:     {} ({:.1}%)", stats.consistent, stats.consistency_rate);
        println!("Inconsistent:   {}", stats.inconsistent);
        println!("Fallback Turns: {}", stats.fallback_turns);
        println!("═══════════════════════════════════════════════════════════\n");

        let inconsistent: Vec<_> = results.iter().filter(|r| !r.consistent).collect();
        if !inconsistent.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                 INCONSISTENT DECISIONS");
            println!("═══════════════════════════════════════════════════════════");

            for result in inconsistent {
                println!(
                    "Turn {}: {} not in {} pool {:?}",
                    result.turn,
                    result.logged_move,
                    result.tier.as_str(),
                    result.pool.iter().map(|d| d.as_str()).collect::<Vec<_>>()
                );
            }
            println!();
        }
    }
}
