//! Batch sessions
//!
//! A session runs batches of independent lives and keeps every summary it
//! produced so the whole session can be saved as one text file. Each life
//! gets its own seed derived from the session's master seed, so a session is
//! reproducible and any single life can be re-run in isolation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use super::format_summary;
use crate::models::Person;
use crate::rng::{derive_seed, RngManager};
use crate::simulator::{LifeSimulator, SimulationError, SimulatorConfig};
use crate::tables::ParameterTables;

/// Width of the `=` rule between lives
pub const SEPARATOR_WIDTH: usize = 80;

/// Text placed between consecutive summaries
pub fn session_separator() -> String {
    format!("\n{}\n\n", "=".repeat(SEPARATOR_WIDTH))
}

/// Errors saving a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to write session to {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// History of simulated lives
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    tables: Arc<ParameterTables>,
    master_seed: u64,
    lives_run: u64,
    summaries: Vec<String>,
    last_batch_start: usize,
}

impl Session {
    pub fn new(tables: Arc<ParameterTables>, master_seed: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            tables,
            master_seed,
            lives_run: 0,
            summaries: Vec::new(),
            last_batch_start: 0,
        }
    }

    /// Session over tables loaded from configuration
    pub fn from_config(config: &SimulatorConfig) -> Self {
        let simulator = LifeSimulator::from_config(config);
        Self::new(Arc::clone(simulator.tables()), config.rng_seed)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Seed used for the `index`-th life of this session
    pub fn seed_for(&self, index: u64) -> u64 {
        derive_seed(self.master_seed, index)
    }

    /// Simulate `count` lives (at least one) and record their summaries
    pub fn run_batch(&mut self, count: usize) -> Result<Vec<Person>, SimulationError> {
        let count = count.max(1);
        self.last_batch_start = self.summaries.len();

        let mut people = Vec::with_capacity(count);
        for _ in 0..count {
            let seed = self.seed_for(self.lives_run);
            let mut simulator =
                LifeSimulator::with_rng(Arc::clone(&self.tables), RngManager::new(seed));
            let person = simulator.simulate_life()?;

            self.summaries.push(format_summary(&person));
            self.lives_run += 1;
            people.push(person);
        }

        info!(session = %self.id, lives = count, total = self.lives_run, "Batch complete");
        Ok(people)
    }

    /// Summaries of the most recent batch, separated and trimmed for display
    pub fn latest_batch_text(&self) -> String {
        self.summaries[self.last_batch_start..]
            .join(&session_separator())
            .trim()
            .to_string()
    }

    /// Every summary in this session, oldest first
    pub fn summaries(&self) -> &[String] {
        &self.summaries
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Whole session as saved to disk
    pub fn render(&self) -> String {
        self.summaries.join(&session_separator())
    }

    /// Write the session to `path`
    ///
    /// Returns the number of lives written. An empty session writes nothing.
    /// A failed write leaves the in-memory session untouched.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize, SessionError> {
        if self.summaries.is_empty() {
            return Ok(0);
        }
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(session = %self.id, path = %path.display(), lives = self.summaries.len(), "Session saved");
        Ok(self.summaries.len())
    }
}
