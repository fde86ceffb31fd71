use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::needs::NeedsAnalyzer;
use crate::position::Position;
use crate::records::{PlayerRecord, TeamRecord};
use crate::scorer::{PositionalAverages, positional_averages};

#[derive(Debug)]
pub struct Dataset {
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub players: Vec<PlayerRecord>,
    pub teams: Vec<TeamRecord>,
    pub averages: HashMap<Position, PositionalAverages>,
    pub needs: NeedsAnalyzer,
}

impl Dataset {
    pub fn new(version: u64, players: Vec<PlayerRecord>, teams: Vec<TeamRecord>) -> Self {
        let averages = positional_averages(&players);
        let needs = NeedsAnalyzer::new(&teams);
        Self {
            version,
            loaded_at: Utc::now(),
            players,
            teams,
            averages,
            needs,
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "dataset v{} loaded {} ({} players, {} teams)",
            self.version,
            self.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.players.len(),
            self.teams.len()
        )
    }
}

#[derive(Debug)]
pub struct DatasetHandle {
    current: RwLock<Arc<Dataset>>,
    next_version: AtomicU64,
}

impl DatasetHandle {
    pub fn new(players: Vec<PlayerRecord>, teams: Vec<TeamRecord>) -> Self {
        Self {
            current: RwLock::new(Arc::new(Dataset::new(1, players, teams))),
            next_version: AtomicU64::new(2),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn current(&self) -> Arc<Dataset> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install a new snapshot and return the one it replaced.
    pub fn replace(&self, players: Vec<PlayerRecord>, teams: Vec<TeamRecord>) -> Arc<Dataset> {
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        let next = Arc::new(Dataset::new(version, players, teams));
        info!(
            version,
            players = next.players.len(),
            teams = next.teams.len(),
            "swapping dataset snapshot"
        );
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readers_keep_their_snapshot_across_a_swap() {
        let handle = DatasetHandle::new(vec![PlayerRecord::new("Old", "C", "ST")], Vec::new());
        let before = handle.current();
        let replaced = handle.replace(
            vec![
                PlayerRecord::new("New", "C", "ST"),
                PlayerRecord::new("New2", "C", "GK"),
            ],
            vec![TeamRecord::new("T", 1.0, 2.0, 0.5, 3.0, 4.0)],
        );
        assert!(Arc::ptr_eq(&before, &replaced));
        assert_eq!(before.players.len(), 1);

        let after = handle.current();
        assert_eq!(after.players.len(), 2);
        assert!(after.version > before.version);
        assert_eq!(after.needs.needs().len(), 1);
        assert!(after.averages.contains_key(&Position::Goalkeeper));
        assert!(after.loaded_at >= before.loaded_at);
    }

    #[test]
    fn describe_reports_version_and_load_time() {
        let dataset = Dataset::new(3, vec![PlayerRecord::new("A", "C", "ST")], Vec::new());
        let line = dataset.describe();
        assert!(line.starts_with("dataset v3 loaded "));
        assert!(line.contains(&dataset.loaded_at.format("%Y-%m-%d").to_string()));
        assert!(line.ends_with("(1 players, 0 teams)"));
    }
}
