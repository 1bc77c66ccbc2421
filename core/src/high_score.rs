// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted best score for the scored variant

use crate::Article;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the high score inside the data directory
pub const HIGH_SCORE_FILE: &str = "high_score.json";

/// The best finished game so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u32,
    pub clicks: u32,
    pub elapsed_secs: u64,
    pub start: Article,
    pub target: Article,
    pub achieved_at: DateTime<Utc>,
}

/// On-disk shape; a bare number is what older builds wrote
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredHighScore {
    Record(HighScoreRecord),
    Bare(u32),
}

/// Storage for the single high score
pub trait HighScoreStore: Send {
    /// The stored best score, 0 when nothing was stored yet
    fn best_score(&self) -> Result<u32>;

    /// The full stored record, if one with details exists
    fn record(&self) -> Result<Option<HighScoreRecord>>;

    /// Replace the stored record
    fn save(&mut self, record: &HighScoreRecord) -> Result<()>;

    /// Store `record` only if it beats the current best; returns whether it did
    fn submit(&mut self, record: &HighScoreRecord) -> Result<bool> {
        if record.score > self.best_score()? {
            self.save(record)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// High score kept in memory for the life of the process
#[derive(Debug, Default, Clone)]
pub struct MemoryHighScoreStore {
    record: Option<HighScoreRecord>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn best_score(&self) -> Result<u32> {
        Ok(self.record.as_ref().map_or(0, |r| r.score))
    }

    fn record(&self) -> Result<Option<HighScoreRecord>> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<()> {
        self.record = Some(record.clone());
        Ok(())
    }
}

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_high_score_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<StoredHighScore>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score file: {}", self.path.display()))?;

        match serde_json::from_str::<StoredHighScore>(&content) {
            Ok(stored) => Ok(Some(stored)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unreadable high score file"
                );
                Ok(None)
            }
        }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn best_score(&self) -> Result<u32> {
        Ok(match self.load()? {
            Some(StoredHighScore::Record(record)) => record.score,
            Some(StoredHighScore::Bare(score)) => score,
            None => 0,
        })
    }

    fn record(&self) -> Result<Option<HighScoreRecord>> {
        Ok(match self.load()? {
            Some(StoredHighScore::Record(record)) => Some(record),
            _ => None,
        })
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let json = serde_json::to_string_pretty(&StoredHighScore::Record(record.clone()))
            .context("Failed to serialize high score")?;

        // Temporary file for atomic write
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| HIGH_SCORE_FILE.to_string());
        let tmp_path = dir.join(format!(".tmp_{}", file_name));
        {
            let mut file = std::fs::File::create(&tmp_path)
                .context("Failed to create temporary file")?;
            file.write_all(json.as_bytes())
                .context("Failed to write high score")?;
            file.flush().context("Failed to flush file buffer")?;
        }

        std::fs::rename(&tmp_path, &self.path)
            .context("Failed to rename temporary file")?;

        tracing::info!(score = record.score, path = %self.path.display(), "Saved high score");
        Ok(())
    }
}

/// `<data dir>/high_score.json` for this platform
pub fn default_high_score_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "wikirace", "wikirace")
        .context("Failed to determine data directory")?;
    Ok(proj_dirs.data_dir().join(HIGH_SCORE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: u32) -> HighScoreRecord {
        HighScoreRecord {
            score,
            clicks: 3,
            elapsed_secs: 20,
            start: Article::new("Japan"),
            target: Article::new("Jupiter"),
            achieved_at: Utc::now(),
        }
    }

    #[test]
    fn memory_store_keeps_only_improvements() {
        let mut store = MemoryHighScoreStore::new();
        assert_eq!(store.best_score().unwrap(), 0);

        assert!(store.submit(&record(500)).unwrap());
        assert!(!store.submit(&record(500)).unwrap());
        assert!(!store.submit(&record(100)).unwrap());
        assert!(store.submit(&record(900)).unwrap());
        assert_eq!(store.best_score().unwrap(), 900);
    }

    #[test]
    fn zero_never_beats_an_empty_store() {
        let mut store = MemoryHighScoreStore::new();
        assert!(!store.submit(&record(0)).unwrap());
        assert_eq!(store.record().unwrap(), None);
    }

    #[test]
    fn file_store_round_trips_and_reads_bare_numbers() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("high_score.json");
        let mut store = FileHighScoreStore::new(&path);
        assert_eq!(store.best_score()?, 0);

        std::fs::write(&path, "4200")?;
        assert_eq!(store.best_score()?, 4200);
        assert_eq!(store.record()?, None);
        assert!(!store.submit(&record(4000))?);

        let better = record(7000);
        assert!(store.submit(&better)?);
        assert_eq!(store.record()?, Some(better));
        Ok(())
    }

    #[test]
    fn corrupt_file_counts_as_no_high_score() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("high_score.json");
        std::fs::write(&path, "{ not json")?;

        let mut store = FileHighScoreStore::new(&path);
        assert_eq!(store.best_score()?, 0);
        assert!(store.submit(&record(10))?);
        assert_eq!(store.best_score()?, 10);
        Ok(())
    }
}
