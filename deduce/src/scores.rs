//! High scores, kept as a single JSON array in a key-value store

use std::fs;
use std::path::PathBuf;

use scribe::Statistics;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::SystemTime;

/// The key all high scores are stored under
pub const HIGH_SCORES_KEY: &str = "typing-high-scores";

/// Longest accepted player name, in characters
pub const MAX_NAME_LENGTH: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Please enter a name")]
    Empty,

    #[error("Names can be at most {MAX_NAME_LENGTH} characters long")]
    TooLong,
}

/// A validated player name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    /// Trims `name` and checks that something between 1 and 20 characters is left
    pub fn parse(name: &str) -> Result<Self, NameError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(NameError::Empty);
        }

        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(NameError::TooLong);
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScore {
    pub id: String,
    pub player_name: String,
    pub wpm: u32,
    pub accuracy: u32,
    /// Unix timestamp in milliseconds
    pub date: u64,
    pub challenge_id: String,
}

impl HighScore {
    pub fn new(
        name: PlayerName,
        statistics: &Statistics,
        challenge_id: &str,
        now: SystemTime,
    ) -> Self {
        let date = now
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        Self {
            id: date.to_string(),
            player_name: name.0,
            wpm: statistics.wpm,
            accuracy: statistics.accuracy,
            date,
            challenge_id: challenge_id.to_string(),
        }
    }

    /// When the score was set
    pub fn timestamp(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + web_time::Duration::from_millis(self.date)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create data directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to write '{key}': {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize high scores: {0}")]
    Serialize(serde_json::Error),
}

/// Persistent string storage
pub trait KeyValueStore {
    /// The value stored under `key`, or `None` if there is none or it can't be read
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores every key as `<key>.json` in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: PathBuf) -> Result<Self, StoreError> {
        if !directory.exists() {
            fs::create_dir_all(&directory).map_err(StoreError::CreateDirectory)?;
        }
        Ok(Self { directory })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => None,
            Err(error) => {
                log::warn!("Failed to read {}: {error}", path.display());
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path(key), value).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })
    }
}

/// Keeps values in memory for the lifetime of the store
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Every saved high score, best first
#[derive(Debug)]
pub struct ScoreBoard<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ScoreBoard<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// All saved scores
    ///
    /// Missing or malformed data reads as an empty board.
    pub fn all(&self) -> Vec<HighScore> {
        let Some(json) = self.store.get(HIGH_SCORES_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(&json).unwrap_or_else(|error| {
            log::warn!("Ignoring malformed high scores: {error}");
            Vec::new()
        })
    }

    /// Add a score, keeping the board sorted by words per minute
    pub fn save(&self, score: HighScore) -> Result<(), StoreError> {
        let mut scores = self.all();
        log::info!(
            "Saving high score of {} wpm for '{}' on '{}'",
            score.wpm,
            score.player_name,
            score.challenge_id
        );

        scores.push(score);
        // Stable, so earlier scores win ties
        scores.sort_by(|a, b| b.wpm.cmp(&a.wpm));

        let json = serde_json::to_string(&scores).map_err(StoreError::Serialize)?;
        self.store.set(HIGH_SCORES_KEY, &json)
    }

    pub fn for_challenge(&self, challenge_id: &str) -> Vec<HighScore> {
        self.all()
            .into_iter()
            .filter(|score| score.challenge_id == challenge_id)
            .collect()
    }

    /// The `n` fastest scores
    pub fn top(&self, n: usize) -> Vec<HighScore> {
        let mut scores = self.all();
        scores.sort_by(|a, b| b.wpm.cmp(&a.wpm));
        scores.truncate(n);
        scores
    }

    /// The `n` newest scores
    pub fn recent(&self, n: usize) -> Vec<HighScore> {
        let mut scores = self.all();
        scores.sort_by(|a, b| b.date.cmp(&a.date));
        scores.truncate(n);
        scores
    }
}

#[cfg(test)]
mod tests {
    use scribe::Counters;
    use web_time::Duration;

    use super::*;

    fn score(name: &str, wpm: u32, date: u64, challenge_id: &str) -> HighScore {
        HighScore {
            id: date.to_string(),
            player_name: name.to_string(),
            wpm,
            accuracy: 100,
            date,
            challenge_id: challenge_id.to_string(),
        }
    }

    #[test]
    fn test_player_name() {
        assert_eq!(PlayerName::parse("  Watson ").unwrap().as_str(), "Watson");
        assert_eq!(PlayerName::parse(""), Err(NameError::Empty));
        assert_eq!(PlayerName::parse("   "), Err(NameError::Empty));
        assert!(PlayerName::parse(&"a".repeat(20)).is_ok());
        assert_eq!(PlayerName::parse(&"a".repeat(21)), Err(NameError::TooLong));
        // Characters, not bytes
        assert!(PlayerName::parse(&"é".repeat(20)).is_ok());
    }

    #[test]
    fn test_high_score_from_statistics() {
        let statistics = Statistics::new(
            Counters {
                correct: 250,
                incorrect: 10,
                total: 260,
            },
            None,
            None,
        );
        let now = SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);

        let score = HighScore::new(
            PlayerName::parse("Holmes").unwrap(),
            &statistics,
            "beginner-1",
            now,
        );

        assert_eq!(score.id, "1700000000123");
        assert_eq!(score.date, 1_700_000_000_123);
        assert_eq!(score.player_name, "Holmes");
        assert_eq!(score.accuracy, statistics.accuracy);
        assert_eq!(score.challenge_id, "beginner-1");
        assert_eq!(score.timestamp(), now);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(score("Irene", 80, 5, "advanced-1")).unwrap();

        assert_eq!(json["playerName"], "Irene");
        assert_eq!(json["challengeId"], "advanced-1");
        assert_eq!(json["wpm"], 80);
        assert_eq!(json["date"], 5);
    }

    #[test]
    fn test_empty_board() {
        let board = ScoreBoard::new(MemoryStore::default());
        assert!(board.all().is_empty());
        assert!(board.top(5).is_empty());
    }

    #[test]
    fn test_malformed_data_reads_as_empty() {
        let store = MemoryStore::default();
        store.set(HIGH_SCORES_KEY, "{not json").unwrap();
        let board = ScoreBoard::new(store);

        assert!(board.all().is_empty());

        // Saving replaces the malformed data
        board.save(score("Lestrade", 30, 1, "beginner-1")).unwrap();
        assert_eq!(board.all().len(), 1);
    }

    #[test]
    fn test_save_sorts_by_wpm() {
        let board = ScoreBoard::new(MemoryStore::default());
        board.save(score("Watson", 40, 1, "beginner-1")).unwrap();
        board.save(score("Holmes", 90, 2, "beginner-2")).unwrap();
        board.save(score("Hudson", 60, 3, "beginner-1")).unwrap();

        let wpm: Vec<_> = board.all().iter().map(|score| score.wpm).collect();
        assert_eq!(wpm, [90, 60, 40]);
    }

    #[test]
    fn test_queries() {
        let board = ScoreBoard::new(MemoryStore::default());
        board.save(score("Watson", 40, 1, "beginner-1")).unwrap();
        board.save(score("Holmes", 90, 2, "beginner-2")).unwrap();
        board.save(score("Hudson", 60, 3, "beginner-1")).unwrap();

        let names = |scores: Vec<HighScore>| -> Vec<String> {
            scores.into_iter().map(|score| score.player_name).collect()
        };

        assert_eq!(names(board.for_challenge("beginner-1")), ["Hudson", "Watson"]);
        assert!(board.for_challenge("advanced-5").is_empty());
        assert_eq!(names(board.top(2)), ["Holmes", "Hudson"]);
        assert_eq!(names(board.recent(2)), ["Hudson", "Holmes"]);
        assert_eq!(board.top(10).len(), 3);
    }

    #[test]
    fn test_file_store() {
        let directory = tempfile::tempdir().unwrap();
        let store = FileStore::new(directory.path().join("data")).unwrap();

        assert_eq!(store.get("missing"), None);

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").as_deref(), Some("value"));
        assert!(directory.path().join("data").join("key.json").exists());
    }

    #[test]
    fn test_board_persists_between_stores() {
        let directory = tempfile::tempdir().unwrap();

        let board = ScoreBoard::new(FileStore::new(directory.path().to_path_buf()).unwrap());
        board.save(score("Mycroft", 70, 1, "advanced-3")).unwrap();

        let reopened = ScoreBoard::new(FileStore::new(directory.path().to_path_buf()).unwrap());
        assert_eq!(reopened.all(), [score("Mycroft", 70, 1, "advanced-3")]);
    }
}
