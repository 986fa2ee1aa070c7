//! Reading a data directory into a [`Catalog`].
//!
//! ## Layout
//!
//! ```text
//! data/
//!   tiles.json        grid boards        (required)
//!   boards.json       graph boards       (required)
//!   heroes.json       hero figures       (required)
//!   monsters.json     monster records    (required)
//!   mainQuests.json   main quests        (required)
//!   sideQuests.json   side quests        (optional)
//!   classes/*.json    class decks        (optional)
//! ```
//!
//! Every file holds a JSON array of records. A missing required file is
//! always an error. Anything else that goes wrong (unreadable file, bad
//! JSON, a record that doesn't fit its type) is handled per
//! [`LoadPolicy`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalog::Catalog;
use super::components::{Deck, GraphBoard, GridBoard, Token};
use super::monster::MonsterDefinition;
use super::quest::Quest;
use crate::error::{ConfigError, LoadError};

pub const TILES_FILE: &str = "tiles.json";
pub const BOARDS_FILE: &str = "boards.json";
pub const HEROES_FILE: &str = "heroes.json";
pub const MONSTERS_FILE: &str = "monsters.json";
pub const MAIN_QUESTS_FILE: &str = "mainQuests.json";
pub const SIDE_QUESTS_FILE: &str = "sideQuests.json";
pub const CLASSES_DIR: &str = "classes";

/// Files that must exist for a load to start.
pub const REQUIRED_FILES: [&str; 5] = [
    TILES_FILE,
    BOARDS_FILE,
    HEROES_FILE,
    MONSTERS_FILE,
    MAIN_QUESTS_FILE,
];

/// What to do with a file or record that can't be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPolicy {
    /// Stop at the first failure and return it.
    FailFast,
    /// Log the failure, keep it in the [`LoadReport`], carry on.
    #[default]
    SkipInvalid,
}

/// Loader settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub data_dir: PathBuf,
    #[serde(default)]
    pub policy: LoadPolicy,
}

impl LoaderConfig {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            policy: LoadPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.data_dir.is_dir() {
            return Err(ConfigError::MissingDataFile(self.data_dir.clone()));
        }
        Ok(())
    }
}

/// What a load read and what it skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub files_loaded: usize,
    pub records_loaded: usize,
    pub failures: Vec<LoadError>,
}

impl LoadReport {
    /// No file or record was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, policy: LoadPolicy, error: LoadError) -> Result<(), LoadError> {
        match policy {
            LoadPolicy::FailFast => Err(error),
            LoadPolicy::SkipInvalid => {
                warn!(%error, "skipping invalid content");
                self.failures.push(error);
                Ok(())
            }
        }
    }
}

/// Parse a JSON array of `T` records from `text`.
///
/// With [`LoadPolicy::SkipInvalid`] a record that doesn't deserialize is
/// skipped and recorded in `report`; a file that isn't a JSON array at all
/// is skipped whole and yields no records.
pub fn parse_records<T: DeserializeOwned>(
    path: &Path,
    text: &str,
    policy: LoadPolicy,
    report: &mut LoadReport,
) -> Result<Vec<T>, LoadError> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(text) {
        Ok(values) => values,
        Err(source) => {
            let error = LoadError::Json {
                path: path.to_path_buf(),
                source,
            };
            report.fail(policy, error)?;
            return Ok(Vec::new());
        }
    };

    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match T::deserialize(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                let error = LoadError::InvalidRecord {
                    path: path.to_path_buf(),
                    index,
                    reason: e.to_string(),
                };
                report.fail(policy, error)?;
            }
        }
    }

    report.files_loaded += 1;
    report.records_loaded += records.len();
    debug!(path = %path.display(), records = records.len(), "content file loaded");
    Ok(records)
}

/// Builds a [`Catalog`] from a data directory.
///
/// ## Example
///
/// ```no_run
/// use tabletop::content::{ContentLoader, LoadPolicy, LoaderConfig};
///
/// let config = LoaderConfig::new("data/descent").with_policy(LoadPolicy::FailFast);
/// let (catalog, report) = ContentLoader::new(config)?.load()?;
/// assert!(report.is_clean());
/// let quest = catalog.find_quest("First Blood");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ContentLoader {
    config: LoaderConfig,
}

impl ContentLoader {
    pub fn new(config: LoaderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read every file into a fresh catalog.
    pub fn load(&self) -> Result<(Catalog, LoadReport), LoadError> {
        let dir = &self.config.data_dir;
        for file in REQUIRED_FILES {
            let path = dir.join(file);
            if !path.is_file() {
                return Err(LoadError::MissingDataFile(path));
            }
        }

        let mut catalog = Catalog::new();
        let mut report = LoadReport::default();

        for board in self.read::<GridBoard>(&dir.join(TILES_FILE), &mut report)? {
            catalog.add_grid_board(board);
        }
        for board in self.read::<GraphBoard>(&dir.join(BOARDS_FILE), &mut report)? {
            catalog.add_graph_board(board);
        }
        for mut hero in self.read::<Token>(&dir.join(HEROES_FILE), &mut report)? {
            if hero.kind.is_empty() {
                hero.kind = "hero".to_string();
            }
            catalog.add_token(hero);
        }
        for monster in self.read::<MonsterDefinition>(&dir.join(MONSTERS_FILE), &mut report)? {
            catalog.add_monster(monster);
        }
        for quest in self.read::<Quest>(&dir.join(MAIN_QUESTS_FILE), &mut report)? {
            catalog.add_quest(quest);
        }

        let side_quests = dir.join(SIDE_QUESTS_FILE);
        if side_quests.is_file() {
            for quest in self.read::<Quest>(&side_quests, &mut report)? {
                catalog.add_side_quest(quest);
            }
        }

        for path in self.class_files(&mut report)? {
            for deck in self.read::<Deck>(&path, &mut report)? {
                catalog.add_deck(deck);
            }
        }

        debug!(
            files = report.files_loaded,
            records = report.records_loaded,
            skipped = report.failures.len(),
            "content loaded"
        );
        Ok((catalog, report))
    }

    fn read<T: DeserializeOwned>(
        &self,
        path: &Path,
        report: &mut LoadReport,
    ) -> Result<Vec<T>, LoadError> {
        match fs::read_to_string(path) {
            Ok(text) => parse_records(path, &text, self.config.policy, report),
            Err(source) => {
                let error = LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                };
                report.fail(self.config.policy, error)?;
                Ok(Vec::new())
            }
        }
    }

    /// `classes/*.json`, sorted by file name so load order is stable.
    fn class_files(&self, report: &mut LoadReport) -> Result<Vec<PathBuf>, LoadError> {
        let dir = self.config.data_dir.join(CLASSES_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(source) => {
                report.fail(self.config.policy, LoadError::Io { path: dir, source })?;
                return Ok(Vec::new());
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        Ok(files)
    }
}
