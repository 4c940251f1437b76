use anyhow::Context;
use mineboard_core::Difficulty;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Best completion time per difficulty, in whole seconds, kept in a JSON object
/// keyed by [`Difficulty::best_time_key`].
#[derive(Clone, Debug, PartialEq)]
pub struct BestTimes {
    path: PathBuf,
    times: BTreeMap<String, u32>,
}

impl BestTimes {
    /// Loads the store, a missing file is an empty store.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let times = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading best times from {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing best times in {}", path.display()))?
        } else {
            log::debug!("No best times at {}, starting empty", path.display());
            BTreeMap::new()
        };
        Ok(Self { path, times })
    }

    pub fn get(&self, difficulty: Difficulty) -> Option<u32> {
        self.times.get(&difficulty.best_time_key()).copied()
    }

    /// Stores `secs` when it beats the previous best, returns whether it did.
    pub fn record(&mut self, difficulty: Difficulty, secs: u32) -> anyhow::Result<bool> {
        if self.get(difficulty).is_some_and(|best| secs >= best) {
            return Ok(false);
        }

        self.times.insert(difficulty.best_time_key(), secs);
        self.save()?;
        log::info!("New best time for {}: {}s", difficulty, secs);
        Ok(true)
    }

    fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&self.times)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing best times to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mineboard-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("scores.json")
    }

    #[test]
    fn missing_file_is_empty() {
        let scores = BestTimes::load(scratch_path("missing")).unwrap();
        assert_eq!(scores.get(Difficulty::Easy), None);
    }

    #[test]
    fn only_faster_times_are_recorded() {
        let path = scratch_path("faster");
        let mut scores = BestTimes::load(&path).unwrap();

        assert!(scores.record(Difficulty::Easy, 90).unwrap());
        assert!(!scores.record(Difficulty::Easy, 90).unwrap());
        assert!(!scores.record(Difficulty::Easy, 120).unwrap());
        assert!(scores.record(Difficulty::Easy, 45).unwrap());
        assert_eq!(scores.get(Difficulty::Easy), Some(45));
        assert_eq!(scores.get(Difficulty::Hard), None);
    }

    #[test]
    fn times_persist_under_difficulty_keys() {
        let path = scratch_path("persist");
        let mut scores = BestTimes::load(&path).unwrap();
        scores.record(Difficulty::Medium, 200).unwrap();
        scores.record(Difficulty::Hard, 600).unwrap();

        let raw: BTreeMap<String, u32> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("minesweeper-best-medium"), Some(&200));
        assert_eq!(raw.get("minesweeper-best-hard"), Some(&600));

        let reloaded = BestTimes::load(&path).unwrap();
        assert_eq!(reloaded, scores);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let err = BestTimes::load(&path).unwrap_err();
        assert!(err.to_string().contains("parsing best times"));
    }
}
