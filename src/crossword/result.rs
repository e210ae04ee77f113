//! Persisted crossword results, one per puzzle date

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::grid::PlayerGrid;
use crate::persistence::{self, CROSSWORD_RESULTS_KEY};
use crate::platform::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordResult {
    pub date: String,
    pub solve_ms: i64,
    pub completed: bool,
    pub started_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_state: Option<PlayerGrid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_saved: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints_used: Option<u32>,
}

impl CrosswordResult {
    /// In-progress snapshot
    pub fn partial(date: &str, grid: PlayerGrid, elapsed_ms: i64, hints_used: u32) -> Self {
        Self {
            date: date.to_string(),
            solve_ms: 0,
            completed: false,
            started_at: 0,
            grid_state: Some(grid),
            elapsed_saved: Some(elapsed_ms),
            hints_used: Some(hints_used),
        }
    }

    /// Frozen record of a finished puzzle
    pub fn finished(date: &str, solve_ms: i64, started_at: i64, hints_used: u32) -> Self {
        Self {
            date: date.to_string(),
            solve_ms,
            completed: true,
            started_at,
            grid_state: None,
            elapsed_saved: None,
            hints_used: Some(hints_used),
        }
    }
}

/// Stored map, kept untyped so one bad entry never costs the others
type RawResults = BTreeMap<String, serde_json::Value>;

fn load_all(store: &dyn KeyValueStore) -> RawResults {
    persistence::load(store, CROSSWORD_RESULTS_KEY).unwrap_or_default()
}

pub fn load_result(store: &dyn KeyValueStore, date: &str) -> Option<CrosswordResult> {
    let value = load_all(store).remove(date)?;
    match serde_json::from_value(value) {
        Ok(result) => Some(result),
        Err(e) => {
            log::warn!("Ignoring stored crossword result for {date}: {e}");
            None
        }
    }
}

/// Overwrite the record for `result.date`, leaving other dates alone
pub fn save_result(store: &dyn KeyValueStore, result: &CrosswordResult) {
    let value = match serde_json::to_value(result) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Dropped crossword result for {}: {e}", result.date);
            return;
        }
    };
    let mut all = load_all(store);
    all.insert(result.date.clone(), value);
    persistence::save(store, CROSSWORD_RESULTS_KEY, &all);
}

pub fn clear_result(store: &dyn KeyValueStore, date: &str) {
    let mut all = load_all(store);
    if all.remove(date).is_some() {
        persistence::save(store, CROSSWORD_RESULTS_KEY, &all);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::puzzle::PUZZLES;
    use crate::platform::MemoryStore;

    #[test]
    fn test_finished_record_omits_progress() {
        let record = CrosswordResult::finished("puzzle-0", 61_000, 5, 2);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"date":"puzzle-0","solveMs":61000,"completed":true,"startedAt":5,"hintsUsed":2}"#
        );
    }

    #[test]
    fn test_records_are_per_date() {
        let store = MemoryStore::new();
        let grid = PlayerGrid::blank(&PUZZLES[0]);
        save_result(&store, &CrosswordResult::partial("puzzle-0", grid.clone(), 1_000, 0));
        save_result(&store, &CrosswordResult::finished("puzzle-1", 30_000, 0, 0));

        let partial = load_result(&store, "puzzle-0").unwrap();
        assert_eq!(partial.grid_state, Some(grid));
        assert_eq!(partial.elapsed_saved, Some(1_000));
        assert!(load_result(&store, "puzzle-1").unwrap().completed);

        clear_result(&store, "puzzle-0");
        assert!(load_result(&store, "puzzle-0").is_none());
        assert!(load_result(&store, "puzzle-1").is_some());
    }

    #[test]
    fn test_minimal_record_loads() {
        let store = MemoryStore::new();
        store
            .set(
                CROSSWORD_RESULTS_KEY,
                r#"{"puzzle-2":{"date":"puzzle-2","solveMs":0,"completed":false,"startedAt":0}}"#,
            )
            .unwrap();
        let result = load_result(&store, "puzzle-2").unwrap();
        assert_eq!(result.grid_state, None);
        assert_eq!(result.hints_used, None);
    }

    #[test]
    fn test_corrupt_map_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(CROSSWORD_RESULTS_KEY, "{\"puzzle-0\":").unwrap();
        assert!(load_result(&store, "puzzle-0").is_none());
    }

    #[test]
    fn test_bad_entry_does_not_cost_other_dates() {
        let store = MemoryStore::new();
        save_result(&store, &CrosswordResult::finished("puzzle-1", 30_000, 0, 0));
        let mut raw: RawResults =
            serde_json::from_str(&store.get(CROSSWORD_RESULTS_KEY).unwrap().unwrap()).unwrap();
        raw.insert(
            "puzzle-2".to_string(),
            serde_json::json!({"date": "puzzle-2", "solveMs": 0, "completed": false,
                "startedAt": 0, "hintsUsed": -1}),
        );
        store
            .set(CROSSWORD_RESULTS_KEY, &serde_json::to_string(&raw).unwrap())
            .unwrap();

        assert!(load_result(&store, "puzzle-2").is_none());
        let grid = PlayerGrid::blank(&PUZZLES[0]);
        save_result(&store, &CrosswordResult::partial("puzzle-0", grid, 500, 0));

        let solved = load_result(&store, "puzzle-1").unwrap();
        assert!(solved.completed);
        assert_eq!(solved.solve_ms, 30_000);
        assert!(load_result(&store, "puzzle-0").is_some());
    }
}
