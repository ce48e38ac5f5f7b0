use std::collections::HashMap;

use cinefinn_api::types::WatchItem;

/// Server-held watch records, grouped by series.
///
/// Read-only mirror: the server is authoritative, a refresh replaces the
/// whole record set for its series.
#[derive(Debug, Default)]
pub struct WatchLog {
    records: HashMap<String, Vec<WatchItem>>,
}

impl WatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all records held for one series.
    pub fn replace(&mut self, series_id: &str, items: Vec<WatchItem>) {
        self.records.insert(series_id.to_string(), items);
    }

    pub fn records(&self, series_id: &str) -> &[WatchItem] {
        self.records.get(series_id).map_or(&[], Vec::as_slice)
    }

    /// True iff a record for this episode exists and is marked watched.
    pub fn is_watched(&self, series_id: &str, season: u32, episode: u32) -> bool {
        self.records(series_id)
            .iter()
            .any(|item| item.season == season as i32 && item.episode == episode as i32 && item.watched)
    }

    /// Some watched record for the series, to offer "resume playback".
    ///
    /// Picks the first watched record in held order; stable for unchanged
    /// data, nothing stronger.
    pub fn latest_watched_position(&self, series_id: &str) -> Option<&WatchItem> {
        self.records(series_id).iter().find(|item| item.watched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(season: i32, episode: i32, time: f64, watched: bool) -> WatchItem {
        WatchItem {
            id: "x".into(),
            season,
            episode,
            movie: -1,
            time,
            watched,
        }
    }

    #[test]
    fn test_is_watched_round_trip() {
        let mut log = WatchLog::new();
        log.replace("x", vec![item(1, 2, 310.0, true)]);

        assert!(log.is_watched("x", 1, 2));
        assert!(!log.is_watched("x", 1, 3));
        assert!(!log.is_watched("y", 1, 2));
    }

    #[test]
    fn test_unwatched_record_does_not_count() {
        let mut log = WatchLog::new();
        log.replace("x", vec![item(1, 2, 310.0, false)]);
        assert!(!log.is_watched("x", 1, 2));
    }

    #[test]
    fn test_refresh_replaces_not_merges() {
        let mut log = WatchLog::new();
        log.replace("x", vec![item(1, 1, 0.0, true), item(1, 2, 0.0, true)]);
        log.replace("x", vec![item(1, 3, 0.0, true)]);

        assert!(!log.is_watched("x", 1, 1));
        assert!(log.is_watched("x", 1, 3));
        assert_eq!(log.records("x").len(), 1);
    }

    #[test]
    fn test_latest_watched_position_is_stable() {
        let mut log = WatchLog::new();
        log.replace(
            "x",
            vec![
                item(1, 1, 0.0, false),
                item(1, 2, 451.5, true),
                item(1, 3, 12.0, true),
            ],
        );

        let first = log.latest_watched_position("x").unwrap();
        assert!(first.watched);
        let (season, episode) = (first.season, first.episode);

        // Repeated calls over unchanged data pick the same record.
        let again = log.latest_watched_position("x").unwrap();
        assert_eq!((again.season, again.episode), (season, episode));
    }

    #[test]
    fn test_latest_watched_position_absent() {
        let mut log = WatchLog::new();
        log.replace("x", vec![item(1, 1, 0.0, false)]);
        assert!(log.latest_watched_position("x").is_none());
        assert!(log.latest_watched_position("unknown").is_none());
    }
}
