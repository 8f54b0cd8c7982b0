//! Team merge into the draft player list
//!
//! The draft list is a JSON array of positional entries
//! `[name, role, team, image, ...]`. Only entries with at least four fields
//! are touched; everything else is written back exactly as read.

use super::strategy::{MatchStrategy, PlayerIndex};
use crate::data::store::{load_json, save_json};
use crate::{FantaError, MergeConfig, PlayerImageRecord, Result};
use serde_json::Value;
use std::path::Path;

const NAME_FIELD: usize = 0;
const TEAM_FIELD: usize = 2;
const IMAGE_FIELD: usize = 3;
const MIN_FIELDS: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    pub strategy: MatchStrategy,
    pub fill_images: bool,
}

impl From<&MergeConfig> for MergeOptions {
    fn from(config: &MergeConfig) -> Self {
        MergeOptions {
            strategy: config.strategy,
            fill_images: config.fill_images,
        }
    }
}

/// Counts from a merge pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Entries whose team value differs from what was there before
    pub changed: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Matches picked among several candidates
    pub ambiguous: usize,
    /// Entries too short to carry a team field
    pub skipped: usize,
}

/// Set the team field of every draft entry from the matching player.
///
/// Unmatched entries, and matches whose player has no team, get an empty
/// team string.
pub fn merge_teams(
    converted: &mut [Value],
    players: &[PlayerImageRecord],
    options: &MergeOptions,
) -> Result<MergeReport> {
    let index = PlayerIndex::new(players);
    let mut report = MergeReport::default();

    for (i, entry) in converted.iter_mut().enumerate() {
        let fields = match entry.as_array_mut() {
            Some(fields) if fields.len() >= MIN_FIELDS => fields,
            _ => {
                report.skipped += 1;
                continue;
            }
        };

        let name = fields[NAME_FIELD]
            .as_str()
            .ok_or_else(|| {
                FantaError::Parse(format!(
                    "entry {}: name field is not a string: {}",
                    i, fields[NAME_FIELD]
                ))
            })?
            .to_string();

        match index.find(&name, options.strategy) {
            Some(m) => {
                if m.is_ambiguous() {
                    log::warn!(
                        "Ambiguous match for '{}': picked '{}' out of {} candidates",
                        name,
                        m.player.name,
                        m.candidates
                    );
                    report.ambiguous += 1;
                }
                log::debug!("'{}' -> {}", name, m.player);

                let team = m.player.team.clone().unwrap_or_default();
                report.changed += set_field(fields, TEAM_FIELD, team);
                if options.fill_images {
                    if let Some(src) = &m.player.src {
                        fields[IMAGE_FIELD] = Value::String(src.clone());
                    }
                }
                report.matched += 1;
            }
            None => {
                log::debug!("No player found for '{}'", name);
                report.changed += set_field(fields, TEAM_FIELD, String::new());
                report.unmatched += 1;
            }
        }
    }

    Ok(report)
}

/// Write a string field, returning 1 if the value changed
fn set_field(fields: &mut [Value], index: usize, value: String) -> usize {
    let value = Value::String(value);
    if fields[index] == value {
        return 0;
    }
    fields[index] = value;
    1
}

/// Merge teams from `players_path` into the draft list at `converted_path`
/// and rewrite it in place.
pub fn merge_file<P: AsRef<Path>, Q: AsRef<Path>>(
    converted_path: P,
    players_path: Q,
    options: &MergeOptions,
) -> Result<MergeReport> {
    let converted_path = converted_path.as_ref();
    let mut converted: Vec<Value> = load_json(converted_path)?;
    let players: Vec<PlayerImageRecord> = load_json(players_path.as_ref())?;

    log::info!(
        "Matching {} entries against {} players ({} strategy)",
        converted.len(),
        players.len(),
        options.strategy
    );

    let report = merge_teams(&mut converted, &players, options)?;
    save_json(converted_path, &converted)?;

    log::info!(
        "Changed {} teams: {} matched, {} unmatched, {} ambiguous, {} skipped",
        report.changed,
        report.matched,
        report.unmatched,
        report.ambiguous,
        report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(name: &str, team: Option<&str>) -> PlayerImageRecord {
        PlayerImageRecord::new(name, None, team.map(str::to_string))
    }

    #[test]
    fn test_lebron_example() {
        let players = vec![player("LeBron James", Some("Lakers"))];
        let mut converted = vec![json!(["LeBron James", "x", null, "y"])];

        let report = merge_teams(&mut converted, &players, &MergeOptions::default()).unwrap();
        assert_eq!(converted[0], json!(["LeBron James", "x", "Lakers", "y"]));
        assert_eq!(report.matched, 1);
        assert_eq!(report.changed, 1);

        let report = merge_teams(&mut converted, &players, &MergeOptions::default()).unwrap();
        assert_eq!(report.matched, 1);
        assert_eq!(report.changed, 0);
    }

    #[test]
    fn test_unmatched_entry_gets_empty_team() {
        let players = vec![player("LeBron James", Some("Lakers"))];
        let mut converted = vec![json!(["Tim Duncan", "C", "Spurs", ""])];

        let report = merge_teams(&mut converted, &players, &MergeOptions::default()).unwrap();
        assert_eq!(converted[0], json!(["Tim Duncan", "C", "", ""]));
        assert_eq!(report.unmatched, 1);
    }

    #[test]
    fn test_player_without_team_gives_empty_team() {
        let players = vec![player("Bronny James", None)];
        let mut converted = vec![json!(["Bronny James", "G", "old", ""])];

        merge_teams(&mut converted, &players, &MergeOptions::default()).unwrap();
        assert_eq!(converted[0][2], json!(""));
    }

    #[test]
    fn test_short_entries_untouched() {
        let players = vec![player("LeBron James", Some("Lakers"))];
        let original = vec![
            json!(["LeBron James", "A", "Heat"]),
            json!([]),
            json!({"name": "LeBron James"}),
            json!("LeBron James"),
        ];
        let mut converted = original.clone();

        let report = merge_teams(&mut converted, &players, &MergeOptions::default()).unwrap();
        assert_eq!(converted, original);
        assert_eq!(report.skipped, 4);
        assert_eq!(report.changed, 0);
    }

    #[test]
    fn test_skipped_entries_keep_key_order_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let converted_path = dir.path().join("converted_with_img.json");
        let players_path = dir.path().join("nba_player_images.json");

        save_json(&players_path, &Vec::<PlayerImageRecord>::new()).unwrap();
        let before = "[\n  [\n    \"Draymond Green\",\n    {\n      \"zeta\": 1,\n      \"alpha\": 2\n    }\n  ],\n  {\n    \"zeta\": 1,\n    \"alpha\": 2\n  }\n]\n";
        std::fs::write(&converted_path, before).unwrap();

        merge_file(&converted_path, &players_path, &MergeOptions::default()).unwrap();
        let after = std::fs::read_to_string(&converted_path).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_extra_fields_preserved() {
        let players = vec![player("Nikola Jokić", Some("Denver Nuggets"))];
        let mut converted = vec![json!(["nikola  jokić\n", "C", "", "img.png", 42, {"k": true}])];

        merge_teams(&mut converted, &players, &MergeOptions::default()).unwrap();
        assert_eq!(
            converted[0],
            json!(["nikola  jokić\n", "C", "Denver Nuggets", "img.png", 42, {"k": true}])
        );
    }

    #[test]
    fn test_fill_images() {
        let players = vec![PlayerImageRecord::new(
            "Jayson Tatum",
            Some("https://cdn.nba.com/1628369.png".to_string()),
            Some("Boston Celtics".to_string()),
        )];
        let mut converted = vec![json!(["Jayson Tatum", "A", "", ""])];
        let options = MergeOptions {
            strategy: MatchStrategy::Containment,
            fill_images: true,
        };

        merge_teams(&mut converted, &players, &options).unwrap();
        assert_eq!(
            converted[0],
            json!(["Jayson Tatum", "A", "Boston Celtics", "https://cdn.nba.com/1628369.png"])
        );
    }

    #[test]
    fn test_ambiguous_match_is_counted() {
        let players = vec![player("Lee Jr.", Some("A")), player("Lee", Some("B"))];
        let mut converted = vec![json!(["Lee", "G", "", ""])];

        let report = merge_teams(&mut converted, &players, &MergeOptions::default()).unwrap();
        assert_eq!(converted[0][2], json!("A"));
        assert_eq!(report.ambiguous, 1);

        let options = MergeOptions {
            strategy: MatchStrategy::Exact,
            fill_images: false,
        };
        let report = merge_teams(&mut converted, &players, &options).unwrap();
        assert_eq!(converted[0][2], json!("B"));
        assert_eq!(report.ambiguous, 0);
    }

    #[test]
    fn test_non_string_name_is_error() {
        let mut converted = vec![json!([7, "G", "", ""])];
        let result = merge_teams(&mut converted, &[], &MergeOptions::default());
        assert!(matches!(result, Err(FantaError::Parse(_))));
    }

    #[test]
    fn test_merge_file_rewrites_converted() {
        let dir = tempfile::tempdir().unwrap();
        let converted_path = dir.path().join("converted_with_img.json");
        let players_path = dir.path().join("nba_player_images.json");

        save_json(
            &players_path,
            &vec![player("Luka Dončić", Some("Los Angeles Lakers"))],
        )
        .unwrap();
        std::fs::write(
            &converted_path,
            r#"[["Luka Dončić", "G", "", ""], ["Unknown", "C", "X", ""], ["short"]]"#,
        )
        .unwrap();

        let report = merge_file(&converted_path, &players_path, &MergeOptions::default()).unwrap();
        assert_eq!(report.matched, 1);
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.skipped, 1);

        let text = std::fs::read_to_string(&converted_path).unwrap();
        assert!(text.contains("Dončić"));
        let stored: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(
            stored,
            vec![
                json!(["Luka Dončić", "G", "Los Angeles Lakers", ""]),
                json!(["Unknown", "C", "", ""]),
                json!(["short"]),
            ]
        );
    }

    #[test]
    fn test_merge_file_missing_or_malformed_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let converted_path = dir.path().join("converted_with_img.json");
        let players_path = dir.path().join("nba_player_images.json");

        std::fs::write(&converted_path, "[]").unwrap();
        let result = merge_file(&converted_path, &players_path, &MergeOptions::default());
        assert!(matches!(result, Err(FantaError::Io(_))));

        std::fs::write(&players_path, "[{\"team\": \"no name\"}]").unwrap();
        let result = merge_file(&converted_path, &players_path, &MergeOptions::default());
        assert!(matches!(result, Err(FantaError::Json(_))));
    }
}
