//! Name lookup strategies

use super::normalize::{common_prefix_len, normalize_name};
use crate::PlayerImageRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How a draft name is matched against scraped player names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// First player whose name contains, or is contained in, the target
    #[default]
    Containment,
    /// Exact normalized name first, then the containment candidate sharing
    /// the longest prefix with the target
    Exact,
}

impl std::str::FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "containment" => Ok(MatchStrategy::Containment),
            "exact" => Ok(MatchStrategy::Exact),
            _ => Err(format!(
                "Unknown strategy: {}. Use containment or exact.",
                s
            )),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::Containment => write!(f, "containment"),
            MatchStrategy::Exact => write!(f, "exact"),
        }
    }
}

/// A resolved player plus how many players were candidates
#[derive(Debug, Clone, Copy)]
pub struct PlayerMatch<'a> {
    pub player: &'a PlayerImageRecord,
    pub candidates: usize,
}

impl PlayerMatch<'_> {
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > 1
    }
}

/// Players with their normalized names computed once
pub struct PlayerIndex<'a> {
    players: &'a [PlayerImageRecord],
    keys: Vec<String>,
    /// Normalized name -> first player with that name
    exact: HashMap<String, usize>,
}

impl<'a> PlayerIndex<'a> {
    pub fn new(players: &'a [PlayerImageRecord]) -> Self {
        let keys: Vec<String> = players.iter().map(|p| normalize_name(&p.name)).collect();
        let mut exact = HashMap::new();
        for (i, key) in keys.iter().enumerate() {
            exact.entry(key.clone()).or_insert(i);
        }

        PlayerIndex {
            players,
            keys,
            exact,
        }
    }

    /// Look up a draft name
    pub fn find(&self, name: &str, strategy: MatchStrategy) -> Option<PlayerMatch<'a>> {
        let target = normalize_name(name);

        if strategy == MatchStrategy::Exact {
            if let Some(&i) = self.exact.get(&target) {
                return Some(PlayerMatch {
                    player: &self.players[i],
                    candidates: 1,
                });
            }
        }

        let candidates: Vec<usize> = self
            .keys
            .iter()
            .enumerate()
            .filter(|(_, key)| key.contains(target.as_str()) || target.contains(key.as_str()))
            .map(|(i, _)| i)
            .collect();

        let chosen = match strategy {
            MatchStrategy::Containment => candidates.first().copied(),
            // max_by_key keeps the last maximum, so compare on reversed index
            MatchStrategy::Exact => candidates
                .iter()
                .copied()
                .max_by_key(|&i| {
                    (
                        common_prefix_len(&self.keys[i], &target),
                        std::cmp::Reverse(i),
                    )
                }),
        }?;

        Some(PlayerMatch {
            player: &self.players[chosen],
            candidates: candidates.len(),
        })
    }
}

/// Find the player matching `name`
pub fn find_player<'a>(
    name: &str,
    players: &'a [PlayerImageRecord],
    strategy: MatchStrategy,
) -> Option<&'a PlayerImageRecord> {
    PlayerIndex::new(players)
        .find(name, strategy)
        .map(|m| m.player)
}
