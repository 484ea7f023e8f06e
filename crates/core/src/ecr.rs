//! Consensus ranking (ECR) lookup by player name.
//!
//! Ranking feeds list players as "S. Ohtani" or "Shohei Ohtani" depending on
//! the export, while the roster store uses full names. Lookups try the exact
//! normalized name, then the abbreviated first name, then a last name that
//! matches exactly one ranked player.

use std::collections::HashMap;

/// Normalize a player name for matching: strip periods, collapse runs of
/// whitespace, lowercase.
pub fn normalize_player_name(name: &str) -> String {
    name.replace('.', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// "shohei ohtani" -> "s ohtani". `None` for single-word names.
fn abbreviate(normalized: &str) -> Option<String> {
    let (first, rest) = normalized.split_once(' ')?;
    let initial = first.chars().next()?;
    Some(format!("{initial} {rest}"))
}

/// Ranks keyed by normalized player name.
#[derive(Debug, Clone, Default)]
pub struct EcrIndex {
    ranks: HashMap<String, i32>,
}

impl EcrIndex {
    /// Build an index from `(player name, rank)` rows. When a name repeats,
    /// the better (lower) rank wins.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: AsRef<str>,
    {
        let mut ranks = HashMap::new();
        for (name, rank) in entries {
            let key = normalize_player_name(name.as_ref());
            if key.is_empty() {
                continue;
            }
            ranks
                .entry(key)
                .and_modify(|existing: &mut i32| *existing = (*existing).min(rank))
                .or_insert(rank);
        }
        Self { ranks }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Find the rank for `full_name`, falling back to `fallback` (usually the
    /// rank already stored for the player) when nothing matches.
    pub fn lookup(&self, full_name: &str, fallback: Option<i32>) -> Option<i32> {
        let normalized = normalize_player_name(full_name);

        if let Some(rank) = self.ranks.get(&normalized) {
            return Some(*rank);
        }

        if let Some(abbrev) = abbreviate(&normalized) {
            if let Some(rank) = self.ranks.get(&abbrev) {
                return Some(*rank);
            }

            if let Some((_, last)) = normalized.rsplit_once(' ') {
                let suffix = format!(" {last}");
                let mut matches = self.ranks.iter().filter(|(k, _)| k.ends_with(&suffix));
                if let (Some((_, rank)), None) = (matches.next(), matches.next()) {
                    return Some(*rank);
                }
            }
        }

        fallback
    }
}
