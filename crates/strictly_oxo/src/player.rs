//! Player roster.

use crate::board::PlayerId;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player taking part in the current match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize, new)]
pub struct Player {
    /// Ordinal identity.
    id: PlayerId,
    /// Single character drawn on the board for this player.
    marker: char,
}

const SURROGATES: std::ops::Range<u32> = 0xD800..0xE000;

/// Returns the marker for the player at `index`: `'A'`, `'B'`, and so on.
///
/// Past `'Z'` the sequence continues through the following code points,
/// skipping the surrogate range, so markers stay distinct up to `char::MAX`.
pub fn marker_for(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| i.checked_add(u32::from(b'A')))
        .and_then(|code| {
            if code >= SURROGATES.start {
                code.checked_add(SURROGATES.end - SURROGATES.start)
            } else {
                Some(code)
            }
        })
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Ordered set of players for a match. Rebuilt wholesale when the count changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Creates `count` players with sequential markers.
    #[instrument]
    pub fn with_count(count: usize) -> Self {
        let players = (0..count)
            .map(|i| Player::new(PlayerId(i), marker_for(i)))
            .collect();
        Self { players }
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when nobody is configured.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Looks up a player by identity.
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Marker of `id`, if that player exists.
    pub fn marker(&self, id: PlayerId) -> Option<char> {
        self.get(id).map(|p| p.marker)
    }

    /// Iterates over players in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_markers() {
        let roster = Roster::with_count(3);
        let markers: String = roster.iter().map(|p| *p.marker()).collect();
        assert_eq!(markers, "ABC");
        assert_eq!(roster.marker(PlayerId(1)), Some('B'));
        assert_eq!(roster.marker(PlayerId(3)), None);
    }

    #[test]
    fn test_markers_continue_past_z() {
        assert_eq!(marker_for(25), 'Z');
        assert_eq!(marker_for(26), '[');
    }

    #[test]
    fn test_markers_skip_surrogates() {
        let before_gap = (0xD7FF - u32::from(b'A')) as usize;
        assert_eq!(marker_for(before_gap), '\u{D7FF}');
        assert_eq!(marker_for(before_gap + 1), '\u{E000}');
        assert_eq!(marker_for(before_gap + 2), '\u{E001}');
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::default();
        assert!(roster.is_empty());
        assert_eq!(roster.len(), 0);
    }
}
