//! Four-player single-elimination bracket.
//!
//! Round 1 seats player 1 (left) against player 3 (right), round 2 seats
//! player 2 against player 4, and the finals seat the round 1 winner on the
//! left against the round 2 winner on the right.

use serde::{Deserialize, Serialize};

use crate::error::BracketError;
use crate::params::Params;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Round {
    Round1,
    Round2,
    Finals,
    Complete,
}

impl Round {
    /// Slot in the winner record; `None` once complete
    pub fn index(self) -> Option<usize> {
        match self {
            Round::Round1 => Some(0),
            Round::Round2 => Some(1),
            Round::Finals => Some(2),
            Round::Complete => None,
        }
    }

    pub fn next(self) -> Option<Round> {
        match self {
            Round::Round1 => Some(Round::Round2),
            Round::Round2 => Some(Round::Finals),
            Round::Finals => Some(Round::Complete),
            Round::Complete => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Round::Round1 => "Round 1",
            Round::Round2 => "Round 2",
            Round::Finals => "Finals",
            Round::Complete => "Complete",
        }
    }
}

/// Four contestant display names, normalized at the boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRoster")]
pub struct Roster {
    names: [String; 4],
}

/// Wire shape of a roster before normalization
#[derive(Deserialize)]
struct RawRoster {
    names: [String; 4],
}

impl From<RawRoster> for Roster {
    fn from(raw: RawRoster) -> Self {
        Roster::new(raw.names.into_iter().map(Some))
    }
}

impl Roster {
    /// Build a roster from raw name entries. Entries are trimmed and cut to
    /// eight characters; a missing, empty or cancelled entry becomes
    /// "Player N". Entries past the fourth are ignored.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut names: [String; 4] = std::array::from_fn(|i| default_name(i as u8 + 1));
        for (slot, entry) in names.iter_mut().zip(entries) {
            let trimmed: String = entry
                .as_ref()
                .map(|s| s.as_ref().trim())
                .unwrap_or_default()
                .chars()
                .take(Params::MAX_NAME_LEN)
                .collect();
            // Cutting can leave trailing whitespace behind
            let trimmed = trimmed.trim_end();
            if !trimmed.is_empty() {
                *slot = trimmed.to_string();
            }
        }
        Self { names }
    }

    /// Name for player 1..=4
    pub fn name(&self, player: u8) -> &str {
        match player {
            1..=4 => &self.names[player as usize - 1],
            _ => "",
        }
    }

    pub fn names(&self) -> &[String; 4] {
        &self.names
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(std::iter::empty::<Option<&str>>())
    }
}

fn default_name(player: u8) -> String {
    format!("Player {player}")
}

/// Tournament bracket record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bracket {
    round: Round,
    winners: [Option<u8>; 3],
    roster: Roster,
    winning_score: u32,
}

impl Bracket {
    pub fn new(roster: Roster, winning_score: u32) -> Self {
        Self {
            round: Round::Round1,
            winners: [None; 3],
            roster,
            winning_score,
        }
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn winners(&self) -> &[Option<u8>; 3] {
        &self.winners
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn winning_score(&self) -> u32 {
        self.winning_score
    }

    /// (left, right) players contesting the current round
    pub fn contestants(&self) -> Option<(u8, u8)> {
        match self.round {
            Round::Round1 => Some((1, 3)),
            Round::Round2 => Some((2, 4)),
            Round::Finals => Some((self.winners[0]?, self.winners[1]?)),
            Round::Complete => None,
        }
    }

    /// Winner of the current round, if already recorded
    pub fn round_winner(&self) -> Option<u8> {
        self.round.index().and_then(|i| self.winners[i])
    }

    pub fn champion(&self) -> Option<u8> {
        self.winners[2]
    }

    /// Record the current round's winner. A recorded winner is final.
    pub fn record_winner(&mut self, player: u8) -> Result<(), BracketError> {
        let index = self.round.index().ok_or(BracketError::Complete)?;
        if self.winners[index].is_some() {
            return Err(BracketError::AlreadyDecided { round: self.round });
        }
        match self.contestants() {
            Some((left, right)) if player == left || player == right => {
                self.winners[index] = Some(player);
                Ok(())
            }
            _ => Err(BracketError::NotContestant {
                player,
                round: self.round,
            }),
        }
    }

    /// Move to the next round once the current one is decided
    pub fn advance(&mut self) -> Result<Round, BracketError> {
        let next = self.round.next().ok_or(BracketError::Complete)?;
        if self.round_winner().is_none() {
            return Err(BracketError::Undecided { round: self.round });
        }
        self.round = next;
        Ok(next)
    }

    /// Announcement for the current round, e.g. "Round 1: Ann vs Cid"
    pub fn round_text(&self) -> String {
        match self.contestants() {
            Some((left, right)) => format!(
                "{}: {} vs {}",
                self.round.label(),
                self.roster.name(left),
                self.roster.name(right)
            ),
            None => "Tournament complete".to_string(),
        }
    }

    /// Result line for the most recently decided round
    pub fn result_text(&self) -> Option<String> {
        if let Some(champion) = self.champion() {
            return Some(format!("{} Wins Tournament!", self.roster.name(champion)));
        }
        let winner = self.round_winner()?;
        Some(format!(
            "{} wins {}!",
            self.roster.name(winner),
            self.round.label()
        ))
    }
}
