//! Playoff bracket rows.
//!
//! A 7-match single-elimination bracket: 4 quarterfinals, 2 semifinals,
//! 1 final. Team slots start empty (`None` = TBD) and are only ever filled
//! by the bracket advancer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LeagueError;

use super::{ScoreLine, SeasonId, TeamRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayoffRound {
    Quarterfinal,
    Semifinal,
    Final,
}

impl PlayoffRound {
    /// Number of matches the round consists of.
    pub fn match_count(&self) -> u8 {
        match self {
            PlayoffRound::Quarterfinal => 4,
            PlayoffRound::Semifinal => 2,
            PlayoffRound::Final => 1,
        }
    }
}

impl fmt::Display for PlayoffRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayoffRound::Quarterfinal => write!(f, "quarterfinal"),
            PlayoffRound::Semifinal => write!(f, "semifinal"),
            PlayoffRound::Final => write!(f, "final"),
        }
    }
}

/// Home or away position of a playoff match, filled by a prior round's winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSlot {
    Home,
    Away,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayoffMatch {
    pub id: String,
    pub season: SeasonId,
    pub round: PlayoffRound,
    /// 1-based within the round (quarterfinals 1..=4, semifinals 1..=2).
    pub match_number: u8,
    #[serde(default)]
    pub home_team: Option<TeamRef>,
    #[serde(default)]
    pub away_team: Option<TeamRef>,
    #[serde(default)]
    pub score: Option<ScoreLine>,
    /// Penalty-shootout score, recorded only when the match ended level.
    #[serde(default)]
    pub penalties: Option<ScoreLine>,
    pub is_completed: bool,
}

impl PlayoffMatch {
    /// Resolve the winner of a completed playoff match.
    ///
    /// Higher score wins; a level score is decided by the penalty shootout.
    /// A level score with no (or level) penalty data has no resolvable
    /// winner and blocks advancement.
    pub fn winner(&self) -> Result<&TeamRef, LeagueError> {
        if !self.is_completed {
            return Err(LeagueError::MatchNotCompleted { match_id: self.id.clone() });
        }
        let (home, away) = match (&self.home_team, &self.away_team) {
            (Some(home), Some(away)) => (home, away),
            _ => return Err(LeagueError::IncompleteBracketSource { match_id: self.id.clone() }),
        };
        let score = self
            .score
            .ok_or_else(|| LeagueError::MissingScore { match_id: self.id.clone() })?;

        if score.home > score.away {
            return Ok(home);
        }
        if score.away > score.home {
            return Ok(away);
        }
        match self.penalties {
            Some(pens) if pens.home > pens.away => Ok(home),
            Some(pens) if pens.away > pens.home => Ok(away),
            // No shootout recorded, or the shootout itself is level: there
            // is no winner to propagate until the data is corrected.
            _ => Err(LeagueError::AmbiguousPlayoffWinner { match_id: self.id.clone() }),
        }
    }

    pub fn slot_team(&self, slot: BracketSlot) -> Option<&TeamRef> {
        match slot {
            BracketSlot::Home => self.home_team.as_ref(),
            BracketSlot::Away => self.away_team.as_ref(),
        }
    }

    pub fn set_slot_team(&mut self, slot: BracketSlot, team: TeamRef) {
        match slot {
            BracketSlot::Home => self.home_team = Some(team),
            BracketSlot::Away => self.away_team = Some(team),
        }
    }
}
