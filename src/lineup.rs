use crate::api::PlayerResult;
use crate::card::{PlayerCard, render_card};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Batsman,
    Wicketkeeper,
    AllRounder,
    Bowler,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Batsman,
        Position::Wicketkeeper,
        Position::AllRounder,
        Position::Bowler,
    ];

    /// Exact label match; the backend's spelling is the only one accepted.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Batsman" => Some(Position::Batsman),
            "Wicketkeeper" => Some(Position::Wicketkeeper),
            "All-rounder" => Some(Position::AllRounder),
            "Bowler" => Some(Position::Bowler),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Batsman => "Batsman",
            Position::Wicketkeeper => "Wicketkeeper",
            Position::AllRounder => "All-rounder",
            Position::Bowler => "Bowler",
        }
    }

    pub fn group_title(self) -> &'static str {
        match self {
            Position::Batsman => "Batsmen",
            Position::Wicketkeeper => "Wicketkeepers",
            Position::AllRounder => "All-rounders",
            Position::Bowler => "Bowlers",
        }
    }
}

/// Rendered cards split into the four display groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineupGroups {
    pub batsmen: Vec<PlayerCard>,
    pub wicketkeepers: Vec<PlayerCard>,
    pub all_rounders: Vec<PlayerCard>,
    pub bowlers: Vec<PlayerCard>,
}

impl LineupGroups {
    pub fn clear(&mut self) {
        self.batsmen.clear();
        self.wicketkeepers.clear();
        self.all_rounders.clear();
        self.bowlers.clear();
    }

    pub fn group(&self, position: Position) -> &[PlayerCard] {
        match position {
            Position::Batsman => &self.batsmen,
            Position::Wicketkeeper => &self.wicketkeepers,
            Position::AllRounder => &self.all_rounders,
            Position::Bowler => &self.bowlers,
        }
    }

    fn group_mut(&mut self, position: Position) -> &mut Vec<PlayerCard> {
        match position {
            Position::Batsman => &mut self.batsmen,
            Position::Wicketkeeper => &mut self.wicketkeepers,
            Position::AllRounder => &mut self.all_rounders,
            Position::Bowler => &mut self.bowlers,
        }
    }

    /// Appends a card for `player` to its group. Returns false, and renders
    /// nothing, when the position is not one of the four labels.
    pub fn push(&mut self, player: &PlayerResult) -> bool {
        let Some(position) = Position::from_label(&player.position) else {
            return false;
        };
        self.group_mut(position).push(render_card(player));
        true
    }

    pub fn len(&self) -> usize {
        Position::ALL.iter().map(|p| self.group(*p).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn group_players(players: &[PlayerResult]) -> LineupGroups {
    let mut groups = LineupGroups::default();
    for player in players {
        groups.push(player);
    }
    groups
}
