use std::collections::VecDeque;

use crate::api::{BestXiRequest, BestXiResponse};
use crate::fixture::{MatchTeams, parse_match_teams};
use crate::lineup::LineupGroups;
use crate::prefs::{RiskPreference, TeamPreference};
use crate::roster::PlayerPicker;

pub const SELECT_MATCH_ALERT: &str = "Please select a match first";
pub const NO_PLAYERS_ALERT: &str = "No players found for this match";
pub const NO_MATCHES_TEXT: &str = "No matches available";
pub const LOADING_MATCHES_TEXT: &str = "Loading matches...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Matches,
    Players,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchListStatus {
    Loading,
    Loaded,
    Empty,
    Failed(String),
}

/// One line of the match grid. Only real matches carry an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    pub text: String,
    pub index: Option<usize>,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub focus: Focus,
    pub matches: Vec<String>,
    pub match_status: MatchListStatus,
    pub match_cursor: usize,
    pub selected_match_index: Option<usize>,
    pub selected_teams: Option<MatchTeams>,
    pub picker: PlayerPicker,
    pub risk: RiskPreference,
    pub team_pref: TeamPreference,
    pub lineup: LineupGroups,
    pub lineup_match: Option<String>,
    pub results_visible: bool,
    pub results_scroll: u16,
    pub pending_best_xi: usize,
    pub alerts: VecDeque<String>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Matches,
            matches: Vec::with_capacity(80),
            match_status: MatchListStatus::Loading,
            match_cursor: 0,
            selected_match_index: None,
            selected_teams: None,
            picker: PlayerPicker::new(),
            risk: RiskPreference::default(),
            team_pref: TeamPreference::default(),
            lineup: LineupGroups::default(),
            lineup_match: None,
            results_visible: false,
            results_scroll: 0,
            pending_best_xi: 0,
            alerts: VecDeque::new(),
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn match_rows(&self) -> Vec<MatchRow> {
        match &self.match_status {
            MatchListStatus::Loading => vec![placeholder_row(LOADING_MATCHES_TEXT)],
            MatchListStatus::Empty => vec![placeholder_row(NO_MATCHES_TEXT)],
            MatchListStatus::Failed(reason) => {
                vec![placeholder_row(&format!("Error loading matches: {reason}"))]
            }
            MatchListStatus::Loaded => self
                .matches
                .iter()
                .enumerate()
                .map(|(idx, text)| MatchRow {
                    text: text.clone(),
                    index: Some(idx),
                    selected: self.selected_match_index == Some(idx),
                })
                .collect(),
        }
    }

    pub fn selected_match_label(&self) -> Option<&str> {
        self.selected_match_index
            .and_then(|idx| self.matches.get(idx))
            .map(String::as_str)
    }

    /// Marks `index` as the selected match and refreshes the player picker
    /// from its label. A label without two teams leaves the picker as it was.
    pub fn select_match(&mut self, index: usize) -> bool {
        if self.match_status != MatchListStatus::Loaded {
            return false;
        }
        let Some(label) = self.matches.get(index) else {
            return false;
        };
        let teams = parse_match_teams(label);
        self.selected_match_index = Some(index);
        if let Some(teams) = &teams {
            self.picker.populate(teams);
        }
        // Teams track the highlighted match even when the picker keeps its old options.
        self.selected_teams = teams;
        true
    }

    pub fn select_match_at_cursor(&mut self) -> bool {
        self.select_match(self.match_cursor)
    }

    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Matches => {
                if self.match_status == MatchListStatus::Loaded && !self.matches.is_empty() {
                    self.match_cursor = (self.match_cursor + 1).min(self.matches.len() - 1);
                }
            }
            Focus::Players => self.picker.cursor_next(),
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            Focus::Matches => self.match_cursor = self.match_cursor.saturating_sub(1),
            Focus::Players => self.picker.cursor_prev(),
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Matches => Focus::Players,
            Focus::Players => Focus::Matches,
        };
    }

    pub fn cycle_risk(&mut self) {
        self.risk = self.risk.cycle();
    }

    pub fn cycle_team_pref(&mut self) {
        self.team_pref = self.team_pref.cycle();
    }

    pub fn best_xi_request(&self) -> BestXiRequest {
        BestXiRequest {
            must_include_players: self.picker.selected_names(),
            risk_rating: self.risk.wire_value().to_string(),
            team_preference: self.team_pref.wire_value().to_string(),
        }
    }

    /// Builds the request for the selected match. Without a selection this
    /// raises the select-a-match alert and yields nothing to send.
    pub fn submit_best_xi(&mut self) -> Option<ProviderCommand> {
        let Some(match_index) = self.selected_match_index else {
            self.alert(SELECT_MATCH_ALERT);
            return None;
        };
        Some(ProviderCommand::FetchBestXi {
            match_index,
            request: self.best_xi_request(),
        })
    }

    pub fn alert(&mut self, msg: impl Into<String>) {
        self.alerts.push_back(msg.into());
    }

    pub fn active_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn scroll_results_down(&mut self) {
        self.results_scroll = self.results_scroll.saturating_add(1);
    }

    pub fn scroll_results_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }
}

fn placeholder_row(text: &str) -> MatchRow {
    MatchRow {
        text: text.to_string(),
        index: None,
        selected: false,
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetMatches(Vec<String>),
    MatchesFailed(String),
    SetBestXi(BestXiResponse),
    BestXiFailed(String),
    Log(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    FetchMatches,
    FetchBestXi {
        match_index: usize,
        request: BestXiRequest,
    },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetMatches(matches) => {
            state.match_status = if matches.is_empty() {
                MatchListStatus::Empty
            } else {
                MatchListStatus::Loaded
            };
            state.push_log(format!("[INFO] Loaded {} matches", matches.len()));
            state.matches = matches;
            state.match_cursor = state
                .match_cursor
                .min(state.matches.len().saturating_sub(1));
            if state
                .selected_match_index
                .is_some_and(|idx| idx >= state.matches.len())
            {
                state.selected_match_index = None;
            }
        }
        Delta::MatchesFailed(reason) => {
            state.push_log(format!("[ERROR] Error fetching matches: {reason}"));
            state.matches.clear();
            state.match_cursor = 0;
            state.selected_match_index = None;
            state.match_status = MatchListStatus::Failed(reason);
        }
        Delta::SetBestXi(response) => {
            state.pending_best_xi = state.pending_best_xi.saturating_sub(1);
            state.lineup.clear();
            state.results_scroll = 0;
            if response.players.is_empty() {
                state.alert(NO_PLAYERS_ALERT);
                return;
            }
            for player in &response.players {
                state.lineup.push(player);
            }
            state.lineup_match = response.match_label;
            state.results_visible = true;
            state.push_log(format!(
                "[INFO] Best XI received: {} players",
                response.players.len()
            ));
        }
        Delta::BestXiFailed(reason) => {
            state.pending_best_xi = state.pending_best_xi.saturating_sub(1);
            state.push_log(format!("[ERROR] Error fetching best XI: {reason}"));
            state.alert(format!("Error: {reason}"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
