use best_xi_terminal::api::{BestXiResponse, PlayerResult};
use best_xi_terminal::card::RiskClass;
use best_xi_terminal::prefs::{RiskPreference, TeamPreference};
use best_xi_terminal::roster::PLACEHOLDER_PLAYERS;
use best_xi_terminal::state::{
    AppState, Delta, Focus, MatchListStatus, NO_PLAYERS_ALERT, ProviderCommand,
    SELECT_MATCH_ALERT, apply_delta,
};

fn player(name: &str, position: &str, risk: Option<&str>) -> PlayerResult {
    PlayerResult {
        full_name: name.to_string(),
        current_team: "CSK".to_string(),
        position: position.to_string(),
        risk_rating: risk.map(str::to_string),
        consistency: 7.0,
        upside_potential: 6.5,
        total_fp: 50.0,
    }
}

fn loaded(matches: &[&str]) -> AppState {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetMatches(matches.iter().map(|m| m.to_string()).collect()),
    );
    state
}

#[test]
fn submit_without_selection_alerts_and_sends_nothing() {
    let mut state = loaded(&["M1 - India vs Australia"]);
    assert!(state.submit_best_xi().is_none());
    assert_eq!(state.active_alert(), Some(SELECT_MATCH_ALERT));
    assert_eq!(state.pending_best_xi, 0);
}

#[test]
fn selecting_match_enables_placeholder_roster() {
    let mut state = loaded(&["M1 - India vs Australia"]);
    assert!(!state.picker.enabled);

    assert!(state.select_match(0));
    assert_eq!(state.selected_match_index, Some(0));
    assert!(state.picker.enabled);
    assert_eq!(
        state.picker.option_names(),
        vec![
            "Virat Kohli",
            "Rohit Sharma",
            "MS Dhoni",
            "Jasprit Bumrah",
            "KL Rahul",
            "Rishabh Pant"
        ]
    );
    let teams = state.selected_teams.as_ref().expect("teams should parse");
    assert_eq!(teams.home, "India");
    assert_eq!(teams.away, "Australia");
}

#[test]
fn roster_does_not_depend_on_teams() {
    let mut state = loaded(&["M1 - CSK vs MI", "M2 - RCB vs KKR"]);
    state.select_match(0);
    let first = state.picker.option_names().join(",");
    state.select_match(1);
    assert_eq!(state.picker.option_names().join(","), first);
    assert_eq!(state.picker.options.len(), PLACEHOLDER_PLAYERS.len());
}

#[test]
fn non_matching_label_keeps_picker_state() {
    let mut state = loaded(&["Schedule TBC", "M2 - RCB vs KKR"]);

    // Picker still disabled: selection moves, picker untouched.
    assert!(state.select_match(0));
    assert_eq!(state.selected_match_index, Some(0));
    assert!(!state.picker.enabled);
    assert!(state.picker.options.is_empty());

    // Picker enabled with a choice: the bad label leaves it as it was.
    state.select_match(1);
    state.picker.cursor = 2;
    state.picker.toggle_at_cursor();
    let before = state.picker.clone();
    assert!(state.select_match(0));
    assert_eq!(state.selected_match_index, Some(0));
    assert_eq!(state.picker, before);
    assert_eq!(state.picker.selected_names(), vec!["MS Dhoni".to_string()]);
    assert_eq!(state.selected_teams, None);
}

#[test]
fn teams_follow_the_selected_match() {
    let mut state = loaded(&["M1 - CSK vs MI", "TBC"]);
    state.select_match(0);
    assert_eq!(
        state.selected_teams.as_ref().map(|t| t.home.as_str()),
        Some("CSK")
    );

    state.select_match(1);
    assert_eq!(state.selected_match_label(), Some("TBC"));
    assert_eq!(state.selected_teams, None);
    assert!(state.picker.enabled);
    assert_eq!(state.picker.options.len(), PLACEHOLDER_PLAYERS.len());
}

#[test]
fn selecting_out_of_range_or_before_load_is_ignored() {
    let mut state = AppState::new();
    assert!(!state.select_match(0));
    assert_eq!(state.selected_match_index, None);

    let mut state = loaded(&["M1 - CSK vs MI"]);
    assert!(!state.select_match(3));
    assert_eq!(state.selected_match_index, None);
}

#[test]
fn submit_collects_preferences() {
    let mut state = loaded(&["M1 - CSK vs MI", "M2 - RCB vs KKR"]);
    state.select_match(1);
    state.focus = Focus::Players;
    state.select_next();
    state.picker.toggle_at_cursor();
    state.cycle_risk();
    state.cycle_risk();
    state.cycle_team_pref();

    let cmd = state.submit_best_xi().expect("selection should produce a command");
    let ProviderCommand::FetchBestXi {
        match_index,
        request,
    } = cmd
    else {
        panic!("expected a best-xi command");
    };
    assert_eq!(match_index, 1);
    assert_eq!(request.must_include_players, vec!["Rohit Sharma".to_string()]);
    assert_eq!(state.risk, RiskPreference::Medium);
    assert_eq!(request.risk_rating, "Medium");
    assert_eq!(state.team_pref, TeamPreference::Consistency);
    assert_eq!(request.team_preference, "consistency");
    assert!(state.active_alert().is_none());
}

#[test]
fn best_xi_groups_players_and_shows_panel() {
    let mut state = loaded(&["M1 - CSK vs MI"]);
    state.pending_best_xi = 1;
    apply_delta(
        &mut state,
        Delta::SetBestXi(BestXiResponse {
            match_label: Some("M1 - CSK vs MI".to_string()),
            players: vec![
                player("A", "Batsman", Some("High")),
                player("B", "Batsman", Some("Low")),
                player("C", "Wicketkeeper", Some("Medium")),
                player("D", "All-rounder", None),
                player("E", "Bowler", Some("Low")),
                player("F", "Coach", Some("Low")),
                player("G", "batsman", Some("Low")),
            ],
        }),
    );

    assert!(state.results_visible);
    assert_eq!(state.pending_best_xi, 0);
    assert_eq!(state.lineup.batsmen.len(), 2);
    assert_eq!(state.lineup.wicketkeepers.len(), 1);
    assert_eq!(state.lineup.all_rounders.len(), 1);
    assert_eq!(state.lineup.bowlers.len(), 1);
    assert_eq!(state.lineup.len(), 5);
    assert_eq!(state.lineup.batsmen[0].risk_class, RiskClass::High);
    assert_eq!(state.lineup.all_rounders[0].risk_class, RiskClass::Low);
    assert_eq!(state.lineup.all_rounders[0].risk, "Risk: -");
    assert_eq!(state.lineup_match.as_deref(), Some("M1 - CSK vs MI"));
    assert!(state.active_alert().is_none());
}

#[test]
fn new_lineup_replaces_previous_groups() {
    let mut state = loaded(&["M1 - CSK vs MI"]);
    apply_delta(
        &mut state,
        Delta::SetBestXi(BestXiResponse {
            match_label: None,
            players: vec![player("A", "Batsman", None), player("B", "Bowler", None)],
        }),
    );
    apply_delta(
        &mut state,
        Delta::SetBestXi(BestXiResponse {
            match_label: None,
            players: vec![player("C", "Bowler", None)],
        }),
    );
    assert!(state.lineup.batsmen.is_empty());
    assert_eq!(state.lineup.bowlers.len(), 1);
    assert_eq!(state.lineup.bowlers[0].name, "C");
}

#[test]
fn empty_lineup_alerts_without_revealing_panel() {
    let mut state = loaded(&["M1 - CSK vs MI"]);
    apply_delta(&mut state, Delta::SetBestXi(BestXiResponse::default()));
    assert!(!state.results_visible);
    assert_eq!(state.active_alert(), Some(NO_PLAYERS_ALERT));
}

#[test]
fn failure_alerts_and_keeps_previous_lineup() {
    let mut state = loaded(&["M1 - CSK vs MI"]);
    apply_delta(
        &mut state,
        Delta::SetBestXi(BestXiResponse {
            match_label: None,
            players: vec![player("A", "Batsman", None)],
        }),
    );
    state.pending_best_xi = 1;
    apply_delta(
        &mut state,
        Delta::BestXiFailed("http 500 Internal Server Error: boom".to_string()),
    );

    assert!(state.results_visible);
    assert_eq!(state.lineup.batsmen.len(), 1);
    assert_eq!(state.pending_best_xi, 0);
    assert_eq!(
        state.active_alert(),
        Some("Error: http 500 Internal Server Error: boom")
    );
    assert!(state.logs.iter().any(|l| l.starts_with("[ERROR]")));
}

#[test]
fn alerts_queue_until_dismissed() {
    let mut state = AppState::new();
    assert!(state.submit_best_xi().is_none());
    apply_delta(&mut state, Delta::BestXiFailed("timeout".to_string()));
    assert_eq!(state.active_alert(), Some(SELECT_MATCH_ALERT));
    state.dismiss_alert();
    assert_eq!(state.active_alert(), Some("Error: timeout"));
    state.dismiss_alert();
    assert!(state.active_alert().is_none());
}

#[test]
fn matches_failure_is_inline_and_logged() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::MatchesFailed("request failed".to_string()));
    assert_eq!(
        state.match_status,
        MatchListStatus::Failed("request failed".to_string())
    );
    assert!(state.alerts.is_empty());
    assert!(
        state
            .logs
            .iter()
            .any(|l| l == "[ERROR] Error fetching matches: request failed")
    );
}

#[test]
fn log_is_bounded() {
    let mut state = AppState::new();
    for i in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] line 249"));
}
