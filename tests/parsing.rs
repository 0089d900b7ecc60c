use std::fs;
use std::path::PathBuf;

use best_xi_terminal::api::{
    BestXiRequest, best_xi_url, error_detail, matches_url, normalize_base_url,
    parse_best_xi_json, parse_float_prefix, parse_matches_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_matches_fixture() {
    let raw = read_fixture("matches.json");
    let matches = parse_matches_json(&raw).expect("fixture should parse");
    assert_eq!(matches.len(), 4);
    assert_eq!(matches[0], "M1 - CSK vs MI");
    assert_eq!(matches[3], "Schedule TBC");
}

#[test]
fn matches_missing_or_null_is_empty() {
    assert!(parse_matches_json("null").expect("null should parse").is_empty());
    assert!(parse_matches_json("").expect("empty should parse").is_empty());
    assert!(parse_matches_json("{}").expect("object should parse").is_empty());
    assert!(
        parse_matches_json(r#"{"matches": null}"#)
            .expect("null list should parse")
            .is_empty()
    );
    assert!(parse_matches_json("<html>").is_err());
}

#[test]
fn parses_best_xi_fixture_with_string_scores() {
    let raw = read_fixture("best_xi.json");
    let response = parse_best_xi_json(&raw).expect("fixture should parse");
    assert_eq!(response.match_label.as_deref(), Some("M1 - CSK vs MI"));
    assert_eq!(response.players.len(), 5);

    let dhoni = &response.players[0];
    assert_eq!(dhoni.full_name, "MS Dhoni");
    assert_eq!(dhoni.current_team, "CSK");
    assert_eq!(dhoni.position, "Wicketkeeper");
    assert_eq!(dhoni.risk_rating.as_deref(), Some("Low"));
    assert_eq!(dhoni.consistency, 8.456);
    assert_eq!(dhoni.total_fp, 55.25);

    let rohit = &response.players[1];
    assert_eq!(rohit.consistency, 7.25);
    assert_eq!(rohit.total_fp, 61.0);

    let sub = &response.players[4];
    assert!(sub.consistency.is_nan());
    assert!(sub.upside_potential.is_nan());
}

#[test]
fn best_xi_missing_fields_are_tolerated() {
    let response = parse_best_xi_json(r#"{"best_xi": [{"fullName": "X", "position": null}]}"#)
        .expect("sparse player should parse");
    let player = &response.players[0];
    assert_eq!(player.full_name, "X");
    assert_eq!(player.position, "");
    assert_eq!(player.current_team, "");
    assert!(player.risk_rating.is_none());
    assert!(player.total_fp.is_nan());
    assert!(response.match_label.is_none());

    assert!(parse_best_xi_json("null").expect("null should parse").players.is_empty());
    assert!(parse_best_xi_json("{}").expect("object should parse").players.is_empty());
}

#[test]
fn float_prefix_follows_lenient_number_rules() {
    assert_eq!(parse_float_prefix("7"), 7.0);
    assert_eq!(parse_float_prefix("  8.5 pts"), 8.5);
    assert_eq!(parse_float_prefix("-2.25"), -2.25);
    assert_eq!(parse_float_prefix(".5"), 0.5);
    assert_eq!(parse_float_prefix("1e2"), 100.0);
    assert_eq!(parse_float_prefix("3e"), 3.0);
    assert_eq!(parse_float_prefix("Infinity"), f64::INFINITY);
    assert_eq!(parse_float_prefix("-Infinity"), f64::NEG_INFINITY);
    assert!(parse_float_prefix("").is_nan());
    assert!(parse_float_prefix("abc").is_nan());
    assert!(parse_float_prefix("-").is_nan());
    assert!(parse_float_prefix(".").is_nan());
}

#[test]
fn request_body_uses_backend_field_names() {
    let request = BestXiRequest {
        must_include_players: vec!["MS Dhoni".to_string()],
        risk_rating: "High".to_string(),
        team_preference: String::new(),
    };
    let json = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "must_include_players": ["MS Dhoni"],
            "risk_rating": "High",
            "team_preference": ""
        })
    );
}

#[test]
fn urls_are_built_from_normalized_base() {
    let base = normalize_base_url(" http://localhost:9000/// ");
    assert_eq!(base, "http://localhost:9000");
    assert_eq!(matches_url(&base), "http://localhost:9000/api/matches");
    assert_eq!(best_xi_url(&base, 7), "http://localhost:9000/api/best-xi/7");
    assert_eq!(normalize_base_url(""), "http://127.0.0.1:8000");
}

#[test]
fn error_detail_prefers_detail_field() {
    assert_eq!(error_detail(r#"{"detail": "Match not found"}"#), "Match not found");
    assert_eq!(
        error_detail(r#"{"detail": [{"msg": "bad"}]}"#),
        r#"[{"msg":"bad"}]"#
    );
    assert_eq!(error_detail("Internal Server Error\n"), "Internal Server Error");
    assert_eq!(error_detail(""), "");
}
