use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const CLIENT_AGENT: &str = concat!("best_xi_terminal/", env!("CARGO_PKG_VERSION"));

/// Body of `POST /api/best-xi/{index}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestXiRequest {
    pub must_include_players: Vec<String>,
    pub risk_rating: String,
    pub team_preference: String,
}

/// One player of the returned lineup, field names as the backend sends them.
///
/// The backend serves its CSV rows untouched, so scores may be numbers or
/// numeric strings. Anything that does not parse becomes NaN.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerResult {
    #[serde(rename = "fullName", default, deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(rename = "Current_Team", default, deserialize_with = "lenient_string")]
    pub current_team: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub position: String,
    #[serde(rename = "Risk_Rating", default, deserialize_with = "lenient_opt_string")]
    pub risk_rating: Option<String>,
    #[serde(rename = "Consistency", default = "nan", deserialize_with = "lenient_f64")]
    pub consistency: f64,
    #[serde(rename = "Upside_Potential", default = "nan", deserialize_with = "lenient_f64")]
    pub upside_potential: f64,
    #[serde(rename = "Total_FP", default = "nan", deserialize_with = "lenient_f64")]
    pub total_fp: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BestXiResponse {
    pub match_label: Option<String>,
    pub players: Vec<PlayerResult>,
}

#[derive(Debug, Deserialize)]
struct MatchesPayload {
    #[serde(default)]
    matches: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct BestXiPayload {
    #[serde(rename = "match", default)]
    match_label: Option<String>,
    #[serde(default)]
    best_xi: Option<Vec<PlayerResult>>,
}

pub fn api_base_url() -> String {
    base_url_from(std::env::var("BEST_XI_API_URL").ok().as_deref())
}

fn base_url_from(raw: Option<&str>) -> String {
    normalize_base_url(raw.unwrap_or_default())
}

pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn matches_url(base: &str) -> String {
    format!("{base}/api/matches")
}

pub fn best_xi_url(base: &str, match_index: usize) -> String {
    format!("{base}/api/best-xi/{match_index}")
}

pub fn fetch_matches_from(client: &Client, base: &str) -> Result<Vec<String>> {
    let resp = client
        .get(matches_url(base))
        .header(USER_AGENT, CLIENT_AGENT)
        .send()
        .context("request failed")?;
    let body = read_success_body(resp)?;
    parse_matches_json(&body)
}

pub fn fetch_best_xi_from(
    client: &Client,
    base: &str,
    match_index: usize,
    request: &BestXiRequest,
) -> Result<BestXiResponse> {
    let resp = client
        .post(best_xi_url(base, match_index))
        .header(USER_AGENT, CLIENT_AGENT)
        .json(request)
        .send()
        .context("request failed")?;
    let body = read_success_body(resp)?;
    parse_best_xi_json(&body)
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let payload: MatchesPayload = serde_json::from_str(trimmed).context("invalid matches json")?;
    Ok(payload.matches.unwrap_or_default())
}

pub fn parse_best_xi_json(raw: &str) -> Result<BestXiResponse> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(BestXiResponse::default());
    }
    let payload: BestXiPayload = serde_json::from_str(trimmed).context("invalid best-xi json")?;
    Ok(BestXiResponse {
        match_label: payload.match_label,
        players: payload.best_xi.unwrap_or_default(),
    })
}

fn read_success_body(resp: Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        let detail = error_detail(&body);
        if detail.is_empty() {
            return Err(anyhow::anyhow!("http {status}"));
        }
        return Err(anyhow::anyhow!("http {status}: {detail}"));
    }
    Ok(body)
}

/// Pulls `detail` out of an error body, falling back to the raw text.
pub fn error_detail(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => trimmed.to_string(),
        },
        _ => trimmed.to_string(),
    }
}

/// Reads the leading decimal number of `raw`, ignoring trailing junk.
/// Returns NaN when no number is present.
pub fn parse_float_prefix(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

fn nan() -> f64 {
    f64::NAN
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float_prefix(&s),
        _ => f64::NAN,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
