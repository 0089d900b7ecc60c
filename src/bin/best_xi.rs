use anyhow::{Context, Result, bail};

use best_xi_terminal::api::{self, BestXiRequest};
use best_xi_terminal::card::PlayerCard;
use best_xi_terminal::http_client::http_client;
use best_xi_terminal::lineup::{Position, group_players};
use best_xi_terminal::prefs::{RiskPreference, TeamPreference};
use best_xi_terminal::state::{NO_MATCHES_TEXT, NO_PLAYERS_ALERT};

const USAGE: &str = "usage: best_xi [--url URL] [--match N [--include NAME]... [--risk any|low|medium|high] [--pref total|consistency|upside]]";

#[derive(Debug, Default)]
struct Args {
    url: Option<String>,
    match_index: Option<usize>,
    include: Vec<String>,
    risk: RiskPreference,
    pref: TeamPreference,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let raw = std::env::args().skip(1).collect::<Vec<_>>();
    if raw.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return Ok(());
    }
    let args = parse_args(&raw)?;

    let client = http_client()?;
    let base = args
        .url
        .as_deref()
        .map(api::normalize_base_url)
        .unwrap_or_else(api::api_base_url);

    let Some(match_index) = args.match_index else {
        let matches = api::fetch_matches_from(client, &base).context("error loading matches")?;
        if matches.is_empty() {
            println!("{NO_MATCHES_TEXT}");
        }
        for (idx, label) in matches.iter().enumerate() {
            println!("[{idx}] {label}");
        }
        return Ok(());
    };

    let request = BestXiRequest {
        must_include_players: args.include,
        risk_rating: args.risk.wire_value().to_string(),
        team_preference: args.pref.wire_value().to_string(),
    };
    let response = api::fetch_best_xi_from(client, &base, match_index, &request)
        .context("error fetching best XI")?;
    if response.players.is_empty() {
        println!("{NO_PLAYERS_ALERT}");
        return Ok(());
    }

    if let Some(label) = &response.match_label {
        println!("Best XI - {label}");
    }
    let groups = group_players(&response.players);
    for position in Position::ALL {
        let cards = groups.group(position);
        if cards.is_empty() {
            continue;
        }
        println!();
        println!("{} ({})", position.group_title(), cards.len());
        for card in cards {
            print_card(card);
        }
    }
    let dropped = response.players.len() - groups.len();
    if dropped > 0 {
        println!();
        println!("Skipped {dropped} player(s) with an unknown position");
    }

    Ok(())
}

fn print_card(card: &PlayerCard) {
    let [name, rest @ ..] = card.lines();
    println!("  {name}");
    for line in rest {
        println!("    {line}");
    }
    println!("    [{}]", card.risk_class.class_name());
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut idx = 0;
    while idx < args.len() {
        let arg = args[idx].as_str();
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag, Some(value.to_string())),
            None => (arg, None),
        };
        let value = match inline {
            Some(value) => value,
            None => {
                idx += 1;
                args.get(idx)
                    .cloned()
                    .with_context(|| format!("missing value for {flag}\n{USAGE}"))?
            }
        };
        match flag {
            "--url" => parsed.url = Some(value),
            "--match" => {
                let index = value
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("invalid match index: {value}"))?;
                parsed.match_index = Some(index);
            }
            "--include" => {
                let name = value.trim();
                if !name.is_empty() {
                    parsed.include.push(name.to_string());
                }
            }
            "--risk" => parsed.risk = value.parse()?,
            "--pref" => parsed.pref = value.parse()?,
            other => bail!("unknown argument: {other}\n{USAGE}"),
        }
        idx += 1;
    }
    Ok(parsed)
}
