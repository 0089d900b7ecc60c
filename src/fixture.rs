/// Teams named by a match label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTeams {
    pub home: String,
    pub away: String,
}

const LINE_BREAKS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Extracts the two teams from a label shaped like `M<digits> - <TeamA> vs <TeamB>`.
///
/// The pattern may start anywhere in the label. Both team names stop at a line
/// break, and when ` vs ` appears more than once the last usable one splits
/// the teams.
pub fn parse_match_teams(label: &str) -> Option<MatchTeams> {
    for (start, _) in label.match_indices('M') {
        let rest = &label[start + 1..];
        let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            continue;
        }
        let Some(rest) = rest[digits..].strip_prefix(" - ") else {
            continue;
        };
        let line = rest.split(LINE_BREAKS).next().unwrap_or_default();
        if let Some(teams) = split_teams(line) {
            return Some(teams);
        }
    }
    None
}

fn split_teams(line: &str) -> Option<MatchTeams> {
    const SEP: &str = " vs ";
    let mut idx = line.len().checked_sub(SEP.len() + 1)?;
    loop {
        if idx == 0 {
            return None;
        }
        if line.is_char_boundary(idx) && line[idx..].starts_with(SEP) {
            return Some(MatchTeams {
                home: line[..idx].to_string(),
                away: line[idx + SEP.len()..].to_string(),
            });
        }
        idx -= 1;
    }
}
