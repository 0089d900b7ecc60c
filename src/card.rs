use crate::api::PlayerResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClass {
    High,
    Medium,
    Low,
}

impl RiskClass {
    /// Exact, case-sensitive match. Anything unrecognised, or missing, is low.
    pub fn from_rating(rating: Option<&str>) -> Self {
        match rating {
            Some("High") => RiskClass::High,
            Some("Medium") => RiskClass::Medium,
            _ => RiskClass::Low,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            RiskClass::High => "risk-high",
            RiskClass::Medium => "risk-medium",
            RiskClass::Low => "risk-low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCard {
    pub name: String,
    pub team: String,
    pub position: String,
    pub risk: String,
    pub risk_class: RiskClass,
    pub consistency: String,
    pub upside: String,
    pub total_fp: String,
}

impl PlayerCard {
    pub fn lines(&self) -> [&str; 7] {
        [
            &self.name,
            &self.team,
            &self.position,
            &self.risk,
            &self.consistency,
            &self.upside,
            &self.total_fp,
        ]
    }
}

pub fn render_card(player: &PlayerResult) -> PlayerCard {
    let rating = player.risk_rating.as_deref();
    PlayerCard {
        name: player.full_name.clone(),
        team: format!("Team: {}", player.current_team),
        position: format!("Position: {}", player.position),
        risk: format!("Risk: {}", rating.unwrap_or("-")),
        risk_class: RiskClass::from_rating(rating),
        consistency: format!("Consistency: {}", format_score(player.consistency)),
        upside: format!("Upside: {}", format_score(player.upside_potential)),
        total_fp: format!("Total FP: {}", format_score(player.total_fp)),
    }
}

/// One digit after the point. Exact halves round away from zero, so `7.25`
/// gives `7.3`; `{:.1}` alone would give `7.2`.
pub fn format_score(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // Negative zero prints without its sign.
    let value = if value == 0.0 { 0.0 } else { value };
    // A tie at one decimal is only representable as a multiple of 0.25 with an odd quarter count.
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.abs() % 2.0 == 1.0 {
        return format!("{:.1}", (value * 10.0).round() / 10.0);
    }
    format!("{value:.1}")
}
