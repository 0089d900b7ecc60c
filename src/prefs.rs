use std::str::FromStr;

use anyhow::anyhow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskPreference {
    #[default]
    Any,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamPreference {
    #[default]
    TotalFp,
    Consistency,
    Upside,
}

impl RiskPreference {
    pub fn wire_value(self) -> &'static str {
        match self {
            RiskPreference::Any => "",
            RiskPreference::Low => "Low",
            RiskPreference::Medium => "Medium",
            RiskPreference::High => "High",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskPreference::Any => "Any",
            other => other.wire_value(),
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            RiskPreference::Any => RiskPreference::Low,
            RiskPreference::Low => RiskPreference::Medium,
            RiskPreference::Medium => RiskPreference::High,
            RiskPreference::High => RiskPreference::Any,
        }
    }
}

impl TeamPreference {
    pub fn wire_value(self) -> &'static str {
        match self {
            TeamPreference::TotalFp => "",
            TeamPreference::Consistency => "consistency",
            TeamPreference::Upside => "upside",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamPreference::TotalFp => "Total FP",
            TeamPreference::Consistency => "Consistency",
            TeamPreference::Upside => "Upside",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            TeamPreference::TotalFp => TeamPreference::Consistency,
            TeamPreference::Consistency => TeamPreference::Upside,
            TeamPreference::Upside => TeamPreference::TotalFp,
        }
    }
}

impl FromStr for RiskPreference {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "any" => Ok(RiskPreference::Any),
            "low" => Ok(RiskPreference::Low),
            "medium" => Ok(RiskPreference::Medium),
            "high" => Ok(RiskPreference::High),
            other => Err(anyhow!("unknown risk rating: {other}")),
        }
    }
}

impl FromStr for TeamPreference {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "total" | "total_fp" => Ok(TeamPreference::TotalFp),
            "consistency" => Ok(TeamPreference::Consistency),
            "upside" => Ok(TeamPreference::Upside),
            other => Err(anyhow!("unknown team preference: {other}")),
        }
    }
}
