use crate::fixture::MatchTeams;

/// Names offered for every match until rosters are served per match.
pub const PLACEHOLDER_PLAYERS: [&str; 6] = [
    "Virat Kohli",
    "Rohit Sharma",
    "MS Dhoni",
    "Jasprit Bumrah",
    "KL Rahul",
    "Rishabh Pant",
];

pub const PICKER_PROMPT: &str = "Select players to include";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerOption {
    pub name: String,
    pub selected: bool,
}

/// Multi-select of must-include players. Starts disabled and empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPicker {
    pub enabled: bool,
    pub options: Vec<PlayerOption>,
    pub cursor: usize,
}

impl PlayerPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the picker and replaces its options. The teams are accepted
    /// but the option list is the fixed placeholder set.
    pub fn populate(&mut self, _teams: &MatchTeams) {
        self.enabled = true;
        self.options.clear();
        self.options
            .extend(PLACEHOLDER_PLAYERS.iter().map(|name| PlayerOption {
                name: (*name).to_string(),
                selected: false,
            }));
        self.cursor = 0;
    }

    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }

    /// Selected names in option order.
    pub fn selected_names(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.name.clone())
            .collect()
    }

    pub fn toggle_at_cursor(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(option) = self.options.get_mut(self.cursor) else {
            return false;
        };
        option.selected = !option.selected;
        true
    }

    pub fn cursor_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1).min(self.options.len() - 1);
    }

    pub fn cursor_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> MatchTeams {
        MatchTeams {
            home: "CSK".to_string(),
            away: "MI".to_string(),
        }
    }

    #[test]
    fn disabled_picker_ignores_toggle() {
        let mut picker = PlayerPicker::new();
        assert!(!picker.toggle_at_cursor());
        assert!(picker.selected_names().is_empty());
    }

    #[test]
    fn repopulating_clears_previous_choices() {
        let mut picker = PlayerPicker::new();
        picker.populate(&teams());
        picker.cursor_next();
        picker.cursor_next();
        assert!(picker.toggle_at_cursor());
        assert_eq!(picker.selected_names(), vec!["MS Dhoni".to_string()]);

        picker.populate(&teams());
        assert!(picker.enabled);
        assert_eq!(picker.options.len(), PLACEHOLDER_PLAYERS.len());
        assert!(picker.selected_names().is_empty());
        assert_eq!(picker.cursor, 0);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut picker = PlayerPicker::new();
        picker.cursor_next();
        assert_eq!(picker.cursor, 0);
        picker.populate(&teams());
        for _ in 0..20 {
            picker.cursor_next();
        }
        assert_eq!(picker.cursor, PLACEHOLDER_PLAYERS.len() - 1);
        picker.cursor_prev();
        assert_eq!(picker.cursor, PLACEHOLDER_PLAYERS.len() - 2);
    }

    #[test]
    fn selected_names_follow_option_order() {
        let mut picker = PlayerPicker::new();
        picker.populate(&teams());
        picker.cursor = 5;
        picker.toggle_at_cursor();
        picker.cursor = 0;
        picker.toggle_at_cursor();
        assert_eq!(
            picker.selected_names(),
            vec!["Virat Kohli".to_string(), "Rishabh Pant".to_string()]
        );
    }
}
