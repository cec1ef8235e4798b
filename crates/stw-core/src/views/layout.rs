use serde::{Deserialize, Serialize};

/// Entries of the admin side panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavSection {
    Dashboard,
    Users,
    Teams,
    Tasks,
    Help,
}

impl NavSection {
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Users,
        Self::Teams,
        Self::Tasks,
        Self::Help,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Teams => "Teams",
            Self::Tasks => "Tasks",
            Self::Help => "Help",
        }
    }
}

/// Layout shell state: a collapsible side panel next to the top bar and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdminLayout {
    pub sidebar_collapsed: bool,
}

impl AdminLayout {
    /// Flip the side panel and return the new collapsed state.
    pub const fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }

    /// Sections to render in the side panel.
    #[must_use]
    pub const fn sections(&self) -> &'static [NavSection] {
        &NavSection::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_starts_expanded() {
        assert!(!AdminLayout::default().sidebar_collapsed);
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut layout = AdminLayout::default();
        assert!(layout.toggle_sidebar());
        assert!(!layout.toggle_sidebar());
    }

    #[test]
    fn sections_are_stable() {
        let layout = AdminLayout::default();
        let labels: Vec<_> = layout.sections().iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["Dashboard", "Users", "Teams", "Tasks", "Help"]);
    }
}
