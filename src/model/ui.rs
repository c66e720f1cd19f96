//! UI state - presentation state separate from domain data

/// Dashboard sidebar section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Search,
    RecentSearches,
    Campaigns,
}

impl Section {
    pub fn all() -> Vec<Section> {
        vec![Section::Search, Section::RecentSearches, Section::Campaigns]
    }

    pub fn name(&self) -> &str {
        match self {
            Section::Search => "Find Creators",
            Section::RecentSearches => "Recent Searches",
            Section::Campaigns => "Campaigns",
        }
    }
}

/// Main application mode
///
/// The session gate: `Loading` while the initial session fetch is pending,
/// then `Landing` (anonymous) or `Dashboard` (authenticated). Sign-in and
/// sign-out events move between the two; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Setup,
    Loading,
    Landing,
    Dashboard,
}
