//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for polling background work
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next row in the active list
    NextItem,
    /// Move to previous row in the active list
    PrevItem,
    /// Jump to first row
    FirstItem,
    /// Jump to last row
    LastItem,
    /// Move to next sidebar section
    NextSection,
    /// Move to previous sidebar section
    PrevSection,
    /// Re-fetch the active section's data
    RefreshSection,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling (modal overlays)
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open the keyboard shortcut reference
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Focus the search input
    FocusSearch,
    /// Blur the search input without submitting
    BlurSearch,
    /// Add character to the search input
    SearchInput(char),
    /// Remove last character from the search input
    SearchBackspace,
    /// Submit the dashboard search
    SubmitSearch,
    /// Submit the anonymous landing search (captured across the auth gate)
    SubmitLandingSearch,
    /// Re-run a saved search from the history section
    RerunSearch(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────
    NextPage,
    PrevPage,
    /// Cycle through the fixed page-size options
    CyclePageSize,

    // ─────────────────────────────────────────────────────────────────────────
    // Selection & Campaigns
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle selection of the focused result row
    ToggleRowSelection,
    /// Clear all selected rows
    ClearSelection,
    /// Select every row of the current result set
    SelectAllRows,
    /// Open the campaign picker for the current selection
    OpenAddToCampaign,
    /// Open the campaign name input
    OpenCreateCampaign,

    // ─────────────────────────────────────────────────────────────────────────
    // Results
    // ─────────────────────────────────────────────────────────────────────────
    /// Ask to open the focused profile (consent gate first)
    OpenProfile,
    /// Export the full result set to CSV
    ExportCsv,

    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the login/signup dialog
    OpenAuthDialog,
    /// Submit the auth form
    AuthSubmit,
    /// Sign the current user out
    SignOut,

    // ─────────────────────────────────────────────────────────────────────────
    // Setup Wizard
    // ─────────────────────────────────────────────────────────────────────────
    /// Confirm setup configuration
    SetupConfirm,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextSection => write!(f, "NextSection"),
            Action::PrevSection => write!(f, "PrevSection"),
            Action::RefreshSection => write!(f, "RefreshSection"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::FocusSearch => write!(f, "FocusSearch"),
            Action::BlurSearch => write!(f, "BlurSearch"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::SubmitSearch => write!(f, "SubmitSearch"),
            Action::SubmitLandingSearch => write!(f, "SubmitLandingSearch"),
            Action::RerunSearch(query) => write!(f, "RerunSearch({})", query),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::CyclePageSize => write!(f, "CyclePageSize"),
            Action::ToggleRowSelection => write!(f, "ToggleRowSelection"),
            Action::ClearSelection => write!(f, "ClearSelection"),
            Action::SelectAllRows => write!(f, "SelectAllRows"),
            Action::OpenAddToCampaign => write!(f, "OpenAddToCampaign"),
            Action::OpenCreateCampaign => write!(f, "OpenCreateCampaign"),
            Action::OpenProfile => write!(f, "OpenProfile"),
            Action::ExportCsv => write!(f, "ExportCsv"),
            Action::OpenAuthDialog => write!(f, "OpenAuthDialog"),
            Action::AuthSubmit => write!(f, "AuthSubmit"),
            Action::SignOut => write!(f, "SignOut"),
            Action::SetupConfirm => write!(f, "SetupConfirm"),
        }
    }
}
