//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod auth_dialog;
pub mod campaign_dialog;
pub mod campaigns;
pub mod confirm_dialog;
pub mod create_campaign_dialog;
pub mod dashboard;
pub mod detail;
pub mod help_dialog;
pub mod landing;
pub mod layout;
pub mod quit_dialog;
pub mod recent_searches;
pub mod results;
pub mod setup;

pub use auth_dialog::{AuthDialog, AuthMode};
pub use campaign_dialog::AddToCampaignDialog;
pub use campaigns::CampaignsSection;
pub use confirm_dialog::ConfirmOpenDialog;
pub use create_campaign_dialog::CreateCampaignDialog;
pub use dashboard::{draw_dashboard, DashboardComponent, DashboardRenderContext};
pub use detail::ProfileDetailPane;
pub use help_dialog::HelpDialog;
pub use landing::LandingComponent;
pub use layout::{calculate_dashboard_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use recent_searches::RecentSearchesSection;
pub use setup::SetupComponent;
