//! Root application component
//!
//! The App struct implements the Component trait, acting as the root that
//! delegates event handling and rendering to child components. It owns the
//! session gate (Loading -> Landing/Dashboard), the modal stack, and the
//! background task runners the service calls report through.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_dashboard, AddToCampaignDialog, AuthDialog, AuthMode, CampaignsSection,
    ConfirmOpenDialog, CreateCampaignDialog, DashboardComponent, DashboardRenderContext,
    HelpDialog, LandingComponent, ProfileDetailPane, QuitDialog, RecentSearchesSection,
    SetupComponent,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{
    merge_influencers, AppMode, Campaign, CampaignInfluencer, InfluencerProfile, RecentSearch,
    Section, Session, SessionEvent,
};
use crate::services::{
    export_profiles, ApiError, AuthClient, SearchClient, SignUpOutcome, StoreClient, TaskRunner,
};
use anyhow::Result;
use chrono::{Local, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{layout::Rect, Frame};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread;

/// Where signup confirmation mails point back to
const SIGNUP_REDIRECT: &str = "https://influwize.com";

/// Outcome of a background sign-in/sign-up request
enum AuthOutcome {
    SignedIn,
    ConfirmationEmailSent,
    Failed(String),
}

/// Result of the campaign assignment fan-out
struct AssignReport {
    updated: usize,
    failures: Vec<String>,
}

/// Connected service clients
struct Services {
    auth: Arc<AuthClient>,
    store: Arc<StoreClient>,
    search: Arc<SearchClient>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode (the session gate's state)
    pub mode: AppMode,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display in the status line
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Current config
    pub config: Option<Config>,

    /// Connected service clients (absent until setup completes)
    services: Option<Services>,

    /// Current session; `None` means anonymous
    session: Option<Session>,

    /// Session-change subscription; dropped on teardown
    session_events: Option<Receiver<SessionEvent>>,

    /// Query captured from an anonymous search, replayed after sign-in
    pending_query: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Background tasks
    // ─────────────────────────────────────────────────────────────────────────
    session_task: TaskRunner<Option<Session>>,
    search_task: TaskRunner<std::result::Result<Vec<InfluencerProfile>, ApiError>>,
    auth_task: TaskRunner<AuthOutcome>,
    searches_task: TaskRunner<std::result::Result<Vec<RecentSearch>, ApiError>>,
    campaigns_task: TaskRunner<std::result::Result<Vec<Campaign>, ApiError>>,
    dialog_campaigns_task: TaskRunner<std::result::Result<Vec<Campaign>, ApiError>>,
    create_task: TaskRunner<std::result::Result<(), ApiError>>,
    assign_task: TaskRunner<AssignReport>,
    signout_task: TaskRunner<()>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub landing: LandingComponent,
    pub auth_dialog: AuthDialog,
    pub dashboard: DashboardComponent,
    pub recent: RecentSearchesSection,
    pub campaigns: CampaignsSection,
    pub add_dialog: AddToCampaignDialog,
    pub create_dialog: CreateCampaignDialog,
    pub confirm_dialog: ConfirmOpenDialog,
    pub detail: ProfileDetailPane,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub setup: SetupComponent,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App instance
    pub fn new() -> App {
        if let Some(config) = Config::load() {
            let mut app = Self::create_app(AppMode::Loading);
            app.connect_services(config);
            app.spawn_session_fetch();
            app
        } else {
            // No config exists, show the setup wizard
            Self::create_app(AppMode::Setup)
        }
    }

    fn create_app(mode: AppMode) -> App {
        App {
            mode,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            config: None,
            services: None,
            session: None,
            session_events: None,
            pending_query: None,
            session_task: TaskRunner::new(),
            search_task: TaskRunner::new(),
            auth_task: TaskRunner::new(),
            searches_task: TaskRunner::new(),
            campaigns_task: TaskRunner::new(),
            dialog_campaigns_task: TaskRunner::new(),
            create_task: TaskRunner::new(),
            assign_task: TaskRunner::new(),
            signout_task: TaskRunner::new(),
            // Components
            landing: LandingComponent::new(),
            auth_dialog: AuthDialog::new(),
            dashboard: DashboardComponent::new(),
            recent: RecentSearchesSection::new(),
            campaigns: CampaignsSection::new(),
            add_dialog: AddToCampaignDialog::new(),
            create_dialog: CreateCampaignDialog::default(),
            confirm_dialog: ConfirmOpenDialog,
            detail: ProfileDetailPane::default(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            setup: SetupComponent::new(),
        }
    }

    /// Build service clients from the config and subscribe to session
    /// changes
    fn connect_services(&mut self, config: Config) {
        let session_path = Config::session_path();

        let auth = AuthClient::new(&config.backend_url, &config.backend_anon_key, session_path);
        let store = StoreClient::new(&config.backend_url, &config.backend_anon_key);
        let search = SearchClient::new(&config.search_api_url, 60);

        match (auth, store, search) {
            (Ok(auth), Ok(store), Ok(search)) => {
                let auth = Arc::new(auth);
                self.session_events = Some(auth.subscribe());
                self.services = Some(Services {
                    auth,
                    store: Arc::new(store),
                    search: Arc::new(search),
                });
                self.config = Some(config);
            }
            _ => {
                self.error = Some("Failed to initialize service clients".to_string());
            }
        }
    }

    /// One-shot session restore on startup; the gate stays in Loading
    /// until it resolves
    fn spawn_session_fetch(&mut self) {
        let Some(services) = &self.services else {
            self.mode = AppMode::Landing;
            return;
        };
        let auth = services.auth.clone();
        self.session_task.spawn(move || auth.current_session());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search orchestration
    // ─────────────────────────────────────────────────────────────────────────

    /// Submit the dashboard search input.
    ///
    /// Empty-after-trim queries are a no-op. The history write is
    /// fire-and-forget: its failure is logged, never surfaced, and never
    /// blocks the search itself.
    fn submit_search(&mut self) {
        let query = self.dashboard.search_input.trim().to_string();
        if query.is_empty() {
            return;
        }
        let Some(services) = &self.services else {
            return;
        };
        let Some(session) = self.session.clone() else {
            return;
        };

        self.error = None;
        self.dashboard.search_focus = false;
        self.dashboard.results.has_searched = true;

        let store = services.store.clone();
        let history_query = query.clone();
        thread::spawn(move || {
            if let Err(err) = store.save_search(&session, &history_query) {
                tracing::warn!(error = %err, query = %history_query, "failed to save search history");
            }
        });

        let search = services.search.clone();
        self.search_task.spawn(move || search.fetch_profiles(&query));
    }

    /// Export the full (unpaginated) result set to CSV
    fn export_results(&mut self) {
        if self.dashboard.results.results.is_empty() {
            self.status_message = Some("Nothing to export yet".to_string());
            return;
        }
        let dir = self
            .config
            .as_ref()
            .map(|c| c.export_dir())
            .unwrap_or_else(|| std::path::PathBuf::from("."));

        match export_profiles(
            &self.dashboard.results.results,
            &dir,
            Local::now().date_naive(),
        ) {
            Ok(path) => {
                self.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(err) => {
                tracing::error!(error = %err, "CSV export failed");
                self.error = Some(format!("Export failed: {err}"));
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Section data
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the active section's data (recent searches / campaigns)
    fn load_section_data(&mut self) {
        let Some(services) = &self.services else {
            return;
        };
        let Some(session) = self.session.clone() else {
            return;
        };

        match self.dashboard.section {
            Section::Search => {}
            Section::RecentSearches => {
                self.recent.loading = true;
                let store = services.store.clone();
                self.searches_task
                    .spawn(move || store.recent_searches(&session));
            }
            Section::Campaigns => {
                self.campaigns.loading = true;
                let store = services.store.clone();
                self.campaigns_task.spawn(move || store.campaigns(&session));
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Campaign assignment
    // ─────────────────────────────────────────────────────────────────────────

    /// Fan the current selection out to every checked campaign.
    ///
    /// Per-campaign failures are logged and reported but do not abort the
    /// remaining campaigns; the fan-out is best-effort, not atomic.
    fn spawn_assignment(&mut self) {
        let targets = self.add_dialog.checked_targets();
        if targets.is_empty() {
            return;
        }
        let Some(services) = &self.services else {
            return;
        };
        let Some(session) = self.session.clone() else {
            return;
        };

        let now = Utc::now();
        let snapshots: Vec<CampaignInfluencer> = self
            .dashboard
            .results
            .selected_profiles()
            .iter()
            .map(|p| CampaignInfluencer::snapshot(p, now))
            .collect();

        self.add_dialog.assigning = true;
        let store = services.store.clone();
        self.assign_task.spawn(move || {
            let mut report = AssignReport {
                updated: 0,
                failures: Vec::new(),
            };
            for campaign in targets {
                let result = store
                    .campaign_influencers(&session, &campaign.id)
                    .map(|existing| merge_influencers(existing, &snapshots))
                    .and_then(|merged| {
                        store.set_campaign_influencers(&session, &campaign.id, &merged)
                    });
                match result {
                    Ok(()) => report.updated += 1,
                    Err(err) => {
                        tracing::error!(
                            campaign = %campaign.name,
                            error = %err,
                            "failed to update campaign"
                        );
                        report.failures.push(campaign.name.clone());
                    }
                }
            }
            report
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────

    fn spawn_auth_request(&mut self) {
        if !self.auth_dialog.validate() {
            return;
        }
        let Some(services) = &self.services else {
            return;
        };

        self.auth_dialog.loading = true;
        self.auth_dialog.notice = None;

        let auth = services.auth.clone();
        let mode = self.auth_dialog.mode;
        let email = self.auth_dialog.email.clone();
        let password = self.auth_dialog.password.clone();

        self.auth_task.spawn(move || match mode {
            AuthMode::Login => match auth.sign_in_with_password(&email, &password) {
                Ok(_) => AuthOutcome::SignedIn,
                Err(err) => AuthOutcome::Failed(err.to_string()),
            },
            AuthMode::Signup => match auth.sign_up(&email, &password, SIGNUP_REDIRECT) {
                Ok(SignUpOutcome::SignedIn(_)) => AuthOutcome::SignedIn,
                Ok(SignUpOutcome::ConfirmationEmailSent) => AuthOutcome::ConfirmationEmailSent,
                Err(err) => AuthOutcome::Failed(err.to_string()),
            },
        });
    }

    fn spawn_sign_out(&mut self) {
        let Some(services) = &self.services else {
            return;
        };
        let auth = services.auth.clone();
        self.signout_task.spawn(move || auth.sign_out());
    }

    fn apply_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SignedIn(session) => {
                self.session = Some(session);
                self.mode = AppMode::Dashboard;
                self.auth_dialog.loading = false;
                if self.modals.top() == Some(&Modal::Auth) {
                    self.modals.pop();
                }
                // Replay the query captured across the auth boundary
                if let Some(query) = self.pending_query.take() {
                    self.dashboard.section = Section::Search;
                    self.dashboard.search_input = query;
                    self.submit_search();
                }
            }
            SessionEvent::SignedOut => {
                self.session = None;
                self.dashboard.teardown();
                self.recent = RecentSearchesSection::new();
                self.campaigns = CampaignsSection::new();
                self.detail.clear();
                while self.modals.pop().is_some() {}
                // In-flight requests are not aborted, but their results
                // must not land in the anonymous view
                self.search_task.clear();
                self.searches_task.clear();
                self.campaigns_task.clear();
                self.dialog_campaigns_task.clear();
                self.create_task.clear();
                self.assign_task.clear();
                self.mode = AppMode::Landing;
                self.status_message = None;
                self.error = None;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Background polling
    // ─────────────────────────────────────────────────────────────────────────

    fn poll_background(&mut self) {
        // Session-change subscription
        let mut events = Vec::new();
        if let Some(rx) = &self.session_events {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }
        for event in events {
            self.apply_session_event(event);
        }

        // Initial session restore
        if let Some(restored) = self.session_task.poll() {
            if self.mode == AppMode::Loading {
                match restored {
                    Some(session) => {
                        self.session = Some(session);
                        self.mode = AppMode::Dashboard;
                    }
                    None => self.mode = AppMode::Landing,
                }
            }
        }

        // Search results: replace the set, back to page 1; failures clear it
        if let Some(result) = self.search_task.poll() {
            match result {
                Ok(results) => {
                    self.status_message = Some(format!("{} results", results.len()));
                    self.dashboard.results.set_results(results);
                }
                Err(err) => {
                    tracing::error!(error = %err, "search request failed");
                    self.dashboard.results.clear_results();
                    self.error = Some("Search failed. Please try again.".to_string());
                }
            }
        }

        // Auth dialog request
        if let Some(outcome) = self.auth_task.poll() {
            match outcome {
                AuthOutcome::SignedIn => {
                    // the session event closes the dialog; nothing more here
                    self.auth_dialog.loading = false;
                }
                AuthOutcome::ConfirmationEmailSent => {
                    self.auth_dialog.loading = false;
                    self.auth_dialog.notice = Some(
                        "Account created! Check your email to confirm your account.".to_string(),
                    );
                }
                AuthOutcome::Failed(message) => {
                    self.auth_dialog.set_provider_error(&message);
                }
            }
        }

        // Recent searches section
        if let Some(result) = self.searches_task.poll() {
            match result {
                Ok(searches) => self.recent.set_searches(searches),
                Err(err) => {
                    tracing::error!(error = %err, "failed to load recent searches");
                    self.recent.loading = false;
                    self.error = Some("Failed to load recent searches".to_string());
                }
            }
        }

        // Campaigns section
        if let Some(result) = self.campaigns_task.poll() {
            match result {
                Ok(campaigns) => self.campaigns.set_campaigns(campaigns),
                Err(err) => {
                    tracing::error!(error = %err, "failed to load campaigns");
                    self.campaigns.loading = false;
                    self.error = Some("Failed to load campaigns".to_string());
                }
            }
        }

        // Campaign picker contents
        if let Some(result) = self.dialog_campaigns_task.poll() {
            match result {
                Ok(campaigns) => self.add_dialog.set_campaigns(campaigns),
                Err(err) => {
                    tracing::error!(error = %err, "failed to load campaigns for picker");
                    self.add_dialog.loading = false;
                    self.add_dialog.error = Some("Failed to load campaigns".to_string());
                }
            }
        }

        // Campaign creation
        if let Some(result) = self.create_task.poll() {
            match result {
                Ok(()) => {
                    self.status_message = Some("Campaign created successfully!".to_string());
                    if matches!(self.modals.top(), Some(Modal::CreateCampaign)) {
                        self.modals.pop();
                    }
                    if self.dashboard.section == Section::Campaigns {
                        self.load_section_data();
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "failed to create campaign");
                    self.create_dialog.loading = false;
                    self.create_dialog.error = Some("Failed to create campaign".to_string());
                }
            }
        }

        // Assignment fan-out: even a partial outcome clears the selection
        // and closes the dialog
        if let Some(report) = self.assign_task.poll() {
            self.add_dialog.assigning = false;
            self.dashboard.results.clear_selection();
            if matches!(self.modals.top(), Some(Modal::AddToCampaign)) {
                self.modals.pop();
            }
            if report.failures.is_empty() {
                self.status_message = Some(format!(
                    "Influencers added to {} campaign(s)",
                    report.updated
                ));
            } else {
                self.error = Some(format!(
                    "Updated {} campaign(s); failed: {}",
                    report.updated,
                    report.failures.join(", ")
                ));
            }
            if self.dashboard.section == Section::Campaigns {
                self.load_section_data();
            }
        }

        let _ = self.signout_task.poll();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.mode {
            AppMode::Setup => self.setup.handle_key_event(key),
            AppMode::Loading => {
                let action = match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => Some(Action::ForceQuit),
                    _ => None,
                };
                Ok(action)
            }
            AppMode::Landing => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.handle_modal_key_event(&modal, key)
                } else {
                    self.landing.handle_key_event(key)
                }
            }
            AppMode::Dashboard => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.handle_modal_key_event(&modal, key)
                } else if self.dashboard.search_focus {
                    self.handle_search_key_event(key)
                } else {
                    self.handle_dashboard_key_event(key)
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.poll_background(),
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => match self.dashboard.section {
                Section::Search => self.dashboard.results.next_row(),
                Section::RecentSearches => self.recent.select_next(),
                Section::Campaigns => self.campaigns.select_next(),
            },
            Action::PrevItem => match self.dashboard.section {
                Section::Search => self.dashboard.results.prev_row(),
                Section::RecentSearches => self.recent.select_prev(),
                Section::Campaigns => self.campaigns.select_prev(),
            },
            Action::FirstItem => self.dashboard.results.first_row(),
            Action::LastItem => self.dashboard.results.last_row(),
            Action::NextSection => {
                self.dashboard.next_section();
                self.load_section_data();
            }
            Action::PrevSection => {
                self.dashboard.prev_section();
                self.load_section_data();
            }
            Action::RefreshSection => self.load_section_data(),

            // ─────────────────────────────────────────────────────────────────
            // Modal scrolling
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                match self.modals.top() {
                    Some(Modal::ProfileDetail) => {
                        self.detail.update(action)?;
                    }
                    Some(Modal::Help) => {
                        self.help_dialog.update(action)?;
                    }
                    _ => {}
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                if matches!(self.modals.top(), Some(Modal::ProfileDetail)) {
                    self.detail.clear();
                }
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if let Some(modal) = self.modals.top().cloned() {
                    match modal {
                        Modal::ConfirmOpen { username } => {
                            // Consent given: one credit, open the pane
                            let profile = self
                                .dashboard
                                .results
                                .results
                                .iter()
                                .find(|p| p.username == username)
                                .cloned();
                            self.modals.pop();
                            if let Some(profile) = profile {
                                self.detail.set_profile(profile);
                                self.modals.push(Modal::ProfileDetail);
                            }
                        }
                        Modal::AddToCampaign => {
                            self.spawn_assignment();
                        }
                        Modal::CreateCampaign => {
                            let name = self.create_dialog.name.trim().to_string();
                            if !name.is_empty() {
                                if let (Some(services), Some(session)) =
                                    (&self.services, self.session.clone())
                                {
                                    self.create_dialog.loading = true;
                                    let store = services.store.clone();
                                    self.create_task
                                        .spawn(move || store.create_campaign(&session, &name));
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::FocusSearch => self.dashboard.search_focus = true,
            Action::BlurSearch => self.dashboard.search_focus = false,
            Action::SearchInput(c) => self.dashboard.search_input.push(c),
            Action::SearchBackspace => {
                self.dashboard.search_input.pop();
            }
            Action::SubmitSearch => self.submit_search(),
            Action::SubmitLandingSearch => {
                let query = self.landing.search_input.trim().to_string();
                if !query.is_empty() {
                    // capture the intent, then make the user sign in
                    self.pending_query = Some(query);
                    self.auth_dialog.open(AuthMode::Signup);
                    self.modals.push(Modal::Auth);
                }
            }
            Action::RerunSearch(query) => {
                self.dashboard.section = Section::Search;
                self.dashboard.search_input = query;
                self.submit_search();
            }

            // ─────────────────────────────────────────────────────────────────
            // Pagination
            // ─────────────────────────────────────────────────────────────────
            Action::NextPage => self.dashboard.results.next_page(),
            Action::PrevPage => self.dashboard.results.prev_page(),
            Action::CyclePageSize => self.dashboard.results.cycle_page_size(),

            // ─────────────────────────────────────────────────────────────────
            // Selection & Campaigns
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleRowSelection => self.dashboard.results.toggle_selection(),
            Action::ClearSelection => self.dashboard.results.clear_selection(),
            Action::SelectAllRows => self.dashboard.results.select_all(),
            Action::OpenAddToCampaign => {
                if self.dashboard.results.selected.is_empty() {
                    self.error = Some("Please select at least one influencer.".to_string());
                } else if let (Some(services), Some(session)) =
                    (&self.services, self.session.clone())
                {
                    self.add_dialog.open();
                    self.modals.push(Modal::AddToCampaign);
                    let store = services.store.clone();
                    self.dialog_campaigns_task
                        .spawn(move || store.campaigns(&session));
                }
            }
            Action::OpenCreateCampaign => {
                self.create_dialog.open();
                self.modals.push(Modal::CreateCampaign);
            }

            // ─────────────────────────────────────────────────────────────────
            // Results
            // ─────────────────────────────────────────────────────────────────
            Action::OpenProfile => {
                if let Some(profile) = self.dashboard.results.focused() {
                    self.modals.push(Modal::ConfirmOpen {
                        username: profile.username.clone(),
                    });
                }
            }
            Action::ExportCsv => self.export_results(),

            // ─────────────────────────────────────────────────────────────────
            // Auth / Session
            // ─────────────────────────────────────────────────────────────────
            Action::OpenAuthDialog => {
                self.auth_dialog.open(AuthMode::Login);
                self.modals.push(Modal::Auth);
            }
            Action::AuthSubmit => self.spawn_auth_request(),
            Action::SignOut => self.spawn_sign_out(),

            // ─────────────────────────────────────────────────────────────────
            // Setup
            // ─────────────────────────────────────────────────────────────────
            Action::SetupConfirm => {
                if let Some(config) = self.setup.get_config().cloned() {
                    self.connect_services(config);
                    self.mode = AppMode::Loading;
                    self.spawn_session_fetch();
                }
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Setup => self.setup.draw(frame, area)?,
            AppMode::Loading => self.draw_loading(frame, area),
            AppMode::Landing => {
                self.landing.draw(frame, area)?;
                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }
            }
            AppMode::Dashboard => {
                let email = self
                    .session
                    .as_ref()
                    .map(|s| s.user.email.as_str())
                    .unwrap_or("");
                let ctx = DashboardRenderContext {
                    email,
                    error: self.error.as_deref(),
                    status_message: self.status_message.as_deref(),
                    search_loading: self.search_task.is_running(),
                };

                draw_dashboard(
                    frame,
                    area,
                    &mut self.dashboard,
                    &mut self.recent,
                    &mut self.campaigns,
                    &ctx,
                )?;

                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Auth => self.auth_dialog.handle_key_event(key),
            Modal::ConfirmOpen { .. } => self.confirm_dialog.handle_key_event(key),
            Modal::ProfileDetail => self.detail.handle_key_event(key),
            Modal::AddToCampaign => self.add_dialog.handle_key_event(key),
            Modal::CreateCampaign => self.create_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::BlurSearch),
            KeyCode::Enter => Some(Action::SubmitSearch),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn handle_dashboard_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Global keys first, then the active section
        let action = match key.code {
            KeyCode::Tab => Some(Action::NextSection),
            KeyCode::BackTab => Some(Action::PrevSection),
            KeyCode::Char('/') => Some(Action::FocusSearch),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('S') => Some(Action::SignOut),
            _ => None,
        };
        if action.is_some() {
            return Ok(action);
        }

        match self.dashboard.section {
            Section::Search => self.dashboard.handle_key_event(key),
            Section::RecentSearches => self.recent.handle_key_event(key),
            Section::Campaigns => self.campaigns.handle_key_event(key),
        }
    }

    fn draw_loading(&self, frame: &mut Frame, area: Rect) {
        let vertical_center = area.height / 2;
        let loading_area = Rect::new(area.x, vertical_center, area.width, 1);
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Checking session...",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, loading_area);
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Auth => self.auth_dialog.draw(frame, area)?,
            Modal::ConfirmOpen { username } => {
                self.confirm_dialog.draw_for(frame, area, username)?;
            }
            Modal::ProfileDetail => self.detail.draw(frame, area)?,
            Modal::AddToCampaign => self.add_dialog.draw(frame, area)?,
            Modal::CreateCampaign => self.create_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AuthUser;

    fn test_session() -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: String::new(),
            user: AuthUser {
                id: "u1".to_string(),
                email: "jane@example.com".to_string(),
            },
        }
    }

    fn profiles(n: usize) -> Vec<InfluencerProfile> {
        (0..n)
            .map(|i| serde_json::from_str(&format!(r#"{{"username": "user{i}"}}"#)).unwrap())
            .collect()
    }

    #[test]
    fn test_sign_in_moves_gate_to_dashboard() {
        let mut app = App::create_app(AppMode::Landing);
        app.modals.push(Modal::Auth);

        app.apply_session_event(SessionEvent::SignedIn(test_session()));

        assert_eq!(app.mode, AppMode::Dashboard);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_pending_query_is_replayed_after_sign_in() {
        let mut app = App::create_app(AppMode::Landing);
        app.pending_query = Some("tech influencers".to_string());

        app.apply_session_event(SessionEvent::SignedIn(test_session()));

        assert_eq!(app.dashboard.search_input, "tech influencers");
        assert!(app.pending_query.is_none());
    }

    #[test]
    fn test_sign_out_returns_to_landing_and_clears_state() {
        let mut app = App::create_app(AppMode::Dashboard);
        app.session = Some(test_session());
        app.dashboard.results.set_results(profiles(3));
        app.dashboard.results.toggle_selection();
        app.modals.push(Modal::Help);

        app.apply_session_event(SessionEvent::SignedOut);

        assert_eq!(app.mode, AppMode::Landing);
        assert!(app.session.is_none());
        assert!(app.dashboard.results.results.is_empty());
        assert!(app.dashboard.results.selected.is_empty());
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_empty_dashboard_query_issues_no_request() {
        let mut app = App::create_app(AppMode::Dashboard);
        app.session = Some(test_session());
        app.dashboard.search_input = "   ".to_string();

        app.update(Action::SubmitSearch).unwrap();

        assert!(!app.search_task.is_running());
        assert!(!app.dashboard.results.has_searched);
    }

    #[test]
    fn test_empty_landing_query_does_not_open_auth() {
        let mut app = App::create_app(AppMode::Landing);
        app.landing.search_input = "   ".to_string();

        app.update(Action::SubmitLandingSearch).unwrap();

        assert!(app.modals.is_empty());
        assert!(app.pending_query.is_none());
    }

    #[test]
    fn test_landing_query_is_captured_across_the_gate() {
        let mut app = App::create_app(AppMode::Landing);
        app.landing.search_input = "beauty vloggers ".to_string();

        app.update(Action::SubmitLandingSearch).unwrap();

        assert_eq!(app.pending_query.as_deref(), Some("beauty vloggers"));
        assert_eq!(app.modals.top(), Some(&Modal::Auth));
    }
}
