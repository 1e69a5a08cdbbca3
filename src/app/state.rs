//! App state - pure data structure with no I/O logic

use std::sync::Arc;

use chrono::NaiveDate;

use crate::constants::DATE_FILTER_FORMAT;
use crate::messages::render::HeaderCell;
use crate::messages::ui_events::Mode;
use crate::messages::RenderState;
use crate::models::UserStatus;
use crate::source::UserSource;
use crate::store::UserDataStore;
use crate::table::{Column, UserFilter, UserTableController};

/// Which screen is showing
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    List,
    Detail { user_id: String },
}

/// Entries of the per-row action menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    ViewDetails,
    Blacklist,
    Activate,
}

impl UserAction {
    pub const ALL: [UserAction; 3] = [
        UserAction::ViewDetails,
        UserAction::Blacklist,
        UserAction::Activate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UserAction::ViewDetails => "View Details",
            UserAction::Blacklist => "Blacklist User",
            UserAction::Activate => "Activate User",
        }
    }

    /// Status this action sets, if it is a status change
    pub fn target_status(&self) -> Option<UserStatus> {
        match self {
            UserAction::ViewDetails => None,
            UserAction::Blacklist => Some(UserStatus::Blacklisted),
            UserAction::Activate => Some(UserStatus::Active),
        }
    }
}

/// Open action menu for one user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionMenuState {
    pub user_id: String,
    pub selected: usize,
}

impl ActionMenuState {
    pub fn action(&self) -> UserAction {
        UserAction::ALL[self.selected % UserAction::ALL.len()]
    }
}

/// Focused field of the filter modal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Organization,
    Username,
    Email,
    Date,
    PhoneNumber,
    Status,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Organization,
        FilterField::Username,
        FilterField::Email,
        FilterField::Date,
        FilterField::PhoneNumber,
        FilterField::Status,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Organization => "Organization",
            FilterField::Username => "Username",
            FilterField::Email => "Email",
            FilterField::Date => "Date (YYYY-MM-DD)",
            FilterField::PhoneNumber => "Phone Number",
            FilterField::Status => "Status",
        }
    }

    pub fn next(&self) -> FilterField {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> FilterField {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Text typed into the filter modal
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub organization: String,
    pub username: String,
    pub email: String,
    pub date: String,
    pub phone_number: String,
    pub status: String,
    pub focused: FilterField,
}

impl FilterForm {
    pub fn value(&self, field: FilterField) -> &str {
        match field {
            FilterField::Organization => &self.organization,
            FilterField::Username => &self.username,
            FilterField::Email => &self.email,
            FilterField::Date => &self.date,
            FilterField::PhoneNumber => &self.phone_number,
            FilterField::Status => &self.status,
        }
    }

    pub fn value_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Organization => &mut self.organization,
            FilterField::Username => &mut self.username,
            FilterField::Email => &mut self.email,
            FilterField::Date => &mut self.date,
            FilterField::PhoneNumber => &mut self.phone_number,
            FilterField::Status => &mut self.status,
        }
    }

    /// Parse the form into filter criteria
    pub fn to_filter(&self) -> Result<UserFilter, String> {
        let date_joined = match non_empty(&self.date) {
            Some(date) => Some(
                NaiveDate::parse_from_str(&date, DATE_FILTER_FORMAT)
                    .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", date))?,
            ),
            None => None,
        };
        let status = match non_empty(&self.status) {
            Some(status) => Some(status.parse::<UserStatus>()?),
            None => None,
        };

        Ok(UserFilter {
            organization: non_empty(&self.organization),
            full_name: non_empty(&self.username),
            email: non_empty(&self.email),
            date_joined,
            phone_number: non_empty(&self.phone_number),
            status,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// One-line message in the status bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Data
    pub store: UserDataStore,
    pub table: UserTableController,

    // Navigation
    pub screen: Screen,
    pub selected_row: usize,

    // Popups
    pub show_filter: bool,
    pub filter_form: FilterForm,
    pub action_menu: Option<ActionMenuState>,
    pub show_help: bool,

    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(source: Arc<dyn UserSource>, page_size: usize) -> Self {
        let mut table = UserTableController::new();
        if let Err(e) = table.set_page_size(page_size) {
            tracing::warn!(error = %e, "Keeping default page size");
        }
        AppState {
            store: UserDataStore::new(source),
            table,
            screen: Screen::List,
            selected_row: 0,
            show_filter: false,
            filter_form: FilterForm::default(),
            action_menu: None,
            show_help: false,
            notice: None,
        }
    }

    /// Which screen or popup currently takes key input
    pub fn mode(&self) -> Mode {
        if self.show_help {
            Mode::Help
        } else if self.show_filter {
            Mode::Filter
        } else if self.action_menu.is_some() {
            Mode::ActionMenu
        } else if matches!(self.screen, Screen::Detail { .. }) {
            Mode::Detail
        } else {
            Mode::List
        }
    }

    /// Id of the user under the cursor (or on the detail screen)
    pub fn selected_user_id(&self) -> Option<String> {
        match &self.screen {
            Screen::Detail { user_id } => Some(user_id.clone()),
            Screen::List => self
                .table
                .page_records(self.store.records())
                .get(self.selected_row)
                .map(|user| user.id.clone()),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let snapshot = self.store.snapshot();
        let records = snapshot.records;

        let columns = Column::ALL
            .iter()
            .map(|column| HeaderCell {
                column: *column,
                title: column.title(),
                sortable: column.is_sortable(),
                sort: self.table.sort_direction(*column),
            })
            .collect();

        let detail = match &self.screen {
            Screen::Detail { user_id } => self.store.find(user_id).cloned(),
            Screen::List => None,
        };

        RenderState {
            mode: self.mode(),
            columns,
            rows: self.table.page_rows(records),
            selected_row: self.selected_row,
            page_index: self.table.page_index(records),
            page_count: self.table.page_count(records),
            page_size: self.table.page_size(),
            filtered_total: self.table.filtered_len(records),
            can_go_previous: self.table.can_go_previous(records),
            can_go_next: self.table.can_go_next(records),
            summary: self.store.summary(),
            loading: snapshot.loading,
            refreshing: self.store.is_refreshing(),
            fetch_error: snapshot.error.map(|e| e.to_string()),
            filter_active: self.table.filter().is_active(),
            filter_form: self.filter_form.clone(),
            action_menu: self.action_menu.clone(),
            detail,
            notice: self.notice.clone(),
        }
    }
}
