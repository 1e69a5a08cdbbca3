//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{ActionMenuState, FilterForm, Notice};
use crate::messages::ui_events::Mode;
use crate::models::UserRecord;
use crate::store::UserSummary;
use crate::table::{Column, SortDirection, TableRow};

/// One column header
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub column: Column,
    pub title: &'static str,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub mode: Mode,

    // Table
    pub columns: Vec<HeaderCell>,
    pub rows: Vec<TableRow>,
    pub selected_row: usize,

    // Pagination
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub filtered_total: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,

    // Store
    pub summary: UserSummary,
    pub loading: bool,
    pub refreshing: bool,
    pub fetch_error: Option<String>,

    // Filter modal
    pub filter_active: bool,
    pub filter_form: FilterForm,

    // Action menu / detail screen
    pub action_menu: Option<ActionMenuState>,
    pub detail: Option<UserRecord>,

    pub notice: Option<Notice>,
}
