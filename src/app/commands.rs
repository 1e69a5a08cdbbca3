//! Command handlers - business logic for processing UI events

use crate::app::state::{ActionMenuState, FilterForm, Notice, Screen, UserAction};
use crate::app::AppState;
use crate::error::StoreError;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::UserStatus;
use crate::table::pagination::next_page_size;
use crate::table::Column;

impl AppState {
    // ========================
    // Loading
    // ========================

    /// Start a fetch; the command goes to the network actor
    pub fn request_load(&mut self) -> NetworkCommand {
        let generation = self.store.begin_load();
        NetworkCommand::FetchUsers { generation }
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::UsersFetched { generation, result } => {
                let failed = result.is_err();
                if self.store.finish_load(generation, result) && !failed {
                    self.notice = None;
                }
            }
            NetworkResponse::StatusPersisted {
                user_id,
                status,
                result,
            } => {
                let outcome = match result {
                    Ok(()) => self.store.apply_status(&user_id, status),
                    Err(source) => Err(StoreError::PersistFailed {
                        user_id: user_id.clone(),
                        status,
                        source,
                    }),
                };
                self.notice = Some(match outcome {
                    Ok(()) => Notice::info(format!("{} is now {}", self.user_label(&user_id), status)),
                    Err(e) => Notice::error(e.to_string()),
                });
            }
        }
    }

    /// Keep the cursor and detail screen valid after the store changed
    pub fn on_store_changed(&mut self) {
        self.clamp_selection();
        if let Screen::Detail { user_id } = &self.screen {
            if self.store.find(user_id).is_none() && !self.store.is_loading() {
                self.notice = Some(Notice::error(StoreError::NotFound(user_id.clone()).to_string()));
                self.screen = Screen::List;
            }
        }
    }

    fn user_label(&self, user_id: &str) -> String {
        self.store
            .find(user_id)
            .map(|u| u.full_name.clone())
            .unwrap_or_else(|| user_id.to_string())
    }

    // ========================
    // Table navigation
    // ========================

    pub fn select_next_row(&mut self) {
        let len = self.table.page_records(self.store.records()).len();
        if self.selected_row + 1 < len {
            self.selected_row += 1;
        }
    }

    pub fn select_prev_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        self.table.next_page(self.store.records());
        self.selected_row = 0;
    }

    pub fn prev_page(&mut self) {
        self.table.previous_page(self.store.records());
        self.selected_row = 0;
    }

    pub fn go_to_page(&mut self, page_index: usize) {
        self.table.set_page_index(page_index, self.store.records());
        self.selected_row = 0;
    }

    pub fn cycle_page_size(&mut self) {
        let size = next_page_size(self.table.page_size());
        match self.table.set_page_size(size) {
            Ok(()) => self.selected_row = 0,
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }

    pub fn toggle_sort(&mut self, column: Column) {
        self.table.toggle_sort(column);
        self.selected_row = 0;
    }

    fn clamp_selection(&mut self) {
        let len = self.table.page_records(self.store.records()).len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    // ========================
    // Detail screen
    // ========================

    pub fn view_details(&mut self) {
        if let Some(user_id) = self.selected_user_id() {
            tracing::debug!(user_id = %user_id, "Opening user details");
            self.screen = Screen::Detail { user_id };
        }
    }

    pub fn close_details(&mut self) {
        self.screen = Screen::List;
    }

    // ========================
    // Action menu
    // ========================

    pub fn open_action_menu(&mut self) {
        if let Some(user_id) = self.selected_user_id() {
            self.action_menu = Some(ActionMenuState {
                user_id,
                selected: 0,
            });
        }
    }

    pub fn action_menu_next(&mut self) {
        if let Some(menu) = &mut self.action_menu {
            menu.selected = (menu.selected + 1) % UserAction::ALL.len();
        }
    }

    pub fn action_menu_prev(&mut self) {
        if let Some(menu) = &mut self.action_menu {
            menu.selected = (menu.selected + UserAction::ALL.len() - 1) % UserAction::ALL.len();
        }
    }

    pub fn close_action_menu(&mut self) {
        self.action_menu = None;
    }

    /// Run the highlighted action; status changes produce a network command
    pub fn confirm_action(&mut self) -> Option<NetworkCommand> {
        let menu = self.action_menu.take()?;
        match menu.action().target_status() {
            None => {
                self.screen = Screen::Detail {
                    user_id: menu.user_id,
                };
                None
            }
            Some(status) => self.request_status_change(menu.user_id, status),
        }
    }

    /// Validate a status change before sending it to be persisted
    pub fn request_status_change(
        &mut self,
        user_id: String,
        status: UserStatus,
    ) -> Option<NetworkCommand> {
        if let Err(e) = self.store.ensure_exists(&user_id) {
            self.notice = Some(Notice::error(e.to_string()));
            return None;
        }
        if self.store.find(&user_id).map(|u| u.status) == Some(status) {
            self.notice = Some(Notice::info(format!(
                "{} is already {}",
                self.user_label(&user_id),
                status
            )));
            return None;
        }
        self.notice = Some(Notice::info(format!("Saving {}...", self.user_label(&user_id))));
        Some(NetworkCommand::PersistStatus { user_id, status })
    }

    // ========================
    // Filter modal
    // ========================

    pub fn open_filter(&mut self) {
        self.show_filter = true;
    }

    pub fn filter_char(&mut self, c: char) {
        let field = self.filter_form.focused;
        self.filter_form.value_mut(field).push(c);
    }

    pub fn filter_backspace(&mut self) {
        let field = self.filter_form.focused;
        self.filter_form.value_mut(field).pop();
    }

    pub fn filter_next_field(&mut self) {
        self.filter_form.focused = self.filter_form.focused.next();
    }

    pub fn filter_prev_field(&mut self) {
        self.filter_form.focused = self.filter_form.focused.prev();
    }

    pub fn apply_filter(&mut self) {
        match self.filter_form.to_filter() {
            Ok(filter) => {
                self.table.set_filter(filter);
                self.selected_row = 0;
                self.show_filter = false;
                let shown = self.table.filtered_len(self.store.records());
                self.notice = Some(Notice::info(format!("Filter matches {} users", shown)));
            }
            Err(message) => self.notice = Some(Notice::error(message)),
        }
    }

    /// Empty the form and drop the active filter
    pub fn reset_filter(&mut self) {
        self.filter_form = FilterForm::default();
        self.clear_filter();
    }

    pub fn cancel_filter(&mut self) {
        self.show_filter = false;
    }

    pub fn clear_filter(&mut self) {
        self.table.clear_filter();
        self.selected_row = 0;
        self.show_filter = false;
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::messages::ui_events::Mode;
    use crate::store::tests::{user, ScriptedSource};
    use std::sync::Arc;

    fn loaded_state(n: usize) -> AppState {
        let mut state = AppState::new(Arc::new(ScriptedSource::default()), 10);
        let NetworkCommand::FetchUsers { generation } = state.request_load() else {
            panic!("expected a fetch command");
        };
        let users = (0..n)
            .map(|i| user(&i.to_string(), &format!("User {:02}", i), UserStatus::Active))
            .collect();
        state.handle_response(NetworkResponse::UsersFetched {
            generation,
            result: Ok(users),
        });
        state
    }

    #[test]
    fn test_render_state_while_loading() {
        let mut state = AppState::new(Arc::new(ScriptedSource::default()), 10);
        state.request_load();
        let render = state.to_render_state();
        assert!(render.loading);
        assert!(render.rows.is_empty());
        assert_eq!(render.page_count, 1);
    }

    #[test]
    fn test_failed_refresh_keeps_rows_and_reports_error() {
        let mut state = loaded_state(5);
        let NetworkCommand::FetchUsers { generation } = state.request_load() else {
            panic!("expected a fetch command");
        };
        let in_flight = state.to_render_state();
        assert!(!in_flight.loading);
        assert!(in_flight.refreshing);
        assert_eq!(in_flight.rows.len(), 5);

        state.handle_response(NetworkResponse::UsersFetched {
            generation,
            result: Err(FetchError::Timeout),
        });

        let render = state.to_render_state();
        assert_eq!(render.rows.len(), 5);
        assert!(!render.loading);
        assert!(!render.refreshing);
        assert_eq!(render.fetch_error.as_deref(), Some("Request timed out"));
    }

    #[test]
    fn test_sorting_returns_cursor_to_first_page() {
        let mut state = loaded_state(25);
        state.next_page();
        state.next_page();
        state.select_next_row();

        state.toggle_sort(Column::FullName);

        let render = state.to_render_state();
        assert_eq!(render.page_index, 0);
        assert_eq!(render.selected_row, 0);
        assert_eq!(state.selected_user_id().as_deref(), Some("0"));
    }

    #[test]
    fn test_paging_resets_cursor() {
        let mut state = loaded_state(25);
        state.select_next_row();
        state.select_next_row();
        assert_eq!(state.selected_user_id().as_deref(), Some("2"));

        state.next_page();
        assert_eq!(state.selected_row, 0);
        assert_eq!(state.selected_user_id().as_deref(), Some("10"));

        state.cycle_page_size();
        let render = state.to_render_state();
        assert_eq!(render.page_size, 20);
        assert_eq!(render.page_index, 0);
        assert_eq!(render.page_count, 2);
    }

    #[test]
    fn test_blacklist_through_action_menu() {
        let mut state = loaded_state(3);
        state.select_next_row();
        state.open_action_menu();
        state.action_menu_next();

        let (user_id, status) = match state.confirm_action() {
            Some(NetworkCommand::PersistStatus { user_id, status }) => (user_id, status),
            other => panic!("expected a persist command, got {:?}", other),
        };
        assert_eq!(user_id, "1");
        assert_eq!(status, UserStatus::Blacklisted);
        assert!(state.action_menu.is_none());
        // nothing applied until the source confirms
        assert_eq!(state.store.find("1").unwrap().status, UserStatus::Active);

        state.handle_response(NetworkResponse::StatusPersisted {
            user_id,
            status,
            result: Ok(()),
        });
        assert_eq!(state.store.find("1").unwrap().status, UserStatus::Blacklisted);
        assert!(!state.notice.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_rejected_persist_reports_error() {
        let mut state = loaded_state(3);
        state.handle_response(NetworkResponse::StatusPersisted {
            user_id: "0".to_string(),
            status: UserStatus::Inactive,
            result: Err(FetchError::Status { status: 500 }),
        });
        assert_eq!(state.store.find("0").unwrap().status, UserStatus::Active);
        assert!(state.notice.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_status_change_for_unknown_user() {
        let mut state = loaded_state(3);
        assert!(state
            .request_status_change("99".to_string(), UserStatus::Active)
            .is_none());
        assert_eq!(
            state.notice,
            Some(Notice::error("User 99 not found"))
        );
    }

    #[test]
    fn test_view_details_and_back() {
        let mut state = loaded_state(3);
        state.select_next_row();
        state.view_details();
        assert_eq!(state.mode(), Mode::Detail);
        assert_eq!(state.to_render_state().detail.unwrap().id, "1");

        state.close_details();
        assert_eq!(state.mode(), Mode::List);
    }

    #[test]
    fn test_apply_and_reset_filter() {
        let mut state = loaded_state(25);
        state.next_page();
        state.open_filter();
        state.filter_next_field();
        for c in "user 1".chars() {
            state.filter_char(c);
        }
        state.apply_filter();

        let render = state.to_render_state();
        assert!(render.filter_active);
        assert_eq!(render.filtered_total, 10);
        assert_eq!(render.page_index, 0);
        assert_eq!(state.mode(), Mode::List);

        state.reset_filter();
        assert_eq!(state.to_render_state().filtered_total, 25);
        assert_eq!(state.filter_form, FilterForm::default());
    }

    #[test]
    fn test_invalid_filter_keeps_modal_open() {
        let mut state = loaded_state(5);
        state.open_filter();
        state.filter_form.status = "sleeping".to_string();
        state.apply_filter();
        assert_eq!(state.mode(), Mode::Filter);
        assert!(state.notice.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut state = loaded_state(5);
        for _ in 0..4 {
            state.select_next_row();
        }
        let NetworkCommand::FetchUsers { generation } = state.request_load() else {
            panic!("expected a fetch command");
        };
        state.handle_response(NetworkResponse::UsersFetched {
            generation,
            result: Ok(vec![user("0", "Only One", UserStatus::Active)]),
        });
        state.on_store_changed();
        assert_eq!(state.selected_row, 0);
    }
}
