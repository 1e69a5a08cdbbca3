//! App actor - message loop processing UI events and network responses

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::source::UserSource;

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        source: Arc<dyn UserSource>,
        page_size: usize,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(source, page_size),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let mut store_changes = self.state.store.subscribe();

        // Initial fetch, then the loading screen
        let cmd = self.state.request_load();
        let _ = self.network_tx.send(cmd);
        self.render();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.render();
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    self.render();
                }
                Ok(()) = store_changes.changed() => {
                    store_changes.borrow_and_update();
                    self.state.on_store_changed();
                    self.render();
                }
                else => break,
            }
        }
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    fn send(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Table navigation
            UiEvent::SelectNextRow => self.state.select_next_row(),
            UiEvent::SelectPrevRow => self.state.select_prev_row(),
            UiEvent::NextPage => self.state.next_page(),
            UiEvent::PrevPage => self.state.prev_page(),
            UiEvent::GoToPage(index) => self.state.go_to_page(index),
            UiEvent::CyclePageSize => self.state.cycle_page_size(),
            UiEvent::ToggleSort(column) => self.state.toggle_sort(column),

            // Data
            UiEvent::Refresh => {
                let cmd = self.state.request_load();
                self.send(Some(cmd));
            }

            // Detail view
            UiEvent::ViewDetails => self.state.view_details(),
            UiEvent::CloseDetails => self.state.close_details(),

            // Action menu
            UiEvent::OpenActionMenu => self.state.open_action_menu(),
            UiEvent::ActionMenuNext => self.state.action_menu_next(),
            UiEvent::ActionMenuPrev => self.state.action_menu_prev(),
            UiEvent::CloseActionMenu => self.state.close_action_menu(),
            UiEvent::ConfirmAction => {
                let cmd = self.state.confirm_action();
                self.send(cmd);
            }

            // Filter modal
            UiEvent::OpenFilter => self.state.open_filter(),
            UiEvent::FilterChar(c) => self.state.filter_char(c),
            UiEvent::FilterBackspace => self.state.filter_backspace(),
            UiEvent::FilterNextField => self.state.filter_next_field(),
            UiEvent::FilterPrevField => self.state.filter_prev_field(),
            UiEvent::ApplyFilter => self.state.apply_filter(),
            UiEvent::ResetFilter => self.state.reset_filter(),
            UiEvent::CancelFilter => self.state.cancel_filter(),
            UiEvent::ClearFilter => self.state.clear_filter(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
