use crate::api::{
    ApiError, Department, Faq, KeysetResponse, PageResponse, PurchaseQuote, User,
};
use crate::app::NetworkEventSender;
use crate::config::Config;
use crate::events::network::Event as NetworkEvent;
use crate::list::{Applied, DeleteOrigin, KeysetList, ListAction, ListController, ListTicket, LoadState};
use crate::logger::LogBuffer;
use crate::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE_SIZE};
use crate::tree::{CascadePolicy, Expansion, NodeData};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::widgets::TableState;
use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::assignment::AssignmentPage;
use super::error::StateError;
use super::navigation::{Focus, ListFocus, View};
use super::notice::{Toast, ToastKind};
use super::sidebar::Sidebar;

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    user: Option<User>,
    spinner_index: usize,
    sidebar: Sidebar,
    focus: Focus,
    view: View,
    list_focus: ListFocus,
    visited: HashSet<View>,
    departments: ListController<Department>,
    departments_table: TableState,
    faqs: ListController<Faq>,
    faqs_table: TableState,
    purchase_quotes: KeysetList<PurchaseQuote>,
    purchase_quotes_table: TableState,
    assignments: AssignmentPage,
    org_roots_error: Option<String>,
    delete_confirmation: Option<String>, // ID of department pending deletion
    toast: Option<Toast>,
    log_buffer: Option<LogBuffer>,
    show_log: bool,
    theme: Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        let debounce = Duration::from_millis(crate::debounce::DEFAULT_DEBOUNCE_MS);
        State {
            net_sender: None,
            user: None,
            spinner_index: 0,
            sidebar: Sidebar::default(),
            focus: Focus::View,
            view: View::Departments,
            list_focus: ListFocus::Rows,
            visited: HashSet::new(),
            departments: ListController::new(DEFAULT_PAGE_SIZE, debounce),
            departments_table: TableState::default(),
            faqs: ListController::new(DEFAULT_PAGE_SIZE, debounce),
            faqs_table: TableState::default(),
            purchase_quotes: KeysetList::new(DEFAULT_LIMIT),
            purchase_quotes_table: TableState::default(),
            assignments: AssignmentPage::new(CascadePolicy::default()),
            org_roots_error: None,
            delete_confirmation: None,
            toast: None,
            log_buffer: None,
            show_log: false,
            theme: Theme::default(),
        }
    }
}

impl State {
    pub fn new(
        net_sender: NetworkEventSender,
        config: &Config,
        theme: Theme,
        log_buffer: LogBuffer,
    ) -> Self {
        let debounce = config.debounce();
        State {
            net_sender: Some(net_sender),
            departments: ListController::new(config.page_size, debounce),
            faqs: ListController::new(config.page_size, debounce),
            purchase_quotes: KeysetList::new(config.keyset_limit),
            assignments: AssignmentPage::new(config.cascade),
            log_buffer: Some(log_buffer),
            theme,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Returns details for current user.
    ///
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Sets details for current user.
    ///
    pub fn set_user(&mut self, user: User) -> &mut Self {
        self.user = Some(user);
        self
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn spinner_index(&self) -> usize {
        self.spinner_index
    }

    /// Advance time: settle debounced filters, expire the toast and spin the
    /// spinner.
    ///
    pub fn tick(&mut self, now: Instant) -> &mut Self {
        if let Some(ticket) = self.departments.tick(now) {
            self.departments_table.select(None);
            self.dispatch(NetworkEvent::Departments(ticket));
        }
        if let Some(ticket) = self.faqs.tick(now) {
            self.faqs_table.select(None);
            self.dispatch(NetworkEvent::Faqs(ticket));
        }
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
            self.toast = None;
        }
        self.advance_spinner_index()
    }

    /// Whether the current view is waiting on the backend.
    ///
    pub fn is_loading(&self) -> bool {
        match self.view {
            View::Departments => *self.departments.load_state() == LoadState::Loading,
            View::Faqs => *self.faqs.load_state() == LoadState::Loading,
            View::PurchaseQuotes => *self.purchase_quotes.load_state() == LoadState::Loading,
            View::Assignments => !self.assignments.is_loaded() || self.assignments.is_saving(),
        }
    }

    pub fn current_focus(&self) -> Focus {
        self.focus
    }

    /// Move focus between the sidebar and the view. Stays on the view while
    /// the sidebar is hidden.
    ///
    pub fn toggle_focus(&mut self) -> &mut Self {
        self.focus = match self.focus {
            Focus::View if self.sidebar.is_open() => Focus::Sidebar,
            _ => Focus::View,
        };
        self
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn toggle_sidebar(&mut self) -> &mut Self {
        if !self.sidebar.toggle_open() {
            self.focus = Focus::View;
        }
        self
    }

    pub fn sidebar_next(&mut self) -> &mut Self {
        self.sidebar.next();
        self
    }

    pub fn sidebar_previous(&mut self) -> &mut Self {
        self.sidebar.previous();
        self
    }

    /// Activate the sidebar line under the cursor.
    ///
    pub fn sidebar_activate(&mut self) -> &mut Self {
        if let Some(view) = self.sidebar.activate() {
            self.select_view(view);
        }
        self
    }

    pub fn current_view(&self) -> View {
        self.view
    }

    /// Show a view, fetching its data on first visit.
    ///
    pub fn select_view(&mut self, view: View) -> &mut Self {
        debug!("Selecting view '{}'...", view.title());
        self.view = view;
        self.focus = Focus::View;
        self.list_focus = ListFocus::Rows;
        self.delete_confirmation = None;
        let first_visit = self.visited.insert(view);
        match view {
            View::Departments if first_visit => {
                let ticket = self.departments.request();
                self.dispatch(NetworkEvent::Departments(ticket));
            }
            View::Faqs if first_visit => {
                let ticket = self.faqs.request();
                self.dispatch(NetworkEvent::Faqs(ticket));
            }
            View::PurchaseQuotes if first_visit => {
                let ticket = self.purchase_quotes.request();
                self.dispatch(NetworkEvent::PurchaseQuotes(ticket));
            }
            View::Assignments if !self.assignments.is_loaded() => {
                self.org_roots_error = None;
                self.dispatch(NetworkEvent::OrgRoots);
            }
            _ => (),
        }
        self
    }

    pub fn list_focus(&self) -> ListFocus {
        self.list_focus
    }

    /// Direct keys to the filter input, rows or pager of an offset list.
    ///
    pub fn set_list_focus(&mut self, list_focus: ListFocus) -> &mut Self {
        if matches!(self.view, View::Departments | View::Faqs) {
            self.list_focus = list_focus;
        }
        self
    }

    /// Run a list action against the current offset list, dispatching any
    /// request it starts.
    ///
    pub fn list_action(&mut self, action: ListAction, now: Instant) -> &mut Self {
        match self.view {
            View::Departments => {
                if let Some(ticket) = self.departments.perform(action, now) {
                    self.departments_table.select(None);
                    self.dispatch(NetworkEvent::Departments(ticket));
                }
            }
            View::Faqs => {
                if let Some(ticket) = self.faqs.perform(action, now) {
                    self.faqs_table.select(None);
                    self.dispatch(NetworkEvent::Faqs(ticket));
                }
            }
            View::PurchaseQuotes => match action {
                ListAction::NextPage => self.keyset_next(),
                ListAction::PreviousPage => self.keyset_previous(),
                ListAction::CyclePageSize => self.keyset_cycle_limit(),
                ListAction::Refresh => {
                    let ticket = self.purchase_quotes.request();
                    self.dispatch(NetworkEvent::PurchaseQuotes(ticket));
                }
                _ => (),
            },
            View::Assignments => {
                if action == ListAction::Refresh {
                    self.assignments.remount();
                }
            }
        }
        self
    }

    pub fn departments(&self) -> &ListController<Department> {
        &self.departments
    }

    pub fn departments_mut(&mut self) -> &mut ListController<Department> {
        &mut self.departments
    }

    pub fn departments_table(&mut self) -> &mut TableState {
        &mut self.departments_table
    }

    pub fn apply_departments(
        &mut self,
        generation: u64,
        result: Result<PageResponse<Department>, ApiError>,
    ) -> &mut Self {
        match self.departments.apply(generation, result) {
            Applied::Stale => {}
            Applied::Shown => {
                clamp_selection(&mut self.departments_table, self.departments.rows().len())
            }
            Applied::Refetch(ticket) => {
                clamp_selection(&mut self.departments_table, self.departments.rows().len());
                self.dispatch(NetworkEvent::Departments(ticket));
            }
        }
        self
    }

    pub fn faqs(&self) -> &ListController<Faq> {
        &self.faqs
    }

    pub fn faqs_table(&mut self) -> &mut TableState {
        &mut self.faqs_table
    }

    pub fn apply_faqs(&mut self, generation: u64, result: Result<PageResponse<Faq>, ApiError>) -> &mut Self {
        match self.faqs.apply(generation, result) {
            Applied::Stale => {}
            Applied::Shown => clamp_selection(&mut self.faqs_table, self.faqs.rows().len()),
            Applied::Refetch(ticket) => {
                clamp_selection(&mut self.faqs_table, self.faqs.rows().len());
                self.dispatch(NetworkEvent::Faqs(ticket));
            }
        }
        self
    }

    pub fn purchase_quotes(&self) -> &KeysetList<PurchaseQuote> {
        &self.purchase_quotes
    }

    pub fn purchase_quotes_table(&mut self) -> &mut TableState {
        &mut self.purchase_quotes_table
    }

    pub fn apply_purchase_quotes(
        &mut self,
        generation: u64,
        result: Result<KeysetResponse<PurchaseQuote>, ApiError>,
    ) -> &mut Self {
        if self.purchase_quotes.apply(generation, result) {
            clamp_selection(
                &mut self.purchase_quotes_table,
                self.purchase_quotes.rows().len(),
            );
        }
        self
    }

    pub fn keyset_next(&mut self) {
        if let Some(ticket) = self.purchase_quotes.next() {
            self.purchase_quotes_table.select(None);
            self.dispatch(NetworkEvent::PurchaseQuotes(ticket));
        }
    }

    pub fn keyset_previous(&mut self) {
        if let Some(ticket) = self.purchase_quotes.previous() {
            self.purchase_quotes_table.select(None);
            self.dispatch(NetworkEvent::PurchaseQuotes(ticket));
        }
    }

    pub fn keyset_cycle_limit(&mut self) {
        let ticket = self.purchase_quotes.cycle_limit();
        self.purchase_quotes_table.select(None);
        self.dispatch(NetworkEvent::PurchaseQuotes(ticket));
    }

    /// Move the row cursor of the current view down.
    ///
    pub fn next_row(&mut self) -> &mut Self {
        match self.view {
            View::Departments => {
                step_selection(&mut self.departments_table, self.departments.rows().len(), true)
            }
            View::Faqs => step_selection(&mut self.faqs_table, self.faqs.rows().len(), true),
            View::PurchaseQuotes => step_selection(
                &mut self.purchase_quotes_table,
                self.purchase_quotes.rows().len(),
                true,
            ),
            View::Assignments => self.assignments.tree_mut().cursor_down(),
        }
        self
    }

    /// Move the row cursor of the current view up.
    ///
    pub fn previous_row(&mut self) -> &mut Self {
        match self.view {
            View::Departments => {
                step_selection(&mut self.departments_table, self.departments.rows().len(), false)
            }
            View::Faqs => step_selection(&mut self.faqs_table, self.faqs.rows().len(), false),
            View::PurchaseQuotes => step_selection(
                &mut self.purchase_quotes_table,
                self.purchase_quotes.rows().len(),
                false,
            ),
            View::Assignments => self.assignments.tree_mut().cursor_up(),
        }
        self
    }

    /// Ask for confirmation before deleting the department under the cursor.
    ///
    pub fn request_delete(&mut self) -> Result<(), StateError> {
        if self.view != View::Departments {
            return Err(StateError::NoRowSelected);
        }
        let department = self
            .departments_table
            .selected()
            .and_then(|index| self.departments.rows().get(index))
            .ok_or(StateError::NoRowSelected)?;
        self.delete_confirmation = Some(department.id.to_owned());
        Ok(())
    }

    /// Name of the department pending deletion, if any.
    ///
    pub fn delete_confirmation(&self) -> Option<&str> {
        let id = self.delete_confirmation.as_deref()?;
        Some(
            self.departments
                .rows()
                .iter()
                .find(|department| department.id == id)
                .map(|department| department.name.as_str())
                .unwrap_or(id),
        )
    }

    pub fn has_delete_confirmation(&self) -> bool {
        self.delete_confirmation.is_some()
    }

    /// Issue the pending delete, remembering which page it was made from.
    ///
    pub fn confirm_delete(&mut self) -> &mut Self {
        if let Some(id) = self.delete_confirmation.take() {
            let origin = self.departments.delete_origin();
            self.dispatch(NetworkEvent::DeleteDepartment { id, origin });
        }
        self
    }

    pub fn cancel_delete(&mut self) -> &mut Self {
        self.delete_confirmation = None;
        self
    }

    /// The backend removed a department: tell the user, then refetch the
    /// current page, or the previous one if the deleted row was the last on
    /// the page it was deleted from.
    ///
    pub fn department_deleted(&mut self, id: &str, origin: DeleteOrigin) -> &mut Self {
        debug!("Refreshing departments after deleting '{}'...", id);
        self.notify(ToastKind::Success, "Department deleted");
        let ticket: ListTicket = self.departments.after_delete(origin);
        self.dispatch(NetworkEvent::Departments(ticket));
        self
    }

    pub fn assignments(&self) -> &AssignmentPage {
        &self.assignments
    }

    pub fn org_roots_error(&self) -> Option<&str> {
        self.org_roots_error.as_deref()
    }

    pub fn apply_org_roots(&mut self, result: Result<Vec<NodeData>, ApiError>) -> &mut Self {
        match result {
            Ok(roots) => {
                info!("Received {} organizational units.", roots.len());
                self.org_roots_error = None;
                self.assignments.set_roots(roots);
            }
            Err(e) => {
                warn!("Failed to load organizational units: {}", e);
                self.org_roots_error = Some(e.user_message());
            }
        }
        self
    }

    /// Expand or collapse the tree node under the cursor, starting a child
    /// load when the node has never been loaded.
    ///
    pub fn tree_expand(&mut self) -> &mut Self {
        let Some(id) = self.assignments.tree().selected_id() else {
            return self;
        };
        match self.assignments.tree_mut().expand(&id) {
            Ok(Expansion::LoadRequested) => {
                let mount = self.assignments.mount();
                if let Some(node) = self.assignments.tree().node(&id).cloned() {
                    self.dispatch(NetworkEvent::LoadChildren { mount, node });
                }
            }
            Ok(expansion) => debug!("Tree node '{}': {:?}.", id, expansion),
            Err(e) => warn!("Cannot expand tree node: {}", e),
        }
        self
    }

    /// Flip the checkbox of the tree node under the cursor.
    ///
    pub fn tree_toggle_check(&mut self) -> &mut Self {
        let Some(id) = self.assignments.tree().selected_id() else {
            return self;
        };
        match self.assignments.tree_mut().toggle_check(&id) {
            Ok(changes) => self.assignments.apply(&changes),
            Err(e) => warn!("Cannot check tree node: {}", e),
        }
        self
    }

    /// Merge a child load. Results for a tree that has since been remounted
    /// are dropped.
    ///
    pub fn apply_children(
        &mut self,
        mount: u64,
        id: &str,
        result: Result<Vec<NodeData>, ApiError>,
    ) -> &mut Self {
        if mount != self.assignments.mount() {
            debug!(
                "Ignoring children of '{}' loaded for an earlier tree (mount {}).",
                id, mount
            );
            return self;
        }
        let changes = self.assignments.tree_mut().complete_load(id, result);
        self.assignments.apply(&changes);
        self
    }

    pub fn save_assignments(&mut self) -> &mut Self {
        match self.assignments.begin_save() {
            Some(ids) => self.dispatch(NetworkEvent::SaveAssignments { ids }),
            None => debug!("Save already in progress."),
        }
        self
    }

    pub fn assignments_saved(&mut self) -> &mut Self {
        self.assignments.save_succeeded();
        self.notify(ToastKind::Success, "Assignments saved")
    }

    pub fn assignments_save_failed(&mut self, error: &ApiError) -> &mut Self {
        self.assignments.save_failed();
        self.notify_error(error.user_message())
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) -> &mut Self {
        self.toast = Some(Toast::new(message, kind, Instant::now()));
        self
    }

    pub fn notify_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.notify(ToastKind::Error, message)
    }

    pub fn is_log_shown(&self) -> bool {
        self.show_log
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    /// Snapshot of the captured log lines, oldest first.
    ///
    pub fn log_entries(&self) -> Vec<String> {
        self.log_buffer
            .as_ref()
            .and_then(|buffer| buffer.lock().ok().map(|lines| lines.iter().cloned().collect()))
            .unwrap_or_default()
    }

    /// Send a network event, reporting a closed channel.
    ///
    pub fn try_dispatch(&self, event: NetworkEvent) -> Result<(), StateError> {
        match &self.net_sender {
            Some(net_sender) => net_sender
                .send(event)
                .map_err(|err| StateError::NetworkUnavailable(err.to_string())),
            None => Ok(()),
        }
    }

    /// Send a network event, logging any failure.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Err(err) = self.try_dispatch(event) {
            error!("Received error from network dispatch: {}", err);
        }
    }
}

/// Keep a table cursor within `len` rows.
///
fn clamp_selection(table: &mut TableState, len: usize) {
    let selected = match (table.selected(), len) {
        (_, 0) => None,
        (Some(index), _) => Some(index.min(len - 1)),
        (None, _) => Some(0),
    };
    table.select(selected);
}

fn step_selection(table: &mut TableState, len: usize, forward: bool) {
    if len == 0 {
        table.select(None);
        return;
    }
    let next = match (table.selected(), forward) {
        (None, _) => 0,
        (Some(index), true) => (index + 1).min(len - 1),
        (Some(index), false) => index.saturating_sub(1),
    };
    table.select(Some(next));
}
