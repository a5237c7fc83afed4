use crate::api::Api;
use crate::list::{DeleteOrigin, KeysetTicket, ListTicket};
use crate::state::State;
use crate::tree::{ChildLoader, TreeNode};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Me,
    Departments(ListTicket),
    DeleteDepartment { id: String, origin: DeleteOrigin },
    Faqs(ListTicket),
    PurchaseQuotes(KeysetTicket),
    OrgRoots,
    LoadChildren { mount: u64, node: TreeNode },
    SaveAssignments { ids: Vec<String> },
}

/// Specify struct for managing state with network events. Each event runs on
/// its own task, so results may arrive out of order; the state drops the ones
/// that were superseded.
///
#[derive(Clone)]
pub struct Handler {
    state: Arc<Mutex<State>>,
    api: Api,
}

impl Handler {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: Arc<Mutex<State>>, api: Api) -> Self {
        Handler { state, api }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Me => self.me().await?,
            Event::Departments(ticket) => self.departments(ticket).await,
            Event::DeleteDepartment { id, origin } => self.delete_department(id, origin).await?,
            Event::Faqs(ticket) => self.faqs(ticket).await,
            Event::PurchaseQuotes(ticket) => self.purchase_quotes(ticket).await,
            Event::OrgRoots => self.org_roots().await,
            Event::LoadChildren { mount, node } => self.load_children(mount, node).await,
            Event::SaveAssignments { ids } => self.save_assignments(ids).await?,
        }
        Ok(())
    }

    /// Update state with the authenticated user.
    ///
    async fn me(&self) -> Result<()> {
        info!("Fetching user details...");
        let user = self.api.me().await?;
        info!("Signed in as {}.", user.name);
        self.state.lock().await.set_user(user);
        Ok(())
    }

    async fn departments(&self, ticket: ListTicket) {
        let result = self.api.departments(&ticket.query).await;
        if let Ok(page) = &result {
            debug!("Received {} departments.", page.data.len());
        }
        self.state
            .lock()
            .await
            .apply_departments(ticket.generation, result);
    }

    async fn delete_department(&self, id: String, origin: DeleteOrigin) -> Result<()> {
        info!("Deleting department {}...", id);
        match self.api.delete_department(&id).await {
            Ok(()) => {
                info!("Department {} deleted.", id);
                self.state.lock().await.department_deleted(&id, origin);
                Ok(())
            }
            Err(e) => {
                self.state.lock().await.notify_error(e.user_message());
                Err(e.into())
            }
        }
    }

    async fn faqs(&self, ticket: ListTicket) {
        let result = self.api.faqs(&ticket.query).await;
        self.state.lock().await.apply_faqs(ticket.generation, result);
    }

    async fn purchase_quotes(&self, ticket: KeysetTicket) {
        let result = self.api.purchase_quotes(&ticket.query).await;
        self.state
            .lock()
            .await
            .apply_purchase_quotes(ticket.generation, result);
    }

    async fn org_roots(&self) {
        info!("Fetching organizational units...");
        let result = self.api.org_roots().await;
        self.state.lock().await.apply_org_roots(result);
    }

    async fn load_children(&self, mount: u64, node: TreeNode) {
        let result = ChildLoader::load_children(&self.api, &node).await;
        self.state
            .lock()
            .await
            .apply_children(mount, &node.id, result);
    }

    async fn save_assignments(&self, ids: Vec<String>) -> Result<()> {
        info!("Saving {} assignments...", ids.len());
        match self.api.save_assignments(&ids).await {
            Ok(()) => {
                info!("Assignments saved.");
                self.state.lock().await.assignments_saved();
                Ok(())
            }
            Err(e) => {
                self.state.lock().await.assignments_save_failed(&e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logger::log_buffer;
    use crate::state::{ToastKind, View};
    use crate::ui::Theme;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::mpsc;

    fn setup(server: &MockServer) -> (Handler, Arc<Mutex<State>>, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel();
        let state = Arc::new(Mutex::new(State::new(
            tx,
            &Config::new(),
            Theme::default(),
            log_buffer(),
        )));
        let api = Api::new("token", &server.base_url()).unwrap();
        (Handler::new(Arc::clone(&state), api), state, rx)
    }

    fn department_rows(range: std::ops::RangeInclusive<usize>) -> serde_json::Value {
        json!(range
            .map(|i| json!({"id": format!("d{}", i), "name": format!("Dept {}", i)}))
            .collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_departments_flow_into_state() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/departments").query_param("page", "1");
                then.status(200).json_body(json!({
                    "data": department_rows(1..=10),
                    "total_pages": 5
                }));
            })
            .await;
        let (handler, state, _rx) = setup(&server);

        let ticket = state.lock().await.departments_mut().request();
        handler.handle(Event::Departments(ticket)).await.unwrap();

        let state = state.lock().await;
        assert_eq!(state.departments().rows().len(), 10);
        assert_eq!(state.departments().pages().total_pages(), 5);
    }

    #[tokio::test]
    async fn test_superseded_departments_response_is_dropped() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/departments");
                then.status(200).json_body(json!({
                    "data": department_rows(1..=3),
                    "total_pages": 1
                }));
            })
            .await;
        let (handler, state, _rx) = setup(&server);

        let stale = state.lock().await.departments_mut().request();
        let _current = state.lock().await.departments_mut().request();
        handler.handle(Event::Departments(stale)).await.unwrap();

        let state = state.lock().await;
        assert!(state.departments().rows().is_empty());
    }

    #[tokio::test]
    async fn test_delete_last_row_pages_back_and_refetches() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/departments").query_param("page", "5");
                then.status(200).json_body(json!({
                    "data": department_rows(41..=41),
                    "total_pages": 5
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/departments/d41");
                then.status(204);
            })
            .await;
        let (handler, state, rx) = setup(&server);

        {
            let mut state = state.lock().await;
            let list = state.departments_mut();
            let ticket = list.request();
            list.apply(
                ticket.generation,
                Ok(crate::api::PageResponse {
                    data: vec![],
                    total_pages: 5,
                }),
            );
        }
        let ticket = state.lock().await.departments_mut().go_to(5).unwrap();
        handler.handle(Event::Departments(ticket)).await.unwrap();

        let origin = state.lock().await.departments().delete_origin();
        handler
            .handle(Event::DeleteDepartment {
                id: "d41".to_string(),
                origin,
            })
            .await
            .unwrap();

        match rx.try_recv().unwrap() {
            Event::Departments(ticket) => assert_eq!(ticket.query.page, 4),
            other => panic!("unexpected event {:?}", other),
        }
        let state = state.lock().await;
        assert_eq!(state.departments().pages().current_page(), 4);
    }

    #[tokio::test]
    async fn test_rejected_delete_raises_toast() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/departments/d1");
                then.status(409).json_body(json!({"message": "Department has members"}));
            })
            .await;
        let (handler, state, rx) = setup(&server);

        let result = handler
            .handle(Event::DeleteDepartment {
                id: "d1".to_string(),
                origin: DeleteOrigin {
                    page: 1,
                    rows_on_page: 1,
                },
            })
            .await;
        assert!(result.is_err());

        let state = state.lock().await;
        let toast = state.toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Department has members");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_children_load_keeps_node_retryable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/org-units");
                then.status(200).json_body(json!({
                    "data": [{"id": "d1", "label": "Finance", "type": "department"}]
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/org-units/d1/children");
                then.status(500);
            })
            .await;
        let (handler, state, rx) = setup(&server);

        handler.handle(Event::OrgRoots).await.unwrap();
        state.lock().await.select_view(View::Assignments);
        state.lock().await.tree_expand();
        let event = rx.try_recv().unwrap();
        assert!(matches!(event, Event::LoadChildren { ref node, .. } if node.id == "d1"));
        state.lock().await.tree_expand();
        assert!(rx.try_recv().is_err());

        handler.handle(event).await.unwrap();
        let state = state.lock().await;
        let node = state.assignments().tree().node("d1").unwrap();
        assert!(!node.loading);
        assert!(!node.is_loaded());
        assert!(state.toast().is_none());
    }

    #[tokio::test]
    async fn test_children_merge_into_expanded_node() {
        let server = MockServer::start_async().await;
        let children = server
            .mock_async(|when, then| {
                when.method(GET).path("/org-units/d1/children");
                then.status(200).json_body(json!({
                    "data": [{"id": "u1", "label": "Ada", "type": "user"}]
                }));
            })
            .await;
        let (handler, state, rx) = setup(&server);

        {
            let mut state = state.lock().await;
            state.apply_org_roots(Ok(vec![crate::tree::NodeData::new(
                "d1",
                "Finance",
                crate::tree::NodeKind::Department,
            )]));
            state.select_view(View::Assignments);
            state.tree_expand();
        }
        let event = rx.try_recv().unwrap();
        handler.handle(event).await.unwrap();
        children.assert_async().await;

        let state = state.lock().await;
        assert!(state.assignments().tree().node("d1").unwrap().is_loaded());
        assert!(state.assignments().tree().node("u1").is_some());
    }

    #[tokio::test]
    async fn test_save_assignments_clears_selection() {
        let server = MockServer::start_async().await;
        let save = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/assignments")
                    .json_body(json!({"ids": ["d1"]}));
                then.status(204);
            })
            .await;
        let (handler, state, rx) = setup(&server);

        {
            let mut state = state.lock().await;
            state.apply_org_roots(Ok(vec![crate::tree::NodeData::new(
                "d1",
                "Finance",
                crate::tree::NodeKind::Department,
            )]));
            state.select_view(View::Assignments);
            state.tree_toggle_check();
            state.save_assignments();
        }
        let event = rx.try_recv().unwrap();
        handler.handle(event).await.unwrap();
        save.assert_async().await;

        let state = state.lock().await;
        assert!(state.assignments().selection().is_empty());
        assert_eq!(state.toast().unwrap().kind, ToastKind::Success);
    }
}
