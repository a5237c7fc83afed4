//! Backend REST API.
//!
//! `Api` wraps the HTTP [`Client`] with one method per backend route used
//! by the console, converting list parameters into query strings.

mod client;
mod error;
mod resource;

pub use client::Client;
pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
pub use resource::*;

use crate::list::{KeysetQuery, ListQuery};
use crate::tree::{ChildLoader, NodeData, TreeNode};
use log::*;

/// Responsible for asynchronous interaction with the backend including
/// transformation of response data into explicitly-defined types.
///
#[derive(Clone)]
pub struct Api {
    client: Client,
}

impl Api {
    /// Returns a new instance for the given access token and base URL.
    ///
    pub fn new(access_token: &str, base_url: &str) -> Result<Api, ApiError> {
        debug!("Initializing API client for {}...", base_url);
        Ok(Api {
            client: Client::new(access_token, base_url)?,
        })
    }

    /// Returns the authenticated user.
    ///
    pub async fn me(&self) -> Result<User, ApiError> {
        debug!("Requesting authenticated user details...");
        let wrapper: Wrapper<User> = self.client.get(&["me"], &[]).await?;
        Ok(wrapper.data)
    }

    fn page_params(query: &ListQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("page_size", query.page_size.to_string()),
        ];
        if !query.filter.is_empty() {
            params.push(("search", query.filter.clone()));
        }
        params
    }

    /// Returns one page of departments.
    ///
    pub async fn departments(&self, query: &ListQuery) -> Result<PageResponse<Department>, ApiError> {
        debug!(
            "Requesting departments page {} (size {}, filter '{}')...",
            query.page, query.page_size, query.filter
        );
        self.client.get(&["departments"], &Self::page_params(query)).await
    }

    /// Delete a department.
    ///
    pub async fn delete_department(&self, id: &str) -> Result<(), ApiError> {
        debug!("Deleting department {}...", id);
        self.client.delete(&["departments", id]).await
    }

    /// Returns one page of FAQ entries.
    ///
    pub async fn faqs(&self, query: &ListQuery) -> Result<PageResponse<Faq>, ApiError> {
        debug!(
            "Requesting FAQ page {} (size {}, filter '{}')...",
            query.page, query.page_size, query.filter
        );
        self.client.get(&["faqs"], &Self::page_params(query)).await
    }

    /// Returns one keyset page of purchase quotes.
    ///
    pub async fn purchase_quotes(
        &self,
        query: &KeysetQuery,
    ) -> Result<KeysetResponse<PurchaseQuote>, ApiError> {
        debug!(
            "Requesting purchase quotes (limit {}, cursor {:?})...",
            query.limit, query.cursor
        );
        let mut params = vec![("limit", query.limit.to_string())];
        if let Some(cursor) = &query.cursor {
            params.push(("cursor", cursor.clone()));
        }
        self.client.get(&["purchase-quotes"], &params).await
    }

    /// Returns the top-level organizational units.
    ///
    pub async fn org_roots(&self) -> Result<Vec<NodeData>, ApiError> {
        debug!("Requesting top-level organizational units...");
        let wrapper: Wrapper<Vec<NodeData>> = self.client.get(&["org-units"], &[]).await?;
        Ok(wrapper.data)
    }

    /// Returns the direct children of an organizational unit.
    ///
    pub async fn org_children(&self, parent_id: &str) -> Result<Vec<NodeData>, ApiError> {
        debug!("Requesting children of organizational unit {}...", parent_id);
        let wrapper: Wrapper<Vec<NodeData>> = self
            .client
            .get(&["org-units", parent_id, "children"], &[])
            .await?;
        Ok(wrapper.data)
    }

    /// Replace the stored assignments with the given node IDs.
    ///
    pub async fn save_assignments(&self, ids: &[String]) -> Result<(), ApiError> {
        debug!("Saving {} assignments...", ids.len());
        self.client
            .put(&["assignments"], &AssignmentUpdate { ids })
            .await
    }
}

impl ChildLoader for Api {
    async fn load_children(&self, parent: &TreeNode) -> Result<Vec<NodeData>, ApiError> {
        self.org_children(&parent.id).await
    }
}
