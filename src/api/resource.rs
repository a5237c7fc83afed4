use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Defines the authenticated user.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Defines department data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub member_count: u32,
}

/// Defines FAQ entry data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub category: String,
}

/// Defines purchase quote data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseQuote {
    pub id: String,
    pub supplier: String,
    pub amount: f64,
    #[serde(default)]
    pub status: String,
    pub created_at: Option<String>,
}

/// Envelope for single-entity responses.
///
#[derive(Debug, Deserialize)]
pub struct Wrapper<T> {
    pub data: T,
}

/// Offset-paginated response.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub total_pages: usize,
}

/// Keyset-paginated response. `next_cursor` is opaque.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeysetResponse<T> {
    pub data: Vec<T>,
    pub has_next: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Body of the bulk assignment update.
///
#[derive(Debug, Serialize)]
pub struct AssignmentUpdate<'a> {
    pub ids: &'a [String],
}
