//! User models and the paginated fetch pipeline

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rest::RestClient;

/// Resource path of the paged user collection
pub const USERS_RESOURCE: &str = "api/v2/users.json";

/// A user record as returned by the remote service.
///
/// Identity is `id`. Fields beyond the ones this tool consumes are kept
/// in `extra` so a record survives a round trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One page of the user collection
#[derive(Debug, Clone, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub previous_page: Option<String>,
    #[serde(default)]
    pub count: i64,
}

/// Fetch every user, following pagination cursors to the end.
///
/// Pages are fetched strictly in cursor order and accumulated in arrival
/// order; no deduplication by id is performed, so an overlapping cursor
/// yields a record more than once. A page body that fails to parse ends
/// the pipeline as if it were the last page (logged at warn level).
pub fn fetch_all_users(client: &RestClient) -> Result<Vec<User>> {
    let mut users = Vec::new();
    let mut page_suffix = String::new();

    loop {
        let resource = format!("{}{}", USERS_RESOURCE, page_suffix);
        let response = client.send(
            Method::GET,
            &resource,
            StatusCode::OK,
            "getting users",
            None,
        )?;

        let page: UsersPage = match response.json() {
            Ok(page) => page,
            Err(err) => {
                log::warn!("unparseable user page (resource: {}): {}", resource, err);
                break;
            }
        };

        log::debug!(
            "fetched page with {} users (total so far: {})",
            page.users.len(),
            users.len() + page.users.len()
        );
        users.extend(page.users);

        match page.next_page.as_deref().and_then(next_page_suffix) {
            Some(suffix) => page_suffix = suffix,
            None => break,
        }
    }

    log::info!("fetched {} user records", users.len());
    Ok(users)
}

/// Extract the `?page...` query suffix from a next-page URL.
///
/// The cursor is opaque apart from its query string; only that suffix is
/// appended to the fixed resource path on the next call.
fn next_page_suffix(next_page_url: &str) -> Option<String> {
    next_page_url
        .find("?page")
        .map(|idx| next_page_url[idx..].to_string())
}
