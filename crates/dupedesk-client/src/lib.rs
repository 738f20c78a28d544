//! # dupedesk-client
//!
//! Blocking HTTP client for the helpdesk REST API: a retrying request
//! loop that absorbs rate limiting and connection drops, plus the
//! paginated user fetch pipeline built on top of it.
//!
//! The whole system is sequential by design - pages are fetched one at a
//! time and the only suspension point is the rate-limit sleep inside
//! [`RestClient::send`].

pub mod error;
pub mod rest;
pub mod users;

pub use error::{ClientError, Result};
pub use rest::{int_from_header, RestClient, RetryPolicy};
pub use users::{fetch_all_users, User, UsersPage};
