//! Defines data structures for requests and responses.

use serde::Serialize;
use std::fmt;

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /users`. Optional fields are left out of the request
/// when not given.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Body of a question submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub author: i64,
    pub title: String,
    pub content: String,
}

/// Addresses the questions of a team inside an organization.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRoute {
    pub organization: String,
    pub team: String,
}

/// The raw outcome of a request. Error statuses are not treated
/// specially, they are passed through like any other response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "received status code: {}\nresponse body: {}",
            self.status, self.body
        )
    }
}
