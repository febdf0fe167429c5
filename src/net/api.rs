//! Typed REST endpoints on top of [`ApiClient`].
//!
//! ERROR HANDLING
//! ==============
//! These helpers add no handling of their own: by the time an `Err` reaches
//! the caller the client has already shown a toast or bounced the user to
//! the login page, so callers usually only reset local UI state.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{ApiClient, ApiError};
use super::types::{Credentials, DashboardStats, LoginResponse, Profile, TrendPoint};

pub const ME_PATH: &str = "/me";
pub const LOGIN_ENDPOINT: &str = "/login";
pub const REGISTER_ENDPOINT: &str = "/register";
pub const DASHBOARD_STATS_PATH: &str = "/dashboard/stats";
pub const BORROW_TREND_PATH: &str = "/dashboard/borrow-trend";

/// Fetch the signed-in account from `GET /me`.
///
/// # Errors
///
/// Returns the client's [`ApiError`] on any failure.
pub async fn fetch_me(client: &ApiClient) -> Result<Profile, ApiError> {
    client.get(ME_PATH).await
}

/// Exchange credentials for a token via `POST /login`.
///
/// # Errors
///
/// Returns the client's [`ApiError`] on any failure.
pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
    client.post(LOGIN_ENDPOINT, credentials).await
}

/// Create a reader account via `POST /register`. The response body is ignored.
///
/// # Errors
///
/// Returns the client's [`ApiError`] on any failure.
pub async fn register(client: &ApiClient, credentials: &Credentials) -> Result<(), ApiError> {
    client.post::<_, serde_json::Value>(REGISTER_ENDPOINT, credentials).await.map(|_| ())
}

/// Headline numbers for the admin dashboard.
///
/// # Errors
///
/// Returns the client's [`ApiError`] on any failure.
pub async fn fetch_dashboard_stats(client: &ApiClient) -> Result<DashboardStats, ApiError> {
    client.get(DASHBOARD_STATS_PATH).await
}

/// Daily borrow counts for the dashboard chart.
///
/// # Errors
///
/// Returns the client's [`ApiError`] on any failure.
pub async fn fetch_borrow_trend(client: &ApiClient) -> Result<Vec<TrendPoint>, ApiError> {
    client.get(BORROW_TREND_PATH).await
}
