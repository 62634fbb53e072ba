// SPDX-License-Identifier: MIT

//! OAuth-Pool: Discord OAuth2 gateway for the shared user pool.
//!
//! This crate provides the web service that runs the Discord
//! "authorization code" flow and drops linked users into a Firestore
//! collection for an external consumer to poll.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::OauthService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub oauth: OauthService,
}
