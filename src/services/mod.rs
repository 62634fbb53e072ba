// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod oauth;
pub mod provider;

pub use oauth::{CallbackOutcome, CallbackParams, OauthService};
pub use provider::{ProviderClient, ProviderError, TokenResponse, UserProfile};
