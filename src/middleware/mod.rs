// SPDX-License-Identifier: MIT

//! Middleware modules (reverse-proxy derivation, security headers).

pub mod proxy;
pub mod security;

pub use proxy::ClientInfo;
pub use security::add_security_headers;
