//! Request extractors shared by handlers.
//!
//! - [`auth::AuthSession`] -- Requires a live operator session cookie.
//! - [`client_ip::ClientIp`] -- Peer address used for login throttling.

pub mod auth;
pub mod client_ip;
