//! Domain types and pure logic shared by the PvP tracker crates.
//!
//! Nothing in here touches the network or the database: locale parsing,
//! roster normalization, deterministic naming and match-record validation.

pub mod error;
pub mod locale;
pub mod naming;
pub mod pvp;
pub mod roster;
pub mod types;
