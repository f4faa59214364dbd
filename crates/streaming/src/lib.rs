//! Elevation backend access: the JSON wire contract, request building and
//! sources that produce one validated terrain payload per query.

pub mod client;
pub mod error;
pub mod protocol;
pub mod request;

pub use client::*;
pub use error::*;
pub use protocol::*;
pub use request::*;
