//! domain-core - secret resolution pipeline
//!
//! `parse` turns a spec string into [`SecretRef`]s, `fetch_all` resolves
//! them against a store and `write` serializes them to an env file.

mod fetcher;
mod parser;
mod response;
mod secret;
mod writer;

pub use fetcher::*;
pub use parser::*;
pub use response::*;
pub use secret::*;
pub use writer::*;
