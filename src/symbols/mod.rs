mod client;
mod error;
pub mod types;

pub use client::*;
pub use error::*;
pub use types::*;
