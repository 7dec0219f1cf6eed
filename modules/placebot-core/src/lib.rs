pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod ranking;
pub mod reasoning;
pub mod taxonomy;

pub use config::Config;
pub use engine::{ChatEngine, ChatReply, PlacesSearch};
pub use error::PlacebotError;
pub use taxonomy::CategoryTaxonomy;
