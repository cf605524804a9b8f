#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod error;

pub use error::EngineError;

pub use config::{load_embed_config_from, load_typed_json, EmbedConfig};
