// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod server;
pub use crate::core::loader::{Dictionary, DictionaryLoader, DictionarySource, ReversePolicy};
pub use crate::core::translator::Translator;
pub use crate::core::types::{Direction, Lookup, SentenceTranslation, NO_ALTERNATIVES};
pub use crate::error::{ApiError, LoadError};
