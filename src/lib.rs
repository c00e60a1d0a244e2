// src/lib.rs

pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod learning;
pub mod persistence;
pub mod registry;
pub mod tokenizer;

pub use crate::config::RegistryConfig;
pub use crate::core::model::Model;
pub use crate::core::types::{ClassTable, Document, WordCounts};
pub use crate::registry::{Registry, Resolved};
pub use crate::tokenizer::{MystemTokenizer, PlainTokenizer, Tokenizer};
