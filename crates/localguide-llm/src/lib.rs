//! Language-model access for the recommendation pipeline.
//!
//! [`ChatClient`] talks to an OpenAI-compatible chat-completions endpoint;
//! [`prompts`] holds the instruction text and [`parse`] the strict parsers
//! for the line formats those prompts demand.

pub mod client;
pub mod error;
pub mod model;
pub mod parse;
pub mod prompts;
pub mod types;

pub use client::ChatClient;
pub use error::LlmError;
pub use model::LanguageModel;
pub use parse::{parse_keyword, parse_place_name, KeywordParse, PlaceNameParse, MAX_KEYWORD_CHARS};
