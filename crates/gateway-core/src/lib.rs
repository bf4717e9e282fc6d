//! # Gateway Core
//!
//! Core types, traits, and error handling for the site summary gateway.
//!
//! This crate provides the foundational types used throughout the gateway:
//! - The canonical summarization request and its validated pieces
//! - The `SummaryProvider` trait every vendor adapter implements
//! - The error taxonomy and the vendor error normalizer
//! - The fixed prompt contract and site content composition

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod normalize;
pub mod prompt;
pub mod provider;
pub mod request;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorCategory, GatewayError, GatewayResult, NormalizedError};
pub use normalize::ErrorNormalizer;
pub use prompt::{
    clean_excerpt, compose_content, PromptShape, SiteContent, MAX_EXCERPT_CHARS, MAX_OUTPUT_TOKENS,
    SYSTEM_PROMPT, USER_PROMPT_PREFIX,
};
pub use provider::{ProviderCallResult, ProviderInfo, SummaryProvider, FALLBACK_SUMMARY};
pub use request::{SummarizationRequest, SummaryResponse};
pub use types::Temperature;
