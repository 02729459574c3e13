//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files for letter generation
//! and revision.
//!
//! Template loading chain:
//! 1. `.loagen/prompts/{name}.pmt` (user override)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution. The request
//! template receives a [`RequestContext`] assembled from the operator's
//! letter parameters.

pub mod embedded;

mod builder;
mod loader;

pub use builder::RequestContext;
pub use loader::{PromptError, PromptLoader};
