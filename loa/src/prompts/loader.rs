//! Prompt Loader
//!
//! Loads prompt templates from user override files or falls back to embedded
//! defaults, and renders them with Handlebars.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use thiserror::Error;
use tracing::debug;

use super::builder::RequestContext;
use super::embedded;

/// Errors from prompt loading and rendering
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt template not found: {0}")]
    NotFound(String),

    #[error("Failed to read prompt {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: handlebars::RenderError,
    },
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.loagen/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given directory
    ///
    /// Checks for a `.loagen/prompts/` override directory under the root.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        debug!(?root, "PromptLoader::new: called");
        let user_dir = root.join(".loagen/prompts");

        let user_dir_exists = user_dir.exists();
        if user_dir_exists {
            debug!(?user_dir, "PromptLoader::new: user override directory found");
        } else {
            debug!("PromptLoader::new: no user override directory");
        }

        Self {
            hbs: Handlebars::new(),
            user_dir: if user_dir_exists { Some(user_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Handlebars::new(),
            user_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.loagen/prompts/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String, PromptError> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found in user override");
                return std::fs::read_to_string(&path).map_err(|e| PromptError::Io { path, source: e });
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        debug!(%name, "PromptLoader::load_template: not found anywhere");
        Err(PromptError::NotFound(name.to_string()))
    }

    /// Render a named template with the given context
    fn render<T: serde::Serialize>(&self, name: &str, context: &T) -> Result<String, PromptError> {
        let template = self.load_template(name)?;
        self.hbs.render_template(&template, context).map_err(|e| PromptError::Render {
            name: name.to_string(),
            source: e,
        })
    }

    /// Get the system directive sent with every completion call
    pub fn system_prompt(&self) -> Result<String, PromptError> {
        debug!("PromptLoader::system_prompt: called");
        self.load_template("system")
    }

    /// Render the letter generation request from operator parameters
    pub fn request_prompt(&self, context: &RequestContext) -> Result<String, PromptError> {
        debug!("PromptLoader::request_prompt: called");
        self.render("request", context)
    }

    /// Wrap an edit instruction in the fixed revision template
    pub fn revise_prompt(&self, instruction: &str) -> Result<String, PromptError> {
        debug!(instruction_len = instruction.len(), "PromptLoader::revise_prompt: called");
        self.render("revise", &serde_json::json!({ "instruction": instruction }))
    }
}
