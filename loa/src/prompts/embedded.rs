//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System directive describing letter conventions to the model
pub const SYSTEM: &str = include_str!("../../prompts/system.pmt");

/// Letter generation request template
pub const REQUEST: &str = include_str!("../../prompts/request.pmt");

/// Revision request wrapper template
pub const REVISE: &str = include_str!("../../prompts/revise.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "system" => Some(SYSTEM),
        "request" => Some(REQUEST),
        "revise" => Some(REVISE),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
