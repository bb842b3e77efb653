//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// SIGMA rule comparison judge prompt
pub const JUDGE: &str = include_str!("../../prompts/judge.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "judge" => {
            debug!("get_embedded: matched judge");
            Some(JUDGE)
        }
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
