//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files for the rule comparison judge.
//!
//! Template loading chain:
//! 1. `{prompts.dir}/{name}.pmt` (user override, from config)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution. Substituted
//! rule text is inserted verbatim: no HTML escaping, no trimming.

pub mod embedded;
mod loader;

pub use loader::{JUDGE_TEMPLATE, JudgeContext, PromptLoader, render_judge_prompt};
