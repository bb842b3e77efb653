//! sigmajudge - SIGMA rule comparison judge
//!
//! Renders the prompt that asks a language model to compare a generated
//! SIGMA rule against an expected one, and validates the JSON verdict that
//! comes back.
//!
//! # Modules
//!
//! - [`prompts`] - Judge template, embedded and overridable
//! - [`evaluation`] - Verdict model and response validation
//! - [`extract`] - Fenced code block extraction
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```
//! use sigmajudge::{render_judge_prompt, validate_response};
//!
//! let prompt = render_judge_prompt("title: A", "title: B");
//! assert!(prompt.contains("GENERATED RULE:\n```yaml\ntitle: A\n```"));
//!
//! let verdict = validate_response(
//!     r#"{"score": 0.8, "reasoning": "ok", "criteria_scores": {"detection_logic": 0.9,
//!        "completeness": 0.8, "false_positive_rate": 0.7, "technical_quality": 0.9}}"#,
//! )
//! .unwrap();
//! assert_eq!(verdict.score, 0.8);
//! ```

pub mod cli;
pub mod config;
pub mod evaluation;
pub mod extract;
pub mod prompts;

// Re-export commonly used types
pub use config::Config;
pub use evaluation::{
    CriteriaScores, Criterion, ErrorKind, EvaluationResult, ResponseError, parse_response, validate_response,
};
pub use prompts::{JudgeContext, PromptLoader, render_judge_prompt};
