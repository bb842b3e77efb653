//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;

/// Name of the judge template, both on disk (`judge.pmt`) and embedded
pub const JUDGE_TEMPLATE: &str = "judge";

const CANDIDATE_SLOT: &str = "{{{rule1}}}";
const REFERENCE_SLOT: &str = "{{{rule2}}}";

/// Context for rendering the judge template
///
/// Field names are the template's placeholder names.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JudgeContext<'a> {
    /// Candidate rule ("GENERATED RULE")
    pub rule1: &'a str,
    /// Reference rule ("EXPECTED RULE")
    pub rule2: &'a str,
}

impl<'a> JudgeContext<'a> {
    pub fn new(candidate: &'a str, reference: &'a str) -> Self {
        debug!(
            candidate_len = candidate.len(),
            reference_len = reference.len(),
            "JudgeContext::new: called"
        );
        Self {
            rule1: candidate,
            rule2: reference,
        }
    }
}

/// Render the embedded judge prompt for a candidate and a reference rule.
///
/// Pure and infallible: both rules are spliced in verbatim, whatever they contain.
pub fn render_judge_prompt(candidate: &str, reference: &str) -> String {
    let template = embedded::JUDGE;
    let (head, rest) = template.split_once(CANDIDATE_SLOT).unwrap_or((template, ""));
    let (middle, tail) = rest.split_once(REFERENCE_SLOT).unwrap_or((rest, ""));

    let mut out = String::with_capacity(template.len() + candidate.len() + reference.len());
    out.push_str(head);
    out.push_str(candidate);
    out.push_str(middle);
    out.push_str(reference);
    out.push_str(tail);
    out
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `~/.config/sigmajudge/prompts/`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader, preferring templates found in `dir`
    pub fn new(dir: Option<&Path>) -> Self {
        debug!(?dir, "PromptLoader::new: called");
        let override_dir = match dir {
            Some(dir) if dir.is_dir() => {
                debug!("PromptLoader::new: override directory found");
                Some(dir.to_path_buf())
            }
            Some(dir) => {
                debug!(?dir, "PromptLoader::new: override directory missing, using embedded only");
                None
            }
            None => {
                debug!("PromptLoader::new: no override directory configured");
                None
            }
        };

        Self {
            hbs: Self::engine(),
            override_dir,
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            override_dir: None,
        }
    }

    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        // Rule text is YAML, never HTML.
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name using the lookup chain
    pub fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");

        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found in override directory");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt override {}: {}", path.display(), e));
            }
            debug!(?path, "PromptLoader::load_template: not found in override directory");
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        debug!(%name, "PromptLoader::load_template: not found anywhere");
        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &JudgeContext<'_>) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        info!(
            "Rendering template '{}' (candidate {} bytes, reference {} bytes)",
            template_name,
            context.rule1.len(),
            context.rule2.len()
        );

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Render the judge prompt for a candidate and reference rule
    pub fn render_judge(&self, candidate: &str, reference: &str) -> Result<String> {
        debug!("PromptLoader::render_judge: called");
        self.render(JUDGE_TEMPLATE, &JudgeContext::new(candidate, reference))
    }
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self::embedded_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CANDIDATE: &str = "title: Test\ndetection:\n  selection:\n    EventID: 1\n  condition: selection";
    const REFERENCE: &str = "title: Test2\ndetection:\n  selection:\n    EventID: 4688\n  condition: selection";

    #[test]
    fn test_render_judge_prompt_embeds_rules_in_fences() {
        let prompt = render_judge_prompt(CANDIDATE, REFERENCE);
        assert!(prompt.contains(&format!("GENERATED RULE:\n```yaml\n{}\n```\n", CANDIDATE)));
        assert!(prompt.contains(&format!("EXPECTED RULE:\n```yaml\n{}\n```\n", REFERENCE)));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_render_judge_prompt_empty_rules() {
        let prompt = render_judge_prompt("", "");
        assert!(prompt.contains("GENERATED RULE:\n```yaml\n\n```"));
        assert!(prompt.contains("EXPECTED RULE:\n```yaml\n\n```"));
    }

    #[test]
    fn test_render_judge_prompt_does_not_resubstitute() {
        // A candidate that looks like the reference placeholder stays literal.
        let prompt = render_judge_prompt("{{{rule2}}}", "ref");
        assert!(prompt.contains("```yaml\n{{{rule2}}}\n```"));
        assert_eq!(prompt.matches("ref\n```").count(), 1);
    }

    #[test]
    fn test_loader_matches_direct_render() {
        let loader = PromptLoader::embedded_only();
        let rendered = loader.render_judge(CANDIDATE, REFERENCE).unwrap();
        assert_eq!(rendered, render_judge_prompt(CANDIDATE, REFERENCE));
    }

    #[test]
    fn test_loader_does_not_html_escape() {
        let rule = "detection:\n  sel:\n    CommandLine|contains: '<script>&\"x\"'";
        let loader = PromptLoader::embedded_only();
        let rendered = loader.render_judge(rule, "").unwrap();
        assert!(rendered.contains(rule));
        assert!(!rendered.contains("&lt;"));
    }

    #[test]
    fn test_loader_unknown_template() {
        let loader = PromptLoader::embedded_only();
        assert!(loader.load_template("nonexistent-template").is_err());
    }

    #[test]
    fn test_loader_prefers_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("judge.pmt"), "A={{{rule1}}} B={{{rule2}}}").unwrap();

        let loader = PromptLoader::new(Some(dir.path()));
        assert_eq!(loader.render_judge("x", "y").unwrap(), "A=x B=y");
    }

    #[test]
    fn test_loader_missing_override_dir_falls_back() {
        let dir = TempDir::new().unwrap();
        let absent = dir.path().join("absent");
        let loader = PromptLoader::new(Some(absent.as_path()));
        assert_eq!(loader.load_template(JUDGE_TEMPLATE).unwrap(), embedded::JUDGE);
    }

    #[test]
    fn test_loader_bad_override_fails_to_render() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("judge.pmt"), "{{#if rule1}}unterminated").unwrap();

        let loader = PromptLoader::new(Some(dir.path()));
        assert!(loader.render_judge("x", "y").is_err());
    }
}
