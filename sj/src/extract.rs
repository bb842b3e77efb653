//! Fenced code block extraction
//!
//! Works on any markdown-ish text: a rendered judge prompt, a judge answer,
//! or a rule generator answer. A block opens on a line starting with three
//! backticks (optionally followed by an info string such as `yaml`) and
//! closes on the next line consisting only of three backticks.

use tracing::debug;

const FENCE: &str = "```";

/// A fenced code block located in some text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Info string after the opening fence (`yaml`, `json`, or empty)
    pub info: &'a str,
    /// Text between the fence lines, without the final newline
    pub body: &'a str,
    /// Byte offset of the opening fence line
    pub start: usize,
    /// Byte offset just past the closing fence line
    pub end: usize,
}

/// All closed fenced blocks in `text`, in order of appearance
pub fn fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut open: Option<(&str, usize, usize)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        match open {
            None => {
                if let Some(info) = content.trim_start().strip_prefix(FENCE) {
                    open = Some((info.trim(), offset, offset + line.len()));
                }
            }
            Some((info, start, body_start)) => {
                if content.trim() == FENCE {
                    let body = &text[body_start..offset];
                    blocks.push(FencedBlock {
                        info,
                        body: body.strip_suffix('\n').unwrap_or(body),
                        start,
                        end: offset + line.len(),
                    });
                    open = None;
                }
            }
        }
        offset += line.len();
    }

    debug!(count = blocks.len(), unclosed = open.is_some(), "fenced_blocks: scanned");
    blocks
}

/// Body of the first block whose info string is exactly `info`
pub fn fenced_block<'a>(text: &'a str, info: &str) -> Option<&'a str> {
    fenced_blocks(text)
        .into_iter()
        .find(|b| b.info == info)
        .map(|b| b.body)
}

/// Body of the first `info` block that opens after `marker`.
///
/// Occurrences of `marker` inside a fenced block are skipped, so rule text
/// that happens to contain the marker does not confuse the lookup.
pub fn fenced_block_after<'a>(text: &'a str, marker: &str, info: &str) -> Option<&'a str> {
    let blocks = fenced_blocks(text);
    let inside = |pos: usize| blocks.iter().any(|b| b.start <= pos && pos < b.end);
    let at = text.match_indices(marker).map(|(pos, _)| pos).find(|pos| !inside(*pos))?;
    debug!(%marker, at, "fenced_block_after: marker located");

    blocks
        .iter()
        .find(|b| b.start >= at && b.info == info)
        .map(|b| b.body)
}

/// First non-empty YAML block, trimmed
///
/// The opener is located anywhere in the text, not only at a line start, so
/// answers like "Here is the rule: ```yaml" still yield the rule. The body
/// runs to the next fence, or to the end of the text if none follows.
pub fn yaml_block(text: &str) -> Option<&str> {
    let opener = ["```yaml", "```yml"]
        .into_iter()
        .filter_map(|o| text.find(o).map(|pos| pos + o.len()))
        .min()?;
    let rest = &text[opener..];
    let body = rest.find(FENCE).map_or(rest, |close| &rest[..close]).trim();
    debug!(len = body.len(), "yaml_block: located");
    (!body.is_empty()).then_some(body)
}

/// Best-effort JSON object from free text.
///
/// Prefers a `json` block, then an unlabelled block holding an object, then
/// the span from the first `{` to the last `}`.
pub fn json_payload(text: &str) -> Option<&str> {
    let blocks = fenced_blocks(text);
    let looks_like_object = |s: &str| s.trim_start().starts_with('{');

    if let Some(block) = blocks.iter().find(|b| b.info == "json") {
        debug!("json_payload: using json block");
        return Some(block.body.trim());
    }
    if let Some(block) = blocks.iter().find(|b| b.info.is_empty() && looks_like_object(b.body)) {
        debug!("json_payload: using unlabelled block");
        return Some(block.body.trim());
    }

    let open = text.find('{')?;
    let close = text.rfind('}')?;
    (open < close).then(|| &text[open..=close])
}
