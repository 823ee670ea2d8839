//! Minimal markup fragment scanner
//!
//! Demo slots receive markup fragments verbatim. Components only need to know
//! which top-level elements a fragment contains (tag and visible text) to bind
//! interactions to them, so this is a forgiving scanner rather than a parser:
//! unknown constructs are skipped and unclosed tags end the fragment.

use html_escape::decode_html_entities;

/// A top-level element found in a fragment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupNode {
    /// Lowercase tag name
    pub tag: String,
    /// Visible text with entities decoded and whitespace collapsed
    pub text: String,
}

const VOID_TAGS: &[&str] = &["input", "br", "img", "hr", "meta"];

/// Scan a fragment and return its top-level elements in document order
pub fn scan_fragment(fragment: &str) -> Vec<MarkupNode> {
    let mut nodes = Vec::new();
    let mut current: Option<MarkupNode> = None;
    let mut depth = 0usize;
    let mut rest = fragment;

    while let Some(open) = rest.find('<') {
        if depth > 0 {
            if let Some(node) = current.as_mut() {
                node.text.push_str(&rest[..open]);
            }
        }
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            break;
        };
        let inner = after[..close].trim();
        rest = &after[close + 1..];

        if inner.starts_with('!') {
            continue;
        }
        if inner.starts_with('/') {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                if let Some(node) = current.take() {
                    nodes.push(finish(node));
                }
            }
            continue;
        }

        let tag: String = inner
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag.is_empty() {
            continue;
        }
        let self_closing = inner.ends_with('/') || VOID_TAGS.contains(&tag.as_str());

        if depth == 0 {
            let node = MarkupNode {
                tag,
                text: String::new(),
            };
            if self_closing {
                nodes.push(node);
            } else {
                current = Some(node);
                depth = 1;
            }
        } else if !self_closing {
            depth += 1;
        }
    }

    nodes
}

fn finish(mut node: MarkupNode) -> MarkupNode {
    let decoded = decode_html_entities(&node.text);
    node.text = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    node
}
