//! YAML frontmatter stripping.

use serde_yaml::Value;

/// Document text split into metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Stripped {
    /// Parsed frontmatter, `None` when absent, empty, or not valid YAML.
    pub metadata: Option<Value>,
    /// Text after the frontmatter block, trimmed.
    pub body: String,
}

/// Remove a leading `---` delimited metadata block from `text`.
///
/// The text is trimmed first, so the opening delimiter must be the first
/// non-blank line. The block closes at the next line made only of three or
/// more dashes. Without a closed block the trimmed text is the body.
///
/// Never fails: a block with invalid YAML is still removed and a warning is
/// logged.
#[must_use]
pub fn strip_frontmatter(text: &str) -> Stripped {
    let text = text.trim();
    let mut lines = text.split_inclusive('\n');

    let Some(opening) = lines.next().filter(|line| is_delimiter(line)) else {
        return no_frontmatter(text);
    };

    let mut offset = opening.len();
    for line in lines {
        if is_delimiter(line) {
            let yaml = &text[opening.len()..offset];
            let body = &text[offset + line.len()..];
            return Stripped {
                metadata: parse_metadata(yaml),
                body: body.trim().to_owned(),
            };
        }
        offset += line.len();
    }

    tracing::debug!("Frontmatter opening delimiter without closing delimiter");
    no_frontmatter(text)
}

fn no_frontmatter(text: &str) -> Stripped {
    Stripped {
        metadata: None,
        body: text.to_owned(),
    }
}

fn is_delimiter(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= 3 && line.bytes().all(|b| b == b'-')
}

fn parse_metadata(yaml: &str) -> Option<Value> {
    if yaml.trim().is_empty() {
        return None;
    }
    match serde_yaml::from_str(yaml) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring frontmatter that is not valid YAML");
            None
        }
    }
}
