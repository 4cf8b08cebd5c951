//! Skill descriptor (SKILL.md) parsing.
//!
//! A descriptor opens with a `---` marker on its very first line, closes
//! the front-matter block with a matching `---` line, and declares its
//! version inside an indented `metadata:` section:
//!
//! ```text
//! ---
//! name: my-skill
//! metadata:
//!   version: "1.2.0"
//! ---
//! ```

/// The front-matter delimiter line.
const MARKER: &str = "---";

/// Conventional descriptor file name inside a skill directory.
pub const DESCRIPTOR_FILE: &str = "SKILL.md";

/// Raw inner text of the leading front-matter block.
///
/// Returns None when the document does not open with the marker on its
/// very first line, or never closes the block.
pub fn extract_front_matter(document: &str) -> Option<String> {
    let mut lines = document.lines();
    if lines.next()?.trim_end() != MARKER {
        return None;
    }

    let mut inner = Vec::new();
    for line in lines {
        if line.trim_end() == MARKER {
            return Some(inner.join("\n"));
        }
        inner.push(line);
    }
    None
}

/// The `version` value inside the front matter's `metadata:` section.
///
/// The section is a top-level `metadata:` line followed by consecutive
/// indented lines; the first line not starting with a space or tab ends
/// it. The value may carry surrounding quotes and must consist of
/// alphanumerics, `.`, `_` and `-` only.
pub fn declared_version(front_matter: &str) -> Option<String> {
    let mut lines = front_matter.lines();

    lines.by_ref().find(|line| line.trim_end() == "metadata:")?;

    for line in lines {
        if !line.starts_with([' ', '\t']) {
            break;
        }
        if let Some(value) = version_value(line) {
            return Some(value);
        }
    }
    None
}

/// Front matter extraction and version lookup in one step.
pub fn version_from_descriptor(document: &str) -> Option<String> {
    let front_matter = extract_front_matter(document)?;
    declared_version(&front_matter)
}

fn version_value(line: &str) -> Option<String> {
    let rest = line.trim_start_matches([' ', '\t']).strip_prefix("version:")?;
    let mut value = rest.trim();
    value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value = value.strip_suffix(['"', '\'']).unwrap_or(value);
    if value.is_empty() || !value.chars().all(is_version_char) {
        return None;
    }
    Some(value.to_string())
}

fn is_version_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}
