//! Recovers structured parts from a document's canonical text when the
//! metadata does not carry them.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! header_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// "Attributes (27 total):"
header_pattern!(RE_ATTRIBUTES, r"(?i)^attributes\b[^:]*:$");
// "Business Rules (10 total):"
header_pattern!(RE_BUSINESS_RULES, r"(?i)^business rules\b[^:]*:$");
// "Entities in this Subject Area:"
header_pattern!(RE_AREA_ENTITIES, r"(?i)^entities in this subject area\b[^:]*:$");
// "Description: ..." or "Overview: ..."
header_pattern!(RE_DESCRIPTION, r"(?i)^(?:description|overview)\s*:\s*(.*)$");
// Any "Key: value" or "Key (n):" line that starts a new block.
header_pattern!(RE_ANY_HEADER, r"^[A-Z][A-Za-z ]*(?:\([^)]*\))?\s*:");

const BULLET_MARKERS: [char; 3] = ['•', '-', '*'];

/// A bulleted block in document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Attributes,
    BusinessRules,
    SubjectAreaEntities,
}

impl Section {
    fn header(self) -> &'static LazyLock<Option<Regex>> {
        match self {
            Self::Attributes => &RE_ATTRIBUTES,
            Self::BusinessRules => &RE_BUSINESS_RULES,
            Self::SubjectAreaEntities => &RE_AREA_ENTITIES,
        }
    }
}

/// Bullet items listed under `section`'s header, in order.
///
/// Blank lines before the first bullet are skipped; the block ends at the
/// first blank or non-bullet line after it.
pub fn bullets(text: &str, section: Section) -> Vec<String> {
    let Some(header) = section.header().as_ref() else {
        return Vec::new();
    };

    let mut lines = text.lines().map(str::trim);
    if !lines.by_ref().any(|line| header.is_match(line)) {
        return Vec::new();
    }

    let mut items = Vec::new();
    for line in lines {
        if line.is_empty() {
            if items.is_empty() {
                continue;
            }
            break;
        }
        match strip_bullet(line) {
            Some(item) => items.push(item.to_string()),
            None => break,
        }
    }
    items
}

/// Text following a `Description:` (or `Overview:`) header, joined into
/// one line. Continuation lines run until a blank line or the next header.
pub fn description(text: &str) -> Option<String> {
    let re = RE_DESCRIPTION.as_ref()?;
    let mut lines = text.lines().map(str::trim);

    let first = lines.by_ref().find_map(|line| {
        re.captures(line)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()).to_string())
    })?;

    let mut parts = Vec::new();
    if !first.is_empty() {
        parts.push(first);
    }
    for line in lines {
        if line.is_empty() {
            if parts.is_empty() {
                continue;
            }
            break;
        }
        if is_header(line) || strip_bullet(line).is_some() {
            break;
        }
        parts.push(line.to_string());
    }

    let joined = parts.join(" ");
    (!joined.is_empty()).then_some(joined)
}

fn is_header(line: &str) -> bool {
    RE_ANY_HEADER.as_ref().is_some_and(|re| re.is_match(line))
}

fn strip_bullet(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(BULLET_MARKERS)?.trim();
    (!rest.is_empty()).then_some(rest)
}
