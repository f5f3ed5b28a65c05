//! Issue key references in commit messages.
//!
//! A reference is a `#` followed by an issue key, e.g. `#TEST-15289`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISSUE_REFERENCE: Regex = Regex::new(r"#([A-Z][A-Z0-9_]*-\d+)").unwrap();
}

/// Extract the issue keys referenced in a message.
///
/// Keys are returned without the leading `#`, in the order they appear.
/// Repeated references are kept.
pub fn extract_issue_keys(message: &str) -> Vec<String> {
    ISSUE_REFERENCE
        .captures_iter(message)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
