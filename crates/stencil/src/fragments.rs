//! Scanning free text for interpolated variables.
//!
//! Comments and string literals may mention variables inline, as in
//! `// TODO: __$_task`.  Such text is split into literal pieces and variable
//! references, and compiled into a single regex with one lazy capture group
//! per variable.

use stencil_core::is_var_char;

/// One piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fragment<'t> {
    /// Literal text between variables.
    Text(&'t str),
    /// A variable name, without its prefix.
    Variable(&'t str),
}

/// Splits `text` into literal and variable fragments.
///
/// A prefix not followed by any name character is kept as literal text.
/// Empty literal pieces are dropped.
pub(crate) fn split_fragments<'t>(text: &'t str, prefix: &str) -> Vec<Fragment<'t>> {
    let mut fragments = Vec::new();
    if prefix.is_empty() {
        push_text(&mut fragments, text, text.len());
        return fragments;
    }

    let mut rest = text;
    let mut pending_start = text;
    let mut pending_len = 0;

    while let Some(position) = rest.find(prefix) {
        let (before, from_prefix) = rest.split_at(position);
        let tail = from_prefix.get(prefix.len()..).unwrap_or_default();
        let name_len = tail
            .char_indices()
            .find(|(_, c)| !is_var_char(*c))
            .map_or(tail.len(), |(index, _)| index);
        let (name, remaining) = tail.split_at(name_len);

        if name.is_empty() {
            pending_len += before.len() + prefix.len();
        } else {
            pending_len += before.len();
            push_text(&mut fragments, pending_start, pending_len);
            fragments.push(Fragment::Variable(name));
            pending_start = remaining;
            pending_len = 0;
        }
        rest = remaining;
    }

    pending_len += rest.len();
    push_text(&mut fragments, pending_start, pending_len);
    fragments
}

fn push_text<'t>(fragments: &mut Vec<Fragment<'t>>, start: &'t str, len: usize) {
    if let Some(text) = start.get(..len).filter(|text| !text.is_empty()) {
        fragments.push(Fragment::Text(text));
    }
}

/// Returns the words of a piece of text, split at non-name characters.
pub(crate) fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_var_char(c))
        .filter(|word| !word.is_empty())
}

/// Returns the contents of a double-quoted string literal.
pub(crate) fn string_literal_body(text: &str) -> Option<&str> {
    if text.len() <= 2 {
        return None;
    }
    text.strip_prefix('"')?.strip_suffix('"')
}

/// Builds the regex for scanned fragments.
///
/// Literal pieces are escaped and each variable becomes a lazy capture
/// group.  String literal patterns also accept either quote character
/// around the text.
pub(crate) fn fragment_regex(fragments: &[Fragment<'_>], quoted: bool) -> String {
    let mut regex = String::new();
    if quoted {
        regex.push_str("[\"']");
    }
    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => regex.push_str(&regex::escape(text)),
            Fragment::Variable(_) => regex.push_str("(.*?)"),
        }
    }
    if quoted {
        regex.push_str("[\"']");
    }
    regex
}
