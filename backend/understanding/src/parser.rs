//! Tolerant parser for model replies.
//!
//! The reply is expected to follow the grammar from [`crate::prompt`]:
//!
//! ```text
//! **Found Items:**
//! * Chair
//! **Not Found Item:**
//! * Lamp (missing)
//! ```
//!
//! Bold headers switch the active category; `*` bullets under a header become
//! items of that category. Anything else is dropped. The parser never fails;
//! unreadable input yields empty categories.

use std::collections::HashSet;

use lookout_core::{Category, ParseResult, ReportedItem};
use tracing::{debug, info};

use crate::category::category_for_label;

/// Header stems, longest first so `found` does not shadow the others.
const HEADER_STEMS: [&str; 3] = ["maybe found", "not found", "found"];

/// Accumulator threaded through the line fold.
#[derive(Debug, Default)]
struct Scan {
    current: Option<Category>,
    result: ParseResult,
}

impl Scan {
    fn feed(mut self, line: &str) -> Self {
        if let Some(label) = parse_header(line) {
            self.current = category_for_label(label);
            match self.current {
                Some(category) => info!(category = %category, "Switched to category"),
                None => debug!(line, "Header matched but named no category"),
            }
            return self;
        }

        let Some(category) = self.current else {
            debug!(line, "Line not processed (no current category)");
            return self;
        };

        match parse_item(line) {
            Some(item) => self.result.push(category, item),
            None => debug!(category = %category, line, "Line did not match item pattern"),
        }
        self
    }
}

/// Parse a raw model reply into categorized items.
///
/// `targets` are the items the caller asked about. Targets the model never
/// mentioned are logged but not added to any category.
pub fn parse_response(raw: &str, targets: &[String]) -> ParseResult {
    info!(targets = ?targets, "Parsing model response");
    debug!(raw, "Raw model response to parse");

    let parsed = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .fold(Scan::default(), Scan::feed)
        .result;

    for name in reconcile(targets, &parsed).unmentioned {
        info!(item = %name, "Queried item not explicitly categorized by model");
    }

    info!(
        found = parsed.found.len(),
        maybe_found = parsed.maybe_found.len(),
        not_found = parsed.not_found.len(),
        "Parsed items"
    );
    parsed
}

/// Recognise a bold category header and return its label.
///
/// Accepts `**Found Item(s):**`, `**Maybe Found Item(s):**` and
/// `**Not Found Item(s):**` in any letter case. Text after the closing `:**`
/// is ignored. The returned label is the part between `**` and `:**`.
pub fn parse_header(line: &str) -> Option<&str> {
    let body = line.strip_prefix("**")?;
    let stem = HEADER_STEMS
        .iter()
        .find(|stem| starts_with_ignore_case(body, stem))?;
    let rest = strip_prefix_ignore_case(&body[stem.len()..], " item")?;
    let rest = strip_prefix_ignore_case(rest, "s").unwrap_or(rest);
    rest.strip_prefix(":**")?;
    Some(&body[..body.len() - rest.len()])
}

/// Recognise a bullet line: `* name` or `* name (detail)`.
///
/// The detail is the text between the first `(` and a closing `)` that ends
/// the line. Empty details are dropped. A bare `*` still counts as an item
/// with an empty name.
pub fn parse_item(line: &str) -> Option<ReportedItem> {
    let content = line.strip_prefix('*')?.trim_start();
    let (name, details) = split_detail(content);
    Some(ReportedItem {
        item: name.trim().to_string(),
        details: details
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
    })
}

fn split_detail(content: &str) -> (&str, Option<&str>) {
    if let Some(inner) = content.strip_suffix(')') {
        if let Some(open) = inner.find('(') {
            return (&inner[..open], Some(&inner[open + 1..]));
        }
    }
    (content, None)
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    starts_with_ignore_case(s, prefix).then(|| &s[prefix.len()..])
}

/// Outcome of checking requested targets against what the model reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub mentioned: Vec<String>,
    pub unmentioned: Vec<String>,
}

/// Split `targets` by whether any categorized item carries the same name,
/// ignoring case. Target order is preserved.
pub fn reconcile(targets: &[String], parsed: &ParseResult) -> Reconciliation {
    let reported: HashSet<String> = parsed.item_names().map(str::to_lowercase).collect();
    let (mentioned, unmentioned): (Vec<String>, Vec<String>) = targets
        .iter()
        .cloned()
        .partition(|t| reported.contains(&t.to_lowercase()));
    Reconciliation { mentioned, unmentioned }
}
