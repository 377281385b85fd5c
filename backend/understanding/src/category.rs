//! Category label normalization.
//!
//! Turns a header label such as `Maybe Found Items` into its canonical
//! [`Category`].

use lookout_core::Category;

/// Canonical key for a header label: lower-cased, spaces to underscores,
/// trailing `_items` / `_item` removed.
pub fn normalize_label(label: &str) -> String {
    let key = label.trim().to_lowercase().replace(' ', "_");
    if let Some(stem) = key.strip_suffix("_items") {
        return stem.to_string();
    }
    if let Some(stem) = key.strip_suffix("_item") {
        return stem.to_string();
    }
    key
}

/// Map a header label onto its category, if it names one.
pub fn category_for_label(label: &str) -> Option<Category> {
    Category::from_key(&normalize_label(label))
}
