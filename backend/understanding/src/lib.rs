pub mod analysis;
pub mod category;
pub mod parser;
pub mod prompt;

pub use analysis::analyze_image;
pub use category::{category_for_label, normalize_label};
pub use parser::{parse_header, parse_item, parse_response, reconcile, Reconciliation};
pub use prompt::{build_prompt, FORMAT_INSTRUCTIONS};
