//! Research backends

mod duckduckgo;
mod html;
mod web_research;

pub use duckduckgo::{DuckDuckGoSearch, MEDICAL_QUERY_SUFFIX};
pub use html::html_to_text;
pub use web_research::{WebResearchService, condition_query, extract_research};
