//! Askama templates for the web frontend.

use askama::Template;

/// Labels the form starts out with.
const DEFAULT_ORIGIN: &str = "黃大仙站A2";
const DEFAULT_DESTINATIONS: [&str; 5] = ["大埔中心", "沙田好運中心", "尖沙咀碼頭", "觀塘 apm", "藍田匯景"];

/// Home page with the optimize form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub origin: String,
    pub destinations: Vec<String>,
    pub destination_count: usize,
}

impl IndexTemplate {
    /// The form prefilled with a sample Hong Kong trip.
    pub fn with_defaults(destination_count: usize) -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            destinations: DEFAULT_DESTINATIONS
                .iter()
                .take(destination_count)
                .map(|s| s.to_string())
                .collect(),
            destination_count,
        }
    }
}
