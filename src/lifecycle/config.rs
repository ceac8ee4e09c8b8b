use serde::{Deserialize, Serialize};

/// Settings for the demo controller and its UI loop.
///
/// The defaults reproduce the strings the demo UI has always shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Page names are `"{page_prefix} {no}"`.
    pub page_prefix: String,
    /// Remark given to every new page.
    pub remark: String,
    /// Item names are `"{item_prefix} {index}"`.
    pub item_prefix: String,
    /// Text written by the update action.
    pub update_text: String,
    /// Capacity of the UI action channel.
    pub buffer_size: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            page_prefix: "Page".to_string(),
            remark: "Remark text.".to_string(),
            item_prefix: "SubName".to_string(),
            update_text: "Update TEST!".to_string(),
            buffer_size: 32,
        }
    }
}
