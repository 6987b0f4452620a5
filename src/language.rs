use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::path::Path;
use std::sync::OnceLock;

static RULES_DIR: Dir = include_dir!("src/rules");

/// Indentation rule for one language, keyed by file extension.
#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct IndentRule {
    pub language: String,
    pub extensions: Vec<String>,
    pub tab_width: usize,
}

fn rules() -> &'static [IndentRule] {
    static RULES: OnceLock<Vec<IndentRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let file = RULES_DIR
            .get_file("indent.json")
            .expect("Indent rule table not found");
        let contents = file
            .contents_utf8()
            .expect("Unable to interpret rule table as a string");
        from_str(contents).expect("Unable to deserialize indent rule json")
    })
}

/// Tab width for a practice file, from its extension. Unrecognized or
/// missing extensions fall back to the given default.
pub fn resolve_tab_width(path: &Path, default: usize) -> usize {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return default;
    };
    let ext = ext.to_lowercase();

    rules()
        .iter()
        .find(|rule| rule.extensions.iter().any(|e| e == &ext))
        .map(|rule| rule.tab_width)
        .unwrap_or(default)
}
