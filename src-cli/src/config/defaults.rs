//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    ("QR_LABEL_FONT", "", "Path to the caption TTF/OTF font (searched when empty)"),
    ("QR_LABEL_OUTPUT_DIR", "", "Directory labels are written to (Downloads/Desktop/cwd when empty)"),
    ("QR_LABEL_DPI", "300", "Resolution for millimetre-sized labels"),
    ("QR_LABEL_VERSION", "1", "Requested QR version (1-40)"),
    ("QR_LABEL_EC_LEVEL", "M", "QR error-correction level (L, M, Q, H)"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Help text listing every setting with its description and default.
pub fn settings_help() -> String {
    let mut out = String::from("Settings (environment or .env):\n");
    for &(key, _, _) in DEFS {
        let def = &DEFAULT_SETTINGS[key];
        let default = if def.default.is_empty() { "unset" } else { def.default };
        out.push_str(&format!(
            "  {:<21} {} [default: {default}]\n",
            def.key, def.description
        ));
    }
    out
}
