use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const FIXED_THEME_IDS: [&str; 8] = [
    "dark",
    "light",
    "retro",
    "cyberpunk",
    "sakura",
    "ocean",
    "forest",
    "midnight",
];

#[derive(Debug, Clone, Deserialize)]
struct ThemeCatalogFile {
    schema_version: u32,
    theme: Vec<ThemeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeEntry {
    id: String,
    name: String,
    #[serde(default)]
    effect: Option<String>,
    bg_base: String,
    bg_header: String,
    text_main: String,
    text_dim: String,
    border: String,
    primary: String,
    accent: String,
    panel: String,
    success: String,
    danger: String,
}

impl ThemeEntry {
    fn colors(&self) -> [(&'static str, &str); 10] {
        [
            ("bg_base", &self.bg_base),
            ("bg_header", &self.bg_header),
            ("text_main", &self.text_main),
            ("text_dim", &self.text_dim),
            ("border", &self.border),
            ("primary", &self.primary),
            ("accent", &self.accent),
            ("panel", &self.panel),
            ("success", &self.success),
            ("danger", &self.danger),
        ]
    }
}

fn is_hex_color(raw: &str) -> bool {
    let Some(digits) = raw.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("themes.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: ThemeCatalogFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if catalog.schema_version != 1 {
        panic!(
            "theme catalog schema mismatch in {}: expected 1 found {}",
            path.display(),
            catalog.schema_version
        );
    }

    let mut seen = BTreeSet::new();
    for entry in &catalog.theme {
        if !FIXED_THEME_IDS.contains(&entry.id.as_str()) {
            panic!("unknown theme id `{}` in {}", entry.id, path.display());
        }
        if !seen.insert(entry.id.clone()) {
            panic!("duplicate theme id `{}` in {}", entry.id, path.display());
        }
        if entry.name.trim().is_empty() {
            panic!("theme `{}` has an empty name", entry.id);
        }
        for (field, value) in entry.colors() {
            if !is_hex_color(value) {
                panic!("theme `{}` field `{field}` is not a hex color: {value}", entry.id);
            }
        }
    }
    for id in FIXED_THEME_IDS {
        if !seen.contains(id) {
            panic!("theme catalog {} is missing `{id}`", path.display());
        }
    }

    let json = serde_json::to_string_pretty(&catalog.theme).expect("serialize theme catalog");
    let generated = format!(
        "/// Build-time generated fixed theme palette catalog JSON.\n\
pub const THEME_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("theme_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
