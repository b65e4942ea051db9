//! Theme file handling

use anyhow::{Context, Result};
use cardapio_theme::{ThemeDocument, ThemeInput};
use std::fs;
use std::path::{Path, PathBuf};

/// Default theme file name
pub const THEME_FILE: &str = "theme.toml";

/// Resolve `path` to a theme file (a directory means `<dir>/theme.toml`)
pub fn theme_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(THEME_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Load a theme document from TOML or stored JSON
///
/// Without a path, `./theme.toml` is used when present and the built-in
/// default theme otherwise.
pub fn load_theme(path: Option<&Path>) -> Result<ThemeDocument> {
    let config_path = match path {
        Some(path) => theme_path(path),
        None => {
            let local = PathBuf::from(THEME_FILE);
            if !local.exists() {
                tracing::debug!("no {THEME_FILE} in the current directory, using defaults");
                return Ok(ThemeDocument::default());
            }
            local
        }
    };

    if !config_path.exists() {
        anyhow::bail!(
            "No theme file at {}. Run `cardapio-theme init` to create one.",
            config_path.display()
        );
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let is_json = config_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let document = if is_json {
        ThemeDocument::from_json_str(&content)
    } else {
        ThemeDocument::from_toml_str(&content)
    }
    .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    Ok(document)
}

/// Command-line colors take precedence over the file
pub fn with_colors(
    mut document: ThemeDocument,
    primary: Option<String>,
    secondary: Option<String>,
) -> ThemeDocument {
    if let Some(primary) = primary {
        document.input.primary_hex = primary;
    }
    if let Some(secondary) = secondary {
        document.input.secondary_hex = secondary;
    }
    document
}

/// Starter theme file for `init`
pub fn starter_document(name: &str) -> ThemeDocument {
    ThemeDocument {
        input: ThemeInput::default().with_name(name),
        ..ThemeDocument::default()
    }
}

/// Serialize to TOML string
pub fn to_toml(document: &ThemeDocument) -> Result<String> {
    toml::to_string_pretty(document).context("Failed to serialize theme")
}
