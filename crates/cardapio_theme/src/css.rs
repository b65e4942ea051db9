//! CSS custom property serialization

use cardapio_core::Color;
use indexmap::IndexMap;

use crate::builder::ThemeBuildResult;
use crate::scale::ColorScale;

/// Ordered variable map: name (without the leading `--`) to value
pub type CssVariables = IndexMap<String, String>;

/// Flatten a build result into CSS variables
///
/// Order is primary, secondary and neutral scales (ascending keys), then
/// semantic tokens, then component tokens.
///
/// ```rust
/// use cardapio_theme::{build_theme_tokens, to_css_variable_map, ThemeConfig, ThemeInput};
///
/// let result = build_theme_tokens(&ThemeInput::default(), &ThemeConfig::default()).unwrap();
/// let vars = to_css_variable_map(&result);
/// assert_eq!(vars.get("primary-500").map(String::as_str), Some("#3b82f6"));
/// assert_eq!(vars.get_index(0).map(|(k, _)| k.as_str()), Some("primary-50"));
/// ```
pub fn to_css_variable_map(result: &ThemeBuildResult) -> CssVariables {
    let mut vars = VariableWriter {
        prefix: result.css_prefix.as_deref(),
        vars: IndexMap::with_capacity(result.primary.len() * 3 + 64),
    };

    vars.scale("primary", &result.primary);
    vars.scale("secondary", &result.secondary);
    vars.scale("neutral", &result.neutral);

    for (slot, pair) in result.semantic.pairs() {
        let name = slot.css_name();
        vars.insert(&format!("{name}-bg"), pair.background);
        vars.insert(&format!("{name}-fg"), pair.foreground);
    }
    let surface = &result.semantic.surface;
    vars.insert("surface-base", surface.base);
    vars.insert("surface-raised", surface.raised);
    vars.insert("surface-sunken", surface.sunken);
    vars.insert("surface-overlay", surface.overlay);
    vars.insert("surface-border", surface.border);

    for (slot, colors) in result.components.iter() {
        let name = slot.css_name();
        vars.insert(&format!("{name}-bg"), colors.pair.background);
        vars.insert(&format!("{name}-fg"), colors.pair.foreground);
        if let Some(border) = colors.border {
            vars.insert(&format!("{name}-border"), border);
        }
        if let Some(ring) = colors.focus_ring {
            vars.insert(&format!("{name}-ring"), ring);
        }
    }

    vars.vars
}

struct VariableWriter<'a> {
    prefix: Option<&'a str>,
    vars: CssVariables,
}

impl VariableWriter<'_> {
    fn insert(&mut self, name: &str, color: Color) {
        let key = match self.prefix {
            Some(prefix) => format!("{prefix}-{name}"),
            None => name.to_string(),
        };
        self.vars.insert(key, color.to_hex());
    }

    fn scale(&mut self, name: &str, scale: &ColorScale) {
        for step in scale.iter() {
            self.insert(&format!("{name}-{}", step.key), step.color);
        }
    }
}

/// Render a variable map as a single `:root` block
pub fn serialize_root(vars: &CssVariables) -> String {
    let mut css = String::with_capacity(vars.len() * 32 + 16);
    css.push_str(":root {\n");
    for (name, value) in vars {
        css.push_str(&format!("  --{name}: {value};\n"));
    }
    css.push_str("}\n");
    css
}

/// Normalize an identifier to lower kebab-case
///
/// Camel-case humps and any run of non-alphanumeric characters become a
/// single `-`; leading and trailing dashes are dropped.
pub fn kebab_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut pending_dash = false;
    let mut prev_lower = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if (pending_dash || (prev_lower && c.is_ascii_uppercase())) && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
            prev_lower = false;
        }
    }
    out
}
