use serde::Deserialize;

/// Declarative theme description as it appears in `builtin_themes.toml`
/// or a host-supplied TOML document. Every style field is a comma list of
/// color and modifier tokens, e.g. `"#61afef,bold"`.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeSpec {
    pub id: String,
    pub display_name: String,
    pub text: Option<String>,
    pub emphasis: Option<String>,
    pub strong: Option<String>,
    pub code: Option<String>,
    pub link: Option<String>,
    pub emoji: Option<String>,
    pub heading: Option<String>,
    pub quote: Option<String>,
    pub list_marker: Option<String>,
    pub code_gutter: Option<String>,
    pub code_block: Option<String>,
    pub rule: Option<String>,
    pub reply: Option<String>,
    pub user_palette: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct BuiltinThemesConfig {
    themes: Vec<ThemeSpec>,
}

pub fn load_builtin_themes() -> Vec<ThemeSpec> {
    const CONFIG_CONTENT: &str = include_str!("../../builtin_themes.toml");
    let config: BuiltinThemesConfig =
        toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtin_themes.toml");
    config.themes
}

pub fn find_builtin_theme(id: &str) -> Option<ThemeSpec> {
    load_builtin_themes()
        .into_iter()
        .find(|t| t.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_has_expected_builtins() {
        let themes = load_builtin_themes();
        let ids: Vec<String> = themes.iter().map(|t| t.id.clone()).collect();
        assert!(ids.contains(&"dark".to_string()));
        assert!(ids.contains(&"light".to_string()));
        assert!(ids.contains(&"dracula".to_string()));
    }

    #[test]
    fn find_builtin_theme_works_case_insensitive() {
        let t = find_builtin_theme("DaRk").expect("should find 'dark'");
        assert_eq!(t.id, "dark");
    }

    #[test]
    fn builtins_carry_user_palettes() {
        for theme in load_builtin_themes() {
            let palette = theme
                .user_palette
                .as_ref()
                .unwrap_or_else(|| panic!("theme {} lacks a user palette", theme.id));
            assert!(!palette.is_empty());
        }
    }
}
