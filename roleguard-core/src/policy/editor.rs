//! Block editor style rules
//!
//! [`generate_style_rules`] is the only place that decides which rules apply.
//! Both injection paths ([`StyleSheet::inline_style`] and
//! [`StyleSheet::head_element`]) render the same [`StyleSheet::to_css`] text.
//!
//! Note the drag-handle rule: it is emitted unconditionally, so drag handles
//! are always hidden even though the `show_drag_handles` flag is forced on.

use crate::settings::{EditorRestrictions, Settings};

/// Host stylesheet handle the inline rules are attached to
pub const EDITOR_STYLE_HANDLE: &str = "wp-edit-post";

/// `id` of the `<style>` element emitted into the admin head
pub const HEAD_STYLE_ID: &str = "roleguard-dynamic-css";

const HIDE_REUSABLE_BLOCKS_CSS: &str = r#"
/* Hide reusable blocks interface */
.edit-post-sidebar__panel-tab[aria-label="Reusable blocks"],
.components-menu-item__button[aria-label="Add to Reusable blocks"],
a[href*="edit.php?post_type=wp_block"] {
    display: none !important;
}"#;

const HIDE_BLOCK_SETTINGS_CSS: &str = r#"
/* Hide block settings toolbar */
.block-editor-block-toolbar.is-synced {
    display: none !important;
}"#;

const HIDE_GREENSHIFT_CSS: &str = r#"
/* Hide GreenShift UI elements */
button[aria-label="GreenShift settings"],
button[aria-label="GreenShift Helpers"],
button[aria-controls^="greenshift-"] {
    display: none !important;
}"#;

const HIDE_DRAG_HANDLES_CSS: &str = r#"
/* Always hide block drag handles */
.block-editor-block-mover__drag-handle {
    display: none !important;
}"#;

const HIDE_LIST_VIEW_CSS: &str = r#"
/* Hide list view toggle */
.components-toolbar-button.editor-document-tools__document-overview-toggle {
    display: none !important;
}"#;

/// One generated style rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleRule {
    HideReusableBlocks,
    HideBlockSettings,
    HideGreenshiftControls,
    HideDragHandles,
    HideListView,
    /// Administrator-supplied CSS, emitted verbatim
    Custom(String),
}

impl StyleRule {
    /// Rule text
    pub fn css(&self) -> &str {
        match self {
            StyleRule::HideReusableBlocks => HIDE_REUSABLE_BLOCKS_CSS,
            StyleRule::HideBlockSettings => HIDE_BLOCK_SETTINGS_CSS,
            StyleRule::HideGreenshiftControls => HIDE_GREENSHIFT_CSS,
            StyleRule::HideDragHandles => HIDE_DRAG_HANDLES_CSS,
            StyleRule::HideListView => HIDE_LIST_VIEW_CSS,
            StyleRule::Custom(css) => css.as_str(),
        }
    }
}

/// Ordered style rules for the current editor restrictions
///
/// Order is fixed: reusable blocks, block settings, GreenShift controls, drag
/// handles (always), list view, custom CSS (always, last).
pub fn generate_style_rules(settings: &Settings) -> Vec<StyleRule> {
    let flags: &EditorRestrictions = &settings.editor_restrictions;
    let mut rules = Vec::with_capacity(6);

    if flags.hide_reusable_blocks {
        rules.push(StyleRule::HideReusableBlocks);
    }
    if flags.hide_block_settings {
        rules.push(StyleRule::HideBlockSettings);
    }
    if flags.hide_greenshift_buttons {
        rules.push(StyleRule::HideGreenshiftControls);
    }
    rules.push(StyleRule::HideDragHandles);
    if flags.disable_list_view {
        rules.push(StyleRule::HideListView);
    }
    rules.push(StyleRule::Custom(settings.custom_css.clone()));

    rules
}

/// Inline style attachment for the host's stylesheet queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineStyle {
    pub handle: &'static str,
    pub css: String,
}

/// Rendered editor stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new(rules: Vec<StyleRule>) -> Self {
        Self { rules }
    }

    pub fn for_settings(settings: &Settings) -> Self {
        Self::new(generate_style_rules(settings))
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Concatenated rule text
    pub fn to_css(&self) -> String {
        self.rules.iter().map(StyleRule::css).collect()
    }

    /// Attachment to [`EDITOR_STYLE_HANDLE`]
    pub fn inline_style(&self) -> InlineStyle {
        InlineStyle { handle: EDITOR_STYLE_HANDLE, css: self.to_css() }
    }

    /// Direct `<style>` element for the admin head
    pub fn head_element(&self) -> String {
        format!("<style id=\"{}\">{}</style>", HEAD_STYLE_ID, self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RestrictionKey;

    #[test]
    fn test_default_rules() {
        let rules = generate_style_rules(&Settings::defaults());
        assert_eq!(
            rules,
            vec![
                StyleRule::HideReusableBlocks,
                StyleRule::HideBlockSettings,
                StyleRule::HideGreenshiftControls,
                StyleRule::HideDragHandles,
                StyleRule::Custom(String::new()),
            ]
        );
    }

    #[test]
    fn test_selected_rules_and_custom_css() {
        let settings = Settings {
            editor_restrictions: EditorRestrictions::none()
                .with(RestrictionKey::HideReusableBlocks, true),
            custom_css: ".x{color:red}".to_string(),
            ..Settings::defaults()
        };

        let rules = generate_style_rules(&settings);
        assert_eq!(
            rules,
            vec![
                StyleRule::HideReusableBlocks,
                StyleRule::HideDragHandles,
                StyleRule::Custom(".x{color:red}".to_string()),
            ]
        );
        assert!(StyleSheet::new(rules).to_css().ends_with(".x{color:red}"));
    }

    #[test]
    fn test_drag_handles_hidden_even_with_flag_off() {
        let mut flags = EditorRestrictions::none();
        flags.show_drag_handles = false;
        let settings = Settings { editor_restrictions: flags, ..Settings::defaults() };

        assert!(generate_style_rules(&settings).contains(&StyleRule::HideDragHandles));
    }

    #[test]
    fn test_list_view_rule() {
        let settings = Settings {
            editor_restrictions: EditorRestrictions::none()
                .with(RestrictionKey::DisableListView, true),
            ..Settings::defaults()
        };
        let css = StyleSheet::for_settings(&settings).to_css();

        assert!(css.contains("editor-document-tools__document-overview-toggle"));
        assert!(!css.contains("GreenShift"));
    }

    #[test]
    fn test_injection_paths_render_identical_css() {
        let settings =
            Settings { custom_css: ".y { margin: 0 }".to_string(), ..Settings::defaults() };
        let sheet = StyleSheet::for_settings(&settings);
        let inline = sheet.inline_style();
        let head = sheet.head_element();

        assert_eq!(inline.handle, EDITOR_STYLE_HANDLE);
        assert_eq!(head, format!("<style id=\"{}\">{}</style>", HEAD_STYLE_ID, inline.css));
    }
}
