//! Admin screen identification

use std::fmt;

/// Query value of `page` identifying the settings screen
pub const SETTINGS_PAGE_SLUG: &str = "manager-access-control";

/// Reusable-content entity type
const REUSABLE_BLOCK_TYPE: &str = "wp_block";

/// An admin screen, as far as restrictions are concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Plugin listing
    Plugins,
    /// Reusable-content listing
    ReusableBlocks,
    /// Block editing screen
    BlockEditor,
    /// This system's settings screen
    Settings,
    /// Anything else, by script name
    Other(String),
}

impl Screen {
    /// Identify a screen from an admin-relative path such as
    /// `"plugins.php"` or `"/wp-admin/edit.php?post_type=wp_block"`
    ///
    /// The script is the last `*.php` path segment, compared without regard
    /// to case. Query keys and values are percent-decoded and a repeated key
    /// takes its last value.
    pub fn from_admin_path(path: &str) -> Self {
        let path = path.split_once('#').map_or(path, |(before, _)| before);
        let (script_path, query) = path.split_once('?').unwrap_or((path, ""));
        let script = script_name(script_path);

        match script.as_str() {
            "plugins.php" => Screen::Plugins,
            "edit.php" if query_param(query, "post_type").as_deref() == Some(REUSABLE_BLOCK_TYPE) => {
                Screen::ReusableBlocks
            }
            "post.php" | "post-new.php" | "site-editor.php" => Screen::BlockEditor,
            "admin.php" | "options-general.php"
                if query_param(query, "page").as_deref() == Some(SETTINGS_PAGE_SLUG) =>
            {
                Screen::Settings
            }
            _ => Screen::Other(script),
        }
    }

    pub fn is_block_editor(&self) -> bool {
        *self == Screen::BlockEditor
    }

    pub fn is_settings(&self) -> bool {
        *self == Screen::Settings
    }
}

/// Lowercased last `*.php` segment of a path, or its last segment when
/// no segment names a script
fn script_name(script_path: &str) -> String {
    let segments: Vec<String> = script_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| decode_component(segment).to_lowercase())
        .collect();
    segments
        .iter()
        .rev()
        .find(|segment| segment.ends_with(".php"))
        .or_else(|| segments.last())
        .cloned()
        .unwrap_or_default()
}

/// Decoded value of a query parameter; the last occurrence wins
fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .filter(|(key, _)| decode_component(key) == name)
        .map(|(_, value)| decode_component(value))
        .last()
}

/// Form-style percent decoding: `+` is a space, invalid UTF-8 is replaced
fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Plugins => f.write_str("plugins"),
            Screen::ReusableBlocks => f.write_str("reusable-blocks"),
            Screen::BlockEditor => f.write_str("block-editor"),
            Screen::Settings => f.write_str("settings"),
            Screen::Other(script) => write!(f, "other({})", script),
        }
    }
}
