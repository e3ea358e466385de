use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Literal that selects the built-in layout.
pub const DEFAULT_STYLE: &str = "default";

/// `flight_configs.type` of rows that describe a boarding pass style.
pub const BOARDING_STYLE_CATEGORY: &str = "boarding_style";

/// A requested style, decided once at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StyleReference {
    Default,
    ByName(String),
    ById(i64),
}

impl StyleReference {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == DEFAULT_STYLE {
            return StyleReference::Default;
        }
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = raw.parse::<i64>() {
                return StyleReference::ById(id);
            }
        }
        StyleReference::ByName(raw.to_string())
    }
}

impl FromStr for StyleReference {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(StyleReference::parse(s))
    }
}

impl fmt::Display for StyleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleReference::Default => f.write_str(DEFAULT_STYLE),
            StyleReference::ByName(name) => f.write_str(name),
            StyleReference::ById(id) => write!(f, "#{}", id),
        }
    }
}

/// Renderer-specific settings carried by a stored style config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleParams {
    /// Template file name overriding the renderer's own background
    #[serde(default)]
    pub background: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// JSON payload stored in `flight_configs.data` for boarding styles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardingStylePayload {
    #[serde(default)]
    pub draw_function: Option<String>,
    #[serde(flatten)]
    pub params: StyleParams,
}

impl BoardingStylePayload {
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Renderer name, if the payload names a non-blank one.
    pub fn renderer_name(&self) -> Option<&str> {
        self.draw_function
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Active boarding style config as listed in the style catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfigSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub draw_function: Option<String>,
}
