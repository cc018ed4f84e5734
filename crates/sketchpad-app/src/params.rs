//! Tool overrides read from the page URL.

use sketchpad_core::{SerializableColor, ToolConfig, ToolKind};

/// URL parameters overriding the initial tool configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlParams {
    pub tool: Option<ToolKind>,
    pub color: Option<SerializableColor>,
    pub width: Option<f64>,
    pub background: Option<SerializableColor>,
}

impl UrlParams {
    /// Parse parameters from a query string or hash.
    /// Supports formats like `?tool=eraser&color=%23ff0000&width=8`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim_start_matches(['?', '#']);
        let mut params = Self::default();

        for pair in s.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match key {
                "tool" => params.tool = ToolKind::from_name(value),
                "color" => params.color = parse_color(value),
                "background" => params.background = parse_color(value),
                "width" => params.width = value.parse().ok(),
                _ => {}
            }
        }

        params
    }

    /// Fill unset parameters from `other`.
    pub fn or(self, other: Self) -> Self {
        Self {
            tool: self.tool.or(other.tool),
            color: self.color.or(other.color),
            width: self.width.or(other.width),
            background: self.background.or(other.background),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the overrides to a tool configuration.
    pub fn apply(&self, mut config: ToolConfig) -> ToolConfig {
        if let Some(tool) = self.tool {
            config = config.with_tool(tool);
        }
        if let Some(color) = self.color {
            config = config.with_stroke_color(color);
        }
        if let Some(width) = self.width {
            config = config.with_stroke_width(width);
        }
        if let Some(background) = self.background {
            config = config.with_background_color(background);
        }
        config
    }
}

/// Colors arrive either URL-encoded (`%23rrggbb`) or as bare hex digits.
fn parse_color(value: &str) -> Option<SerializableColor> {
    let hex = value
        .strip_prefix("%23")
        .or_else(|| value.strip_prefix('#'))
        .unwrap_or(value);
    match SerializableColor::from_hex(&format!("#{}", hex)) {
        Ok(color) => Some(color),
        Err(e) => {
            log::warn!("Ignoring color parameter {:?}: {}", value, e);
            None
        }
    }
}
