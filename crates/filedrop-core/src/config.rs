//! Host-supplied parameters and their resolved form.
//!
//! The host hands over [`HostParameters`] on every update cycle. Values may
//! be missing, blank, or of the wrong shape; [`WidgetConfig::resolve`]
//! turns them into a fully populated configuration with defaults applied.

use serde::{Deserialize, Serialize};

/// Label shown in the drop target when the host supplies none.
pub const DEFAULT_DROP_TEXT: &str = "Drag and drop files, or click to upload";

/// Ceiling applied when the host supplies no usable maximum.
pub const DEFAULT_MAX_FILES: i64 = 10;

/// Rename dialog confirm colour when the host supplies none.
pub const DEFAULT_SAVE_BUTTON_COLOR: &str = "#0078d4";

/// Raw parameters exactly as the host provides them.
///
/// Deserializes from the host's camelCase JSON. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostParameters {
    /// Drop target label.
    pub drop_text: Option<String>,
    /// Maximum file count. A number or numeric string; anything else is
    /// ignored.
    pub max_files: Option<serde_json::Value>,
    /// Comma-separated allow-list.
    pub allowed_formats: Option<String>,
    /// Reset counter. A change clears the list. Read the same way as
    /// `max_files`.
    pub reset: Option<serde_json::Value>,
    /// CSS colour for the rename dialog's confirm button.
    pub save_button_color: Option<String>,
    /// Width in pixels the host allocated to the widget.
    pub allocated_width: Option<f64>,
    /// Height in pixels the host allocated to the widget.
    pub allocated_height: Option<f64>,
}

impl HostParameters {
    /// The reset counter as a whole number, or `None` when absent, null,
    /// or not numeric.
    #[must_use]
    pub fn reset_counter(&self) -> Option<i64> {
        self.reset.as_ref().and_then(parse_whole_number)
    }
}

/// Configuration with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Drop target label.
    pub drop_text: String,
    /// Maximum number of files the list may hold.
    pub max_files: i64,
    /// Allow-list, or `None` to accept everything.
    pub allowed_formats: Option<String>,
    /// CSS colour for the rename dialog's confirm button.
    pub save_button_color: String,
    /// Container width in pixels, when the host allocated one.
    pub width: Option<f64>,
    /// Container height in pixels, when the host allocated one.
    pub height: Option<f64>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::resolve(&HostParameters::default())
    }
}

impl WidgetConfig {
    /// Apply defaults to raw host parameters.
    #[must_use]
    pub fn resolve(params: &HostParameters) -> Self {
        Self {
            drop_text: params
                .drop_text
                .as_deref()
                .filter(|text| !text.is_empty())
                .unwrap_or(DEFAULT_DROP_TEXT)
                .to_owned(),
            max_files: params
                .max_files
                .as_ref()
                .and_then(parse_whole_number)
                .unwrap_or(DEFAULT_MAX_FILES),
            allowed_formats: params
                .allowed_formats
                .as_deref()
                .filter(|spec| !spec.trim().is_empty())
                .map(str::to_owned),
            save_button_color: params
                .save_button_color
                .as_deref()
                .map(str::trim)
                .filter(|color| !color.is_empty())
                .unwrap_or(DEFAULT_SAVE_BUTTON_COLOR)
                .to_owned(),
            width: params.allocated_width.filter(|w| *w > 0.0),
            height: params.allocated_height.filter(|h| *h > 0.0),
        }
    }

    /// Value for the file picker's `accept` attribute.
    #[must_use]
    pub fn accept(&self) -> &str {
        self.allowed_formats.as_deref().unwrap_or("")
    }

    /// Allow-list text used in rejection messages.
    #[must_use]
    pub fn allowed_formats_label(&self) -> &str {
        self.allowed_formats.as_deref().unwrap_or("any")
    }
}

/// Interpret a numeric host value such as `maxFiles` or `reset`.
///
/// Fractional values are floored. Non-finite or non-numeric values yield
/// `None`.
#[allow(clippy::cast_possible_truncation)]
fn parse_whole_number(value: &serde_json::Value) -> Option<i64> {
    let number = match value {
        serde_json::Value::Number(n) => {
            if let Some(int) = n.as_i64() {
                return Some(int);
            }
            n.as_f64()?
        }
        serde_json::Value::String(s) => {
            let s = s.trim();
            if let Ok(int) = s.parse::<i64>() {
                return Some(int);
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    number.is_finite().then(|| number.floor() as i64)
}

/// Last-seen host reset counter.
///
/// Owned by the host binding. A new non-null value that differs from the
/// last one observed signals "clear all files".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetToken {
    last: Option<i64>,
}

impl ResetToken {
    /// The most recently observed non-null value.
    #[must_use]
    pub const fn last(self) -> Option<i64> {
        self.last
    }

    /// Record a refreshed value. Returns `true` when it signals a reset.
    ///
    /// A null value is ignored and never triggers a reset.
    pub fn observe(&mut self, value: Option<i64>) -> bool {
        match value {
            Some(v) if self.last != Some(v) => {
                self.last = Some(v);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_apply_to_empty_parameters() {
        let config = WidgetConfig::default();
        assert_eq!(config.drop_text, DEFAULT_DROP_TEXT);
        assert_eq!(config.max_files, DEFAULT_MAX_FILES);
        assert_eq!(config.allowed_formats, None);
        assert_eq!(config.save_button_color, DEFAULT_SAVE_BUTTON_COLOR);
        assert_eq!(config.width, None);
        assert_eq!(config.accept(), "");
        assert_eq!(config.allowed_formats_label(), "any");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let params = HostParameters {
            drop_text: Some(String::new()),
            allowed_formats: Some("  ".to_owned()),
            save_button_color: Some("   ".to_owned()),
            allocated_width: Some(0.0),
            allocated_height: Some(-5.0),
            ..HostParameters::default()
        };
        let config = WidgetConfig::resolve(&params);
        assert_eq!(config.drop_text, DEFAULT_DROP_TEXT);
        assert_eq!(config.allowed_formats, None);
        assert_eq!(config.save_button_color, DEFAULT_SAVE_BUTTON_COLOR);
        assert_eq!(config.width, None);
        assert_eq!(config.height, None);
    }

    #[test]
    fn max_files_accepts_numbers_and_numeric_strings() {
        let resolve = |value| {
            WidgetConfig::resolve(&HostParameters {
                max_files: Some(value),
                ..HostParameters::default()
            })
            .max_files
        };
        assert_eq!(resolve(json!(3)), 3);
        assert_eq!(resolve(json!(4.9)), 4);
        assert_eq!(resolve(json!(" 7 ")), 7);
        assert_eq!(resolve(json!("2.5")), 2);
        assert_eq!(resolve(json!(0)), 0);
        assert_eq!(resolve(json!("many")), DEFAULT_MAX_FILES);
        assert_eq!(resolve(json!(null)), DEFAULT_MAX_FILES);
        assert_eq!(resolve(json!([1])), DEFAULT_MAX_FILES);
    }

    #[test]
    fn parameters_deserialize_from_host_json() {
        let params: HostParameters = serde_json::from_value(json!({
            "dropText": "Drop invoices here",
            "maxFiles": 2,
            "allowedFormats": ".pdf,image/*",
            "reset": 4,
            "saveButtonColor": "rebeccapurple",
            "allocatedWidth": 320.0
        }))
        .unwrap();

        let config = WidgetConfig::resolve(&params);
        assert_eq!(config.drop_text, "Drop invoices here");
        assert_eq!(config.max_files, 2);
        assert_eq!(config.accept(), ".pdf,image/*");
        assert_eq!(config.save_button_color, "rebeccapurple");
        assert_eq!(config.width, Some(320.0));
        assert_eq!(params.reset_counter(), Some(4));
    }

    #[test]
    fn loosely_typed_reset_keeps_the_rest_of_the_parameters() {
        let params: HostParameters = serde_json::from_value(json!({
            "maxFiles": 5,
            "reset": 4.0
        }))
        .unwrap();
        assert_eq!(params.reset_counter(), Some(4));
        assert_eq!(WidgetConfig::resolve(&params).max_files, 5);

        let params: HostParameters =
            serde_json::from_value(json!({ "maxFiles": 5, "reset": "7" })).unwrap();
        assert_eq!(params.reset_counter(), Some(7));

        let params: HostParameters =
            serde_json::from_value(json!({ "maxFiles": 5, "reset": { "n": 1 } })).unwrap();
        assert_eq!(params.reset_counter(), None);
        assert_eq!(WidgetConfig::resolve(&params).max_files, 5);
    }

    #[test]
    fn reset_token_fires_on_change_only() {
        let mut token = ResetToken::default();
        assert!(token.observe(Some(3)));
        assert!(!token.observe(Some(3)));
        assert!(token.observe(Some(4)));
        assert_eq!(token.last(), Some(4));
    }

    #[test]
    fn reset_token_ignores_null() {
        let mut token = ResetToken::default();
        assert!(!token.observe(None));
        assert!(token.observe(Some(0)));
        assert!(!token.observe(None));
        assert_eq!(token.last(), Some(0));
    }
}
