//! Layout options and configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Options controlling grouping and rendition.
///
/// Values are used as given; callers are expected to pass non-negative
/// tolerances and a positive title ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Rendition method
    pub rendition_mode: RenditionMode,

    /// Maximum left-edge offset between stacked block members
    pub horizontal_tolerance: f64,

    /// Maximum vertical gap between stacked block members
    pub vertical_proximity: f64,

    /// Maximum top-edge offset between a label and its value
    pub y_axis_tolerance: f64,

    /// Height multiple of the median above which an item is a title
    pub title_ratio: f64,

    /// Whether to use parallel processing for neighbor precomputation
    #[serde(skip)]
    pub parallel: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendition mode.
    pub fn with_rendition_mode(mut self, mode: RenditionMode) -> Self {
        self.rendition_mode = mode;
        self
    }

    /// Use the simple (uncorrected) rendition.
    pub fn simple(mut self) -> Self {
        self.rendition_mode = RenditionMode::Simple;
        self
    }

    /// Set horizontal tolerance for block grouping.
    pub fn with_horizontal_tolerance(mut self, tolerance: f64) -> Self {
        self.horizontal_tolerance = tolerance;
        self
    }

    /// Set vertical proximity for block grouping.
    pub fn with_vertical_proximity(mut self, proximity: f64) -> Self {
        self.vertical_proximity = proximity;
        self
    }

    /// Set y-axis tolerance for label-value pairing.
    pub fn with_y_axis_tolerance(mut self, tolerance: f64) -> Self {
        self.y_axis_tolerance = tolerance;
        self
    }

    /// Set title ratio.
    pub fn with_title_ratio(mut self, ratio: f64) -> Self {
        self.title_ratio = ratio;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Load options from a settings file's JSON text.
    ///
    /// Settings are merged over the defaults: keys that are missing or have
    /// the wrong type keep their default value, unknown keys are ignored.
    pub fn from_settings_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::default().merge_settings(&value))
    }

    /// Merge a parsed settings object over these options.
    pub fn merge_settings(mut self, settings: &Value) -> Self {
        let Some(map) = settings.as_object() else {
            log::debug!("Settings value is not an object, keeping current options");
            return self;
        };

        if let Some(mode) = map.get("renditionMode").and_then(Value::as_str) {
            self.rendition_mode = RenditionMode::from_setting(mode);
        }
        if let Some(v) = map.get("horizontalTolerance").and_then(Value::as_f64) {
            self.horizontal_tolerance = v;
        }
        if let Some(v) = map.get("verticalProximity").and_then(Value::as_f64) {
            self.vertical_proximity = v;
        }
        if let Some(v) = map.get("yAxisTolerance").and_then(Value::as_f64) {
            self.y_axis_tolerance = v;
        }
        if let Some(v) = map.get("titleRatio").and_then(Value::as_f64) {
            self.title_ratio = v;
        }
        self
    }

    /// Serialize the options in settings-file form.
    pub fn to_settings_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Render(format!("settings serialization error: {}", e)))
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            rendition_mode: RenditionMode::Automatic,
            horizontal_tolerance: 10.0,
            vertical_proximity: 10.0,
            y_axis_tolerance: 5.0,
            title_ratio: 2.0,
            parallel: true,
        }
    }
}

/// How fragments are placed on the character grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenditionMode {
    /// Row building plus iterative column-collision repair
    #[default]
    #[serde(rename = "automatic")]
    Automatic,
    /// Center-line rows over consolidated items, no repair
    #[serde(rename = "manual")]
    Simple,
}

impl RenditionMode {
    /// Interpret a settings-file mode string. Anything other than
    /// `"automatic"` selects the simple rendition.
    pub fn from_setting(value: &str) -> Self {
        if value == "automatic" {
            RenditionMode::Automatic
        } else {
            RenditionMode::Simple
        }
    }
}
