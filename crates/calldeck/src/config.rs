#![forbid(unsafe_code)]

//! Dialog configuration.
//!
//! Every tunable constant lives in [`DialogConfig`], grouped by the component
//! that consumes it. `DialogConfig::default()` is the stock 800×600 dialog
//! with four panel slots.
//!
//! # Loading
//!
//! With the `config-file` feature:
//!
//! ```toml
//! [window]
//! min_size = { width = 640.0, height = 480.0 }
//!
//! [panels]
//! max_panels = 3
//! initial = ["sentiment", "keywords"]
//!
//! [call]
//! feed_period_ms = 8000
//! ```
//!
//! ```rust,ignore
//! let config = DialogConfig::from_toml_file("calldeck.toml")?.validated()?;
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use calldeck_core::geometry::{Point, Size};
use calldeck_layout::{RegionConfig, SplitterBounds};
use web_time::Duration;

use crate::error::ConfigError;
use crate::insight::PanelKind;

/// Top-level dialog configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct DialogConfig {
    pub window: WindowConfig,
    pub panels: PanelConfig,
    pub splitter: SplitterConfig,
    pub call: CallConfig,
}

/// Window geometry parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct WindowConfig {
    /// Top-left used when the host gives none. Default: (100, 100).
    pub initial_position: Point,
    /// Size at open. Default: 800×600.
    pub initial_size: Size,
    /// Resize floor. Default: 800×600.
    pub min_size: Size,
    /// Size of the minimized card. Default: 300×60.
    pub minimized_size: Size,
    /// Gap between the minimized card and the viewport's bottom-right. Default: 20.
    pub minimized_margin: f32,
    /// Viewport assumed until the host reports one. Default: 1280×800.
    pub viewport: Size,
    /// Title bar height (drag area). Default: 48.
    pub title_bar_height: f32,
    /// Width reserved at the right of the title bar for its buttons. Default: 96.
    pub title_buttons_width: f32,
    /// Call controls strip height below the title bar. Default: 72.
    pub controls_height: f32,
    /// Side of the square bottom-right resize handle. Default: 16.
    pub resize_handle_size: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            initial_position: Point::new(100.0, 100.0),
            initial_size: Size::new(800.0, 600.0),
            min_size: Size::new(800.0, 600.0),
            minimized_size: Size::new(300.0, 60.0),
            minimized_margin: 20.0,
            viewport: Size::new(1280.0, 800.0),
            title_bar_height: 48.0,
            title_buttons_width: 96.0,
            controls_height: 72.0,
            resize_handle_size: 16.0,
        }
    }
}

/// Insight panel parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct PanelConfig {
    /// Maximum number of panels. Default: 4.
    pub max_panels: usize,
    /// Height of a newly added panel. Default: 200.
    pub default_height: f32,
    /// Height floor for resizing. Default: 80.
    pub min_height: f32,
    /// Height of a collapsed panel's header. Default: 40.
    pub collapsed_height: f32,
    /// Hit thickness of a panel's bottom-edge handle. Default: 6.
    pub handle_hit_height: f32,
    /// Panels present at open, in order. Default: `[sentiment]`.
    pub initial: Vec<PanelKind>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            max_panels: 4,
            default_height: 200.0,
            min_height: 80.0,
            collapsed_height: 40.0,
            handle_hit_height: 6.0,
            initial: vec![PanelKind::Sentiment],
        }
    }
}

/// Transcript/insight splitter parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct SplitterConfig {
    /// Default: 240.
    pub min_transcript_width: f32,
    /// Default: 240.
    pub min_insight_width: f32,
    /// Hit width of the splitter handle. Default: 6.
    pub hit_width: f32,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            min_transcript_width: 240.0,
            min_insight_width: 240.0,
            hit_width: 6.0,
        }
    }
}

/// Call lifecycle timing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct CallConfig {
    /// Connecting → Active delay. Default: 2000 ms.
    pub connecting_delay_ms: u64,
    /// Ended → Idle delay. Default: 1000 ms.
    pub ending_delay_ms: u64,
    /// Simulated transcript period while Active. Default: 5000 ms.
    pub feed_period_ms: u64,
    /// Seed for the simulated feed's speaker/confidence choices.
    pub feed_seed: u64,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            connecting_delay_ms: 2000,
            ending_delay_ms: 1000,
            feed_period_ms: 5000,
            feed_seed: 0x00C0_FFEE,
        }
    }
}

impl CallConfig {
    #[must_use]
    pub fn connecting_delay(&self) -> Duration {
        Duration::from_millis(self.connecting_delay_ms)
    }

    #[must_use]
    pub fn ending_delay(&self) -> Duration {
        Duration::from_millis(self.ending_delay_ms)
    }

    #[must_use]
    pub fn feed_period(&self) -> Duration {
        Duration::from_millis(self.feed_period_ms)
    }
}

impl DialogConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let w = &self.window;
        let p = &self.panels;
        let s = &self.splitter;

        let floats = [
            ("window.initial_position.x", w.initial_position.x),
            ("window.initial_position.y", w.initial_position.y),
            ("window.initial_size.width", w.initial_size.width),
            ("window.initial_size.height", w.initial_size.height),
            ("window.min_size.width", w.min_size.width),
            ("window.min_size.height", w.min_size.height),
            ("window.minimized_size.width", w.minimized_size.width),
            ("window.minimized_size.height", w.minimized_size.height),
            ("window.minimized_margin", w.minimized_margin),
            ("window.viewport.width", w.viewport.width),
            ("window.viewport.height", w.viewport.height),
            ("window.title_bar_height", w.title_bar_height),
            ("window.title_buttons_width", w.title_buttons_width),
            ("window.controls_height", w.controls_height),
            ("window.resize_handle_size", w.resize_handle_size),
            ("panels.default_height", p.default_height),
            ("panels.min_height", p.min_height),
            ("panels.collapsed_height", p.collapsed_height),
            ("panels.handle_hit_height", p.handle_hit_height),
            ("splitter.min_transcript_width", s.min_transcript_width),
            ("splitter.min_insight_width", s.min_insight_width),
            ("splitter.hit_width", s.hit_width),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite, got {value}"));
            }
        }

        if w.min_size.width <= 0.0 || w.min_size.height <= 0.0 {
            errors.push(format!(
                "window.min_size must be positive, got {}x{}",
                w.min_size.width, w.min_size.height
            ));
        }
        if w.initial_size.width < w.min_size.width || w.initial_size.height < w.min_size.height {
            errors.push(format!(
                "window.initial_size {}x{} is below window.min_size {}x{}",
                w.initial_size.width, w.initial_size.height, w.min_size.width, w.min_size.height
            ));
        }
        if w.minimized_size.width <= 0.0 || w.minimized_size.height <= 0.0 {
            errors.push("window.minimized_size must be positive".into());
        }
        if w.viewport.width <= 0.0 || w.viewport.height <= 0.0 {
            errors.push("window.viewport must be positive".into());
        }
        if w.title_bar_height < 0.0 || w.controls_height < 0.0 || w.resize_handle_size < 0.0 {
            errors.push("window chrome sizes must be >= 0".into());
        }

        if p.max_panels == 0 || p.max_panels > PanelKind::ALL.len() {
            errors.push(format!(
                "panels.max_panels must be in 1..={}, got {}",
                PanelKind::ALL.len(),
                p.max_panels
            ));
        }
        if p.min_height <= 0.0 {
            errors.push(format!("panels.min_height must be > 0, got {}", p.min_height));
        }
        if p.default_height < p.min_height {
            errors.push(format!(
                "panels.default_height {} is below panels.min_height {}",
                p.default_height, p.min_height
            ));
        }
        if p.initial.len() > p.max_panels {
            errors.push(format!(
                "panels.initial has {} entries, more than panels.max_panels {}",
                p.initial.len(),
                p.max_panels
            ));
        }
        for (i, kind) in p.initial.iter().enumerate() {
            if p.initial[..i].contains(kind) {
                errors.push(format!("panels.initial lists {kind} more than once"));
            }
        }

        if s.min_transcript_width < 0.0 || s.min_insight_width < 0.0 {
            errors.push("splitter minimum widths must be >= 0".into());
        }

        let c = &self.call;
        if c.feed_period_ms == 0 {
            errors.push("call.feed_period_ms must be > 0".into());
        }

        errors
    }

    /// Return `self` if valid, otherwise [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Splitter bounds for the layout solver.
    #[must_use]
    pub fn splitter_bounds(&self) -> SplitterBounds {
        SplitterBounds {
            min_transcript_width: self.splitter.min_transcript_width,
            min_insight_width: self.splitter.min_insight_width,
        }
    }

    /// Region constants for the layout solver.
    #[must_use]
    pub fn region_config(&self) -> RegionConfig {
        RegionConfig {
            splitter_hit_width: self.splitter.hit_width,
            handle_hit_height: self.panels.handle_hit_height,
            collapsed_height: self.panels.collapsed_height,
        }
    }
}
