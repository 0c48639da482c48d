//! Configuration types for protomap rendering.
//!
//! This module provides configuration structures that control which parts of
//! a schema are mapped and how the resulting graph is styled. All types
//! implement [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`FilterConfig`] - Exclusion patterns for record types and fields.
//! - [`StyleConfig`] - Fonts, arrow style and graph name of the DOT output.
//! - [`DoxygenConfig`] - Settings of the documentation page wrapper.
//!
//! # Example
//!
//! ```
//! # use protomap::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.style().font_size(), 9);
//! assert!(config.filter().exclude().is_empty());
//! ```

use serde::Deserialize;

/// Top-level configuration combining filter, style and documentation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Exclusion filter section.
    #[serde(default)]
    filter: FilterConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Documentation page section.
    #[serde(default)]
    doxygen: DoxygenConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(filter: FilterConfig, style: StyleConfig, doxygen: DoxygenConfig) -> Self {
        Self {
            filter,
            style,
            doxygen,
        }
    }

    /// Returns the filter configuration.
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the documentation page configuration.
    pub fn doxygen(&self) -> &DoxygenConfig {
        &self.doxygen
    }

    /// Mutable access to the filter configuration, for command-line overrides.
    pub fn filter_mut(&mut self) -> &mut FilterConfig {
        &mut self.filter
    }

    /// Mutable access to the style configuration, for command-line overrides.
    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }

    /// Mutable access to the documentation page configuration.
    pub fn doxygen_mut(&mut self) -> &mut DoxygenConfig {
        &mut self.doxygen
    }
}

/// Name-based exclusion of record types and fields.
///
/// Each pattern is a regular expression matched case-insensitively anywhere
/// inside a name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    exclude: Vec<String>,
}

impl FilterConfig {
    /// Creates a filter configuration from exclusion patterns.
    pub fn new(exclude: Vec<String>) -> Self {
        Self { exclude }
    }

    /// The exclusion patterns, in the order they were given.
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Appends more exclusion patterns.
    pub fn extend_exclude(&mut self, patterns: impl IntoIterator<Item = String>) {
        self.exclude.extend(patterns);
    }
}

/// Visual styling of the generated graph.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_family: String,
    font_size: u32,
    arrow_style: String,
    graph_name: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "Bitstream Vera Sans".to_string(),
            font_size: 9,
            arrow_style: "empty".to_string(),
            graph_name: "protobuf".to_string(),
        }
    }
}

impl StyleConfig {
    /// Font family used for the graph, its nodes and its edges.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Font size in points.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Font size of enumeration values, two points below the base size.
    pub fn enum_font_size(&self) -> u32 {
        self.font_size.saturating_sub(2).max(1)
    }

    /// Graphviz `arrowhead` value of every edge.
    pub fn arrow_style(&self) -> &str {
        &self.arrow_style
    }

    /// Name of the emitted `digraph`.
    pub fn graph_name(&self) -> &str {
        &self.graph_name
    }

    pub fn set_font_family(&mut self, font_family: impl Into<String>) {
        self.font_family = font_family.into();
    }

    pub fn set_font_size(&mut self, font_size: u32) {
        self.font_size = font_size;
    }

    pub fn set_arrow_style(&mut self, arrow_style: impl Into<String>) {
        self.arrow_style = arrow_style.into();
    }
}

/// Settings of the documentation page wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DoxygenConfig {
    enabled: bool,
    title: String,
}

impl Default for DoxygenConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            title: "Protocol Buffer Definition Map".to_string(),
        }
    }
}

impl DoxygenConfig {
    /// Whether a documentation page is produced next to the DOT output.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Title of the documentation page.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}
