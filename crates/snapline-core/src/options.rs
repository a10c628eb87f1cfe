//! Plugin configuration.

use crate::candidate::{AlignModes, CandidateGenerator, Tolerance};
use crate::graph::ElementType;
use crate::style::GuideLineStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Option errors.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Invalid tolerance {0:?}: every axis must be finite and non-negative")]
    InvalidTolerance([f64; 3]),
    #[error("Invalid line width: {0}")]
    InvalidLineWidth(f64),
    #[error("No element types enabled")]
    NoElementTypes,
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for option operations.
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Options of the snap line plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapLineOptions {
    /// Plugin key, used by hosts that manage several plugin instances.
    pub key: Option<String>,
    /// Per-axis alignment tolerance in canvas units.
    pub tolerance: Tolerance,
    /// Element types whose drags produce guide lines.
    pub enable_elements: Vec<ElementType>,
    /// Role pairs tested on each axis.
    pub align_modes: AlignModes,
    /// Style of newly created guide lines.
    pub line_style: GuideLineStyle,
    /// Remove all guide lines when a drag ends.
    pub clear_on_drag_end: bool,
}

impl Default for SnapLineOptions {
    fn default() -> Self {
        Self {
            key: None,
            tolerance: Tolerance::default(),
            enable_elements: vec![ElementType::Node, ElementType::Combo],
            align_modes: AlignModes::default(),
            line_style: GuideLineStyle::default(),
            clear_on_drag_end: true,
        }
    }
}

/// Partial options for [`crate::SnapLine::update`]. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialSnapLineOptions {
    pub key: Option<String>,
    pub tolerance: Option<Tolerance>,
    pub enable_elements: Option<Vec<ElementType>>,
    pub align_modes: Option<AlignModes>,
    pub line_style: Option<GuideLineStyle>,
    pub clear_on_drag_end: Option<bool>,
}

impl SnapLineOptions {
    /// Check option values.
    pub fn validate(&self) -> OptionsResult<()> {
        if !self.tolerance.is_valid() {
            return Err(OptionsError::InvalidTolerance(self.tolerance.0));
        }
        let width = self.line_style.line_width;
        if !width.is_finite() || width <= 0.0 {
            return Err(OptionsError::InvalidLineWidth(width));
        }
        if self.enable_elements.is_empty() {
            return Err(OptionsError::NoElementTypes);
        }
        Ok(())
    }

    /// Parse and validate options from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> OptionsResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json(&self) -> OptionsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> OptionsResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Copy with the set fields of `partial` applied. Not validated.
    pub fn merged(&self, partial: PartialSnapLineOptions) -> Self {
        let mut options = self.clone();
        if let Some(key) = partial.key {
            options.key = Some(key);
        }
        if let Some(tolerance) = partial.tolerance {
            options.tolerance = tolerance;
        }
        if let Some(enable_elements) = partial.enable_elements {
            options.enable_elements = enable_elements;
        }
        if let Some(align_modes) = partial.align_modes {
            options.align_modes = align_modes;
        }
        if let Some(line_style) = partial.line_style {
            options.line_style = line_style;
        }
        if let Some(clear_on_drag_end) = partial.clear_on_drag_end {
            options.clear_on_drag_end = clear_on_drag_end;
        }
        options
    }

    /// Check if drags of `element_type` are handled.
    pub fn is_enabled(&self, element_type: ElementType) -> bool {
        self.enable_elements.contains(&element_type)
    }

    /// Candidate generator configured from these options.
    pub fn generator(&self) -> CandidateGenerator {
        CandidateGenerator::new(self.tolerance, self.align_modes.clone())
    }
}
