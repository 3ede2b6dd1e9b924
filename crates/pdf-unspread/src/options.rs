use crate::constants::DEFAULT_OUTPUT_SUFFIX;
use crate::types::*;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-run unspread configuration.
///
/// Passed by reference into every planning call; nothing downstream
/// re-derives or mutates it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnspreadOptions {
    /// Split top/bottom instead of left/right (before rotation normalization)
    pub vertical: bool,
    /// Keep only the centered middle half of the first page
    pub centered_top: bool,
    /// Keep only the centered middle half of the last page
    pub centered_last: bool,
    /// Reverse the default emission order of the two halves
    pub opposite: bool,
    /// Treat pages whose trim box covers less than half the sheet as single pages
    pub detect_singletons: bool,
    /// How output views are produced
    pub strategy: ExtractStrategy,
    /// Inserted before the input's extension to name the output file
    pub output_suffix: String,
}

impl Default for UnspreadOptions {
    fn default() -> Self {
        Self {
            vertical: false,
            centered_top: false,
            centered_last: false,
            opposite: false,
            detect_singletons: false,
            strategy: ExtractStrategy::CloneAndReframe,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl UnspreadOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| UnspreadError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| UnspreadError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.output_suffix.is_empty() {
            return Err(UnspreadError::Config(
                "Output suffix must not be empty".to_string(),
            ));
        }

        if self.output_suffix.contains(['/', '\\']) {
            return Err(UnspreadError::Config(format!(
                "Output suffix {:?} must not contain a path separator",
                self.output_suffix
            )));
        }

        Ok(())
    }

    /// The configured axis, before any rotation is taken into account
    pub fn configured_axis(&self) -> SplitAxis {
        SplitAxis::from_vertical(self.vertical)
    }

    /// Derive the output path by inserting the suffix before the extension.
    ///
    /// `scans/book.pdf` becomes `scans/book_unspread.pdf`; a file without an
    /// extension just gets the suffix appended.
    pub fn output_path_for(&self, input: impl AsRef<Path>) -> PathBuf {
        let input = input.as_ref();
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let file_name = match input.extension() {
            Some(ext) => format!("{}{}.{}", stem, self.output_suffix, ext.to_string_lossy()),
            None => format!("{}{}", stem, self.output_suffix),
        };

        input.with_file_name(file_name)
    }
}
