//! Writes computed introduction units next to their governor

use crate::error::Result;
use crate::service::ComputeListener;
use itd_builder::emit::{emit_introduction_unit_with, EmitOptions};
use itd_model::{JavaType, LogicalTypeId, MetadataId};
use itd_providers::{ItdMetadata, ProvidedMetadata};
use itd_roundtrip::FileManager;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Location of the unit for `aspect`, in the directory of the governor
/// named by `id`
#[must_use]
pub fn unit_path(id: &MetadataId, aspect: &JavaType, extension: &str) -> Option<PathBuf> {
    let governor = id.logical_type()?;
    let source = LogicalTypeId::new(governor.path().clone(), aspect.clone()).source_file();
    let stem = source.strip_suffix(".java").unwrap_or(&source);
    Some(PathBuf::from(format!("{stem}.{extension}")))
}

/// [`ComputeListener`] that keeps `.aj` files in step with computed units
///
/// A valid unit is emitted and written when its text changed; an invalid
/// one removes the stale file left by an earlier computation.
#[derive(Debug)]
pub struct ItdWriter {
    files: Arc<FileManager>,
    immediate: bool,
    extension: String,
    options: EmitOptions,
}

impl ItdWriter {
    #[must_use]
    pub fn new(files: Arc<FileManager>) -> Self {
        Self {
            files,
            immediate: false,
            extension: "aj".to_string(),
            options: EmitOptions::default(),
        }
    }

    #[must_use]
    pub fn with_immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.options = self.options.with_indent_width(width);
        self
    }

    /// Write or remove the file for one unit; returns whether the store
    /// was touched now. Deferred changes wait for [`FileManager::commit`].
    ///
    /// # Errors
    /// Propagates file store failures
    pub fn write(&self, unit: &ItdMetadata) -> Result<bool> {
        let Some(path) = unit_path(unit.id(), unit.aspect(), &self.extension) else {
            debug!(id = %unit.id(), "class-level unit has no file");
            return Ok(false);
        };
        let description = format!("{} for {}", unit.aspect().simple_type_name(), unit.governor().simple_type_name());

        match unit.itd() {
            Some(itd) => {
                let text = emit_introduction_unit_with(itd, self.options);
                let changed = self
                    .files
                    .create_or_update_text_file_if_required(&path, &text, &description, self.immediate)?;
                if changed {
                    info!(path = %path.display(), "introduction unit written");
                } else if !self.immediate {
                    debug!(path = %path.display(), "introduction unit queued");
                }
                Ok(changed)
            }
            None if self.files.exists(&path) => {
                info!(path = %path.display(), "removing stale introduction unit");
                Ok(self.files.delete(&path, &description, self.immediate)?)
            }
            None => Ok(false),
        }
    }
}

impl ComputeListener for ItdWriter {
    fn computed(&self, metadata: &ProvidedMetadata) -> Result<()> {
        if let Some(unit) = metadata.as_itd() {
            self.write(unit)?;
        }
        Ok(())
    }
}
