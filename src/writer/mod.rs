//! Output writers
//!
//! A [`Writer`] turns a finished [`Spec`] into the text consumed by a
//! rendering engine.

pub mod vegalite;

pub use vegalite::VegaLiteWriter;

use std::path::Path;

use crate::spec::Spec;
use crate::{PlotspecError, Result};

pub trait Writer {
    /// Serialize `spec`
    fn write(&self, spec: &Spec) -> Result<String>;

    /// Serialize `spec` into the file at `path`
    fn write_to_file(&self, spec: &Spec, path: &Path) -> Result<()> {
        let output = self.write(spec)?;
        std::fs::write(path, output).map_err(|e| {
            PlotspecError::Writer(format!("failed to write {}: {}", path.display(), e))
        })
    }
}
