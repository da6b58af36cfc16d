//! Manifest rewriting
//!
//! Every occurrence of `<field>: <anything up to end of line>` is replaced by
//! `<field>: <version>`. The match is not anchored to the start of the line,
//! so `  version: 1` and `# version: 1` are both rewritten, while keys that
//! merely end in a different case (`appVersion:`) are not. Manifests are
//! handled as raw bytes, so content that is not valid UTF-8 is kept as is.

use crate::error::{ChartVersionError, Result};
use crate::executor::CommandExecutor;
use regex::bytes::{NoExpand, Regex};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Rewrites the version declaration of a manifest file
pub trait ManifestPatcher {
    /// Replace every `<field>: ...` occurrence in `manifest` with `<field>: <version>`
    ///
    /// # Returns
    /// * `Ok(())` - The file was rewritten (or had nothing to rewrite)
    /// * `Err` - [ChartVersionError::Patch] naming the file and the cause
    fn patch(&self, manifest: &Path, version: &str) -> Result<()>;
}

/// Only plain `X.Y.Z`-style semantic versions may be substituted.
fn validate_version(manifest: &Path, version: &str) -> Result<()> {
    semver::Version::parse(version).map_err(|e| {
        ChartVersionError::patch(manifest, format!("invalid version '{}': {}", version, e))
    })?;
    Ok(())
}

/// Regex rewrite performed by this process
///
/// The new content is written to a temporary file next to the manifest and
/// then renamed over it.
pub struct InPlacePatcher {
    field: String,
    pattern: Regex,
}

impl InPlacePatcher {
    pub fn new(field: &str) -> Result<Self> {
        // (?-u:.) matches any byte but \n, as sed does in the C locale
        let pattern = Regex::new(&format!("{}: (?-u:.)*", regex::escape(field)))
            .map_err(|e| ChartVersionError::config(format!("invalid field '{}': {}", field, e)))?;

        Ok(InPlacePatcher {
            field: field.to_string(),
            pattern,
        })
    }

    /// Applies the substitution to `content`, returning the new text and the number of hits.
    pub fn rewrite(&self, content: &[u8], version: &str) -> (Vec<u8>, usize) {
        let hits = self.pattern.find_iter(content).count();
        let replacement = format!("{}: {}", self.field, version);
        let rewritten = self
            .pattern
            .replace_all(content, NoExpand(replacement.as_bytes()))
            .into_owned();
        (rewritten, hits)
    }

    fn write_atomically(manifest: &Path, content: &[u8]) -> std::io::Result<()> {
        let dir = match manifest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let permissions = fs::metadata(manifest)?.permissions();
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        fs::set_permissions(tmp.path(), permissions)?;
        tmp.persist(manifest).map_err(|e| e.error)?;
        Ok(())
    }
}

impl ManifestPatcher for InPlacePatcher {
    fn patch(&self, manifest: &Path, version: &str) -> Result<()> {
        validate_version(manifest, version)?;

        let content = fs::read(manifest).map_err(|e| ChartVersionError::patch(manifest, e))?;

        let (rewritten, hits) = self.rewrite(&content, version);
        if hits == 0 {
            warn!(
                "No '{}: ' line found in {}, leaving it unchanged",
                self.field,
                manifest.display()
            );
            return Ok(());
        }

        debug!(hits, "rewriting {}", manifest.display());
        Self::write_atomically(manifest, &rewritten)
            .map_err(|e| ChartVersionError::patch(manifest, e))
    }
}

/// Delegates the rewrite to `sed -i`
pub struct SedPatcher<E: CommandExecutor> {
    field: String,
    binary: String,
    executor: E,
}

impl<E: CommandExecutor> SedPatcher<E> {
    pub fn new(field: impl Into<String>, binary: impl Into<String>, executor: E) -> Self {
        SedPatcher {
            field: field.into(),
            binary: binary.into(),
            executor,
        }
    }

    /// The sed program text, e.g. `s/version: .*/version: 1.2.3/g`
    pub fn expression(&self, version: &str) -> String {
        let escaped = self.field.replace('.', "\\.");
        format!("s/{}: .*/{}: {}/g", escaped, self.field, version)
    }
}

impl<E: CommandExecutor> ManifestPatcher for SedPatcher<E> {
    fn patch(&self, manifest: &Path, version: &str) -> Result<()> {
        validate_version(manifest, version)?;

        let expression = self.expression(version);
        let manifest_arg = manifest.to_string_lossy();
        self.executor
            .run(&self.binary, &["-i", &expression, "--", &manifest_arg], None)
            .map_err(|e| ChartVersionError::patch(manifest, e))?;
        Ok(())
    }
}
