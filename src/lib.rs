use error_set::error_set;
use std::fs;
use std::path::Path;

pub mod header;
pub mod markup;
mod scrub;

pub use scrub::{MalformedBlock, ScrubOutcome, scrub_patch};

error_set! {
    /// Top-level error for patch-scrub operations
    PatchScrubError := {
        #[display("Patch file not found: {path}")]
        SourceMissing { path: String },
    } || FileAccessError

    /// Errors from reading the source or writing the destination
    FileAccessError := {
        #[display("Failed to read {path}: {message}")]
        ReadFailed { path: String, message: String },
        #[display("Failed to write {path}: {message}")]
        WriteFailed { path: String, message: String },
    }
}

/// Main interface for rewriting a patch file on disk.
///
/// Wraps the pure [`scrub_patch`] core with the file I/O around it: an
/// existence check on the source, a full read, and a full write of the
/// rewritten document to the destination (created or overwritten).
pub struct PatchScrubber<'a> {
    source: &'a Path,
    destination: &'a Path,
}

impl<'a> PatchScrubber<'a> {
    /// Create a scrubber for the given source and destination paths.
    pub fn new(source: &'a Path, destination: &'a Path) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Read the source patch, scrub it, and write the destination.
    ///
    /// The source is checked for existence first; a missing source
    /// produces [`PatchScrubError::SourceMissing`] and nothing is
    /// written. Malformed change-blocks do not fail the run; they pass
    /// through unmodified and come back in the returned
    /// [`ScrubOutcome`].
    ///
    /// # Examples
    /// ```no_run
    /// # use std::path::Path;
    /// # use patch_scrub::PatchScrubber;
    /// let scrubber = PatchScrubber::new(
    ///     Path::new("changes.patch"),
    ///     Path::new("changes-scrubbed.patch"),
    /// );
    /// let outcome = scrubber.run().unwrap();
    /// for block in &outcome.malformed {
    ///     eprintln!("Warning: {}", block);
    /// }
    /// ```
    pub fn run(&self) -> Result<ScrubOutcome, PatchScrubError> {
        if !self.source.exists() {
            return Err(PatchScrubError::SourceMissing {
                path: self.source.display().to_string(),
            });
        }

        let input = fs::read_to_string(self.source).map_err(|e| FileAccessError::ReadFailed {
            path: self.source.display().to_string(),
            message: e.to_string(),
        })?;

        let outcome = scrub_patch(&input);

        fs::write(self.destination, &outcome.text).map_err(|e| FileAccessError::WriteFailed {
            path: self.destination.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(outcome)
    }
}
