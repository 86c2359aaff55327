use crate::banner::{StripMode, strip_banner};
use crate::error::{Result, TransfoError};
use crate::fs_utils::{read_file_contents, write_file_contents};
use crate::template::{RenderContext, TemplateValue};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Per-file metadata handed to a content processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// Path of the file being processed.
    pub path: PathBuf,
    /// Position of the file in the configured source list.
    pub index: usize,
}

/// User-supplied transform applied to each file's content before joining.
///
/// The engine does not catch processor failures: an `Err` aborts the whole
/// operation and no destination file is written.
pub type Processor = Box<dyn Fn(&str, &FileMeta) -> Result<String> + Send + Sync>;

/// Options controlling a concatenation run. Immutable once handed to
/// [`concat`].
pub struct ConcatOptions {
    /// Text joined between adjacent file contents. Defaults to `"\n"`.
    pub separator: TemplateValue,
    /// Text prepended once to the joined output. Defaults to empty.
    pub banner: TemplateValue,
    /// Text appended once to the joined output. Defaults to empty.
    pub footer: TemplateValue,
    /// Banner stripping mode; `None` leaves source banners in place.
    pub strip_banners: Option<StripMode>,
    /// Optional per-file content transform.
    pub process: Option<Processor>,
}

impl Default for ConcatOptions {
    fn default() -> Self {
        Self {
            separator: TemplateValue::from("\n"),
            banner: TemplateValue::default(),
            footer: TemplateValue::default(),
            strip_banners: None,
            process: None,
        }
    }
}

impl fmt::Debug for ConcatOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcatOptions")
            .field("separator", &self.separator)
            .field("banner", &self.banner)
            .field("footer", &self.footer)
            .field("strip_banners", &self.strip_banners)
            .field("process", &self.process.as_ref().map(|_| "fn"))
            .finish()
    }
}

/// A non-fatal problem recorded while concatenating.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Warning {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a successful concatenation run.
///
/// Warnings are returned in source-list order; a non-empty list means some
/// sources were skipped, not that the run failed.
#[derive(Debug, Serialize)]
pub struct ConcatReport {
    /// Destination the joined output was written to.
    pub dest: PathBuf,
    /// Sources that made it into the output, in join order.
    pub joined: Vec<PathBuf>,
    /// Sources skipped as unreadable, with the reason.
    pub warnings: Vec<Warning>,
}

/// Concatenates `sources` into `dest`.
///
/// Each source is read in list order. An unreadable source is logged as a
/// warning, recorded in the report, and excluded from the join — one bad
/// file never aborts the run. Readable sources are banner-stripped (when
/// `strip_banners` is set) and passed through the content processor (when
/// configured), then joined with the rendered separator between adjacent
/// entries only. The rendered banner is prepended and the rendered footer
/// appended, and the result is written to `dest` in one call, creating
/// parent directories as needed.
///
/// # Errors
///
/// - `TransfoError::Processor` if the content processor rejects a file.
/// - `TransfoError::Destination` if `dest` cannot be created or written.
/// - `TransfoError::Regex` if a template or banner pattern fails to compile.
pub fn concat(sources: &[PathBuf], dest: &Path, options: &ConcatOptions) -> Result<ConcatReport> {
    let mut warnings = Vec::new();
    let mut joined = Vec::new();
    let mut contents = Vec::new();

    for (index, path) in sources.iter().enumerate() {
        let raw = match read_file_contents(path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("skipping source {}: {e}", path.display());
                warnings.push(Warning {
                    path: path.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        let stripped = match options.strip_banners {
            Some(mode) => strip_banner(&raw, mode)?,
            None => raw,
        };

        let processed = match &options.process {
            Some(process) => {
                let meta = FileMeta {
                    path: path.clone(),
                    index,
                };
                process(&stripped, &meta).map_err(|e| TransfoError::Processor {
                    path: path.clone(),
                    message: e.to_string(),
                })?
            }
            None => stripped,
        };

        joined.push(path.clone());
        contents.push(processed);
    }

    let context = RenderContext {
        sources: &joined,
        dest,
    };

    let mut output = options.banner.resolve(&context)?;
    for (position, content) in contents.iter().enumerate() {
        if position > 0 {
            // Re-rendered at every boundary so computed separators stay
            // dynamic.
            output.push_str(&options.separator.resolve(&context)?);
        }
        output.push_str(content);
    }
    output.push_str(&options.footer.resolve(&context)?);

    write_file_contents(dest, &output)?;
    log::info!(
        "wrote {} ({} of {} sources)",
        dest.display(),
        joined.len(),
        sources.len()
    );

    Ok(ConcatReport {
        dest: dest.to_path_buf(),
        joined,
        warnings,
    })
}
