//! LAS Log Dataset Loader
//!
//! Parses a sectioned LAS well-log file into a depth-indexed [`LogDataset`].
//! Two interchangeable strategies sit behind the [`LasParser`] trait:
//!
//! - [`SectionedLasParser`]: full parser (version/well/curve/parameter sections,
//!   LAS 1.2 well-item layout, wrapped data). Compiled with the default
//!   `sectioned-parser` feature.
//! - [`ManualLasParser`]: minimal fallback (curve names from `~C`, one record per
//!   data line).
//!
//! The strategy is chosen once, from configuration and feature availability,
//! never from file content. Both strategies share [`RowIngest`], so sentinel
//! substitution and skipped-line handling behave identically.
//!
//! # Usage
//!
//! ```ignore
//! use las_petro::loader::LasLoader;
//!
//! let loader = LasLoader::new(config.loader.clone());
//! let dataset = loader.load("data/las/sample_well.las")?;
//! ```

mod manual;
#[cfg(feature = "sectioned-parser")]
mod sectioned;

pub use manual::ManualLasParser;
#[cfg(feature = "sectioned-parser")]
pub use sectioned::SectionedLasParser;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{LoaderConfig, ParserSelection};
use crate::types::{
    DatasetError, LoadDiagnostics, LogCurve, LogDataset, ParserKind, RowIssue, RowIssueKind,
    WellHeader,
};

// ============================================================================
// Errors
// ============================================================================

/// Fatal loader failures. No partial dataset is ever returned alongside these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid LAS file {}: {issue}", path.display())]
    Format { path: PathBuf, issue: FormatIssue },
}

/// Structural problems that make a file unusable
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatIssue {
    #[error("no ~A (ASCII data) section found")]
    MissingDataSection,

    #[error("no curve definitions precede the data section")]
    NoCurveDefinitions,

    #[error("no data rows parsed ({data_lines} data lines, {skipped} skipped)")]
    NoDataRows { data_lines: usize, skipped: usize },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

// ============================================================================
// Strategy
// ============================================================================

/// A LAS parsing strategy
pub trait LasParser {
    fn kind(&self) -> ParserKind;

    /// Parse file text into a dataset
    fn parse(&self, text: &str, config: &LoaderConfig) -> Result<LogDataset, FormatIssue>;
}

/// Whether the full sectioned parser was compiled in
pub const fn sectioned_parser_available() -> bool {
    cfg!(feature = "sectioned-parser")
}

#[cfg(feature = "sectioned-parser")]
fn sectioned_parser() -> Option<Box<dyn LasParser>> {
    Some(Box::new(SectionedLasParser))
}

#[cfg(not(feature = "sectioned-parser"))]
fn sectioned_parser() -> Option<Box<dyn LasParser>> {
    None
}

/// Pick the strategy for a run: the sectioned parser when requested (or `auto`)
/// and available, the manual parser otherwise.
pub fn select_parser(selection: ParserSelection) -> Box<dyn LasParser> {
    match selection {
        ParserSelection::Manual => Box::new(ManualLasParser),
        ParserSelection::Auto | ParserSelection::Sectioned => match sectioned_parser() {
            Some(parser) => parser,
            None => {
                if selection == ParserSelection::Sectioned {
                    warn!("Sectioned LAS parser not compiled in, falling back to manual parser");
                }
                Box::new(ManualLasParser)
            }
        },
    }
}

// ============================================================================
// Loader
// ============================================================================

/// File-level entry point: reads the file once and hands the text to the selected strategy
pub struct LasLoader {
    config: LoaderConfig,
    parser: Box<dyn LasParser>,
}

impl LasLoader {
    pub fn new(config: LoaderConfig) -> Self {
        let parser = select_parser(config.parser);
        Self { config, parser }
    }

    pub fn parser_kind(&self) -> ParserKind {
        self.parser.kind()
    }

    /// Load a LAS file from disk.
    ///
    /// The file handle is scoped to the read; parsing works on the in-memory text.
    /// Non-UTF-8 bytes (common in legacy headers) are replaced, not rejected.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LogDataset, LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| LoadError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);

        let dataset = self
            .parser
            .parse(&text, &self.config)
            .map_err(|issue| LoadError::Format {
                path: path.to_path_buf(),
                issue,
            })?;

        let (top, base) = dataset.depth_range();
        info!(
            file = %path.display(),
            parser = %dataset.diagnostics().parser,
            rows = dataset.len(),
            skipped = dataset.diagnostics().rows_skipped,
            curves = ?dataset.curve_names(),
            depth_range = format!("{top:.1}-{base:.1} {}", dataset.depth_unit()),
            "LAS file loaded"
        );
        Ok(dataset)
    }

    /// Parse LAS text already in memory
    pub fn parse_str(&self, text: &str) -> Result<LogDataset, FormatIssue> {
        self.parser.parse(text, &self.config)
    }
}

// ============================================================================
// Shared Row Ingestion
// ============================================================================

/// Curve definition taken from the `~C` section (first entry is depth)
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CurveDef {
    pub mnemonic: String,
    pub unit: String,
    pub description: String,
}

/// Accumulates data records, substituting the null sentinel and recording skipped lines
pub(crate) struct RowIngest<'a> {
    config: &'a LoaderConfig,
    width: usize,
    null_value: f64,
    rows: Vec<(usize, Vec<Option<f64>>)>,
    diagnostics: LoadDiagnostics,
}

impl<'a> RowIngest<'a> {
    pub fn new(kind: ParserKind, width: usize, null_value: f64, config: &'a LoaderConfig) -> Self {
        Self {
            config,
            width,
            null_value,
            rows: Vec::new(),
            diagnostics: LoadDiagnostics::new(kind),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Ingest one record; `line` is the 1-based line where the record starts.
    pub fn push_record(&mut self, line: usize, fields: &[&str]) {
        self.diagnostics.data_lines += 1;

        if fields.len() != self.width {
            self.skip(
                line,
                RowIssueKind::FieldCount {
                    expected: self.width,
                    found: fields.len(),
                },
            );
            return;
        }

        let mut values = Vec::with_capacity(self.width);
        for field in fields {
            match field.parse::<f64>() {
                Ok(v) => values.push(self.substitute_null(v)),
                Err(_) => {
                    self.skip(
                        line,
                        RowIssueKind::InvalidNumber {
                            field: (*field).to_string(),
                        },
                    );
                    return;
                }
            }
        }

        if values[0].is_none() {
            self.skip(line, RowIssueKind::MissingDepth);
            return;
        }

        self.rows.push((line, values));
    }

    /// Record a skipped record without counting a data line (e.g. a truncated wrapped record)
    pub fn push_issue(&mut self, line: usize, kind: RowIssueKind) {
        self.diagnostics.data_lines += 1;
        self.skip(line, kind);
    }

    fn substitute_null(&self, v: f64) -> Option<f64> {
        let tolerance = 1e-9 * self.null_value.abs().max(1.0);
        if !v.is_finite() || (v - self.null_value).abs() <= tolerance {
            None
        } else {
            Some(v)
        }
    }

    fn skip(&mut self, line: usize, kind: RowIssueKind) {
        self.diagnostics.rows_skipped += 1;
        if self.diagnostics.issues.len() < self.config.max_reported_row_issues {
            warn!(line, issue = %kind, "Skipping LAS data line");
            self.diagnostics.issues.push(RowIssue { line, kind });
        }
    }

    /// Order rows by increasing depth and build the dataset.
    ///
    /// Files logged upwards are reversed whole; any remaining row whose depth does
    /// not exceed its predecessor is skipped.
    pub fn finish(
        mut self,
        curves: &[CurveDef],
        header: WellHeader,
    ) -> Result<LogDataset, FormatIssue> {
        let mut rows = std::mem::take(&mut self.rows);
        if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
            if first.1[0] > last.1[0] {
                rows.reverse();
                self.diagnostics.reversed = true;
            }
        }

        let mut depth: Vec<f64> = Vec::with_capacity(rows.len());
        let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(rows.len()); self.width - 1];
        for (line, values) in rows {
            let d = values[0].unwrap_or(f64::NAN);
            if let Some(&previous) = depth.last() {
                if d <= previous {
                    self.skip(line, RowIssueKind::DepthOutOfOrder { previous, depth: d });
                    continue;
                }
            }
            depth.push(d);
            for (column, value) in columns.iter_mut().zip(values.into_iter().skip(1)) {
                column.push(value);
            }
        }

        self.diagnostics.rows_parsed = depth.len();
        if self.diagnostics.rows_skipped > self.diagnostics.issues.len() {
            warn!(
                skipped = self.diagnostics.rows_skipped,
                reported = self.diagnostics.issues.len(),
                "Additional LAS data lines skipped"
            );
        }
        if depth.is_empty() {
            return Err(FormatIssue::NoDataRows {
                data_lines: self.diagnostics.data_lines,
                skipped: self.diagnostics.rows_skipped,
            });
        }

        let step = header
            .step()
            .map(f64::abs)
            .unwrap_or(self.config.default_step);

        let (depth_def, curve_defs) = curves
            .split_first()
            .ok_or(FormatIssue::NoCurveDefinitions)?;
        let log_curves = curve_defs
            .iter()
            .zip(columns)
            .map(|(def, values)| {
                LogCurve::new(def.mnemonic.clone(), def.unit.clone(), values)
                    .with_description(def.description.clone())
            })
            .collect();

        Ok(LogDataset::new(
            depth_def.mnemonic.clone(),
            depth_def.unit.clone(),
            depth,
            log_curves,
            header,
            self.null_value,
            step,
            self.diagnostics,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs(names: &[&str]) -> Vec<CurveDef> {
        names
            .iter()
            .map(|n| CurveDef {
                mnemonic: (*n).to_string(),
                unit: String::new(),
                description: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_null_sentinel_becomes_missing() {
        let config = LoaderConfig::default();
        let mut ingest = RowIngest::new(ParserKind::Manual, 3, -999.25, &config);
        ingest.push_record(10, &["100.0", "-999.25", "2.45"]);
        ingest.push_record(11, &["100.5", "55.0", "-999.2500"]);
        let ds = ingest.finish(&defs(&["DEPT", "GR", "DEN"]), WellHeader::new()).unwrap();
        assert_eq!(ds.curve("GR").unwrap().values(), &[None, Some(55.0)]);
        assert_eq!(ds.curve("DEN").unwrap().values(), &[Some(2.45), None]);
    }

    #[test]
    fn test_field_count_mismatch_skips_line() {
        let config = LoaderConfig::default();
        let mut ingest = RowIngest::new(ParserKind::Manual, 3, -999.25, &config);
        ingest.push_record(10, &["100.0", "40.0", "2.45"]);
        ingest.push_record(11, &["100.5", "40.0"]);
        ingest.push_record(12, &["101.0", "41.0", "2.46"]);
        let ds = ingest.finish(&defs(&["DEPT", "GR", "DEN"]), WellHeader::new()).unwrap();
        assert_eq!(ds.len(), 2);
        let diag = ds.diagnostics();
        assert_eq!(diag.rows_skipped, 1);
        assert_eq!(diag.issues[0].line, 11);
        assert_eq!(
            diag.issues[0].kind,
            RowIssueKind::FieldCount { expected: 3, found: 2 }
        );
    }

    #[test]
    fn test_upward_log_is_reversed() {
        let config = LoaderConfig::default();
        let mut ingest = RowIngest::new(ParserKind::Manual, 2, -999.25, &config);
        ingest.push_record(1, &["101.0", "3.0"]);
        ingest.push_record(2, &["100.5", "2.0"]);
        ingest.push_record(3, &["100.0", "1.0"]);
        let ds = ingest.finish(&defs(&["DEPT", "GR"]), WellHeader::new()).unwrap();
        assert_eq!(ds.depth(), &[100.0, 100.5, 101.0]);
        assert_eq!(ds.curve("GR").unwrap().values(), &[Some(1.0), Some(2.0), Some(3.0)]);
        assert!(ds.diagnostics().reversed);
    }

    #[test]
    fn test_duplicate_depth_skipped() {
        let config = LoaderConfig::default();
        let mut ingest = RowIngest::new(ParserKind::Manual, 2, -999.25, &config);
        ingest.push_record(1, &["100.0", "1.0"]);
        ingest.push_record(2, &["100.0", "9.0"]);
        ingest.push_record(3, &["100.5", "2.0"]);
        let ds = ingest.finish(&defs(&["DEPT", "GR"]), WellHeader::new()).unwrap();
        assert_eq!(ds.depth(), &[100.0, 100.5]);
        assert!(matches!(
            ds.diagnostics().issues[0].kind,
            RowIssueKind::DepthOutOfOrder { .. }
        ));
    }

    #[test]
    fn test_zero_rows_is_format_error() {
        let config = LoaderConfig::default();
        let mut ingest = RowIngest::new(ParserKind::Manual, 2, -999.25, &config);
        ingest.push_record(1, &["abc", "1.0"]);
        let err = ingest.finish(&defs(&["DEPT", "GR"]), WellHeader::new()).unwrap_err();
        assert_eq!(err, FormatIssue::NoDataRows { data_lines: 1, skipped: 1 });
    }

    #[test]
    fn test_default_step_applied_without_header() {
        let config = LoaderConfig::default();
        let mut ingest = RowIngest::new(ParserKind::Manual, 2, -999.25, &config);
        ingest.push_record(1, &["100.0", "1.0"]);
        let ds = ingest.finish(&defs(&["DEPT", "GR"]), WellHeader::new()).unwrap();
        assert!((ds.step() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_issue_list_is_capped() {
        let config = LoaderConfig {
            max_reported_row_issues: 2,
            ..LoaderConfig::default()
        };
        let mut ingest = RowIngest::new(ParserKind::Manual, 2, -999.25, &config);
        for line in 0..5 {
            ingest.push_record(line, &["1.0"]);
        }
        ingest.push_record(9, &["100.0", "1.0"]);
        let ds = ingest.finish(&defs(&["DEPT", "GR"]), WellHeader::new()).unwrap();
        assert_eq!(ds.diagnostics().rows_skipped, 5);
        assert_eq!(ds.diagnostics().issues.len(), 2);
    }

    #[test]
    fn test_manual_selection_always_honoured() {
        assert_eq!(select_parser(ParserSelection::Manual).kind(), ParserKind::Manual);
    }

    #[test]
    fn test_auto_selection_follows_availability() {
        let expected = if sectioned_parser_available() {
            ParserKind::Sectioned
        } else {
            ParserKind::Manual
        };
        assert_eq!(select_parser(ParserSelection::Auto).kind(), expected);
    }
}
