//! Minimal fallback LAS reader
//!
//! Curve names come from the `~C` section (text before the first dot on each
//! line), the null sentinel from a `NULL` header line, and each line after `~A`
//! is one whitespace-separated record with depth in the first column.

use super::{CurveDef, FormatIssue, LasParser, RowIngest};
use crate::config::LoaderConfig;
use crate::types::{HeaderItem, LogDataset, ParserKind, WellHeader};

/// Header mnemonics the fallback reader picks up
const MANUAL_HEADER_ITEMS: [&str; 4] = ["STRT", "STOP", "STEP", "NULL"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ManualLasParser;

/// `MNEM.UNIT` prefix of a curve line
fn split_mnemonic(line: &str) -> Option<(&str, &str)> {
    let (mnemonic, rest) = line.split_once('.')?;
    let mnemonic = mnemonic.trim();
    if mnemonic.is_empty() {
        return None;
    }
    // the unit must follow the dot directly
    let unit = rest
        .split(|c: char| c.is_whitespace() || c == ':')
        .next()
        .unwrap_or("");
    Some((mnemonic, unit))
}

/// Numeric value of a `MNEM.UNIT VALUE : DESC` line (last token before the colon)
fn item_value(line: &str) -> Option<String> {
    let before_colon = line.split(':').next()?;
    let (_, rest) = before_colon.split_once('.')?;
    let mut tokens = rest.split_whitespace();
    let first = tokens.next()?;
    let value = tokens.last().unwrap_or(first);
    value.parse::<f64>().ok().map(|_| value.to_string())
}

impl LasParser for ManualLasParser {
    fn kind(&self) -> ParserKind {
        ParserKind::Manual
    }

    fn parse(&self, text: &str, config: &LoaderConfig) -> Result<LogDataset, FormatIssue> {
        let mut in_curves = false;
        let mut curves: Vec<CurveDef> = Vec::new();
        let mut header = WellHeader::new();
        let mut data_start = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(marker) = line.strip_prefix('~') {
                let first = marker.chars().next().map(|c| c.to_ascii_uppercase());
                if first == Some('A') {
                    data_start = Some(idx + 1);
                    break;
                }
                in_curves = first == Some('C');
                continue;
            }
            if in_curves {
                if let Some((mnemonic, unit)) = split_mnemonic(line) {
                    curves.push(CurveDef {
                        mnemonic: mnemonic.to_string(),
                        unit: unit.to_string(),
                        description: String::new(),
                    });
                }
                continue;
            }
            if let Some((mnemonic, unit)) = split_mnemonic(line) {
                let known = MANUAL_HEADER_ITEMS
                    .iter()
                    .any(|m| mnemonic.eq_ignore_ascii_case(m));
                if let (true, Some(value)) = (known, item_value(line)) {
                    header.insert(HeaderItem {
                        mnemonic: mnemonic.to_uppercase(),
                        unit: unit.to_string(),
                        value,
                        description: String::new(),
                    });
                }
            }
        }

        let data_start = data_start.ok_or(FormatIssue::MissingDataSection)?;
        if curves.is_empty() {
            return Err(FormatIssue::NoCurveDefinitions);
        }

        let null_value = header.null_value().unwrap_or(config.default_null_value);
        let mut ingest = RowIngest::new(ParserKind::Manual, curves.len(), null_value, config);
        for (idx, raw) in text.lines().enumerate().skip(data_start) {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            ingest.push_record(idx + 1, &fields);
        }

        ingest.finish(&curves, header)
    }
}
