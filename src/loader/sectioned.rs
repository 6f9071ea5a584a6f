//! Full sectioned LAS 1.2 / 2.0 parser
//!
//! Reads `~V`, `~W`, `~C`, `~P` header sections as `MNEM.UNIT VALUE : DESCRIPTION`
//! items, honours `WRAP YES` data layout, and applies the LAS 1.2 convention of
//! carrying well-item values in the description column.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::{CurveDef, FormatIssue, LasParser, RowIngest};
use crate::config::LoaderConfig;
use crate::types::{HeaderItem, LogDataset, ParserKind, RowIssueKind, WellHeader};

/// Well-section mnemonics whose value stays in the value column under LAS 1.2
const LAS12_VALUE_ITEMS: [&str; 4] = ["STRT", "STOP", "STEP", "NULL"];

#[allow(clippy::expect_used)]
fn header_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([^.\s][^.]*?)\s*\.(\S*)\s*(.*)$").expect("header line pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    Data,
}

impl Section {
    fn from_marker(marker: &str) -> Self {
        match marker.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => Self::Version,
            Some('W') => Self::Well,
            Some('C') => Self::Curve,
            Some('P') => Self::Parameter,
            Some('A') => Self::Data,
            _ => Self::Other,
        }
    }
}

/// Split an item line into its four fields; `None` for lines without a mnemonic dot.
pub(crate) fn parse_header_item(line: &str) -> Option<HeaderItem> {
    let caps = header_line().captures(line)?;
    let rest = caps.get(3).map_or("", |m| m.as_str());
    let (value, description) = match rest.rfind(':') {
        Some(i) => (rest[..i].trim(), rest[i + 1..].trim()),
        None => (rest.trim(), ""),
    };
    Some(HeaderItem {
        mnemonic: caps[1].trim().to_string(),
        unit: caps[2].to_string(),
        value: value.to_string(),
        description: description.to_string(),
    })
}

/// Parser for well-formed sectioned LAS files
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionedLasParser;

impl LasParser for SectionedLasParser {
    fn kind(&self) -> ParserKind {
        ParserKind::Sectioned
    }

    fn parse(&self, text: &str, config: &LoaderConfig) -> Result<LogDataset, FormatIssue> {
        let mut section = Section::Preamble;
        let mut header = WellHeader::new();
        let mut curves: Vec<CurveDef> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut version: Option<f64> = None;
        let mut wrapped = false;
        let mut data_start: Option<usize> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(marker) = line.strip_prefix('~') {
                section = Section::from_marker(marker);
                if section == Section::Data {
                    data_start = Some(idx + 1);
                    break;
                }
                continue;
            }

            let Some(mut item) = parse_header_item(line) else {
                debug!(line = idx + 1, "Ignoring malformed header line");
                continue;
            };

            match section {
                Section::Version => {
                    match item.mnemonic.to_uppercase().as_str() {
                        "VERS" => version = item.numeric(),
                        "WRAP" => wrapped = item.value.eq_ignore_ascii_case("YES"),
                        _ => {}
                    }
                    header.insert(item);
                }
                Section::Well => {
                    let is_value_item = LAS12_VALUE_ITEMS
                        .iter()
                        .any(|m| item.mnemonic.eq_ignore_ascii_case(m));
                    if version.is_some_and(|v| v < 2.0) && !is_value_item {
                        std::mem::swap(&mut item.value, &mut item.description);
                    }
                    header.insert(item);
                }
                Section::Curve => {
                    let key = item.mnemonic.to_uppercase();
                    let count = seen.entry(key).or_insert(0);
                    *count += 1;
                    let mnemonic = if *count > 1 {
                        format!("{}:{}", item.mnemonic, count)
                    } else {
                        item.mnemonic
                    };
                    curves.push(CurveDef {
                        mnemonic,
                        unit: item.unit,
                        description: item.description,
                    });
                }
                Section::Parameter => {
                    if header.get(&item.mnemonic).is_none() {
                        header.insert(item);
                    }
                }
                Section::Preamble | Section::Other | Section::Data => {}
            }
        }

        let data_start = data_start.ok_or(FormatIssue::MissingDataSection)?;
        if curves.is_empty() {
            return Err(FormatIssue::NoCurveDefinitions);
        }
        if version.is_some_and(|v| v >= 3.0) {
            warn!(version = ?version, "LAS 3.0 file read with the 2.0 section layout");
        }

        let null_value = header.null_value().unwrap_or(config.default_null_value);
        let mut ingest = RowIngest::new(ParserKind::Sectioned, curves.len(), null_value, config);
        let data_lines = text
            .lines()
            .enumerate()
            .skip(data_start)
            .map(|(idx, raw)| (idx + 1, raw.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        if wrapped {
            let mut pending: Vec<&str> = Vec::with_capacity(ingest.width());
            let mut record_line = 0;
            for (line_no, line) in data_lines {
                for token in line.split_whitespace() {
                    if pending.is_empty() {
                        record_line = line_no;
                    }
                    pending.push(token);
                    if pending.len() == ingest.width() {
                        ingest.push_record(record_line, &pending);
                        pending.clear();
                    }
                }
            }
            if !pending.is_empty() {
                ingest.push_issue(
                    record_line,
                    RowIssueKind::FieldCount {
                        expected: ingest.width(),
                        found: pending.len(),
                    },
                );
            }
        } else {
            for (line_no, line) in data_lines {
                let fields: Vec<&str> = line.split_whitespace().collect();
                ingest.push_record(line_no, &fields);
            }
        }

        ingest.finish(&curves, header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAS20: &str = "\
~VERSION INFORMATION
 VERS.                 2.0 :   CWLS LOG ASCII STANDARD -VERSION 2.0
 WRAP.                  NO :   ONE LINE PER DEPTH STEP
~WELL INFORMATION
 STRT.F             1670.0 : START DEPTH
 STOP.F             1671.0 : STOP DEPTH
 STEP.F                0.5 : STEP
 NULL.             -999.25 : NULL VALUE
 COMP.     ANY OIL COMPANY : COMPANY
 WELL.      ANY ET AL 12-34 : WELL
~CURVE INFORMATION
 DEPT.F                    : 1  DEPTH
 GR  .GAPI                 : 2  GAMMA RAY
 DEN .G/C3                 : 3  BULK DENSITY
~PARAMETER INFORMATION
 BHT .DEGC            35.5 : BOTTOM HOLE TEMPERATURE
~A  DEPTH     GR      DEN
1670.0   45.0   2.45
1670.5 -999.25  2.40
1671.0   80.0   2.55
";

    #[test]
    fn test_parses_header_and_curves() {
        let ds = SectionedLasParser.parse(LAS20, &LoaderConfig::default()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.depth_mnemonic(), "DEPT");
        assert_eq!(ds.depth_unit(), "F");
        assert_eq!(ds.curve_names(), vec!["GR", "DEN"]);
        assert_eq!(ds.curve("GR").unwrap().unit, "GAPI");
        assert_eq!(ds.curve("DEN").unwrap().description, "3  BULK DENSITY");
        assert_eq!(ds.header().company(), Some("ANY OIL COMPANY"));
        assert_eq!(ds.header().well_name(), Some("ANY ET AL 12-34"));
        assert_eq!(ds.header().numeric("BHT"), Some(35.5));
        assert_eq!(ds.curve("GR").unwrap().get(1), None);
        assert_eq!(ds.diagnostics().parser, ParserKind::Sectioned);
    }

    #[test]
    fn test_las12_well_values_in_description() {
        let text = "\
~V
VERS.   1.2 : CWLS LOG ASCII STANDARD
WRAP.   NO  : ONE LINE PER DEPTH STEP
~W
STRT.M  100.0 : START
NULL.   -999.25 :
COMP.   COMPANY : ACME PETROLEUM
~C
DEPT.M : DEPTH
GR.GAPI : GAMMA
~A
100.0 50.0
";
        let ds = SectionedLasParser.parse(text, &LoaderConfig::default()).unwrap();
        assert_eq!(ds.header().company(), Some("ACME PETROLEUM"));
        assert_eq!(ds.header().numeric("STRT"), Some(100.0));
    }

    #[test]
    fn test_wrapped_data_section() {
        let text = "\
~V
VERS. 2.0 :
WRAP. YES :
~W
NULL. -999.25 :
~C
DEPT.M :
GR.GAPI :
NPHI.V/V :
DEN.G/C3 :
~A
100.0
45.0 0.25
2.40
100.5
50.0 0.20 2.45
101.0
55.0
";
        let ds = SectionedLasParser.parse(text, &LoaderConfig::default()).unwrap();
        assert_eq!(ds.depth(), &[100.0, 100.5]);
        assert_eq!(ds.curve("NPHI").unwrap().values(), &[Some(0.25), Some(0.20)]);
        assert_eq!(ds.diagnostics().rows_skipped, 1);
    }

    #[test]
    fn test_header_null_overrides_default() {
        let text = "~W\nNULL. -9999 :\n~C\nDEPT.M :\nGR.GAPI :\n~A\n100 -9999\n101 20\n";
        let ds = SectionedLasParser.parse(text, &LoaderConfig::default()).unwrap();
        assert!((ds.null_value() + 9999.0).abs() < 1e-12);
        assert_eq!(ds.curve("GR").unwrap().values(), &[None, Some(20.0)]);
    }

    #[test]
    fn test_duplicate_curve_mnemonics_are_numbered() {
        let text = "~C\nDEPT.M :\nRES.OHMM :\nRES.OHMM :\n~A\n100 1 2\n";
        let ds = SectionedLasParser.parse(text, &LoaderConfig::default()).unwrap();
        assert_eq!(ds.curve_names(), vec!["RES", "RES:2"]);
    }

    #[test]
    fn test_missing_data_section() {
        let text = "~C\nDEPT.M :\nGR.GAPI :\n";
        let err = SectionedLasParser.parse(text, &LoaderConfig::default()).unwrap_err();
        assert_eq!(err, FormatIssue::MissingDataSection);
    }

    #[test]
    fn test_missing_curve_section() {
        let text = "~W\nNULL. -999.25 :\n~A\n100 20\n";
        let err = SectionedLasParser.parse(text, &LoaderConfig::default()).unwrap_err();
        assert_eq!(err, FormatIssue::NoCurveDefinitions);
    }

    #[test]
    fn test_header_item_with_time_value() {
        let item = parse_header_item("TIME.   12:30:00 : LOG TIME").unwrap();
        assert_eq!(item.mnemonic, "TIME");
        assert_eq!(item.unit, "");
        assert_eq!(item.value, "12:30:00");
        assert_eq!(item.description, "LOG TIME");
    }
}
