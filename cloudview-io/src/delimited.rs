//! Delimited text table point cloud reading
//!
//! The table convention is:
//! - the first line is a header and is skipped (configurable)
//! - every following row carries at least three numeric fields, X, Y and Z,
//!   separated by a single fixed delimiter; further columns are ignored
//! - blank lines and anything after a `#` are ignored
//!
//! Any malformed row aborts the whole read; there is no partial result.

use crate::error::IoError;
use cloudview_core::{Point3d, PointCloud, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Supported field delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Semicolon,
    Comma,
    Space,
    Tab,
}

impl Delimiter {
    /// Get the character representation of the delimiter
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Semicolon => ';',
            Delimiter::Comma => ',',
            Delimiter::Space => ' ',
            Delimiter::Tab => '\t',
        }
    }

    /// Detect the delimiter of a data row by picking the most frequent
    /// candidate. Ties resolve in declaration order.
    pub fn detect_from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        [Delimiter::Semicolon, Delimiter::Comma, Delimiter::Tab, Delimiter::Space]
            .into_iter()
            .map(|d| (trimmed.matches(d.as_char()).count(), d))
            .filter(|(count, _)| *count > 0)
            .fold(None, |best: Option<(usize, Delimiter)>, candidate| match best {
                Some(b) if b.0 >= candidate.0 => Some(b),
                _ => Some(candidate),
            })
            .map(|(_, d)| d)
    }

    /// Split a row into trimmed fields. Runs of spaces count as one separator.
    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Space => line.split_whitespace().collect(),
            d => line.split(d.as_char()).map(str::trim).collect(),
        }
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            ";" | "semicolon" => Ok(Delimiter::Semicolon),
            "," | "comma" => Ok(Delimiter::Comma),
            " " | "space" => Ok(Delimiter::Space),
            "\t" | "\\t" | "tab" => Ok(Delimiter::Tab),
            other => Err(format!("unknown delimiter '{other}'")),
        }
    }
}

/// How a table is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimitedOptions {
    /// Field delimiter; `None` detects it from the first data row
    pub delimiter: Option<Delimiter>,
    /// Skip the first line of the table
    pub skip_header: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            delimiter: Some(Delimiter::Semicolon),
            skip_header: true,
        }
    }
}

/// Reader for delimited X/Y/Z tables
pub struct DelimitedReader;

impl DelimitedReader {
    /// Read a point cloud from a file on disk
    pub fn read_point_cloud<P: AsRef<Path>>(
        path: P,
        options: &DelimitedOptions,
    ) -> Result<PointCloud<Point3d>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IoError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => IoError::Io(e),
        })?;

        let cloud = Self::read_from(BufReader::new(file), options)?;
        log::info!("read {} points from {}", cloud.len(), path.display());
        Ok(cloud)
    }

    /// Read a point cloud from any buffered source
    pub fn read_from<R: BufRead>(reader: R, options: &DelimitedOptions) -> Result<PointCloud<Point3d>> {
        Ok(Self::parse(reader, options)?)
    }

    fn parse<R: BufRead>(reader: R, options: &DelimitedOptions) -> std::result::Result<PointCloud<Point3d>, IoError> {
        let mut cloud = PointCloud::new();
        let mut delimiter = options.delimiter;

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line_no = index + 1;

            if index == 0 && options.skip_header {
                continue;
            }

            let data = strip_comment(&line).trim();
            if data.is_empty() {
                continue;
            }

            let delimiter = match delimiter {
                Some(d) => d,
                None => {
                    let detected = Delimiter::detect_from_line(data)
                        .ok_or(IoError::UnknownDelimiter { line: line_no })?;
                    log::debug!("detected delimiter {:?} on line {}", detected, line_no);
                    delimiter = Some(detected);
                    detected
                }
            };

            cloud.push(parse_row(data, delimiter, line_no)?);
        }

        if cloud.is_empty() {
            return Err(IoError::EmptyTable);
        }
        Ok(cloud)
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_row(data: &str, delimiter: Delimiter, line: usize) -> std::result::Result<Point3d, IoError> {
    let fields = delimiter.split(data);
    if fields.len() < 3 {
        return Err(IoError::TooFewColumns { line, found: fields.len() });
    }

    let mut xyz = [0.0f64; 3];
    for (column, (slot, field)) in xyz.iter_mut().zip(&fields).enumerate() {
        *slot = field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| IoError::MalformedField {
                line,
                column: column + 1,
                value: field.to_string(),
            })?;
    }

    Ok(Point3d::new(xyz[0], xyz[1], xyz[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudview_core::Error;
    use std::io::{Cursor, Write};

    fn read(content: &str, options: &DelimitedOptions) -> Result<PointCloud<Point3d>> {
        DelimitedReader::read_from(Cursor::new(content), options)
    }

    #[test]
    fn test_delimiter_detection() {
        assert_eq!(Delimiter::detect_from_line("1,2,3"), Some(Delimiter::Comma));
        assert_eq!(Delimiter::detect_from_line("1 2 3"), Some(Delimiter::Space));
        assert_eq!(Delimiter::detect_from_line("1\t2\t3"), Some(Delimiter::Tab));
        assert_eq!(Delimiter::detect_from_line("1;2;3"), Some(Delimiter::Semicolon));
        assert_eq!(Delimiter::detect_from_line("1; 2; 3"), Some(Delimiter::Semicolon));
        assert_eq!(Delimiter::detect_from_line("123"), None);
    }

    #[test]
    fn test_delimiter_from_str() {
        assert_eq!("tab".parse::<Delimiter>(), Ok(Delimiter::Tab));
        assert_eq!(",".parse::<Delimiter>(), Ok(Delimiter::Comma));
        assert!("|".parse::<Delimiter>().is_err());
    }

    #[test]
    fn test_semicolon_table_with_header() {
        let cloud = read("X;Y;Z\n1;2;3\n-1.5;0;4e2\n", &DelimitedOptions::default()).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[0], Point3d::new(1.0, 2.0, 3.0));
        assert_eq!(cloud[1], Point3d::new(-1.5, 0.0, 400.0));
    }

    #[test]
    fn test_header_is_skipped_even_if_numeric() {
        let cloud = read("9;9;9\n1;2;3\n", &DelimitedOptions::default()).unwrap();
        assert_eq!(cloud.len(), 1);
        assert_eq!(cloud[0], Point3d::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_extra_columns_blank_lines_and_comments() {
        let content = "x;y;z;intensity\n\n1;2;3;0.5\n# a comment\n4;5;6;0.1 # trailing\n   \n";
        let cloud = read(content, &DelimitedOptions::default()).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[1], Point3d::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_space_delimited_without_header() {
        let options = DelimitedOptions { delimiter: Some(Delimiter::Space), skip_header: false };
        let cloud = read("1.0  2.0 3.0\n 4 5 6\n", &options).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[0], Point3d::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_auto_detected_delimiter() {
        let options = DelimitedOptions { delimiter: None, skip_header: true };
        let cloud = read("x,y,z\n1,2,3\n4,5,6\n", &options).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[1], Point3d::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_undetectable_delimiter() {
        let options = DelimitedOptions { delimiter: None, skip_header: true };
        let err = read("x\n# single column\n123\n", &options).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_coordinates_are_read_in_double_precision() {
        let content = "X;Y;Z\n500000.01;5400000.01;0\n500000.02;5400000.02;0\n500000.03;5400000.03;0\n";
        let cloud = read(content, &DelimitedOptions::default()).unwrap();
        let xs: Vec<f64> = cloud.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![500000.01, 500000.02, 500000.03]);
    }

    #[test]
    fn test_too_few_columns() {
        let err = read("x;y;z\n1;2;3\n1;2\n", &DelimitedOptions::default()).unwrap_err();
        match err {
            Error::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("found 2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_field() {
        let err = read("x;y;z\n1;abc;3\n", &DelimitedOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));

        let err = read("x;y;z\n1;nan;3\n", &DelimitedOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_wrong_delimiter_is_an_error() {
        let err = read("x,y,z\n1,2,3\n", &DelimitedOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_table() {
        let err = read("x;y;z\n\n", &DelimitedOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "X;Y;Z\n0.5;1.5;2.5\n").unwrap();

        let cloud = DelimitedReader::read_point_cloud(file.path(), &DelimitedOptions::default()).unwrap();
        assert_eq!(cloud.len(), 1);
        assert_eq!(cloud[0], Point3d::new(0.5, 1.5, 2.5));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DelimitedReader::read_point_cloud(dir.path().join("absent.csv"), &DelimitedOptions::default())
            .unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
