use std::fmt::Display;
use std::str::FromStr;

use crate::errors::{DoccatError, Result};

pub const PARAMETRIZER_PREFIX: &str = "**_parametrizer:";
pub const CLASSIFIER_PREFIX: &str = "**_classifier:";

/// Joins values into a line where every value is terminated by `;`.
pub fn join_fields<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut line = String::new();
    for v in values {
        line.push_str(&v.to_string());
        line.push(';');
    }
    line
}

/// Splits a `;`-delimited line. Trailing empty fields are dropped.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(';').collect();
    while fields.last().map_or(false, |f| f.is_empty()) {
        fields.pop();
    }
    fields
}

pub fn parse_fields<T>(line: &str) -> Result<Vec<T>>
where
    T: FromStr,
    DoccatError: From<T::Err>,
{
    let mut values = vec![];
    for field in split_fields(line) {
        values.push(field.trim().parse()?);
    }
    Ok(values)
}

/// Cursor over the lines of an exported model section.
pub struct SectionReader<'a> {
    lines: &'a [String],
    pos: usize,
}

impl<'a> SectionReader<'a> {
    pub const fn new(lines: &'a [String]) -> Self {
        Self { lines, pos: 0 }
    }

    pub fn next_line(&mut self, expected: &str) -> Result<&'a str> {
        let line = self.lines.get(self.pos).ok_or_else(|| {
            DoccatError::invalid_model(format!("unexpected end of model, expected {expected}"))
        })?;
        self.pos += 1;
        Ok(line.as_str())
    }

    /// Consumes a line that must be equal to `marker`.
    pub fn expect(&mut self, marker: &str) -> Result<()> {
        let line = self.next_line(marker)?;
        if line != marker {
            return Err(DoccatError::invalid_model(format!(
                "expected {marker}, found {line}"
            )));
        }
        Ok(())
    }

    /// Consumes a line starting with `prefix` and returns the rest of it.
    pub fn value(&mut self, prefix: &str) -> Result<&'a str> {
        let line = self.next_line(prefix)?;
        line.strip_prefix(prefix).ok_or_else(|| {
            DoccatError::invalid_model(format!("expected {prefix}, found {line}"))
        })
    }

    /// Consumes lines up to `marker` or the end of the section. The marker itself is left.
    pub fn take_until(&mut self, marker: &str) -> &'a [String] {
        let start = self.pos;
        while self.pos < self.lines.len() && self.lines[self.pos] != marker {
            self.pos += 1;
        }
        &self.lines[start..self.pos]
    }

    /// Consumes all remaining lines.
    pub fn rest(&mut self) -> &'a [String] {
        let start = self.pos;
        self.pos = self.lines.len();
        &self.lines[start..]
    }

    pub fn is_end(&self) -> bool {
        self.pos >= self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_join_fields() {
        assert_eq!("a;b;", join_fields(["a", "b"]));
        assert_eq!("0.5;1;0.1;", join_fields([0.5, 1.0, 0.1]));
        assert_eq!("", join_fields(Vec::<f64>::new()));
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(vec!["a", "b"], split_fields("a;b;"));
        assert_eq!(vec!["a", "", "b"], split_fields("a;;b;;"));
        assert_eq!(Vec::<&str>::new(), split_fields(""));
    }

    #[test]
    fn test_parse_fields() {
        assert_eq!(vec![0.25, 1e-5], parse_fields::<f64>("0.25;1.0E-5;").unwrap());
        assert_eq!(vec![3, 0], parse_fields::<usize>("3;0;").unwrap());
        assert!(parse_fields::<usize>("3;x;").is_err());
    }

    #[test]
    fn test_float_text_round_trip() {
        let values = [std::f64::consts::LN_2, 1.0 / 3.0, 1e-300, 123456789.125];
        let parsed: Vec<f64> = parse_fields(&join_fields(values)).unwrap();

        assert_eq!(values.to_vec(), parsed);
    }

    #[test]
    fn test_section_reader() {
        let src = lines(&["**_n:2", "**_grams:", "a b", "b c", "**_idf:", "0.5"]);
        let mut rdr = SectionReader::new(&src);

        assert_eq!("2", rdr.value("**_n:").unwrap());
        rdr.expect("**_grams:").unwrap();
        assert_eq!(&lines(&["a b", "b c"])[..], rdr.take_until("**_idf:"));
        rdr.expect("**_idf:").unwrap();
        assert_eq!(&lines(&["0.5"])[..], rdr.rest());
        assert!(rdr.is_end());
    }

    #[test]
    fn test_section_reader_errors() {
        let src = lines(&["**_k:5"]);
        let mut rdr = SectionReader::new(&src);

        assert_eq!(
            "InvalidModelError: expected **_classes:, found **_k:5",
            &rdr.expect("**_classes:").err().unwrap().to_string()
        );
        assert_eq!(
            "InvalidModelError: unexpected end of model, expected **_vectors:",
            &rdr.expect("**_vectors:").err().unwrap().to_string()
        );
    }
}
