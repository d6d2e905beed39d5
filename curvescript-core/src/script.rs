/// Script line reader and argument tokenizer
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use nom::{
    bytes::complete::take_till1,
    character::complete::{space0, space1},
    combinator::all_consuming,
    multi::separated_list0,
    number::complete::float,
    sequence::delimited,
    IResult,
};

use crate::error::{ArgumentError, ScriptError};

/// Source name that selects standard input instead of a file
pub const STDIN_SENTINEL: &str = "stdin";

/// Line-oriented reader over a script source
pub struct ScriptReader<B> {
    inner: B,
    line: usize,
}

impl ScriptReader<Box<dyn BufRead>> {
    /// Open a script file, or standard input for [`STDIN_SENTINEL`]
    pub fn open(source: &str) -> Result<Self, ScriptError> {
        let inner: Box<dyn BufRead> = if source == STDIN_SENTINEL {
            Box::new(BufReader::new(io::stdin()))
        } else {
            let file = File::open(source).map_err(|source_err| ScriptError::FileOpen {
                path: source.to_string(),
                source: source_err,
            })?;
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(inner))
    }
}

impl<B: BufRead> ScriptReader<B> {
    pub fn new(inner: B) -> Self {
        Self { inner, line: 0 }
    }

    /// Next line without its terminator, or `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced with U+FFFD, so a stray Latin-1
    /// line reads as an unknown keyword instead of failing the stream.
    pub fn next_line(&mut self) -> Result<Option<String>, ScriptError> {
        let mut buf = Vec::new();
        let read = self
            .inner
            .read_until(b'\n', &mut buf)
            .map_err(|source| ScriptError::Read {
                line: self.line,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }

        self.line += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// 1-based number of the last line returned
    pub fn line_number(&self) -> usize {
        self.line
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(delimited(
        space0,
        separated_list0(space1, take_till1(is_blank)),
        space0,
    ))(input)
}

/// Split an argument line on runs of spaces or tabs
pub fn split_tokens(line: &str) -> Vec<&str> {
    tokens(line).map(|(_, tokens)| tokens).unwrap_or_default()
}

/// Parse one token as a finite decimal number; the whole token must match
pub fn parse_number(token: &str) -> Result<f32, ArgumentError> {
    match all_consuming(float::<&str, nom::error::Error<&str>>)(token) {
        Ok((_, value)) if value.is_finite() => Ok(value),
        Ok(_) => Err(ArgumentError::NotFinite(token.to_string())),
        Err(_) => Err(ArgumentError::NotANumber(token.to_string())),
    }
}

/// Tokenize `line` into exactly `N` numbers
pub fn parse_numbers<const N: usize>(line: &str) -> Result<[f32; N], ArgumentError> {
    let tokens = split_tokens(line);
    if tokens.len() != N {
        return Err(ArgumentError::Count {
            expected: N,
            found: tokens.len(),
        });
    }

    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(tokens) {
        *value = parse_number(token)?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_strips_terminators() {
        let mut reader = ScriptReader::new("line\r\n0 0 0 1 1 1\nquit".as_bytes());
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("line"));
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("0 0 0 1 1 1"));
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("quit"));
        assert_eq!(reader.line_number(), 3);
        assert!(reader.next_line().unwrap().is_none());
    }

    #[test]
    fn test_reader_tolerates_invalid_utf8() {
        let mut reader = ScriptReader::new(&b"caf\xe9\nquit\n"[..]);
        let line = reader.next_line().unwrap().unwrap();
        assert!(line.starts_with("caf"));
        assert_ne!(line, "caf");
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("quit"));
    }

    #[test]
    fn test_open_missing_file() {
        let err = ScriptReader::open("/definitely/not/here.script").err().unwrap();
        assert!(matches!(err, ScriptError::FileOpen { .. }));
    }

    #[test]
    fn test_split_collapses_whitespace() {
        assert_eq!(split_tokens("  1  2\t3 "), vec!["1", "2", "3"]);
        assert!(split_tokens("   ").is_empty());
        assert!(split_tokens("").is_empty());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("-2.5"), Ok(-2.5));
        assert_eq!(parse_number("1e2"), Ok(100.0));
        assert_eq!(parse_number("7"), Ok(7.0));
        assert!(matches!(parse_number("1.5abc"), Err(ArgumentError::NotANumber(_))));
        assert!(matches!(parse_number("x"), Err(ArgumentError::NotANumber(_))));
        assert!(matches!(parse_number("nan"), Err(ArgumentError::NotFinite(_))));
        assert!(matches!(parse_number("1e99"), Err(ArgumentError::NotFinite(_))));
    }

    #[test]
    fn test_parse_numbers_arity() {
        assert_eq!(parse_numbers::<3>("1 2 3"), Ok([1.0, 2.0, 3.0]));
        assert_eq!(
            parse_numbers::<6>("0 0 0 1 1"),
            Err(ArgumentError::Count {
                expected: 6,
                found: 5
            })
        );
        assert!(parse_numbers::<1>("90 extra").is_err());
    }
}
