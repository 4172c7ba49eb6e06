//! The diagnostics sink.
//!
//! A [`Reporter`] formats severity-tagged messages onto any `io::Write`
//! sink. When a source and span are supplied, the message is prefixed with
//! the file position and followed by the offending source slice:
//!
//! ```text
//! demo.sb[9-12|0,10]: failure: mismatched types
//!         1.5
//! ```
//!
//! The library never terminates the process; parse errors travel up as
//! `Result` values and the driver decides what a `failure` means for its
//! exit status.

use std::io::{self, Write};

use sable_base::Span;

use crate::error::ParseError;
use crate::source::Source;

/// Message severities, mildest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Verbose,
    Comment,
    Caution,
    Failure,
}

impl Severity {
    fn name(self) -> &'static str {
        match self {
            Severity::Verbose => "verbose",
            Severity::Comment => "comment",
            Severity::Caution => "caution",
            Severity::Failure => "failure",
        }
    }
}

/// Formats diagnostics onto a sink.
pub struct Reporter<W: Write> {
    sink: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(sink: W) -> Self {
        Reporter { sink }
    }

    /// Consumes the reporter, returning its sink.
    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Emits one report. With a source and span the position and the
    /// offending slice are included; without, just `severity: message`.
    pub fn report(
        &mut self,
        severity: Severity,
        context: Option<(&Source, Span)>,
        message: &str,
    ) -> io::Result<()> {
        match context {
            Some((source, span)) => {
                writeln!(
                    self.sink,
                    "{}[{}-{}|{},{}]: {}: {}",
                    source.path(),
                    span.start,
                    span.end,
                    span.row,
                    span.column,
                    severity.name(),
                    message,
                )?;
                if !span.is_empty() {
                    let slice = String::from_utf8_lossy(source.slice(span));
                    writeln!(self.sink, "\t{}", slice)?;
                }
                Ok(())
            }
            None => writeln!(self.sink, "{}: {}", severity.name(), message),
        }
    }

    /// Reports a parse error as a failure, with its source context.
    pub fn failure(&mut self, source: &Source, error: &ParseError) -> io::Result<()> {
        self.report(
            Severity::Failure,
            Some((source, error.span)),
            &error.kind.to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    fn reported(run: impl FnOnce(&mut Reporter<&mut Vec<u8>>)) -> String {
        let mut buffer = Vec::new();
        {
            let mut reporter = Reporter::new(&mut buffer);
            run(&mut reporter);
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn bare_report_has_severity_prefix() {
        let text = reported(|r| {
            r.report(Severity::Failure, None, "missing source").unwrap();
        });
        assert_eq!(text, "failure: missing source\n");
    }

    #[test]
    fn positioned_report_includes_span_and_slice() {
        let source = Source::from_bytes("demo.sb", b"x: int = 1.5;".to_vec()).unwrap();
        let span = Span::new(9, 12, 0, 10);
        let text = reported(|r| {
            r.report(Severity::Caution, Some((&source, span)), "mismatched types")
                .unwrap();
        });
        assert_eq!(
            text,
            "demo.sb[9-12|0,10]: caution: mismatched types\n\t1.5\n"
        );
    }

    #[test]
    fn empty_span_omits_the_slice_line() {
        let source = Source::from_bytes("demo.sb", b"x".to_vec()).unwrap();
        let span = Span::new(1, 1, 0, 2);
        let text = reported(|r| {
            r.report(Severity::Verbose, Some((&source, span)), "ETX").unwrap();
        });
        assert_eq!(text, "demo.sb[1-1|0,2]: verbose: ETX\n");
    }

    #[test]
    fn failure_formats_the_error_kind() {
        let source = Source::from_bytes("demo.sb", b"\"abc".to_vec()).unwrap();
        let error = ParseError::new(ParseErrorKind::UnterminatedText, Span::new(0, 4, 0, 1));
        let text = reported(|r| {
            r.failure(&source, &error).unwrap();
        });
        assert!(text.starts_with("demo.sb[0-4|0,1]: failure: unterminated text"));
        assert!(text.contains("\t\"abc"));
    }

    #[test]
    fn severity_names_are_lowercase() {
        for (severity, name) in [
            (Severity::Verbose, "verbose"),
            (Severity::Comment, "comment"),
            (Severity::Caution, "caution"),
            (Severity::Failure, "failure"),
        ] {
            assert_eq!(severity.name(), name);
        }
    }
}
