//! Header detection: decide how many leading bytes of each file to skip.
//!
//! The first non-empty file fixes the header (its first line, without terminator). A later file
//! whose first line is byte-for-byte equal has the header and up to
//! [`HeaderConsts::MAX_TERMINATOR_BYTES`] following `\r`/`\n` bytes skipped. Any other first line
//! is data and nothing is skipped.

use std::cell::OnceCell;
use std::io::{self, BufRead, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::engine::tools::{count_line_terminator, trim_line_end};
use crate::error::{InputOp, MergeError};
use crate::utils::config::HeaderConsts;

/// How a file's first line compared to the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderMatch {
    /// Zero-byte file: no first line, header untouched.
    Empty,
    /// First non-empty file: its first line became the header.
    Established,
    /// First line equals the header; header and terminator are skipped.
    Matched,
    /// First line differs from the header; kept as data.
    Differs,
}

/// Per-file decision: where streaming starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkipDecision {
    pub offset: u64,
    pub kind: HeaderMatch,
}

impl SkipDecision {
    fn from_start(kind: HeaderMatch) -> Self {
        Self { offset: 0, kind }
    }
}

enum FirstLine {
    Eof,
    Line(Vec<u8>),
    TooLong,
}

/// Write-once header plus the per-file skip computation. Owned by the walker only.
#[derive(Debug)]
pub struct HeaderFilter {
    header: OnceCell<Vec<u8>>,
    max_header_len: usize,
}

impl Default for HeaderFilter {
    fn default() -> Self {
        Self::new(HeaderConsts::MAX_HEADER_LEN)
    }
}

impl HeaderFilter {
    pub fn new(max_header_len: usize) -> Self {
        Self {
            header: OnceCell::new(),
            max_header_len,
        }
    }

    pub fn header(&self) -> Option<&[u8]> {
        self.header.get().map(Vec::as_slice)
    }

    pub fn into_header(self) -> Option<Vec<u8>> {
        self.header.into_inner()
    }

    /// Read the first line of `reader`, decide the skip offset, and leave `reader` positioned
    /// at that offset. `path` is only used for error context.
    pub fn position<R: BufRead + Seek>(
        &self,
        reader: &mut R,
        path: &Path,
    ) -> Result<SkipDecision, MergeError> {
        let line = match read_first_line(reader, self.max_header_len)
            .map_err(|e| MergeError::input(path, InputOp::Read, e))?
        {
            FirstLine::Eof => return Ok(SkipDecision::from_start(HeaderMatch::Empty)),
            FirstLine::TooLong => {
                return Err(MergeError::HeaderTooLong {
                    path: path.to_path_buf(),
                    limit: self.max_header_len,
                });
            }
            FirstLine::Line(line) => line,
        };

        let decision = match self.header.get() {
            None => {
                let _ = self.header.set(line);
                SkipDecision::from_start(HeaderMatch::Established)
            }
            Some(header) if *header == line => {
                let len = header.len() as u64;
                let terminator = terminator_len_at(reader, len)
                    .map_err(|e| MergeError::input(path, InputOp::Read, e))?;
                SkipDecision {
                    offset: len + terminator as u64,
                    kind: HeaderMatch::Matched,
                }
            }
            Some(_) => SkipDecision::from_start(HeaderMatch::Differs),
        };

        reader
            .seek(SeekFrom::Start(decision.offset))
            .map_err(|e| MergeError::input(path, InputOp::Seek, e))?;
        Ok(decision)
    }
}

/// First line up to `\n`, with the line ending trimmed. Reads at most `limit + 2` bytes so a
/// file without newlines is never pulled into memory whole.
fn read_first_line<R: BufRead>(reader: &mut R, limit: usize) -> io::Result<FirstLine> {
    let cap = limit as u64 + 2;
    let mut line = Vec::new();
    let n = reader.by_ref().take(cap).read_until(b'\n', &mut line)?;
    if n == 0 {
        return Ok(FirstLine::Eof);
    }
    if line.last() != Some(&b'\n') && n as u64 == cap {
        return Ok(FirstLine::TooLong);
    }
    trim_line_end(&mut line);
    if line.len() > limit {
        return Ok(FirstLine::TooLong);
    }
    Ok(FirstLine::Line(line))
}

/// Number of terminator bytes starting at `offset`. EOF counts as no terminator.
fn terminator_len_at<R: Read + Seek>(reader: &mut R, offset: u64) -> io::Result<usize> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut buf = [0u8; HeaderConsts::MAX_TERMINATOR_BYTES];
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(count_line_terminator(&buf[..filled]))
}
