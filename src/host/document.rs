use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::AppError;
use crate::stamp::Editor;

/// Caret position as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CursorSpec {
    /// 1-based line and column; columns count characters.
    At { line: usize, column: usize },
    End,
}

impl FromStr for CursorSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("end") {
            return Ok(CursorSpec::End);
        }
        let invalid = || AppError::InvalidCursor {
            input: s.to_string(),
        };
        let (line, column) = match trimmed.split_once(':') {
            Some((line, column)) => (line, column),
            None => (trimmed, "1"),
        };
        let line: usize = line.trim().parse().map_err(|_| invalid())?;
        let column: usize = column.trim().parse().map_err(|_| invalid())?;
        if line == 0 || column == 0 {
            return Err(invalid());
        }
        Ok(CursorSpec::At { line, column })
    }
}

/// Byte offset of `spec` in `text`. A column may sit one past the last
/// character of its line; a trailing `\r` is not part of the line.
fn offset_of(text: &str, spec: CursorSpec) -> Result<usize, AppError> {
    let (line, column) = match spec {
        CursorSpec::End => return Ok(text.len()),
        CursorSpec::At { line, column } => (line, column),
    };
    let out_of_range = || AppError::CursorOutOfRange { line, column };

    let start = if line == 1 {
        0
    } else {
        text.match_indices('\n')
            .nth(line - 2)
            .map(|(i, _)| i + 1)
            .ok_or_else(out_of_range)?
    };
    let content = text[start..].split('\n').next().unwrap_or("");
    let content = content.strip_suffix('\r').unwrap_or(content);
    content
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(content.len()))
        .nth(column - 1)
        .map(|i| start + i)
        .ok_or_else(out_of_range)
}

/// A text file edited in place. Every insertion is written straight back.
#[derive(Debug)]
pub(crate) struct FileDocument {
    path: PathBuf,
    text: String,
    anchor: usize,
    caret: usize,
}

impl FileDocument {
    /// Open `path` with the caret at `at`, selecting up to `select_to` when
    /// given. A missing file is an empty document.
    pub(crate) fn open(
        path: impl Into<PathBuf>,
        at: CursorSpec,
        select_to: Option<CursorSpec>,
    ) -> Result<Self, AppError> {
        let path = path.into();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(target: "host", "{} does not exist yet", path.display());
                String::new()
            }
            Err(source) => return Err(AppError::Read { path, source }),
        };
        let caret = offset_of(&text, at)?;
        let anchor = match select_to {
            Some(spec) => offset_of(&text, spec)?,
            None => caret,
        };
        Ok(FileDocument {
            path,
            text,
            anchor,
            caret,
        })
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &std::path::Path {
        &self.path
    }

    #[cfg(test)]
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// 1-based line and column of the caret.
    pub(crate) fn caret_position(&self) -> (usize, usize) {
        let before = &self.text[..self.caret];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line = before.matches('\n').count() + 1;
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

impl Editor for FileDocument {
    fn replace_selection(&mut self, text: &str) -> Result<(), AppError> {
        let start = self.anchor.min(self.caret);
        let end = self.anchor.max(self.caret);
        self.text.replace_range(start..end, text);
        self.caret = start + text.len();
        self.anchor = self.caret;

        fs::write(&self.path, &self.text).map_err(|source| AppError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            target: "host",
            replaced = end - start,
            inserted = text.len(),
            "wrote {}",
            self.path.display()
        );
        Ok(())
    }

    fn scroll_to_cursor(&mut self) {
        let (line, column) = self.caret_position();
        info!(target: "host", "cursor at {}:{} in {}", line, column, self.path.display());
    }
}

/// Stand-in editor that writes inserted text to stdout.
#[derive(Debug, Default)]
pub(crate) struct StdoutEditor;

impl Editor for StdoutEditor {
    fn replace_selection(&mut self, text: &str) -> Result<(), AppError> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|source| AppError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })
    }

    fn scroll_to_cursor(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, column: usize) -> CursorSpec {
        CursorSpec::At { line, column }
    }

    fn doc_with(content: &str, cursor: CursorSpec, select_to: Option<CursorSpec>) -> (tempfile::TempDir, FileDocument) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, content).unwrap();
        let doc = FileDocument::open(&path, cursor, select_to).unwrap();
        (dir, doc)
    }

    #[test]
    fn cursor_spec_parses_line_and_column() {
        assert_eq!("3:7".parse::<CursorSpec>().unwrap(), at(3, 7));
        assert_eq!(" 2 ".parse::<CursorSpec>().unwrap(), at(2, 1));
        assert_eq!("END".parse::<CursorSpec>().unwrap(), CursorSpec::End);
    }

    #[test]
    fn cursor_spec_rejects_garbage_and_zero() {
        for input in ["", "a:b", "0:1", "1:0", "1:2:3", "-1:2"] {
            assert!(input.parse::<CursorSpec>().is_err(), "{input:?}");
        }
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let text = "héllo\nwörld\n";
        assert_eq!(offset_of(text, at(1, 1)).unwrap(), 0);
        assert_eq!(offset_of(text, at(1, 3)).unwrap(), 3);
        assert_eq!(offset_of(text, at(1, 6)).unwrap(), 6);
        assert_eq!(offset_of(text, at(2, 2)).unwrap(), 8);
        assert_eq!(offset_of(text, at(3, 1)).unwrap(), text.len());
        assert_eq!(offset_of(text, CursorSpec::End).unwrap(), text.len());
    }

    #[test]
    fn offsets_outside_the_document_fail() {
        let text = "ab\ncd";
        assert!(matches!(
            offset_of(text, at(1, 4)),
            Err(AppError::CursorOutOfRange { line: 1, column: 4 })
        ));
        assert!(offset_of(text, at(3, 1)).is_err());
    }

    #[test]
    fn carriage_return_is_not_a_column() {
        let text = "ab\r\ncd";
        assert_eq!(offset_of(text, at(1, 3)).unwrap(), 2);
        assert!(offset_of(text, at(1, 4)).is_err());
    }

    #[test]
    fn insert_at_caret_writes_through() {
        let (_dir, mut doc) = doc_with("# Log\n\nentry\n", at(3, 1), None);
        doc.replace_selection("09:03:07 ").unwrap();
        assert_eq!(doc.text(), "# Log\n\n09:03:07 entry\n");
        assert_eq!(fs::read_to_string(doc.path()).unwrap(), doc.text());
        assert_eq!(doc.caret_position(), (3, 10));
    }

    #[test]
    fn selection_is_replaced_in_either_direction() {
        let (_dir, mut doc) = doc_with("date: TODO\n", at(1, 11), Some(at(1, 7)));
        doc.replace_selection("2024-01-05").unwrap();
        assert_eq!(doc.text(), "date: 2024-01-05\n");
        assert_eq!(doc.caret_position(), (1, 17));
    }

    #[test]
    fn consecutive_insertions_follow_the_caret() {
        let (_dir, mut doc) = doc_with("", CursorSpec::End, None);
        doc.replace_selection("2024\n").unwrap();
        doc.replace_selection("2025").unwrap();
        assert_eq!(doc.text(), "2024\n2025");
        assert_eq!(doc.caret_position(), (2, 5));
    }

    #[test]
    fn missing_file_is_an_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.md");
        let mut doc = FileDocument::open(&path, at(1, 1), None).unwrap();
        assert_eq!(doc.text(), "");
        doc.replace_selection("2024-01-05").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "2024-01-05");
    }
}
