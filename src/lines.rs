use crate::errors::{Error, Result};
use crate::matcher::WordMatcher;
use std::fs;
use std::path::Path;

/// A file split into lines, with enough bookkeeping to reverse the split.
///
/// Each line's own terminator (`\n`, `\r\n`, or nothing for an unterminated
/// final line) is recorded alongside it, so joining re-emits exactly the
/// boundary bytes the file came in with — mixed-ending files included. That
/// is what keeps read-modify-write round-trips byte-exact for every line the
/// replacer did not touch.
#[derive(Debug, Clone)]
pub struct FileLines {
    /// The lines, without their terminators.
    pub lines: Vec<String>,
    /// The terminator that followed each line, parallel to `lines`.
    terminators: Vec<&'static str>,
}

impl FileLines {
    /// Splits `content` on line boundaries.
    pub fn split(content: &str) -> FileLines {
        let mut lines = Vec::new();
        let mut terminators = Vec::new();

        let mut rest = content;
        while let Some(pos) = rest.find('\n') {
            let (raw, tail) = rest.split_at(pos);
            match raw.strip_suffix('\r') {
                Some(text) => {
                    lines.push(text.to_string());
                    terminators.push("\r\n");
                }
                None => {
                    lines.push(raw.to_string());
                    terminators.push("\n");
                }
            }
            rest = &tail[1..];
        }

        // A final line without a terminator; an empty file is one such line.
        if !rest.is_empty() || lines.is_empty() {
            lines.push(rest.to_string());
            terminators.push("");
        }

        FileLines { lines, terminators }
    }

    /// Joins `lines` back into file content, re-attaching each line's
    /// original terminator. Exactly reverses `split`.
    pub fn join(&self, lines: &[String]) -> String {
        let mut out = String::new();
        for (line, terminator) in lines.iter().zip(&self.terminators) {
            out.push_str(line);
            out.push_str(terminator);
        }
        out
    }
}

/// Reads a file and splits it into lines.
///
/// Binary content (a NUL byte in the first 1 KiB) and invalid UTF-8 both fail
/// with `UnreadableFile`; whether that skips the file or aborts the run is the
/// caller's policy.
pub fn read_file_lines(path: &Path) -> Result<FileLines> {
    let bytes = fs::read(path)?;

    if bytes.iter().take(1024).any(|&b| b == 0) {
        return Err(Error::UnreadableFile {
            path: path.to_path_buf(),
            reason: "binary content".to_string(),
        });
    }

    let content = String::from_utf8(bytes).map_err(|_| Error::UnreadableFile {
        path: path.to_path_buf(),
        reason: "not valid UTF-8".to_string(),
    })?;

    Ok(FileLines::split(&content))
}

/// Reads only the lines containing at least one dictionary word.
///
/// Returns `(line_index, text)` pairs so that callers still see true line
/// numbers; a filtered read that forgot the indices could never report
/// correct positions.
pub fn read_matching_lines(path: &Path, matcher: &WordMatcher) -> Result<Vec<(usize, String)>> {
    let file = read_file_lines(path)?;
    Ok(file
        .lines
        .into_iter()
        .enumerate()
        .filter(|(_, line)| matcher.is_match(line))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use tempfile::TempDir;

    #[test]
    fn test_split_join_round_trip_lf() {
        let content = "master\nhello\nblah blacklist\n";
        let file = FileLines::split(content);
        assert_eq!(file.lines, vec!["master", "hello", "blah blacklist"]);
        assert_eq!(file.join(&file.lines), content);
    }

    #[test]
    fn test_split_join_round_trip_crlf() {
        let content = "one\r\ntwo\r\n";
        let file = FileLines::split(content);
        assert_eq!(file.lines, vec!["one", "two"]);
        assert_eq!(file.join(&file.lines), content);
    }

    #[test]
    fn test_split_join_no_trailing_newline() {
        let content = "master blacklist";
        let file = FileLines::split(content);
        assert_eq!(file.lines, vec!["master blacklist"]);
        assert_eq!(file.join(&file.lines), content);
    }

    #[test]
    fn test_split_join_round_trip_mixed_endings() {
        // Each line keeps its own terminator; one CRLF line must not drag
        // the rest of the file over to CRLF.
        let content = "a\nmaster\r\nc\n";
        let file = FileLines::split(content);
        assert_eq!(file.lines, vec!["a", "master", "c"]);
        assert_eq!(file.join(&file.lines), content);
    }

    #[test]
    fn test_empty_file_round_trips() {
        let file = FileLines::split("");
        assert_eq!(file.lines, vec![""]);
        assert_eq!(file.join(&file.lines), "");
    }

    #[test]
    fn test_filtered_read_keeps_indices() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.txt");
        fs::write(&path, "master\nhello\nblah blacklist").unwrap();

        let dict = Dictionary::from_entries(vec![
            ("master", vec!["primary"]),
            ("blacklist", vec!["denylist"]),
        ])
        .unwrap();
        let matcher = WordMatcher::new(&dict).unwrap();

        let lines = read_matching_lines(&path, &matcher).unwrap();
        assert_eq!(
            lines,
            vec![(0, "master".to_string()), (2, "blah blacklist".to_string())]
        );
    }

    #[test]
    fn test_binary_file_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob.bin");
        fs::write(&path, b"abc\0def").unwrap();

        let err = read_file_lines(&path).unwrap_err();
        assert!(matches!(err, Error::UnreadableFile { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.txt");
        fs::write(&path, [0x6d, 0xff, 0xfe, 0x6d]).unwrap();

        let err = read_file_lines(&path).unwrap_err();
        assert!(matches!(err, Error::UnreadableFile { .. }));
    }
}
