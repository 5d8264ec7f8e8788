use crate::dictionary::Dictionary;
use crate::errors::{Error, Result};
use crate::fileset;
use crate::lines;
use crate::matcher::WordMatcher;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One occurrence of a dictionary word in a file, as emitted by `dump`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    /// Zero-based line index.
    pub lineno: usize,
    /// The trigger word that matched.
    pub word: String,
    /// The full candidate list for that word.
    pub replacements: Vec<String>,
    /// The raw line text in verbose mode, `null` otherwise.
    pub line: Option<String>,
}

/// Read-only scanning engine behind the `summary` and `dump` reports.
///
/// Never mutates any input file; a file the line reader rejects is skipped
/// with a warning so one bad file cannot blank out the rest of the report.
pub struct Aggregator {
    dictionary: Dictionary,
    matcher: WordMatcher,
}

impl Aggregator {
    pub fn new(dictionary: Dictionary) -> Result<Self> {
        let matcher = WordMatcher::new(&dictionary)?;
        Ok(Self {
            dictionary,
            matcher,
        })
    }

    /// Builds the summary record for one file, or `None` when no dictionary
    /// word occurs in it.
    ///
    /// A word is counted once per line it appears in, however many times it
    /// occurs within that line. The record carries the per-word counts in
    /// dictionary order plus a synthetic `totalCount`; zero-count words are
    /// omitted.
    pub fn summarize_file(&self, path: &Path) -> Result<Option<Map<String, Value>>> {
        let file = lines::read_file_lines(path)?;

        let mut counts = vec![0u64; self.dictionary.len()];
        for line in &file.lines {
            for idx in self.matcher.detect(line) {
                counts[idx] += 1;
            }
        }

        let total: u64 = counts.iter().sum();
        if total == 0 {
            return Ok(None);
        }

        let mut record = Map::new();
        for (idx, &count) in counts.iter().enumerate() {
            if count > 0 {
                record.insert(self.dictionary.entry(idx).word.clone(), count.into());
            }
        }
        record.insert("totalCount".to_string(), total.into());
        Ok(Some(record))
    }

    /// Builds the occurrence list for one file.
    ///
    /// Records are emitted word-major: for each dictionary word in dictionary
    /// order, one record per line containing it, in line order. Two words on
    /// the same line therefore produce two records sharing a `lineno`.
    pub fn dump_file(&self, path: &Path, verbose: bool) -> Result<Vec<Occurrence>> {
        let file = lines::read_file_lines(path)?;

        let mut records = Vec::new();
        for (idx, entry) in self.dictionary.entries().iter().enumerate() {
            let finder = self.matcher.finder(idx);
            for (lineno, line) in file.lines.iter().enumerate() {
                if finder.is_match(line) {
                    records.push(Occurrence {
                        lineno,
                        word: entry.word.clone(),
                        replacements: entry.candidates.clone(),
                        line: verbose.then(|| line.clone()),
                    });
                }
            }
        }
        Ok(records)
    }

    /// Summarizes a whole file set into a file-path -> summary-record map.
    ///
    /// Files with no occurrences are omitted. Scanning is parallel; the
    /// resulting map stays in file-set order.
    pub fn summarize(&self, files: &[PathBuf]) -> Result<Map<String, Value>> {
        let pb = progress_bar(files.len());

        let per_file: Vec<Option<Map<String, Value>>> = files
            .par_iter()
            .map(|path| {
                pb.inc(1);
                skip_unreadable(self.summarize_file(path))
            })
            .collect::<Result<Vec<_>>>()?;
        pb.finish_and_clear();

        let mut summary = Map::new();
        for (path, record) in files.iter().zip(per_file) {
            if let Some(record) = record {
                summary.insert(path.display().to_string(), Value::Object(record));
            }
        }
        Ok(summary)
    }

    /// Dumps a whole file set into a file-path -> occurrence-list map.
    pub fn dump(&self, files: &[PathBuf], verbose: bool) -> Result<Map<String, Value>> {
        let pb = progress_bar(files.len());

        let per_file: Vec<Option<Vec<Occurrence>>> = files
            .par_iter()
            .map(|path| {
                pb.inc(1);
                skip_unreadable(
                    self.dump_file(path, verbose)
                        .map(|records| (!records.is_empty()).then_some(records)),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        pb.finish_and_clear();

        let mut result = Map::new();
        for (path, records) in files.iter().zip(per_file) {
            if let Some(records) = records {
                result.insert(path.display().to_string(), serde_json::to_value(records)?);
            }
        }
        Ok(result)
    }
}

/// Downgrades a per-file `UnreadableFile` failure to a warning plus `None`.
fn skip_unreadable<T>(result: Result<Option<T>>) -> Result<Option<T>> {
    match result {
        Err(e @ Error::UnreadableFile { .. }) => {
            eprintln!("Warning: skipping {e}");
            Ok(None)
        }
        other => other,
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    if len < 2 {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("Scanning");
    pb
}

/// The main entry point for the `summary` command.
///
/// Writes the summary document (overwriting any prior content) and echoes it
/// to stdout.
pub fn run_summary(
    words_file: PathBuf,
    path: PathBuf,
    output: PathBuf,
    workers: Option<usize>,
) -> Result<()> {
    let dictionary = Dictionary::load(&words_file)?;
    let files = fileset::resolve(&path)?;
    let aggregator = Aggregator::new(dictionary)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or_else(num_cpus::get))
        .build()?;
    let summary = pool.install(|| aggregator.summarize(&files))?;

    write_report(&output, &Value::Object(summary))
}

/// The main entry point for the `dump` command.
pub fn run_dump(
    words_file: PathBuf,
    path: PathBuf,
    output: PathBuf,
    verbose: bool,
    workers: Option<usize>,
) -> Result<()> {
    let dictionary = Dictionary::load(&words_file)?;
    let files = fileset::resolve(&path)?;
    let aggregator = Aggregator::new(dictionary)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or_else(num_cpus::get))
        .build()?;
    let result = pool.install(|| aggregator.dump(&files, verbose))?;

    write_report(&output, &Value::Object(result))
}

fn write_report(output: &Path, document: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(document)?;

    let mut writer = BufWriter::new(File::create(output)?);
    writer.write_all(rendered.as_bytes())?;
    writer.write_all(b"\n")?;

    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn aggregator() -> Aggregator {
        let dict = Dictionary::from_entries(vec![
            ("master", vec!["primary", "controller"]),
            ("blacklist", vec!["denylist"]),
        ])
        .unwrap();
        Aggregator::new(dict).unwrap()
    }

    #[test]
    fn test_summary_counts_once_per_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.txt");
        fs::write(&path, "master blah master").unwrap();

        let record = aggregator().summarize_file(&path).unwrap().unwrap();
        assert_eq!(record.get("master"), Some(&Value::from(1)));
        assert_eq!(record.get("totalCount"), Some(&Value::from(1)));
    }

    #[test]
    fn test_summary_total_is_word_sum() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.txt");
        fs::write(&path, "master blacklist\nanother master line").unwrap();

        let record = aggregator().summarize_file(&path).unwrap().unwrap();
        assert_eq!(record.get("master"), Some(&Value::from(2)));
        assert_eq!(record.get("blacklist"), Some(&Value::from(1)));
        assert_eq!(record.get("totalCount"), Some(&Value::from(3)));
        // No zero-count entries sneak in.
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_summary_omits_clean_files() {
        let temp_dir = TempDir::new().unwrap();
        let clean = temp_dir.path().join("clean.txt");
        let dirty = temp_dir.path().join("dirty.txt");
        fs::write(&clean, "nothing here").unwrap();
        fs::write(&dirty, "master").unwrap();

        let summary = aggregator()
            .summarize(&[clean.clone(), dirty.clone()])
            .unwrap();
        assert_eq!(summary.len(), 1);
        assert!(summary.contains_key(&dirty.display().to_string()));
    }

    #[test]
    fn test_dump_orders_word_major_then_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.txt");
        fs::write(&path, "master blacklist\nblacklist only").unwrap();

        let records = aggregator().dump_file(&path, false).unwrap();
        let keys: Vec<(usize, &str)> = records
            .iter()
            .map(|r| (r.lineno, r.word.as_str()))
            .collect();
        assert_eq!(keys, vec![(0, "master"), (0, "blacklist"), (1, "blacklist")]);
    }

    #[test]
    fn test_dump_two_words_share_lineno() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.txt");
        fs::write(&path, "master blacklist").unwrap();

        let records = aggregator().dump_file(&path, false).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].lineno, 0);
        assert_eq!(records[1].lineno, 0);
        assert_eq!(records[0].replacements, vec!["primary", "controller"]);
        assert_eq!(records[1].replacements, vec!["denylist"]);
    }

    #[test]
    fn test_dump_line_field_follows_verbose() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.txt");
        fs::write(&path, "blah master blah").unwrap();

        let quiet = aggregator().dump_file(&path, false).unwrap();
        assert_eq!(quiet[0].line, None);

        let verbose = aggregator().dump_file(&path, true).unwrap();
        assert_eq!(verbose[0].line.as_deref(), Some("blah master blah"));
    }

    #[test]
    fn test_dump_serializes_null_line() {
        let record = Occurrence {
            lineno: 0,
            word: "master".to_string(),
            replacements: vec!["primary".to_string()],
            line: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["line"], Value::Null);
        assert_eq!(json["lineno"], Value::from(0));
    }

    #[test]
    fn test_unreadable_file_does_not_blank_report() {
        let temp_dir = TempDir::new().unwrap();
        let binary = temp_dir.path().join("blob.bin");
        let text = temp_dir.path().join("file.txt");
        fs::write(&binary, b"\0\0\0").unwrap();
        fs::write(&text, "master").unwrap();

        let summary = aggregator()
            .summarize(&[binary, text.clone()])
            .unwrap();
        assert_eq!(summary.len(), 1);
        assert!(summary.contains_key(&text.display().to_string()));
    }

    #[test]
    fn test_end_to_end_summary_and_dump() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.txt");
        fs::write(&path, "master blacklist").unwrap();
        let files = vec![path.clone()];

        let agg = aggregator();

        let summary = agg.summarize(&files).unwrap();
        let record = summary
            .get(&path.display().to_string())
            .and_then(Value::as_object)
            .unwrap();
        assert_eq!(record.get("master"), Some(&Value::from(1)));
        assert_eq!(record.get("blacklist"), Some(&Value::from(1)));
        assert_eq!(record.get("totalCount"), Some(&Value::from(2)));

        let dump = agg.dump(&files, false).unwrap();
        let records = dump
            .get(&path.display().to_string())
            .and_then(Value::as_array)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r["lineno"] == Value::from(0)));
    }
}
