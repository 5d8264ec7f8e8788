use crate::dictionary::Dictionary;
use crate::errors::{Error, Result};
use crate::lines;
use crate::matcher::WordMatcher;
use crate::prompt::{Prompter, StdinPrompter};
use crate::{fileset, writer};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Core engine for replacing dictionary words in files.
///
/// A `Replacer` holds the loaded dictionary and its compiled matcher, both
/// read-only after construction, which is what allows automatic mode to fan
/// out across files on a thread pool with no locking.
pub struct Replacer {
    dictionary: Dictionary,
    matcher: WordMatcher,
}

/// The result of processing a single file.
pub struct FileOutcome {
    /// The total number of substitutions applied across the file's lines.
    pub replacements: usize,
    /// `true` if the file was rewritten on disk.
    pub written: bool,
}

/// Transfers the case pattern of `matched` onto `candidate`.
///
/// An all-uppercase match uppercases the entire candidate, even past the
/// match's length, so `MASTER` -> `PRIMARY` rather than `PRIMARy`. Otherwise
/// the transfer is letter by letter: an uppercase character in the matched
/// text uppercases the candidate character at the same index, a lowercase one
/// lowercases it, and once the matched text runs out the remaining candidate
/// characters keep their own case. So `Master` -> `Primary`, and a candidate
/// longer than a mixed-case match keeps its tail as written.
pub fn transfer_case(matched: &str, candidate: &str) -> String {
    let has_cased = matched.chars().any(|c| c.is_uppercase() || c.is_lowercase());
    if has_cased && !matched.chars().any(|c| c.is_lowercase()) {
        return candidate.to_uppercase();
    }

    let mut out = String::with_capacity(candidate.len());
    let mut matched_chars = matched.chars();

    for c in candidate.chars() {
        match matched_chars.next() {
            Some(m) if m.is_uppercase() => out.extend(c.to_uppercase()),
            Some(m) if m.is_lowercase() => out.extend(c.to_lowercase()),
            _ => out.push(c),
        }
    }

    out
}

impl Replacer {
    /// Creates a new `Replacer`, compiling a matcher for the dictionary.
    pub fn new(dictionary: Dictionary) -> Result<Self> {
        let matcher = WordMatcher::new(&dictionary)?;
        Ok(Self {
            dictionary,
            matcher,
        })
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn matcher(&self) -> &WordMatcher {
        &self.matcher
    }

    /// Replaces every occurrence of the word at `idx` in `line` with
    /// `candidate`, applying case transfer per match. Returns the new line
    /// and the number of occurrences replaced.
    fn substitute(&self, line: &str, idx: usize, candidate: &str) -> (String, usize) {
        let finder = self.matcher.finder(idx);
        let mut out = String::with_capacity(line.len());
        let mut last = 0;
        let mut count = 0;

        for m in finder.find_iter(line) {
            out.push_str(&line[last..m.start()]);
            out.push_str(&transfer_case(m.as_str(), candidate));
            last = m.end();
            count += 1;
        }
        out.push_str(&line[last..]);

        (out, count)
    }

    /// Resolves one line in automatic mode: every detected word, in
    /// dictionary order, is replaced by its first candidate.
    pub fn resolve_line(&self, line: &str) -> (String, usize) {
        let present = self.matcher.detect(line);
        if present.is_empty() {
            return (line.to_string(), 0);
        }

        let mut current = line.to_string();
        let mut total = 0;
        for idx in present {
            let candidate = &self.dictionary.entry(idx).candidates[0];
            let (next, count) = self.substitute(&current, idx, candidate);
            current = next;
            total += count;
        }

        (current, total)
    }

    /// Resolves one line interactively: for each detected word the user picks
    /// a candidate by index, and any other response skips that word.
    pub fn resolve_line_interactive(
        &self,
        line: &str,
        prompter: &mut dyn Prompter,
    ) -> Result<(String, usize)> {
        let present = self.matcher.detect(line);
        if present.is_empty() {
            return Ok((line.to_string(), 0));
        }

        let mut current = line.to_string();
        let mut total = 0;
        for idx in present {
            // An earlier substitution on this line may have consumed the word.
            if !self.matcher.finder(idx).is_match(&current) {
                continue;
            }

            let entry = self.dictionary.entry(idx);
            println!("\nWord [{}] is present in line: [{}]", entry.word, current);
            println!(
                "Following replacement options are available: [{}]",
                entry.candidates.join(",")
            );

            let message = format!(
                "Which word do you want to replace with? [0-{}]",
                entry.candidates.len() - 1
            );
            match prompter.ask(&message, entry.candidates.len())? {
                Some(choice) => {
                    let (next, count) = self.substitute(&current, idx, &entry.candidates[choice]);
                    current = next;
                    total += count;
                }
                None => println!("Invalid option, ignoring replacement..."),
            }
        }

        Ok((current, total))
    }

    /// Processes one file in automatic mode.
    ///
    /// The file is rewritten (atomically) only if at least one substitution
    /// happened; otherwise no I/O occurs at all.
    pub fn replace_file(&self, path: &Path) -> Result<FileOutcome> {
        let file = lines::read_file_lines(path)?;

        let mut new_lines = Vec::with_capacity(file.lines.len());
        let mut total = 0;
        for line in &file.lines {
            let (resolved, count) = self.resolve_line(line);
            total += count;
            new_lines.push(resolved);
        }

        if total == 0 {
            return Ok(FileOutcome {
                replacements: 0,
                written: false,
            });
        }

        writer::commit(path, &file.join(&new_lines))?;
        Ok(FileOutcome {
            replacements: total,
            written: true,
        })
    }

    /// Processes one file interactively.
    ///
    /// Every line is fully resolved before anything is written, and the write
    /// itself is gated by a per-file confirmation. A file whose occurrences
    /// were all skipped is never touched on disk.
    pub fn replace_file_interactive(
        &self,
        path: &Path,
        prompter: &mut dyn Prompter,
    ) -> Result<FileOutcome> {
        let file = lines::read_file_lines(path)?;

        let mut new_lines = Vec::with_capacity(file.lines.len());
        let mut total = 0;
        for line in &file.lines {
            let (resolved, count) = self.resolve_line_interactive(line, prompter)?;
            total += count;
            new_lines.push(resolved);
        }

        if total == 0 {
            println!("Words not found in file.");
            return Ok(FileOutcome {
                replacements: 0,
                written: false,
            });
        }

        let message = format!(
            "Write {} replacement(s) to {}?",
            total,
            path.display()
        );
        if !prompter.ask_yes_no(&message)? {
            println!("Skipping {}", path.display());
            return Ok(FileOutcome {
                replacements: total,
                written: false,
            });
        }

        writer::commit(path, &file.join(&new_lines))?;
        Ok(FileOutcome {
            replacements: total,
            written: true,
        })
    }
}

/// The main entry point for the `replace` command.
///
/// Loads the dictionary, resolves the file set, and processes every file.
/// Automatic mode runs on a Rayon thread pool; interactive mode is strictly
/// sequential because stdin can service only one prompt at a time.
pub fn run_replace(
    words_file: PathBuf,
    path: PathBuf,
    interactive: bool,
    workers: Option<usize>,
) -> Result<()> {
    let dictionary = Dictionary::load(&words_file)?;
    let files = fileset::resolve(&path)?;
    let replacer = Replacer::new(dictionary)?;

    if interactive {
        let mut prompter = StdinPrompter;
        replace_sequential(&replacer, &files, &mut prompter)
    } else {
        replace_parallel(&replacer, &files, workers)
    }
}

fn replace_sequential(
    replacer: &Replacer,
    files: &[PathBuf],
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let mut written = 0;
    let mut total_changes = 0;

    for path in files {
        match replacer.replace_file_interactive(path, prompter) {
            Ok(outcome) => {
                if outcome.written {
                    written += 1;
                    total_changes += outcome.replacements;
                    println!(
                        "Modified {} ({} replacements)",
                        path.display(),
                        outcome.replacements
                    );
                }
            }
            Err(e @ Error::UnreadableFile { .. }) => {
                eprintln!("Warning: skipping {e}");
            }
            // Prompt-channel failure aborts the remaining files. Files
            // already written stay written.
            Err(e) => return Err(e),
        }
    }

    print_replace_stats(files.len(), written, total_changes);
    Ok(())
}

fn replace_parallel(replacer: &Replacer, files: &[PathBuf], workers: Option<usize>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or_else(num_cpus::get))
        .build()?;

    let written = AtomicUsize::new(0);
    let total_changes = AtomicUsize::new(0);
    let failures = AtomicUsize::new(0);

    pool.install(|| {
        files.par_iter().for_each(|path| {
            match replacer.replace_file(path) {
                Ok(outcome) => {
                    if outcome.written {
                        written.fetch_add(1, Ordering::Relaxed);
                        total_changes.fetch_add(outcome.replacements, Ordering::Relaxed);
                        println!(
                            "Modified {} ({} replacements)",
                            path.display(),
                            outcome.replacements
                        );
                    }
                }
                Err(e @ Error::UnreadableFile { .. }) => {
                    eprintln!("Warning: skipping {e}");
                }
                Err(e) => {
                    eprintln!("Error processing file {}: {}", path.display(), e);
                    failures.fetch_add(1, Ordering::Relaxed);
                }
            }
        });
    });

    print_replace_stats(
        files.len(),
        written.load(Ordering::Relaxed),
        total_changes.load(Ordering::Relaxed),
    );

    // Skipped-with-warning files are policy; anything else failing must not
    // let the run report success.
    let failures = failures.load(Ordering::Relaxed);
    if failures > 0 {
        return Err(Error::Config(format!(
            "{failures} file(s) failed to process"
        )));
    }
    Ok(())
}

fn print_replace_stats(scanned: usize, written: usize, total_changes: usize) {
    println!("\n{}", "-".repeat(50));
    println!("Files scanned : {scanned}");
    println!("Files changed : {written}");
    println!("Total edits   : {total_changes}");
}
