//! Line-oriented parser for gettext-style catalog files.
//!
//! Only `msgid`/`msgstr` pairs are understood. Comments, `msgctxt`, plural
//! forms and anything else the state machine does not expect are skipped
//! without aborting the rest of the file.

use std::collections::HashSet;
use std::io::BufRead;

const MSGID: &str = "msgid \"";
const MSGSTR: &str = "msgstr \"";

/// An original/translated pair exactly as written in the catalog, before
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawEntry {
    pub original: String,
    pub translated: String,
}

impl RawEntry {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
        }
    }
}

/// Set of parsed pairs.
///
/// Identical pairs collapse into one. Iteration follows first-seen order, so
/// when a file defines the same original twice the later definition is merged
/// last.
#[derive(Debug, Clone, Default)]
pub struct EntrySet {
    entries: Vec<RawEntry>,
    seen: HashSet<RawEntry>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair. Returns `false` if the identical pair was already present.
    pub fn insert(&mut self, entry: RawEntry) -> bool {
        if self.seen.contains(&entry) {
            return false;
        }
        self.seen.insert(entry.clone());
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, original: &str, translated: &str) -> bool {
        self.seen.contains(&RawEntry::new(original, translated))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for EntrySet {
    type Item = RawEntry;
    type IntoIter = std::vec::IntoIter<RawEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingOriginal,
    InOriginal,
    AwaitingTranslation,
    InTranslation,
}

/// Incremental parser. Feed it lines with [`CatalogParser::feed`] and collect
/// the result with [`CatalogParser::finish`].
#[derive(Debug)]
pub struct CatalogParser {
    state: State,
    original: String,
    translated: String,
    entries: EntrySet,
}

impl Default for CatalogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogParser {
    pub fn new() -> Self {
        Self {
            state: State::AwaitingOriginal,
            original: String::new(),
            translated: String::new(),
            entries: EntrySet::new(),
        }
    }

    /// Advance the state machine by one line (without its line terminator).
    pub fn feed(&mut self, line: &str) {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if let Some(rest) = line.strip_prefix(MSGID) {
            if self.state == State::InTranslation {
                self.flush_translation();
            }
            self.original.clear();
            self.translated.clear();

            let data = marker_body(rest);
            if data.is_empty() {
                self.state = State::InOriginal;
            } else {
                self.original.push_str(data);
                self.state = State::AwaitingTranslation;
            }
            return;
        }

        if self.state == State::InOriginal {
            if let Some(data) = continuation_body(line) {
                self.original.push_str(data);
                return;
            }
            if self.original.is_empty() {
                // header block: skip its msgstr
                self.state = State::AwaitingOriginal;
                return;
            }
            // the terminating line may itself be the msgstr marker
            self.state = State::AwaitingTranslation;
        }

        match self.state {
            State::AwaitingTranslation => {
                if let Some(rest) = line.strip_prefix(MSGSTR) {
                    let data = marker_body(rest);
                    if data.is_empty() {
                        self.state = State::InTranslation;
                    } else {
                        let entry = RawEntry::new(self.original.as_str(), data);
                        self.emit(entry);
                        self.state = State::AwaitingOriginal;
                    }
                }
            }
            State::InTranslation => match continuation_body(line) {
                Some(data) => self.translated.push_str(data),
                None => self.flush_translation(),
            },
            State::AwaitingOriginal | State::InOriginal => {}
        }
    }

    /// Finish parsing, flushing a translation still in progress.
    pub fn finish(mut self) -> EntrySet {
        if self.state == State::InTranslation {
            self.flush_translation();
        }
        self.entries
    }

    fn flush_translation(&mut self) {
        let translated = if self.translated.is_empty() {
            self.original.clone()
        } else {
            std::mem::take(&mut self.translated)
        };
        let entry = RawEntry::new(std::mem::take(&mut self.original), translated);
        self.emit(entry);
        self.translated.clear();
        self.state = State::AwaitingOriginal;
    }

    fn emit(&mut self, entry: RawEntry) {
        if entry.original.is_empty() {
            return;
        }
        self.entries.insert(entry);
    }
}

/// Body of a marker line after the opening quote, without its closing quote.
fn marker_body(rest: &str) -> &str {
    rest.strip_suffix('"').unwrap_or(rest)
}

/// Body of a `"..."` continuation line, or `None` if the line is not one.
fn continuation_body(line: &str) -> Option<&str> {
    if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
        Some(&line[1..line.len() - 1])
    } else {
        None
    }
}

/// Parse a sequence of lines into raw pairs.
pub fn parse<I, S>(lines: I) -> EntrySet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = CatalogParser::new();
    for line in lines {
        parser.feed(line.as_ref());
    }
    parser.finish()
}

/// Parse catalog text held in memory.
pub fn parse_str(content: &str) -> EntrySet {
    parse(content.lines())
}

/// Parse catalog text from a reader.
pub fn parse_reader<R: BufRead>(reader: R) -> std::io::Result<EntrySet> {
    let mut parser = CatalogParser::new();
    for line in reader.lines() {
        parser.feed(&line?);
    }
    Ok(parser.finish())
}
