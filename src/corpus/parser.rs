//! Reader for DUC sentence-annotated documents.
//!
//! A document is loose markup where each `<sentence id="N">` element carries
//! its raw text followed by a child element with one tab separated word
//! record per line:
//!
//! ```text
//! <sentence id="3">Hurricane Gilbert swept toward Jamaica.
//! <words>Hurricane	1	0	hurrican	NNP	2.0
//! swept	1	18	swept	VBD	1.0</words></sentence>
//! ```
//!
//! Fields are `text, stop flag, offset, stem, pos, tf`. A stop flag of `1`
//! marks a content word, `-1` a stop word.

use std::{
    fs,
    path::{Path, PathBuf},
};

use quick_xml::{
    events::{BytesStart, BytesText, Event},
    Reader,
};
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::{
    config::FeatureConfig,
    corpus::{Corpus, Document, Sentence, Word},
    error::{FeatureError, Result},
};

const RECORD_FIELDS: usize = 6;

/// HTML elements that never take an end tag.
const VOID_ELEMENTS: &[&[u8]] = &[
    b"area", b"base", b"br", b"col", b"embed", b"hr", b"img", b"input", b"link", b"meta",
    b"param", b"source", b"track", b"wbr",
];

/// Options for turning annotation files into documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// keep only records flagged as content words
    pub remove_stop_words: bool,
    /// parse files on the rayon pool
    pub parallel: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            remove_stop_words: true,
            parallel: true,
        }
    }
}

impl From<&FeatureConfig> for ParseOptions {
    fn from(config: &FeatureConfig) -> Self {
        Self {
            remove_stop_words: config.remove_stop_words,
            parallel: config.parallel,
        }
    }
}

/// Parse every regular file directly inside `dir`, one document per file.
///
/// Files are taken in file-name order so repeated runs see the same corpus.
pub fn parse_dir<P: AsRef<Path>>(dir: P, opts: &ParseOptions) -> Result<Corpus> {
    let dir = dir.as_ref();
    let files = list_files(dir)?;
    info!(dir = %dir.display(), files = files.len(), parallel = opts.parallel, "parsing topic documents");

    let parse = |path: &PathBuf| parse_document(path, opts);
    let documents = if opts.parallel {
        files.par_iter().map(parse).collect::<Result<Vec<Document>>>()?
    } else {
        files.iter().map(parse).collect::<Result<Vec<Document>>>()?
    };
    Ok(Corpus::new(documents))
}

/// Regular files directly in `dir`, sorted by file name.
pub(crate) fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(FeatureError::MissingDirectory(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| FeatureError::io(dir, e))? {
        let entry = entry.map_err(|e| FeatureError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read a text file, taking bytes that are not UTF-8 as Latin-1.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| FeatureError::io(path, e))?;
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            debug!(path = %path.display(), "not UTF-8, decoding as Latin-1");
            decode_latin1(e.as_bytes())
        }
    })
}

/// every byte maps to the code point of the same value
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse one annotation file. The path becomes the document id.
pub fn parse_document<P: AsRef<Path>>(path: P, opts: &ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    let content = read_text(path)?;
    let id = path.display().to_string();
    let sentences = parse_sentences(&content, opts).map_err(|source| FeatureError::Xml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(doc = %id, sentences = sentences.len(), "parsed document");
    Document::new(id, sentences)
}

/// Parse annotated markup held in memory.
pub fn parse_str(id: &str, content: &str, opts: &ParseOptions) -> Result<Document> {
    let sentences = parse_sentences(content, opts).map_err(|source| FeatureError::Xml {
        path: PathBuf::from(id),
        source,
    })?;
    Document::new(id, sentences)
}

/// sentence element under construction
struct SentenceBuilder {
    /// `None` when the id attribute is not an integer; such elements are skipped
    id: Option<i64>,
    text: String,
    records: String,
    depth: usize,
    seen_child: bool,
    in_records: bool,
}

impl SentenceBuilder {
    fn new(id: Option<i64>) -> Self {
        Self {
            id,
            text: String::new(),
            records: String::new(),
            depth: 0,
            seen_child: false,
            in_records: false,
        }
    }

    fn open_child(&mut self) {
        if self.depth == 0 && !self.seen_child {
            self.seen_child = true;
            self.in_records = true;
        }
        self.depth += 1;
    }

    fn close_child(&mut self) {
        if self.depth == 1 {
            self.in_records = false;
        }
        self.depth = self.depth.saturating_sub(1);
    }

    fn push_text(&mut self, text: &str) {
        if self.depth == 0 && !self.seen_child {
            self.text.push_str(text);
        } else if self.in_records && self.depth == 1 {
            self.records.push_str(text);
        }
    }

    fn finish(self, opts: &ParseOptions) -> Option<Sentence> {
        let id = self.id?;
        let words: Vec<Word> = self
            .records
            .split('\n')
            .filter_map(|line| parse_record(line, opts))
            .collect();
        if words.is_empty() {
            debug!(sentence = id, "dropping sentence without retained words");
            return None;
        }
        Some(Sentence::new(id, self.text.trim(), words))
    }
}

fn parse_sentences(
    content: &str,
    opts: &ParseOptions,
) -> std::result::Result<Vec<Sentence>, quick_xml::Error> {
    let mut reader = Reader::from_str(content);
    {
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
    }

    let mut sentences = Vec::new();
    let mut current: Option<SentenceBuilder> = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) if is_void(e.name().as_ref()) => {}
            Event::Start(e) => {
                if let Some(builder) = current.as_mut() {
                    builder.open_child();
                } else if is_sentence(&e) {
                    current = Some(SentenceBuilder::new(sentence_id(&e)));
                }
            }
            Event::Empty(e) if is_void(e.name().as_ref()) => {}
            Event::Empty(e) => {
                if let Some(builder) = current.as_mut() {
                    builder.open_child();
                    builder.close_child();
                } else if is_sentence(&e) {
                    trace!("skipping empty sentence element");
                }
            }
            Event::End(e) if is_void(e.name().as_ref()) => {}
            Event::End(e) => {
                // 開いたままの子要素があっても文は閉じる
                let closes_sentence =
                    current.is_some() && e.name().as_ref().eq_ignore_ascii_case(b"sentence");
                if closes_sentence {
                    if let Some(s) = current.take().and_then(|b| b.finish(opts)) {
                        sentences.push(s);
                    }
                } else if let Some(builder) = current.as_mut() {
                    builder.close_child();
                }
            }
            Event::Text(t) => {
                if let Some(builder) = current.as_mut() {
                    builder.push_text(&decode_text(&t));
                }
            }
            Event::CData(c) => {
                if let Some(builder) = current.as_mut() {
                    builder.push_text(&String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    // 閉じタグなしで終わった場合
    if let Some(s) = current.and_then(|b| b.finish(opts)) {
        sentences.push(s);
    }
    Ok(sentences)
}

fn is_sentence(e: &BytesStart<'_>) -> bool {
    e.name().as_ref().eq_ignore_ascii_case(b"sentence")
}

fn is_void(name: &[u8]) -> bool {
    VOID_ELEMENTS.iter().any(|v| name.eq_ignore_ascii_case(v))
}

fn sentence_id(e: &BytesStart<'_>) -> Option<i64> {
    e.html_attributes()
        .flatten()
        .find(|a| a.key.as_ref().eq_ignore_ascii_case(b"id"))
        .and_then(|a| std::str::from_utf8(&a.value).ok()?.trim().parse().ok())
}

/// Entity-decoded text; raw bytes when the text holds bare `&`.
fn decode_text(t: &BytesText<'_>) -> String {
    match t.unescape() {
        Ok(s) => s.into_owned(),
        Err(_) => String::from_utf8_lossy(t).into_owned(),
    }
}

/// One word record, or `None` when malformed or filtered out.
fn parse_record(line: &str, opts: &ParseOptions) -> Option<Word> {
    let line = line.trim_end_matches('\r');
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != RECORD_FIELDS {
        if !line.trim().is_empty() {
            trace!(fields = fields.len(), "skipping malformed word record");
        }
        return None;
    }
    let stop_flag: i32 = fields[1].trim().parse().ok()?;
    if opts.remove_stop_words && stop_flag != 1 {
        return None;
    }
    let offset: i64 = match fields[2].trim().parse() {
        Ok(v) => v,
        Err(_) => {
            trace!(offset = fields[2], "skipping word record with bad offset");
            return None;
        }
    };
    let term_frequency: f64 = match fields[5].trim().parse() {
        Ok(v) if v >= 0.0 => v,
        _ => {
            trace!(tf = fields[5], "skipping word record with bad term frequency");
            return None;
        }
    };
    Some(Word {
        text: fields[0].to_string(),
        is_stop: stop_flag == -1,
        offset,
        stem: fields[3].to_lowercase(),
        pos: fields[4].to_string(),
        term_frequency,
    })
}
