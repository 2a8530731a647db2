pub mod parser;
pub mod summary;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};

/// Lower-case form used as the comparison key for stems.
/// Borrows when `stem` is already lower-case.
pub fn fold_stem(stem: &str) -> Cow<'_, str> {
    if stem.chars().any(char::is_uppercase) {
        Cow::Owned(stem.to_lowercase())
    } else {
        Cow::Borrowed(stem)
    }
}

/// One annotated token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub is_stop: bool,
    pub offset: i64,
    /// lower-cased at parse time
    pub stem: String,
    pub pos: String,
    /// `>= 0`
    pub term_frequency: f64,
}

impl Word {
    pub fn new(text: &str, stem: &str, term_frequency: f64) -> Self {
        Self {
            text: text.to_string(),
            is_stop: false,
            offset: 0,
            stem: stem.to_lowercase(),
            pos: String::new(),
            term_frequency: term_frequency.max(0.0),
        }
    }

    /// case-insensitive stem comparison
    #[inline]
    pub fn stem_eq(&self, stem: &str) -> bool {
        fold_stem(&self.stem) == fold_stem(stem)
    }
}

/// A sentence with its retained words, never empty once inside a `Document`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: i64,
    pub text: String,
    pub words: Vec<Word>,
}

impl Sentence {
    pub fn new(id: i64, text: impl Into<String>, words: Vec<Word>) -> Self {
        Self {
            id,
            text: text.into(),
            words,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn stems(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.stem.as_str())
    }

    /// Adjacent `(prev, current)` stem pairs, within this sentence only.
    pub fn bigrams(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words
            .windows(2)
            .map(|pair| (pair[0].stem.as_str(), pair[1].stem.as_str()))
    }

    pub fn contains_stem(&self, stem: &str) -> bool {
        self.words.iter().any(|w| w.stem_eq(stem))
    }
}

/// A source document. `sentences[0]` is the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentParts")]
pub struct Document {
    pub id: String,
    sentences: Vec<Sentence>,
}

/// deserialized form, checked by `Document::new`
#[derive(Deserialize)]
struct DocumentParts {
    id: String,
    sentences: Vec<Sentence>,
}

impl TryFrom<DocumentParts> for Document {
    type Error = FeatureError;

    fn try_from(parts: DocumentParts) -> Result<Self> {
        Document::new(parts.id, parts.sentences)
    }
}

impl Document {
    /// Empty sentences are dropped; a document left with none is an error.
    pub fn new(id: impl Into<String>, sentences: Vec<Sentence>) -> Result<Self> {
        let id = id.into();
        let sentences: Vec<Sentence> = sentences.into_iter().filter(|s| !s.is_empty()).collect();
        if sentences.is_empty() {
            return Err(FeatureError::EmptyDocument { id });
        }
        Ok(Self { id, sentences })
    }

    #[inline]
    pub fn title(&self) -> &Sentence {
        &self.sentences[0]
    }

    /// Sentences after the title, in document order.
    #[inline]
    pub fn body(&self) -> &[Sentence] {
        &self.sentences[1..]
    }

    /// All sentences, title included.
    #[inline]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn contains_stem(&self, stem: &str) -> bool {
        self.sentences.iter().any(|s| s.contains_stem(stem))
    }
}

/// All documents of one topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of non-title sentences over every document.
    pub fn body_sentence_num(&self) -> usize {
        self.documents.iter().map(|d| d.body().len()).sum()
    }

    /// (document, body sentence) pairs in emission order
    pub fn body_sentences(&self) -> impl Iterator<Item = (&Document, &Sentence)> {
        self.documents
            .iter()
            .flat_map(|d| d.body().iter().map(move |s| (d, s)))
    }
}
