//! TF-IDF vectorizer for text feature extraction.

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, EnglishAnalyzer};
use crate::error::{FakeResumeError, Result};
use crate::ml::MLError;

/// Vectorizer configuration. Persisted alongside the fitted vocabulary so
/// that a loaded vectorizer analyzes text exactly as it did during fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfConfig {
    /// Keep only the most frequent terms across the corpus (`None` = keep all).
    pub max_features: Option<usize>,
    /// Lowercase tokens before counting.
    pub lowercase: bool,
    /// Drop English stop words.
    pub stop_words: bool,
    /// Inclusive range of word n-gram sizes.
    pub ngram_range: (usize, usize),
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self {
            max_features: Some(100),
            lowercase: true,
            stop_words: true,
            ngram_range: (1, 2),
        }
    }
}

impl TfIdfConfig {
    fn build_analyzer(&self) -> Result<Arc<dyn Analyzer>> {
        let analyzer =
            EnglishAnalyzer::with_options(self.lowercase, self.stop_words, self.ngram_range)?;
        Ok(Arc::new(analyzer))
    }
}

/// TF-IDF vectorizer for text feature extraction.
///
/// Columns are the selected terms in lexicographic order. Transformed vectors
/// are raw counts weighted by smoothed IDF and L2-normalized.
#[derive(Clone, Serialize, Deserialize)]
#[serde(into = "TfIdfState", try_from = "TfIdfState")]
pub struct TfIdfVectorizer {
    config: TfIdfConfig,
    /// Term -> column index.
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    /// Number of documents seen during fitting.
    n_documents: usize,
    analyzer: Arc<dyn Analyzer>,
}

/// Serialized form of a vectorizer; the analyzer is rebuilt from the config.
#[derive(Serialize, Deserialize)]
struct TfIdfState {
    config: TfIdfConfig,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    n_documents: usize,
}

impl From<TfIdfVectorizer> for TfIdfState {
    fn from(vectorizer: TfIdfVectorizer) -> Self {
        TfIdfState {
            config: vectorizer.config,
            vocabulary: vectorizer.vocabulary,
            idf: vectorizer.idf,
            n_documents: vectorizer.n_documents,
        }
    }
}

impl TryFrom<TfIdfState> for TfIdfVectorizer {
    type Error = FakeResumeError;

    fn try_from(state: TfIdfState) -> Result<Self> {
        if state.vocabulary.len() != state.idf.len()
            || state.vocabulary.values().any(|&idx| idx >= state.idf.len())
        {
            return Err(FakeResumeError::serialization(
                "vectorizer vocabulary and idf table disagree",
            ));
        }
        let analyzer = state.config.build_analyzer()?;
        Ok(TfIdfVectorizer {
            config: state.config,
            vocabulary: state.vocabulary,
            idf: state.idf,
            n_documents: state.n_documents,
            analyzer,
        })
    }
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("config", &self.config)
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(config: TfIdfConfig) -> Result<Self> {
        if config.max_features == Some(0) {
            return Err(MLError::InvalidParameter {
                message: "max_features must be positive".to_string(),
            }
            .into());
        }
        let analyzer = config.build_analyzer()?;
        Ok(Self {
            config,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        })
    }

    /// Fit the vectorizer on training documents.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        if documents.is_empty() {
            return Err(MLError::InsufficientTrainingData {
                min_samples: 1,
                actual: 0,
            }
            .into());
        }

        let mut term_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();

        for doc in documents {
            let tokens = self.tokenize(doc.as_ref())?;
            let mut seen = AHashSet::new();
            for token in tokens {
                *term_frequency.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.clone()) {
                    *document_frequency.entry(token).or_insert(0) += 1;
                }
            }
        }

        if term_frequency.is_empty() {
            return Err(MLError::EmptyVocabulary.into());
        }

        // Most frequent first, ties broken lexicographically.
        let mut ranked: Vec<(String, usize)> = term_frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(limit) = self.config.max_features {
            ranked.truncate(limit);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_documents = documents.len();
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0);
                ((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
            })
            .collect();

        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();
        self.idf = idf;
        self.n_documents = n_documents;

        log::debug!(
            "fitted TF-IDF vocabulary of {} terms on {} documents",
            self.vocabulary.len(),
            n_documents
        );

        Ok(())
    }

    /// Fit on `documents` and return their feature vectors.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<Vec<f64>>> {
        self.fit(documents)?;
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    /// Transform a document into a TF-IDF feature vector.
    ///
    /// Terms outside the vocabulary are ignored; a document with no known
    /// terms maps to the zero vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(MLError::NotFitted {
                model: "TfIdfVectorizer".to_string(),
            }
            .into());
        }

        let mut features = vec![0.0; self.vocabulary.len()];
        for token in self.tokenize(document)? {
            if let Some(&idx) = self.vocabulary.get(&token) {
                features[idx] += 1.0;
            }
        }

        for (value, idf) in features.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        Ok(features)
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Whether [`fit`](Self::fit) has run.
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Terms in column order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.vocabulary.keys().map(String::as_str).collect()
    }

    /// IDF weight of `term`, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }

    pub fn config(&self) -> &TfIdfConfig {
        &self.config
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}
