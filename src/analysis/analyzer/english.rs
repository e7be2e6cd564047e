use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::shingle::ShingleFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// Resume text analyzer: word tokenizer, optional lowercasing, optional
/// English stop-word removal, then word n-grams.
pub struct EnglishAnalyzer {
    inner: PipelineAnalyzer,
}

impl EnglishAnalyzer {
    /// Unigram analyzer with lowercasing and stop-word removal.
    pub fn new() -> Result<Self> {
        Self::with_options(true, true, (1, 1))
    }

    /// Build an analyzer with explicit options.
    pub fn with_options(
        lowercase: bool,
        remove_stop_words: bool,
        ngram_range: (usize, usize),
    ) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let mut analyzer = PipelineAnalyzer::new(tokenizer);
        if lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        if remove_stop_words {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::default()));
        }
        if ngram_range != (1, 1) {
            let (min, max) = ngram_range;
            analyzer = analyzer.add_filter(Arc::new(ShingleFilter::new(min, max)?));
        }

        Ok(Self {
            inner: analyzer.with_name("english"),
        })
    }
}

impl Default for EnglishAnalyzer {
    fn default() -> Self {
        Self::new().expect("English analyzer should be creatable with default settings")
    }
}

impl Analyzer for EnglishAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

impl Debug for EnglishAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnglishAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
