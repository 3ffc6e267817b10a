//! Parse configuration passed explicitly to every construction call.

use crate::error::ConfigurationError;
use crate::parser::{LanguageVersion, ParserEngine, ParserStrategy};

/// Which Rill release to parse and which engine to parse it with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParseOptions {
    pub language_version: LanguageVersion,
    pub engine: ParserEngine,
}

impl ParseOptions {
    pub fn new(language_version: LanguageVersion, engine: ParserEngine) -> Self {
        Self {
            language_version,
            engine,
        }
    }

    /// Options from string tags such as `"1.2"` and `"recovering"`
    pub fn from_tags(version: &str, engine: &str) -> Result<Self, ConfigurationError> {
        Ok(Self::new(version.parse()?, engine.parse()?))
    }

    pub fn with_version(mut self, language_version: LanguageVersion) -> Self {
        self.language_version = language_version;
        self
    }

    pub fn with_engine(mut self, engine: ParserEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Resolve the parser strategy, failing on an unsupported pair.
    pub fn strategy(&self) -> Result<ParserStrategy, ConfigurationError> {
        ParserStrategy::select(self.language_version, self.engine)
    }
}
