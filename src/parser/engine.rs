//! Language versions, parser engines, and strategy selection
//!
//! A [`ParserStrategy`] is the resolved pair of a [`LanguageVersion`] and a
//! [`ParserEngine`]. It owns the version's [`Features`] and is the only thing
//! the orchestrator calls to turn a buffer into a tree plus tokens.

use std::fmt;
use std::str::FromStr;

use rowan::GreenNode;
use tracing::trace;

use super::errors::{DiagnosticsEngine, SyntaxError};
use super::lexer::{LexToken, Lexer};
use super::parser::parse_tokens;
use crate::base::SourceBuffer;
use crate::error::ConfigurationError;

/// A Rill language release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageVersion {
    major: u8,
    minor: u8,
}

impl LanguageVersion {
    pub const V1_0: Self = Self { major: 1, minor: 0 };
    pub const V1_1: Self = Self { major: 1, minor: 1 };
    pub const V1_2: Self = Self { major: 1, minor: 2 };
    pub const V2_0: Self = Self { major: 2, minor: 0 };
    pub const V2_1: Self = Self { major: 2, minor: 1 };

    /// Every known release, oldest first
    pub const SUPPORTED: [Self; 5] = [Self::V1_0, Self::V1_1, Self::V1_2, Self::V2_0, Self::V2_1];

    pub const LATEST: Self = Self::V2_1;

    /// Look up a known release.
    pub fn new(major: u8, minor: u8) -> Result<Self, ConfigurationError> {
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|v| v.major == major && v.minor == minor)
            .ok_or_else(|| ConfigurationError::UnknownVersion(format!("{}.{}", major, minor)))
    }

    pub fn major(self) -> u8 {
        self.major
    }

    pub fn minor(self) -> u8 {
        self.minor
    }

    /// Syntax available in this release
    pub fn features(self) -> Features {
        Features {
            squiggly_heredoc: self >= Self::V1_1,
            safe_navigation: self >= Self::V1_2,
            endless_def: self >= Self::V2_0,
        }
    }
}

impl Default for LanguageVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for LanguageVersion {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ConfigurationError::UnknownVersion(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(unknown)?;
        let major = major.parse::<u8>().map_err(|_| unknown())?;
        let minor = minor.parse::<u8>().map_err(|_| unknown())?;
        Self::new(major, minor).map_err(|_| unknown())
    }
}

/// Version-gated syntax switches consulted by the lexer and the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Features {
    /// `<<~ID` heredocs
    pub squiggly_heredoc: bool,
    /// `recv&.method`
    pub safe_navigation: bool,
    /// `def name(args) = expr`
    pub endless_def: bool,
}

impl Features {
    pub fn all() -> Self {
        LanguageVersion::LATEST.features()
    }
}

/// Parser engine family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParserEngine {
    /// Stops at the first syntax error; supports every release
    #[default]
    Classic,
    /// Keeps going after errors and returns a partial tree; 2.x only
    Recovering,
}

impl ParserEngine {
    pub const ALL: [Self; 2] = [Self::Classic, Self::Recovering];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Recovering => "recovering",
        }
    }

    pub fn supported_versions(self) -> &'static [LanguageVersion] {
        match self {
            Self::Classic => &LanguageVersion::SUPPORTED,
            Self::Recovering => &LanguageVersion::SUPPORTED[3..],
        }
    }

    pub fn supports(self, version: LanguageVersion) -> bool {
        self.supported_versions().contains(&version)
    }
}

impl fmt::Display for ParserEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParserEngine {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|engine| engine.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownEngine(s.to_string()))
    }
}

/// Output of a successful tokenize call
#[derive(Debug, Clone)]
pub struct Tokenized<'s> {
    /// Root `SOURCE_FILE` node; may contain no statements
    pub ast: GreenNode,
    /// Every lexed token in emission order, trivia included
    pub tokens: Vec<LexToken<'s>>,
}

/// A parser resolved for one (version, engine) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserStrategy {
    Classic {
        version: LanguageVersion,
        features: Features,
    },
    Recovering {
        version: LanguageVersion,
        features: Features,
    },
}

impl ParserStrategy {
    /// Resolve the strategy for `engine` at `version`.
    pub fn select(
        version: LanguageVersion,
        engine: ParserEngine,
    ) -> Result<Self, ConfigurationError> {
        if !engine.supports(version) {
            let supported = engine
                .supported_versions()
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ConfigurationError::UnsupportedVersion {
                engine: engine.as_str(),
                version: version.to_string(),
                supported,
            });
        }

        let features = version.features();
        Ok(match engine {
            ParserEngine::Classic => Self::Classic { version, features },
            ParserEngine::Recovering => Self::Recovering { version, features },
        })
    }

    pub fn engine(&self) -> ParserEngine {
        match self {
            Self::Classic { .. } => ParserEngine::Classic,
            Self::Recovering { .. } => ParserEngine::Recovering,
        }
    }

    pub fn version(&self) -> LanguageVersion {
        match self {
            Self::Classic { version, .. } | Self::Recovering { version, .. } => *version,
        }
    }

    pub fn features(&self) -> Features {
        match self {
            Self::Classic { features, .. } | Self::Recovering { features, .. } => *features,
        }
    }

    /// Lex and parse `buffer`, streaming diagnostics into `diagnostics` in
    /// source order.
    ///
    /// The classic engine makes every error fatal, so the first error ends
    /// the call with `Err`. Both engines stop on a `Fatal` diagnostic.
    pub fn tokenize<'s>(
        &self,
        buffer: &'s SourceBuffer,
        diagnostics: &mut DiagnosticsEngine<'_>,
    ) -> Result<Tokenized<'s>, SyntaxError> {
        diagnostics.set_all_errors_are_fatal(matches!(self, Self::Classic { .. }));

        let lexed = Lexer::new(buffer.source(), self.features()).tokenize();
        let parse = parse_tokens(&lexed.textual(), self.features());
        trace!(
            engine = self.engine().as_str(),
            version = %self.version(),
            tokens = lexed.tokens.len(),
            "tokenized buffer"
        );

        let mut reported = lexed.diagnostics;
        reported.extend(parse.diagnostics);
        reported.sort_by_key(|d| d.range.start());
        for diagnostic in reported {
            diagnostics.process(diagnostic)?;
        }

        Ok(Tokenized {
            ast: parse.green,
            tokens: lexed.tokens,
        })
    }
}
