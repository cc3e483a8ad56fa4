//! Error types with rich diagnostics using miette
//!
//! Only syntax errors are fatal. Everything else is a [`ResolveError`]
//! that the importer logs and recovers from at the offending command.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::Rule;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur during parsing. These abort the whole import.
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(pstricks::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Convert a pest error, keeping its location as a labelled span
    pub fn from_pest(ctx: &SourceContext, err: &pest::error::Error<Rule>) -> Self {
        let span = match err.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::from((pos, 0)),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::from((start, end.saturating_sub(start)))
            }
        };
        ParseError::Syntax {
            message: err.variant.message().into_owned(),
            src: ctx.named_source(),
            span,
        }
    }
}

// ============================================================================
// Resolution Errors
// ============================================================================

/// Errors raised while resolving a single command or setting.
///
/// These never abort the import: the importer logs them and keeps the
/// previous value or drops the offending shape.
#[derive(Error, Diagnostic, Debug)]
pub enum ResolveError {
    #[error("unknown color: {name}")]
    #[diagnostic(code(pstricks::resolve::unknown_color))]
    UnknownColor { name: String },

    #[error("unknown color model: {model}")]
    #[diagnostic(
        code(pstricks::resolve::unknown_color_model),
        help("supported models are rgb, RGB, gray, HTML, cmyk, cmy and hsb")
    )]
    UnknownColorModel { model: String },

    #[error("invalid {model} color values: {values:?}")]
    #[diagnostic(code(pstricks::resolve::invalid_color))]
    InvalidColorValues { model: String, values: String },

    #[error("unknown parameter: {key}")]
    #[diagnostic(code(pstricks::resolve::unknown_parameter))]
    UnknownParameter { key: String },

    #[error("invalid value for {key}: {value:?}")]
    #[diagnostic(code(pstricks::resolve::invalid_value))]
    InvalidValue { key: String, value: String },

    #[error("invalid geometry for {command}: {reason}")]
    #[diagnostic(code(pstricks::resolve::invalid_geometry))]
    InvalidGeometry { command: &'static str, reason: String },

    #[error("cannot load picture {path}")]
    #[diagnostic(code(pstricks::resolve::picture))]
    Picture {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

impl ResolveError {
    pub(crate) fn invalid_value(key: &str, value: &str) -> Self {
        ResolveError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}
