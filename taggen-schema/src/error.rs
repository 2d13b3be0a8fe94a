use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::syntax::{Span, SyntaxError};

/// Result type for taggen-schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Carries the content and display name of one definition file so that
/// errors can point into it.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    pub fn lex_error(&self, error: SyntaxError) -> Box<Error> {
        Box::new(Error::Lex {
            src: self.named_source(),
            span: error.span.into(),
            message: error.message,
        })
    }

    pub fn syntax_error(&self, error: SyntaxError) -> Box<Error> {
        Box::new(Error::Syntax {
            src: self.named_source(),
            span: error.span.into(),
            message: error.message,
        })
    }

    pub fn missing_definition(&self) -> Box<Error> {
        Box::new(Error::MissingDefinition {
            src: self.named_source(),
            file: self.filename.clone(),
        })
    }

    pub fn multiple_definitions(&self, first: Span, second: Span) -> Box<Error> {
        Box::new(Error::MultipleDefinitions {
            src: self.named_source(),
            first: first.into(),
            second: second.into(),
            file: self.filename.clone(),
        })
    }

    pub fn validation_error(
        &self,
        path: impl Into<String>,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            path: path.into(),
            message: message.into(),
        })
    }

    pub fn unresolved_import(
        &self,
        module: impl Into<String>,
        span: Span,
        source: std::io::Error,
    ) -> Box<Error> {
        Box::new(Error::UnresolvedImport {
            src: self.named_source(),
            span: span.into(),
            module: module.into(),
            source,
        })
    }

    pub fn missing_export(
        &self,
        module: impl Into<String>,
        name: impl Into<String>,
        span: Span,
    ) -> Box<Error> {
        Box::new(Error::MissingExport {
            src: self.named_source(),
            span: span.into(),
            module: module.into(),
            name: name.into(),
        })
    }

    pub fn unresolvable_member(
        &self,
        expression: impl Into<String>,
        object: impl Into<String>,
        span: Span,
    ) -> Box<Error> {
        Box::new(Error::UnresolvableMember {
            src: self.named_source(),
            span: span.into(),
            expression: expression.into(),
            object: object.into(),
        })
    }

    pub fn duplicate_key(&self, key: impl Into<String>, span: Span) -> Box<Error> {
        Box::new(Error::DuplicateKey {
            src: self.named_source(),
            span: span.into(),
            key: key.into(),
        })
    }

    /// The source text covered by `span`.
    pub fn slice(&self, span: Span) -> &str {
        self.src.get(span.start..span.end).unwrap_or_default()
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(taggen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(taggen::lex_error))]
    Lex {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(code(taggen::syntax_error))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
        message: String,
    },

    #[error("no type definition exported from '{file}'")]
    #[diagnostic(
        code(taggen::missing_definition),
        help(
            "export one object literal, e.g. `export const Coord = {{ kind: 'tagged', fields: {{ x: 'Number' }} }}`"
        )
    )]
    MissingDefinition {
        #[source_code]
        src: NamedSource<String>,
        file: String,
    },

    #[error("'{file}' exports more than one type definition")]
    #[diagnostic(
        code(taggen::multiple_definitions),
        help("move each type definition into its own .type.js file")
    )]
    MultipleDefinitions {
        #[source_code]
        src: NamedSource<String>,
        #[label("first definition")]
        first: SourceSpan,
        #[label("second definition")]
        second: SourceSpan,
        file: String,
    },

    #[error("cannot resolve import '{module}'")]
    #[diagnostic(code(taggen::unresolved_import))]
    UnresolvedImport {
        #[source_code]
        src: NamedSource<String>,
        #[label("imported here")]
        span: SourceSpan,
        module: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{module}' has no export named '{name}'")]
    #[diagnostic(code(taggen::missing_export))]
    MissingExport {
        #[source_code]
        src: NamedSource<String>,
        #[label("imported here")]
        span: SourceSpan,
        module: String,
        name: String,
    },

    #[error("don't understand member expression '{expression}'")]
    #[diagnostic(
        code(taggen::unresolvable_member),
        help("'{object}' does not resolve to an object literal")
    )]
    UnresolvableMember {
        #[source_code]
        src: NamedSource<String>,
        #[label("used here")]
        span: SourceSpan,
        expression: String,
        object: String,
    },

    #[error("duplicate key '{key}'")]
    #[diagnostic(code(taggen::duplicate_key))]
    DuplicateKey {
        #[source_code]
        src: NamedSource<String>,
        #[label("defined again here")]
        span: SourceSpan,
        key: String,
    },

    #[error("{path}: {message}")]
    #[diagnostic(code(taggen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        path: String,
        message: String,
    },
}
