//! Parse error type.

/// Malformed directive or title syntax.
///
/// Every variant carries the 1-based line the problem was found on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// `.. toctree` without the trailing `::`.
    #[error("line {line}: malformed toctree directive `{text}`")]
    MalformedDirective { line: usize, text: String },

    /// `.. toctree:: something`: toctree takes no arguments.
    #[error("line {line}: toctree takes no arguments, found `{argument}`")]
    UnexpectedArgument { line: usize, argument: String },

    /// Option line that is not `:name:` or `:name: value`.
    #[error("line {line}: malformed option `{text}`")]
    MalformedOption { line: usize, text: String },

    /// Known option with an unusable value.
    #[error("line {line}: invalid value `{value}` for option `{name}`")]
    InvalidOptionValue {
        line: usize,
        name: String,
        value: String,
    },

    /// Same option given twice in one block.
    #[error("line {line}: duplicate option `{name}`")]
    DuplicateOption { line: usize, name: String },

    /// Entries start right after the marker or options.
    #[error("line {line}: expected blank line before toctree entries")]
    MissingBlankLine { line: usize },

    /// Entry indented differently from the first entry.
    #[error("line {line}: inconsistent indentation in toctree entries")]
    InconsistentIndentation { line: usize },

    /// Section title overline with no matching underline.
    #[error("line {line}: title overline has no matching underline")]
    UnterminatedTitle { line: usize },
}

impl ParseError {
    /// 1-based line the error refers to.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedDirective { line, .. }
            | Self::UnexpectedArgument { line, .. }
            | Self::MalformedOption { line, .. }
            | Self::InvalidOptionValue { line, .. }
            | Self::DuplicateOption { line, .. }
            | Self::MissingBlankLine { line }
            | Self::InconsistentIndentation { line }
            | Self::UnterminatedTitle { line } => *line,
        }
    }
}
