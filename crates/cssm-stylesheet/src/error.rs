use cssm_common::SourcePosition;
use thiserror::Error;

/// A stylesheet that could not be turned into a node tree.
///
/// Every variant carries the 1-based position where the problem was found
/// (for unclosed constructs, the position where the construct was opened).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{}:{}: unclosed block", .pos.line, .pos.column)]
    UnclosedBlock { pos: SourcePosition },

    #[error("{}:{}: unexpected '}}'", .pos.line, .pos.column)]
    UnexpectedCloseBrace { pos: SourcePosition },

    #[error("{}:{}: unclosed comment", .pos.line, .pos.column)]
    UnclosedComment { pos: SourcePosition },

    #[error("{}:{}: unclosed string", .pos.line, .pos.column)]
    UnclosedString { pos: SourcePosition },

    #[error("{}:{}: inconsistent indentation", .pos.line, .pos.column)]
    InconsistentIndentation { pos: SourcePosition },

    #[error("{}:{}: blocks nested deeper than {limit} levels", .pos.line, .pos.column)]
    NestingTooDeep { pos: SourcePosition, limit: usize },
}

impl ParseError {
    pub fn position(&self) -> SourcePosition {
        match self {
            ParseError::UnclosedBlock { pos }
            | ParseError::UnexpectedCloseBrace { pos }
            | ParseError::UnclosedComment { pos }
            | ParseError::UnclosedString { pos }
            | ParseError::InconsistentIndentation { pos }
            | ParseError::NestingTooDeep { pos, .. } => *pos,
        }
    }
}
