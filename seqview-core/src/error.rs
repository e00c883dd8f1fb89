//! Error handling for seqview layout

use crate::types::GenomicPos;
use thiserror::Error;

/// Errors raised at the validation boundary of the layout engine.
///
/// Layout itself never fails: degenerate inputs produce empty glyphs. These
/// variants only come from building a coordinate space or moving its
/// windows. Configuration files report through `anyhow` with file context.
#[derive(Error, Debug)]
pub enum SeqviewError {
    #[error("Invalid window {begin}..{end}: {message}")]
    InvalidWindow {
        begin: GenomicPos,
        end: GenomicPos,
        message: String,
    },

    #[error("Invalid sequence length: {length}")]
    InvalidSequenceLength { length: GenomicPos },

    #[error("Invalid column layout: {message}")]
    InvalidColumns { message: String },

}

impl SeqviewError {
    pub fn invalid_window<S: Into<String>>(begin: GenomicPos, end: GenomicPos, message: S) -> Self {
        Self::InvalidWindow {
            begin,
            end,
            message: message.into(),
        }
    }

    pub fn invalid_sequence_length(length: GenomicPos) -> Self {
        Self::InvalidSequenceLength { length }
    }

    pub fn invalid_columns<S: Into<String>>(message: S) -> Self {
        Self::InvalidColumns {
            message: message.into(),
        }
    }
}

/// Result type for seqview operations
pub type Result<T> = std::result::Result<T, SeqviewError>;
