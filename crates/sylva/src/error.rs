//! Error types for Sylva operations.
//!
//! This module provides the main error type [`SylvaError`] which wraps
//! the error conditions that can occur while laying out and rendering a tree.

use thiserror::Error;

use sylva_core::{draw::MeasureError, tree::TreeError};

/// The main error type for Sylva operations.
#[derive(Debug, Error)]
pub enum SylvaError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Text measurement error: {0}")]
    Measure(#[from] MeasureError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("cannot render an empty tree")]
    EmptyTree,
}
