//! Sylva Core Types and Definitions
//!
//! This crate provides the foundational types for rendering linguistic
//! syntax trees. It includes:
//!
//! - **Tree**: The labeled tree consumed by layout ([`tree::Tree`])
//! - **Labels**: Inline subscript, decoration and emphasis markup ([`label::Label`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Text measurement and drawable primitives ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod label;
pub mod tree;
