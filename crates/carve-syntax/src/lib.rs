//! Lossless, mutable syntax tree with attached trivia.
//!
//! Terminals own the whitespace around them, so walking the tree in pre-order
//! reproduces the source byte for byte. Nodes exclusively own their children
//! and may be relabelled or edited after parsing.

/// Typed views over the raw syntax tree.
pub mod ast;
mod number;
mod syntax_kind;
mod syntax_set;
mod tree;
mod trivia;
mod walk;

/// Parsed value of a numeric literal.
pub use number::Number;
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Primary tree API.
pub use tree::{NodeOrToken, SyntaxNode, SyntaxToken};
/// Trivia pieces attached to tokens.
pub use trivia::{Trivia, TriviaPiece, TriviaPieceKind};
pub use walk::{Preorder, WalkEvent};
