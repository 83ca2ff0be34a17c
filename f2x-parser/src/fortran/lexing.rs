//! Line-level preprocessing
//!
//!     Raw source text is turned into logical statements before any classification happens.
//!     The steps run in this order:
//!
//!         1. Physical scanning: each physical line is split into code, inline comment and
//!            continuation markers (see [physical] and the [tokens] scanner it uses).
//!         2. Assembly: continued fragments are fused and pure comment lines are attached
//!            to a statement (see [logical_lines]).
//!         3. Separation: `;`-separated statements become their own logical lines
//!            (see [statements]).
//!         4. Conditional filtering: lines in the dead branch of an always-true `#if` are
//!            dropped (see [conditional]).
//!
//!     Only assembly can fail, and only on a continuation with nothing to continue.

pub mod conditional;
pub mod logical_lines;
pub mod physical;
pub mod statements;
pub mod tokens;

pub use conditional::{Charge, ConditionalFilter};
pub use logical_lines::{LineAssembler, LogicalLine};
pub use physical::{classify_physical, Fragment, PhysicalLine};
pub use statements::split_statements;
pub use tokens::{comment_start, separator_positions, tokenize, Token};
