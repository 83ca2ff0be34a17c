//! # f2x-parser
//!
//! Front end of the f2x transpiler. It reads a legacy fixed/free-form Fortran dialect and
//! recovers a block-structured syntax tree whose statements are kept as opaque text plus a
//! best-effort symbolic tag, ready for a code-emission backend.
//!
//! File Layout
//!
//! src/fortran
//!   ├── lexing       Physical lines to logical statements, conditional-compilation filter
//!   ├── parsing      Rule table classifier and the block stack automaton
//!   ├── ast          Node model, lookup, graph and snapshot views
//!   ├── formats      Text dump, treeviz, dot, json and yaml renderers
//!   └── transforms   Composable stages and tree rewriting (pruning)
//!
//! For testing guidelines, see the [testing module](fortran::testing).

pub mod fortran;
