//! # hsreduce - Reducing a Pattern-Rich Functional Language to Lambda Terms
//!
//! `hsreduce` takes programs written in a small Haskell-like language ("complex
//! Haskell") and drives them to normal form through three successive
//! representations:
//!
//! 1. **Surface AST** (`ast`) - multi-clause functions, multi-pattern lambdas,
//!    `case`, mutually recursive `let` groups and algebraic data declarations
//! 2. **Core AST** (`core`) - the simple language: single-variable lambdas,
//!    branches, tuples, applications, variables, constants and single-binding `let`
//! 3. **Lambda terms** (`lambda`) - the untyped lambda calculus extended with a
//!    pluggable set of primitive ("delta") operations
//!
//! ## Pipeline Flow
//!
//! ```text
//! Program + Expression (surface AST, built by an external parser)
//!     ↓
//! [Variable scan]        → VariableManager (fresh names never collide)
//!     ↓
//! [Clause fusion]        → one lambda + case per function name
//!     ↓
//! [Elaboration]          → curried lambdas, no pattern lambdas, no case, flat lets
//!     ↓
//! [Group nesting]        → one declaration per let, dependency ordered
//!     ↓
//! [Elaboration again]    → fused tuple bindings flattened
//!     ↓
//! [Lowering]             → core::CoreExpr (or PipelineError::TooComplex)
//!     ↓
//! [Cast]                 → lambda::Term
//!     ↓
//! [Reduction]            → beta + delta rules until weak head normal form
//! ```
//!
//! The type checker (`types`) works on the final lambda terms and knows about the
//! data declarations registered with it.
//!
//! ## Module Structure
//!
//! - [`ast`] - Surface AST definitions and variable computation
//! - [`names`] - Fresh variables and synthetic primitive names
//! - [`primitive`] - The closed set of primitive operators
//! - [`desugar`] - Rewrite rules, dependency grouping and the pipeline
//! - [`core`] - The simple language and the lowering into it
//! - [`lambda`] - Lambda terms, substitution, reduction and the final cast
//! - [`delta`] - Delta rules giving the primitives their meaning
//! - [`types`] - Data declaration registry and type inference
//! - [`fmt`] - Pretty-printing for all three tree levels
//! - [`config`] - Pipeline and reduction options
//! - [`trace`] - Pass observers
//!
//! ## Example
//!
//! ```text
//! square x = mult x x
//! fact 0 = 1
//! fact x = mult (fact (minus x 1)) x
//!
//! square (fact 3)   ==>   36
//! ```

pub mod ast;
pub mod config;
pub mod core;
pub mod delta;
pub mod desugar;
pub mod error;
pub mod fmt;
pub mod lambda;
pub mod names;
pub mod primitive;
pub mod trace;
pub mod types;

pub use desugar::{Pipeline, reduce_program_and_expression};
pub use error::PipelineError;
pub use lambda::reduce::{whno_reduce, whno_step};
pub use types::TypeChecker;
