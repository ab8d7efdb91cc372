//! # PHPSLICE
//!
//! Extract the minimal file slice of a legacy PHP project.
//!
//! Given a developer-selected set of files, phpslice finds the classes they
//! use and the files they include, and resolves both to project files so the
//! slice can be lifted out of the monolith for review or migration.
//!
//! ## Pipeline
//!
//! - **Scan**: walk the project, skipping `vendor/`, VCS and IDE directories
//! - **Index**: derive a class name per file from the framework's path
//!   convention (zf1, cakephp, laravel), or from its declaration
//! - **Resolve**: extract class references and include statements from the
//!   selection and look them up in the index
//!
//! The analysis is a line-oriented heuristic, not a parser: it favors finding
//! most dependencies cheaply over proving it found all of them.

pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;

pub use crate::config::Settings;
pub use crate::core::{
    ClassIndex, DependencyResolver, DependencyResult, Framework, PrefixMapping, ProjectAnalyzer,
    ProjectSession, ProjectState,
};
pub use crate::error::{ConfigError, ScanError, SessionError};
pub use crate::parsers::{extract_includes, extract_references};
