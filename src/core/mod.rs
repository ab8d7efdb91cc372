pub mod analyzer;
pub mod index;
pub mod model;
pub mod resolver;
pub mod scanner;
pub mod session;

pub use analyzer::{ProjectAnalyzer, ProjectState, ScanSummary};
pub use index::{ClassIndex, IndexBuilder};
pub use model::{
    ClassReference, Dependency, DependencyResult, Framework, IncludeItem, IncludeKind,
    IncludeReference, PrefixMapping, ReferenceKind, SourceFile,
};
pub use resolver::{DependencyResolver, LEGACY_RETRY_PREFIXES};
pub use scanner::{FileScanner, ScannedTree};
pub use session::ProjectSession;
