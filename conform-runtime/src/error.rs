use conform_shared::TypeTag;
use thiserror::Error;

use crate::runtime::Symbol;

/// Usage errors. Every query is total for valid input, so anything returned
/// here means the caller handed the runtime something it cannot work with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConformanceError {
    #[error("symbol {0} is not bound")]
    UnknownSymbol(Symbol),
    #[error("no class or module named `{0}`")]
    UnknownName(String),
    #[error("`{0}` is not a module")]
    NotAModule(String),
    #[error("`{0}` is not a class")]
    NotAClass(String),
    #[error("`{0}` is not an interface")]
    NotAnInterface(String),
    #[error("`{0}` is already defined")]
    DuplicateDefinition(String),
    #[error("interface `{0}` cannot gain new methods")]
    InterfaceSealed(String),
    #[error("undefined method `{method}` for {class}")]
    NoMethod { class: String, method: String },
    #[error("private method `{method}` called for {class}")]
    PrivateMethod { class: String, method: String },
    #[error("wrong number of arguments for `{method}` (given {found}, expected {expected})")]
    ArityMismatch {
        method: String,
        expected: usize,
        found: usize,
    },
    #[error("argument {index} of `{method}` should be {expected}, found {found}")]
    TypeMismatch {
        method: String,
        index: usize,
        expected: TypeTag,
        found: TypeTag,
    },
}

pub type ConformanceResult<T> = Result<T, ConformanceError>;
