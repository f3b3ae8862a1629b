use thiserror::Error;

#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("no organization exists")]
    EmptyTree,

    #[error("no employee with id {0}")]
    NotFound(u32),

    #[error("employee id {0} already exists")]
    DuplicateId(u32),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to access hierarchy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid hierarchy format at line {line}: {reason}")]
    ParseFailure {
        line: usize,
        reason: String,
    },
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;
