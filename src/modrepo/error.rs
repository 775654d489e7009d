use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] pagekit::Error),

    #[error("Duplicate module name in catalog: {0}")]
    DuplicateModule(String),

    #[error("Module not found: {0}")]
    UnknownModule(String),

    #[error("Duplicate descriptor key: {0}")]
    DuplicateKey(String),

    #[error("Descriptor key is reserved: {0}")]
    ReservedKey(String),

    #[error("Descriptor key is not a valid data attribute name: {0:?}")]
    InvalidKey(String),

    #[error("Access key '{key}' is bound to both {first} and {second}")]
    AccessKeyCollision {
        key: char,
        first: String,
        second: String,
    },

    #[error("Selectable '{selectable}' is visible for module '{module}' but resolved no link")]
    UngatedResolver { selectable: String, module: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RepoError>;
