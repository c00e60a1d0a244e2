// File: src/error.rs
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failure of the word tokenizer.
#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("failed to start tokenizer `{bin}`: {source}")]
    Spawn {
        bin: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("tokenizer i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("tokenizer exited with {status}: {stderr}")]
    Exit { status: ExitStatus, stderr: String },

    #[error("tokenizer produced invalid utf-8 output")]
    InvalidOutput(#[from] std::string::FromUtf8Error),
}

/// Failure writing a model's word counts to disk.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode model file {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

/// Failure reading a persisted model.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode model file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Decode { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("classifier is training")]
    TrainingInProgress,

    #[error("classifier has been removed")]
    Removed,

    #[error("tokenize text: {0}")]
    Tokenize(#[from] TokenizeError),

    #[error("save classifier: {0}")]
    Save(#[from] SaveError),
}

impl TrainError {
    /// True when the same call may succeed once the running training finishes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TrainError::TrainingInProgress)
    }
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classifier is training")]
    TrainingInProgress,

    #[error("tokenize text: {0}")]
    Tokenize(#[from] TokenizeError),

    #[error("text contains no usable words")]
    EmptyInput,

    #[error("classifier has no training data")]
    NoTrainingData,
}

impl ClassifyError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClassifyError::TrainingInProgress)
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid classifier id {0:?}")]
    InvalidId(String),

    #[error("classifier {0:?} not found")]
    NotFound(String),

    #[error("classifier {0:?} is training")]
    TrainingInProgress(String),

    #[error("remove classifier {id:?} file: {source}")]
    Remove {
        id: String,
        #[source]
        source: io::Error,
    },

    #[error("scan data directory {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),
}

impl RegistryError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, RegistryError::TrainingInProgress(_))
    }
}
