//! Source document loading for the daily planner.
//!
//! Tasks, logs and meetings live in three documents owned by other tools.
//! Each document is JSON or YAML, chosen by file extension (`.yaml`/`.yml`
//! is YAML, anything else JSON).
//!
//! # Bootstrapping
//!
//! A document that does not exist yet is created with the empty value of its
//! shape (`[]` for tasks and meetings, `{}` for logs) and that empty value is
//! returned. Loading is therefore idempotent on a fresh machine.
//!
//! # Failures
//!
//! - Unparseable text is [`StoreError::MalformedInput`].
//! - Parseable text of the wrong shape, or records with wrongly typed fields,
//!   is [`StoreError::SchemaMismatch`].
//!
//! Empty documents and documents containing only `null` load as the empty value.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dp_core::{LogBook, Meeting, PlanInputs, Task};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Document loading errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document text could not be parsed at all.
    #[error("malformed {format} in {}: {message}", path.display())]
    MalformedInput {
        path: PathBuf,
        format: DocumentFormat,
        message: String,
    },
    /// The document parsed but does not have the expected structure.
    #[error("schema mismatch in {}: {message}", path.display())]
    SchemaMismatch { path: PathBuf, message: String },
    /// Reading or bootstrapping the document failed.
    #[error("failed to {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }

    fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|err| err.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|err| err.to_string()),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

/// Top-level shape a document must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Sequence,
    Mapping,
}

impl Shape {
    const fn describe(self) -> &'static str {
        match self {
            Self::Sequence => "a sequence",
            Self::Mapping => "a mapping",
        }
    }

    const fn empty_document(self) -> &'static str {
        match self {
            Self::Sequence => "[]\n",
            Self::Mapping => "{}\n",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Sequence => value.is_array(),
            Self::Mapping => value.is_object(),
        }
    }
}

/// Locations of the three source documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pub tasks: PathBuf,
    pub logs: PathBuf,
    pub meetings: PathBuf,
}

impl DocumentPaths {
    /// The documents paired with their expected shapes.
    pub fn with_shapes(&self) -> [(&Path, Shape); 3] {
        [
            (self.tasks.as_path(), Shape::Sequence),
            (self.logs.as_path(), Shape::Mapping),
            (self.meetings.as_path(), Shape::Sequence),
        ]
    }
}

/// Loads the task list.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, StoreError> {
    load_document(path, Shape::Sequence)
}

/// Loads the day-to-entries activity log.
pub fn load_logs(path: &Path) -> Result<LogBook, StoreError> {
    load_document(path, Shape::Mapping)
}

/// Loads the meeting list.
pub fn load_meetings(path: &Path) -> Result<Vec<Meeting>, StoreError> {
    load_document(path, Shape::Sequence)
}

/// Loads all three documents, failing on the first structural error.
pub fn load_inputs(paths: &DocumentPaths) -> Result<PlanInputs, StoreError> {
    let inputs = PlanInputs {
        tasks: load_tasks(&paths.tasks)?,
        logs: load_logs(&paths.logs)?,
        meetings: load_meetings(&paths.meetings)?,
    };
    tracing::debug!(
        tasks = inputs.tasks.len(),
        log_days = inputs.logs.len(),
        meetings = inputs.meetings.len(),
        "loaded source documents"
    );
    Ok(inputs)
}

/// Creates any missing documents with their empty value.
///
/// Returns whether each document (in tasks, logs, meetings order) was created.
pub fn bootstrap(paths: &DocumentPaths) -> Result<[bool; 3], StoreError> {
    let mut created = [false; 3];
    for (slot, (path, shape)) in created.iter_mut().zip(paths.with_shapes()) {
        if !path.exists() {
            write_empty(path, shape)?;
            *slot = true;
        }
    }
    Ok(created)
}

/// Loads one document, bootstrapping it when absent.
pub fn load_document<T>(path: &Path, shape: Shape) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            write_empty(path, shape)?;
            return Ok(T::default());
        }
        Err(source) => {
            return Err(StoreError::Io {
                action: "read",
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(T::default());
    }

    let format = DocumentFormat::from_path(path);
    let value = format
        .parse(&content)
        .map_err(|message| StoreError::MalformedInput {
            path: path.to_path_buf(),
            format,
            message,
        })?;

    if value.is_null() {
        return Ok(T::default());
    }

    if !shape.matches(&value) {
        return Err(StoreError::SchemaMismatch {
            path: path.to_path_buf(),
            message: format!("expected {}, found {}", shape.describe(), describe(&value)),
        });
    }

    serde_json::from_value(value).map_err(|err| StoreError::SchemaMismatch {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn write_empty(path: &Path, shape: Shape) -> Result<(), StoreError> {
    let io_error = |action, source| StoreError::Io {
        action,
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error("create directory for", source))?;
    }
    fs::write(path, shape.empty_document()).map_err(|source| io_error("write", source))?;

    tracing::debug!(path = %path.display(), shape = shape.describe(), "bootstrapped missing document");
    Ok(())
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
