//! Error types shared by every glrfw module.
//!
//! Every failed precondition surfaces as an [`Error`] whose [`ErrorKind`]
//! identifies the violated contract. The error also records where the check
//! failed and, for compiler and linker failures, the driver's diagnostic text.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies which contract an operation violated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A shader source or mesh file could not be opened for reading.
    FileNotFound,
    /// The driver returned the null id when allocating a shader or program.
    CreationFailed,
    /// `create` was requested for a shader that already owns a native object.
    AlreadyCreated,
    /// An operation needed a native object but the shader has none.
    NotCreated,
    /// Compilation was requested with empty source text.
    NoSource,
    /// An uncompiled shader was handed to a program.
    NotCompiled,
    /// The shader is compiled and can no longer be modified or recompiled.
    AlreadyCompiled,
    /// The shader compiler rejected the source.
    CompileFailed,
    /// The program could not be linked.
    LinkFailed,
    /// The operation requires a linked program.
    NotLinked,
    /// The operation is only valid before the program is linked.
    AlreadyLinked,
    /// The named uniform has no location in the linked program.
    UniformNotFound,
    /// A binary mesh file ended before its declared triangle count.
    TruncatedFile,
    /// Mesh bookkeeping disagreed with itself.
    InternalInconsistency,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::FileNotFound => "file_not_found",
            ErrorKind::CreationFailed => "creation_failed",
            ErrorKind::AlreadyCreated => "already_created",
            ErrorKind::NotCreated => "not_created",
            ErrorKind::NoSource => "no_source",
            ErrorKind::NotCompiled => "not_compiled",
            ErrorKind::AlreadyCompiled => "already_compiled",
            ErrorKind::CompileFailed => "compile_failed",
            ErrorKind::LinkFailed => "link_failed",
            ErrorKind::NotLinked => "not_linked",
            ErrorKind::AlreadyLinked => "already_linked",
            ErrorKind::UniformNotFound => "uniform_not_found",
            ErrorKind::TruncatedFile => "truncated_file",
            ErrorKind::InternalInconsistency => "internal_inconsistency",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed failure carrying its kind, the failing call site and a message.
#[derive(Debug, Error)]
#[error("{kind} at {location}: {context}")]
pub struct Error {
    kind: ErrorKind,
    location: &'static str,
    context: String,
    diagnostic: Option<String>,
    #[source]
    source: Option<std::io::Error>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, location: &'static str, context: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            context: context.into(),
            diagnostic: None,
            source: None,
        }
    }

    /// Attaches compiler or linker output.
    pub(crate) fn with_diagnostic(mut self, diagnostic: impl Into<String>) -> Self {
        self.diagnostic = Some(diagnostic.into());
        self
    }

    pub(crate) fn with_io(mut self, source: std::io::Error) -> Self {
        self.source = Some(source);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// `file:line` of the check that failed.
    pub fn location(&self) -> &'static str {
        self.location
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Driver output for `CompileFailed` / `LinkFailed`, when the driver produced any.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }
}

/// Builds an [`Error`] stamped with the caller's `file:line`.
macro_rules! error {
    ($kind:expr, $($arg:tt)+) => {
        $crate::error::Error::new($kind, concat!(file!(), ":", line!()), format!($($arg)+))
    };
}

/// Returns early with an [`Error`] of `$kind` when `$cond` is false.
///
/// The message names the condition that failed, plus an optional formatted note.
macro_rules! ensure {
    ($cond:expr, $kind:expr) => {
        if !($cond) {
            return Err($crate::error::error!($kind, "failed: {}", stringify!($cond)));
        }
    };
    ($cond:expr, $kind:expr, $($arg:tt)+) => {
        if !($cond) {
            return Err($crate::error::error!(
                $kind,
                "{} (failed: {})",
                format_args!($($arg)+),
                stringify!($cond)
            ));
        }
    };
}

pub(crate) use ensure;
pub(crate) use error;
