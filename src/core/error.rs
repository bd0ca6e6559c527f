//=========================================================================
// Error Types
//=========================================================================
//
// Closed error taxonomy surfaced by startup and by the stage sequence.
//
// Architecture:
//   ResourceError ──► InitError::ResourceLoad ──┐
//   VideoError / AudioError ──► InitError ──────┼──► RuntimeError ──► exit code
//   StageError ─────────────────────────────────┘
//
// Errors never get masked locally: the only local handling is the
// reverse-order release of whatever was already acquired.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== ErrorCode ===========================================================

/// Small closed set of error codes threaded through `LoopOutcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A required file could not be found or read.
    File,

    /// A file was found but its contents were unusable.
    Data,

    /// Display or audio bring-up failed.
    Video,

    /// Anything a stage raised that fits none of the above.
    Unknown,
}

impl ErrorCode {
    /// Process exit status used when this code reaches `main`.
    pub fn exit_status(self) -> u8 {
        match self {
            Self::Data => 1,
            Self::File => 3,
            Self::Video => 4,
            Self::Unknown => 255,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::File => "file",
            Self::Data => "data",
            Self::Video => "video",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

//=== ResourceError =======================================================

/// Failure to open or decode a named data resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{name} not found in any data path")]
    NotFound { name: String },

    #[error("could not read {name}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} is malformed: {reason}")]
    Data { name: String, reason: String },
}

impl ResourceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } | Self::Io { .. } => ErrorCode::File,
            Self::Data { .. } => ErrorCode::Data,
        }
    }
}

//=== Subsystem Errors ====================================================

/// The display subsystem refused the requested mode.
#[derive(Debug, Error)]
#[error("could not open a {width}x{height} display: {reason}")]
pub struct VideoError {
    pub width: u32,
    pub height: u32,
    pub reason: String,
}

/// The audio output device could not be opened.
#[derive(Debug, Error)]
#[error("could not open audio device: {reason}")]
pub struct AudioError {
    pub reason: String,
}

//=== InitError ===========================================================

/// Fatal failure while acquiring the session.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("video subsystem: {0}")]
    Video(#[from] VideoError),

    #[error("audio subsystem: {0}")]
    Audio(#[from] AudioError),

    #[error("failed to load {resource}")]
    ResourceLoad {
        resource: String,
        #[source]
        source: ResourceError,
    },
}

impl InitError {
    pub(crate) fn resource(resource: impl Into<String>, source: ResourceError) -> Self {
        Self::ResourceLoad {
            resource: resource.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Video(_) | Self::Audio(_) => ErrorCode::Video,
            Self::ResourceLoad { source, .. } => source.code(),
        }
    }
}

//=== StageError ==========================================================

/// Opaque error raised by a stage; forwarded unchanged by the orchestrator.
#[derive(Debug, Error)]
#[error("{message} ({code} error)")]
pub struct StageError {
    pub code: ErrorCode,
    pub message: String,
}

impl StageError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ResourceError> for StageError {
    fn from(err: ResourceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

//=== RuntimeError ========================================================

/// Anything that ends the process with a non-zero status.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("startup failed: {0}")]
    Init(#[from] InitError),

    #[error("stage failed: {0}")]
    Stage(#[from] StageError),
}

impl RuntimeError {
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Init(_) => 1,
            Self::Stage(err) => err.code.exit_status(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_errors_map_to_codes() {
        let missing = ResourceError::NotFound { name: "PANEL.000".into() };
        assert_eq!(missing.code(), ErrorCode::File);

        let bad = ResourceError::Data {
            name: "FONT2.0FN".into(),
            reason: "empty".into(),
        };
        assert_eq!(bad.code(), ErrorCode::Data);
    }

    #[test]
    fn init_error_names_failing_resource() {
        let err = InitError::resource(
            "FONTBIG.0FN",
            ResourceError::NotFound { name: "FONTBIG.0FN".into() },
        );
        assert!(err.to_string().contains("FONTBIG.0FN"));
        assert_eq!(err.code(), ErrorCode::File);
    }

    #[test]
    fn audio_failure_is_a_video_class_error() {
        let err = InitError::from(AudioError { reason: "no device".into() });
        assert_eq!(err.code(), ErrorCode::Video);
    }

    #[test]
    fn every_runtime_error_exits_non_zero() {
        let init = RuntimeError::from(InitError::from(VideoError {
            width: 320,
            height: 200,
            reason: "no display".into(),
        }));
        assert_ne!(init.exit_status(), 0);

        for code in [ErrorCode::File, ErrorCode::Data, ErrorCode::Video, ErrorCode::Unknown] {
            let stage = RuntimeError::from(StageError::new(code, "boom"));
            assert_ne!(stage.exit_status(), 0);
        }
    }
}
