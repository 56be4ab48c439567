//! Error types
//!
//! Nothing in this crate panics or unwinds on a native failure. Construction
//! failures produce invalid objects, everything else is reported through the
//! enums below.

use thiserror::Error;

/// Error reported by the native library's global error-status channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("platform error {code:#x}: {description}")]
pub struct PlatformError {
    /// Native error code
    pub code: i32,
    /// Human readable description, possibly empty
    pub description: String,
}

impl PlatformError {
    /// The library has not been initialized
    pub const NOT_INITIALIZED: i32 = 0x0001_0001;
    /// An enum argument was invalid
    pub const INVALID_ENUM: i32 = 0x0001_0003;
    /// A value argument was invalid
    pub const INVALID_VALUE: i32 = 0x0001_0004;
    /// The requested API is unavailable
    pub const API_UNAVAILABLE: i32 = 0x0001_0006;
    /// Generic platform-specific failure
    pub const PLATFORM_ERROR: i32 = 0x0001_0008;
    /// The requested feature is not provided by the platform
    pub const FEATURE_UNAVAILABLE: i32 = 0x0001_000C;

    /// Create a new platform error
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

/// Gamma ramp validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GammaError {
    #[error("gamma ramp channels differ in length (red {red}, green {green}, blue {blue})")]
    LengthMismatch {
        /// Red channel length
        red: usize,
        /// Green channel length
        green: usize,
        /// Blue channel length
        blue: usize,
    },

    #[error("gamma ramp channels are empty")]
    Empty,

    #[error("gamma exponent must be finite and positive, got {0}")]
    InvalidExponent(f32),
}

/// Window operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("window has no native handle")]
    Invalid,

    #[error("monitor is disconnected")]
    MonitorUnusable,

    #[error("monitor reports no current video mode")]
    NoVideoMode,

    #[error("windowed creation needs an explicit size")]
    MissingSize,

    #[error("sharing window has no native handle")]
    InvalidShare,

    #[error("native window allocation failed")]
    AllocationFailed,

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Monitor operation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MonitorError {
    #[error("monitor is disconnected")]
    Disconnected,

    #[error(transparent)]
    Gamma(#[from] GammaError),

    #[error("monitor does not expose a gamma ramp")]
    GammaUnavailable,

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Native library bootstrap errors
#[derive(Error, Debug)]
pub enum InitError {
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Result alias for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Result returned by window event handlers
///
/// Errors are logged by the dispatcher and never propagated.
pub type HandlerResult = Result<(), Box<dyn std::error::Error>>;
