use std::fmt;
use std::io;

/// Errors produced at the I/O boundary of the crate.
///
/// Geometry itself does not fail; bad arguments there are programming errors
/// and panic. This type covers reading scene descriptions and writing images.
#[derive(Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    Io(io::Error),

    /// A scene description is not valid JSON, or has the wrong shape.
    Json(serde_json::Error),

    /// A scene description parsed, but describes something unrenderable.
    InvalidScene(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Json(e) => write!(f, "malformed scene description: {}", e),
            Error::InvalidScene(why) => write!(f, "invalid scene: {}", why),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::InvalidScene(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Json(e)
    }
}

#[test]
fn display_invalid_scene() {
    let e = Error::InvalidScene("wall_size must be positive".to_string());

    assert_eq!(e.to_string(), "invalid scene: wall_size must be positive");
}

#[test]
fn io_errors_keep_their_source() {
    use std::error::Error as _;

    let e: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();

    assert!(matches!(e, Error::Io(_)));
    assert!(e.source().is_some());
}

#[test]
fn json_errors_convert() {
    let parsed: std::result::Result<Vec<f64>, _> = serde_json::from_str("[1.0,");
    let e: Error = parsed.unwrap_err().into();

    assert!(matches!(e, Error::Json(_)));
}
