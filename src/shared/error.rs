/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::fmt;

/**
 * Errors raised by the cars, the dispatcher and the car service.
 *
 * Every variant is a deterministic validation failure. Nothing is retried, and an
 * operation that fails has not mutated any car.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A floor outside the building's inclusive `[min, max]` range.
    FloorOutOfRange { floor: i8, min: i8, max: i8 },
    /// No car with this id exists in the fleet.
    CarNotFound(u8),
    /// Settings rejected at start-up.
    InvalidConfiguration(String),
    /// The configuration file could not be read or parsed.
    Config(String),
    /// The worker pool is gone or did not answer in time.
    ServiceUnavailable(String),
    /// Console input or output failed.
    Io(String),
}

impl DispatchError {
    /// Status code a request surface reports for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            DispatchError::FloorOutOfRange { .. } => 400,
            DispatchError::CarNotFound(_) => 404,
            DispatchError::ServiceUnavailable(_) => 503,
            DispatchError::InvalidConfiguration(_)
            | DispatchError::Config(_)
            | DispatchError::Io(_) => 500,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::FloorOutOfRange { floor, min, max } => write!(
                f,
                "floorNumber must be between {min} and {max} (got {floor})"
            ),
            DispatchError::CarNotFound(id) => write!(f, "Car {id} not found"),
            DispatchError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {msg}")
            }
            DispatchError::Config(msg) => write!(f, "Configuration error: {msg}"),
            DispatchError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {msg}"),
            DispatchError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<std::io::Error> for DispatchError {
    fn from(e: std::io::Error) -> Self {
        DispatchError::Io(e.to_string())
    }
}

impl From<toml::de::Error> for DispatchError {
    fn from(e: toml::de::Error) -> Self {
        DispatchError::Config(e.to_string())
    }
}
