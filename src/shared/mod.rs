pub mod error;
pub mod macros;
pub mod structs;

pub use error::DispatchError;
pub use structs::CarDistance;
pub use structs::CarResponse;
pub use structs::Direction;
