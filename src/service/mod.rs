pub mod service;

pub use service::CarService;
pub use service::Reply;
pub use service::Request;
pub use service::ServiceClient;
pub use service::ServicePool;
