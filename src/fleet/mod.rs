pub mod repository;

pub use repository::CarRepository;
pub use repository::InMemoryCarRepository;
