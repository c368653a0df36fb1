pub mod repository;

pub use repository::ClonedRepository;
