pub mod auth;
pub mod cli;
pub mod config;
pub mod git;
pub mod model;
pub mod progress;
pub mod resolver;
pub mod service;
pub mod workspace;

mod api;

pub use api::{Gitsnap, GitsnapBuilder};
