pub mod cli;
pub mod compare;
pub mod config;
pub mod db;
mod metrics;
pub mod person_db;
pub mod server;
pub mod vectorizer;

pub use config::Opts;
pub use person_db::{PersonDB, PersonDBBuilder};
