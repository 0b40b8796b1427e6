pub mod config;
pub mod extractors;
pub mod jwt;
mod middleware;
mod principal;

pub use middleware::AuthLayer;
pub use principal::Principal;
