//! Инфраструктура вокруг движка:
//! - RNG-реализации для колоды;
//! - конфигурация внешнего источника решений из окружения.

pub mod config;
pub mod rng;

pub use config::{ConfigError, RemoteConfig};
pub use rng::*;
