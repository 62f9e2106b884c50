//! Движок стола Texas Hold'em: раздача, торговля, вскрытие, сессия стола
//! с живым игроком и автоматическими местами (эвристика / внешний сервис).

pub mod agents;
pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
