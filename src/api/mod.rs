//! Внешний API стола.
//!
//! Здесь описываются:
//! - команды (commands.rs) — то, что приходит от клиента (начать игру, действие игрока);
//! - DTO (dto.rs) — снимок стола для фронта;
//! - ошибки (errors.rs) — то, что видит клиент;
//! - host.rs — владелец сессии, исполняющий команды.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod host;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use host::GameHost;
