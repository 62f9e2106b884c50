use crate::agents::Providers;
use crate::domain::table::TableConfig;
use crate::engine::TableSession;

use super::commands::{Command, StartGameCommand};
use super::dto::TableStateDto;
use super::errors::ApiError;

/// Владелец сессии стола: создаёт её по `StartGame`, пересоздаёт по
/// следующему `StartGame` и направляет остальные команды в текущую.
pub struct GameHost {
    config: TableConfig,
    providers: Providers,
    session: Option<TableSession>,
}

impl GameHost {
    pub fn new(config: TableConfig, providers: Providers) -> Self {
        Self {
            config,
            providers,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&TableSession> {
        self.session.as_ref()
    }

    /// Выполнить команду и вернуть снимок стола после неё.
    ///
    /// Снимок берётся сразу: ходы Scripted/Remote-мест могут ещё идти.
    pub async fn execute(&mut self, command: Command) -> Result<TableStateDto, ApiError> {
        match command {
            Command::StartGame(cmd) => self.start_game(&cmd).await,
            Command::PlayerAction(cmd) => {
                let action = cmd.to_action()?;
                let session = self.current()?;
                session.submit_human_action(action).await?;
                Ok(session.state().await)
            }
            Command::NextHand => {
                let session = self.current()?;
                session.start_next_hand().await?;
                Ok(session.state().await)
            }
            Command::GetState => Ok(self.current()?.state().await),
        }
    }

    async fn start_game(&mut self, cmd: &StartGameCommand) -> Result<TableStateDto, ApiError> {
        let seating = cmd.seating()?;
        let session = TableSession::create(self.config.clone(), seating, self.providers.clone())?;
        log::info!("new game for {}", cmd.name.trim());

        let session = self.session.insert(session);
        session.start().await?;
        Ok(session.state().await)
    }

    fn current(&self) -> Result<&TableSession, ApiError> {
        self.session.as_ref().ok_or(ApiError::NoSession)
    }
}
