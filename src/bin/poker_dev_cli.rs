// src/bin/poker_dev_cli.rs
//
// Терминальный стол: один живой игрок (stdin) против CPU/Gemini-мест.
// Запуск: poker_dev_cli [--name You] [--cpu-players 2] [--gemini-players 1]

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use holdem_table::agents::{Providers, RemoteSource};
use holdem_table::api::{
    ApiError, Command, GameHost, PlayerActionCommand, StartGameCommand, TableStateDto,
};
use holdem_table::domain::card::format_cards;
use holdem_table::domain::table::TableConfig;
use holdem_table::infra::RemoteConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hold'em table in the terminal", long_about = None)]
struct Args {
    /// Имя живого игрока.
    #[arg(long, default_value = "You")]
    name: String,

    #[arg(long, default_value_t = 2)]
    cpu_players: usize,

    /// Места с внешним сервисом; без GOOGLE_API_KEY они убираются.
    #[arg(long, default_value_t = 1)]
    gemini_players: usize,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Args {
        name,
        cpu_players,
        gemini_players,
    } = Args::parse();

    let providers = build_providers();
    let mut host = GameHost::new(TableConfig::default(), providers);

    println!("poker_dev_cli: стол на {} мест(а)…", 1 + cpu_players + gemini_players);

    let start = Command::StartGame(StartGameCommand {
        name,
        cpu_players,
        gemini_players,
    });
    if let Err(e) = host.execute(start).await {
        println!("[CLI] Не удалось начать игру: {e}");
        return;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if let Some(session) = host.session() {
            session.settle().await;
        }

        let state = match host.execute(Command::GetState).await {
            Ok(state) => state,
            Err(e) => {
                println!("[CLI] {e}");
                return;
            }
        };
        print_state(&state);

        let command = if state.waiting_for_human {
            prompt("Ваш ход (fold / check / call / raise <сумма> / all-in, q – выход): ");
            let Ok(Some(line)) = lines.next_line().await else { return };
            if line.trim() == "q" {
                return;
            }
            match parse_action_line(&line) {
                Some(cmd) => Command::PlayerAction(cmd),
                None => {
                    println!("[CLI] Не понял команду: {:?}", line.trim());
                    continue;
                }
            }
        } else if !state.hand_in_progress {
            prompt("Следующая раздача? [Enter – да, q – выход]: ");
            let Ok(Some(line)) = lines.next_line().await else { return };
            if line.trim() == "q" {
                return;
            }
            Command::NextHand
        } else {
            continue;
        };

        match host.execute(command).await {
            Ok(_) => {}
            Err(ApiError::InvalidCommand(msg)) => {
                println!("[CLI] {msg}");
                if !state.waiting_for_human {
                    // Раздачу начать нельзя: за столом меньше двух игроков с фишками.
                    return;
                }
            }
            Err(e) => println!("[CLI] Ошибка: {e}"),
        }
    }
}

/// Scripted всегда; Remote – только если есть ключ.
fn build_providers() -> Providers {
    let providers = Providers::scripted_only();
    match RemoteConfig::from_env().map(RemoteSource::new) {
        Ok(Ok(remote)) => {
            println!("[CLI] Gemini-игроки используют модель {}", remote.model());
            providers.with_remote(Arc::new(remote))
        }
        Ok(Err(e)) => {
            println!("[CLI] HTTP-клиент не создан ({e}); Gemini-места будут убраны.");
            providers
        }
        Err(e) => {
            println!("[CLI] {e}");
            providers
        }
    }
}

fn parse_action_line(line: &str) -> Option<PlayerActionCommand> {
    let mut parts = line.split_whitespace();
    let action = parts.next()?.to_string();
    let amount = parts.next().and_then(|s| s.parse::<f64>().ok());
    Some(PlayerActionCommand { action, amount })
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}

fn print_state(state: &TableStateDto) {
    println!();
    println!("================ TABLE STATE ================");
    println!(
        "stage={} pot={} (with bets {}) current_bet={}",
        state.game_stage, state.pot, state.pot_total, state.current_bet
    );
    if state.community_cards.is_empty() {
        println!("board: -");
    } else {
        println!("board: {}", format_cards(&state.community_cards));
    }

    println!("players:");
    for seat in &state.seats {
        let marker = if state.current_player == Some(seat.seat_index) && state.hand_in_progress {
            "->"
        } else {
            "  "
        };
        let hand = match &seat.hand {
            Some(cards) if !cards.is_empty() => format_cards(cards),
            Some(_) => "-".to_string(),
            None => "?? ??".to_string(),
        };
        let status = if seat.folded {
            " (fold)"
        } else if seat.all_in {
            " (all-in)"
        } else {
            ""
        };
        println!(
            "{marker} [{}] {:<10} chips={:<6} bet={:<5} {}{}",
            seat.seat_index, seat.name, seat.chips, seat.current_bet, hand, status
        );
    }

    println!("log:");
    for line in &state.log {
        println!("   {line}");
    }
    println!("=============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_defaults() {
        let args = Args::try_parse_from(["poker_dev_cli"]).unwrap();
        assert_eq!(args.name, "You");
        assert_eq!(args.cpu_players, 2);
        assert_eq!(args.gemini_players, 1);
    }

    #[test]
    fn args_reject_bad_counts() {
        assert!(Args::try_parse_from(["poker_dev_cli", "--cpu-players", "x"]).is_err());
        assert!(Args::try_parse_from(["poker_dev_cli", "--gemini-players", "-1"]).is_err());

        let args =
            Args::try_parse_from(["poker_dev_cli", "--name", "Alice", "--cpu-players", "4"]).unwrap();
        assert_eq!(args.name, "Alice");
        assert_eq!(args.cpu_players, 4);
    }
}
