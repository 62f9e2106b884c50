use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::card::format_cards;
use crate::domain::Chips;
use crate::engine::actions::{ActionKind, PlayerAction};
use crate::infra::config::RemoteConfig;

use super::{DecisionError, DecisionRequest, DecisionSource};

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Ожидаемый JSON в тексте ответа: `{ "action": "...", "amount": ... }`.
#[derive(Deserialize)]
struct RemoteReply {
    action: Option<String>,
    #[serde(default)]
    amount: Option<serde_json::Value>,
}

/// Игрок на внешнем сервисе рассуждений (Gemini generateContent).
pub struct RemoteSource {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl RemoteSource {
    pub fn new(config: RemoteConfig) -> Result<Self, DecisionError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl DecisionSource for RemoteSource {
    async fn decide(&self, request: &DecisionRequest) -> Result<PlayerAction, DecisionError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(request),
                }],
            }],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DecisionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| DecisionError::Malformed("пустой ответ".into()))?;

        log::debug!("remote decision for {}: {}", request.name, text.trim());
        parse_reply(text, request)
    }
}

/// Текст подсказки: состояние игры + допустимые действия + формат ответа.
pub fn build_prompt(request: &DecisionRequest) -> String {
    let community = if request.community_cards.is_empty() {
        "None".to_string()
    } else {
        format_cards(&request.community_cards)
    };
    let seats = serde_json::to_string_pretty(&request.seats).unwrap_or_else(|_| "[]".into());

    format!(
        r#"You are a professional Texas Hold'em poker player. Analyze the game state and output your best action in JSON format.
Game State:
- Stage: {stage}
- Your Hand: {hand}
- Community Cards: {community}
- Total Pot: {pot}
- Your current bet in this round: {own_bet}
- Amount to call: {to_call}
- Your remaining chips: {chips}
- Player States: {seats}

Your possible actions:
- `fold`: Forfeit the round.
- `check`: Bet nothing (only if no call is required).
- `call`: Match the current bet.
- `raise`: Increase the bet. Specify the total amount in the `amount` field. Minimum raise to: {min_raise}.
- `all-in`: Bet all your remaining chips.

Output only the JSON object.
{{ "action": "...", "amount": ... }}"#,
        stage = request.stage,
        hand = format_cards(&request.hole_cards),
        pot = request.pot,
        own_bet = request.own_bet,
        to_call = request.amount_to_call,
        chips = request.own_chips,
        min_raise = request.min_raise_to,
    )
}

/// Вырезать JSON между первой `{` и последней `}` и превратить в действие.
///
/// `check` при ненулевом долге заменяется на `call`: иначе место
/// бесконечно «чекает» и раунд не закрывается.
pub fn parse_reply(text: &str, request: &DecisionRequest) -> Result<PlayerAction, DecisionError> {
    let (start, end) = match (text.find('{'), text.rfind('}')) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => return Err(DecisionError::Malformed(format!("нет JSON в ответе: {text:?}"))),
    };

    let reply: RemoteReply = serde_json::from_str(&text[start..=end])
        .map_err(|e| DecisionError::Malformed(e.to_string()))?;

    let raw_action = reply
        .action
        .ok_or_else(|| DecisionError::Malformed("нет поля action".into()))?;
    let mut kind: ActionKind = raw_action
        .parse()
        .map_err(|_| DecisionError::UnknownAction(raw_action.clone()))?;

    if kind == ActionKind::Check && !request.amount_to_call.is_zero() {
        kind = ActionKind::Call;
    }

    let amount = match kind {
        ActionKind::Raise => reply.amount.as_ref().and_then(amount_from_json),
        _ => None,
    };

    Ok(PlayerAction::new(kind, amount))
}

fn amount_from_json(value: &serde_json::Value) -> Option<Chips> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.round() as u64))
            .map(Chips),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok().map(Chips),
        _ => None,
    }
}
