//! Telegram bot delivery channel

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::notification::{NotificationRequest, Notifier};
use crate::shared::errors::NotifierError;
use crate::shared::types::TelegramConfig;
use crate::shared::utils::CurrencyFormat;

/// Telegram Bot API response envelope
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
    result: Option<TelegramUser>,
}

#[derive(Debug, Deserialize)]
struct TelegramUser {
    username: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: String,
    parse_mode: &'static str,
    reply_markup: InlineKeyboard<'a>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboard<'a> {
    inline_keyboard: [[InlineButton<'a>; 1]; 1],
}

#[derive(Debug, Serialize)]
struct InlineButton<'a> {
    text: &'static str,
    url: &'a str,
}

struct Session {
    bot_url: String,
}

/// Sends price drop alerts to a Telegram chat
pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
    currency: CurrencyFormat,
    session: RwLock<Option<Session>>,
}

impl TelegramNotifier {
    pub fn new(client: Client, config: TelegramConfig, currency: CurrencyFormat) -> Self {
        Self {
            client,
            config,
            currency,
            session: RwLock::new(None),
        }
    }

    /// Markdown alert text
    pub fn render_message(&self, request: &NotificationRequest) -> String {
        format!(
            "⚠️ *Queda de preço: {}* ⚠️\n\n\
             *Plataforma:* {}\n\
             *Preço atual:* {}\n\
             *Preço anterior:* {}\n\n\
             🔗 {}",
            escape_markdown(&request.game_title),
            request.platform,
            self.currency.format(request.current_price),
            self.currency.format(request.old_price),
            escape_markdown(&request.game_url)
        )
    }

    async fn call(&self, response: reqwest::Response) -> Result<TelegramResponse, NotifierError> {
        let status = response.status();
        let body: TelegramResponse = response.json().await?;
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND {
            return Err(NotifierError::Auth(
                body.description.unwrap_or_else(|| status.to_string()),
            ));
        }
        if !body.ok {
            return Err(NotifierError::Transport(
                body.description.unwrap_or_else(|| status.to_string()),
            ));
        }
        Ok(body)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<(), NotifierError> {
        let token = self
            .config
            .bot_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| NotifierError::NotConfigured("TELEGRAM_BOT_TOKEN is not defined".to_string()))?;
        let bot_url = format!("{}/bot{}", self.config.api_url.trim_end_matches('/'), token);

        let response = self.client.get(format!("{}/getMe", bot_url)).send().await?;
        let me = self.call(response).await?;
        let username = me.result.and_then(|u| u.username).unwrap_or_default();
        info!("Telegram bot @{} connected", username);

        *self.session.write().await = Some(Session { bot_url });
        Ok(())
    }

    async fn stop(&self) -> Result<(), NotifierError> {
        if self.session.write().await.take().is_none() {
            warn!("Telegram notifier stopped before it was started");
        }
        Ok(())
    }

    async fn notify(&self, request: &NotificationRequest) -> Result<(), NotifierError> {
        let chat_id = self
            .config
            .chat_id
            .ok_or_else(|| NotifierError::NotConfigured("TELEGRAM_CHAT_ID is not defined".to_string()))?;

        let session = self.session.read().await;
        let session = session.as_ref().ok_or(NotifierError::NotStarted)?;

        let message = SendMessage {
            chat_id,
            text: self.render_message(request),
            parse_mode: "Markdown",
            reply_markup: InlineKeyboard {
                inline_keyboard: [[InlineButton {
                    text: "Acesse",
                    url: &request.game_url,
                }]],
            },
        };
        let response = self
            .client
            .post(format!("{}/sendMessage", session.bot_url))
            .json(&message)
            .send()
            .await?;
        self.call(response).await?;
        Ok(())
    }
}

/// Escape characters with meaning in Telegram's legacy Markdown
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
