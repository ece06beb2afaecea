//! Minimal Telegram Bot API client.
//!
//! Only the three calls the moderation flow needs are implemented:
//! `sendMessage` with an inline keyboard, `editMessageText` and
//! `answerCallbackQuery`. Every call is a single attempt; callers decide
//! what a failure means.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// HTTP timeout for a single Bot API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default Bot API base URL.
const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Bot API description returned when an edit would not change the message.
const NOT_MODIFIED: &str = "message is not modified";

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// Network, DNS, timeout or body decoding failure.
    #[error("Telegram request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Bot API answered `ok: false`.
    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },
}

impl TelegramError {
    /// Whether an edit failed only because the text was already identical.
    pub fn is_not_modified(&self) -> bool {
        matches!(self, TelegramError::Api { description, .. } if description.contains(NOT_MODIFIED))
    }
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Chat where moderation prompts are posted.
    pub chat_id: i64,
    pub api_base: String,
    /// Expected `X-Telegram-Bot-Api-Secret-Token` on webhook calls.
    pub webhook_secret: Option<String>,
}

impl TelegramConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both the bot token and a numeric chat id are
    /// set, which disables chat moderation.
    ///
    /// | Variable                  | Required | Default                    |
    /// |---------------------------|----------|----------------------------|
    /// | `TELEGRAM_BOT_TOKEN`      | yes      |                            |
    /// | `TELEGRAM_CHAT_ID`        | yes      |                            |
    /// | `TELEGRAM_API_BASE`       | no       | `https://api.telegram.org` |
    /// | `TELEGRAM_WEBHOOK_SECRET` | no       |                            |
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = match std::env::var("TELEGRAM_CHAT_ID").ok()?.trim().parse() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!("TELEGRAM_CHAT_ID is not a number, chat moderation disabled");
                return None;
            }
        };
        Some(Self {
            bot_token,
            chat_id,
            api_base: std::env::var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            webhook_secret: std::env::var("TELEGRAM_WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Incoming webhook update. Only callback queries are of interest.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub callback_query: Option<CallbackQuery>,
}

/// A press of an inline keyboard button.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: Option<User>,
    /// The message carrying the pressed button.
    pub message: Option<Message>,
    /// The button's callback tag.
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    reply_markup: &'a InlineKeyboardMarkup,
}

#[derive(Debug, Serialize)]
struct EditMessageTextRequest<'a> {
    chat_id: i64,
    message_id: i64,
    text: &'a str,
    /// An empty keyboard removes the buttons.
    reply_markup: InlineKeyboardMarkup,
}

#[derive(Debug, Serialize)]
struct EditMessageReplyMarkupRequest {
    chat_id: i64,
    message_id: i64,
    reply_markup: InlineKeyboardMarkup,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQueryRequest<'a> {
    callback_query_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    error_code: Option<i64>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<Option<T>, TelegramError> {
        if self.ok {
            Ok(self.result)
        } else {
            Err(TelegramError::Api {
                code: self.error_code.unwrap_or_default(),
                description: self.description.unwrap_or_default(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct TelegramClient {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramClient {
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        )
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<Option<T>, TelegramError> {
        // The Bot API reports failures in the JSON body, including on 4xx.
        let response: ApiResponse<T> = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?
            .json()
            .await?;
        response.into_result()
    }

    /// Post a message with inline buttons. Returns the new message id.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: &InlineKeyboardMarkup,
    ) -> Result<i64, TelegramError> {
        let sent: Option<Message> = self
            .call(
                "sendMessage",
                &SendMessageRequest {
                    chat_id,
                    text,
                    reply_markup: keyboard,
                },
            )
            .await?;
        sent.map(|m| m.message_id).ok_or_else(|| TelegramError::Api {
            code: 0,
            description: "sendMessage returned no message".to_string(),
        })
    }

    /// Replace a message's text and drop its buttons.
    ///
    /// Editing to identical text is treated as success.
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<(), TelegramError> {
        let result = self
            .call::<_, serde_json::Value>(
                "editMessageText",
                &EditMessageTextRequest {
                    chat_id,
                    message_id,
                    text,
                    reply_markup: InlineKeyboardMarkup::default(),
                },
            )
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_modified() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Remove a message's buttons, leaving its text as is.
    pub async fn remove_keyboard(&self, chat_id: i64, message_id: i64) -> Result<(), TelegramError> {
        let result = self
            .call::<_, serde_json::Value>(
                "editMessageReplyMarkup",
                &EditMessageReplyMarkupRequest {
                    chat_id,
                    message_id,
                    reply_markup: InlineKeyboardMarkup::default(),
                },
            )
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_modified() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Stop the spinner on the pressed button.
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError> {
        self.call::<_, bool>(
            "answerCallbackQuery",
            &AnswerCallbackQueryRequest {
                callback_query_id,
                text,
            },
        )
        .await?;
        Ok(())
    }
}
