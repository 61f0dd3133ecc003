use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::locale;
use super::service::TriageService;
use super::types::{Language, LlmClient};
use super::TriageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: NaiveDateTime,
    pub language: Language,
}

impl ChatMessage {
    fn new(sender: Sender, text: String, language: Language) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            sender,
            timestamp: Local::now().naive_local(),
            language,
        }
    }

    /// Transcript line fed back to the model as context.
    fn history_line(&self) -> String {
        match self.sender {
            Sender::User => format!("User: {}", self.text),
            Sender::Bot => format!("Bot: {}", self.text),
        }
    }
}

/// In-memory chat transcript.
///
/// `send` takes `&mut self`, so one session can never have two requests in
/// flight. The user message is recorded before the call and the reply only
/// after it returns.
#[derive(Debug, Clone)]
pub struct ChatSession {
    language: Language,
    messages: Vec<ChatMessage>,
    history: Vec<String>,
}

impl ChatSession {
    /// New session opened with the localized welcome message. The welcome
    /// is shown but not sent to the model as history.
    pub fn new(language: Language) -> Self {
        let welcome = ChatMessage::new(
            Sender::Bot,
            locale::strings(language).chat_welcome.to_string(),
            language,
        );
        Self {
            language,
            messages: vec![welcome],
            history: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Send a user message and record the reply. Returns the bot message.
    pub fn send<C: LlmClient>(
        &mut self,
        service: &TriageService<C>,
        text: &str,
    ) -> Result<&ChatMessage, TriageError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TriageError::EmptyInput);
        }

        // The pair is recorded only once the reply exists.
        let user = ChatMessage::new(Sender::User, text.to_string(), self.language);
        let reply = match service.chat_response(text, self.language, &self.history) {
            Ok(reply) => reply,
            Err(TriageError::EmptyInput) => locale::strings(self.language).chat_fallback.to_string(),
            Err(e) => return Err(e),
        };
        let bot = ChatMessage::new(Sender::Bot, reply, self.language);

        self.history.push(user.history_line());
        self.messages.push(user);
        self.history.push(bot.history_line());
        self.messages.push(bot);

        Ok(&self.messages[self.messages.len() - 1])
    }
}
