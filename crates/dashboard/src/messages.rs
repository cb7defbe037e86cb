//! Customer messages and quick replies.

use chrono::{DateTime, Utc};
use farmstand_core::MessageId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

/// Errors that can occur while replying to messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("message {0} not found")]
    NotFound(MessageId),

    #[error("reply text is empty")]
    EmptyReply,
}

/// A message from a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerMessage {
    pub id: MessageId,
    pub customer: String,
    pub message: String,
    /// Relative time as shown in the list, e.g. "10 minutes ago".
    pub timestamp: String,
    pub unread: bool,
    #[serde(default)]
    pub avatar: String,
}

/// Canned reply starters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplyTemplate {
    Availability,
    OrderConfirmation,
    ThankYou,
    OutOfStock,
}

impl ReplyTemplate {
    pub const ALL: [Self; 4] = [
        Self::Availability,
        Self::OrderConfirmation,
        Self::ThankYou,
        Self::OutOfStock,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Availability => "Availability",
            Self::OrderConfirmation => "Order Confirmation",
            Self::ThankYou => "Thank You",
            Self::OutOfStock => "Out Of Stock",
        }
    }

    /// Template text. `[DATE]` is left for the farmer to fill in.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Availability => {
                "Thank you for your interest. The product will be available on [DATE]. Would you like me to notify you when it's in stock?"
            }
            Self::OrderConfirmation => {
                "Your order has been confirmed and will be delivered on [DATE]. Thank you for choosing our farm!"
            }
            Self::ThankYou => {
                "Thank you for your feedback! We're glad you enjoyed our products. Your support means a lot to us."
            }
            Self::OutOfStock => {
                "I apologize, but the item you're interested in is currently out of stock. We expect to have more available by [DATE]."
            }
        }
    }
}

/// A reply sent by the farmer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    /// The message replied to; `None` for a fresh message.
    pub in_reply_to: Option<MessageId>,
    pub to: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// The farmer's inbox and outbox.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inbox {
    messages: Vec<CustomerMessage>,
    outbox: Vec<OutgoingMessage>,
}

impl Inbox {
    #[must_use]
    pub const fn new(messages: Vec<CustomerMessage>) -> Self {
        Self {
            messages,
            outbox: Vec::new(),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[CustomerMessage] {
        &self.messages
    }

    #[must_use]
    pub fn outbox(&self) -> &[OutgoingMessage] {
        &self.outbox
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|message| message.unread).count()
    }

    /// Messages whose customer name or text contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&CustomerMessage> {
        let query = query.to_lowercase();
        self.messages
            .iter()
            .filter(|message| {
                message.customer.to_lowercase().contains(&query)
                    || message.message.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Flip the read flag, returning the new `unread` value.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotFound` for unknown IDs.
    pub fn toggle_read(&mut self, id: MessageId) -> Result<bool, MessageError> {
        let message = self.find_mut(id)?;
        message.unread = !message.unread;
        Ok(message.unread)
    }

    /// Reply to a customer message. The message is marked read.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotFound` for unknown IDs and
    /// `MessageError::EmptyReply` for blank text.
    #[instrument(skip(self, text))]
    pub fn reply(&mut self, id: MessageId, text: &str) -> Result<OutgoingMessage, MessageError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MessageError::EmptyReply);
        }
        let message = self.find_mut(id)?;
        message.unread = false;
        let to = message.customer.clone();

        info!(%to, "Reply sent");
        Ok(self.send(Some(id), to, text.to_string()))
    }

    /// Send a new message that is not a reply.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::EmptyReply` for blank text.
    #[instrument(skip(self, text))]
    pub fn compose(&mut self, to: &str, text: &str) -> Result<OutgoingMessage, MessageError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MessageError::EmptyReply);
        }
        info!("Message sent");
        Ok(self.send(None, to.trim().to_string(), text.to_string()))
    }

    fn send(&mut self, in_reply_to: Option<MessageId>, to: String, text: String) -> OutgoingMessage {
        let outgoing = OutgoingMessage {
            in_reply_to,
            to,
            text,
            sent_at: Utc::now(),
        };
        self.outbox.push(outgoing.clone());
        outgoing
    }

    fn find_mut(&mut self, id: MessageId) -> Result<&mut CustomerMessage, MessageError> {
        self.messages
            .iter_mut()
            .find(|message| message.id == id)
            .ok_or(MessageError::NotFound(id))
    }
}
