use anyhow::Result;
use async_trait::async_trait;

/// Chat identifier kept independent of the chat framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatRef(pub i64);

#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub chat: ChatRef,
    pub text: String,
}

/// Pull-based stream of inbound text messages. `None` ends the stream.
#[async_trait]
pub trait MessageSource: Send {
    async fn next_message(&mut self) -> Result<Option<InboundMessage>>;
}

/// Sends text back to the chat a message came from.
#[async_trait]
pub trait Replier: Send + Sync {
    async fn reply(&self, chat: ChatRef, text: &str) -> Result<()>;
}
