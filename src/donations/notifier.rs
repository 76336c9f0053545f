use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Outbound e-mail as composed by the lifecycle manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Fire-and-forget notification hook. Callers log failures and move on.
pub trait Notifier: Send + Sync {
    fn send_email(&self, message: EmailMessage) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification queue closed")]
    QueueClosed,
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}

/// Delivery backend drained by [`QueuedNotifier`].
pub trait Mailer: Send + Sync + 'static {
    fn deliver(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// Mailer that writes each message to the tracing output instead of an SMTP relay.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

impl Mailer for LogMailer {
    fn deliver(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        info!(from = %self.from, to = %message.to, subject = %message.subject, "email sent");
        debug!(body = %message.body, "email body");
        Ok(())
    }
}

/// Hands messages to a background task so `send_email` never waits on delivery.
#[derive(Debug, Clone)]
pub struct QueuedNotifier {
    sender: mpsc::UnboundedSender<EmailMessage>,
}

impl QueuedNotifier {
    /// Spawn the delivery task on the current tokio runtime. The task exits once every
    /// clone of the returned notifier has been dropped and the queue is drained.
    pub fn spawn<M: Mailer>(mailer: M) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<EmailMessage>();
        let worker = tokio::spawn(async move {
            while let Some(message) = receiver.recv().await {
                if let Err(err) = mailer.deliver(&message) {
                    warn!(to = %message.to, error = %err, "email delivery failed");
                }
            }
        });
        (Self { sender }, worker)
    }
}

impl Notifier for QueuedNotifier {
    fn send_email(&self, message: EmailMessage) -> Result<(), NotifyError> {
        self.sender
            .send(message)
            .map_err(|_| NotifyError::QueueClosed)
    }
}
