use async_trait::async_trait;
use inquire::Confirm;
use tracing::warn;

/// Blocking dialogs: confirmation before destructive calls and alerts after failures.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
    async fn alert(&self, message: &str);
}

pub struct TerminalPrompter;

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn confirm(&self, message: &str) -> bool {
        let message = message.to_string();
        // An interrupted prompt counts as "no".
        on_blocking_pool(move || {
            Confirm::new(&message)
                .with_default(false)
                .prompt()
                .unwrap_or(false)
        })
        .await
    }

    async fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Runs a terminal question off the async workers. A crashed prompt answers `false`.
async fn on_blocking_pool<F>(ask: F) -> bool
where
    F: FnOnce() -> bool + Send + 'static,
{
    match tokio::task::spawn_blocking(ask).await {
        Ok(answer) => answer,
        Err(err) => {
            warn!(error = %err, "prompt task failed");
            false
        }
    }
}

/// Answers every confirmation with `yes`; used for `--yes` deletes.
pub struct AssumeYes;

#[async_trait]
impl Prompter for AssumeYes {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }

    async fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}
