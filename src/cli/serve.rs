use crate::bot::{ConversationController, IncomingEvent};
use crate::core::provider::RateProvider;
use crate::telegram::TelegramClient;
use crate::telegram::convert::into_event;
use anyhow::Result;
use std::time::Duration;
use teloxide::types::Update;
use tracing::{debug, error, info};

const POLLING_BACKOFF: Duration = Duration::from_secs(5);

/// Long-polls Telegram and answers every update until Ctrl-C.
pub async fn serve<P: RateProvider>(
    client: &TelegramClient,
    controller: &ConversationController<P>,
    poll_timeout_secs: u32,
) -> Result<()> {
    let me = client.get_me().await?;
    info!(
        "Start listening for @{}",
        me.user.username.as_deref().unwrap_or("unknown")
    );

    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    poll_until(client, controller, poll_timeout_secs, ctrl_c).await
}

/// Polls and dispatches updates until `shutdown` completes.
///
/// `shutdown` is polled for the whole run, so a signal that arrives while updates are being
/// handled or during the back-off still stops the loop at the next await point.
pub async fn poll_until<P, F>(
    client: &TelegramClient,
    controller: &ConversationController<P>,
    poll_timeout_secs: u32,
    shutdown: F,
) -> Result<()>
where
    P: RateProvider,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let mut offset = 0;
    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => break,
            polled = client.get_updates(offset, poll_timeout_secs) => match polled {
                Ok(updates) => {
                    offset = dispatch(client, controller, updates, offset).await;
                }
                Err(e) => {
                    error!(error = %e, "Polling failed");
                    tokio::select! {
                        biased;
                        () = &mut shutdown => break,
                        () = tokio::time::sleep(POLLING_BACKOFF) => {}
                    }
                }
            },
        }
    }

    info!("Shutting down");
    Ok(())
}

/// Handles polled updates one at a time and returns the next polling offset.
///
/// Delivery failures are logged; the update still counts as handled.
pub async fn dispatch<P: RateProvider>(
    client: &TelegramClient,
    controller: &ConversationController<P>,
    updates: Vec<Update>,
    mut offset: i32,
) -> i32 {
    for update in updates {
        offset = offset.max(next_offset(&update));
        let Some(event) = into_event(update) else {
            debug!("Skipping unsupported update");
            continue;
        };

        if let IncomingEvent::Callback(callback) = &event {
            if let Err(e) = client.answer_callback(&callback.id).await {
                error!(error = %e, "Failed to answer callback query");
            }
        }

        for command in controller.handle(&event).await {
            if let Err(e) = client.send(&command).await {
                error!(error = %e, chat_id = command.chat_id, "Failed to send message");
            }
        }
    }
    offset
}

fn next_offset(update: &Update) -> i32 {
    i32::try_from(update.id.0).map_or(i32::MAX, |id| id.saturating_add(1))
}
