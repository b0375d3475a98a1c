use super::event::{Callback, IncomingEvent, SendCommand, TextMessage};
use super::keyboard::{EUR_TODAY, Keyboard, SHOW_ALL_DATA, TODAY_RATES, USD_TODAY};
use crate::core::cache::{SnapshotCache, SnapshotGuard};
use crate::core::date::{earliest_supported, parse_user_date, today};
use crate::core::format::{GENERIC_ERROR, available_codes, render_all, render_selected};
use crate::core::provider::{FetchError, RateProvider};
use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

pub const WRONG_DATE_FORMAT: &str = "Wrong date format! Please, write date in 'dd.mm.yyyy'(01.01.2022) or 'dd/mm/yyyy'(01/01/2022) format.";
pub const FUTURE_DATE: &str = "I can not see the future! Try again.";
pub const TOO_OLD_DATE: &str =
    "It was too long time ago. I only remember the exchange rate for the last 4 years. Try again.";
pub const NO_AVAILABLE_RATES: &str =
    "There are no available rates at the moment. Try another date or try again later.";
pub const SELECT_CURRENCY: &str = "Please, select the currency:";
pub const CALLBACK_NO_RATES: &str =
    "There are no available rates at the moment. Try to write the date again.";
pub const CALLBACK_NOT_FOUND: &str = "I can not find it. Try to write the date again.";

/// What a text message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Request {
    AllToday,
    SelectedToday(&'static str),
    Date(NaiveDate),
    FutureDate,
    TooOldDate,
    Unparsable,
}

impl Request {
    fn classify(text: &str, today: NaiveDate) -> Self {
        match text {
            TODAY_RATES => Request::AllToday,
            USD_TODAY => Request::SelectedToday("USD"),
            EUR_TODAY => Request::SelectedToday("EUR"),
            _ => match parse_user_date(text) {
                None => Request::Unparsable,
                Some(date) if date > today => Request::FutureDate,
                Some(date) if date < earliest_supported(today) => Request::TooOldDate,
                Some(date) => Request::Date(date),
            },
        }
    }
}

/// Turns chat events into responses, refreshing the shared snapshot when needed.
pub struct ConversationController<P: RateProvider> {
    provider: P,
    cache: SnapshotCache,
}

impl<P: RateProvider> ConversationController<P> {
    pub fn new(provider: P, cache: SnapshotCache) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub async fn handle(&self, event: &IncomingEvent) -> Vec<SendCommand> {
        match event {
            IncomingEvent::Message(message) => self.on_text_message(message).await,
            IncomingEvent::Callback(callback) => self.on_callback(callback).await,
        }
    }

    #[instrument(skip(self, message), fields(chat_id = message.chat_id))]
    pub async fn on_text_message(&self, message: &TextMessage) -> Vec<SendCommand> {
        let Some(text) = message.text.as_deref() else {
            warn!(
                message_id = message.message_id,
                "Message without text, answering with generic error"
            );
            return vec![menu_reply(message, GENERIC_ERROR)];
        };

        let today = today();
        let request = Request::classify(text, today);
        debug!(?request, "Classified message");

        // Held until the response is rendered so refreshes never interleave.
        let mut slot = self.cache.lock().await;

        let reply = match request {
            Request::AllToday => match self.ensure_refreshed(&mut slot, today).await {
                Ok(()) => menu_reply(message, render_all(slot.snapshot())),
                Err(_) => menu_reply(message, GENERIC_ERROR),
            },
            Request::SelectedToday(currency) => {
                match self.ensure_refreshed(&mut slot, today).await {
                    Ok(()) => menu_reply(message, render_selected(slot.snapshot(), currency)),
                    Err(_) => menu_reply(message, GENERIC_ERROR),
                }
            }
            Request::Unparsable => menu_reply(message, WRONG_DATE_FORMAT),
            Request::FutureDate => menu_reply(message, FUTURE_DATE),
            Request::TooOldDate => menu_reply(message, TOO_OLD_DATE),
            Request::Date(date) => match self.ensure_refreshed(&mut slot, date).await {
                Ok(()) => {
                    let codes = available_codes(slot.snapshot());
                    if codes.is_empty() {
                        SendCommand::text(message.chat_id, NO_AVAILABLE_RATES)
                            .reply_to(message.message_id)
                    } else {
                        SendCommand::text(message.chat_id, SELECT_CURRENCY)
                            .reply_to(message.message_id)
                            .with_keyboard(Keyboard::currency_picker(&codes))
                    }
                }
                Err(_) => menu_reply(message, GENERIC_ERROR),
            },
        };

        vec![reply]
    }

    #[instrument(skip(self, callback), fields(callback_id = %callback.id))]
    pub async fn on_callback(&self, callback: &Callback) -> Vec<SendCommand> {
        let Some(chat_id) = callback.chat_id else {
            warn!("Callback without originating chat, nothing to answer");
            return Vec::new();
        };
        let Some(data) = callback.data.as_deref() else {
            warn!(chat_id, "Callback without data, answering with generic error");
            return vec![SendCommand::text(chat_id, GENERIC_ERROR)];
        };

        let slot = self.cache.lock().await;
        let snapshot = slot.snapshot();

        let text = if snapshot.rates.is_empty() {
            CALLBACK_NO_RATES.to_string()
        } else if snapshot.find(data).is_some() {
            render_selected(snapshot, data)
        } else if data == SHOW_ALL_DATA {
            render_all(snapshot)
        } else {
            debug!(data, "Unknown callback data");
            CALLBACK_NOT_FOUND.to_string()
        };

        vec![SendCommand::text(chat_id, text)]
    }

    /// Fetches `date` unless the slot already holds it. A failed fetch leaves the slot as is.
    async fn ensure_refreshed(
        &self,
        slot: &mut SnapshotGuard<'_>,
        date: NaiveDate,
    ) -> Result<(), FetchError> {
        if slot.holds(date) {
            return Ok(());
        }

        match self.provider.fetch_rates(date).await {
            Ok(snapshot) => {
                slot.replace(snapshot);
                Ok(())
            }
            Err(e) => {
                match &e {
                    FetchError::InvalidDateRange { .. } => {
                        warn!(error = %e, "Rejected date reached the provider")
                    }
                    FetchError::Provider(_) => warn!(error = %e, "Rate fetch failed"),
                    FetchError::InvalidResponse(_) => {
                        warn!(error = %e, "Rate provider sent an invalid snapshot")
                    }
                }
                Err(e)
            }
        }
    }
}

fn menu_reply(message: &TextMessage, text: impl Into<String>) -> SendCommand {
    SendCommand::text(message.chat_id, text)
        .reply_to(message.message_id)
        .with_keyboard(Keyboard::Menu)
}
