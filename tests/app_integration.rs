use chrono::Days;
use ratebot::bot::{Callback, ConversationController, IncomingEvent, Keyboard, TextMessage};
use ratebot::core::SnapshotCache;
use ratebot::core::date::{format_date, today};
use ratebot::providers::PrivatBankProvider;
use std::fs;
use tracing::{error, info};

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const RATES_PATH: &str = "/p24api/exchange_rates";

    pub async fn create_rates_mock_server(date: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(RATES_PATH))
            .and(query_param("date", date))
            .respond_with(response)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn rates_json(date: &str) -> String {
        format!(
            r#"{{
                "date": "{date}",
                "bank": "PB",
                "baseCurrency": 980,
                "baseCurrencyLit": "UAH",
                "exchangeRate": [
                    {{"baseCurrency": "UAH", "currency": "CHF", "saleRateNB": 41.2, "purchaseRateNB": 41.2}},
                    {{"baseCurrency": "UAH", "currency": "EUR", "saleRate": 45.1, "purchaseRate": 44.2}},
                    {{"baseCurrency": "UAH", "currency": "USD", "saleRate": 41.75, "purchaseRate": 41.15}}
                ]
            }}"#
        )
    }

    pub fn base_url(server: &MockServer) -> String {
        format!("{}{}?json&date=", server.uri(), RATES_PATH)
    }

    pub fn write_config(base_url: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
            providers:
              privatbank:
                base_url: "{base_url}"
        "#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test(tokio::test)]
async fn test_full_rates_flow_with_mock() {
    let date = format_date(today());
    let mock_server = test_utils::create_rates_mock_server(
        &date,
        wiremock::ResponseTemplate::new(200).set_body_string(test_utils::rates_json(&date)),
    )
    .await;
    let config_file = test_utils::write_config(&test_utils::base_url(&mock_server));

    let result = ratebot::run_command(
        ratebot::AppCommand::Rates {
            date: None,
            currency: Some("usd".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Rates command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_rates_flow_fails_on_provider_error() {
    let date = today().checked_sub_days(Days::new(2)).unwrap();
    let mock_server = test_utils::create_rates_mock_server(
        &format_date(date),
        wiremock::ResponseTemplate::new(503),
    )
    .await;
    let config_file = test_utils::write_config(&test_utils::base_url(&mock_server));

    let result = ratebot::run_command(
        ratebot::AppCommand::Rates {
            date: Some(date.format("%d/%m/%Y").to_string()),
            currency: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    let err = result.expect_err("Provider failure should fail the command");
    assert!(err.to_string().contains("HTTP error: 503"));
}

#[test_log::test(tokio::test)]
async fn test_rates_flow_rejects_bad_config() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), "providers: [").expect("Failed to write config file");

    let result = ratebot::run_command(
        ratebot::AppCommand::Rates {
            date: None,
            currency: None,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_conversation_with_mock_provider() {
    let date = today().checked_sub_days(Days::new(7)).unwrap();
    let date_text = format_date(date);
    let mock_server = test_utils::create_rates_mock_server(
        &date_text,
        wiremock::ResponseTemplate::new(200).set_body_string(test_utils::rates_json(&date_text)),
    )
    .await;

    let provider = PrivatBankProvider::new(&test_utils::base_url(&mock_server)).unwrap();
    let controller = ConversationController::new(provider, SnapshotCache::new());

    let message = IncomingEvent::Message(TextMessage {
        chat_id: 1,
        message_id: 1,
        text: Some(date_text.clone()),
    });
    let replies = controller.handle(&message).await;
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, "Please, select the currency:");
    let Some(Keyboard::Inline(rows)) = &replies[0].keyboard else {
        panic!("Expected an inline keyboard, got {:?}", replies[0].keyboard);
    };
    let labels: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| row.iter().map(|b| b.label.as_str()).collect())
        .collect();
    assert_eq!(labels, vec![vec!["EUR", "USD"], vec!["Show all"]]);

    let press = |data: &str| {
        IncomingEvent::Callback(Callback {
            id: "q".to_string(),
            chat_id: Some(1),
            data: Some(data.to_string()),
        })
    };

    let replies = controller.handle(&press("USD")).await;
    assert_eq!(
        replies[0].text,
        format!("The UAH to USD exchange rate on the this date({date_text}) was: 41.15/41.75")
    );

    let replies = controller.handle(&press("CHF")).await;
    assert_eq!(
        replies[0].text,
        "No rate for this day. Try another date or try again later"
    );

    let replies = controller.handle(&press("all")).await;
    assert_eq!(
        replies[0].text,
        format!(
            "The UAH exchange rates on the this date({date_text}) were:\nEUR - 44.2/45.1\nUSD - 41.15/41.75"
        )
    );

    // The same date again is served from the cached snapshot; the mock expects one call.
    controller.handle(&message).await;
}

#[test_log::test(tokio::test)]
#[ignore = "hits the live PrivatBank API"]
async fn test_real_privatbank_api() {
    use ratebot::core::RateProvider;

    let provider =
        PrivatBankProvider::new("https://api.privatbank.ua/p24api/exchange_rates?json&date=")
            .unwrap();
    let date = today().checked_sub_days(Days::new(1)).unwrap();
    info!(?date, "Fetching rates from PrivatBank");

    match provider.fetch_rates(date).await {
        Ok(snapshot) => {
            info!(?snapshot, "Received successful rates response");
            assert_eq!(snapshot.base_currency, "UAH");
            assert_eq!(snapshot.date, date);
        }
        Err(e) => {
            error!("Rates API request failed: {e}\n{e:?}");
            panic!("Rates API request failed: {e}");
        }
    }
}
