//! Keyboards attached to outgoing messages.

pub const TODAY_RATES: &str = "Today`s rates";
pub const USD_TODAY: &str = "USD today";
pub const EUR_TODAY: &str = "EUR today";

pub const SHOW_ALL_LABEL: &str = "Show all";
pub const SHOW_ALL_DATA: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineButton {
    pub fn new(label: &str, callback_data: &str) -> Self {
        Self {
            label: label.to_string(),
            callback_data: callback_data.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// The persistent reply keyboard with the fixed commands.
    Menu,
    /// Buttons attached to a single message, answered through callbacks.
    Inline(Vec<Vec<InlineButton>>),
}

impl Keyboard {
    /// Rows of the persistent menu, top to bottom.
    pub fn menu_rows() -> [&'static [&'static str]; 2] {
        [&[TODAY_RATES], &[USD_TODAY, EUR_TODAY]]
    }

    /// Two codes per row, a lone code on the last row for odd counts, then "Show all".
    pub fn currency_picker(codes: &[String]) -> Self {
        let mut rows: Vec<Vec<InlineButton>> = codes
            .chunks(2)
            .map(|pair| pair.iter().map(|code| InlineButton::new(code, code)).collect())
            .collect();
        rows.push(vec![InlineButton::new(SHOW_ALL_LABEL, SHOW_ALL_DATA)]);
        Keyboard::Inline(rows)
    }

    /// Finds the inline button with the given label.
    pub fn button(&self, label: &str) -> Option<&InlineButton> {
        match self {
            Keyboard::Menu => None,
            Keyboard::Inline(rows) => rows.iter().flatten().find(|b| b.label == label),
        }
    }
}
