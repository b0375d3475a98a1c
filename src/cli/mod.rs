pub mod chat;
pub mod rates;
pub mod serve;
pub mod setup;
pub mod ui;
