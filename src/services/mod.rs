pub mod account_relay;
pub mod clock;
pub mod mailer;
pub mod mt5_client;
pub mod otp_service;
pub mod otp_store;

#[cfg(test)]
pub mod testing;
