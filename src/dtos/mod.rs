pub mod account_dtos;
pub mod otp_dtos;
