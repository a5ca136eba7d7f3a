pub mod about;
pub mod admin;
pub mod contact;
pub mod public;
pub mod uploads;
