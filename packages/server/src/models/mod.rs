pub mod about;
pub mod contact;
pub mod project;
pub mod shared;
