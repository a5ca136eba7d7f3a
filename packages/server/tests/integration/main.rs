mod about;
mod contact;
mod editor;
mod uploads;
