pub mod chat;
pub mod doctor;
pub mod domains;
pub mod onboard;
