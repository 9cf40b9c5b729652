pub mod health;
pub mod history;
pub mod messages;
pub mod search;
pub mod threads;
