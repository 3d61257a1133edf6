pub mod health;
pub mod person;
