pub mod earnings;
pub mod health;
