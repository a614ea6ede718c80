pub mod answer;
pub mod kinds;
pub mod question;
pub mod todo;
