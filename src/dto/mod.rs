pub mod answer_dto;
pub mod query;
pub mod question_dto;
pub mod todo_dto;
