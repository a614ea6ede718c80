pub mod answer_service;
pub mod id_allocator;
pub mod question_service;
pub mod todo_service;
