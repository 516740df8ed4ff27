pub mod forms;
pub mod listings;
pub mod tools;
