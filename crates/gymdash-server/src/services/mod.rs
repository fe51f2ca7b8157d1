pub mod forms;
pub mod members;
pub mod payments;
