pub mod todo;
pub mod user;

pub use todo::{Todo, TodoInput, TodoPatch, TodoView};
pub use user::{NewUser, User};
