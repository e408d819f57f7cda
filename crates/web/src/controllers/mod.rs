//! Controllers invoked by the dispatcher.

mod user_controller;

pub use user_controller::UserController;
