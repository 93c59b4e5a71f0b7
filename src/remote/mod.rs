//! Server-backed table plumbing: the REST client and the task manager that
//! runs requests off the event loop.

pub mod client;
pub mod manager;
