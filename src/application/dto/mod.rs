/// Data Transfer Objects for application layer
///
/// DTOs carry configuration between the adapters and the session,
/// keeping the domain layer isolated.
mod session_options;

pub use session_options::SessionOptions;
