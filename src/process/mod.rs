pub mod core;
pub mod shared;


// Re-export the primary types so callers can use `crate::process::*` paths.
pub use self::core::Process;
pub use self::shared::SharedProcess;
