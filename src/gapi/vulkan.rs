//! Typed views over the Vulkan ABI: flag groups, result codes, extension tables and plain
//! structures, plus the loader/instance plumbing the report binary uses.
pub(crate) mod config;
pub mod debugger;
pub mod entry;
pub mod enums;
pub mod errors;
pub mod extensions;
pub mod flags;
pub mod instance;
pub mod structs;
