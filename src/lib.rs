//! # burst-vk
//!
//! Type-safe building blocks for talking to Vulkan:
//!
//! - [`FlagSet`]: one type per flag group (`QueueFlags`, `ImageUsageFlags`, ...), with the
//!   usual bitwise operators and a readable renderer. Mixing two groups does not compile.
//! - [`Status`], [`dispatch`] and [`VkError`]: every `VkResult` sorted into success,
//!   informational and error families, raised under a [`Policy`] of your choosing.
//! - [`InstanceExtensionTable`] and [`DeviceExtensionTable`]: which optional extensions were
//!   negotiated at startup.
//! - [`structs`]: `#[repr(C)]` accessor wrappers over plain Vulkan structures.
//!
//! ```
//! use burst_vk::{QueueFlagBits, Policy, dispatch};
//!
//! let flags = QueueFlagBits::GRAPHICS | QueueFlagBits::TRANSFER;
//! assert_eq!(flags.to_string(), "GRAPHICS|TRANSFER");
//! assert!(dispatch(2, Policy::Permissive, "fence wait").is_ok());
//! assert!(dispatch(2, Policy::Strict, "fence wait").is_err());
//! ```
pub mod gapi;
pub mod logging;

pub use gapi::vulkan::enums::flag_groups::*;
pub use gapi::vulkan::errors::{
    ErrorKind, Family, Policy, ResultCode, Status, VkError, dispatch, ensure_no_error,
    ensure_success,
};
pub use gapi::vulkan::extensions::{
    DeviceExtension, DeviceExtensionTable, InstanceExtension, InstanceExtensionTable,
};
pub use gapi::vulkan::flags::{FlagGroup, FlagSet, FlagWord};
pub use gapi::vulkan::{debugger, errors, extensions, flags, structs};

#[doc(hidden)]
pub use bitflags as __bitflags;
