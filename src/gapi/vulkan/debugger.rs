//! # Break-on-error hook
//!
//! When a debugger is attached, building a [`VkError`](crate::errors::VkError) stops the
//! process right at the fault site, before the error starts unwinding through `?`.
//!
//! Presence is detected once, on first use, and cached for the rest of the process:
//! - Linux: `TracerPid` in `/proc/self/status`.
//! - Windows: `IsDebuggerPresent`.
//! - Anywhere else: never attached.
//!
//! A check that cannot run counts as "no debugger".
use crate::gapi::vulkan::config::DEBUG_BREAK_ENABLED;
use lazy_static::lazy_static;
use log::debug;

/// Setting this variable (to anything) turns the break off at runtime.
pub const NO_DEBUG_BREAK_ENV: &str = "BURST_VK_NO_DEBUG_BREAK";

lazy_static! {
    static ref DEBUGGER_ATTACHED: bool = {
        let attached = detect();
        debug!("Debugger attached: {attached}");
        attached
    };
    static ref BREAK_DISABLED_BY_ENV: bool = std::env::var_os(NO_DEBUG_BREAK_ENV).is_some();
}

/// `true` if a debugger was attached the first time this was asked.
pub fn is_debugger_attached() -> bool {
    *DEBUGGER_ATTACHED
}

/// Raises a breakpoint trap if a debugger is attached and the hook is enabled.
pub(crate) fn break_if_attached() {
    if DEBUG_BREAK_ENABLED && !*BREAK_DISABLED_BY_ENV && is_debugger_attached() {
        trigger();
    }
}

#[cfg(target_os = "linux")]
fn detect() -> bool {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| tracer_pid(&status))
        .is_some_and(|pid| pid != 0)
}

#[cfg(windows)]
fn detect() -> bool {
    #[link(name = "kernel32")]
    unsafe extern "system" {
        fn IsDebuggerPresent() -> i32;
    }
    unsafe { IsDebuggerPresent() != 0 }
}

#[cfg(not(any(target_os = "linux", windows)))]
fn detect() -> bool {
    false
}

/// Parses the `TracerPid:` line of a `/proc/<pid>/status` file.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn tracer_pid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(unix)]
fn trigger() {
    unsafe {
        libc::raise(libc::SIGTRAP);
    }
}

#[cfg(windows)]
fn trigger() {
    #[link(name = "kernel32")]
    unsafe extern "system" {
        fn DebugBreak();
    }
    unsafe { DebugBreak() }
}

#[cfg(not(any(unix, windows)))]
fn trigger() {}
