//! # Vulkan result taxonomy
//!
//! Every Vulkan command reports a `VkResult`. This module gives that number a closed type
//! ([`Status`]), sorts it into a [`Family`], and turns it into an [`VkError`] according to a
//! caller-chosen [`Policy`]:
//!
//! - [`Policy::Strict`]: anything but `VK_SUCCESS` is an error, `VK_TIMEOUT` included.
//! - [`Policy::Permissive`]: only negative (error) codes are errors; informational codes come
//!   back as `Ok(status)` so the caller can poll.
//!
//! Codes this crate does not know (newer headers, vendor extensions) are never dropped: they
//! become [`ErrorKind::Unrecognized`] under both policies.
use crate::gapi::vulkan::debugger;
use lazy_static::lazy_static;
use log::{debug, trace};
use std::fmt;
use thiserror::Error;
use vulkanalia::vk;

/// Which bucket a status code falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// `VK_SUCCESS` only.
    Success,
    /// Non-negative, non-zero codes: the command completed but something is worth noting
    /// (`VK_NOT_READY`, `VK_TIMEOUT`, `VK_SUBOPTIMAL_KHR`, ...).
    Informational,
    /// Negative codes: the command failed.
    Error,
}

/// Which families a call site treats as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// Every non-success code fails.
    #[default]
    Strict,
    /// Only error codes fail; informational codes pass through.
    Permissive,
}

impl Policy {
    /// `true` if a code of `family` must be turned into an error under this policy.
    pub fn rejects(self, family: Family) -> bool {
        match (self, family) {
            (_, Family::Success) => false,
            (Policy::Strict, _) => true,
            (Policy::Permissive, Family::Informational) => false,
            (Policy::Permissive, Family::Error) => true,
        }
    }
}

macro_rules! result_taxonomy {
    (
        success { $success:ident = $success_raw:literal => $success_name:literal, }
        informational {
            $( $(#[$info_doc:meta])* $info:ident = $info_raw:literal => $info_name:literal, )+
        }
        error {
            $( $(#[$err_doc:meta])* $err:ident = $err_raw:literal => $err_name:literal, )+
        }
    ) => {
        /// A `VkResult` value this crate knows by name.
        ///
        /// The discriminant is the native value, so `status as i32` is what the driver returned.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i32)]
        pub enum Status {
            /// Command successfully completed.
            $success = $success_raw,
            $( $(#[$info_doc])* $info = $info_raw, )+
            $( $(#[$err_doc])* $err = $err_raw, )+
        }

        impl Status {
            /// Every known status, in declaration order.
            pub const ALL: &'static [Status] = &[
                Status::$success,
                $( Status::$info, )+
                $( Status::$err, )+
            ];

            /// Canonical name, as spelled in `vulkan_core.h`.
            pub const fn name(self) -> &'static str {
                match self {
                    Status::$success => $success_name,
                    $( Status::$info => $info_name, )+
                    $( Status::$err => $err_name, )+
                }
            }

            pub const fn family(self) -> Family {
                match self {
                    Status::$success => Family::Success,
                    $( Status::$info => Family::Informational, )+
                    $( Status::$err => Family::Error, )+
                }
            }
        }

        /// What went wrong: one kind per non-success [`Status`], plus
        /// [`Unrecognized`](ErrorKind::Unrecognized) for codes outside the known set.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorKind {
            $( $(#[$info_doc])* $info, )+
            $( $(#[$err_doc])* $err, )+
            /// A code this crate has no name for.
            Unrecognized,
        }

        impl ErrorKind {
            /// The kind raised for `status`, `None` for success.
            pub const fn from_status(status: Status) -> Option<ErrorKind> {
                match status {
                    Status::$success => None,
                    $( Status::$info => Some(ErrorKind::$info), )+
                    $( Status::$err => Some(ErrorKind::$err), )+
                }
            }

            /// The status this kind stands for, `None` for [`ErrorKind::Unrecognized`].
            pub const fn status(self) -> Option<Status> {
                match self {
                    $( ErrorKind::$info => Some(Status::$info), )+
                    $( ErrorKind::$err => Some(Status::$err), )+
                    ErrorKind::Unrecognized => None,
                }
            }
        }
    };
}

result_taxonomy! {
    success {
        Success = 0 => "VK_SUCCESS",
    }
    informational {
        /// An operation or wait returned because the object was not yet ready.
        /// This is not an error: the object is still in-flight or waiting to be signaled.
        NotReady = 1 => "VK_NOT_READY",
        /// Synchronization timeout expired before the operation completed.
        /// Most commonly returned by `vkWaitForFences`.
        Timeout = 2 => "VK_TIMEOUT",
        /// An event is signaled.
        EventSet = 3 => "VK_EVENT_SET",
        /// An event is unsignaled.
        EventReset = 4 => "VK_EVENT_RESET",
        /// A return array was too small for the result.
        Incomplete = 5 => "VK_INCOMPLETE",
        /// The swap-chain can still be used, but no longer matches the surface exactly.
        /// Typically a warning returned from `vkQueuePresentKHR`.
        SuboptimalKhr = 1_000_001_003 => "VK_SUBOPTIMAL_KHR",
        /// A multithreaded deferred operation worker has no more work right now.
        ThreadIdleKhr = 1_000_268_000 => "VK_THREAD_IDLE_KHR",
        /// All worker threads of a deferred host operation are done.
        ThreadDoneKhr = 1_000_268_001 => "VK_THREAD_DONE_KHR",
        /// A deferred host operation was deferred and has not completed yet.
        OperationDeferredKhr = 1_000_268_002 => "VK_OPERATION_DEFERRED_KHR",
        /// A deferred host operation completed without being deferred.
        OperationNotDeferredKhr = 1_000_268_003 => "VK_OPERATION_NOT_DEFERRED_KHR",
        /// A pipeline would need compilation but creation asked not to compile.
        PipelineCompileRequired = 1_000_297_000 => "VK_PIPELINE_COMPILE_REQUIRED",
    }
    error {
        /// Host memory allocation has failed.
        OutOfHostMemory = -1 => "VK_ERROR_OUT_OF_HOST_MEMORY",
        /// Device memory allocation has failed.
        /// This usually happens when the GPU heap is exhausted or too fragmented.
        OutOfDeviceMemory = -2 => "VK_ERROR_OUT_OF_DEVICE_MEMORY",
        /// Initialization of an object could not be completed.
        InitializationFailed = -3 => "VK_ERROR_INITIALIZATION_FAILED",
        /// The logical or physical device was lost (GPU crash, hang or driver reset).
        /// The device is unusable afterwards and must be recreated.
        DeviceLost = -4 => "VK_ERROR_DEVICE_LOST",
        /// Mapping of a memory object has failed.
        MemoryMapFailed = -5 => "VK_ERROR_MEMORY_MAP_FAILED",
        /// A requested layer is not present on the system.
        LayerNotPresent = -6 => "VK_ERROR_LAYER_NOT_PRESENT",
        /// A requested extension is not supported.
        ExtensionNotPresent = -7 => "VK_ERROR_EXTENSION_NOT_PRESENT",
        /// A requested feature is not supported by the physical device.
        FeatureNotPresent = -8 => "VK_ERROR_FEATURE_NOT_PRESENT",
        /// The requested Vulkan version is not supported by the driver.
        IncompatibleDriver = -9 => "VK_ERROR_INCOMPATIBLE_DRIVER",
        /// Too many objects of the type have already been created.
        TooManyObjects = -10 => "VK_ERROR_TOO_MANY_OBJECTS",
        /// A requested format is not supported on this device.
        FormatNotSupported = -11 => "VK_ERROR_FORMAT_NOT_SUPPORTED",
        /// A pool allocation failed due to fragmentation of the pool's memory.
        FragmentedPool = -12 => "VK_ERROR_FRAGMENTED_POOL",
        /// An unknown error occurred, either invalid input or an implementation failure.
        Unknown = -13 => "VK_ERROR_UNKNOWN",
        /// A pool memory allocation has failed.
        OutOfPoolMemory = -1_000_069_000 => "VK_ERROR_OUT_OF_POOL_MEMORY",
        /// An external handle is not a valid handle of the specified type.
        InvalidExternalHandle = -1_000_072_003 => "VK_ERROR_INVALID_EXTERNAL_HANDLE",
        /// A descriptor pool creation has failed due to fragmentation.
        Fragmentation = -1_000_161_000 => "VK_ERROR_FRAGMENTATION",
        /// A buffer or memory allocation failed because the capture address was unavailable.
        InvalidOpaqueCaptureAddress = -1_000_257_000 => "VK_ERROR_INVALID_OPAQUE_CAPTURE_ADDRESS",
        /// A surface is no longer available.
        SurfaceLostKhr = -1_000_000_000 => "VK_ERROR_SURFACE_LOST_KHR",
        /// The native window is already in use by Vulkan or another API.
        NativeWindowInUseKhr = -1_000_000_001 => "VK_ERROR_NATIVE_WINDOW_IN_USE_KHR",
        /// The surface changed and the swap-chain no longer matches it.
        /// Commonly returned after a resize; the swap-chain must be recreated.
        OutOfDateKhr = -1_000_001_004 => "VK_ERROR_OUT_OF_DATE_KHR",
        /// The display used by a swap-chain does not use the same presentable image layout.
        IncompatibleDisplayKhr = -1_000_003_001 => "VK_ERROR_INCOMPATIBLE_DISPLAY_KHR",
        /// A validation layer aborted the command.
        ValidationFailedExt = -1_000_011_001 => "VK_ERROR_VALIDATION_FAILED_EXT",
        /// One or more shaders failed to compile or link.
        InvalidShaderNv = -1_000_012_000 => "VK_ERROR_INVALID_SHADER_NV",
        /// The requested image usage is not supported by the video profile.
        ImageUsageNotSupportedKhr = -1_000_023_000 => "VK_ERROR_IMAGE_USAGE_NOT_SUPPORTED_KHR",
        /// The requested video picture layout is not supported.
        VideoPictureLayoutNotSupportedKhr = -1_000_023_001 => "VK_ERROR_VIDEO_PICTURE_LAYOUT_NOT_SUPPORTED_KHR",
        /// A video profile operation is not supported.
        VideoProfileOperationNotSupportedKhr = -1_000_023_002 => "VK_ERROR_VIDEO_PROFILE_OPERATION_NOT_SUPPORTED_KHR",
        /// A video profile format is not supported.
        VideoProfileFormatNotSupportedKhr = -1_000_023_003 => "VK_ERROR_VIDEO_PROFILE_FORMAT_NOT_SUPPORTED_KHR",
        /// A video profile codec is not supported.
        VideoProfileCodecNotSupportedKhr = -1_000_023_004 => "VK_ERROR_VIDEO_PROFILE_CODEC_NOT_SUPPORTED_KHR",
        /// The video standard header version is not supported.
        VideoStdVersionNotSupportedKhr = -1_000_023_005 => "VK_ERROR_VIDEO_STD_VERSION_NOT_SUPPORTED_KHR",
        /// The DRM format modifier plane layout is invalid.
        InvalidDrmFormatModifierPlaneLayoutExt = -1_000_158_000 => "VK_ERROR_INVALID_DRM_FORMAT_MODIFIER_PLANE_LAYOUT_EXT",
        /// The caller lacks the privileges for the requested global priority.
        NotPermittedKhr = -1_000_174_001 => "VK_ERROR_NOT_PERMITTED_KHR",
        /// Exclusive full-screen access was lost.
        FullScreenExclusiveModeLostExt = -1_000_255_000 => "VK_ERROR_FULL_SCREEN_EXCLUSIVE_MODE_LOST_EXT",
        /// The video standard parameters are invalid.
        InvalidVideoStdParametersKhr = -1_000_299_000 => "VK_ERROR_INVALID_VIDEO_STD_PARAMETERS_KHR",
        /// Image compression ran out of space.
        CompressionExhaustedExt = -1_000_338_000 => "VK_ERROR_COMPRESSION_EXHAUSTED_EXT",
    }
}

lazy_static! {
    /// `(raw value, status)` pairs sorted by raw value, built on first lookup.
    static ref STATUS_BY_VALUE: Vec<(i32, Status)> = {
        let mut table: Vec<(i32, Status)> =
            Status::ALL.iter().map(|&status| (status.as_raw(), status)).collect();
        table.sort_unstable_by_key(|&(raw, _)| raw);
        table
    };
}

impl Status {
    /// Looks a raw `VkResult` up; `None` for codes outside the known set.
    pub fn from_raw(raw: i32) -> Option<Status> {
        STATUS_BY_VALUE
            .binary_search_by_key(&raw, |&(value, _)| value)
            .ok()
            .map(|index| STATUS_BY_VALUE[index].1)
    }

    /// The native value, unchanged.
    #[inline]
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        matches!(self.family(), Family::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Status> for vk::Result {
    fn from(status: Status) -> Self {
        vk::Result::from_raw(status.as_raw())
    }
}

impl TryFrom<vk::Result> for Status {
    /// The raw value, when it is not a known code.
    type Error = i32;

    fn try_from(result: vk::Result) -> Result<Self, Self::Error> {
        Status::from_raw(result.as_raw()).ok_or(result.as_raw())
    }
}

impl ErrorKind {
    /// Canonical name of the code behind this kind.
    pub const fn name(self) -> &'static str {
        match self.status() {
            Some(status) => status.name(),
            None => UNRECOGNIZED_NAME,
        }
    }

    pub const fn family(self) -> Family {
        match self.status() {
            Some(status) => status.family(),
            None => Family::Error,
        }
    }

    /// The kind a raw code maps to, `None` for `VK_SUCCESS`. Pure and total: the same code
    /// always yields the same kind.
    pub fn classify(raw: i32) -> Option<ErrorKind> {
        match Status::from_raw(raw) {
            Some(status) => ErrorKind::from_status(status),
            None => Some(ErrorKind::Unrecognized),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name used for codes outside the known set.
pub const UNRECOGNIZED_NAME: &str = "VK_RESULT_UNRECOGNIZED";

/// Anything that carries a raw `VkResult`.
pub trait ResultCode: Copy {
    fn raw_code(self) -> i32;
}

impl ResultCode for i32 {
    #[inline]
    fn raw_code(self) -> i32 {
        self
    }
}

impl ResultCode for Status {
    #[inline]
    fn raw_code(self) -> i32 {
        self.as_raw()
    }
}

impl ResultCode for vk::Result {
    #[inline]
    fn raw_code(self) -> i32 {
        self.as_raw()
    }
}

impl ResultCode for vk::ErrorCode {
    #[inline]
    fn raw_code(self) -> i32 {
        self.as_raw()
    }
}

/// A Vulkan command failed (or, under [`Policy::Strict`], did not plainly succeed).
///
/// Displays as the canonical code name, followed by the caller's message if any:
/// `VK_ERROR_DEVICE_LOST: Queue submit failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.code, .message))]
pub struct VkError {
    kind: ErrorKind,
    code: i32,
    message: Option<String>,
}

fn describe(code: &i32, message: &Option<String>) -> String {
    let name = match Status::from_raw(*code) {
        Some(status) => status.name().to_owned(),
        None => format!("{UNRECOGNIZED_NAME}({code})"),
    };
    match message {
        Some(message) => format!("{name}: {message}"),
        None => name,
    }
}

impl VkError {
    /// Builds the error for a raw code, whatever its family.
    ///
    /// `VK_SUCCESS` has no error kind of its own: the kind is [`ErrorKind::Unrecognized`] but
    /// the message still reads `VK_SUCCESS`. Go through [`dispatch`] to avoid building one.
    /// Breaks into an attached debugger, see [`debugger`](crate::gapi::vulkan::debugger).
    pub fn new(code: impl ResultCode, message: impl Into<String>) -> Self {
        let code = code.raw_code();
        let kind = ErrorKind::classify(code).unwrap_or(ErrorKind::Unrecognized);
        let message = message.into();
        Self::raise(kind, code, (!message.is_empty()).then_some(message))
    }

    fn raise(kind: ErrorKind, code: i32, message: Option<String>) -> Self {
        let error = Self {
            kind,
            code,
            message,
        };
        debug!("Raising {error}");
        debugger::break_if_attached();
        error
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The raw code exactly as the driver returned it.
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn status(&self) -> Option<Status> {
        Status::from_raw(self.code)
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn family(&self) -> Family {
        self.kind.family()
    }
}

impl From<vk::ErrorCode> for VkError {
    fn from(code: vk::ErrorCode) -> Self {
        VkError::new(code, "")
    }
}

/// Decides what a raw code means for the caller under `policy`.
///
/// - `Ok(status)`: carry on; under [`Policy::Permissive`] the status may be informational.
/// - `Err(error)`: the code is a failure under `policy`, or is not a known code at all.
///
/// `message` is appended to the code name in the error; pass `""` for none.
pub fn dispatch(code: impl ResultCode, policy: Policy, message: &str) -> Result<Status, VkError> {
    let raw = code.raw_code();
    match Status::from_raw(raw) {
        Some(status) if !policy.rejects(status.family()) => {
            if !status.is_success() {
                trace!("Tolerating {status} ({policy:?}){}", context(message));
            }
            Ok(status)
        }
        Some(status) => match ErrorKind::from_status(status) {
            Some(kind) => Err(VkError::raise(kind, raw, owned(message))),
            None => Ok(status),
        },
        None => Err(VkError::raise(ErrorKind::Unrecognized, raw, owned(message))),
    }
}

/// Strict check: `Ok(())` only for `VK_SUCCESS`.
pub fn ensure_success(code: impl ResultCode, message: &str) -> Result<(), VkError> {
    dispatch(code, Policy::Strict, message).map(|_| ())
}

/// Permissive check: fails on error codes only and hands informational codes back.
pub fn ensure_no_error(code: impl ResultCode, message: &str) -> Result<Status, VkError> {
    dispatch(code, Policy::Permissive, message)
}

fn owned(message: &str) -> Option<String> {
    (!message.is_empty()).then(|| message.to_owned())
}

fn context(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}
