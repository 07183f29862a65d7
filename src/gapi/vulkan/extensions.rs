//! # Vulkan Extensions
//!
//! Vulkan extensions are optional, feature-specific additions to the core Vulkan API.
//! They are not part of core Vulkan but can be enabled if supported by the Vulkan
//! loader, instance layers, or physical device drivers.
//!
//! # Details
//! Extensions must be explicitly **queried for availability** and **enabled during creation**
//! of the Vulkan instance or logical device, depending on the extension type.
//!
//! ## Two Types:
//! - **Instance extensions**: enabled during `vkCreateInstance`, tracked in
//!   [`InstanceExtensionTable`]. Mostly window system integration and debugging.
//! - **Device extensions**: enabled during `vkCreateDevice`, tracked in
//!   [`DeviceExtensionTable`]. GPU-side functionality.
//!
//! Each table is filled once, right after the instance (or device) is created, from the
//! names that were actually enabled. After that it is only read: code paths that rely on an
//! extension check [`is_enabled`](InstanceExtensionTable::is_enabled) first.
use crate::enum_impl;
use log::{debug, trace};

enum_impl! {
    /// # Vulkan Instance Extensions
    pub enum InstanceExtension in InstanceExtensionTable {
        /// # VK_KHR_surface
        /// Core extension to allow Vulkan to interface with windowing systems.
        ///
        /// # Details
        /// Adds [`VkSurfaceKHR`](vulkanalia::vk::SurfaceKHR) and the queries for its
        /// capabilities, formats and present modes. Every platform surface extension below
        /// and the `VK_KHR_swapchain` device extension depend on it.
        KhrSurface = "VK_KHR_surface",
        /// # VK_KHR_display
        /// Present directly to a display without a window system.
        KhrDisplay = "VK_KHR_display",
        /// Android `ANativeWindow` surfaces.
        KhrAndroidSurface = "VK_KHR_android_surface",
        /// Win32 `HWND` surfaces.
        KhrWin32Surface = "VK_KHR_win32_surface",
        /// XCB-based Linux window integration.
        KhrXcbSurface = "VK_KHR_xcb_surface",
        /// Xlib-based Linux window integration.
        KhrXlibSurface = "VK_KHR_xlib_surface",
        /// Wayland window integration.
        KhrWaylandSurface = "VK_KHR_wayland_surface",
        /// macOS `NSView` surfaces through MoltenVK.
        MvkMacosSurface = "VK_MVK_macos_surface",
        /// `CAMetalLayer` surfaces.
        ExtMetalSurface = "VK_EXT_metal_surface",
        /// # VK_EXT_debug_report
        /// Older debug callback mechanism, superseded by `VK_EXT_debug_utils`.
        ExtDebugReport = "VK_EXT_debug_report",
        /// # VK_EXT_debug_utils
        /// Structured debugging utilities for tooling and validation.
        ///
        /// # Details
        /// This extension adds:
        /// 1. [`VkDebugUtilsMessengerEXT`](vulkanalia::vk::DebugUtilsMessengerEXT), a callback
        ///    for validation messages
        /// 2. Object names and tags
        /// 3. Queue and command buffer labels
        ///
        /// Replaces the older `VK_EXT_debug_report` and `VK_EXT_debug_marker` extensions.
        ExtDebugUtils = "VK_EXT_debug_utils",
        /// # VK_KHR_get_physical_device_properties2
        /// Extended querying for physical-device features and properties through extension
        /// chains. Promoted to core in Vulkan 1.1; still needed when targeting 1.0.
        KhrGetPhysicalDeviceProperties2 = "VK_KHR_get_physical_device_properties2",
        /// Extended surface capability queries.
        KhrGetSurfaceCapabilities2 = "VK_KHR_get_surface_capabilities2",
        /// Extra swap-chain color spaces (HDR, Display-P3, ...).
        ExtSwapchainColorspace = "VK_EXT_swapchain_colorspace",
        /// Queries for external memory handle support.
        KhrExternalMemoryCapabilities = "VK_KHR_external_memory_capabilities",
        /// Fine-grained control over what the validation layer checks.
        ExtValidationFeatures = "VK_EXT_validation_features",
        /// # VK_KHR_portability_enumeration
        /// Opt-in enumeration of portability-subset (non-conformant) devices.
        ///
        /// Main use-case: run Vulkan applications on macOS or iOS via Metal-backed drivers
        /// such as MoltenVK.
        KhrPortabilityEnumeration = "VK_KHR_portability_enumeration",
    }
}

enum_impl! {
    /// # Vulkan Device Extensions
    pub enum DeviceExtension in DeviceExtensionTable {
        /// Required for presenting images to a surface.
        KhrSwapchain = "VK_KHR_swapchain",
        /// Allocations dedicated to a single buffer or image.
        KhrDedicatedAllocation = "VK_KHR_dedicated_allocation",
        /// Memory requirement queries through extension chains.
        KhrGetMemoryRequirements2 = "VK_KHR_get_memory_requirements2",
        /// Negative viewport heights, descriptor pool fragmentation errors, and more.
        KhrMaintenance1 = "VK_KHR_maintenance1",
        /// Capture of vertex data after the last pre-rasterization stage.
        ExtTransformFeedback = "VK_EXT_transform_feedback",
        /// Object names and markers on command buffers.
        ExtDebugMarker = "VK_EXT_debug_marker",
        /// Cubic filtering for samplers on PowerVR hardware.
        ImgFilterCubic = "VK_IMG_filter_cubic",
        /// PVRTC compressed texture formats.
        ImgFormatPvrtc = "VK_IMG_format_pvrtc",
        /// Timeline semaphores with host/device waits.
        KhrTimelineSemaphore = "VK_KHR_timeline_semaphore",
        /// Bindless / variable-descriptor-count magic.
        ExtDescriptorIndexing = "VK_EXT_descriptor_indexing",
        /// Buffer device addresses in shaders.
        KhrBufferDeviceAddress = "VK_KHR_buffer_device_address",
        /// Host-side operations that can be split across worker threads.
        KhrDeferredHostOperations = "VK_KHR_deferred_host_operations",
        /// Bottom-level / top-level acceleration structures.
        KhrAccelerationStructure = "VK_KHR_acceleration_structure",
        /// Ray-tracing shader pipelines.
        KhrRayTracingPipeline = "VK_KHR_ray_tracing_pipeline",
        /// gl_DrawID etc. without vertex attributes.
        KhrShaderDrawParameters = "VK_KHR_shader_draw_parameters",
        /// 64-bit pipeline stages and access masks.
        KhrSynchronization2 = "VK_KHR_synchronization2",
        /// Rendering without render pass objects.
        KhrDynamicRendering = "VK_KHR_dynamic_rendering",
        /// Portability subset (MoltenVK etc.)
        KhrPortabilitySubset = "VK_KHR_portability_subset",
    }
}

#[doc(hidden)]
pub fn log_marked(table: &str, name: &str) {
    trace!("{table}: `{name}` enabled");
}

#[doc(hidden)]
pub fn log_ignored(table: &str, name: &str) {
    debug!("{table}: ignoring unknown extension `{name}`");
}

#[doc(hidden)]
pub fn log_unavailable(table: &str, name: &str) {
    debug!("{table}: `{name}` was requested but is not available");
}

#[cfg(test)]
mod tests {
    use super::*;
    use vulkanalia::vk;

    #[test]
    fn names_match_the_headers() {
        let pairs = [
            (InstanceExtension::KhrSurface.name(), &vk::KHR_SURFACE_EXTENSION.name),
            (InstanceExtension::ExtDebugUtils.name(), &vk::EXT_DEBUG_UTILS_EXTENSION.name),
            (
                InstanceExtension::KhrGetPhysicalDeviceProperties2.name(),
                &vk::KHR_GET_PHYSICAL_DEVICE_PROPERTIES2_EXTENSION.name,
            ),
            (
                InstanceExtension::KhrPortabilityEnumeration.name(),
                &vk::KHR_PORTABILITY_ENUMERATION_EXTENSION.name,
            ),
            (DeviceExtension::KhrSwapchain.name(), &vk::KHR_SWAPCHAIN_EXTENSION.name),
            (
                DeviceExtension::KhrTimelineSemaphore.name(),
                &vk::KHR_TIMELINE_SEMAPHORE_EXTENSION.name,
            ),
            (
                DeviceExtension::ExtDescriptorIndexing.name(),
                &vk::EXT_DESCRIPTOR_INDEXING_EXTENSION.name,
            ),
            (
                DeviceExtension::KhrPortabilitySubset.name(),
                &vk::KHR_PORTABILITY_SUBSET_EXTENSION.name,
            ),
        ];
        for (ours, theirs) in pairs {
            assert_eq!(ours, theirs.to_string());
        }
    }

    #[test]
    fn tables_are_sized_by_scope() {
        let instance = InstanceExtensionTable::new();
        let device = DeviceExtensionTable::new();
        assert_eq!(instance.capacity(), InstanceExtension::ALL.len());
        assert_eq!(device.capacity(), DeviceExtension::ALL.len());
        assert_eq!(instance.count_enabled(), 0);
        assert_eq!(device.count_enabled(), 0);
    }

    #[test]
    fn unknown_names_change_nothing() {
        let mut table = InstanceExtensionTable::from_names(["VK_KHR_surface"]);
        let before = table;
        table.mark_enabled("totally-unknown-name");
        table.mark_enabled("VK_KHR_swapchain");
        assert_eq!(table, before);
        for &ext in InstanceExtension::ALL {
            assert_eq!(table.is_enabled(ext), ext == InstanceExtension::KhrSurface);
        }
    }

    #[test]
    fn marking_is_idempotent_and_order_independent() {
        let mut once = DeviceExtensionTable::new();
        once.mark_enabled("VK_KHR_swapchain");

        let mut twice = DeviceExtensionTable::new();
        twice.mark_enabled("VK_KHR_swapchain");
        twice.mark_enabled("VK_KHR_swapchain");
        assert_eq!(once, twice);

        let forward = DeviceExtensionTable::from_names(["VK_KHR_swapchain", "VK_IMG_filter_cubic"]);
        let backward =
            DeviceExtensionTable::from_names(vec!["VK_IMG_filter_cubic".to_string(), "VK_KHR_swapchain".to_string()]);
        assert_eq!(forward, backward);
        assert_eq!(
            forward.enabled().collect::<Vec<_>>(),
            [DeviceExtension::KhrSwapchain, DeviceExtension::ImgFilterCubic]
        );
    }

    #[test]
    fn matching_is_exact() {
        let table = InstanceExtensionTable::from_names(["vk_khr_surface", "VK_KHR_surface "]);
        assert_eq!(table.count_enabled(), 0);
        assert_eq!(InstanceExtension::from_name("VK_KHR_SURFACE"), None);
        assert_eq!(
            InstanceExtension::from_name("VK_KHR_surface"),
            Some(InstanceExtension::KhrSurface)
        );
    }

    #[test]
    fn negotiation_keeps_wanted_and_available() {
        let table = InstanceExtensionTable::negotiate(
            &[InstanceExtension::KhrSurface, InstanceExtension::ExtDebugUtils],
            ["VK_EXT_debug_utils", "VK_KHR_xcb_surface", "VK_NV_something_new"],
        );
        assert_eq!(table.enabled_names(), ["VK_EXT_debug_utils"]);
        assert!(table.is_enabled_by_name("VK_EXT_debug_utils"));
        assert!(!table.is_enabled_by_name("VK_KHR_xcb_surface"));
        assert!(!table.is_enabled_by_name("VK_NV_something_new"));
    }

    #[test]
    fn display_uses_the_vulkan_name() {
        assert_eq!(DeviceExtension::KhrSynchronization2.to_string(), "VK_KHR_synchronization2");
    }
}
