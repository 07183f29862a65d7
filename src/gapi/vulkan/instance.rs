use crate::gapi::vulkan::config::VALIDATION_ENABLED;
use crate::gapi::vulkan::entry::Entry;
use crate::gapi::vulkan::errors::VkError;
use crate::gapi::vulkan::extensions::{
    DeviceExtension, DeviceExtensionTable, InstanceExtension, InstanceExtensionTable,
};
use crate::gapi::vulkan::structs::{MemoryType, QueueFamilyProperties};
use crate::{debug_success, info_success, warn_warning};
use anyhow::Context;
use log::{debug, info, trace};
use std::ffi::{CString, c_char};
use vulkanalia::vk::{self, HasBuilder, InstanceV1_0};
use vulkanalia::{Instance as VkInstance, Version};

/// The Khronos validation layer, enabled when available and the `validation` feature is on.
pub const VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// Instance extensions asked for when present. Nothing here is required: the tables record
/// what was actually enabled.
pub const WANTED_INSTANCE_EXTENSIONS: &[InstanceExtension] = &[
    InstanceExtension::KhrSurface,
    InstanceExtension::ExtDebugUtils,
    InstanceExtension::KhrGetPhysicalDeviceProperties2,
    InstanceExtension::KhrPortabilityEnumeration,
];

/// Device extensions checked on every physical device.
pub const WANTED_DEVICE_EXTENSIONS: &[DeviceExtension] = &[
    DeviceExtension::KhrSwapchain,
    DeviceExtension::KhrTimelineSemaphore,
    DeviceExtension::ExtDescriptorIndexing,
    DeviceExtension::KhrSynchronization2,
    DeviceExtension::KhrDynamicRendering,
    DeviceExtension::KhrPortabilitySubset,
];

/// Required by the Vulkan SDK on macOS since 1.3.216.
pub const PORTABILITY_MACOS_VERSION: Version = Version::new(1, 3, 216);

/// # Vulkan Instance
/// The connection between this program and the Vulkan driver.
///
/// # Details
/// Besides the `vulkanalia` handle, the instance owns the [`InstanceExtensionTable`] filled
/// from the extensions it was created with. The table is read-only afterwards.
///
/// > Note: Instance captures the driver state at creation time, so any changes to the driver,
/// > layers, or extensions at system level after instance creation will not be reflected in the
/// > instance.
#[derive(Debug)]
pub struct Instance {
    instance: VkInstance,
    extensions: InstanceExtensionTable,
}

/// One physical device as seen through the instance.
#[derive(Clone, Debug)]
pub struct PhysicalDeviceReport {
    pub name: String,
    pub queue_families: Vec<QueueFamilyProperties>,
    pub memory_types: Vec<MemoryType>,
    pub extensions: DeviceExtensionTable,
}

impl Instance {
    /// # Instance Creation
    ///
    /// - Negotiates [`WANTED_INSTANCE_EXTENSIONS`] against what the loader offers.
    /// - Adds [`VALIDATION_LAYER`] if validation is enabled and the layer is installed.
    /// - Creates the instance and marks the negotiated extensions as enabled.
    pub fn new(entry: &Entry) -> anyhow::Result<Self> {
        debug!("Checking if system is compatible with Vulkan...");
        Self::check_compatibility(entry)?;
        info_success!("System is compatible with Vulkan!");

        let available = entry.available_extensions()?;
        trace!("Available instance extensions: \n\t{:?}", available);
        let negotiated = InstanceExtensionTable::negotiate(WANTED_INSTANCE_EXTENSIONS, &available);
        info!("Requested extensions: \n\t{:?}", negotiated.enabled_names());
        let extension_names = c_strings(negotiated.enabled_names())?;
        let extension_ptrs = pointers(&extension_names);

        let layer_names = c_strings(Self::layers(entry)?)?;
        let layer_ptrs = pointers(&layer_names);

        trace!("Building application info");
        let application_info = vk::ApplicationInfo::builder()
            .application_name(b"Burst VK report\0")
            .application_version(vk::make_version(0, 1, 0))
            .engine_name(b"Burst\0")
            .engine_version(vk::make_version(0, 1, 0))
            .api_version(vk::make_version(1, 0, 0))
            .build();

        let flags = if negotiated.is_enabled(InstanceExtension::KhrPortabilityEnumeration) {
            vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR
        } else {
            vk::InstanceCreateFlags::empty()
        };

        let info = vk::InstanceCreateInfo::builder()
            .application_info(&application_info)
            .enabled_layer_names(&layer_ptrs)
            .enabled_extension_names(&extension_ptrs)
            .flags(flags);
        trace!("Creating vulkan instance...");
        let instance = entry.create_instance(&info)?;
        info_success!("Vulkan Instance created!");

        let mut extensions = InstanceExtensionTable::new();
        extensions.mark_enabled_many(negotiated.enabled_names());
        Ok(Self {
            instance,
            extensions,
        })
    }

    /// Fails on macOS when the loader is too old to enumerate portability devices.
    fn check_compatibility(entry: &Entry) -> anyhow::Result<()> {
        if !cfg!(target_os = "macos") {
            return Ok(());
        }
        trace!(
            "MacOS detected, checking Entry version ({} required)",
            PORTABILITY_MACOS_VERSION
        );
        let entry_version = entry.version()?;
        if entry_version < PORTABILITY_MACOS_VERSION {
            anyhow::bail!(
                "Vulkan {} is too old for macOS portability, {} required",
                entry_version,
                PORTABILITY_MACOS_VERSION
            );
        }
        Ok(())
    }

    fn layers(entry: &Entry) -> Result<Vec<&'static str>, VkError> {
        if !VALIDATION_ENABLED {
            return Ok(Vec::new());
        }
        if entry.available_layers()?.iter().any(|l| l == VALIDATION_LAYER) {
            debug_success!("Validation layer available");
            Ok(vec![VALIDATION_LAYER])
        } else {
            warn_warning!("{VALIDATION_LAYER} requested but not installed, continuing without it");
            Ok(Vec::new())
        }
    }

    pub fn extensions(&self) -> &InstanceExtensionTable {
        &self.extensions
    }

    /// Queue families, memory types and negotiated extensions of every physical device.
    pub fn physical_devices(&self) -> Result<Vec<PhysicalDeviceReport>, VkError> {
        let devices = unsafe { self.instance.enumerate_physical_devices() }
            .map_err(|code| VkError::new(code, "Enumerating physical devices"))?;
        devices
            .into_iter()
            .map(|device| self.report(device))
            .collect()
    }

    fn report(&self, device: vk::PhysicalDevice) -> Result<PhysicalDeviceReport, VkError> {
        let properties = unsafe { self.instance.get_physical_device_properties(device) };
        let name = properties.device_name.to_string();

        let queue_families =
            unsafe { self.instance.get_physical_device_queue_family_properties(device) }
                .into_iter()
                .map(QueueFamilyProperties::from)
                .collect();

        let memory = unsafe { self.instance.get_physical_device_memory_properties(device) };
        let memory_types = memory
            .memory_types
            .iter()
            .take(memory.memory_type_count as usize)
            .copied()
            .map(MemoryType::from)
            .collect();

        let available = unsafe {
            self.instance
                .enumerate_device_extension_properties(device, None)
        }
        .map_err(|code| VkError::new(code, format!("Enumerating extensions of {name}")))?;
        let extensions = DeviceExtensionTable::negotiate(
            WANTED_DEVICE_EXTENSIONS,
            available.iter().map(|e| e.extension_name.to_string()),
        );

        Ok(PhysicalDeviceReport {
            name,
            queue_families,
            memory_types,
            extensions,
        })
    }

    /// Destroys the instance. Takes `self`, so the handle can't be destroyed twice:
    ///
    /// ```compile_fail
    /// fn twice(instance: burst_vk::gapi::vulkan::instance::Instance) {
    ///     instance.destroy();
    ///     instance.destroy();
    /// }
    /// ```
    pub fn destroy(self) {
        unsafe { self.instance.destroy_instance(None) };
        debug!("Vulkan Instance destroyed");
    }
}

fn c_strings<I, S>(names: I) -> anyhow::Result<Vec<CString>>
where
    I: IntoIterator<Item = S>,
    S: Into<Vec<u8>>,
{
    names
        .into_iter()
        .map(|name| CString::new(name).context("Name contains a NUL byte"))
        .collect()
}

fn pointers(names: &[CString]) -> Vec<*const c_char> {
    names.iter().map(|name| name.as_ptr()).collect()
}
