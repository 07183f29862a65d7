use crate::gapi::vulkan::errors::VkError;
use anyhow::{Context, anyhow};
use vulkanalia::loader::{LIBRARY, LibloadingLoader};
use vulkanalia::vk::{self, EntryV1_0};
use vulkanalia::{Entry as VkEntry, Instance as VkInstance, Version};

/// # Vulkan Entry
/// The entry point for Vulkan: the object that dynamically loads the Vulkan API.
///
/// # Details
/// Creating the `Entry` finds the loader in the system (`vulkan-1.dll`, `libvulkan.so.1`, ...)
/// and fetches its global symbols (`vkCreateInstance`, the instance-level enumerations).
/// No ICD has been loaded at that point.
///
/// Every query here goes through the result taxonomy, so a failing call reports
/// `VK_ERROR_*: <what was being done>`.
#[derive(Debug, Clone)]
pub struct Entry {
    entry: VkEntry,
}

impl Entry {
    /// Loads the Vulkan loader and its global commands.
    ///
    /// # Errors
    /// - The loader library is not installed.
    /// - The loader does not export the global commands.
    pub fn new() -> anyhow::Result<Self> {
        // Finds the dynamic library (e.g. `.so` or `.dll`)
        let loader = unsafe {
            LibloadingLoader::new(LIBRARY)
                .with_context(|| format!("Failed to load Vulkan library: {}", LIBRARY))?
        };
        let entry = unsafe {
            VkEntry::new(loader).map_err(|b| anyhow!("Failed to load Vulkan entry: {}", b))?
        };
        Ok(Self { entry })
    }

    /// Highest Vulkan version the loader supports. The ICDs may support a different one.
    pub fn version(&self) -> Result<Version, VkError> {
        self.entry
            .version()
            .map_err(|code| VkError::new(code, "Querying the loader version"))
    }

    /// Names of the instance layers installed on this system.
    pub fn available_layers(&self) -> Result<Vec<String>, VkError> {
        let layers = unsafe { self.entry.enumerate_instance_layer_properties() }
            .map_err(|code| VkError::new(code, "Enumerating instance layers"))?;
        Ok(layers.iter().map(|l| l.layer_name.to_string()).collect())
    }

    /// Names of the instance extensions the loader and the ICDs expose.
    ///
    /// # Details
    /// Calls `vkEnumerateInstanceExtensionProperties` without a layer: the loader scans the
    /// ICD manifests and adds its own extensions (`VK_KHR_surface`, `VK_EXT_debug_utils`).
    pub fn available_extensions(&self) -> Result<Vec<String>, VkError> {
        let extensions = unsafe { self.entry.enumerate_instance_extension_properties(None) }
            .map_err(|code| VkError::new(code, "Enumerating instance extensions"))?;
        Ok(extensions
            .iter()
            .map(|e| e.extension_name.to_string())
            .collect())
    }

    pub(crate) fn create_instance(
        &self,
        info: &vk::InstanceCreateInfo,
    ) -> Result<VkInstance, VkError> {
        unsafe { self.entry.create_instance(info, None) }
            .map_err(|code| VkError::new(code, "Creating the Vulkan instance"))
    }
}
