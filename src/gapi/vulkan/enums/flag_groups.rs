//! Flag groups instantiated from the Vulkan headers.
//!
//! Every value below must match `vulkan_core.h` bit-for-bit; the tests check them against
//! the `vulkanalia` bindings. Declaration order is the header's order, which is what
//! [`FlagSet::render`](crate::flags::FlagSet::render) follows.
use vulkanalia::vk;

use crate::flag_group;

flag_group! {
    /// # Queue capabilities (`VkQueueFlags`)
    /// What kind of work a queue family accepts.
    pub struct QueueFlagBits => QueueFlags: u32 {
        /// Graphics operations (draws, render passes).
        const GRAPHICS = 0x0000_0001;
        /// Compute dispatches.
        const COMPUTE = 0x0000_0002;
        /// Copies between buffers and images.
        const TRANSFER = 0x0000_0004;
        /// Sparse memory binding.
        const SPARSE_BINDING = 0x0000_0008;
        /// Protected memory queues (Vulkan 1.1).
        const PROTECTED = 0x0000_0010;
        /// `VK_KHR_video_decode_queue`.
        const VIDEO_DECODE_KHR = 0x0000_0020;
    }
}

flag_group! {
    /// # Image usage (`VkImageUsageFlags`)
    pub struct ImageUsageFlagBits => ImageUsageFlags: u32 {
        const TRANSFER_SRC = 0x0000_0001;
        const TRANSFER_DST = 0x0000_0002;
        const SAMPLED = 0x0000_0004;
        const STORAGE = 0x0000_0008;
        const COLOR_ATTACHMENT = 0x0000_0010;
        const DEPTH_STENCIL_ATTACHMENT = 0x0000_0020;
        const TRANSIENT_ATTACHMENT = 0x0000_0040;
        const INPUT_ATTACHMENT = 0x0000_0080;
        // Declared before the lower shading-rate bit, as in the registry.
        const FRAGMENT_DENSITY_MAP_EXT = 0x0000_0200;
        const FRAGMENT_SHADING_RATE_ATTACHMENT_KHR = 0x0000_0100;
    }
}

flag_group! {
    /// # Buffer usage (`VkBufferUsageFlags`)
    pub struct BufferUsageFlagBits => BufferUsageFlags: u32 {
        const TRANSFER_SRC = 0x0000_0001;
        const TRANSFER_DST = 0x0000_0002;
        const UNIFORM_TEXEL_BUFFER = 0x0000_0004;
        const STORAGE_TEXEL_BUFFER = 0x0000_0008;
        const UNIFORM_BUFFER = 0x0000_0010;
        const STORAGE_BUFFER = 0x0000_0020;
        const INDEX_BUFFER = 0x0000_0040;
        const VERTEX_BUFFER = 0x0000_0080;
        const INDIRECT_BUFFER = 0x0000_0100;
        const SHADER_DEVICE_ADDRESS = 0x0002_0000;
    }
}

flag_group! {
    /// # Pipeline stages (`VkPipelineStageFlags`)
    pub struct PipelineStageFlagBits => PipelineStageFlags: u32 {
        const TOP_OF_PIPE = 0x0000_0001;
        const DRAW_INDIRECT = 0x0000_0002;
        const VERTEX_INPUT = 0x0000_0004;
        const VERTEX_SHADER = 0x0000_0008;
        const TESSELLATION_CONTROL_SHADER = 0x0000_0010;
        const TESSELLATION_EVALUATION_SHADER = 0x0000_0020;
        const GEOMETRY_SHADER = 0x0000_0040;
        const FRAGMENT_SHADER = 0x0000_0080;
        const EARLY_FRAGMENT_TESTS = 0x0000_0100;
        const LATE_FRAGMENT_TESTS = 0x0000_0200;
        const COLOR_ATTACHMENT_OUTPUT = 0x0000_0400;
        const COMPUTE_SHADER = 0x0000_0800;
        const TRANSFER = 0x0000_1000;
        const BOTTOM_OF_PIPE = 0x0000_2000;
        const HOST = 0x0000_4000;
        const ALL_GRAPHICS = 0x0000_8000;
        const ALL_COMMANDS = 0x0001_0000;
    }
}

flag_group! {
    /// # Pipeline stages, 64-bit (`VkPipelineStageFlags2`, Vulkan 1.3)
    /// The synchronization2 stages outgrew 32 bits, so this group is backed by a `u64`.
    pub struct PipelineStageFlagBits2 => PipelineStageFlags2: u64 {
        const NONE = 0;
        const TOP_OF_PIPE = 0x0000_0001;
        const DRAW_INDIRECT = 0x0000_0002;
        const VERTEX_INPUT = 0x0000_0004;
        const VERTEX_SHADER = 0x0000_0008;
        const TESSELLATION_CONTROL_SHADER = 0x0000_0010;
        const TESSELLATION_EVALUATION_SHADER = 0x0000_0020;
        const GEOMETRY_SHADER = 0x0000_0040;
        const FRAGMENT_SHADER = 0x0000_0080;
        const EARLY_FRAGMENT_TESTS = 0x0000_0100;
        const LATE_FRAGMENT_TESTS = 0x0000_0200;
        const COLOR_ATTACHMENT_OUTPUT = 0x0000_0400;
        const COMPUTE_SHADER = 0x0000_0800;
        const ALL_TRANSFER = 0x0000_1000;
        const BOTTOM_OF_PIPE = 0x0000_2000;
        const HOST = 0x0000_4000;
        const ALL_GRAPHICS = 0x0000_8000;
        const ALL_COMMANDS = 0x0001_0000;
        const COPY = 0x0000_0001_0000_0000;
        const RESOLVE = 0x0000_0002_0000_0000;
        const BLIT = 0x0000_0004_0000_0000;
        const CLEAR = 0x0000_0008_0000_0000;
        const INDEX_INPUT = 0x0000_0010_0000_0000;
        const VERTEX_ATTRIBUTE_INPUT = 0x0000_0020_0000_0000;
        const PRE_RASTERIZATION_SHADERS = 0x0000_0040_0000_0000;
    }
}

flag_group! {
    /// # Memory properties (`VkMemoryPropertyFlags`)
    pub struct MemoryPropertyFlagBits => MemoryPropertyFlags: u32 {
        const DEVICE_LOCAL = 0x0000_0001;
        const HOST_VISIBLE = 0x0000_0002;
        const HOST_COHERENT = 0x0000_0004;
        const HOST_CACHED = 0x0000_0008;
        const LAZILY_ALLOCATED = 0x0000_0010;
        const PROTECTED = 0x0000_0020;
    }
}

flag_group! {
    /// # Shader stages (`VkShaderStageFlags`)
    /// `ALL_GRAPHICS` and `ALL` are multi-bit masks; they render only when every one of
    /// their bits is present.
    pub struct ShaderStageFlagBits => ShaderStageFlags: u32 {
        const VERTEX = 0x0000_0001;
        const TESSELLATION_CONTROL = 0x0000_0002;
        const TESSELLATION_EVALUATION = 0x0000_0004;
        const GEOMETRY = 0x0000_0008;
        const FRAGMENT = 0x0000_0010;
        const ALL_GRAPHICS = 0x0000_001F;
        const COMPUTE = 0x0000_0020;
        const ALL = 0x7FFF_FFFF;
    }
}

flag_group! {
    /// # Cull mode (`VkCullModeFlags`)
    pub struct CullModeFlagBits => CullModeFlags: u32 {
        const NONE = 0;
        const FRONT = 0x0000_0001;
        const BACK = 0x0000_0002;
        const FRONT_AND_BACK = 0x0000_0003;
    }
}

flag_group! {
    /// # `VkDeviceCreateFlags`
    /// Reserved for future use.
    pub struct DeviceCreateFlagBits => DeviceCreateFlags: u32 {}
}

flag_group! {
    /// # `VkSemaphoreCreateFlags`
    /// Reserved for future use.
    pub struct SemaphoreCreateFlagBits => SemaphoreCreateFlags: u32 {}
}

flag_group! {
    /// # `VkShaderModuleCreateFlags`
    /// Reserved for future use.
    pub struct ShaderModuleCreateFlagBits => ShaderModuleCreateFlags: u32 {}
}

/// Conversions between a flag group and the matching `vulkanalia` bitflags type.
///
/// Going to `vulkanalia` truncates to the bits it knows about; coming from it keeps every bit.
macro_rules! vk_flags_interop {
    ($($alias:ident => $vk:ty),+ $(,)?) => {
        $(
            impl From<$vk> for $alias {
                #[inline]
                fn from(flags: $vk) -> Self {
                    Self::from_bits_retain(flags.bits())
                }
            }

            impl From<$alias> for $vk {
                #[inline]
                fn from(flags: $alias) -> Self {
                    <$vk>::from_bits_truncate(flags.bits())
                }
            }
        )+
    };
}

vk_flags_interop! {
    QueueFlags => vk::QueueFlags,
    ImageUsageFlags => vk::ImageUsageFlags,
    BufferUsageFlags => vk::BufferUsageFlags,
    PipelineStageFlags => vk::PipelineStageFlags,
    PipelineStageFlags2 => vk::PipelineStageFlags2,
    MemoryPropertyFlags => vk::MemoryPropertyFlags,
    ShaderStageFlags => vk::ShaderStageFlags,
    CullModeFlags => vk::CullModeFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_bits_match_the_abi() {
        assert!(QueueFlagBits::GRAPHICS == vk::QueueFlags::GRAPHICS.bits());
        assert!(QueueFlagBits::COMPUTE == vk::QueueFlags::COMPUTE.bits());
        assert!(QueueFlagBits::TRANSFER == vk::QueueFlags::TRANSFER.bits());
        assert!(QueueFlagBits::SPARSE_BINDING == vk::QueueFlags::SPARSE_BINDING.bits());
        assert!(QueueFlagBits::PROTECTED == vk::QueueFlags::PROTECTED.bits());
    }

    #[test]
    fn image_and_buffer_usage_bits_match_the_abi() {
        assert!(ImageUsageFlagBits::TRANSFER_SRC == vk::ImageUsageFlags::TRANSFER_SRC.bits());
        assert!(ImageUsageFlagBits::SAMPLED == vk::ImageUsageFlags::SAMPLED.bits());
        assert!(ImageUsageFlagBits::STORAGE == vk::ImageUsageFlags::STORAGE.bits());
        assert!(
            ImageUsageFlagBits::COLOR_ATTACHMENT == vk::ImageUsageFlags::COLOR_ATTACHMENT.bits()
        );
        assert!(
            ImageUsageFlagBits::INPUT_ATTACHMENT == vk::ImageUsageFlags::INPUT_ATTACHMENT.bits()
        );
        assert!(BufferUsageFlagBits::INDEX_BUFFER == vk::BufferUsageFlags::INDEX_BUFFER.bits());
        assert!(
            BufferUsageFlagBits::SHADER_DEVICE_ADDRESS
                == vk::BufferUsageFlags::SHADER_DEVICE_ADDRESS.bits()
        );
    }

    #[test]
    fn stage_bits_match_the_abi() {
        assert!(
            PipelineStageFlagBits::ALL_COMMANDS == vk::PipelineStageFlags::ALL_COMMANDS.bits()
        );
        assert!(
            PipelineStageFlagBits::COLOR_ATTACHMENT_OUTPUT
                == vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT.bits()
        );
        assert!(PipelineStageFlagBits2::COPY == vk::PipelineStageFlags2::COPY.bits());
        assert!(
            PipelineStageFlagBits2::PRE_RASTERIZATION_SHADERS
                == vk::PipelineStageFlags2::PRE_RASTERIZATION_SHADERS.bits()
        );
        assert!(ShaderStageFlagBits::ALL_GRAPHICS == vk::ShaderStageFlags::ALL_GRAPHICS.bits());
        assert!(ShaderStageFlagBits::ALL == vk::ShaderStageFlags::ALL.bits());
        assert!(MemoryPropertyFlagBits::HOST_COHERENT == vk::MemoryPropertyFlags::HOST_COHERENT.bits());
        assert!(CullModeFlagBits::FRONT_AND_BACK == vk::CullModeFlags::FRONT_AND_BACK.bits());
    }

    #[test]
    fn render_follows_header_order() {
        let usage = ImageUsageFlagBits::FRAGMENT_SHADING_RATE_ATTACHMENT_KHR
            | ImageUsageFlagBits::FRAGMENT_DENSITY_MAP_EXT
            | ImageUsageFlagBits::SAMPLED;
        assert_eq!(
            usage.render(),
            "SAMPLED|FRAGMENT_DENSITY_MAP_EXT|FRAGMENT_SHADING_RATE_ATTACHMENT_KHR"
        );
    }

    #[test]
    fn multi_bit_masks_render_only_when_complete() {
        let vertex_fragment = ShaderStageFlagBits::VERTEX | ShaderStageFlagBits::FRAGMENT;
        assert_eq!(vertex_fragment.render(), "VERTEX|FRAGMENT");

        let graphics = ShaderStageFlags::from_bits_retain(0x1F);
        assert_eq!(
            graphics.render(),
            "VERTEX|TESSELLATION_CONTROL|TESSELLATION_EVALUATION|GEOMETRY|FRAGMENT|ALL_GRAPHICS"
        );
        assert_eq!(CullModeFlagBits::FRONT_AND_BACK.render(), "FRONT|BACK|FRONT_AND_BACK");
        assert_eq!(CullModeFlagBits::NONE.render(), "");
    }

    #[test]
    fn wide_group_keeps_high_bits() {
        let stages = PipelineStageFlagBits2::COPY | PipelineStageFlagBits2::FRAGMENT_SHADER;
        assert!(stages == 0x0000_0001_0000_0080u64);
        assert_eq!(stages.render(), "FRAGMENT_SHADER|COPY");
        assert_eq!(stages >> 32, PipelineStageFlagBits2::TOP_OF_PIPE);
    }

    #[test]
    fn reserved_groups_render_reserved() {
        assert_eq!(DeviceCreateFlags::empty().render(), "reserved");
        assert_eq!(SemaphoreCreateFlags::from_bits_retain(1).render(), "reserved");
        assert_eq!(ShaderModuleCreateFlags::default().to_string(), "reserved");
    }

    #[test]
    fn converts_to_and_from_vulkanalia() {
        let raw = vk::QueueFlags::GRAPHICS | vk::QueueFlags::TRANSFER;
        let ours = QueueFlags::from(raw);
        assert_eq!(ours, QueueFlagBits::GRAPHICS | QueueFlagBits::TRANSFER);
        assert_eq!(vk::QueueFlags::from(ours), raw);

        let stages = PipelineStageFlags2::from(vk::PipelineStageFlags2::BLIT);
        assert_eq!(stages, PipelineStageFlagBits2::BLIT);
    }
}
