//! # Plain structures
//!
//! Vulkan hands back plenty of plain-old-data structures whose only interesting part is the
//! type of their fields. [`pod_struct!`](crate::pod_struct) writes the wrapper for one of them:
//!
//! - `#[repr(C)]`, same fields in the same order, so the layout matches the native one;
//! - a `const fn new` taking every field;
//! - one getter per field and one chaining setter (`set_*`, returning `&mut Self`);
//! - `From` conversions both ways with the `vulkanalia` structure.
//!
//! Flag fields use the typed groups from [`flag_groups`](crate::gapi::vulkan::enums::flag_groups),
//! so `properties.queue_flags()` is a [`QueueFlags`] and can't be mixed up with any other mask.
use crate::gapi::vulkan::enums::flag_groups::{MemoryPropertyFlags, QueueFlags};
use vulkanalia::vk;

/// Declares a `#[repr(C)]` accessor wrapper around a native structure.
///
/// ```
/// use vulkanalia::vk;
///
/// burst_vk::pod_struct! {
///     /// A 2D rectangle size.
///     pub struct Size from vk::Extent2D {
///         width / set_width: u32,
///         height / set_height: u32,
///     }
/// }
///
/// let mut size = Size::new(800, 600);
/// size.set_width(1024).set_height(768);
/// assert_eq!(vk::Extent2D::from(size).width, 1024);
/// ```
#[macro_export]
macro_rules! pod_struct {
    (
        $(#[$outer:meta])*
        $vis:vis struct $name:ident from $native:path {
            $(
                $(#[$inner:meta])*
                $field:ident / $setter:ident : $ty:ty,
            )+
        }
    ) => {
        $(#[$outer])*
        #[repr(C)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name {
            $( $field: $ty, )+
        }

        impl $name {
            #[inline]
            pub const fn new($( $field: $ty ),+) -> Self {
                Self { $( $field, )+ }
            }

            $(
                $(#[$inner])*
                #[inline]
                pub const fn $field(&self) -> $ty {
                    self.$field
                }

                #[inline]
                pub fn $setter(&mut self, value: $ty) -> &mut Self {
                    self.$field = value;
                    self
                }
            )+
        }

        #[allow(clippy::useless_conversion)]
        impl From<$native> for $name {
            fn from(native: $native) -> Self {
                Self { $( $field: native.$field.into(), )+ }
            }
        }

        #[allow(clippy::useless_conversion)]
        impl From<$name> for $native {
            fn from(value: $name) -> Self {
                Self { $( $field: value.$field.into(), )+ }
            }
        }
    };
}

pod_struct! {
    /// Width and height of a 2D image or surface.
    pub struct Extent2D from vk::Extent2D {
        width / set_width: u32,
        height / set_height: u32,
    }
}

pod_struct! {
    /// Width, height and depth of an image region.
    pub struct Extent3D from vk::Extent3D {
        width / set_width: u32,
        height / set_height: u32,
        depth / set_depth: u32,
    }
}

pod_struct! {
    /// Signed 2D offset, e.g. the origin of a scissor rectangle.
    pub struct Offset2D from vk::Offset2D {
        x / set_x: i32,
        y / set_y: i32,
    }
}

pod_struct! {
    /// # Queue family properties
    /// What one queue family of a physical device can do.
    pub struct QueueFamilyProperties from vk::QueueFamilyProperties {
        /// Capabilities shared by every queue of the family.
        queue_flags / set_queue_flags: QueueFlags,
        /// Number of queues in the family.
        queue_count / set_queue_count: u32,
        /// Meaningful bits in timestamps written by these queues, `0` if unsupported.
        timestamp_valid_bits / set_timestamp_valid_bits: u32,
        /// Minimum granularity of image transfers on these queues.
        min_image_transfer_granularity / set_min_image_transfer_granularity: Extent3D,
    }
}

pod_struct! {
    pub struct MemoryType from vk::MemoryType {
        property_flags / set_property_flags: MemoryPropertyFlags,
        /// Index into the device's memory heaps.
        heap_index / set_heap_index: u32,
    }
}

impl QueueFamilyProperties {
    /// `true` if every capability in `flags` is offered by this family.
    pub fn supports(&self, flags: QueueFlags) -> bool {
        self.queue_flags.contains(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gapi::vulkan::enums::flag_groups::{MemoryPropertyFlagBits, QueueFlagBits};
    use std::mem::{align_of, size_of};

    #[test]
    fn layouts_match_the_native_structures() {
        assert_eq!(size_of::<Extent2D>(), size_of::<vk::Extent2D>());
        assert_eq!(size_of::<Extent3D>(), size_of::<vk::Extent3D>());
        assert_eq!(size_of::<Offset2D>(), size_of::<vk::Offset2D>());
        assert_eq!(
            size_of::<QueueFamilyProperties>(),
            size_of::<vk::QueueFamilyProperties>()
        );
        assert_eq!(
            align_of::<QueueFamilyProperties>(),
            align_of::<vk::QueueFamilyProperties>()
        );
        assert_eq!(size_of::<MemoryType>(), size_of::<vk::MemoryType>());
    }

    #[test]
    fn setters_chain() {
        let mut extent = Extent3D::default();
        extent.set_width(64).set_height(32).set_depth(1);
        assert_eq!(extent, Extent3D::new(64, 32, 1));
        assert_eq!((extent.width(), extent.height(), extent.depth()), (64, 32, 1));
    }

    #[test]
    fn queue_family_keeps_the_typed_flags() {
        let native = vk::QueueFamilyProperties {
            queue_flags: vk::QueueFlags::GRAPHICS | vk::QueueFlags::TRANSFER,
            queue_count: 4,
            timestamp_valid_bits: 64,
            min_image_transfer_granularity: vk::Extent3D {
                width: 1,
                height: 1,
                depth: 1,
            },
        };
        let family = QueueFamilyProperties::from(native);
        assert_eq!(family.queue_flags().render(), "GRAPHICS|TRANSFER");
        assert_eq!(family.queue_count(), 4);
        assert_eq!(family.min_image_transfer_granularity(), Extent3D::new(1, 1, 1));
        assert!(family.supports(QueueFlagBits::GRAPHICS));
        assert!(!family.supports(QueueFlagBits::GRAPHICS | QueueFlagBits::COMPUTE));

        let back = vk::QueueFamilyProperties::from(family);
        assert_eq!(back.queue_flags, native.queue_flags);
        assert_eq!(back.queue_count, 4);
    }

    #[test]
    fn memory_type_flags() {
        let mut memory = MemoryType::new(MemoryPropertyFlagBits::DEVICE_LOCAL, 0);
        memory
            .set_property_flags(MemoryPropertyFlagBits::HOST_VISIBLE | MemoryPropertyFlagBits::HOST_COHERENT)
            .set_heap_index(1);
        assert_eq!(memory.property_flags().render(), "HOST_VISIBLE|HOST_COHERENT");
        assert_eq!(vk::MemoryType::from(memory).heap_index, 1);
    }

    #[test]
    fn offsets_are_signed() {
        let offset = Offset2D::new(-8, 16);
        let native = vk::Offset2D::from(offset);
        assert_eq!((native.x, native.y), (-8, 16));
    }
}
