use burst_vk::{DeviceExtension, DeviceExtensionTable, InstanceExtension, InstanceExtensionTable};

#[test]
fn startup_negotiation_then_queries() {
    let enabled = ["VK_KHR_surface", "VK_KHR_xlib_surface", "VK_EXT_debug_utils"];
    let table = InstanceExtensionTable::from_names(enabled);

    assert!(table.is_enabled(InstanceExtension::KhrSurface));
    assert!(table.is_enabled(InstanceExtension::KhrXlibSurface));
    assert!(table.is_enabled(InstanceExtension::ExtDebugUtils));
    assert!(!table.is_enabled(InstanceExtension::ExtDebugReport));
    assert_eq!(table.count_enabled(), 3);
}

#[test]
fn device_names_do_not_leak_into_the_instance_table() {
    let mut instance = InstanceExtensionTable::default();
    instance.mark_enabled(DeviceExtension::KhrSwapchain.name());
    assert_eq!(instance.count_enabled(), 0);

    let mut device = DeviceExtensionTable::default();
    device.mark_enabled(InstanceExtension::KhrSurface.name());
    device.mark_enabled(DeviceExtension::KhrSwapchain.name());
    assert_eq!(device.enabled().collect::<Vec<_>>(), [DeviceExtension::KhrSwapchain]);
}

#[test]
fn repeated_batches_give_the_same_table() {
    let batch = ["VK_KHR_swapchain", "VK_KHR_maintenance1", "VK_UNKNOWN_vendor_thing"];
    let mut table = DeviceExtensionTable::new();
    table.mark_enabled_many(batch);
    let once = table;
    table.mark_enabled_many(batch);
    assert_eq!(table, once);
    assert_eq!(table.enabled_names(), ["VK_KHR_swapchain", "VK_KHR_maintenance1"]);
}

#[test]
fn every_known_name_round_trips() {
    for &ext in DeviceExtension::ALL {
        assert_eq!(DeviceExtension::from_name(ext.name()), Some(ext));
    }
    for &ext in InstanceExtension::ALL {
        assert_eq!(InstanceExtension::from_name(ext.name()), Some(ext));
    }
    assert_eq!(DeviceExtension::COUNT, DeviceExtension::ALL.len());
}
