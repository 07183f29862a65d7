use anyhow::Result;
use burst_vk::gapi::vulkan::entry::Entry;
use burst_vk::gapi::vulkan::instance::{Instance, PhysicalDeviceReport};
use burst_vk::logging::init_log;
use burst_vk::{QueueFlagBits, info_success};
use log::{debug, error, info};

fn main() -> Result<()> {
    if let Err(err) = run() {
        error!("Oops! Something went wrong: {}", err);

        let mut source = err.source();
        while let Some(cause) = source {
            error!("Caused by: {}", cause);
            source = cause.source();
        }

        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    init_log()?;

    debug!("Loading Vulkan...");
    let entry = Entry::new()?;
    info_success!("Vulkan loader {} found!", entry.version()?);

    let instance = Instance::new(&entry)?;
    info!(
        "Instance extensions: {:?}",
        instance.extensions().enabled_names()
    );

    let devices = instance.physical_devices();
    // The instance must go even when the device queries fail.
    instance.destroy();

    for device in devices? {
        report(&device);
    }
    Ok(())
}

fn report(device: &PhysicalDeviceReport) {
    info!("{}", device.name);
    for (index, family) in device.queue_families.iter().enumerate() {
        let graphics = if family.supports(QueueFlagBits::GRAPHICS) {
            " (graphics)"
        } else {
            ""
        };
        info!(
            "  queue family {index}: {} x{}{graphics}",
            family.queue_flags(),
            family.queue_count()
        );
    }
    for (index, memory) in device.memory_types.iter().enumerate() {
        debug!(
            "  memory type {index}: heap {} {:?}",
            memory.heap_index(),
            memory.property_flags()
        );
    }
    info!("  extensions: {:?}", device.extensions.enabled_names());
}
