//! Global trigger-key listener
//!
//! Reads raw key events from /dev/input so the triggers work regardless of
//! window focus. One listener thread per keyboard device; events matching
//! the configured start/exit keys are forwarded to the main loop over a
//! channel.

use anyhow::{Context, Result};
use evdev::{Device, EventType, InputEventKind, Key};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::{debug, error, info, warn};

use crate::constants::{input, paths, permissions};

/// Action requested by a trigger key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerEvent {
    /// Start-key went down: begin a stroke
    StartStroke,
    /// Exit-key came up: stop listening and shut down
    Shutdown,
}

/// The two configured trigger keys, already resolved to evdev codes
#[derive(Debug, Clone, Copy)]
pub struct TriggerKeys {
    pub start: Key,
    pub exit: Key,
}

/// Find all keyboard devices that can deliver the start trigger
fn find_all_keyboard_devices(triggers: TriggerKeys) -> Result<Vec<Device>> {
    info!(path = %paths::DEV_INPUT, "Scanning for keyboard devices...");

    let mut devices = Vec::new();

    for entry in std::fs::read_dir(paths::DEV_INPUT).context(format!(
        "Failed to read {} - are you in the '{}' group?",
        paths::DEV_INPUT,
        permissions::INPUT_GROUP
    ))? {
        let entry = entry?;
        let path = entry.path();

        if let Ok(device) = Device::open(&path) {
            if let Some(keys) = device.supported_keys() {
                if keys.contains(triggers.start) {
                    let key_count = keys.iter().count();
                    info!(device_path = %path.display(), name = ?device.name(), key_count = key_count, "Found keyboard device");
                    devices.push(device);
                }
            }
        }
    }

    if devices.is_empty() {
        anyhow::bail!(
            "No keyboard device found. Ensure you're in '{}' group:\n\
             {}\n\
             Then log out and back in.",
            permissions::INPUT_GROUP,
            permissions::ADD_TO_INPUT_GROUP
        )
    }

    info!(count = devices.len(), "Listening on keyboard device(s)");

    Ok(devices)
}

/// Spawn background threads listening for the trigger keys on all keyboard
/// devices
pub fn spawn_listener(
    sender: Sender<ListenerEvent>,
    triggers: TriggerKeys,
) -> Result<Vec<thread::JoinHandle<()>>> {
    let devices = find_all_keyboard_devices(triggers)?;
    let mut handles = Vec::new();

    for device in devices {
        let sender = sender.clone();
        let handle = thread::spawn(move || {
            info!(device = ?device.name(), "Trigger listener started");
            if let Err(e) = listen_for_triggers(device, triggers, sender) {
                error!(error = %e, "Trigger listener error");
            }
        });
        handles.push(handle);
    }

    Ok(handles)
}

/// Listen for trigger key events on a single device. Returns once the exit
/// key is observed.
fn listen_for_triggers(
    mut device: Device,
    triggers: TriggerKeys,
    sender: Sender<ListenerEvent>,
) -> Result<()> {
    loop {
        // Fetch events (blocks until available)
        let events = device.fetch_events().context("Failed to fetch events")?;

        for event in events {
            if event.event_type() != EventType::KEY {
                continue;
            }

            if let InputEventKind::Key(key) = event.kind() {
                debug!(key = ?key, value = event.value(), "Key event");

                // Stroke begins on start-key down; shutdown on exit-key up,
                // matching the original listener's press/release split
                if key == triggers.start && event.value() == input::KEY_PRESS {
                    info!(key = ?key, "Start key pressed, requesting stroke");
                    sender
                        .send(ListenerEvent::StartStroke)
                        .context("Failed to send start command")?;
                } else if key == triggers.exit && event.value() == input::KEY_RELEASE {
                    info!(key = ?key, "Exit key released, shutting down");
                    sender
                        .send(ListenerEvent::Shutdown)
                        .context("Failed to send shutdown command")?;
                    return Ok(());
                }
            }
        }
    }
}

/// Check if trigger keys are available (user has input group permissions)
pub fn check_permissions() -> bool {
    std::fs::read_dir(paths::DEV_INPUT).is_ok()
}

/// Print helpful error message if permissions missing
pub fn print_permission_error() {
    error!(path = %paths::DEV_INPUT, "Cannot access input devices");
    error!(group = %permissions::INPUT_GROUP, "Trigger keys require group membership");
    error!(command = %permissions::ADD_TO_INPUT_GROUP, "Add user to input group");
    error!("  Then log out and back in");
    warn!(continuing = false, "Trigger keys are required, cannot continue");
}
