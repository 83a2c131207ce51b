//! Application-wide constants
//!
//! Magic numbers and string literals used throughout the application,
//! providing a single source of truth for constant values.

/// Input event constants (from evdev)
pub mod input {
    /// Key press event value
    pub const KEY_PRESS: i32 = 1;

    /// Key release event value
    pub const KEY_RELEASE: i32 = 0;

    /// Key repeat event value
    pub const KEY_REPEAT: i32 = 2;
}

/// Filesystem paths
pub mod paths {
    /// Directory containing raw input device nodes
    pub const DEV_INPUT: &str = "/dev/input";
}

/// Permission guidance for input device access
pub mod permissions {
    /// Group required to read /dev/input devices
    pub const INPUT_GROUP: &str = "input";

    /// Command to add the current user to the input group
    pub const ADD_TO_INPUT_GROUP: &str = "sudo usermod -aG input $USER";
}

/// Config file location
pub mod config {
    /// Directory under the user config dir
    pub const APP_DIR: &str = "perfect-circle";

    /// Config file name (JSON document)
    pub const FILENAME: &str = "config.json";
}

/// Default drawing parameters
pub mod defaults {
    /// Circle radius in pixels
    pub const RADIUS: u32 = 340;

    /// Number of points sampled along the circle
    pub const STEPS: u32 = 2000;

    /// Pause between steps in seconds
    pub const DRAW_SPEED: f64 = 0.002;

    /// Key that triggers a stroke
    pub const START_KEY: &str = "alt_l";

    /// Key that terminates the listener
    pub const EXIT_KEY: &str = "esc";
}

/// Validation limits applied after config load
pub mod validation {
    /// Smallest meaningful radius
    pub const MIN_RADIUS: u32 = 1;

    /// Largest radius we will attempt to draw
    pub const MAX_RADIUS: u32 = 4096;

    /// A circle needs a start point and at least one further point
    pub const MIN_STEPS: u32 = 2;

    /// Step counts beyond this only slow the stroke down
    pub const MAX_STEPS: u32 = 100_000;

    /// Largest per-step delay in seconds
    pub const MAX_DRAW_SPEED: f64 = 1.0;
}

/// Mouse button constants
pub mod mouse {
    /// Left (primary) mouse button number
    pub const BUTTON_LEFT: u8 = 1;
}

/// Stroke engine timing
pub mod stroke {
    /// Pause after moving to the start point, before pressing the button,
    /// so the target surface registers the position
    pub const SETTLE_DELAY_MS: u64 = 100;
}
