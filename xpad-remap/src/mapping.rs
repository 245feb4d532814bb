//! Fixed evdev to Xbox 360 controller mapping tables passed to `xboxdrv`.

pub type MappingTable = &'static [(&'static str, &'static str)];

/// Absolute axes: hat, both sticks and the analog triggers.
pub const EVDEV_ABSMAP: MappingTable = &[
    ("ABS_HAT0X", "dpad_x"),
    ("ABS_HAT0Y", "dpad_y"),
    ("ABS_X", "X1"),
    ("ABS_Y", "Y1"),
    ("ABS_RX", "X2"),
    ("ABS_RY", "Y2"),
    ("ABS_Z", "LT"),
    ("ABS_RZ", "RT"),
];

/// Face and menu buttons.
pub const EVDEV_KEYMAP_FACE: MappingTable = &[
    ("BTN_SOUTH", "A"),
    ("BTN_EAST", "B"),
    ("BTN_NORTH", "Y"),
    ("BTN_WEST", "X"),
    ("BTN_START", "start"),
    ("BTN_MODE", "guide"),
    ("BTN_SELECT", "back"),
];

/// Shoulder buttons, digital triggers and stick clicks.
pub const EVDEV_KEYMAP_SHOULDER: MappingTable = &[
    ("BTN_TL", "LB"),
    ("BTN_TR", "RB"),
    ("BTN_TL2", "LT"),
    ("BTN_TR2", "RT"),
    ("BTN_THUMBL", "TL"),
    ("BTN_THUMBR", "TR"),
];

/// Inverts both vertical stick axes.
pub const AXISMAP: MappingTable = &[("-y1", "y1"), ("-y2", "y2")];

/// Joins a table into the `key=value,key=value` form `xboxdrv` expects.
pub fn render(table: MappingTable) -> String {
    table
        .iter()
        .map(|(from, to)| format!("{from}={to}"))
        .collect::<Vec<_>>()
        .join(",")
}
