use std::{
    ffi::OsString,
    fmt::Display,
    process::{Command, Stdio},
};

use crate::{
    error::{Error, Result},
    mapping::{self, AXISMAP, EVDEV_ABSMAP, EVDEV_KEYMAP_FACE, EVDEV_KEYMAP_SHOULDER},
};

/// Program name, resolved on `PATH` at launch time.
pub const XBOXDRV: &str = "xboxdrv";

const TRAILING_FLAGS: [&str; 3] = ["--force-feedback", "--mimic-xpad", "--silent"];

/// An `xboxdrv` invocation for a single evdev device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapCommand {
    device: OsString,
}

impl RemapCommand {
    /// The path is taken verbatim. Whether it names a usable device is for
    /// `xboxdrv` to decide.
    pub fn new(device: impl Into<OsString>) -> Result<Self> {
        let device = device.into();
        if device.is_empty() {
            return Err(Error::EmptyDevicePath);
        }
        Ok(RemapCommand { device })
    }

    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(13);
        args.push("--evdev".into());
        args.push(self.device.clone());
        for (flag, table) in [
            ("--evdev-absmap", EVDEV_ABSMAP),
            ("--evdev-keymap", EVDEV_KEYMAP_FACE),
            ("--evdev-keymap", EVDEV_KEYMAP_SHOULDER),
            ("--axismap", AXISMAP),
        ] {
            args.push(flag.into());
            args.push(mapping::render(table).into());
        }
        args.extend(TRAILING_FLAGS.iter().map(OsString::from));
        args
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(XBOXDRV);
        command
            .args(self.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }
}

impl Display for RemapCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{XBOXDRV}")?;
        for arg in self.args() {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
