use std::{
    fs::{self, OpenOptions},
    io,
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
    sync::atomic::AtomicBool,
};

use evdev_rs::{
    Device, DeviceWrapper, ReadFlag,
    enums::{EV_KEY, EventCode},
};

use crate::error::{Error, Result};

mod events;
pub use events::GamepadEvents;

const BY_ID: &str = "/dev/input/by-id/";

#[derive(Debug)]
pub struct Gamepad {
    device: Device,
    path: PathBuf,
}

impl Gamepad {
    /// Opens the node non-blocking so reads can notice a stop request.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let device = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .and_then(Device::new_from_file)
            .map_err(|source| Error::Device {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Gamepad {
            device,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    pub fn events<'a>(&'a self, stop: &'a AtomicBool) -> GamepadEvents<'a> {
        GamepadEvents {
            device: &self.device,
            stop,
            read_flag: ReadFlag::NORMAL,
        }
    }

    pub fn key_events<'a>(
        &'a self,
        stop: &'a AtomicBool,
    ) -> impl Iterator<Item = (EV_KEY, i32)> + 'a {
        self.events(stop).filter_map(|event| match event.event_code {
            EventCode::EV_KEY(key) => Some((key, event.value)),
            _ => None,
        })
    }

    /// Joystick nodes udev links under `/dev/input/by-id/`.
    pub fn joystick_paths() -> io::Result<impl Iterator<Item = io::Result<PathBuf>>> {
        Ok(fs::read_dir(BY_ID)?.filter_map(|entry| match entry {
            Ok(entry) => entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with("-event-joystick"))
                .then(|| Ok(entry.path())),
            Err(e) => Some(Err(e)),
        }))
    }
}
