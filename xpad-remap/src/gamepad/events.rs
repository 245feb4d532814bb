use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use evdev_rs::{Device, InputEvent, ReadFlag, ReadStatus};

const IDLE_POLL: Duration = Duration::from_millis(10);

/// Events read from a non-blocking gamepad node until `stop` is set or the
/// device goes away.
pub struct GamepadEvents<'a> {
    pub(crate) device: &'a Device,
    pub(crate) stop: &'a AtomicBool,
    pub(crate) read_flag: ReadFlag,
}

impl<'a> Iterator for GamepadEvents<'a> {
    type Item = InputEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.stop.load(Ordering::Relaxed) {
                return None;
            }
            match self.device.next_event(self.read_flag) {
                Ok((ReadStatus::Success, event)) => return Some(event),
                // SYN_DROPPED marker, the resync deltas follow in SYNC mode
                Ok((ReadStatus::Sync, _)) if self.read_flag == ReadFlag::NORMAL => {
                    self.read_flag = ReadFlag::SYNC;
                }
                Ok((ReadStatus::Sync, event)) => return Some(event),
                Err(e) => match e.raw_os_error() {
                    Some(libc::EAGAIN) if self.read_flag == ReadFlag::SYNC => {
                        self.read_flag = ReadFlag::NORMAL;
                    }
                    Some(libc::EAGAIN) => thread::sleep(IDLE_POLL),
                    _ => {
                        log::error!("gamepad read failed: {}", e);
                        return None;
                    }
                },
            }
        }
    }
}
