use std::{
    io,
    os::unix::process::{CommandExt, ExitStatusExt},
    process::ExitStatus,
};

use crate::{
    command::{RemapCommand, XBOXDRV},
    error::Error,
};

pub fn usage(program: &str) -> String {
    format!("Usage: {program} <evdev-device>")
}

/// Replaces the current process with `xboxdrv`. Only returns on failure.
pub fn exec(command: &RemapCommand) -> Error {
    log::debug!("exec {}", command);
    let source = command.to_command().exec();
    Error::Launch {
        program: XBOXDRV.to_string(),
        source,
    }
}

/// Exit code of a finished child, with `128 + signal` for signal deaths.
pub fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}

/// Exit code for a launch that never started, following shell conventions.
pub fn launch_failure_code(error: &Error) -> u8 {
    match error {
        Error::Launch { source, .. } => match source.kind() {
            io::ErrorKind::NotFound => 127,
            io::ErrorKind::PermissionDenied => 126,
            _ => 1,
        },
        _ => 1,
    }
}
