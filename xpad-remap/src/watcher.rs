use std::{
    ffi::OsString,
    io,
    os::unix::process::CommandExt,
    path::PathBuf,
    process::{Child, Command, Stdio},
};

use nix::{
    sys::signal::{Signal, killpg},
    unistd::Pid,
};

use crate::{
    error::{Error, Result},
    launch,
};

/// A background launcher for one device that can be switched on and off.
#[derive(Debug)]
pub struct RemapProcess {
    launcher: PathBuf,
    device: OsString,
    child: Option<Child>,
}

impl RemapProcess {
    pub fn new(launcher: impl Into<PathBuf>, device: impl Into<OsString>) -> Self {
        RemapProcess {
            launcher: launcher.into(),
            device: device.into(),
            child: None,
        }
    }

    /// Reaps a child that exited on its own.
    pub fn is_running(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                log::info!(
                    "remap process {} exited with {}",
                    child.id(),
                    launch::exit_code(status)
                );
                self.child = None;
                false
            }
            Err(e) => {
                log::warn!("could not poll remap process {}: {}", child.id(), e);
                true
            }
        }
    }

    /// Stops a running launcher or starts a new one. Returns whether it is
    /// running afterwards.
    pub fn toggle(&mut self) -> Result<bool> {
        if self.is_running() {
            self.stop()?;
            Ok(false)
        } else {
            self.start()?;
            Ok(true)
        }
    }

    fn start(&mut self) -> Result<()> {
        log::info!(
            "starting {} {}",
            self.launcher.display(),
            self.device.to_string_lossy()
        );
        let child = Command::new(&self.launcher)
            .arg(&self.device)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
            .map_err(|source| Error::Launch {
                program: self.launcher.display().to_string(),
                source,
            })?;
        log::info!("remap process started with pid {}", child.id());
        self.child = Some(child);
        Ok(())
    }

    /// Kills the launcher's whole process group, so `xboxdrv` goes with it.
    pub fn stop(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        log::info!("stopping remap process {}", child.id());
        match killpg(process_group(child.id())?, Signal::SIGKILL) {
            Ok(()) | Err(nix::errno::Errno::ESRCH) => {}
            Err(errno) => return Err(Error::Signal(io::Error::from(errno))),
        }
        child.wait().map_err(Error::Signal)?;
        log::info!("remap process stopped");
        Ok(())
    }
}

// children are spawned with process_group(0), so the pgid is the child's pid
fn process_group(pid: u32) -> Result<Pid> {
    i32::try_from(pid)
        .map(Pid::from_raw)
        .map_err(|e| Error::Signal(io::Error::new(io::ErrorKind::InvalidInput, e)))
}

impl Drop for RemapProcess {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::error!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs, thread,
        time::{Duration, Instant},
    };

    use super::*;

    #[test]
    fn test_toggle_starts_and_stops() {
        let mut remap = RemapProcess::new("/bin/sleep", "30");
        assert!(!remap.is_running());
        assert!(remap.toggle().expect("sleep can be spawned"));
        assert!(remap.is_running());
        assert!(!remap.toggle().expect("sleep can be killed"));
        assert!(!remap.is_running());
    }

    fn is_dead(pid: &str) -> bool {
        match fs::read_to_string(format!("/proc/{pid}/stat")) {
            // state is the first field after the parenthesised command name
            Ok(stat) => stat
                .rsplit_once(')')
                .is_some_and(|(_, rest)| rest.trim_start().starts_with('Z')),
            Err(_) => true,
        }
    }

    #[test]
    fn test_stop_kills_grandchildren() {
        let dir = std::env::temp_dir().join(format!("xpad-remap-group-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir is writable");
        let pid_file = dir.join("grandchild.pid");
        let script = dir.join("launcher.sh");
        // read by sh rather than executed, so no exec bit is needed
        fs::write(
            &script,
            format!("sleep 60 &\necho $! > '{}'\nwait\n", pid_file.display()),
        )
        .expect("launcher script can be written");

        let mut remap = RemapProcess::new("/bin/sh", script.as_os_str());
        assert!(remap.toggle().expect("sh can be spawned"));

        let deadline = Instant::now() + Duration::from_secs(5);
        let grandchild = loop {
            match fs::read_to_string(&pid_file) {
                Ok(pid) if pid.ends_with('\n') => break pid.trim().to_string(),
                _ if Instant::now() > deadline => panic!("launcher never wrote its pid"),
                _ => thread::sleep(Duration::from_millis(10)),
            }
        };
        assert!(!is_dead(&grandchild));

        assert!(!remap.toggle().expect("process group can be killed"));
        let deadline = Instant::now() + Duration::from_secs(5);
        while !is_dead(&grandchild) {
            assert!(Instant::now() < deadline, "grandchild {grandchild} survived");
            thread::sleep(Duration::from_millis(10));
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_process_group_out_of_range() {
        assert_eq!(process_group(4242).unwrap(), Pid::from_raw(4242));
        assert!(matches!(process_group(u32::MAX), Err(Error::Signal(_))));
    }

    #[test]
    fn test_exited_child_is_restarted() {
        let mut remap = RemapProcess::new("/bin/true", "ignored");
        remap.toggle().expect("true can be spawned");
        if let Some(child) = remap.child.as_mut() {
            child.wait().expect("true exits");
        }
        // already gone, so toggling starts a fresh one instead of stopping
        assert!(remap.toggle().expect("true can be spawned again"));
        assert!(remap.child.is_some());
    }

    #[test]
    fn test_missing_launcher() {
        let mut remap = RemapProcess::new("/nonexistent/launcher", "/dev/input/event0");
        match remap.toggle() {
            Err(Error::Launch { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_stop_without_child() {
        let mut remap = RemapProcess::new("/bin/sleep", "30");
        assert!(remap.stop().is_ok());
    }
}
