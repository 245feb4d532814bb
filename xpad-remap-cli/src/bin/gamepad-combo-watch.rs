use std::{
    env,
    path::PathBuf,
    sync::{Arc, atomic::AtomicBool},
};

use anyhow::Context;
use clap::Parser;
use signal_hook::{consts::TERM_SIGNALS, flag};
use xpad_remap::{Combo, ComboTracker, Gamepad, RemapProcess};

const LAUNCHER: &str = "simulate-xbox360-controller";

/// Hold MODE + START on the gamepad to toggle Xbox 360 controller emulation.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// evdev node to watch, defaults to the first joystick in /dev/input/by-id
    #[arg(short, long)]
    device: Option<PathBuf>,
    /// program started with the device path when the combo is pressed
    #[arg(short, long)]
    launcher: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let device = match args.device {
        Some(device) => device,
        None => Gamepad::joystick_paths()
            .context("could not list /dev/input/by-id")?
            .next()
            .context("no joystick found")??,
    };
    let launcher = args.launcher.unwrap_or_else(default_launcher);

    let stop = Arc::new(AtomicBool::new(false));
    for signal in TERM_SIGNALS {
        flag::register(*signal, Arc::clone(&stop))
            .with_context(|| format!("failed to register handler for signal {signal}"))?;
    }

    let gamepad = Gamepad::open(&device)?;
    log::info!("Device   : {}", gamepad.path().display());
    log::info!("Name     : {}", gamepad.name().unwrap_or("unknown"));
    log::info!("Launcher : {}", launcher.display());

    let mut remap = RemapProcess::new(launcher, device.into_os_string());
    let mut tracker = ComboTracker::new();
    for (key, value) in gamepad.key_events(&stop) {
        let combo = tracker.handle_key(key, value);
        log::debug!("{:?} = {}, held {:?}", key, value, tracker.held());
        match combo {
            Some(Combo::ToggleRemap) => {
                log::info!("remap combo pressed");
                if let Err(e) = remap.toggle() {
                    log::error!("{}", e);
                }
            }
            None => {}
        }
    }

    log::info!("event stream ended, shutting down");
    remap.stop()?;
    Ok(())
}

fn default_launcher() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(LAUNCHER)))
        .filter(|path| path.is_file())
        .unwrap_or_else(|| PathBuf::from(LAUNCHER))
}
