use std::{env, process::ExitCode};

use xpad_remap::{RemapCommand, launch};

const DEFAULT_NAME: &str = "simulate-xbox360-controller";

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args_os();
    let program = args
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    let Some(Ok(command)) = args.next().map(RemapCommand::new) else {
        println!("{}", launch::usage(&program));
        return ExitCode::from(1);
    };

    let err = launch::exec(&command);
    eprintln!("{}: {}", program, err);
    ExitCode::from(launch::launch_failure_code(&err))
}
