//! Reload primitive of the hosting environment.
//!
//! A reload discards all in-process state and starts over, which also
//! recreates the connection. [`ProcessReloader`] does this literally by
//! replacing the running process with a fresh copy of itself.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::ReloadError;

/// Something that can reload the hosting environment.
///
/// Any `FnMut() -> Result<(), ReloadError>` closure is a `Reloader`.
pub trait Reloader {
    /// Trigger the reload.
    ///
    /// Implementations that restart the process do not return on success.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError`] if the restart could not be started.
    fn reload(&mut self) -> Result<(), ReloadError>;
}

impl<F> Reloader for F
where
    F: FnMut() -> Result<(), ReloadError>,
{
    fn reload(&mut self) -> Result<(), ReloadError> {
        self()
    }
}

/// Restarts the current executable with the same arguments.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessReloader;

impl Reloader for ProcessReloader {
    fn reload(&mut self) -> Result<(), ReloadError> {
        let exe = std::env::current_exe().map_err(ReloadError::CurrentExe)?;
        let args: Vec<OsString> = std::env::args_os().skip(1).collect();

        tracing::info!(exe = %exe.display(), "Restarting process");
        restart(&exe, &args)
    }
}

/// Replace the current process image. Only returns on failure.
#[cfg(unix)]
fn restart(exe: &Path, args: &[OsString]) -> Result<(), ReloadError> {
    use std::os::unix::process::CommandExt;

    let err = Command::new(exe).args(args).exec();
    Err(ReloadError::Exec(err))
}

/// Start a fresh copy of the process, then exit this one.
#[cfg(not(unix))]
#[allow(clippy::exit)]
fn restart(exe: &Path, args: &[OsString]) -> Result<(), ReloadError> {
    Command::new(exe)
        .args(args)
        .spawn()
        .map_err(ReloadError::Exec)?;
    std::process::exit(0);
}
