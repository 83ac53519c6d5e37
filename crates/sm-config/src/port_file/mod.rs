pub(crate) mod port_file_info;

/// Liveness probe for the PID recorded in `server.json`.
///
/// On Unix, `kill(pid, 0)` checks existence without delivering a signal;
/// EPERM still means the process exists, just under another user.
#[cfg(unix)]
pub fn is_process_running(pid: u32) -> bool {
    let result = unsafe { libc::kill(pid as i32, 0) };

    result == 0 || std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

/// Without a cheap PID probe, treat the file as live; a dead server is
/// caught by the connection attempt instead.
#[cfg(not(unix))]
pub fn is_process_running(_pid: u32) -> bool {
    true
}
