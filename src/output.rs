//! User-facing console messages.
//! Colors are enabled only when the stream is a TTY; primary results go to
//! stdout, diagnostics and progress to stderr.

use owo_colors::OwoColorize;
use std::io::Write;

fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Plain line without prefix, for output users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Batch progress. Redraws a single line on a TTY, one line per update otherwise.
pub fn print_progress(processed: usize, total: usize, ratio: f64) {
    let pct = (ratio * 100.0).round() as u32;
    let mut err = std::io::stderr();
    if stderr_tty() {
        let _ = write!(err, "\r{} {processed}/{total} ({pct}%)", "progress:".blue().bold());
        if processed == total {
            let _ = writeln!(err);
        }
        let _ = err.flush();
    } else {
        let _ = writeln!(err, "progress: {processed}/{total} ({pct}%)");
    }
}
