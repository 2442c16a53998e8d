use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed) && !is_quiet()
}

pub fn header(title: &str) {
    if is_quiet() {
        return;
    }
    println!("\n{}", title.bold().underline());
}

pub fn success(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

pub fn verbose(msg: &str) {
    if is_verbose() {
        println!("{} {}", "·".bright_black(), msg.dimmed());
    }
}

/// Plugin log line, e.g. `NVIDIA: NOTE: Skipping kernel installation ...`
pub fn note(tag: &str, msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", format!("{}:", tag).cyan().bold(), msg);
}

/// Plugin warning line; never silenced by quiet mode
pub fn plugin_warning(tag: &str, msg: &str) {
    warning(&format!("{}: {}", tag, msg));
}
