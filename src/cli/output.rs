//! Styled terminal messages for command results.
//!
//! Results go to stdout, problems to stderr.  Each line starts with a
//! colored marker so status is readable at a glance.

use console::{style, StyledObject};

/// Where new API keys are issued.
pub const API_KEY_URL: &str = "https://cloud-cents.vercel.app/user";

fn marker(symbol: &'static str) -> StyledObject<&'static str> {
    style(symbol).bold()
}

/// Green check mark line on stdout.
pub fn success(msg: &str) {
    println!("{} {msg}", marker("\u{2713}").green());
}

/// Red cross line on stderr.
pub fn error(msg: &str) {
    eprintln!("{} {msg}", marker("\u{2717}").red());
}

/// Blue info line on stdout.
pub fn info(msg: &str) {
    println!("{} {msg}", marker("\u{2139}").blue());
}

/// Dimmed hint line on stdout.
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Point the user at the page that issues API keys.
pub fn api_key_hint() {
    tip(&format!("Need a new API key? Visit {API_KEY_URL} to get yours."));
}
