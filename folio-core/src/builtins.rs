//! Bodies of the informational commands.
//!
//! Everything here is a pure function of its arguments (plus an injected RNG
//! where the command is random), so the session stays easy to test.

use crate::config::ProfileConfig;
use crate::error::{Result, ShellError};
use crate::sandbox::Entry;
use qrcode::QrCode;
use qrcode::render::unicode::Dense1x2;
use rand::Rng;
use rand::seq::SliceRandom;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header shown at the top of the transcript; survives `clear`.
pub const BANNER: &str = r#" _____     _ _
|  ___|__ | (_) ___
| |_ / _ \| | |/ _ \
|  _| (_) | | | (_) |
|_|  \___/|_|_|\___/
"#;

const YODA_ENDINGS: &[&str] = &[", mmm.", ", yes.", ", hmm.", ", indeed."];

pub fn pwd(dir: &impl std::fmt::Display) -> String {
    format!("Current directory: {dir}")
}

pub fn whoami(user: &str) -> String {
    format!("Current user: {user}")
}

pub fn date(today: chrono::NaiveDate) -> String {
    format!("Current date: {}", today.format("%Y-%m-%d"))
}

pub fn echo(text: &str) -> String {
    format!("Echoing: {text}")
}

/// Directory listing under a `Name` header, folders and files marked.
pub fn ls(entries: &[Entry]) -> String {
    let mut out = String::from("\nName\n------\n");
    for entry in entries {
        let icon = if entry.is_dir { "📁" } else { "📄" };
        out.push_str(&format!("{} {}\n", icon, entry.name));
    }
    out
}

pub fn coinflip<R: Rng + ?Sized>(rng: &mut R) -> String {
    if rng.gen_bool(0.5) {
        "Result: Heads".to_string()
    } else {
        "Result: Tails".to_string()
    }
}

/// Reorder `text` the way Yoda would say it.
///
/// Fewer than two words just gets ", mmm.". "I am X" becomes "Am i X";
/// otherwise three or more words move the last word to the front. A random
/// ending from a fixed set is appended.
pub fn yoda<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 {
        return format!("Yoda says: {text}, mmm.");
    }

    let reordered: Vec<String> =
        if words[0].eq_ignore_ascii_case("i") && words[1].eq_ignore_ascii_case("am") {
            let mut out = vec!["Am".to_string(), "i".to_string()];
            out.extend(words[2..].iter().map(|w| w.to_string()));
            out
        } else if let Some((last, rest)) = words.split_last().filter(|_| words.len() >= 3) {
            std::iter::once(*last)
                .chain(rest.iter().copied())
                .map(str::to_string)
                .collect()
        } else {
            words.iter().map(|w| w.to_string()).collect()
        };

    let ending = YODA_ENDINGS.choose(rng).copied().unwrap_or(", mmm.");
    format!("Yoda says: {}{}", reordered.join(" "), ending)
}

/// Unicode half-block QR code for `text`.
pub fn qr(text: &str) -> Result<String> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| ShellError::collaborator("QR code", e))?;
    let rendered = code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .build();
    Ok(format!("QR code for: {text}\n\n{rendered}"))
}

pub fn version() -> String {
    format!(
        "Folio version {}, built for {}/{}",
        VERSION,
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

pub fn neofetch(user: &str, host: &str) -> String {
    let title = format!("{user}@{host}");
    let facts = [
        title.clone(),
        "-".repeat(title.chars().count()),
        "OS: Folio portfolio shell".to_string(),
        format!("Kernel: Rust ({})", std::env::consts::FAMILY),
        format!("Shell: folio v{VERSION}"),
        "Terminal: ratatui + crossterm".to_string(),
        format!("CPU: {}", std::env::consts::ARCH),
        format!("Platform: {}", std::env::consts::OS),
        "Memory: no garbage collector".to_string(),
    ];
    let art = [
        r"        _~^~^~_        ",
        r"    \) /  o o  \ (/    ",
        r"      '_   -   _'      ",
        r"      / '-----' \      ",
        r"                       ",
        r"      F O L I O        ",
        r"                       ",
        r"                       ",
        r"                       ",
    ];
    let mut out = String::from("\n");
    for (art_line, fact) in art.iter().zip(facts.iter()) {
        out.push_str(art_line);
        out.push_str("   ");
        out.push_str(fact);
        out.push('\n');
    }
    out
}

pub fn skills(profile: &ProfileConfig) -> String {
    let mut out = String::from("\nSkills:\n================\n");
    for skill in &profile.skills {
        out.push_str(&format!("• {skill}\n"));
    }
    out
}

pub fn contact(profile: &ProfileConfig) -> String {
    let width = profile
        .contact
        .iter()
        .map(|(label, _)| label.chars().count() + 1)
        .max()
        .unwrap_or(0);
    let mut out = String::from("You can find me on:");
    for (label, value) in &profile.contact {
        let label = format!("{label}:");
        out.push_str(&format!("\n- {:<width$}  {}", label, value, width = width));
    }
    out
}
