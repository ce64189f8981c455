//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Stream, Style};

/// Applies `style` when stderr takes colors (see [`super::init_colors`]).
pub(crate) fn paint(text: &str, style: Style) -> String {
    text.if_supports_color(Stream::Stderr, |t| t.style(style))
        .to_string()
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", paint("✓", Style::new().green().bold()), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", paint("ℹ", Style::new().blue().bold()), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        paint("⚠", Style::new().yellow().bold()),
        paint(message, Style::new().yellow())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_status_messages() {
        success("Scenario 'automaton' passed");
        info("Verifying 1 scenario(s)");
        warning("1 scenario(s) failed; exiting 0 as requested");
    }

    #[test]
    #[serial]
    fn test_paint_without_colors_is_plain() {
        owo_colors::set_override(false);
        assert_eq!(paint("✓", Style::new().green()), "✓");
        owo_colors::unset_override();
    }
}
