// ============================================================================
// dcprip-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// Consistent terminal output for the commands: sections, status lines,
// processing steps and errors. Results go to stdout, errors to stderr. The
// console crate drops the styling when the stream is not a terminal.
//
// Visual hierarchy:
// 1. Sections (===== SECTION =====)
// 2. Processing steps (» Step description)
// 3. Status items (  Label:          Value)
// 4. Success / error lines (✓ / ✗)
//
// AI-ASSISTANT-INFO: Terminal UI components and styling for the CLI

// ---- External crate imports ----
use console::style;

// ============================================================================
// STYLING CONSTANTS
// ============================================================================

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const PROCESSING_SYMBOL: &str = "»";
    pub const ERROR_SYMBOL: &str = "✗";

    pub const SECTION_PREFIX: &str = "===== ";
    pub const SECTION_SUFFIX: &str = " =====";

    pub const STATUS_INDENT: &str = "  ";

    /// Width the status labels are padded to.
    pub const LABEL_WIDTH: usize = 15;
}

// ============================================================================
// TERMINAL COMPONENTS
// ============================================================================

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    println!();
    println!(
        "{}{}{}",
        styling::SECTION_PREFIX,
        style(title.to_uppercase()).cyan().bold(),
        styling::SECTION_SUFFIX
    );
    println!();
}

/// Print a status line (key-value pair)
///
/// # Arguments
///
/// * `label` - The label for the status line
/// * `value` - The value to display
/// * `highlight` - Whether to emphasize the value
pub fn print_status(label: &str, value: &str, highlight: bool) {
    println!("{}{}", styling::STATUS_INDENT, format_status(label, value, highlight));
}

fn format_status(label: &str, value: &str, highlight: bool) -> String {
    let padding = styling::LABEL_WIDTH.saturating_sub(label.len()).max(1);
    let value = if highlight {
        style(value).bold().to_string()
    } else {
        value.to_string()
    };
    format!("{}:{}{}", label, " ".repeat(padding), value)
}

/// Print a processing step, preceded by a blank line
pub fn print_processing(message: &str) {
    println!();
    println!(
        "{}{} {}",
        styling::STATUS_INDENT,
        styling::PROCESSING_SYMBOL,
        style(message).bold()
    );
}

/// Print a success message
pub fn print_success(message: &str) {
    println!(
        "{}{} {}",
        styling::STATUS_INDENT,
        style(styling::SUCCESS_SYMBOL).green(),
        message
    );
}

/// Print an error with an optional suggestion to stderr
pub fn print_error(title: &str, message: &str, suggestion: Option<&str>) {
    eprintln!("{} {}", styling::ERROR_SYMBOL, style(title).red().bold());
    eprintln!("{}Message:    {}", styling::STATUS_INDENT, message);
    if let Some(suggestion) = suggestion {
        eprintln!("{}Suggestion: {}", styling::STATUS_INDENT, suggestion);
    }
}

/// Print a failed item in a result listing to stdout
pub fn print_failure(title: &str, reason: &str) {
    println!(
        "{}{} {}: {}",
        styling::STATUS_INDENT,
        style(styling::ERROR_SYMBOL).red(),
        style(title).bold(),
        reason
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_padding() {
        console::set_colors_enabled(false);
        assert_eq!(format_status("Audio", "5.1", false), "Audio:          5.1");
        assert_eq!(
            format_status("A very long label", "x", false),
            "A very long label: x"
        );
    }
}
