//! Pure formatting functions for UI output.
//!
//! Machine-readable results (versions, tag names) go to stdout unstyled;
//! everything addressed to a human is styled and, except for success
//! lines, goes to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::release::ReleaseOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print a result value (tag or version) on its own line.
pub fn display_value(value: &str) {
    println!("{}", value);
}

/// Display the proposed tag change (or initial tag).
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            eprintln!("\n{}", style("Proposed Tag Change:").bold());
            eprintln!("  From: {}", style(old).red());
            eprintln!("  To:   {}", style(new_tag).green());
        }
        None => {
            eprintln!("\n{}", style("Initial Tag:").bold());
            eprintln!("  New tag: {}", style(new_tag).green());
        }
    }
}

/// Summarise what a release did.
pub fn display_release_outcome(outcome: &ReleaseOutcome, remote: Option<&str>) {
    for warning in &outcome.warnings {
        display_boundary_warning(warning);
    }

    if outcome.tagged {
        display_success(&format!("Created tag: {}", outcome.tag));
    }

    match (outcome.pushed, remote) {
        (true, Some(remote)) => {
            display_success(&format!("Pushed tag {} to {}", outcome.tag, remote))
        }
        (false, _) if outcome.tagged => {
            display_manual_push_instruction(&outcome.tag, remote.unwrap_or("origin"))
        }
        _ => {}
    }
}

/// Display manual push instruction for a tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    eprintln!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}
