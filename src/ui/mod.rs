//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::domain::EntryType;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_changelog_summary, display_crosslink_summary, display_error, display_release_summary,
    display_status, display_success, display_warning, format_entry_summary,
};

/// Prompts user to select an entry type.
///
/// Displays a numbered list and accepts a 1-based index or the type name.
/// Default selection is the first type (feature) if user presses Enter.
pub fn select_entry_type() -> Result<EntryType> {
    println!("\n{}", console::style("Change type:").bold());
    for (i, kind) in EntryType::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, kind);
    }

    let count = EntryType::ALL.len();
    print!("\nSelect a type (1-{}) [default: 1]: ", count);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    parse_type_selection(&input)
}

/// Interpret the answer to the type prompt
pub fn parse_type_selection(input: &str) -> Result<EntryType> {
    let selection = input.trim();

    // If empty input, default to first type (index 1)
    if selection.is_empty() {
        return Ok(EntryType::ALL[0]);
    }

    if let Ok(index) = selection.parse::<usize>() {
        if index > 0 && index <= EntryType::ALL.len() {
            return Ok(EntryType::ALL[index - 1]);
        }
        return Err(anyhow::anyhow!("Invalid selection: {}", index));
    }

    Ok(selection.to_lowercase().parse::<EntryType>()?)
}

/// Prompts for a single required line of text, repeating until it is non-blank.
pub fn prompt_line(prompt: &str) -> Result<String> {
    loop {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(anyhow::anyhow!("No input for '{}'", prompt));
        }

        let value = input.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
    }
}

/// Prompts for an optional line of text; Enter skips it.
pub fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    print!("{} (optional): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let value = input.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Prompts for a multi-line description terminated by an empty line.
pub fn prompt_description() -> Result<String> {
    println!("Description (finish with an empty line):");
    io::stdout().flush()?;
    read_description(io::stdin().lock())
}

/// Read lines until the first empty line (or end of input) after some text
pub fn read_description<R: BufRead>(reader: R) -> Result<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() && !lines.is_empty() {
            break;
        }
        if !line.trim().is_empty() {
            lines.push(line.trim_end().to_string());
        }
    }

    if lines.is_empty() {
        return Err(anyhow::anyhow!("Description must not be empty"));
    }
    Ok(lines.join("\n"))
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Displays the given prompt and accepts "y" or "yes" (case-insensitive) as confirmation.
/// Default is "no" if user presses Enter.
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, or "n"/"no")
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
