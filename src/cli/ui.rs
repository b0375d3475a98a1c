use crate::bot::{Keyboard, SendCommand};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Bot,
    Button,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Bot => style(text).green(),
        StyleType::Button => style(text).cyan().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Renders keyboard rows as bracketed buttons, one line per row.
pub fn format_keyboard(keyboard: &Keyboard) -> String {
    let rows: Vec<Vec<String>> = match keyboard {
        Keyboard::Menu => Keyboard::menu_rows()
            .iter()
            .map(|row| row.iter().map(|label| label.to_string()).collect())
            .collect(),
        Keyboard::Inline(rows) => rows
            .iter()
            .map(|row| row.iter().map(|b| b.label.clone()).collect())
            .collect(),
    };

    rows.iter()
        .map(|row| {
            row.iter()
                .map(|label| style_text(&format!("[{label}]"), StyleType::Button))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats a bot response for the terminal, keyboard included.
pub fn format_response(command: &SendCommand) -> String {
    let mut out = style_text(&command.text, StyleType::Bot);
    if let Some(keyboard) = &command.keyboard {
        out.push('\n');
        out.push_str(&format_keyboard(keyboard));
    }
    out
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("{}", style_text(&"─".repeat(term_width), StyleType::Subtle));
}
