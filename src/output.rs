use owo_colors::OwoColorize;

use crate::research::SourceRecord;

/// Magnifier emoji prefix for pipeline status output
const LENS: &str = "🔍";

/// Print a pipeline status message (cyan)
pub fn status(message: &str) {
    println!("{} {}", LENS, message.cyan());
}

/// Print an informational message (white/default)
pub fn info(message: &str) {
    println!("{} {}", LENS, message);
}

/// Print a success message (green)
pub fn success(message: &str) {
    println!("{} {}", LENS, message.green());
}

/// Print a warning message (yellow)
pub fn warn(message: &str) {
    println!("{} {}", LENS, message.yellow());
}

/// Print an error message (red)
pub fn error(message: &str) {
    println!("{} {}", LENS, message.red());
}

/// Print a startup banner
pub fn banner(query: &str) {
    println!();
    println!("{}", "═".repeat(50).bright_cyan());
    println!("{}  {}", LENS, "FERRET".bright_cyan().bold());
    println!("{}", "═".repeat(50).bright_cyan());
    println!();
    println!("{} {}", "Query:".bright_white().bold(), query);
}

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!(
        "{}  {}",
        "─".repeat(3).bright_white().dimmed(),
        title.bright_white().bold()
    );
    println!();
}

/// Print the answer body
pub fn print_answer(answer: &str) {
    section("Answer");
    println!("{}", answer);
}

/// Print the numbered source list
pub fn print_sources(sources: &[SourceRecord]) {
    section("Sources");
    for (i, source) in sources.iter().enumerate() {
        println!("[{}] {}", i + 1, source.title.bright_white().bold());
        println!("    URL: {}", source.url.bright_cyan());
        println!();
    }
}
