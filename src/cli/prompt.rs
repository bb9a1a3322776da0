//! Line-based interactive prompts on stdin/stderr.

use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Interprets a yes/no answer; an empty answer takes `default`.
///
/// Returns `None` for anything that is not recognisably yes or no.
pub fn parse_confirmation(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Asks a yes/no question on the terminal.
pub fn confirm(question: &str, default: bool) -> Result<bool> {
    confirm_with(&mut io::stdin().lock(), &mut io::stderr(), question, default)
}

/// Asks a yes/no question, re-asking until the answer is understood.
///
/// End of input takes `default`.
pub fn confirm_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
    default: bool,
) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };

    loop {
        write!(writer, "{question} {hint} ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(default);
        }

        match parse_confirmation(&line, default) {
            Some(answer) => return Ok(answer),
            None => writeln!(writer, "Please answer yes or no.")?,
        }
    }
}

/// Reads one line of free text from the terminal.
pub fn ask(question: &str) -> Result<String> {
    ask_with(&mut io::stdin().lock(), &mut io::stderr(), question)
}

/// Reads one trimmed line of free text.
pub fn ask_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> Result<String> {
    writeln!(writer, "{question}")?;
    write!(writer, "> ")?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_confirmation_answers() {
        assert_eq!(parse_confirmation("", true), Some(true));
        assert_eq!(parse_confirmation("\n", false), Some(false));
        assert_eq!(parse_confirmation("Y", false), Some(true));
        assert_eq!(parse_confirmation(" yes ", false), Some(true));
        assert_eq!(parse_confirmation("n", true), Some(false));
        assert_eq!(parse_confirmation("No", true), Some(false));
        assert_eq!(parse_confirmation("maybe", true), None);
    }

    #[test]
    fn confirm_reasks_until_understood() {
        let mut input = Cursor::new("perhaps\nn\n");
        let mut output = Vec::new();
        let answer = confirm_with(&mut input, &mut output, "Use it?", true).unwrap();
        assert!(!answer);

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("Use it? [Y/n]").count(), 2);
        assert!(shown.contains("Please answer yes or no."));
    }

    #[test]
    fn confirm_takes_default_at_end_of_input() {
        let mut output = Vec::new();
        assert!(confirm_with(&mut Cursor::new(""), &mut output, "Use it?", true).unwrap());
        assert!(!confirm_with(&mut Cursor::new(""), &mut output, "Use it?", false).unwrap());
    }

    #[test]
    fn ask_trims_the_answer() {
        let mut output = Vec::new();
        let answer = ask_with(
            &mut Cursor::new("  fix: handle empty diff  \n"),
            &mut output,
            "Message?",
        )
        .unwrap();
        assert_eq!(answer, "fix: handle empty diff");
    }
}
