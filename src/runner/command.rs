//! Command line tokenizer
//!
//! Splits on whitespace; a `"`-quoted run of tokens is rejoined with a
//! single space and the quote characters are dropped.

use crate::error::{PiMenuError, Result};

const QUOTE: char = '"';

/// Tokenize `command_line` into argv
///
/// Fails with [`PiMenuError::MalformedCommand`] when the line holds an odd
/// number of `"` characters. Nothing is spawned in that case.
pub fn parse_command(command_line: &str) -> Result<Vec<String>> {
    if command_line.matches(QUOTE).count() % 2 != 0 {
        return Err(PiMenuError::MalformedCommand {
            command: command_line.to_string(),
        });
    }

    let mut argv: Vec<String> = Vec::new();
    let mut in_quotes = false;

    for token in command_line.split_whitespace() {
        let piece: String = token.chars().filter(|&c| c != QUOTE).collect();

        match argv.last_mut() {
            Some(last) if in_quotes => {
                if !piece.is_empty() {
                    if !last.is_empty() {
                        last.push(' ');
                    }
                    last.push_str(&piece);
                }
            }
            _ => argv.push(piece),
        }

        if token.matches(QUOTE).count() % 2 != 0 {
            in_quotes = !in_quotes;
        }
    }

    Ok(argv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(parse_command("a b c").unwrap(), argv(&["a", "b", "c"]));
        assert_eq!(parse_command("  a\t b  ").unwrap(), argv(&["a", "b"]));
    }

    #[test]
    fn quoted_segment_is_one_token() {
        assert_eq!(
            parse_command(r#"a "b c" d"#).unwrap(),
            argv(&["a", "b c", "d"])
        );
    }

    #[test]
    fn quoted_path_keeps_backslashes() {
        assert_eq!(
            parse_command(r#"python "C:\Users\x\Scripts\show.py""#).unwrap(),
            argv(&["python", r"C:\Users\x\Scripts\show.py"])
        );
    }

    #[test]
    fn split_quoted_path_rejoins_with_single_space() {
        assert_eq!(
            parse_command(r#"python "C:\Users\x\Python   Scripts\show.py""#).unwrap(),
            argv(&["python", r"C:\Users\x\Python Scripts\show.py"])
        );
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let err = parse_command(r#"python "C:\Users\x\Scripts\show.py"#).unwrap_err();
        assert!(matches!(err, PiMenuError::MalformedCommand { .. }));
    }

    #[test]
    fn quotes_inside_a_token() {
        assert_eq!(
            parse_command(r#"tool --title="Hello World" -v"#).unwrap(),
            argv(&["tool", "--title=Hello World", "-v"])
        );
    }

    #[test]
    fn empty_line_has_no_tokens() {
        assert!(parse_command("   ").unwrap().is_empty());
    }
}
