/// Split a command line into an argument vector.
///
/// Whitespace separates tokens unless it appears inside a `"..."` or `'...'`
/// span. Quote characters are stripped, and a quoted span joins any unquoted
/// text directly next to it (`--message="a b"` becomes `--message=a b`).
/// Inside a span the other quote character is literal. An unterminated quote
/// runs to the end of the input.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    // Set once a token has started, so `""` still produces an empty argument
    let mut in_token = false;

    for c in command.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_command() {
        assert_eq!(
            tokenize("git push origin main"),
            vec!["git", "push", "origin", "main"]
        );
    }

    #[test]
    fn test_double_quoted_message() {
        assert_eq!(
            tokenize(r#"git commit -m "fix: a b""#),
            vec!["git", "commit", "-m", "fix: a b"]
        );
    }

    #[test]
    fn test_single_quoted_message() {
        assert_eq!(
            tokenize("git commit -m 'initial commit'"),
            vec!["git", "commit", "-m", "initial commit"]
        );
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t  ").is_empty());
    }

    #[test]
    fn test_collapses_repeated_whitespace() {
        assert_eq!(tokenize("  git   status  "), vec!["git", "status"]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(
            tokenize(r#"git commit -m "unfinished message"#),
            vec!["git", "commit", "-m", "unfinished message"]
        );
    }

    #[test]
    fn test_other_quote_is_literal_inside_span() {
        assert_eq!(
            tokenize(r#"git commit -m "don't panic""#),
            vec!["git", "commit", "-m", "don't panic"]
        );
        assert_eq!(
            tokenize(r#"gh pr create --title 'say "hi"'"#),
            vec!["gh", "pr", "create", "--title", r#"say "hi""#]
        );
    }

    #[test]
    fn test_quoted_span_joins_adjacent_text() {
        assert_eq!(
            tokenize(r#"git commit --message="two words""#),
            vec!["git", "commit", "--message=two words"]
        );
    }

    #[test]
    fn test_empty_quotes_yield_empty_token() {
        assert_eq!(
            tokenize(r#"git commit --allow-empty -m """#),
            vec!["git", "commit", "--allow-empty", "-m", ""]
        );
    }
}
