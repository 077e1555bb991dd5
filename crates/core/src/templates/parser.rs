//! Extraction of `${name}` placeholder names from template text.

/// Return the distinct placeholder names in `template`, in order of first use.
///
/// A placeholder opens on a `{` directly preceded by `$` and closes on the
/// next `}`. Parsing is best-effort rather than strict:
/// - an unterminated placeholder at end of input is dropped;
/// - `${}` yields the empty name;
/// - there is no escape for a literal `${`.
pub fn extract_variables(template: &str) -> Vec<String> {
    let mut vars: Vec<String> = Vec::new();
    let mut prev: Option<char> = None;
    let mut inside = false;
    let mut name = String::new();

    for ch in template.chars() {
        // The opening brace never becomes the lookback character, and a
        // `${` inside a name keeps the `$` but swallows the brace.
        if ch == '{' && prev == Some('$') {
            inside = true;
            continue;
        }
        if inside {
            if ch == '}' {
                inside = false;
                let done = std::mem::take(&mut name);
                if !vars.contains(&done) {
                    vars.push(done);
                }
            } else {
                name.push(ch);
            }
        }
        prev = Some(ch);
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_placeholders() {
        assert!(extract_variables("no placeholders here").is_empty());
        assert!(extract_variables("").is_empty());
    }

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        assert_eq!(extract_variables("${a} and ${b} and ${a}"), vec!["a", "b"]);
        assert_eq!(extract_variables("${b}${a}${b}"), vec!["b", "a"]);
    }

    #[test]
    fn test_unterminated_placeholder_is_dropped() {
        assert_eq!(extract_variables("${done} then ${partial"), vec!["done"]);
        assert!(extract_variables("${").is_empty());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(extract_variables("before ${} after"), vec![""]);
    }

    #[test]
    fn test_lone_dollar_and_brace_are_text() {
        assert!(extract_variables("costs $5 {approx}").is_empty());
        assert!(extract_variables("$ {spaced}").is_empty());
    }

    #[test]
    fn test_brace_after_placeholder_does_not_reopen() {
        assert_eq!(extract_variables("${a}{b}"), vec!["a"]);
    }

    #[test]
    fn test_double_dollar() {
        assert_eq!(extract_variables("$${price}"), vec!["price"]);
    }

    #[test]
    fn test_nested_open_inside_name() {
        assert_eq!(extract_variables("${a{b}"), vec!["a{b"]);
        assert_eq!(extract_variables("${a${b}"), vec!["a$b"]);
    }

    #[test]
    fn test_names_keep_whitespace_and_unicode() {
        assert_eq!(
            extract_variables("${ company } in ${Zürich}"),
            vec![" company ", "Zürich"]
        );
    }
}
