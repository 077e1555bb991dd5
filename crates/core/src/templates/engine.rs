use std::collections::{HashMap, HashSet};
use std::fmt;

use super::parser::extract_variables;

/// Values supplied for each placeholder name.
pub type Values = HashMap<String, String>;

/// A template with its placeholders replaced, ready for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledDocument(String);

impl FilledDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilledDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace every `${name}` marker whose name the parser extracts from
/// `template` and that has an entry in `values`.
///
/// Substitution is a single pass over the original text: inserted values are
/// never scanned again, so a value that looks like `${other}` is kept
/// verbatim. Markers without a value are left as they are.
pub fn substitute(template: &str, values: &Values) -> String {
    let known: HashSet<String> = extract_variables(template).into_iter().collect();

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        // Names never contain `}`, so a marker always ends at the first one.
        let replacement = after_open.find('}').and_then(|end| {
            let name = &after_open[..end];
            if known.contains(name) {
                values.get(name).map(|value| (value, end))
            } else {
                None
            }
        });

        match replacement {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after_open[end + 1..];
            }
            None => {
                out.push('$');
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);

    out
}

/// Substitute `values` into `template`, producing the document to export.
pub fn fill(template: &str, values: &Values) -> FilledDocument {
    FilledDocument::new(substitute(template, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> Values {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_substitute_simple() {
        let v = values(&[("name", "World")]);
        assert_eq!(substitute("Hello ${name}", &v), "Hello World");
    }

    #[test]
    fn test_substitute_every_occurrence() {
        let v = values(&[("a", "1"), ("b", "2")]);
        assert_eq!(substitute("${a}-${b}-${a}", &v), "1-2-1");
    }

    #[test]
    fn test_missing_value_leaves_marker() {
        let v = values(&[("a", "1")]);
        assert_eq!(substitute("${a} ${b}", &v), "1 ${b}");
    }

    #[test]
    fn test_values_are_not_expanded() {
        let v = values(&[("a", "${b}"), ("b", "B")]);
        assert_eq!(substitute("${a} ${b}", &v), "${b} B");
    }

    #[test]
    fn test_empty_name_marker() {
        let v = values(&[("", "blank")]);
        assert_eq!(substitute("[${}]", &v), "[blank]");
    }

    #[test]
    fn test_text_outside_markers_untouched() {
        let v = values(&[("x", "X")]);
        assert_eq!(substitute("$5 {y} $ { ${x} $", &v), "$5 {y} $ { X $");
    }

    #[test]
    fn test_unterminated_marker_kept() {
        let v = values(&[("a", "A")]);
        assert_eq!(substitute("${a} ${a", &v), "A ${a");
    }

    #[test]
    fn test_marker_inside_malformed_prefix() {
        let v = values(&[("a", "A"), ("x$a", "unused")]);
        assert_eq!(substitute("${x${a} ${a}", &v), "${xA A");
    }

    #[test]
    fn test_fill_wraps_result() {
        let v = values(&[("who", "team")]);
        let doc = fill("Dear ${who},", &v);
        assert_eq!(doc.as_str(), "Dear team,");
        assert_eq!(doc.to_string(), "Dear team,");
    }
}
