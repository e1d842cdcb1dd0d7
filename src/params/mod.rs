//! Function parameter discovery and textual value injection.

use std::{collections::BTreeSet, sync::OnceLock};

use regex::Regex;
use tracing::debug;

use crate::classify::UserInputMap;

fn def_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"def\s+\w+\s*\((.*?)\)\s*(?:->[^:\n]*)?:").expect("static regex")
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => chars.all(|c| c == '_' || c.is_alphanumeric()),
        _ => false,
    }
}

/// Parameter names of every single-line `def` header, deduplicated and sorted.
pub fn extract_parameters(code: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for caps in def_pattern().captures_iter(code) {
        for param in caps[1].split(',') {
            let name = param.split('=').next().unwrap_or_default();
            let name = name.split(':').next().unwrap_or_default();
            let name = name.trim().trim_start_matches('*');
            if is_identifier(name) {
                names.insert(name.to_string());
            }
        }
    }
    names
}

/// Escapes a value for use inside `r"..."` without terminating the literal.
fn raw_literal(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "\\r")
        .replace('\n', "\\n");
    format!("r\"{}\"", escaped)
}

/// Replaces the right-hand side of the first column-0 `name = ...` assignment of each input.
///
/// Values are written as raw literals, so the escapes added for `"`, CR and LF stay literal
/// backslash sequences at runtime: a value containing them is not reproduced byte for byte.
pub fn inject(code: &str, inputs: &UserInputMap) -> String {
    let mut names: Vec<&String> = inputs.keys().collect();
    names.sort();

    let mut code = code.to_string();
    for name in names {
        let pattern = format!(r"(?m)^{}[ \t]*=(?:[^=\n][^\n]*)?$", regex::escape(name));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        let Some(range) = re.find(&code).map(|m| m.range()) else {
            debug!(name = %name, "no assignment found for input");
            continue;
        };
        let replacement = format!("{} = {}", name, raw_literal(&inputs[name]));
        code.replace_range(range, &replacement);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&str, &str)]) -> UserInputMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn extracts_plain_and_default_parameters() {
        let code = "def greet(name, greeting='hi'):\n    pass\n\ndef add(a, b=2):\n    return a + b\n";
        let names: Vec<_> = extract_parameters(code).into_iter().collect();
        assert_eq!(names, vec!["a", "b", "greeting", "name"]);
    }

    #[test]
    fn strips_annotations_and_stars() {
        let code = "def f(x: int, *args, y: str = 'a', *, z=None, **kw) -> dict:\n    pass\n";
        let names: Vec<_> = extract_parameters(code).into_iter().collect();
        assert_eq!(names, vec!["args", "kw", "x", "y", "z"]);
    }

    #[test]
    fn no_definitions_no_parameters() {
        assert!(extract_parameters("print('def f(x)')").is_empty());
        assert!(extract_parameters("def f():\n    pass").is_empty());
    }

    #[test]
    fn injects_first_top_level_assignment_only() {
        let code = "path = input()\nprint(path)\npath = 'later'\n";
        let out = inject(code, &inputs(&[("path", "data.csv")]));
        assert_eq!(out, "path = r\"data.csv\"\nprint(path)\npath = 'later'\n");
    }

    #[test]
    fn backslashes_cannot_escape_the_literal() {
        let out = inject("p = ''\nprint(p)", &inputs(&[("p", r"C:\path\")]));
        assert_eq!(out, "p = r\"C:\\\\path\\\\\"\nprint(p)");
    }

    #[test]
    fn quotes_and_newlines_are_escaped() {
        let out = inject("s = 1", &inputs(&[("s", "a\"b\nc")]));
        assert_eq!(out, "s = r\"a\\\"b\\nc\"");
    }

    #[test]
    fn comparisons_and_prefixes_are_left_alone() {
        let code = "xs = [1]\nx == 2\nx = 3\n";
        let out = inject(code, &inputs(&[("x", "9")]));
        assert_eq!(out, "xs = [1]\nx == 2\nx = r\"9\"\n");
    }

    #[test]
    fn replacement_text_is_literal() {
        let out = inject("v = 0", &inputs(&[("v", "$1 ${name}")]));
        assert_eq!(out, "v = r\"$1 ${name}\"");
    }

    #[test]
    fn missing_assignment_leaves_code_unchanged() {
        let code = "def f(n):\n    return n\n";
        assert_eq!(inject(code, &inputs(&[("n", "5")])), code);
    }
}
