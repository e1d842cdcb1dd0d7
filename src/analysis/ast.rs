//! Syntax-node frequency summary over the tree-sitter Python grammar.
//!
//! tree-sitter accepts some sources the interpreter rejects (Python 2 `print "x"`), so
//! [`SyntaxChecker`] asks the configured interpreter's own parser first.

use std::{collections::BTreeMap, fmt, time::Duration};

use serde::Serialize;
use tracing::{debug, warn};
use tree_sitter::{Node, Parser};

use crate::process;

const PARSE_SCRIPT: &str = "\
import ast, sys
try:
    ast.parse(sys.argv[1])
except SyntaxError as e:
    print(f\"SyntaxError: {e}\")
    sys.exit(1)
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AstSummary {
    /// Named node kind to number of occurrences.
    Counts(BTreeMap<String, usize>),
    Error { error: String },
}

impl AstSummary {
    pub(crate) fn error(message: impl Into<String>) -> Self {
        AstSummary::Error { error: message.into() }
    }
}

impl fmt::Display for AstSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Counts every named node when `code` parses cleanly; otherwise reports the first syntax error.
pub fn ast_summary(code: &str) -> AstSummary {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&tree_sitter_python::LANGUAGE.into()) {
        return AstSummary::error(format!("SyntaxError: parser unavailable: {}", e));
    }
    let Some(tree) = parser.parse(code, None) else {
        return AstSummary::error("SyntaxError: source could not be parsed");
    };

    let root = tree.root_node();
    if root.has_error() {
        return AstSummary::error(describe_error(root));
    }

    let mut counts = BTreeMap::new();
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_named() {
            *counts.entry(node.kind().to_string()).or_insert(0) += 1;
        }

        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return AstSummary::Counts(counts);
            }
        }
    }
}

/// Syntax check through `<interpreter> -c` and the interpreter's `ast` module.
#[derive(Debug, Clone)]
pub struct SyntaxChecker {
    interpreter: String,
    timeout: Option<Duration>,
}

impl SyntaxChecker {
    pub fn new(interpreter: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self { interpreter: interpreter.into(), timeout }
    }

    /// `Some("SyntaxError: ...")` when the interpreter rejects `code`. `None` when it parses, or
    /// when the interpreter could not give an answer.
    pub async fn check(&self, code: &str) -> Option<String> {
        let out = match process::run(&self.interpreter, ["-c", PARSE_SCRIPT, code], self.timeout).await {
            Ok(out) => out,
            Err(e) => {
                warn!(error = %e, "interpreter syntax check unavailable");
                return None;
            }
        };
        if out.success() {
            return None;
        }
        let reported = out.stdout.trim();
        if out.exit_code == 1 && reported.starts_with("SyntaxError:") {
            debug!(error = reported, "interpreter rejected source");
            return Some(reported.to_string());
        }
        warn!(exit_code = out.exit_code, stderr = %out.stderr.trim(), "interpreter syntax check failed");
        None
    }

    /// Interpreter verdict first, then the tree-sitter summary.
    pub async fn summarize(&self, code: &str) -> AstSummary {
        match self.check(code).await {
            Some(error) => AstSummary::error(error),
            None => ast_summary(code),
        }
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|child| child.has_error())
        .find_map(first_error);
    found
}

fn describe_error(root: Node<'_>) -> String {
    let Some(node) = first_error(root) else {
        return "SyntaxError: invalid syntax".to_string();
    };
    let pos = node.start_position();
    let (line, column) = (pos.row + 1, pos.column + 1);
    if node.is_missing() {
        format!("SyntaxError: expected '{}' (line {}, column {})", node.kind(), line, column)
    } else {
        format!("SyntaxError: invalid syntax (line {}, column {})", line, column)
    }
}
