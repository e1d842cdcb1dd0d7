//! Success/error verdicts from raw execution output.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

/// Parameter name to the value supplied by the user.
pub type UserInputMap = HashMap<String, String>;

pub const EMPTY_INPUT_MESSAGE: &str = "Empty user input detected.";
pub const EMPTY_OUTPUT_MESSAGE: &str = "No output was produced by the code execution.";

/// Lowercase phrases whose presence in output marks a failure, checked in order.
pub const ERROR_INDICATORS: &[&str] = &[
    "error",
    "exception",
    "traceback",
    "failed",
    "syntax error",
    "attribute error",
    "type error",
    "name error",
    "value error",
    "index error",
    "key error",
    "zero division error",
    "does not exist",
    "cannot find",
    "is not defined",
    "permission denied",
    "code execution timed out",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Success,
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success => f.write_str("Success"),
            Status::Error => f.write_str("Error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub status: Status,
    pub message: String,
}

impl Verdict {
    fn success(message: impl Into<String>) -> Self {
        Self { status: Status::Success, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { status: Status::Error, message: message.into() }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Classifies execution output. Inputs are checked first, then emptiness, then indicators.
pub fn classify(output: &str, user_inputs: &UserInputMap) -> Verdict {
    if user_inputs.values().any(|v| v.trim().is_empty()) {
        return Verdict::error(EMPTY_INPUT_MESSAGE);
    }
    if output.trim().is_empty() {
        return Verdict::error(EMPTY_OUTPUT_MESSAGE);
    }

    let lower = output.to_lowercase();
    if let Some(indicator) = ERROR_INDICATORS.iter().find(|i| lower.contains(*i)) {
        debug!(indicator, "error indicator found in output");
        return Verdict::error(format!("Error detected: {}", output));
    }

    Verdict::success(output)
}

/// Short explanation of a raw error message for display next to a fix.
pub fn hint(error_message: &str) -> &'static str {
    if error_message.contains("SyntaxError") {
        "Syntax Error detected. Please review the code for potential issues."
    } else if error_message.contains("TypeError") {
        "Type Error detected. Ensure that the function is being called with the correct argument types.\n\
         Example: Passing an integer where a string is expected could cause this issue."
    } else if error_message.contains("NameError") {
        "Name Error: A variable or function is not defined. Please ensure that all names used in the code are properly defined."
    } else if error_message.contains("ModuleNotFoundError") {
        "Module Not Found: The code is trying to use a Python module that is not installed."
    } else if error_message.contains("IndexError") {
        "Index Error: The code is trying to access an index that doesn't exist. This often happens when working with lists or arrays."
    } else if error_message.contains("KeyError") {
        "Key Error: The code is trying to access a dictionary key that doesn't exist. Make sure you're accessing valid keys."
    } else {
        "An unknown error occurred. Please check the code and inputs."
    }
}
