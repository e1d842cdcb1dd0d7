//! Printers: colored status lines, code blocks (termimad) and JSON.

use owo_colors::OwoColorize;
use serde::Serialize;
use termimad::MadSkin;

use pyfix::classify::{Status, Verdict};

pub struct TextPrinter {
    pub color: Option<&'static str>,
}

impl TextPrinter {
    pub fn print(&self, text: &str) {
        match self.color {
            Some("green") => println!("{}", text.green()),
            Some("red") => println!("{}", text.red()),
            Some("yellow") => println!("{}", text.yellow()),
            Some("cyan") => println!("{}", text.cyan()),
            _ => println!("{}", text),
        }
    }
}

pub struct MarkdownPrinter {
    pub skin: MadSkin,
}

impl Default for MarkdownPrinter {
    fn default() -> Self {
        Self { skin: MadSkin::default() }
    }
}

impl MarkdownPrinter {
    pub fn print(&self, text: &str) {
        self.skin.print_text(text);
        println!();
    }
}

pub fn print_verdict(verdict: &Verdict) {
    match verdict.status {
        Status::Success => TextPrinter { color: Some("green") }.print("Success"),
        Status::Error => TextPrinter { color: Some("red") }.print("Error"),
    }
    println!("{}", verdict.message.trim_end());
}

/// Python code, fenced and rendered when `md` is set.
pub fn print_code(code: &str, md: bool) {
    if md {
        MarkdownPrinter::default().print(&format!("```python\n{}\n```", code.trim_end()));
    } else {
        println!("{}", code.trim_end());
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
