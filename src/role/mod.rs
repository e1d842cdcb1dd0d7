//! System instructions sent with every completion request.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRole {
    /// Repair failing code.
    Repair,
    /// Write new code from a description.
    Generate,
}

pub fn default_role_text(role: DefaultRole) -> String {
    let task = match role {
        DefaultRole::Repair => "You fix broken Python programs so that they run correctly.\nKeep the original intent, names and structure wherever possible.",
        DefaultRole::Generate => "You write Python programs from a short description.\nIf there is a lack of details, provide the most logical solution.\nYou are not allowed to ask for more details.",
    };
    format!(
        "You are an AI programming assistant.\n{task}\nProvide only valid Python code as output, without any description or explanation.\nWrap the code in a single fenced block: ```python ... ```."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_asks_for_fenced_code_only() {
        for role in [DefaultRole::Repair, DefaultRole::Generate] {
            let text = default_role_text(role);
            assert!(text.contains("only valid Python code"));
            assert!(text.contains("```python"));
        }
    }
}
