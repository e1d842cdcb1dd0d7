use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pyfix::{
    analysis::{Analyzer, Linter, SyntaxChecker},
    llm::{CompletionRequest, CompletionService, LlmError},
    repair::{clean_response, Repairer},
};

/// Returns a canned reply and records every request.
#[derive(Clone)]
struct ScriptedCompletion {
    reply: Option<String>,
    seen: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedCompletion {
    fn replying(reply: &str) -> Self {
        Self { reply: Some(reply.to_string()), seen: Arc::default() }
    }

    fn failing() -> Self {
        Self { reply: None, seen: Arc::default() }
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.seen.lock().unwrap().push(request);
        self.reply.clone().ok_or(LlmError::EmptyResponse)
    }
}

fn analyzer() -> Analyzer {
    Analyzer::new(
        SyntaxChecker::new("pyfix-no-such-python", None),
        Linter::new(vec!["pyfix-no-such-linter".into()], None),
    )
}

#[tokio::test]
async fn fix_returns_code_without_fences() {
    let service = ScriptedCompletion::replying("```python\nprint(1)\n```");
    let seen = service.seen.clone();
    let repairer = Repairer::new(service, analyzer());

    let fixed = repairer
        .fix("print(1", "SyntaxError: '(' was never closed")
        .await
        .unwrap();
    assert_eq!(fixed, "print(1)");

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.system.contains("only valid Python code"));
    assert!(request.user.contains("### Original Code:\nprint(1\n"));
    assert!(request.user.contains("SyntaxError: '(' was never closed"));
    assert!(request.user.contains(r#"{"error":"SyntaxError: "#), "{}", request.user);
    // The unavailable linter is reported inside the prompt rather than failing the fix.
    assert!(request.user.contains("pyfix-no-such-linter error: "));
}

#[tokio::test]
async fn completion_errors_propagate() {
    let repairer = Repairer::new(ScriptedCompletion::failing(), analyzer());
    let err = repairer.fix("x = 1", "boom").await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn generate_sends_the_description_verbatim() {
    let service = ScriptedCompletion::replying("Sure:\n```python\ndef add(a, b):\n    return a + b   \n```\n");
    let seen = service.seen.clone();
    let repairer = Repairer::new(service, analyzer());

    let code = repairer.generate("add two numbers").await.unwrap();
    assert_eq!(code, "Sure:\ndef add(a, b):\n    return a + b\n");
    assert_eq!(seen.lock().unwrap()[0].user, "add two numbers");
}

#[test]
fn cleaning_twice_changes_nothing() {
    let samples = [
        "```python\nprint(1)\n```",
        "```\na = 1  \n```\n\n```py\nb = 2\n```",
        "no fences here\n  indented  \n",
        "",
    ];
    for raw in samples {
        let once = clean_response(raw);
        assert_eq!(clean_response(&once), once, "{raw:?}");
    }
}
