use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AiProvider {
    #[default]
    Claude,
    Codex,
    Gemini,
}

impl AiProvider {
    pub fn command_name(&self) -> &'static str {
        match self {
            AiProvider::Claude => "claude",
            AiProvider::Codex => "codex",
            AiProvider::Gemini => "gemini",
        }
    }

    /// 非対話モードでプロンプトを1回実行する引数
    pub fn prompt_args(&self, prompt: &str, model: Option<&str>) -> Vec<String> {
        let mut args = match self {
            AiProvider::Claude => vec![
                "-p".to_string(),
                prompt.to_string(),
                "--output-format".to_string(),
                "text".to_string(),
            ],
            AiProvider::Codex => vec!["exec".to_string(), prompt.to_string()],
            AiProvider::Gemini => vec!["-p".to_string(), prompt.to_string()],
        };

        if let Some(model) = model {
            args.push(match self {
                AiProvider::Codex => "-m".to_string(),
                _ => "--model".to_string(),
            });
            args.push(model.to_string());
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_args_claude_with_model() {
        let args = AiProvider::Claude.prompt_args("hello", Some("sonnet"));
        assert_eq!(args, vec!["-p", "hello", "--output-format", "text", "--model", "sonnet"]);
    }

    #[test]
    fn test_prompt_args_codex() {
        let args = AiProvider::Codex.prompt_args("hello", None);
        assert_eq!(args, vec!["exec", "hello"]);
    }
}
