use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct StatusCommand;

fn status_text(info: &SessionInfo<'_>) -> String {
    let key = if info.credential_loaded {
        "loaded ✓"
    } else {
        "not loaded"
    };
    format!(
        "  model     {}\n  key from  {}\n  api key   {}\n  render    {}\n\n{}",
        info.model,
        info.key_url,
        key,
        info.typesetter.unwrap_or("none"),
        info.display.render(),
    )
}

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &str {
        "/status"
    }

    fn description(&self) -> &str {
        "show model, key status, and the last result"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        print!("{}", status_text(info));
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_info;

    #[tokio::test]
    async fn returns_handled() {
        assert!(matches!(
            StatusCommand.execute(&test_info()).await,
            CommandResult::Handled
        ));
    }

    #[test]
    fn text_reports_key_state() {
        let info = test_info();
        assert!(status_text(&info).contains("not loaded"));

        let loaded = SessionInfo {
            credential_loaded: true,
            typesetter: Some("cat"),
            ..test_info()
        };
        let text = status_text(&loaded);
        assert!(text.contains("loaded ✓"));
        assert!(text.contains("render    cat"));
        assert!(text.contains("gpt-4.1-mini"));
    }
}
