use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct ClearCommand;

#[async_trait]
impl Command for ClearCommand {
    fn name(&self) -> &str {
        "/clear"
    }

    fn aliases(&self) -> &[&str] {
        &["/reset"]
    }

    fn description(&self) -> &str {
        "clear the input and the last result"
    }

    async fn execute(&self, _info: &SessionInfo<'_>) -> CommandResult {
        CommandResult::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_info;

    #[tokio::test]
    async fn returns_clear() {
        assert!(matches!(
            ClearCommand.execute(&test_info()).await,
            CommandResult::Clear
        ));
    }

    #[test]
    fn metadata() {
        assert_eq!(ClearCommand.name(), "/clear");
        assert_eq!(ClearCommand.aliases(), &["/reset"]);
    }
}
