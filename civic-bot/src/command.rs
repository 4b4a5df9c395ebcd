//! Slash-command parsing for inbound text.

/// A recognized bot command with its raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Report,
    /// `/my_status`; arguments are kept raw so the handler can report usage errors.
    MyStatus(Vec<String>),
    /// Any other `/command`.
    Unknown(String),
}

impl BotCommand {
    /// Parses `/name[@botname] args...`. Returns `None` when the text is not a command.
    pub fn parse(text: &str) -> Option<BotCommand> {
        let text = text.trim();
        let rest = text.strip_prefix('/')?;

        let mut parts = rest.split_whitespace();
        let head = parts.next()?;
        let name = head.split('@').next().unwrap_or(head);
        let args: Vec<String> = parts.map(str::to_string).collect();

        Some(match name {
            "start" => BotCommand::Start,
            "report" => BotCommand::Report,
            "my_status" => BotCommand::MyStatus(args),
            other => BotCommand::Unknown(other.to_string()),
        })
    }
}
