//! Command parser for the : command system

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch tab; the identifier stays raw until the router coerces it
    Tab(String),
    Block(u64),
    Transaction(String),
    Back,
    Retry,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        "tab" | "t" | "go" => {
            if let Some(tab) = args {
                Command::Tab(tab)
            } else {
                Command::Unknown(input.to_string())
            }
        }
        "block" | "blk" | "b" => {
            match args.as_deref().map(|s| s.trim_start_matches('#').parse::<u64>()) {
                Some(Ok(number)) => Command::Block(number),
                _ => Command::Unknown(input.to_string()),
            }
        }
        "tx" | "transaction" => {
            if let Some(hash) = args {
                Command::Transaction(hash)
            } else {
                Command::Unknown(input.to_string())
            }
        }
        "back" => Command::Back,
        "retry" | "reload" => Command::Retry,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(parse_command("tab blocks"), Command::Tab("blocks".to_string()));
        assert_eq!(
            parse_command("go knowledge-graph"),
            Command::Tab("knowledge-graph".to_string())
        );
        assert_eq!(parse_command("back"), Command::Back);
        assert_eq!(parse_command("  quit "), Command::Quit);
    }

    #[test]
    fn test_parse_selection_commands() {
        assert_eq!(parse_command("block 42"), Command::Block(42));
        assert_eq!(parse_command("blk #7"), Command::Block(7));
        assert_eq!(
            parse_command("tx 0xabc"),
            Command::Transaction("0xabc".to_string())
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
        assert_eq!(parse_command("tab"), Command::Unknown("tab".to_string()));
        assert_eq!(
            parse_command("block latest"),
            Command::Unknown("block latest".to_string())
        );
    }
}
