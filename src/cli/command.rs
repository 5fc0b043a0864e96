use snafu::prelude::*;

/// One line of shell input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Mode(String),
    Create { name: String, size: Option<u64> },
    Mkdir(String),
    Delete { name: String, recursive: bool },
    Rename { from: String, to: String },
    Info(String),
    Cd(String),
    Pwd,
    List,
    Tree,
    Search(String),
    Logs,
    Reset,
    Demo,
    Help,
    Exit,
}

impl TryFrom<&str> for Command {
    type Error = CommandError;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(Command::Empty);
        };
        let args = words.collect::<Vec<_>>();

        let command = match word.to_lowercase().as_str() {
            "mode" => match args.as_slice() {
                [mode] => Command::Mode(mode.to_string()),
                _ => return UsageSnafu { usage: USAGE_MODE }.fail(),
            },
            "create" => {
                let name = first(&args, USAGE_CREATE)?;
                let size = args
                    .get(1)
                    .map(|raw| raw.parse::<u64>().ok().context(InvalidSizeSnafu { value: *raw }))
                    .transpose()?;
                Command::Create { name, size }
            }
            "mkdir" => Command::Mkdir(first(&args, USAGE_MKDIR)?),
            "delete" | "rm" => Command::Delete {
                name: first(&args, USAGE_DELETE)?,
                recursive: args[1..].iter().any(|arg| matches!(*arg, "--recursive" | "-r")),
            },
            "rename" => match args.as_slice() {
                [from, to, ..] => Command::Rename {
                    from: from.to_string(),
                    to: to.to_string(),
                },
                _ => return UsageSnafu { usage: USAGE_RENAME }.fail(),
            },
            "info" | "stat" => Command::Info(first(&args, USAGE_INFO)?),
            "cd" => Command::Cd(first(&args, USAGE_CD)?),
            "pwd" => Command::Pwd,
            "ls" | "list" => Command::List,
            "tree" => Command::Tree,
            "search" => Command::Search(strip_quotes(&first(&args, USAGE_SEARCH)?).to_string()),
            "logs" => Command::Logs,
            "reset" => Command::Reset,
            "demo" => Command::Demo,
            "help" | "?" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => return UnknownCommandSnafu { command: other }.fail(),
        };
        Ok(command)
    }
}

const USAGE_MODE: &str = "mode <single|two-level|hierarchical>";
const USAGE_CREATE: &str = "create <filename> [size-in-bytes]";
const USAGE_MKDIR: &str = "mkdir <dirname>";
const USAGE_DELETE: &str = "delete <name> [--recursive]";
const USAGE_RENAME: &str = "rename <old_name> <new_name>";
const USAGE_INFO: &str = "info <name>";
const USAGE_CD: &str = "cd <path>";
const USAGE_SEARCH: &str = "search <query>";

fn first(args: &[&str], usage: &'static str) -> Result<String, CommandError> {
    args.first()
        .map(|arg| arg.to_string())
        .context(UsageSnafu { usage })
}

fn strip_quotes(raw: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            raw.strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(raw)
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum CommandError {
    #[snafu(display("Usage: {}", usage))]
    Usage { usage: &'static str },
    #[snafu(display("Unknown command: '{}'. Type 'help' for available commands", command))]
    UnknownCommand { command: String },
    #[snafu(display("Invalid size '{}', expected a number of bytes", value))]
    InvalidSize { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(line: &str) -> Result<Command, CommandError> {
        Command::try_from(line)
    }

    #[rstest]
    #[case("", Command::Empty)]
    #[case("   ", Command::Empty)]
    #[case("pwd", Command::Pwd)]
    #[case("LS", Command::List)]
    #[case("list", Command::List)]
    #[case("tree", Command::Tree)]
    #[case("logs", Command::Logs)]
    #[case("reset", Command::Reset)]
    #[case("demo", Command::Demo)]
    #[case("?", Command::Help)]
    #[case("quit", Command::Exit)]
    #[case("mode two-level", Command::Mode("two-level".into()))]
    #[case("mkdir docs", Command::Mkdir("docs".into()))]
    #[case("cd ../docs", Command::Cd("../docs".into()))]
    #[case("stat a.txt", Command::Info("a.txt".into()))]
    #[case("rename a b", Command::Rename { from: "a".into(), to: "b".into() })]
    #[case("search \"*.txt\"", Command::Search("*.txt".into()))]
    #[case("search 'a?c'", Command::Search("a?c".into()))]
    #[case("search *.pdf", Command::Search("*.pdf".into()))]
    fn parses_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(parse(line), Ok(expected));
    }

    #[rstest]
    #[case("create a.txt", None)]
    #[case("create a.txt 4096", Some(4096))]
    fn parses_create_with_optional_size(#[case] line: &str, #[case] size: Option<u64>) {
        assert_eq!(
            parse(line),
            Ok(Command::Create {
                name: "a.txt".into(),
                size
            })
        );
    }

    #[rstest]
    #[case("rm docs", false)]
    #[case("delete docs --recursive", true)]
    #[case("rm docs -r", true)]
    #[case("rm docs --force", false)]
    fn parses_delete_flags(#[case] line: &str, #[case] recursive: bool) {
        assert_eq!(
            parse(line),
            Ok(Command::Delete {
                name: "docs".into(),
                recursive
            })
        );
    }

    #[rstest]
    #[case("mode")]
    #[case("mode single extra")]
    #[case("create")]
    #[case("mkdir")]
    #[case("rm")]
    #[case("rename only-one")]
    #[case("info")]
    #[case("cd")]
    #[case("search")]
    fn missing_arguments_print_usage(#[case] line: &str) {
        assert!(matches!(parse(line), Err(CommandError::Usage { .. })));
    }

    #[test]
    fn rejects_unknown_command_and_bad_size() {
        assert_eq!(
            parse("format c:"),
            Err(CommandError::UnknownCommand {
                command: "format".into()
            })
        );
        assert_eq!(
            parse("create a.txt big"),
            Err(CommandError::InvalidSize {
                value: "big".into()
            })
        );
    }
}
