use super::*;

fn parse(line: &str) -> ShellCommand {
    ShellCommand::parse(line).unwrap().unwrap()
}

#[test]
fn test_blank_lines_are_ignored() {
    assert_eq!(ShellCommand::parse(""), Ok(None));
    assert_eq!(ShellCommand::parse("   \n"), Ok(None));
}

#[test]
fn test_simple_commands_and_aliases() {
    assert_eq!(parse("ls"), ShellCommand::List);
    assert_eq!(parse("cat\n"), ShellCommand::Show);
    assert_eq!(parse("  check"), ShellCommand::Check);
    assert_eq!(parse("share"), ShellCommand::Share);
    assert_eq!(parse("url"), ShellCommand::Url);
    assert_eq!(parse("?"), ShellCommand::Help);
    assert_eq!(parse("exit"), ShellCommand::Quit);
    assert_eq!(parse("q"), ShellCommand::Quit);
}

#[test]
fn test_file_commands_take_names() {
    assert_eq!(parse("open util.py"), ShellCommand::Open("util.py".to_string()));
    assert_eq!(parse("new"), ShellCommand::New(None));
    assert_eq!(parse("new  extra.py "), ShellCommand::New(Some("extra.py".to_string())));
    assert_eq!(parse("rm a.py"), ShellCommand::Remove("a.py".to_string()));
    assert_eq!(
        parse("mv main.py app.py"),
        ShellCommand::Rename {
            from: "main.py".to_string(),
            to: "app.py".to_string(),
        }
    );
}

#[test]
fn test_missing_arguments_are_reported() {
    assert_eq!(
        ShellCommand::parse("open"),
        Err(CommandError::MissingArgument {
            command: "open",
            argument: "NAME",
        })
    );
    assert_eq!(
        ShellCommand::parse("mv a.py"),
        Err(CommandError::MissingArgument {
            command: "mv",
            argument: "NEW",
        })
    );
    assert_eq!(
        ShellCommand::parse("rm").unwrap_err().to_string(),
        "rm: missing NAME"
    );
}

#[test]
fn test_unknown_command() {
    assert_eq!(
        ShellCommand::parse("frobnicate now"),
        Err(CommandError::Unknown("frobnicate".to_string()))
    );
}

#[test]
fn test_text_commands_keep_inner_whitespace() {
    assert_eq!(parse("set x  =  1"), ShellCommand::Set("x  =  1".to_string()));
    assert_eq!(parse("set"), ShellCommand::Set(String::new()));
    assert_eq!(parse("set x = 1 \r\n"), ShellCommand::Set("x = 1 ".to_string()));
    assert_eq!(
        parse("append if x:\\n\\tpass"),
        ShellCommand::Append("if x:\n\tpass".to_string())
    );
}

#[test]
fn test_unescape() {
    assert_eq!(unescape(r"a\nb"), "a\nb");
    assert_eq!(unescape(r"a\\nb"), "a\\nb");
    assert_eq!(unescape(r"\q"), "\\q");
    assert_eq!(unescape("trailing\\"), "trailing\\");
}

#[test]
fn test_command_names() {
    assert_eq!(ShellCommand::Rename { from: String::new(), to: String::new() }.name(), "mv");
    assert_eq!(ShellCommand::Show.name(), "cat");
    assert!(HELP.lines().count() >= 12);
}
