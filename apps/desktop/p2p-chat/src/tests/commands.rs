use crate::commands::ShellCommand;
use crate::error::ChatAppError;

#[test]
fn given_known_commands_when_parsed_then_mapped() {
    let cases = [
        ("/init", ShellCommand::Init),
        ("/peer 12D3KooW", ShellCommand::Peer("12D3KooW".to_string())),
        ("/send hello there", ShellCommand::Send("hello there".to_string())),
        ("/help", ShellCommand::Help),
        ("/quit", ShellCommand::Quit),
        ("/exit", ShellCommand::Quit),
    ];

    for (line, expected) in cases {
        assert_eq!(line.parse::<ShellCommand>().unwrap(), expected, "{line}");
    }
}

/// **VALUE**: Missing arguments are allowed through; the backend decides.
#[test]
fn given_commands_without_arguments_when_parsed_then_empty_strings() {
    assert_eq!(
        "/peer".parse::<ShellCommand>().unwrap(),
        ShellCommand::Peer(String::new())
    );
    assert_eq!(
        "/send".parse::<ShellCommand>().unwrap(),
        ShellCommand::Send(String::new())
    );
}

#[test]
fn given_plain_text_when_parsed_then_sent_verbatim() {
    let command = "  spaced out  ".parse::<ShellCommand>().unwrap();

    assert_eq!(command, ShellCommand::Send("  spaced out  ".to_string()));
}

#[test]
fn given_unknown_command_when_parsed_then_input_error() {
    let result = "/dance".parse::<ShellCommand>();

    match result {
        Err(ChatAppError::Input { message, .. }) => assert!(message.contains("/dance")),
        other => panic!("Expected input error, got {other:?}"),
    }
}
