use std::path::PathBuf;

use crate::{common::hex, editor::Editor, error::EditorError};

/// Command line commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Write(Option<PathBuf>),
    Quit { force: bool },
    WriteQuit(Option<PathBuf>),
    /// Write if modified and quit
    Exit,
    Goto(u64),
    Set { name: String, value: usize },
}

impl Command {
    /// Parse a command line, `None` if it is empty
    pub fn parse(input: &str) -> Result<Option<Command>, EditorError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };
        let path = || (!rest.is_empty()).then(|| PathBuf::from(rest));

        let cmd = match name {
            "w" | "write" => Command::Write(path()),
            "q" | "quit" => Command::Quit { force: false },
            "q!" | "quit!" => Command::Quit { force: true },
            "wq" => Command::WriteQuit(path()),
            "x" | "exit" => Command::Exit,
            "set" => {
                let (name, value) = rest.split_once('=').ok_or_else(|| {
                    EditorError::InvalidArgument(format!("expected name=value, got '{}'", rest))
                })?;
                let value = value.trim().parse().map_err(|_| {
                    EditorError::InvalidArgument(format!("'{}' is not a number", value.trim()))
                })?;
                Command::Set {
                    name: name.trim().to_string(),
                    value,
                }
            }
            _ => match hex::parse_offset(name) {
                Some(offset) if rest.is_empty() => Command::Goto(offset),
                _ => return Err(EditorError::UnknownCommand(input.to_string())),
            },
        };

        Ok(Some(cmd))
    }
}

/// Parse and run a command line
pub(crate) fn execute(editor: &mut Editor, input: &str) -> Result<(), EditorError> {
    let cmd = match Command::parse(input)? {
        Some(cmd) => cmd,
        None => return Ok(()),
    };
    log::info!("Command {:?}", cmd);

    match cmd {
        Command::Write(path) => write(editor, path)?,
        Command::Quit { force } => {
            if !force && editor.window().is_modified() {
                return Err(EditorError::Unsaved);
            }
            editor.quit();
        }
        Command::WriteQuit(path) => {
            write(editor, path)?;
            editor.quit();
        }
        Command::Exit => {
            if editor.window().is_modified() {
                write(editor, None)?;
            }
            editor.quit();
        }
        Command::Goto(offset) => editor.window_mut().goto(offset),
        Command::Set { name, value } => {
            let win = editor.window_mut();
            let mut options = win.options.clone();
            options
                .set(&name, value)
                .map_err(EditorError::InvalidArgument)?;
            win.set_options(options);
        }
    }

    Ok(())
}

fn write(editor: &mut Editor, path: Option<PathBuf>) -> Result<(), EditorError> {
    let win = editor.window_mut();
    let written = win.save(path.as_deref())?;
    let name = win
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    win.info(format!("\"{}\" {} bytes written", name, written));
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(input: &str) -> Command {
        Command::parse(input).unwrap().unwrap()
    }

    #[test]
    fn commands() {
        assert_eq!(Command::Write(None), parse("w"));
        assert_eq!(
            Command::Write(Some(PathBuf::from("out file.bin"))),
            parse("w  out file.bin ")
        );
        assert_eq!(Command::Quit { force: false }, parse("q"));
        assert_eq!(Command::Quit { force: true }, parse("q!"));
        assert_eq!(Command::WriteQuit(None), parse("wq"));
        assert_eq!(Command::Exit, parse("x"));
        assert_eq!(Command::Goto(0x1f), parse("0x1f"));
        assert_eq!(Command::Goto(31), parse("31"));
        assert_eq!(
            Command::Set {
                name: "bytes_per_row".into(),
                value: 8
            },
            parse("set bytes_per_row = 8")
        );
        assert_eq!(None, Command::parse("   ").unwrap());
    }

    #[test]
    fn invalid_commands() {
        assert!(matches!(
            Command::parse("frobnicate"),
            Err(EditorError::UnknownCommand(_))
        ));
        assert!(matches!(
            Command::parse("12 34"),
            Err(EditorError::UnknownCommand(_))
        ));
        assert!(matches!(
            Command::parse("set bytes_per_row"),
            Err(EditorError::InvalidArgument(_))
        ));
        assert!(matches!(
            Command::parse("set bytes_per_row=many"),
            Err(EditorError::InvalidArgument(_))
        ));
    }
}
