use std::fs;
use std::io::{IsTerminal, Read};

use crate::import::invalid_input_error;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File(String),
    Stdin,
}

impl SourceKind {
    pub(crate) fn label(&self) -> String {
        match self {
            Self::File(path) => path.clone(),
            Self::Stdin => "stdin".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) kind: SourceKind,
    pub(crate) content: String,
}

/// `-` reads stdin; anything else is a file path.
pub(crate) fn resolve_source(
    path: &str,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    if path == "-" {
        let Some(body) = read_stdin(stdin_override)? else {
            return Err(invalid_input_error(
                "Path `-` means stdin input, but stdin was empty. Pipe CSV input or pass a file path.",
            ));
        };
        return Ok(ResolvedSource {
            kind: SourceKind::Stdin,
            content: body,
        });
    }

    let content = fs::read_to_string(path).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not read import file `{path}`: {error}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                format!("Rerun finboard import {path}."),
            ],
        )
    })?;

    Ok(ResolvedSource {
        kind: SourceKind::File(path.to_string()),
        content,
    })
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    let buffer = match stdin_override {
        Some(value) => value,
        None => {
            if std::io::stdin().is_terminal() {
                return Ok(None);
            }
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|error| {
                    ClientError::invalid_argument_with_recovery(
                        &format!("Could not read stdin: {error}"),
                        vec!["Retry with an explicit file path argument.".to_string()],
                    )
                })?;
            buffer
        }
    };

    if buffer.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(buffer))
}
