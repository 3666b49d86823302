use std::io::{self, Write};

/// Writes `text` plus a newline. A closed pipe (`finboard months | head`)
/// is not an error.
pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    tolerate_broken_pipe(stdout.write_all(text.as_bytes()))?;
    if !text.ends_with('\n') {
        tolerate_broken_pipe(stdout.write_all(b"\n"))?;
    }
    tolerate_broken_pipe(stdout.flush())
}

fn tolerate_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::tolerate_broken_pipe;

    #[test]
    fn broken_pipe_is_swallowed_but_other_errors_are_not() {
        let closed = Err(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(tolerate_broken_pipe(closed).is_ok());

        let denied = Err(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(tolerate_broken_pipe(denied).is_err());
    }
}
