use std::io::{self, Write};

/// Writes to stdout, optionally with a trailing newline. A closed pipe
/// counts as success so `perdiem ... | head` exits cleanly.
pub fn write_stdout(text: &str, trailing_newline: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    tolerate_closed_pipe(stdout.write_all(text.as_bytes()))?;
    if trailing_newline {
        tolerate_closed_pipe(stdout.write_all(b"\n"))?;
    }
    tolerate_closed_pipe(stdout.flush())
}

fn tolerate_closed_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
