//! Line-oriented read/execute loop.

use std::io::{self, BufRead, Write};

use crate::command::Command;
use crate::session::{Reply, Session};

/// Greeting printed before the first prompt.
pub const BANNER: &str = "Memory Simulator CLI\nType 'exit' to quit";

/// Prompt written before each line is read.
pub const PROMPT: &str = "> ";

/// Drive `session` from `input` until `exit` or end of input.
///
/// Replies and parse errors go to `output`. Returns the number of commands
/// executed.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> io::Result<usize> {
    writeln!(output, "{BANNER}")?;
    let mut executed = 0;
    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;
        let Some(line) = lines.next().transpose()? else {
            writeln!(output)?;
            break;
        };
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(line = %line, error = %e, "rejected input");
                writeln!(output, "{e}")?;
                continue;
            }
        };
        executed += 1;
        match session.execute(command) {
            Reply::Text(text) => writeln!(output, "{}", text.trim_end())?,
            Reply::Exit => break,
        }
    }
    Ok(executed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(script: &str) -> (String, usize) {
        let mut session = Session::new();
        let mut out = Vec::new();
        let n = run(&mut session, script.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), n)
    }

    #[test]
    fn stops_at_exit() {
        let (out, n) = transcript("init memory 10\nexit\nmalloc 4\n");
        assert_eq!(n, 2);
        assert!(out.starts_with(BANNER));
        assert!(out.contains("> Initialized memory of size 10\n"));
        assert!(!out.contains("Allocated"));
    }

    #[test]
    fn stops_at_end_of_input() {
        let (out, n) = transcript("init memory 10\n\nmalloc 4");
        assert_eq!(n, 2);
        assert!(out.contains("Allocated block id=1"));
    }

    #[test]
    fn parse_errors_do_not_end_the_loop() {
        let (out, n) = transcript("frobnicate\ninit memory 8\n");
        assert_eq!(n, 1);
        assert!(out.contains("Unknown command 'frobnicate'\n"));
        assert!(out.contains("Initialized memory of size 8"));
    }
}
