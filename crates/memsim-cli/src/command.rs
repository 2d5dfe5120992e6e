//! Command grammar.
//!
//! ```text
//! init memory <size>
//! set allocator <first_fit|best_fit|worst_fit>
//! malloc <size>
//! free <id>
//! dump
//! stats
//! exit
//! ```
//!
//! Tokens are whitespace-separated. Extra trailing tokens are ignored.

use std::error::Error;
use std::fmt;

use memsim_core::{AllocationId, FitStrategy, ParseStrategyError};

/// A parsed front-end command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Re-initialize memory to `size` bytes.
    Init {
        /// Size of the managed range.
        size: usize,
    },
    /// Select the placement strategy for subsequent `malloc`s.
    SetAllocator(FitStrategy),
    /// Allocate `size` bytes.
    Malloc {
        /// Bytes requested. Never zero.
        size: usize,
    },
    /// Free an allocation.
    Free {
        /// The allocation to free.
        id: AllocationId,
    },
    /// Print the block layout.
    Dump,
    /// Print allocator metrics.
    Stats,
    /// Leave the command loop.
    Exit,
}

/// Errors from [`Command::parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The first token is not a known command.
    UnknownCommand {
        /// The unrecognised token.
        command: String,
    },
    /// A required argument is missing.
    MissingArgument {
        /// The command being parsed.
        command: &'static str,
        /// Description of the expected argument.
        expected: &'static str,
    },
    /// A keyword argument did not match.
    UnexpectedKeyword {
        /// The keyword required at this position.
        expected: &'static str,
        /// The token found instead.
        found: String,
    },
    /// A numeric argument did not parse.
    InvalidNumber {
        /// The offending token.
        token: String,
    },
    /// A size argument was zero.
    ZeroSize {
        /// The command being parsed.
        command: &'static str,
    },
    /// `free 0`: ids start at 1.
    ZeroId,
    /// Unknown allocator name.
    Strategy(ParseStrategyError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand { command } => write!(f, "Unknown command '{command}'"),
            Self::MissingArgument { command, expected } => {
                write!(f, "usage: {command} {expected}")
            }
            Self::UnexpectedKeyword { expected, found } => {
                write!(f, "expected '{expected}', found '{found}'")
            }
            Self::InvalidNumber { token } => write!(f, "'{token}' is not a valid number"),
            Self::ZeroSize { command } => write!(f, "{command}: size must be at least 1"),
            Self::ZeroId => write!(f, "block ids start at 1"),
            Self::Strategy(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Strategy(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseStrategyError> for ParseError {
    fn from(e: ParseStrategyError) -> Self {
        Self::Strategy(e)
    }
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            return Ok(None);
        };

        let command = match head {
            "init" => {
                keyword(&mut tokens, "init", "memory", "memory <size>")?;
                let size = number(&mut tokens, "init", "memory <size>")?;
                if size == 0 {
                    return Err(ParseError::ZeroSize { command: "init" });
                }
                Self::Init {
                    size: to_usize(size)?,
                }
            }
            "set" => {
                keyword(&mut tokens, "set", "allocator", "allocator <type>")?;
                let name = tokens.next().ok_or(ParseError::MissingArgument {
                    command: "set",
                    expected: "allocator <type>",
                })?;
                Self::SetAllocator(name.parse()?)
            }
            "malloc" => {
                let size = number(&mut tokens, "malloc", "<size>")?;
                if size == 0 {
                    return Err(ParseError::ZeroSize { command: "malloc" });
                }
                Self::Malloc {
                    size: to_usize(size)?,
                }
            }
            "free" => {
                let raw = number(&mut tokens, "free", "<id>")?;
                let id = AllocationId::new(raw).ok_or(ParseError::ZeroId)?;
                Self::Free { id }
            }
            "dump" => Self::Dump,
            "stats" => Self::Stats,
            "exit" => Self::Exit,
            other => {
                return Err(ParseError::UnknownCommand {
                    command: other.to_string(),
                })
            }
        };
        Ok(Some(command))
    }
}

fn keyword<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    expected: &'static str,
    usage: &'static str,
) -> Result<(), ParseError> {
    match tokens.next() {
        Some(token) if token == expected => Ok(()),
        Some(token) => Err(ParseError::UnexpectedKeyword {
            expected,
            found: token.to_string(),
        }),
        None => Err(ParseError::MissingArgument {
            command,
            expected: usage,
        }),
    }
}

fn number<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    usage: &'static str,
) -> Result<u64, ParseError> {
    let token = tokens.next().ok_or(ParseError::MissingArgument {
        command,
        expected: usage,
    })?;
    token.parse().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
    })
}

fn to_usize(value: u64) -> Result<usize, ParseError> {
    usize::try_from(value).map_err(|_| ParseError::InvalidNumber {
        token: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(Command::parse("   \t "), Ok(None));
    }

    #[test]
    fn every_command_parses() {
        assert_eq!(parse("init memory 1024"), Command::Init { size: 1024 });
        assert_eq!(
            parse("set allocator best_fit"),
            Command::SetAllocator(FitStrategy::BestFit)
        );
        assert_eq!(parse("malloc 100"), Command::Malloc { size: 100 });
        assert_eq!(
            parse("free 3"),
            Command::Free {
                id: AllocationId::new(3).unwrap()
            }
        );
        assert_eq!(parse("dump"), Command::Dump);
        assert_eq!(parse("stats"), Command::Stats);
        assert_eq!(parse("exit"), Command::Exit);
    }

    #[test]
    fn extra_whitespace_tolerated() {
        assert_eq!(parse("  malloc    7  "), Command::Malloc { size: 7 });
    }

    #[test]
    fn bad_input_reports_why() {
        assert_eq!(
            Command::parse("launch"),
            Err(ParseError::UnknownCommand {
                command: "launch".into()
            })
        );
        assert_eq!(
            Command::parse("init cache 64"),
            Err(ParseError::UnexpectedKeyword {
                expected: "memory",
                found: "cache".into()
            })
        );
        assert_eq!(
            Command::parse("malloc"),
            Err(ParseError::MissingArgument {
                command: "malloc",
                expected: "<size>"
            })
        );
        assert_eq!(
            Command::parse("malloc -4"),
            Err(ParseError::InvalidNumber {
                token: "-4".into()
            })
        );
        assert_eq!(
            Command::parse("malloc 0"),
            Err(ParseError::ZeroSize { command: "malloc" })
        );
        assert_eq!(Command::parse("free 0"), Err(ParseError::ZeroId));
        assert!(matches!(
            Command::parse("set allocator next_fit"),
            Err(ParseError::Strategy(_))
        ));
    }
}
