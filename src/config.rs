use crate::collate::Folding;
use crate::error::{Error, Result};
use crate::token::Overlong;

pub const USAGE: &str = "\
Usage : listsort [sort|uniq] [options] < input

Reads whitespace separated words from standard input until end of input or
a lone '.', then prints them one per line.

  sort                    case-insensitive stable sort (default)
  uniq                    distinct words in first-seen order
  --count                 uniq only : print the number of distinct words
  --fold=residue|ascii    byte folding used when sorting (default residue)
  --strict                fail on words longer than 63 bytes instead of splitting them
  --memory-limit=BYTES    cap the memory used for list nodes
  -v, --verbose           debug logging on stderr
  -h, --help              print this help";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Sort,
    Uniq,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub mode: Mode,
    pub folding: Folding,
    pub overlong: Overlong,
    pub count: bool,
    pub memory_limit: Option<usize>,
    pub verbose: bool,
    pub help: bool,
}

impl Config {
    /*
     * Parse command line arguments, program name excluded.
     */
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut mode: Option<Mode> = None;

        for arg in args {
            match arg.as_str() {
                "sort" | "uniq" if mode.is_some() => {
                    return Err(Error::Usage(format!("Mode given twice : {}", arg)))
                }
                "sort" => mode = Some(Mode::Sort),
                "uniq" => mode = Some(Mode::Uniq),
                "--count" => config.count = true,
                "--strict" => config.overlong = Overlong::Reject,
                "-v" | "--verbose" => config.verbose = true,
                "-h" | "--help" => config.help = true,
                other => {
                    if let Some(fold) = other.strip_prefix("--fold=") {
                        config.folding = match fold {
                            "residue" => Folding::Residue,
                            "ascii" => Folding::Ascii,
                            _ => return Err(Error::Usage(format!("Unknown folding {}", fold))),
                        };
                    } else if let Some(limit) = other.strip_prefix("--memory-limit=") {
                        let limit = limit
                            .parse::<usize>()
                            .map_err(|_| Error::Usage(format!("Invalid memory limit {}", limit)))?;
                        config.memory_limit = Some(limit);
                    } else {
                        return Err(Error::Usage(format!("Unknown argument {}", other)));
                    }
                }
            }
        }

        config.mode = mode.unwrap_or_default();
        if config.count && config.mode != Mode::Uniq {
            return Err(Error::Usage("--count only applies to uniq".into()));
        }
        Ok(config)
    }
}
