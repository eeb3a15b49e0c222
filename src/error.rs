use std::io;

/*
 * Result type used throughout the crate
 */
pub type Result<T, E = Error> = std::result::Result<T, E>;

/*
 * Exit code reported when node allocation fails (ENOMEM)
 */
pub const EXIT_OUT_OF_MEMORY: i32 = 12;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /*
     * The node arena refused an allocation
     */
    #[error("Not enough memory, {nodes} nodes were allocated before the failure")]
    OutOfMemory { nodes: usize },

    /*
     * A word longer than the token bound, only raised in strict mode
     */
    #[error("Token of {len} bytes exceeds the limit of {max} bytes")]
    TokenTooLong { len: usize, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{0}")]
    Usage(String),
}

impl Error {
    /*
     * Process exit code for this error : allocation failures get their
     * own code, everything else is a plain failure.
     */
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::OutOfMemory { .. } => EXIT_OUT_OF_MEMORY,
            _ => 1,
        }
    }
}
