use std::io::Write;

use crate::error::Result;
use crate::linkedlist::List;
use crate::token::Token;

/*
 * Write every token of `list` on its own line, head to tail.
 */
pub fn print_tokens<W: Write>(list: &List<'_, Token>, out: &mut W) -> Result<()> {
    for token in list.iter() {
        out.write_all(token.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
