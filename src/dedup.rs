use tracing::debug;

use crate::error::Result;
use crate::linkedlist::{List, NodeArena};
use crate::token::Token;

/*
 * Outcome of handing one token to the deduplicator
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    Inserted,
    Duplicate,
    /*
     * The source hit the sentinel or end-of-stream
     */
    Stop,
}

/*
 * Append `token` at the tail of `list` unless an identical token is already
 * stored. Comparison is byte for byte, so case matters here.
 */
pub fn insert<'a>(arena: &'a NodeArena, list: &mut List<'a, Token>, token: Token) -> Result<Scan> {
    let mut cursor = &mut list.head;
    while let Some(node) = cursor {
        if node.value == token {
            return Ok(Scan::Duplicate);
        }
        cursor = &mut node.next;
    }
    *cursor = Some(arena.alloc(token)?);
    list.len += 1;
    Ok(Scan::Inserted)
}

/*
 * Feed every token of `source` through `insert`, returning the distinct
 * tokens in first-seen order.
 */
pub fn distinct<'a, I>(arena: &'a NodeArena, source: I) -> Result<List<'a, Token>>
where
    I: IntoIterator<Item = Result<Token>>,
{
    let mut list = List::new();
    let mut tokens = source.into_iter();
    let mut duplicates = 0usize;
    loop {
        let scan = match tokens.next().transpose()? {
            Some(token) => insert(arena, &mut list, token)?,
            None => Scan::Stop,
        };
        match scan {
            Scan::Inserted => {}
            Scan::Duplicate => duplicates += 1,
            Scan::Stop => break,
        }
    }
    debug!(distinct = list.len(), duplicates, "deduplication done");
    Ok(list)
}
