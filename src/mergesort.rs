/*
 * Top-down merge sort over a singly-linked list.
 *
 * No random access and no auxiliary buffer : halves are produced by walking
 * and cutting the chain, and merging only rewrites `next` links. Nodes are
 * never copied or allocated.
 */

use crate::linkedlist::{Link, Node};

/*
 * Sort the `len` nodes reachable from `head`, returning the new head.
 * Stable: nodes for which `is_le` holds both ways keep their relative order.
 *
 * A chain shorter than `len` is sorted as far as it goes.
 */
pub fn sort<'a, T, F>(head: &'a mut Node<'a, T>, len: usize, is_le: &mut F) -> &'a mut Node<'a, T>
where
    F: FnMut(&T, &T) -> bool,
{
    if len <= 1 {
        return head;
    }

    let mid = len / 2;
    match partition(head, mid) {
        Some(right) => {
            let left = sort(head, mid, is_le);
            let right = sort(right, len - mid, is_le);
            merge(left, right, is_le)
        }
        None => sort(head, mid, is_le),
    }
}

/*
 * Cut the list after its first `k` nodes and return the rest as an
 * independent list. Returns None (leaving the list untouched) when there
 * is no node at index `k`. Requires `k >= 1`.
 */
pub fn partition<'a, T>(head: &mut Node<'a, T>, k: usize) -> Link<'a, T> {
    debug_assert!(k >= 1, "cannot partition before the head");
    let mut control = head;
    for _ in 1..k {
        control = control.next.as_deref_mut()?;
    }
    control.next.take()
}

/*
 * Merge two sorted, non-empty lists into one. On ties the left node goes
 * first, which is what keeps the sort stable.
 */
pub fn merge<'a, T, F>(
    left: &'a mut Node<'a, T>,
    right: &'a mut Node<'a, T>,
    is_le: &mut F,
) -> &'a mut Node<'a, T>
where
    F: FnMut(&T, &T) -> bool,
{
    let (head, mut left, mut right) = if is_le(&left.value, &right.value) {
        let rest = left.next.take();
        (left, rest, Some(right))
    } else {
        let rest = right.next.take();
        (right, Some(left), rest)
    };

    let mut tail = &mut head.next;
    loop {
        let (l, r) = match (left, right) {
            (Some(l), Some(r)) => (l, r),
            // One side ran out : the other one is already sorted, splice it whole
            (rest, None) | (None, rest) => {
                *tail = rest;
                break;
            }
        };
        if is_le(&l.value, &r.value) {
            left = l.next.take();
            right = Some(r);
            tail = &mut tail.insert(l).next;
        } else {
            right = r.next.take();
            left = Some(l);
            tail = &mut tail.insert(r).next;
        }
    }

    head
}
