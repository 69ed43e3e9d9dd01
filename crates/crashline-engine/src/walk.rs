use crate::normalize::normalize;
use crashline_types::{Chain, ErrorLike, ExceptionRecord, Relationship, identity};
use std::collections::HashSet;

/// Hard cap on chain traversal depth, for pathological chains that manage to
/// avoid the cycle guard.
pub const MAX_CHAIN_DEPTH: usize = 200;

/// Walk the cause/context links of `leaf` into a linear, leaf-first chain.
///
/// At each step the explicit cause is preferred; otherwise the implicit
/// context is followed unless the current exception suppresses it. Traversal
/// stops on exhaustion, on revisiting an exception identity (the duplicate is
/// not appended), or at [`MAX_CHAIN_DEPTH`]. Runs in O(depth).
pub fn walk(leaf: &dyn ErrorLike) -> Chain {
    let mut records = Vec::new();
    let mut seen: HashSet<usize> = HashSet::new();
    let mut current = leaf;
    let mut relationship = Relationship::Root;

    loop {
        if !seen.insert(identity(current)) {
            break;
        }
        records.push(to_record(current, relationship));
        if records.len() >= MAX_CHAIN_DEPTH {
            break;
        }

        let next = if let Some(cause) = current.explicit_cause() {
            Some((cause, Relationship::CausedBy))
        } else if current.context_suppressed() {
            None
        } else {
            current
                .implicit_context()
                .map(|ctx| (ctx, Relationship::Context))
        };

        match next {
            Some((err, rel)) => {
                current = err;
                relationship = rel;
            }
            None => break,
        }
    }

    Chain { records }
}

fn to_record(err: &dyn ErrorLike, relationship: Relationship) -> ExceptionRecord {
    ExceptionRecord {
        type_name: err.type_name().to_string(),
        message: err.message(),
        frames: err.raw_frames().iter().map(normalize).collect(),
        relationship,
    }
}
