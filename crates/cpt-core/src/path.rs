//! Shared path-construction and containment primitives used by every
//! generator: BFS to and from a target edge, containment/occurrence
//! counting, the admissibility predicate, and coverage bookkeeping.
//!
//! The two BFS routines below follow the same shape as the reachability
//! search elsewhere in this crate's reference ecosystem: an explicit
//! `VecDeque` of owned path prefixes rather than a predecessor map, because
//! a prefix here must carry its own "edges already used" history to enforce
//! the no-repeated-edge rule during expansion (§4.4).
use std::collections::{HashSet, VecDeque};

use indexmap::IndexSet;

use crate::model::{Constraint, ConstraintKind, Graph, Sut, TestPath};
use crate::vertex::VertexId;

// ---------------------------------------------------------------------------
// Containment and occurrence primitives (§4.1)
// ---------------------------------------------------------------------------

/// Scans `path` once, tracking how many times `c.from` has been seen and how
/// many times a `c.to` has closed a pending `c.from`. Shared by
/// [`contains`], [`occurrences`], and [`repeats`], which differ only in how
/// they interpret the resulting counts.
///
/// The `to` check runs before the `from` update at each index, so a vertex
/// equal to both `c.from` and `c.to` (a self-pair constraint, `from == to`)
/// cannot close a match against itself in the same position — closing
/// requires a strictly later occurrence, matching the `i < j` requirement on
/// indices in [`contains`]'s definition.
fn scan(path: &[VertexId], c: &Constraint) -> (usize, usize) {
    let mut from_cnt = 0usize;
    let mut to_cnt = 0usize;
    for v in path {
        if *v == c.to && from_cnt > to_cnt {
            to_cnt += 1;
        }
        if *v == c.from {
            from_cnt += 1;
        }
    }
    (from_cnt, to_cnt)
}

/// True iff there exist indices `i < j` with `path[i] = c.from` and
/// `path[j] = c.to`.
///
/// Uses a single latch on `from`: once any `c.to` has closed a pending
/// `c.from`, later occurrences of `c.from` are irrelevant to the verdict.
/// This makes `contains` monotone rather than a substring matcher — see the
/// `latch_ignores_extra_from_occurrences` test below.
pub fn contains(path: &[VertexId], c: &Constraint) -> bool {
    let (from_cnt, to_cnt) = scan(path, c);
    from_cnt > 0 && to_cnt > 0
}

/// The count of matched ordered pairs under greedy left-to-right matching:
/// each `c.from` can open at most one pending match, closed by the next
/// `c.to`. Used only for multi-occurrence detection (see [`repeats`]).
pub fn occurrences(path: &[VertexId], c: &Constraint) -> usize {
    scan(path, c).1
}

/// True iff `c` is matched at least twice in `path` (both the `from` and
/// `to` counts exceed one).
pub fn repeats(path: &[VertexId], c: &Constraint) -> bool {
    let (from_cnt, to_cnt) = scan(path, c);
    from_cnt > 1 && to_cnt > 1
}

/// The number of consecutive index pairs `(path[i], path[i+1])` equal to
/// `(u, v)`.
pub fn edge_occurrences(path: &[VertexId], u: &VertexId, v: &VertexId) -> usize {
    path.windows(2).filter(|w| w[0] == *u && w[1] == *v).count()
}

// ---------------------------------------------------------------------------
// Admissibility (§4.2)
// ---------------------------------------------------------------------------

/// Returns `true` unless `path` violates a NEGATIVE constraint, repeats a
/// `ONCE`/`MAX_ONCE` constraint within itself, or re-uses an already-covered
/// `ONCE`/`MAX_ONCE` constraint.
pub fn admissible(path: &[VertexId], constraints: &[Constraint], covered: &HashSet<usize>) -> bool {
    for (i, c) in constraints.iter().enumerate() {
        match c.kind {
            ConstraintKind::Negative => {
                if contains(path, c) {
                    return false;
                }
            }
            ConstraintKind::Once | ConstraintKind::MaxOnce => {
                if repeats(path, c) {
                    return false;
                }
                if covered.contains(&i) && contains(path, c) {
                    return false;
                }
            }
            ConstraintKind::Positive => {}
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Coverage bookkeeping (§4.3)
// ---------------------------------------------------------------------------

/// Adds every consecutive edge of `path` to `covered`. Idempotent.
pub fn mark_edges(path: &[VertexId], covered: &mut IndexSet<(VertexId, VertexId)>) {
    for w in path.windows(2) {
        covered.insert((w[0].clone(), w[1].clone()));
    }
}

/// Adds the index of every constraint `path` satisfies (per [`contains`]) to
/// `covered`. Idempotent.
pub fn mark_constraints(path: &[VertexId], constraints: &[Constraint], covered: &mut HashSet<usize>) {
    for (i, c) in constraints.iter().enumerate() {
        if contains(path, c) {
            covered.insert(i);
        }
    }
}

// ---------------------------------------------------------------------------
// Path primitives (§4.4)
// ---------------------------------------------------------------------------

/// BFS over incoming edges from `target` back to `start`.
///
/// Returns `[start, …, target]`, a single-element `[target]` if
/// `target == start`, or `None` if `target` is not reachable from `start`.
///
/// Each queue entry is a full prefix (earliest-known-vertex first); an edge
/// is not traversed a second time within the same prefix, which prevents
/// simple cycles. Ties are broken by BFS discovery order, i.e. insertion
/// order of incoming edges at each step.
pub fn find_path_to_edge(graph: &Graph, start: &VertexId, target: &VertexId) -> Option<TestPath> {
    if target == start {
        return Some(vec![target.clone()]);
    }

    let mut queue: VecDeque<TestPath> = VecDeque::new();
    queue.push_back(vec![target.clone()]);

    while let Some(prefix) = queue.pop_front() {
        let Some(head) = prefix.first().cloned() else {
            continue;
        };
        for (pred, _) in graph.incoming_edges(&head) {
            if edge_occurrences(&prefix, &pred, &head) > 0 {
                continue;
            }
            let mut extended = Vec::with_capacity(prefix.len() + 1);
            extended.push(pred.clone());
            extended.extend(prefix.iter().cloned());

            if pred == *start {
                return Some(extended);
            }
            queue.push_back(extended);
        }
    }

    None
}

/// BFS over outgoing edges from `target` forward to some `v ∈ ends`.
///
/// Returns `[target, …, v]`, a single-element `[target]` if `target` is
/// itself an end vertex, or `None` if no end vertex is reachable.
pub fn find_path_from_edge(graph: &Graph, sut: &Sut, target: &VertexId) -> Option<TestPath> {
    if sut.is_end(target) {
        return Some(vec![target.clone()]);
    }

    let mut queue: VecDeque<TestPath> = VecDeque::new();
    queue.push_back(vec![target.clone()]);

    while let Some(prefix) = queue.pop_front() {
        let Some(tail) = prefix.last().cloned() else {
            continue;
        };
        for (_, succ) in graph.outgoing_edges(&tail) {
            if edge_occurrences(&prefix, &tail, &succ) > 0 {
                continue;
            }
            let mut extended = prefix.clone();
            extended.push(succ.clone());

            if sut.is_end(&succ) {
                return Some(extended);
            }
            queue.push_back(extended);
        }
    }

    None
}

/// Builds a start-to-end walk through `sut` that traverses the edge
/// `(from, to)`, by gluing together [`find_path_to_edge`] and
/// [`find_path_from_edge`] at that edge.
///
/// Returns `None` if either half is unreachable, or if the assembled walk
/// does not begin at `sut.start()` and end in `sut.ends()` (the second check
/// is defensive: a correctly-implemented pair of BFS halves always satisfies
/// it, but a caller must never emit a walk that fails it).
pub fn build_path_covering_edge(sut: &Sut, from: &VertexId, to: &VertexId) -> Option<TestPath> {
    let prefix = find_path_to_edge(sut.graph(), sut.start(), from)?;
    let suffix = find_path_from_edge(sut.graph(), sut, to)?;

    let mut walk = prefix;
    walk.extend(suffix);

    if walk.first() != Some(sut.start()) || !walk.last().is_some_and(|v| sut.is_end(v)) {
        return None;
    }

    Some(walk)
}
