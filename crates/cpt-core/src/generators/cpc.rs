//! The CPC generator (GC), §4.7.
//!
//! Two phases. Phase 1 seeks one admissible path per POSITIVE/ONCE
//! constraint not yet covered, via an iterative-deepening BFS that allows an
//! edge to be retraced up to `limit` times (`limit` growing from 1 to
//! [`VISIT_LIMIT`]) so constraints that require revisiting a vertex are still
//! reachable. Phase 2 then tops up edge coverage the way the Edge generator
//! does, but rejects any candidate that is no longer admissible.
use std::collections::{HashSet, VecDeque};

use indexmap::IndexSet;

use crate::model::{Constraint, ConstraintKind, Sut, TestPath, TestSet};
use crate::path::{admissible, build_path_covering_edge, contains, edge_occurrences, mark_constraints, mark_edges};
use crate::vertex::VertexId;

/// The maximum number of times phase 1 will retrace a single edge within one
/// candidate path before giving up on a constraint.
const VISIT_LIMIT: usize = 2;

/// The CPC generator (GC).
pub struct CpcGenerator;

impl CpcGenerator {
    /// Runs both phases and returns the accepted test set.
    pub fn generate(sut: &Sut) -> TestSet {
        let mut accepted: TestSet = TestSet::new();
        let mut covered_edges: IndexSet<(VertexId, VertexId)> = IndexSet::new();
        let mut covered_constraints: HashSet<usize> = HashSet::new();

        for (i, c) in sut.constraints().iter().enumerate() {
            if !matches!(c.kind, ConstraintKind::Positive | ConstraintKind::Once) {
                continue;
            }
            if covered_constraints.contains(&i) {
                continue;
            }
            if let Some(path) = find_admissible_path(sut, c, &covered_constraints) {
                mark_edges(&path, &mut covered_edges);
                mark_constraints(&path, sut.constraints(), &mut covered_constraints);
                accepted.push(path);
            }
        }

        let all_edges: Vec<(VertexId, VertexId)> =
            sut.graph().edges().map(|(a, b)| (a.clone(), b.clone())).collect();

        for (from, to) in all_edges {
            if covered_edges.contains(&(from.clone(), to.clone())) {
                continue;
            }
            let Some(path) = build_path_covering_edge(sut, &from, &to) else {
                continue;
            };
            if !admissible(&path, sut.constraints(), &covered_constraints) {
                continue;
            }
            mark_edges(&path, &mut covered_edges);
            mark_constraints(&path, sut.constraints(), &mut covered_constraints);
            accepted.push(path);
        }

        accepted
    }
}

/// Iterative-deepening BFS for a single admissible path containing `c`.
///
/// At each `limit` from 1 to [`VISIT_LIMIT`], explores every start-to-end
/// walk that retraces no edge more than `limit` times, in BFS order, and
/// returns the first one found that both contains `c` and is admissible
/// against `covered`. A walk that reaches an end vertex without containing
/// `c` is a dead end and is not extended further.
fn find_admissible_path(sut: &Sut, c: &Constraint, covered: &HashSet<usize>) -> Option<TestPath> {
    for limit in 1..=VISIT_LIMIT {
        let mut queue: VecDeque<TestPath> = VecDeque::new();
        for (from, to) in sut.graph().outgoing_edges(sut.start()) {
            queue.push_back(vec![from, to]);
        }

        while let Some(prefix) = queue.pop_front() {
            let Some(last) = prefix.last().cloned() else {
                continue;
            };

            if sut.is_end(&last) {
                if contains(&prefix, c) {
                    return Some(prefix);
                }
                continue;
            }

            for (_, succ) in sut.graph().outgoing_edges(&last) {
                if edge_occurrences(&prefix, &last, &succ) >= limit {
                    continue;
                }
                let mut extended = prefix.clone();
                extended.push(succ);

                if admissible(&extended, sut.constraints(), covered) {
                    queue.push_back(extended);
                }
            }
        }
    }

    None
}
