//! The Filter generator (GF), §4.6.
//!
//! Runs the Edge generator, then discards paths that are inadmissible under
//! the constraints accumulated so far.
use std::collections::HashSet;

use crate::generators::edge::EdgeGenerator;
use crate::model::{Sut, TestSet};
use crate::path::{admissible, mark_constraints};

/// The Filter generator (GF).
pub struct FilterGenerator;

impl FilterGenerator {
    /// Runs GE, then keeps only admissible paths in GE's original order,
    /// updating constraint coverage as each is accepted.
    pub fn generate(sut: &Sut) -> TestSet {
        let edge_paths = EdgeGenerator::generate(sut);
        let mut covered = HashSet::new();
        let mut accepted = TestSet::new();

        for path in edge_paths {
            if admissible(&path, sut.constraints(), &covered) {
                mark_constraints(&path, sut.constraints(), &mut covered);
                accepted.push(path);
            }
        }

        accepted
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::model::{Constraint, ConstraintKind, SutBuilder};
    use crate::vertex::VertexId;

    fn v(s: &str) -> VertexId {
        VertexId::new(s)
    }

    #[test]
    fn negative_constraint_on_the_only_path_empties_the_set() {
        // Scenario C.
        let mut b = SutBuilder::new();
        b.add_edge(&v("START"), &v("A"));
        b.add_edge(&v("A"), &v("END1"));
        b.set_start(v("START"));
        b.add_end(v("END1"));
        b.add_constraint(Constraint::new(
            v("START"),
            v("A"),
            ConstraintKind::Negative,
        ));
        let sut = b.build().expect("builds");

        assert!(FilterGenerator::generate(&sut).is_empty());
    }

    #[test]
    fn filter_never_introduces_edges_edge_didnt_have() {
        let mut b = SutBuilder::new();
        b.add_edge(&v("START"), &v("A"));
        b.add_edge(&v("A"), &v("END1"));
        b.add_edge(&v("START"), &v("B"));
        b.add_edge(&v("B"), &v("END1"));
        b.set_start(v("START"));
        b.add_end(v("END1"));
        let sut = b.build().expect("builds");

        let edge_paths = EdgeGenerator::generate(&sut);
        let filter_paths = FilterGenerator::generate(&sut);

        let edge_edges: std::collections::HashSet<_> = edge_paths
            .iter()
            .flat_map(|p| p.windows(2).map(|w| (w[0].clone(), w[1].clone())))
            .collect();
        let filter_edges: std::collections::HashSet<_> = filter_paths
            .iter()
            .flat_map(|p| p.windows(2).map(|w| (w[0].clone(), w[1].clone())))
            .collect();

        assert!(filter_edges.is_subset(&edge_edges));
    }

    #[test]
    fn positive_constraint_off_the_natural_path_may_still_fail() {
        // Scenario B: Filter inherits Edge's output and has no mechanism to
        // actively seek out a path satisfying POSITIVE; it may simply not
        // contain one.
        let mut b = SutBuilder::new();
        b.add_edge(&v("START"), &v("A"));
        b.add_edge(&v("A"), &v("END1"));
        b.add_edge(&v("START"), &v("B"));
        b.add_edge(&v("B"), &v("END1"));
        b.set_start(v("START"));
        b.add_end(v("END1"));
        b.add_constraint(Constraint::new(
            v("START"),
            v("B"),
            ConstraintKind::Positive,
        ));
        let sut = b.build().expect("builds");

        let paths = FilterGenerator::generate(&sut);
        // Edge generator happens to cover both START->A and START->B via two
        // distinct single-edge-covering paths, so B is present here; this
        // pins the behavior for this graph shape rather than asserting a
        // property that would hold for every graph shape.
        assert!(paths.iter().any(|p| p.contains(&v("B"))));
    }
}
