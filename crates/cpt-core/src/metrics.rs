//! Metrics over a `(Sut, TestSet)` pair, §4.8.
//!
//! Every metric is a pure function of the SUT and the test set; none of them
//! mutate either. `valid`'s per-constraint counts use the documented
//! canonical interpretation (§9 Open Question 3): `Σ_p [contains(p, c)]`, a
//! 0/1 indicator per path rather than `occurrences(p, c)`.
use std::collections::HashSet;

use crate::model::{ConstraintKind, Sut, TestSet};
use crate::path::contains;
use crate::vertex::VertexId;

/// The full metrics report for one `(Sut, TestSet)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// `1` if every constraint is satisfied; otherwise the negated count of
    /// unsatisfied constraints.
    pub valid: i64,
    pub size: usize,
    pub total_edges: usize,
    pub unique_edges: usize,
    pub avg_len: f64,
    /// Sample standard deviation of path edge-lengths (`n-1` denominator);
    /// `-1.0` if fewer than two paths.
    pub std_len: f64,
    pub edge_efficiency: f64,
    pub edge_coverage: f64,
    /// `-1.0` if the SUT has no POSITIVE constraints.
    pub cov_positive: f64,
    /// `-1.0` if the SUT has no ONCE constraints.
    pub cov_once: f64,
    /// The violation rate: fraction of NEGATIVE constraints with at least
    /// one containing path. `-1.0` if the SUT has no NEGATIVE constraints.
    pub cov_negative: f64,
    /// `1.0 - cov_negative`, for human-facing reporting (§9 Open Question
    /// 2). `-1.0` if `cov_negative` is undefined.
    pub cov_negative_compliance: f64,
    /// `-1.0` if the SUT has no `MAX_ONCE` constraints.
    pub cov_max_once: f64,
}

/// Computes every metric in [`Metrics`] for `test_set` against `sut`.
pub fn compute(sut: &Sut, test_set: &TestSet) -> Metrics {
    let size = test_set.len();
    let lengths: Vec<usize> = test_set.iter().map(|p| p.len().saturating_sub(1)).collect();
    let total_edges: usize = lengths.iter().sum();

    let unique_edge_set: HashSet<(VertexId, VertexId)> = test_set
        .iter()
        .flat_map(|p| p.windows(2).map(|w| (w[0].clone(), w[1].clone())))
        .collect();
    let unique_edges = unique_edge_set.len();

    let avg_len = if size == 0 { 0.0 } else { total_edges as f64 / size as f64 };
    let std_len = sample_stddev(&lengths);

    let edge_efficiency = if total_edges == 0 {
        0.0
    } else {
        unique_edges as f64 / total_edges as f64
    };
    let edge_coverage = if sut.graph().edge_count() == 0 {
        0.0
    } else {
        unique_edges as f64 / sut.graph().edge_count() as f64
    };

    let satisfied_count = |kind: ConstraintKind, pred: fn(usize) -> bool| -> Option<f64> {
        let constraints: Vec<_> = sut.constraints().iter().filter(|c| c.kind == kind).collect();
        if constraints.is_empty() {
            return None;
        }
        let satisfied = constraints
            .iter()
            .filter(|c| pred(test_set.iter().filter(|p| contains(p, c)).count()))
            .count();
        Some(satisfied as f64 / constraints.len() as f64)
    };

    let cov_positive = satisfied_count(ConstraintKind::Positive, |n| n >= 1).unwrap_or(-1.0);
    let cov_once = satisfied_count(ConstraintKind::Once, |n| n == 1).unwrap_or(-1.0);
    let cov_negative = satisfied_count(ConstraintKind::Negative, |n| n >= 1).unwrap_or(-1.0);
    let cov_negative_compliance = if cov_negative < 0.0 { -1.0 } else { 1.0 - cov_negative };
    let cov_max_once = satisfied_count(ConstraintKind::MaxOnce, |n| n <= 1).unwrap_or(-1.0);

    let unsatisfied = sut
        .constraints()
        .iter()
        .filter(|c| {
            let n = test_set.iter().filter(|p| contains(p, c)).count();
            !match c.kind {
                ConstraintKind::Positive => n >= 1,
                ConstraintKind::Once => n == 1,
                ConstraintKind::Negative => n == 0,
                ConstraintKind::MaxOnce => n <= 1,
            }
        })
        .count();
    let valid = if unsatisfied == 0 { 1 } else { -(unsatisfied as i64) };

    Metrics {
        valid,
        size,
        total_edges,
        unique_edges,
        avg_len,
        std_len,
        edge_efficiency,
        edge_coverage,
        cov_positive,
        cov_once,
        cov_negative,
        cov_negative_compliance,
        cov_max_once,
    }
}

fn sample_stddev(lengths: &[usize]) -> f64 {
    if lengths.len() < 2 {
        return -1.0;
    }
    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<usize>() as f64 / n;
    let variance = lengths.iter().map(|&l| {
        let d = l as f64 - mean;
        d * d
    }).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::model::{Constraint, SutBuilder};

    fn v(s: &str) -> VertexId {
        VertexId::new(s)
    }

    fn chain_sut() -> Sut {
        let mut b = SutBuilder::new();
        b.add_edge(&v("START"), &v("A"));
        b.add_edge(&v("A"), &v("END1"));
        b.set_start(v("START"));
        b.add_end(v("END1"));
        b.build().expect("builds")
    }

    #[test]
    fn empty_test_set_yields_zeroed_metrics() {
        let sut = chain_sut();
        let m = compute(&sut, &TestSet::new());
        assert_eq!(m.size, 0);
        assert_eq!(m.total_edges, 0);
        assert_eq!(m.avg_len, 0.0);
        assert_eq!(m.std_len, -1.0);
        assert_eq!(m.edge_efficiency, 0.0);
        assert_eq!(m.edge_coverage, 0.0);
        assert_eq!(m.valid, 1);
    }

    #[test]
    fn single_path_covering_both_edges_is_fully_covered() {
        let sut = chain_sut();
        let ts = vec![vec![v("START"), v("A"), v("END1")]];
        let m = compute(&sut, &ts);
        assert_eq!(m.size, 1);
        assert_eq!(m.total_edges, 2);
        assert_eq!(m.unique_edges, 2);
        assert_eq!(m.avg_len, 2.0);
        assert_eq!(m.std_len, -1.0);
        assert_eq!(m.edge_efficiency, 1.0);
        assert_eq!(m.edge_coverage, 1.0);
    }

    #[test]
    fn cov_positive_is_undefined_without_positive_constraints() {
        let sut = chain_sut();
        let m = compute(&sut, &vec![vec![v("START"), v("A"), v("END1")]]);
        assert_eq!(m.cov_positive, -1.0);
    }

    #[test]
    fn cov_negative_reports_violation_rate_with_compliance_companion() {
        let mut b = SutBuilder::new();
        b.add_edge(&v("START"), &v("A"));
        b.add_edge(&v("A"), &v("END1"));
        b.set_start(v("START"));
        b.add_end(v("END1"));
        b.add_constraint(Constraint::new(v("START"), v("A"), ConstraintKind::Negative));
        let sut = b.build().expect("builds");

        let ts = vec![vec![v("START"), v("A"), v("END1")]];
        let m = compute(&sut, &ts);
        assert_eq!(m.cov_negative, 1.0);
        assert_eq!(m.cov_negative_compliance, 0.0);
        assert_eq!(m.valid, -1);
    }

    #[test]
    fn std_len_uses_sample_denominator() {
        let sut = chain_sut();
        let ts = vec![
            vec![v("START"), v("A")],
            vec![v("START"), v("A"), v("END1")],
        ];
        let m = compute(&sut, &ts);
        // lengths = [1, 2]; mean = 1.5; variance = ((0.5)^2 + (0.5)^2) / 1 = 0.5
        assert!((m.std_len - 0.5f64.sqrt()).abs() < 1e-9);
    }
}
