//! Runs all three generators against a [`Sut`] and formats the results as
//! human text, JSON, or CSV rows (§6.2, §6.3).
use std::time::Instant;

use cpt_core::{compute_metrics, CpcGenerator, EdgeGenerator, FilterGenerator, Metrics, Sut, TestSet};
use serde_json::json;

/// One generator's output against one SUT, plus its wall-clock time.
pub struct AlgoReport {
    pub algorithm: &'static str,
    pub test_set: TestSet,
    pub metrics: Metrics,
    pub elapsed_ms: f64,
}

type Generator = fn(&Sut) -> TestSet;

/// Runs Edge, Filter, and CPC (in that order) against `sut`.
pub fn run_all(sut: &Sut) -> Vec<AlgoReport> {
    let generators: [(&str, Generator); 3] = [
        ("Edge", EdgeGenerator::generate),
        ("Filter", FilterGenerator::generate),
        ("CPC", CpcGenerator::generate),
    ];

    generators
        .into_iter()
        .map(|(algorithm, generate)| {
            let start = Instant::now();
            let test_set = generate(sut);
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            let metrics = compute_metrics(sut, &test_set);
            AlgoReport {
                algorithm,
                test_set,
                metrics,
                elapsed_ms,
            }
        })
        .collect()
}

/// Prints a human-readable report for `file`'s generator runs to stdout.
pub fn print_human(file: &str, reports: &[AlgoReport], show_path: bool) {
    println!("== {file} ==");
    for r in reports {
        let m = &r.metrics;
        println!(
            "  {:<6} valid={:<3} size={:<4} u_edges={:<4} avg_len={:<6.2} std_len={:<6.2} edge_cov={:<5.2} cov_pos={:<5.2} cov_once={:<5.2} cov_neg={:<5.2} (compliance={:<5.2}) cov_maxonce={:<5.2} time={:.2}ms",
            r.algorithm,
            m.valid,
            m.size,
            m.unique_edges,
            m.avg_len,
            m.std_len,
            m.edge_coverage,
            m.cov_positive,
            m.cov_once,
            m.cov_negative,
            m.cov_negative_compliance,
            m.cov_max_once,
            r.elapsed_ms
        );
        if show_path {
            for path in &r.test_set {
                let rendered: Vec<&str> = path.iter().map(cpt_core::VertexId::as_str).collect();
                println!("    {}", rendered.join(" -> "));
            }
        }
    }
}

/// Serializes one file's generator runs as a single JSON object.
pub fn to_json(file: &str, reports: &[AlgoReport], show_path: bool) -> serde_json::Value {
    let algos: Vec<serde_json::Value> = reports
        .iter()
        .map(|r| {
            let m = &r.metrics;
            let mut obj = json!({
                "algorithm": r.algorithm,
                "valid": m.valid,
                "size": m.size,
                "total_edges": m.total_edges,
                "unique_edges": m.unique_edges,
                "avg_len": m.avg_len,
                "std_len": m.std_len,
                "edge_efficiency": m.edge_efficiency,
                "edge_coverage": m.edge_coverage,
                "cov_positive": m.cov_positive,
                "cov_once": m.cov_once,
                "cov_negative": m.cov_negative,
                "cov_negative_compliance": m.cov_negative_compliance,
                "cov_max_once": m.cov_max_once,
                "elapsed_ms": r.elapsed_ms,
            });
            if show_path {
                let paths: Vec<Vec<&str>> = r
                    .test_set
                    .iter()
                    .map(|p| p.iter().map(cpt_core::VertexId::as_str).collect())
                    .collect();
                obj["paths"] = json!(paths);
            }
            obj
        })
        .collect();

    json!({ "file": file, "algorithms": algos })
}

/// One CSV row per algorithm, matching the §6.3 schema.
pub fn csv_rows(file: &str, reports: &[AlgoReport]) -> Vec<csv::StringRecord> {
    reports
        .iter()
        .map(|r| {
            let m = &r.metrics;
            csv::StringRecord::from(vec![
                file.to_owned(),
                r.algorithm.to_owned(),
                m.valid.to_string(),
                m.size.to_string(),
                m.total_edges.to_string(),
                m.unique_edges.to_string(),
                format!("{:.4}", m.avg_len),
                format!("{:.4}", m.std_len),
                format!("{:.4}", m.edge_efficiency),
                format!("{:.4}", m.cov_positive),
                format!("{:.4}", m.cov_once),
                format!("{:.4}", m.cov_negative),
                format!("{:.4}", m.cov_max_once),
                format!("{:.4}", m.edge_coverage),
                format!("{:.3}", r.elapsed_ms),
            ])
        })
        .collect()
}

/// The CSV header row, matching [`csv_rows`]'s column order.
pub const CSV_HEADER: &[&str] = &[
    "file",
    "algorithm",
    "valid(T)",
    "size",
    "lT",
    "u_edges(T)",
    "avg(|t|)",
    "s(T)",
    "eff_edges(T)",
    "cov_cp_positive(T)",
    "cov_cp_once(T)",
    "cov_cp_negative(T)",
    "cov_cp_only-once(T)",
    "cov_edges(T)",
    "time[ms]",
];
