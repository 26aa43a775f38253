//! Parses the line-oriented SUT text format (§6.1) into a [`cpt_core::Sut`].
//!
//! Two-stage, mirroring the reference CLI's `io.rs` split: [`load_sut`]
//! reads the file (mapped to [`CptError::FileLoad`]), then hands the text to
//! [`parse_sut`], which runs the grammar and post-parse validation (mapped to
//! [`CptError::ParseFormat`]).
use std::path::Path;

use cpt_core::{Constraint, ConstraintKind, Sut, SutBuildError, SutBuilder, VertexId};

use crate::error::CptError;

/// Reads and parses the SUT file at `path`.
pub fn load_sut(path: &Path) -> Result<Sut, CptError> {
    let text = std::fs::read_to_string(path).map_err(|e| CptError::FileLoad {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let sut = parse_sut(&text, path)?;
    log::debug!(
        "{}: loaded {} vertices, {} edges, {} constraints",
        path.display(),
        sut.graph().vertex_count(),
        sut.graph().edge_count(),
        sut.constraints().len()
    );
    Ok(sut)
}

fn parse_err(file: &Path, line: Option<usize>, message: impl Into<String>) -> CptError {
    CptError::ParseFormat {
        file: file.to_path_buf(),
        line,
        message: message.into(),
    }
}

fn parse_sut(text: &str, file: &Path) -> Result<Sut, CptError> {
    let mut builder = SutBuilder::new();
    let mut start: Option<VertexId> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("Constraint[") {
            let inner = rest
                .strip_suffix(']')
                .ok_or_else(|| parse_err(file, Some(line_no), "constraint line missing closing ']'"))?;
            let parts: Vec<&str> = inner.split('-').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(parse_err(
                    file,
                    Some(line_no),
                    format!("expected 3 '-'-separated tokens in constraint, found {}", parts.len()),
                ));
            }
            if parts[0].is_empty() || parts[1].is_empty() {
                return Err(parse_err(file, Some(line_no), "constraint endpoints must not be empty"));
            }
            let kind = match parts[2] {
                "POSITIVE" => ConstraintKind::Positive,
                "ONCE" => ConstraintKind::Once,
                "NEGATIVE" => ConstraintKind::Negative,
                "MAX_ONCE" => ConstraintKind::MaxOnce,
                other => return Err(parse_err(file, Some(line_no), format!("unknown constraint type '{other}'"))),
            };
            builder.add_constraint(Constraint::new(
                VertexId::new(parts[0].to_owned()),
                VertexId::new(parts[1].to_owned()),
                kind,
            ));
            continue;
        }

        let Some((vertex_tok, rest)) = line.split_once(':') else {
            return Err(parse_err(
                file,
                Some(line_no),
                "expected ':' separating vertex from successor list",
            ));
        };
        let vertex_name = vertex_tok.trim();
        if vertex_name.is_empty() {
            return Err(parse_err(file, Some(line_no), "empty vertex name"));
        }

        let rest = rest.trim();
        let inner = rest
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| parse_err(file, Some(line_no), "successor list must be enclosed in '[' ']'"))?;

        let vertex = VertexId::new(vertex_name.to_owned());
        builder.add_vertex(&vertex);

        if vertex_name.eq_ignore_ascii_case("start") {
            start = Some(vertex.clone());
        }

        if inner.trim().is_empty() {
            builder.add_end(vertex.clone());
            continue;
        }

        for succ_tok in inner.split(',') {
            let succ_name = succ_tok.trim();
            if succ_name.is_empty() {
                return Err(parse_err(file, Some(line_no), "empty successor token"));
            }
            let succ = VertexId::new(succ_name.to_owned());
            builder.add_edge(&vertex, &succ);
            if succ_name.starts_with("END") || succ_name.starts_with("end") {
                builder.add_end(succ);
            }
        }
    }

    let start = start.ok_or_else(|| parse_err(file, None, "no START vertex designated"))?;
    builder.set_start(start);

    builder.build().map_err(|e| match e {
        SutBuildError::MissingStart => parse_err(file, None, "no START vertex designated"),
        SutBuildError::EmptyEnds => parse_err(file, None, "end vertex set is empty"),
        SutBuildError::UnknownConstraintVertex { constraint_index, vertex } => parse_err(
            file,
            None,
            format!("constraint #{constraint_index} references unknown vertex '{vertex}'"),
        ),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        f.write_all(contents.as_bytes()).expect("write temp file");
        f
    }

    #[test]
    fn parses_a_minimal_chain() {
        let f = write_temp("START:[A]\nA:[]\n");
        let sut = load_sut(f.path()).expect("should parse");
        assert_eq!(sut.graph().vertex_count(), 2);
        assert_eq!(sut.graph().edge_count(), 1);
        assert!(sut.is_end(&VertexId::new("A")));
    }

    #[test]
    fn end_prefixed_successor_is_added_to_end_set() {
        let f = write_temp("START:[END1]\n");
        let sut = load_sut(f.path()).expect("should parse");
        assert!(sut.is_end(&VertexId::new("END1")));
    }

    #[test]
    fn parses_constraints() {
        let f = write_temp("START:[A]\nA:[]\nConstraint[START - A - POSITIVE]\n");
        let sut = load_sut(f.path()).expect("should parse");
        assert_eq!(sut.constraints().len(), 1);
        assert_eq!(sut.constraints()[0].kind, ConstraintKind::Positive);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let f = write_temp("# a comment\n\nSTART:[A]\nA:[]\n");
        assert!(load_sut(f.path()).is_ok());
    }

    #[test]
    fn missing_colon_is_a_parse_error_with_line_number() {
        let f = write_temp("START:[A]\nA[]\n");
        let err = load_sut(f.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let CptError::ParseFormat { line, .. } = err else {
            unreachable!("load_sut only ever returns ParseFormat after the file opens")
        };
        assert_eq!(line, Some(2));
    }

    #[test]
    fn unknown_constraint_type_is_rejected() {
        let f = write_temp("START:[A]\nA:[]\nConstraint[START - A - BOGUS]\n");
        let err = load_sut(f.path()).unwrap_err();
        assert!(err.message().contains("BOGUS"), "message: {}", err.message());
    }

    #[test]
    fn empty_successor_token_is_rejected() {
        let f = write_temp("START:[A,,B]\nA:[]\nB:[]\n");
        assert!(load_sut(f.path()).is_err());
    }

    #[test]
    fn missing_start_is_rejected() {
        let f = write_temp("A:[B]\nB:[]\n");
        let err = load_sut(f.path()).unwrap_err();
        assert!(err.message().contains("START"), "message: {}", err.message());
    }

    #[test]
    fn constraint_on_unknown_vertex_is_rejected() {
        let f = write_temp("START:[A]\nA:[]\nConstraint[GHOST - A - POSITIVE]\n");
        let err = load_sut(f.path()).unwrap_err();
        assert!(err.message().contains("GHOST"), "message: {}", err.message());
    }

    #[test]
    fn missing_file_is_a_file_load_error() {
        let err = load_sut(Path::new("/nonexistent/path/sut.txt")).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
