//! Graphviz DOT export (`-todot`) and PNG rendering (`-topng`).
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::Command;

use cpt_core::Sut;

/// Writes `sut`'s graph as a Graphviz DOT digraph to `path`.
///
/// Start and end vertices are styled distinctly so a rendered graph is
/// readable at a glance; every other vertex and edge uses Graphviz defaults.
pub fn write_dot(sut: &Sut, path: &Path) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut f = BufWriter::new(file);

    f.write_all(b"digraph sut {\n")?;
    f.write_all(b"  rankdir=LR;\n")?;

    for v in sut.graph().vertices() {
        if v == sut.start() {
            writeln!(f, "  \"{v}\" [shape=doublecircle, style=filled, fillcolor=lightgreen];")?;
        } else if sut.is_end(v) {
            writeln!(f, "  \"{v}\" [shape=doublecircle, style=filled, fillcolor=lightpink];")?;
        } else {
            writeln!(f, "  \"{v}\" [shape=circle];")?;
        }
    }

    for (from, to) in sut.graph().edges() {
        writeln!(f, "  \"{from}\" -> \"{to}\";")?;
    }

    f.write_all(b"}\n")?;
    f.flush()
}

/// Renders `dot_path` to `png_path` by shelling out to a local `dot` binary.
///
/// Rendering is a convenience, not part of the core contract: a missing or
/// failing `dot` binary is logged via [`log::warn!`] and does not fail the
/// caller.
pub fn render_png(dot_path: &Path, png_path: &Path) {
    let result = Command::new("dot")
        .arg("-Tpng")
        .arg(dot_path)
        .arg("-o")
        .arg(png_path)
        .output();

    match result {
        Ok(output) if output.status.success() => {
            log::info!("rendered {}", png_path.display());
        }
        Ok(output) => {
            log::warn!(
                "dot exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Err(e) => {
            log::warn!("could not run 'dot' to render {}: {e}", png_path.display());
        }
    }
}
