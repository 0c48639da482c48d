//! Invocation of the Graphviz `dot` renderer.

use std::{path::Path, process::Command};

use log::{debug, info};

use protomap::ProtomapError;

/// Render `dot_file` into every requested format next to it.
///
/// Runs `dot -O <dot_file> -T<format>...`; Graphviz names each output after
/// the input file with the format appended.
///
/// # Errors
///
/// Returns [`ProtomapError::Render`] if `dot` cannot be started or fails.
pub fn render_formats(
    dot: &str,
    dot_file: &Path,
    formats: &[String],
) -> Result<(), ProtomapError> {
    if formats.is_empty() {
        return Ok(());
    }

    let mut command = Command::new(dot);
    command.arg("-O").arg(dot_file);
    command.args(formats.iter().map(|format| format!("-T{format}")));

    debug!(command:?; "Executing graphviz");
    let output = command
        .output()
        .map_err(|err| ProtomapError::Render(format!("failed to start `{dot}`: {err}")))?;

    if !output.status.success() {
        return Err(ProtomapError::Render(format!(
            "`{dot}` failed on {} ({}): {}",
            dot_file.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    info!(file = dot_file.display().to_string(), formats:?; "Rendered graph images");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_formats_runs_nothing() {
        let result = render_formats("protomap-no-such-dot", Path::new("a.dot"), &[]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_renderer_is_reported() {
        let result = render_formats(
            "protomap-no-such-dot",
            Path::new("a.dot"),
            &["png".to_string()],
        );
        assert!(matches!(result, Err(ProtomapError::Render(_))));
    }
}
