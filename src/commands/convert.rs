//! The conversion pipeline: load, link, resolve, emit.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::config::{self, Dialect, Source};
use crate::diagnostics::Warning;
use crate::emit::{self, Emitted};
use crate::error::ConvertError;
use crate::hierarchy;
use crate::logging::Logger;
use crate::model::Accumulator;

/// Outcome of writing one command stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Players, groups and lines written.
    pub emitted: Emitted,
    /// Every warning in the order it was raised: loading, hierarchy, emission.
    pub warnings: Vec<Warning>,
}

/// Load every source in order into a fresh accumulator.
///
/// # Errors
///
/// Returns an error naming the first source that fails to load.
pub fn load_all(sources: &[Source], dialect: Dialect, log: &Logger) -> Result<Accumulator> {
    let mut acc = Accumulator::new();
    for source in sources {
        log.debug(&format!("reading {source} as {dialect}"));
        config::load_source(source, dialect, &mut acc)
            .map_err(ConvertError::from)
            .with_context(|| format!("loading {source}"))?;
    }
    Ok(acc)
}

/// Resolve the hierarchy of `acc` and write the command stream to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_commands<W: Write>(acc: &Accumulator, out: W) -> io::Result<Report> {
    let resolution = hierarchy::resolve(&acc.groups);
    let mut emitted = emit::emit(&acc.players, &acc.groups, &resolution.order, out)?;

    let mut warnings = acc.warnings.clone();
    warnings.extend(resolution.warnings);
    warnings.append(&mut emitted.warnings);

    Ok(Report { emitted, warnings })
}

fn write_file(path: &Path, acc: &Accumulator) -> Result<Report, ConvertError> {
    let output_err = |source| ConvertError::Output {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(output_err)?;
    write_commands(acc, BufWriter::new(file)).map_err(output_err)
}

/// Run a full conversion as described by `args`.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded or the output cannot be
/// written. Conversion warnings are logged, never fatal.
pub fn run(args: &Cli, log: &Logger) -> Result<()> {
    let sources = Source::from_args(&args.inputs);

    log.stage("Loading configuration");
    let acc = load_all(&sources, args.dialect, log)?;
    log.info(&format!(
        "loaded {} groups, {} players from {} source(s)",
        acc.groups.len(),
        acc.players.len(),
        sources.len()
    ));

    log.stage("Writing commands");
    let report = write_file(&args.output, &acc)?;
    for warning in &report.warnings {
        log.warning(warning);
    }

    log.info(&format!(
        "wrote {} lines ({} players, {} groups) to {}",
        report.emitted.lines,
        report.emitted.players,
        report.emitted.groups,
        args.output.display()
    ));
    let count = log.warning_count();
    if count > 0 {
        log.warn(&format!("{count} warning(s); review them before running the commands"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::diagnostics::WarningKind;

    fn convert(text: &str) -> (String, Report) {
        let mut acc = Accumulator::new();
        config::load_document("test.yml", text, Dialect::PermissionsEx, &mut acc).unwrap();
        let mut buf = Vec::new();
        let report = write_commands(&acc, &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), report)
    }

    #[test]
    fn warnings_are_collected_in_stage_order() {
        let (_, report) = convert(concat!(
            "groups:\n  A: {}\n  B: {}\n",
            "  D:\n    inheritance: [A, B]\n    permissions: [group.d]\n",
            "users:\n  u:\n    group: [Nope]\n",
        ));
        let kinds: Vec<WarningKind> = report.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            [
                WarningKind::MissingGroup,
                WarningKind::MultipleParents,
                WarningKind::ReservedPermission
            ]
        );
    }

    #[test]
    fn only_first_parent_is_set() {
        let (out, _) = convert("groups:\n  A: {}\n  B: {}\n  D:\n    inheritance: [A, B]\n");
        assert!(out.contains("permissions group D setparent A\n"));
        assert!(!out.contains("setparent B"));
    }

    #[test]
    fn load_all_reports_failing_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Source::File(dir.path().join("nope.yml"));
        let err = load_all(&[missing], Dialect::PermissionsEx, &Logger::new()).unwrap_err();
        assert!(format!("{err:#}").contains("nope.yml"));
    }

    #[test]
    fn write_file_creates_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut acc = Accumulator::new();
        config::load_document("t", "groups:\n  A: {}\n", Dialect::PermissionsEx, &mut acc).unwrap();
        let report = write_file(&path, &acc).unwrap();
        assert_eq!(report.emitted.groups, 1);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Group A\npermissions group A create\n"
        );
    }

    #[test]
    fn write_file_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.txt");
        let err = write_file(&path, &Accumulator::new()).unwrap_err();
        assert!(matches!(err, ConvertError::Output { .. }));
    }
}
