//! Robot assembly exporter front end
//!
//! Loads an assembly from URDF or a snapshot file, runs the small part
//! filter with the effective configuration, and writes the filtered result.

pub mod args;
pub mod config;

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, bail};
use rk_core::urdf::{UrdfOptions, assembly_from_urdf, prune_robot, read_urdf, write_urdf};
use rk_core::{
    Assembly, FilterConfig, FilterReport, SnapshotFormat, apply_filter, load_snapshot,
    promote_grounded_link, snapshot_to_string,
};

use crate::args::Args;
use crate::config::ConfigManager;

/// Input kinds understood by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Urdf,
    Snapshot(SnapshotFormat),
}

impl InputKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let is_urdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("urdf"));
        if is_urdf {
            Some(InputKind::Urdf)
        } else {
            SnapshotFormat::from_path(path).map(InputKind::Snapshot)
        }
    }
}

/// Merge command line overrides into the configured filter settings
///
/// Giving a threshold turns the filter on unless `--disable` is also given.
pub fn effective_filter_config(base: &FilterConfig, args: &Args) -> FilterConfig {
    let mut config = base.clone();
    if let Some(value) = args.threshold {
        config.threshold_value = value;
        config.enabled = true;
    }
    if let Some(unit) = args.unit {
        config.threshold_unit = unit;
    }
    if let Some(enabled) = args.enabled() {
        config.enabled = enabled;
    }
    config
}

/// Run one export: load, filter, write
pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut manager = ConfigManager::load(args.config.as_deref()).with_context(|| {
        format!(
            "failed to load config {}",
            args.config
                .as_deref()
                .unwrap_or(&ConfigManager::default_config_path())
                .display()
        )
    })?;

    let filter_config = effective_filter_config(&manager.config().filter, args);
    filter_config
        .validate()
        .context("invalid small part filter settings")?;

    if args.save_config {
        manager.config_mut().filter = filter_config.clone();
        manager
            .save()
            .with_context(|| format!("failed to save {}", manager.config_file_path().display()))?;
    }

    let Some(kind) = InputKind::from_path(&args.input) else {
        bail!(
            "unsupported input {} (expected .urdf, .ron or .json)",
            args.input.display()
        );
    };

    let output = match kind {
        InputKind::Urdf => export_urdf(args, &filter_config)?,
        InputKind::Snapshot(format) => export_snapshot(args, &filter_config, format)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn export_urdf(args: &Args, filter_config: &FilterConfig) -> anyhow::Result<String> {
    let robot = read_urdf(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let options = UrdfOptions {
        use_collision: args.collision,
        ..UrdfOptions::for_file(&args.input)
    };
    let assembly = assembly_from_urdf(&robot, &options);
    let report = apply_filter(filter_config, &assembly)?;
    if args.report {
        print_report(&assembly, &report);
    }

    let kept: HashSet<&str> = report.kept().into_iter().map(|l| l.name.as_str()).collect();
    let pruned = prune_robot(&robot, &kept);
    Ok(write_urdf(&pruned)?)
}

fn export_snapshot(
    args: &Args,
    filter_config: &FilterConfig,
    format: SnapshotFormat,
) -> anyhow::Result<String> {
    let assembly = load_snapshot(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let report = apply_filter(filter_config, &assembly)?;
    if args.report {
        print_report(&assembly, &report);
    }

    let filtered = filtered_assembly(&assembly, &report);
    Ok(snapshot_to_string(&filtered, format)?)
}

/// Assembly of the kept links, grounded link first
pub fn filtered_assembly(assembly: &Assembly, report: &FilterReport<'_>) -> Assembly {
    let mut kept = report.kept();
    promote_grounded_link(&mut kept);

    let mut filtered = assembly.retain_links(&report.kept_ids());
    filtered.links = kept.into_iter().cloned().collect();
    filtered
}

fn print_report(assembly: &Assembly, report: &FilterReport<'_>) {
    let counts = assembly.joint_counts();
    for entry in &report.entries {
        eprintln!(
            "{:<32} joints={:<3} {}",
            entry.link.name,
            counts.get(&entry.link.id).copied().unwrap_or(0),
            entry.decision
        );
    }
    for joint in &assembly.joints {
        eprintln!(
            "joint {:<26} {} -> {}",
            joint.name,
            assembly.endpoint_name(joint.parent_link),
            assembly.endpoint_name(joint.child_link)
        );
    }
    eprintln!(
        "{} kept, {} removed, {} kept without full data",
        report.kept().len(),
        report.removed().len(),
        report.degraded_count()
    );
}
