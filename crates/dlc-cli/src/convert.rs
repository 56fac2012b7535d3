use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use dlc_ingest_csv::{instance_for, ConversionSummary, DlcConverter};
use dlc_storage::{
    ContainerLookup, ImportConfig, InMemoryContainerStore, JsonFileBatch, RecordBatch,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input CSV export
    pub input: PathBuf,
    /// Import type
    #[arg(long = "type", default_value = dlc_ingest_csv::DLC_IMPORT_TYPE)]
    pub import_type: String,
    /// JSON config file (flags below override it)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory for the batch artifact
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
    /// Repository id used in minted record URIs
    #[arg(long)]
    pub repository_id: Option<u32>,
    /// JSON file listing containers that already exist
    #[arg(long)]
    pub existing_resources: Option<PathBuf>,
    /// Abort when the container lookup fails
    #[arg(long)]
    pub strict_lookup: bool,
    /// Log the batch artifact after writing it
    #[arg(long)]
    pub echo_output: bool,
    /// Mint counter-based URIs instead of random ones
    #[arg(long)]
    pub deterministic_refs: bool,
    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

fn resolve_config(args: &ConvertArgs) -> Result<ImportConfig> {
    let mut config = match &args.config {
        Some(path) => ImportConfig::load(path)?,
        None => ImportConfig::default(),
    };
    if let Some(dir) = &args.out_dir {
        config.output_dir = Some(dir.clone());
    }
    if let Some(id) = args.repository_id {
        config.repository_id = id;
    }
    if let Some(path) = &args.existing_resources {
        config.existing_resources = Some(path.clone());
    }
    config.strict_lookup |= args.strict_lookup;
    config.echo_output |= args.echo_output;
    config.deterministic_refs |= args.deterministic_refs;
    Ok(config)
}

fn print_summary(summary: &ConversionSummary) {
    println!(
        "  {} {} rows, {} records ({} containers created, {} reused, {} descriptions)",
        "→".yellow(),
        summary.rows_read,
        summary.records_emitted(),
        summary.containers_created,
        summary.containers_reused,
        summary.descriptions_created
    );
    let skipped = summary.rows_skipped_blank + summary.rows_skipped_unknown_level;
    if skipped > 0 {
        println!(
            "  {} {} rows skipped ({} blank, {} unrecognized level)",
            "→".yellow(),
            skipped,
            summary.rows_skipped_blank,
            summary.rows_skipped_unknown_level
        );
    }
}

pub fn cmd_convert(args: &ConvertArgs) -> Result<()> {
    let config = resolve_config(args)?;
    println!(
        "{} {} export {}",
        "Converting".green().bold(),
        args.import_type,
        args.input.display()
    );

    let lookup: Box<dyn ContainerLookup> = match &config.existing_resources {
        Some(path) => Box::new(InMemoryContainerStore::load_json(path)?),
        None => Box::new(InMemoryContainerStore::new()),
    };
    let converter = DlcConverter::from_config(&config, lookup);

    let mut import = instance_for(&args.import_type, &args.input, converter)
        .ok_or_else(|| anyhow!("unknown import type `{}`", args.import_type))?;
    import
        .run()
        .with_context(|| format!("converting {}", args.input.display()))?;

    let mut batch = JsonFileBatch::new(config.output_dir()).with_echo(config.echo_output);
    let summary = import.into_converter().finish(&mut batch)?;
    let path = batch.output_path()?;

    println!("  {} {}", "→".cyan(), path.display());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ConvertArgs,
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("dlc.json");
        std::fs::write(
            &config_path,
            r#"{ "repository_id": 7, "language": "fre", "strict_lookup": false }"#,
        )
        .unwrap();

        let harness = Harness::parse_from([
            "dlc-import",
            "in.csv",
            "--config",
            config_path.to_str().unwrap(),
            "--repository-id",
            "9",
            "--strict-lookup",
        ]);
        let config = resolve_config(&harness.args).unwrap();
        assert_eq!(config.repository_id, 9);
        assert_eq!(config.language, "fre");
        assert!(config.strict_lookup);
        assert!(!config.echo_output);
        assert!(!config.deterministic_refs);
    }

    #[test]
    fn deterministic_refs_flag_reaches_config() {
        let harness = Harness::parse_from(["dlc-import", "in.csv", "--deterministic-refs"]);
        assert!(resolve_config(&harness.args).unwrap().deterministic_refs);
    }

    #[test]
    fn type_defaults_to_dlc() {
        let harness = Harness::parse_from(["dlc-import", "in.csv"]);
        assert_eq!(harness.args.import_type, "dlc");
        assert_eq!(resolve_config(&harness.args).unwrap(), ImportConfig::default());
    }
}
