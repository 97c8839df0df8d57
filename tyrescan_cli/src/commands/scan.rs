//! The scan run: search, filter, enrich, then write the artefacts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tyrescan_lib::{enrich_all, find_candidates, Classifier, Dataset, PacedClient, ScanConfig};

use crate::output::{artefact_paths, log_request_summary, print_breakdown, write_artefacts};

/// Overrides for a scan. With no flags the run uses the loaded configuration.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Directory for the JSON, CSV and XLSX artefacts
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also admit tyre + wholesale/retread/fleet/commercial names without a truck token
    #[arg(long)]
    pub permissive: bool,

    /// Skip the per-company endpoints and build records from search data only
    #[arg(long)]
    pub no_enrich: bool,
}

impl ScanArgs {
    pub fn apply(&self, config: &mut ScanConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.permissive {
            config.permissive_match = true;
        }
        if self.no_enrich {
            config.enrich = false;
        }
    }
}

pub async fn run(config: &ScanConfig) -> Result<()> {
    let client = PacedClient::new(config)?;
    let classifier = Classifier::new(config.rules.clone(), config.permissive_match);

    tracing::info!(
        "scanning {} queries ({} inclusion)",
        config.queries.len(),
        if classifier.is_permissive() {
            "permissive"
        } else {
            "strict"
        }
    );
    let candidates = find_candidates(&client, config, &classifier).await?;

    let pb = ProgressBar::new(candidates.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} ({eta}) {msg}",
        )
        .context("progress bar template")?,
    );
    pb.set_message(if config.enrich {
        "enriching companies..."
    } else {
        "building records..."
    });
    let records = enrich_all(&client, &candidates, config, &classifier, |record| {
        pb.set_message(record.company_number.clone());
        pb.inc(1);
    })
    .await;
    pb.finish_with_message(format!("{} records", records.len()));

    let generated_at = chrono::Local::now().naive_local();
    let dataset = Dataset::build(records, &config.queries, generated_at);

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    let paths = artefact_paths(&config.output_dir, &config.output_stem);
    write_artefacts(&dataset, &paths)?;
    tracing::info!(
        "wrote {}, {} and {}",
        paths.json.display(),
        paths.csv.display(),
        paths.xlsx.display()
    );

    print_breakdown(&dataset);
    log_request_summary(&client.tracker().summary());
    Ok(())
}
