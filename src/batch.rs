//! Batch annotation of several domains.
//!
//! Each configured domain file is loaded, optionally given the wind condition
//! from the settings, annotated and written out. Domains are processed in
//! parallel with rayon and a progress bar tracks completion. A failing domain
//! is logged and reported without stopping the others.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::{
    annotate::annotate,
    domain::Domain,
    output::{output_path, write_annotations},
    settings::Settings,
};


/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,          // annotation files written
    pub failed: Vec<(PathBuf, String)>, // domain file and error message
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Annotates every domain listed in the settings.
#[derive(Debug)]
pub struct Batch {
    pub settings: Settings,
}

impl Batch {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Processes all domains in parallel and collects the outcome of each.
    #[instrument(skip_all)]
    pub fn run(&self) -> BatchReport {
        let start = Instant::now();
        let n = self.settings.domains.len();
        info!(domains = n, "annotating domains");

        let pb = ProgressBar::new(n as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.green/blue} {pos:>5}/{len:5} {msg}",
        ) {
            pb.set_style(style.progress_chars("█▇▆▅▄▃▂▁"));
        }
        pb.set_message("domain".to_string());

        let outcomes: Vec<(PathBuf, Result<PathBuf>)> = self
            .settings
            .domains
            .par_iter()
            .map(|domain_file| {
                let outcome = self.process(domain_file);
                pb.inc(1);
                (domain_file.clone(), outcome)
            })
            .collect();

        pb.finish_and_clear();

        let mut report = BatchReport::default();
        for (domain_file, outcome) in outcomes {
            match outcome {
                Ok(path) => report.written.push(path),
                Err(err) => {
                    let message = format!("{:#}", err);
                    warn!(domain = %domain_file.display(), error = %message, "domain failed");
                    report.failed.push((domain_file, message));
                }
            }
        }

        info!(
            written = report.written.len(),
            failed = report.failed.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch finished"
        );

        report
    }

    /// Loads, annotates and writes a single domain, returning the output path.
    #[instrument(skip_all, fields(domain = %domain_file.display()))]
    pub fn process(&self, domain_file: &Path) -> Result<PathBuf> {
        let mut domain = Domain::from_file(domain_file)
            .with_context(|| format!("Failed to read domain {}", domain_file.display()))?;
        apply_overrides(&mut domain, &self.settings);

        let annotations = annotate(&domain)
            .with_context(|| format!("Failed to annotate domain {}", domain_file.display()))?;

        let path = output_path(&self.settings.output_dir, domain_file);
        write_annotations(&path, &annotations, self.settings.pretty)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(output = %path.display(), "wrote annotations");

        Ok(path)
    }
}

/// Replaces the wind condition of a domain with the configured overrides.
fn apply_overrides(domain: &mut Domain, settings: &Settings) {
    if let Some(direction) = settings.wind_direction {
        domain.wind_direction = direction;
    }
    if let Some(speed) = settings.wind_speed {
        domain.wind_speed = speed;
    }
}
