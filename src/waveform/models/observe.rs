//! Opt-in progress logging for the generation pipeline.
//!
//! With the `obs_slog` feature and `GenerationConfig::verbose`, each stage
//! emits one structured record to an asynchronous terminal drain on stderr.
//! Without the feature, or when not verbose, every method is a no-op.
#[cfg(feature = "obs_slog")]
use crate::waveform::core::taper::TaperOutcome;
use crate::waveform::{
    core::translate::OrbitalInitialConditions, models::postprocess::ConditioningReport,
};
#[cfg(feature = "obs_slog")]
use slog::{Drain, Logger, info, o, warn};

/// Stage logger held by a generator.
#[derive(Clone, Default)]
pub struct PipelineObserver {
    #[cfg(feature = "obs_slog")]
    logger: Option<Logger>,
}

impl std::fmt::Debug for PipelineObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineObserver").field("active", &self.is_active()).finish()
    }
}

impl PipelineObserver {
    /// Terminal observer when `verbose`, silent otherwise.
    pub fn new(verbose: bool) -> Self {
        #[cfg(feature = "obs_slog")]
        {
            let logger = verbose.then(term_logger);
            PipelineObserver { logger }
        }
        #[cfg(not(feature = "obs_slog"))]
        {
            let _ = verbose;
            PipelineObserver {}
        }
    }

    pub fn is_active(&self) -> bool {
        #[cfg(feature = "obs_slog")]
        {
            self.logger.is_some()
        }
        #[cfg(not(feature = "obs_slog"))]
        {
            false
        }
    }

    pub fn translated(&self, n_keys: usize, total_mass: f64, orbit: &OrbitalInitialConditions) {
        #[cfg(feature = "obs_slog")]
        if let Some(log) = &self.logger {
            info!(log, "parameters translated";
                "keys" => n_keys,
                "total_mass" => total_mass,
                "eccentricity" => orbit.eccentricity,
                "rel_anomaly" => orbit.rel_anomaly);
            if orbit.defaulted {
                warn!(log, "eccentricity / rel_anomaly absent; assuming quasi-circular 0.0");
            }
        }
        #[cfg(not(feature = "obs_slog"))]
        let _ = (n_keys, total_mass, orbit);
    }

    pub fn modes_received(&self, n_modes: usize, n_samples: usize, dropped: usize) {
        #[cfg(feature = "obs_slog")]
        if let Some(log) = &self.logger {
            info!(log, "modes received";
                "modes" => n_modes, "samples" => n_samples, "dropped" => dropped);
        }
        #[cfg(not(feature = "obs_slog"))]
        let _ = (n_modes, n_samples, dropped);
    }

    pub fn polarizations_ready(&self, n_samples: usize, delta_t: f64, epoch: f64) {
        #[cfg(feature = "obs_slog")]
        if let Some(log) = &self.logger {
            info!(log, "time-domain polarizations ready";
                "samples" => n_samples, "delta_t" => delta_t, "epoch" => epoch);
        }
        #[cfg(not(feature = "obs_slog"))]
        let _ = (n_samples, delta_t, epoch);
    }

    pub fn conditioned(&self, report: &ConditioningReport) {
        #[cfg(feature = "obs_slog")]
        if let Some(log) = &self.logger {
            info!(log, "frequency-domain conditioning";
                "natural_len" => report.natural_len,
                "target_len" => report.target_len,
                "shift" => report.shift);
            if let Some((plus, cross)) = report.taper {
                for (name, outcome) in [("plus", plus), ("cross", cross)] {
                    match outcome {
                        TaperOutcome::Applied { start, len } => {
                            info!(log, "taper applied"; "series" => name, "start" => start, "len" => len)
                        }
                        TaperOutcome::SignalEmpty | TaperOutcome::TooShort => {
                            warn!(log, "taper skipped"; "series" => name, "outcome" => format!("{outcome:?}"))
                        }
                    }
                }
            }
        }
        #[cfg(not(feature = "obs_slog"))]
        let _ = report;
    }
}

#[cfg(feature = "obs_slog")]
fn term_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("crate" => "rust_seobnr"))
}
