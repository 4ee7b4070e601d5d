use super::image_processing::ThumbnailGenerator;
use super::{MediaFile, ReconcileReport};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Drives the generator over every source whose thumbnail is missing.
pub struct Reconciler {
    generator: Arc<ThumbnailGenerator>,
    workers: usize,
}

impl Reconciler {
    pub fn new(generator: Arc<ThumbnailGenerator>, workers: usize) -> Self {
        Self {
            generator,
            workers: workers.max(1),
        }
    }

    /// Sources (ascending) whose cache name is not in `cached`.
    pub fn missing<'a>(sources: &'a [MediaFile], cached: &HashSet<String>) -> Vec<&'a MediaFile> {
        sources
            .iter()
            .filter(|file| !cached.contains(&file.cache_name))
            .collect()
    }

    /// Generate every missing thumbnail and record successes in `cached`.
    ///
    /// Files are admitted in ascending order, at most `workers` at a time. A failure is
    /// logged and counted; the file stays missing. Once `cancel` fires no new file is
    /// admitted, in-flight ones still complete.
    pub async fn reconcile(
        &self,
        sources: &[MediaFile],
        cached: &mut HashSet<String>,
        cancel: &CancellationToken,
    ) -> ReconcileReport {
        let missing = Self::missing(sources, cached);
        let mut report = ReconcileReport {
            already_cached: sources.len() - missing.len(),
            ..Default::default()
        };

        if missing.is_empty() {
            debug!("All {} thumbnails already cached", sources.len());
            return report;
        }

        info!(
            "Generating {} missing thumbnails with {} workers",
            missing.len(),
            self.workers
        );

        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for file in missing {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                permit = permits.clone().acquire_owned() => permit.ok(),
            };
            let Some(permit) = permit else {
                report.cancelled = true;
                break;
            };

            // Collect whatever already finished so `cached` stays current
            while let Some(joined) = tasks.try_join_next() {
                record(joined, cached, &mut report);
            }

            let generator = self.generator.clone();
            let file = file.clone();
            tasks.spawn(async move {
                let result = generator.generate(&file).await;
                drop(permit);
                (file, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            record(joined, cached, &mut report);
        }

        if report.cancelled {
            info!(
                "Reconciliation cancelled: {} generated, {} failed",
                report.generated, report.failed
            );
        } else {
            info!(
                "Reconciliation finished: {} generated, {} failed, {} already cached",
                report.generated, report.failed, report.already_cached
            );
        }

        report
    }
}

type TaskOutcome = (MediaFile, Result<String, super::GenerationError>);

fn record(
    joined: Result<TaskOutcome, tokio::task::JoinError>,
    cached: &mut HashSet<String>,
    report: &mut ReconcileReport,
) {
    match joined {
        Ok((file, Ok(cache_name))) => {
            debug!("Cached {} as {}", file.name, cache_name);
            cached.insert(cache_name);
            report.generated += 1;
        }
        Ok((file, Err(e))) => {
            warn!(
                "Failed to generate thumbnail for {:?}: {}",
                file.source_path, e
            );
            report.failed += 1;
        }
        Err(e) => {
            error!("Thumbnail task panicked: {}", e);
            report.failed += 1;
        }
    }
}
