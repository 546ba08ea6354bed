//! Banking AI Scoring - Main Entry Point
//!
//! Reads JSON request lines from stdin, scores them concurrently and writes
//! one JSON response line per request to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use banking_ai_scoring::{
    config::{AppConfig, LoggingConfig},
    consumer::RequestReader,
    metrics::{MetricsReporter, ScoringMetrics},
    noise::UniformNoise,
    producer::ResponseWriter,
    service::ScoringService,
    ScoringRequest,
};
use futures::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::BufReader;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        format!("banking_ai_scoring={}", logging.level)
            .parse()
            .context("Invalid logging.level")?,
    );

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so the level and format apply
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    info!("Starting Banking AI Scoring");
    info!(
        strategy = config.scoring.strategy.as_str(),
        noise_amplitude = config.scoring.noise_amplitude,
        seeded = config.scoring.seed.is_some(),
        "Configuration loaded"
    );
    info!(
        "Fraud threshold: {:.2}, approval threshold: {:.2}, risk levels: medium>{:.2}, high>{:.2}",
        config.detection.fraud_threshold,
        config.detection.approval_threshold,
        config.detection.risk_levels.medium,
        config.detection.risk_levels.high
    );

    // Classifier training, if any, completes here before any request is read
    let service = Arc::new(
        ScoringService::from_config(&config).context("Failed to initialize scoring service")?,
    );
    service.log_summary();

    let metrics = Arc::new(ScoringMetrics::new());

    let reader = RequestReader::new(BufReader::new(tokio::io::stdin()), "stdin");
    let writer = ResponseWriter::new(tokio::io::stdout());

    let num_workers = config.pipeline.workers;
    info!(
        "Starting request processing loop with {} parallel workers",
        num_workers
    );

    // Semaphore to limit concurrent processing
    let semaphore = Arc::new(Semaphore::new(num_workers));
    let sequence = Arc::new(AtomicU64::new(0));
    let noise_amplitude = config.scoring.noise_amplitude;
    let noise_seed = config.scoring.seed;

    // Periodic metrics summary
    let reporter = MetricsReporter::new(metrics.clone(), config.pipeline.metrics_interval_secs);
    let reporter_handle = tokio::spawn(reporter.start());

    let mut tasks = JoinSet::new();
    let mut requests = Box::pin(reader.subscribe());

    while let Some(line) = requests.next().await {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "Failed to read request stream");
                break;
            }
        };

        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .context("Worker semaphore closed")?;

        let service = service.clone();
        let writer = writer.clone();
        let metrics = metrics.clone();
        let seq = sequence.fetch_add(1, Ordering::Relaxed);

        tasks.spawn(async move {
            let start_time = Instant::now();

            match serde_json::from_str::<ScoringRequest>(&line) {
                Ok(request) => {
                    let mut noise = UniformNoise::for_request(noise_seed, seq, noise_amplitude);

                    let response = service.handle(&request, &mut noise);
                    let processing_time = start_time.elapsed();
                    metrics.record_response(&response, processing_time);

                    if let Err(e) = writer.publish(&response).await {
                        error!(
                            request_id = %response.id,
                            error = %e,
                            "Failed to write response"
                        );
                    } else {
                        debug!(
                            request_id = %response.id,
                            endpoint = response.endpoint.as_str(),
                            scorer = response.scorer,
                            processing_time_us = processing_time.as_micros(),
                            "Request processed"
                        );
                    }

                    let count = seq + 1;
                    if count % 100 == 0 {
                        let stats = metrics.get_processing_stats();
                        info!(
                            processed = count,
                            throughput = format!("{:.1} req/s", metrics.get_throughput()),
                            avg_latency_us = stats.mean_us,
                            "Processing milestone"
                        );
                    }
                }
                Err(e) => {
                    metrics.record_malformed();
                    warn!(sequence = seq, error = %e, "Failed to parse request line");
                }
            }

            // Release permit when done
            drop(permit);
        });

        // Reap finished tasks so the set does not grow with the input
        while let Some(joined) = tasks.try_join_next() {
            if let Err(e) = joined {
                error!(error = %e, "Request task failed");
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "Request task failed");
        }
    }
    reporter_handle.abort();

    info!("Input exhausted, shutting down");
    metrics.print_summary();

    Ok(())
}
