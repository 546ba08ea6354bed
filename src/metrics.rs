//! Request statistics for the scoring pipeline.

use crate::types::{ScoringOutcome, ScoringResponse};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for the pipeline
pub struct ScoringMetrics {
    /// Requests answered (including error responses)
    pub requests_processed: AtomicU64,
    /// Requests answered with an error body
    pub requests_rejected: AtomicU64,
    /// Lines that could not be parsed as a request at all
    pub malformed_requests: AtomicU64,
    pub loans_approved: AtomicU64,
    pub loans_declined: AtomicU64,
    by_endpoint: RwLock<HashMap<String, u64>>,
    /// Fraud decisions by risk level
    fraud_by_level: RwLock<HashMap<String, u64>>,
    /// Processing times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Returned probability distribution buckets
    score_buckets: RwLock<[u64; 10]>,
    start_time: Instant,
}

impl ScoringMetrics {
    pub fn new() -> Self {
        Self {
            requests_processed: AtomicU64::new(0),
            requests_rejected: AtomicU64::new(0),
            malformed_requests: AtomicU64::new(0),
            loans_approved: AtomicU64::new(0),
            loans_declined: AtomicU64::new(0),
            by_endpoint: RwLock::new(HashMap::new()),
            fraud_by_level: RwLock::new(HashMap::new()),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            score_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record an answered request
    pub fn record_response(&self, response: &ScoringResponse, processing_time: Duration) {
        self.requests_processed.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut by_endpoint) = self.by_endpoint.write() {
            *by_endpoint
                .entry(response.endpoint.as_str().to_string())
                .or_insert(0) += 1;
        }

        if let Ok(mut times) = self.processing_times.write() {
            times.push(processing_time.as_micros() as u64);
            // Keep only the most recent samples
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        match &response.result {
            Some(ScoringOutcome::Fraud(decision)) => {
                if let Ok(mut by_level) = self.fraud_by_level.write() {
                    *by_level
                        .entry(decision.risk_level.as_str().to_string())
                        .or_insert(0) += 1;
                }
                self.record_probability(decision.fraud_probability);
            }
            Some(ScoringOutcome::Loan(decision)) => {
                if decision.approved {
                    self.loans_approved.fetch_add(1, Ordering::Relaxed);
                } else {
                    self.loans_declined.fetch_add(1, Ordering::Relaxed);
                }
                self.record_probability(decision.approval_probability);
            }
            Some(ScoringOutcome::Chat(_)) => {}
            None => {
                self.requests_rejected.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Record a line that was not a valid request envelope
    pub fn record_malformed(&self) {
        self.malformed_requests.fetch_add(1, Ordering::Relaxed);
    }

    fn record_probability(&self, probability: f64) {
        let bucket = (probability.clamp(0.0, 1.0) * 10.0).min(9.0) as usize;
        if let Ok(mut buckets) = self.score_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Get processing time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let mut sorted: Vec<u64> = match self.processing_times.read() {
            Ok(times) if !times.is_empty() => times.clone(),
            _ => return ProcessingStats::default(),
        };
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: sorted[count - 1],
        }
    }

    /// Get current throughput (requests per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.requests_processed.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn get_score_distribution(&self) -> [u64; 10] {
        self.score_buckets.read().map(|b| *b).unwrap_or_default()
    }

    pub fn get_requests_by_endpoint(&self) -> HashMap<String, u64> {
        self.by_endpoint
            .read()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn get_fraud_by_level(&self) -> HashMap<String, u64> {
        self.fraud_by_level
            .read()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        let processed = self.requests_processed.load(Ordering::Relaxed);
        let rejected = self.requests_rejected.load(Ordering::Relaxed);
        let malformed = self.malformed_requests.load(Ordering::Relaxed);
        let approved = self.loans_approved.load(Ordering::Relaxed);
        let declined = self.loans_declined.load(Ordering::Relaxed);

        let processing = self.get_processing_stats();
        let throughput = self.get_throughput();
        let score_dist = self.get_score_distribution();

        info!("==================== SCORING METRICS SUMMARY ====================");
        info!(
            "Requests processed: {:>8} | rejected: {:>6} | malformed: {:>6} | {:>6.1} req/s",
            processed, rejected, malformed, throughput
        );
        for (endpoint, count) in &self.get_requests_by_endpoint() {
            info!("  {:16}: {:>8}", endpoint, count);
        }
        info!(
            "Processing time (us): mean={} p50={} p95={} p99={} max={}",
            processing.mean_us,
            processing.p50_us,
            processing.p95_us,
            processing.p99_us,
            processing.max_us
        );
        info!("Fraud decisions by risk level:");
        for (level, count) in &self.get_fraud_by_level() {
            info!("  {:6}: {:>8}", level, count);
        }
        info!("Loans approved: {} | declined: {}", approved, declined);
        info!("Probability distribution:");
        let total: u64 = score_dist.iter().sum();
        for (i, &count) in score_dist.iter().enumerate() {
            let pct = if total > 0 {
                (count as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            let bar = "#".repeat(((pct / 2.0) as usize).min(20));
            info!(
                "  {:.1}-{:.1}: {:>6} ({:>5.1}%) {}",
                i as f64 / 10.0,
                (i + 1) as f64 / 10.0,
                count,
                pct,
                bar
            );
        }
        info!("=================================================================");
    }
}

impl Default for ScoringMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Logs a metrics summary on a fixed interval
pub struct MetricsReporter {
    metrics: Arc<ScoringMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<ScoringMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task. Returns immediately when the interval is 0.
    pub async fn start(self) {
        if self.interval_secs == 0 {
            return;
        }
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}
