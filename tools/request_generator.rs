//! Sample Request Generator
//!
//! Prints request lines for the scoring pipeline to stdout, e.g.
//!
//! ```text
//! request_generator 200 0.2 7 | banking-ai-scoring
//! ```
//!
//! Arguments (all optional): count, fraud rate, seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use std::io::Write;
use tracing::info;

const CHAT_MESSAGES: [&str; 7] = [
    "What is my balance?",
    "Show me my recent transactions",
    "What are your hours?",
    "Are there any fees?",
    "How can I contact support?",
    "Can I open a joint account?",
    "asdf",
];

/// Request generator for manual testing
struct RequestGenerator {
    rng: ChaCha8Rng,
    counter: u64,
}

impl RequestGenerator {
    fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64),
            counter: 0,
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}_{:08}", prefix, self.counter)
    }

    /// Generate a typical daytime purchase
    fn legitimate_transaction(&mut self) -> serde_json::Value {
        json!({
            "id": self.next_id("tx"),
            "endpoint": "fraud_detection",
            "payload": {
                "transaction_amount": (self.rng.gen_range(5.0..800.0_f64) * 100.0).round() / 100.0,
                "account_age_days": self.rng.gen_range(90..3650),
                "num_transactions_today": self.rng.gen_range(0..4),
                "hour_of_day": self.rng.gen_range(8..21),
                "merchant_category": self.rng.gen_range(0..3),
                "is_weekend": self.rng.gen_bool(2.0 / 7.0),
                "location_risk_score": self.rng.gen_range(0.0..0.3),
            }
        })
    }

    /// Generate a suspicious transaction
    fn suspicious_transaction(&mut self) -> serde_json::Value {
        json!({
            "id": self.next_id("tx"),
            "endpoint": "fraud_detection",
            "payload": {
                "transaction_amount": (self.rng.gen_range(4000.0..10000.0_f64) * 100.0).round() / 100.0,
                "account_age_days": self.rng.gen_range(1..30),
                "num_transactions_today": self.rng.gen_range(5..15),
                "hour_of_day": *[0, 1, 2, 3, 4, 5, 23].choose(&mut self.rng).unwrap_or(&3),
                "merchant_category": self.rng.gen_range(3..5),
                "is_weekend": self.rng.gen_bool(0.5),
                "location_risk_score": self.rng.gen_range(0.6..1.0),
            }
        })
    }

    fn loan_application(&mut self) -> serde_json::Value {
        json!({
            "id": self.next_id("loan"),
            "endpoint": "loan_approval",
            "payload": {
                "credit_score": self.rng.gen_range(300..=850),
                "annual_income": self.rng.gen_range(20_000..200_000),
                "debt_to_income": (self.rng.gen_range(0.0..0.8_f64) * 100.0).round() / 100.0,
                "employment_length_years": self.rng.gen_range(0..25),
                "loan_amount": self.rng.gen_range(1_000..100_000),
                "loan_term_months": *[12, 24, 36, 60].choose(&mut self.rng).unwrap_or(&36),
                "home_ownership": self.rng.gen_range(0..3),
            }
        })
    }

    fn chat(&mut self) -> serde_json::Value {
        let message = *CHAT_MESSAGES.choose(&mut self.rng).unwrap_or(&"hello");
        json!({
            "id": self.next_id("chat"),
            "endpoint": "chatbot",
            "payload": { "message": message }
        })
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("request_generator=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let count: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100);
    let fraud_rate: f64 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.1_f64)
        .clamp(0.0, 1.0);
    let seed: Option<u64> = args.get(3).and_then(|s| s.parse().ok());

    info!(count = count, fraud_rate = fraud_rate, seed = ?seed, "Generating requests");

    let mut generator = RequestGenerator::new(seed);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let (mut transactions, mut suspicious, mut loans, mut chats) = (0u64, 0u64, 0u64, 0u64);

    for _ in 0..count {
        let request = match generator.rng.gen_range(0..10) {
            0..=5 => {
                transactions += 1;
                if generator.rng.gen_bool(fraud_rate) {
                    suspicious += 1;
                    generator.suspicious_transaction()
                } else {
                    generator.legitimate_transaction()
                }
            }
            6..=8 => {
                loans += 1;
                generator.loan_application()
            }
            _ => {
                chats += 1;
                generator.chat()
            }
        };

        serde_json::to_writer(&mut out, &request)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(
        transactions = transactions,
        suspicious = suspicious,
        loans = loans,
        chats = chats,
        "Completed"
    );

    Ok(())
}
