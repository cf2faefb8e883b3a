use log::debug;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use votesprout_core::foundation::VoteSproutError;

#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub uptime: Duration,
    pub http_requests: u64,
    pub http_server_errors: u64,
    pub votes_accepted: u64,
    pub votes_rejected: u64,
    pub paymaster_ok: u64,
    pub paymaster_error: u64,
}

pub struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    votes_cast_total: IntCounterVec,
    paymaster_calls_total: IntCounterVec,
    started_at: Instant,
    http_requests: AtomicU64,
    http_server_errors: AtomicU64,
    votes_accepted: AtomicU64,
    votes_rejected: AtomicU64,
    paymaster_ok: AtomicU64,
    paymaster_error: AtomicU64,
}

fn metrics_err(err: prometheus::Error) -> VoteSproutError {
    VoteSproutError::Message(format!("metrics: {err}"))
}

impl Metrics {
    pub fn new() -> Result<Self, VoteSproutError> {
        let registry = Registry::new();
        let http_requests_total =
            IntCounterVec::new(Opts::new("http_requests_total", "HTTP requests by route and status"), &["route", "status"]).map_err(metrics_err)?;
        let votes_cast_total = IntCounterVec::new(Opts::new("votes_cast_total", "Vote submissions by outcome"), &["outcome"]).map_err(metrics_err)?;
        let paymaster_calls_total =
            IntCounterVec::new(Opts::new("paymaster_calls_total", "Paymaster proxy calls by method and status"), &["method", "status"])
                .map_err(metrics_err)?;

        registry.register(Box::new(http_requests_total.clone())).map_err(metrics_err)?;
        registry.register(Box::new(votes_cast_total.clone())).map_err(metrics_err)?;
        registry.register(Box::new(paymaster_calls_total.clone())).map_err(metrics_err)?;
        debug!("prometheus metrics registered metric_count=3");

        Ok(Self {
            registry,
            http_requests_total,
            votes_cast_total,
            paymaster_calls_total,
            started_at: Instant::now(),
            http_requests: AtomicU64::new(0),
            http_server_errors: AtomicU64::new(0),
            votes_accepted: AtomicU64::new(0),
            votes_rejected: AtomicU64::new(0),
            paymaster_ok: AtomicU64::new(0),
            paymaster_error: AtomicU64::new(0),
        })
    }

    pub fn inc_http_request(&self, route: &str, status: u16) {
        let status_label = status.to_string();
        self.http_requests_total.with_label_values(&[route, status_label.as_str()]).inc();
        self.http_requests.fetch_add(1, Ordering::Relaxed);
        if status >= 500 {
            self.http_server_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// `outcome`: `accepted`, `duplicate`, `invalid`, `not_found` or `error`.
    pub fn inc_vote(&self, outcome: &str) {
        self.votes_cast_total.with_label_values(&[outcome]).inc();
        if outcome == "accepted" {
            self.votes_accepted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.votes_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn inc_paymaster_call(&self, method: &str, status: &str) {
        self.paymaster_calls_total.with_label_values(&[method, status]).inc();
        match status {
            "ok" | "pending" => {
                self.paymaster_ok.fetch_add(1, Ordering::Relaxed);
            }
            _ => {
                self.paymaster_error.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            uptime: self.started_at.elapsed(),
            http_requests: self.http_requests.load(Ordering::Relaxed),
            http_server_errors: self.http_server_errors.load(Ordering::Relaxed),
            votes_accepted: self.votes_accepted.load(Ordering::Relaxed),
            votes_rejected: self.votes_rejected.load(Ordering::Relaxed),
            paymaster_ok: self.paymaster_ok.load(Ordering::Relaxed),
            paymaster_error: self.paymaster_error.load(Ordering::Relaxed),
        }
    }

    pub fn encode(&self) -> Result<String, VoteSproutError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer).map_err(metrics_err)?;
        String::from_utf8(buffer).map_err(|err| VoteSproutError::Message(format!("metrics: {err}")))
    }
}
