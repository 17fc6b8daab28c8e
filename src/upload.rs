// Upload loop: one collection per batch, strictly in order. A failed
// batch is logged and the loop moves on; only transport errors stop it.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};

use crate::api::ApiClient;
use crate::batch::{batch_count, batches, NameTemplate};

/// What happened to one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub name: String,
    pub size: usize,
    pub status: u16,
    pub body: String,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The line logged for this batch.
    pub fn log_line(&self) -> String {
        if self.is_success() {
            format!("Successfully created collection: {}", self.name)
        } else {
            format!(
                "Failed to create collection: {}, Status Code: {}, Response: {}",
                self.name, self.status, self.body
            )
        }
    }
}

/// Outcomes of every batch, in upload order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub outcomes: Vec<BatchOutcome>,
}

impl UploadSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Create one collection per batch of `hosts`.
pub fn upload_collections(
    api: &ApiClient,
    token: &str,
    hosts: &[String],
    batch_size: usize,
    template: &NameTemplate,
) -> Result<UploadSummary> {
    let total = batch_count(hosts.len(), batch_size);
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
        pb.set_style(style);
    }

    let mut summary = UploadSummary::default();
    for batch in batches(hosts, batch_size) {
        let name = template.render(batch.index);
        pb.set_message(name.clone());

        let resp = match api.create_collection(token, &name, batch.hosts) {
            Ok(resp) => resp,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };

        let outcome = BatchOutcome {
            name,
            size: batch.hosts.len(),
            status: resp.status,
            body: resp.body,
        };
        pb.suspend(|| {
            if outcome.is_success() {
                info!("{}", outcome.log_line());
            } else {
                error!("{}", outcome.log_line());
            }
        });
        summary.outcomes.push(outcome);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(summary)
}
