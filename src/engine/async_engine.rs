use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, warn};

use crate::actions::TransactionActions;
use crate::currency::CurrencyRepository;
use crate::engine::records::RequestRecord;
use crate::storage::Storage;

/// Counts of what happened to the rows of one requests file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    /// Well-formed requests the ledger refused.
    pub rejected: usize,
    /// Rows that could not be read as a request at all.
    pub malformed: usize
}

/// Streams a requests file through the ledger actions in file order.
pub struct AsyncEngine<S: Storage, C: CurrencyRepository> {
    actions: Arc<TransactionActions<S, C>>,
    backpressure: usize
}

impl<S: Storage, C: CurrencyRepository> AsyncEngine<S, C> {
    pub fn new(actions: Arc<TransactionActions<S, C>>) -> Self {
        Self {
            actions,
            backpressure: 256
        }
    }

    /// Reads `path` on a blocking task and applies each request as it arrives.
    ///
    /// A missing or unreadable file is logged and yields an empty summary.
    pub async fn run(&self, path: &Path) -> anyhow::Result<RunSummary> {
        let (sender, receiver) = mpsc::channel::<RequestRecord>(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_path_buf(), sender);
        let mut summary = self.process_requests(receiver).await;

        match csv_handle.await {
            Ok(malformed) => summary.malformed = malformed,
            Err(error) => error!("CSV ingestion failed: {error}")
        }

        Ok(summary)
    }

    fn spawn_csv_reader(&self, path: PathBuf, sender: mpsc::Sender<RequestRecord>) -> JoinHandle<usize> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening CSV at path: {} | {error}", path.display());
                    return 0;
                }
            };

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .flexible(true)
                .from_reader(BufReader::new(file));

            let mut malformed = 0;

            for result in reader.deserialize::<RequestRecord>() {
                match result {
                    Ok(record) => {
                        if sender.blocking_send(record).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        malformed += 1;
                        error!("CSV deserialization error: {error}");
                    }
                }
            }

            malformed
        })
    }

    async fn process_requests(&self, mut receiver: mpsc::Receiver<RequestRecord>) -> RunSummary {
        let mut summary = RunSummary::default();

        // A single consumer keeps requests in file order, so later rows see earlier ones.
        while let Some(record) = receiver.recv().await {
            let kind = record.action;
            let user = record.user;

            match record.into_action().and_then(|action| self.actions.dispatch(action)) {
                Ok(_) => summary.applied += 1,
                Err(error) => {
                    summary.rejected += 1;
                    warn!("Request [{kind:?}] from user [{user}] rejected: {error}");
                }
            }
        }

        summary
    }
}
