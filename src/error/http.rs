use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Dispatch queue closed before all {total} units were submitted.")]
    QueueClosed { total: usize },
    #[error("Round {round} finished {completed} of {total} units.")]
    IncompleteRound {
        round: usize,
        completed: usize,
        total: usize,
    },
}
