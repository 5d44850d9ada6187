use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::sink::ResultSink;

/// A unit of background work that produces one value for one sink.
#[async_trait]
pub trait LoadTask: Send + Sync + Sized + 'static {
    type Output: Send + 'static;

    async fn load_data(&self) -> Self::Output;

    /// Runs [`LoadTask::load_data`] on a background task and delivers the
    /// result to `sink` once it completes.
    fn execute<S>(self, sink: S) -> JoinHandle<()>
    where
        S: ResultSink<Self::Output>,
    {
        tokio::spawn(async move {
            let output = self.load_data().await;
            sink.success(output);
        })
    }
}
