use tokio::sync::oneshot;
use tracing::debug;

/// Where a finished load hands its result. A sink is used at most once.
pub trait ResultSink<T>: Send + 'static {
    fn success(self, value: T);
}

impl<T: Send + 'static> ResultSink<T> for oneshot::Sender<T> {
    fn success(self, value: T) {
        if self.send(value).is_err() {
            debug!("result receiver dropped before the load finished");
        }
    }
}

/// Adapts a closure into a [`ResultSink`].
pub struct CallbackSink<F>(pub F);

impl<T, F> ResultSink<T> for CallbackSink<F>
where
    F: FnOnce(T) + Send + 'static,
{
    fn success(self, value: T) {
        (self.0)(value)
    }
}
