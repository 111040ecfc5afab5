use tokio::sync::watch;

/// Counts finished visits, rejections included.
///
/// Backed by a `watch` channel so the driver can block on [`wait_for`](Self::wait_for)
/// instead of polling. The channel has its own lock, separate from the shop floor.
#[derive(Debug)]
pub struct CompletionTracker {
    count: watch::Sender<usize>,
}

impl Default for CompletionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionTracker {
    pub fn new() -> Self {
        let (count, _) = watch::channel(0);
        Self { count }
    }

    /// Records one completion and returns the new total.
    pub fn record_completion(&self) -> usize {
        let mut total = 0;
        self.count.send_modify(|count| {
            *count += 1;
            total = *count;
        });
        total
    }

    /// Records one completion when the returned guard is dropped, including during a
    /// panic or when the owning task is aborted.
    pub fn guard(&self) -> CompletionGuard<'_> {
        CompletionGuard { tracker: self }
    }

    pub fn completed(&self) -> usize {
        *self.count.borrow()
    }

    pub fn is_done(&self, total: usize) -> bool {
        self.completed() >= total
    }

    /// Resolves once at least `total` completions have been recorded.
    pub async fn wait_for(&self, total: usize) {
        let mut count = self.count.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = count.wait_for(|count| *count >= total).await;
    }
}

/// See [`CompletionTracker::guard`].
#[derive(Debug)]
pub struct CompletionGuard<'a> {
    tracker: &'a CompletionTracker,
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.tracker.record_completion();
    }
}
