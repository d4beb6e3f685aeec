use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, error, info};
use uuid::Uuid;

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub(crate) enum WaitError {
    /// The caller-side deadline elapsed. The task itself is not cancelled: the
    /// worker finishes it in the background and its result is discarded.
    #[error("lookup timed out")]
    TimedOut,
    #[error("lookup worker is unavailable")]
    Unavailable,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub(crate) struct TaskId(Uuid);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) struct TaskHandle<T> {
    task_id: TaskId,
    receiver: oneshot::Receiver<T>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Waits until the task completes or the timeout elapses, whichever comes
    /// first. A timed-out wait abandons the handle; the worker's eventual send
    /// of the result fails harmlessly against the dropped receiver.
    pub(crate) async fn wait(self, timeout: Duration) -> Result<T, WaitError> {
        match tokio::time::timeout(timeout, self.receiver).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(WaitError::Unavailable),
            Err(_) => Err(WaitError::TimedOut),
        }
    }
}

/// Single-worker FIFO queue for provider lookups.
///
/// Serializing every lookup through one worker keeps the upstream platform at
/// one in-flight request from this process and bounds open credential scopes
/// to a single outstanding lookup. The tradeoff is accepted capacity loss: a
/// timed-out lookup still occupies the worker until its subprocess exits, and
/// the next queued lookup waits behind it.
pub(crate) struct LookupExecutor {
    sender: Mutex<Option<mpsc::Sender<Job>>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl LookupExecutor {
    /// Spawns the worker thread. Constructed once at startup; the worker lives
    /// until `shutdown`.
    pub(crate) fn start() -> Self {
        let (sender, receiver) = mpsc::channel::<Job>();

        let worker = thread::Builder::new()
            .name("lookup-worker".to_string())
            .spawn(move || {
                while let Ok(job) = receiver.recv() {
                    job();
                }

                debug!("Lookup worker stopped");
            })
            .expect("Unable to spawn lookup worker");

        Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Enqueues a task and returns immediately. The worker runs tasks strictly
    /// in submission order, one at a time, each to completion.
    pub(crate) fn submit<T, F>(&self, task: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let task_id = TaskId(Uuid::new_v4());
        let (result_sender, result_receiver) = oneshot::channel();

        let job: Job = Box::new(move || {
            let outcome = task();

            if result_sender.send(outcome).is_err() {
                debug!(%task_id, "Task finished after the caller stopped waiting");
            }
        });

        match &*self.sender.lock().expect("Lookup queue lock poisoned") {
            Some(sender) => {
                if sender.send(job).is_err() {
                    error!(%task_id, "Lookup worker is gone, dropping task");
                }
            }
            None => {
                debug!(%task_id, "Executor is shut down, dropping task");
            }
        }

        TaskHandle {
            task_id,
            receiver: result_receiver,
        }
    }

    /// Stops accepting new tasks, lets the worker drain what was already
    /// queued, then joins it.
    pub(crate) fn shutdown(&self) {
        self.sender.lock().expect("Lookup queue lock poisoned").take();

        let worker = self.worker.lock().expect("Lookup worker lock poisoned").take();

        if let Some(worker) = worker {
            if worker.join().is_err() {
                error!("Lookup worker panicked");
            }
        }

        info!("Lookup executor stopped");
    }
}
