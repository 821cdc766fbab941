//! Background thread pool for blocking HTTP requests.
//!
//! The UI thread must never wait on the network, so every catalog request
//! runs as a job on this pool and reports back through the event bus.
//! A plain channel queue is enough here: jobs are few and short-lived,
//! one per user action.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::trace;
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size worker pool draining a shared job queue.
///
/// Dropping the pool closes the queue and joins the threads with a bounded
/// deadline, so a hung request cannot block application exit.
pub struct Workers {
    sender: Option<Sender<Job>>,
    handles: Vec<thread::JoinHandle<()>>,
}

impl Workers {
    /// Create a pool with `num_threads` worker threads.
    pub fn new(num_threads: usize) -> Self {
        let (sender, receiver): (Sender<Job>, Receiver<Job>) = unbounded();
        let mut handles = Vec::with_capacity(num_threads);

        for worker_id in 0..num_threads {
            let receiver = receiver.clone();
            let handle = thread::Builder::new()
                .name(format!("livraria-worker-{}", worker_id))
                .spawn(move || {
                    trace!("Worker {} started", worker_id);
                    while let Ok(job) = receiver.recv() {
                        job();
                    }
                    trace!("Worker {} stopped", worker_id);
                })
                .expect("Failed to spawn worker thread");
            handles.push(handle);
        }

        trace!("Workers initialized: {} threads", num_threads);

        Self {
            sender: Some(sender),
            handles,
        }
    }

    /// Execute closure on a worker thread.
    ///
    /// Runs asynchronously, no return value; report results through the
    /// event bus.
    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(sender) = &self.sender {
            let _ = sender.send(Box::new(f));
        }
    }
}

impl Drop for Workers {
    fn drop(&mut self) {
        use std::time::{Duration, Instant};

        let num_threads = self.handles.len();
        trace!("Workers shutting down ({} threads)...", num_threads);

        // Close the queue; idle workers leave recv() immediately
        self.sender.take();

        // Wait with timeout (500ms total). A request without a timeout could
        // otherwise hold exit hostage; leaked threads die with the process.
        let deadline = Instant::now() + Duration::from_millis(500);

        let handles = std::mem::take(&mut self.handles);
        for handle in handles {
            while !handle.is_finished() {
                if Instant::now() >= deadline {
                    trace!("Shutdown timeout reached, exiting anyway");
                    return;
                }
                thread::sleep(Duration::from_millis(1));
            }
            let _ = handle.join();
        }

        trace!("All {} workers stopped gracefully", num_threads);
    }
}
