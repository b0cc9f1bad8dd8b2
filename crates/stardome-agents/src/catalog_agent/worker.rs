// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A single-threaded, FIFO background job queue.

use super::error::WorkerError;
use crossbeam_channel::{Receiver, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Default)]
struct WorkerStats {
    queued: AtomicUsize,
    in_flight: AtomicUsize,
    completed: AtomicU64,
    panicked: AtomicU64,
}

/// One background thread that runs submitted jobs one at a time, in order.
///
/// Layers that must not load concurrently share a single worker through an
/// `Arc<LoadWorker>`. Submitting never blocks; a slow job delays every job
/// queued behind it, and there is no cancellation or timeout.
///
/// Dropping the last handle (or calling [`LoadWorker::shutdown`]) stops
/// accepting jobs, lets the queued ones finish, and joins the thread.
#[derive(Debug)]
pub struct LoadWorker {
    name: String,
    sender: Mutex<Option<Sender<Job>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
    stats: Arc<WorkerStats>,
}

impl LoadWorker {
    /// Starts a worker thread called `name`.
    pub fn spawn(name: impl Into<String>) -> Result<Self, WorkerError> {
        let name = name.into();
        let (sender, receiver) = crossbeam_channel::unbounded::<Job>();
        let stats = Arc::new(WorkerStats::default());

        let thread_stats = stats.clone();
        let thread_name = name.clone();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || run(&thread_name, receiver, &thread_stats))
            .map_err(WorkerError::Spawn)?;

        log::debug!("Load worker '{}' started.", name);

        Ok(Self {
            name,
            sender: Mutex::new(Some(sender)),
            handle: Mutex::new(Some(handle)),
            stats,
        })
    }

    /// Starts a worker and wraps it for sharing between layers.
    pub fn shared(name: impl Into<String>) -> Result<Arc<Self>, WorkerError> {
        Self::spawn(name).map(Arc::new)
    }

    /// The worker thread's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queues `job` behind every job submitted before it.
    ///
    /// # Errors
    /// Returns [`WorkerError::Disconnected`] once the worker is shut down.
    pub fn submit(&self, job: impl FnOnce() + Send + 'static) -> Result<(), WorkerError> {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let sender = sender.as_ref().ok_or(WorkerError::Disconnected)?;

        self.stats.queued.fetch_add(1, Ordering::SeqCst);
        if sender.send(Box::new(job)).is_err() {
            self.stats.queued.fetch_sub(1, Ordering::SeqCst);
            return Err(WorkerError::Disconnected);
        }
        Ok(())
    }

    /// Number of jobs waiting to start.
    pub fn queued(&self) -> usize {
        self.stats.queued.load(Ordering::SeqCst)
    }

    /// Number of jobs running right now. Never more than one.
    pub fn in_flight(&self) -> usize {
        self.stats.in_flight.load(Ordering::SeqCst)
    }

    /// Number of jobs that ran to completion, including panicked ones.
    pub fn completed(&self) -> u64 {
        self.stats.completed.load(Ordering::SeqCst)
    }

    /// Number of jobs that panicked.
    pub fn panicked(&self) -> u64 {
        self.stats.panicked.load(Ordering::SeqCst)
    }

    /// Stops accepting jobs, drains the queue, and joins the thread.
    ///
    /// Calling it again, or from a job running on this worker, is a no-op
    /// apart from closing the queue.
    pub fn shutdown(&self) {
        drop(
            self.sender
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take(),
        );

        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                log::error!("Load worker '{}' terminated abnormally.", self.name);
            } else {
                log::debug!("Load worker '{}' stopped.", self.name);
            }
        }
    }
}

impl Drop for LoadWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(name: &str, receiver: Receiver<Job>, stats: &WorkerStats) {
    for job in receiver.iter() {
        stats.queued.fetch_sub(1, Ordering::SeqCst);
        stats.in_flight.fetch_add(1, Ordering::SeqCst);

        let outcome = panic::catch_unwind(AssertUnwindSafe(job));

        stats.in_flight.fetch_sub(1, Ordering::SeqCst);
        stats.completed.fetch_add(1, Ordering::SeqCst);
        if outcome.is_err() {
            stats.panicked.fetch_add(1, Ordering::SeqCst);
            log::warn!("A job on load worker '{}' panicked; continuing.", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn jobs_run_in_submission_order() {
        let worker = LoadWorker::spawn("test-order").unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done_rx) = flume::unbounded();

        for i in 0..5 {
            let order = order.clone();
            let done_tx = done_tx.clone();
            worker
                .submit(move || {
                    order.lock().unwrap().push(i);
                    done_tx.send(()).unwrap();
                })
                .unwrap();
        }

        for _ in 0..5 {
            done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn at_most_one_job_runs_at_a_time() {
        let worker = LoadWorker::spawn("test-single-flight").unwrap();
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for _ in 0..4 {
            let active = active.clone();
            let peak = peak.clone();
            worker
                .submit(move || {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(10));
                    active.fetch_sub(1, Ordering::SeqCst);
                })
                .unwrap();
        }

        worker.shutdown();
        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(worker.completed(), 4);
        assert_eq!(worker.queued(), 0);
        assert_eq!(worker.in_flight(), 0);
    }

    #[test]
    fn shutdown_drains_queue_then_rejects_jobs() {
        let worker = LoadWorker::spawn("test-shutdown").unwrap();
        let ran = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let ran = ran.clone();
            worker
                .submit(move || {
                    thread::sleep(Duration::from_millis(5));
                    ran.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }

        worker.shutdown();
        assert_eq!(ran.load(Ordering::SeqCst), 3);
        assert!(matches!(worker.submit(|| {}), Err(WorkerError::Disconnected)));

        // A second shutdown is harmless.
        worker.shutdown();
    }

    #[test]
    fn last_handle_dropped_by_its_own_job_does_not_deadlock() {
        let worker = Arc::new(LoadWorker::spawn("test-self-drop").unwrap());
        let (go_tx, go_rx) = flume::bounded::<()>(1);
        let (done_tx, done_rx) = flume::bounded(1);

        let held = worker.clone();
        worker
            .submit(move || {
                go_rx.recv().unwrap();
                // The last handle goes away on the worker thread itself.
                drop(held);
                done_tx.send(thread::current().name().map(str::to_owned)).unwrap();
            })
            .unwrap();

        drop(worker);
        go_tx.send(()).unwrap();

        let ran_on = done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(ran_on.as_deref(), Some("test-self-drop"));
    }

    #[test]
    fn panicking_job_does_not_stop_the_worker() {
        let worker = LoadWorker::spawn("test-panic").unwrap();
        let (done_tx, done_rx) = flume::bounded(1);

        worker.submit(|| panic!("decoder exploded")).unwrap();
        worker.submit(move || done_tx.send(()).unwrap()).unwrap();

        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        worker.shutdown();
        assert_eq!(worker.panicked(), 1);
        assert_eq!(worker.completed(), 2);
    }
}
