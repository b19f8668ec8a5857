//! Frame retrieval from the surface API.
//!
//! A blocking HTTP client lives on a background worker thread so the event
//! loop never waits on the network. Requests carry monotonic ids; the
//! worker always serves the newest queued request and abandons an
//! in-retry fetch the moment a newer one arrives, so a stale frame can
//! never overtake the one the user asked for last.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::surface::SurfacePayload;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("frame {frame}: gave up after {attempts} attempts")]
    Exhausted { frame: u32, attempts: u32 },
}

/// Anything that can produce the payload for a frame id. The HTTP client
/// implements this; tests substitute scripted sources.
pub trait SurfaceSource: Send {
    fn fetch(&self, frame: u32) -> Result<SurfacePayload, FetchError>;
}

/// Fixed-delay retry schedule: one initial attempt plus `retries` more,
/// each preceded by `delay`. No backoff, no jitter.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy { retries: 10, delay: Duration::from_millis(5000) }
    }
}

pub struct HttpSource {
    client: reqwest::blocking::Client,
    base: String,
}

impl HttpSource {
    pub fn new(base: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Ok(HttpSource { client, base })
    }

    pub fn frame_url(&self, frame: u32) -> String {
        format!("{}/hlist/getSurfaceById/{}", self.base, frame)
    }
}

impl SurfaceSource for HttpSource {
    /// One GET, body parsed as JSON. Error-status bodies that still parse
    /// go through as payloads; the store treats them as malformed and
    /// keeps the previous frame.
    fn fetch(&self, frame: u32) -> Result<SurfacePayload, FetchError> {
        let body = self.client.get(self.frame_url(frame)).send()?.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

pub struct FetchRequest {
    pub id: u64,
    pub frame: u32,
}

pub struct FetchResponse {
    pub id: u64,
    pub frame: u32,
    pub result: Result<SurfacePayload, FetchError>,
}

/// Handle to the background fetch thread. Dropping it closes the request
/// channel and lets the thread exit on its own.
pub struct FetchWorker {
    req_tx: Sender<FetchRequest>,
    resp_rx: Receiver<FetchResponse>,
}

impl FetchWorker {
    pub fn spawn(source: Box<dyn SurfaceSource>, policy: RetryPolicy) -> Self {
        let (req_tx, req_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        thread::spawn(move || worker_loop(source, policy, req_rx, resp_tx));
        FetchWorker { req_tx, resp_rx }
    }

    pub fn request(&self, req: FetchRequest) {
        let _ = self.req_tx.send(req);
    }

    /// Non-blocking; the event loop drains this once per redraw.
    pub fn poll(&self) -> Option<FetchResponse> {
        self.resp_rx.try_recv().ok()
    }

    /// Blocking variant with a deadline.
    pub fn wait(&self, timeout: Duration) -> Option<FetchResponse> {
        self.resp_rx.recv_timeout(timeout).ok()
    }
}

fn worker_loop(
    source: Box<dyn SurfaceSource>,
    policy: RetryPolicy,
    req_rx: Receiver<FetchRequest>,
    resp_tx: Sender<FetchResponse>,
) {
    let mut next: Option<FetchRequest> = None;
    'serve: loop {
        let mut req = match next.take() {
            Some(r) => r,
            None => match req_rx.recv() {
                Ok(r) => r,
                Err(_) => return,
            },
        };
        // Collapse a queued burst down to the newest request.
        while let Ok(newer) = req_rx.try_recv() {
            req = newer;
        }

        let mut attempt = 0u32;
        let result = loop {
            match source.fetch(req.frame) {
                Ok(payload) => break Ok(payload),
                Err(err) => {
                    if attempt >= policy.retries {
                        log::error!("frame {}: {err}", req.frame);
                        break Err(FetchError::Exhausted { frame: req.frame, attempts: attempt + 1 });
                    }
                    attempt += 1;
                    log::warn!(
                        "frame {}: fetch failed ({err}); retry {attempt}/{} in {:?}",
                        req.frame,
                        policy.retries,
                        policy.delay
                    );
                    // The retry delay doubles as the supersession window: a
                    // newer request arriving here abandons this frame.
                    match req_rx.recv_timeout(policy.delay) {
                        Ok(newer) => {
                            next = Some(newer);
                            continue 'serve;
                        }
                        Err(RecvTimeoutError::Timeout) => {}
                        Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
            }
        };
        if resp_tx.send(FetchResponse { id: req.id, frame: req.frame, result }).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    fn payload_err() -> FetchError {
        FetchError::Payload(serde_json::from_str::<SurfacePayload>("not json").unwrap_err())
    }

    struct AlwaysFails {
        calls: Arc<AtomicU32>,
    }

    impl SurfaceSource for AlwaysFails {
        fn fetch(&self, _frame: u32) -> Result<SurfacePayload, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(payload_err())
        }
    }

    struct FailsOddFrames {
        calls: Arc<AtomicU32>,
    }

    impl SurfaceSource for FailsOddFrames {
        fn fetch(&self, frame: u32) -> Result<SurfacePayload, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if frame % 2 == 1 {
                Err(payload_err())
            } else {
                Ok(SurfacePayload { surface_id: Some(frame as u64), vertices: Vec::new() })
            }
        }
    }

    #[test]
    fn success_passes_through() {
        let calls = Arc::new(AtomicU32::new(0));
        let worker = FetchWorker::spawn(
            Box::new(FailsOddFrames { calls: calls.clone() }),
            RetryPolicy { retries: 10, delay: Duration::from_millis(2) },
        );
        worker.request(FetchRequest { id: 1, frame: 4 });
        let resp = worker.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(resp.id, 1);
        assert_eq!(resp.frame, 4);
        assert_eq!(resp.result.unwrap().surface_id, Some(4));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn exhausts_after_fixed_retries_with_delays() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy { retries: 10, delay: Duration::from_millis(2) };
        let worker = FetchWorker::spawn(Box::new(AlwaysFails { calls: calls.clone() }), policy);

        let started = Instant::now();
        worker.request(FetchRequest { id: 7, frame: 3 });
        let resp = worker.wait(Duration::from_secs(5)).unwrap();
        let elapsed = started.elapsed();

        assert_eq!(calls.load(Ordering::SeqCst), 11);
        match resp.result {
            Err(FetchError::Exhausted { frame, attempts }) => {
                assert_eq!(frame, 3);
                assert_eq!(attempts, 11);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        // 10 delays of 2ms each; tolerant lower bound only.
        assert!(elapsed >= Duration::from_millis(20), "elapsed {elapsed:?}");
    }

    #[test]
    fn newer_request_supersedes_in_retry_fetch() {
        let calls = Arc::new(AtomicU32::new(0));
        let worker = FetchWorker::spawn(
            Box::new(FailsOddFrames { calls: calls.clone() }),
            RetryPolicy { retries: 10, delay: Duration::from_millis(20) },
        );

        // Frame 1 always fails, so the worker parks in its retry delay.
        worker.request(FetchRequest { id: 1, frame: 1 });
        thread::sleep(Duration::from_millis(30));
        worker.request(FetchRequest { id: 2, frame: 2 });

        let resp = worker.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(resp.id, 2, "superseded request must not answer first");
        assert!(resp.result.is_ok());
        // The abandoned frame never reports at all.
        assert!(worker.wait(Duration::from_millis(100)).is_none());
    }

    #[test]
    fn http_source_builds_endpoint_urls() {
        let source = HttpSource::new("http://surfaces.example:3000/").unwrap();
        assert_eq!(
            source.frame_url(42),
            "http://surfaces.example:3000/hlist/getSurfaceById/42"
        );
    }
}
