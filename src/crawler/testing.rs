//! In-memory link graph standing in for HTTP in crawler tests, plus helpers
//! for observing concurrency and log output

use crate::crawler::fetcher::{Fetch, FetchResult, PageResult};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use url::Url;

#[derive(Debug, Default)]
pub struct GraphFetcher {
    pages: HashMap<String, Result<String, u16>>,
    panics: HashSet<String>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl Clone for GraphFetcher {
    /// Clones the graph with an empty fetch log
    fn clone(&self) -> Self {
        Self {
            pages: self.pages.clone(),
            panics: self.panics.clone(),
            fetched: Arc::default(),
        }
    }
}

impl GraphFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a 200 page whose body links to `hrefs`
    pub fn page(mut self, url: &str, hrefs: &[&str]) -> Self {
        let body = hrefs
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a>"#, href))
            .collect::<Vec<_>>()
            .join("\n");
        self.pages
            .insert(url.to_string(), Ok(format!("<html><body>{}</body></html>", body)));
        self
    }

    /// Adds a page answering with a non-200 status
    pub fn status(mut self, url: &str, status_code: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status_code));
        self
    }

    /// Makes fetching `url` panic
    pub fn panic_on(mut self, url: &str) -> Self {
        self.panics.insert(url.to_string());
        self
    }

    /// URLs fetched so far, in fetch order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn fetched_sorted(&self) -> Vec<String> {
        let mut fetched = self.fetched();
        fetched.sort();
        fetched
    }
}

impl Fetch for GraphFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = PageResult> + Send {
        self.fetched.lock().unwrap().push(url.to_string());

        if self.panics.contains(url.as_str()) {
            panic!("simulated failure fetching {}", url);
        }

        let outcome = match self.pages.get(url.as_str()) {
            Some(Ok(body)) => FetchResult::Success {
                status_code: 200,
                body: body.clone(),
            },
            Some(Err(status_code)) => FetchResult::HttpError {
                status_code: *status_code,
                reason: "Test".to_string(),
            },
            None => FetchResult::HttpError {
                status_code: 404,
                reason: "Not Found".to_string(),
            },
        };

        std::future::ready(PageResult::new(outcome, Duration::from_millis(1)))
    }
}

/// Graph fetcher whose fetches take `delay` and whose peak overlap is recorded
#[derive(Debug, Clone)]
pub struct SlowFetcher {
    graph: GraphFetcher,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl SlowFetcher {
    pub fn new(graph: GraphFetcher, delay: Duration) -> Self {
        Self {
            graph,
            delay,
            in_flight: Arc::default(),
            peak: Arc::default(),
        }
    }

    /// Highest number of fetches that were in progress at the same time
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<String> {
        self.graph.fetched()
    }
}

impl Fetch for SlowFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = PageResult> + Send {
        let page = self.graph.fetch(url);
        let in_flight = Arc::clone(&self.in_flight);
        let peak = Arc::clone(&self.peak);
        let delay = self.delay;

        async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            page.await
        }
    }
}

/// Collects formatted log lines emitted on the current thread
///
/// Only events from the installing thread are seen, so tests using it run on
/// the current-thread runtime.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes this thread's events into the capture until the guard drops
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_target(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines logged at `level` ("ERROR", "WARN", "INFO", ...)
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        let marker = format!(" {} ", level);
        self.lines()
            .into_iter()
            .filter(|line| line.contains(&marker))
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
