//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - A fixed pool of worker tasks pulling addresses off a "work" channel and
//!   pushing one result each onto a "results" channel
//! - A single consumption loop that owns the site map and decides, per page,
//!   which discovered links become new work
//! - One short-lived dispatch task per recorded page, so the consumption loop
//!   never blocks on sending work while it should be receiving results
//! - Termination detection through the [`Frontier`] outstanding-unit count
//!
//! Both channels are zero-capacity rendezvous channels: at most one address
//! per worker is in flight at any time.

use crate::config::Config;
use crate::crawler::{build_http_client, fetch_page};
use crate::sitemap::{PageRecord, SiteMap};
use crate::state::{CrawlState, Frontier, VisitedSet};
use crate::url::{normalize, parse_seed};
use crate::SiteMapError;
use kanal::{AsyncReceiver, AsyncSender};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

/// The outcome of fetching one address, consumed exactly once by the coordinator
pub type WorkerResult = Result<PageRecord, SiteMapError>;

/// Main crawler coordinator structure
pub struct Coordinator {
    client: Client,
    workers: usize,
    state: CrawlState,
}

impl Coordinator {
    /// Creates a coordinator around an existing HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run one crawl
    /// * `Err(SiteMapError::InvalidWorkerCount)` - `workers` is zero
    pub fn new(client: Client, workers: usize) -> Result<Self, SiteMapError> {
        if workers < 1 {
            return Err(SiteMapError::InvalidWorkerCount(workers));
        }

        Ok(Self {
            client,
            workers,
            state: CrawlState::Idle,
        })
    }

    /// Creates a coordinator from configuration
    ///
    /// The worker count is checked before the HTTP client is built.
    pub fn from_config(config: &Config) -> Result<Self, SiteMapError> {
        if config.crawler.workers < 1 {
            return Err(SiteMapError::InvalidWorkerCount(config.crawler.workers));
        }

        let client = build_http_client(config)?;
        Self::new(client, config.crawler.workers)
    }

    /// Current lifecycle state
    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Crawls from `seed` until every reachable same-domain page is mapped
    ///
    /// The crawl is fail-fast: the first error any worker reports aborts it,
    /// and no partial site map is returned. A coordinator runs one crawl only.
    ///
    /// # Returns
    ///
    /// * `Ok(SiteMap)` - One record per distinct page, in consumption order
    /// * `Err(SiteMapError)` - The first fetch, parse or URL error encountered
    pub async fn run(&mut self, seed: Url) -> Result<SiteMap, SiteMapError> {
        self.state.transition(CrawlState::Running)?;

        let seed = normalize(&seed);
        let start_time = Instant::now();
        tracing::info!(
            "Creating site map for {} with {} workers...",
            seed,
            self.workers
        );

        let (work_tx, work_rx) = kanal::bounded_async::<Url>(0);
        let (result_tx, result_rx) = kanal::bounded_async::<WorkerResult>(0);

        let mut workers = JoinSet::new();
        for id in 0..self.workers {
            workers.spawn(run_worker(
                id,
                self.client.clone(),
                work_rx.clone(),
                result_tx.clone(),
            ));
        }
        // Workers hold the only remaining handles
        drop(work_rx);
        drop(result_tx);

        let mut crawl = CrawlRun::new(work_tx.clone());
        let outcome = crawl.process_pages(seed, &result_rx, &mut workers).await;

        let _ = work_tx.close();
        let _ = result_rx.close();

        match outcome {
            Ok(()) => {
                while let Some(joined) = workers.join_next().await {
                    if let Err(e) = joined {
                        tracing::warn!("Worker did not shut down cleanly: {}", e);
                    }
                }

                self.state.transition(CrawlState::Completed)?;
                let site_map = crawl.into_site_map();
                tracing::info!(
                    "Site map completed: {} pages mapped in {:?}",
                    site_map.len(),
                    start_time.elapsed()
                );
                Ok(site_map)
            }
            Err(e) => {
                workers.abort_all();
                self.state.transition(CrawlState::Failed)?;
                tracing::warn!("Crawl failed after {:?}: {}", start_time.elapsed(), e);
                Err(e)
            }
        }
    }
}

/// State owned by a single crawl's consumption loop
struct CrawlRun {
    work_tx: AsyncSender<Url>,
    visited: Arc<VisitedSet>,
    frontier: Arc<Frontier>,
    recorded: HashSet<String>,
    site_map: SiteMap,
}

impl CrawlRun {
    fn new(work_tx: AsyncSender<Url>) -> Self {
        Self {
            work_tx,
            visited: Arc::new(VisitedSet::new()),
            frontier: Arc::new(Frontier::new()),
            recorded: HashSet::new(),
            site_map: SiteMap::new(),
        }
    }

    /// Consumes worker results until the frontier drains or an error arrives
    async fn process_pages(
        &mut self,
        seed: Url,
        results: &AsyncReceiver<WorkerResult>,
        workers: &mut JoinSet<()>,
    ) -> Result<(), SiteMapError> {
        self.frontier.add(1);
        self.spawn_dispatch(vec![seed]);

        loop {
            tokio::select! {
                biased;

                received = results.recv() => {
                    let result = received.map_err(|_| {
                        SiteMapError::Worker("result channel closed before the crawl finished".to_string())
                    })?;
                    self.handle_page(result?);
                }

                _ = self.frontier.drained() => break,

                Some(joined) = workers.join_next() => {
                    // Workers only exit once the work channel closes
                    let reason = match joined {
                        Err(e) => e.to_string(),
                        Ok(()) => "worker exited early".to_string(),
                    };
                    return Err(SiteMapError::Worker(reason));
                }
            }
        }

        Ok(())
    }

    /// Records a fetched page and turns its links into new work
    fn handle_page(&mut self, page: PageRecord) {
        if !self.recorded.insert(page.url.as_str().to_string()) {
            tracing::debug!("Already mapped {}, retiring duplicate", page.url);
            self.frontier.retire();
            return;
        }

        tracing::debug!(
            "Processed {} ({} links, {} assets)",
            page.url,
            page.links.len(),
            page.assets.len()
        );
        self.visited.insert(&page.url);

        // Open the link units before retiring this page's own unit
        let links = page.links.clone();
        self.frontier.add(links.len());
        self.frontier.retire();
        self.site_map.pages.push(page);

        if self.site_map.len() % 50 == 0 {
            tracing::info!(
                "Progress: {} pages mapped, {} units outstanding",
                self.site_map.len(),
                self.frontier.outstanding()
            );
        }

        if !links.is_empty() {
            self.spawn_dispatch(links);
        }
    }

    fn spawn_dispatch(&self, links: Vec<Url>) {
        tokio::spawn(dispatch_links(
            links,
            self.work_tx.clone(),
            Arc::clone(&self.visited),
            Arc::clone(&self.frontier),
        ));
    }

    fn into_site_map(self) -> SiteMap {
        self.site_map
    }
}

/// Pulls addresses off the work channel until it closes
async fn run_worker(
    id: usize,
    client: Client,
    work: AsyncReceiver<Url>,
    results: AsyncSender<WorkerResult>,
) {
    while let Ok(url) = work.recv().await {
        let result = fetch_page(&client, &url).await;
        if results.send(result).await.is_err() {
            break;
        }
    }
    tracing::trace!("Worker {} exiting", id);
}

/// Hands each not-yet-visited link to the workers, retiring the rest
///
/// Every link arrives with one outstanding unit already opened for it.
async fn dispatch_links(
    links: Vec<Url>,
    work: AsyncSender<Url>,
    visited: Arc<VisitedSet>,
    frontier: Arc<Frontier>,
) {
    for link in links {
        if !visited.insert(&link) {
            frontier.retire();
            continue;
        }

        tracing::trace!("Dispatching {}", link);
        if work.send(link).await.is_err() {
            // The crawl is over; nobody is waiting for this unit anymore
            return;
        }
    }
}

/// Returns a complete site map starting from `seed`
///
/// The number of workers crawling the domain is `workers`; it is validated
/// before the seed is even parsed, so an invalid count performs no network
/// activity.
///
/// # Example
///
/// ```no_run
/// use site_mapper::create_site_map;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let site_map = create_site_map("https://example.com", 8).await?;
/// println!("{} pages", site_map.len());
/// # Ok(())
/// # }
/// ```
pub async fn create_site_map(seed: &str, workers: usize) -> Result<SiteMap, SiteMapError> {
    let mut config = Config::default();
    config.crawler.workers = workers;
    create_site_map_with_config(seed, &config).await
}

/// Same as [`create_site_map`], with client settings taken from `config`
pub async fn create_site_map_with_config(
    seed: &str,
    config: &Config,
) -> Result<SiteMap, SiteMapError> {
    if config.crawler.workers < 1 {
        return Err(SiteMapError::InvalidWorkerCount(config.crawler.workers));
    }

    let seed = parse_seed(seed)?;
    let mut coordinator = Coordinator::from_config(config)?;
    coordinator.run(seed).await
}
