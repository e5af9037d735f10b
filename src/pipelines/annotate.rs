//! Chunked annotation pipeline
//!
//! Sends every line of a corpus span to an annotation service and stores the results.
//!
//! # Processing
//! 1. The span is loaded from the corpus. If nothing is loaded, the run is aborted and nothing is written.
//! 1. Lines are annotated one at a time, in order. A failed annotation is stored as a failure record
//!   and does not stop the run.
//! 1. A fixed delay is waited between two calls.
//! 1. Every `checkpoint_every` lines, the chunk file is overwritten with the results obtained so far,
//!   so that a killed run loses at most `checkpoint_every - 1` results.
//! 1. Once every line is annotated, the chunk file is written a last time and the chunk is
//!   appended to the master file.
//!
//! Persistence is best-effort: write errors are logged and the run goes on.
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use crate::client::Annotate;
use crate::error::Error;
use crate::io::reader::{load_span, TextItem};
use crate::io::writer::ResultStore;
use crate::pipelines::pipeline::Pipeline;
use crate::processing::merge_into_master;
use crate::record::AnnotationResult;
use crate::span::{Bounds, Span};

pub const DEFAULT_CHECKPOINT_EVERY: usize = 20;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// Nothing was loaded, nothing was annotated nor written.
    Aborted,
    Completed {
        bounds: Bounds,
        processed: usize,
        failures: usize,
        /// Number of master entries after merging, if the merge succeeded.
        master_total: Option<usize>,
        /// Wall-clock time spent loading, annotating and writing.
        elapsed: Duration,
    },
}

impl RunReport {
    /// Span to process on the next run, if this one completed.
    pub fn next_span(&self) -> Option<Span> {
        match self {
            RunReport::Completed { bounds, .. } => Some(bounds.next()),
            RunReport::Aborted => None,
        }
    }

    /// Mean time spent per processed text.
    pub fn average(&self) -> Option<Duration> {
        match self {
            RunReport::Completed {
                processed, elapsed, ..
            } if *processed > 0 => Some(elapsed.div_f64(*processed as f64)),
            _ => None,
        }
    }
}

pub struct AnnotatePipeline<A: Annotate> {
    src: PathBuf,
    span: Span,
    store: ResultStore,
    client: A,
    prompt: String,
    checkpoint_every: usize,
    delay: Duration,
}

impl<A: Annotate> AnnotatePipeline<A> {
    /// New pipeline annotating the whole corpus at `src`,
    /// with checkpoints every [DEFAULT_CHECKPOINT_EVERY] lines and [DEFAULT_DELAY] between calls.
    pub fn new(src: PathBuf, store: ResultStore, client: A, prompt: String) -> Self {
        Self {
            src,
            span: Span::all(),
            store,
            client,
            prompt,
            checkpoint_every: DEFAULT_CHECKPOINT_EVERY,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Set checkpoint frequency. `0` disables checkpoints.
    pub fn with_checkpoint_every(mut self, checkpoint_every: usize) -> Self {
        self.checkpoint_every = checkpoint_every;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Get a reference to the pipeline's result store.
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    fn is_checkpoint(&self, done: usize, total: usize) -> bool {
        self.checkpoint_every > 0 && done % self.checkpoint_every == 0 && done < total
    }

    fn persist(&self, bounds: &Bounds, results: &[AnnotationResult]) {
        if let Err(e) = self.store.write_chunk(bounds, results) {
            error!(
                "could not save {} results for {}: {}",
                results.len(),
                bounds,
                e
            );
        }
    }

    /// Annotate `items` in order, checkpointing along the way.
    fn process(&self, bounds: &Bounds, items: Vec<TextItem>) -> Vec<AnnotationResult> {
        let total = items.len();
        let mut results = Vec::with_capacity(total);

        for (idx, item) in items.into_iter().enumerate() {
            if idx > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }

            debug!(
                "annotating line {} ({}/{})",
                item.line_number(),
                idx + 1,
                total
            );
            let outcome = self.client.annotate(&self.prompt, item.text());
            let line_number = item.line_number();
            results.push(AnnotationResult::new(line_number, item.into_text(), outcome));

            let done = idx + 1;
            if done % 10 == 0 || done == total {
                info!(
                    "progress: {}/{} ({:.1}%)",
                    done,
                    total,
                    done as f64 / total as f64 * 100.0
                );
            }

            if self.is_checkpoint(done, total) {
                debug!("checkpoint after {} results", done);
                self.persist(bounds, &results);
            }
        }

        results
    }
}

impl<A: Annotate> Pipeline<RunReport> for AnnotatePipeline<A> {
    fn run(&self) -> Result<RunReport, Error> {
        let started = Instant::now();
        let items = load_span(&self.src, &self.span);

        let bounds = match (items.first(), items.last()) {
            (Some(first), Some(last)) => Bounds::new(first.line_number(), last.line_number()),
            _ => {
                warn!("no lines to process for {:?}, aborting", self.span);
                return Ok(RunReport::Aborted);
            }
        };

        self.store.init()?;
        info!(
            "processing lines {} ({} lines) into {:?}",
            bounds,
            items.len(),
            self.store.chunk_path(&bounds)
        );

        let results = self.process(&bounds, items);
        let failures = results.iter().filter(|r| r.is_failure()).count();
        if failures > 0 {
            warn!("{}/{} lines failed", failures, results.len());
        }

        self.persist(&bounds, &results);

        let master = self.store.master_path();
        let master_total = match merge_into_master(&master, &results) {
            Ok(total) => Some(total),
            Err(e) => {
                error!("could not merge into {:?}: {}", master, e);
                None
            }
        };

        Ok(RunReport::Completed {
            bounds,
            processed: results.len(),
            failures,
            master_total,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;

    use serde_json::Value;

    use super::*;
    use crate::io::writer::write_array;
    use crate::record::{Completion, Outcome};

    /// Answers with the uppercased line, fails on "x".
    struct Fake;

    impl Annotate for Fake {
        fn annotate(&self, _prompt: &str, text: &str) -> Outcome {
            if text == "x" {
                Outcome::failure("operation timed out")
            } else {
                Outcome::Success(Completion::new(text.to_uppercase()))
            }
        }
    }

    /// Records the number of results in the chunk file before each call.
    struct Spy {
        chunk: PathBuf,
        seen: RefCell<Vec<usize>>,
    }

    impl Annotate for Spy {
        fn annotate(&self, _prompt: &str, _text: &str) -> Outcome {
            let count = fs::read_to_string(&self.chunk)
                .ok()
                .and_then(|s| serde_json::from_str::<Vec<Value>>(&s).ok())
                .map_or(0, |v| v.len());
            self.seen.borrow_mut().push(count);
            Outcome::Success(Completion::new("ok".to_string()))
        }
    }

    struct Panicking;

    impl Annotate for Panicking {
        fn annotate(&self, _prompt: &str, _text: &str) -> Outcome {
            panic!("no call expected");
        }
    }

    fn corpus(dir: &Path, lines: &[&str]) -> PathBuf {
        let src = dir.join("corpus.json");
        write_array(&src, lines).unwrap();
        src
    }

    fn read(path: &Path) -> Vec<Value> {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn span_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        let src = corpus(dir.path(), &["a", "x", "c", "d", "e"]);
        let store = ResultStore::new(&dir.path().join("out"), "r");

        let p = AnnotatePipeline::new(src, store.clone(), Fake, "prompt".to_string())
            .with_span(Span::new(2, Some(4)))
            .with_delay(Duration::ZERO);
        let report = p.run().unwrap();

        match report {
            RunReport::Completed {
                bounds,
                processed,
                failures,
                master_total,
                ..
            } => {
                assert_eq!(bounds, Bounds::new(2, 4));
                assert_eq!(processed, 3);
                assert_eq!(failures, 1);
                assert_eq!(master_total, Some(3));
            }
            RunReport::Aborted => panic!("run aborted"),
        }
        assert_eq!(report.next_span(), Some(Span::new(5, Some(7))));

        let chunk = read(&store.chunk_path(&Bounds::new(2, 4)));
        let lines: Vec<u64> = chunk
            .iter()
            .map(|r| r["line_number"].as_u64().unwrap())
            .collect();
        assert_eq!(lines, vec![2, 3, 4]);

        let failed = chunk[0].as_object().unwrap();
        assert_eq!(failed["original_text"], "x");
        assert_eq!(failed["error"], "operation timed out");
        assert!(!failed.contains_key("model_response"));

        for record in &chunk[1..] {
            let obj = record.as_object().unwrap();
            assert!(obj.contains_key("model_response"));
            assert!(!obj.contains_key("error"));
        }
        assert_eq!(chunk[2]["model_response"], "D");

        assert_eq!(read(&store.master_path()), chunk);
    }

    #[test]
    fn abort_on_empty_span() {
        let dir = tempfile::tempdir().unwrap();
        let src = corpus(dir.path(), &["a", "b"]);
        let out = dir.path().join("out");
        let store = ResultStore::new(&out, "r");

        let p = AnnotatePipeline::new(src, store, Panicking, "prompt".to_string())
            .with_span(Span::new(3, None));

        assert_eq!(p.run().unwrap(), RunReport::Aborted);
        assert!(!out.exists());
    }

    #[test]
    fn elapsed_covers_delays() {
        let dir = tempfile::tempdir().unwrap();
        let src = corpus(dir.path(), &["a", "b", "c"]);
        let store = ResultStore::new(&dir.path().join("out"), "r");

        let report = AnnotatePipeline::new(src, store, Fake, "p".to_string())
            .with_delay(Duration::from_millis(20))
            .run()
            .unwrap();

        // two waits between three calls
        match report {
            RunReport::Completed { elapsed, .. } => assert!(elapsed >= Duration::from_millis(40)),
            RunReport::Aborted => panic!("run aborted"),
        }
        let average = report.average().unwrap();
        assert!(average >= Duration::from_millis(13));
        assert_eq!(RunReport::Aborted.average(), None);
    }

    #[test]
    fn abort_on_missing_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let store = ResultStore::new(&out, "r");

        let p = AnnotatePipeline::new(
            dir.path().join("missing.json"),
            store,
            Panicking,
            "prompt".to_string(),
        );

        let report = p.run().unwrap();
        assert_eq!(report, RunReport::Aborted);
        assert_eq!(report.next_span(), None);
        assert!(!out.exists());
    }

    #[test]
    fn checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        let lines: Vec<String> = (1..=7).map(|i| format!("line {}", i)).collect();
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        let src = corpus(dir.path(), &lines);
        let store = ResultStore::new(dir.path(), "r");
        let chunk = store.chunk_path(&Bounds::new(1, 7));

        let spy = Spy {
            chunk: chunk.clone(),
            seen: RefCell::new(Vec::new()),
        };
        let p = AnnotatePipeline::new(src, store, &spy, "prompt".to_string())
            .with_checkpoint_every(3)
            .with_delay(Duration::ZERO);
        p.run().unwrap();

        // file content before each call: checkpoints after the 3rd and 6th results
        assert_eq!(*spy.seen.borrow(), vec![0, 0, 0, 3, 3, 3, 6]);
        assert_eq!(read(&chunk).len(), 7);
    }

    #[test]
    fn successive_chunks_append() {
        let dir = tempfile::tempdir().unwrap();
        let src = corpus(dir.path(), &["a", "b", "c", "d", "e"]);
        let store = ResultStore::new(dir.path(), "r");

        let first = AnnotatePipeline::new(src.clone(), store.clone(), Fake, "p".to_string())
            .with_span(Span::new(1, Some(2)))
            .with_delay(Duration::ZERO);
        let next = first.run().unwrap().next_span().unwrap();
        assert_eq!(next, Span::new(3, Some(4)));

        let second = AnnotatePipeline::new(src, store.clone(), Fake, "p".to_string())
            .with_span(next)
            .with_delay(Duration::ZERO);
        let report = second.run().unwrap();

        match report {
            RunReport::Completed { master_total, .. } => assert_eq!(master_total, Some(4)),
            RunReport::Aborted => panic!("second run aborted"),
        }

        let texts: Vec<String> = read(&store.master_path())
            .iter()
            .map(|r| r["original_text"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }
}
