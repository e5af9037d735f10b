//! # codemix
//!
//! Preprocessing and LLM annotation of code-mixed (Tamil-English) sentiment corpora.
//!
//! The corpus is first normalized into a JSON array of lines, then annotated span by span
//! through a chat completion API. Each span yields its own result file, which is then appended
//! to a master result file.
//!
//! ## Getting started
//!
//! ```sh
//! codemix 0.1.0
//! code-mixed corpus preprocessing and annotation tool.
//!
//! USAGE:
//!     codemix <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     annotate      Annotate a span of a preprocessed corpus
//!     help          Prints this message or the help of the given subcommand(s)
//!     merge         Append a chunk result file to a master result file
//!     preprocess    Normalize a column of a tab-separated corpus into a JSON array
//! ```
//!
//! ```sh
//! codemix preprocess tamil_sentiment_full.csv tamil_sentiment_preprocessed.json --column 0
//! DEEPSEEK_API_KEY=... codemix annotate tamil_sentiment_preprocessed.json results -s 1 -e 1000
//! ```
use std::time::Duration;

use codemix::client::ChatClientBuilder;
use codemix::error::Error;
use codemix::io::writer::ResultStore;
use codemix::pipelines::{AnnotatePipeline, Pipeline, Preprocess, RunReport};
use codemix::processing::merge_file;
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn annotate(opt: cli::Annotate) -> Result<(), Error> {
    let client = ChatClientBuilder::default()
        .base_url(&opt.base_url)
        .api_key(&opt.api_key)
        .model(&opt.model)
        .temperature(opt.temperature())
        .build()?;

    info!(
        "task: {}, model: {}, prompt: {:?}",
        opt.task,
        client.model(),
        opt.prompt()
    );

    let store = ResultStore::new(&opt.dst, opt.base());
    let pipeline = AnnotatePipeline::new(opt.src.clone(), store, client, opt.prompt().to_string())
        .with_span(opt.span())
        .with_checkpoint_every(opt.checkpoint_every)
        .with_delay(Duration::from_millis(opt.delay_ms));

    let report = pipeline.run()?;
    match &report {
        RunReport::Aborted => println!("No texts loaded. Exiting."),
        RunReport::Completed {
            bounds,
            processed,
            failures,
            master_total,
            elapsed,
        } => {
            println!(
                "Processed lines {} ({} texts, {} failed) into {:?}",
                bounds,
                processed,
                failures,
                pipeline.store().chunk_path(bounds)
            );
            println!(
                "Processed {} texts in {:.2} seconds",
                processed,
                elapsed.as_secs_f64()
            );
            if let Some(average) = report.average() {
                println!(
                    "Average time per text: {:.2} seconds",
                    average.as_secs_f64()
                );
            }
            if let Some(total) = master_total {
                println!(
                    "Master file {:?} now holds {} results",
                    pipeline.store().master_path(),
                    total
                );
            }
        }
    }

    if let Some(next) = report.next_span() {
        if let Some(end) = next.end() {
            println!("Next run: --start {} --end {}", next.start(), end);
        }
    }

    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Codemix::from_args();

    match opt {
        cli::Codemix::Preprocess(p) => {
            let rules = p.rules();
            let written = Preprocess::new(p.src, p.dst.clone(), p.column, p.has_header, rules).run()?;
            println!("Successfully processed {} text items to {:?}", written, p.dst);
        }
        cli::Codemix::Annotate(a) => annotate(a)?,
        cli::Codemix::Merge(m) => {
            debug!("merging {:?} into {:?}", m.chunk, m.master);
            let total = merge_file(&m.chunk, &m.master)?;
            println!("Master file {:?} now holds {} results", m.master, total);
        }
    };
    Ok(())
}
