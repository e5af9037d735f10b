//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use codemix::client::Task;
use codemix::span::Span;
use codemix::transformers::Rules;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "codemix",
    about = "code-mixed corpus preprocessing and annotation tool."
)]
/// Holds every command that is callable by the `codemix` command.
pub enum Codemix {
    #[structopt(about = "Normalize a column of a tab-separated corpus into a JSON array")]
    Preprocess(Preprocess),
    #[structopt(about = "Annotate a span of a preprocessed corpus")]
    Annotate(Annotate),
    #[structopt(about = "Append a chunk result file to a master result file")]
    Merge(Merge),
}

#[derive(Debug, StructOpt)]
/// Preprocess command and parameters.
///
/// ```sh
/// codemix-preprocess 0.1.0
/// Normalize a column of a tab-separated corpus into a JSON array
///
/// USAGE:
///     codemix preprocess [FLAGS] <src> <dst> --column <column>
///
/// FLAGS:
///         --has-header          the file has a header row
///         --keep-emojis         keep emojis
///         --keep-punctuation    keep repeated punctuation
///         --keep-whitespace     keep original whitespace
/// ```
pub struct Preprocess {
    #[structopt(parse(from_os_str), help = "tab-separated corpus file")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination JSON file")]
    pub dst: PathBuf,
    #[structopt(long = "column", help = "column to extract (0-based)")]
    pub column: usize,
    #[structopt(long = "has-header", help = "the file has a header row")]
    pub has_header: bool,
    #[structopt(long = "keep-emojis", help = "keep emojis")]
    pub keep_emojis: bool,
    #[structopt(long = "keep-punctuation", help = "keep repeated punctuation")]
    pub keep_punctuation: bool,
    #[structopt(long = "keep-whitespace", help = "keep original whitespace")]
    pub keep_whitespace: bool,
}

impl Preprocess {
    pub fn rules(&self) -> Rules {
        Rules {
            remove_emojis: !self.keep_emojis,
            squash_punctuation: !self.keep_punctuation,
            normalize_whitespace: !self.keep_whitespace,
        }
    }
}

#[derive(Debug, StructOpt)]
/// Annotate command and parameters.
///
/// Results are written in `<dst>/<base>_<start>_to_<end>.json`
/// and appended to `<dst>/<base>_master.json`.
pub struct Annotate {
    #[structopt(parse(from_os_str), help = "preprocessed corpus (JSON array of strings)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "result folder")]
    pub dst: PathBuf,
    #[structopt(
        short = "s",
        long = "start",
        help = "first line to process (1-based). Values below 1 mean the first line.",
        default_value = "1",
        allow_hyphen_values = true
    )]
    pub start: i64,
    #[structopt(
        short = "e",
        long = "end",
        help = "last line to process (inclusive). Default is the last line."
    )]
    pub end: Option<usize>,
    #[structopt(
        short = "t",
        long = "task",
        help = "sentiment or translate",
        default_value = "sentiment"
    )]
    pub task: Task,
    #[structopt(long = "prompt", help = "system prompt. Default depends on the task.")]
    pub prompt: Option<String>,
    #[structopt(
        long = "temperature",
        help = "sampling temperature. Default depends on the task."
    )]
    pub temperature: Option<f32>,
    #[structopt(long = "model", help = "model name", default_value = "deepseek-chat")]
    pub model: String,
    #[structopt(
        long = "base-url",
        help = "service base url",
        default_value = "https://api.deepseek.com"
    )]
    pub base_url: String,
    #[structopt(
        long = "api-key",
        help = "service API key",
        env = "DEEPSEEK_API_KEY",
        hide_env_values = true
    )]
    pub api_key: String,
    #[structopt(
        short = "c",
        long = "checkpoint-every",
        help = "save intermediate results every n lines (0 to disable)",
        default_value = "20"
    )]
    pub checkpoint_every: usize,
    #[structopt(
        long = "delay-ms",
        help = "milliseconds to wait between two calls",
        default_value = "500"
    )]
    pub delay_ms: u64,
    #[structopt(long = "base", help = "result file base name. Default depends on the task.")]
    pub base: Option<String>,
}

impl Annotate {
    pub fn span(&self) -> Span {
        Span::from_signed(self.start, self.end)
    }

    pub fn prompt(&self) -> &str {
        self.prompt
            .as_deref()
            .unwrap_or_else(|| self.task.default_prompt())
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature.or_else(|| self.task.default_temperature())
    }

    pub fn base(&self) -> &str {
        self.base
            .as_deref()
            .unwrap_or_else(|| self.task.default_base())
    }
}

#[derive(Debug, StructOpt)]
/// Merge command and parameters.
pub struct Merge {
    #[structopt(parse(from_os_str), help = "chunk result file")]
    pub chunk: PathBuf,
    #[structopt(parse(from_os_str), help = "master result file")]
    pub master: PathBuf,
}
