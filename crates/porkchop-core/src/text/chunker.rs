//! Segmentation of cleaned bill text into ordered chunks.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::bill::Chunk;
use crate::models::config::{ChunkStrategy, ChunkingConfig};

/// Default upper bound on chunk length in characters.
pub const DEFAULT_MAX_CHARS: usize = 20_000;

lazy_static! {
    static ref DIVISION_HEADING: Regex = Regex::new(r"^DIVISION\s+([A-Z]+)\b").unwrap();
    static ref TITLE_HEADING: Regex = Regex::new(r"^TITLE\s+([IVXLCDM]+)\b").unwrap();
}

/// Bill text chunker.
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChunkingConfig) -> Self {
        Self { config }
    }

    pub fn with_strategy(mut self, strategy: ChunkStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.config.max_chars = max_chars;
        self
    }

    /// Split `text` with the configured strategy.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let chunks = match self.config.strategy {
            ChunkStrategy::Size => self.by_size(text),
            ChunkStrategy::Structure => self.by_structure(text),
        };
        debug!(
            "Chunked {} chars into {} chunks ({:?})",
            text.len(),
            chunks.len(),
            self.config.strategy
        );
        chunks
    }

    /// Greedy line packing up to `max_chars`.
    pub fn by_size(&self, text: &str) -> Vec<Chunk> {
        pack_lines(text.lines(), self.config.max_chars)
            .into_iter()
            .enumerate()
            .map(|(i, body)| {
                let position = i + 1;
                Chunk::new(make_id(position, None, None, None), body, None, None, position)
            })
            .collect()
    }

    /// Split on DIVISION/TITLE headings, size-splitting oversized segments.
    pub fn by_structure(&self, text: &str) -> Vec<Chunk> {
        let mut segmenter = Segmenter::new(self.config.max_chars);

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                segmenter.push_blank();
                continue;
            }

            if let Some(caps) = DIVISION_HEADING.captures(line) {
                segmenter.flush();
                segmenter.division = Some(caps[1].to_string());
                segmenter.title = None;
            } else if let Some(caps) = TITLE_HEADING.captures(line) {
                segmenter.flush();
                segmenter.title = Some(caps[1].to_string());
            }
            segmenter.push(line);
        }

        segmenter.flush();
        segmenter.chunks
    }
}

/// Split `text` into chunks of at most `max_chars`, breaking at line boundaries.
pub fn chunk_by_size(text: &str, max_chars: usize) -> Vec<Chunk> {
    Chunker::new().with_max_chars(max_chars).by_size(text)
}

/// Split `text` on DIVISION/TITLE boundaries.
pub fn chunk_by_structure(text: &str, max_chars: usize) -> Vec<Chunk> {
    Chunker::new().with_max_chars(max_chars).by_structure(text)
}

/// Split `text` with the given strategy.
pub fn chunk_text(text: &str, strategy: ChunkStrategy, max_chars: usize) -> Vec<Chunk> {
    Chunker::new()
        .with_strategy(strategy)
        .with_max_chars(max_chars)
        .chunk(text)
}

/// Running state of the structure strategy.
struct Segmenter<'a> {
    max_chars: usize,
    division: Option<String>,
    title: Option<String>,
    pending: Vec<&'a str>,
    chunks: Vec<Chunk>,
}

impl<'a> Segmenter<'a> {
    fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            division: None,
            title: None,
            pending: Vec::new(),
            chunks: Vec::new(),
        }
    }

    fn push(&mut self, line: &'a str) {
        self.pending.push(line);
    }

    fn push_blank(&mut self) {
        if !self.pending.is_empty() {
            self.pending.push("");
        }
    }

    fn flush(&mut self) {
        trim_trailing_blanks(&mut self.pending);
        if self.pending.is_empty() {
            return;
        }

        let body = self.pending.join("\n");
        self.pending.clear();

        let division = self.division.as_deref();
        let title = self.title.as_deref();

        if body.chars().count() <= self.max_chars {
            let position = self.chunks.len() + 1;
            self.chunks.push(Chunk::new(
                make_id(position, division, title, None),
                body,
                self.division.clone(),
                self.title.clone(),
                position,
            ));
            return;
        }

        for (k, part) in pack_lines(body.lines(), self.max_chars).into_iter().enumerate() {
            let position = self.chunks.len() + 1;
            self.chunks.push(Chunk::new(
                make_id(position, division, title, Some(k + 1)),
                part,
                self.division.clone(),
                self.title.clone(),
                position,
            ));
        }
    }
}

/// Greedily pack whole lines into bodies of at most `max_chars`.
///
/// Each line costs its length plus one for the newline. A single line longer
/// than `max_chars` becomes a body of its own.
fn pack_lines<'a>(lines: impl Iterator<Item = &'a str>, max_chars: usize) -> Vec<String> {
    let mut bodies = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut size = 0;

    for line in lines {
        let blank = line.trim().is_empty();
        if blank && current.is_empty() {
            continue;
        }

        let cost = line.chars().count() + 1;
        if !current.is_empty() && size + cost > max_chars {
            close_body(&mut current, &mut bodies);
            size = 0;
            if blank {
                continue;
            }
        }

        current.push(if blank { "" } else { line });
        size += cost;
    }
    close_body(&mut current, &mut bodies);

    bodies
}

fn close_body(current: &mut Vec<&str>, bodies: &mut Vec<String>) {
    trim_trailing_blanks(current);
    if !current.is_empty() {
        bodies.push(current.join("\n"));
    }
    current.clear();
}

fn trim_trailing_blanks(lines: &mut Vec<&str>) {
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
}

fn make_id(position: usize, division: Option<&str>, title: Option<&str>, part: Option<usize>) -> String {
    let mut id = format!("{:03}", position);
    if let Some(division) = division {
        id.push_str("_div_");
        id.push_str(&division.to_lowercase());
    }
    if let Some(title) = title {
        id.push_str("_title_");
        id.push_str(&title.to_lowercase());
    }
    if let Some(part) = part {
        id.push_str(&format!("_part{}", part));
    }
    id
}
