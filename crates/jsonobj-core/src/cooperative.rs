//! Time-sliced serializer for callers running inside a fixed per-tick budget.
//!
//! [`PrintTask`] produces exactly the same text as [`crate::printer::print`],
//! but as an explicit state machine: a stack of partially written containers
//! plus the next node to visit. Each [`PrintTask::resume`] call is one slice.
//! Before visiting a node the task checks its [`SliceBudget`]; once the slice
//! is spent it returns [`Progress::Yielded`] and picks up at the same node on
//! the next call. Every slice visits at least one node, so a task always
//! finishes.
//!
//! To abandon a print, stop calling `resume` and drop the task.
//!
//! ```
//! use jsonobj_core::{parse, print, PrintTask, Progress, SliceBudget};
//!
//! let doc = parse(r#"{"a":[1,2,3],"b":{"c":true}}"#);
//! let mut task = PrintTask::new(&doc, false).with_budget(SliceBudget::Nodes(2));
//! let text = loop {
//!     match task.resume() {
//!         Progress::Yielded => continue, // next frame
//!         Progress::Done(text) => break text,
//!     }
//! };
//! assert_eq!(text, print(&doc, false));
//! assert!(task.slices() > 1);
//! ```

use std::slice;
use std::time::{Duration, Instant};

use crate::parser::MAX_DEPTH;
use crate::printer;
use crate::value::Value;

/// Default wall-clock budget per slice.
pub const DEFAULT_SLICE: Duration = Duration::from_millis(8);

/// How much work one slice may do before yielding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceBudget {
    /// Yield once this much wall-clock time has passed since the slice began.
    Time(Duration),
    /// Yield after visiting this many nodes. Deterministic; mainly for tests.
    Nodes(usize),
}

impl Default for SliceBudget {
    fn default() -> Self {
        SliceBudget::Time(DEFAULT_SLICE)
    }
}

/// Result of one slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The slice budget ran out; call `resume` again later.
    Yielded,
    /// Serialization finished. Later calls return `Done` with an empty string.
    Done(String),
}

enum Children<'a> {
    Array(slice::Iter<'a, Value>),
    Object(slice::Iter<'a, (String, Value)>),
}

impl<'a> Children<'a> {
    fn next(&mut self) -> Option<(Option<&'a str>, &'a Value)> {
        match self {
            Children::Array(items) => items.next().map(|v| (None, v)),
            Children::Object(entries) => entries.next().map(|(k, v)| (Some(k.as_str()), v)),
        }
    }
}

/// A container whose opening bracket has been written.
struct Frame<'a> {
    children: Children<'a>,
    level: usize,
    close: char,
    wrote: bool,
}

/// Resumable serializer over a borrowed document.
pub struct PrintTask<'a> {
    pretty: bool,
    budget: SliceBudget,
    out: String,
    stack: Vec<Frame<'a>>,
    pending: Option<(&'a Value, usize)>,
    slice_started: Instant,
    visited_in_slice: usize,
    slices: usize,
}

impl<'a> PrintTask<'a> {
    pub fn new(value: &'a Value, pretty: bool) -> Self {
        Self {
            pretty,
            budget: SliceBudget::default(),
            out: String::new(),
            stack: Vec::new(),
            pending: Some((value, 0)),
            slice_started: Instant::now(),
            visited_in_slice: 0,
            slices: 0,
        }
    }

    pub fn with_budget(mut self, budget: SliceBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Number of `resume` calls that did work so far.
    pub fn slices(&self) -> usize {
        self.slices
    }

    /// Whether the task has produced its output.
    pub fn is_done(&self) -> bool {
        self.pending.is_none() && self.stack.is_empty()
    }

    /// Run one slice.
    pub fn resume(&mut self) -> Progress {
        if self.is_done() {
            return Progress::Done(std::mem::take(&mut self.out));
        }
        self.slices += 1;
        self.slice_started = Instant::now();
        self.visited_in_slice = 0;

        loop {
            if let Some((value, level)) = self.pending.take() {
                if self.slice_spent() {
                    self.pending = Some((value, level));
                    tracing::trace!(
                        slice = self.slices,
                        bytes = self.out.len(),
                        "print slice spent; yielding"
                    );
                    return Progress::Yielded;
                }
                self.visited_in_slice += 1;
                self.enter(value, level);
                continue;
            }

            let Some(frame) = self.stack.last_mut() else {
                return Progress::Done(std::mem::take(&mut self.out));
            };
            match frame.children.next() {
                Some((key, child)) => {
                    let level = frame.level + 1;
                    if level > MAX_DEPTH {
                        tracing::warn!(level, "reached max depth while printing; skipping branch");
                        continue;
                    }
                    printer::open_child(key, level, self.pretty, frame.wrote, &mut self.out);
                    frame.wrote = true;
                    self.pending = Some((child, level));
                }
                None => {
                    printer::close_container(
                        frame.close,
                        frame.level,
                        self.pretty,
                        frame.wrote,
                        &mut self.out,
                    );
                    self.stack.pop();
                }
            }
        }
    }

    /// Drive the task to completion in the current slice.
    pub fn finish(mut self) -> String {
        loop {
            if let Progress::Done(text) = self.resume() {
                return text;
            }
        }
    }

    fn slice_spent(&self) -> bool {
        if self.visited_in_slice == 0 {
            return false;
        }
        match self.budget {
            SliceBudget::Time(budget) => self.slice_started.elapsed() > budget,
            SliceBudget::Nodes(nodes) => self.visited_in_slice >= nodes,
        }
    }

    fn enter(&mut self, value: &'a Value, level: usize) {
        let (children, open, close) = match value {
            Value::Array(items) => (Children::Array(items.iter()), '[', ']'),
            Value::Object(entries) => (Children::Object(entries.iter()), '{', '}'),
            _ => {
                printer::write_scalar(value, &mut self.out);
                return;
            }
        };
        self.out.push(open);
        self.stack.push(Frame {
            children,
            level,
            close,
            wrote: false,
        });
    }
}

impl Value {
    /// Resumable counterpart of [`Value::bake`]: print this node compactly
    /// over several slices.
    ///
    /// The task borrows the node, so the bake completes in two steps: drive
    /// the task to `Done`, then hand the text to [`Value::bake_with`] once the
    /// borrow has ended.
    ///
    /// ```
    /// use jsonobj_core::{parse, Kind, Progress, SliceBudget};
    ///
    /// let mut doc = parse(r#"{"a":[1,2,3]}"#);
    /// let text = {
    ///     let mut task = doc.bake_task().with_budget(SliceBudget::Nodes(1));
    ///     loop {
    ///         if let Progress::Done(text) = task.resume() {
    ///             break text;
    ///         }
    ///     }
    /// };
    /// doc.bake_with(text);
    /// assert_eq!(doc.kind(), Kind::Baked);
    /// assert_eq!(doc.as_str(), Some(r#"{"a":[1,2,3]}"#));
    /// ```
    pub fn bake_task(&self) -> PrintTask<'_> {
        PrintTask::new(self, false)
    }

    /// Finish a resumable bake with the text its task produced.
    ///
    /// A node that is already baked keeps its text.
    pub fn bake_with(&mut self, text: String) {
        if !self.is_baked() {
            *self = Value::Baked(text);
        }
    }
}
