use std::collections::VecDeque;

/// One drain step: the topic about to be dispatched and the progress to show
/// before the call goes out.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub topic: String,
    /// 1-based position of `topic` in the list.
    pub position: usize,
    pub percent: f64,
}

/// FIFO of topics drained one RPC call at a time.
///
/// Invariant: `index <= total`, and the queue is empty exactly when
/// `index == total`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportQueue {
    remaining: VecDeque<String>,
    index: usize,
    total: usize,
}

impl ExportQueue {
    pub fn new(items: Vec<String>) -> Self {
        let total = items.len();
        Self {
            remaining: items.into(),
            index: 0,
            total,
        }
    }

    /// Pops the next topic. The percentage counts only the items dispatched
    /// before this one.
    pub fn next_dispatch(&mut self) -> Option<Dispatch> {
        let topic = self.remaining.pop_front()?;
        let percent = (self.index as f64 / self.total as f64) * 100.0;
        self.index += 1;
        Some(Dispatch {
            topic,
            position: self.index,
            percent,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.index == self.total
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.remaining.iter().map(String::as_str)
    }
}
