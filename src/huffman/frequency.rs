use std::collections::BTreeMap;
use std::sync::mpsc;

use threadpool::ThreadPool;

use super::{Symbol, SymbolFrequency};

const PARALLEL_CHUNK_SIZE: usize = 64 * 1024;

/// Occurrence count of every distinct symbol of a text, ordered by symbol
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, usize>,
}

impl FrequencyTable {
    pub fn count(text: &str) -> Self {
        text.chars().collect()
    }

    /// Counts large texts in chunks on the given pool and merges the
    /// partial tables before returning.
    pub fn count_parallel(text: &str, threadpool: &ThreadPool) -> Self {
        if text.len() <= PARALLEL_CHUNK_SIZE || threadpool.max_count() < 2 {
            return Self::count(text);
        }
        let (sender, receiver) = mpsc::channel();
        let mut number_of_jobs = 0;
        for chunk in split_on_char_boundaries(text, PARALLEL_CHUNK_SIZE) {
            let sender = sender.clone();
            let chunk = chunk.to_owned();
            threadpool.execute(move || {
                let _ = sender.send(Self::count(&chunk));
            });
            number_of_jobs += 1;
        }
        drop(sender);

        let partial_tables: Vec<FrequencyTable> = receiver.iter().take(number_of_jobs).collect();
        if partial_tables.len() != number_of_jobs {
            log::warn!(
                "Only {} of {} counting jobs finished, counting sequentially",
                partial_tables.len(),
                number_of_jobs
            );
            return Self::count(text);
        }
        log::debug!("Counted symbols in {} chunks", number_of_jobs);
        partial_tables
            .into_iter()
            .fold(Self::default(), |mut total, partial| {
                total.merge(partial);
                total
            })
    }

    fn merge(&mut self, other: FrequencyTable) {
        for (symbol, count) in other.counts {
            *self.counts.entry(symbol).or_default() += count;
        }
    }

    fn increment_symbol(&mut self, symbol: Symbol) {
        *self.counts.entry(symbol).or_default() += 1;
    }

    pub fn get(&self, symbol: Symbol) -> usize {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of symbols of the counted text
    pub fn total_symbols(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = SymbolFrequency> + '_ {
        self.counts
            .iter()
            .map(|(&symbol, &frequency)| SymbolFrequency { symbol, frequency })
    }
}

impl FromIterator<Symbol> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = Symbol>>(symbols: T) -> Self {
        let mut table = Self::default();
        for symbol in symbols {
            table.increment_symbol(symbol);
        }
        table
    }
}

impl<const N: usize> From<[(Symbol, usize); N]> for FrequencyTable {
    fn from(value: [(Symbol, usize); N]) -> Self {
        let mut table = Self::default();
        for (symbol, frequency) in value.into_iter().filter(|&(_, f)| f > 0) {
            *table.counts.entry(symbol).or_default() += frequency;
        }
        table
    }
}

fn split_on_char_boundaries(text: &str, chunk_size: usize) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let mut end = chunk_size.min(rest.len());
        while !rest.is_char_boundary(end) {
            end += 1;
        }
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}
