//! Batch scanner: fixed-size chunking of an unbounded id iterator.
//!
//! [`Batches`] is lazy and non-restartable: it drains the source iterator
//! exactly once, yielding `Vec` chunks of up to `batch_size` elements in
//! source order. Order across chunks carries no meaning downstream because
//! the reduction is commutative.
//!
//! The scanner holds no transaction. The driver opens one read scope per
//! chunk around the reads that materialize that chunk's partial schema.

/// Default number of entities per chunk.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Iterator adapter yielding fixed-size chunks.
pub struct Batches<I> {
    inner: I,
    batch_size: usize,
}

impl<I: Iterator> Batches<I> {
    /// Wrap `inner`, chunking into batches of up to `batch_size`.
    ///
    /// A `batch_size` of zero is clamped to one.
    pub fn new(inner: I, batch_size: usize) -> Self {
        Batches {
            inner,
            batch_size: batch_size.max(1),
        }
    }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = Vec::new();
        for item in self.inner.by_ref().take(self.batch_size) {
            chunk.push(item);
        }
        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }
}
