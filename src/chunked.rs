// =============================================================================
// chunked.rs - ONE BITE AT A TIME
// =============================================================================
//
// A directory dump can run to tens of millions of rows. Every per-record
// stage in this crate walks its input through `chunked_map`: take the next
// `chunk_size` items, map them in order, append to the output, report
// progress, repeat.
//
// Chunks are strictly sequential and the output order is the input order,
// so the result is the same for any chunk size. The chunk size only decides
// how often progress is reported and how big each unit of work is.
// =============================================================================

use std::num::NonZeroUsize;

use tracing::debug;

use crate::error::Stage;

/// Map `f` over `items` in contiguous chunks of `chunk_size`.
///
/// `f` receives the item's position in the whole input (not in its chunk),
/// which is what error messages should point at. The first error aborts the
/// walk and is returned as-is.
pub fn chunked_map<I, U, E, F>(
    items: I,
    chunk_size: NonZeroUsize,
    stage: Stage,
    mut f: F,
) -> Result<Vec<U>, E>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    F: FnMut(usize, I::Item) -> Result<U, E>,
{
    let mut iter = items.into_iter();
    let total = iter.len();
    let size = chunk_size.get();
    let chunk_count = total.div_ceil(size);

    let mut out = Vec::with_capacity(total);
    for chunk in 0..chunk_count {
        let start = chunk * size;
        for (offset, item) in iter.by_ref().take(size).enumerate() {
            out.push(f(start + offset, item)?);
        }
        debug!(
            stage = %stage,
            chunk = chunk + 1,
            chunks = chunk_count,
            done = out.len(),
            total = total,
            "Chunk processed"
        );
    }

    Ok(out)
}

/// Keep the items whose mask entry is `true`, preserving order.
pub fn retain_by_mask<T>(items: Vec<T>, mask: Vec<bool>) -> Vec<T> {
    debug_assert_eq!(items.len(), mask.len(), "mask must cover every item");
    items
        .into_iter()
        .zip(mask)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}
