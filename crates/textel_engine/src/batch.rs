//! Row-batch scheduling.
//!
//! Work is split into contiguous batches of whole rows sized to the worker
//! count. Rows carry no data dependencies on other rows, so batches run in
//! parallel; within a row the callers stay serial (the symbol renderer's
//! wide lookback needs that).

use rayon::prelude::*;

pub(crate) fn n_actual_threads() -> usize {
    rayon::current_num_threads()
}

/// Runs `f` over a row-major buffer in parallel batches of whole rows.
/// `f` receives each batch's first row index and the batch slice. Output
/// ordering is unaffected: every batch writes only its own slice.
pub(crate) fn process_row_batches<T, F>(buf: &mut [T], row_width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    debug_assert!(row_width > 0 && buf.len() % row_width == 0);

    let n_rows = buf.len() / row_width;
    let batch_rows = n_rows.div_ceil(n_actual_threads().max(1)).max(1);

    buf.par_chunks_mut(row_width * batch_rows).enumerate().for_each(|(batch, chunk)| {
        f(batch * batch_rows, chunk);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_cover_every_row_exactly_once() {
        let width = 7;
        let mut buf = vec![0u32; width * 23];

        process_row_batches(&mut buf, width, |first_row, chunk| {
            for (i, v) in chunk.iter_mut().enumerate() {
                *v = (first_row + i / width) as u32 + 1;
            }
        });

        for (i, &v) in buf.iter().enumerate() {
            assert_eq!(v, (i / width) as u32 + 1);
        }
    }

    #[test]
    fn single_row_buffers_work() {
        let mut buf = vec![0u8; 5];
        process_row_batches(&mut buf, 5, |first_row, chunk| {
            assert_eq!(first_row, 0);
            chunk.fill(1);
        });
        assert!(buf.iter().all(|&v| v == 1));
    }
}
