use crate::error::ErrorKind;
use parking_lot::RwLock;

/// Growth increment used when the configuration does not override it.
pub const MIN_BUFFER_SIZE: usize = 512;

/// Byte content of one file node together with its content lock.
///
/// Every handle opened on the node holds an `Arc<Buffer>`, so they share
/// both the bytes and the lock. Reads take the lock shared, writes
/// exclusively.
#[derive(Debug)]
pub struct Buffer {
    data: RwLock<Vec<u8>>,
    min_increment: usize,
}

impl Buffer {
    pub fn new(min_increment: usize) -> Self {
        Self {
            data: RwLock::new(Vec::new()),
            min_increment,
        }
    }

    pub fn len(&self) -> u64 {
        self.data.read().len() as u64
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Copy bytes starting at `pos` into `out`. `Ok(0)` means `pos` is at or
    /// past the end.
    pub fn read_at(&self, pos: u64, out: &mut [u8]) -> usize {
        let data = self.data.read();
        let Ok(start) = usize::try_from(pos) else {
            return 0;
        };
        if start >= data.len() {
            return 0;
        }
        let n = out.len().min(data.len() - start);
        out[..n].copy_from_slice(&data[start..start + n]);
        n
    }

    /// Write `input` at `pos`, extending the content when it runs past the
    /// end. A gap between the end and `pos` is zero-filled. On allocation
    /// failure the content is left as it was.
    pub fn write_at(&self, pos: u64, input: &[u8]) -> Result<usize, ErrorKind> {
        let start = usize::try_from(pos).map_err(|_| ErrorKind::ResourceExhausted)?;
        let end = start
            .checked_add(input.len())
            .ok_or(ErrorKind::ResourceExhausted)?;

        let mut data = self.data.write();
        if end > data.capacity() {
            let target = grown_capacity(data.capacity(), end, self.min_increment);
            let additional = target - data.len();
            data.try_reserve_exact(additional)
                .map_err(|_| ErrorKind::ResourceExhausted)?;
        }
        if end > data.len() {
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(input);
        Ok(input.len())
    }

    /// Drop all content, keeping the allocation.
    pub fn truncate(&self) {
        self.data.write().clear();
    }

    #[cfg(test)]
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.read().clone()
    }
}

/// New capacity for a buffer of `capacity` that must hold `required` bytes:
/// doubling plus `increment`, or exactly `required` when that is larger.
pub fn grown_capacity(capacity: usize, required: usize, increment: usize) -> usize {
    capacity
        .saturating_mul(2)
        .saturating_add(increment)
        .max(required)
}
