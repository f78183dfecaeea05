use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::request::RequestId;

/// Monotonic request id source. Ids are process-unique and never reused.
#[derive(Debug)]
pub struct IdGen {
    next: AtomicU64,
}

impl Default for IdGen {
    fn default() -> Self {
        IdGen {
            next: AtomicU64::new(1),
        }
    }
}

impl IdGen {
    pub fn request_id(&self) -> RequestId {
        RequestId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let ids = IdGen::default();
        let a = ids.request_id();
        let b = ids.request_id();
        assert!(a < b);
        assert_ne!(a, b);
    }
}
