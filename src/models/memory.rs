/// One populated DIMM slot.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryModule {
    /// MiB-true capacity, after any dialect correction.
    pub capacity_mib: u64,
    pub kind: Option<String>,
}

impl MemoryModule {
    pub fn capacity_gib(&self) -> u64 {
        self.capacity_mib / 1024
    }
}
