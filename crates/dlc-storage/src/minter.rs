//! Fresh record references.
//!
//! References look like `/repositories/{repo}/{resources|archival_objects}/import_{hex}`.
//! The `import_` prefix marks them as batch-local: the host system swaps them for
//! permanent URIs when the batch is imported.

use dlc_model::{RecordKind, RecordRef};
use uuid::Uuid;

pub trait RefMinter {
    fn mint(&mut self, kind: RecordKind) -> RecordRef;
}

fn import_uri(repository_id: u32, kind: RecordKind, suffix: &str) -> RecordRef {
    RecordRef::new(format!(
        "/repositories/{}/{}/import_{}",
        repository_id,
        kind.collection_path(),
        suffix
    ))
}

/// Random 128-bit hex suffixes.
#[derive(Debug, Clone)]
pub struct RandomRefMinter {
    repository_id: u32,
}

impl RandomRefMinter {
    pub fn new(repository_id: u32) -> Self {
        Self { repository_id }
    }
}

impl RefMinter for RandomRefMinter {
    fn mint(&mut self, kind: RecordKind) -> RecordRef {
        let suffix = Uuid::new_v4().simple().to_string();
        import_uri(self.repository_id, kind, &suffix)
    }
}

/// Counter-based suffixes, for reproducible output.
#[derive(Debug, Clone)]
pub struct SequentialRefMinter {
    repository_id: u32,
    next: u64,
}

impl SequentialRefMinter {
    pub fn new(repository_id: u32) -> Self {
        Self {
            repository_id,
            next: 1,
        }
    }
}

impl RefMinter for SequentialRefMinter {
    fn mint(&mut self, kind: RecordKind) -> RecordRef {
        let n = self.next;
        self.next += 1;
        import_uri(self.repository_id, kind, &format!("{n:032x}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_refs_are_unique_and_well_formed() {
        let mut minter = RandomRefMinter::new(12345);
        let a = minter.mint(RecordKind::Resource);
        let b = minter.mint(RecordKind::Resource);
        assert_ne!(a, b);

        let suffix = a
            .as_str()
            .strip_prefix("/repositories/12345/resources/import_")
            .expect("resource uri prefix");
        assert_eq!(suffix.len(), 32);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn sequential_refs_count_up_across_kinds() {
        let mut minter = SequentialRefMinter::new(2);
        let first = minter.mint(RecordKind::Resource);
        let second = minter.mint(RecordKind::ArchivalObject);
        assert_eq!(
            first.as_str(),
            "/repositories/2/resources/import_00000000000000000000000000000001"
        );
        assert_eq!(
            second.as_str(),
            "/repositories/2/archival_objects/import_00000000000000000000000000000002"
        );
    }
}
