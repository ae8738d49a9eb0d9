//! Domain logic - versions, entries and change-sets, independent of file and git I/O

pub mod entry;
pub mod release;
pub mod version;

pub use entry::{ChangelogEntry, EntryType, RawEntry};
pub use release::{sort_releases, RawRelease, ReleaseChanges};
pub use version::{PrereleaseRank, SortKey, UnnumberedPrerelease, Version};
