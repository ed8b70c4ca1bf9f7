pub mod installer;
pub mod publish;
pub mod reporter;
pub mod store;
pub mod walk;

pub use installer::{InstallerError, InstallerPublisher, render_installer};
pub use publish::{ArtifactPublisher, FailurePolicy, PublishError, PublishSummary};
pub use reporter::{NullReporter, Reporter};
pub use store::{MemoryStore, ObjectStore, S3Store, StoreConfig, StoreError};
pub use walk::{ArtifactEntry, walk_artifacts};
