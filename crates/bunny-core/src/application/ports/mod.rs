//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `bunny-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `StubStore`: Stub lookup
//!   - `SchemaMigrator`: Applying/rolling back a type's migrations
//!   - `SeedSink`: Persisting seed records
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, SchemaMigrator, SeedSink, StubStore};

#[cfg(test)]
pub use output::{MockFilesystem, MockSchemaMigrator, MockSeedSink, MockStubStore};
