//! Storage Adapters
//!
//! Implementations of the FileStorage port.
//!
//! ## Available Adapters
//!
//! - **SupabaseStorage** - Supabase Storage REST API (production)
//! - **InMemoryFileStorage** - keeps objects in memory (testing/development)

mod in_memory;
mod object_path;
mod supabase;

pub use in_memory::{InMemoryFileStorage, StoredObject};
pub use supabase::{SupabaseStorage, SupabaseStorageConfig, DEFAULT_BUCKET};
