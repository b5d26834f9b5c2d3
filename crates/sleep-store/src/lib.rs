//! Storage collaborators for sleep diary records.
//!
//! [`UserStore`] and [`RecordStore`] abstract the hosted auth and database
//! service. [`SupabaseClient`] talks to a real project; [`MemoryStore`] is an
//! in-memory stand-in for dry runs and tests.

pub mod error;
pub mod import;
pub mod memory;
pub mod model;
pub mod supabase;
pub mod user;

pub use error::{ImportError, Result, StoreError};
pub use import::{DEFAULT_BATCH_SIZE, ImportReport, import_batches};
pub use memory::MemoryStore;
pub use model::{RecordStore, User, UserId, UserStore};
pub use supabase::SupabaseClient;
pub use user::{
    DEFAULT_USER_EMAIL, EnsuredUser, PASSWORD_LENGTH, change_user_email, ensure_user,
    find_user_by_email, generate_password,
};
