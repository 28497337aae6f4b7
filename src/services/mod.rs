pub mod in_memory;
pub mod initiator;
pub mod recorder;
pub mod sessions;
pub mod supabase;
pub mod transak;

pub use in_memory::InMemoryRecorder;
pub use initiator::PaymentInitiator;
pub use recorder::{TransactionRecorder, UnconfiguredRecorder};
pub use sessions::{SessionRegistry, SharedSession};
pub use supabase::SupabaseRecorder;
pub use transak::{TransakEnvironment, TransakInitiator};
