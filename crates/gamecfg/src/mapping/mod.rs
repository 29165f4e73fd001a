//! Binding parsed rows to typed or dynamic records.

mod descriptor;
mod mapper;
mod record;

pub use descriptor::{ConfigRecord, DescriptorBuilder, TypeDescriptor};
pub use mapper::{MapOutcome, RecordMapper};
pub use record::{Record, RecordCollection};
