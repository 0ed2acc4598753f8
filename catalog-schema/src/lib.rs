pub mod api;
pub mod entry;
pub mod entry_type;
pub mod interchange;

pub use api::{ApiMessage, EditResponse, LaxId, NotFoundBody, SwapRequest};
pub use entry::Entry;
pub use entry_type::{KNOWN_TYPES, TypeOption, display_label, display_rank, type_label, type_mapping};
pub use interchange::{ExportRecord, TypeValue};
