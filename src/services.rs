pub mod totals_service;
pub use totals_service::TotalsService;

pub mod propagation_service;
pub use propagation_service::{MappingContext, PropagationService};

pub mod draft_service;
pub use draft_service::DraftService;
