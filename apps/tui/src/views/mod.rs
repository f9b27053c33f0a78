//! Per-view orchestration: each view's slots, the real-then-mock loading
//! policy for every slot, and the upload rules of the two upload views.

pub mod biodiversity;
pub mod dashboard;
pub mod fisheries;
pub mod ocean;
pub mod slot;

pub use biodiversity::BiodiversityView;
pub use dashboard::DashboardView;
pub use fisheries::{FisheriesView, HealthPanel};
pub use ocean::OceanView;
pub use slot::{Slot, SlotState, Ticket};
