//! Clinic appointment schedule library.
//!
//! Generates slot grids for a doctor's working day, selects appointments by
//! doctor, day and week, and lays them out for day and week views.

pub mod config;
pub mod dataset;
pub mod directory;
pub mod error;
pub mod filter;
pub mod layout;
pub mod mock;
pub mod models;
pub mod schedule;
pub mod slots;
pub mod time;

pub use directory::Directory;
pub use error::{ScheduleError, ScheduleResult};
pub use models::{Appointment, AppointmentType, Doctor, Patient, TimeSlot, UserRole, ViewMode, WorkingHours};
pub use schedule::{ScheduleService, ScheduleView, SlotSettings};
