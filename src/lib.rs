#![forbid(unsafe_code)]
//! Lawslot — disponibilités d'avocats pour une plateforme de prise de rendez-vous.
//!
//! - Créneaux hebdomadaires récurrents et exceptions datées (journée entière ou plage).
//! - Détection de conflits en intervalles semi-ouverts, par jour / par date.
//! - Projection des créneaux réservables sur une semaine glissante.
//! - Stockage fichier (JSON), import CSV ; heures murales locales, sans fuseau.

pub mod access;
pub mod io;
pub mod message;
pub mod model;
pub mod slots;
pub mod storage;
pub mod validator;

pub use access::{authorize, Access, Role};
pub use message::{MessageRenderer, TextMessages};
pub use model::{Availability, DateOverride, DayOfWeek, LawyerId, RecordId, TimeOfDay, WeeklySlot};
pub use slots::{bookable_slots, BookableSlot, SlotOptions};
pub use storage::{JsonStorage, Storage};
pub use validator::{
    has_override_conflict, has_weekly_overlap, AvailabilityBook, BookError, ConflictResult,
    OverrideDraft, ValidationError, WeeklyCandidate, WeeklyDraft,
};
