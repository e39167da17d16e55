//! Party Domain
//!
//! This crate manages the persons that hold, benefit from, or are insured by
//! contracts, and the vehicles that single-vehicle contracts cover.
//!
//! # Legal forms
//!
//! - **Natural**: an individual identified by a birth number
//! - **Legal**: a company identified by a registration number
//!
//! The legal form is never supplied by the caller; it follows from which of
//! the two identifier formats validates.
//!
//! # Examples
//!
//! ```rust
//! use domain_party::{Person, LegalForm, Vehicle};
//!
//! let holder = Person::new("12345678").unwrap();
//! assert_eq!(holder.legal_form(), LegalForm::Legal);
//!
//! let car = Vehicle::new("AA111AA", 15_000).unwrap();
//! assert_eq!(car.original_value(), 15_000);
//! ```

pub mod party;
pub mod vehicle;
pub mod validation;
pub mod error;

pub use party::{LegalForm, Person};
pub use vehicle::Vehicle;
pub use error::PartyError;
