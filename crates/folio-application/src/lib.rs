//! Application layer for Folio.
//!
//! Wires configuration, knowledge content and adapters into ready-to-use
//! services for the front ends.

pub mod assistant_service;
pub mod contact_usecase;

pub use assistant_service::AssistantService;
pub use contact_usecase::ContactUseCase;
