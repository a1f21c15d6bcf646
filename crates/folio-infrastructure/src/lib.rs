//! Storage, configuration and network adapters for Folio.

pub mod config_service;
pub mod emailjs_relay;
pub mod paths;
pub mod storage;
pub mod toml_knowledge_repository;
pub mod toml_submission_ledger;

pub use crate::config_service::ConfigService;
pub use crate::emailjs_relay::EmailJsRelay;
pub use crate::paths::FolioPaths;
pub use crate::toml_knowledge_repository::TomlKnowledgeRepository;
pub use crate::toml_submission_ledger::TomlSubmissionLedger;
