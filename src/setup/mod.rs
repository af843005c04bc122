//! Setup module: wizard state, name suggestion, templates and provisioning

pub mod name_suggester;
pub mod provision;
pub mod templates;
pub mod wizard;
