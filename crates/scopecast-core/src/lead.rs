//! Lead-capture handoff payload.
//!
//! The host application's contact form pre-populates its submission from
//! the last settled estimation session. This is the read-only shape it
//! receives; assembling and transporting the actual submission is the host
//! application's business.

use serde::{Deserialize, Serialize};

use crate::catalog::ServiceItem;
use crate::core_types::{EstimateResult, ProjectContext};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LeadPayload {
    /// Resolved catalog entries for the settled selection, in selection
    /// order.
    pub services: Vec<ServiceItem>,
    pub context: ProjectContext,
    pub estimate: EstimateResult,
}
