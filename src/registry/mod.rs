//! Agent Registry module.
//!
//! Holds the fixed, ordered set of content agents that fan out per
//! waypoint. Registration order defines arbitration tie-break priority:
//! when two agents tie on relevance score, the one registered earlier
//! wins. Adding or removing an agent requires no dispatcher or arbiter
//! changes.

mod error;

pub use error::RegistryError;

use std::sync::Arc;

use crate::agent::ContentAgent;

/// One registered agent with its tie-break priority.
#[derive(Clone)]
pub struct AgentEntry {
    pub name: String,
    /// Position in registration order; lower wins ties.
    pub priority: usize,
    pub agent: Arc<dyn ContentAgent>,
}

impl std::fmt::Debug for AgentEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentEntry")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

/// The ordered registry of content agents.
///
/// Built once at startup from configuration and shared immutably
/// (`Arc<AgentRegistry>`) across all concurrent waypoint units.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tourguide::agent::VideoAgent;
/// use tourguide::registry::AgentRegistry;
///
/// let mut registry = AgentRegistry::new();
/// registry.register(Arc::new(VideoAgent::new("video", 0, 0.75))).unwrap();
/// assert_eq!(registry.len(), 1);
/// assert_eq!(registry.priority_order(), vec!["video"]);
/// ```
#[derive(Default)]
pub struct AgentRegistry {
    entries: Vec<AgentEntry>,
}

impl AgentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent at the next priority position.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateAgent` if an agent with the same
    /// name is already registered.
    pub fn register(&mut self, agent: Arc<dyn ContentAgent>) -> Result<(), RegistryError> {
        let name = agent.name().to_string();
        if self.entries.iter().any(|e| e.name == name) {
            return Err(RegistryError::DuplicateAgent(name));
        }

        let priority = self.entries.len();
        self.entries.push(AgentEntry {
            name,
            priority,
            agent,
        });
        Ok(())
    }

    /// All entries in priority order.
    pub fn entries(&self) -> &[AgentEntry] {
        &self.entries
    }

    /// Agent names in tie-break priority order.
    pub fn priority_order(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Look up an agent by name.
    pub fn get(&self, name: &str) -> Option<&AgentEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
