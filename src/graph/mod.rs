//! Knowledge-store data model and query gateway
//!
//! The pipeline never talks to the graph store's query language directly.
//! All reads go through the [`GraphQueryGateway`] trait, which exposes the
//! handful of typed queries the pipeline needs: component classification,
//! dependency listing, address lookup and install-script retrieval.
//!
//! ## Module Organization
//!
//! - `mod.rs`: component/address types and the gateway trait
//! - `memory.rs`: in-memory gateway backed by a YAML graph snapshot

pub mod memory;

pub use memory::MemoryGraph;

use crate::error::Result;

/// Opaque component identifier in the knowledge store
///
/// The identifier doubles as the human-readable name used for the local
/// download directory of the component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Classification of a component in the knowledge store
///
/// Determined by which classification relation links to the component.
/// Immutable once classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// A source tree hosted remotely as a whole
    Repository,
    /// A specification record describing where to obtain source material
    ReusableSpecification,
    /// No known classification relation links to the component
    Unknown,
}

/// An address node attached to a component
///
/// Members of an alternative-addresses set carry a `primary` flag; the
/// single address of a repository does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressNode {
    /// Node identifier, used for deterministic selection when no member
    /// is flagged primary
    pub id: String,
    pub primary: bool,
}

/// A literal link resolved from an address node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressLink {
    pub url: String,
    /// Hosting-scheme tag, e.g. `github_url` or `google_drive_url`
    pub scheme_tag: String,
}

/// Read-only query interface over the knowledge store
///
/// The store is the sole owner of persistent component data and is never
/// mutated through this interface.
pub trait GraphQueryGateway {
    /// Classify a component by its classification relations
    fn classify(&self, id: &ComponentId) -> ComponentKind;

    /// All components the given component directly depends on
    ///
    /// Multiple dependency-set relations are unioned.
    fn dependencies_of(&self, id: &ComponentId) -> Result<Vec<ComponentId>>;

    /// The alternative-addresses set of a specification, if one exists
    fn alternative_addresses(&self, id: &ComponentId) -> Option<Vec<AddressNode>>;

    /// The single repository address of a repository, if one exists
    fn repository_address(&self, id: &ComponentId) -> Option<AddressNode>;

    /// Literal URL links attached to an address node
    fn address_links(&self, node: &AddressNode) -> Vec<AddressLink>;

    /// Whether the component is flagged as a reusable component
    fn is_reusable(&self, id: &ComponentId) -> bool;

    /// The component's installation method, if one is declared
    fn installation_method(&self, id: &ComponentId) -> Option<String>;

    /// Ordered install scripts attached to the component
    ///
    /// Empty-content scripts are filtered out; duplicates from duplicate
    /// specification records are passed through for the installer to dedupe.
    fn install_scripts(&self, id: &ComponentId) -> Vec<String>;
}
