//! In-memory graph gateway backed by a YAML snapshot
//!
//! A snapshot file declares components, their classification, dependencies,
//! addresses and install scripts:
//!
//! ```yaml
//! components:
//!   kb-web:
//!     kind: reusable-specification
//!     reusable: true
//!     installation-method: local
//!     dependencies: [kb-core]
//!     addresses:
//!       - primary: true
//!         links:
//!           - url: https://github.com/example/kb-web
//!             scheme: github_url
//!     install-scripts:
//!       - "./install_deps.sh"
//! ```
//!
//! Repositories use a single `address:` entry instead of `addresses:`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{KcmError, Result};
use crate::graph::{AddressLink, AddressNode, ComponentId, ComponentKind, GraphQueryGateway};

/// Graph snapshot file contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub components: BTreeMap<String, ComponentRecord>,
}

/// One component record in the snapshot
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ComponentRecord {
    #[serde(default)]
    pub kind: KindTag,

    #[serde(default)]
    pub reusable: bool,

    pub installation_method: Option<String>,

    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Alternative addresses of a reusable component specification
    pub addresses: Option<Vec<AddressRecord>>,

    /// Single address of a repository
    pub address: Option<AddressRecord>,

    #[serde(default)]
    pub install_scripts: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KindTag {
    Repository,
    ReusableSpecification,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddressRecord {
    #[serde(default)]
    pub primary: bool,

    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LinkRecord {
    pub url: String,
    pub scheme: String,
}

/// In-memory [`GraphQueryGateway`] over a loaded snapshot
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    snapshot: GraphSnapshot,
}

impl MemoryGraph {
    pub fn new(snapshot: GraphSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| KcmError::graph_load_failed(path.display().to_string(), e.to_string()))?;
        Self::parse(&content)
            .map_err(|e| KcmError::graph_load_failed(path.display().to_string(), e.to_string()))
    }

    /// Parse a snapshot from YAML content
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let snapshot: GraphSnapshot = serde_yaml::from_str(content)?;
        Ok(Self::new(snapshot))
    }

    fn record(&self, id: &ComponentId) -> Option<&ComponentRecord> {
        self.snapshot.components.get(id.as_str())
    }

    /// Address nodes get synthetic ids derived from the component id and
    /// the member's position, so selection without a primary flag stays
    /// deterministic across calls.
    fn address_node(id: &ComponentId, index: usize, record: &AddressRecord) -> AddressNode {
        AddressNode {
            id: format!("{}/address/{}", id, index),
            primary: record.primary,
        }
    }
}

impl GraphQueryGateway for MemoryGraph {
    fn classify(&self, id: &ComponentId) -> ComponentKind {
        match self.record(id).map(|r| r.kind) {
            Some(KindTag::Repository) => ComponentKind::Repository,
            Some(KindTag::ReusableSpecification) => ComponentKind::ReusableSpecification,
            Some(KindTag::Unknown) | None => ComponentKind::Unknown,
        }
    }

    fn dependencies_of(&self, id: &ComponentId) -> Result<Vec<ComponentId>> {
        let record = self
            .record(id)
            .ok_or_else(|| KcmError::ComponentNotFound {
                id: id.to_string(),
            })?;
        Ok(record
            .dependencies
            .iter()
            .map(|d| ComponentId::new(d.clone()))
            .collect())
    }

    fn alternative_addresses(&self, id: &ComponentId) -> Option<Vec<AddressNode>> {
        let addresses = self.record(id)?.addresses.as_ref()?;
        Some(
            addresses
                .iter()
                .enumerate()
                .map(|(index, record)| Self::address_node(id, index, record))
                .collect(),
        )
    }

    fn repository_address(&self, id: &ComponentId) -> Option<AddressNode> {
        let record = self.record(id)?;
        let address = record.address.as_ref()?;
        Some(Self::address_node(id, 0, address))
    }

    fn address_links(&self, node: &AddressNode) -> Vec<AddressLink> {
        // Synthetic node ids encode the component and member index
        let Some((component, index)) = parse_node_id(&node.id) else {
            return Vec::new();
        };
        let Some(record) = self.snapshot.components.get(component) else {
            return Vec::new();
        };
        let address = match record.kind {
            KindTag::Repository => record.address.as_ref(),
            _ => record
                .addresses
                .as_ref()
                .and_then(|addresses| addresses.get(index)),
        };
        address
            .map(|a| {
                a.links
                    .iter()
                    .map(|link| AddressLink {
                        url: link.url.clone(),
                        scheme_tag: link.scheme.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_reusable(&self, id: &ComponentId) -> bool {
        self.record(id).is_some_and(|r| r.reusable)
    }

    fn installation_method(&self, id: &ComponentId) -> Option<String> {
        self.record(id)?.installation_method.clone()
    }

    fn install_scripts(&self, id: &ComponentId) -> Vec<String> {
        self.record(id)
            .map(|r| {
                r.install_scripts
                    .iter()
                    .filter(|s| !s.is_empty())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn parse_node_id(node_id: &str) -> Option<(&str, usize)> {
    let (component, index) = node_id.rsplit_once("/address/")?;
    Some((component, index.parse().ok()?))
}
