//! Source address discovery for components
//!
//! Finds the candidate remote addresses for a component and classifies each
//! by its hosting-scheme tag. Specifications carry a set of alternative
//! addresses with an optional primary member; repositories carry exactly
//! one address.

use crate::error::{KcmError, Result};
use crate::graph::{AddressLink, AddressNode, ComponentId, ComponentKind, GraphQueryGateway};

/// Locate the candidate address links for a component
///
/// For a reusable specification, selects one member of the alternative
/// addresses set: the member flagged primary if any, otherwise the member
/// with the lowest node id so selection is reproducible. For a repository,
/// uses its single repository address.
///
/// Returns the literal links of the selected address node, in store order.
///
/// # Errors
///
/// - [`KcmError::NoAlternativeAddresses`] - specification without an
///   alternative-addresses set
/// - [`KcmError::EmptyAlternativeSet`] - the set exists but has no members
/// - [`KcmError::NoRepositoryAddress`] - repository without an address
/// - [`KcmError::NoAddressLinks`] - the selected node has no literal links
/// - [`KcmError::ClassNotFound`] - component has no downloadable kind
pub fn locate<G: GraphQueryGateway + ?Sized>(
    gateway: &G,
    id: &ComponentId,
) -> Result<Vec<AddressLink>> {
    let node = match gateway.classify(id) {
        ComponentKind::ReusableSpecification => select_alternative(gateway, id)?,
        ComponentKind::Repository => {
            gateway
                .repository_address(id)
                .ok_or_else(|| KcmError::NoRepositoryAddress {
                    id: id.to_string(),
                })?
        }
        ComponentKind::Unknown => {
            return Err(KcmError::ClassNotFound {
                id: id.to_string(),
            });
        }
    };

    let links = gateway.address_links(&node);
    if links.is_empty() {
        return Err(KcmError::NoAddressLinks {
            id: id.to_string(),
        });
    }

    Ok(links)
}

/// Select one member of the alternative addresses set
fn select_alternative<G: GraphQueryGateway + ?Sized>(
    gateway: &G,
    id: &ComponentId,
) -> Result<AddressNode> {
    let members =
        gateway
            .alternative_addresses(id)
            .ok_or_else(|| KcmError::NoAlternativeAddresses {
                id: id.to_string(),
            })?;

    if members.is_empty() {
        return Err(KcmError::EmptyAlternativeSet {
            id: id.to_string(),
        });
    }

    let selected = members
        .iter()
        .find(|m| m.primary)
        .or_else(|| members.iter().min_by(|a, b| a.id.cmp(&b.id)));

    selected.cloned().ok_or_else(|| KcmError::EmptyAlternativeSet {
        id: id.to_string(),
    })
}
