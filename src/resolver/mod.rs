//! Dependency resolution for components
//!
//! Computes the installation order for the transitive dependency closure of
//! a root component: a topological order in which every dependency appears
//! before its dependent.
//!
//! ## Algorithm
//!
//! Depth-first search with three-color marking:
//!
//! 1. **WHITE** (unvisited): component hasn't been processed
//! 2. **GRAY** (temporarily visited): component is in the current recursion stack
//! 3. **BLACK** (permanently visited): component has been fully processed
//!
//! A GRAY component reached again means a dependency cycle; resolution fails
//! without returning a partial order. Dependency sets are sorted by
//! identifier before recursion, so the order is stable across repeated calls
//! on an unchanged graph snapshot.

use std::collections::HashSet;

use crate::error::{KcmError, Result};
use crate::graph::{ComponentId, GraphQueryGateway};

/// Context for one resolution pass
struct ResolveContext<'a, G: GraphQueryGateway + ?Sized> {
    gateway: &'a G,
    /// Fully processed components (BLACK)
    visited: HashSet<ComponentId>,
    /// Components in the current recursion stack (GRAY) - for cycle detection
    in_progress: HashSet<ComponentId>,
    /// Current DFS path, used to name cycle members
    path: Vec<ComponentId>,
    /// Result in dependency order
    order: Vec<ComponentId>,
}

/// Resolve the installation order for `root` and its transitive dependencies
///
/// Returns each reachable component exactly once, dependencies before
/// dependents, the root last.
///
/// # Errors
///
/// Returns [`KcmError::CyclicDependency`] naming the cycle members if a
/// component is reachable from itself, and [`KcmError::ComponentNotFound`]
/// if a dependency edge points at a component the store does not know.
pub fn resolve<G: GraphQueryGateway + ?Sized>(
    gateway: &G,
    root: &ComponentId,
) -> Result<Vec<ComponentId>> {
    let mut ctx = ResolveContext {
        gateway,
        visited: HashSet::new(),
        in_progress: HashSet::new(),
        path: Vec::new(),
        order: Vec::new(),
    };

    visit(&mut ctx, root)?;

    Ok(ctx.order)
}

/// DFS helper with cycle detection
///
/// Post-order adds components to the result after all dependencies are
/// processed.
fn visit<G: GraphQueryGateway + ?Sized>(
    ctx: &mut ResolveContext<'_, G>,
    id: &ComponentId,
) -> Result<()> {
    // Cycle detection: component already in current path
    if ctx.in_progress.contains(id) {
        return Err(KcmError::CyclicDependency {
            chain: format_cycle(&ctx.path, id),
        });
    }

    // Already fully processed, skip
    if ctx.visited.contains(id) {
        return Ok(());
    }

    ctx.in_progress.insert(id.clone());
    ctx.path.push(id.clone());

    // Sorted for a deterministic order across calls
    let mut dependencies = ctx.gateway.dependencies_of(id)?;
    dependencies.sort();
    dependencies.dedup();

    for dependency in &dependencies {
        visit(ctx, dependency)?;
    }

    ctx.in_progress.remove(id);
    ctx.path.pop();
    ctx.visited.insert(id.clone());

    // Post-order: dependencies first
    ctx.order.push(id.clone());

    Ok(())
}

/// Format the cycle members from the DFS path, starting at the repeated
/// component and closing the loop.
fn format_cycle(path: &[ComponentId], repeated: &ComponentId) -> String {
    let start = path.iter().position(|c| c == repeated).unwrap_or(0);
    let mut members: Vec<&str> = path[start..].iter().map(ComponentId::as_str).collect();
    members.push(repeated.as_str());
    members.join(" -> ")
}
