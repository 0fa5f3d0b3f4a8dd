//! Post-generation removal of attachment nodes.
//!
//! Deleting an attachment never deletes the nodes under it: every child that is not
//! itself an attachment is first released to the world root, then the attachment node
//! is removed. The blades keep their last pose but stop following the surface.
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::host::{NodeId, NodeType, SceneGraph};

/// Which attachments to remove.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteMode {
    /// Selected attachments and attachments directly under selected nodes.
    Selected,
    /// Every attachment in the scene.
    All,
}

/// Summary of a deletion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub attachments_removed: Vec<NodeId>,
    pub children_released: Vec<NodeId>,
}

/// Attachment nodes targeted by `mode`, deduplicated and in ascending id order.
pub fn collect_attachments<S: SceneGraph + ?Sized>(scene: &S, mode: DeleteMode) -> Vec<NodeId> {
    let found: BTreeSet<NodeId> = match mode {
        DeleteMode::All => scene.list_by_type(NodeType::Attachment).into_iter().collect(),
        DeleteMode::Selected => scene
            .selection()
            .into_iter()
            .flat_map(|node| {
                if scene.node_type(node) == Some(NodeType::Attachment) {
                    vec![node]
                } else {
                    scene
                        .children(node)
                        .into_iter()
                        .filter(|c| scene.node_type(*c) == Some(NodeType::Attachment))
                        .collect()
                }
            })
            .collect(),
    };
    found.into_iter().collect()
}

/// Remove the attachments chosen by `mode`, releasing their children to the world.
pub fn delete_attachments<S: SceneGraph + ?Sized>(
    scene: &mut S,
    mode: Option<DeleteMode>,
) -> Result<DeletionReport> {
    let Some(mode) = mode else {
        warn!("No delete option selected.");
        return Err(Error::NoDeleteModeSelected);
    };

    let targets = collect_attachments(&*scene, mode);
    if targets.is_empty() {
        info!("No attachments to delete ({:?}).", mode);
        return Ok(DeletionReport::default());
    }

    let mut report = DeletionReport::default();
    for attachment in targets {
        let released = scene.unparent_children_to_world(attachment)?;
        scene.delete(attachment)?;
        report.children_released.extend(released);
        report.attachments_removed.push(attachment);
    }

    info!(
        "Deleted {} attachments, released {} children ({:?}).",
        report.attachments_removed.len(),
        report.children_released.len(),
        mode
    );
    Ok(report)
}
