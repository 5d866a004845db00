//! Reconcile a persisted document with a freshly generated one
//!
//! Child elements pair up by `id`. Elements without an `id` pair by
//! generation hash first, then in order among same-named siblings that are
//! likewise generated (or likewise plain). What happens to a paired
//! original depends on its [`NodeState`].

use super::node::{NodeState, XmlDocument, XmlElement, XmlNode};
use tracing::{debug, warn};

/// Index into `original.children` for each proposed element, plus which
/// originals were claimed
fn pair_children(original: &[XmlNode], proposed: &[&XmlElement]) -> (Vec<Option<usize>>, Vec<bool>) {
    let mut consumed = vec![false; original.len()];
    let mut pairs = vec![None; proposed.len()];

    let mut claim = |pairs: &mut Vec<Option<usize>>, p: usize, accept: &dyn Fn(&XmlElement) -> bool| {
        let found = original
            .iter()
            .enumerate()
            .position(|(i, node)| !consumed[i] && node.as_element().is_some_and(accept));
        if let Some(i) = found {
            consumed[i] = true;
            pairs[p] = Some(i);
        }
    };

    for (p, element) in proposed.iter().enumerate() {
        if let Some(id) = element.id() {
            claim(&mut pairs, p, &|el| el.id() == Some(id));
        }
    }
    for (p, element) in proposed.iter().enumerate() {
        if element.id().is_none() && element.z().is_some() {
            let key = element.unique_key();
            claim(&mut pairs, p, &|el| el.id().is_none() && el.name() == element.name() && el.z() == Some(key.as_str()));
        }
    }
    for (p, element) in proposed.iter().enumerate() {
        if element.id().is_none() && pairs[p].is_none() {
            let generated = element.z().is_some();
            claim(&mut pairs, p, &|el| {
                el.id().is_none() && el.name() == element.name() && el.z().is_some() == generated
            });
        }
    }
    (pairs, consumed)
}

/// Merge `proposed` into `original`; returns whether `original` changed
pub fn compare_and_merge(original: &mut XmlDocument, proposed: &XmlDocument) -> bool {
    if original.root.name() != proposed.root.name() {
        return match original.root.state() {
            NodeState::Generated | NodeState::Container => {
                original.root = proposed.root.clone();
                original.root.stamp_unhashed();
                true
            }
            NodeState::UserManaged | NodeState::HandEdited => {
                warn!(root = original.root.name(), "keeping hand-edited root element");
                false
            }
        };
    }
    merge_element(&mut original.root, &proposed.root)
}

fn merge_element(original: &mut XmlElement, proposed: &XmlElement) -> bool {
    match original.state() {
        NodeState::UserManaged => {
            debug!(element = original.name(), id = original.id(), "user-managed, skipping");
            false
        }
        NodeState::HandEdited => {
            warn!(element = original.name(), id = original.id(), "preserving hand-edited element");
            false
        }
        NodeState::Container => merge_children(original, proposed),
        NodeState::Generated => {
            let mut changed = false;
            if original.plain_attributes() != proposed.plain_attributes() {
                let z = original.z().map(str::to_owned);
                original.attributes = proposed
                    .plain_attributes()
                    .into_iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                if let Some(z) = z {
                    original.set_attribute(super::Z_ATTRIBUTE, z);
                }
                changed = true;
            }
            if original.text().trim() != proposed.text().trim() {
                original.set_text(proposed.text());
                changed = true;
            }
            changed |= merge_children(original, proposed);

            let key = original.unique_key();
            if original.z() != Some(key.as_str()) {
                original.set_attribute(super::Z_ATTRIBUTE, key);
                changed = true;
            }
            changed
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Front,
    After(usize),
    Back,
}

fn merge_children(original: &mut XmlElement, proposed: &XmlElement) -> bool {
    let proposed_elements: Vec<&XmlElement> = proposed.elements().collect();
    let (pairs, consumed) = pair_children(&original.children, &proposed_elements);

    let mut changed = false;
    for (proposed_element, pair) in proposed_elements.iter().zip(&pairs) {
        if let Some(element) = pair.and_then(|i| original.children[i].as_element_mut()) {
            changed |= merge_element(element, proposed_element);
        }
    }

    let any_paired = pairs.iter().any(Option::is_some);
    let mut inserts: Vec<(Anchor, XmlNode)> = Vec::new();
    let mut last_paired = None;
    for (proposed_element, pair) in proposed_elements.iter().zip(&pairs) {
        match pair {
            Some(i) => last_paired = Some(*i),
            None => {
                let anchor = match last_paired {
                    Some(i) => Anchor::After(i),
                    None if any_paired => Anchor::Front,
                    None => Anchor::Back,
                };
                let mut inserted = (*proposed_element).clone();
                inserted.stamp_unhashed();
                inserts.push((anchor, XmlNode::Element(inserted)));
            }
        }
    }
    changed |= !inserts.is_empty();

    let existing = std::mem::take(&mut original.children);
    let mut merged = Vec::with_capacity(existing.len() + inserts.len());
    take_anchored(&mut merged, &mut inserts, |a| matches!(a, Anchor::Front));
    for (i, node) in existing.into_iter().enumerate() {
        let stale = !consumed[i]
            && node
                .as_element()
                .is_some_and(|el| el.state() == NodeState::Generated);
        if stale {
            debug!(
                element = node.as_element().map(XmlElement::name),
                "removing element no longer generated"
            );
            changed = true;
        } else {
            merged.push(node);
        }
        take_anchored(&mut merged, &mut inserts, |a| matches!(a, Anchor::After(j) if j == i));
    }
    take_anchored(&mut merged, &mut inserts, |a| matches!(a, Anchor::Back));
    original.children = merged;
    changed
}

fn take_anchored(
    merged: &mut Vec<XmlNode>,
    inserts: &mut Vec<(Anchor, XmlNode)>,
    wanted: impl Fn(Anchor) -> bool,
) {
    let (taken, rest): (Vec<_>, Vec<_>) = std::mem::take(inserts)
        .into_iter()
        .partition(|(anchor, _)| wanted(*anchor));
    *inserts = rest;
    merged.extend(taken.into_iter().map(|(_, node)| node));
}
