use log::{debug, warn};

use super::dom::{parse_fragment, NodeRef};

/// What a patch pass did to the live tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchStats {
    /// Candidate/live element pairs visited
    pub compared: usize,
    pub text_updates: usize,
    pub attribute_updates: usize,
    pub attributes_removed: usize,
    /// Candidate elements with no live counterpart
    pub unmatched: usize,
}

impl PatchStats {
    pub fn is_noop(&self) -> bool {
        self.text_updates == 0 && self.attribute_updates == 0 && self.attributes_removed == 0
    }
}

/// A container element of the live tree that markup is rendered into
#[derive(Debug, Clone)]
pub struct Container {
    root: NodeRef,
    prune_attributes: bool,
}

impl Container {
    pub fn new(tag: &str, class: &str) -> Self {
        let root = NodeRef::element(tag);
        if !class.is_empty() {
            root.set_attribute("class", class);
        }
        Container {
            root,
            prune_attributes: true,
        }
    }

    /// Keep attributes that only the live node has when patching.
    ///
    /// By default a patch removes them so the live node mirrors the candidate.
    pub fn keep_stale_attributes(mut self) -> Self {
        self.prune_attributes = false;
        self
    }

    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    pub fn clear(&self) {
        self.root.clear_children();
    }

    /// Discard the current children and insert `markup` wholesale
    pub fn render(&self, markup: &str) {
        self.clear();
        for node in parse_fragment(markup) {
            self.root.append_child(node);
        }
    }

    /// Patch the live children towards `markup` in place.
    ///
    /// Both trees are walked element by element in pre-order. Only text of
    /// leaf elements and attribute values are changed, so every live node
    /// keeps its identity. Extra elements on either side are not inserted or
    /// removed; a changed tree shape needs [`Container::render`].
    pub fn update(&self, markup: &str) -> PatchStats {
        let candidate = NodeRef::element("template");
        for node in parse_fragment(markup) {
            candidate.append_child(node);
        }

        let new_elements = candidate.descendant_elements();
        let live_elements = self.root.descendant_elements();
        let mut stats = PatchStats::default();

        for (new_el, live_el) in new_elements.iter().zip(&live_elements) {
            stats.compared += 1;
            if new_el.is_equal_node(live_el) {
                continue;
            }

            let new_text = new_el.text_content();
            if new_el.is_leaf_element()
                && !new_text.trim().is_empty()
                && live_el.text_content() != new_text
            {
                if live_el.set_text_content(&new_text) {
                    stats.text_updates += 1;
                } else {
                    warn!(
                        "Live <{}> has element children, not overwriting its text",
                        live_el.tag().unwrap_or_default()
                    );
                }
            }

            if new_el.is_equal_node(live_el) {
                continue;
            }
            let new_attributes = new_el.attributes();
            for (name, value) in &new_attributes {
                if live_el.set_attribute(name, value) {
                    stats.attribute_updates += 1;
                }
            }
            if self.prune_attributes {
                for (name, _) in live_el.attributes() {
                    if !new_attributes.iter().any(|(n, _)| *n == name)
                        && live_el.remove_attribute(&name)
                    {
                        stats.attributes_removed += 1;
                    }
                }
            }
        }

        if new_elements.len() != live_elements.len() {
            stats.unmatched = new_elements.len().saturating_sub(live_elements.len());
            warn!(
                "Tree shape changed during update ({} candidate vs {} live elements)",
                new_elements.len(),
                live_elements.len()
            );
        }
        debug!("Patched container: {:?}", stats);
        stats
    }

    pub fn inner_html(&self) -> String {
        self.root.inner_html()
    }

    pub fn text_content(&self) -> String {
        self.root.text_content()
    }
}
