//! DOM patching
//!
//! Keeps the page in sync with the latest view tree. Elements whose tag and
//! key still line up are updated in place so CSS transitions on scene
//! objects (the found pop) play out instead of being rebuilt away.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event};

use super::node::{ACTION_ATTR, Action, Node};
use super::patch::{ChildOp, Content, plan};

pub struct DomRenderer {
    document: Document,
    root: Element,
    current: Option<(Node, Element)>,
}

impl DomRenderer {
    /// Mount on `root`, replacing whatever it holds
    pub fn new(document: Document, root: Element) -> Self {
        root.set_text_content(None);
        Self {
            document,
            root,
            current: None,
        }
    }

    pub fn render(&mut self, tree: Node) -> Result<(), JsValue> {
        match self.current.take() {
            Some((old, el)) if old.same_shape(&tree) => {
                patch(&self.document, &el, &old, &tree)?;
                self.current = Some((tree, el));
            }
            _ => {
                let el = create(&self.document, &tree)?;
                self.root.set_text_content(None);
                self.root.append_child(&el)?;
                self.current = Some((tree, el));
            }
        }
        Ok(())
    }
}

fn create(document: &Document, node: &Node) -> Result<Element, JsValue> {
    let el = document.create_element(node.tag)?;
    for (name, value) in &node.attrs {
        el.set_attribute(name, value)?;
    }
    if let Some(text) = &node.text {
        el.set_text_content(Some(text));
    } else {
        append_children(document, &el, &node.children)?;
    }
    Ok(el)
}

fn append_children(document: &Document, el: &Element, children: &[Node]) -> Result<(), JsValue> {
    for child in children {
        let child_el = create(document, child)?;
        el.append_child(&child_el)?;
    }
    Ok(())
}

fn patch(document: &Document, el: &Element, old: &Node, new: &Node) -> Result<(), JsValue> {
    let changes = plan(old, new);
    for (name, value) in &changes.set_attrs {
        el.set_attribute(name, value)?;
    }
    for name in &changes.remove_attrs {
        el.remove_attribute(name)?;
    }

    match changes.content {
        Content::Keep => {}
        Content::SetText => el.set_text_content(new.text.as_deref()),
        Content::Rebuild => {
            el.set_text_content(None);
            append_children(document, el, &new.children)?;
        }
        Content::Children(ops) => {
            let elements = el.children();
            let nth = |i: usize| {
                elements
                    .item(i as u32)
                    .ok_or_else(|| JsValue::from_str("view tree out of sync with DOM"))
            };
            for op in ops {
                match op {
                    ChildOp::Patch(i) => {
                        let child_el = nth(i)?;
                        patch(document, &child_el, &old.children[i], &new.children[i])?;
                    }
                    ChildOp::Replace(i) => {
                        let fresh = create(document, &new.children[i])?;
                        let stale = nth(i)?;
                        el.replace_child(&fresh, &stale)?;
                    }
                    ChildOp::Remove(i) => {
                        let stale = nth(i)?;
                        el.remove_child(&stale)?;
                    }
                    ChildOp::Append(i) => {
                        let fresh = create(document, &new.children[i])?;
                        el.append_child(&fresh)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Action of the nearest `data-action` ancestor of the event target
pub fn action_from_event(event: &Event) -> Option<Action> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let el = target.closest(&format!("[{}]", ACTION_ATTR)).ok()??;
    Action::decode(&el.get_attribute(ACTION_ATTR)?)
}
