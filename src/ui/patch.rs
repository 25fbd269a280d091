//! Patch planning
//!
//! Works out how to turn the element for `old` into the element for `new`
//! without touching the DOM. `dom` carries the plan out with web-sys.

use super::node::Node;

/// What happens to an element's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Text and children already match
    Keep,
    /// Replace everything with the new text
    SetText,
    /// Clear, then append every new child
    Rebuild,
    /// Walk the children in order
    Children(Vec<ChildOp>),
}

/// One step over the child list, applied in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOp {
    /// Recurse into child `i`, same tag and key
    Patch(usize),
    /// Swap child `i` for a freshly built `new.children[i]`
    Replace(usize),
    /// Drop the element currently at `i`
    Remove(usize),
    /// Build `new.children[i]` and append it
    Append(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch<'a> {
    pub set_attrs: Vec<(&'static str, &'a str)>,
    pub remove_attrs: Vec<&'static str>,
    pub content: Content,
}

pub fn plan<'a>(old: &Node, new: &'a Node) -> Patch<'a> {
    let set_attrs = new
        .attrs
        .iter()
        .filter(|(name, value)| old.get_attr(name) != Some(value.as_str()))
        .map(|(name, value)| (*name, value.as_str()))
        .collect();
    let remove_attrs = old
        .attrs
        .iter()
        .filter(|(name, _)| new.get_attr(name).is_none())
        .map(|(name, _)| *name)
        .collect();

    Patch {
        set_attrs,
        remove_attrs,
        content: plan_content(old, new),
    }
}

fn plan_content(old: &Node, new: &Node) -> Content {
    if let Some(text) = &new.text {
        return if old.text.as_ref() == Some(text) {
            Content::Keep
        } else {
            Content::SetText
        };
    }
    if old.text.is_some() {
        return Content::Rebuild;
    }

    let shared = old.children.len().min(new.children.len());
    let mut ops: Vec<ChildOp> = old
        .children
        .iter()
        .zip(&new.children)
        .enumerate()
        .map(|(i, (o, n))| {
            if o.same_shape(n) {
                ChildOp::Patch(i)
            } else {
                ChildOp::Replace(i)
            }
        })
        .collect();
    // Trailing removals always hit index `shared` as the list shrinks
    ops.extend((shared..old.children.len()).map(|_| ChildOp::Remove(shared)));
    ops.extend((shared..new.children.len()).map(ChildOp::Append));

    if ops.is_empty() {
        Content::Keep
    } else {
        Content::Children(ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Rules;
    use crate::sim::{GameState, Intent, step};
    use crate::ui::{ACTION_ATTR, Action, render};

    fn keyed(key: &str) -> Node {
        Node::div("object").key(key)
    }

    #[test]
    fn test_identical_trees_change_nothing() {
        let tree = Node::div("a").child(Node::span("b").text("x"));
        let patch = plan(&tree, &tree);
        assert!(patch.set_attrs.is_empty());
        assert!(patch.remove_attrs.is_empty());
        assert_eq!(patch.content, Content::Children(vec![ChildOp::Patch(0)]));
        assert_eq!(plan(&tree.children[0], &tree.children[0]).content, Content::Keep);
    }

    #[test]
    fn test_attr_set_and_remove() {
        let old = Node::div("object").style("top: 1%").action(Action::Find(4));
        let new = Node::div("object found").style("top: 1%");
        let patch = plan(&old, &new);
        assert_eq!(patch.set_attrs, vec![("class", "object found")]);
        assert_eq!(patch.remove_attrs, vec![ACTION_ATTR]);
    }

    #[test]
    fn test_text_changes() {
        let old = Node::div("clock").text("1:00");
        assert_eq!(plan(&old, &Node::div("clock").text("0:59")).content, Content::SetText);
        assert_eq!(plan(&old, &Node::div("clock").text("1:00")).content, Content::Keep);

        let with_children = Node::div("clock").child(Node::span("x"));
        assert_eq!(plan(&old, &with_children).content, Content::Rebuild);
        assert_eq!(plan(&with_children, &old).content, Content::SetText);
    }

    #[test]
    fn test_keyed_children_patch_or_replace() {
        let old = Node::div("scene").children([keyed("1"), keyed("2"), keyed("3")]);
        let new = Node::div("scene").children([keyed("1"), keyed("9"), keyed("3")]);
        assert_eq!(
            plan(&old, &new).content,
            Content::Children(vec![ChildOp::Patch(0), ChildOp::Replace(1), ChildOp::Patch(2)])
        );
    }

    #[test]
    fn test_shrinking_and_growing_lists() {
        let three = Node::div("list").children([keyed("1"), keyed("2"), keyed("3")]);
        let one = Node::div("list").children([keyed("1")]);
        assert_eq!(
            plan(&three, &one).content,
            Content::Children(vec![ChildOp::Patch(0), ChildOp::Remove(1), ChildOp::Remove(1)])
        );
        assert_eq!(
            plan(&one, &three).content,
            Content::Children(vec![ChildOp::Patch(0), ChildOp::Append(1), ChildOp::Append(2)])
        );
    }

    #[test]
    fn test_empty_to_empty_keeps() {
        assert_eq!(plan(&Node::div("a"), &Node::div("a")).content, Content::Keep);
    }

    #[test]
    fn test_finding_a_target_patches_scene_in_place() {
        let mut state = GameState::new(31, Rules::default());
        step(&mut state, Intent::StartGame);
        let before = render(&state);
        let id = state.targets[0].id;
        step(&mut state, Intent::ObjectClicked(id));
        let after = render(&state);

        let old_scene = before.find_class("scene").unwrap();
        let new_scene = after.find_class("scene").unwrap();
        let Content::Children(ops) = plan(old_scene, new_scene).content else {
            panic!("scene children should be walked");
        };
        assert_eq!(ops.len(), new_scene.children.len());
        assert!(ops.iter().all(|op| matches!(op, ChildOp::Patch(_))));

        let pos = new_scene
            .children
            .iter()
            .position(|n| n.key.as_deref() == Some(id.to_string().as_str()))
            .unwrap();
        let patch = plan(&old_scene.children[pos], &new_scene.children[pos]);
        assert!(patch.remove_attrs.contains(&ACTION_ATTR));
        assert!(patch.set_attrs.iter().any(|(name, _)| *name == "style"));
    }
}
