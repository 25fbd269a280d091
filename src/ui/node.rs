//! View tree
//!
//! A small element tree the screens are built from. Elements carry either
//! text or children, never both, which keeps DOM patching simple.

use std::fmt;

use crate::sim::Intent;

/// Attribute clickable elements carry
pub const ACTION_ATTR: &str = "data-action";

/// A click target, encoded into `data-action`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    ToggleMute,
    Menu,
    Find(u32),
}

impl Action {
    pub fn decode(s: &str) -> Option<Self> {
        match s {
            "start" => Some(Action::Start),
            "toggle-mute" => Some(Action::ToggleMute),
            "menu" => Some(Action::Menu),
            _ => s
                .strip_prefix("find:")
                .and_then(|id| id.parse().ok())
                .map(Action::Find),
        }
    }

    pub fn intent(self) -> Intent {
        match self {
            Action::Start => Intent::StartGame,
            Action::ToggleMute => Intent::ToggleMute,
            Action::Menu => Intent::ReturnToMenu,
            Action::Find(id) => Intent::ObjectClicked(id),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Start => f.write_str("start"),
            Action::ToggleMute => f.write_str("toggle-mute"),
            Action::Menu => f.write_str("menu"),
            Action::Find(id) => write!(f, "find:{}", id),
        }
    }
}

/// An element in the view tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub tag: &'static str,
    /// Identity among siblings; children are only patched in place when keys line up
    pub key: Option<String>,
    pub attrs: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn div(class: &str) -> Self {
        Self::new("div").class(class)
    }

    pub fn span(class: &str) -> Self {
        Self::new("span").class(class)
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn class(self, class: &str) -> Self {
        if class.is_empty() {
            self
        } else {
            self.attr("class", class)
        }
    }

    pub fn style(self, style: impl Into<String>) -> Self {
        self.attr("style", style)
    }

    pub fn action(self, action: Action) -> Self {
        self.attr(ACTION_ATTR, action.to_string())
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        debug_assert!(self.children.is_empty());
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        debug_assert!(self.text.is_none());
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        debug_assert!(self.text.is_none());
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn get_action(&self) -> Option<Action> {
        self.get_attr(ACTION_ATTR).and_then(Action::decode)
    }

    /// Same tag and key: can be patched in place
    pub fn same_shape(&self, other: &Node) -> bool {
        self.tag == other.tag && self.key == other.key
    }

    /// Depth-first search
    #[cfg(test)]
    pub(crate) fn find(&self, pred: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(pred))
    }

    /// Every node matching `pred`, depth-first
    #[cfg(test)]
    pub(crate) fn find_all<'a>(
        &'a self,
        pred: &dyn Fn(&Node) -> bool,
        out: &mut Vec<&'a Node>,
    ) {
        if pred(self) {
            out.push(self);
        }
        for child in &self.children {
            child.find_all(pred, out);
        }
    }

    #[cfg(test)]
    pub(crate) fn find_class(&self, class: &str) -> Option<&Node> {
        self.find(&|n| n.has_class(class))
    }

    /// All text below this node, concatenated
    #[cfg(test)]
    pub(crate) fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    #[cfg(test)]
    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}
