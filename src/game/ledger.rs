use std::cmp::Ordering;

use log::debug;

#[derive(Debug)]
struct ClueNode {
    text: String,
    left: Option<Box<ClueNode>>,
    right: Option<Box<ClueNode>>,
}

/// The clues discovered so far, kept in a binary search tree ordered by the
/// clue text. Holds each distinct text once. Not balanced.
#[derive(Debug, Default)]
pub struct ClueLedger {
    root: Option<Box<ClueNode>>,
    len: usize,
}

impl ClueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` unless an equal clue is already present.
    /// Comparison is plain case-sensitive string ordering.
    ///
    /// Returns `true` if the clue was new.
    pub fn insert(&mut self, text: &str) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match text.cmp(node.text.as_str()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    debug!("Clue already in ledger: {text}");
                    return false;
                }
            };
        }

        *slot = Some(Box::new(ClueNode {
            text: text.to_owned(),
            left: None,
            right: None,
        }));
        self.len += 1;
        debug!("Clue recorded ({} total): {text}", self.len);
        true
    }

    #[cfg(test)]
    fn contains(&self, text: &str) -> bool {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match text.cmp(node.text.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Walk the clues in ascending order. Each call starts a fresh walk.
    pub fn iter(&self) -> Clues<'_> {
        let mut clues = Clues { stack: Vec::new() };
        clues.descend_left(self.root.as_deref());
        clues
    }
}

impl Drop for ClueLedger {
    // A degenerate tree is a linked list; dropping it recursively could
    // overflow the stack.
    fn drop(&mut self) {
        let mut pending: Vec<Box<ClueNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<'a> IntoIterator for &'a ClueLedger {
    type Item = &'a str;
    type IntoIter = Clues<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`ClueLedger`].
pub struct Clues<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> Clues<'a> {
    fn descend_left(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Clues<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some(node.text.as_str())
    }
}
