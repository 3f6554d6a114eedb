use crate::SyntaxNode;

/// Depth-first traversal over a subtree, reporting both entry and exit.
pub struct Preorder<'a> {
    start: Option<&'a SyntaxNode>,
    stack: Vec<(&'a SyntaxNode, usize)>,
}

impl<'a> Preorder<'a> {
    pub fn new(start: &'a SyntaxNode) -> Self {
        Self { start: Some(start), stack: Vec::new() }
    }

    /// Skips the children of the node that was entered last.
    pub fn skip_subtree(&mut self) {
        if let Some((node, index)) = self.stack.last_mut() {
            *index = node.children().len();
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.stack.push((start, 0));
            return Some(WalkEvent::Enter(start));
        }

        let (node, index) = self.stack.last_mut()?;
        let node = *node;
        match node.children().get(*index) {
            Some(child) => {
                *index += 1;
                self.stack.push((child, 0));
                Some(WalkEvent::Enter(child))
            }
            None => {
                self.stack.pop();
                Some(WalkEvent::Leave(node))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum WalkEvent<'a> {
    Enter(&'a SyntaxNode),
    Leave(&'a SyntaxNode),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;
    use crate::SyntaxToken;

    fn sample() -> SyntaxNode {
        let leaf = |text: &str| SyntaxNode::token(IDENT, SyntaxToken::new(text));
        SyntaxNode::new(
            CLASS,
            vec![
                SyntaxNode::new(CLASS_STATEMENT, vec![leaf("class"), leaf("A")]),
                SyntaxNode::new(CLASS_BLOCK, vec![leaf("{")]),
            ],
        )
    }

    fn trace(walk: Preorder<'_>) -> Vec<String> {
        walk.map(|event| match event {
            WalkEvent::Enter(node) => format!("+{:?}", node.kind()),
            WalkEvent::Leave(node) => format!("-{:?}", node.kind()),
        })
        .collect()
    }

    #[test]
    fn visits_every_node_twice() {
        let tree = sample();
        assert_eq!(
            trace(tree.preorder()),
            [
                "+CLASS",
                "+CLASS_STATEMENT",
                "+IDENT",
                "-IDENT",
                "+IDENT",
                "-IDENT",
                "-CLASS_STATEMENT",
                "+CLASS_BLOCK",
                "+IDENT",
                "-IDENT",
                "-CLASS_BLOCK",
                "-CLASS",
            ]
        );
    }

    #[test]
    fn skip_subtree_leaves_immediately() {
        let tree = sample();
        let mut walk = tree.preorder();
        let mut events = Vec::new();
        while let Some(event) = walk.next() {
            if let WalkEvent::Enter(node) = event {
                events.push(format!("+{:?}", node.kind()));
                if node.kind() == CLASS_STATEMENT {
                    walk.skip_subtree();
                }
            }
        }
        assert_eq!(events, ["+CLASS", "+CLASS_STATEMENT", "+CLASS_BLOCK", "+IDENT"]);
    }
}
