use entry::Entry;
use reduce::Reduce;
use std::fmt;
use tree;

/// A struct representing an internal node of a reducer tree.
pub struct Node<T, U, R> {
    pub entry: Entry<T, U>,
    pub priority: u64,
    pub reduced: R,
    pub left: tree::Tree<T, U, R>,
    pub right: tree::Tree<T, U, R>,
}

impl<T, U, R> Node<T, U, R>
where
    R: Reduce<T, U>,
{
    pub fn new(key: T, value: U, priority: u64) -> Self {
        let reduced = R::seed(&key, &value);
        Node {
            entry: Entry { key, value },
            priority,
            reduced,
            left: None,
            right: None,
        }
    }

    // The cached reduction must be recomputed every time a child is replaced,
    // before the node is exposed to callers. The combine order is in-order;
    // reducers need not be commutative.
    pub fn update(&mut self) {
        let Node {
            ref entry,
            ref mut reduced,
            ref left,
            ref right,
            ..
        } = *self;
        let mut new_reduced = R::seed(&entry.key, &entry.value);
        if let Some(ref left_node) = *left {
            new_reduced = left_node.reduced.combine(&new_reduced);
        }
        if let Some(ref right_node) = *right {
            new_reduced = new_reduced.combine(&right_node.reduced);
        }
        *reduced = new_reduced;
    }

    #[cfg(test)]
    pub fn with_children(
        key: T,
        value: U,
        priority: u64,
        left: tree::Tree<T, U, R>,
        right: tree::Tree<T, U, R>,
    ) -> Self {
        let mut node = Node::new(key, value, priority);
        node.left = left;
        node.right = right;
        node.update();
        node
    }
}

// Renders as `(key value priority reduced left right)` with `_` standing in
// for absent children.
impl<T, U, R> fmt::Debug for Node<T, U, R>
where
    T: fmt::Debug,
    U: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "({:?} {:?} {} {:?} ",
            self.entry.key, self.entry.value, self.priority, self.reduced
        )?;
        match self.left {
            Some(ref left_node) => write!(f, "{:?}", left_node)?,
            None => f.write_str("_")?,
        }
        f.write_str(" ")?;
        match self.right {
            Some(ref right_node) => write!(f, "{:?}", right_node)?,
            None => f.write_str("_")?,
        }
        f.write_str(")")
    }
}
