use crate::handle::NodeId;

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) value: T,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, prev: Option<NodeId>) -> Self {
        Self {
            prev,
            next: None,
            value,
        }
    }
}
