/// Arena key of a node. Ids come from a monotonically increasing counter and
/// are never handed out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);
