use std::fmt;
use std::sync::Arc;

/// Reference identity of a registered component.
///
/// Derived from the address of the `Arc` allocation, so every clone of one
/// `Arc` shares an id while two separately allocated components never do,
/// however alike their state is. An id is only meaningful while something
/// keeps the allocation alive; the registry does for as long as the component
/// is a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    pub fn of<C: ?Sized>(component: &Arc<C>) -> Self {
        ComponentId(Arc::as_ptr(component) as *const () as usize)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}
