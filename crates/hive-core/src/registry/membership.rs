use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::component::{Component, ComponentId, SharedComponent};

/// A registered component together with the tags captured at registration
#[derive(Clone)]
pub struct Member {
    id: ComponentId,
    type_id: TypeId,
    type_name: &'static str,
    tags: Vec<&'static str>,
    component: SharedComponent,
    // Same allocation as `component`, kept for typed lookups
    any: Arc<dyn Any + Send + Sync>,
}

impl Member {
    pub fn new<C: Component>(component: Arc<C>) -> Self {
        let any: Arc<dyn Any + Send + Sync> = component.clone();
        let tags = component.tags();
        Self {
            id: ComponentId::of(&component),
            type_id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
            tags,
            component,
            any,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn component(&self) -> &SharedComponent {
        &self.component
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn tags(&self) -> &[&'static str] {
        &self.tags
    }

    pub fn is<C: Component>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| *t == tag)
    }

    /// Typed handle to the component when it is a `C`
    pub fn downcast<C: Component>(&self) -> Option<Arc<C>> {
        if !self.is::<C>() {
            return None;
        }
        Arc::downcast::<C>(self.any.clone()).ok()
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("tags", &self.tags)
            .finish()
    }
}

/// Point-in-time copy of the membership set, iterated without any guard held
pub type Snapshot = Vec<Member>;

/// The set of registered components.
///
/// Mutations take the exclusive guard; snapshots and queries take the shared
/// guard. The guard is tokio's fair `RwLock`: waiters are served in arrival
/// order, so a stream of readers cannot starve a writer or the reverse.
/// No guard is ever held while component code runs.
#[derive(Default)]
pub struct MembershipStore {
    members: RwLock<HashMap<ComponentId, Member>>,
}

impl fmt::Debug for MembershipStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipStore").finish_non_exhaustive()
    }
}

impl MembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member. Returns `false`, leaving the set untouched, when the
    /// same reference is already present.
    pub async fn insert(&self, member: Member) -> bool {
        let mut members = self.members.write().await;
        if members.contains_key(&member.id) {
            return false;
        }
        members.insert(member.id, member);
        true
    }

    /// Remove by identity. Absent ids are a no-op returning `None`.
    pub async fn remove(&self, id: ComponentId) -> Option<Member> {
        self.members.write().await.remove(&id)
    }

    /// Empty the set, returning what it held
    pub async fn clear(&self) -> Vec<Member> {
        self.members.write().await.drain().map(|(_, member)| member).collect()
    }

    pub async fn contains(&self, id: ComponentId) -> bool {
        self.members.read().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.members.read().await.values().cloned().collect()
    }

    /// Members whose concrete type is `C`
    pub async fn query_type<C: Component>(&self) -> Vec<Arc<C>> {
        self.members
            .read()
            .await
            .values()
            .filter_map(Member::downcast::<C>)
            .collect()
    }

    /// Members registered with capability tag `tag`
    pub async fn query_tag(&self, tag: &str) -> Vec<SharedComponent> {
        self.query(|member| member.has_tag(tag)).await
    }

    /// Members accepted by `predicate`. The shared guard is held while the
    /// predicate runs, so it must not touch the registry.
    pub async fn query<P>(&self, predicate: P) -> Vec<SharedComponent>
    where
        P: Fn(&Member) -> bool,
    {
        self.members
            .read()
            .await
            .values()
            .filter(|member| predicate(member))
            .map(|member| member.component.clone())
            .collect()
    }
}
