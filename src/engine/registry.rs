use std::any::{Any, TypeId};
use std::collections::BTreeMap;

/// Opaque entity id. Monotonically increasing, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u64);

/// One typed component bucket, erased behind `dyn Storage` so the registry
/// can purge an entity from every bucket without knowing the types.
trait Storage {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn remove(&mut self, id: Entity);
}

impl<T: 'static> Storage for BTreeMap<Entity, T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn remove(&mut self, id: Entity) {
        BTreeMap::remove(self, &id);
    }
}

/// Component store keyed by entity id.
///
/// Each component type lives in its own id-ordered bucket, so iteration
/// order is deterministic and `first` is the first-created entity still
/// carrying the component. At most one component per (entity, type) pair;
/// adding again replaces the previous value. Absent lookups return
/// `None`/empty rather than failing.
#[derive(Default)]
pub struct Registry {
    next_id: u64,
    storages: BTreeMap<TypeId, Box<dyn Storage>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh entity id. Ids are never handed out twice, even
    /// after the entity has been removed.
    pub fn create_id(&mut self) -> Entity {
        self.next_id += 1;
        Entity(self.next_id)
    }

    /// Attaches (or replaces) a component. Returns `&mut self` for chaining.
    pub fn add<T: 'static>(&mut self, id: Entity, component: T) -> &mut Self {
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(BTreeMap::<Entity, T>::new()));

        storage
            .as_any_mut()
            .downcast_mut::<BTreeMap<Entity, T>>()
            .expect("storage type mismatch")
            .insert(id, component);
        self
    }

    fn bucket<T: 'static>(&self) -> Option<&BTreeMap<Entity, T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any().downcast_ref::<BTreeMap<Entity, T>>())
    }

    /// Iterates all (entity, component) entries of one type, in id order.
    pub fn all<T: 'static>(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.bucket::<T>()
            .into_iter()
            .flat_map(|bucket| bucket.iter().map(|(id, c)| (*id, c)))
    }

    /// Snapshot of the ids currently carrying a component type. Systems
    /// iterate over this so entities can be removed mid-pass safely.
    pub fn ids<T: 'static>(&self) -> Vec<Entity> {
        self.bucket::<T>()
            .map(|bucket| bucket.keys().copied().collect())
            .unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn first<T: 'static>(&self) -> Option<&T> {
        self.bucket::<T>()
            .and_then(|bucket| bucket.values().next())
    }

    pub fn first_id<T: 'static>(&self) -> Option<Entity> {
        self.bucket::<T>()
            .and_then(|bucket| bucket.keys().next().copied())
    }

    pub fn has<T: 'static>(&self, id: Entity) -> bool {
        self.get::<T>(id).is_some()
    }

    pub fn get<T: 'static>(&self, id: Entity) -> Option<&T> {
        self.bucket::<T>().and_then(|bucket| bucket.get(&id))
    }

    pub fn get_mut<T: 'static>(&mut self, id: Entity) -> Option<&mut T> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.as_any_mut().downcast_mut::<BTreeMap<Entity, T>>())
            .and_then(|bucket| bucket.get_mut(&id))
    }

    /// Purges the entity from every component bucket.
    pub fn remove(&mut self, id: Entity) {
        for storage in self.storages.values_mut() {
            storage.remove(id);
        }
    }
}
