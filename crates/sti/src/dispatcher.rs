//! Event dispatcher - per-model observers, global scopes and boot tracking
//!
//! Models are booted lazily, once per dispatcher, the first time a query or
//! create flow touches them. A model's `boot` must not boot other models on
//! the same dispatcher.

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::StiConfig;
use crate::error::StiResult;
use crate::event_error::EventError;
use crate::events::ModelObserver;
use crate::model::Model;
use crate::query::{GlobalScope, QueryBuilder};

pub struct ObserverRegistry<T: Send + Sync> {
    observers: Vec<Arc<dyn ModelObserver<T>>>,
}

impl<T: Send + Sync> ObserverRegistry<T> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn register(&mut self, observer: Arc<dyn ModelObserver<T>>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub async fn trigger_creating(&self, model: &mut T) -> Result<(), EventError> {
        for observer in &self.observers {
            observer.creating(model).await?;
        }
        Ok(())
    }

    pub async fn trigger_created(&self, model: &T) -> Result<(), EventError> {
        for observer in &self.observers {
            observer.created(model).await?;
        }
        Ok(())
    }

    pub async fn trigger_saving(&self, model: &mut T) -> Result<(), EventError> {
        for observer in &self.observers {
            observer.saving(model).await?;
        }
        Ok(())
    }

    pub async fn trigger_saved(&self, model: &T) -> Result<(), EventError> {
        for observer in &self.observers {
            observer.saved(model).await?;
        }
        Ok(())
    }
}

impl<T: Send + Sync> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> Clone for ObserverRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            observers: self.observers.clone(),
        }
    }
}

struct ModelHooks<T: Send + Sync> {
    observers: ObserverRegistry<T>,
    scopes: Vec<Arc<dyn GlobalScope<T>>>,
}

impl<T: Send + Sync> ModelHooks<T> {
    fn new() -> Self {
        Self {
            observers: ObserverRegistry::new(),
            scopes: Vec::new(),
        }
    }
}

impl<T: Send + Sync> Clone for ModelHooks<T> {
    fn clone(&self) -> Self {
        Self {
            observers: self.observers.clone(),
            scopes: self.scopes.clone(),
        }
    }
}

/// Routes lifecycle events and global scopes to the models that registered them
pub struct EventDispatcher {
    config: StiConfig,
    hooks: DashMap<TypeId, Box<dyn Any + Send + Sync>>,
    booted: Mutex<HashSet<TypeId>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::with_config(crate::config::global().clone())
    }

    pub fn with_config(config: StiConfig) -> Self {
        Self {
            config,
            hooks: DashMap::new(),
            booted: Mutex::new(HashSet::new()),
        }
    }

    pub fn config(&self) -> &StiConfig {
        &self.config
    }

    fn with_hooks<T, R>(&self, f: impl FnOnce(&mut ModelHooks<T>) -> R) -> Option<R>
    where
        T: Send + Sync + 'static,
    {
        let mut entry = self
            .hooks
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ModelHooks::<T>::new()));
        (**entry.value_mut()).downcast_mut::<ModelHooks<T>>().map(f)
    }

    // Cloned so no map guard is held across observer awaits
    fn snapshot<T: Send + Sync + 'static>(&self) -> Option<ModelHooks<T>> {
        let entry = self.hooks.get(&TypeId::of::<T>())?;
        (**entry.value()).downcast_ref::<ModelHooks<T>>().cloned()
    }

    /// Register an observer for model `T`
    pub fn observe<T: Send + Sync + 'static>(&self, observer: Arc<dyn ModelObserver<T>>) {
        self.with_hooks::<T, _>(|hooks| hooks.observers.register(observer));
    }

    /// Register a global scope for model `T`, replacing any scope with the same name
    pub fn add_global_scope<T: Send + Sync + 'static>(&self, scope: Arc<dyn GlobalScope<T>>) {
        self.with_hooks::<T, _>(|hooks| {
            hooks.scopes.retain(|existing| existing.name() != scope.name());
            hooks.scopes.push(scope);
        });
    }

    pub fn observer_count<T: Send + Sync + 'static>(&self) -> usize {
        self.snapshot::<T>()
            .map(|hooks| hooks.observers.observer_count())
            .unwrap_or(0)
    }

    pub fn global_scope_names<T: Send + Sync + 'static>(&self) -> Vec<String> {
        self.snapshot::<T>()
            .map(|hooks| hooks.scopes.iter().map(|s| s.name().to_string()).collect())
            .unwrap_or_default()
    }

    /// Run `M::boot` unless it already ran on this dispatcher
    pub fn boot<M: Model>(&self) -> StiResult<()> {
        let type_id = TypeId::of::<M>();
        let mut booted = self.booted.lock().unwrap_or_else(PoisonError::into_inner);
        if booted.contains(&type_id) {
            return Ok(());
        }

        M::boot(self)?;
        booted.insert(type_id);
        tracing::debug!(model = M::type_name(), "Booted model");
        Ok(())
    }

    pub fn is_booted<M: Model>(&self) -> bool {
        self.booted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&TypeId::of::<M>())
    }

    /// Apply every global scope registered for `M`
    pub fn apply_global_scopes<M>(&self, mut query: QueryBuilder<M>) -> StiResult<QueryBuilder<M>>
    where
        M: Send + Sync + 'static,
    {
        if let Some(hooks) = self.snapshot::<M>() {
            for scope in &hooks.scopes {
                query = query.with_global_scope(&**scope)?;
            }
        }
        Ok(query)
    }

    /// Start a SELECT against the model's table with its global scopes applied
    pub fn query<M: Model>(&self) -> StiResult<QueryBuilder<M>> {
        self.boot::<M>()?;
        let query = QueryBuilder::new().from(&M::table_name()?);
        self.apply_global_scopes(query)
    }

    /// Run the `creating` and `saving` hooks and build the INSERT for a new row
    pub async fn create<M: Model>(&self, model: &mut M) -> StiResult<QueryBuilder<M>> {
        self.boot::<M>()?;
        if let Some(hooks) = self.snapshot::<M>() {
            // creating -> saving
            hooks.observers.trigger_creating(model).await?;
            hooks.observers.trigger_saving(model).await?;
        }

        let table = M::table_name()?;
        Ok(QueryBuilder::new()
            .insert_into(&table)
            .set_values(model.attributes().clone()))
    }

    /// Run the `saved` and `created` hooks once the INSERT has been executed
    pub async fn finish_create<M: Model>(&self, model: &M) -> StiResult<()> {
        if let Some(hooks) = self.snapshot::<M>() {
            // saved -> created
            hooks.observers.trigger_saved(model).await?;
            hooks.observers.trigger_created(model).await?;
        }
        Ok(())
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

static DISPATCHER: OnceCell<Arc<EventDispatcher>> = OnceCell::new();

/// The dispatcher attached to this process, if any
pub fn event_dispatcher() -> Option<Arc<EventDispatcher>> {
    DISPATCHER.get().cloned()
}

/// Attach an application dispatcher; fails if one is already attached
pub fn set_event_dispatcher(dispatcher: Arc<EventDispatcher>) -> Result<(), Arc<EventDispatcher>> {
    DISPATCHER.set(dispatcher)
}

/// The attached dispatcher, installing a standalone one when none exists
pub fn event_dispatcher_or_install() -> Arc<EventDispatcher> {
    DISPATCHER
        .get_or_init(|| {
            tracing::debug!("No event dispatcher attached; installing a standalone dispatcher");
            Arc::new(EventDispatcher::new())
        })
        .clone()
}
