//! Fixture composition with explicit dependencies.
//!
//! Tests declare the fixtures they need; the registry resolves the dependency
//! graph up front, constructs each fixture exactly once in dependency order,
//! and tears the set down in strict reverse order. Wiring is explicit and
//! inspectable: a fixture is a named factory plus the names it depends on,
//! never an implicitly-captured global.

use crate::result::{HarnessError, HarnessResult};
use futures::future::BoxFuture;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// An opaque constructed fixture value.
///
/// Factories return their concrete type behind this alias; consumers recover
/// it with [`FixtureSet::get`].
pub type FixtureValue = Arc<dyn Any + Send + Sync>;

type Factory =
    Box<dyn for<'a> Fn(&'a FixtureSet) -> BoxFuture<'a, HarnessResult<FixtureValue>> + Send + Sync>;

type Teardown =
    Arc<dyn Fn(FixtureValue) -> BoxFuture<'static, HarnessResult<()>> + Send + Sync>;

struct FixtureDef {
    dependencies: Vec<&'static str>,
    factory: Factory,
    teardown: Option<Teardown>,
}

/// Registry of fixture definitions.
///
/// Holds factories only; no fixture is constructed until [`Self::build`].
#[derive(Default)]
pub struct FixtureRegistry {
    definitions: HashMap<&'static str, FixtureDef>,
}

impl std::fmt::Debug for FixtureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.definitions.keys().collect();
        names.sort_unstable();
        f.debug_struct("FixtureRegistry")
            .field("fixtures", &names)
            .finish()
    }
}

impl FixtureRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fixture factory under `name`.
    ///
    /// `dependencies` are the names of fixtures that must be constructed
    /// before this one; the factory reads them from the [`FixtureSet`] it
    /// receives. Registering a duplicate name replaces the earlier
    /// definition.
    pub fn register<F>(&mut self, name: &'static str, dependencies: &[&'static str], factory: F)
    where
        F: for<'a> Fn(&'a FixtureSet) -> BoxFuture<'a, HarnessResult<FixtureValue>>
            + Send
            + Sync
            + 'static,
    {
        self.definitions.insert(
            name,
            FixtureDef {
                dependencies: dependencies.to_vec(),
                factory: Box::new(factory),
                teardown: None,
            },
        );
    }

    /// Register a fixture factory together with its teardown.
    ///
    /// Equivalent to [`Self::register`] followed by [`Self::on_teardown`],
    /// for fixtures whose cleanup is known at registration time.
    pub fn register_with_teardown<F, T>(
        &mut self,
        name: &'static str,
        dependencies: &[&'static str],
        factory: F,
        teardown: T,
    ) where
        F: for<'a> Fn(&'a FixtureSet) -> BoxFuture<'a, HarnessResult<FixtureValue>>
            + Send
            + Sync
            + 'static,
        T: Fn(FixtureValue) -> BoxFuture<'static, HarnessResult<()>> + Send + Sync + 'static,
    {
        self.definitions.insert(
            name,
            FixtureDef {
                dependencies: dependencies.to_vec(),
                factory: Box::new(factory),
                teardown: Some(Arc::new(teardown)),
            },
        );
    }

    /// Attach a teardown to an already-registered fixture.
    ///
    /// Teardowns run in reverse construction order during
    /// [`FixtureSet::teardown`].
    ///
    /// # Errors
    ///
    /// `Fixture` when `name` is not registered.
    pub fn on_teardown<F>(&mut self, name: &'static str, teardown: F) -> HarnessResult<()>
    where
        F: Fn(FixtureValue) -> BoxFuture<'static, HarnessResult<()>> + Send + Sync + 'static,
    {
        let def = self
            .definitions
            .get_mut(name)
            .ok_or_else(|| HarnessError::Fixture {
                name: name.to_string(),
                message: "cannot attach teardown to unregistered fixture".to_string(),
            })?;
        def.teardown = Some(Arc::new(teardown));
        Ok(())
    }

    /// Names of all registered fixtures, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.definitions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Construct `roots` and everything they transitively depend on.
    ///
    /// Each fixture is constructed exactly once, after all of its
    /// dependencies. If a factory fails, fixtures already constructed are
    /// torn down in reverse order before the error is returned.
    ///
    /// # Errors
    ///
    /// `Fixture` for an unknown name, a dependency cycle, or a factory
    /// failure.
    pub async fn build(&self, roots: &[&'static str]) -> HarnessResult<FixtureSet> {
        let order = self.construction_order(roots)?;
        let mut set = FixtureSet::new();
        for name in order {
            let def = &self.definitions[name];
            tracing::debug!(fixture = name, "constructing fixture");
            match (def.factory)(&set).await {
                Ok(value) => set.insert(name, value, def.teardown.clone()),
                Err(e) => {
                    tracing::error!(fixture = name, error = %e, "fixture construction failed");
                    if let Err(td) = set.teardown().await {
                        tracing::warn!(error = %td, "teardown after failed construction");
                    }
                    return Err(HarnessError::Fixture {
                        name: name.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(set)
    }

    /// Depth-first postorder over the dependency graph, with cycle detection
    fn construction_order(&self, roots: &[&'static str]) -> HarnessResult<Vec<&'static str>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            InProgress,
            Done,
        }

        let mut marks: HashMap<&'static str, Mark> = HashMap::new();
        let mut order = Vec::new();
        // Explicit stack; a second push of the same name emits it postorder.
        let mut stack: Vec<(&'static str, bool)> = roots.iter().rev().map(|n| (*n, false)).collect();

        while let Some((name, children_done)) = stack.pop() {
            if children_done {
                marks.insert(name, Mark::Done);
                order.push(name);
                continue;
            }
            match marks.get(name) {
                Some(Mark::Done) => continue,
                Some(Mark::InProgress) => {
                    return Err(HarnessError::Fixture {
                        name: name.to_string(),
                        message: "dependency cycle detected".to_string(),
                    });
                }
                None => {}
            }
            let def = self.definitions.get(name).ok_or_else(|| HarnessError::Fixture {
                name: name.to_string(),
                message: "fixture is not registered".to_string(),
            })?;
            marks.insert(name, Mark::InProgress);
            stack.push((name, true));
            for dep in def.dependencies.iter().rev().copied() {
                stack.push((dep, false));
            }
        }
        Ok(order)
    }
}

/// Constructed fixtures of one test, in construction order.
///
/// Call [`Self::teardown`] when the test finishes; dropping the set without
/// tearing it down only logs a warning (teardowns are async and cannot run
/// in `Drop`).
#[derive(Default)]
pub struct FixtureSet {
    entries: Vec<(&'static str, FixtureValue, Option<Teardown>)>,
    torn_down: bool,
}

impl std::fmt::Debug for FixtureSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.entries.iter().map(|(n, _, _)| n).collect();
        f.debug_struct("FixtureSet")
            .field("fixtures", &names)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl FixtureSet {
    fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: &'static str, value: FixtureValue, teardown: Option<Teardown>) {
        self.entries.push((name, value, teardown));
    }

    /// Fetch a constructed fixture, downcast to its concrete type.
    ///
    /// # Errors
    ///
    /// `Fixture` when the name is absent from this set or the value is not a
    /// `T`.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> HarnessResult<Arc<T>> {
        let value = self
            .entries
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, v, _)| v.clone())
            .ok_or_else(|| HarnessError::Fixture {
                name: name.to_string(),
                message: "fixture is not part of this set".to_string(),
            })?;
        value.downcast::<T>().map_err(|_| HarnessError::Fixture {
            name: name.to_string(),
            message: format!(
                "fixture has a different type than the requested {}",
                std::any::type_name::<T>()
            ),
        })
    }

    /// Whether a fixture by this name was constructed
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _, _)| *n == name)
    }

    /// Names in construction order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(n, _, _)| *n).collect()
    }

    /// Run teardowns in reverse construction order.
    ///
    /// Every teardown runs even if an earlier one fails; the first error is
    /// returned. Idempotent.
    pub async fn teardown(&mut self) -> HarnessResult<()> {
        if self.torn_down {
            return Ok(());
        }
        self.torn_down = true;
        let mut first_error = None;
        while let Some((name, value, teardown)) = self.entries.pop() {
            let Some(teardown) = teardown else { continue };
            tracing::debug!(fixture = name, "tearing down fixture");
            if let Err(e) = teardown(value).await {
                tracing::error!(fixture = name, error = %e, "fixture teardown failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for FixtureSet {
    fn drop(&mut self) {
        if !self.torn_down && self.entries.iter().any(|(_, _, td)| td.is_some()) {
            tracing::warn!(
                fixtures = ?self.names(),
                "fixture set dropped without teardown"
            );
        }
    }
}
