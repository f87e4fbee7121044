/*
 * Type Resolver - element type recovery for sources
 *
 * Resolution order:
 * 1. Declared: the source carries its element type (typed wrappers)
 * 2. TagProbe: a registered probe recognises the concrete collection
 *    and reads a type tag from it
 * 3. FirstElement: runtime type of the first element
 *
 * An empty source with neither 1 nor 2 is ambiguous.
 */

use crate::errors::{QueryError, Result};
use crate::features::type_resolution::ports::Source;
use crate::shared::models::{Recordable, TypeHandle};
use std::any::Any;
use std::fmt;
use tracing::debug;

/// How an element type was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStrategy {
    Declared,
    /// Name of the probe that recognised the source
    TagProbe(String),
    FirstElement,
}

/// Resolved element type of a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub element_type: TypeHandle,
    pub strategy: ResolutionStrategy,
}

type ProbeFn = Box<dyn Fn(&dyn Any) -> Option<TypeHandle> + Send + Sync>;

struct Probe {
    name: String,
    probe: ProbeFn,
}

/// Element type resolver with pluggable wrapper probes
pub struct TypeResolver {
    probes: Vec<Probe>,
    use_tag_probes: bool,
}

impl TypeResolver {
    pub fn new() -> Self {
        Self {
            probes: Vec::new(),
            use_tag_probes: true,
        }
    }

    /// Enable or disable step 2
    pub fn with_tag_probes(mut self, enabled: bool) -> Self {
        self.use_tag_probes = enabled;
        self
    }

    pub fn tag_probes_enabled(&self) -> bool {
        self.use_tag_probes
    }

    /// Register a probe for collections of concrete type `W`
    ///
    /// The probe only runs for sources whose `as_any` downcasts to `W`.
    pub fn register_probe<W, F>(&mut self, name: impl Into<String>, probe: F)
    where
        W: Any,
        F: Fn(&W) -> Option<TypeHandle> + Send + Sync + 'static,
    {
        self.probes.push(Probe {
            name: name.into(),
            probe: Box::new(move |any: &dyn Any| any.downcast_ref::<W>().and_then(|w| probe(w))),
        });
    }

    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }

    /// Resolve the element type of `source`
    pub fn resolve<S>(&self, source: &S) -> Result<Resolution>
    where
        S: Source + ?Sized,
        S::Item: Recordable,
    {
        if let Some(element_type) = source.declared_element_type() {
            debug!("element type {} declared by source", element_type);
            return Ok(Resolution {
                element_type,
                strategy: ResolutionStrategy::Declared,
            });
        }

        if self.use_tag_probes {
            if let Some(any) = source.as_any() {
                for probe in &self.probes {
                    if let Some(element_type) = (probe.probe)(any) {
                        debug!("element type {} found by probe '{}'", element_type, probe.name);
                        return Ok(Resolution {
                            element_type,
                            strategy: ResolutionStrategy::TagProbe(probe.name.clone()),
                        });
                    }
                }
            }
        }

        if let Some(first) = source.iter_items().next() {
            let element_type = first.descriptor();
            debug!("element type {} taken from first element", element_type);
            return Ok(Resolution {
                element_type,
                strategy: ResolutionStrategy::FirstElement,
            });
        }

        Err(QueryError::AmbiguousElementType(
            "source is empty and declares no element type".to_string(),
        ))
    }
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeResolver")
            .field(
                "probes",
                &self.probes.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            )
            .field("use_tag_probes", &self.use_tag_probes)
            .finish()
    }
}
