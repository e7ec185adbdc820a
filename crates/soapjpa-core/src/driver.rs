//! Class-graph driver.
//!
//! [`ClassGraph`] computes the lookup tables once (target types, constructor
//! index, field providers) and then builds the rendering contexts of every
//! eligible top-level class. Independent classes are planned concurrently on
//! a bounded pool of scoped threads; the tables are read-only by then.

use crate::config::GeneratorConfig;
use crate::context::{
    EntityContext, FactoryContext, FieldProviderInterfaceContext, FieldsContext, GenerationPlan,
};
use crate::error::{GenerationError, GenerationResult};
use crate::fields::{FieldMap, build_field_map};
use crate::model::{ClassId, ClassModel, ClassSet};
use crate::naming::{
    GETTER_PREFIX, capitalize, parent_path, simple_name, suffixed_name, to_constant_name,
};
use crate::report::{Diagnostics, Warning};
use crate::resolver::{OBJECT_TYPE, ResolveRequest};
use crate::stranger::correct_ownership;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Stub qualified name -> generated entity name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TargetTypeTable(BTreeMap<String, String>);

impl TargetTypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, stub: impl Into<String>, target: impl Into<String>) -> Option<String> {
        self.0.insert(stub.into(), target.into())
    }

    /// Target of a stub, by qualified or binary name
    pub fn get(&self, stub: &str) -> Option<&str> {
        self.0
            .get(stub)
            .or_else(|| {
                stub.contains('$')
                    .then(|| self.0.get(&stub.replace('$', ".")))
                    .flatten()
            })
            .map(String::as_str)
    }

    pub fn contains(&self, stub: &str) -> bool {
        self.get(stub).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TargetTypeTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Generated entity name -> every stub that maps onto it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConstructorIndex(BTreeMap<String, BTreeSet<String>>);

impl ConstructorIndex {
    /// Invert a target table
    pub fn from_targets(targets: &TargetTypeTable) -> Self {
        let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (stub, target) in targets.iter() {
            index
                .entry(target.to_string())
                .or_default()
                .insert(stub.to_string());
        }
        Self(index)
    }

    pub fn get(&self, target: &str) -> Option<&BTreeSet<String>> {
        self.0.get(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stub qualified name -> generated field-constant interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldProviderIndex(BTreeMap<String, String>);

impl FieldProviderIndex {
    pub fn insert(&mut self, stub: impl Into<String>, provider: impl Into<String>) {
        self.0.insert(stub.into(), provider.into());
    }

    pub fn get(&self, stub: &str) -> Option<&str> {
        self.0.get(stub).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A class is generated unless its simple name, or that of an enclosing
/// class, ends with a forbidden suffix
fn is_eligible(classes: &ClassSet, config: &GeneratorConfig, class: &ClassModel) -> bool {
    let mut current = Some(class);
    while let Some(c) = current {
        if config.is_forbidden(&c.name) {
            return false;
        }
        current = classes.enclosing_of(c);
    }
    true
}

type TreeMaps = HashMap<ClassId, FieldMap>;

struct PlannedClass {
    entity: EntityContext,
    fields: FieldsContext,
    warnings: Vec<Warning>,
}

/// Drives one generation run over a class set
#[derive(Debug)]
pub struct ClassGraph<'a> {
    classes: &'a ClassSet,
    config: &'a GeneratorConfig,
    targets: TargetTypeTable,
    constructors: ConstructorIndex,
    field_providers: FieldProviderIndex,
}

impl<'a> ClassGraph<'a> {
    /// Validate the configuration and build the lookup tables
    pub fn new(classes: &'a ClassSet, config: &'a GeneratorConfig) -> GenerationResult<Self> {
        config.validate()?;

        let mut targets = TargetTypeTable::new();
        let mut field_providers = FieldProviderIndex::default();

        for class in classes
            .classes()
            .filter(|c| is_eligible(classes, config, c))
        {
            targets.insert(
                class.qualified_name.clone(),
                suffixed_name(&class.binary_name, &config.entity_suffix),
            );
            field_providers.insert(
                class.qualified_name.clone(),
                suffixed_name(&class.binary_name, &config.fields_suffix),
            );
        }

        let constructors = ConstructorIndex::from_targets(&targets);

        tracing::info!(
            classes = classes.len(),
            entities = targets.len(),
            "class graph built"
        );

        Ok(Self {
            classes,
            config,
            targets,
            constructors,
            field_providers,
        })
    }

    pub fn classes(&self) -> &'a ClassSet {
        self.classes
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    pub fn targets(&self) -> &TargetTypeTable {
        &self.targets
    }

    pub fn constructors(&self) -> &ConstructorIndex {
        &self.constructors
    }

    pub fn field_providers(&self) -> &FieldProviderIndex {
        &self.field_providers
    }

    pub fn is_eligible(&self, class: &ClassModel) -> bool {
        is_eligible(self.classes, self.config, class)
    }

    /// Eligible top-level classes, sorted by qualified name
    pub fn roots(&self) -> Vec<&'a ClassModel> {
        let mut roots: Vec<_> = self
            .classes
            .top_level()
            .filter(|c| self.is_eligible(c))
            .collect();
        roots.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
        roots
    }

    /// Look up a class by qualified or binary name
    pub fn class(&self, name: &str) -> GenerationResult<&'a ClassModel> {
        self.classes
            .by_name(name)
            .ok_or_else(|| GenerationError::UnknownClass(name.to_string()))
    }

    fn request<'r>(&'r self, outermost: &'r ClassModel) -> ResolveRequest<'r> {
        ResolveRequest {
            classes: self.classes,
            outermost,
            targets: &self.targets,
            identity_field_name: &self.config.identity_field_name,
            identity_field_type: &self.config.identity_field_type,
            entity_suffix: &self.config.entity_suffix,
        }
    }

    /// Field map of a single class
    pub fn field_map(
        &self,
        class: &ClassModel,
        diagnostics: &mut Diagnostics,
    ) -> GenerationResult<FieldMap> {
        let outermost = self.classes.outermost(class.id);
        build_field_map(&self.request(outermost), class, diagnostics)
    }

    /// Field maps of `root` and its eligible nested classes
    fn tree_maps(&self, root: &ClassModel, diagnostics: &mut Diagnostics) -> GenerationResult<TreeMaps> {
        let mut maps = TreeMaps::new();
        let mut pending = vec![root];

        while let Some(class) = pending.pop() {
            maps.insert(class.id, self.field_map(class, diagnostics)?);
            pending.extend(self.classes.nested_of(class.id).filter(|c| self.is_eligible(c)));
        }

        Ok(maps)
    }

    fn map_of(maps: &TreeMaps, class: &ClassModel) -> GenerationResult<FieldMap> {
        maps.get(&class.id)
            .cloned()
            .ok_or_else(|| GenerationError::UnknownClass(class.qualified_name.clone()))
    }

    /// Entity context of `class` and its nested classes
    pub fn entity_context(
        &self,
        class: &ClassModel,
        diagnostics: &mut Diagnostics,
    ) -> GenerationResult<EntityContext> {
        let maps = self.tree_maps(class, diagnostics)?;
        self.entity_from_maps(class, &maps)
    }

    /// Field-constant context of `class` and its nested classes
    pub fn fields_context(
        &self,
        class: &ClassModel,
        diagnostics: &mut Diagnostics,
    ) -> GenerationResult<FieldsContext> {
        let maps = self.tree_maps(class, diagnostics)?;
        self.build_fields(class, &maps, class.is_nested())
    }

    pub fn factory_context(&self) -> FactoryContext {
        FactoryContext {
            package: self.config.factory_package.clone(),
            field_providers: self.field_providers.clone(),
            fields_package: self.config.fields_package.clone(),
            generation_date: self.config.generation_date.clone(),
        }
    }

    pub fn field_provider_interface_context(&self) -> FieldProviderInterfaceContext {
        FieldProviderInterfaceContext {
            package: self.config.fields_package.clone(),
            identity_field_type: self.config.identity_field_type.clone(),
            generation_date: self.config.generation_date.clone(),
        }
    }

    fn entity_from_maps(&self, class: &ClassModel, maps: &TreeMaps) -> GenerationResult<EntityContext> {
        let outermost = self.classes.outermost(class.id);
        let mut strangers = BTreeMap::new();
        let mut context =
            self.build_entity(class, outermost, maps, class.is_nested(), true, &mut strangers)?;

        if !class.is_nested() {
            self.embed_strangers(&mut context, outermost, strangers)?;
        }

        Ok(context)
    }

    fn build_entity(
        &self,
        class: &ClassModel,
        outermost: &ClassModel,
        maps: &TreeMaps,
        embedded: bool,
        correct: bool,
        strangers: &mut BTreeMap<String, String>,
    ) -> GenerationResult<EntityContext> {
        let mut fields = Self::map_of(maps, class)?;

        let corrections = if correct {
            correct_ownership(self.classes, &self.targets, outermost, &fields)
        } else {
            Vec::new()
        };

        for correction in &corrections {
            if let Some(target) = &correction.descriptor.resolved_type_name {
                strangers
                    .entry(correction.stub_type.clone())
                    .or_insert_with(|| target.clone());
            }
            fields.insert(correction.field.clone(), correction.descriptor.clone());
        }

        let mut nested = Vec::new();
        for child in self
            .classes
            .nested_of(class.id)
            .filter(|c| self.is_eligible(c))
        {
            nested.push(self.build_entity(child, outermost, maps, true, correct, strangers)?);
        }

        let suffix = &self.config.entity_suffix;
        let target_name = self
            .targets
            .get(&class.qualified_name)
            .map_or_else(|| suffixed_name(&class.binary_name, suffix), str::to_string);
        let superclass = class
            .superclass
            .as_deref()
            .and_then(|s| self.targets.get(s))
            .unwrap_or(OBJECT_TYPE)
            .to_string();
        let constant_names = fields
            .keys()
            .map(|f| (f.clone(), to_constant_name(f)))
            .collect();
        let constructors = self
            .constructors
            .get(&target_name)
            .cloned()
            .unwrap_or_default();

        tracing::debug!(
            class = %class.qualified_name,
            fields = fields.len(),
            nested = nested.len(),
            strangers = corrections.len(),
            "entity context built"
        );

        Ok(EntityContext {
            package: class.package.clone(),
            class_name: class.name.clone(),
            entity_name: format!("{}{}", class.name, suffix),
            target_name,
            stub_class: class.qualified_name.clone(),
            is_embedded: embedded,
            superclass,
            fields,
            constant_names,
            constructors,
            identity_field_name: self.config.identity_field_name.clone(),
            identity_field_type: self.config.identity_field_type.clone(),
            fields_package: self.config.fields_package.clone(),
            field_provider: self
                .field_providers
                .get(&class.qualified_name)
                .map(str::to_string),
            generation_date: self.config.generation_date.clone(),
            nested,
            corrections,
        })
    }

    /// Declare every stranger type as an embedded class of the top-level entity
    fn embed_strangers(
        &self,
        context: &mut EntityContext,
        outermost: &ClassModel,
        strangers: BTreeMap<String, String>,
    ) -> GenerationResult<()> {
        for (stub_type, mut target) in strangers {
            let Some(class) = self.classes.by_name(&stub_type) else {
                continue;
            };

            let mut entity_name = simple_name(&target).to_string();
            if context.nested.iter().any(|n| n.entity_name == entity_name) {
                let owner = self.classes.enclosing_of(class).map_or("", |o| o.name.as_str());
                entity_name = free_nested_name(context, &format!("{owner}{entity_name}"));
                let renamed = format!("{}.{entity_name}", parent_path(&target));
                tracing::debug!(
                    stranger = %stub_type,
                    owner = %context.stub_class,
                    embedded = %renamed,
                    "embedded class name taken, renaming"
                );
                retarget(context, &stub_type, &renamed);
                target = renamed;
            }

            // warnings for the stranger's own fields belong to its own class
            let maps = self.tree_maps(class, &mut Diagnostics::new())?;
            let mut embedded =
                self.build_entity(class, outermost, &maps, true, false, &mut BTreeMap::new())?;
            embedded.entity_name = entity_name;
            embedded.target_name = target;
            embedded.constructors.insert(stub_type);
            context.nested.push(embedded);
        }

        Ok(())
    }

    fn build_fields(
        &self,
        class: &ClassModel,
        maps: &TreeMaps,
        embedded: bool,
    ) -> GenerationResult<FieldsContext> {
        let fields = Self::map_of(maps, class)?;

        let constants = fields
            .keys()
            .map(|f| (to_constant_name(f), f.clone()))
            .collect();

        let primitive_fields: BTreeSet<String> = fields
            .iter()
            .filter(|(_, d)| d.is_primitive())
            .map(|(name, _)| name.clone())
            .collect();

        let identity_accessor = format!(
            "{GETTER_PREFIX}{}",
            capitalize(&self.config.identity_field_name)
        );
        let identityless_fields = fields
            .iter()
            .filter(|(name, _)| !primitive_fields.contains(*name))
            .filter(|(_, d)| {
                !self
                    .classes
                    .by_name(&d.original_type_name)
                    .is_some_and(|c| c.accessors().any(|m| m.name == identity_accessor))
            })
            .map(|(name, _)| to_constant_name(name))
            .collect();

        let mut nested = Vec::new();
        let mut nested_first_fields = BTreeMap::new();
        for child in self
            .classes
            .nested_of(class.id)
            .filter(|c| self.is_eligible(c))
        {
            let context = self.build_fields(child, maps, true)?;
            nested_first_fields.insert(child.name.clone(), context.first_field.clone());
            nested.push(context);
        }

        let first_field = fields.keys().next().map(|f| capitalize(f)).unwrap_or_default();
        let is_containing_ident_field = primitive_fields.contains(&self.config.identity_field_name);

        Ok(FieldsContext {
            package: class.package.clone(),
            class_name: class.name.clone(),
            interface_name: format!("{}{}", class.name, self.config.fields_suffix),
            is_inner: class.is_nested(),
            is_embedded: embedded,
            constants,
            primitive_fields,
            identityless_fields,
            nested,
            nested_first_fields,
            first_field,
            is_containing_ident_field,
            entity_class: self
                .targets
                .get(&class.qualified_name)
                .map(str::to_string),
            stub_class: class.qualified_name.clone(),
            identity_field_name: self.config.identity_field_name.clone(),
            identity_field_type: self.config.identity_field_type.clone(),
            fields_package: self.config.fields_package.clone(),
            factory_package: self.config.factory_package.clone(),
            generation_date: self.config.generation_date.clone(),
        })
    }

    fn plan_class(&self, class: &ClassModel) -> GenerationResult<PlannedClass> {
        let mut diagnostics = Diagnostics::new();
        let maps = self.tree_maps(class, &mut diagnostics)?;
        let entity = self.entity_from_maps(class, &maps)?;
        let fields = self.build_fields(class, &maps, false)?;

        tracing::debug!(
            class = %class.qualified_name,
            entities = entity.class_count(),
            warnings = diagnostics.warnings().len(),
            "class planned"
        );

        Ok(PlannedClass {
            entity,
            fields,
            warnings: diagnostics.into_warnings(),
        })
    }

    /// Build the contexts of every eligible top-level class.
    ///
    /// Classes are distributed over `worker_threads` scoped threads. The
    /// first hard error stops the remaining workers and is returned; the
    /// output order does not depend on scheduling.
    pub fn plan(&self) -> GenerationResult<GenerationPlan> {
        let roots = self.roots();
        let workers = self.config.effective_workers(roots.len());

        tracing::info!(classes = roots.len(), workers, "planning generation");

        let next = AtomicUsize::new(0);
        let failed = AtomicBool::new(false);
        let planned: DashMap<usize, PlannedClass> = DashMap::new();
        let first_error: Mutex<Option<(usize, GenerationError)>> = Mutex::new(None);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    while !failed.load(Ordering::Acquire) {
                        let index = next.fetch_add(1, Ordering::AcqRel);
                        let Some(class) = roots.get(index) else {
                            break;
                        };

                        match self.plan_class(class) {
                            Ok(result) => {
                                planned.insert(index, result);
                            }
                            Err(err) => {
                                failed.store(true, Ordering::Release);
                                let mut slot = first_error.lock();
                                if slot.as_ref().is_none_or(|(i, _)| index < *i) {
                                    *slot = Some((index, err));
                                }
                            }
                        }
                    }
                });
            }
        });

        if let Some((_, err)) = first_error.into_inner() {
            return Err(err);
        }

        let mut planned: Vec<_> = planned.into_iter().collect();
        planned.sort_by_key(|(index, _)| *index);

        let mut entities = Vec::with_capacity(planned.len());
        let mut fields = Vec::with_capacity(planned.len());
        let mut warnings = Vec::new();
        for (_, class) in planned {
            entities.push(class.entity);
            fields.push(class.fields);
            warnings.extend(class.warnings);
        }

        tracing::info!(
            entities = entities.len(),
            warnings = warnings.len(),
            "generation plan ready"
        );

        Ok(GenerationPlan {
            entities,
            fields,
            factory: self.factory_context(),
            field_provider: self.field_provider_interface_context(),
            warnings,
        })
    }
}

/// `base`, or `base` with the lowest numeric suffix not yet declared among the nested classes
fn free_nested_name(context: &EntityContext, base: &str) -> String {
    let taken = |name: &str| context.nested.iter().any(|n| n.entity_name == name);
    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|i| format!("{base}{i}"))
        .find(|name| !taken(name))
        .unwrap_or_else(|| base.to_string())
}

/// Point every stranger field typed with `stub_type` at `target`
fn retarget(context: &mut EntityContext, stub_type: &str, target: &str) {
    for correction in context
        .corrections
        .iter_mut()
        .filter(|c| c.stub_type == stub_type)
    {
        correction.descriptor.resolved_type_name = Some(target.to_string());
        if let Some(field) = context.fields.get_mut(&correction.field) {
            field.resolved_type_name = Some(target.to_string());
        }
    }
    for nested in &mut context.nested {
        retarget(nested, stub_type, target);
    }
}
