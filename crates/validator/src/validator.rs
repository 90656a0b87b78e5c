//! Per-entity validators.
//!
//! An [`EntityValidator`] owns one [`RuleChain`] per field name. Chains are
//! seeded from the validation annotations found on the entity's fields and
//! extended with rules registered through [`EntityValidator::rules`].
//! Validation walks the fields in declaration order and reports the first
//! failing rule.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use fieldkit_descriptor::registry;
use fieldkit_descriptor::{
    ArgumentError, DescriptorRegistry, Entity, EntityDescriptor, FieldSelector,
};

use crate::annotations;
use crate::config::ValidatorConfig;
use crate::result::ValidationResult;
use crate::rule::{Rule, RuleChain};
use crate::rules::CustomRule;

/// Rule chains for every field of `E`.
///
/// Registration takes `&mut self` and is expected to finish before the
/// validator is shared; [`validate`](Self::validate) takes `&self` and keeps
/// no state between calls.
///
/// # Examples
///
/// ```rust,ignore
/// let mut validator = EntityValidator::<Flight>::new()?;
/// validator
///     .rules(field!(Flight, city))
///     .add_rule(standard::not_null_or_empty())
///     .add_rule(standard::city_code());
///
/// let result = validator.check(&flight);
/// if !result.is_valid() {
///     eprintln!("{}: {}", result.field().unwrap_or_default(), result.message());
/// }
/// ```
pub struct EntityValidator<E> {
    descriptor: Arc<EntityDescriptor<E>>,
    chains: HashMap<String, RuleChain>,
    config: ValidatorConfig,
}

impl<E: Entity> EntityValidator<E> {
    /// Validator over the process-wide descriptor of `E`, with default
    /// configuration.
    pub fn new() -> Result<Self, ArgumentError> {
        Self::with_registry_and_config(registry::global(), ValidatorConfig::default())
    }

    pub fn with_registry(registry: &DescriptorRegistry) -> Result<Self, ArgumentError> {
        Self::with_registry_and_config(registry, ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Result<Self, ArgumentError> {
        Self::with_registry_and_config(registry::global(), config)
    }

    /// Builds (or reuses) the descriptor of `E` and seeds one rule per
    /// validation annotation, in declaration order.
    pub fn with_registry_and_config(
        registry: &DescriptorRegistry,
        config: ValidatorConfig,
    ) -> Result<Self, ArgumentError> {
        let descriptor = registry.descriptor::<E>()?;
        let mut validator = Self {
            descriptor,
            chains: HashMap::new(),
            config,
        };
        let seeded = validator.seed_from_annotations();

        tracing::debug!(
            entity = validator.descriptor.entity_name(),
            rules = seeded,
            "built entity validator"
        );
        Ok(validator)
    }

    fn seed_from_annotations(&mut self) -> usize {
        let descriptor = Arc::clone(&self.descriptor);
        let mut seeded = 0;
        for accessor in descriptor.fields() {
            for annotation in accessor.annotations().iter() {
                let Some(validation) = annotation.as_validation() else {
                    continue;
                };
                let message =
                    annotations::message_for(&**annotation, validation, &self.config.messages);
                let source = Arc::clone(annotation);
                let rule = CustomRule::new(move |value| {
                    source
                        .as_validation()
                        .is_none_or(|validation| validation.is_valid(value))
                })
                .with_message(message);

                self.add_rule(accessor.name(), rule);
                seeded += 1;
            }
        }
        seeded
    }

    pub fn descriptor(&self) -> &EntityDescriptor<E> {
        &self.descriptor
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Rule chain of the selected field, created empty on first use.
    pub fn rules(&mut self, selector: FieldSelector<E>) -> &mut RuleChain {
        self.chain(selector.name())
    }

    /// Like [`rules`](Self::rules), parsing the selector from text.
    pub fn rules_for(&mut self, selector: &str) -> Result<&mut RuleChain, ArgumentError> {
        let selector = FieldSelector::<E>::parse(selector)?;
        Ok(self.rules(selector))
    }

    /// Appends a rule to the chain of `field`. Blank names are ignored.
    pub fn add_rule(&mut self, field: &str, rule: impl Rule + 'static) -> &mut Self {
        if !field.trim().is_empty() {
            self.chain(field).add_rule(rule);
        }
        self
    }

    /// Rule chain registered for `field`, if any.
    pub fn chain_of(&self, field: &str) -> Option<&RuleChain> {
        self.chains.get(field)
    }

    fn chain(&mut self, field: &str) -> &mut RuleChain {
        if !self.chains.contains_key(field) && self.descriptor.field(field).is_none() {
            tracing::warn!(
                entity = self.descriptor.entity_name(),
                field,
                "rules registered for a field the entity does not declare"
            );
        }
        self.chains.entry(field.to_owned()).or_default()
    }

    /// Validates `entity`, returning the first violation in field
    /// declaration order and, within a field, rule registration order.
    pub fn validate(&self, entity: Option<&E>) -> ValidationResult {
        let Some(entity) = entity else {
            return ValidationResult::unattributed(self.config.messages.null_entity.as_str());
        };

        for accessor in self.descriptor.fields() {
            let Some(chain) = self.chains.get(accessor.name()) else {
                continue;
            };
            if chain.is_empty() {
                continue;
            }

            let value = accessor.get_value(entity);
            if let Some(rule) = chain.first_violation(&value) {
                tracing::trace!(
                    entity = self.descriptor.entity_name(),
                    field = accessor.name(),
                    message = rule.error_message(),
                    "validation failed"
                );
                return ValidationResult::failure(accessor.name(), rule.error_message());
            }
        }

        ValidationResult::success()
    }

    /// Shorthand for `validate(Some(entity))`.
    pub fn check(&self, entity: &E) -> ValidationResult {
        self.validate(Some(entity))
    }
}

impl<E: Entity> fmt::Debug for EntityValidator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityValidator")
            .field("entity", &self.descriptor.entity_name())
            .field("chains", &self.chains)
            .finish_non_exhaustive()
    }
}
