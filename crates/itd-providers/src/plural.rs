//! Plural forms of type and field names
//!
//! An explicit `@RooPlural("...")` wins; otherwise the English inflector
//! decides. Field plurals are memoised per metadata instance.

use crate::error::Result;
use crate::provider::{ensure_instance_of, register_upstream, InputResolver, MetadataProvider, ProvidedMetadata, ProviderContext};
use itd_builder::{ClassOrInterfaceTypeDetails, FieldMetadata};
use itd_model::{well_known, MetadataId, MetadataKind};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

static UNCOUNTABLE: &[&str] = &[
    "equipment", "information", "rice", "money", "species", "series", "fish", "sheep", "news",
];

static IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
];

// most specific last; matched from the end of the list
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)$", "s"),
        (r"(?i)s$", "s"),
        (r"(?i)(ax|test)is$", "${1}es"),
        (r"(?i)(octop|vir)us$", "${1}i"),
        (r"(?i)(alias|status)$", "${1}es"),
        (r"(?i)(bu)s$", "${1}ses"),
        (r"(?i)(buffal|tomat|potat)o$", "${1}oes"),
        (r"(?i)([ti])um$", "${1}a"),
        (r"(?i)sis$", "ses"),
        (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(?i)(hive)$", "${1}s"),
        (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
        (r"(?i)(x|ch|ss|sh)$", "${1}es"),
        (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        (r"(?i)([ml])ouse$", "${1}ice"),
        (r"(?i)^(ox)$", "${1}en"),
        (r"(?i)(quiz)$", "${1}zes"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// English plural of `term`, keeping the case of its first letter
///
/// Only the trailing word of a camel-case term is inflected
/// (`LineItem` → `LineItems`). A term the rules cannot handle is returned
/// unchanged.
#[must_use]
pub fn inflector_plural(term: &str) -> String {
    if term.is_empty() || !term.chars().all(char::is_alphanumeric) {
        return term.to_string();
    }

    let split = term
        .char_indices()
        .filter(|(i, c)| *i > 0 && c.is_uppercase())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0);
    let (head, word) = term.split_at(split);
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return term.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return format!("{head}{}", match_case(word, plural));
    }
    for (rule, replacement) in RULES.iter().rev() {
        if rule.is_match(word) {
            return format!("{head}{}", rule.replace(word, *replacement));
        }
    }
    term.to_string()
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        itd_model::capitalize(replacement)
    } else {
        replacement.to_string()
    }
}

/// Plural facts for one governor type
#[derive(Debug)]
pub struct PluralMetadata {
    id: MetadataId,
    plural: String,
    field_cache: Mutex<HashMap<String, String>>,
}

impl PluralMetadata {
    /// Plural for `governor`, honouring its `@RooPlural` value
    #[must_use]
    pub fn new(id: &MetadataId, governor: &ClassOrInterfaceTypeDetails) -> Self {
        let plural = governor
            .annotation(&well_known::ROO_PLURAL)
            .and_then(|a| a.str_value("value"))
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| inflector_plural(governor.name().simple_type_name()), str::to_string);
        Self {
            id: id.clone(),
            plural,
            field_cache: Mutex::new(HashMap::new()),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &MetadataId {
        &self.id
    }

    /// Plural of the governor's simple name (`Person` → `People`)
    #[inline]
    #[must_use]
    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Plural for a field: its own `@RooPlural` value or the inflected name
    pub fn field_plural(&self, field: &FieldMetadata) -> String {
        let name = field.field_name().symbol_name();
        if let Some(cached) = self.field_cache.lock().get(name) {
            return cached.clone();
        }
        let plural = field
            .annotation(&well_known::ROO_PLURAL)
            .and_then(|a| a.str_value("value"))
            .filter(|v| !v.is_empty())
            .map_or_else(|| inflector_plural(name), str::to_string);
        self.field_cache.lock().insert(name.to_string(), plural.clone());
        plural
    }

    #[must_use]
    pub fn cached_lookups(&self) -> usize {
        self.field_cache.lock().len()
    }
}

/// Computes [`PluralMetadata`] from the governor's declared details
pub struct PluralProvider {
    governors: Arc<dyn InputResolver<ClassOrInterfaceTypeDetails>>,
}

impl std::fmt::Debug for PluralProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluralProvider").finish_non_exhaustive()
    }
}

impl PluralProvider {
    #[must_use]
    pub fn new(governors: impl InputResolver<ClassOrInterfaceTypeDetails> + 'static) -> Self {
        Self {
            governors: Arc::new(governors),
        }
    }
}

impl MetadataProvider for PluralProvider {
    fn kind(&self) -> MetadataKind {
        MetadataKind::Plural
    }

    fn compute(&self, id: &MetadataId, ctx: &ProviderContext<'_>) -> Result<Option<ProvidedMetadata>> {
        ensure_instance_of(&MetadataKind::Plural, id)?;
        let Some(governor) = self.governors.resolve(id) else {
            debug!(%id, "no governor details; plural unavailable");
            return Ok(None);
        };
        register_upstream(ctx, &[id.with_kind(MetadataKind::PhysicalType)], id);
        Ok(Some(ProvidedMetadata::Plural(Arc::new(PluralMetadata::new(id, &governor)))))
    }
}
