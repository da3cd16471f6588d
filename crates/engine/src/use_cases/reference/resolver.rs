//! Reference resolver.
//!
//! Exact, case-insensitive, apostrophe-normalized name matching over a
//! category document. There is no fuzzy or prefix matching: a near miss is
//! "not found".

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use lorelink_domain::{
    normalize_name, parse_reference_tags, Entity, EntityKind, ReferenceLookup, ReferenceTag,
    ResolvedReference,
};

use crate::infrastructure::catalog::{Catalog, CatalogError};

/// Resolves references against the catalog.
///
/// Holds no state of its own beyond the shared catalog.
#[derive(Clone)]
pub struct ReferenceResolver {
    catalog: Arc<Catalog>,
}

impl ReferenceResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Resolve one reference.
    ///
    /// Not-found (including an unknown source partition) is `Ok(NotFound)`.
    /// Only load and parse failures of the category document are errors.
    /// Among same-named records, the one from the requested source (or the
    /// default source) wins; otherwise the first match in data order.
    pub async fn resolve(
        &self,
        kind: EntityKind,
        name: &str,
        source: Option<&str>,
    ) -> Result<ResolvedReference, CatalogError> {
        let source = source.map(str::trim).filter(|s| !s.is_empty());

        let doc = match self.catalog.load_category(kind, source).await {
            Ok(doc) => doc,
            Err(CatalogError::UnknownSource { source_code, .. }) => {
                tracing::debug!(kind = %kind, name = %name, source = %source_code, "No such source partition");
                return Ok(ResolvedReference::not_found(kind, name));
            }
            Err(e) => return Err(e),
        };

        let wanted = normalize_name(name);
        let preferred_source = source.unwrap_or(self.catalog.default_source_for(kind));
        let mut fallback: Option<Entity> = None;

        for raw in records(&doc, kind) {
            let matches = raw
                .get("name")
                .and_then(Value::as_str)
                .map(|candidate| normalize_name(candidate) == wanted)
                .unwrap_or(false);
            if !matches {
                continue;
            }

            match Entity::from_record(kind, raw) {
                Ok(entity) if entity.source().eq_ignore_ascii_case(preferred_source) => {
                    return Ok(ResolvedReference::Found(entity));
                }
                Ok(entity) => {
                    if fallback.is_none() {
                        fallback = Some(entity);
                    }
                }
                Err(e) => {
                    tracing::warn!(kind = %kind, name = %name, error = %e, "Skipping unreadable record");
                }
            }
        }

        Ok(match fallback {
            Some(entity) => ResolvedReference::Found(entity),
            None => {
                tracing::debug!(kind = %kind, name = %name, "Reference not found");
                ResolvedReference::not_found(kind, name)
            }
        })
    }

    /// UI-boundary entry point: never fails.
    ///
    /// Load failures are logged and come back as a sentinel whose error text
    /// describes the failure, so the caller can still show something.
    pub async fn lookup(&self, lookup: &ReferenceLookup) -> ResolvedReference {
        match self
            .resolve(lookup.kind, &lookup.name, lookup.source.as_deref())
            .await
        {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(
                    kind = %lookup.kind,
                    name = %lookup.name,
                    error = %e,
                    "Reference lookup failed"
                );
                ResolvedReference::failed(
                    lookup.name.clone(),
                    format!("{} data could not be loaded", lookup.kind.label()),
                )
            }
        }
    }

    /// Resolve every reference tag, memoizing identical lookups for this call.
    ///
    /// The result is aligned with `tags`; non-reference tags map to `None`.
    pub async fn resolve_tags(&self, tags: &[ReferenceTag]) -> Vec<Option<ResolvedReference>> {
        let mut memo: HashMap<(EntityKind, String, Option<String>), ResolvedReference> =
            HashMap::new();
        let mut resolved = Vec::with_capacity(tags.len());

        for tag in tags {
            let Some(lookup) = tag.lookup() else {
                resolved.push(None);
                continue;
            };

            let key = lookup.memo_key();
            if let Some(hit) = memo.get(&key) {
                resolved.push(Some(hit.clone()));
                continue;
            }

            let result = self.lookup(&lookup).await;
            memo.insert(key, result.clone());
            resolved.push(Some(result));
        }

        resolved
    }

    /// Parse `text` and resolve all of its top-level reference tags.
    pub async fn resolve_text(&self, text: &str) -> Vec<(ReferenceTag, ResolvedReference)> {
        let tags: Vec<ReferenceTag> = parse_reference_tags(text)
            .into_iter()
            .filter(ReferenceTag::is_reference)
            .collect();
        let resolved = self.resolve_tags(&tags).await;

        tags.into_iter()
            .zip(resolved)
            .filter_map(|(tag, result)| result.map(|r| (tag, r)))
            .collect()
    }
}

macro_rules! resolve_by_kind {
    ($($method:ident => $kind:ident),* $(,)?) => {
        impl ReferenceResolver {
            $(
                #[doc = concat!("Resolve a `", stringify!($kind), "` by name.")]
                pub async fn $method(
                    &self,
                    name: &str,
                    source: Option<&str>,
                ) -> Result<ResolvedReference, CatalogError> {
                    self.resolve(EntityKind::$kind, name, source).await
                }
            )*
        }
    };
}

resolve_by_kind! {
    resolve_race => Race,
    resolve_class => Class,
    resolve_class_feature => ClassFeature,
    resolve_spell => Spell,
    resolve_item => Item,
    resolve_background => Background,
    resolve_condition => Condition,
    resolve_skill => Skill,
    resolve_action => Action,
    resolve_feat => Feat,
    resolve_optional_feature => OptionalFeature,
    resolve_reward => Reward,
    resolve_trap => Trap,
    resolve_vehicle => Vehicle,
    resolve_object => Object,
    resolve_variant_rule => VariantRule,
    resolve_monster => Monster,
}

/// Records of `kind` in data order, across its collection keys.
fn records(doc: &Value, kind: EntityKind) -> impl Iterator<Item = &Value> {
    kind.collection_keys()
        .iter()
        .filter_map(move |key| doc.get(*key).and_then(Value::as_array))
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_documents, InMemoryDataSource};

    fn resolver() -> (ReferenceResolver, Arc<InMemoryDataSource>) {
        let source = Arc::new(InMemoryDataSource::new(sample_documents()));
        let catalog = Arc::new(Catalog::new(source.clone()));
        (ReferenceResolver::new(catalog), source)
    }

    #[tokio::test]
    async fn case_insensitive_match() {
        let (resolver, _) = resolver();
        let lower = resolver.resolve_race("tiefling", None).await.expect("loads");
        let exact = resolver.resolve_race("Tiefling", None).await.expect("loads");
        assert!(lower.is_found());
        assert_eq!(lower, exact);
    }

    #[tokio::test]
    async fn apostrophe_styles_match() {
        let (resolver, _) = resolver();
        let resolved = resolver
            .resolve_spell("tasha\u{2019}s hideous laughter", Some("PHB"))
            .await
            .expect("loads");
        assert_eq!(resolved.name(), "Tasha's Hideous Laughter");
    }

    #[tokio::test]
    async fn not_found_is_a_sentinel() {
        let (resolver, _) = resolver();
        let resolved = resolver
            .resolve_spell("Nonexistent Spell", None)
            .await
            .expect("not found is not an error");
        assert_eq!(resolved.name(), "Nonexistent Spell");
        assert_eq!(resolved.error(), Some("Spell not found"));
    }

    #[tokio::test]
    async fn no_prefix_matching() {
        let (resolver, _) = resolver();
        let resolved = resolver.resolve_spell("Fire", None).await.expect("loads");
        assert!(!resolved.is_found());
    }

    #[tokio::test]
    async fn partitioned_kinds_use_the_requested_source() {
        let (resolver, _) = resolver();
        let xge = resolver
            .resolve_spell("Toll the Dead", Some("xge"))
            .await
            .expect("loads");
        assert!(xge.is_found());

        // Default source is PHB, which does not contain it
        let default = resolver
            .resolve_spell("Toll the Dead", None)
            .await
            .expect("loads");
        assert!(!default.is_found());
    }

    #[tokio::test]
    async fn sourceless_creature_tags_use_the_monster_manual() {
        let (resolver, source) = resolver();
        let tags = parse_reference_tags("A {@creature goblin} ambush.");
        let lookup = tags[0].lookup().expect("creature lookup");
        assert_eq!(lookup.source, None);

        let resolved = resolver.lookup(&lookup).await;
        assert!(resolved.is_found(), "{:?}", resolved.error());
        assert_eq!(resolved.entity().map(Entity::source), Some("MM"));
        assert_eq!(source.fetch_count("bestiary/bestiary-mm.json"), 1);
    }

    #[tokio::test]
    async fn unknown_source_is_not_found() {
        let (resolver, _) = resolver();
        let resolved = resolver
            .resolve_spell("Fireball", Some("HOMEBREW"))
            .await
            .expect("unknown source is not an error");
        assert_eq!(resolved.error(), Some("Spell not found"));
    }

    #[tokio::test]
    async fn same_named_records_prefer_requested_source() {
        let (resolver, _) = resolver();

        let default = resolver.resolve_feat("Alert", None).await.expect("loads");
        assert_eq!(default.entity().map(Entity::source), Some("PHB"));

        let xphb = resolver.resolve_feat("alert", Some("XPHB")).await.expect("loads");
        assert_eq!(xphb.entity().map(Entity::source), Some("XPHB"));

        // Unknown source on a non-partitioned kind still finds the first record
        let other = resolver.resolve_feat("Alert", Some("TCE")).await.expect("loads");
        assert_eq!(other.entity().map(Entity::source), Some("XPHB"));
    }

    #[tokio::test]
    async fn unreadable_records_are_skipped() {
        let (resolver, _) = resolver();
        let resolved = resolver
            .resolve_spell("Broken Spell", None)
            .await
            .expect("loads");
        assert!(!resolved.is_found());
    }

    #[tokio::test]
    async fn every_storage_shape_resolves() {
        let (resolver, _) = resolver();

        let sword = resolver.resolve_item("longsword", None).await.expect("items");
        assert!(matches!(sword.entity(), Some(Entity::Item(_))));

        let surge = resolver
            .resolve_class_feature("Action Surge", None)
            .await
            .expect("class features");
        assert!(matches!(surge.entity(), Some(Entity::ClassFeature(_))));

        let wizard = resolver.resolve_class("wizard", None).await.expect("classes");
        assert!(matches!(wizard.entity(), Some(Entity::Class(_))));

        let fever = resolver
            .resolve_condition("cackle fever", None)
            .await
            .expect("diseases live with conditions");
        assert_eq!(fever.entity().map(Entity::source), Some("DMG"));

        let goblin = resolver
            .resolve_monster("Goblin", Some("MM"))
            .await
            .expect("bestiary");
        assert!(matches!(goblin.entity(), Some(Entity::Monster(_))));
    }

    #[tokio::test]
    async fn load_failures_are_errors_but_lookups_degrade() {
        let (resolver, _) = resolver();

        // No skills.json in the sample data
        let err = resolver
            .resolve_skill("Athletics", None)
            .await
            .expect_err("missing document");
        assert!(matches!(err, CatalogError::Load { .. }));

        let lookup = ReferenceLookup::new(EntityKind::Skill, "Athletics").expect("lookup");
        let resolved = resolver.lookup(&lookup).await;
        assert_eq!(resolved.name(), "Athletics");
        assert_eq!(resolved.error(), Some("Skill data could not be loaded"));
    }

    #[tokio::test]
    async fn resolve_tags_memoizes_and_aligns() {
        let (resolver, source) = resolver();
        let tags = parse_reference_tags(
            "{@spell Fireball|PHB}, {@b bold}, {@spell fireball|phb} and {@spell Nope}",
        );

        let resolved = resolver.resolve_tags(&tags).await;
        assert_eq!(resolved.len(), 4);
        assert!(resolved[0].as_ref().is_some_and(ResolvedReference::is_found));
        assert!(resolved[1].is_none());
        assert_eq!(resolved[0], resolved[2]);
        assert_eq!(
            resolved[3].as_ref().and_then(|r| r.error()),
            Some("Spell not found")
        );
        assert_eq!(source.fetch_count("spells/spells-phb.json"), 1);
    }

    #[tokio::test]
    async fn resolve_text_pairs_tags_with_results() {
        let (resolver, _) = resolver();
        let pairs = resolver
            .resolve_text("Cast {@spell fireball} while {@condition blinded}. {@i Really.}")
            .await;
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].1.name(), "Fireball");
        assert_eq!(pairs[1].1.name(), "Blinded");
    }
}
