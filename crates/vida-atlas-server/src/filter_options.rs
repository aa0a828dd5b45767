use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use vida_atlas_api::FilterOptionsDto;
use vida_atlas_model::{canonical_regions, FullMetadata, TaxonomyAxis};
use vida_atlas_store::{DistinctColumn, SpeciesStore, StoreError};

/// Snapshot cache for the filter options response.
///
/// Populate on first miss or after expiry, read-only in between. There is
/// no lock held during recomputation: two concurrent misses may both
/// recompute and the last `put` wins, which is an accepted cost, not a
/// correctness problem.
pub struct FilterOptionsCache {
    ttl: Duration,
    cached: Option<(Instant, FilterOptionsDto)>,
}

impl FilterOptionsCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, cached: None }
    }

    #[must_use]
    pub fn get(&self) -> Option<FilterOptionsDto> {
        self.cached
            .as_ref()
            .filter(|(computed_at, _)| computed_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    pub fn put(&mut self, value: FilterOptionsDto) {
        self.cached = Some((Instant::now(), value));
    }
}

fn clean_insert(set: &mut BTreeSet<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        set.insert(value.to_string());
    }
}

/// Distinct values of one axis: flat-column DISTINCT across all records,
/// plus values recovered from the metadata blob of records whose flat
/// column is missing.
fn axis_values(store: &SpeciesStore, column: DistinctColumn) -> Result<Vec<String>, StoreError> {
    let mut values: BTreeSet<String> = BTreeSet::new();
    for value in store.distinct_values(column)? {
        clean_insert(&mut values, &value);
    }
    for blob in store.metadata_for_missing(column)? {
        let Some(metadata) = FullMetadata::parse(&blob) else {
            continue;
        };
        let recovered = match column {
            DistinctColumn::Status => metadata.conservation_status.as_deref(),
            DistinctColumn::Taxonomy(axis) => {
                metadata.taxonomy.as_ref().and_then(|t| t.get(axis))
            }
        };
        if let Some(value) = recovered {
            clean_insert(&mut values, value);
        }
    }
    Ok(values.into_iter().collect())
}

/// Full-collection scan producing the filter UI value sets, all sorted
/// ascending. Regions are the union of each record's normalized location
/// set, always a subset of the closed canonical list.
pub fn compute_filter_options(store: &SpeciesStore) -> Result<FilterOptionsDto, StoreError> {
    let regions: Vec<String> = store
        .all_top_locations()?
        .iter()
        .flat_map(|raw| canonical_regions(raw))
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    Ok(FilterOptionsDto {
        regions,
        kingdom: axis_values(store, DistinctColumn::Taxonomy(TaxonomyAxis::Kingdom))?,
        phylum: axis_values(store, DistinctColumn::Taxonomy(TaxonomyAxis::Phylum))?,
        class: axis_values(store, DistinctColumn::Taxonomy(TaxonomyAxis::Class))?,
        order: axis_values(store, DistinctColumn::Taxonomy(TaxonomyAxis::Order))?,
        family: axis_values(store, DistinctColumn::Taxonomy(TaxonomyAxis::Family))?,
        status: axis_values(store, DistinctColumn::Status)?,
    })
}
